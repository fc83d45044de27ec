use serde::Serialize;

use crate::riot::catalog::Family;
use crate::riot::client::RiotClient;
use crate::riot::outcome::{ApiOutcome, RiotApiError};
use crate::riot::region::Region;
use crate::riot::types::{
    LobbyEventWrapperDto, ProviderRegistrationParameters, TournamentRegistrationParameters,
};

impl RiotClient {
    /// Register a stub tournament provider. Returns the provider id.
    pub async fn register_stub_provider(
        &self,
        region: Region,
        params: &ProviderRegistrationParameters,
    ) -> ApiOutcome<i64> {
        self.post_stub(region, "providers", params).await
    }

    /// Register a stub tournament for `params.provider_id`. Returns the tournament id.
    pub async fn register_stub_tournament(
        &self,
        region: Region,
        params: &TournamentRegistrationParameters,
    ) -> ApiOutcome<i64> {
        self.post_stub(region, "tournaments", params).await
    }

    pub async fn get_stub_lobby_events(
        &self,
        region: Region,
        tournament_code: &str,
    ) -> ApiOutcome<LobbyEventWrapperDto> {
        let request = self.get(
            region,
            Family::TournamentStubV5,
            "lobby-events",
            &[("tournamentCode", tournament_code)],
        );

        self.fetch(request).await
    }

    async fn post_stub(
        &self,
        region: Region,
        endpoint: &str,
        params: &impl Serialize,
    ) -> ApiOutcome<i64> {
        let body = match serde_json::to_value(params) {
            Ok(body) => body,
            Err(err) => return ApiOutcome::Failed(RiotApiError::InvalidRequest(err.to_string())),
        };
        let request = self.post(region, Family::TournamentStubV5, endpoint, &[], body);

        self.fetch(request).await
    }
}
