use crate::riot::catalog::Family;
use crate::riot::client::RiotClient;
use crate::riot::outcome::ApiOutcome;
use crate::riot::region::Region;
use crate::riot::types::MatchDto;

/// Filters of the match id listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchIdsQuery {
    pub start: Option<u32>,
    /// Clamped to [`MatchIdsQuery::MAX_COUNT`].
    pub count: Option<u32>,
    pub queue: Option<i32>,
    /// `ranked`, `normal`, `tourney` or `tutorial`.
    pub match_type: Option<String>,
    /// Epoch seconds.
    pub start_time: Option<i64>,
    /// Epoch seconds.
    pub end_time: Option<i64>,
}

impl MatchIdsQuery {
    pub const MAX_COUNT: u32 = 100;

    pub fn page(start: u32, count: u32) -> Self {
        Self {
            start: Some(start),
            count: Some(count),
            ..Self::default()
        }
    }

    pub fn queue(mut self, queue: i32) -> Self {
        self.queue = Some(queue);
        self
    }

    pub fn pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();

        if let Some(start) = self.start {
            pairs.push(("start".to_string(), start.to_string()));
        }
        if let Some(count) = self.count {
            pairs.push(("count".to_string(), count.min(Self::MAX_COUNT).to_string()));
        }
        if let Some(queue) = self.queue {
            pairs.push(("queue".to_string(), queue.to_string()));
        }
        if let Some(match_type) = &self.match_type {
            pairs.push(("type".to_string(), match_type.clone()));
        }
        if let Some(start_time) = self.start_time {
            pairs.push(("startTime".to_string(), start_time.to_string()));
        }
        if let Some(end_time) = self.end_time {
            pairs.push(("endTime".to_string(), end_time.to_string()));
        }

        pairs
    }
}

impl RiotClient {
    /// Get list of match IDs by PUUID, most recent first
    /// Uses regional routing (americas, europe, asia, sea)
    pub async fn get_match_ids(
        &self,
        region: Region,
        puuid: &str,
        query: &MatchIdsQuery,
    ) -> ApiOutcome<Vec<String>> {
        let request = self
            .get(region, Family::MatchV5, "by-puuid", &[("puuid", puuid)])
            .map(|r| r.with_query(query.pairs()));

        self.fetch(request).await
    }

    /// Get match details by match ID
    /// Uses regional routing (americas, europe, asia, sea)
    pub async fn get_match(&self, region: Region, match_id: &str) -> ApiOutcome<MatchDto> {
        let request = self.get(region, Family::MatchV5, "by-match", &[("matchId", match_id)]);

        self.fetch(request).await
    }

    pub async fn get_match_timeline(
        &self,
        region: Region,
        match_id: &str,
    ) -> ApiOutcome<serde_json::Value> {
        let request = self.get(region, Family::MatchV5, "timeline", &[("matchId", match_id)]);

        self.fetch(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_is_clamped() {
        let pairs = MatchIdsQuery::page(20, 250).pairs();

        assert_eq!(
            pairs,
            vec![
                ("start".to_string(), "20".to_string()),
                ("count".to_string(), "100".to_string()),
            ]
        );
    }

    #[test]
    fn only_set_filters_are_sent() {
        let query = MatchIdsQuery {
            match_type: Some("ranked".into()),
            end_time: Some(1_700_000_000),
            ..MatchIdsQuery::default()
        }
        .queue(420);

        assert_eq!(
            query.pairs(),
            vec![
                ("queue".to_string(), "420".to_string()),
                ("type".to_string(), "ranked".to_string()),
                ("endTime".to_string(), "1700000000".to_string()),
            ]
        );
    }
}
