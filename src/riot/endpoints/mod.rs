//! Riot API endpoints, one file per API family.

mod account;
mod challenges;
mod clash;
mod league;
mod mastery;
mod match_v5;
mod platform;
mod spectator;
mod summoner;
mod tournament_stub;

pub use match_v5::MatchIdsQuery;
