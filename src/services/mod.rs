pub mod match_service;
pub mod prediction_service;
pub mod roster_service;
pub mod telemetry;
pub mod vote_service;

pub use match_service::MatchService;
pub use prediction_service::PredictionService;
pub use roster_service::RosterService;
pub use vote_service::VoteService;
