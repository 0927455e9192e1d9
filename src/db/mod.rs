pub mod match_queries;
pub mod prediction_queries;
pub mod vote_queries;
