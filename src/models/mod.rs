pub mod amateur_match;
pub mod common;
pub mod prediction;
pub mod vote;
