pub mod aggregator;
pub mod formations;
pub mod lifecycle;
pub mod scoring;
