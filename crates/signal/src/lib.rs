pub mod classifier;
pub mod dedup;
pub mod indicator;
