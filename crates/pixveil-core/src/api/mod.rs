pub mod hide;
pub mod metrics;
pub mod package;
pub mod unveil;
