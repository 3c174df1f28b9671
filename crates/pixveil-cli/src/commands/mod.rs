pub mod hide;
pub mod metrics;
pub mod package;
pub mod unpackage;
pub mod unveil;
