mod grid;
mod hide_options;
pub mod image;
mod primitives;
mod types;

pub use grid::*;
pub use hide_options::*;
pub use primitives::*;
pub use types::*;
