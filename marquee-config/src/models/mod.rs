pub mod artwork;

pub use artwork::{ArtworkConfig, ArtworkConfigSource};
