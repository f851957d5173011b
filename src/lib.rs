pub mod adjacency;
pub mod builder;
pub mod error;
pub mod helpers;
pub mod matcher;
pub mod pixel;
pub mod puzzle;
pub mod scanner;
pub mod tile;

pub use error::{MosaicError, Result};
