//! Sceneforge Core Library
//!
//! This crate provides the scene-graph snapshot model, math types, and
//! error handling shared across all sceneforge components.

pub mod error;
pub mod scene;
pub mod types;

pub use error::{Error, Result, ResultExt};
pub use scene::*;
pub use types::*;

/// Re-export commonly used items
pub mod prelude {
    pub use crate::error::{Error, Result, ResultExt};
    pub use crate::scene::*;
    pub use crate::types::*;
}
