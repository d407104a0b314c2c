//! RayBridge Core Library
//!
//! Common types, coordinate conversion, logging setup and error handling
//! shared across all RayBridge components.

pub mod convert;
pub mod error;
pub mod logging;
pub mod types;

pub use convert::convert;
pub use error::{Error, Result, ResultExt, Skip};
pub use types::*;

/// Re-export commonly used items
pub mod prelude {
    pub use crate::convert::convert;
    pub use crate::error::{Error, Result, ResultExt, Skip};
    pub use crate::types::*;
}
