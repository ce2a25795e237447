//! Data models

pub mod request;
pub mod features;
pub mod prediction;

pub use request::*;
pub use features::*;
pub use prediction::*;
