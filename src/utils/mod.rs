//! Small helpers shared across layers.

pub mod logger;
pub mod text;
