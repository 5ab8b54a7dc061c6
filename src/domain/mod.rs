//! Domain layer containing business entities and logic.
//!
//! Independent of infrastructure and presentation concerns.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//! - [`warranty`] - Warranty end date and status rules
//! - [`clock`] - Injectable evaluation date
//!
//! # Design Principles
//!
//! - Domain layer has no dependencies on infrastructure or presentation layers
//! - Repository traits define contracts implemented by infrastructure layer
//! - Warranty status is derived on read and never stored

pub mod clock;
pub mod entities;
pub mod repositories;
pub mod warranty;
