//! Core type definitions for Foreshadow.
//!
//! This crate defines the fundamental, host-agnostic types used throughout
//! the prefetch engine:
//! - Request and node identifiers (UUID v7)
//! - Swap styles and swap specifications
//!
//! Everything that touches a real DOM, a real network, or a real host
//! framework belongs behind the traits in the downstream crates, not here.

mod ids;
mod swap;

pub use ids::{NodeId, RequestToken};
pub use swap::{SwapSpec, SwapStyle};
