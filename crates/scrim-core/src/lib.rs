//! Scrim Core - shared types for the stick-fighter simulation
//!
//! Provides the error type, 2D spatial primitives, and the gameplay
//! tuning table used by every other Scrim crate.

pub mod error;
pub mod tuning;
pub mod types;

pub use error::{Result, ScrimError};
pub use tuning::Tuning;
pub use types::{Circle, Rect, Vec2};
