//! Domain models
//!
//! This module contains all domain models used throughout the application.

pub mod attempt;
pub mod knowledge_point;
pub mod problem;

pub use attempt::*;
pub use knowledge_point::*;
pub use problem::*;
