//! API Routes
//!
//! Route handlers organized by functionality.

pub mod datasets;
pub mod export;
pub mod health;
pub mod series;
