//! API request handlers.
//!
//! This module contains all HTTP request handlers organized by functionality.

/// Two-product comparison search handler.
pub mod compare;
/// Liveness and wiring information.
pub mod health;
/// Research pipeline handler.
pub mod research;
