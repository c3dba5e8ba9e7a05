//! HTTP API Handlers and Routes
//!
//! This module provides the REST API layer for Pricewise, built on the Axum web framework.
//!
//! # Module Structure
//!
//! - [`api::handlers`](crate::api::handlers) - Request handlers for each endpoint
//! - [`api::routes`](crate::api::routes) - Route definitions and router configuration
//!
//! # API Endpoints
//!
//! ## Research (`/api/research`)
//! - `POST /api/research` - Run the full research pipeline for `{"query": ...}`
//!
//! ## Compare (`/api/compare`)
//! - `POST /api/compare` - Comparison search for two products
//!
//! ## Health (`/api/health`)
//! - `GET /api/health` - Health check endpoint
//!
//! Errors are returned as `{"error": "..."}` with a 4xx/5xx status.

/// Request and response handlers for all API endpoints.
pub mod handlers;
/// Router configuration and route definitions.
pub mod routes;
