//! HTTP surface: the server-rendered form page and the JSON API.
//!
//! - **[`handlers`]**: Axum route handlers
//! - **[`models`]**: Request/response data structures
//!
//! # Routes
//!
//! - `GET /` and `POST /generate`: the form page and its submission
//! - `POST /api/v1/generations`: JSON generation endpoint
//! - `GET /api/docs`: OpenAPI documentation for the JSON endpoint

pub mod handlers;
pub mod models;
pub mod openapi;
