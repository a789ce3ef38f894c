//! HTTP request handlers.
//!
//! - [`generations`]: JSON generation endpoint
//! - [`pages`]: form page rendering and form submission

pub mod generations;
pub mod pages;
