//! API request and response data models.
//!
//! - [`generations`]: JSON generation request/response and the form submission payload

pub mod generations;
