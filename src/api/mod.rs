//! HTTP surface of the service, mounted under `/api`.
//!
//! Handlers stay thin: they validate the request body, call one application
//! service and map the result into a response DTO. Authentication happens in
//! [`middleware::auth`] before a protected handler runs.

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
