//! REST API client module for the GoBarber backend.
//!
//! `ApiClient` talks to the backend over HTTP. Callers depend on the
//! `AuthApi` trait instead of the concrete client, so tests can swap in
//! a stub without a network.

pub mod client;
pub mod error;

pub use client::{ApiClient, AuthApi, Credentials, NewUser, SessionResponse};
pub use error::ApiError;
