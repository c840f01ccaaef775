//! Core library for the GoBarber client.
//!
//! - `api`: HTTP client for the GoBarber REST API
//! - `auth`: the session store (token + user, persisted to durable storage)
//! - `storage`: local key-value storage that survives restarts
//! - `toast`: transient notifications with a fixed auto-dismiss timer
//! - `forms`: client-side validation for the sign-in and sign-up forms
//! - `account`: form submission flows tying the pieces together
//! - `config`: application configuration

pub mod account;
pub mod api;
pub mod auth;
pub mod config;
pub mod forms;
pub mod storage;
pub mod toast;
