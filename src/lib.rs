//! Stockzy Library
//!
//! Core of the Stockzy inventory dashboard: the product query engine that
//! filters and sorts the catalog table, the access gate that decides which
//! dashboard pages a session may open, and in-memory mock services standing
//! in for the product, inventory and identity APIs.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

pub mod auth;
pub mod config;
pub mod errors;
pub mod models;
pub mod queries;
pub mod services;

pub use auth::{authorize, AccessGate, Decision, Session};
pub use errors::ServiceError;
pub use queries::{query, ProductFilter};
