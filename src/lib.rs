#![doc = "The `tickbox` library crate."]
#![doc = ""]
#![doc = "This crate contains the domain models, authentication mechanisms (password"]
#![doc = "hashing, token issuance/verification, request gating), ownership-scoped todo"]
#![doc = "operations, routing configuration, and error handling for the Tickbox API."]
#![doc = "It is used by the main binary (`main.rs`) to construct and run the application."]

pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod todos;

// lib.rs primarily declares modules for the library crate.
// The application setup (app factory) lives in main.rs; integration tests
// assemble the same App inline from the pieces exported here.
