//! Removal job quoting service
//!
//! Prices a move from its surveyed inventory, the access at both ends, the
//! distance between them and the company's rate table.

pub mod api;
pub mod app;
pub mod config;
pub mod domain;
pub mod error;
pub mod logging;
pub mod middleware;
pub mod pricing;
pub mod routes;
pub mod services;
