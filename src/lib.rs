//! # Sniped
//!
//! Answers "is anyone in my live game someone I've recently played with
//! or against?" by cross-referencing the lobby against match history.
//!
//! ## Architecture
//!
//! - **models**: Identities, matches, lobbies and overlap records
//! - **analysis**: The overlap analyzer and presentation math
//! - **fetch**: Upstream API client (identity, live game, match history)
//! - **pipeline**: Fetch-then-analyze flow shared by CLI and API
//! - **report**: Terminal table rendering
//! - **api**: REST API endpoints
//! - **config**: Configuration loading and validation

pub mod analysis;
pub mod api;
pub mod config;
pub mod fetch;
pub mod models;
pub mod pipeline;
pub mod report;

pub use analysis::{analyze, OverlapReport};
pub use models::*;
