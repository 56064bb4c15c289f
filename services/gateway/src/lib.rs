//! HTTP/WebSocket gateway for the league core
//!
//! Thin edge over `league_engine::LeagueStore` and the `scoreboard` read
//! side: identity extraction from proxy headers, request/response DTOs,
//! error-to-status mapping, and the invalidation fan-out socket.

pub mod catalog_loader;
pub mod config;
pub mod error;
pub mod handlers;
pub mod identity;
pub mod models;
pub mod router;
pub mod state;
