//! Core domain + application logic for the jrrp bot: daily luck and the
//! community quote board.
//!
//! This crate is intentionally framework-agnostic. Telegram, SQLite and the
//! remote quote API live behind ports (traits) implemented in adapter crates.

pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod formatting;
pub mod logging;
pub mod luck;
pub mod messaging;
pub mod ports;
pub mod quotes;
pub mod random;
pub mod service;

pub use errors::{Error, Result};
