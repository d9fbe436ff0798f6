//! # whois-transport traits
//!
//! Core types shared by every whois query transport.
//! This crate provides the abstractions a transport implementation depends on,
//! without pulling in any socket code itself.
//!
//! ## Overview
//!
//! This crate defines:
//! - **Traits**: [`QueryHandler`]
//! - **Types**: [`ExchangeState`]
//! - **Errors**: [`ErrorCategory`], [`ConnectionError`], [`QueryError`], [`QueryResult`]
//! - **Config**: [`ConnectionParams`], [`ConnectionParamsBuilder`]
//!
//! ## Usage
//!
//! Transport implementations depend on this crate and implement [`QueryHandler`]:
//!
//! ```rust,ignore
//! use whois_transport_traits::{ConnectionParams, QueryHandler, QueryResult};
//!
//! #[derive(Debug)]
//! struct MyHandler;
//!
//! impl QueryHandler for MyHandler {
//!     fn execute(&self, query: &str, params: &ConnectionParams) -> QueryResult<String> {
//!         /* ... */
//!     }
//! }
//! ```

#![warn(
    missing_docs,
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub,
    clippy::all
)]
#![deny(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::must_use_candidate
)]

mod config;
mod error;
mod traits;
mod types;

// Re-export all public items
pub use config::{ConnectionParams, ConnectionParamsBuilder};
pub use error::{ConnectionError, ErrorCategory, QueryError, QueryResult};
pub use traits::QueryHandler;
pub use types::ExchangeState;
