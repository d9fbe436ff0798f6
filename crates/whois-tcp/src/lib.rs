//! # whois-tcp
//!
//! Blocking TCP query handler for whois-transport.
//! This crate performs one request/response exchange per call over a freshly
//! opened socket.
//!
//! ## Behaviour
//!
//! - **Framing**: the query is sent once, followed by a single `\r\n`
//! - **Response**: everything the server sends until it closes the connection
//! - **Cleanup**: the socket is closed exactly once on every exit path
//! - **Errors**: transport failures come back as one [`ConnectionError`] kind
//! - **No policy**: no retries, pooling or default timeouts
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use whois_tcp::{ConnectionParams, QueryHandler, SocketHandler};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let params = ConnectionParams::new("whois.iana.org", 43);
//!     let response = SocketHandler::new().execute("example.com", &params)?;
//!     println!("{response}");
//!     Ok(())
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

mod connection;
mod handler;

pub use connection::QUERY_TERMINATOR;
pub use handler::SocketHandler;

// Re-export handler traits for convenience
pub use whois_transport_traits::{
    ConnectionError, ConnectionParams, ConnectionParamsBuilder, ErrorCategory, ExchangeState,
    QueryError, QueryHandler, QueryResult,
};
