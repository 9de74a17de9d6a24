//! Typed client for the student records REST API.
//!
//! # Overview
//! Create, read, update, delete and search students against the `/students`
//! collection. Every operation is a single stateless request; the server is
//! authoritative and its answer is returned unchanged.
//!
//! # Design
//! - `StudentClient` is sans-IO: `build_*` produces an `HttpRequest`,
//!   `parse_*` consumes an `HttpResponse`.
//! - `Transport` is the I/O seam; `UreqTransport` (feature `ureq`, on by
//!   default) is the blocking implementation.
//! - `StudentService` is the facade that wires the two together.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod service;
pub mod transport;
pub mod types;

pub use client::StudentClient;
pub use config::ClientConfig;
pub use error::{ApiError, ConfigError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use service::StudentService;
pub use transport::Transport;
#[cfg(feature = "ureq")]
pub use transport::UreqTransport;
pub use types::{Student, StudentBase, StudentCreate, StudentUpdate};
