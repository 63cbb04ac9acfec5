//! Client core for a remote todo list.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). The host executes the
//! round-trip with whatever HTTP client it has, which keeps the core
//! deterministic and testable.
//!
//! # Design
//! - `TodoClient` is stateless: it holds only `base_url` and splits every
//!   operation into `build_*` and `parse_*`.
//! - `TodoScreen` owns the screen state (list, input, editing selection) and
//!   hands out ticketed requests; completions come back through
//!   `TodoScreen::complete` / `TodoScreen::fail`.
//! - The `blocking` feature adds a `ureq` transport and a driver loop for
//!   hosts that are happy to block.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

#[cfg(feature = "blocking")]
pub mod blocking;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod screen;
pub mod types;

pub use client::TodoClient;
pub use config::{ClientConfig, ConfigError, ResyncMode, DEFAULT_BASE_URL};
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use screen::{Direction, EditState, Outbound, Ticket, TodoScreen};
pub use types::{CreateTodo, TodoId, TodoItem, UpdateTodo};
