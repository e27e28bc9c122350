//! Causette is a terminal-first chat client for a multi-provider AI
//! inference gateway.
//!
//! The crate is organized around a small set of collaborating layers:
//! - [`core`] owns the session state: the provider catalog, provider/model
//!   selection, persisted settings, the conversation transcript, and the
//!   dispatch of outgoing chat turns.
//! - [`ui`] renders the full-screen terminal interface and runs the
//!   interactive event loop that drives user input and display updates.
//! - [`api`] defines the gateway's wire payloads and the HTTP client used to
//!   talk to it.
//!
//! Runtime entrypoints live in the binary crate (`src/main.rs`) and route
//! through [`crate::cli::main`], which dispatches into the subcommands and
//! [`ui::chat_loop`] for interactive sessions.

pub mod api;
pub mod cli;
pub mod core;
pub mod ui;
pub mod utils;
