//! Test doubles for tracker adapters
//!
//! This crate provides a scripted implementation of the `Transport` trait that
//! answers from a queue instead of making HTTP requests, and an event log that
//! keeps every entry in memory. They are designed for:
//!
//! 1. **Failure paths**: make a request fail at the transport level on demand
//! 2. **No-network assertions**: every executed request lands in a call log
//! 3. **Log assertions**: count ERROR and WARNING events an adapter emitted
//!
//! # Usage
//!
//! ```
//! use tracker_mock::{ScriptedReply, ScriptedTransport};
//!
//! let transport = ScriptedTransport::new("https://gitlab.example.com/api/v4")
//!     .reply(ScriptedReply::json(200, serde_json::json!({"version": "16.0"})))
//!     .reply(ScriptedReply::fail("connection reset"));
//! let calls = transport.calls();
//! assert!(calls.is_empty());
//! ```

mod log;
mod transport;

pub use log::RecordingLog;
pub use transport::{CallLog, CallLogEntry, ScriptedReply, ScriptedTransport};
