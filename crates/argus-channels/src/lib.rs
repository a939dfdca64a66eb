//! # argus-channels
//!
//! Bundled [`Transport`](argus_core::traits::Transport) implementations.
//!
//! The production messaging session (connect, authenticate, roster) is
//! an external collaborator that plugs into the same trait; this crate
//! ships the line-oriented stdio transport used for local operation and
//! diagnostics.

mod stdio;

pub use stdio::StdioTransport;
