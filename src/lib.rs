//! Dialogue Relay - orchestration backend for a conversational-AI stack.
//!
//! Bridges a chat client with a remote dialogue engine (NLU, trackers,
//! model lifecycle) and a separate action-execution service, keeping a
//! best-effort local cache of conversation state and a record of trained
//! models.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
