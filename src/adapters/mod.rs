//! Adapters - implementations of the ports.

pub mod action;
pub mod engine;
pub mod http;
pub mod memory;
pub mod postgres;
