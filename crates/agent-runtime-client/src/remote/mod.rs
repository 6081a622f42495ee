//! HTTP-backed agent runtime.
//!
//! Wire-level concerns live here so the rest of the crate only sees the
//! `AgentRuntime` seam and classified `RawFragment`s.
mod client;
mod config;
pub(crate) mod transport;

pub use client::RemoteAgentRuntime;
pub use config::RemoteRuntimeConfig;
