//! # Jarvis Core
//!
//! Domain types, traits, and error definitions for the Jarvis agentic
//! execution engine. This crate has **zero framework dependencies** and
//! defines the domain model that all other crates implement against.
//!
//! ## Design Philosophy
//!
//! Every collaborator of the reasoning loop is a trait here:
//! - [`Provider`]: a text-generation backend (fast/local or capable/remote)
//! - [`Tool`]: a text-in/text-out capability the agent can invoke
//! - [`MemoryBackend`]: long-term memory the agent recalls from
//!
//! Implementations live in their respective crates, which keeps the
//! dependency graph pointing inward and makes every seam mockable in tests.

pub mod error;
pub mod memory;
pub mod message;
pub mod provider;
pub mod tool;

// Re-export key types at crate root for ergonomics
pub use error::{Error, Result};
pub use memory::{MemoryBackend, MemoryEntry, MemoryQuery};
pub use message::{Message, Role};
pub use provider::{ChunkReceiver, Provider, ProviderRequest, ProviderResponse, StreamChunk};
pub use tool::{Tool, ToolRegistry};
