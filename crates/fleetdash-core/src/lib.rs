//! Foundational types shared across fleetdash crates.
//!
//! Provides the agent registry (display name to backend key lookup and agent
//! kinds) plus timestamp helpers used by the projector and listings.

pub mod agent_registry;
pub mod time_utils;

pub use agent_registry::{
    fallback_backend_key, AgentIdentity, AgentKind, AgentRegistry, AgentRegistryEntry,
    RegistryError,
};
pub use time_utils::{format_timestamp, parse_timestamp};
