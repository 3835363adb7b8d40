//! Configuration.
//!
//! Endpoint descriptors, the TOML configuration file schema, and its
//! loader.

mod file;
mod types;

pub use file::{from_path, from_str, load, LOCAL_CONFIG_NAME};
pub use types::{AgentSection, EndpointConfig, LimitsSection, MeshConfig};
