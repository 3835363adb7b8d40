//! Configuration file loading.
//!
//! Configuration is TOML. Search order: an explicit path if given, then
//! `a2a-mesh.toml` in the working directory, then the user config
//! directory (`~/.config/a2a-mesh/config.toml` on Linux). A missing file
//! yields the defaults; a malformed one is an error.

use crate::config::types::MeshConfig;
use crate::error::AgentError;
use std::path::{Path, PathBuf};

/// File name searched for in the working directory.
pub const LOCAL_CONFIG_NAME: &str = "a2a-mesh.toml";

/// Loads configuration from the standard search paths.
///
/// # Errors
///
/// Returns a configuration error when a found file cannot be read or
/// parsed, or fails validation.
pub fn load() -> Result<MeshConfig, AgentError> {
    for path in search_paths() {
        if path.is_file() {
            return from_path(&path);
        }
    }
    Ok(MeshConfig::default())
}

/// Loads configuration from an explicit path.
///
/// # Errors
///
/// Returns a configuration error when the file cannot be read or parsed,
/// or fails validation.
pub fn from_path(path: &Path) -> Result<MeshConfig, AgentError> {
    let contents = std::fs::read_to_string(path).map_err(|e| {
        AgentError::configuration("config", format!("cannot read '{}': {e}", path.display()))
    })?;
    tracing::debug!(path = %path.display(), "Loading configuration");
    from_str(&contents)
}

/// Parses configuration from a TOML string.
///
/// # Errors
///
/// Returns a configuration error when the TOML is malformed or the
/// contents fail validation.
pub fn from_str(contents: &str) -> Result<MeshConfig, AgentError> {
    let config: MeshConfig = toml::from_str(contents)
        .map_err(|e| AgentError::configuration("config", e.to_string()))?;
    config.validate()?;
    Ok(config)
}

fn search_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(LOCAL_CONFIG_NAME)];
    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("a2a-mesh").join("config.toml"));
    }
    paths
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_toml_is_a_configuration_error() {
        let err = from_str("not = [valid").unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn invalid_endpoint_fails_validation() {
        let err = from_str(
            r#"
            [[endpoints]]
            url = "http://localhost:8001"
            name = "Order Agent"
            function_name = ""
            "#,
        )
        .unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn empty_string_yields_defaults() {
        let config = from_str("").unwrap();
        assert!(config.endpoints.is_empty());
    }
}
