//! Target names and labels for the board.
//!
//! Everything has a built-in default, so the board runs with no
//! configuration at all. Individual values can be overridden with
//! `MISSION_CONTROL_*` environment variables, e.g.
//! `MISSION_CONTROL_CONTAINER_NAME=jenkins-lts`.

use anyhow::Result;
use config::{Config, Environment};
use serde::Deserialize;

/// Prefix for environment overrides.
pub const ENV_PREFIX: &str = "MISSION_CONTROL";

/// Names of the watched resources and the crest labels.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    /// Compute instance looked up by the cloud probe.
    pub instance_name: String,
    /// Region shown next to the instance.
    pub instance_region: String,
    /// Container inspected by the container probe.
    pub container_name: String,
    /// Where to find the VPN client when it is not on `PATH`.
    pub overlay_fallback: String,
    pub node_label: String,
    pub version_label: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            instance_name: "ai-lab-spot".to_string(),
            instance_region: "us-central1".to_string(),
            container_name: "jenkins".to_string(),
            overlay_fallback: "/usr/sbin/tailscale".to_string(),
            node_label: "PI5".to_string(),
            version_label: "1.8".to_string(),
        }
    }
}

impl Settings {
    /// Defaults layered with the process environment.
    pub fn load() -> Result<Self> {
        Self::from_environment(Environment::with_prefix(ENV_PREFIX))
    }

    fn from_environment(env: Environment) -> Result<Self> {
        let defaults = Self::default();
        let config = Config::builder()
            .set_default("instance_name", defaults.instance_name)?
            .set_default("instance_region", defaults.instance_region)?
            .set_default("container_name", defaults.container_name)?
            .set_default("overlay_fallback", defaults.overlay_fallback)?
            .set_default("node_label", defaults.node_label)?
            .set_default("version_label", defaults.version_label)?
            .add_source(env)
            .build()?;

        Ok(config.try_deserialize()?)
    }
}
