//! Configuration loading functionality.
//!
//! This module provides the [`PolicyLoader`] type for loading the
//! scheduling policy from a YAML file.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::SchedulePolicy;

/// Loads and provides access to the scheduling policy.
///
/// The `PolicyLoader` reads a single YAML policy file. Deployments that
/// have no file use [`SchedulePolicy::default`] instead.
///
/// # Example
///
/// ```no_run
/// use roster_engine::config::PolicyLoader;
///
/// let loader = PolicyLoader::load("./config/policy.yaml").unwrap();
/// println!("Tolerance: {} minutes", loader.policy().tolerance_minutes);
/// ```
#[derive(Debug, Clone)]
pub struct PolicyLoader {
    policy: SchedulePolicy,
}

impl PolicyLoader {
    /// Loads the policy from the specified YAML file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the policy file (e.g., "./config/policy.yaml")
    ///
    /// # Returns
    ///
    /// Returns a `PolicyLoader` instance on success, or an error if the
    /// file is missing or contains invalid YAML.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use roster_engine::config::PolicyLoader;
    ///
    /// let loader = PolicyLoader::load("./config/policy.yaml")?;
    /// # Ok::<(), roster_engine::error::EngineError>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        let policy =
            serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
                path: path_str,
                message: e.to_string(),
            })?;

        Ok(Self { policy })
    }

    /// Returns the loaded policy.
    pub fn policy(&self) -> &SchedulePolicy {
        &self.policy
    }

    /// Consumes the loader, returning the policy.
    pub fn into_policy(self) -> SchedulePolicy {
        self.policy
    }
}
