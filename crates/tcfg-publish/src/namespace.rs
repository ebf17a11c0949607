//! Namespace binding resolution.
//!
//! A binding is a logical name such as `TARGETS`. It resolves to a concrete
//! key-value namespace identifier through, in order:
//!
//! 1. the `KV_<BINDING>_ID` override from the injected [`EnvSource`]
//! 2. the default table held by [`NamespaceConfig`]

use std::collections::{BTreeMap, HashMap};

use crate::error::NamespaceError;

/// Default identifier for the `TARGETS` binding.
pub const DEFAULT_TARGETS_NAMESPACE_ID: &str = "785ea4814d824d0194e2045d9b3e6b52";

/// Default identifier for the `STATE` binding.
pub const DEFAULT_STATE_NAMESPACE_ID: &str = "f0a23e908a894a88a2d1633ef469ddad";

/// Key/value lookup used for namespace overrides.
pub trait EnvSource {
    fn get(&self, key: &str) -> Option<String>;
}

/// Reads overrides from the process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

impl EnvSource for HashMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        HashMap::get(self, key).cloned()
    }
}

impl EnvSource for BTreeMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        BTreeMap::get(self, key).cloned()
    }
}

/// Environment variable that overrides `binding`.
pub fn override_key(binding: &str) -> String {
    format!("KV_{binding}_ID")
}

/// Default identifiers plus the override source.
pub struct NamespaceConfig {
    defaults: BTreeMap<String, String>,
    env: Box<dyn EnvSource>,
}

impl NamespaceConfig {
    /// Config with the built-in default table and the given override source.
    pub fn new(env: impl EnvSource + 'static) -> Self {
        Self::empty(env)
            .with_default("TARGETS", DEFAULT_TARGETS_NAMESPACE_ID)
            .with_default("STATE", DEFAULT_STATE_NAMESPACE_ID)
    }

    /// Config with no defaults; only overrides resolve.
    pub fn empty(env: impl EnvSource + 'static) -> Self {
        Self {
            defaults: BTreeMap::new(),
            env: Box::new(env),
        }
    }

    /// Add or replace the default identifier for `binding`.
    #[must_use]
    pub fn with_default(mut self, binding: &str, namespace_id: &str) -> Self {
        self.defaults
            .insert(binding.to_string(), namespace_id.to_string());
        self
    }

    /// Resolve `binding` to a namespace identifier.
    ///
    /// An override set to the empty string counts as unset.
    pub fn resolve(&self, binding: &str) -> Result<String, NamespaceError> {
        let env_key = override_key(binding);
        if let Some(id) = self.env.get(&env_key).filter(|id| !id.is_empty()) {
            tracing::debug!(binding, env_key = %env_key, "namespace id from override");
            return Ok(id);
        }
        self.defaults
            .get(binding)
            .cloned()
            .ok_or(NamespaceError::UnknownBinding {
                binding: binding.to_string(),
                env_key,
            })
    }
}

impl std::fmt::Debug for NamespaceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NamespaceConfig")
            .field("defaults", &self.defaults)
            .finish_non_exhaustive()
    }
}
