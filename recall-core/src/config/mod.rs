pub mod classifier_config;
pub mod consolidation_config;
pub mod decay_config;
pub mod embedding_config;
pub mod profile_cache_config;
pub mod relationship_config;
pub mod retrieval_config;
pub mod storage_config;

pub use classifier_config::ClassifierConfig;
pub use consolidation_config::ConsolidationConfig;
pub use decay_config::DecayConfig;
pub use embedding_config::EmbeddingConfig;
pub use profile_cache_config::ProfileCacheConfig;
pub use relationship_config::RelationshipConfig;
pub use retrieval_config::RetrievalConfig;
pub use storage_config::StorageConfig;

use serde::{Deserialize, Serialize};

use crate::errors::RecallError;

/// Aggregate configuration for a `RecallEngine`. Every sub-config is
/// `#[serde(default)]`, so a caller may supply a partial TOML document and
/// get defaults for everything else.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RecallConfig {
    pub storage: StorageConfig,
    pub embedding: EmbeddingConfig,
    pub relationships: RelationshipConfig,
    pub classifier: ClassifierConfig,
    pub profile_cache: ProfileCacheConfig,
    pub decay: DecayConfig,
    pub consolidation: ConsolidationConfig,
    pub retrieval: RetrievalConfig,
}

impl RecallConfig {
    /// Parse a `RecallConfig` from a TOML document. Missing sections and
    /// fields fall back to their defaults.
    pub fn from_toml(source: &str) -> Result<Self, RecallError> {
        toml::from_str(source)
            .map_err(|e| RecallError::ConfigurationError(e.to_string()))
    }

    /// Validate cross-cutting invariants that a single sub-config cannot
    /// check on its own (e.g. threshold ordering).
    pub fn validate(&self) -> Result<(), RecallError> {
        if self.embedding.dimensions == 0 {
            return Err(RecallError::ConfigurationError(
                "embedding.dimensions must be non-zero".to_string(),
            ));
        }
        let r = &self.relationships;
        if !(r.t_rel <= r.t_extend && r.t_extend <= r.t_update) {
            return Err(RecallError::ConfigurationError(
                "relationship thresholds must satisfy t_rel <= t_extend <= t_update".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_yields_defaults() {
        let cfg = RecallConfig::from_toml("").unwrap();
        assert_eq!(cfg.embedding.dimensions, 256);
        assert_eq!(cfg.decay.rate_episodic, 0.08);
    }

    #[test]
    fn partial_toml_overrides_only_given_fields() {
        let cfg = RecallConfig::from_toml(
            r#"
            [retrieval]
            t_search = 0.5
            "#,
        )
        .unwrap();
        assert_eq!(cfg.retrieval.t_search, 0.5);
        assert_eq!(cfg.retrieval.t_active, 0.3);
    }

    #[test]
    fn validate_rejects_zero_dimensions() {
        let mut cfg = RecallConfig::default();
        cfg.embedding.dimensions = 0;
        assert!(cfg.validate().is_err());
    }
}
