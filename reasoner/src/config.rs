//! I define [`InferenceConfig`], the configuration of an [`InferenceModel`](crate::InferenceModel).
use crate::provenance::ProvenanceMode;

/// Configuration of an [`InferenceModel`](crate::InferenceModel).
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InferenceConfig {
    pub(crate) provenance: ProvenanceMode,
    pub(crate) optimized_queries: bool,
    pub(crate) recursive: bool,
}

impl InferenceConfig {
    /// How the source statements of each inference graph are recorded
    /// (defaults to [`ProvenanceMode::Compressed`]).
    ///
    /// NB: the mode must not change during the lifetime of a store,
    /// as provenance recorded in one mode is invisible in the other one.
    pub fn provenance(&self) -> ProvenanceMode {
        self.provenance
    }

    /// Should rules use the statement that triggered them to restrict their query
    /// (defaults to `true`).
    ///
    /// If false, every rule firing queries the whole store,
    /// which yields the same statements, only slower.
    pub fn optimized_queries(&self) -> bool {
        self.optimized_queries
    }

    /// Should statements inferred on insertion trigger further inference
    /// (defaults to `true`).
    pub fn recursive(&self) -> bool {
        self.recursive
    }

    /// Build a new default [`InferenceConfig`].
    pub fn new() -> Self {
        InferenceConfig {
            provenance: ProvenanceMode::Compressed,
            optimized_queries: true,
            recursive: true,
        }
    }

    /// Transform an [`InferenceConfig`] by setting the [`provenance`][`InferenceConfig::provenance`] mode.
    pub fn with_provenance(mut self, mode: ProvenanceMode) -> Self {
        self.provenance = mode;
        self
    }

    /// Transform an [`InferenceConfig`] by setting the [`optimized_queries`][`InferenceConfig::optimized_queries`] flag.
    pub fn with_optimized_queries(mut self, b: bool) -> Self {
        self.optimized_queries = b;
        self
    }

    /// Transform an [`InferenceConfig`] by setting the [`recursive`][`InferenceConfig::recursive`] flag.
    pub fn with_recursive(mut self, b: bool) -> Self {
        self.recursive = b;
        self
    }
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self::new()
    }
}
