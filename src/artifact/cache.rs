//! Process-wide artifact cache
//!
//! Deserializing the bundle is the only slow step, so it runs at most once per
//! process. The outcome (success or failure) is kept as-is: a failed load is
//! not retried until the process restarts.

use super::loader::{load_bundle, LoadedArtifacts};
use crate::error::PriceError;
use std::path::Path;
use std::sync::OnceLock;

/// Result of the one-time artifact load
pub type CachedLoad = Result<LoadedArtifacts, PriceError>;

/// Write-once holder for a load result
#[derive(Debug, Default)]
pub struct ArtifactCache {
    cell: OnceLock<CachedLoad>,
}

impl ArtifactCache {
    /// Empty cache
    pub const fn new() -> Self {
        Self {
            cell: OnceLock::new(),
        }
    }

    /// Return the cached result, running `load` only if nothing is cached yet
    pub fn get_or_init_with<F>(&self, load: F) -> Result<&LoadedArtifacts, &PriceError>
    where
        F: FnOnce() -> CachedLoad,
    {
        self.cell.get_or_init(load).as_ref()
    }

    /// Return the cached result, loading from `path` on first use
    ///
    /// Later calls ignore `path` and return the first result.
    pub fn get_or_load(&self, path: &Path) -> Result<&LoadedArtifacts, &PriceError> {
        self.get_or_init_with(|| {
            let result = load_bundle(path);
            if let Err(e) = &result {
                log::error!("Artifact load failed, prediction disabled: {}", e);
            }
            result
        })
    }

    /// Cached result, if a load already ran
    pub fn get(&self) -> Option<Result<&LoadedArtifacts, &PriceError>> {
        self.cell.get().map(|r| r.as_ref())
    }
}

static ARTIFACTS: ArtifactCache = ArtifactCache::new();

/// Process-wide memoized artifact accessor
///
/// The first call loads from `path`; every later call returns that same
/// result.
pub fn cached_artifacts(path: &Path) -> Result<&'static LoadedArtifacts, &'static PriceError> {
    ARTIFACTS.get_or_load(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_load_runs_once() {
        let cache = ArtifactCache::new();
        let calls = Cell::new(0);
        let load = || {
            calls.set(calls.get() + 1);
            Err(PriceError::Io("missing".to_string()))
        };

        assert!(cache.get().is_none());
        assert!(cache.get_or_init_with(load).is_err());
        assert!(cache.get_or_init_with(load).is_err());
        assert_eq!(calls.get(), 1);
        assert!(cache.get().is_some());
    }

    #[test]
    fn test_failure_is_not_retried() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        let cache = ArtifactCache::new();

        let first = cache.get_or_load(&path).unwrap_err().clone();
        assert!(matches!(first, PriceError::Io(_)));

        std::fs::write(
            &path,
            format!(
                r#"{{"kind": "nearest_centroid", "centroids": [{:?}]}}"#,
                vec![0.0; crate::schema::FEATURE_COUNT]
            ),
        )
        .unwrap();
        assert_eq!(cache.get_or_load(&path).unwrap_err(), &first);
    }
}
