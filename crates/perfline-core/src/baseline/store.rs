//! File-backed baseline store
//!
//! One pretty-printed JSON document per extraction run, named
//! `{test_name}-{timestamp}.json` with the timestamp's colons and dots
//! replaced by dashes. Baselines are never mutated after creation, so
//! concurrent readers need no coordination.

use crate::error::{Error, Result};
use crate::stats::read_to_string_ctx;
use crate::types::BaselineMetrics;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::{debug, info};

/// Default baselines directory, relative to the working directory
pub const DEFAULT_BASELINES_DIR: &str = "data/baselines";

/// Manages persisted baselines under one directory
#[derive(Debug, Clone)]
pub struct BaselineStore {
    baselines_dir: PathBuf,
}

impl BaselineStore {
    /// Create a store over the given directory
    pub fn new(baselines_dir: impl AsRef<Path>) -> Self {
        Self {
            baselines_dir: baselines_dir.as_ref().to_path_buf(),
        }
    }

    /// Store over the default `<cwd>/data/baselines` location
    pub fn default_location() -> Self {
        Self::new(DEFAULT_BASELINES_DIR)
    }

    /// The directory this store reads and writes
    pub fn dir(&self) -> &Path {
        &self.baselines_dir
    }

    /// Persist a baseline, returning the path written.
    pub fn save(&self, baseline: &BaselineMetrics) -> Result<PathBuf> {
        fs::create_dir_all(&self.baselines_dir)?;

        let stamp = baseline.timestamp.replace([':', '.'], "-");
        let path = self
            .baselines_dir
            .join(format!("{}-{}.json", baseline.test_name, stamp));

        let content = serde_json::to_string_pretty(baseline)?;
        fs::write(&path, content).map_err(|source| Error::Io {
            message: format!("failed to write {}", path.display()),
            source,
        })?;

        info!(file = %path.display(), test_name = %baseline.test_name, "saved baseline");
        Ok(path)
    }

    /// Load a baseline document from an explicit path.
    pub fn load(&self, path: impl AsRef<Path>) -> Result<BaselineMetrics> {
        let path = path.as_ref();
        let content = read_to_string_ctx(path)?;
        serde_json::from_str(&content).map_err(|source| Error::MalformedBaseline {
            path: path.to_path_buf(),
            source,
        })
    }

    /// All baseline files, lexically sorted descending so the most
    /// recent-looking name comes first.
    pub fn list(&self) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();

        if !self.baselines_dir.exists() {
            return Ok(files);
        }

        for entry in fs::read_dir(&self.baselines_dir)? {
            let entry = entry?;
            let path = entry.path();
            if path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("json") {
                files.push(path);
            }
        }

        files.sort_by(|a, b| b.file_name().cmp(&a.file_name()));
        Ok(files)
    }

    /// Resolve a user-supplied pattern to a baseline file.
    ///
    /// The pattern is normalized (trailing `.json`, a `baselines/` prefix,
    /// and an absolute baselines-dir prefix are stripped), then matched as
    /// a basename prefix. An exact basename match wins outright; otherwise
    /// the most recently modified prefix match wins.
    pub fn find_by_pattern(&self, pattern: &str) -> Result<Option<PathBuf>> {
        let normalized = self.normalize_pattern(pattern);
        debug!(pattern, normalized, "resolving baseline pattern");

        let candidates: Vec<PathBuf> = self
            .list()?
            .into_iter()
            .filter(|path| file_stem(path).starts_with(&normalized))
            .collect();

        if let Some(exact) = candidates
            .iter()
            .find(|path| file_stem(path) == normalized)
        {
            return Ok(Some(exact.clone()));
        }

        Ok(candidates.into_iter().max_by_key(|path| modified_time(path)))
    }

    /// Resolve and load a baseline.
    ///
    /// With a pattern: `find_by_pattern`, falling back to treating the
    /// pattern as a literal path. Without: the most recent of `list()`.
    /// Nothing resolvable is a `BaselineNotFound` error; there is no
    /// sensible default baseline to substitute.
    pub fn load_with_pattern(&self, pattern: Option<&str>) -> Result<(BaselineMetrics, PathBuf)> {
        let path = match pattern {
            Some(pattern) => self.find_by_pattern(pattern)?.or_else(|| {
                let literal = PathBuf::from(pattern);
                literal.is_file().then_some(literal)
            }),
            None => self.list()?.into_iter().next(),
        };

        let path = path.ok_or_else(|| Error::BaselineNotFound {
            pattern: pattern.map(str::to_string),
            dir: self.baselines_dir.clone(),
        })?;

        let baseline = self.load(&path)?;
        Ok((baseline, path))
    }

    fn normalize_pattern(&self, pattern: &str) -> String {
        let mut normalized = pattern.trim();

        if let Some(stripped) = normalized.strip_suffix(".json") {
            normalized = stripped;
        }

        let absolute_prefix = format!("{}/", self.baselines_dir.display());
        if let Some(stripped) = normalized.strip_prefix(&absolute_prefix) {
            normalized = stripped;
        }
        if let Some(stripped) = normalized.strip_prefix("baselines/") {
            normalized = stripped;
        }

        normalized.to_string()
    }
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_string()
}

fn modified_time(path: &Path) -> SystemTime {
    fs::metadata(path)
        .and_then(|meta| meta.modified())
        .unwrap_or(SystemTime::UNIX_EPOCH)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{MetricsBundle, TestConfig};
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn baseline_named(name: &str) -> BaselineMetrics {
        BaselineMetrics::new(name, TestConfig::default(), MetricsBundle::default())
    }

    #[test]
    fn test_save_load_roundtrip() {
        let dir = TempDir::new().unwrap();
        let store = BaselineStore::new(dir.path());

        let baseline = baseline_named("nightly-large");
        let path = store.save(&baseline).unwrap();
        assert!(path.file_name().unwrap().to_string_lossy().starts_with("nightly-large-"));
        // Timestamp separators are filesystem-safe
        assert!(!path.file_name().unwrap().to_string_lossy().contains(':'));

        let loaded = store.load(&path).unwrap();
        assert_eq!(loaded, baseline);
    }

    #[test]
    fn test_load_errors_are_descriptive() {
        let dir = TempDir::new().unwrap();
        let store = BaselineStore::new(dir.path());

        let missing = dir.path().join("absent.json");
        let err = store.load(&missing).unwrap_err();
        assert!(err.to_string().contains("absent.json"));

        let malformed = dir.path().join("broken.json");
        fs::write(&malformed, "{not json").unwrap();
        let err = store.load(&malformed).unwrap_err();
        assert!(matches!(err, Error::MalformedBaseline { .. }));
        assert!(err.to_string().contains("broken.json"));
    }

    #[test]
    fn test_list_sorts_descending_by_name() {
        let dir = TempDir::new().unwrap();
        let store = BaselineStore::new(dir.path());
        for name in ["run-2024-01.json", "run-2024-03.json", "run-2024-02.json"] {
            fs::write(dir.path().join(name), "{}").unwrap();
        }
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let listed: Vec<String> = store
            .list()
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(listed, vec!["run-2024-03.json", "run-2024-02.json", "run-2024-01.json"]);
    }

    #[test]
    fn test_list_missing_dir_is_empty() {
        let store = BaselineStore::new("definitely/not/a/dir");
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn test_find_by_pattern_exact_match_wins() {
        let dir = TempDir::new().unwrap();
        let store = BaselineStore::new(dir.path());
        fs::write(dir.path().join("run.json"), "{}").unwrap();
        std::thread::sleep(std::time::Duration::from_millis(20));
        // Newer prefix match must not beat the exact one
        fs::write(dir.path().join("run-longer.json"), "{}").unwrap();

        let found = store.find_by_pattern("run").unwrap().unwrap();
        assert_eq!(found.file_name().unwrap(), "run.json");
    }

    #[test]
    fn test_find_by_pattern_prefers_latest_mtime() {
        let dir = TempDir::new().unwrap();
        let store = BaselineStore::new(dir.path());
        fs::write(dir.path().join("run-a.json"), "{}").unwrap();
        std::thread::sleep(std::time::Duration::from_millis(20));
        fs::write(dir.path().join("run-b.json"), "{}").unwrap();

        let found = store.find_by_pattern("run").unwrap().unwrap();
        assert_eq!(found.file_name().unwrap(), "run-b.json");
    }

    #[test]
    fn test_find_by_pattern_normalizes_input() {
        let dir = TempDir::new().unwrap();
        let store = BaselineStore::new(dir.path());
        fs::write(dir.path().join("run-a.json"), "{}").unwrap();

        let absolute = format!("{}/run-a.json", dir.path().display());
        for pattern in ["run-a", "run-a.json", "baselines/run-a.json", absolute.as_str()] {
            let found = store.find_by_pattern(pattern).unwrap();
            assert!(found.is_some(), "pattern {pattern:?} did not resolve");
        }

        assert!(store.find_by_pattern("nope").unwrap().is_none());
    }

    #[test]
    fn test_load_with_pattern_falls_back_to_literal_path() {
        let dir = TempDir::new().unwrap();
        let store = BaselineStore::new(dir.path().join("store"));

        // A baseline living outside the store directory entirely
        let outside = dir.path().join("elsewhere.json");
        let baseline = baseline_named("elsewhere");
        fs::write(&outside, serde_json::to_string_pretty(&baseline).unwrap()).unwrap();

        let (loaded, path) = store
            .load_with_pattern(Some(outside.to_str().unwrap()))
            .unwrap();
        assert_eq!(loaded, baseline);
        assert_eq!(path, outside);
    }

    #[test]
    fn test_load_with_pattern_none_takes_most_recent_listing() {
        let dir = TempDir::new().unwrap();
        let store = BaselineStore::new(dir.path());
        let older = baseline_named("aaa");
        let newer = baseline_named("zzz");
        store.save(&older).unwrap();
        store.save(&newer).unwrap();

        let (loaded, _) = store.load_with_pattern(None).unwrap();
        assert_eq!(loaded.test_name, "zzz");
    }

    #[test]
    fn test_load_with_pattern_nothing_found_is_error() {
        let dir = TempDir::new().unwrap();
        let store = BaselineStore::new(dir.path());

        let err = store.load_with_pattern(None).unwrap_err();
        assert!(matches!(err, Error::BaselineNotFound { pattern: None, .. }));

        let err = store.load_with_pattern(Some("ghost")).unwrap_err();
        assert!(matches!(err, Error::BaselineNotFound { pattern: Some(_), .. }));
    }
}
