use std::path::PathBuf;

pub const DATA_DIR_ENV: &str = "IMGO_DATA_DIR";
pub const HISTOGRAM_BUCKETS_ENV: &str = "IMGO_HISTOGRAM_BUCKETS";

const DEFAULT_DATA_DIR: &str = "data/sample";
const DEFAULT_HISTOGRAM_BUCKETS: usize = 10;

/// Startup settings, read once from the environment.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    /// Directory holding the five sample fixture files.
    pub data_dir: PathBuf,
    /// Bucket count for the FKGL and confidence histograms.
    pub histogram_buckets: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            histogram_buckets: DEFAULT_HISTOGRAM_BUCKETS,
        }
    }
}

impl DashboardConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup. Unusable values fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(dir) = lookup(DATA_DIR_ENV).filter(|d| !d.trim().is_empty()) {
            config.data_dir = PathBuf::from(dir);
        }

        if let Some(raw) = lookup(HISTOGRAM_BUCKETS_ENV) {
            match raw.trim().parse::<usize>() {
                Ok(n) if n >= 1 => config.histogram_buckets = n,
                _ => log::warn!(
                    "Ignoring {HISTOGRAM_BUCKETS_ENV}={raw:?}; using {DEFAULT_HISTOGRAM_BUCKETS} buckets"
                ),
            }
        }

        log::debug!("Dashboard config: {config:?}");
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_without_environment() {
        assert_eq!(DashboardConfig::from_lookup(lookup(&[])), DashboardConfig::default());
    }

    #[test]
    fn reads_overrides() {
        let config = DashboardConfig::from_lookup(lookup(&[
            (DATA_DIR_ENV, "/srv/imgo"),
            (HISTOGRAM_BUCKETS_ENV, "20"),
        ]));
        assert_eq!(config.data_dir, PathBuf::from("/srv/imgo"));
        assert_eq!(config.histogram_buckets, 20);
    }

    #[test]
    fn zero_or_garbage_buckets_fall_back() {
        for raw in ["0", "ten", "-3"] {
            let config = DashboardConfig::from_lookup(lookup(&[(HISTOGRAM_BUCKETS_ENV, raw)]));
            assert_eq!(config.histogram_buckets, DEFAULT_HISTOGRAM_BUCKETS);
        }
    }
}
