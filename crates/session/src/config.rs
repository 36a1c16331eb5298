//! Session configuration.
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Host-side settings that are not part of the ruleset.
#[derive(Clone, Debug)]
pub struct SessionConfig {
    /// How long an export button shows its outcome before returning to idle.
    pub export_reset_delay: Duration,

    /// Directory with `catalog.ron` / `rules.toml`. The built-in content is
    /// used when unset.
    pub data_dir: Option<PathBuf>,
}

impl SessionConfig {
    pub const DEFAULT_EXPORT_RESET_MS: u64 = 2000;

    /// Construct configuration from environment variables.
    ///
    /// Environment variables:
    /// - `TECHNIQUE_DATA_DIR` - Content directory (default: built-in content)
    /// - `TECHNIQUE_EXPORT_RESET_MS` - Export status reset delay (default: 2000)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        config.data_dir = read_env::<PathBuf>("TECHNIQUE_DATA_DIR")
            .filter(|dir| !dir.as_os_str().is_empty());
        if let Some(ms) = read_env::<u64>("TECHNIQUE_EXPORT_RESET_MS") {
            config.export_reset_delay = Duration::from_millis(ms);
        }

        config
    }

    pub fn with_export_reset_delay(mut self, delay: Duration) -> Self {
        self.export_reset_delay = delay;
        self
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            export_reset_delay: Duration::from_millis(Self::DEFAULT_EXPORT_RESET_MS),
            data_dir: None,
        }
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
