// SPDX-License-Identifier: MPL-2.0
//! Toast policy configuration, loaded from and saved to a `toast.toml` file.
//!
//! Every field is optional; missing values fall back to
//! [`defaults`]. Unlike user preferences, a policy file that fails to parse
//! or holds out-of-range values is rejected rather than silently replaced.
//!
//! # Examples
//!
//! ```no_run
//! use agora_toast::config::{self, Config};
//!
//! let config = config::load().unwrap_or_default();
//! let policy = config.policy().expect("invalid toast policy");
//! assert!(policy.max_queue_size() <= 1000);
//! ```
//!
//! ```toml
//! [toast]
//! minimum_interval_ms = 800
//! max_queue_size = 10
//! coalescing_window_ms = 2000
//! critical_interruption_delay_ms = 120
//! persist_critical_toasts = true
//! coalesce_timer = "preserve"
//! ```

pub mod defaults;

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::toast::{CoalesceTimer, ToastPolicy};
use crate::error::Result;

const CONFIG_FILE: &str = "toast.toml";
const APP_NAME: &str = "Agora";

/// Root of `toast.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub toast: ToastSection,
}

/// The `[toast]` table. `None` means "use the default".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ToastSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum_interval_ms: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_queue_size: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coalescing_window_ms: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub critical_interruption_delay_ms: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub persist_critical_toasts: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coalesce_timer: Option<CoalesceTimerSetting>,
}

/// File representation of [`CoalesceTimer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoalesceTimerSetting {
    Preserve,
    Restart,
}

impl From<CoalesceTimerSetting> for CoalesceTimer {
    fn from(setting: CoalesceTimerSetting) -> Self {
        match setting {
            CoalesceTimerSetting::Preserve => CoalesceTimer::Preserve,
            CoalesceTimerSetting::Restart => CoalesceTimer::Restart,
        }
    }
}

impl From<CoalesceTimer> for CoalesceTimerSetting {
    fn from(timer: CoalesceTimer) -> Self {
        match timer {
            CoalesceTimer::Preserve => CoalesceTimerSetting::Preserve,
            CoalesceTimer::Restart => CoalesceTimerSetting::Restart,
        }
    }
}

impl Config {
    /// Describes `policy` with every field spelled out.
    #[must_use]
    pub fn from_policy(policy: &ToastPolicy) -> Self {
        Self {
            toast: ToastSection {
                minimum_interval_ms: Some(millis(policy.minimum_interval())),
                max_queue_size: Some(policy.max_queue_size()),
                coalescing_window_ms: Some(millis(policy.coalescing_window())),
                critical_interruption_delay_ms: Some(millis(policy.critical_interruption_delay())),
                persist_critical_toasts: Some(policy.persist_critical_toasts()),
                coalesce_timer: Some(policy.coalesce_timer().into()),
            },
        }
    }

    /// Builds the validated policy described by this configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Policy`](crate::error::Error::Policy) when a value is
    /// outside its accepted range.
    pub fn policy(&self) -> Result<ToastPolicy> {
        let section = &self.toast;
        let mut builder = ToastPolicy::builder();
        if let Some(ms) = section.minimum_interval_ms {
            builder = builder.minimum_interval(Duration::from_millis(ms));
        }
        if let Some(size) = section.max_queue_size {
            builder = builder.max_queue_size(size);
        }
        if let Some(ms) = section.coalescing_window_ms {
            builder = builder.coalescing_window(Duration::from_millis(ms));
        }
        if let Some(ms) = section.critical_interruption_delay_ms {
            builder = builder.critical_interruption_delay(Duration::from_millis(ms));
        }
        if let Some(persist) = section.persist_critical_toasts {
            builder = builder.persist_critical_toasts(persist);
        }
        if let Some(timer) = section.coalesce_timer {
            builder = builder.coalesce_timer(timer.into());
        }
        Ok(builder.build()?)
    }
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

fn get_default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path.push(CONFIG_FILE);
        path
    })
}

/// Loads `toast.toml` from the platform config directory, or the default
/// configuration when there is none.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load() -> Result<Config> {
    if let Some(path) = get_default_config_path() {
        if path.exists() {
            return load_from_path(&path);
        }
    }
    debug!("no toast config file, using defaults");
    Ok(Config::default())
}

/// Saves `config` to the platform config directory.
///
/// # Errors
///
/// Returns an error if the file cannot be serialized or written.
pub fn save(config: &Config) -> Result<()> {
    if let Some(path) = get_default_config_path() {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// Loads a configuration file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a valid config.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    let config = toml::from_str(&content)?;
    debug!(path = %path.display(), "loaded toast config");
    Ok(config)
}

/// Writes a configuration file, creating parent directories as needed.
///
/// # Errors
///
/// Returns an error if the config cannot be serialized or written.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}
