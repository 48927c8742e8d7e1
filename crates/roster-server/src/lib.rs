//! Configuration and application assembly for the roster server binary.

use std::{
  path::{Path, PathBuf},
  sync::Arc,
  time::Duration,
};

use axum::Router;
use roster_core::{
  policy::{AssignmentPolicy, OverlapPolicy},
  store::RosterStore,
};
use roster_store_sqlite::StoreOptions;
use serde::Deserialize;
use tower_http::trace::TraceLayer;

// ─── Configuration ───────────────────────────────────────────────────────────

/// Runtime server configuration, layered from `config.toml` and `ROSTER_*`
/// environment variables.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
  pub host:            String,
  pub port:            u16,
  pub store_path:      PathBuf,
  pub lock_timeout_ms: u64,
  pub busy_timeout_ms: u64,
  pub overlap_policy:  OverlapPolicy,
}

impl Default for ServerConfig {
  fn default() -> Self {
    let store = StoreOptions::default();
    Self {
      host:            "127.0.0.1".to_string(),
      port:            8080,
      store_path:      PathBuf::from("~/.local/share/roster/roster.db"),
      lock_timeout_ms: millis(store.lock_timeout),
      busy_timeout_ms: millis(store.busy_timeout),
      overlap_policy:  store.policy.overlap,
    }
  }
}

fn millis(d: Duration) -> u64 { u64::try_from(d.as_millis()).unwrap_or(u64::MAX) }

impl ServerConfig {
  /// Read `path` (if it exists) and overlay `ROSTER_*` environment variables.
  pub fn load(path: &Path) -> Result<Self, config::ConfigError> {
    config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(config::Environment::with_prefix("ROSTER").try_parsing(true))
      .build()?
      .try_deserialize()
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }

  /// The store path with a leading `~` expanded.
  pub fn resolved_store_path(&self) -> PathBuf { expand_tilde(&self.store_path) }

  pub fn store_options(&self) -> StoreOptions {
    StoreOptions {
      policy:       AssignmentPolicy {
        overlap: self.overlap_policy,
      },
      lock_timeout: Duration::from_millis(self.lock_timeout_ms),
      busy_timeout: Duration::from_millis(self.busy_timeout_ms),
    }
  }
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

// ─── Application ─────────────────────────────────────────────────────────────

/// The API router with request tracing attached.
pub fn app<S>(store: Arc<S>) -> Router
where
  S: RosterStore + 'static,
{
  roster_api::api_router(store).layer(TraceLayer::new_for_http())
}
