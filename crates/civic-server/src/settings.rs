//! Runtime server configuration, deserialised from `config.toml` layered
//! under `CIVIC__*` environment variables.

use std::path::PathBuf;

use civic_core::event::FollowPolicy;
use civic_index::DataSources;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:    String,
  #[serde(default = "default_port")]
  pub port:    u16,
  #[serde(default)]
  pub data:    DataSources,
  #[serde(default)]
  pub follows: FollowsConfig,
  #[serde(default)]
  pub events:  EventsConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FollowsConfig {
  /// `idempotent` (default) or `duplicates`.
  #[serde(default)]
  pub policy: FollowPolicy,
}

/// Which event sink receives follow changes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SinkKind {
  #[default]
  None,
  Log,
  File,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EventsConfig {
  #[serde(default)]
  pub sink:       SinkKind,
  /// Output file for the `file` sink.
  pub path:       Option<PathBuf>,
  #[serde(default = "default_timeout_ms")]
  pub timeout_ms: u64,
}

impl Default for EventsConfig {
  fn default() -> Self {
    Self {
      sink:       SinkKind::default(),
      path:       None,
      timeout_ms: default_timeout_ms(),
    }
  }
}

fn default_host() -> String { "0.0.0.0".to_string() }

fn default_port() -> u16 { 3000 }

fn default_timeout_ms() -> u64 { 2000 }

/// Assemble configuration from an optional TOML file and the environment.
pub fn load(path: PathBuf) -> Result<ServerConfig, config::ConfigError> {
  config::Config::builder()
    .add_source(config::File::from(path).required(false))
    .add_source(
      config::Environment::with_prefix("CIVIC")
        .separator("__")
        .try_parsing(true)
        .list_separator(",")
        .with_list_parse_key("data.representatives"),
    )
    .build()?
    .try_deserialize()
}

#[cfg(test)]
mod tests {
  use super::*;

  fn parse(toml: &str) -> ServerConfig {
    config::Config::builder()
      .add_source(config::File::from_str(toml, config::FileFormat::Toml))
      .build()
      .unwrap()
      .try_deserialize()
      .unwrap()
  }

  #[test]
  fn empty_config_uses_defaults() {
    let cfg = parse("");
    assert_eq!(cfg.host, "0.0.0.0");
    assert_eq!(cfg.port, 3000);
    assert_eq!(cfg.follows.policy, FollowPolicy::Idempotent);
    assert_eq!(cfg.events.sink, SinkKind::None);
    assert_eq!(cfg.events.timeout_ms, 2000);
    assert!(cfg.data.representatives.is_empty());
    assert_eq!(cfg.data.delimiter, ',');
  }

  #[test]
  fn full_config_parses() {
    let cfg = parse(
      r#"
      port = 8080

      [data]
      representatives = ["house.csv", "senate.csv"]
      officials       = "officials.csv"
      zip_divisions   = "zips.csv"
      delimiter       = ";"

      [follows]
      policy = "duplicates"

      [events]
      sink       = "file"
      path       = "events.jsonl"
      timeout_ms = 250
      "#,
    );
    assert_eq!(cfg.port, 8080);
    assert_eq!(cfg.data.representatives.len(), 2);
    assert_eq!(cfg.data.officials, Some(PathBuf::from("officials.csv")));
    assert_eq!(cfg.data.user_follows, None);
    assert_eq!(cfg.data.delimiter, ';');
    assert_eq!(cfg.follows.policy, FollowPolicy::AllowDuplicates);
    assert_eq!(cfg.events.sink, SinkKind::File);
    assert_eq!(cfg.events.path, Some(PathBuf::from("events.jsonl")));
    assert_eq!(cfg.events.timeout_ms, 250);
  }
}
