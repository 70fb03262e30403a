//! Event sink selected at startup from `[events]`.

use std::future::Future;

use anyhow::Context as _;
use civic_core::{
  PublishError,
  event::{EventSink, UserRepUpdate},
};
use civic_index::sink::{JsonLinesSink, LogSink};

use crate::settings::{EventsConfig, SinkKind};

/// The sinks the server can be configured with.
pub enum ConfiguredSink {
  Log(LogSink),
  File(JsonLinesSink),
}

impl ConfiguredSink {
  /// Build the sink named by `events`, or `None` when publishing is disabled.
  pub async fn from_config(events: &EventsConfig) -> anyhow::Result<Option<Self>> {
    match events.sink {
      SinkKind::None => Ok(None),
      SinkKind::Log => Ok(Some(ConfiguredSink::Log(LogSink))),
      SinkKind::File => {
        let path = events
          .path
          .as_ref()
          .context("events.path is required when events.sink = \"file\"")?;
        let sink = JsonLinesSink::open(path)
          .await
          .with_context(|| format!("failed to open event file {path:?}"))?;
        Ok(Some(ConfiguredSink::File(sink)))
      }
    }
  }

  pub fn describe(&self) -> String {
    match self {
      ConfiguredSink::Log(_) => "log".to_string(),
      ConfiguredSink::File(sink) => match sink.path() {
        Some(path) => format!("file {}", path.display()),
        None => "file".to_string(),
      },
    }
  }

  /// Flush anything still queued. Called once the server has stopped.
  pub async fn shutdown(self) -> anyhow::Result<()> {
    match self {
      ConfiguredSink::Log(_) => Ok(()),
      ConfiguredSink::File(sink) => {
        sink.shutdown().await.context("failed to finish writing events")
      }
    }
  }
}

impl EventSink for ConfiguredSink {
  fn publish<'a>(
    &'a self,
    event: &'a UserRepUpdate,
  ) -> impl Future<Output = Result<(), PublishError>> + Send + 'a {
    async move {
      match self {
        ConfiguredSink::Log(sink) => sink.publish(event).await,
        ConfiguredSink::File(sink) => sink.publish(event).await,
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  use civic_core::event::FollowAction;

  fn events(sink: SinkKind, path: Option<std::path::PathBuf>) -> EventsConfig {
    EventsConfig {
      sink,
      path,
      ..EventsConfig::default()
    }
  }

  #[tokio::test]
  async fn none_disables_publishing() {
    let sink = ConfiguredSink::from_config(&events(SinkKind::None, None))
      .await
      .unwrap();
    assert!(sink.is_none());
  }

  #[tokio::test]
  async fn file_sink_requires_a_path() {
    let err = ConfiguredSink::from_config(&events(SinkKind::File, None))
      .await
      .err()
      .unwrap();
    assert!(err.to_string().contains("events.path"), "unexpected error: {err}");
  }

  #[tokio::test]
  async fn file_sink_writes_to_configured_path() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("events.jsonl");
    let sink = ConfiguredSink::from_config(&events(SinkKind::File, Some(path.clone())))
      .await
      .unwrap()
      .unwrap();
    assert!(sink.describe().ends_with("events.jsonl"));

    sink
      .publish(&UserRepUpdate::now("u", "A", FollowAction::Add))
      .await
      .unwrap();
    sink.shutdown().await.unwrap();

    let written = std::fs::read_to_string(&path).unwrap();
    assert_eq!(written.lines().count(), 1);
    assert!(written.contains("\"RepGUID\":\"A\""));
  }

  #[tokio::test]
  async fn log_sink_is_selected_by_name() {
    let sink = ConfiguredSink::from_config(&events(SinkKind::Log, None))
      .await
      .unwrap()
      .unwrap();
    assert_eq!(sink.describe(), "log");
    sink
      .publish(&UserRepUpdate::now("u", "A", FollowAction::Add))
      .await
      .unwrap();
    sink.shutdown().await.unwrap();
  }
}
