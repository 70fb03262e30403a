//! Bundled [`EventSink`] implementations.
//!
//! | Sink | Delivers to |
//! |------|-------------|
//! | [`NoopSink`] | nowhere; stands in for "no sink configured" |
//! | [`LogSink`] | a structured `tracing` record |
//! | [`ChannelSink`] | a bounded in-process channel |
//! | [`JsonLinesSink`] | an append-only file, one JSON object per line |

use std::{future::Future, path::{Path, PathBuf}};

use civic_core::{
  PublishError,
  event::{EventSink, UserRepUpdate},
};
use tokio::{
  fs::OpenOptions,
  io::{AsyncWrite, AsyncWriteExt as _},
  sync::mpsc,
  task::JoinHandle,
};

// ─── Noop ────────────────────────────────────────────────────────────────────

/// Accepts every event and does nothing with it.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSink;

impl EventSink for NoopSink {
  fn publish<'a>(
    &'a self,
    _event: &'a UserRepUpdate,
  ) -> impl Future<Output = Result<(), PublishError>> + Send + 'a {
    async { Ok(()) }
  }
}

// ─── Log ─────────────────────────────────────────────────────────────────────

/// Emits each event as an `info` record on the `civic::events` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl EventSink for LogSink {
  fn publish<'a>(
    &'a self,
    event: &'a UserRepUpdate,
  ) -> impl Future<Output = Result<(), PublishError>> + Send + 'a {
    async move {
      tracing::info!(
        target: "civic::events",
        user_guid = %event.user_guid,
        rep_guid = %event.rep_guid,
        action = %event.action,
        recorded_at = %event.recorded_at,
        "follow change"
      );
      Ok(())
    }
  }
}

// ─── Channel ─────────────────────────────────────────────────────────────────

/// Forwards events to a bounded channel. A full channel applies
/// back-pressure; a dropped receiver fails every publish.
#[derive(Debug, Clone)]
pub struct ChannelSink {
  tx: mpsc::Sender<UserRepUpdate>,
}

impl ChannelSink {
  /// Create a sink together with the receiving half of its channel.
  pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<UserRepUpdate>) {
    let (tx, rx) = mpsc::channel(capacity);
    (Self { tx }, rx)
  }
}

impl EventSink for ChannelSink {
  fn publish<'a>(
    &'a self,
    event: &'a UserRepUpdate,
  ) -> impl Future<Output = Result<(), PublishError>> + Send + 'a {
    async move {
      self
        .tx
        .send(event.clone())
        .await
        .map_err(|_| PublishError::Closed)
    }
  }
}

// ─── JSON lines ──────────────────────────────────────────────────────────────

/// Lines [`JsonLinesSink::open`] queues for its writer before publishes wait.
pub const JSON_LINES_QUEUE: usize = 64;

/// Appends each event to a file as one line of JSON.
///
/// A single writer task owns the file. `publish` only queues the encoded
/// line, so an event counts as emitted exactly when it enters the queue, and
/// a publish abandoned by a timeout never reaches the file. After a write
/// error the writer stops and every later publish fails with
/// [`PublishError::Closed`].
#[derive(Debug)]
pub struct JsonLinesSink {
  path:   Option<PathBuf>,
  tx:     mpsc::Sender<String>,
  writer: JoinHandle<std::io::Result<()>>,
}

impl JsonLinesSink {
  /// Open `path` for appending, creating it if needed.
  pub async fn open(path: impl AsRef<Path>) -> std::io::Result<Self> {
    let path = path.as_ref().to_path_buf();
    let file = OpenOptions::new()
      .create(true)
      .append(true)
      .open(&path)
      .await?;
    let mut sink = Self::from_writer(file, JSON_LINES_QUEUE);
    sink.path = Some(path);
    Ok(sink)
  }

  /// Write lines to `writer` from a spawned task, queueing at most
  /// `capacity` of them. Must be called inside a tokio runtime.
  pub fn from_writer<W>(writer: W, capacity: usize) -> Self
  where
    W: AsyncWrite + Unpin + Send + 'static,
  {
    let (tx, rx) = mpsc::channel(capacity);
    Self {
      path: None,
      tx,
      writer: tokio::spawn(write_lines(writer, rx)),
    }
  }

  /// The file being appended to; `None` for a sink built over a writer.
  pub fn path(&self) -> Option<&Path> { self.path.as_deref() }

  /// Stop accepting events and wait until every queued line is written.
  pub async fn shutdown(self) -> std::io::Result<()> {
    let Self { tx, writer, .. } = self;
    drop(tx);
    writer.await.map_err(std::io::Error::other)?
  }
}

async fn write_lines<W>(
  mut writer: W,
  mut rx: mpsc::Receiver<String>,
) -> std::io::Result<()>
where
  W: AsyncWrite + Unpin,
{
  while let Some(line) = rx.recv().await {
    let written = async {
      writer.write_all(line.as_bytes()).await?;
      writer.flush().await
    }
    .await;
    if let Err(error) = written {
      tracing::error!(%error, "event writer failed; no further events accepted");
      return Err(error);
    }
  }
  Ok(())
}

impl EventSink for JsonLinesSink {
  fn publish<'a>(
    &'a self,
    event: &'a UserRepUpdate,
  ) -> impl Future<Output = Result<(), PublishError>> + Send + 'a {
    async move {
      let mut line = event.to_json()?;
      line.push('\n');
      self.tx.send(line).await.map_err(|_| PublishError::Closed)
    }
  }
}
