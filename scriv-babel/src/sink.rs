//! Destination sinks for rendered artifacts.
//!
//! A sink is a small task that owns the destination for one render call.
//! Renderers push bytes into it as they become available (page by page for
//! paginated output) and then call [`ArtifactSink::finish`], which resolves
//! only after the task has flushed its buffers, synced the file and moved it
//! into place. That acknowledgment is what marks a render as complete.
//!
//! File destinations are written to `<path>.partial` and renamed on
//! success. On abort, on any write failure, or when the handle is dropped
//! without finishing, the partial file is removed so the final path is never
//! left holding a truncated artifact.

use crate::error::RenderError;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tokio::fs::{self, File};
use tokio::io::{AsyncWriteExt, BufWriter};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

const CHANNEL_CAPACITY: usize = 16;

/// The output of a finished render.
#[derive(Debug, Clone, PartialEq)]
pub enum PublishArtifact {
    /// Bytes held in memory (no destination file).
    InMemory(Vec<u8>),
    /// Path to the written file.
    File(PathBuf),
}

/// Acknowledgment returned by a sink once everything is on its destination.
#[derive(Debug, Clone, PartialEq)]
pub struct SinkReceipt {
    pub bytes_written: u64,
    pub artifact: PublishArtifact,
}

enum SinkCommand {
    Write(Vec<u8>),
    Finish(oneshot::Sender<Result<SinkReceipt, RenderError>>),
    Abort(oneshot::Sender<()>),
}

/// Handle to a running sink task.
#[derive(Debug)]
pub struct ArtifactSink {
    tx: mpsc::Sender<SinkCommand>,
}

impl ArtifactSink {
    /// Start a sink that writes to `path`. Must be called inside a tokio runtime.
    pub fn to_file(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        Self::spawn(Target::File {
            partial: partial_path(&path),
            path,
            writer: None,
        })
    }

    /// Start a sink that collects the artifact in memory.
    pub fn in_memory() -> Self {
        Self::spawn(Target::Memory { buffer: Vec::new() })
    }

    fn spawn(target: Target) -> Self {
        let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
        tokio::spawn(run_sink(target, rx));
        Self { tx }
    }

    /// Queue bytes for the destination.
    ///
    /// Write failures on the destination side are reported by [`finish`](Self::finish).
    pub async fn write(&self, bytes: Vec<u8>) -> Result<(), RenderError> {
        self.tx
            .send(SinkCommand::Write(bytes))
            .await
            .map_err(|_| RenderError::SinkClosed)
    }

    /// Flush everything and wait for the destination to confirm it.
    pub async fn finish(self) -> Result<SinkReceipt, RenderError> {
        let (ack_tx, ack_rx) = oneshot::channel();
        self.tx
            .send(SinkCommand::Finish(ack_tx))
            .await
            .map_err(|_| RenderError::SinkClosed)?;
        ack_rx.await.map_err(|_| RenderError::SinkClosed)?
    }

    /// Discard everything written so far and wait for cleanup to complete.
    pub async fn abort(self) {
        let (ack_tx, ack_rx) = oneshot::channel();
        if self.tx.send(SinkCommand::Abort(ack_tx)).await.is_ok() {
            let _ = ack_rx.await;
        }
    }
}

enum Target {
    File {
        path: PathBuf,
        partial: PathBuf,
        writer: Option<BufWriter<File>>,
    },
    Memory {
        buffer: Vec<u8>,
    },
}

impl Target {
    async fn open(&mut self) -> Result<(), RenderError> {
        if let Target::File {
            partial, writer, ..
        } = self
        {
            let file = File::create(&partial).await.map_err(|e| {
                RenderError::Sink(format!("cannot create '{}': {e}", partial.display()))
            })?;
            debug!(path = %partial.display(), "opened sink destination");
            *writer = Some(BufWriter::new(file));
        }
        Ok(())
    }

    async fn write(&mut self, bytes: &[u8]) -> Result<(), RenderError> {
        match self {
            Target::File {
                writer: Some(writer),
                ..
            } => writer.write_all(bytes).await.map_err(RenderError::from),
            Target::File { writer: None, .. } => Err(RenderError::SinkClosed),
            Target::Memory { buffer } => {
                buffer.extend_from_slice(bytes);
                Ok(())
            }
        }
    }

    async fn commit(self) -> Result<PublishArtifact, RenderError> {
        match self {
            Target::File {
                path,
                partial,
                writer,
            } => {
                let mut writer = writer.ok_or(RenderError::SinkClosed)?;
                writer.flush().await?;
                writer.get_mut().sync_all().await?;
                drop(writer);
                fs::rename(&partial, &path).await.map_err(|e| {
                    RenderError::Sink(format!("cannot move artifact to '{}': {e}", path.display()))
                })?;
                Ok(PublishArtifact::File(path))
            }
            Target::Memory { buffer } => Ok(PublishArtifact::InMemory(buffer)),
        }
    }

    async fn discard(self) {
        if let Target::File {
            partial, writer, ..
        } = self
        {
            let opened = writer.is_some();
            drop(writer);
            if opened {
                if let Err(e) = fs::remove_file(&partial).await {
                    warn!(path = %partial.display(), error = %e, "failed to remove partial artifact");
                }
            }
        }
    }
}

async fn run_sink(mut target: Target, mut rx: mpsc::Receiver<SinkCommand>) {
    let mut failure = target.open().await.err();
    let mut written: u64 = 0;

    while let Some(command) = rx.recv().await {
        match command {
            SinkCommand::Write(bytes) => {
                if failure.is_some() {
                    continue;
                }
                match target.write(&bytes).await {
                    Ok(()) => written += bytes.len() as u64,
                    Err(e) => failure = Some(e),
                }
            }
            SinkCommand::Finish(ack) => {
                let result = match failure.take() {
                    Some(e) => {
                        target.discard().await;
                        Err(e)
                    }
                    None => finalize(target, written).await,
                };
                let _ = ack.send(result);
                return;
            }
            SinkCommand::Abort(ack) => {
                debug!("sink aborted, discarding output");
                target.discard().await;
                let _ = ack.send(());
                return;
            }
        }
    }

    debug!("sink handle dropped before finishing, discarding output");
    target.discard().await;
}

async fn finalize(target: Target, written: u64) -> Result<SinkReceipt, RenderError> {
    // commit consumes the target, so remember where the partial file lives in case it fails
    let leftover = match &target {
        Target::File { partial, .. } => Some(partial.clone()),
        Target::Memory { .. } => None,
    };
    match target.commit().await {
        Ok(artifact) => {
            info!(bytes = written, "artifact flushed to destination");
            Ok(SinkReceipt {
                bytes_written: written,
                artifact,
            })
        }
        Err(e) => {
            if let Some(partial) = leftover {
                let _ = fs::remove_file(&partial).await;
            }
            Err(e)
        }
    }
}

fn partial_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| OsString::from("artifact"));
    name.push(".partial");
    path.with_file_name(name)
}
