// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

use crate::error::{ImageError, Result};
use kanal::{Receiver, Sender};
use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
    thread::{self, JoinHandle},
    time::{SystemTime, UNIX_EPOCH},
};
use tracing::{debug, info_span, warn};

struct WriteJob {
    path: PathBuf,
    bytes: Vec<u8>,
    reply: Sender<Result<PathBuf>>,
}

/// Handle to a submitted write.
///
/// Dropping the ticket does not cancel the write, the result is discarded.
pub struct WriteTicket {
    path: PathBuf,
    result: Receiver<Result<PathBuf>>,
}

impl WriteTicket {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Blocks until the worker has written the file.
    pub fn wait(self) -> Result<PathBuf> {
        match self.result.recv() {
            Ok(result) => result,
            Err(_) => Err(ImageError::WriterClosed),
        }
    }
}

/// Pool of threads writing encoded captures to disk.
///
/// Writes can be slower than the camera's frame rate so they are queued on a
/// bounded channel and drained by worker threads owned by the writer. Each
/// submission returns a [`WriteTicket`] that reports success or failure.
/// Dropping the writer stops accepting jobs, lets the workers finish the
/// queue and joins them.
///
/// # Example
///
/// ```no_run
/// use camerakit::writer::{capture_path, CaptureWriter};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let writer = CaptureWriter::new(2, 8)?;
/// let ticket = writer.submit(capture_path("/tmp/captures", "jpg"), vec![0xff, 0xd8])?;
/// println!("saved {}", ticket.wait()?.display());
/// # Ok(())
/// # }
/// ```
pub struct CaptureWriter {
    jobs: Option<Sender<WriteJob>>,
    workers: Vec<JoinHandle<()>>,
}

fn write_capture(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }
    let mut file = File::create(path)?;
    file.write_all(bytes)?;
    file.flush()?;
    Ok(())
}

fn worker_loop(jobs: Receiver<WriteJob>) {
    while let Ok(job) = jobs.recv() {
        let _span = info_span!("write_capture", path = %job.path.display()).entered();
        let result = match write_capture(&job.path, &job.bytes) {
            Ok(()) => {
                debug!("wrote {} bytes", job.bytes.len());
                Ok(job.path)
            }
            Err(e) => {
                warn!("capture write failed: {e}");
                Err(e)
            }
        };
        // the submitter may have dropped its ticket
        let _ = job.reply.send(result);
    }
    debug!("capture writer worker exiting");
}

impl CaptureWriter {
    /// Spawns `workers` threads behind a queue holding up to `capacity` jobs.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::InvalidDimensions`] if `workers` is zero and
    /// [`ImageError::Io`] if a thread cannot be spawned.
    pub fn new(workers: usize, capacity: usize) -> Result<Self> {
        if workers == 0 {
            return Err(ImageError::InvalidDimensions(
                "capture writer needs at least one worker".to_string(),
            ));
        }
        let (tx, rx) = kanal::bounded(capacity);
        let mut handles = Vec::with_capacity(workers);
        for index in 0..workers {
            let rx = rx.clone();
            let handle = thread::Builder::new()
                .name(format!("capture-writer-{index}"))
                .spawn(move || worker_loop(rx))?;
            handles.push(handle);
        }
        Ok(Self {
            jobs: Some(tx),
            workers: handles,
        })
    }

    /// Queues `bytes` to be written at `path`, blocking while the queue is
    /// full.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::WriterClosed`] after [`CaptureWriter::shutdown`].
    pub fn submit(&self, path: impl Into<PathBuf>, bytes: Vec<u8>) -> Result<WriteTicket> {
        let jobs = self.jobs.as_ref().ok_or(ImageError::WriterClosed)?;
        let path = path.into();
        let (reply, result) = kanal::bounded(1);
        jobs.send(WriteJob {
            path: path.clone(),
            bytes,
            reply,
        })
        .map_err(|_| ImageError::WriterClosed)?;
        Ok(WriteTicket { path, result })
    }

    /// Number of worker threads still running.
    pub fn workers(&self) -> usize {
        self.workers.len()
    }

    /// Stops accepting jobs and waits for queued writes to finish.
    ///
    /// Later calls to [`CaptureWriter::submit`] return
    /// [`ImageError::WriterClosed`]. Calling it again is a no-op.
    pub fn shutdown(&mut self) {
        drop(self.jobs.take());
        for handle in self.workers.drain(..) {
            if handle.join().is_err() {
                warn!("capture writer worker panicked");
            }
        }
    }
}

impl Drop for CaptureWriter {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Path for a new capture named after the current time in milliseconds.
pub fn capture_path(dir: impl AsRef<Path>, extension: &str) -> PathBuf {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default();
    dir.as_ref().join(format!("{millis}.{extension}"))
}
