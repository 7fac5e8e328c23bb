//! Background-thread detection.
//!
//! The worker owns its input and emits a non-decreasing series of
//! [`DetectionEvent::Progress`] messages followed by exactly one
//! [`DetectionEvent::Finished`]. The caller's state is never touched from the
//! worker thread; results are applied by whoever receives `Finished`.

use std::path::PathBuf;
use std::thread::JoinHandle;

use crossbeam_channel::{Receiver, TryRecvError, unbounded};
use log::{debug, error};

use crate::detect::{DetectParams, detect_sprites};
use crate::raster::geom::Rect;
use crate::raster::image_formats::Pixmap;
use crate::utils::error::{Result, SpriteError};
use crate::utils::progress::ProgressSink;

/// Input handed to the worker.
#[derive(Debug, Clone)]
pub enum DetectionSource {
    /// Decoded on the worker thread; decode failures arrive as `Finished(Err)`.
    Path(PathBuf),
    Image(Pixmap),
}

/// Messages sent from the worker to its handle.
#[derive(Debug)]
pub enum DetectionEvent {
    Progress(u8),
    Finished(Result<Vec<Rect>>),
}

/// Receiving end of a running detection.
pub struct DetectionHandle {
    events: Receiver<DetectionEvent>,
    thread: Option<JoinHandle<()>>,
    finished: bool,
}

/// Starts a detection on a named worker thread.
pub fn spawn_detection(source: DetectionSource, params: DetectParams) -> Result<DetectionHandle> {
    let (tx, rx) = unbounded();

    let thread = std::thread::Builder::new()
        .name("sprite-detect".to_owned())
        .spawn(move || {
            let mut forward = |percent: u8| {
                let _ = tx.send(DetectionEvent::Progress(percent));
            };
            let result = match source {
                DetectionSource::Path(path) => {
                    debug!("worker decoding {}", path.display());
                    Pixmap::open(&path).map(|image| detect_sprites(&image, &params, &mut forward))
                }
                DetectionSource::Image(image) => Ok(detect_sprites(&image, &params, &mut forward)),
            };
            if let Err(err) = &result {
                error!("detection failed: {err}");
            }
            let _ = tx.send(DetectionEvent::Finished(result));
        })?;

    Ok(DetectionHandle {
        events: rx,
        thread: Some(thread),
        finished: false,
    })
}

impl DetectionHandle {
    /// Returns the next pending event without blocking.
    ///
    /// If the worker exits without sending `Finished`, a single
    /// `Finished(Err(WorkerDisconnected))` is synthesized. After the terminal
    /// event this always returns `None`.
    pub fn poll(&mut self) -> Option<DetectionEvent> {
        if self.finished {
            return None;
        }
        match self.events.try_recv() {
            Ok(event) => {
                if matches!(event, DetectionEvent::Finished(_)) {
                    self.finished = true;
                    self.join();
                }
                Some(event)
            }
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                self.finished = true;
                self.join();
                Some(DetectionEvent::Finished(Err(SpriteError::WorkerDisconnected)))
            }
        }
    }

    /// Blocks until the worker finishes, forwarding progress to `progress`.
    ///
    /// Fails with `InvalidArg` if `poll` already handed out the result.
    pub fn wait<P: ProgressSink + ?Sized>(mut self, progress: &mut P) -> Result<Vec<Rect>> {
        if self.finished {
            return Err(SpriteError::InvalidArg(
                "detection already finished".to_string(),
            ));
        }
        let result = loop {
            match self.events.recv() {
                Ok(DetectionEvent::Progress(percent)) => progress.report(percent),
                Ok(DetectionEvent::Finished(result)) => break result,
                Err(_) => break Err(SpriteError::WorkerDisconnected),
            }
        };
        self.finished = true;
        self.join();
        result
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    fn join(&mut self) {
        if let Some(thread) = self.thread.take()
            && thread.join().is_err()
        {
            error!("detection worker panicked");
        }
    }
}
