//! Background pinch detection for frames delivered off the scene thread.
//!
//! Landmark inference is the expensive part of a frame. The
//! [`DetectionWorker`] runs it, plus pinch classification, on its own
//! thread and publishes the newest reading through a lock-free triple
//! buffer. The scene thread polls [`DetectionWorker::try_recv`] and feeds
//! readings to [`PinchController::process_pinch`], which remains the only
//! place commands are emitted.
//!
//! [`PinchController::process_pinch`]:
//!     crate::manipulation::PinchController::process_pinch

use std::sync::mpsc;

use crate::error::PinchError;
use crate::gesture::{Pinch, PinchDetector};
use crate::landmark::LandmarkSource;

/// A pinch classification tagged with the frame it came from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PinchReading {
    /// Submission order of the source frame, starting at 0.
    pub sequence: u64,
    /// Classification result.
    pub pinch: Pinch,
}

enum WorkerRequest<F> {
    Frame { sequence: u64, frame: F },
    Shutdown,
}

/// Background thread that turns captured frames into [`PinchReading`]s.
pub struct DetectionWorker<F> {
    request_tx: mpsc::Sender<WorkerRequest<F>>,
    reading: triple_buffer::Output<Option<PinchReading>>,
    next_sequence: u64,
    thread: Option<std::thread::JoinHandle<()>>,
}

impl<F: Send + 'static> DetectionWorker<F> {
    /// Spawn the detection thread around a landmark source.
    ///
    /// # Errors
    ///
    /// Returns [`PinchError::ThreadSpawn`] if the thread fails to spawn.
    pub fn spawn<L>(source: L, detector: PinchDetector) -> Result<Self, PinchError>
    where
        L: LandmarkSource<Frame = F> + Send + 'static,
    {
        let (request_tx, request_rx) = mpsc::channel::<WorkerRequest<F>>();
        let (reading_input, reading_output) = triple_buffer::triple_buffer(&None);

        let thread = std::thread::Builder::new()
            .name("pinch-detector".into())
            .spawn(move || {
                Self::thread_loop(source, &detector, &request_rx, reading_input);
            })
            .map_err(PinchError::ThreadSpawn)?;

        Ok(Self {
            request_tx,
            reading: reading_output,
            next_sequence: 0,
            thread: Some(thread),
        })
    }

    /// Queue a frame for detection (non-blocking). Returns its sequence
    /// number.
    pub fn submit(&mut self, frame: F) -> u64 {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        if self
            .request_tx
            .send(WorkerRequest::Frame { sequence, frame })
            .is_err()
        {
            log::warn!("pinch detector has stopped; dropping frame {sequence}");
        }
        sequence
    }

    fn thread_loop<L>(
        mut source: L,
        detector: &PinchDetector,
        request_rx: &mpsc::Receiver<WorkerRequest<F>>,
        mut reading_input: triple_buffer::Input<Option<PinchReading>>,
    ) where
        L: LandmarkSource<Frame = F>,
    {
        while let Ok(request) = request_rx.recv() {
            match drain_latest(request, request_rx) {
                WorkerRequest::Shutdown => break,
                WorkerRequest::Frame { sequence, frame } => {
                    let observation = source.hand_landmarks(&frame);
                    let pinch = detector.detect(&observation);
                    reading_input.write(Some(PinchReading { sequence, pinch }));
                }
            }
        }
        log::debug!("pinch detector stopped");
    }
}

impl<F> DetectionWorker<F> {
    /// Newest reading not yet returned, if any.
    pub fn try_recv(&mut self) -> Option<PinchReading> {
        let _ = self.reading.update();
        self.reading.output_buffer_mut().take()
    }

    /// Shut down the background thread and wait for it to finish.
    pub fn shutdown(&mut self) {
        let _ = self.request_tx.send(WorkerRequest::Shutdown);
        if let Some(handle) = self.thread.take() {
            if handle.join().is_err() {
                log::error!("pinch detector thread panicked");
            }
        }
    }
}

impl<F> Drop for DetectionWorker<F> {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Skip queued frames that a newer frame has already superseded. A queued
/// shutdown always wins.
fn drain_latest<F>(
    first: WorkerRequest<F>,
    request_rx: &mpsc::Receiver<WorkerRequest<F>>,
) -> WorkerRequest<F> {
    let mut latest = first;
    if matches!(latest, WorkerRequest::Shutdown) {
        return latest;
    }
    while let Ok(next) = request_rx.try_recv() {
        if let WorkerRequest::Frame { sequence, .. } = &latest {
            log::trace!("superseded frame {sequence}");
        }
        latest = next;
        if matches!(latest, WorkerRequest::Shutdown) {
            break;
        }
    }
    latest
}
