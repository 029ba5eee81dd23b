use log::{info, warn};

use super::event::{EventDetector, EventKind, SimEvent};
use super::state::State;
use super::system::RdSystem;
use crate::error::RdError;

// ---------------------------------------------------------------------------
// Run drivers
// ---------------------------------------------------------------------------

/// Frames recorded by [`record_with`] plus the events detected along the way.
#[derive(Debug, Clone, Default)]
pub struct Recording {
    pub frames: Vec<State>,
    pub events: Vec<SimEvent>,
}

impl Recording {
    pub fn last(&self) -> Option<&State> {
        self.frames.last()
    }

    pub fn diverged(&self) -> bool {
        self.events.iter().any(|e| e.kind == EventKind::Diverged)
    }
}

/// Initialise, then call `update()` `n_updates` times. Returns the final state.
pub fn evolve(system: &mut RdSystem, n_updates: usize) -> Result<State, RdError> {
    system.initialise()?;
    for _ in 0..n_updates {
        system.update()?;
    }
    info!(
        "evolved {} updates ({} steps), t = {:.4}",
        n_updates,
        system.steps_taken(),
        system.time()
    );
    Ok(system.snapshot())
}

/// Initialise, then keep one snapshot after each of `n_frames` updates.
pub fn record(system: &mut RdSystem, n_frames: usize) -> Result<Vec<State>, RdError> {
    let recording = record_with(system, n_frames, &mut [])?;
    Ok(recording.frames)
}

/// Like [`record`], feeding every consecutive pair of snapshots (starting
/// with the initial state) to the detectors. Stops after a divergence.
pub fn record_with(
    system: &mut RdSystem,
    n_frames: usize,
    detectors: &mut [Box<dyn EventDetector>],
) -> Result<Recording, RdError> {
    system.initialise()?;

    let mut prev = system.snapshot();
    let mut recording = Recording {
        frames: Vec::with_capacity(n_frames),
        events: Vec::new(),
    };

    for frame in 0..n_frames {
        system.update()?;
        let current = system.snapshot();

        let mut halt = false;
        for det in detectors.iter_mut() {
            if let Some(kind) = det.check(&prev, &current) {
                if kind == EventKind::Diverged {
                    warn!("fields diverged at frame {} (t = {:.4})", frame, current.time);
                    halt = true;
                } else {
                    info!("frame {} (t = {:.4}): {:?}", frame, current.time, kind);
                }
                recording.events.push(SimEvent { frame, time: current.time, kind });
            }
        }

        recording.frames.push(current.clone());
        prev = current;
        if halt {
            break;
        }
    }

    info!(
        "recorded {} frames, {} events, t = {:.4}",
        recording.frames.len(),
        recording.events.len(),
        system.time()
    );
    Ok(recording)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
