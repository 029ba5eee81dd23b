use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use crate::error::RdError;
use crate::field::{Component, FieldStats};
use crate::pattern::{Layout, PatternParams};
use crate::sim::event::SimEvent;
use crate::sim::State;

/// Summary of a finished run.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub params: PatternParams,
    pub layout: Layout,
    pub frames: usize,
    pub elementary_steps: u64,
    pub final_time: f64,
    pub finite: bool,
    pub a: FieldStats,
    pub b: FieldStats,
    pub events: Vec<EventRecord>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EventRecord {
    pub frame: usize,
    pub time: f64,
    pub kind: String,
}

impl RunSummary {
    /// Summarise the last frame. Returns `None` for an empty run.
    pub fn from_frames(
        params: &PatternParams,
        layout: &Layout,
        frames: &[State],
        events: &[SimEvent],
    ) -> Option<Self> {
        let last = frames.last()?;
        Some(RunSummary {
            params: *params,
            layout: *layout,
            frames: frames.len(),
            elementary_steps: last.step,
            final_time: last.time,
            finite: last.is_finite(),
            a: last.stats(Component::A),
            b: last.stats(Component::B),
            events: events
                .iter()
                .map(|e| EventRecord { frame: e.frame, time: e.time, kind: format!("{:?}", e.kind) })
                .collect(),
        })
    }
}

/// Write a run summary as pretty-printed JSON.
pub fn write_summary<W: Write>(writer: &mut W, summary: &RunSummary) -> Result<(), RdError> {
    serde_json::to_writer_pretty(&mut *writer, summary)?;
    writeln!(writer)?;
    Ok(())
}

/// Write a run summary JSON to a file.
pub fn write_summary_file(path: impl AsRef<Path>, summary: &RunSummary) -> Result<(), RdError> {
    let mut file = BufWriter::new(File::create(path)?);
    write_summary(&mut file, summary)?;
    file.flush()?;
    Ok(())
}
