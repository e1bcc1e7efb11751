//! Detection event sinks.
//!
//! The pipeline emits one event per accepted region and does not care
//! where events go; file formats and persistence belong to the sink.

use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, Utc};
use shapescan_core::{ColorLabel, ShapeLabel};

/// One detected region: when, what shape, what color.
#[derive(Clone, Copy, Debug)]
pub struct DetectionEvent {
    pub timestamp: DateTime<Utc>,
    pub shape: ShapeLabel,
    pub color: ColorLabel,
}

/// Append-only consumer of detection events.
pub trait DetectionSink {
    fn record(&mut self, event: &DetectionEvent);
}

/// Discards every event.
pub struct NullSink;

impl DetectionSink for NullSink {
    fn record(&mut self, _event: &DetectionEvent) {}
}

/// Collects events in memory; used by tests and by callers that render
/// events themselves.
#[derive(Default)]
pub struct MemorySink {
    pub events: Vec<DetectionEvent>,
}

impl DetectionSink for MemorySink {
    fn record(&mut self, event: &DetectionEvent) {
        self.events.push(*event);
    }
}

/// Flat CSV log, one file per run, named after the start time.
///
/// Write failures are logged and swallowed: a full disk must not abort
/// the detection loop.
pub struct CsvLogSink {
    path: PathBuf,
    writer: BufWriter<File>,
}

impl CsvLogSink {
    /// Create `<dir>/detections_<YYYYmmdd_HHMMSS>.csv` with a header row,
    /// creating the directory when missing.
    pub fn create(dir: impl AsRef<Path>) -> std::io::Result<Self> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;
        let name = format!("detections_{}.csv", Local::now().format("%Y%m%d_%H%M%S"));
        let path = dir.join(name);
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        let mut writer = BufWriter::new(file);
        writeln!(writer, "{:<22} {:<15} {:<10}", "timestamp", "shape", "color")?;
        writer.flush()?;
        log::info!("logging detections to {}", path.display());
        Ok(Self { path, writer })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DetectionSink for CsvLogSink {
    fn record(&mut self, event: &DetectionEvent) {
        let stamp = event.timestamp.format("%Y-%m-%d %H:%M:%S");
        let result = writeln!(
            self.writer,
            "{:<22} {:<15} {:<10}",
            stamp.to_string(),
            event.shape.to_string(),
            event.color.to_string()
        )
        .and_then(|()| self.writer.flush());
        if let Err(err) = result {
            log::warn!("could not append to {}: {err}", self.path.display());
        }
    }
}
