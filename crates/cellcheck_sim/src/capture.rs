//! VCD trace capture for failing vectors.

use crate::error::SimError;
use crate::trace::{self, SharedTraceStore};
use cellcheck_harness::{TraceCapture, TraceError};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

/// Writes `<dir>/<gate>_v<index>.vcd` from the emulator's recorded history.
///
/// The file holds the instance's signals from time zero through the end of
/// the requested vector.
#[derive(Debug, Clone)]
pub struct VcdTraceCapture {
    store: SharedTraceStore,
    dir: PathBuf,
}

impl VcdTraceCapture {
    /// Creates a capture hook over a trace store, writing into `dir`.
    pub fn new(store: SharedTraceStore, dir: impl Into<PathBuf>) -> Self {
        Self {
            store,
            dir: dir.into(),
        }
    }

    /// The output directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// The file a capture for this vector is written to.
    pub fn path_for(&self, gate: &str, vector_index: usize) -> PathBuf {
        self.dir.join(format!("{gate}_v{vector_index}.vcd"))
    }
}

impl TraceCapture for VcdTraceCapture {
    fn capture_trace(
        &self,
        gate: &str,
        vector_index: usize,
    ) -> Result<Option<PathBuf>, TraceError> {
        let store = trace::lock(&self.store);
        let missing = || TraceError::NoHistory {
            gate: gate.to_string(),
            vector: vector_index,
        };
        let history = store.history(gate).ok_or_else(missing)?;
        if history.changes_through(vector_index).is_none() {
            return Err(missing());
        }
        std::fs::create_dir_all(&self.dir)?;
        let path = self.path_for(gate, vector_index);
        let file = BufWriter::new(File::create(&path)?);
        history.write_vcd(vector_index, file).map_err(|e| match e {
            SimError::WaveformIo(io) => TraceError::Io(io),
            other => TraceError::Unsupported(other.to_string()),
        })?;
        Ok(Some(path))
    }
}
