//! Access trace stream.
//!
//! When tracing is configured, every original reference is appended to a
//! text file as `"<type> <hex-address>"`, where type 0 is a load and 1 a
//! store. The stream exists for offline trace consumers and has no effect
//! on the profile.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::common::AccessKind;

/// Buffered writer for the per-model access trace.
pub struct TraceWriter {
    out: BufWriter<File>,
}

impl TraceWriter {
    /// Creates (truncating) the trace file at `path`.
    pub fn create(path: &Path) -> io::Result<Self> {
        Ok(Self {
            out: BufWriter::new(File::create(path)?),
        })
    }

    /// Appends one reference to the stream.
    pub fn record(&mut self, kind: AccessKind, base_addr: u64) -> io::Result<()> {
        let access_type = match kind {
            AccessKind::Load => 0,
            AccessKind::Store => 1,
        };
        writeln!(self.out, "{} {:x}", access_type, base_addr)
    }
}

impl Drop for TraceWriter {
    fn drop(&mut self) {
        let _ = self.out.flush();
    }
}
