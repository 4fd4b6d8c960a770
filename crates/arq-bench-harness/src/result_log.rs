use arq_bench_abstract::TrialResult;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

pub const HEADER: &str = "Method,Timeout,File Size,Window Size,Reliability Number,Transfer Time";

/// Append-only CSV-style table of trial results.
///
/// The header is written only when the file did not exist when it was opened.
/// An existing file is appended to as-is; its contents are never read.
pub struct ResultLog {
    path: PathBuf,
    file: File,
    header_written: bool,
    rows_written: usize,
}

impl ResultLog {
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let fresh = !path.exists();

        let mut file = OpenOptions::new().create(true).append(true).open(&path)?;
        if fresh {
            writeln!(file, "{HEADER}")?;
            debug!("created result log {}", path.display());
        }

        Ok(Self {
            path,
            file,
            header_written: fresh,
            rows_written: 0,
        })
    }

    pub fn append(&mut self, result: &TrialResult) -> io::Result<()> {
        writeln!(self.file, "{}", result.fields().join(","))?;
        self.rows_written += 1;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether this handle emitted the header.
    pub fn header_written(&self) -> bool {
        self.header_written
    }

    pub fn rows_written(&self) -> usize {
        self.rows_written
    }

    /// Flush to disk and release the file. Dropping the log also closes it.
    pub fn close(mut self) -> io::Result<()> {
        self.file.flush()?;
        self.file.sync_all()
    }
}
