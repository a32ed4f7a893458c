use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;
use log::debug;

use crate::errors::AppError;

// @module: File and stream utilities

/// Path naming standard input or standard output
pub const STDIO_PATH: &str = "-";

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: Path is the stdio placeholder
    pub fn is_stdio<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref() == Path::new(STDIO_PATH)
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> io::Result<()> {
        let path = path.as_ref();
        if !path.as_os_str().is_empty() && !path.exists() {
            fs::create_dir_all(path)?;
        }
        Ok(())
    }

    /// Open a subtitle source for line reading; `-` is standard input.
    ///
    /// The handle is closed when the returned reader is dropped.
    pub fn open_input(path: &Path) -> Result<Box<dyn BufRead>, AppError> {
        if Self::is_stdio(path) {
            debug!("Reading subtitles from standard input");
            return Ok(Box::new(io::stdin().lock()));
        }

        let file = File::open(path)
            .map_err(|e| AppError::File(format!("open: {}: {}", path.display(), e)))?;
        debug!("Reading subtitles from {}", path.display());
        Ok(Box::new(BufReader::new(file)))
    }

    /// Create (or truncate) a subtitle destination; `-` is standard output.
    pub fn create_output(path: &Path, create_dirs: bool) -> Result<Box<dyn Write>, AppError> {
        if Self::is_stdio(path) {
            debug!("Writing subtitles to standard output");
            return Ok(Box::new(io::stdout().lock()));
        }

        if create_dirs {
            if let Some(parent) = path.parent() {
                Self::ensure_dir(parent).map_err(|e| {
                    AppError::File(format!("mkdir: {}: {}", parent.display(), e))
                })?;
            }
        }

        let file = File::create(path)
            .map_err(|e| AppError::File(format!("open: {}: {}", path.display(), e)))?;
        debug!("Writing subtitles to {}", path.display());
        Ok(Box::new(file))
    }
}
