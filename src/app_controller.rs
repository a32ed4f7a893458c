use log::{debug, info};
use std::path::{Path, PathBuf};

use crate::app_config::Config;
use crate::errors::{AppError, SyncError};
use crate::subtitle_processor::Document;
use crate::sync::{self, LinearMapping, SyncTarget};
use crate::timecode::format_time;

// @module: Application controller for subtitle re-synchronization

/// One re-synchronization job
#[derive(Debug, Clone)]
pub struct SyncRequest {
    /// Subtitle file to read, `-` for standard input
    pub input: PathBuf,

    /// Destination; the input path when omitted
    pub output: Option<PathBuf>,

    /// Correct start of the first cue; its current start when omitted
    pub first_ms: Option<u64>,

    /// Correct start of the last cue; its current start when omitted
    pub last_ms: Option<u64>,
}

impl SyncRequest {
    pub fn new(input: impl Into<PathBuf>) -> Self {
        SyncRequest {
            input: input.into(),
            output: None,
            first_ms: None,
            last_ms: None,
        }
    }

    // @returns: Where the result is written
    pub fn output_path(&self) -> &Path {
        self.output.as_deref().unwrap_or(&self.input)
    }
}

/// Summary of a finished job
#[derive(Debug, Clone)]
pub struct SyncReport {
    pub cue_count: usize,
    pub target: SyncTarget,
    pub mapping: LinearMapping,
    pub output: PathBuf,
}

/// Main application controller
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Self {
        Self { config }
    }

    /// Read, re-time, and write one subtitle file.
    ///
    /// The input is fully read and closed before the output is created, so
    /// writing back over the input is safe.
    pub fn run(&self, request: &SyncRequest) -> Result<SyncReport, AppError> {
        let mut document = Document::read_from_path(&request.input)?;
        debug!("Loaded {} cues from {}", document.len(), request.input.display());

        let (target, mapping) = self.sync_document(&mut document, request.first_ms, request.last_ms)?;

        let output = request.output_path().to_path_buf();
        document.write_to_path(&output, self.config.create_output_dirs)?;

        info!(
            "Synchronized {} cues: first {}, last {} -> {}",
            document.len(),
            format_time(target.first_ms),
            format_time(target.last_ms),
            output.display()
        );

        Ok(SyncReport {
            cue_count: document.len(),
            target,
            mapping,
            output,
        })
    }

    /// Resolve omitted anchors, validate them, and re-time `document` in place
    pub fn sync_document(
        &self,
        document: &mut Document,
        first_ms: Option<u64>,
        last_ms: Option<u64>,
    ) -> Result<(SyncTarget, LinearMapping), SyncError> {
        let target = SyncTarget::resolve(first_ms, last_ms, document)?;
        target.validate()?;

        let mapping = sync::resync(document, target.first_ms, target.last_ms)?;
        Ok((target, mapping))
    }
}
