/*!
 * # subsync - linear SubRip subtitle re-synchronization
 *
 * Re-times a SubRip (`.srt`) file when its subtitles drift linearly away from
 * the video: give the correct time of the first and the last subtitle and every
 * cue in between is moved along the same straight line.
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `timecode`: `HH:MM:SS,mmm` <-> milliseconds
 * - `subtitle_processor`: SubRip document model, parser and serializer
 * - `sync`: affine mapping between two anchors and its application
 * - `app_config`: Configuration management
 * - `app_controller`: Read, re-time and write pipeline
 * - `file_utils`: File and stdio handling
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
#![allow(clippy::uninlined_format_args)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod file_utils;
pub mod subtitle_processor;
pub mod sync;
pub mod timecode;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::{Controller, SyncReport, SyncRequest};
pub use errors::{AppError, SubtitleError, SyncError};
pub use subtitle_processor::{Cue, Document};
pub use sync::{resync, round_half_away_from_zero, LinearMapping, SyncTarget};
pub use timecode::{format_time, parse_time};
