use std::borrow::Cow;
use std::io::{BufRead, BufWriter, Write};
use std::mem;
use std::path::Path;
use log::{debug, warn};

use crate::errors::{AppError, SubtitleError};
use crate::file_utils::FileManager;
use crate::timecode::{format_time, parse_time};

// @module: SubRip document model, parser and serializer

// @const: Line terminator for every emitted line
const CRLF: &[u8] = b"\r\n";

// @const: UTF-8 byte order mark some editors put in front of the first index
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

// @const: Literal separating start and end on a timing line
const TIMING_ARROW: &str = "-->";

// @struct: Single subtitle cue
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cue {
    // @field: Start time in ms
    pub start: u64,

    // @field: End time in ms
    pub end: u64,

    // @field: Raw text, every line terminated by CRLF
    pub text: Vec<u8>,
}

impl Cue {
    /// Creates a cue from already-terminated text
    pub fn new(start: u64, end: u64, text: impl Into<Vec<u8>>) -> Self {
        Cue {
            start,
            end,
            text: text.into(),
        }
    }

    /// Creates a cue from individual text lines, terminating each with CRLF
    pub fn from_lines(start: u64, end: u64, lines: &[&str]) -> Self {
        let mut text = Vec::new();
        for line in lines {
            text.extend_from_slice(line.as_bytes());
            text.extend_from_slice(CRLF);
        }
        Cue { start, end, text }
    }

    /// Text decoded as UTF-8, replacing invalid sequences
    pub fn text_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.text)
    }

    /// The text lines without their terminators
    pub fn lines(&self) -> Vec<Cow<'_, str>> {
        self.text
            .split(|b| *b == b'\n')
            .filter(|line| !line.is_empty())
            .map(|line| String::from_utf8_lossy(line.strip_suffix(b"\r").unwrap_or(line)))
            .collect()
    }
}

/// Ordered cues of one subtitle file; position is identity
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    /// Cues in display order
    pub cues: Vec<Cue>,
}

impl Document {
    /// Create an empty document
    pub fn new() -> Self {
        Document { cues: Vec::new() }
    }

    pub fn from_cues(cues: Vec<Cue>) -> Self {
        Document { cues }
    }

    pub fn len(&self) -> usize {
        self.cues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cues.is_empty()
    }

    pub fn first(&self) -> Option<&Cue> {
        self.cues.first()
    }

    pub fn last(&self) -> Option<&Cue> {
        self.cues.last()
    }

    /// Parse a SubRip stream
    pub fn parse<R: BufRead>(reader: R) -> Result<Self, SubtitleError> {
        let document = SrtParser::new(reader).parse()?;

        for (i, cue) in document.cues.iter().enumerate() {
            if cue.end < cue.start {
                warn!(
                    "Cue {} ends before it starts ({} --> {})",
                    i + 1,
                    format_time(cue.start),
                    format_time(cue.end)
                );
            }
        }
        debug!("Parsed {} cues", document.len());

        Ok(document)
    }

    /// Parse SubRip content held in memory
    pub fn parse_str(content: &str) -> Result<Self, SubtitleError> {
        Self::parse(content.as_bytes())
    }

    /// Read and parse a SubRip file; `-` reads standard input
    pub fn read_from_path<P: AsRef<Path>>(path: P) -> Result<Self, AppError> {
        let reader = FileManager::open_input(path.as_ref())?;
        let document = Self::parse(reader)?;
        Ok(document)
    }

    /// Write the document as SubRip with sequential indices and CRLF line endings
    ///
    /// Output is buffered and flushed before returning. On failure whatever was
    /// already written stays written.
    pub fn serialize<W: Write>(&self, writer: W) -> Result<(), SubtitleError> {
        let mut writer = BufWriter::new(writer);

        for (i, cue) in self.cues.iter().enumerate() {
            write!(writer, "{}", i + 1)?;
            writer.write_all(CRLF)?;
            write!(
                writer,
                "{} {} {}",
                format_time(cue.start),
                TIMING_ARROW,
                format_time(cue.end)
            )?;
            writer.write_all(CRLF)?;
            writer.write_all(&cue.text)?;
            if !cue.text.is_empty() && !cue.text.ends_with(b"\n") {
                writer.write_all(CRLF)?;
            }
            writer.write_all(CRLF)?;
        }

        writer.flush()?;
        Ok(())
    }

    /// Serialize into a byte vector
    pub fn to_bytes(&self) -> Result<Vec<u8>, SubtitleError> {
        let mut bytes = Vec::new();
        self.serialize(&mut bytes)?;
        Ok(bytes)
    }

    /// Write the document to a file; `-` writes standard output
    pub fn write_to_path<P: AsRef<Path>>(&self, path: P, create_dirs: bool) -> Result<(), AppError> {
        let writer = FileManager::create_output(path.as_ref(), create_dirs)?;
        self.serialize(writer)?;
        Ok(())
    }
}

/// Where the parser is within the current cue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParserState {
    /// Expecting the numeric index line, or end of input
    Index,
    /// Expecting `start --> end`
    Timing,
    /// Collecting text lines until a blank line
    Body,
}

// @enum: Outcome of one transition
enum Step {
    Next(ParserState),
    Done,
}

/// Line-driven state machine over a SubRip stream.
///
/// Each line read drives exactly one transition. The only successful stop is
/// end of input while in `Index`, or while in `Body` (the pending cue is kept).
pub struct SrtParser<R> {
    reader: R,
    state: ParserState,
    line: Vec<u8>,
    line_number: usize,
    pending: Cue,
    document: Document,
}

impl<R: BufRead> SrtParser<R> {
    pub fn new(reader: R) -> Self {
        SrtParser {
            reader,
            state: ParserState::Index,
            line: Vec::new(),
            line_number: 0,
            pending: Cue::default(),
            document: Document::new(),
        }
    }

    /// Current state; `Index` before the first line
    pub fn state(&self) -> ParserState {
        self.state
    }

    /// Consume the whole stream
    pub fn parse(mut self) -> Result<Document, SubtitleError> {
        loop {
            let at_eof = self.read_line()?;
            match self.transition(at_eof)? {
                Step::Next(state) => self.state = state,
                Step::Done => return Ok(self.document),
            }
        }
    }

    // Returns true when the stream is exhausted and nothing was read.
    fn read_line(&mut self) -> Result<bool, SubtitleError> {
        self.line.clear();
        let read = self.reader.read_until(b'\n', &mut self.line)?;
        self.line_number += 1;

        if self.line.ends_with(b"\n") {
            self.line.pop();
            if self.line.ends_with(b"\r") {
                self.line.pop();
            }
        }
        if self.line_number == 1 && self.line.starts_with(UTF8_BOM) {
            self.line.drain(..UTF8_BOM.len());
        }

        Ok(read == 0)
    }

    fn transition(&mut self, at_eof: bool) -> Result<Step, SubtitleError> {
        match self.state {
            ParserState::Index => self.on_index(at_eof),
            ParserState::Timing => self.on_timing(),
            ParserState::Body => Ok(self.on_body(at_eof)),
        }
    }

    fn on_index(&mut self, at_eof: bool) -> Result<Step, SubtitleError> {
        if at_eof {
            return Ok(Step::Done);
        }

        let is_index = std::str::from_utf8(&self.line)
            .ok()
            .map(|line| line.split_whitespace().collect::<Vec<_>>())
            .is_some_and(|tokens| tokens.len() == 1 && is_unsigned_integer(tokens[0]));

        if !is_index {
            return Err(SubtitleError::WrongIndexLine {
                line_number: self.line_number,
                line: String::from_utf8_lossy(&self.line).into_owned(),
            });
        }

        Ok(Step::Next(ParserState::Timing))
    }

    fn on_timing(&mut self) -> Result<Step, SubtitleError> {
        let wrong_timing_line = || SubtitleError::WrongTimingLine {
            line_number: self.line_number,
            line: String::from_utf8_lossy(&self.line).into_owned(),
        };

        let line = std::str::from_utf8(&self.line).map_err(|_| wrong_timing_line())?;
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() != 3 || tokens[1] != TIMING_ARROW {
            return Err(wrong_timing_line());
        }

        let start = parse_time(tokens[0])?;
        let end = parse_time(tokens[2])?;
        self.pending = Cue::new(start, end, Vec::new());

        Ok(Step::Next(ParserState::Body))
    }

    fn on_body(&mut self, at_eof: bool) -> Step {
        if at_eof || self.line.is_empty() {
            self.document.cues.push(mem::take(&mut self.pending));
            return if at_eof {
                Step::Done
            } else {
                Step::Next(ParserState::Index)
            };
        }

        self.pending.text.extend_from_slice(&self.line);
        self.pending.text.extend_from_slice(CRLF);
        Step::Next(ParserState::Body)
    }
}

fn is_unsigned_integer(token: &str) -> bool {
    token.bytes().all(|b| b.is_ascii_digit()) && token.parse::<u64>().is_ok()
}
