use std::collections::VecDeque;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Source of raw input lines
pub trait LineSource {
    /// Read the next raw line, or `None` once the input is exhausted
    fn next_line(&mut self) -> io::Result<Option<String>>;
}

/// Destination for formatted output lines
pub trait LineSink {
    /// Write every line, each followed by a single newline
    fn write_lines(&mut self, lines: &[String]) -> io::Result<()>;
}

/// Buffered line reader over a file
///
/// `\n`, `\r\n` and a bare `\r` all end a line.
pub struct FileLineSource {
    reader: BufReader<File>,
    pending: VecDeque<String>,
    buf: Vec<u8>,
}

impl FileLineSource {
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let file = File::open(path)?;
        Ok(Self {
            reader: BufReader::new(file),
            pending: VecDeque::new(),
            buf: Vec::new(),
        })
    }

    /// Read up to the next `\n` and queue every line in that chunk
    fn fill(&mut self) -> io::Result<bool> {
        self.buf.clear();
        if self.reader.read_until(b'\n', &mut self.buf)? == 0 {
            return Ok(false);
        }

        let chunk = std::str::from_utf8(&self.buf)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        let chunk = chunk.strip_suffix('\n').unwrap_or(chunk);
        let chunk = chunk.strip_suffix('\r').unwrap_or(chunk);

        self.pending.extend(chunk.split('\r').map(str::to_string));
        Ok(true)
    }
}

impl LineSource for FileLineSource {
    fn next_line(&mut self) -> io::Result<Option<String>> {
        while self.pending.is_empty() {
            if !self.fill()? {
                return Ok(None);
            }
        }
        Ok(self.pending.pop_front())
    }
}

/// Writes output to a file, truncating whatever was there before
///
/// The file is only created when `write_lines` is called.
#[derive(Clone, Debug)]
pub struct FileLineSink {
    path: PathBuf,
}

impl FileLineSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl LineSink for FileLineSink {
    fn write_lines(&mut self, lines: &[String]) -> io::Result<()> {
        let mut out = BufWriter::new(File::create(&self.path)?);
        for line in lines {
            out.write_all(line.as_bytes())?;
            out.write_all(b"\n")?;
        }
        out.flush()
    }
}

/// In-memory line source
#[derive(Clone, Debug, Default)]
pub struct MemorySource {
    lines: VecDeque<String>,
}

impl MemorySource {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }
}

impl LineSource for MemorySource {
    fn next_line(&mut self) -> io::Result<Option<String>> {
        Ok(self.lines.pop_front())
    }
}

impl LineSink for Vec<String> {
    fn write_lines(&mut self, lines: &[String]) -> io::Result<()> {
        self.extend_from_slice(lines);
        Ok(())
    }
}
