//! Operator-facing console output.
//!
//! All status output goes through a [`Console`], which owns the shared output
//! sink and the terminal facts (width, interactivity) every formatter needs.
//! The live renderer and the command flow both hold clones of the same console.

pub mod format;

use std::io::{IsTerminal, Write};
use std::sync::{Arc, Mutex, MutexGuard};

use crossterm::{cursor, terminal, QueueableCommand};

/// Terminal facts, fixed for the lifetime of a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminalOptions {
    /// Column width status lines are wrapped to
    pub width: usize,

    /// Whether the output is an interactive terminal (enables in-place redraw)
    pub interactive: bool,
}

impl TerminalOptions {
    /// Inspect stdout once
    pub fn detect(width: usize) -> Self {
        Self {
            width,
            interactive: std::io::stdout().is_terminal(),
        }
    }
}

impl Default for TerminalOptions {
    fn default() -> Self {
        Self {
            width: 90,
            interactive: false,
        }
    }
}

/// Shared, cloneable handle to the output sink
#[derive(Clone)]
pub struct Console {
    options: TerminalOptions,
    sink: Arc<Mutex<Box<dyn Write + Send>>>,
}

impl Console {
    /// Console writing to process stdout
    pub fn stdout(options: TerminalOptions) -> Self {
        Self::with_sink(options, std::io::stdout())
    }

    pub fn with_sink(options: TerminalOptions, sink: impl Write + Send + 'static) -> Self {
        Self {
            options,
            sink: Arc::new(Mutex::new(Box::new(sink))),
        }
    }

    pub fn width(&self) -> usize {
        self.options.width
    }

    fn lock(&self) -> MutexGuard<'_, Box<dyn Write + Send>> {
        self.sink.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Print one line
    pub fn println(&self, line: impl AsRef<str>) {
        let mut sink = self.lock();
        let _ = writeln!(sink, "{}", line.as_ref());
        let _ = sink.flush();
    }

    /// Print a batch of lines, returning how many were printed
    pub fn print_lines<I, S>(&self, lines: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut sink = self.lock();
        let mut count = 0;
        for line in lines {
            let _ = writeln!(sink, "{}", line.as_ref());
            count += 1;
        }
        let _ = sink.flush();
        count
    }

    /// Erase the last `count` printed lines, leaving the cursor where the
    /// first of them started. Does nothing on non-interactive output.
    pub fn erase_lines(&self, count: usize) {
        if !self.options.interactive || count == 0 {
            return;
        }
        let mut sink = self.lock();
        for _ in 0..count {
            let _ = sink.queue(cursor::MoveToPreviousLine(1));
            let _ = sink.queue(terminal::Clear(terminal::ClearType::CurrentLine));
        }
        let _ = sink.flush();
    }
}

/// In-memory sink, for capturing console output
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far
    pub fn contents(&self) -> String {
        let buffer = self.buffer.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        String::from_utf8_lossy(&buffer).into_owned()
    }
}

impl Write for MemorySink {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let mut buffer = self.buffer.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
