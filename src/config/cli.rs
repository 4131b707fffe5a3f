use crate::core::runner::OutputFormat;
use crate::core::Output;
use crate::utils::error::Result;
use std::cell::{Cell, RefCell};
use std::io::{Stdout, Write};

/// Writes rendered reports to stdout (or any writer).
///
/// Text reports are separated by a blank line. JSON reports are written one
/// document per line, so `all --format json` yields JSON Lines.
#[derive(Debug)]
pub struct ConsoleOutput<W: Write = Stdout> {
    writer: RefCell<W>,
    format: OutputFormat,
    separate: Cell<bool>,
}

impl ConsoleOutput {
    pub fn new(format: OutputFormat) -> Self {
        Self::with_writer(format, std::io::stdout())
    }
}

impl<W: Write> ConsoleOutput<W> {
    pub fn with_writer(format: OutputFormat, writer: W) -> Self {
        Self {
            writer: RefCell::new(writer),
            format,
            separate: Cell::new(false),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }
}

impl<W: Write> Output for ConsoleOutput<W> {
    fn write_report(&self, exercise: &str, rendered: &str) -> Result<()> {
        let mut handle = self.writer.borrow_mut();

        if self.separate.replace(true) && self.format == OutputFormat::Text {
            writeln!(handle)?;
        }
        tracing::debug!("Writing {} bytes for '{}'", rendered.len(), exercise);
        writeln!(handle, "{}", rendered)?;
        handle.flush()?;
        Ok(())
    }
}
