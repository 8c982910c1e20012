use std::io::Write;

use anyhow::{Context, Result};
use tether_rendering::{Frame, RenderingBackend};

/// Backend that prints frames as text to a writer.
#[derive(Debug)]
pub(crate) struct TerminalBackend<W: Write> {
    out: W,
}

impl<W: Write> TerminalBackend<W> {
    pub(crate) fn new(out: W) -> Self {
        Self { out }
    }

    /// Prints a line of status text below the board.
    pub(crate) fn status(&mut self, message: &str) -> Result<()> {
        writeln!(self.out, "{message}").context("failed to write status line")
    }
}

impl<W: Write> RenderingBackend for TerminalBackend<W> {
    fn present(&mut self, frame: &Frame) -> Result<()> {
        writeln!(self.out, "{frame}\n").context("failed to write frame")?;
        self.out.flush().context("failed to flush frame")
    }
}
