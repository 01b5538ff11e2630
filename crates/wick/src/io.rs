//! Standard streams owned by an environment

use std::cell::RefCell;
use std::fmt;
use std::io::{self, Read, Write};
use std::rc::Rc;

/// The input, output and diagnostic streams a program run talks to.
///
/// [`Stdio::inherit`] uses the process's own streams; tests substitute
/// in-memory readers and [`SharedBuffer`] writers.
pub struct Stdio {
    input: Box<dyn Read>,
    output: Box<dyn Write>,
    diagnostics: Box<dyn Write>,
}

impl Stdio {
    /// Use the process's standard input, output and error.
    pub fn inherit() -> Self {
        Self {
            input: Box::new(io::stdin()),
            output: Box::new(io::stdout()),
            diagnostics: Box::new(io::stderr()),
        }
    }

    /// Use the given streams.
    pub fn new(
        input: impl Read + 'static,
        output: impl Write + 'static,
        diagnostics: impl Write + 'static,
    ) -> Self {
        Self {
            input: Box::new(input),
            output: Box::new(output),
            diagnostics: Box::new(diagnostics),
        }
    }

    /// Read everything left on the input stream.
    pub fn read_all(&mut self) -> io::Result<String> {
        let mut text = String::new();
        self.input.read_to_string(&mut text)?;
        Ok(text)
    }

    /// Write `text` to the output stream and flush it.
    pub fn write_output(&mut self, text: &str) -> io::Result<()> {
        self.output.write_all(text.as_bytes())?;
        self.output.flush()
    }

    /// Write one line to the diagnostic stream.
    pub fn write_diagnostic(&mut self, line: &str) -> io::Result<()> {
        writeln!(self.diagnostics, "{}", line)?;
        self.diagnostics.flush()
    }
}

impl Default for Stdio {
    fn default() -> Self {
        Self::inherit()
    }
}

impl fmt::Debug for Stdio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Stdio { .. }")
    }
}

/// A cloneable in-memory writer; every clone appends to the same buffer.
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer(Rc<RefCell<Vec<u8>>>);

impl SharedBuffer {
    /// Create an empty buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, decoded lossily.
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.borrow()).into_owned()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
