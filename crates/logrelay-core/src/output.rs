use std::borrow::Cow;
use std::fmt;
use std::io::{self, Write};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Shared handle to the sink log entries are written to.
///
/// Clones point at the same writer, so a logger built from a clone writes
/// to the same sink. Writes are serialized behind a mutex.
#[derive(Clone)]
pub struct Output {
    writer: Arc<Mutex<Box<dyn Write + Send>>>,
    label: Cow<'static, str>,
}

impl Output {
    pub fn new<W: Write + Send + 'static>(writer: W) -> Self {
        Self::named("custom", writer)
    }

    /// Create an output with a label shown in `Debug` output
    pub fn named<W: Write + Send + 'static>(label: impl Into<Cow<'static, str>>, writer: W) -> Self {
        Self {
            writer: Arc::new(Mutex::new(Box::new(writer))),
            label: label.into(),
        }
    }

    pub fn stderr() -> Self {
        Self::named("stderr", io::stderr())
    }

    pub fn stdout() -> Self {
        Self::named("stdout", io::stdout())
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Whether both handles write to the same sink
    pub fn same_sink(&self, other: &Output) -> bool {
        Arc::ptr_eq(&self.writer, &other.writer)
    }

    /// Lock the sink for one entry; other writers wait until the guard drops
    pub fn writer(&self) -> OutputWriter<'_> {
        OutputWriter { guard: self.lock() }
    }

    fn lock(&self) -> MutexGuard<'_, Box<dyn Write + Send>> {
        self.writer.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for Output {
    fn default() -> Self {
        Self::stderr()
    }
}

impl fmt::Debug for Output {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Output").field(&self.label).finish()
    }
}

/// Writer handed out for a single log entry; holds the sink lock until dropped
pub struct OutputWriter<'a> {
    guard: MutexGuard<'a, Box<dyn Write + Send>>,
}

impl Write for OutputWriter<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.guard.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.guard.flush()
    }
}

impl Write for &Output {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.lock().write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.lock().flush()
    }
}
