use logrelay_core::{Output, OutputWriter};
use tracing_subscriber::fmt::MakeWriter;

/// Adapts an [`Output`] for `tracing-subscriber`, locking it once per entry
#[derive(Debug, Clone)]
pub(crate) struct EntryWriter(pub(crate) Output);

impl<'a> MakeWriter<'a> for EntryWriter {
    type Writer = OutputWriter<'a>;

    fn make_writer(&'a self) -> Self::Writer {
        self.0.writer()
    }
}
