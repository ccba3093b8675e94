/*!
 * Output sink for ContextForge
 *
 * An explicit sink over stdout or a file so that emitters can stay generic
 * over `io::Write`; tests write into a `Vec<u8>` the same way.
 */

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Destination for emitted documents
pub enum Output {
    /// Standard output
    Stdout(io::Stdout),
    /// Created/truncated output file
    File(BufWriter<File>),
}

impl Output {
    /// Open the configured destination
    ///
    /// A path creates or truncates the file; failure to open it is fatal to
    /// the run. No path means stdout.
    pub fn create(path: Option<&Path>) -> io::Result<Self> {
        match path {
            Some(path) => Ok(Output::File(BufWriter::new(File::create(path)?))),
            None => Ok(Output::Stdout(io::stdout())),
        }
    }
}

impl Write for Output {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Output::Stdout(out) => out.write(buf),
            Output::File(out) => out.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Output::Stdout(out) => out.flush(),
            Output::File(out) => out.flush(),
        }
    }
}
