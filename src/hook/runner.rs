use std::fs;
use std::path::PathBuf;

use tracing::debug;

use crate::hook::convert::{from_bindings, to_bindings};
use crate::hook::error::Error;
use crate::hook::value::Namespace;
use crate::runner;
use crate::runner::ds::env::{stdout_sink, OutputSink};

/// A plugin runner: an ordered list of directories searched for script
/// files, plus the sink receiving script print output.
///
/// The directory list is fixed at construction and searched in order on
/// every [`run`](Gaff::run) call; the first directory whose copy of the
/// file can be read wins. Nothing is cached and no state survives a call,
/// so one runner can be shared across threads.
#[derive(Clone)]
pub struct Gaff {
    dirs: Vec<PathBuf>,
    out: OutputSink,
}

impl Gaff {
    /// A runner that looks for plugin files in the given directories, in
    /// the given order. Print output goes to stdout.
    pub fn new<I, P>(dirs: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Gaff {
            dirs: dirs.into_iter().map(Into::into).collect(),
            out: stdout_sink(),
        }
    }

    /// Replace the print sink, for hosts that capture script output.
    pub fn with_print(mut self, out: OutputSink) -> Self {
        self.out = out;
        self
    }

    /// Look for a file with the given filename, run it with `args` seeded
    /// into the script's global scope, and return every convertible final
    /// global.
    ///
    /// A read failure of any kind moves the search to the next directory;
    /// a failure inside a found script does not. When no directory yields
    /// a readable file the error names the filename, not any directory.
    pub fn run(&self, filename: &str, args: Namespace) -> Result<Namespace, Error> {
        for dir in &self.dirs {
            let path = dir.join(filename);
            match fs::read(&path) {
                Ok(bytes) => {
                    debug!(path = %path.display(), "plugin resolved");
                    return self.exec(filename, bytes, args);
                }
                Err(e) => {
                    debug!(path = %path.display(), error = %e, "trying next directory");
                }
            }
        }
        Err(Error::PluginNotFound(filename.to_string()))
    }

    fn exec(&self, filename: &str, bytes: Vec<u8>, args: Namespace) -> Result<Namespace, Error> {
        let source =
            String::from_utf8(bytes).map_err(|_| Error::InvalidUtf8(filename.to_string()))?;
        let globals = to_bindings(args);
        let finals = runner::execute(&source, filename, globals, self.out.clone())?;
        Ok(from_bindings(&finals))
    }
}
