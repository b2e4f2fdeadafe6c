use std::iter::FromIterator;
use std::sync::Arc;

use crate::runner::ds::value::Value;

/// Destination for `print` output. Hosts install their own sink to capture
/// what a script writes; the default forwards to stdout.
pub type OutputSink = Arc<dyn Fn(&str) + Send + Sync>;

pub fn stdout_sink() -> OutputSink {
    Arc::new(|line: &str| println!("{}", line))
}

/// Insertion ordered name to value bindings. Scripts see host-supplied
/// globals in the order given, and hosts read results back in the order
/// the script defined them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Bindings {
    entries: Vec<(String, Value)>,
}

impl Bindings {
    pub fn new() -> Self {
        Bindings { entries: vec![] }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Value> {
        self.entries
            .iter_mut()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    /// Insert or overwrite; an overwrite keeps the original position.
    pub fn set(&mut self, name: &str, value: Value) {
        match self.get_mut(name) {
            Some(slot) => *slot = value,
            None => self.entries.push((name.to_string(), value)),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(n, _)| n == name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }
}

impl FromIterator<(String, Value)> for Bindings {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        let mut bindings = Bindings::new();
        for (name, value) in iter {
            bindings.set(&name, value);
        }
        bindings
    }
}

impl IntoIterator for Bindings {
    type Item = (String, Value);
    type IntoIter = std::vec::IntoIter<(String, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Everything a running script can reach: the global frame, the stack of
/// function-call frames, the print sink and the file name used in error
/// locations.
pub struct EvalContext {
    globals: Bindings,
    frames: Vec<Bindings>,
    out: OutputSink,
    file: String,
}

impl EvalContext {
    pub fn new(globals: Bindings, out: OutputSink, file: &str) -> Self {
        EvalContext {
            globals,
            frames: vec![],
            out,
            file: file.to_string(),
        }
    }

    pub fn file(&self) -> &str {
        &self.file
    }

    pub fn print(&self, text: &str) {
        (self.out)(text);
    }

    pub fn call_depth(&self) -> usize {
        self.frames.len()
    }

    pub fn push_frame(&mut self, locals: Bindings) {
        self.frames.push(locals);
    }

    pub fn pop_frame(&mut self) {
        self.frames.pop();
    }

    /// Read scope: innermost frame first, then globals. Enclosing call
    /// frames are invisible; functions do not capture their environment.
    pub fn lookup(&self, name: &str) -> Option<Value> {
        if let Some(frame) = self.frames.last() {
            if let Some(value) = frame.get(name) {
                return Some(value.clone());
            }
        }
        self.globals.get(name).cloned()
    }

    /// Plain assignment: inside a call it always binds locally, at the top
    /// level it binds globally.
    pub fn assign(&mut self, name: &str, value: Value) {
        match self.frames.last_mut() {
            Some(frame) => frame.set(name, value),
            None => self.globals.set(name, value),
        }
    }

    /// In-place mutation target for indexed assignment: the binding is
    /// found where it lives, locals first, then globals.
    pub fn binding_mut(&mut self, name: &str) -> Option<&mut Value> {
        // Two-phase lookup keeps the borrow checker satisfied.
        let in_frame = self
            .frames
            .last()
            .map_or(false, |frame| frame.contains(name));
        if in_frame {
            return self.frames.last_mut().and_then(|frame| frame.get_mut(name));
        }
        self.globals.get_mut(name)
    }

    /// Hand back the global frame once execution is over.
    pub fn into_globals(self) -> Bindings {
        self.globals
    }
}
