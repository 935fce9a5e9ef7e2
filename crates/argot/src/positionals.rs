use crate::error::Result;
use crate::numeric::{parse_float, parse_int};

/// Leftover arguments that were neither options nor a command.
#[derive(Debug, Clone, Default)]
pub struct Positionals {
    args: Vec<String>,
}

impl Positionals {
    /// An empty list.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, arg: impl Into<String>) {
        self.args.push(arg.into());
    }

    /// Whether no positional arguments were collected.
    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    /// Number of positional arguments collected.
    pub fn len(&self) -> usize {
        self.args.len()
    }

    /// The positional at `index`, in command-line order.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.args.get(index).map(String::as_str)
    }

    /// All positionals in command-line order.
    pub fn as_slice(&self) -> &[String] {
        &self.args
    }

    /// Parse every positional as an integer, failing on the first bad one.
    pub fn as_ints(&self) -> Result<Vec<i32>> {
        self.args.iter().map(|arg| parse_int(arg)).collect()
    }

    /// Parse every positional as a float, failing on the first bad one.
    pub fn as_floats(&self) -> Result<Vec<f64>> {
        self.args.iter().map(|arg| parse_float(arg)).collect()
    }
}
