/// A forward-only cursor over the raw argument tokens.
///
/// One stream is shared by a parser and every command parser it dispatches
/// to, so a command consumes the rest of the line from wherever its parent
/// stopped.
#[derive(Debug, Clone)]
pub struct ArgStream<'a> {
    args: &'a [String],
    index: usize,
}

impl<'a> ArgStream<'a> {
    /// A stream positioned before the first token.
    pub fn new(args: &'a [String]) -> Self {
        Self { args, index: 0 }
    }

    pub fn has_next(&self) -> bool {
        self.index < self.args.len()
    }

    /// Look at the next token without consuming it.
    pub fn peek(&self) -> Option<&'a str> {
        self.args.get(self.index).map(String::as_str)
    }

    /// Number of tokens consumed so far.
    pub fn consumed(&self) -> usize {
        self.index
    }
}

impl<'a> Iterator for ArgStream<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let arg = self.peek()?;
        self.index += 1;
        Some(arg)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.args.len() - self.index;
        (remaining, Some(remaining))
    }
}
