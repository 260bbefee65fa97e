//! Message parser - Prefix matching and command tokenizing

/// A message split into command name and arguments
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedCommand<'a> {
    /// First space-separated token after the prefix; may be empty
    pub name: &'a str,
    /// Everything after the name, trimmed
    pub args: &'a str,
}

/// Split prefix-stripped text on single spaces; the first token is the name.
///
/// Only a literal space ends the name, so "help\nfoo" yields the name "help\nfoo".
pub fn split_command(rest: &str) -> ParsedCommand<'_> {
    let name = rest.split(' ').next().unwrap_or_default();
    let args = rest[name.len()..].trim();
    ParsedCommand { name, args }
}

/// Strip `prefix` from the start of `content` and tokenize the rest.
///
/// An empty prefix matches every message, including an empty one.
pub fn parse<'a>(content: &'a str, prefix: &str) -> Option<ParsedCommand<'a>> {
    content.strip_prefix(prefix).map(split_command)
}
