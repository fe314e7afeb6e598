//! Localized message lookup.
//!
//! The caller's locale is always passed explicitly; nothing here reads
//! ambient per-thread state.

mod catalog;

pub use catalog::MessageCatalog;

use std::fmt;

/// A BCP 47 language tag such as `en` or `pt-BR`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Locale(String);

impl Locale {
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into().trim().replace('_', "-"))
    }

    /// Pick the first language from an `Accept-Language` header value
    pub fn from_accept_language(header: &str) -> Option<Self> {
        header
            .split(',')
            .map(|part| part.split(';').next().unwrap_or("").trim())
            .find(|tag| !tag.is_empty() && *tag != "*")
            .map(Locale::new)
    }

    pub fn tag(&self) -> &str {
        &self.0
    }

    /// `pt` for `pt-BR`
    pub fn language(&self) -> &str {
        self.0.split('-').next().unwrap_or(&self.0)
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Maps a message key and positional arguments to localized text
pub trait MessageSource: Send + Sync {
    fn message(&self, locale: &Locale, key: &str, args: &[&str]) -> String;
}

/// Substitute `{0}`, `{1}`, ... with `args`
pub fn format_message(pattern: &str, args: &[&str]) -> String {
    let mut out = String::with_capacity(pattern.len());
    let mut rest = pattern;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match after.find('}') {
            Some(close) => {
                match after[..close].parse::<usize>().ok().and_then(|i| args.get(i)) {
                    Some(arg) => out.push_str(arg),
                    None => out.push_str(&rest[open..open + close + 2]),
                }
                rest = &after[close + 1..];
            }
            None => {
                out.push_str(&rest[open..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);

    out
}
