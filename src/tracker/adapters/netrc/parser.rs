//! Parser for the `.netrc` secrets file format.

use std::collections::HashMap;
use thiserror::Error;

/// One `machine` or `default` entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NetrcEntry {
    /// `login` token value.
    pub login: Option<String>,
    /// `account` token value.
    pub account: Option<String>,
    /// `password` token value.
    pub password: Option<String>,
}

/// Parsed `.netrc` contents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Netrc {
    machines: HashMap<String, NetrcEntry>,
    default: Option<NetrcEntry>,
}

/// Errors raised for malformed `.netrc` contents.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NetrcParseError {
    /// A keyword appeared where an entry header was expected.
    #[error("unexpected token '{token}' outside a machine entry")]
    UnexpectedToken {
        /// Offending token.
        token: String,
    },

    /// A keyword was not followed by its value.
    #[error("missing value after '{keyword}'")]
    MissingValue {
        /// Keyword lacking a value.
        keyword: String,
    },
}

enum Target {
    None,
    Machine(String),
    Default,
}

impl Netrc {
    /// Parses `.netrc` contents.
    ///
    /// Later entries for the same machine replace earlier ones. `macdef`
    /// bodies are skipped up to the next blank line.
    ///
    /// # Errors
    ///
    /// Returns [`NetrcParseError`] when a keyword is misplaced or lacks a
    /// value.
    pub fn parse(contents: &str) -> Result<Self, NetrcParseError> {
        let mut netrc = Self::default();
        let mut target = Target::None;
        let mut current = NetrcEntry::default();
        let mut lines = contents.lines();

        while let Some(line) = lines.next() {
            let mut tokens = tokenize(line).into_iter();
            while let Some(token) = tokens.next() {
                match token.as_str() {
                    "machine" => {
                        netrc.commit(&mut target, &mut current);
                        target = Target::Machine(required_value(&mut tokens, &token)?);
                    }
                    "default" => {
                        netrc.commit(&mut target, &mut current);
                        target = Target::Default;
                    }
                    "macdef" => {
                        required_value(&mut tokens, &token)?;
                        skip_macro_body(&mut lines);
                        break;
                    }
                    keyword @ ("login" | "user" | "account" | "password") => {
                        if matches!(target, Target::None) {
                            return Err(NetrcParseError::UnexpectedToken {
                                token: keyword.to_owned(),
                            });
                        }
                        let value = required_value(&mut tokens, keyword)?;
                        match keyword {
                            "account" => current.account = Some(value),
                            "password" => current.password = Some(value),
                            _ => current.login = Some(value),
                        }
                    }
                    other => {
                        return Err(NetrcParseError::UnexpectedToken {
                            token: other.to_owned(),
                        });
                    }
                }
            }
        }
        netrc.commit(&mut target, &mut current);
        Ok(netrc)
    }

    /// Returns the entry for `host`, falling back to the `default` entry.
    #[must_use]
    pub fn authenticators(&self, host: &str) -> Option<&NetrcEntry> {
        self.machines.get(host).or(self.default.as_ref())
    }

    fn commit(&mut self, target: &mut Target, current: &mut NetrcEntry) {
        let entry = std::mem::take(current);
        match std::mem::replace(target, Target::None) {
            Target::Machine(host) => {
                self.machines.insert(host, entry);
            }
            Target::Default => self.default = Some(entry),
            Target::None => {}
        }
    }
}

fn required_value(
    tokens: &mut impl Iterator<Item = String>,
    keyword: &str,
) -> Result<String, NetrcParseError> {
    tokens.next().ok_or_else(|| NetrcParseError::MissingValue {
        keyword: keyword.to_owned(),
    })
}

/// Splits one line into tokens, stopping at an unquoted `#` comment.
///
/// A token wrapped in double quotes may contain whitespace. A backslash
/// takes the next character literally, inside quotes or out. An
/// unterminated quote runs to the end of the line.
fn tokenize(line: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut chars = line.chars().peekable();

    while let Some(&first) = chars.peek() {
        if first.is_whitespace() {
            chars.next();
            continue;
        }
        if first == '#' {
            break;
        }

        let quoted = first == '"';
        if quoted {
            chars.next();
        }
        let mut token = String::new();
        while let Some(ch) = chars.next() {
            match ch {
                '"' if quoted => break,
                '\\' => token.extend(chars.next()),
                ch if !quoted && ch.is_whitespace() => break,
                ch => token.push(ch),
            }
        }
        tokens.push(token);
    }
    tokens
}

fn skip_macro_body<'a>(lines: &mut impl Iterator<Item = &'a str>) {
    for line in lines.by_ref() {
        if line.trim().is_empty() {
            break;
        }
    }
}
