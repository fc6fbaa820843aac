//! Bounded kernel command-line buffer
//!
//! The host hands cmdline fixup hooks a fixed-size buffer. [`CmdlineBuffer`]
//! keeps that bound: every mutation checks the resulting length against the
//! capacity first and leaves the contents untouched when it would not fit.
//! Capacity counts content bytes only; a host bridging from a C buffer of
//! `n` bytes passes `n - 1` to leave room for its terminator.

use std::fmt;

/// Errors from command-line edits
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CmdlineError {
    /// The edit would exceed the buffer capacity
    #[error("cmdline overflow: {required} bytes needed, capacity is {capacity}")]
    Overflow { required: usize, capacity: usize },

    /// Argument keys must be non-empty and free of whitespace
    #[error("invalid cmdline argument: {0:?}")]
    InvalidArgument(String),
}

/// Mutable text buffer that never grows past its declared capacity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CmdlineBuffer {
    text: String,
    capacity: usize,
}

impl CmdlineBuffer {
    /// Empty buffer with room for `capacity` bytes
    pub fn new(capacity: usize) -> Self {
        Self {
            text: String::new(),
            capacity,
        }
    }

    /// Buffer pre-filled with `initial`
    pub fn with_contents(initial: &str, capacity: usize) -> Result<Self, CmdlineError> {
        let mut buf = Self::new(capacity);
        buf.replace(initial)?;
        Ok(buf)
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Bytes still available
    pub fn remaining(&self) -> usize {
        self.capacity - self.text.len()
    }

    /// Replace the whole contents
    pub fn replace(&mut self, contents: &str) -> Result<(), CmdlineError> {
        self.check_fits(contents.len())?;
        self.text.clear();
        self.text.push_str(contents);
        Ok(())
    }

    /// Append a raw string with no separator
    pub fn push_str(&mut self, s: &str) -> Result<(), CmdlineError> {
        self.check_fits(self.text.len() + s.len())?;
        self.text.push_str(s);
        Ok(())
    }

    /// Append a whitespace-separated argument
    pub fn push_arg(&mut self, arg: &str) -> Result<(), CmdlineError> {
        let arg = arg.trim();
        if arg.is_empty() {
            return Err(CmdlineError::InvalidArgument(arg.to_string()));
        }
        let separator = usize::from(!self.text.is_empty());
        self.check_fits(self.text.len() + separator + arg.len())?;
        if separator == 1 {
            self.text.push(' ');
        }
        self.text.push_str(arg);
        Ok(())
    }

    /// Value of the first `key=value` argument, or `""` for a bare `key`
    pub fn get_arg(&self, key: &str) -> Option<&str> {
        self.text.split_whitespace().find_map(|token| match_key(token, key))
    }

    /// Drop every argument named `key`; returns how many were removed
    pub fn remove_arg(&mut self, key: &str) -> usize {
        let before = self.text.split_whitespace().count();
        let kept = self
            .text
            .split_whitespace()
            .filter(|token| match_key(token, key).is_none())
            .collect::<Vec<_>>()
            .join(" ");
        let removed = before - kept.split_whitespace().count();

        if removed > 0 {
            // Shrinks or keeps length, so the bound still holds
            self.text = kept;
        }
        removed
    }

    /// Set `key=value`, replacing any existing occurrences of `key`
    ///
    /// The value must be a single token.
    pub fn set_arg(&mut self, key: &str, value: &str) -> Result<(), CmdlineError> {
        validate_key(key)?;
        if value.contains(char::is_whitespace) {
            return Err(CmdlineError::InvalidArgument(value.to_string()));
        }
        let arg = format!("{}={}", key, value);

        let mut candidate = self.clone();
        candidate.remove_arg(key);
        candidate.push_arg(&arg)?;
        *self = candidate;
        Ok(())
    }

    /// Shorten the contents to at most `len` bytes on a char boundary
    pub fn truncate(&mut self, len: usize) {
        if len >= self.text.len() {
            return;
        }
        let mut cut = len;
        while !self.text.is_char_boundary(cut) {
            cut -= 1;
        }
        self.text.truncate(cut);
    }

    fn check_fits(&self, required: usize) -> Result<(), CmdlineError> {
        if required > self.capacity {
            return Err(CmdlineError::Overflow {
                required,
                capacity: self.capacity,
            });
        }
        Ok(())
    }
}

impl fmt::Display for CmdlineBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

fn validate_key(key: &str) -> Result<(), CmdlineError> {
    if key.is_empty() || key.contains(char::is_whitespace) || key.contains('=') {
        return Err(CmdlineError::InvalidArgument(key.to_string()));
    }
    Ok(())
}

fn match_key<'a>(token: &'a str, key: &str) -> Option<&'a str> {
    match token.split_once('=') {
        Some((name, value)) if name == key => Some(value),
        None if token == key => Some(""),
        _ => None,
    }
}
