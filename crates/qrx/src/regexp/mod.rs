// Regular expressions
//
// A `Pattern` owns its source text, the flags it was compiled with and the
// resulting program. Changing any compile input recompiles from scratch.
// Compile failures are kept on the pattern rather than raised: an invalid
// pattern simply never matches.

mod cache;
mod class;
mod compiler;
mod matcher;
mod program;
mod wildcard;

pub use cache::PatternCache;
pub use class::{ByteSet, is_word_byte};
pub use compiler::compile;
pub use program::{Instr, Program};
pub use wildcard::wildcard_to_regex;

use std::fmt;

use smol_str::SmolStr;
use thiserror::Error;

use crate::options::CompileOptions;
use matcher::Matcher;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PatternError {
    #[error("Empty pattern")]
    Empty,
    #[error("Syntax error at {pos}: {reason}")]
    Syntax { pos: usize, reason: &'static str },
    #[error("Pattern too large: more than {limit} cells")]
    Overflow { limit: usize },
}

/// A successful match: `len` bytes starting at `start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Match {
    pub start: usize,
    pub len: usize,
}

impl Match {
    #[inline]
    pub fn end(&self) -> usize {
        self.start + self.len
    }
}

#[derive(Clone)]
pub struct Pattern {
    text: SmolStr,
    case_sensitive: bool,
    wildcard: bool,
    options: CompileOptions,
    program: Option<Program>,
    error: Option<PatternError>,
}

impl Pattern {
    pub fn new(text: &str, case_sensitive: bool, wildcard: bool) -> Self {
        Self::with_options(text, case_sensitive, wildcard, CompileOptions::default())
    }

    pub fn with_options(
        text: &str,
        case_sensitive: bool,
        wildcard: bool,
        options: CompileOptions,
    ) -> Self {
        let mut pattern = Self {
            text: SmolStr::new(text),
            case_sensitive,
            wildcard,
            options,
            program: None,
            error: None,
        };
        pattern.recompile();
        pattern
    }

    /// Like `new`, but hands back the compile error instead of an invalid pattern.
    pub fn try_new(text: &str, case_sensitive: bool, wildcard: bool) -> Result<Self, PatternError> {
        let pattern = Self::new(text, case_sensitive, wildcard);
        if let Some(e) = &pattern.error {
            return Err(e.clone());
        }
        Ok(pattern)
    }

    fn recompile(&mut self) {
        match compile(
            self.text.as_bytes(),
            self.case_sensitive,
            self.wildcard,
            &self.options,
        ) {
            Ok(program) => {
                log::trace!("compiled {:?} into {} cells", self.text, program.cells());
                self.program = Some(program);
                self.error = None;
            }
            Err(e) => {
                log::debug!("pattern {:?} failed to compile: {}", self.text, e);
                self.program = None;
                self.error = Some(e);
            }
        }
    }

    #[inline]
    pub fn pattern(&self) -> &str {
        &self.text
    }

    #[inline]
    pub fn case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    #[inline]
    pub fn wildcard(&self) -> bool {
        self.wildcard
    }

    #[inline]
    pub fn options(&self) -> &CompileOptions {
        &self.options
    }

    pub fn set_pattern(&mut self, text: &str) {
        self.text = SmolStr::new(text);
        self.recompile();
    }

    pub fn set_case_sensitive(&mut self, case_sensitive: bool) {
        self.case_sensitive = case_sensitive;
        self.recompile();
    }

    pub fn set_wildcard(&mut self, wildcard: bool) {
        self.wildcard = wildcard;
        self.recompile();
    }

    pub fn set_options(&mut self, options: CompileOptions) {
        self.options = options;
        self.recompile();
    }

    #[inline]
    pub fn is_valid(&self) -> bool {
        self.error.is_none()
    }

    /// True when there is no compiled program (empty or invalid pattern).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.program.is_none()
    }

    #[inline]
    pub fn error(&self) -> Option<&PatternError> {
        self.error.as_ref()
    }

    #[inline]
    pub fn program(&self) -> Option<&Program> {
        self.program.as_ref()
    }

    /// First match in `subject` starting at or after `from`.
    pub fn find_match(&self, subject: &[u8], from: usize) -> Option<Match> {
        let program = self.program.as_ref()?;
        Matcher::new(program, subject)
            .search(from)
            .map(|(start, len)| Match { start, len })
    }

    /// Length of a match that begins exactly at `at`.
    pub fn match_len_at(&self, subject: &[u8], at: usize) -> Option<usize> {
        let program = self.program.as_ref()?;
        Matcher::new(program, subject)
            .match_here(at)
            .map(|end| end - at)
    }

    #[inline]
    pub fn is_match(&self, subject: &[u8]) -> bool {
        self.find_match(subject, 0).is_some()
    }

    /// Whether the match found at offset 0 covers all of `subject`.
    pub fn exact_match(&self, subject: &[u8]) -> bool {
        self.match_len_at(subject, 0) == Some(subject.len())
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
            && self.case_sensitive == other.case_sensitive
            && self.wildcard == other.wildcard
    }
}

impl Eq for Pattern {}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pattern")
            .field("pattern", &self.text)
            .field("case_sensitive", &self.case_sensitive)
            .field("wildcard", &self.wildcard)
            .field("error", &self.error)
            .finish()
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
