// Search needles
// Everything a `SharedString` can look for: single bytes, byte strings
// (optionally case-insensitive) and compiled patterns.

use super::SharedString;
use crate::regexp::Pattern;

pub trait Needle {
    /// Length of an occurrence that begins exactly at `at`.
    fn match_len_at(&self, hay: &[u8], at: usize) -> Option<usize>;

    /// First occurrence at or after `from`, as `(start, len)`.
    fn find_in(&self, hay: &[u8], from: usize) -> Option<(usize, usize)> {
        (from..=hay.len()).find_map(|at| self.match_len_at(hay, at).map(|len| (at, len)))
    }
}

/// Find a byte string in a byte slice. An empty needle never matches.
#[inline]
fn find_bytes(hay: &[u8], needle: &[u8], from: usize) -> Option<usize> {
    if needle.is_empty() || from > hay.len() || needle.len() > hay.len() - from {
        return None;
    }
    hay[from..]
        .windows(needle.len())
        .position(|w| w == needle)
        .map(|pos| pos + from)
}

impl Needle for u8 {
    #[inline]
    fn match_len_at(&self, hay: &[u8], at: usize) -> Option<usize> {
        (hay.get(at) == Some(self)).then_some(1)
    }

    fn find_in(&self, hay: &[u8], from: usize) -> Option<(usize, usize)> {
        let pos = hay.get(from..)?.iter().position(|b| b == self)?;
        Some((from + pos, 1))
    }
}

impl Needle for &[u8] {
    fn match_len_at(&self, hay: &[u8], at: usize) -> Option<usize> {
        if self.is_empty() {
            return None;
        }
        hay.get(at..)?.starts_with(self).then_some(self.len())
    }

    fn find_in(&self, hay: &[u8], from: usize) -> Option<(usize, usize)> {
        find_bytes(hay, self, from).map(|pos| (pos, self.len()))
    }
}

impl<const N: usize> Needle for &[u8; N] {
    #[inline]
    fn match_len_at(&self, hay: &[u8], at: usize) -> Option<usize> {
        self.as_slice().match_len_at(hay, at)
    }

    #[inline]
    fn find_in(&self, hay: &[u8], from: usize) -> Option<(usize, usize)> {
        self.as_slice().find_in(hay, from)
    }
}

impl Needle for &str {
    #[inline]
    fn match_len_at(&self, hay: &[u8], at: usize) -> Option<usize> {
        self.as_bytes().match_len_at(hay, at)
    }

    #[inline]
    fn find_in(&self, hay: &[u8], from: usize) -> Option<(usize, usize)> {
        self.as_bytes().find_in(hay, from)
    }
}

impl Needle for &SharedString {
    #[inline]
    fn match_len_at(&self, hay: &[u8], at: usize) -> Option<usize> {
        self.as_bytes().match_len_at(hay, at)
    }

    #[inline]
    fn find_in(&self, hay: &[u8], from: usize) -> Option<(usize, usize)> {
        self.as_bytes().find_in(hay, from)
    }
}

impl Needle for &Pattern {
    #[inline]
    fn match_len_at(&self, hay: &[u8], at: usize) -> Option<usize> {
        Pattern::match_len_at(self, hay, at)
    }

    #[inline]
    fn find_in(&self, hay: &[u8], from: usize) -> Option<(usize, usize)> {
        self.find_match(hay, from).map(|m| (m.start, m.len))
    }
}

/// A byte string compared without regard to ASCII case.
#[derive(Debug, Clone, Copy)]
pub struct IgnoreCase<'a>(pub &'a [u8]);

impl<'a> From<&'a str> for IgnoreCase<'a> {
    fn from(s: &'a str) -> Self {
        Self(s.as_bytes())
    }
}

impl Needle for IgnoreCase<'_> {
    fn match_len_at(&self, hay: &[u8], at: usize) -> Option<usize> {
        let needle = self.0;
        if needle.is_empty() {
            return None;
        }
        let window = hay.get(at..at.checked_add(needle.len())?)?;
        window.eq_ignore_ascii_case(needle).then_some(needle.len())
    }
}
