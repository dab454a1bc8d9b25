// Shared strings
//
// A byte string stored in a copy-on-write `ByteArray`: clones are O(1) and
// every edit detaches first. Bytes are not assumed to be UTF-8; case
// mapping and whitespace handling are ASCII only.

mod needle;

pub use needle::{IgnoreCase, Needle};

use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;

use crate::limits::WHITESPACE;
use crate::regexp::Pattern;
use crate::shared::{ArrayData, ByteArray};

#[inline]
fn is_space(b: u8) -> bool {
    WHITESPACE.contains(&b)
}

#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct SharedString {
    data: ByteArray,
}

impl SharedString {
    /// A null string.
    pub const fn new() -> Self {
        Self {
            data: ByteArray::new(),
        }
    }

    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            data: ByteArray::from_slice(bytes),
        }
    }

    /// The decimal form of `n`.
    pub fn number(n: i64) -> Self {
        let mut s = Self::new();
        s.set_num(n);
        s
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        self.data.as_slice()
    }

    #[inline]
    pub fn as_array(&self) -> &ByteArray {
        &self.data
    }

    pub fn into_array(self) -> ByteArray {
        self.data
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.size()
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        self.data.is_null()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn to_str_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(self.as_bytes())
    }

    // ===== Searching =====

    /// Index of the first occurrence of `needle` at or after `from`.
    pub fn find<N: Needle>(&self, needle: N, from: usize) -> Option<usize> {
        needle.find_in(self.as_bytes(), from).map(|(at, _)| at)
    }

    /// Index of the last occurrence of `needle` that starts at or before
    /// `from` (the end of the string when `None`).
    pub fn find_rev<N: Needle>(&self, needle: N, from: Option<usize>) -> Option<usize> {
        let hay = self.as_bytes();
        let start = match from {
            Some(from) if from > hay.len() => {
                log::warn!("SharedString::find_rev: index {} out of range (len {})", from, hay.len());
                return None;
            }
            Some(from) => from,
            None => hay.len(),
        };
        (0..=start)
            .rev()
            .find(|&at| needle.match_len_at(hay, at).is_some())
    }

    /// Number of occurrences of `needle`, overlapping ones included.
    /// For instance `"ana"` occurs twice in `"banana"`.
    pub fn contains<N: Needle>(&self, needle: N) -> usize {
        let hay = self.as_bytes();
        let mut count = 0;
        let mut from = 0;
        // the end of the string is a valid start for an empty match
        while from <= hay.len() {
            match needle.find_in(hay, from) {
                Some((at, _)) => {
                    count += 1;
                    from = at + 1;
                }
                None => break,
            }
        }
        count
    }

    /// Replace every occurrence of `needle` with `after`.
    ///
    /// Searching resumes right after each inserted replacement, so with an
    /// anchored pattern the match is retried at the start of what remains:
    /// replacing `^[bn]a` in `"banana"` removes everything.
    pub fn replace<N: Needle>(&mut self, needle: N, after: &[u8]) -> &mut Self {
        let mut index = 0;
        while index < self.len() {
            let Some((at, len)) = needle.find_in(self.as_bytes(), index) else {
                break;
            };
            self.replace_range(at, len, after);
            index = at + after.len();
            if len == 0 {
                // an empty match would be found again at the same place
                index += 1;
            }
        }
        self
    }

    /// `replace` with a pattern; the spelling callers use most.
    pub fn replace_pattern(&mut self, pattern: &Pattern, after: &str) -> &mut Self {
        self.replace(pattern, after.as_bytes())
    }

    // ===== Editing =====

    /// Replace `len` bytes at `index` with `s`. `len` is clipped to the end.
    pub fn replace_range(&mut self, index: usize, len: usize, s: &[u8]) -> &mut Self {
        let size = self.len();
        if index > size {
            log::warn!("SharedString::replace_range: index {} out of range (len {})", index, size);
            return self;
        }
        let end = index.saturating_add(len).min(size);
        self.data.make_mut_vec().splice(index..end, s.iter().copied());
        self
    }

    /// Insert `s` at `index`. Inserting past the end pads with spaces.
    pub fn insert(&mut self, index: usize, s: &[u8]) -> &mut Self {
        let bytes = self.data.make_mut_vec();
        if index > bytes.len() {
            bytes.resize(index, b' ');
        }
        bytes.splice(index..index, s.iter().copied());
        self
    }

    pub fn insert_char(&mut self, index: usize, c: u8) -> &mut Self {
        self.insert(index, &[c])
    }

    pub fn append(&mut self, s: &[u8]) -> &mut Self {
        self.data.make_mut_vec().extend_from_slice(s);
        self
    }

    pub fn prepend(&mut self, s: &[u8]) -> &mut Self {
        self.insert(0, s)
    }

    /// Remove `len` bytes at `index`; `len` is clipped to the end.
    pub fn remove(&mut self, index: usize, len: usize) -> &mut Self {
        let size = self.len();
        if index > size {
            log::warn!("SharedString::remove: index {} out of range (len {})", index, size);
            return self;
        }
        let end = index.saturating_add(len).min(size);
        if end > index {
            self.data.make_mut_vec().drain(index..end);
        }
        self
    }

    pub fn truncate(&mut self, len: usize) -> bool {
        self.data.truncate(len)
    }

    /// Set every byte to `c`, resizing to `len` first when given.
    pub fn fill(&mut self, c: u8, len: Option<usize>) -> bool {
        self.data.fill(c, len)
    }

    /// Replace the contents with the decimal form of `n`.
    pub fn set_num(&mut self, n: i64) -> &mut Self {
        let mut buffer = itoa::Buffer::new();
        self.data.store(buffer.format(n).as_bytes());
        self
    }

    // ===== Extraction =====

    pub fn left(&self, len: usize) -> Self {
        let bytes = self.as_bytes();
        if len >= bytes.len() {
            return self.clone();
        }
        Self::from_bytes(&bytes[..len])
    }

    pub fn right(&self, len: usize) -> Self {
        let bytes = self.as_bytes();
        if len >= bytes.len() {
            return self.clone();
        }
        Self::from_bytes(&bytes[bytes.len() - len..])
    }

    /// `len` bytes from `index`, or everything from `index` when `None`.
    pub fn mid(&self, index: usize, len: Option<usize>) -> Self {
        let bytes = self.as_bytes();
        if index > bytes.len() {
            log::warn!("SharedString::mid: index {} out of range (len {})", index, bytes.len());
            return Self::new();
        }
        let end = match len {
            Some(len) => index.saturating_add(len).min(bytes.len()),
            None => bytes.len(),
        };
        if index == 0 && end == bytes.len() {
            return self.clone();
        }
        Self::from_bytes(&bytes[index..end])
    }

    pub fn to_upper(&self) -> Self {
        Self::from(self.as_bytes().to_ascii_uppercase())
    }

    pub fn to_lower(&self) -> Self {
        Self::from(self.as_bytes().to_ascii_lowercase())
    }

    /// Copy without leading and trailing whitespace.
    pub fn strip_white_space(&self) -> Self {
        let bytes = self.as_bytes();
        let Some(first) = bytes.iter().position(|&b| !is_space(b)) else {
            return if self.is_null() { Self::new() } else { Self::from_bytes(b"") };
        };
        let last = bytes.iter().rposition(|&b| !is_space(b)).unwrap_or(first);
        Self::from_bytes(&bytes[first..=last])
    }

    /// Copy with whitespace stripped from both ends and every inner run of
    /// whitespace collapsed into one space.
    pub fn simplify_white_space(&self) -> Self {
        let mut out = Vec::with_capacity(self.len());
        for word in self.as_bytes().split(|&b| is_space(b)).filter(|w| !w.is_empty()) {
            if !out.is_empty() {
                out.push(b' ');
            }
            out.extend_from_slice(word);
        }
        Self::from(out)
    }

    /// Pad on the right with `fill` up to `width`. A longer string is cut
    /// to `width` when `truncate` is set and returned whole otherwise.
    pub fn left_justify(&self, width: usize, fill: u8, truncate: bool) -> Self {
        let bytes = self.as_bytes();
        match bytes.len().cmp(&width) {
            Ordering::Less => {
                let mut out = Vec::with_capacity(width);
                out.extend_from_slice(bytes);
                out.resize(width, fill);
                Self::from(out)
            }
            Ordering::Greater if truncate => self.left(width),
            _ => self.clone(),
        }
    }

    /// Pad on the left with `fill` up to `width`; see `left_justify`.
    pub fn right_justify(&self, width: usize, fill: u8, truncate: bool) -> Self {
        let bytes = self.as_bytes();
        match bytes.len().cmp(&width) {
            Ordering::Less => {
                let mut out = vec![fill; width - bytes.len()];
                out.extend_from_slice(bytes);
                Self::from(out)
            }
            Ordering::Greater if truncate => self.left(width),
            _ => self.clone(),
        }
    }

    // ===== Numbers =====

    /// The string as a signed decimal, surrounding whitespace allowed.
    pub fn to_long(&self) -> Option<i64> {
        std::str::from_utf8(self.strip_white_space().as_bytes())
            .ok()?
            .parse()
            .ok()
    }

    /// The string as an unsigned decimal, surrounding whitespace allowed.
    pub fn to_ulong(&self) -> Option<u64> {
        std::str::from_utf8(self.strip_white_space().as_bytes())
            .ok()?
            .parse()
            .ok()
    }
}

impl From<&str> for SharedString {
    fn from(s: &str) -> Self {
        Self::from_bytes(s.as_bytes())
    }
}

impl From<String> for SharedString {
    fn from(s: String) -> Self {
        Self::from(s.into_bytes())
    }
}

impl From<&[u8]> for SharedString {
    fn from(bytes: &[u8]) -> Self {
        Self::from_bytes(bytes)
    }
}

impl From<Vec<u8>> for SharedString {
    fn from(bytes: Vec<u8>) -> Self {
        Self {
            data: ByteArray::from(bytes),
        }
    }
}

impl From<ByteArray> for SharedString {
    fn from(data: ByteArray) -> Self {
        Self { data }
    }
}

impl AsRef<[u8]> for SharedString {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl PartialEq<str> for SharedString {
    fn eq(&self, other: &str) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl PartialEq<&str> for SharedString {
    fn eq(&self, other: &&str) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl PartialEq<[u8]> for SharedString {
    fn eq(&self, other: &[u8]) -> bool {
        self.as_bytes() == other
    }
}

impl PartialOrd for SharedString {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SharedString {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_bytes().cmp(other.as_bytes())
    }
}

impl fmt::Display for SharedString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_str_lossy())
    }
}

impl fmt::Debug for SharedString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\"", self.as_bytes().escape_ascii())
    }
}
