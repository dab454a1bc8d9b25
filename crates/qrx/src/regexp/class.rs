// Character classes
// A class is a 256-bit bitmap, one bit per byte value, stored as sixteen
// 16-bit words so it occupies exactly the cells that follow its opcode.

use crate::limits::{CLASS_CELLS, WHITESPACE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ByteSet {
    words: [u16; CLASS_CELLS],
}

impl ByteSet {
    pub const fn new() -> Self {
        Self {
            words: [0; CLASS_CELLS],
        }
    }

    /// The `\s` set.
    pub fn whitespace() -> Self {
        let mut set = Self::new();
        set.insert_all(&WHITESPACE);
        set
    }

    #[inline(always)]
    pub fn contains(&self, b: u8) -> bool {
        self.words[(b >> 4) as usize] & (1 << (b & 0xf)) != 0
    }

    #[inline]
    pub fn insert(&mut self, b: u8) {
        self.words[(b >> 4) as usize] |= 1 << (b & 0xf);
    }

    /// Insert `lo..=hi`. An inverted range inserts nothing.
    pub fn insert_range(&mut self, lo: u8, hi: u8) {
        for b in lo..=hi {
            self.insert(b);
        }
    }

    pub fn insert_all(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.insert(b);
        }
    }

    pub fn negate(&mut self) {
        for word in &mut self.words {
            *word = !*word;
        }
    }

    /// Add the other-case twin of every ASCII letter in the set.
    pub fn fold_case(&mut self) {
        for b in b'a'..=b'z' {
            let upper = b.to_ascii_uppercase();
            if self.contains(b) || self.contains(upper) {
                self.insert(b);
                self.insert(upper);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|&w| w == 0)
    }
}

/// Word characters for `\<`, `\>` and `\b`: ASCII alphanumerics and `_`.
#[inline(always)]
pub fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}
