// Backtracking matcher
//
// Walks a compiled program against a byte subject. Straight-line units are
// handled in a loop; only repetitions recurse, so the recursion depth is
// bounded by the number of repetitions in the program, not by the subject.

use super::class::is_word_byte;
use super::program::{Instr, Program};

pub struct Matcher<'a> {
    program: &'a Program,
    text: &'a [u8],
}

impl<'a> Matcher<'a> {
    pub fn new(program: &'a Program, text: &'a [u8]) -> Self {
        Self { program, text }
    }

    /// Try the whole program at exactly `at`.
    /// Returns the index just past the match.
    #[inline]
    pub fn match_here(&self, at: usize) -> Option<usize> {
        if at > self.text.len() {
            return None;
        }
        self.run(0, at)
    }

    /// First match starting at or after `from`, as `(start, len)`.
    pub fn search(&self, from: usize) -> Option<(usize, usize)> {
        let text = self.text;
        if from > text.len() {
            return None;
        }
        match *self.program.first() {
            // Anchored: only one place to try
            Instr::Bol => self.run(0, from).map(|end| (from, end - from)),
            // Skip ahead to candidate positions holding the first literal
            Instr::Char(c) => {
                let mut si = from;
                while let Some(offset) = text[si..].iter().position(|&b| self.fold(b) == c) {
                    let at = si + offset;
                    if let Some(end) = self.run(0, at) {
                        return Some((at, end - at));
                    }
                    si = at + 1;
                }
                None
            }
            _ => (from..=text.len()).find_map(|at| self.run(0, at).map(|end| (at, end - at))),
        }
    }

    #[inline(always)]
    fn fold(&self, b: u8) -> u8 {
        if self.program.case_sensitive() { b } else { b.to_ascii_lowercase() }
    }

    /// Does the single-byte unit `instr` accept `b`?
    #[inline(always)]
    fn single(&self, instr: &Instr, b: u8) -> bool {
        match instr {
            Instr::Char(c) => self.fold(b) == *c,
            Instr::Any => true,
            Instr::Class(set) => set.contains(b),
            _ => false,
        }
    }

    #[inline]
    fn word_before(&self, si: usize) -> bool {
        si > 0 && is_word_byte(self.text[si - 1])
    }

    #[inline]
    fn word_at(&self, si: usize) -> bool {
        self.text.get(si).is_some_and(|&b| is_word_byte(b))
    }

    fn run(&self, mut pc: usize, mut si: usize) -> Option<usize> {
        let prog = self.program.instrs();
        let text = self.text;
        loop {
            let instr = &prog[pc];
            match instr {
                Instr::End => return Some(si),
                Instr::Char(_) | Instr::Any | Instr::Class(_) => {
                    if si < text.len() && self.single(instr, text[si]) {
                        si += 1;
                        pc += 1;
                    } else {
                        return None;
                    }
                }
                Instr::Bol => {
                    if si != 0 {
                        return None;
                    }
                    pc += 1;
                }
                Instr::Eol => {
                    if si != text.len() {
                        return None;
                    }
                    pc += 1;
                }
                Instr::Bow => {
                    if self.word_before(si) || !self.word_at(si) {
                        return None;
                    }
                    pc += 1;
                }
                Instr::Eow => {
                    if !self.word_before(si) || self.word_at(si) {
                        return None;
                    }
                    pc += 1;
                }
                Instr::WordBoundary => {
                    if self.word_before(si) == self.word_at(si) {
                        return None;
                    }
                    pc += 1;
                }
                Instr::Closure | Instr::Optional => {
                    return self.repeat(pc, si);
                }
            }
        }
    }

    /// Greedy repetition with backtracking: consume as many units as
    /// possible, then give them back one at a time until the rest matches.
    fn repeat(&self, pc: usize, si: usize) -> Option<usize> {
        let prog = self.program.instrs();
        let text = self.text;
        let max = match prog[pc] {
            Instr::Optional => 1,
            _ => usize::MAX,
        };
        let unit = &prog[pc + 1];
        debug_assert_eq!(prog[pc + 2], Instr::End);
        let rest = pc + 3;

        let mut count = 0;
        while count < max && si + count < text.len() && self.single(unit, text[si + count]) {
            count += 1;
        }
        loop {
            if let Some(end) = self.run(rest, si + count) {
                return Some(end);
            }
            if count == 0 {
                return None;
            }
            count -= 1;
        }
    }
}
