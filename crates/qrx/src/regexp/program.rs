// Compiled program
//
// A flat instruction stream terminated by END. Repetition is encoded inline:
//
//   CLOSURE  <unit>  END     zero or more <unit>
//   OPTIONAL <unit>  END     zero or one <unit>
//
// where <unit> is a single CHAR, ANY or CCLASS. `+` is emitted as the unit
// followed by a CLOSURE of the same unit.

use super::class::ByteSet;
use crate::limits::{CLASS_CELLS, OPCODE_CELLS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instr {
    /// Literal byte. Stored lowercased when the program is case-insensitive.
    Char(u8),
    Any,
    Class(ByteSet),
    Bol,
    Eol,
    Bow,
    Eow,
    /// `\b`: either side of a word.
    WordBoundary,
    Closure,
    Optional,
    End,
}

impl Instr {
    /// Size of the instruction in 16-bit cells.
    #[inline]
    pub fn cells(&self) -> usize {
        match self {
            Instr::Class(_) => OPCODE_CELLS + CLASS_CELLS,
            _ => OPCODE_CELLS,
        }
    }

    /// Whether the instruction consumes exactly one byte, i.e. may be wrapped
    /// by a repetition.
    #[inline]
    pub fn is_unit(&self) -> bool {
        matches!(self, Instr::Char(_) | Instr::Any | Instr::Class(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    instrs: Box<[Instr]>,
    cells: usize,
    case_sensitive: bool,
}

impl Program {
    pub(crate) fn new(instrs: Vec<Instr>, cells: usize, case_sensitive: bool) -> Self {
        debug_assert_eq!(instrs.last(), Some(&Instr::End));
        Self {
            instrs: instrs.into_boxed_slice(),
            cells,
            case_sensitive,
        }
    }

    #[inline]
    pub fn instrs(&self) -> &[Instr] {
        &self.instrs
    }

    /// Total size in cells, the trailing END included.
    #[inline]
    pub fn cells(&self) -> usize {
        self.cells
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.instrs.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.instrs.is_empty()
    }

    #[inline]
    pub fn case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    #[inline]
    pub fn first(&self) -> &Instr {
        &self.instrs[0]
    }
}
