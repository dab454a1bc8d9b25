//! Centralized limits and constants.
//!
//! All magic numbers that shape compilation and matching live here so they
//! can be tuned in one place.

// ===== Compiler =====

/// Default capacity of a compiled program, in 16-bit cells.
/// This is the size of the historical fixed instruction buffer.
pub const DEFAULT_MAX_CELLS: usize = 1024;

/// Cells occupied by the bitmap that follows a character-class opcode
/// (256 bits stored as sixteen 16-bit words).
pub const CLASS_CELLS: usize = 16;

/// Cells occupied by every opcode other than a character class.
pub const OPCODE_CELLS: usize = 1;

// ===== Character classes =====

/// Bytes matched by `\s` and by the `\s` item inside a bracket expression:
/// tab, newline, vertical tab, form feed, carriage return and space.
pub const WHITESPACE: [u8; 6] = [9, 10, 11, 12, 13, 32];

// ===== Pattern cache =====

/// Number of compiled patterns a `PatternCache` keeps before it is flushed.
pub const DEFAULT_CACHE_CAPACITY: usize = 64;
