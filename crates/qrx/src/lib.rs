// qrx
// Copy-on-write byte strings and a compact backtracking regex engine.
//
// - `shared`: reference-counted arrays that copy on first write, plus
//   borrowed raw-data views
// - `string`: a byte string on top of a shared array, searchable by byte,
//   by substring or by pattern
// - `regexp`: patterns compiled to a flat program and matched by backtracking

#[cfg(test)]
mod test;

pub mod limits;
pub mod options;
pub mod regexp;
pub mod shared;
pub mod string;

#[cfg(feature = "serde")]
mod serde_support;

pub use options::CompileOptions;
pub use regexp::{Match, Pattern, PatternCache, PatternError};
pub use shared::{ArrayData, ArrayError, ByteArray, RawArray, SharedArray};
pub use string::{IgnoreCase, Needle, SharedString};
