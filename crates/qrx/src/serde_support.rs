// Serde support
//
// - SharedString: a string when it is valid UTF-8 and the format is human
//   readable, raw bytes otherwise
// - SharedArray<T>: a sequence of cells
// - Pattern: { pattern, case_sensitive, wildcard, max_cells }, recompiled
//   when read back

use std::fmt;

use serde::de::{self, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::limits::DEFAULT_MAX_CELLS;
use crate::options::CompileOptions;
use crate::regexp::Pattern;
use crate::shared::SharedArray;
use crate::string::SharedString;

impl Serialize for SharedString {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if serializer.is_human_readable()
            && let Ok(s) = std::str::from_utf8(self.as_bytes())
        {
            return serializer.serialize_str(s);
        }
        serializer.serialize_bytes(self.as_bytes())
    }
}

struct SharedStringVisitor;

impl<'de> Visitor<'de> for SharedStringVisitor {
    type Value = SharedString;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a string or a byte array")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<SharedString, E> {
        Ok(SharedString::from(v))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<SharedString, E> {
        Ok(SharedString::from(v))
    }

    fn visit_bytes<E: de::Error>(self, v: &[u8]) -> Result<SharedString, E> {
        Ok(SharedString::from_bytes(v))
    }

    fn visit_byte_buf<E: de::Error>(self, v: Vec<u8>) -> Result<SharedString, E> {
        Ok(SharedString::from(v))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<SharedString, A::Error> {
        let mut bytes = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(b) = seq.next_element::<u8>()? {
            bytes.push(b);
        }
        Ok(SharedString::from(bytes))
    }
}

impl<'de> Deserialize<'de> for SharedString {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        if deserializer.is_human_readable() {
            deserializer.deserialize_any(SharedStringVisitor)
        } else {
            deserializer.deserialize_byte_buf(SharedStringVisitor)
        }
    }
}

impl<T> Serialize for SharedArray<T>
where
    T: Serialize + Copy + PartialEq + Default,
{
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.as_slice())
    }
}

impl<'de, T> Deserialize<'de> for SharedArray<T>
where
    T: Deserialize<'de> + Copy + PartialEq + Default,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::<T>::deserialize(deserializer).map(SharedArray::from)
    }
}

fn default_case_sensitive() -> bool {
    true
}

fn default_max_cells() -> usize {
    DEFAULT_MAX_CELLS
}

#[derive(Serialize, Deserialize)]
struct PatternRepr {
    pattern: String,
    #[serde(default = "default_case_sensitive")]
    case_sensitive: bool,
    #[serde(default)]
    wildcard: bool,
    #[serde(default = "default_max_cells")]
    max_cells: usize,
}

impl Serialize for Pattern {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        PatternRepr {
            pattern: self.pattern().to_string(),
            case_sensitive: self.case_sensitive(),
            wildcard: self.wildcard(),
            max_cells: self.options().max_cells,
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Pattern {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let repr = PatternRepr::deserialize(deserializer)?;
        let options = CompileOptions::default().with_max_cells(repr.max_cells);
        Ok(Pattern::with_options(
            &repr.pattern,
            repr.case_sensitive,
            repr.wildcard,
            options,
        ))
    }
}
