use std::collections::HashMap;
use std::rc::Rc;

use ahash::RandomState;
use smol_str::SmolStr;

use super::Pattern;
use crate::limits::DEFAULT_CACHE_CAPACITY;
use crate::options::CompileOptions;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    text: SmolStr,
    case_sensitive: bool,
    wildcard: bool,
}

/// Memo of compiled patterns, so callers that search with the same pattern
/// text over and over compile it once.
///
/// - Same text and flags always return the same `Rc<Pattern>`
/// - Invalid patterns are cached too; they still report their error
/// - When full, the whole cache is dropped rather than evicting one entry
pub struct PatternCache {
    map: HashMap<CacheKey, Rc<Pattern>, RandomState>,
    capacity: usize,
    options: CompileOptions,
}

impl PatternCache {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CACHE_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            map: HashMap::with_capacity_and_hasher(capacity, RandomState::new()),
            capacity: capacity.max(1),
            options: CompileOptions::default(),
        }
    }

    /// Options used for every pattern compiled from now on. Changing them
    /// flushes the cache.
    pub fn set_options(&mut self, options: CompileOptions) {
        if self.options != options {
            self.options = options;
            self.map.clear();
        }
    }

    pub fn get(&mut self, text: &str, case_sensitive: bool, wildcard: bool) -> Rc<Pattern> {
        let key = CacheKey {
            text: SmolStr::new(text),
            case_sensitive,
            wildcard,
        };
        if let Some(pattern) = self.map.get(&key) {
            return Rc::clone(pattern);
        }

        if self.map.len() >= self.capacity {
            log::trace!("pattern cache full ({} entries), flushing", self.map.len());
            self.map.clear();
        }
        let pattern = Rc::new(Pattern::with_options(
            text,
            case_sensitive,
            wildcard,
            self.options,
        ));
        self.map.insert(key, Rc::clone(&pattern));
        pattern
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn clear(&mut self) {
        self.map.clear();
    }
}

impl Default for PatternCache {
    fn default() -> Self {
        Self::new()
    }
}
