//! String interner for identifier and literal storage.
//!
//! Maps strings to compact 32-bit [`Name`] handles with O(1) lookup and
//! equality. Every distinct string is stored once; the empty string is
//! pre-interned as [`Name::EMPTY`].

use rustc_hash::FxHashMap;
use std::cell::RefCell;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Interned string identifier.
///
/// A plain index into the interner's string table. Comparing two `Name`s
/// is a u32 compare, so interned identifiers get O(1) equality.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd)]
#[repr(transparent)]
pub struct Name(u32);

impl Name {
    /// Pre-interned empty string.
    pub const EMPTY: Name = Name(0);

    /// Get raw u32 value.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Create from raw u32 value.
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Name(raw)
    }
}

impl Hash for Name {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Name({})", self.0)
    }
}

impl Default for Name {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// Error when interning a string fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InternError {
    /// Interner exceeded capacity (over 4 billion strings).
    Overflow { count: usize },
}

impl fmt::Display for InternError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InternError::Overflow { count } => write!(
                f,
                "interner exceeded capacity: {count} strings, max is {}",
                u32::MAX
            ),
        }
    }
}

impl std::error::Error for InternError {}

/// Interior storage: map from content to index plus the string table.
struct InternTable {
    map: FxHashMap<&'static str, u32>,
    strings: Vec<&'static str>,
}

/// String interner with interior mutability.
///
/// Interning takes `&self` so the lexer can share one interner reference
/// across the driver and the cooker. Not `Sync` — one interner per
/// lexing thread.
pub struct StringInterner {
    table: RefCell<InternTable>,
}

impl StringInterner {
    /// Create a new interner with the empty string pre-interned.
    pub fn new() -> Self {
        let mut table = InternTable {
            map: FxHashMap::default(),
            strings: Vec::with_capacity(256),
        };
        let empty: &'static str = "";
        table.map.insert(empty, 0);
        table.strings.push(empty);
        Self {
            table: RefCell::new(table),
        }
    }

    /// Try to intern a string, returning its Name or an error on overflow.
    pub fn try_intern(&self, s: &str) -> Result<Name, InternError> {
        let mut table = self.table.borrow_mut();
        if let Some(&idx) = table.map.get(s) {
            return Ok(Name(idx));
        }
        // Leak the string to get 'static lifetime; interned strings
        // live as long as the process.
        let leaked: &'static str = Box::leak(s.to_owned().into_boxed_str());
        Self::insert(&mut table, leaked)
    }

    /// Try to intern an owned String.
    ///
    /// Avoids the extra allocation `try_intern(&s)` would perform when the
    /// string is not yet interned (e.g. output of escape processing).
    pub fn try_intern_owned(&self, s: String) -> Result<Name, InternError> {
        let mut table = self.table.borrow_mut();
        if let Some(&idx) = table.map.get(s.as_str()) {
            return Ok(Name(idx));
        }
        let leaked: &'static str = Box::leak(s.into_boxed_str());
        Self::insert(&mut table, leaked)
    }

    fn insert(table: &mut InternTable, leaked: &'static str) -> Result<Name, InternError> {
        let idx = u32::try_from(table.strings.len()).map_err(|_| InternError::Overflow {
            count: table.strings.len(),
        })?;
        table.strings.push(leaked);
        table.map.insert(leaked, idx);
        Ok(Name(idx))
    }

    /// Intern a string, returning its Name.
    ///
    /// # Panics
    /// Panics if the interner exceeds capacity (over 4 billion strings).
    /// Use `try_intern` for fallible interning.
    #[inline]
    pub fn intern(&self, s: &str) -> Name {
        self.try_intern(s).unwrap_or_else(|e| panic!("{e}"))
    }

    /// Intern an owned String, avoiding double allocation.
    ///
    /// # Panics
    /// Panics if the interner exceeds capacity. Use `try_intern_owned` for
    /// fallible interning.
    #[inline]
    pub fn intern_owned(&self, s: String) -> Name {
        self.try_intern_owned(s).unwrap_or_else(|e| panic!("{e}"))
    }

    /// Look up the string for a Name.
    ///
    /// Returns a `'static` reference: interned strings are leaked and never
    /// deallocated.
    pub fn lookup(&self, name: Name) -> &'static str {
        self.table.borrow().strings[name.0 as usize]
    }

    /// Number of interned strings (including the empty string).
    pub fn len(&self) -> usize {
        self.table.borrow().strings.len()
    }

    /// Check if the interner holds only the pre-interned empty string.
    pub fn is_empty(&self) -> bool {
        self.len() <= 1
    }
}

impl Default for StringInterner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intern_and_lookup() {
        let interner = StringInterner::new();

        let hello = interner.intern("hello");
        let world = interner.intern("world");
        let hello2 = interner.intern("hello");

        assert_eq!(hello, hello2);
        assert_ne!(hello, world);

        assert_eq!(interner.lookup(hello), "hello");
        assert_eq!(interner.lookup(world), "world");
    }

    #[test]
    fn empty_string_is_name_empty() {
        let interner = StringInterner::new();
        let empty = interner.intern("");
        assert_eq!(empty, Name::EMPTY);
        assert_eq!(interner.lookup(Name::EMPTY), "");
    }

    #[test]
    fn intern_owned_deduplicates() {
        let interner = StringInterner::new();

        let name1 = interner.intern("shared");
        let name2 = interner.intern_owned(String::from("shared"));
        assert_eq!(name1, name2);
        assert_eq!(interner.lookup(name2), "shared");
    }

    #[test]
    fn len_counts_distinct_strings() {
        let interner = StringInterner::new();
        assert!(interner.is_empty());
        interner.intern("a");
        interner.intern("b");
        interner.intern("a");
        assert_eq!(interner.len(), 3); // "", "a", "b"
        assert!(!interner.is_empty());
    }

    #[test]
    fn name_is_four_bytes() {
        assert_eq!(std::mem::size_of::<Name>(), 4);
    }
}
