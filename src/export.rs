use alloc::string::String;
use alloc::string::ToString;
use alloc::vec::Vec;
use core::fmt::Display;
use core::fmt::Formatter;
use core::ops::Deref;

/// What an export resolves to.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum ExportTarget {
    /// The address of the symbol with this name.
    Symbol(String),
    /// A constant.
    Value(u32),
}

/// A single export.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Export {
    /// The externally visible name.
    pub name: String,
    /// What the name resolves to.
    pub target: ExportTarget,
}

impl Export {
    /// Export the address of `symbol` under `name`.
    pub fn symbol(name: impl Into<String>, symbol: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            target: ExportTarget::Symbol(symbol.into()),
        }
    }

    /// Export the symbol under its own name.
    pub fn itself(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            target: ExportTarget::Symbol(name.clone()),
            name,
        }
    }

    /// Export a constant under `name`.
    pub fn value(name: impl Into<String>, value: u32) -> Self {
        Self {
            name: name.into(),
            target: ExportTarget::Value(value),
        }
    }

    /// Get the constant if this is a value export.
    pub const fn as_value(&self) -> Option<u32> {
        match self.target {
            ExportTarget::Value(value) => Some(value),
            ExportTarget::Symbol(..) => None,
        }
    }

    /// Get the referenced symbol if this is a symbol export.
    pub fn as_symbol(&self) -> Option<&str> {
        match self.target {
            ExportTarget::Symbol(ref symbol) => Some(symbol.as_str()),
            ExportTarget::Value(..) => None,
        }
    }
}

impl Display for Export {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self.target {
            ExportTarget::Value(value) => write!(f, "{} = 0x{:08X}", self.name, value),
            ExportTarget::Symbol(ref symbol) if *symbol == self.name => write!(f, "{}", self.name),
            ExportTarget::Symbol(ref symbol) => write!(f, "{} -> {}", self.name, symbol),
        }
    }
}

/// Exports sorted by name.
///
/// Names are unique. The table format requires name pointers to be sorted, so the iteration
/// order is also the order of the entries in the encoded table.
#[derive(Clone, Default, PartialEq, Eq, Debug)]
pub struct ExportSet {
    entries: Vec<Export>,
}

impl ExportSet {
    /// Create empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert export.
    ///
    /// Returns `false` and leaves the set unchanged if an export with the same name is
    /// already present.
    pub fn insert(&mut self, export: Export) -> bool {
        match self.position(&export.name) {
            Ok(..) => false,
            Err(i) => {
                self.entries.insert(i, export);
                true
            }
        }
    }

    /// Find export by name.
    pub fn get(&self, name: &str) -> Option<&Export> {
        let i = self.position(name).ok()?;
        Some(&self.entries[i])
    }

    /// Remove export by name.
    pub fn remove(&mut self, name: &str) -> Option<Export> {
        let i = self.position(name).ok()?;
        Some(self.entries.remove(i))
    }

    /// Render as human-readable lines, one per export.
    pub fn render(&self) -> Vec<String> {
        self.entries.iter().map(ToString::to_string).collect()
    }

    fn position(&self, name: &str) -> Result<usize, usize> {
        self.entries
            .binary_search_by(|export| export.name.as_str().cmp(name))
    }
}

impl Deref for ExportSet {
    type Target = [Export];
    fn deref(&self) -> &Self::Target {
        &self.entries[..]
    }
}

impl Extend<Export> for ExportSet {
    fn extend<I: IntoIterator<Item = Export>>(&mut self, iter: I) {
        for export in iter {
            self.insert(export);
        }
    }
}

impl FromIterator<Export> for ExportSet {
    fn from_iter<I: IntoIterator<Item = Export>>(iter: I) -> Self {
        let mut exports = Self::new();
        exports.extend(iter);
        exports
    }
}

impl IntoIterator for ExportSet {
    type Item = Export;
    type IntoIter = alloc::vec::IntoIter<Export>;
    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a ExportSet {
    type Item = &'a Export;
    type IntoIter = core::slice::Iter<'a, Export>;
    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
