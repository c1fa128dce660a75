use alloc::string::String;
use alloc::vec::Vec;

use crate::HunkFlags;
use crate::SymbolFlags;

const MAX_ALIGN_BITS: u8 = (usize::BITS - 1) as u8;

/// A named location within a hunk.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Symbol {
    /// Symbol name.
    pub name: String,
    /// Offset from the beginning of the hunk.
    pub value: u32,
    /// Symbol flags.
    pub flags: SymbolFlags,
    /// The name of the object (group) that defined the symbol.
    pub object: Option<String>,
}

impl Symbol {
    /// Create relocatable symbol.
    pub fn new(name: impl Into<String>, value: u32) -> Self {
        Self {
            name: name.into(),
            value,
            flags: SymbolFlags::RELOCATABLE,
            object: None,
        }
    }

    /// Set symbol flags.
    pub fn with_flags(mut self, flags: SymbolFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Set the object (group) name.
    pub fn with_object(mut self, object: impl Into<String>) -> Self {
        self.object = Some(object.into());
        self
    }
}

/// Relocation type.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum RelocationKind {
    /// Add the absolute 32-bit address of the symbol.
    Abs32,
    /// Add the 32-bit address of the symbol relative to the end of the patched word.
    Rel32,
}

/// A word that has to be patched with the address of a symbol.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Relocation {
    /// Target symbol name.
    pub symbol: String,
    /// The offset of the patched word from the beginning of the hunk.
    pub offset: u32,
    /// Relocation type.
    pub kind: RelocationKind,
    /// The name of the object (group) the relocation belongs to.
    pub object: String,
}

/// An image fragment that export tables are read from and written to.
pub trait Fragment {
    /// Append `len` zero bytes.
    fn append_zeroes(&mut self, len: usize);

    /// Raw contents.
    fn data(&self) -> &[u8];

    /// Register symbol.
    fn add_symbol(&mut self, symbol: Symbol);

    /// Register relocation.
    fn add_relocation(&mut self, relocation: Relocation);

    /// Truncate (or zero-extend) the raw contents to `len` bytes.
    fn set_raw_size(&mut self, len: usize);
}

/// A contiguous piece of the image with its symbols and relocations.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Hunk {
    name: String,
    data: Vec<u8>,
    flags: HunkFlags,
    align_bits: u8,
    virtual_size: usize,
    symbols: Vec<Symbol>,
    relocations: Vec<Relocation>,
}

impl Hunk {
    /// Create hunk from its raw contents.
    ///
    /// Virtual size is never smaller than the raw size. Alignment is capped at the largest
    /// power of two that fits in `usize`.
    pub fn new(
        name: impl Into<String>,
        data: Vec<u8>,
        flags: HunkFlags,
        align_bits: u8,
        virtual_size: usize,
    ) -> Self {
        let virtual_size = virtual_size.max(data.len());
        Self {
            name: name.into(),
            data,
            flags,
            align_bits: align_bits.min(MAX_ALIGN_BITS),
            virtual_size,
            symbols: Vec::new(),
            relocations: Vec::new(),
        }
    }

    /// Hunk name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Hunk flags.
    pub fn flags(&self) -> HunkFlags {
        self.flags
    }

    /// Alignment as a power of two.
    pub fn align_bits(&self) -> u8 {
        self.align_bits
    }

    /// Alignment in bytes.
    pub fn align(&self) -> usize {
        1_usize << self.align_bits
    }

    /// The length of the raw contents.
    pub fn raw_size(&self) -> usize {
        self.data.len()
    }

    /// The size in memory.
    pub fn virtual_size(&self) -> usize {
        self.virtual_size
    }

    /// Mutable raw contents.
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data[..]
    }

    /// Get the underlying contents.
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// All symbols in the order they were added.
    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols[..]
    }

    /// Find symbol by name.
    pub fn symbol(&self, name: &str) -> Option<&Symbol> {
        self.symbols.iter().find(|symbol| symbol.name == name)
    }

    /// All relocations in the order they were added.
    pub fn relocations(&self) -> &[Relocation] {
        &self.relocations[..]
    }
}

impl Fragment for Hunk {
    fn append_zeroes(&mut self, len: usize) {
        self.data.resize(self.data.len() + len, 0);
        self.virtual_size = self.virtual_size.max(self.data.len());
    }

    fn data(&self) -> &[u8] {
        &self.data[..]
    }

    fn add_symbol(&mut self, symbol: Symbol) {
        self.symbols.push(symbol);
    }

    fn add_relocation(&mut self, relocation: Relocation) {
        self.relocations.push(relocation);
    }

    fn set_raw_size(&mut self, len: usize) {
        self.data.resize(len, 0);
        self.virtual_size = self.virtual_size.max(len);
    }
}
