#![allow(missing_docs)]

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;
use arbitrary::Unstructured;

use crate::Export;
use crate::ExportSet;
use crate::Fragment;
use crate::Hunk;
use crate::HunkFlags;
use crate::ImageLayout;
use crate::RelocationKind;
use crate::Symbol;

/// Symbols defined by [`code_hunk`].
pub const CODE_SYMBOLS: [(&str, u32); 4] = [("_start", 0), ("main", 4), ("draw", 8), ("data", 16)];

/// The length of [`code_hunk`].
pub const CODE_LEN: usize = 64;

pub fn code_hunk() -> Hunk {
    let mut hunk = Hunk::new("code", vec![0xcc; CODE_LEN], HunkFlags::CODE, 4, CODE_LEN);
    for (name, offset) in CODE_SYMBOLS {
        hunk.add_symbol(Symbol::new(name, offset));
    }
    hunk
}

/// Offset of the code symbol within [`code_hunk`].
pub fn code_offset(name: &str) -> Option<usize> {
    CODE_SYMBOLS
        .iter()
        .find(|(symbol, _)| *symbol == name)
        .map(|(_, offset)| *offset as usize)
}

/// Exports of values and of symbols from [`code_hunk`].
pub fn arbitrary_export_set(u: &mut Unstructured<'_>) -> arbitrary::Result<ExportSet> {
    let num_exports = u.int_in_range(0..=20)?;
    let mut exports = ExportSet::new();
    for _ in 0..num_exports {
        let name = arbitrary_name(u)?;
        let export = match u.int_in_range(0..=3)? {
            0 => Export::value(name, u.arbitrary()?),
            // Small values collide.
            1 => Export::value(name, u.int_in_range(0..=3)?),
            2 => Export::symbol(name, u.choose(&CODE_SYMBOLS)?.0),
            _ => {
                let (symbol, _) = u.choose(&CODE_SYMBOLS)?;
                Export::itself(*symbol)
            }
        };
        exports.insert(export);
    }
    Ok(exports)
}

fn arbitrary_name(u: &mut Unstructured<'_>) -> arbitrary::Result<String> {
    const FIRST: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";
    const CHARS: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789_@?";
    let len = u.int_in_range(0..=11)?;
    let mut name = String::with_capacity(len + 2);
    name.push(*u.choose(FIRST)? as char);
    for _ in 0..len {
        name.push(*u.choose(CHARS)? as char);
    }
    // Value symbols must not shadow the symbols of the image.
    if code_offset(&name).is_some() || name == "exports" {
        name.push('1');
    }
    Ok(name)
}

/// Hunks laid out one after another starting at the code base, with relocations applied.
pub struct LinkedImage {
    pub data: Vec<u8>,
    pub addresses: BTreeMap<String, u32>,
}

impl LinkedImage {
    pub fn rva(&self, symbol: &str, layout: ImageLayout) -> u32 {
        self.addresses[symbol] - layout.image_base
    }

    /// The linked image as a single fragment without symbols.
    pub fn into_hunk(self) -> Hunk {
        let len = self.data.len();
        Hunk::new("phase1", self.data, HunkFlags::CODE, 0, len)
    }
}

pub fn link(hunks: &[&Hunk], layout: ImageLayout) -> LinkedImage {
    let mut data = Vec::new();
    let mut starts = Vec::with_capacity(hunks.len());
    let mut addresses = BTreeMap::new();
    for hunk in hunks {
        let align = hunk.align();
        data.resize(data.len().next_multiple_of(align), 0);
        starts.push(data.len());
        for symbol in hunk.symbols() {
            let address = layout.code_base + data.len() as u32 + symbol.value;
            addresses.entry(symbol.name.clone()).or_insert(address);
        }
        data.extend_from_slice(hunk.data());
    }
    for (hunk, start) in hunks.iter().zip(starts) {
        for relocation in hunk.relocations() {
            let offset = start + relocation.offset as usize;
            let address = *addresses
                .get(&relocation.symbol)
                .unwrap_or_else(|| panic!("Undefined symbol {:?}", relocation.symbol));
            let word: [u8; 4] = data[offset..offset + 4].try_into().unwrap();
            let word = u32::from_le_bytes(word);
            let word = match relocation.kind {
                RelocationKind::Abs32 => word.wrapping_add(address),
                RelocationKind::Rel32 => word
                    .wrapping_add(address)
                    .wrapping_sub(layout.code_base + offset as u32 + 4),
            };
            data[offset..offset + 4].copy_from_slice(&word.to_le_bytes());
        }
    }
    LinkedImage { data, addresses }
}
