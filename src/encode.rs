use alloc::collections::BTreeMap;
use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use crate::constants::*;
use crate::Error;
use crate::ExportDirectory;
use crate::ExportSet;
use crate::ExportTarget;
use crate::Fragment;
use crate::Hunk;
use crate::HunkFlags;
use crate::ImageLayout;
use crate::Relocation;
use crate::RelocationKind;
use crate::Symbol;
use crate::SymbolFlags;
use crate::TableWrite;

/// Offsets of the table parts from the beginning of the hunk.
#[derive(Debug)]
struct TableOffsets {
    directory: u32,
    addresses: u32,
    name_pointers: u32,
    ordinals: u32,
    names: u32,
    len: u32,
}

impl TableOffsets {
    fn new(num_values: usize, num_exports: usize, names_len: usize) -> Result<Self, Error> {
        // The ordinal table stores 16-bit indices.
        if num_exports > u16::MAX as usize + 1 {
            return Err(Error::TooBig("No. of exports"));
        }
        let directory = num_values
            .checked_mul(SLOT_LEN)
            .ok_or(Error::TooBig("No. of values"))?;
        let addresses = directory + DIRECTORY_LEN;
        let name_pointers = addresses + num_exports * SLOT_LEN;
        let ordinals = name_pointers + num_exports * SLOT_LEN;
        let names = ordinals + num_exports * ORDINAL_LEN;
        let len = names
            .checked_add(names_len)
            .ok_or(Error::TooBig("Export table size"))?;
        let len: u32 = len
            .try_into()
            .map_err(|_| Error::TooBig("Export table size"))?;
        // Every other offset is smaller than `len`.
        Ok(Self {
            directory: directory as u32,
            addresses: addresses as u32,
            name_pointers: name_pointers as u32,
            ordinals: ordinals as u32,
            names: names as u32,
            len,
        })
    }
}

impl ExportSet {
    /// Build export table hunk.
    ///
    /// The table addresses are not resolved: every address in the table is a sentinel that is
    /// turned into an RVA by the relocations attached to the hunk.
    pub fn encode(&self, layout: ImageLayout) -> Result<Hunk, Error> {
        // Distinct values in ascending order and their slot indices.
        let mut values: BTreeMap<u32, u32> = BTreeMap::new();
        let mut names_len: usize = 0;
        for export in self.iter() {
            if export.name.contains('\0') {
                return Err(Error::InvalidName(export.name.clone()));
            }
            if let Some(value) = export.as_value() {
                values.insert(value, 0);
            }
            names_len = names_len
                .checked_add(export.name.len() + 1)
                .ok_or(Error::TooBig("Export names"))?;
        }
        for (i, slot) in values.values_mut().enumerate() {
            *slot = i as u32;
        }
        let offsets = TableOffsets::new(values.len(), self.len(), names_len)?;
        log::debug!(
            "Export table: {} export(s), {} value(s), {offsets:?}",
            self.len(),
            values.len(),
        );
        let sentinel = layout.rva_sentinel();
        let mut data: Vec<u8> = Vec::with_capacity(offsets.len as usize);
        for value in values.keys() {
            data.write_u32(*value);
        }
        debug_assert_eq!(offsets.directory as usize, data.len());
        ExportDirectory::unresolved(self.len() as u32, sentinel).write(&mut data);
        debug_assert_eq!(offsets.addresses as usize, data.len());
        // Addresses and name pointers.
        for _ in 0..self.len() * 2 {
            data.write_u32(sentinel);
        }
        debug_assert_eq!(offsets.ordinals as usize, data.len());
        for i in 0..self.len() {
            data.write_u16(i as u16);
        }
        debug_assert_eq!(offsets.names as usize, data.len());
        for export in self.iter() {
            data.write_bytes(export.name.as_bytes());
            data.write_bytes(&[0]);
        }
        debug_assert_eq!(offsets.len as usize, data.len());

        let mut hunk = Hunk::new(
            HUNK_NAME,
            data,
            HunkFlags::TRAILING,
            HUNK_ALIGN_BITS,
            offsets.len as usize,
        );
        hunk.add_symbol(
            Symbol::new(SECTION_SYMBOL, 0)
                .with_flags(SymbolFlags::RELOCATABLE | SymbolFlags::SECTION)
                .with_object(OBJECT_NAME),
        );
        for export in self.iter() {
            if let Some(value) = export.as_value() {
                let slot = values[&value];
                hunk.add_symbol(Symbol::new(export.name.as_str(), slot * SLOT_LEN as u32));
            }
        }
        hunk.add_symbol(Symbol::new(TABLE_SYMBOL, offsets.directory));
        hunk.add_symbol(Symbol::new(ADDRESSES_SYMBOL, offsets.addresses));
        hunk.add_symbol(Symbol::new(NAMES_SYMBOL, offsets.name_pointers));
        hunk.add_symbol(Symbol::new(ORDINALS_SYMBOL, offsets.ordinals));
        let mut name_offset = offsets.names;
        for export in self.iter() {
            hunk.add_symbol(Symbol::new(name_symbol(&export.name), name_offset));
            name_offset += export.name.len() as u32 + 1;
        }

        add_abs32(
            &mut hunk,
            ADDRESSES_SYMBOL,
            offsets.directory + ADDRESSES_RVA_OFFSET as u32,
        );
        add_abs32(
            &mut hunk,
            NAMES_SYMBOL,
            offsets.directory + NAMES_RVA_OFFSET as u32,
        );
        add_abs32(
            &mut hunk,
            ORDINALS_SYMBOL,
            offsets.directory + ORDINALS_RVA_OFFSET as u32,
        );
        for (i, export) in self.iter().enumerate() {
            let slot_offset = i as u32 * SLOT_LEN as u32;
            // Value exports point to their own symbol in the values block.
            let target = match export.target {
                ExportTarget::Value(..) => export.name.as_str(),
                ExportTarget::Symbol(ref symbol) => symbol.as_str(),
            };
            add_abs32(&mut hunk, target, offsets.addresses + slot_offset);
            add_abs32(
                &mut hunk,
                &name_symbol(&export.name),
                offsets.name_pointers + slot_offset,
            );
        }
        Ok(hunk)
    }
}

fn add_abs32(hunk: &mut Hunk, symbol: &str, offset: u32) {
    log::trace!("Export table relocation {symbol:?} at {offset:#x}");
    hunk.add_relocation(Relocation {
        symbol: symbol.into(),
        offset,
        kind: RelocationKind::Abs32,
        object: OBJECT_NAME.into(),
    });
}

pub(crate) fn name_symbol(name: &str) -> String {
    format!("{NAME_SYMBOL_PREFIX}{name}")
}
