use alloc::string::String;
use alloc::vec::Vec;
use core::ffi::CStr;

use crate::constants::*;
use crate::Error;
use crate::Export;
use crate::ExportDirectory;
use crate::ExportSet;
use crate::Fragment;
use crate::ImageLayout;
use crate::Symbol;
use crate::TableRead;

/// Remove export table from the fragment and recover the exports.
///
/// The table is expected to be produced by [`ExportSet::encode`] and relocated, with the
/// directory located at `table_rva`. Symbol exports are recovered as exports of themselves:
/// a new symbol is added to the fragment at the exported address. Value exports are read
/// from the block of values that directly precedes the directory.
///
/// The fragment is truncated to the start of the values block (or the directory if there are
/// no value exports).
///
/// On error the fragment is left unchanged.
pub fn strip_exports<F: Fragment + ?Sized>(
    fragment: &mut F,
    table_rva: u32,
    layout: ImageLayout,
) -> Result<ExportSet, Error> {
    let len = fragment.data().len();
    // Make sure the last name is terminated.
    fragment.append_zeroes(1);
    let table = match read_table(fragment.data(), table_rva, layout) {
        Ok(table) => table,
        Err(e) => {
            fragment.set_raw_size(len);
            return Err(e);
        }
    };
    for (name, value) in table.symbols {
        fragment.add_symbol(Symbol::new(name, value).with_object(OBJECT_NAME));
    }
    log::debug!("Truncating fragment to {:#x}", table.values_offset);
    fragment.set_raw_size(table.values_offset);
    Ok(table.exports)
}

struct StrippedTable {
    exports: ExportSet,
    /// Symbols that have to be added to the fragment.
    symbols: Vec<(String, u32)>,
    /// The start of the table.
    values_offset: usize,
}

fn read_table(data: &[u8], table_rva: u32, layout: ImageLayout) -> Result<StrippedTable, Error> {
    let table_offset = layout.rva_to_offset(table_rva)?;
    let directory = ExportDirectory::read(data, table_offset)?;
    let addresses_offset = layout.rva_to_offset(directory.addresses_rva)?;
    let names_offset = layout.rva_to_offset(directory.names_rva)?;
    let ordinals_offset = layout.rva_to_offset(directory.ordinals_rva)?;
    let num_exports = directory.num_names as usize;
    log::debug!(
        "Export table at {table_offset:#x}: {num_exports} export(s), \
        addresses at {addresses_offset:#x}, names at {names_offset:#x}, \
        ordinals at {ordinals_offset:#x}"
    );

    // (name, address offset) pairs
    let mut entries: Vec<(String, usize)> =
        Vec::with_capacity(num_exports.min(data.len() / SLOT_LEN));
    for i in 0..num_exports {
        let ordinal = data.read_u16_at(ordinals_offset.saturating_add(i * ORDINAL_LEN))? as usize;
        let address_rva = data.read_u32_at(addresses_offset.saturating_add(ordinal * SLOT_LEN))?;
        let name_rva = data.read_u32_at(names_offset.saturating_add(i * SLOT_LEN))?;
        let address_offset = layout.rva_to_offset(address_rva)?;
        let name = read_name(data, layout.rva_to_offset(name_rva)?)?;
        log::trace!("Found export {name:?} at {address_offset:#x}");
        entries.push((name, address_offset));
    }
    // Stable sort keeps the table order of exports with the same address.
    entries.sort_by_key(|(_, offset)| *offset);

    let mut exports = ExportSet::new();
    // Values are stored right before the directory, the block ends where the directory begins.
    let mut values_offset = table_offset;
    while let Some((_, offset)) = entries.last() {
        let offset = *offset;
        if offset.saturating_add(SLOT_LEN) < values_offset {
            break;
        }
        let value = data.read_u32_at(offset)?;
        if let Some((name, _)) = entries.pop() {
            log::trace!("Found value export {name:?} = {value:#x}");
            exports.insert(Export::value(name, value));
        }
        values_offset = offset;
    }

    let mut symbols = Vec::with_capacity(entries.len());
    for (name, offset) in entries {
        let value: u32 = offset
            .try_into()
            .map_err(|_| Error::TooBig("Symbol offset"))?;
        symbols.push((name.clone(), value));
        exports.insert(Export::itself(name));
    }
    Ok(StrippedTable {
        exports,
        symbols,
        values_offset,
    })
}

fn read_name(data: &[u8], offset: usize) -> Result<String, Error> {
    let bytes = data.get(offset..).ok_or(Error::UnexpectedEof)?;
    let c_str = CStr::from_bytes_until_nul(bytes).map_err(|_| Error::UnexpectedEof)?;
    match c_str.to_str() {
        Ok(name) => Ok(name.into()),
        Err(_) => Err(Error::InvalidName(
            String::from_utf8_lossy(c_str.to_bytes()).into_owned(),
        )),
    }
}
