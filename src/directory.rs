use alloc::vec::Vec;

use crate::constants::*;
use crate::Error;
use crate::TableRead;
use crate::TableWrite;

/// Export directory header.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(test, derive(arbitrary::Arbitrary))]
pub struct ExportDirectory {
    /// Reserved, always zero.
    pub flags: u32,
    /// Time stamp.
    pub timestamp: u32,
    /// Major and minor version.
    pub version: u32,
    /// RVA of the image name.
    pub name_rva: u32,
    /// The ordinal of the first entry in the address table.
    pub ordinal_base: u32,
    /// The number of entries in the address table.
    pub num_addresses: u32,
    /// The number of entries in the name pointer and ordinal tables.
    pub num_names: u32,
    /// RVA of the address table.
    pub addresses_rva: u32,
    /// RVA of the name pointer table.
    pub names_rva: u32,
    /// RVA of the ordinal table.
    pub ordinals_rva: u32,
}

impl ExportDirectory {
    /// Directory of `len` exports with all three table RVAs set to `sentinel`.
    pub const fn unresolved(len: u32, sentinel: u32) -> Self {
        Self {
            flags: 0,
            timestamp: 0,
            version: 0,
            name_rva: 0,
            ordinal_base: ORDINAL_BASE,
            num_addresses: len,
            num_names: len,
            addresses_rva: sentinel,
            names_rva: sentinel,
            ordinals_rva: sentinel,
        }
    }

    /// Read directory located at `offset` within `data`.
    pub fn read(data: &[u8], offset: usize) -> Result<Self, Error> {
        let field = |i: usize| data.read_u32_at(offset.saturating_add(i * 4));
        Ok(Self {
            flags: field(0)?,
            timestamp: field(1)?,
            version: field(2)?,
            name_rva: field(3)?,
            ordinal_base: field(4)?,
            num_addresses: field(5)?,
            num_names: field(NUM_NAMES_OFFSET / 4)?,
            addresses_rva: field(ADDRESSES_RVA_OFFSET / 4)?,
            names_rva: field(NAMES_RVA_OFFSET / 4)?,
            ordinals_rva: field(ORDINALS_RVA_OFFSET / 4)?,
        })
    }

    /// Append directory to `data`.
    pub fn write(&self, data: &mut Vec<u8>) {
        data.write_u32(self.flags);
        data.write_u32(self.timestamp);
        data.write_u32(self.version);
        data.write_u32(self.name_rva);
        data.write_u32(self.ordinal_base);
        data.write_u32(self.num_addresses);
        data.write_u32(self.num_names);
        data.write_u32(self.addresses_rva);
        data.write_u32(self.names_rva);
        data.write_u32(self.ordinals_rva);
    }
}
