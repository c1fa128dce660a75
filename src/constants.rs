pub const DEFAULT_IMAGE_BASE: u32 = 0x40_0000;
pub const SECTION_ALIGN: u32 = 0x1_0000;
pub const DEFAULT_CODE_BASE: u32 = DEFAULT_IMAGE_BASE + SECTION_ALIGN * 2;

pub const DIRECTORY_LEN: usize = 40;
pub const SLOT_LEN: usize = 4;
pub const ORDINAL_LEN: usize = 2;
pub const ORDINAL_BASE: u32 = 1;

// Offsets of the RVA fields within the directory.
pub const NUM_NAMES_OFFSET: usize = 24;
pub const ADDRESSES_RVA_OFFSET: usize = 28;
pub const NAMES_RVA_OFFSET: usize = 32;
pub const ORDINALS_RVA_OFFSET: usize = 36;

pub const HUNK_NAME: &str = "Exports";
pub const HUNK_ALIGN_BITS: u8 = 2;
pub const OBJECT_NAME: &str = "EXPORT";

pub const SECTION_SYMBOL: &str = "exports";
pub const TABLE_SYMBOL: &str = "_ExportTable";
pub const ADDRESSES_SYMBOL: &str = "_ExportAddresses";
pub const NAMES_SYMBOL: &str = "_ExportNames";
pub const ORDINALS_SYMBOL: &str = "_ExportOrdinals";
pub const NAME_SYMBOL_PREFIX: &str = "_ExportName_";
