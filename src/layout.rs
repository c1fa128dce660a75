use crate::constants::*;
use crate::Error;

/// Where the image and its code are loaded.
///
/// The export table stores RVAs (addresses relative to the image base) while fragments are
/// addressed from the code base, hence the two values.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct ImageLayout {
    /// Address at which the image is loaded.
    pub image_base: u32,
    /// Address of the first byte of the code fragment.
    pub code_base: u32,
}

impl ImageLayout {
    /// Create layout with the specified bases.
    pub const fn new(image_base: u32, code_base: u32) -> Self {
        Self {
            image_base,
            code_base,
        }
    }

    /// The word that turns into an RVA once the absolute address of a symbol is added to it.
    pub const fn rva_sentinel(self) -> u32 {
        self.image_base.wrapping_neg()
    }

    /// Convert RVA to the offset within the code fragment.
    pub fn rva_to_offset(self, rva: u32) -> Result<usize, Error> {
        let offset = rva as i64 + self.image_base as i64 - self.code_base as i64;
        offset.try_into().map_err(|_| Error::InvalidOffset(offset))
    }

    /// Convert the offset within the code fragment to RVA.
    pub fn offset_to_rva(self, offset: usize) -> Result<u32, Error> {
        let rva = offset as i64 + self.code_base as i64 - self.image_base as i64;
        rva.try_into().map_err(|_| Error::InvalidOffset(rva))
    }
}

impl Default for ImageLayout {
    fn default() -> Self {
        Self::new(DEFAULT_IMAGE_BASE, DEFAULT_CODE_BASE)
    }
}
