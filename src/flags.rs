use bitflags::bitflags;

bitflags! {
    /// Symbol flags.
    #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
    pub struct SymbolFlags: u32 {
        /// Symbol value is an offset within its hunk and moves with it.
        const RELOCATABLE = 1 << 0;
        /// Symbol marks the start of a section.
        const SECTION = 1 << 1;
        // Any bits can be set.
        const _ = !0;
    }
}

bitflags! {
    /// Hunk flags.
    #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
    pub struct HunkFlags: u32 {
        /// Contains executable code.
        const CODE = 1 << 0;
        /// Writable at run time.
        const WRITEABLE = 1 << 1;
        /// Placed after all other hunks when the image is laid out.
        const TRAILING = 1 << 2;
        // Any bits can be set.
        const _ = !0;
    }
}
