#![allow(clippy::unwrap_used)]
#![allow(missing_docs)]

use std::collections::HashMap;

use exptab::strip_exports;
use exptab::Export;
use exptab::ExportSet;
use exptab::Fragment;
use exptab::Hunk;
use exptab::HunkFlags;
use exptab::ImageLayout;
use exptab::RelocationKind;
use exptab::Symbol;

#[test]
fn build_link_strip_rebuild() {
    let _ = env_logger::try_init();
    let layout = ImageLayout::default();
    let exports: ExportSet = [
        "main",
        "entry=_start",
        "WIDTH=1920",
        "HEIGHT=1080",
        "MASK=0xff",
        "MODE=010",
        "ALSO_WIDTH=0x780",
    ]
    .into_iter()
    .map(|s| s.parse::<Export>().unwrap())
    .collect();
    assert_eq!(
        vec![
            "ALSO_WIDTH = 0x00000780",
            "HEIGHT = 0x00000438",
            "MASK = 0x000000FF",
            "MODE = 0x00000008",
            "WIDTH = 0x00000780",
            "entry -> _start",
            "main",
        ],
        exports.render()
    );

    let mut code = Hunk::new("code", vec![0x90; 100], HunkFlags::CODE, 0, 100);
    code.add_symbol(Symbol::new("_start", 0));
    code.add_symbol(Symbol::new("main", 32));
    let table = exports.encode(layout).unwrap();
    assert_eq!(4 * 4, table.symbol("_ExportTable").unwrap().value);
    let (image, table_address) = link(&code, &table, layout);

    let mut phase1 = Hunk::new("phase1", image, HunkFlags::CODE, 0, 0);
    let stripped = strip_exports(&mut phase1, table_address - layout.image_base, layout).unwrap();
    // The code hunk is 100 bytes long, the table is aligned to 4 bytes.
    assert_eq!(100, phase1.raw_size());
    assert_eq!(&[0x90_u8; 100][..], phase1.data());
    assert_eq!(
        vec![
            "ALSO_WIDTH = 0x00000780",
            "HEIGHT = 0x00000438",
            "MASK = 0x000000FF",
            "MODE = 0x00000008",
            "WIDTH = 0x00000780",
            "entry",
            "main",
        ],
        stripped.render()
    );
    assert_eq!(Some(0), phase1.symbol("entry").map(|s| s.value));
    assert_eq!(Some(32), phase1.symbol("main").map(|s| s.value));

    // The recovered exports produce the same table shape.
    let rebuilt = stripped.encode(layout).unwrap();
    assert_eq!(table.raw_size(), rebuilt.raw_size());
    assert_eq!(table.relocations().len(), rebuilt.relocations().len());
}

/// Place `code` at the code base and `table` right after it, apply relocations.
///
/// Returns the image and the address of the export directory.
fn link(code: &Hunk, table: &Hunk, layout: ImageLayout) -> (Vec<u8>, u32) {
    let mut image = code.data().to_vec();
    image.resize(image.len().next_multiple_of(table.align()), 0);
    let table_start = image.len();
    image.extend_from_slice(table.data());
    let mut addresses = HashMap::new();
    for symbol in code.symbols() {
        addresses.insert(symbol.name.as_str(), layout.code_base + symbol.value);
    }
    for symbol in table.symbols() {
        addresses
            .entry(symbol.name.as_str())
            .or_insert(layout.code_base + table_start as u32 + symbol.value);
    }
    for relocation in table.relocations() {
        assert_eq!(RelocationKind::Abs32, relocation.kind);
        let offset = table_start + relocation.offset as usize;
        let word = u32::from_le_bytes(image[offset..offset + 4].try_into().unwrap());
        let word = word.wrapping_add(addresses[relocation.symbol.as_str()]);
        image[offset..offset + 4].copy_from_slice(&word.to_le_bytes());
    }
    (image, addresses["_ExportTable"])
}
