use std::path::PathBuf;

use exptab::Export;
use exptab::ExportSet;
use exptab::Fragment;
use exptab::Hunk;

use crate::CommonArgs;
use crate::HunkFlagsStr;
use crate::Printer;
use crate::RelocationKindStr;
use crate::SymbolFlagsStr;

#[derive(clap::Args)]
pub struct BuildArgs {
    /// Write raw table contents to this file.
    #[clap(short = 'o', long = "output", value_name = "FILE")]
    output: Option<PathBuf>,

    /// Exports.
    ///
    /// `NAME` exports the symbol under its own name, `NAME=SYMBOL` exports the symbol under
    /// another name, `NAME=NUMBER` exports a constant.
    #[clap(value_name = "EXPORT", required = true)]
    exports: Vec<String>,
}

pub fn build(common: CommonArgs, args: BuildArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut exports = ExportSet::new();
    for definition in args.exports.iter() {
        let export: Export = definition.parse()?;
        let name = export.name.clone();
        if !exports.insert(export) {
            log::warn!("Ignoring duplicate export {name:?}");
        }
    }
    let hunk = exports.encode(common.layout())?;
    let mut printer = Printer::new();
    printer.title("Exports");
    for line in exports.render() {
        printer.row(line);
    }
    show_hunk(&hunk, &mut printer);
    if let Some(output) = args.output {
        fs_err::write(&output, hunk.data())?;
        log::debug!("Wrote {} byte(s) to {:?}", hunk.raw_size(), output);
    }
    Ok(())
}

pub fn show_hunk(hunk: &Hunk, printer: &mut Printer) {
    printer.title("Hunk");
    printer.kv("Name", hunk.name());
    printer.kv("Flags", HunkFlagsStr(hunk.flags()));
    printer.kv(
        "Alignment",
        format_args!("{} (2^{})", hunk.align(), hunk.align_bits()),
    );
    printer.kv("Raw size", format_args!("{:#x}", hunk.raw_size()));
    printer.kv("Virtual size", format_args!("{:#x}", hunk.virtual_size()));
    printer.title("Symbols");
    if !hunk.symbols().is_empty() {
        printer.row(format_args!(
            "{:10}  {:5}  {:8}  Name",
            "Offset", "Flags", "Object"
        ));
    }
    for symbol in hunk.symbols() {
        printer.row(format_args!(
            "{:#010x}  {:5}  {:8}  {}",
            symbol.value,
            SymbolFlagsStr(symbol.flags).to_string(),
            symbol.object.as_deref().unwrap_or(""),
            symbol.name,
        ));
    }
    if hunk.relocations().is_empty() {
        return;
    }
    printer.title("Relocations");
    printer.row(format_args!(
        "{:10}  {:5}  {:8}  Symbol",
        "Offset", "Type", "Object"
    ));
    for relocation in hunk.relocations() {
        printer.row(format_args!(
            "{:#010x}  {:5}  {:8}  {}",
            relocation.offset,
            RelocationKindStr(relocation.kind),
            relocation.object,
            relocation.symbol,
        ));
    }
}
