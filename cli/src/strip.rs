use std::path::PathBuf;

use exptab::strip_exports;
use exptab::Hunk;
use exptab::HunkFlags;

use crate::parse_number;
use crate::show_hunk;
use crate::CommonArgs;
use crate::Printer;

#[derive(clap::Args)]
pub struct StripArgs {
    /// RVA of the export directory.
    #[clap(long = "rva", value_name = "RVA", value_parser = parse_number)]
    rva: u32,

    /// Write the stripped image to this file.
    #[clap(short = 'o', long = "output", value_name = "FILE")]
    output: Option<PathBuf>,

    /// Raw code image loaded at the code base.
    #[clap(value_name = "FILE")]
    file: PathBuf,
}

pub fn strip(common: CommonArgs, args: StripArgs) -> Result<(), Box<dyn std::error::Error>> {
    let data = fs_err::read(&args.file)?;
    let len = data.len();
    let mut hunk = Hunk::new("phase1", data, HunkFlags::CODE, 0, len);
    let exports = strip_exports(&mut hunk, args.rva, common.layout())?;
    log::debug!("Stripped {} byte(s)", len.saturating_sub(hunk.raw_size()));
    let mut printer = Printer::new();
    printer.title("Exports");
    for line in exports.render() {
        printer.row(line);
    }
    show_hunk(&hunk, &mut printer);
    if let Some(output) = args.output {
        fs_err::write(&output, hunk.into_data())?;
    }
    Ok(())
}
