use clap::Parser;
use std::process::ExitCode;

use exptab::ImageLayout;

mod build;
mod formatting;
mod strip;

pub(crate) use self::build::*;
pub(crate) use self::formatting::*;
pub(crate) use self::strip::*;

#[derive(clap::Parser)]
#[clap(version)]
struct Args {
    #[clap(flatten)]
    common: CommonArgs,
    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Args)]
pub struct CommonArgs {
    /// Image base address.
    #[clap(
        long = "image-base",
        value_name = "ADDRESS",
        value_parser = parse_number,
        default_value_t = ImageLayout::default().image_base,
    )]
    image_base: u32,

    /// The address of the code fragment.
    #[clap(
        long = "code-base",
        value_name = "ADDRESS",
        value_parser = parse_number,
        default_value_t = ImageLayout::default().code_base,
    )]
    code_base: u32,
}

impl CommonArgs {
    fn layout(&self) -> ImageLayout {
        ImageLayout::new(self.image_base, self.code_base)
    }
}

#[derive(clap::Subcommand)]
enum Command {
    /// Build export table from the list of exports.
    Build(BuildArgs),
    /// Strip export table from the linked image.
    Strip(StripArgs),
}

fn main() -> ExitCode {
    match do_main() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn do_main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let args = Args::parse();
    env_logger::init();
    match args.command {
        Command::Build(build_args) => build(args.common, build_args)?,
        Command::Strip(strip_args) => strip(args.common, strip_args)?,
    }
    Ok(ExitCode::SUCCESS)
}

fn parse_number(s: &str) -> Result<u32, String> {
    exptab::parse_literal(s).ok_or_else(|| format!("Invalid number: {s:?}"))
}
