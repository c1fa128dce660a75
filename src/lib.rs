#![doc = include_str!("../README.md")]
#![no_std]

extern crate alloc;
#[cfg(any(test, feature = "std"))]
extern crate std;

pub(crate) mod constants;
mod directory;
mod encode;
mod error;
mod export;
mod flags;
mod hunk;
mod io;
mod layout;
mod parse;
mod strip;
#[cfg(test)]
mod test;

pub use self::directory::*;
pub use self::error::*;
pub use self::export::*;
pub use self::flags::*;
pub use self::hunk::*;
pub(crate) use self::io::*;
pub use self::layout::*;
pub use self::parse::*;
pub use self::strip::*;
