use colored::Colorize;
use std::io::BufWriter;
use std::io::Stdout;
use std::io::Write;

use exptab::HunkFlags;
use exptab::RelocationKind;
use exptab::SymbolFlags;

pub struct Printer {
    first_title: bool,
    writer: BufWriter<Stdout>,
}

impl Printer {
    pub fn new() -> Self {
        Self {
            first_title: true,
            writer: BufWriter::new(std::io::stdout()),
        }
    }

    pub fn title(&mut self, title: &str) {
        let newline = if !self.first_title {
            "\n"
        } else {
            self.first_title = false;
            ""
        };
        let _ = writeln!(self.writer, "{}{}", newline, title.bold().underline());
    }

    pub fn kv<V: std::fmt::Display>(&mut self, key: &str, value: V) {
        let _ = writeln!(self.writer, "  {}: {}", key.bold().blue(), value);
    }

    pub fn row<V: std::fmt::Display>(&mut self, value: V) {
        let _ = writeln!(self.writer, "  {}", value);
    }
}

pub struct SymbolFlagsStr(pub SymbolFlags);

impl std::fmt::Display for SymbolFlagsStr {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let mut flags_str = [b'-', b'-', b' '];
        for flag in self.0.iter() {
            match flag {
                SymbolFlags::RELOCATABLE => flags_str[0] = b'r',
                SymbolFlags::SECTION => flags_str[1] = b's',
                _ => flags_str[2] = b'*',
            }
        }
        let s = std::str::from_utf8(&flags_str[..]).unwrap_or_default();
        write!(f, "{}", s)
    }
}

pub struct HunkFlagsStr(pub HunkFlags);

impl std::fmt::Display for HunkFlagsStr {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let mut flags_str = [b'-', b'-', b'-', b' '];
        for flag in self.0.iter() {
            match flag {
                HunkFlags::CODE => flags_str[0] = b'x',
                HunkFlags::WRITEABLE => flags_str[1] = b'w',
                HunkFlags::TRAILING => flags_str[2] = b't',
                _ => flags_str[3] = b'*',
            }
        }
        let s = std::str::from_utf8(&flags_str[..]).unwrap_or_default();
        write!(f, "{}", s)
    }
}

pub struct RelocationKindStr(pub RelocationKind);

impl std::fmt::Display for RelocationKindStr {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let s = match self.0 {
            RelocationKind::Abs32 => "ABS32",
            RelocationKind::Rel32 => "REL32",
        };
        let width = f.width().unwrap_or(0);
        write!(f, "{:width$}", s, width = width)
    }
}
