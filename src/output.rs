use std::io::{self, Write};

use serde::Serialize;
use serde_json::ser::{Formatter, Serializer};

/// Emits the same JSON text as the legacy filters: `", "` and `": "`
/// separators, everything outside printable ASCII escaped as `\uXXXX`.
#[derive(Debug, Default, Clone, Copy)]
pub struct AsciiJsonFormatter;

impl Formatter for AsciiJsonFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        if first { Ok(()) } else { writer.write_all(b", ") }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        if first { Ok(()) } else { writer.write_all(b", ") }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        writer.write_all(b": ")
    }

    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        let mut start = 0;
        for (idx, ch) in fragment.char_indices() {
            if (' '..='~').contains(&ch) {
                continue;
            }
            writer.write_all(&fragment.as_bytes()[start..idx])?;
            let mut units = [0u16; 2];
            for unit in ch.encode_utf16(&mut units) {
                write!(writer, "\\u{unit:04x}")?;
            }
            start = idx + ch.len_utf8();
        }
        writer.write_all(&fragment.as_bytes()[start..])
    }
}

/// Write one row followed by a newline.
pub fn write_row<W, T>(writer: &mut W, row: &T) -> io::Result<()>
where
    W: Write,
    T: Serialize + ?Sized,
{
    let mut ser = Serializer::with_formatter(&mut *writer, AsciiJsonFormatter);
    row.serialize(&mut ser)?;
    writer.write_all(b"\n")
}
