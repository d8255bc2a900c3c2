// dbpeek-core/src/application/render.rs
//
// Text report layout:
//
//   Tables: ['users', 'orders']
//
//   Schema for users:
//     id: INTEGER
//     name: TEXT
//
//   Sample row: (1, 'a')

use std::io::{self, Write};

use crate::domain::{ColumnDescriptor, InspectionReport, SampleRow, Value};
use crate::error::PeekError;

pub fn write_tables<W: Write + ?Sized>(out: &mut W, tables: &[String]) -> io::Result<()> {
    writeln!(out, "Tables: {}", format_name_list(tables))
}

pub fn write_schema<W: Write + ?Sized>(
    out: &mut W,
    table: &str,
    columns: &[ColumnDescriptor],
) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "Schema for {}:", table)?;
    for column in columns {
        writeln!(out, "  {}: {}", column.name, column.declared_type)?;
    }
    Ok(())
}

pub fn write_sample<W: Write + ?Sized>(out: &mut W, row: Option<&SampleRow>) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "Sample row: {}", format_row(row))
}

pub fn write_json<W: Write + ?Sized>(
    out: &mut W,
    report: &InspectionReport,
) -> Result<(), PeekError> {
    serde_json::to_writer_pretty(&mut *out, report)?;
    writeln!(out)?;
    Ok(())
}

/// `['a', 'b']`
pub fn format_name_list(names: &[String]) -> String {
    let items: Vec<String> = names.iter().map(|n| quote_text(n)).collect();
    format!("[{}]", items.join(", "))
}

/// `(1, 'a')`, `(1,)` for a single column, `None` when there is no row.
pub fn format_row(row: Option<&SampleRow>) -> String {
    let Some(row) = row else {
        return "None".to_string();
    };
    let items: Vec<String> = row.values().iter().map(format_value).collect();
    match items.as_slice() {
        [single] => format!("({},)", single),
        _ => format!("({})", items.join(", ")),
    }
}

pub fn format_value(value: &Value) -> String {
    match value {
        Value::Null => "None".to_string(),
        Value::Integer(i) => i.to_string(),
        Value::Real(f) => format_real(*f),
        Value::Boolean(true) => "True".to_string(),
        Value::Boolean(false) => "False".to_string(),
        Value::Text(s) => quote_text(s),
        Value::Blob(b) => quote_bytes(b),
        Value::Other(s) => s.clone(),
    }
}

/// Shortest round-trip form, always with a fractional part or an exponent,
/// exponents signed and at least two digits wide (`1e+16`, `1e-05`).
fn format_real(f: f64) -> String {
    if f.is_nan() {
        return "nan".to_string();
    }
    if f.is_infinite() {
        return if f > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    let debug = format!("{:?}", f);
    match debug.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            format!("{}e{}{:0>2}", mantissa, sign, digits)
        }
        None => debug,
    }
}

fn pick_quote(has_single: bool, has_double: bool) -> char {
    if has_single && !has_double { '"' } else { '\'' }
}

fn quote_text(s: &str) -> String {
    let quote = pick_quote(s.contains('\''), s.contains('"'));
    let mut out = String::with_capacity(s.len() + 2);
    out.push(quote);
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c if !is_printable(c) => out.push_str(&escape_code_point(c)),
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}

/// Control, format, separator (other than the plain space), private-use
/// and noncharacter code points. Unassigned code points are not tracked
/// and print as-is.
fn is_printable(c: char) -> bool {
    let cp = c as u32;
    let hidden = matches!(
        cp,
        0x00..=0x1f
            | 0x7f..=0xa0
            | 0xad
            | 0x600..=0x605
            | 0x61c
            | 0x6dd
            | 0x70f
            | 0x8e2
            | 0x1680
            | 0x180e
            | 0x2000..=0x200f
            | 0x2028..=0x202f
            | 0x205f..=0x2064
            | 0x2066..=0x206f
            | 0x3000
            | 0xe000..=0xf8ff
            | 0xfdd0..=0xfdef
            | 0xfeff
            | 0xfff9..=0xfffb
            | 0x110bd
            | 0x110cd
            | 0x1bca0..=0x1bca3
            | 0x1d173..=0x1d17a
            | 0xe0001
            | 0xe0020..=0xe007f
            | 0xf0000..=0x10ffff
    );
    // U+xxFFFE and U+xxFFFF are noncharacters in every plane
    !hidden && (cp & 0xfffe) != 0xfffe
}

/// `\x01`, `\u200b`, `\U000e0001`
fn escape_code_point(c: char) -> String {
    match c as u32 {
        cp @ 0..=0xff => format!("\\x{:02x}", cp),
        cp @ 0x100..=0xffff => format!("\\u{:04x}", cp),
        cp => format!("\\U{:08x}", cp),
    }
}

fn quote_bytes(bytes: &[u8]) -> String {
    let quote = pick_quote(bytes.contains(&b'\''), bytes.contains(&b'"'));
    let mut out = String::with_capacity(bytes.len() + 3);
    out.push('b');
    out.push(quote);
    for &b in bytes {
        match b {
            b'\\' => out.push_str("\\\\"),
            b'\n' => out.push_str("\\n"),
            b'\r' => out.push_str("\\r"),
            b'\t' => out.push_str("\\t"),
            b if char::from(b) == quote => {
                out.push('\\');
                out.push(quote);
            }
            0x20..=0x7e => out.push(char::from(b)),
            _ => out.push_str(&format!("\\x{:02x}", b)),
        }
    }
    out.push(quote);
    out
}
