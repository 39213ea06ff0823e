//! PostgreSQL JSONB literal unwrapping.
//!
//! The driver hands JSONB documents over wrapped in one extra layer of
//! quoting: a leading and trailing character around a payload whose quotes
//! are backslash-escaped, e.g. `"{\"a\":1}"`. Unwrapping removes exactly one
//! character from each end, whatever they are, then undoes C-style
//! backslash escapes.

/// Remove exactly one character from each end of `raw`.
///
/// Returns `None` when `raw` has fewer than two characters.
pub fn strip_outer_quotes(raw: &str) -> Option<&str> {
    let mut chars = raw.chars();
    chars.next()?;
    chars.next_back()?;
    Some(chars.as_str())
}

/// Undo C-style backslash escapes.
///
/// Recognizes `\n`, `\t`, `\r`, `\a`, `\v`, `\b`, `\f`, `\\`, hex escapes
/// (`\xH` / `\xHH`) and octal escapes (one to three digits). Any other
/// escaped character stands for itself, and a trailing lone backslash is
/// kept. Hex and octal escapes may produce arbitrary bytes, hence the byte
/// output.
pub fn strip_c_slashes(input: &str) -> Vec<u8> {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != b'\\' || i + 1 == bytes.len() {
            out.push(bytes[i]);
            i += 1;
            continue;
        }

        i += 1;
        match bytes[i] {
            b'n' => out.push(b'\n'),
            b't' => out.push(b'\t'),
            b'r' => out.push(b'\r'),
            b'a' => out.push(0x07),
            b'v' => out.push(0x0b),
            b'b' => out.push(0x08),
            b'f' => out.push(0x0c),
            b'\\' => out.push(b'\\'),
            b'x' if bytes.get(i + 1).is_some_and(u8::is_ascii_hexdigit) => {
                let digits = bytes[i + 1..]
                    .iter()
                    .take(2)
                    .take_while(|b| b.is_ascii_hexdigit())
                    .count();
                out.push(parse_radix(&bytes[i + 1..=i + digits], 16));
                i += digits;
            }
            b'0'..=b'7' => {
                let digits = bytes[i..]
                    .iter()
                    .take(3)
                    .take_while(|b| (b'0'..=b'7').contains(*b))
                    .count();
                out.push(parse_radix(&bytes[i..i + digits], 8));
                i += digits - 1;
            }
            other => out.push(other),
        }
        i += 1;
    }

    out
}

/// Parse ASCII digits in `radix`, truncating to a byte like a C `char` cast.
fn parse_radix(digits: &[u8], radix: u32) -> u8 {
    digits
        .iter()
        .filter_map(|d| char::from(*d).to_digit(radix))
        .fold(0u32, |acc, d| acc * radix + d) as u8
}

/// Unwrap a raw JSONB column value into plain JSON text.
///
/// Returns `None` when the value is too short to unwrap or the unescaped
/// bytes are not valid UTF-8.
pub fn unwrap_jsonb_literal(raw: &str) -> Option<String> {
    let inner = strip_outer_quotes(raw)?;
    String::from_utf8(strip_c_slashes(inner)).ok()
}
