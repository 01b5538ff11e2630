//! String literal evaluation

/// Strip the quotes from a raw string literal and resolve its escapes.
///
/// `\n`, `\t`, `\r` and `\0` are control characters; a backslash before
/// any other character yields that character.
pub fn unescape(raw: &str) -> String {
    let mut chars = raw.chars();
    chars.next();
    chars.next_back();

    let mut out = String::with_capacity(raw.len());
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('0') => out.push('\0'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}
