//! Escaping and whitespace rules for SGF Text and SimpleText values.
//!
//! Inside a bracketed value, `\` makes the following character literal and
//! `\` before a newline is a line continuation (both vanish). Decoded
//! Text keeps newlines and collapses other whitespace runs to one space;
//! decoded SimpleText collapses every whitespace run, newlines included.

/// Strips escapes from a raw bracketed payload. Line continuations
/// disappear; any other escaped character is kept verbatim.
pub(crate) fn decode_escapes(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            None => {}
            Some('\n') => {
                if chars.peek() == Some(&'\r') {
                    chars.next();
                }
            }
            Some('\r') => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
            }
            Some(other) => out.push(other),
        }
    }
    out
}

/// Normalizes into the Text domain: `\r\n` and `\r` become `\n`, and each
/// run of non-newline whitespace becomes a single space.
pub(crate) fn normalize_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    let mut pending_space = false;
    while let Some(c) = chars.next() {
        let newline = match c {
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                true
            }
            '\n' => true,
            _ => false,
        };
        if newline {
            if pending_space {
                out.push(' ');
                pending_space = false;
            }
            out.push('\n');
        } else if c.is_whitespace() {
            pending_space = true;
        } else {
            if pending_space {
                out.push(' ');
                pending_space = false;
            }
            out.push(c);
        }
    }
    if pending_space {
        out.push(' ');
    }
    out
}

/// Normalizes into the SimpleText domain: every whitespace run, newlines
/// included, becomes a single space.
pub(crate) fn normalize_simple_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut pending_space = false;
    for c in s.chars() {
        if c.is_whitespace() {
            pending_space = true;
        } else {
            if pending_space {
                out.push(' ');
                pending_space = false;
            }
            out.push(c);
        }
    }
    if pending_space {
        out.push(' ');
    }
    out
}

/// Decodes a raw Text payload.
pub(crate) fn decode_text(raw: &str) -> String {
    normalize_text(&decode_escapes(raw))
}

/// Decodes a raw SimpleText payload.
pub(crate) fn decode_simple_text(raw: &str) -> String {
    normalize_simple_text(&decode_escapes(raw))
}

/// Escapes a decoded value for rendering inside brackets. `]` and `\` are
/// always escaped; `:` only within composed values.
pub(crate) fn escape_value(s: &str, composed: bool) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' | ']' => {
                out.push('\\');
                out.push(c);
            }
            ':' if composed => {
                out.push('\\');
                out.push(':');
            }
            _ => out.push(c),
        }
    }
    out
}

/// Splits a raw payload at its first unescaped `:`, for composed values.
pub(crate) fn split_composed(raw: &str) -> Option<(&str, &str)> {
    let bytes = raw.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b':' => return Some((&raw[..i], &raw[i + 1..])),
            _ => i += 1,
        }
    }
    None
}
