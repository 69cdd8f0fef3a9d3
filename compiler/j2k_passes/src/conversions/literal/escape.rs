//! Escape sequences.
//!
//! Kotlin accepts `\t \b \n \r \' \" \\ \$` and `\uXXXX`. Java adds `\f`,
//! `\s`, octal escapes and `\uuuuXXXX`; those are rewritten. `$` opens a
//! template in a Kotlin string and is escaped there.

use std::iter::Peekable;
use std::str::Chars;

/// Re-escape a char or string literal body. `Err` carries the offending
/// sequence.
pub(super) fn to_kotlin(body: &str, in_string: bool) -> Result<String, String> {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some(e @ ('b' | 't' | 'n' | 'r' | '"' | '\'' | '\\' | '$')) => {
                    out.push('\\');
                    out.push(e);
                }
                Some('f') => out.push_str("\\u000C"),
                Some('s') => out.push(' '),
                Some('u') => {
                    let hex = unicode_digits(&mut chars)?;
                    out.push_str("\\u");
                    out.push_str(&hex);
                }
                Some(first @ '0'..='7') => {
                    let value = octal(first, &mut chars);
                    out.push_str(&format!("\\u{value:04X}"));
                }
                Some(other) => return Err(other.to_string()),
                None => return Err(String::new()),
            },
            '$' if in_string => out.push_str("\\$"),
            c => out.push(c),
        }
    }
    Ok(out)
}

/// Interpret every escape in a text block body. A backslash before a line
/// break joins the lines.
pub(super) fn unescape(body: &str) -> Result<String, String> {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('\n') => {}
            Some('b') => out.push('\u{8}'),
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('f') => out.push('\u{c}'),
            Some('r') => out.push('\r'),
            Some('s') => out.push(' '),
            Some(e @ ('"' | '\'' | '\\')) => out.push(e),
            Some('u') => {
                let hex = unicode_digits(&mut chars)?;
                let value = u32::from_str_radix(&hex, 16).map_err(|_| format!("u{hex}"))?;
                out.push(char::from_u32(value).ok_or_else(|| format!("u{hex}"))?);
            }
            Some(first @ '0'..='7') => {
                let value = octal(first, &mut chars);
                out.push(char::from_u32(value).ok_or_else(|| format!("{value:o}"))?);
            }
            Some(other) => return Err(other.to_string()),
            None => return Err(String::new()),
        }
    }
    Ok(out)
}

/// The four hex digits after `\u`, skipping repeated `u`s.
fn unicode_digits(chars: &mut Peekable<Chars<'_>>) -> Result<String, String> {
    while chars.next_if_eq(&'u').is_some() {}
    let hex: String = (0..4).filter_map(|_| chars.next_if(char::is_ascii_hexdigit)).collect();
    if hex.len() == 4 {
        Ok(hex)
    } else {
        Err(format!("u{hex}"))
    }
}

/// Octal escape value: up to three digits when the first is `0..=3`, two
/// otherwise.
fn octal(first: char, chars: &mut Peekable<Chars<'_>>) -> u32 {
    let max_digits = if first <= '3' { 3 } else { 2 };
    let mut value = first.to_digit(8).unwrap_or(0);
    for _ in 1..max_digits {
        match chars.next_if(|c| c.is_digit(8)) {
            Some(digit) => value = value * 8 + digit.to_digit(8).unwrap_or(0),
            None => break,
        }
    }
    value
}
