//! Java text blocks to Kotlin raw strings.
//!
//! The text block's value is computed the way javac does (incidental
//! indentation and trailing spaces stripped, then escapes interpreted) and
//! printed as a raw string. Kotlin raw strings have no escapes, so `$`,
//! control characters and runs of three quotes go through `${...}`
//! templates.

use super::{escape, Failure, Rewrite};

pub(super) fn convert(text: &str) -> Result<Rewrite, Failure> {
    let value = value(text)?;
    if value.is_empty() {
        return Ok(Rewrite::RawString {
            text: "\"\"".to_owned(),
            trim_indent: false,
        });
    }

    let lines: Vec<String> = value.split('\n').map(raw_line).collect();
    // `trimIndent` would also strip indentation every line shares.
    let shared_indent = lines
        .iter()
        .filter(|line| !line.trim().is_empty())
        .all(|line| line.starts_with([' ', '\t']));
    if shared_indent {
        return Ok(Rewrite::RawString {
            text: format!("\"\"\"{}\"\"\"", lines.join("\n")),
            trim_indent: false,
        });
    }
    Ok(Rewrite::RawString {
        text: format!("\"\"\"\n{}\n\"\"\"", lines.join("\n")),
        trim_indent: true,
    })
}

/// Runtime value of a text block literal (`"""` through `"""`).
pub(super) fn value(text: &str) -> Result<String, Failure> {
    let normalized = text.replace("\r\n", "\n");
    let body = normalized
        .strip_prefix("\"\"\"")
        .and_then(|rest| rest.strip_suffix("\"\"\""))
        .ok_or_else(|| Failure::malformed(text))?;
    // The opening delimiter's line holds nothing else.
    let (opening, content) = body.split_once('\n').ok_or_else(|| Failure::malformed(text))?;
    if !opening.trim().is_empty() {
        return Err(Failure::malformed(text));
    }

    let lines: Vec<&str> = content.split('\n').collect();
    let last = lines.len() - 1;
    let indent = lines
        .iter()
        .enumerate()
        .filter(|(i, line)| *i == last || !line.trim().is_empty())
        .map(|(_, line)| line.len() - line.trim_start_matches([' ', '\t']).len())
        .min()
        .unwrap_or(0);

    let stripped: Vec<&str> = lines
        .iter()
        .map(|line| {
            if line.trim().is_empty() {
                ""
            } else {
                line[indent..].trim_end_matches([' ', '\t'])
            }
        })
        .collect();
    escape::unescape(&stripped.join("\n")).map_err(|sequence| Failure::escape(text, &sequence))
}

/// One line of the value as raw-string source.
fn raw_line(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut quotes = 0;
    for c in line.chars() {
        if c == '"' {
            quotes += 1;
            if quotes == 3 {
                out.push_str("${'\"'}");
                quotes = 0;
            } else {
                out.push('"');
            }
            continue;
        }
        quotes = 0;
        match c {
            '$' => out.push_str("${'$'}"),
            '\t' => out.push('\t'),
            c if c.is_control() => out.push_str(&format!("${{\"\\u{:04X}\"}}", u32::from(c))),
            c => out.push(c),
        }
    }
    out
}
