//! Literal conversion.
//!
//! Rewrites the lexical form of numeric, char and string literals from Java
//! to Kotlin syntax. Values are preserved bit for bit: hex and binary
//! literals above the signed range are reinterpreted as the negative value
//! Java gives them, octal literals (which Kotlin lacks) become decimal.
//!
//! A literal that cannot be represented is replaced by a `Todo` marker
//! holding the original text, and a note is recorded. The pass never fails.

mod escape;
mod text_block;

use j2k_diagnostic::NoteCode;
use j2k_ir::{build, LiteralKind, NodeId, NodeKind, PrimitiveType};
use j2k_types::SymbolKind;

use crate::{ConversionCx, RecursiveConversion};

pub struct LiteralConversion;

/// What a literal's text turns into.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Rewrite {
    /// Same node, new text.
    Text(String),
    /// `Int.MIN_VALUE` / `Long.MIN_VALUE`: the one value with no literal.
    MinValue(PrimitiveType),
    /// Kotlin string literal for a text block, optionally followed by
    /// `.trimIndent()`.
    RawString { text: String, trim_indent: bool },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Failure {
    pub code: NoteCode,
    pub message: String,
}

impl Failure {
    fn overflow(text: &str) -> Self {
        Failure {
            code: NoteCode::J0001,
            message: format!("literal {text} does not fit its type"),
        }
    }

    fn malformed(text: &str) -> Self {
        Failure {
            code: NoteCode::J0002,
            message: format!("malformed literal {text}"),
        }
    }

    fn escape(text: &str, sequence: &str) -> Self {
        Failure {
            code: NoteCode::J0003,
            message: format!("unknown escape sequence \\{sequence} in {text}"),
        }
    }
}

/// Kotlin form of a Java literal. `Ok(None)` when the text is already valid
/// Kotlin.
pub(crate) fn rewrite(kind: LiteralKind, text: &str) -> Result<Option<Rewrite>, Failure> {
    let rewritten = match kind {
        LiteralKind::Int => integer(text, false)?,
        LiteralKind::Long => integer(text, true)?,
        LiteralKind::Float => Rewrite::Text(floating(text, true)?),
        LiteralKind::Double => Rewrite::Text(floating(text, false)?),
        LiteralKind::Char => Rewrite::Text(quoted(text, '\'')?),
        LiteralKind::String if text.starts_with("\"\"\"") => return Ok(None),
        LiteralKind::String => Rewrite::Text(quoted(text, '"')?),
        LiteralKind::TextBlock => text_block::convert(text)?,
        LiteralKind::Boolean | LiteralKind::Null => return Ok(None),
    };
    Ok(match rewritten {
        Rewrite::Text(new) if new == text => None,
        other => Some(other),
    })
}

fn integer(text: &str, long: bool) -> Result<Rewrite, Failure> {
    // Negative text only comes out of this pass.
    if text.starts_with('-') {
        return Ok(Rewrite::Text(text.to_owned()));
    }
    let body = if long {
        text.strip_suffix(['l', 'L']).unwrap_or(text)
    } else {
        text
    };
    let suffix = if long { "L" } else { "" };
    let digits_only: String = body.chars().filter(|c| *c != '_').collect();

    let (radix, digits, prefix) = if let Some(rest) = digits_only
        .strip_prefix("0x")
        .or_else(|| digits_only.strip_prefix("0X"))
    {
        (16, rest, &body[..2])
    } else if let Some(rest) = digits_only
        .strip_prefix("0b")
        .or_else(|| digits_only.strip_prefix("0B"))
    {
        (2, rest, &body[..2])
    } else if digits_only.len() > 1 && digits_only.starts_with('0') {
        (8, &digits_only[1..], "")
    } else {
        (10, digits_only.as_str(), "")
    };

    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return Err(Failure::malformed(text));
    }
    let value = u64::from_str_radix(digits, radix).map_err(|_| Failure::overflow(text))?;
    let width_max = if long { u64::MAX } else { u64::from(u32::MAX) };
    let signed_limit = if long { 1u64 << 63 } else { 1u64 << 31 };

    match radix {
        // `2147483648` is only legal as the operand of unary minus, which
        // the printer keeps next to it.
        10 if value > signed_limit => Err(Failure::overflow(text)),
        10 => Ok(Rewrite::Text(format!("{body}{suffix}"))),
        _ if value > width_max => Err(Failure::overflow(text)),
        8 => {
            let signed = reinterpret(value, long);
            Ok(Rewrite::Text(format!("{signed}{suffix}")))
        }
        _ if value < signed_limit => Ok(Rewrite::Text(format!("{body}{suffix}"))),
        _ if value == signed_limit => Ok(Rewrite::MinValue(if long {
            PrimitiveType::Long
        } else {
            PrimitiveType::Int
        })),
        _ => {
            let magnitude = reinterpret(value, long).unsigned_abs();
            let uppercase = digits.chars().any(|c| c.is_ascii_uppercase());
            let digits = match (radix, uppercase) {
                (2, _) => format!("{magnitude:b}"),
                (_, true) => format!("{magnitude:X}"),
                (_, false) => format!("{magnitude:x}"),
            };
            Ok(Rewrite::Text(format!("-{prefix}{digits}{suffix}")))
        }
    }
}

/// Two's-complement value of the low 32 (or 64) bits.
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    reason = "reinterpreting the bit pattern is the point"
)]
fn reinterpret(value: u64, long: bool) -> i64 {
    if long {
        value as i64
    } else {
        i64::from(value as u32 as i32)
    }
}

fn floating(text: &str, float: bool) -> Result<String, Failure> {
    let body = if float {
        text.strip_suffix(['f', 'F']).unwrap_or(text)
    } else {
        text.strip_suffix(['d', 'D']).unwrap_or(text)
    };
    if body.starts_with("0x") || body.starts_with("0X") {
        return hex_float(text, body, float);
    }
    if body.is_empty()
        || !body
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '.' | '_' | 'e' | 'E' | '+' | '-'))
    {
        return Err(Failure::malformed(text));
    }

    let mut out = String::with_capacity(body.len() + 2);
    if body.starts_with('.') {
        out.push('0');
    }
    let exponent_at = body.find(['e', 'E']);
    let (mantissa, exponent) = body.split_at(exponent_at.unwrap_or(body.len()));
    out.push_str(mantissa);
    if mantissa.ends_with('.') {
        out.push('0');
    }
    if !float && exponent.is_empty() && !mantissa.contains('.') {
        out.push_str(".0");
    }
    out.push_str(exponent);
    if float {
        out.push('f');
    }
    Ok(out)
}

/// `0x1.8p1` has no Kotlin form; print its decimal value.
fn hex_float(text: &str, body: &str, float: bool) -> Result<String, Failure> {
    let digits: String = body[2..].chars().filter(|c| *c != '_').collect();
    let (mantissa, exponent) = digits
        .split_once(['p', 'P'])
        .ok_or_else(|| Failure::malformed(text))?;
    let exponent: i32 = exponent.parse().map_err(|_| Failure::malformed(text))?;
    let (whole, fraction) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    if whole.is_empty() && fraction.is_empty() {
        return Err(Failure::malformed(text));
    }

    let mut value = 0f64;
    for c in whole.chars() {
        let digit = c.to_digit(16).ok_or_else(|| Failure::malformed(text))?;
        value = value * 16.0 + f64::from(digit);
    }
    let mut scale = 1.0 / 16.0;
    for c in fraction.chars() {
        let digit = c.to_digit(16).ok_or_else(|| Failure::malformed(text))?;
        value += f64::from(digit) * scale;
        scale /= 16.0;
    }
    let value = value * 2f64.powi(exponent);

    if float {
        #[expect(clippy::cast_possible_truncation, reason = "float literals are f32")]
        let narrowed = value as f32;
        if !narrowed.is_finite() {
            return Err(Failure::overflow(text));
        }
        Ok(format!("{narrowed:?}f"))
    } else if value.is_finite() {
        Ok(format!("{value:?}"))
    } else {
        Err(Failure::overflow(text))
    }
}

/// Re-escape the contents of a `'c'` or `"s"` literal.
fn quoted(text: &str, quote: char) -> Result<String, Failure> {
    let inner = text
        .strip_prefix(quote)
        .and_then(|rest| rest.strip_suffix(quote))
        .ok_or_else(|| Failure::malformed(text))?;
    let escaped = escape::to_kotlin(inner, quote == '"')
        .map_err(|sequence| Failure::escape(text, &sequence))?;
    Ok(format!("{quote}{escaped}{quote}"))
}

impl LiteralConversion {
    /// `Int.MIN_VALUE` as a qualified reference.
    fn min_value(cx: &mut ConversionCx<'_>, primitive: PrimitiveType) -> NodeId {
        let class_fq = primitive.kotlin_fq_name();
        let class = cx.multiverse_symbol(class_fq, SymbolKind::Class);
        let field = cx.multiverse_symbol(&format!("{class_fq}.Companion.MIN_VALUE"), SymbolKind::Field);
        let class_name = cx.intern(class_fq.trim_start_matches("kotlin."));
        let field_name = cx.intern("MIN_VALUE");
        let receiver = build::reference(cx.tree, class_name, class);
        let selector = build::reference(cx.tree, field_name, field);
        build::qualified(cx.tree, receiver, selector)
    }

    fn raw_string(cx: &mut ConversionCx<'_>, text: String, trim_indent: bool) -> NodeId {
        let literal = build::literal(cx.tree, LiteralKind::String, text);
        if !trim_indent {
            return literal;
        }
        let symbol = cx.multiverse_symbol("kotlin.text.trimIndent", SymbolKind::Method);
        let name = cx.intern("trimIndent");
        let call = build::call(cx.tree, name, symbol, Vec::new());
        build::qualified(cx.tree, literal, call)
    }
}

impl RecursiveConversion for LiteralConversion {
    fn name(&self) -> &'static str {
        "literal-conversion"
    }

    fn apply_to_element(&mut self, cx: &mut ConversionCx<'_>, id: NodeId) -> NodeId {
        let NodeKind::Literal { kind, text } = cx.tree.kind(id) else {
            return self.recurse(cx, id);
        };
        let (kind, original) = (*kind, text.clone());

        match rewrite(kind, &original) {
            Ok(None) => id,
            Ok(Some(Rewrite::Text(new_text))) => {
                tracing::debug!(from = %original, to = %new_text, "literal rewritten");
                if let NodeKind::Literal { text, .. } = cx.tree.kind_mut(id) {
                    *text = new_text;
                }
                cx.record_change();
                id
            }
            Ok(Some(Rewrite::MinValue(primitive))) => {
                let replacement = Self::min_value(cx, primitive);
                cx.replaced(id, replacement);
                replacement
            }
            Ok(Some(Rewrite::RawString { text, trim_indent })) => {
                let replacement = Self::raw_string(cx, text, trim_indent);
                cx.replaced(id, replacement);
                replacement
            }
            Err(failure) => {
                tracing::warn!(literal = %original, code = %failure.code, "literal left as TODO");
                cx.note(failure.code, failure.message.clone(), id);
                let todo = build::todo(cx.tree, original, failure.message);
                cx.replaced(id, todo);
                todo
            }
        }
    }
}

#[cfg(test)]
mod tests;
