#![allow(clippy::unwrap_used, clippy::expect_used)]

use pretty_assertions::assert_eq;
use proptest::prelude::*;

use j2k_diagnostic::NoteCode;
use j2k_ir::{LiteralKind, PrimitiveType};

use super::{rewrite, text_block, LiteralConversion, Rewrite};
use crate::testing::Fixture;

fn text(kind: LiteralKind, java: &str) -> String {
    match rewrite(kind, java).unwrap() {
        None => java.to_owned(),
        Some(Rewrite::Text(text)) => text,
        Some(other) => panic!("expected a text rewrite for {java}, got {other:?}"),
    }
}

// Integers

#[test]
fn decimal_literals_keep_their_text() {
    assert_eq!(text(LiteralKind::Int, "42"), "42");
    assert_eq!(text(LiteralKind::Int, "1_000_000"), "1_000_000");
    assert_eq!(text(LiteralKind::Long, "10l"), "10L");
    assert_eq!(text(LiteralKind::Long, "10L"), "10L");
    assert_eq!(text(LiteralKind::Int, "2147483648"), "2147483648");
}

#[test]
fn hex_above_the_signed_range_becomes_negative() {
    assert_eq!(text(LiteralKind::Int, "0xFFFFFFFF"), "-0x1");
    assert_eq!(text(LiteralKind::Int, "0xfffffffe"), "-0x2");
    assert_eq!(text(LiteralKind::Int, "0x7FFFFFFF"), "0x7FFFFFFF");
    assert_eq!(text(LiteralKind::Int, "0xFF_FF"), "0xFF_FF");
    assert_eq!(text(LiteralKind::Long, "0xFFFFFFFFFFFFFFFFL"), "-0x1L");
    assert_eq!(text(LiteralKind::Long, "0xFFFFFFFFl"), "0xFFFFFFFFL");
    assert_eq!(text(LiteralKind::Int, "0b11111111111111111111111111111110"), "-0b10");
}

#[test]
fn signed_minimum_has_no_literal() {
    assert_eq!(
        rewrite(LiteralKind::Int, "0x80000000"),
        Ok(Some(Rewrite::MinValue(PrimitiveType::Int)))
    );
    assert_eq!(
        rewrite(LiteralKind::Long, "0x8000000000000000L"),
        Ok(Some(Rewrite::MinValue(PrimitiveType::Long)))
    );
}

#[test]
fn octal_becomes_decimal() {
    assert_eq!(text(LiteralKind::Int, "010"), "8");
    assert_eq!(text(LiteralKind::Int, "00"), "0");
    assert_eq!(text(LiteralKind::Int, "037777777777"), "-1");
    assert_eq!(text(LiteralKind::Long, "0777L"), "511L");
}

#[test]
fn out_of_range_integers_fail() {
    let overflow = rewrite(LiteralKind::Int, "0x1FFFFFFFF").unwrap_err();
    assert_eq!(overflow.code, NoteCode::J0001);
    let decimal = rewrite(LiteralKind::Int, "3000000000").unwrap_err();
    assert_eq!(decimal.code, NoteCode::J0001);
    let malformed = rewrite(LiteralKind::Int, "09").unwrap_err();
    assert_eq!(malformed.code, NoteCode::J0002);
}

// Floating point

#[test]
fn float_suffixes_normalize() {
    assert_eq!(text(LiteralKind::Float, "1F"), "1f");
    assert_eq!(text(LiteralKind::Float, "1.5f"), "1.5f");
    assert_eq!(text(LiteralKind::Float, ".5f"), "0.5f");
    assert_eq!(text(LiteralKind::Float, "1.f"), "1.0f");
    assert_eq!(text(LiteralKind::Double, "1d"), "1.0");
    assert_eq!(text(LiteralKind::Double, "1D"), "1.0");
    assert_eq!(text(LiteralKind::Double, "1."), "1.0");
    assert_eq!(text(LiteralKind::Double, ".5"), "0.5");
    assert_eq!(text(LiteralKind::Double, "1e10"), "1e10");
    assert_eq!(text(LiteralKind::Double, "1.e-3"), "1.0e-3");
    assert_eq!(text(LiteralKind::Double, "1_000.25"), "1_000.25");
}

#[test]
fn hex_floats_print_their_value() {
    assert_eq!(text(LiteralKind::Double, "0x1.8p1"), "3.0");
    assert_eq!(text(LiteralKind::Float, "0x1p-1f"), "0.5f");
    assert_eq!(
        rewrite(LiteralKind::Float, "0x1p200f").unwrap_err().code,
        NoteCode::J0001
    );
}

// Chars and strings

#[test]
fn escapes_without_kotlin_counterpart_are_rewritten() {
    assert_eq!(text(LiteralKind::Char, r"'\f'"), r"'\u000C'");
    assert_eq!(text(LiteralKind::Char, r"'\0'"), r"'\u0000'");
    assert_eq!(text(LiteralKind::Char, r"'\uuu0041'"), r"'\u0041'");
    assert_eq!(text(LiteralKind::String, r#""a\sb""#), r#""a b""#);
    assert_eq!(text(LiteralKind::String, r#""\101\7""#), r#""\u0041\u0007""#);
    assert_eq!(text(LiteralKind::String, r#""tab\there""#), r#""tab\there""#);
}

#[test]
fn dollar_is_escaped_in_strings_only() {
    assert_eq!(text(LiteralKind::String, r#""$x""#), r#""\$x""#);
    assert_eq!(text(LiteralKind::Char, "'$'"), "'$'");
    // Already escaped: nothing to do on a second run.
    assert_eq!(rewrite(LiteralKind::String, r#""\$x""#), Ok(None));
}

#[test]
fn unknown_escapes_are_reported() {
    let failure = rewrite(LiteralKind::String, r#""\q""#).unwrap_err();
    assert_eq!(failure.code, NoteCode::J0003);
}

// Text blocks

#[test]
fn text_block_value_strips_incidental_indentation() {
    let java = "\"\"\"\n        Hello,\n          World!\n        \"\"\"";
    assert_eq!(text_block::value(java).unwrap(), "Hello,\n  World!\n");
    let closing_inline = "\"\"\"\n    a\n    b\"\"\"";
    assert_eq!(text_block::value(closing_inline).unwrap(), "a\nb");
    let continuation = "\"\"\"\n    one \\\n    two\n    \"\"\"";
    assert_eq!(text_block::value(continuation).unwrap(), "one two\n");
}

#[test]
fn text_blocks_become_trimmed_raw_strings() {
    let java = "\"\"\"\n    Price: $5\n      \"quoted\"\n    \"\"\"";
    assert_eq!(
        rewrite(LiteralKind::TextBlock, java),
        Ok(Some(Rewrite::RawString {
            text: "\"\"\"\nPrice: ${'$'}5\n  \"quoted\"\n\n\"\"\"".to_owned(),
            trim_indent: true,
        }))
    );
}

#[test]
fn text_blocks_with_shared_indentation_skip_trim_indent() {
    let java = "\"\"\"\n      a\n      b\n    \"\"\"";
    assert_eq!(
        rewrite(LiteralKind::TextBlock, java),
        Ok(Some(Rewrite::RawString {
            text: "\"\"\"  a\n  b\n\"\"\"".to_owned(),
            trim_indent: false,
        }))
    );
}

#[test]
fn triple_quotes_are_broken_up() {
    let java = "\"\"\"\n    x\\\"\"\"y\n    \"\"\"";
    let Ok(Some(Rewrite::RawString { text, .. })) = rewrite(LiteralKind::TextBlock, java) else {
        panic!("text block not converted");
    };
    assert_eq!(text, "\"\"\"\nx\"\"${'\"'}y\n\n\"\"\"");
}

#[test]
fn converted_raw_strings_are_left_alone() {
    assert_eq!(rewrite(LiteralKind::String, "\"\"\"\na\n\"\"\""), Ok(None));
}

// The pass

#[test]
fn pass_rewrites_in_place() {
    let mut f = Fixture::new();
    let long = f.literal(LiteralKind::Long, "0xFFFFFFFFFFFFFFFFl");
    let statement = f.statement(long);
    f.run(&mut LiteralConversion, statement);
    assert_eq!(f.dump(statement), "ExpressionStatement\n  Literal Long -0x1L\n");
    assert_eq!(f.changes, 1);
}

#[test]
fn min_value_becomes_a_qualified_reference() {
    let mut f = Fixture::new();
    let min = f.literal(LiteralKind::Int, "0x80000000");
    let statement = f.statement(min);
    f.run(&mut LiteralConversion, statement);
    assert_eq!(
        f.dump(statement),
        "ExpressionStatement\n  Qualified\n    FieldAccess Int\n    FieldAccess MIN_VALUE\n"
    );
}

#[test]
fn text_block_is_wrapped_in_trim_indent() {
    let mut f = Fixture::new();
    let block = f.literal(LiteralKind::TextBlock, "\"\"\"\n    a\n    \"\"\"");
    let statement = f.statement(block);
    f.run(&mut LiteralConversion, statement);
    assert_eq!(
        f.dump(statement),
        "ExpressionStatement\n  Qualified\n    Literal String \"\"\"\na\n\n\"\"\"\n    Call trimIndent\n      TypeArgumentList\n      ArgumentList\n"
    );
}

#[test]
fn overflow_leaves_a_todo_and_a_note() {
    let mut f = Fixture::new();
    let huge = f.literal(LiteralKind::Int, "0x1FFFFFFFF");
    f.tree
        .trivia_mut(huge)
        .comments_before
        .push(j2k_ir::Comment::line("// mask"));
    let statement = f.statement(huge);

    f.run(&mut LiteralConversion, statement);

    assert!(!f.tree.is_alive(huge));
    assert!(f.notes.has_code(NoteCode::J0001));
    assert_eq!(
        f.dump(statement),
        "ExpressionStatement\n  // mask\n  Todo \"0x1FFFFFFFF\" (literal 0x1FFFFFFFF does not fit its type)\n"
    );
}

#[test]
fn second_run_changes_nothing() {
    let mut f = Fixture::new();
    let literals = vec![
        f.literal(LiteralKind::Int, "0xFFFFFFFF"),
        f.literal(LiteralKind::Int, "017"),
        f.literal(LiteralKind::Double, ".5"),
        f.literal(LiteralKind::String, "\"cost: $1\\s\""),
        f.literal(LiteralKind::TextBlock, "\"\"\"\n  x\n  \"\"\""),
    ];
    let statements = literals.into_iter().map(|l| f.statement(l)).collect();
    let block = f.block(statements);
    f.run(&mut LiteralConversion, block);
    let first = f.dump(block);
    f.run(&mut LiteralConversion, block);
    assert_eq!(f.changes, 0);
    assert_eq!(f.dump(block), first);
}

proptest! {
    #[test]
    fn hex_reinterpretation_keeps_the_bit_pattern(bits in any::<u32>()) {
        let java = format!("0x{bits:X}");
        let reinterpreted: u32 = match rewrite(LiteralKind::Int, &java).unwrap() {
            None => u32::from_str_radix(&java[2..], 16).unwrap(),
            Some(Rewrite::Text(text)) => {
                prop_assert!(text.starts_with("-0x"));
                let magnitude = i64::from_str_radix(&text[3..], 16).unwrap();
                u32::try_from(-magnitude & 0xFFFF_FFFF).unwrap()
            }
            Some(Rewrite::MinValue(_)) => 0x8000_0000,
            Some(other) => panic!("unexpected {other:?}"),
        };
        prop_assert_eq!(reinterpreted, bits);
    }

    #[test]
    fn long_hex_reinterpretation_keeps_the_bit_pattern(bits in any::<u64>()) {
        let java = format!("0x{bits:x}L");
        let reinterpreted: u64 = match rewrite(LiteralKind::Long, &java).unwrap() {
            None => u64::from_str_radix(&java[2..java.len() - 1], 16).unwrap(),
            Some(Rewrite::Text(text)) if text.starts_with("-0x") => {
                let magnitude = u64::from_str_radix(&text[3..text.len() - 1], 16).unwrap();
                magnitude.wrapping_neg()
            }
            Some(Rewrite::MinValue(_)) => 1u64 << 63,
            Some(other) => panic!("unexpected {other:?}"),
        };
        prop_assert_eq!(reinterpreted, bits);
    }
}
