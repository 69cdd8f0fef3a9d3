//! Deterministic text dump of a tree.
//!
//! Not a Kotlin printer: one line per node with its tag and scalar fields,
//! indented by depth, comments shown on the node that carries them. Tests
//! compare dumps to check the shape a pass produced.

use std::fmt::Write;

use crate::stack::ensure_sufficient_stack;
use crate::{JkType, Modality, Modifiers, Nullability, NodeId, NodeKind, StringInterner, Tree, Variance};

pub fn dump(tree: &Tree, interner: &StringInterner, root: NodeId) -> String {
    let mut out = String::new();
    dump_node(tree, interner, root, 0, &mut out);
    out
}

fn dump_node(tree: &Tree, interner: &StringInterner, id: NodeId, depth: usize, out: &mut String) {
    ensure_sufficient_stack(|| {
        let indent = "  ".repeat(depth);
        let trivia = tree.trivia(id);
        for comment in &trivia.comments_before {
            let _ = writeln!(out, "{indent}{}", comment.text);
        }
        let _ = write!(out, "{indent}{}", describe(tree.kind(id), interner));
        for comment in &trivia.comments_after {
            let _ = write!(out, " {}", comment.text);
        }
        out.push('\n');
        for child in tree.children(id) {
            dump_node(tree, interner, child, depth + 1, out);
        }
    });
}

/// One-line description of a node without its children.
pub fn describe(kind: &NodeKind, interner: &StringInterner) -> String {
    let tag = kind.tag();
    let name = |n| interner.lookup(n);
    match kind {
        NodeKind::File { package, .. } => match package {
            Some(p) => format!("{tag} package={}", name(*p)),
            None => tag.to_owned(),
        },
        NodeKind::Class {
            name: n,
            class_kind,
            modifiers,
            ..
        } => format!(
            "{tag} {} {:?}{}",
            name(*n),
            class_kind,
            render_modifiers(*modifiers)
        ),
        NodeKind::Method {
            name: n, modifiers, ..
        }
        | NodeKind::Field {
            name: n, modifiers, ..
        }
        | NodeKind::LocalVariable {
            name: n, modifiers, ..
        } => format!("{tag} {}{}", name(*n), render_modifiers(*modifiers)),
        NodeKind::Constructor { modifiers, .. } => {
            format!("{tag}{}", render_modifiers(*modifiers))
        }
        NodeKind::Property {
            name: n,
            modifiers,
            mutable,
            ..
        } => format!(
            "{tag} {} {}{}",
            if *mutable { "var" } else { "val" },
            name(*n),
            render_modifiers(*modifiers)
        ),
        NodeKind::Parameter { name: n, vararg, .. } => {
            format!("{tag} {}{}", name(*n), if *vararg { " vararg" } else { "" })
        }
        NodeKind::EnumConstant { name: n, .. } | NodeKind::TypeParameter { name: n, .. } => {
            format!("{tag} {}", name(*n))
        }
        NodeKind::Initializer { is_static, .. } => {
            format!("{tag}{}", if *is_static { " static" } else { "" })
        }
        NodeKind::Annotation { fq_name, .. } => format!("{tag} @{}", name(*fq_name)),
        NodeKind::Return { label, .. }
        | NodeKind::Break { label }
        | NodeKind::Continue { label } => match label {
            Some(l) => format!("{tag} @{}", name(*l)),
            None => tag.to_owned(),
        },
        NodeKind::Labeled { label, .. } => format!("{tag} {}@", name(*label)),
        NodeKind::Switch { is_expression, .. } | NodeKind::When { is_expression, .. } => {
            format!("{tag}{}", if *is_expression { " expr" } else { "" })
        }
        NodeKind::SwitchCase { labels, arrow, .. } => format!(
            "{tag}{}{}",
            if labels.is_empty() { " default" } else { "" },
            if *arrow { " ->" } else { "" }
        ),
        NodeKind::WhenBranch { conditions, .. } if conditions.is_empty() => {
            format!("{tag} else")
        }
        NodeKind::Literal { kind, text } => format!("{tag} {kind:?} {text}"),
        NodeKind::Binary { op, .. } => format!("{tag} {}", op.token()),
        NodeKind::Prefix { op, .. } => format!("{tag} {}", op.token()),
        NodeKind::Postfix { op, .. } => format!("{tag} {}", op.token()),
        NodeKind::Assignment { op, .. } => format!("{tag} {}", op.token()),
        NodeKind::Call { name: n, .. }
        | NodeKind::FieldAccess { name: n, .. }
        | NodeKind::MethodReference { name: n, .. } => format!("{tag} {}", name(*n)),
        NodeKind::This { qualifier } | NodeKind::Super { qualifier } => match qualifier {
            Some(q) => format!("{tag} {}", name(*q)),
            None => tag.to_owned(),
        },
        NodeKind::Range { kind, .. } => format!("{tag} {}", kind.token()),
        NodeKind::DelegationCall { target, .. } => format!("{tag} {target:?}"),
        NodeKind::TypeElement { ty } => format!("{tag} {}", render_type(ty, interner)),
        NodeKind::Unsupported { text } => format!("{tag} {text:?}"),
        NodeKind::Todo { text, note } => format!("{tag} {text:?} ({note})"),
        _ => tag.to_owned(),
    }
}

fn render_modifiers(modifiers: Modifiers) -> String {
    let mut out = String::new();
    let visibility = modifiers.visibility.keyword();
    if !visibility.is_empty() {
        out.push(' ');
        out.push_str(visibility);
    }
    match modifiers.modality {
        Modality::Unspecified => {}
        Modality::Open => out.push_str(" open"),
        Modality::Final => out.push_str(" final"),
        Modality::Abstract => out.push_str(" abstract"),
        Modality::Sealed => out.push_str(" sealed"),
    }
    for (flag_name, _) in modifiers.flags.iter_names() {
        if flag_name.starts_with("EXPLICIT") {
            continue;
        }
        out.push(' ');
        out.push_str(&flag_name.to_ascii_lowercase());
    }
    out
}

/// Render a type with fully-qualified class names.
pub fn render_type(ty: &JkType, interner: &StringInterner) -> String {
    fn suffix(nullability: Nullability) -> &'static str {
        match nullability {
            Nullability::Nullable => "?",
            Nullability::NotNull => "",
            Nullability::Default => "!",
        }
    }
    match ty {
        JkType::Primitive(p) => p.java_name().to_owned(),
        JkType::Class(class) => {
            let mut out = interner.lookup(class.fq_name).to_owned();
            if !class.args.is_empty() {
                let args: Vec<String> = class
                    .args
                    .iter()
                    .map(|arg| render_type(arg, interner))
                    .collect();
                let _ = write!(out, "<{}>", args.join(", "));
            }
            out.push_str(suffix(class.nullability));
            out
        }
        JkType::Array {
            element,
            nullability,
        } => format!("{}[]{}", render_type(element, interner), suffix(*nullability)),
        JkType::TypeParameter {
            name, nullability, ..
        } => format!("{}{}", interner.lookup(*name), suffix(*nullability)),
        JkType::Wildcard { variance, bound } => {
            let keyword = match variance {
                Variance::Out => "out ",
                Variance::In => "in ",
                Variance::Invariant => "",
            };
            match bound {
                Some(bound) => format!("{keyword}{}", render_type(bound, interner)),
                None => "?".to_owned(),
            }
        }
        JkType::Star => "*".to_owned(),
        JkType::NoType => "<no type>".to_owned(),
        JkType::Unit => "kotlin.Unit".to_owned(),
    }
}
