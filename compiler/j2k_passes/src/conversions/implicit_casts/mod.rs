//! Explicit numeric conversions at call sites.
//!
//! Java widens primitive arguments silently (`int` to a `long` parameter);
//! Kotlin does not. A call argument whose primitive type is narrower than
//! the parameter's gets an explicit `toLong()`, `toDouble()`, ... call, and
//! a `char` passed as an integer becomes `c.code`.
//!
//! Integer literals passed to an integral parameter are left as they are,
//! Kotlin types them from the expected type. Runs after builtin mapping so
//! the signatures it reads are the Kotlin ones.

use j2k_ir::{build, JkType, LiteralKind, NodeId, NodeKind, PrimitiveType, SymbolId};
use j2k_types::{Signature, SymbolKind};

use super::util::parenthesize_if_needed;
use crate::{ConversionCx, RecursiveConversion};

pub struct ImplicitCastsConversion;

/// Parameter types of whatever `symbol` calls.
fn parameter_types(cx: &ConversionCx<'_>, symbol: SymbolId) -> Option<Vec<JkType>> {
    if let Some(signature) = cx.symbols.signature(symbol) {
        return Some(signature.parameters.clone());
    }
    let decl = cx.symbols.decl(symbol)?;
    if !cx.tree.is_alive(decl) {
        return None;
    }
    let (NodeKind::Method { parameters, .. } | NodeKind::Constructor { parameters, .. }) =
        cx.tree.kind(decl)
    else {
        return None;
    };
    parameters
        .iter()
        .map(|&parameter| match *cx.tree.kind(parameter) {
            // Varargs take any count; stop comparing there.
            NodeKind::Parameter { vararg: true, .. } => None,
            NodeKind::Parameter { ty, .. } => match cx.tree.kind(ty) {
                NodeKind::TypeElement { ty } => Some(ty.clone()),
                _ => None,
            },
            _ => None,
        })
        .take_while(Option::is_some)
        .collect()
}

/// Conversion `from` needs to be passed where `to` is expected.
enum Cast {
    /// `x.toLong()`
    To(PrimitiveType),
    /// `c.code`
    Code,
    /// `c.code.toLong()`
    CodeTo(PrimitiveType),
}

fn cast(from: PrimitiveType, to: PrimitiveType) -> Option<Cast> {
    if from == to {
        return None;
    }
    if from == PrimitiveType::Char {
        return match to {
            PrimitiveType::Int => Some(Cast::Code),
            PrimitiveType::Long | PrimitiveType::Float | PrimitiveType::Double => {
                Some(Cast::CodeTo(to))
            }
            _ => None,
        };
    }
    let (from_rank, to_rank) = (from.numeric_rank()?, to.numeric_rank()?);
    (from_rank < to_rank).then_some(Cast::To(to))
}

fn is_integral(p: PrimitiveType) -> bool {
    matches!(
        p,
        PrimitiveType::Byte | PrimitiveType::Short | PrimitiveType::Int | PrimitiveType::Long
    )
}

impl ImplicitCastsConversion {
    /// `receiver.toX()` with a signature, so later typing sees the result.
    fn conversion_call(cx: &mut ConversionCx<'_>, receiver: NodeId, from: PrimitiveType, to: PrimitiveType) -> NodeId {
        let method = format!("to{}", to.kotlin_fq_name().trim_start_matches("kotlin."));
        let fq_name = cx.intern(&format!("{}.{method}", from.kotlin_fq_name()));
        let result = cx.context.types.primitive(cx.symbols, to);
        let symbol = cx
            .symbols
            .multiverse(fq_name, SymbolKind::Method, Some(Signature::new(Vec::new(), result)));
        let name = cx.intern(&method);
        let call = build::call(cx.tree, name, symbol, Vec::new());
        let receiver = parenthesize_if_needed(cx.tree, receiver);
        build::qualified(cx.tree, receiver, call)
    }

    fn code(cx: &mut ConversionCx<'_>, receiver: NodeId) -> NodeId {
        let fq_name = cx.intern("kotlin.Char.code");
        let int = cx.context.types.int(cx.symbols);
        let symbol = cx
            .symbols
            .multiverse(fq_name, SymbolKind::Field, Some(Signature::new(Vec::new(), int)));
        let name = cx.intern("code");
        let field = build::reference(cx.tree, name, symbol);
        let receiver = parenthesize_if_needed(cx.tree, receiver);
        build::qualified(cx.tree, receiver, field)
    }

    fn convert_argument(cx: &mut ConversionCx<'_>, list: NodeId, argument: NodeId, expected: &JkType) {
        let context = cx.context;
        let Some(to) = context.types.primitive_of(expected) else {
            return;
        };
        let Some(from) = cx.type_of(argument).and_then(|ty| context.types.primitive_of(&ty)) else {
            return;
        };
        let is_int_literal = matches!(
            cx.tree.kind(argument),
            NodeKind::Literal {
                kind: LiteralKind::Int | LiteralKind::Long,
                ..
            }
        );
        if is_int_literal && is_integral(to) {
            return;
        }
        let Some(cast) = cast(from, to) else {
            return;
        };

        let detached = cx.tree.detach(list, argument);
        let replacement = match cast {
            Cast::To(to) => Self::conversion_call(cx, detached, from, to),
            Cast::Code => Self::code(cx, detached),
            Cast::CodeTo(to) => {
                let code = Self::code(cx, detached);
                Self::conversion_call(cx, code, PrimitiveType::Int, to)
            }
        };
        tracing::debug!(?from, ?to, "argument widened explicitly");
        cx.replaced(argument, replacement);
        cx.tree.replace_child(list, argument, replacement);
    }
}

impl RecursiveConversion for ImplicitCastsConversion {
    fn name(&self) -> &'static str {
        "implicit-casts"
    }

    fn apply_to_element(&mut self, cx: &mut ConversionCx<'_>, id: NodeId) -> NodeId {
        let (symbol, list) = match *cx.tree.kind(id) {
            NodeKind::Call {
                symbol, arguments, ..
            }
            | NodeKind::New {
                symbol, arguments, ..
            } => (symbol, arguments),
            NodeKind::DelegationCall {
                symbol, arguments, ..
            } => (symbol, arguments),
            _ => return self.recurse(cx, id),
        };
        // Arguments first, so nested calls are converted before they are typed.
        let id = self.recurse(cx, id);
        if let Some(parameters) = parameter_types(cx, symbol) {
            let arguments = cx.tree.list(list);
            for (argument, expected) in arguments.into_iter().zip(&parameters) {
                Self::convert_argument(cx, list, argument, expected);
            }
        }
        id
    }
}
