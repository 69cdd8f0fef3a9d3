//! Delegating overloads to default arguments.
//!
//! An overload whose whole body forwards its own parameters, in order, to
//! a longer overload of the same class and fills the remaining arguments
//! itself is folded into the longer one:
//!
//! ```text
//! Foo(int a) { this(a, 0); }          constructor(a: Int, b: Int = 0)
//! Foo(int a, int b) { ... }      =>   { ... }
//! ```
//!
//! The extra arguments become parameter defaults, the shorter overload is
//! removed, calls to it in the unit are rebound to the longer one, and the
//! result gets `@JvmOverloads` so Java callers still see every arity.
//!
//! Overloads with different visibilities or return types, or whose
//! parameter already has a different default, are left apart and noted.

use rustc_hash::FxHashSet;

use j2k_diagnostic::NoteCode;
use j2k_ir::{build, DelegationTarget, JkType, NodeId, NodeKind, SymbolId, Tree, Visibility};
use j2k_types::{ExternalChange, SymbolKind};

use super::util::{is_reference_to, mentions};
use crate::{ConversionCx, RecursiveConversion};

const JVM_OVERLOADS: &str = "kotlin.jvm.JvmOverloads";

#[derive(Default)]
pub struct DefaultArgumentsConversion {
    /// Unit root, where calls to a removed overload are searched.
    root: Option<NodeId>,
}

impl DefaultArgumentsConversion {
    pub fn new() -> Self {
        Self::default()
    }
}

/// A method or constructor as the merge sees it.
struct Overload {
    node: NodeId,
    symbol: SymbolId,
    parameters: Vec<NodeId>,
    visibility: Visibility,
    /// `None` for constructors.
    return_type: Option<JkType>,
}

/// A delegating overload and the overload it folds into.
struct Merge {
    from: Overload,
    into: Overload,
    /// Arguments the shorter overload passes beyond its own parameters.
    extra: Vec<NodeId>,
    arguments: NodeId,
}

enum Plan {
    Merge(Merge),
    Conflict(String),
    Skip,
}

fn overload(tree: &Tree, id: NodeId) -> Option<Overload> {
    match tree.kind(id) {
        NodeKind::Method {
            modifiers,
            parameters,
            return_type,
            symbol,
            ..
        } => {
            let NodeKind::TypeElement { ty } = tree.kind(*return_type) else {
                return None;
            };
            Some(Overload {
                node: id,
                symbol: *symbol,
                parameters: parameters.clone(),
                visibility: modifiers.visibility,
                return_type: Some(ty.clone()),
            })
        }
        NodeKind::Constructor {
            modifiers,
            parameters,
            symbol,
            ..
        } => Some(Overload {
            node: id,
            symbol: *symbol,
            parameters: parameters.clone(),
            visibility: modifiers.visibility,
            return_type: None,
        }),
        _ => None,
    }
}

/// The call a delegating overload consists of: callee symbol and argument
/// list.
fn forwarded_call(tree: &Tree, id: NodeId) -> Option<(SymbolId, NodeId)> {
    match tree.kind(id) {
        NodeKind::Constructor {
            delegation: Some(delegation),
            body,
            ..
        } if tree.list(*body).is_empty() => match tree.kind(*delegation) {
            NodeKind::DelegationCall {
                target: DelegationTarget::This,
                symbol,
                arguments,
            } => Some((*symbol, *arguments)),
            _ => None,
        },
        NodeKind::Method {
            body: Some(body), ..
        } => {
            let [statement] = tree.list(*body)[..] else {
                return None;
            };
            let call = match tree.kind(statement) {
                NodeKind::Return {
                    value: Some(value), ..
                } => *value,
                NodeKind::ExpressionStatement { expression } => *expression,
                _ => return None,
            };
            let call = match tree.kind(call) {
                NodeKind::Qualified { receiver, selector }
                    if matches!(tree.kind(*receiver), NodeKind::This { qualifier: None }) =>
                {
                    *selector
                }
                _ => call,
            };
            match tree.kind(call) {
                NodeKind::Call {
                    symbol, arguments, ..
                } => Some((*symbol, *arguments)),
                _ => None,
            }
        }
        _ => None,
    }
}

fn parameter_type(tree: &Tree, parameter: NodeId) -> Option<&JkType> {
    let NodeKind::Parameter { ty, .. } = tree.kind(parameter) else {
        return None;
    };
    match tree.kind(*ty) {
        NodeKind::TypeElement { ty } => Some(ty),
        _ => None,
    }
}

fn default_of(tree: &Tree, parameter: NodeId) -> Option<NodeId> {
    match tree.kind(parameter) {
        NodeKind::Parameter { default, .. } => *default,
        _ => None,
    }
}

fn is_vararg(tree: &Tree, parameter: NodeId) -> bool {
    matches!(tree.kind(parameter), NodeKind::Parameter { vararg: true, .. })
}

fn is_plain_member(tree: &Tree, id: NodeId) -> bool {
    tree.kind(id).modifiers().is_some_and(|modifiers| {
        !modifiers.is_override() && modifiers.modality != j2k_ir::Modality::Abstract
    })
}

impl DefaultArgumentsConversion {
    fn plan(cx: &ConversionCx<'_>, body: NodeId, id: NodeId) -> Plan {
        let tree = &*cx.tree;
        let Some(from) = overload(tree, id) else {
            return Plan::Skip;
        };
        let Some((callee, arguments)) = forwarded_call(tree, id) else {
            return Plan::Skip;
        };
        let Some(target) = cx.symbols.decl(callee) else {
            return Plan::Skip;
        };
        if target == id || tree.try_parent(target).ok().flatten() != Some(body) {
            return Plan::Skip;
        }
        let Some(into) = overload(tree, target) else {
            return Plan::Skip;
        };
        if from.return_type.is_some() != into.return_type.is_some()
            || tree.kind(id).declared_name() != tree.kind(target).declared_name()
        {
            return Plan::Skip;
        }

        let args = tree.list(arguments);
        let own = from.parameters.len();
        if args.len() != into.parameters.len() || own >= args.len() {
            return Plan::Skip;
        }
        if from
            .parameters
            .iter()
            .chain(&into.parameters)
            .any(|&p| is_vararg(tree, p))
        {
            return Plan::Skip;
        }
        if !is_plain_member(tree, id) || !is_plain_member(tree, target) {
            return Plan::Skip;
        }
        // A method that takes part in overriding cannot disappear.
        if from.return_type.is_some() && from.visibility != Visibility::Private {
            let analysis = cx.analysis();
            let key = cx.origin_key(id);
            if analysis.is_override(key) || analysis.is_overridden(key) {
                return Plan::Skip;
            }
        }

        // Own parameters are forwarded unchanged and in order.
        for (index, &parameter) in from.parameters.iter().enumerate() {
            let Some(symbol) = tree.kind(parameter).symbol() else {
                return Plan::Skip;
            };
            if !is_reference_to(tree, args[index], symbol) {
                return Plan::Skip;
            }
            let same_type = match (
                parameter_type(tree, parameter),
                parameter_type(tree, into.parameters[index]),
            ) {
                (Some(a), Some(b)) => a.same_identity(b),
                _ => false,
            };
            if !same_type {
                return Plan::Skip;
            }
        }
        let extra = args[own..].to_vec();
        let own_symbols: Vec<SymbolId> = from
            .parameters
            .iter()
            .filter_map(|&p| tree.kind(p).symbol())
            .collect();
        if extra
            .iter()
            .any(|&arg| own_symbols.iter().any(|&s| mentions(tree, arg, s)))
        {
            return Plan::Skip;
        }

        if from.visibility != into.visibility {
            return Plan::Conflict(format!(
                "visibilities differ ({:?} and {:?})",
                from.visibility, into.visibility
            ));
        }
        if let (Some(a), Some(b)) = (&from.return_type, &into.return_type) {
            if !a.same_identity(b) {
                return Plan::Conflict("return types differ".to_owned());
            }
        }
        let defaulted = into.parameters[own..]
            .iter()
            .any(|&p| default_of(tree, p).is_some());
        let shadowed = from
            .parameters
            .iter()
            .zip(&into.parameters)
            .any(|(&a, &b)| default_of(tree, a).is_some() && default_of(tree, b).is_some());
        if defaulted || shadowed {
            return Plan::Conflict("a parameter already has a default value".to_owned());
        }

        Plan::Merge(Merge {
            from,
            into,
            extra,
            arguments,
        })
    }

    fn has_jvm_overloads(cx: &ConversionCx<'_>, annotations: NodeId) -> bool {
        cx.tree.list(annotations).into_iter().any(|annotation| {
            matches!(
                cx.tree.kind(annotation),
                NodeKind::Annotation { fq_name, .. } if cx.lookup(*fq_name) == JVM_OVERLOADS
            )
        })
    }

    fn annotate(cx: &mut ConversionCx<'_>, declaration: NodeId) {
        let annotations = match cx.tree.kind(declaration) {
            NodeKind::Method { annotations, .. } | NodeKind::Constructor { annotations, .. } => {
                *annotations
            }
            _ => return,
        };
        if Self::has_jvm_overloads(cx, annotations) {
            return;
        }
        let fq_name = cx.intern(JVM_OVERLOADS);
        let symbol = cx.multiverse_symbol(JVM_OVERLOADS, SymbolKind::Class);
        let annotation = build::annotation(cx.tree, fq_name, symbol);
        cx.tree.push_child(annotations, annotation);
    }

    fn set_default(cx: &mut ConversionCx<'_>, parameter: NodeId, value: NodeId) {
        if let NodeKind::Parameter { default, .. } = cx.tree.kind_mut(parameter) {
            *default = Some(value);
            cx.tree.attach(parameter, value);
        }
    }

    fn apply(&self, cx: &mut ConversionCx<'_>, body: NodeId, merge: Merge) {
        let Merge {
            from,
            into,
            extra,
            arguments,
        } = merge;

        for (offset, &value) in extra.iter().enumerate() {
            cx.tree.remove_child(arguments, value);
            Self::set_default(cx, into.parameters[from.parameters.len() + offset], value);
        }
        // Defaults the shorter overload already had carry over.
        for (index, &parameter) in from.parameters.iter().enumerate() {
            if let Some(value) = default_of(cx.tree, parameter) {
                cx.tree.detach(parameter, value);
                Self::set_default(cx, into.parameters[index], value);
            }
        }

        Self::annotate(cx, into.node);
        cx.tree.transfer_trivia(from.node, into.node);

        let root = self.root.unwrap_or(body);
        let references = cx.symbols.references(cx.tree, root, from.symbol);
        for &reference in &references {
            cx.symbols.rebind(cx.tree, reference, into.symbol);
        }

        let kind = if from.return_type.is_some() {
            SymbolKind::Method
        } else {
            SymbolKind::Constructor
        };
        let key = cx.origin_key(into.node);
        if let Some(fq_name) = cx.symbols.fq_name(into.symbol) {
            let arities = vec![from.parameters.len(), into.parameters.len()];
            cx.context
                .external
                .register(fq_name, kind, key, ExternalChange::MergedOverloads { arities });
            cx.context
                .external
                .register(fq_name, kind, key, ExternalChange::JvmOverloads);
        }

        cx.tree.remove_child(body, from.node);
        cx.tree.invalidate(from.node);
        cx.record_change();

        let name = cx
            .tree
            .kind(into.node)
            .declared_name()
            .map_or("constructor", |name| cx.lookup(name));
        tracing::debug!(
            declaration = name,
            from = from.parameters.len(),
            into = into.parameters.len(),
            rebound = references.len(),
            "overloads merged into default arguments"
        );
        cx.note(
            NoteCode::J3001,
            format!(
                "overloads of {name} with {} and {} parameters merged",
                from.parameters.len(),
                into.parameters.len()
            ),
            into.node,
        );
    }

    /// Merge overloads declared in `body` until none is left to merge.
    fn merge_overloads(&self, cx: &mut ConversionCx<'_>, body: NodeId) {
        let mut declined = FxHashSet::default();
        'scan: loop {
            for member in cx.tree.list(body) {
                if declined.contains(&member) {
                    continue;
                }
                match Self::plan(cx, body, member) {
                    Plan::Merge(merge) => {
                        self.apply(cx, body, merge);
                        continue 'scan;
                    }
                    Plan::Conflict(reason) => {
                        declined.insert(member);
                        tracing::debug!(reason = reason.as_str(), "overloads kept apart");
                        cx.note(
                            NoteCode::J3002,
                            format!("overloads not merged: {reason}"),
                            member,
                        );
                    }
                    Plan::Skip => {}
                }
            }
            break;
        }
    }
}

impl RecursiveConversion for DefaultArgumentsConversion {
    fn name(&self) -> &'static str {
        "default-arguments"
    }

    fn apply_to_element(&mut self, cx: &mut ConversionCx<'_>, id: NodeId) -> NodeId {
        self.root.get_or_insert(id);
        if let NodeKind::ClassBody { .. } = cx.tree.kind(id) {
            self.merge_overloads(cx, id);
        }
        self.recurse(cx, id)
    }
}
