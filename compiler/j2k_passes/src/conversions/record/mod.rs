//! Java records to Kotlin data classes.
//!
//! A record becomes a `data class` whose primary constructor declares one
//! `val` property per record component. Accessors that only return their
//! component are dropped, and calls to them (`p.x()`) read the property
//! instead (`p.x`). Each such accessor is registered as having become a
//! property, for references outside the unit.

use rustc_hash::FxHashMap;

use j2k_diagnostic::NoteCode;
use j2k_ir::{build, ClassKind, Modality, ModifierFlags, Modifiers, Name, NodeId, NodeKind, SymbolId, Tree};
use j2k_types::ExternalChange;

use super::util::is_reference_to;
use crate::{ConversionCx, RecursiveConversion};

#[derive(Default)]
pub struct RecordClassConversion {
    /// Trivial accessor symbol → component name and symbol. Filled from
    /// the root on the first visit.
    accessors: Option<FxHashMap<SymbolId, (Name, SymbolId)>>,
}

impl RecordClassConversion {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Record components: name, symbol and declaration.
fn components(tree: &Tree, class: NodeId) -> Vec<(Name, SymbolId, NodeId)> {
    let NodeKind::Class { primary, .. } = tree.kind(class) else {
        return Vec::new();
    };
    primary
        .iter()
        .filter_map(|&parameter| match tree.kind(parameter) {
            NodeKind::Parameter { name, symbol, .. } => Some((*name, *symbol, parameter)),
            _ => None,
        })
        .collect()
}

/// `T x() { return x; }` for component `x`: the accessor's symbol and the
/// component it returns.
fn trivial_accessor(tree: &Tree, member: NodeId, components: &[(Name, SymbolId, NodeId)]) -> Option<(SymbolId, Name, SymbolId)> {
    let NodeKind::Method {
        name,
        parameters,
        body: Some(body),
        symbol,
        modifiers,
        ..
    } = tree.kind(member)
    else {
        return None;
    };
    if !parameters.is_empty() || modifiers.is_static() {
        return None;
    }
    let &(component, component_symbol, _) = components.iter().find(|(n, ..)| n == name)?;
    let [statement] = tree.list(*body)[..] else {
        return None;
    };
    let NodeKind::Return {
        value: Some(value), ..
    } = tree.kind(statement)
    else {
        return None;
    };
    is_reference_to(tree, *value, component_symbol).then_some((*symbol, component, component_symbol))
}

fn record_accessors(tree: &Tree, root: NodeId) -> FxHashMap<SymbolId, (Name, SymbolId)> {
    let mut accessors = FxHashMap::default();
    for id in tree.descendants(root) {
        let NodeKind::Class {
            class_kind: ClassKind::Record,
            body,
            ..
        } = tree.kind(id)
        else {
            continue;
        };
        let components = components(tree, id);
        for member in tree.list(*body) {
            if let Some((accessor, name, component)) = trivial_accessor(tree, member, &components) {
                accessors.insert(accessor, (name, component));
            }
        }
    }
    accessors
}

impl RecordClassConversion {
    fn convert_record(cx: &mut ConversionCx<'_>, class: NodeId) {
        let components = components(cx.tree, class);
        let NodeKind::Class { body, .. } = *cx.tree.kind(class) else {
            return;
        };

        for &(name, symbol, parameter) in &components {
            let NodeKind::Parameter {
                annotations, ty, ..
            } = *cx.tree.kind(parameter)
            else {
                continue;
            };
            cx.tree.detach(parameter, annotations);
            cx.tree.detach(parameter, ty);
            let property = cx.tree.alloc(NodeKind::Property {
                name,
                modifiers: Modifiers::default(),
                annotations,
                ty,
                initializer: None,
                mutable: false,
                symbol,
            });
            cx.symbols.transfer(parameter, property);
            cx.replaced(parameter, property);
            cx.tree.replace_child(class, parameter, property);
        }

        for member in cx.tree.list(body) {
            if let Some((accessor, name, _)) = trivial_accessor(cx.tree, member, &components) {
                if let Some(fq_name) = cx.symbols.fq_name(accessor) {
                    let key = cx.origin_key(member);
                    cx.context.external.register(
                        fq_name,
                        j2k_types::SymbolKind::Method,
                        key,
                        ExternalChange::BecameProperty { property: name },
                    );
                }
                // Comments on the accessor stay in the class.
                cx.tree.transfer_trivia(member, class);
                cx.tree.remove_child(body, member);
                cx.tree.invalidate(member);
                cx.record_change();
            }
        }

        let class_name = if let NodeKind::Class {
            name,
            class_kind,
            modifiers,
            ..
        } = cx.tree.kind_mut(class)
        {
            *class_kind = ClassKind::Class;
            modifiers.flags |= ModifierFlags::DATA;
            if modifiers.modality == Modality::Unspecified {
                modifiers.modality = Modality::Final;
            }
            *name
        } else {
            return;
        };
        cx.record_change();
        let class_name = cx.lookup(class_name);
        tracing::debug!(class = class_name, components = components.len(), "record converted to data class");
        cx.note(
            NoteCode::J3004,
            format!("record {class_name} converted to a data class"),
            class,
        );
    }
}

impl RecursiveConversion for RecordClassConversion {
    fn name(&self) -> &'static str {
        "record-class"
    }

    fn apply_to_element(&mut self, cx: &mut ConversionCx<'_>, id: NodeId) -> NodeId {
        let accessors = self
            .accessors
            .get_or_insert_with(|| record_accessors(cx.tree, id));

        match *cx.tree.kind(id) {
            NodeKind::Class {
                class_kind: ClassKind::Record,
                ..
            } => {
                Self::convert_record(cx, id);
                self.recurse(cx, id)
            }
            NodeKind::Call {
                symbol, arguments, ..
            } if accessors.contains_key(&symbol) && cx.tree.list(arguments).is_empty() => {
                let (name, component) = accessors[&symbol];
                let property = build::reference(cx.tree, name, component);
                cx.replaced(id, property);
                property
            }
            _ => self.recurse(cx, id),
        }
    }
}

#[cfg(test)]
mod tests;
