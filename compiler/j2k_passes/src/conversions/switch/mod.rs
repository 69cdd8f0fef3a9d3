//! Java `switch` to Kotlin `when`.
//!
//! Statement and expression switches both become a `when` over the
//! selector. Each case becomes a branch:
//!
//! - consecutive labels with no code between them share one branch;
//! - `default` becomes `else` and moves last (case order does not matter,
//!   labels are distinct constants);
//! - a trailing `break` is dropped;
//! - a case that falls through gets a copy of the code it falls into, up to
//!   the next `break` or jump;
//! - in a switch expression, a `yield` in tail position becomes the branch
//!   value.
//!
//! A `break` that leaves the switch from the middle of a case has no `when`
//! counterpart; such a switch is left alone and noted.
//!
//! The accumulator records whether the walk is inside a switch
//! expression, so a `yield` that could not be unwrapped is reported.

use j2k_diagnostic::NoteCode;
use j2k_ir::{build, NodeId, NodeKind, Tree};

use super::util::is_jump;
use crate::{ConversionCx, RecursiveConversionWithData};

pub struct SwitchToWhenConversion;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SwitchData {
    pub in_switch_expression: bool,
}

/// How a case's code ends.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Tail {
    /// Unlabeled `break` as the last statement; it is dropped.
    Break(NodeId),
    /// `return`, `throw`, `continue`, labeled `break` or `yield`.
    Jump,
    /// Control reaches the next case.
    FallsThrough,
}

/// One case, read before anything is detached.
struct Case {
    node: NodeId,
    labels: Vec<NodeId>,
    body: Vec<NodeId>,
    arrow: bool,
    tail: Tail,
}

/// Cases that end up in one branch.
struct Group {
    cases: Vec<usize>,
    is_else: bool,
}

fn tail(tree: &Tree, statements: &[NodeId]) -> Tail {
    let Some(&last) = statements.last() else {
        return Tail::FallsThrough;
    };
    match tree.kind(last) {
        NodeKind::Break { label: None } => Tail::Break(last),
        NodeKind::Block { statements } => tail(tree, statements),
        kind if is_jump(kind) => Tail::Jump,
        _ => Tail::FallsThrough,
    }
}

/// Whether an unlabeled `break` other than `except` leaves the switch from
/// inside `root`.
fn breaks_out(tree: &Tree, root: NodeId, except: Option<NodeId>) -> bool {
    let mut stack = vec![root];
    while let Some(id) = stack.pop() {
        match tree.kind(id) {
            NodeKind::Break { label: None } if Some(id) != except => return true,
            NodeKind::While { .. }
            | NodeKind::DoWhile { .. }
            | NodeKind::For { .. }
            | NodeKind::ForIn { .. }
            | NodeKind::Switch { .. }
            | NodeKind::When { .. }
            | NodeKind::Lambda { .. }
            | NodeKind::Class { .. } => {}
            _ => stack.extend(tree.children(id)),
        }
    }
    false
}

impl SwitchToWhenConversion {
    fn cases(tree: &Tree, id: NodeId) -> Option<(NodeId, Vec<Case>, bool)> {
        let NodeKind::Switch {
            selector,
            cases,
            is_expression,
        } = tree.kind(id)
        else {
            return None;
        };
        let cases = cases
            .iter()
            .map(|&node| {
                let NodeKind::SwitchCase {
                    labels,
                    body,
                    arrow,
                } = tree.kind(node)
                else {
                    return None;
                };
                Some(Case {
                    node,
                    labels: labels.clone(),
                    body: body.clone(),
                    arrow: *arrow,
                    tail: tail(tree, body),
                })
            })
            .collect::<Option<Vec<_>>>()?;
        Some((*selector, cases, *is_expression))
    }

    /// Consecutive labels with no code between them form one group.
    fn groups(cases: &[Case]) -> Vec<Group> {
        let mut groups = Vec::new();
        let mut pending = Group {
            cases: Vec::new(),
            is_else: false,
        };
        for (index, case) in cases.iter().enumerate() {
            pending.cases.push(index);
            pending.is_else |= case.labels.is_empty();
            if case.arrow || !case.body.is_empty() || index + 1 == cases.len() {
                groups.push(std::mem::replace(
                    &mut pending,
                    Group {
                        cases: Vec::new(),
                        is_else: false,
                    },
                ));
            }
        }
        groups
    }

    /// Detach every child of the switch and its cases; drop trailing
    /// breaks.
    fn take_apart(cx: &mut ConversionCx<'_>, id: NodeId, selector: NodeId, cases: &mut [Case]) {
        cx.tree.detach(id, selector);
        for case in cases.iter_mut() {
            for &label in &case.labels {
                cx.tree.detach(case.node, label);
            }
            for &statement in &case.body {
                cx.tree.detach(case.node, statement);
            }
            if let Tail::Break(brk) = case.tail {
                match cx.tree.parent(brk) {
                    Some(block) => {
                        cx.tree.remove_child(block, brk);
                    }
                    None => case.body.retain(|&statement| statement != brk),
                }
                cx.tree.invalidate(brk);
            }
        }
    }

    /// Statements of a group's branch: its own code, then copies of what it
    /// falls into.
    fn branch_statements(cx: &mut ConversionCx<'_>, cases: &[Case], group: &Group) -> Vec<NodeId> {
        let mut statements = Vec::new();
        let Some(&last) = group.cases.last() else {
            return statements;
        };
        statements.extend(&cases[last].body);
        let mut tail = cases[last].tail;
        let mut next = last + 1;
        while tail == Tail::FallsThrough && next < cases.len() && !cases[last].arrow {
            for &statement in &cases[next].body {
                statements.push(cx.tree.copy_and_detach(statement));
            }
            tracing::debug!(case = next, "fall-through code copied into the previous branch");
            tail = cases[next].tail;
            next += 1;
        }
        statements
    }

    fn branch_body(cx: &mut ConversionCx<'_>, statements: Vec<NodeId>, arrow: bool, is_expression: bool) -> NodeId {
        if arrow {
            if let [only] = statements[..] {
                if is_expression {
                    if let NodeKind::ExpressionStatement { expression } = *cx.tree.kind(only) {
                        cx.tree.detach(only, expression);
                        cx.replaced(only, expression);
                        cx.tree.invalidate(only);
                        return expression;
                    }
                }
                return only;
            }
        }
        build::block(cx.tree, statements)
    }

    fn convert(cx: &mut ConversionCx<'_>, id: NodeId) -> Option<NodeId> {
        let (selector, mut cases, is_expression) = Self::cases(cx.tree, id)?;

        let tree = &*cx.tree;
        let escaping = cases.iter().any(|case| {
            let except = match case.tail {
                Tail::Break(brk) => Some(brk),
                _ => None,
            };
            case.body
                .iter()
                .any(|&statement| breaks_out(tree, statement, except))
        });
        if escaping {
            tracing::warn!("switch with a break inside a case left as is");
            cx.note(
                NoteCode::J1002,
                "switch not converted: a break leaves it from the middle of a case",
                id,
            );
            return None;
        }

        Self::take_apart(cx, id, selector, &mut cases);
        let mut groups = Self::groups(&cases);
        // `else` goes last.
        if let Some(position) = groups.iter().position(|group| group.is_else) {
            let group = groups.remove(position);
            groups.push(group);
        }

        let mut branches = Vec::with_capacity(groups.len());
        for group in &groups {
            let conditions = if group.is_else {
                for &index in &group.cases {
                    for &label in &cases[index].labels {
                        cx.tree.invalidate(label);
                    }
                }
                Vec::new()
            } else {
                group
                    .cases
                    .iter()
                    .flat_map(|&index| cases[index].labels.iter().copied())
                    .collect()
            };
            let arrow = group.cases.iter().any(|&index| cases[index].arrow);
            let statements = Self::branch_statements(cx, &cases, group);
            let body = Self::branch_body(cx, statements, arrow, is_expression);
            let branch = cx.tree.alloc(NodeKind::WhenBranch { conditions, body });
            for &index in &group.cases {
                cx.tree.transfer_trivia(cases[index].node, branch);
            }
            if is_expression {
                unwrap_tail_yield(cx, branch, body);
            }
            branches.push(branch);
        }

        let when = cx.tree.alloc(NodeKind::When {
            subject: Some(selector),
            branches,
            is_expression,
        });
        tracing::debug!(
            cases = cases.len(),
            branches = groups.len(),
            is_expression,
            "switch converted to when"
        );
        cx.replaced(id, when);
        Some(when)
    }
}

/// Turn a `yield` ending `node` (the value of a branch) into the value
/// itself.
fn unwrap_tail_yield(cx: &mut ConversionCx<'_>, parent: NodeId, node: NodeId) {
    match *cx.tree.kind(node) {
        NodeKind::Yield { value } => {
            cx.tree.detach(node, value);
            let statement = build::expression_statement(cx.tree, value);
            cx.replaced(node, statement);
            cx.tree.replace_child(parent, node, statement);
        }
        NodeKind::Block { .. } => {
            if let Some(&last) = cx.tree.list(node).last() {
                unwrap_tail_yield(cx, node, last);
            }
        }
        NodeKind::If {
            then_branch,
            else_branch: Some(else_branch),
            ..
        } => {
            unwrap_tail_yield(cx, node, then_branch);
            unwrap_tail_yield(cx, node, else_branch);
        }
        _ => {}
    }
}

impl RecursiveConversionWithData for SwitchToWhenConversion {
    type Data = SwitchData;

    fn name(&self) -> &'static str {
        "switch-to-when"
    }

    fn initial_data(&self) -> SwitchData {
        SwitchData::default()
    }

    fn apply_to_element(&mut self, cx: &mut ConversionCx<'_>, id: NodeId, data: &SwitchData) -> NodeId {
        match cx.tree.kind(id) {
            NodeKind::Switch { is_expression, .. } => {
                let inner = SwitchData {
                    in_switch_expression: data.in_switch_expression || *is_expression,
                };
                let converted = Self::convert(cx, id).unwrap_or(id);
                self.recurse_with_data(cx, converted, &inner)
            }
            NodeKind::Lambda { .. } | NodeKind::Class { .. } => {
                self.recurse_with_data(cx, id, &SwitchData::default())
            }
            NodeKind::Yield { .. } if data.in_switch_expression => {
                cx.note(
                    NoteCode::J9002,
                    "yield outside tail position of a switch expression",
                    id,
                );
                self.recurse_with_data(cx, id, data)
            }
            _ => self.recurse_with_data(cx, id, data),
        }
    }
}
