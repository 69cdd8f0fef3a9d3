//! Interface to the external static-analysis collaborator.
//!
//! Every query takes an explicit [`AnalysisSession`]. A session is a scoped
//! handle obtained from a [`SessionGate`] for the duration of one query and
//! dropped right after; nesting is allowed, holding one across passes is
//! not (the pipeline checks the gate is idle between passes).

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use rustc_hash::{FxHashMap, FxHashSet};

use j2k_ir::{Nullability, OriginKey};

/// Counts live and total sessions for one unit.
#[derive(Debug, Default)]
pub struct SessionGate {
    depth: AtomicUsize,
    entered: AtomicU64,
}

impl SessionGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enter(&self) -> AnalysisSession<'_> {
        self.depth.fetch_add(1, Ordering::AcqRel);
        self.entered.fetch_add(1, Ordering::Relaxed);
        AnalysisSession { gate: self }
    }

    /// Sessions currently open.
    pub fn depth(&self) -> usize {
        self.depth.load(Ordering::Acquire)
    }

    /// Sessions opened so far.
    pub fn total_entered(&self) -> u64 {
        self.entered.load(Ordering::Relaxed)
    }
}

/// Read-only analysis context, held for one query.
#[derive(Debug)]
pub struct AnalysisSession<'g> {
    gate: &'g SessionGate,
}

impl AnalysisSession<'_> {
    /// Open a nested session on the same gate.
    pub fn reenter(&self) -> AnalysisSession<'_> {
        self.gate.enter()
    }
}

impl Drop for AnalysisSession<'_> {
    fn drop(&mut self) {
        self.gate.depth.fetch_sub(1, Ordering::AcqRel);
    }
}

/// Queries the conversion asks about the original Java program. Answers are
/// keyed by the origin back-link of the node asked about. Implementations
/// must not observe or change the tree.
pub trait AnalysisOracle: Send + Sync {
    /// Some subclass overrides this member.
    fn is_overridden(&self, session: &AnalysisSession<'_>, member: OriginKey) -> bool;

    /// This member overrides or implements a supertype member.
    fn is_override(&self, session: &AnalysisSession<'_>, member: OriginKey) -> bool;

    /// Some class extends this one.
    fn has_inheritors(&self, session: &AnalysisSession<'_>, class: OriginKey) -> bool;

    fn nullability(&self, session: &AnalysisSession<'_>, element: OriginKey) -> Nullability;

    /// The variable is assigned after its declaration.
    fn has_write_usages(&self, session: &AnalysisSession<'_>, variable: OriginKey) -> bool;
}

/// Oracle for hosts without analysis. Every answer keeps the converted code
/// at least as permissive as the original.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoAnalysis;

impl AnalysisOracle for NoAnalysis {
    fn is_overridden(&self, _: &AnalysisSession<'_>, _: OriginKey) -> bool {
        true
    }

    fn is_override(&self, _: &AnalysisSession<'_>, _: OriginKey) -> bool {
        false
    }

    fn has_inheritors(&self, _: &AnalysisSession<'_>, _: OriginKey) -> bool {
        true
    }

    fn nullability(&self, _: &AnalysisSession<'_>, _: OriginKey) -> Nullability {
        Nullability::Default
    }

    fn has_write_usages(&self, _: &AnalysisSession<'_>, _: OriginKey) -> bool {
        true
    }
}

/// Table-driven oracle. Keys absent from a table answer "no" (and
/// `Nullability::Default`).
#[derive(Clone, Debug, Default)]
pub struct StaticOracle {
    overridden: FxHashSet<OriginKey>,
    overrides: FxHashSet<OriginKey>,
    inherited: FxHashSet<OriginKey>,
    written: FxHashSet<OriginKey>,
    nullability: FxHashMap<OriginKey, Nullability>,
}

impl StaticOracle {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn overridden(mut self, member: OriginKey) -> Self {
        self.overridden.insert(member);
        self
    }

    #[must_use]
    pub fn overrides(mut self, member: OriginKey) -> Self {
        self.overrides.insert(member);
        self
    }

    #[must_use]
    pub fn inherited(mut self, class: OriginKey) -> Self {
        self.inherited.insert(class);
        self
    }

    #[must_use]
    pub fn written(mut self, variable: OriginKey) -> Self {
        self.written.insert(variable);
        self
    }

    #[must_use]
    pub fn with_nullability(mut self, element: OriginKey, nullability: Nullability) -> Self {
        self.nullability.insert(element, nullability);
        self
    }
}

impl AnalysisOracle for StaticOracle {
    fn is_overridden(&self, _: &AnalysisSession<'_>, member: OriginKey) -> bool {
        self.overridden.contains(&member)
    }

    fn is_override(&self, _: &AnalysisSession<'_>, member: OriginKey) -> bool {
        self.overrides.contains(&member)
    }

    fn has_inheritors(&self, _: &AnalysisSession<'_>, class: OriginKey) -> bool {
        self.inherited.contains(&class)
    }

    fn nullability(&self, _: &AnalysisSession<'_>, element: OriginKey) -> Nullability {
        self.nullability
            .get(&element)
            .copied()
            .unwrap_or(Nullability::Default)
    }

    fn has_write_usages(&self, _: &AnalysisSession<'_>, variable: OriginKey) -> bool {
        self.written.contains(&variable)
    }
}

/// What passes use: each call opens a session, asks, and closes it. Nodes
/// without an origin key get the conservative `NoAnalysis` answer.
#[derive(Clone, Copy)]
pub struct Analysis<'a> {
    oracle: &'a dyn AnalysisOracle,
    gate: &'a SessionGate,
}

impl<'a> Analysis<'a> {
    pub fn new(oracle: &'a dyn AnalysisOracle, gate: &'a SessionGate) -> Self {
        Analysis { oracle, gate }
    }

    fn ask<T>(
        &self,
        key: Option<OriginKey>,
        query: impl FnOnce(&dyn AnalysisOracle, &AnalysisSession<'_>, OriginKey) -> T,
    ) -> T {
        let session = self.gate.enter();
        match key {
            Some(key) => query(self.oracle, &session, key),
            None => {
                let fallback: &dyn AnalysisOracle = &NoAnalysis;
                query(fallback, &session, OriginKey(0))
            }
        }
    }

    pub fn is_overridden(&self, member: Option<OriginKey>) -> bool {
        self.ask(member, |o, s, k| o.is_overridden(s, k))
    }

    pub fn is_override(&self, member: Option<OriginKey>) -> bool {
        self.ask(member, |o, s, k| o.is_override(s, k))
    }

    pub fn has_inheritors(&self, class: Option<OriginKey>) -> bool {
        self.ask(class, |o, s, k| o.has_inheritors(s, k))
    }

    pub fn nullability(&self, element: Option<OriginKey>) -> Nullability {
        self.ask(element, |o, s, k| o.nullability(s, k))
    }

    pub fn has_write_usages(&self, variable: Option<OriginKey>) -> bool {
        self.ask(variable, |o, s, k| o.has_write_usages(s, k))
    }

    pub fn gate(&self) -> &'a SessionGate {
        self.gate
    }
}
