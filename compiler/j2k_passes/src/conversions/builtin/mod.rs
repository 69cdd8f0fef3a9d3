//! Java platform API to Kotlin standard library.
//!
//! [`BUILTIN_MEMBERS`] maps members of the Java platform (`Math.abs`,
//! `String.length()`, `Integer.MAX_VALUE`, ...) to their Kotlin
//! counterparts. Entries are looked up by the fully-qualified name of the
//! symbol a call, field access or `new` expression is bound to, never by
//! spelling. The first entry whose filters all pass wins; an entry gated
//! only by the target API version leaves a note when nothing else matches.
//!
//! Every target is a Kotlin declaration, so the output of this pass never
//! matches an entry again. The `Object` monitor methods keep their Java
//! symbol; their receiver filter skips a receiver already cast to
//! `java.lang.Object`.

mod table;

use std::fmt;

use j2k_diagnostic::NoteCode;
use j2k_ir::{
    build, BinaryOp, JkType, LiteralKind, NodeId, NodeKind, Nullability, PrefixOp, PrimitiveType,
    SymbolId, Tree,
};
use j2k_types::SymbolKind;

use super::util::{parenthesize_if_needed, short_name};
use crate::{ApiVersion, ConversionCx, RecursiveConversion};

pub use table::BUILTIN_MEMBERS;

/// Shape of the Java expression an entry applies to.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Source {
    Method,
    Field,
    /// `new T(..)`, keyed by the (already mapped) class of `T`.
    New,
}

/// Builds a replacement from the member's detached receiver (if the access
/// was qualified) and arguments. A receiver the replacement does not use is
/// freed by the caller.
pub type CustomBuilder =
    fn(&mut ConversionCx<'_>, &BuiltinMember, Option<NodeId>, Vec<NodeId>) -> NodeId;

#[derive(Copy, Clone)]
pub enum Target {
    /// Call to a Kotlin function or member with the same arguments.
    Method(&'static str),
    /// Kotlin property; arguments are dropped.
    Field(&'static str),
    /// Kotlin extension: the first argument becomes the receiver.
    ExtensionMethod(&'static str),
    /// Replacement that depends on the arguments. `name` is what notes
    /// and logs call it.
    Custom {
        name: &'static str,
        build: CustomBuilder,
    },
}

impl Target {
    fn describe(&self) -> &'static str {
        match self {
            Target::Method(fq)
            | Target::Field(fq)
            | Target::ExtensionMethod(fq)
            | Target::Custom { name: fq, .. } => fq,
        }
    }
}

impl fmt::Debug for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Method(fq) => write!(f, "Method({fq})"),
            Target::Field(fq) => write!(f, "Field({fq})"),
            Target::ExtensionMethod(fq) => write!(f, "ExtensionMethod({fq})"),
            Target::Custom { name, .. } => write!(f, "Custom({name})"),
        }
    }
}

/// What the replacement stands in for.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum ReplaceType {
    /// Only the selector: `s.length()` → `s.length`.
    Selector,
    /// The whole qualified expression, receiver included:
    /// `Math.abs(x)` → `abs(x)`.
    WithQualifier,
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Arity {
    Any,
    Exactly(usize),
    Between(usize, usize),
}

impl Arity {
    fn accepts(self, count: usize) -> bool {
        match self {
            Arity::Any => true,
            Arity::Exactly(n) => count == n,
            Arity::Between(min, max) => (min..=max).contains(&count),
        }
    }
}

/// Static type the first argument must have.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum ArgumentType {
    String,
    Int,
    Char,
    CharArray,
    /// Anything but an array, including unknown types.
    NotArray,
    /// `Foo.class`.
    ClassLiteral,
    /// `new T[n]` without an initializer.
    NewArray,
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum ReceiverFilter {
    Any,
    /// Fully-qualified name the receiver must be bound to
    /// (`java.lang.System.out`).
    Bound(&'static str),
    /// Anything but `(x as java.lang.Object)`.
    NotCastToObject,
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Filters {
    pub arity: Arity,
    pub first_argument: Option<ArgumentType>,
    pub receiver: ReceiverFilter,
    /// Oldest Kotlin API version providing the target.
    pub since: Option<ApiVersion>,
}

impl Filters {
    pub const NONE: Filters = Filters {
        arity: Arity::Any,
        first_argument: None,
        receiver: ReceiverFilter::Any,
        since: None,
    };
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum ArgumentTransform {
    Keep,
    /// Regex given as a string: `s.matches(p)` → `s.matches(p.toRegex())`.
    FirstToRegex,
    /// Charset given by name: `getBytes(n)` → `toByteArray(charset(n))`.
    FirstToCharset,
    /// `equalsIgnoreCase(o)` → `equals(o, true)`.
    AppendIgnoreCase,
    /// `regionMatches(ignoreCase, ..)` → `regionMatches(.., ignoreCase)`.
    FirstToLast,
    /// `getChars(begin, end, dst, at)` → `toCharArray(dst, at, begin, end)`.
    GetCharsOrder,
    DropAll,
}

#[derive(Copy, Clone, Debug)]
pub struct BuiltinMember {
    pub source: Source,
    pub from: &'static str,
    pub target: Target,
    pub replace: ReplaceType,
    pub filters: Filters,
    pub arguments: ArgumentTransform,
}

impl BuiltinMember {
    const fn new(source: Source, from: &'static str, target: Target) -> Self {
        BuiltinMember {
            source,
            from,
            target,
            replace: ReplaceType::Selector,
            filters: Filters::NONE,
            arguments: ArgumentTransform::Keep,
        }
    }

    pub const fn method(from: &'static str, target: Target) -> Self {
        BuiltinMember::new(Source::Method, from, target)
    }

    pub const fn field(from: &'static str, target: Target) -> Self {
        BuiltinMember::new(Source::Field, from, target)
    }

    pub const fn constructor(from: &'static str, target: Target) -> Self {
        BuiltinMember::new(Source::New, from, target)
    }

    #[must_use]
    pub const fn with_qualifier(mut self) -> Self {
        self.replace = ReplaceType::WithQualifier;
        self
    }

    #[must_use]
    pub const fn arity(mut self, arity: Arity) -> Self {
        self.filters.arity = arity;
        self
    }

    #[must_use]
    pub const fn first_argument(mut self, ty: ArgumentType) -> Self {
        self.filters.first_argument = Some(ty);
        self
    }

    #[must_use]
    pub const fn receiver(mut self, fq_name: &'static str) -> Self {
        self.filters.receiver = ReceiverFilter::Bound(fq_name);
        self
    }

    #[must_use]
    pub const fn receiver_not_cast_to_object(mut self) -> Self {
        self.filters.receiver = ReceiverFilter::NotCastToObject;
        self
    }

    #[must_use]
    pub const fn since(mut self, version: ApiVersion) -> Self {
        self.filters.since = Some(version);
        self
    }

    #[must_use]
    pub const fn arguments(mut self, transform: ArgumentTransform) -> Self {
        self.arguments = transform;
        self
    }
}

/// Outcome of checking one entry's filters.
enum Check {
    Pass,
    /// Everything but the API version passed.
    Gated(ApiVersion),
    Fail,
}

/// A member access the table is consulted for.
struct Site {
    source: Source,
    fq_name: &'static str,
    receiver: Option<NodeId>,
    member: NodeId,
    arguments: Vec<NodeId>,
}

pub struct BuiltinMembersConversion {
    table: &'static [BuiltinMember],
}

impl Default for BuiltinMembersConversion {
    fn default() -> Self {
        BuiltinMembersConversion::new()
    }
}

impl BuiltinMembersConversion {
    pub fn new() -> Self {
        BuiltinMembersConversion {
            table: BUILTIN_MEMBERS,
        }
    }

    /// Use another table, for hosts that extend the mapping.
    pub fn with_table(table: &'static [BuiltinMember]) -> Self {
        BuiltinMembersConversion { table }
    }

    fn site(cx: &ConversionCx<'_>, id: NodeId) -> Option<Site> {
        let tree = &*cx.tree;
        let (receiver, member) = match tree.kind(id) {
            NodeKind::Qualified { receiver, selector } => (Some(*receiver), *selector),
            _ if is_selector(tree, id) => return None,
            _ => (None, id),
        };
        let (source, fq_name, arguments) = match tree.kind(member) {
            NodeKind::Call {
                symbol, arguments, ..
            } => (Source::Method, cx.symbol_fq_name(*symbol)?, tree.list(*arguments)),
            NodeKind::FieldAccess { symbol, .. } => {
                (Source::Field, cx.symbol_fq_name(*symbol)?, Vec::new())
            }
            NodeKind::New {
                ty,
                arguments,
                body: None,
                ..
            } if receiver.is_none() => {
                let NodeKind::TypeElement { ty } = tree.kind(*ty) else {
                    return None;
                };
                let class = ty.as_class()?;
                (Source::New, cx.lookup(class.fq_name), tree.list(*arguments))
            }
            _ => return None,
        };
        Some(Site {
            source,
            fq_name,
            receiver,
            member,
            arguments,
        })
    }

    fn check(cx: &mut ConversionCx<'_>, filters: &Filters, site: &Site) -> Check {
        if !filters.arity.accepts(site.arguments.len()) {
            return Check::Fail;
        }
        match filters.receiver {
            ReceiverFilter::Any => {}
            ReceiverFilter::Bound(expected) => {
                let bound = site
                    .receiver
                    .and_then(|receiver| referenced_symbol(cx.tree, receiver))
                    .and_then(|symbol| cx.symbol_fq_name(symbol));
                if bound != Some(expected) {
                    return Check::Fail;
                }
            }
            ReceiverFilter::NotCastToObject => {
                if site.receiver.is_some_and(|receiver| is_object_cast(cx, receiver)) {
                    return Check::Fail;
                }
            }
        }
        if let Some(expected) = filters.first_argument {
            let Some(&first) = site.arguments.first() else {
                return Check::Fail;
            };
            if !argument_matches(cx, first, expected) {
                return Check::Fail;
            }
        }
        match filters.since {
            Some(since) if cx.settings().api_version < since => Check::Gated(since),
            _ => Check::Pass,
        }
    }

    /// First entry for `site` whose filters pass.
    fn lookup(&self, cx: &mut ConversionCx<'_>, site: &Site, at: NodeId) -> Option<&'static BuiltinMember> {
        let table = self.table;
        let mut gated = None;
        for entry in table {
            if entry.source != site.source || entry.from != site.fq_name {
                continue;
            }
            match Self::check(cx, &entry.filters, site) {
                Check::Pass => return Some(entry),
                Check::Gated(since) => {
                    gated.get_or_insert((entry, since));
                }
                Check::Fail => {}
            }
        }
        if let Some((entry, since)) = gated {
            let target = cx.settings().api_version;
            tracing::debug!(
                from = entry.from,
                to = entry.target.describe(),
                %since,
                %target,
                "builtin mapping needs a newer API version"
            );
            cx.note(
                NoteCode::J2002,
                format!(
                    "{} not mapped: {} needs Kotlin {since}, target is {target}",
                    entry.from,
                    entry.target.describe()
                ),
                at,
            );
        }
        None
    }

    fn convert(&self, cx: &mut ConversionCx<'_>, id: NodeId) -> Option<NodeId> {
        let site = Self::site(cx, id)?;
        let entry = self.lookup(cx, &site, id)?;

        let whole = entry.replace == ReplaceType::WithQualifier
            || matches!(entry.target, Target::ExtensionMethod(_) | Target::Custom { .. })
            || site.receiver.is_none();
        let arguments = Self::take_arguments(cx, entry, &site);
        let replacement = match entry.target {
            Target::Method(fq) => {
                let type_arguments = match *cx.tree.kind(site.member) {
                    NodeKind::Call { type_arguments, .. } => cx.tree.take_children(type_arguments),
                    _ => Vec::new(),
                };
                let call = call(cx, fq, SymbolKind::Method, arguments);
                if let NodeKind::Call { type_arguments: list, .. } = *cx.tree.kind(call) {
                    for argument in type_arguments {
                        cx.tree.push_child(list, argument);
                    }
                }
                if whole {
                    companion_qualified(cx, fq, call)
                } else {
                    call
                }
            }
            Target::Field(fq) => {
                let name = cx.intern(short_name(fq));
                let symbol = cx.multiverse_symbol(fq, SymbolKind::Field);
                let reference = build::reference(cx.tree, name, symbol);
                if whole {
                    companion_qualified(cx, fq, reference)
                } else {
                    reference
                }
            }
            Target::ExtensionMethod(fq) => extension_call(cx, fq, arguments),
            Target::Custom { build, .. } => {
                let receiver = site.receiver.map(|receiver| cx.tree.detach(id, receiver));
                build(cx, entry, receiver, arguments)
            }
        };

        tracing::debug!(from = entry.from, to = entry.target.describe(), "builtin member replaced");
        cx.note(
            NoteCode::J2001,
            format!("{} replaced by {}", entry.from, entry.target.describe()),
            id,
        );

        if whole {
            // The dropped receiver's comments stay with the expression.
            if let Some(receiver) = site.receiver {
                if !cx.tree.is_ancestor(replacement, receiver) {
                    cx.tree.transfer_trivia(receiver, replacement);
                    if cx.tree.parent(receiver).is_none() {
                        cx.tree.invalidate(receiver);
                    }
                }
            }
            if site.member != id {
                cx.tree.transfer_trivia(site.member, replacement);
            }
            cx.replaced(id, replacement);
            Some(replacement)
        } else {
            cx.replaced(site.member, replacement);
            cx.tree.replace_child(id, site.member, replacement);
            Some(id)
        }
    }

    /// Detach the member's arguments and apply the entry's transform.
    fn take_arguments(cx: &mut ConversionCx<'_>, entry: &BuiltinMember, site: &Site) -> Vec<NodeId> {
        let list = match *cx.tree.kind(site.member) {
            NodeKind::Call { arguments, .. } | NodeKind::New { arguments, .. } => arguments,
            _ => return Vec::new(),
        };
        let mut arguments = cx.tree.take_children(list);
        match entry.arguments {
            ArgumentTransform::Keep => {}
            ArgumentTransform::FirstToRegex => {
                if let Some(first) = arguments.first_mut() {
                    *first = call_on(cx, *first, "kotlin.text.toRegex", Vec::new());
                }
            }
            ArgumentTransform::FirstToCharset => {
                if let Some(first) = arguments.first_mut() {
                    *first = call(cx, "kotlin.text.charset", SymbolKind::Method, vec![*first]);
                }
            }
            ArgumentTransform::AppendIgnoreCase => {
                arguments.push(build::literal(cx.tree, LiteralKind::Boolean, "true"));
            }
            ArgumentTransform::FirstToLast => {
                if !arguments.is_empty() {
                    arguments.rotate_left(1);
                }
            }
            ArgumentTransform::GetCharsOrder => {
                if let [begin, end, destination, at] = arguments[..] {
                    arguments = vec![destination, at, begin, end];
                }
            }
            ArgumentTransform::DropAll => {
                for argument in arguments.drain(..) {
                    cx.tree.invalidate(argument);
                }
            }
        }
        arguments
    }
}

impl RecursiveConversion for BuiltinMembersConversion {
    fn name(&self) -> &'static str {
        "builtin-members"
    }

    fn apply_to_element(&mut self, cx: &mut ConversionCx<'_>, id: NodeId) -> NodeId {
        let converted = self.convert(cx, id).unwrap_or(id);
        self.recurse(cx, converted)
    }
}

/// Whether `id` is the selector of a qualified expression. Those are
/// handled when the qualified expression itself is visited.
fn is_selector(tree: &Tree, id: NodeId) -> bool {
    tree.parent(id).is_some_and(|parent| {
        matches!(tree.kind(parent), NodeKind::Qualified { selector, .. } if *selector == id)
    })
}

/// Symbol a receiver names: `out` in `System.out`, `x` in `x`.
fn referenced_symbol(tree: &Tree, id: NodeId) -> Option<SymbolId> {
    match tree.kind(id) {
        NodeKind::FieldAccess { symbol, .. } => Some(*symbol),
        NodeKind::Qualified { selector, .. } => referenced_symbol(tree, *selector),
        NodeKind::Parenthesized { expression } => referenced_symbol(tree, *expression),
        _ => None,
    }
}

/// `(x as java.lang.Object)`.
fn is_object_cast(cx: &ConversionCx<'_>, receiver: NodeId) -> bool {
    let NodeKind::Parenthesized { expression } = cx.tree.kind(receiver) else {
        return false;
    };
    let NodeKind::TypeCast { ty, .. } = cx.tree.kind(*expression) else {
        return false;
    };
    match cx.tree.kind(*ty) {
        NodeKind::TypeElement { ty } => ty
            .as_class()
            .is_some_and(|class| cx.lookup(class.fq_name) == "java.lang.Object"),
        _ => false,
    }
}

fn argument_matches(cx: &mut ConversionCx<'_>, argument: NodeId, expected: ArgumentType) -> bool {
    match (expected, cx.tree.kind(argument)) {
        (ArgumentType::ClassLiteral, kind) => return matches!(kind, NodeKind::ClassLiteral { .. }),
        (ArgumentType::NewArray, NodeKind::NewArray { initializer, .. }) => {
            return initializer.is_empty()
        }
        (ArgumentType::NewArray, _) => return false,
        _ => {}
    }
    let ty = cx.type_of(argument);
    let types = &cx.context.types;
    match expected {
        ArgumentType::String => ty.is_some_and(|ty| types.is_string(&ty)),
        ArgumentType::Int => ty.is_some_and(|ty| {
            matches!(
                types.primitive_of(&ty),
                Some(PrimitiveType::Int | PrimitiveType::Short | PrimitiveType::Byte)
            )
        }),
        ArgumentType::Char => {
            ty.is_some_and(|ty| types.primitive_of(&ty) == Some(PrimitiveType::Char))
        }
        ArgumentType::CharArray => ty.is_some_and(|ty| is_char_array(cx, &ty)),
        ArgumentType::NotArray => !ty.is_some_and(|ty| is_array(cx, &ty)),
        ArgumentType::ClassLiteral | ArgumentType::NewArray => false,
    }
}

fn is_array(cx: &ConversionCx<'_>, ty: &JkType) -> bool {
    match ty {
        JkType::Array { .. } => true,
        JkType::Class(class) => {
            let fq = cx.lookup(class.fq_name);
            fq == "kotlin.Array" || (fq.starts_with("kotlin.") && fq.ends_with("Array"))
        }
        _ => false,
    }
}

fn is_char_array(cx: &ConversionCx<'_>, ty: &JkType) -> bool {
    match ty {
        JkType::Array { element, .. } => {
            matches!(**element, JkType::Primitive(PrimitiveType::Char))
        }
        JkType::Class(class) => cx.lookup(class.fq_name) == "kotlin.CharArray",
        _ => false,
    }
}

/// Unqualified call to the Kotlin declaration `fq`. Registered overloads
/// give the call a signature.
fn call(cx: &mut ConversionCx<'_>, fq: &str, kind: SymbolKind, arguments: Vec<NodeId>) -> NodeId {
    let fq_name = cx.intern(fq);
    let multiverse = &cx.context.multiverse;
    let symbol = if multiverse.contains(fq_name) {
        let by_arity = multiverse.resolve(cx.symbols, fq_name, Some(arguments.len()));
        if cx.symbols.is_unresolved(by_arity) {
            multiverse.resolve(cx.symbols, fq_name, None)
        } else {
            by_arity
        }
    } else {
        cx.symbols.multiverse(fq_name, kind, None)
    };
    let name = cx.intern(short_name(fq));
    build::call(cx.tree, name, symbol, arguments)
}

/// `receiver.fq(arguments)`, parenthesizing a compound receiver.
fn call_on(cx: &mut ConversionCx<'_>, receiver: NodeId, fq: &str, arguments: Vec<NodeId>) -> NodeId {
    let receiver = parenthesize_if_needed(cx.tree, receiver);
    let call = call(cx, fq, SymbolKind::Method, arguments);
    build::qualified(cx.tree, receiver, call)
}

fn extension_call(cx: &mut ConversionCx<'_>, fq: &str, arguments: Vec<NodeId>) -> NodeId {
    let mut arguments = arguments.into_iter();
    match arguments.next() {
        Some(receiver) => call_on(cx, receiver, fq, arguments.collect()),
        // Arity filters keep zero-argument calls away from extensions.
        None => call(cx, fq, SymbolKind::Method, Vec::new()),
    }
}

/// `Int.MAX_VALUE` for a companion member, the bare member otherwise.
fn companion_qualified(cx: &mut ConversionCx<'_>, fq: &str, member: NodeId) -> NodeId {
    let Some((class_fq, _)) = fq.split_once(".Companion.") else {
        return member;
    };
    let class = cx.multiverse_symbol(class_fq, SymbolKind::Class);
    let name = cx.intern(short_name(class_fq));
    let receiver = build::reference(cx.tree, name, class);
    build::qualified(cx.tree, receiver, member)
}

// Custom builders

/// Stand-in for a call the arity filters should have kept away.
fn stub(cx: &mut ConversionCx<'_>, arguments: Vec<NodeId>) -> NodeId {
    for argument in arguments {
        cx.tree.invalidate(argument);
    }
    cx.tree.alloc(NodeKind::StubExpression)
}

/// The implicit lambda parameter.
fn implicit_it(cx: &mut ConversionCx<'_>) -> NodeId {
    let name = cx.intern("it");
    let symbol = cx.symbols.unresolved(name);
    build::reference(cx.tree, name, symbol)
}

fn lambda(cx: &mut ConversionCx<'_>, body: NodeId) -> NodeId {
    cx.tree.alloc(NodeKind::Lambda {
        parameters: Vec::new(),
        body,
    })
}

/// Value of an integer constant, looking through sign and parentheses.
fn int_constant(tree: &Tree, id: NodeId) -> Option<i64> {
    match tree.kind(id) {
        NodeKind::Literal {
            kind: LiteralKind::Int,
            text,
        } => text.parse().ok(),
        NodeKind::Prefix {
            op: PrefixOp::Minus,
            operand,
        } => int_constant(tree, *operand).map(|value| -value),
        NodeKind::Parenthesized { expression } => int_constant(tree, *expression),
        _ => None,
    }
}

/// `Integer.valueOf(s)` → `s.toInt()`; `Integer.valueOf(i)` → `i`.
fn value_of(
    cx: &mut ConversionCx<'_>,
    entry: &BuiltinMember,
    _: Option<NodeId>,
    arguments: Vec<NodeId>,
) -> NodeId {
    let mut arguments = arguments.into_iter();
    let Some(first) = arguments.next() else {
        return stub(cx, Vec::new());
    };
    let is_string = cx
        .type_of(first)
        .is_some_and(|ty| cx.context.types.is_string(&ty));
    if !is_string {
        return first;
    }
    let class = entry
        .from
        .rsplit('.')
        .nth(1)
        .map(|boxed| match boxed {
            "Integer" => "Int",
            "Character" => "Char",
            other => other,
        })
        .unwrap_or("Int");
    call_on(cx, first, &format!("kotlin.text.to{class}"), arguments.collect())
}

/// `new String()` → `""`, `new String("s")` → `"s"`, otherwise the
/// `String(..)` factory.
fn new_string(
    cx: &mut ConversionCx<'_>,
    _: &BuiltinMember,
    _: Option<NodeId>,
    arguments: Vec<NodeId>,
) -> NodeId {
    if arguments.is_empty() {
        return build::literal(cx.tree, LiteralKind::String, "\"\"");
    }
    if let [only] = arguments[..] {
        if matches!(
            cx.tree.kind(only),
            NodeKind::Literal {
                kind: LiteralKind::String,
                ..
            }
        ) {
            return only;
        }
    }
    call(cx, "kotlin.text.String", SymbolKind::Method, arguments)
}

/// `Character.digit(c, radix)` → `(c.digitToIntOrNull(radix) ?: -1)`.
fn digit(
    cx: &mut ConversionCx<'_>,
    _: &BuiltinMember,
    _: Option<NodeId>,
    arguments: Vec<NodeId>,
) -> NodeId {
    let [c, radix] = arguments[..] else {
        return stub(cx, arguments);
    };
    let decimal = int_constant(cx.tree, radix) == Some(10);
    let radix = if decimal {
        cx.tree.invalidate(radix);
        Vec::new()
    } else {
        vec![radix]
    };
    let value = call_on(cx, c, "kotlin.text.digitToIntOrNull", radix);
    let fallback = build::int_literal(cx.tree, -1);
    let elvis = build::binary(cx.tree, value, BinaryOp::Elvis, fallback);
    build::parenthesized(cx.tree, elvis)
}

/// `x.wait()` → `(x as java.lang.Object).wait()`. `Any` has no monitor
/// methods.
fn object_monitor(
    cx: &mut ConversionCx<'_>,
    entry: &BuiltinMember,
    receiver: Option<NodeId>,
    arguments: Vec<NodeId>,
) -> NodeId {
    let receiver = match receiver {
        Some(receiver) => receiver,
        None => cx.tree.alloc(NodeKind::This { qualifier: None }),
    };
    let context = cx.context;
    let object = context
        .types
        .class(cx.symbols, "java.lang.Object", Vec::new(), Nullability::NotNull);
    let ty = build::type_element(cx.tree, object);
    let cast = cx.tree.alloc(NodeKind::TypeCast {
        expression: receiver,
        ty,
    });
    let cast = build::parenthesized(cx.tree, cast);
    let symbol = cx.multiverse_symbol(entry.from, SymbolKind::Method);
    let name = cx.intern(short_name(entry.from));
    let call = build::call(cx.tree, name, symbol, arguments);
    build::qualified(cx.tree, cast, call)
}

/// `Enum.valueOf(Color.class, name)` → `enumValueOf<Color>(name)`.
fn enum_value_of(
    cx: &mut ConversionCx<'_>,
    _: &BuiltinMember,
    _: Option<NodeId>,
    arguments: Vec<NodeId>,
) -> NodeId {
    let [class, name] = arguments[..] else {
        return stub(cx, arguments);
    };
    let NodeKind::ClassLiteral { ty } = *cx.tree.kind(class) else {
        return stub(cx, arguments);
    };
    let ty = cx.tree.detach(class, ty);
    cx.tree.invalidate(class);
    let call = call(cx, "kotlin.enumValueOf", SymbolKind::Method, vec![name]);
    if let NodeKind::Call { type_arguments, .. } = *cx.tree.kind(call) {
        cx.tree.push_child(type_arguments, ty);
    }
    call
}

/// `a.concat(b)` → `(a + b)`.
fn concat(
    cx: &mut ConversionCx<'_>,
    _: &BuiltinMember,
    receiver: Option<NodeId>,
    arguments: Vec<NodeId>,
) -> NodeId {
    let Some(left) = receiver else {
        return stub(cx, arguments);
    };
    let [right] = arguments[..] else {
        return stub(cx, arguments);
    };
    let sum = build::binary(cx.tree, left, BinaryOp::Add, right);
    build::parenthesized(cx.tree, sum)
}

/// `s.split(p, limit)` → `s.split(p.toRegex(), limit).toTypedArray()`.
///
/// Java drops trailing empty strings when the limit is zero or absent and
/// treats a negative limit as none; a limit only known at run time is
/// clamped at zero.
fn split(
    cx: &mut ConversionCx<'_>,
    _: &BuiltinMember,
    receiver: Option<NodeId>,
    arguments: Vec<NodeId>,
) -> NodeId {
    let Some(receiver) = receiver else {
        return stub(cx, arguments);
    };
    let Some(&pattern) = arguments.first() else {
        return stub(cx, arguments);
    };
    let limit = arguments.get(1).copied();
    let pattern = call_on(cx, pattern, "kotlin.text.toRegex", Vec::new());
    let constant = limit.and_then(|limit| int_constant(cx.tree, limit));
    let (split_arguments, drop_empty) = match (limit, constant) {
        (None, _) => (vec![pattern], true),
        (Some(limit), Some(value)) if value <= 0 => {
            cx.tree.invalidate(limit);
            (vec![pattern], value == 0)
        }
        (Some(limit), Some(_)) => (vec![pattern, limit], false),
        (Some(limit), None) => {
            let zero = build::int_literal(cx.tree, 0);
            let limit = call_on(cx, limit, "kotlin.ranges.coerceAtLeast", vec![zero]);
            (vec![pattern, limit], false)
        }
    };
    let mut parts = call_on(cx, receiver, "kotlin.text.split", split_arguments);
    if drop_empty {
        let it = implicit_it(cx);
        let is_empty = call_on(cx, it, "kotlin.text.isEmpty", Vec::new());
        let predicate = lambda(cx, is_empty);
        parts = call_on(cx, parts, "kotlin.collections.dropLastWhile", vec![predicate]);
    }
    call_on(cx, parts, "kotlin.collections.toTypedArray", Vec::new())
}

/// `s.trim()` → `s.trim { it <= ' ' }`. Java trims control characters, not
/// just whitespace.
fn trim(
    cx: &mut ConversionCx<'_>,
    _: &BuiltinMember,
    receiver: Option<NodeId>,
    arguments: Vec<NodeId>,
) -> NodeId {
    let Some(receiver) = receiver else {
        return stub(cx, arguments);
    };
    let it = implicit_it(cx);
    let space = build::literal(cx.tree, LiteralKind::Char, "' '");
    let test = build::binary(cx.tree, it, BinaryOp::Le, space);
    let predicate = lambda(cx, test);
    call_on(cx, receiver, "kotlin.text.trim", vec![predicate])
}

/// `s.lines()` → `s.lineSequence().asStream()`.
fn lines(
    cx: &mut ConversionCx<'_>,
    _: &BuiltinMember,
    receiver: Option<NodeId>,
    arguments: Vec<NodeId>,
) -> NodeId {
    let Some(receiver) = receiver else {
        return stub(cx, arguments);
    };
    let sequence = call_on(cx, receiver, "kotlin.text.lineSequence", arguments);
    call_on(cx, sequence, "kotlin.streams.asStream", Vec::new())
}
