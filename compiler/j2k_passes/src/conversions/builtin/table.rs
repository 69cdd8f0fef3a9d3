//! The Java → Kotlin member table.
//!
//! Entries with the same `from` are tried in order; put the narrower one
//! first.

use super::Arity::{Between, Exactly};
use super::ArgumentTransform::{
    AppendIgnoreCase, DropAll, FirstToCharset, FirstToLast, FirstToRegex, GetCharsOrder,
};
use super::ArgumentType::{Char, CharArray, ClassLiteral, Int, NewArray, NotArray};
use super::Target::{Custom, ExtensionMethod, Field, Method};
use super::{
    concat, digit, enum_value_of, lines, new_string, object_monitor, split, trim, value_of,
    ArgumentType, BuiltinMember, Target,
};
use crate::ApiVersion;

const KOTLIN_1_8: ApiVersion = ApiVersion::new(1, 8);

const fn method(from: &'static str, target: Target) -> BuiltinMember {
    BuiltinMember::method(from, target)
}

/// Static Java method to a top-level Kotlin function.
const fn function(from: &'static str, to: &'static str) -> BuiltinMember {
    BuiltinMember::method(from, Method(to)).with_qualifier()
}

/// Static Java method whose first argument becomes the receiver.
const fn extension(from: &'static str, to: &'static str) -> BuiltinMember {
    BuiltinMember::method(from, ExtensionMethod(to))
        .with_qualifier()
        .arity(Between(1, usize::MAX))
}

/// Getter to property: `x.getFoo()` → `x.foo`.
const fn property(from: &'static str, to: &'static str) -> BuiltinMember {
    BuiltinMember::method(from, Field(to)).arity(Exactly(0))
}

/// `Integer.MAX_VALUE` → `Int.MAX_VALUE`.
const fn constant(from: &'static str, to: &'static str) -> BuiltinMember {
    BuiltinMember::field(from, Field(to)).with_qualifier()
}

const VALUE_OF: Target = Custom {
    name: "kotlin.text.toX",
    build: value_of,
};

/// `wait`, `notify` and `notifyAll` through a `java.lang.Object` cast.
const fn monitor(from: &'static str) -> BuiltinMember {
    BuiltinMember::method(
        from,
        Custom {
            name: "(as java.lang.Object)",
            build: object_monitor,
        },
    )
    .with_qualifier()
    .receiver_not_cast_to_object()
}

pub static BUILTIN_MEMBERS: &[BuiltinMember] = &[
    // Boxed primitives
    extension("java.lang.Integer.parseInt", "kotlin.text.toInt").arity(Between(1, 2)),
    extension("java.lang.Long.parseLong", "kotlin.text.toLong").arity(Between(1, 2)),
    extension("java.lang.Short.parseShort", "kotlin.text.toShort").arity(Between(1, 2)),
    extension("java.lang.Byte.parseByte", "kotlin.text.toByte").arity(Between(1, 2)),
    extension("java.lang.Double.parseDouble", "kotlin.text.toDouble").arity(Exactly(1)),
    extension("java.lang.Float.parseFloat", "kotlin.text.toFloat").arity(Exactly(1)),
    extension("java.lang.Boolean.parseBoolean", "kotlin.text.toBoolean").arity(Exactly(1)),
    method("java.lang.Integer.valueOf", VALUE_OF).with_qualifier().arity(Between(1, 2)),
    method("java.lang.Long.valueOf", VALUE_OF).with_qualifier().arity(Between(1, 2)),
    method("java.lang.Short.valueOf", VALUE_OF).with_qualifier().arity(Between(1, 2)),
    method("java.lang.Byte.valueOf", VALUE_OF).with_qualifier().arity(Between(1, 2)),
    method("java.lang.Double.valueOf", VALUE_OF).with_qualifier().arity(Exactly(1)),
    method("java.lang.Float.valueOf", VALUE_OF).with_qualifier().arity(Exactly(1)),
    method("java.lang.Boolean.valueOf", VALUE_OF).with_qualifier().arity(Exactly(1)),
    extension("java.lang.Integer.toString", "kotlin.toString").arity(Exactly(1)),
    extension("java.lang.Integer.toString", "kotlin.text.toString").arity(Exactly(2)),
    extension("java.lang.Long.toString", "kotlin.toString").arity(Exactly(1)),
    extension("java.lang.Long.toString", "kotlin.text.toString").arity(Exactly(2)),
    extension("java.lang.Boolean.toString", "kotlin.toString").arity(Exactly(1)),
    // `Character.toString(int)` takes a code point.
    extension("java.lang.Character.toString", "kotlin.toString")
        .arity(Exactly(1))
        .first_argument(Char),
    extension("java.lang.Byte.toString", "kotlin.toString").arity(Exactly(1)),
    extension("java.lang.Short.toString", "kotlin.toString").arity(Exactly(1)),
    extension("java.lang.Float.toString", "kotlin.toString").arity(Exactly(1)),
    extension("java.lang.Double.toString", "kotlin.toString").arity(Exactly(1)),
    method("java.lang.Number.intValue", Method("kotlin.Number.toInt")).arity(Exactly(0)),
    method("java.lang.Number.longValue", Method("kotlin.Number.toLong")).arity(Exactly(0)),
    method("java.lang.Number.shortValue", Method("kotlin.Number.toShort")).arity(Exactly(0)),
    method("java.lang.Number.byteValue", Method("kotlin.Number.toByte")).arity(Exactly(0)),
    method("java.lang.Number.doubleValue", Method("kotlin.Number.toDouble")).arity(Exactly(0)),
    method("java.lang.Number.floatValue", Method("kotlin.Number.toFloat")).arity(Exactly(0)),
    constant("java.lang.Integer.MAX_VALUE", "kotlin.Int.Companion.MAX_VALUE"),
    constant("java.lang.Integer.MIN_VALUE", "kotlin.Int.Companion.MIN_VALUE"),
    constant("java.lang.Long.MAX_VALUE", "kotlin.Long.Companion.MAX_VALUE"),
    constant("java.lang.Long.MIN_VALUE", "kotlin.Long.Companion.MIN_VALUE"),
    constant("java.lang.Short.MAX_VALUE", "kotlin.Short.Companion.MAX_VALUE"),
    constant("java.lang.Short.MIN_VALUE", "kotlin.Short.Companion.MIN_VALUE"),
    constant("java.lang.Byte.MAX_VALUE", "kotlin.Byte.Companion.MAX_VALUE"),
    constant("java.lang.Byte.MIN_VALUE", "kotlin.Byte.Companion.MIN_VALUE"),
    constant("java.lang.Double.MAX_VALUE", "kotlin.Double.Companion.MAX_VALUE"),
    constant("java.lang.Double.MIN_VALUE", "kotlin.Double.Companion.MIN_VALUE"),
    constant("java.lang.Double.NaN", "kotlin.Double.Companion.NaN"),
    constant("java.lang.Double.POSITIVE_INFINITY", "kotlin.Double.Companion.POSITIVE_INFINITY"),
    constant("java.lang.Double.NEGATIVE_INFINITY", "kotlin.Double.Companion.NEGATIVE_INFINITY"),
    constant("java.lang.Float.MAX_VALUE", "kotlin.Float.Companion.MAX_VALUE"),
    constant("java.lang.Float.MIN_VALUE", "kotlin.Float.Companion.MIN_VALUE"),
    constant("java.lang.Float.NaN", "kotlin.Float.Companion.NaN"),
    constant("java.lang.Float.POSITIVE_INFINITY", "kotlin.Float.Companion.POSITIVE_INFINITY"),
    constant("java.lang.Float.NEGATIVE_INFINITY", "kotlin.Float.Companion.NEGATIVE_INFINITY"),
    constant("java.lang.Character.MAX_VALUE", "kotlin.Char.Companion.MAX_VALUE"),
    constant("java.lang.Character.MIN_VALUE", "kotlin.Char.Companion.MIN_VALUE"),
    // Characters
    extension("java.lang.Character.isDigit", "kotlin.text.isDigit").arity(Exactly(1)),
    extension("java.lang.Character.isLetter", "kotlin.text.isLetter").arity(Exactly(1)),
    extension("java.lang.Character.isLetterOrDigit", "kotlin.text.isLetterOrDigit").arity(Exactly(1)),
    extension("java.lang.Character.isWhitespace", "kotlin.text.isWhitespace").arity(Exactly(1)),
    extension("java.lang.Character.isUpperCase", "kotlin.text.isUpperCase").arity(Exactly(1)),
    extension("java.lang.Character.isLowerCase", "kotlin.text.isLowerCase").arity(Exactly(1)),
    extension("java.lang.Character.toUpperCase", "kotlin.text.uppercaseChar")
        .arity(Exactly(1))
        .since(ApiVersion::KOTLIN_1_5),
    extension("java.lang.Character.toUpperCase", "kotlin.text.toUpperCase").arity(Exactly(1)),
    extension("java.lang.Character.toLowerCase", "kotlin.text.lowercaseChar")
        .arity(Exactly(1))
        .since(ApiVersion::KOTLIN_1_5),
    extension("java.lang.Character.toLowerCase", "kotlin.text.toLowerCase").arity(Exactly(1)),
    extension("java.lang.Character.toTitleCase", "kotlin.text.titlecaseChar")
        .arity(Exactly(1))
        .since(ApiVersion::KOTLIN_1_5),
    extension("java.lang.Character.toTitleCase", "kotlin.text.toTitleCase").arity(Exactly(1)),
    method(
        "java.lang.Character.digit",
        Custom {
            name: "kotlin.text.digitToIntOrNull",
            build: digit,
        },
    )
    .with_qualifier()
    .arity(Exactly(2))
    .since(ApiVersion::KOTLIN_1_5),
    // Object
    property("java.lang.Object.getClass", "kotlin.jvm.javaClass"),
    monitor("java.lang.Object.notify").arity(Exactly(0)),
    monitor("java.lang.Object.notifyAll").arity(Exactly(0)),
    monitor("java.lang.Object.wait").arity(Between(0, 2)),
    // Collections
    property("java.util.Collection.size", "kotlin.collections.Collection.size"),
    property("java.util.List.size", "kotlin.collections.List.size"),
    property("java.util.Set.size", "kotlin.collections.Set.size"),
    property("java.util.Map.size", "kotlin.collections.Map.size"),
    property("java.util.Map.entrySet", "kotlin.collections.Map.entries"),
    property("java.util.Map.keySet", "kotlin.collections.Map.keys"),
    property("java.util.Map.values", "kotlin.collections.Map.values"),
    property("java.util.Map.Entry.getKey", "kotlin.collections.Map.Entry.key"),
    property("java.util.Map.Entry.getValue", "kotlin.collections.Map.Entry.value"),
    method("java.util.List.remove", Method("kotlin.collections.MutableList.removeAt"))
        .arity(Exactly(1))
        .first_argument(Int),
    method("java.util.List.replaceAll", Method("kotlin.collections.MutableList.replaceAll"))
        .arity(Exactly(1)),
    method("java.util.Collection.remove", Method("kotlin.collections.MutableCollection.remove"))
        .arity(Exactly(1)),
    method("java.util.Collection.removeIf", Method("kotlin.collections.MutableCollection.removeIf"))
        .arity(Exactly(1)),
    method("java.lang.Iterable.forEach", Method("kotlin.collections.forEach")).arity(Exactly(1)),
    // `c.toArray(new T[0])` only sizes the result.
    method("java.util.Collection.toArray", Method("kotlin.collections.toTypedArray")).arity(Exactly(0)),
    method("java.util.Collection.toArray", Method("kotlin.collections.toTypedArray"))
        .arity(Exactly(1))
        .first_argument(NewArray)
        .arguments(DropAll),
    function("java.util.List.of", "kotlin.collections.listOf"),
    function("java.util.Set.of", "kotlin.collections.setOf"),
    function("java.util.Collections.emptyList", "kotlin.collections.emptyList").arity(Exactly(0)),
    function("java.util.Collections.emptySet", "kotlin.collections.emptySet").arity(Exactly(0)),
    function("java.util.Collections.emptyMap", "kotlin.collections.emptyMap").arity(Exactly(0)),
    function("java.util.Collections.singletonList", "kotlin.collections.listOf").arity(Exactly(1)),
    function("java.util.Collections.singleton", "kotlin.collections.setOf").arity(Exactly(1)),
    // `Arrays.asList(array)` views the array; only literal elements become a list.
    function("java.util.Arrays.asList", "kotlin.collections.mutableListOf").first_argument(NotArray),
    extension("java.util.Arrays.toString", "kotlin.collections.contentToString").arity(Exactly(1)),
    extension("java.util.Arrays.equals", "kotlin.collections.contentEquals").arity(Exactly(2)),
    extension("java.util.Arrays.hashCode", "kotlin.collections.contentHashCode").arity(Exactly(1)),
    extension("java.util.Arrays.copyOf", "kotlin.collections.copyOf").arity(Exactly(2)),
    extension("java.util.Arrays.deepEquals", "kotlin.collections.contentDeepEquals").arity(Exactly(2)),
    extension("java.util.Arrays.deepHashCode", "kotlin.collections.contentDeepHashCode")
        .arity(Exactly(1)),
    extension("java.util.Arrays.deepToString", "kotlin.collections.contentDeepToString")
        .arity(Exactly(1)),
    // Enums and exceptions
    property("java.lang.Enum.name", "kotlin.Enum.name"),
    property("java.lang.Enum.ordinal", "kotlin.Enum.ordinal"),
    method(
        "java.lang.Enum.valueOf",
        Custom {
            name: "kotlin.enumValueOf",
            build: enum_value_of,
        },
    )
    .with_qualifier()
    .arity(Exactly(2))
    .first_argument(ClassLiteral),
    property("java.lang.Throwable.getMessage", "kotlin.Throwable.message"),
    property("java.lang.Throwable.getCause", "kotlin.Throwable.cause"),
    // Strings
    property("java.lang.String.length", "kotlin.String.length"),
    property("java.lang.CharSequence.length", "kotlin.CharSequence.length"),
    method("java.lang.String.charAt", Method("kotlin.String.get")).arity(Exactly(1)),
    method("java.lang.CharSequence.charAt", Method("kotlin.CharSequence.get")).arity(Exactly(1)),
    method("java.lang.String.strip", Method("kotlin.text.trim")).arity(Exactly(0)),
    method("java.lang.String.stripLeading", Method("kotlin.text.trimStart")).arity(Exactly(0)),
    method("java.lang.String.stripTrailing", Method("kotlin.text.trimEnd")).arity(Exactly(0)),
    method("java.lang.String.toUpperCase", Method("kotlin.text.uppercase"))
        .arity(Exactly(0))
        .since(ApiVersion::KOTLIN_1_5),
    method("java.lang.String.toUpperCase", Method("kotlin.text.toUpperCase")).arity(Exactly(0)),
    method("java.lang.String.toLowerCase", Method("kotlin.text.lowercase"))
        .arity(Exactly(0))
        .since(ApiVersion::KOTLIN_1_5),
    method("java.lang.String.toLowerCase", Method("kotlin.text.toLowerCase")).arity(Exactly(0)),
    method("java.lang.String.getBytes", Method("kotlin.text.toByteArray")).arity(Exactly(0)),
    method("java.lang.String.getBytes", Method("kotlin.text.toByteArray"))
        .arity(Exactly(1))
        .first_argument(ArgumentType::String)
        .arguments(FirstToCharset),
    method("java.lang.String.getBytes", Method("kotlin.text.toByteArray")).arity(Exactly(1)),
    method("java.lang.String.getChars", Method("kotlin.text.toCharArray"))
        .arity(Exactly(4))
        .arguments(GetCharsOrder),
    method("java.lang.String.indexOf", Method("kotlin.text.indexOf")).arity(Between(1, 2)),
    method("java.lang.String.lastIndexOf", Method("kotlin.text.lastIndexOf")).arity(Between(1, 2)),
    method("java.lang.String.equalsIgnoreCase", Method("kotlin.text.equals"))
        .arity(Exactly(1))
        .arguments(AppendIgnoreCase),
    method("java.lang.String.compareToIgnoreCase", Method("kotlin.text.compareTo"))
        .arity(Exactly(1))
        .arguments(AppendIgnoreCase),
    // The five-argument form leads with `ignoreCase`; Kotlin takes it last.
    method("java.lang.String.regionMatches", Method("kotlin.text.regionMatches"))
        .arity(Exactly(5))
        .arguments(FirstToLast),
    method("java.lang.String.regionMatches", Method("kotlin.text.regionMatches")).arity(Exactly(4)),
    method(
        "java.lang.String.concat",
        Custom {
            name: "kotlin.String.plus",
            build: concat,
        },
    )
    .arity(Exactly(1)),
    method(
        "java.lang.String.split",
        Custom {
            name: "kotlin.text.split",
            build: split,
        },
    )
    .arity(Between(1, 2)),
    method(
        "java.lang.String.trim",
        Custom {
            name: "kotlin.text.trim",
            build: trim,
        },
    )
    .arity(Exactly(0)),
    method(
        "java.lang.String.lines",
        Custom {
            name: "kotlin.text.lineSequence",
            build: lines,
        },
    )
    .arity(Exactly(0)),
    method("java.lang.String.matches", Method("kotlin.text.matches"))
        .arity(Exactly(1))
        .arguments(FirstToRegex),
    method("java.lang.String.replaceAll", Method("kotlin.text.replace"))
        .arity(Exactly(2))
        .arguments(FirstToRegex),
    method("java.lang.String.replaceFirst", Method("kotlin.text.replaceFirst"))
        .arity(Exactly(2))
        .arguments(FirstToRegex),
    // `String.valueOf(chars)` copies the array; anything else is `toString()`.
    function("java.lang.String.valueOf", "kotlin.text.String")
        .arity(Exactly(1))
        .first_argument(CharArray),
    extension("java.lang.String.valueOf", "kotlin.toString").arity(Exactly(1)),
    function("java.lang.String.copyValueOf", "kotlin.text.String").first_argument(CharArray),
    extension("java.lang.String.format", "kotlin.text.format").first_argument(ArgumentType::String),
    BuiltinMember::constructor(
        "kotlin.String",
        Custom {
            name: "kotlin.text.String",
            build: new_string,
        },
    ),
    // Console
    function("java.io.PrintStream.println", "kotlin.io.println").receiver("java.lang.System.out"),
    function("java.io.PrintStream.print", "kotlin.io.print").receiver("java.lang.System.out"),
    // Math
    function("java.lang.Math.abs", "kotlin.math.abs"),
    function("java.lang.Math.acos", "kotlin.math.acos"),
    function("java.lang.Math.asin", "kotlin.math.asin"),
    function("java.lang.Math.atan", "kotlin.math.atan"),
    function("java.lang.Math.atan2", "kotlin.math.atan2"),
    function("java.lang.Math.cbrt", "kotlin.math.cbrt").since(KOTLIN_1_8),
    function("java.lang.Math.ceil", "kotlin.math.ceil"),
    function("java.lang.Math.cos", "kotlin.math.cos"),
    function("java.lang.Math.cosh", "kotlin.math.cosh"),
    function("java.lang.Math.exp", "kotlin.math.exp"),
    function("java.lang.Math.expm1", "kotlin.math.expm1"),
    function("java.lang.Math.floor", "kotlin.math.floor"),
    function("java.lang.Math.hypot", "kotlin.math.hypot"),
    function("java.lang.Math.log", "kotlin.math.ln"),
    function("java.lang.Math.log1p", "kotlin.math.ln1p"),
    function("java.lang.Math.log10", "kotlin.math.log10"),
    function("java.lang.Math.max", "kotlin.math.max"),
    function("java.lang.Math.min", "kotlin.math.min"),
    function("java.lang.Math.rint", "kotlin.math.round"),
    function("java.lang.Math.signum", "kotlin.math.sign"),
    function("java.lang.Math.sin", "kotlin.math.sin"),
    function("java.lang.Math.sinh", "kotlin.math.sinh"),
    function("java.lang.Math.sqrt", "kotlin.math.sqrt"),
    function("java.lang.Math.tan", "kotlin.math.tan"),
    function("java.lang.Math.tanh", "kotlin.math.tanh"),
    extension("java.lang.Math.pow", "kotlin.math.pow").arity(Exactly(2)),
    extension("java.lang.Math.IEEEremainder", "kotlin.math.IEEErem").arity(Exactly(2)),
    extension("java.lang.Math.copySign", "kotlin.math.withSign").arity(Exactly(2)),
    extension("java.lang.Math.nextUp", "kotlin.math.nextUp").arity(Exactly(1)),
    extension("java.lang.Math.nextDown", "kotlin.math.nextDown").arity(Exactly(1)),
    extension("java.lang.Math.nextAfter", "kotlin.math.nextTowards").arity(Exactly(2)),
];
