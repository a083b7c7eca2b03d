//! Declared property types and the structural type checker
//!
//! A [`TypeSpec`] describes what a property accepts. Containers may carry
//! element parameters (`list[str]`, `dict[str, int]`) but only the container
//! kind is checked; element types are documentation. Alternative sets
//! ([`TypeSpec::Nullable`], [`TypeSpec::OneOf`]) accept a value when any
//! alternative does.
//!
//! Type names round-trip through [`TypeSpec`]'s `Display` and the
//! [`TypeRegistry`] parser, which only knows the built-in names plus names
//! registered explicitly. Unknown names fail closed.

use crate::error::{Error, Result};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

// =============================================================================
// TypeSpec
// =============================================================================

/// Declared type of a property
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeSpec {
    /// UTF-8 string
    Str,
    /// Integer number (booleans and floats are rejected)
    Int,
    /// Floating point number (integers are rejected)
    Float,
    /// Boolean
    Bool,
    /// Sequence, optionally parameterized by its element type
    List(Option<Box<TypeSpec>>),
    /// Mapping, optionally parameterized by key and value types
    Dict(Option<Box<(TypeSpec, TypeSpec)>>),
    /// The null marker
    Null,
    /// `inner` or null
    Nullable(Box<TypeSpec>),
    /// Any of the alternatives
    OneOf(Vec<TypeSpec>),
}

impl TypeSpec {
    /// `list[element]`
    #[must_use]
    pub fn list_of(element: TypeSpec) -> Self {
        TypeSpec::List(Some(Box::new(element)))
    }

    /// `dict[key, value]`
    #[must_use]
    pub fn dict_of(key: TypeSpec, value: TypeSpec) -> Self {
        TypeSpec::Dict(Some(Box::new((key, value))))
    }

    /// `Optional[inner]`
    #[must_use]
    pub fn optional(inner: TypeSpec) -> Self {
        TypeSpec::Nullable(Box::new(inner))
    }

    /// `Union[alternatives...]`
    #[must_use]
    pub fn one_of(alternatives: impl IntoIterator<Item = TypeSpec>) -> Self {
        TypeSpec::OneOf(alternatives.into_iter().collect())
    }

    /// Whether this is an alternative set rather than a plain type
    #[must_use]
    pub fn is_alternative_set(&self) -> bool {
        matches!(self, TypeSpec::Nullable(_) | TypeSpec::OneOf(_))
    }

    /// Whether null is accepted
    #[must_use]
    pub fn accepts_null(&self) -> bool {
        match self {
            TypeSpec::Null | TypeSpec::Nullable(_) => true,
            TypeSpec::OneOf(alts) => alts.iter().any(TypeSpec::accepts_null),
            _ => false,
        }
    }

    /// Non-null leaf alternatives, with nested sets flattened
    #[must_use]
    pub fn alternatives(&self) -> Vec<&TypeSpec> {
        let mut out = Vec::new();
        self.collect_alternatives(&mut out);
        out
    }

    fn collect_alternatives<'a>(&'a self, out: &mut Vec<&'a TypeSpec>) {
        match self {
            TypeSpec::Null => {}
            TypeSpec::Nullable(inner) => inner.collect_alternatives(out),
            TypeSpec::OneOf(alts) => {
                for alt in alts {
                    alt.collect_alternatives(out);
                }
            }
            other => out.push(other),
        }
    }

    /// Structural instance check
    #[must_use]
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            TypeSpec::Nullable(_) | TypeSpec::OneOf(_) => {
                (value.is_null() && self.accepts_null())
                    || self.alternatives().iter().any(|alt| alt.matches_base(value))
            }
            plain => plain.matches_base(value),
        }
    }

    fn matches_base(&self, value: &Value) -> bool {
        match (self, value) {
            (TypeSpec::Str, Value::String(_))
            | (TypeSpec::Bool, Value::Bool(_))
            | (TypeSpec::List(_), Value::Array(_))
            | (TypeSpec::Dict(_), Value::Object(_))
            | (TypeSpec::Null, Value::Null) => true,
            (TypeSpec::Int, Value::Number(n)) => n.is_i64() || n.is_u64(),
            (TypeSpec::Float, Value::Number(n)) => n.is_f64(),
            _ => false,
        }
    }

    /// Expected-type text used in mismatch messages
    fn expected_text(&self) -> String {
        if self.is_alternative_set() {
            let names: Vec<String> = self.alternatives().iter().map(ToString::to_string).collect();
            format!("one of ({})", names.join(", "))
        } else {
            self.to_string()
        }
    }
}

impl fmt::Display for TypeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeSpec::Str => f.write_str("str"),
            TypeSpec::Int => f.write_str("int"),
            TypeSpec::Float => f.write_str("float"),
            TypeSpec::Bool => f.write_str("bool"),
            TypeSpec::List(None) => f.write_str("list"),
            TypeSpec::List(Some(elem)) => write!(f, "list[{elem}]"),
            TypeSpec::Dict(None) => f.write_str("dict"),
            TypeSpec::Dict(Some(kv)) => write!(f, "dict[{}, {}]", kv.0, kv.1),
            TypeSpec::Null => f.write_str("None"),
            TypeSpec::Nullable(inner) => write!(f, "Optional[{inner}]"),
            TypeSpec::OneOf(alts) => {
                f.write_str("Union[")?;
                for (i, alt) in alts.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{alt}")?;
                }
                f.write_str("]")
            }
        }
    }
}

impl FromStr for TypeSpec {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        TypeRegistry::new().resolve(s)
    }
}

/// Runtime type name of a value, as used in mismatch messages
#[must_use]
pub fn value_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "None",
        Value::Bool(_) => "bool",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "int",
        Value::String(_) => "str",
        Value::Array(_) => "list",
        Value::Object(_) => "dict",
    }
}

/// Check `value` against the declared type of property `name`
///
/// # Errors
///
/// Returns [`Error::TypeMismatch`] naming the property, the expected type
/// name(s) and the actual runtime type.
pub fn check_type(name: &str, value: &Value, spec: &TypeSpec) -> Result<()> {
    if spec.matches(value) {
        return Ok(());
    }
    Err(Error::TypeMismatch {
        key: name.to_string(),
        expected: spec.expected_text(),
        actual: value_type_name(value).to_string(),
    })
}

// =============================================================================
// Type Registry
// =============================================================================

/// Resolves type names found in interchange documents
///
/// Knows `str`, `int`, `float`, `bool`, `list`, `dict`, `tuple` (read as
/// `list`), `None`/`NoneType`, the generic forms `list[T]`, `dict[K, V]`,
/// `Optional[T]`, `Union[A, B]`, `A | B`, and any name added with
/// [`TypeRegistry::register`].
///
/// # Example
///
/// ```
/// use tyconf::{TypeRegistry, TypeSpec};
///
/// let registry = TypeRegistry::new().register("Port", TypeSpec::Int);
/// assert_eq!(registry.resolve("Optional[Port]").unwrap(), TypeSpec::optional(TypeSpec::Int));
/// assert!(registry.resolve("os.system").is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    custom: HashMap<String, TypeSpec>,
}

impl TypeRegistry {
    /// Registry with only the built-in names
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a custom type name
    #[must_use]
    pub fn register(mut self, name: impl Into<String>, spec: TypeSpec) -> Self {
        self.insert(name, spec);
        self
    }

    /// Add a custom type name in place
    pub fn insert(&mut self, name: impl Into<String>, spec: TypeSpec) {
        self.custom.insert(name.into(), spec);
    }

    /// Resolve a type name
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownType`] for names that are neither built in nor
    /// registered, and for malformed generic syntax.
    pub fn resolve(&self, name: &str) -> Result<TypeSpec> {
        let mut parser = TypeNameParser {
            input: name,
            pos: 0,
            depth: 0,
            registry: self,
        };
        let spec = parser.parse_union()?;
        parser.skip_ws();
        if parser.pos != name.len() {
            return Err(Error::UnknownType(name.to_string()));
        }
        Ok(spec)
    }

    fn lookup(&self, ident: &str, params: Vec<TypeSpec>, full: &str) -> Result<TypeSpec> {
        let unknown = || Error::UnknownType(full.to_string());
        let spec = match (ident, params.len()) {
            ("str", 0) => TypeSpec::Str,
            ("int", 0) => TypeSpec::Int,
            ("float", 0) => TypeSpec::Float,
            ("bool", 0) => TypeSpec::Bool,
            ("None" | "NoneType", 0) => TypeSpec::Null,
            ("list" | "List" | "tuple" | "Tuple", 0) => TypeSpec::List(None),
            ("list" | "List", 1) => {
                let mut params = params;
                TypeSpec::List(params.pop().map(Box::new))
            }
            // heterogeneous tuples have no single element type
            ("tuple" | "Tuple", _) => TypeSpec::List(None),
            ("dict" | "Dict", 0) => TypeSpec::Dict(None),
            ("dict" | "Dict", 2) => {
                let mut it = params.into_iter();
                match (it.next(), it.next()) {
                    (Some(k), Some(v)) => TypeSpec::dict_of(k, v),
                    _ => return Err(unknown()),
                }
            }
            ("Optional", 1) => {
                let mut params = params;
                match params.pop() {
                    Some(inner) => TypeSpec::optional(inner),
                    None => return Err(unknown()),
                }
            }
            ("Union", n) if n > 0 => TypeSpec::OneOf(params),
            (custom, 0) => self.custom.get(custom).cloned().ok_or_else(unknown)?,
            _ => return Err(unknown()),
        };
        Ok(spec)
    }
}

/// Deepest generic nesting accepted in a type name
const MAX_TYPE_DEPTH: usize = 32;

/// Recursive-descent parser for type names
struct TypeNameParser<'a> {
    input: &'a str,
    pos: usize,
    depth: usize,
    registry: &'a TypeRegistry,
}

impl TypeNameParser<'_> {
    fn error(&self) -> Error {
        Error::UnknownType(self.input.to_string())
    }

    fn skip_ws(&mut self) {
        while let Some(c) = self.peek() {
            if !c.is_whitespace() {
                break;
            }
            self.pos += c.len_utf8();
        }
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn eat(&mut self, expected: char) -> bool {
        self.skip_ws();
        if self.peek() == Some(expected) {
            self.pos += expected.len_utf8();
            true
        } else {
            false
        }
    }

    // union := term ('|' term)*
    fn parse_union(&mut self) -> Result<TypeSpec> {
        let first = self.parse_term()?;
        let mut alts = vec![first];
        while self.eat('|') {
            alts.push(self.parse_term()?);
        }
        if alts.len() == 1 {
            Ok(alts.remove(0))
        } else {
            Ok(TypeSpec::OneOf(alts))
        }
    }

    // term := ident ('[' union (',' union)* ']')?
    fn parse_term(&mut self) -> Result<TypeSpec> {
        self.skip_ws();
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c.is_alphanumeric() || c == '_' {
                self.pos += c.len_utf8();
            } else {
                break;
            }
        }
        if start == self.pos {
            return Err(self.error());
        }
        let ident = &self.input[start..self.pos];

        let mut params = Vec::new();
        if self.eat('[') {
            self.depth += 1;
            if self.depth > MAX_TYPE_DEPTH {
                return Err(self.error());
            }
            loop {
                // `tuple[int, ...]`
                self.skip_ws();
                if self.input[self.pos..].starts_with("...") {
                    self.pos += 3;
                } else {
                    params.push(self.parse_union()?);
                }
                if self.eat(',') {
                    continue;
                }
                if self.eat(']') {
                    break;
                }
                return Err(self.error());
            }
            self.depth -= 1;
        }

        self.registry.lookup(ident, params, self.input)
    }
}

// =============================================================================
// Tests
// =============================================================================
