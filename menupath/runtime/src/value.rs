//! Dynamically typed call arguments and results.
//!
//! Commands are validated by the remote engine, not by the proxy, so every
//! leaf takes the same shape: an ordered list of positional [`Value`]s and
//! an ordered list of keyword arguments ([`Kwargs`]), bundled as
//! [`Arguments`].

use std::collections::BTreeMap;
use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A dynamically typed argument or result value.
///
/// ## Examples
///
/// ```
/// use menupath_runtime::Value;
///
/// assert_eq!(Value::from("part.stp").as_str(), Some("part.stp"));
/// assert_eq!(Value::from(true).as_bool(), Some(true));
/// assert_eq!(Value::from(vec![1, 2]), Value::List(vec![Value::Int(1), Value::Int(2)]));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Absence of a value.
    #[default]
    Null,
    /// Boolean flag.
    Bool(bool),
    /// Signed integer.
    Int(i64),
    /// Floating point number.
    Float(f64),
    /// Text.
    Str(String),
    /// Ordered list.
    List(Vec<Value>),
    /// String-keyed map.
    Map(BTreeMap<String, Value>),
}

impl Value {
    /// Returns `true` for [`Value::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns the boolean, if this is one.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the integer, if this is one.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the number as a float, widening integers.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            Self::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Returns the text, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the list items, if this is a list.
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Whether this value or anything nested in it is a NaN or infinite
    /// float, which JSON cannot represent.
    pub fn contains_non_finite(&self) -> bool {
        match self {
            Self::Float(f) => !f.is_finite(),
            Self::List(items) => items.iter().any(Value::contains_non_finite),
            Self::Map(map) => map.values().any(Value::contains_non_finite),
            _ => false,
        }
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Self::Null
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Self::Int(i64::from(i))
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<u32> for Value {
    fn from(i: u32) -> Self {
        Self::Int(i64::from(i))
    }
}

impl From<f32> for Value {
    fn from(f: f32) -> Self {
        Self::Float(f64::from(f))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Self::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Self::Int(i),
                None => Self::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => Self::Str(s),
            serde_json::Value::Array(items) => Self::List(items.into_iter().map(Into::into).collect()),
            serde_json::Value::Object(map) => {
                Self::Map(map.into_iter().map(|(k, v)| (k, v.into())).collect())
            }
        }
    }
}

/// Keyword arguments in caller order.
///
/// Keys are unique; inserting an existing key replaces its value in place.
/// Serializes as a map whose entries keep insertion order.
///
/// ## Examples
///
/// ```
/// use menupath_runtime::{Kwargs, Value};
///
/// let mut kwargs = Kwargs::new();
/// kwargs.insert("zeta", 1);
/// kwargs.insert("alpha", 2);
/// kwargs.insert("zeta", 3);
///
/// let keys: Vec<_> = kwargs.iter().map(|(k, _)| k).collect();
/// assert_eq!(keys, ["zeta", "alpha"]);
/// assert_eq!(kwargs.get("zeta"), Some(&Value::Int(3)));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Kwargs(Vec<(String, Value)>);

impl Kwargs {
    /// Creates an empty keyword list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a keyword argument.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        let key = key.into();
        let value = value.into();
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => *slot = value,
            None => self.0.push((key, value)),
        }
    }

    /// Looks up a keyword argument.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Iterates entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of keyword arguments.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if there are no keyword arguments.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Kwargs {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut kwargs = Self::new();
        for (k, v) in iter {
            kwargs.insert(k, v);
        }
        kwargs
    }
}

impl Serialize for Kwargs {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (k, v) in &self.0 {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Kwargs {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct KwargsVisitor;

        impl<'de> Visitor<'de> for KwargsVisitor {
            type Value = Kwargs;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of keyword arguments")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Kwargs, A::Error> {
                let mut kwargs = Kwargs::new();
                while let Some((key, value)) = access.next_entry::<String, Value>()? {
                    kwargs.insert(key, value);
                }
                Ok(kwargs)
            }
        }

        deserializer.deserialize_map(KwargsVisitor)
    }
}

/// Positional and keyword arguments for one leaf invocation.
///
/// Arguments are forwarded to the transport exactly as given: no coercion,
/// no reordering, no arity check.
///
/// ## Examples
///
/// ```
/// use menupath_runtime::{Arguments, Value};
///
/// let arguments = Arguments::new().arg("part.stp").kwarg("tessellate", true);
///
/// assert_eq!(arguments.args(), &[Value::from("part.stp")]);
/// assert_eq!(arguments.kwargs().get("tessellate"), Some(&Value::Bool(true)));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Arguments {
    #[serde(default)]
    args: Vec<Value>,
    #[serde(default)]
    kwargs: Kwargs,
}

impl Arguments {
    /// Creates an empty argument set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a positional argument (builder form).
    pub fn arg(mut self, value: impl Into<Value>) -> Self {
        self.push(value);
        self
    }

    /// Adds a keyword argument (builder form).
    pub fn kwarg(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Appends a positional argument.
    pub fn push(&mut self, value: impl Into<Value>) {
        self.args.push(value.into());
    }

    /// Inserts or replaces a keyword argument.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.kwargs.insert(key, value);
    }

    /// Positional arguments in call order.
    pub fn args(&self) -> &[Value] {
        &self.args
    }

    /// Keyword arguments in call order.
    pub fn kwargs(&self) -> &Kwargs {
        &self.kwargs
    }

    /// Splits into positional and keyword parts.
    pub fn into_parts(self) -> (Vec<Value>, Kwargs) {
        (self.args, self.kwargs)
    }
}

impl From<()> for Arguments {
    fn from(_: ()) -> Self {
        Self::new()
    }
}

impl From<Vec<Value>> for Arguments {
    fn from(args: Vec<Value>) -> Self {
        Self {
            args,
            kwargs: Kwargs::new(),
        }
    }
}

impl From<(Vec<Value>, Kwargs)> for Arguments {
    fn from((args, kwargs): (Vec<Value>, Kwargs)) -> Self {
        Self { args, kwargs }
    }
}

/// Builds [`Arguments`] from positional expressions and `key = value` pairs.
///
/// Positional arguments come first, separated from keyword arguments by `;`.
/// Keys must be valid Rust identifiers; use [`Arguments::kwarg`] for others.
///
/// ## Examples
///
/// ```
/// use menupath_runtime::{args, Value};
///
/// let arguments = args!("part.stp", 0.5; tessellate = true);
/// assert_eq!(arguments.args().len(), 2);
/// assert_eq!(arguments.kwargs().get("tessellate"), Some(&Value::Bool(true)));
///
/// assert!(args!().args().is_empty());
/// assert_eq!(args!(; quiet = true).kwargs().len(), 1);
/// ```
#[macro_export]
macro_rules! args {
    () => {
        $crate::Arguments::new()
    };
    ($($arg:expr),* $(,)? $(; $($key:ident = $val:expr),* $(,)?)?) => {{
        let mut arguments = $crate::Arguments::new();
        $( arguments.push($arg); )*
        $( $( arguments.insert(stringify!($key), $val); )* )?
        arguments
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn untagged_json_shapes() {
        let value: Value = serde_json::from_str(r#"[null, true, 3, 1.5, "x", {"a": 1}]"#).unwrap();
        let items = value.as_list().unwrap();
        assert!(items[0].is_null());
        assert_eq!(items[1], Value::Bool(true));
        assert_eq!(items[2], Value::Int(3));
        assert_eq!(items[3], Value::Float(1.5));
        assert_eq!(items[4], Value::from("x"));
        assert!(matches!(items[5], Value::Map(_)));
    }

    #[test]
    fn non_finite_floats_are_found_when_nested() {
        assert!(!Value::Float(1.5).contains_non_finite());
        assert!(Value::Float(f64::NAN).contains_non_finite());
        assert!(Value::from(vec![Value::Int(1), Value::Float(f64::INFINITY)]).contains_non_finite());

        let mut map = BTreeMap::new();
        map.insert("tolerance".to_string(), Value::Float(f64::NEG_INFINITY));
        assert!(Value::Map(map).contains_non_finite());
        assert!(!Value::from("nan").contains_non_finite());
    }

    #[test]
    fn kwargs_serialize_in_insertion_order() {
        let kwargs: Kwargs = [("zeta", 1), ("alpha", 2)].into_iter().collect();
        let json = serde_json::to_string(&kwargs).unwrap();
        assert_eq!(json, r#"{"zeta":1,"alpha":2}"#);
    }

    #[test]
    fn kwargs_deserialize_in_document_order() {
        let kwargs: Kwargs = serde_json::from_str(r#"{"zeta":1,"alpha":2}"#).unwrap();
        let keys: Vec<_> = kwargs.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["zeta", "alpha"]);
    }

    #[test]
    fn option_maps_to_null() {
        assert_eq!(Value::from(None::<i32>), Value::Null);
        assert_eq!(Value::from(Some(4)), Value::Int(4));
    }

    #[test]
    fn json_conversion_keeps_integers() {
        let json = serde_json::json!({"count": 3, "ratio": 0.25, "big": u64::MAX});
        let Value::Map(map) = Value::from(json) else {
            panic!("expected map");
        };
        assert_eq!(map["count"], Value::Int(3));
        assert_eq!(map["ratio"], Value::Float(0.25));
        assert!(matches!(map["big"], Value::Float(_)));
    }

    #[test]
    fn args_macro_mixes_positional_and_keyword() {
        let arguments = args!(1, "x"; k = true, n = 2);
        assert_eq!(arguments.args(), &[Value::Int(1), Value::from("x")]);
        let keys: Vec<_> = arguments.kwargs().iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["k", "n"]);
    }

    #[test]
    fn as_f64_widens_integers() {
        assert_eq!(Value::Int(2).as_f64(), Some(2.0));
        assert_eq!(Value::from("2").as_f64(), None);
    }
}
