//! Dynamic value model carried through [`OptionalValue`](crate::OptionalValue).
//!
//! Only [`Value::Object`] counts as "an object". Lists, strings, numbers,
//! booleans and null are all non-objects and read as empty through the wrapper.

use crate::object::{ObjectRef, Record};
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use serde_json::Number;

/// A dynamically typed value.
///
/// Equality on `Object` is handle identity: two distinct objects with the same
/// properties are not equal.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    List(Vec<Value>),
    Object(ObjectRef),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    pub fn as_object(&self) -> Option<&ObjectRef> {
        match self {
            Value::Object(object) => Some(object),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Number(n) => n.as_i64(),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => n.as_f64(),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// Loose truthiness as templates read it: null, `false`, zero, `""`, `"0"`
    /// and empty lists are falsy; objects are always truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
            Value::String(s) => !(s.is_empty() || s == "0"),
            Value::List(items) => !items.is_empty(),
            Value::Object(_) => true,
        }
    }

    /// Short type label used in log fields.
    pub fn type_name(&self) -> &str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::List(_) => "list",
            Value::Object(object) => object.class_name(),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(n.into())
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n.into())
    }
}

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        Value::Number(n.into())
    }
}

impl From<f64> for Value {
    /// Non-finite floats have no number representation and become `Null`.
    fn from(f: f64) -> Self {
        Number::from_f64(f).map(Value::Number).unwrap_or(Value::Null)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Null
    }
}

impl From<ObjectRef> for Value {
    fn from(object: ObjectRef) -> Self {
        Value::Object(object)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map(Into::into).unwrap_or(Value::Null)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

impl From<serde_json::Value> for Value {
    /// JSON objects become [`Record`]s of class `stdClass`; JSON arrays stay
    /// lists and are therefore non-objects.
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => Value::Number(n),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::List(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => {
                let record = map
                    .into_iter()
                    .fold(Record::new(Record::STD_CLASS), |record, (k, v)| {
                        record.with_property(k, Value::from(v))
                    });
                Value::Object(record.into_ref())
            }
        }
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        Tracked {
            value: self,
            ancestors: None,
        }
        .serialize(serializer)
    }
}

/// Objects currently being serialized, innermost first.
struct Ancestors<'a> {
    object: &'a ObjectRef,
    parent: Option<&'a Ancestors<'a>>,
}

impl Ancestors<'_> {
    fn contains(&self, object: &ObjectRef) -> bool {
        let mut link = Some(self);
        while let Some(current) = link {
            if current.object.ptr_eq(object) {
                return true;
            }
            link = current.parent;
        }
        false
    }
}

/// Serializes a value while rejecting objects that contain themselves.
/// The same object may still appear in sibling branches.
struct Tracked<'a> {
    value: &'a Value,
    ancestors: Option<&'a Ancestors<'a>>,
}

impl Serialize for Tracked<'_> {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self.value {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Number(n) => n.serialize(serializer),
            Value::String(s) => serializer.serialize_str(s),
            Value::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(&Tracked {
                        value: item,
                        ancestors: self.ancestors,
                    })?;
                }
                seq.end()
            }
            Value::Object(object) => {
                if self.ancestors.is_some_and(|a| a.contains(object)) {
                    return Err(<S::Error as serde::ser::Error>::custom(format!(
                        "recursive object of class {}",
                        object.class_name()
                    )));
                }
                let link = Ancestors {
                    object,
                    parent: self.ancestors,
                };
                let properties = object.properties();
                let mut map = serializer.serialize_map(Some(properties.len()))?;
                for (k, v) in &properties {
                    map.serialize_entry(
                        k,
                        &Tracked {
                            value: v,
                            ancestors: Some(&link),
                        },
                    )?;
                }
                map.end()
            }
        }
    }
}
