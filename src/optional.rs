//! Null-safe forwarding facade.
//!
//! [`OptionalValue`] holds one [`Value`] and forwards property reads, existence
//! checks, method calls and string conversion to it when it is an object.
//! For anything else it answers with `Null`, `false` or `""` instead of failing,
//! so a template can write `user.get("address").get("city")` without checking
//! whether `user` exists.
//!
//! The [`make`] factory returns objects themselves (tagged with `empty = false`)
//! and wraps everything else. Both outcomes implement [`Access`].
//!
//! ```rust
//! use optional_value::{make, Access, Record, Value};
//!
//! let missing = make(Value::Null);
//! assert!(missing.is_empty());
//! assert_eq!(missing.get("name"), Value::Null);
//! assert_eq!(missing.call("greet", &[]).unwrap(), Value::Null);
//! assert_eq!(missing.to_text().unwrap(), "");
//!
//! let user = Record::new("User").with_property("name", "Ada").into_ref();
//! let present = make(user.clone());
//! assert!(present.as_object().is_some_and(|o| o.ptr_eq(&user)));
//! assert_eq!(user.property("empty"), Some(Value::Bool(false)));
//! assert_eq!(present.get("name"), Value::from("Ada"));
//! ```

use crate::object::{Object, ObjectRef};
use crate::utils::path;
use crate::{Result, Settings, Value};
use serde::Serialize;
use tracing::{debug, trace};

/// Name of the marker property answering "is this value absent?".
pub const EMPTY: &str = "empty";

/// Read/call interface shared by wrappers, passed-through objects and raw values.
pub trait Access {
    /// Property read. `"empty"` is synthesized unless the object sets its own.
    fn get(&self, key: &str) -> Value;

    /// Whether the property is present and not null.
    fn has(&self, key: &str) -> bool;

    /// Forward a method call; non-objects yield `Null`.
    fn call(&self, method: &str, args: &[Value]) -> Result<Value>;

    /// String form; non-objects yield `""`.
    fn to_text(&self) -> Result<String>;

    /// Positional read. Objects read the property named by the index; raw list
    /// values met inside a chain index into the list.
    fn at(&self, index: usize) -> Value {
        self.get(&index.to_string())
    }

    /// Truthiness of the `empty` read.
    fn is_empty(&self) -> bool {
        self.get(EMPTY).is_truthy()
    }

    /// Chained null-safe read, e.g. `"address.lines[0]"`.
    fn get_path(&self, path: &str) -> Value {
        path::resolve(self, path)
    }
}

fn read(object: Option<&ObjectRef>, key: &str) -> Value {
    match object {
        Some(object) if key == EMPTY && !object.is_set(EMPTY) => Value::Bool(false),
        Some(object) => object.property(key).unwrap_or_default(),
        None if key == EMPTY => Value::Bool(true),
        None => Value::Null,
    }
}

fn exists(object: Option<&ObjectRef>, key: &str) -> bool {
    object.is_some_and(|o| o.is_set(key))
}

fn invoke(object: Option<&ObjectRef>, method: &str, args: &[Value]) -> Result<Value> {
    match object {
        Some(object) => {
            trace!(class = object.class_name(), method, args = args.len(), "forwarding call");
            object.call_method(method, args)
        }
        None => Ok(Value::Null),
    }
}

fn stringify(object: Option<&ObjectRef>) -> Result<String> {
    match object {
        // Explicit: `Access::to_text` on `ObjectRef` comes back here.
        Some(object) => Object::to_text(&**object),
        None => Ok(String::new()),
    }
}

fn element(value: &Value, index: usize) -> Value {
    match value {
        Value::List(items) => items.get(index).cloned().unwrap_or_default(),
        other => read(other.as_object(), &index.to_string()),
    }
}

/// Wrapper around a possibly absent or non-object value.
///
/// The wrapped value cannot be replaced after construction.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct OptionalValue {
    value: Value,
}

impl OptionalValue {
    /// Wrap any value, objects included. Use [`OptionalValue::make`] to pass
    /// objects through instead.
    pub fn new(value: impl Into<Value>) -> Self {
        Self {
            value: value.into(),
        }
    }

    /// Same as the free [`make`].
    pub fn make(value: impl Into<Value>) -> Optional {
        make(value)
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn into_inner(self) -> Value {
        self.value
    }
}

impl Access for OptionalValue {
    fn get(&self, key: &str) -> Value {
        read(self.value.as_object(), key)
    }

    fn has(&self, key: &str) -> bool {
        exists(self.value.as_object(), key)
    }

    fn call(&self, method: &str, args: &[Value]) -> Result<Value> {
        invoke(self.value.as_object(), method, args)
    }

    fn to_text(&self) -> Result<String> {
        stringify(self.value.as_object())
    }

    /// A wrapped list stays opaque: only a wrapped object answers positional reads.
    fn at(&self, index: usize) -> Value {
        read(self.value.as_object(), &index.to_string())
    }
}

impl Access for Value {
    fn get(&self, key: &str) -> Value {
        read(self.as_object(), key)
    }

    fn has(&self, key: &str) -> bool {
        exists(self.as_object(), key)
    }

    fn call(&self, method: &str, args: &[Value]) -> Result<Value> {
        invoke(self.as_object(), method, args)
    }

    fn to_text(&self) -> Result<String> {
        stringify(self.as_object())
    }

    fn at(&self, index: usize) -> Value {
        element(self, index)
    }
}

impl Access for ObjectRef {
    fn get(&self, key: &str) -> Value {
        read(Some(self), key)
    }

    fn has(&self, key: &str) -> bool {
        exists(Some(self), key)
    }

    fn call(&self, method: &str, args: &[Value]) -> Result<Value> {
        invoke(Some(self), method, args)
    }

    fn to_text(&self) -> Result<String> {
        stringify(Some(self))
    }
}

/// Result of [`make`]: the object itself, or a wrapper around a non-object.
///
/// `Object` doubles as the "present" flag for objects that refuse the marker.
#[derive(Debug, Clone, PartialEq)]
pub enum Optional {
    Object(ObjectRef),
    Wrapped(OptionalValue),
}

impl Optional {
    pub fn as_object(&self) -> Option<&ObjectRef> {
        match self {
            Optional::Object(object) => Some(object),
            Optional::Wrapped(_) => None,
        }
    }

    pub fn is_object(&self) -> bool {
        matches!(self, Optional::Object(_))
    }

    pub fn into_value(self) -> Value {
        match self {
            Optional::Object(object) => Value::Object(object),
            Optional::Wrapped(wrapped) => wrapped.into_inner(),
        }
    }
}

impl Default for Optional {
    fn default() -> Self {
        make_default()
    }
}

impl From<Optional> for Value {
    fn from(optional: Optional) -> Self {
        optional.into_value()
    }
}

impl Access for Optional {
    fn get(&self, key: &str) -> Value {
        match self {
            Optional::Object(object) => object.get(key),
            Optional::Wrapped(wrapped) => wrapped.get(key),
        }
    }

    fn has(&self, key: &str) -> bool {
        match self {
            Optional::Object(object) => object.has(key),
            Optional::Wrapped(wrapped) => wrapped.has(key),
        }
    }

    fn call(&self, method: &str, args: &[Value]) -> Result<Value> {
        match self {
            Optional::Object(object) => object.call(method, args),
            Optional::Wrapped(wrapped) => wrapped.call(method, args),
        }
    }

    fn to_text(&self) -> Result<String> {
        match self {
            Optional::Object(object) => object.to_text(),
            Optional::Wrapped(wrapped) => wrapped.to_text(),
        }
    }

    fn at(&self, index: usize) -> Value {
        match self {
            Optional::Object(object) => object.at(index),
            Optional::Wrapped(wrapped) => wrapped.at(index),
        }
    }
}

/// Factory configured by [`Settings`].
#[derive(Debug, Clone, Default)]
pub struct Factory {
    settings: Settings,
}

impl Factory {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Objects come back as themselves, after the marker write below; anything
    /// else is wrapped.
    ///
    /// The marker write mutates the caller's object: `empty` becomes `false`
    /// unless the object already sets its own `empty`, which is kept so that
    /// `make(page).get("empty")` still answers the page's own value. With
    /// `overwrite_marker` on, every object is unconditionally overwritten with
    /// `false`, own value or not. Nothing is written when `tag_objects` is off.
    pub fn make(&self, value: impl Into<Value>) -> Optional {
        match value.into() {
            Value::Object(object) => {
                self.tag(&object);
                Optional::Object(object)
            }
            other => {
                trace!(kind = other.type_name(), "wrapping non-object");
                Optional::Wrapped(OptionalValue::new(other))
            }
        }
    }

    fn tag(&self, object: &ObjectRef) {
        if !self.settings.tag_objects {
            trace!(class = object.class_name(), "passing object through untagged");
            return;
        }
        if object.is_set(EMPTY) && !self.settings.overwrite_marker {
            trace!(class = object.class_name(), "object keeps its own empty marker");
            return;
        }
        if !object.set_property(EMPTY, Value::Bool(false)) {
            debug!(class = object.class_name(), "object refused the empty marker");
        }
    }
}

/// Pass objects through (tagged) and wrap everything else, with default settings.
pub fn make(value: impl Into<Value>) -> Optional {
    Factory::default().make(value)
}

/// `make` with nothing: an empty wrapper.
pub fn make_default() -> Optional {
    make(Value::Null)
}
