//! Object capability seam.
//!
//! Anything reachable through [`Value::Object`] implements [`Object`]:
//! property reads and writes, method dispatch by name, and string conversion.
//! [`Record`] is the ready-made dynamic implementation.

mod record;

pub use record::{Method, Record, ToText};

use crate::{Error, Result, Value};
use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

pub trait Object: Send + Sync {
    /// Class label used in error messages and log fields.
    fn class_name(&self) -> &str;

    /// Read a property. `None` when the property does not exist.
    fn property(&self, name: &str) -> Option<Value>;

    /// Write a property, returning whether the object accepted it.
    ///
    /// Objects with a fixed shape keep the default and refuse.
    fn set_property(&self, _name: &str, _value: Value) -> bool {
        false
    }

    /// Whether a property is present and not null.
    fn is_set(&self, name: &str) -> bool {
        matches!(self.property(name), Some(v) if !v.is_null())
    }

    /// Snapshot of all properties, used for serialization.
    fn properties(&self) -> Vec<(String, Value)> {
        Vec::new()
    }

    fn call_method(&self, method: &str, _args: &[Value]) -> Result<Value> {
        Err(Error::undefined_method(self.class_name(), method))
    }

    fn to_text(&self) -> Result<String> {
        Err(Error::not_stringable(self.class_name()))
    }
}

/// Shared handle to an object. Clones share the same object; equality is identity.
#[derive(Clone)]
pub struct ObjectRef(Arc<dyn Object>);

impl ObjectRef {
    pub fn new<T: Object + 'static>(object: T) -> Self {
        Self(Arc::new(object))
    }

    /// Identity comparison (data pointer only, vtables are ignored).
    pub fn ptr_eq(&self, other: &ObjectRef) -> bool {
        std::ptr::eq(
            Arc::as_ptr(&self.0) as *const (),
            Arc::as_ptr(&other.0) as *const (),
        )
    }
}

impl Deref for ObjectRef {
    type Target = dyn Object;

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}

impl PartialEq for ObjectRef {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Debug for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ObjectRef").field(&self.class_name()).finish()
    }
}
