//! Dynamic object: a mutable property bag plus a method table.

use super::{Object, ObjectRef};
use crate::{Error, Result, Value};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

/// Method body. Receives the record it was called on and the ordered arguments.
pub type Method = Arc<dyn Fn(&Record, &[Value]) -> Result<Value> + Send + Sync>;

/// String conversion for a record.
pub type ToText = Arc<dyn Fn(&Record) -> String + Send + Sync>;

/// Object with dynamic properties.
///
/// Property names are case-sensitive, method names are not.
pub struct Record {
    class: String,
    properties: RwLock<BTreeMap<String, Value>>,
    methods: HashMap<String, Method>,
    to_text: Option<ToText>,
}

impl Record {
    /// Class given to records decoded from JSON.
    pub const STD_CLASS: &'static str = "stdClass";

    pub fn new(class: impl Into<String>) -> Self {
        Self {
            class: class.into(),
            properties: RwLock::new(BTreeMap::new()),
            methods: HashMap::new(),
            to_text: None,
        }
    }

    pub fn with_property(self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(name, value);
        self
    }

    pub fn with_method<F>(mut self, name: &str, method: F) -> Self
    where
        F: Fn(&Record, &[Value]) -> Result<Value> + Send + Sync + 'static,
    {
        self.methods
            .insert(name.to_ascii_lowercase(), Arc::new(method));
        self
    }

    pub fn with_to_string<F>(mut self, to_text: F) -> Self
    where
        F: Fn(&Record) -> String + Send + Sync + 'static,
    {
        self.to_text = Some(Arc::new(to_text));
        self
    }

    pub fn into_ref(self) -> ObjectRef {
        ObjectRef::new(self)
    }

    /// Property value, `Null` when missing.
    pub fn get(&self, name: &str) -> Value {
        self.properties
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
            .unwrap_or_default()
    }

    pub fn set(&self, name: impl Into<String>, value: impl Into<Value>) {
        self.properties
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name.into(), value.into());
    }

    pub fn remove(&self, name: &str) -> Option<Value> {
        self.properties
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(name)
    }

    pub fn has_method(&self, name: &str) -> bool {
        self.methods.contains_key(&name.to_ascii_lowercase())
    }
}

impl Object for Record {
    fn class_name(&self) -> &str {
        &self.class
    }

    fn property(&self, name: &str) -> Option<Value> {
        self.properties
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
    }

    fn set_property(&self, name: &str, value: Value) -> bool {
        self.set(name, value);
        true
    }

    fn properties(&self) -> Vec<(String, Value)> {
        self.properties
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    fn call_method(&self, method: &str, args: &[Value]) -> Result<Value> {
        // Clone the handle out so the body may take `&self` freely.
        let body = self
            .methods
            .get(&method.to_ascii_lowercase())
            .cloned()
            .ok_or_else(|| Error::undefined_method(&self.class, method))?;
        body(self, args)
    }

    fn to_text(&self) -> Result<String> {
        match &self.to_text {
            Some(to_text) => Ok(to_text(self)),
            None => Err(Error::not_stringable(&self.class)),
        }
    }
}

impl fmt::Debug for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut methods: Vec<&String> = self.methods.keys().collect();
        methods.sort();
        f.debug_struct("Record")
            .field("class", &self.class)
            .field("properties", &self.properties())
            .field("methods", &methods)
            .field("to_string", &self.to_text.is_some())
            .finish()
    }
}
