//! # optional-value
//!
//! Null-safe access to optional values for templates and view renderers.
//!
//! ## Overview
//!
//! A template often receives values that may or may not exist: a user that may
//! be logged out, an address that may be missing. [`OptionalValue`] wraps such a
//! value and lets the template read properties, check them, call methods and
//! stringify without guarding every step. When the wrapped value is an object
//! the operation is forwarded to it; otherwise a safe default comes back
//! (`Null`, `false` or `""`).
//!
//! ## Key Features
//!
//! - **Factory**: [`make`] passes objects through (tagging them `empty = false`)
//!   and wraps everything else
//! - **Uniform interface**: [`Access`] is implemented by wrappers, passed-through
//!   objects and raw [`Value`]s alike
//! - **Dynamic objects**: [`Record`] is a property bag with methods and a string
//!   form; implement [`Object`] for your own types
//! - **JSON interop**: `serde_json::Value` converts into [`Value`], and [`Value`]
//!   serializes back
//! - **Paths**: [`Access::get_path`] reads `"a.b[0].c"` chains null-safely
//!
//! ## Quick Start
//!
//! ```rust
//! use optional_value::{make, Access, Record, Value};
//!
//! let user = Record::new("User")
//!     .with_property("name", "Ada")
//!     .with_method("greet", |user, _| {
//!         Ok(Value::from(format!("Hello, {}", user.get("name").as_str().unwrap_or(""))))
//!     })
//!     .into_ref();
//!
//! let present = make(user);
//! assert!(!present.is_empty());
//! assert_eq!(present.call("greet", &[])?, Value::from("Hello, Ada"));
//!
//! let absent = make(Value::Null);
//! assert!(absent.is_empty());
//! assert_eq!(absent.call("greet", &[])?, Value::Null);
//! assert_eq!(absent.get_path("address.city"), Value::Null);
//! # Ok::<(), optional_value::Error>(())
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`optional`] | The wrapper, the factory and the [`Access`] interface |
//! | [`value`] | Dynamic value model |
//! | [`object`] | Object capability trait and [`Record`] |
//! | [`config`] | Factory [`Settings`] |
//! | [`utils`] | Path parsing |

pub mod config;
pub mod object;
pub mod optional;
pub mod utils;
pub mod value;

pub use config::Settings;
pub use object::{Object, ObjectRef, Record};
pub use optional::{make, make_default, Access, Factory, Optional, OptionalValue, EMPTY};
pub use value::Value;

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the library
pub mod error;
pub use error::{Error, ErrorContext};
