use thiserror::Error;

/// Structured error context for failures raised by object methods and settings loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorContext {
    /// Property path or settings key involved (e.g., "user.address", "overwrite_marker")
    pub field_path: Option<String>,
    /// Additional context about the error (e.g., expected argument, actual value)
    pub details: Option<String>,
    /// Source of the error (e.g., "settings_loader", a method name)
    pub source: Option<String>,
}

impl ErrorContext {
    pub fn new() -> Self {
        Self {
            field_path: None,
            details: None,
            source: None,
        }
    }

    pub fn with_field_path(mut self, path: impl Into<String>) -> Self {
        self.field_path = Some(path.into());
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

impl Default for ErrorContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Unified error type.
///
/// Absence is never an error: reading a missing property or calling a method
/// on a non-object yields `Null`. Everything here comes from a real object
/// (its methods or its string conversion) or from loading [`Settings`](crate::Settings).
#[derive(Debug, Error)]
pub enum Error {
    #[error("Call to undefined method {class}::{method}()")]
    UndefinedMethod { class: String, method: String },

    #[error("Object of class {class} could not be converted to string")]
    NotStringable { class: String },

    #[error("Method error: {message}{}", format_context(.context))]
    Method {
        message: String,
        context: ErrorContext,
    },

    #[error("Configuration error: {message}{}", format_context(.context))]
    Configuration {
        message: String,
        context: ErrorContext,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

fn format_context(ctx: &ErrorContext) -> String {
    let mut parts = Vec::new();
    if let Some(ref field) = ctx.field_path {
        parts.push(format!("field: {}", field));
    }
    if let Some(ref details) = ctx.details {
        parts.push(format!("details: {}", details));
    }
    if let Some(ref source) = ctx.source {
        parts.push(format!("source: {}", source));
    }
    if parts.is_empty() {
        String::new()
    } else {
        format!(" ({})", parts.join(", "))
    }
}

impl Error {
    pub fn undefined_method(class: impl Into<String>, method: impl Into<String>) -> Self {
        Error::UndefinedMethod {
            class: class.into(),
            method: method.into(),
        }
    }

    pub fn not_stringable(class: impl Into<String>) -> Self {
        Error::NotStringable {
            class: class.into(),
        }
    }

    /// Failure raised from inside a method body.
    pub fn method(msg: impl Into<String>) -> Self {
        Self::method_with_context(msg, ErrorContext::new())
    }

    pub fn method_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Method {
            message: msg.into(),
            context,
        }
    }

    pub fn configuration_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Configuration {
            message: msg.into(),
            context,
        }
    }

    /// Extract error context if available
    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            Error::Method { context, .. } | Error::Configuration { context, .. } => Some(context),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_undefined_method_message() {
        let err = Error::undefined_method("User", "greet");
        assert_eq!(err.to_string(), "Call to undefined method User::greet()");
        assert!(err.context().is_none());
    }

    #[test]
    fn test_context_is_rendered() {
        let err = Error::method_with_context(
            "argument missing",
            ErrorContext::new()
                .with_details("expected 1 argument")
                .with_source("greet"),
        );
        assert_eq!(
            err.to_string(),
            "Method error: argument missing (details: expected 1 argument, source: greet)"
        );
        assert_eq!(
            err.context().and_then(|c| c.source.as_deref()),
            Some("greet")
        );
    }

    #[test]
    fn test_plain_method_error_has_no_suffix() {
        assert_eq!(Error::method("boom").to_string(), "Method error: boom");
    }
}
