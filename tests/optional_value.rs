//! Behavioral tests for the forwarding facade through the public API.

use optional_value::{
    make, make_default, Access, Error, ErrorContext, Object, ObjectRef, Optional, OptionalValue,
    Record, Value, EMPTY,
};
use serde_json::json;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn non_objects() -> Vec<Value> {
    vec![
        Value::Null,
        Value::from(true),
        Value::from(false),
        Value::from(0),
        Value::from(-3.5),
        Value::from(""),
        Value::from("Ada"),
        Value::from(vec!["a"]),
        Value::from(json!([])),
    ]
}

fn ada() -> ObjectRef {
    Record::new("User")
        .with_property("name", "Ada")
        .with_method("greet", |user, args| {
            let greeting = args.first().and_then(Value::as_str).unwrap_or("Hello");
            let name = user.get("name");
            Ok(Value::from(format!("{} {}", greeting, name.as_str().unwrap_or(""))))
        })
        .with_method("explode", |_, _| {
            Err(Error::method_with_context(
                "explode failed",
                ErrorContext::new().with_source("explode"),
            ))
        })
        .with_to_string(|user| format!("User({})", user.get("name").as_str().unwrap_or("")))
        .into_ref()
}

#[test]
fn test_non_objects_read_empty() {
    init_tracing();
    for value in non_objects() {
        let made = make(value.clone());
        assert!(!made.is_object(), "{:?}", value);
        assert_eq!(made.get(EMPTY), Value::Bool(true), "{:?}", value);
    }
}

#[test]
fn test_non_objects_degrade_silently() {
    for value in non_objects() {
        let made = make(value.clone());
        for key in ["name", "value", "0", ""] {
            assert_eq!(made.get(key), Value::Null, "{:?}.{}", value, key);
            assert!(!made.has(key));
        }
        assert!(!made.has(EMPTY));
        assert_eq!(made.call("greet", &[Value::from(1)]).unwrap(), Value::Null);
        assert_eq!(made.to_text().unwrap(), "");
    }
}

#[test]
fn test_null_scenario() {
    let made = make_default();
    assert_eq!(made.get("empty"), Value::Bool(true));
    assert_eq!(made.get("name"), Value::Null);
    assert_eq!(made.call("greet", &[]).unwrap(), Value::Null);
    assert_eq!(made.to_text().unwrap() + "", "");
    assert_eq!(make(Value::Null), made);
}

#[test]
fn test_object_passes_through_and_is_tagged() {
    init_tracing();
    let user = Record::new("User").with_property("name", "Ada").into_ref();
    assert_eq!(user.property(EMPTY), None);

    let made = make(user.clone());
    let passed = made.as_object().expect("object passes through");
    assert!(passed.ptr_eq(&user));
    assert_eq!(user.property(EMPTY), Some(Value::Bool(false)));
    assert_eq!(made.get(EMPTY), Value::Bool(false));
    assert_eq!(made.get("name"), Value::from("Ada"));
    assert!(!made.is_empty());
}

#[test]
fn test_own_empty_property_wins() {
    let page = Record::new("Page").with_property(EMPTY, true).into_ref();
    let made = make(page.clone());
    assert!(made.as_object().is_some_and(|o| o.ptr_eq(&page)));
    assert_eq!(made.get(EMPTY), Value::Bool(true));
    assert_eq!(page.property(EMPTY), Some(Value::Bool(true)));

    let wrapped = OptionalValue::new(page);
    assert_eq!(wrapped.get(EMPTY), Value::Bool(true));
    assert!(wrapped.is_empty());
}

#[test]
fn test_has_matches_isset_on_objects() {
    let object = Value::from(json!({"name": "Ada", "nick": null, "count": 0}));
    let wrapped = OptionalValue::new(object.clone());
    let object = object.as_object().expect("object").clone();
    for key in ["name", "nick", "count", "missing"] {
        let expected = matches!(object.property(key), Some(ref v) if !v.is_null());
        assert_eq!(wrapped.has(key), expected, "{}", key);
    }
    assert_eq!(wrapped.get("nick"), Value::Null);
    assert_eq!(wrapped.get("missing"), Value::Null);
    assert_eq!(wrapped.get("count"), Value::from(0));
}

#[test]
fn test_calls_forward_arguments_in_order() {
    let made = make(ada());
    assert_eq!(made.call("greet", &[]).unwrap(), Value::from("Hello Ada"));
    assert_eq!(
        made.call("GREET", &[Value::from("Hi"), Value::from("ignored")])
            .unwrap(),
        Value::from("Hi Ada")
    );
}

#[test]
fn test_delegated_failures_propagate_unchanged() {
    let made = make(ada());

    let err = made.call("explode", &[]).unwrap_err();
    assert_eq!(err.to_string(), "Method error: explode failed (source: explode)");

    let err = made.call("wave", &[]).unwrap_err();
    assert!(matches!(
        err,
        Error::UndefinedMethod { ref class, ref method } if class == "User" && method == "wave"
    ));

    let bare = make(Record::new("Bare").into_ref());
    assert_eq!(
        bare.to_text().unwrap_err().to_string(),
        "Object of class Bare could not be converted to string"
    );
}

#[test]
fn test_to_text_uses_object_string_form() {
    let user = ada();
    assert_eq!(make(user.clone()).to_text().unwrap(), "User(Ada)");
    assert_eq!(OptionalValue::new(user).to_text().unwrap(), "User(Ada)");
}

#[test]
fn test_wrapped_value_is_kept() {
    let wrapped = OptionalValue::new(42);
    assert_eq!(wrapped.value(), &Value::from(42));
    assert_eq!(wrapped.clone().into_inner(), Value::from(42));
    assert_eq!(
        OptionalValue::make(42),
        Optional::Wrapped(wrapped)
    );
}

#[test]
fn test_template_chain() {
    let context = Value::from(json!({
        "user": {"name": "Ada", "company": null, "projects": [{"title": "Engine"}]}
    }));
    let page = make(context);

    let user = page.get("user");
    assert!(!user.is_empty());
    assert_eq!(user.get("company").get("name"), Value::Null);
    assert!(user.get("company").is_empty());
    assert_eq!(page.get_path("user.projects[0].title"), Value::from("Engine"));
    assert_eq!(page.get_path("user.projects[3].title"), Value::Null);
    assert_eq!(
        user.get("company").call("format", &[]).unwrap(),
        Value::Null
    );
}

struct Sealed;

impl Object for Sealed {
    fn class_name(&self) -> &str {
        "Sealed"
    }

    fn property(&self, _name: &str) -> Option<Value> {
        None
    }

    fn to_text(&self) -> optional_value::Result<String> {
        Ok("sealed".to_string())
    }
}

#[test]
fn test_object_refusing_marker_reads_present() {
    init_tracing();
    let made = make(ObjectRef::new(Sealed));
    assert!(made.is_object());
    assert!(!made.is_empty());
    assert_eq!(made.get("anything"), Value::Null);
    assert_eq!(made.to_text().unwrap(), "sealed");
    assert!(matches!(
        made.call("open", &[]),
        Err(Error::UndefinedMethod { .. })
    ));
}
