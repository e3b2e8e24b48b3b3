mod common;

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

use llm_tools::{Arguments, ErrorPayload, Param, TypeRef};

use common::{described, parse};

#[test]
fn test_safe_call() {
    let tool = described("tool")
        .param(Param::new("a", TypeRef::Integer, "a desc"))
        .build(|_| Ok("output".to_string()))
        .unwrap();

    assert_eq!(tool.safe_call(r#"{"a": 1}"#), "output");

    let missing = parse(&tool.safe_call("{}"));
    assert_eq!(missing["is_error"], true);
    assert!(missing["exception"].is_string());

    let unexpected = parse(&tool.safe_call(r#"{"a": 1, "b": 2}"#));
    assert_eq!(unexpected["is_error"], true);
    assert!(
        unexpected["exception"]
            .as_str()
            .unwrap()
            .contains("unexpected argument `b`")
    );
}

#[test]
fn test_safe_call_passes_decoded_values() {
    let tool = described("add")
        .param(Param::new("x", TypeRef::Number, "x"))
        .param(Param::new("y", TypeRef::Number, "y").with_default(10.0))
        .build(|args| {
            let sum = args.get::<f64>("x")? + args.get::<f64>("y")?;
            Ok(sum.to_string())
        })
        .unwrap();

    assert_eq!(tool.safe_call(r#"{"x": 1.5, "y": 2}"#), "3.5");
    assert_eq!(tool.safe_call(r#"{"x": 1}"#), "11");

    let wrong_type = ErrorPayload::detect(&tool.safe_call(r#"{"x": "one"}"#)).unwrap();
    assert!(wrong_type.message().contains("invalid value for argument `x`"));
}

#[test]
fn test_safe_call_output_is_verbatim() {
    let tool = described("tool")
        .build(|_| Ok("  line one\nline two  ".to_string()))
        .unwrap();
    assert_eq!(tool.safe_call("{}"), "  line one\nline two  ");
}

#[test]
fn test_nullable_parameter_accepts_null() {
    let tool = described("tool")
        .param(Param::new("limit", TypeRef::optional(TypeRef::Integer), "limit"))
        .build(|args| {
            Ok(match args.get_opt::<i64>("limit")? {
                Some(limit) => format!("limit {}", limit),
                None => "no limit".to_string(),
            })
        })
        .unwrap();

    assert_eq!(tool.safe_call(r#"{"limit": null}"#), "no limit");
    assert_eq!(tool.safe_call(r#"{"limit": 3}"#), "limit 3");
    // still required: no default was declared
    assert!(ErrorPayload::detect(&tool.safe_call("{}")).is_some());
}

#[test]
fn test_direct_call() {
    let tool = described("tool")
        .param(Param::new("a", TypeRef::Boolean, "a desc"))
        .param(Param::new("b", TypeRef::Integer, "b desc").with_default(1))
        .build(|args| Ok(format!("{} {}", args.get::<bool>("a")?, args.get::<i64>("b")?)))
        .unwrap();

    assert_eq!(tool.call(Arguments::new().arg(true)).unwrap(), "true 1");
    assert_eq!(tool.call(Arguments::new().arg(true).arg(3)).unwrap(), "true 3");
    assert_eq!(
        tool.call(Arguments::new().kwarg("b", 5).kwarg("a", false))
            .unwrap(),
        "false 5"
    );
    assert!(tool.call(Arguments::new().arg(true).arg(3).arg(4)).is_err());
}

#[test]
fn test_direct_call_propagates_failure() {
    let tool = described("tool")
        .build(|_| Err(std::io::Error::other("disk on fire").into()))
        .unwrap();

    let err = tool.call(Arguments::new()).unwrap_err();
    let io = err
        .downcast_ref::<std::io::Error>()
        .expect("source error type is preserved");
    assert_eq!(io.to_string(), "disk on fire");

    let payload = ErrorPayload::detect(&tool.safe_call("{}")).unwrap();
    assert_eq!(payload, ErrorPayload::Exception("disk on fire".to_string()));
}

#[test]
fn test_concurrent_safe_calls() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let tool = described("count")
        .param(Param::new("n", TypeRef::Integer, "n"))
        .build(move |args| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(args.get::<i64>("n")?.to_string())
        })
        .unwrap();

    let handles: Vec<_> = (0..8)
        .map(|n| {
            let tool = tool.clone();
            thread::spawn(move || tool.safe_call(&format!(r#"{{"n": {}}}"#, n)))
        })
        .collect();

    let mut outputs: Vec<String> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    outputs.sort();
    assert_eq!(outputs, (0..8).map(|n| n.to_string()).collect::<Vec<_>>());
    assert_eq!(calls.load(Ordering::SeqCst), 8);
}
