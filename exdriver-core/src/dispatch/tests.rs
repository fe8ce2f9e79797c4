//! Unit tests for argument routing and fault containment.

use super::*;

use std::io;
use std::sync::{Arc, Mutex};

use rstest::{fixture, rstest};
use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;

use exdriver_test_support::tracing::RecordingLayer;

use crate::{error::ExampleFault, registry::RegistryBuilder};

type Calls = Arc<Mutex<Vec<(&'static str, Vec<String>)>>>;

struct Harness {
    registry: Registry,
    calls: Calls,
}

impl Harness {
    fn dispatch(&self, args: &[&str]) -> (i32, String, String) {
        let args: Vec<String> = args.iter().map(|arg| (*arg).to_owned()).collect();
        let (mut out, mut err) = (Vec::new(), Vec::new());
        let code = Dispatcher::new(&self.registry).dispatch(&args, &mut out, &mut err);
        (
            code,
            String::from_utf8(out).expect("stdout must be UTF-8"),
            String::from_utf8(err).expect("stderr must be UTF-8"),
        )
    }

    fn calls(&self) -> Vec<(&'static str, Vec<String>)> {
        self.calls.lock().expect("lock poisoned").clone()
    }
}

fn recording(
    calls: &Calls,
    name: &'static str,
    code: i32,
) -> impl Fn(&[String]) -> Result<i32, ExampleFault> + Send + Sync + 'static {
    let calls = Arc::clone(calls);
    move |args: &[String]| {
        calls
            .lock()
            .expect("lock poisoned")
            .push((name, args.to_vec()));
        Ok(code)
    }
}

#[fixture]
fn harness() -> Harness {
    let calls = Calls::default();
    let registry = RegistryBuilder::new()
        .register(
            "wordcount",
            "Counts the words in the input files.",
            recording(&calls, "wordcount", 0),
        )
        .and_then(|builder| {
            builder.register(
                "sort",
                "Sorts random writer output.",
                recording(&calls, "sort", 3),
            )
        })
        .and_then(|builder| {
            builder.register("join", "Joins sorted datasets", recording(&calls, "join", -7))
        })
        .and_then(|builder| {
            builder.register("faulty", "Returns an error.", |_: &[String]| {
                Err(io::Error::other("input path missing").into())
            })
        })
        .and_then(|builder| {
            builder.register(
                "panicky",
                "Panics.",
                |_: &[String]| -> Result<i32, ExampleFault> { panic!("example exploded") },
            )
        })
        .expect("distinct names must register")
        .build();
    Harness { registry, calls }
}

#[rstest]
#[case::no_forwarded_args(&["wordcount"], "wordcount", &[], 0)]
#[case::forwarded_args(&["sort", "in", "out"], "sort", &["in", "out"], 3)]
#[case::negative_status(&["join", "-r", "4"], "join", &["-r", "4"], -7)]
#[case::help_like_args_forwarded(&["wordcount", "--help", "--"], "wordcount", &["--help", "--"], 0)]
fn dispatch_invokes_matching_entry_point(
    harness: Harness,
    #[case] args: &[&str],
    #[case] expected_name: &str,
    #[case] expected_args: &[&str],
    #[case] expected_code: i32,
) {
    let (code, out, err) = harness.dispatch(args);
    assert_eq!(code, expected_code);
    assert!(out.is_empty());
    assert!(err.is_empty());

    let calls = harness.calls();
    assert_eq!(calls.len(), 1);
    let (name, forwarded) = calls.first().expect("one call recorded");
    assert_eq!(*name, expected_name);
    assert_eq!(forwarded, expected_args);
}

#[rstest]
fn empty_args_list_every_example_once_in_order(harness: Harness) {
    let (code, out, err) = harness.dispatch(&[]);
    assert_eq!(code, EXIT_USAGE);
    assert!(err.is_empty());
    assert_eq!(
        out,
        "An example program must be given as the first argument.\n\
         Valid program names are:\n  \
         wordcount: Counts the words in the input files.\n  \
         sort: Sorts random writer output.\n  \
         join: Joins sorted datasets\n  \
         faulty: Returns an error.\n  \
         panicky: Panics.\n"
    );
    assert!(harness.calls().is_empty());
}

#[rstest]
#[case("nonexistent")]
#[case("WordCount")]
#[case("")]
fn unknown_name_returns_usage_status_without_invoking(harness: Harness, #[case] name: &str) {
    let (code, out, err) = harness.dispatch(&[name, "arg"]);
    assert_eq!(code, EXIT_USAGE);
    assert!(out.is_empty());
    assert!(err.starts_with(&format!("Unknown program '{name}' chosen.\nValid program names are:\n")));
    assert!(err.contains("  sort: Sorts random writer output.\n"));
    assert!(harness.calls().is_empty());
}

#[rstest]
fn entry_point_error_maps_to_fault_status(harness: Harness) {
    let (code, out, err) = harness.dispatch(&["faulty"]);
    assert_eq!(code, EXIT_DISPATCH_FAULT);
    assert!(out.is_empty());
    assert_eq!(
        err,
        "error: example `faulty` raised a fault\n  caused by: input path missing\n"
    );
}

#[rstest]
fn fault_report_walks_the_whole_source_chain() -> io::Result<()> {
    let nested: ExampleFault = Box::new(DispatchError::Output {
        source: io::Error::other("disk full"),
    });
    let fault = DispatchError::EntryPoint {
        name: "terasort".to_owned(),
        source: nested,
    };
    let mut err = Vec::<u8>::new();
    write_fault(&fault, &mut err)?;
    assert_eq!(
        String::from_utf8_lossy(&err),
        "error: example `terasort` raised a fault\n  \
         caused by: failed to write dispatcher output\n  \
         caused by: disk full\n"
    );
    Ok(())
}

#[rstest]
fn entry_point_panic_maps_to_fault_status(harness: Harness) {
    let (code, _, err) = harness.dispatch(&["panicky"]);
    assert_eq!(code, EXIT_DISPATCH_FAULT);
    assert_eq!(err, "error: example `panicky` panicked: example exploded\n");
}

#[rstest]
fn try_dispatch_surfaces_fault_variants(harness: Harness) {
    let args = vec!["faulty".to_owned()];
    let (mut out, mut err) = (Vec::<u8>::new(), Vec::<u8>::new());
    let fault = Dispatcher::new(&harness.registry)
        .try_dispatch(&args, &mut out, &mut err)
        .expect_err("faulty example must fail");
    assert!(matches!(fault, DispatchError::EntryPoint { ref name, .. } if name == "faulty"));
}

struct ClosedStream;

impl Write for ClosedStream {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "stream closed"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[rstest]
fn usage_write_failure_is_a_dispatch_fault(harness: Harness) {
    let mut err = Vec::new();
    let code = Dispatcher::new(&harness.registry).dispatch(&[], &mut ClosedStream, &mut err);
    assert_eq!(code, EXIT_DISPATCH_FAULT);
    let err = String::from_utf8(err).expect("stderr must be UTF-8");
    assert_eq!(
        err,
        "error: failed to write dispatcher output\n  caused by: stream closed\n"
    );
}

#[rstest]
fn fault_status_survives_unwritable_error_stream(harness: Harness) {
    let args = vec!["faulty".to_owned()];
    let mut out = Vec::<u8>::new();
    let code = Dispatcher::new(&harness.registry).dispatch(&args, &mut out, &mut ClosedStream);
    assert_eq!(code, EXIT_DISPATCH_FAULT);
}

#[rstest]
fn dispatch_records_span_and_completion_event(harness: Harness) {
    let layer = RecordingLayer::default();
    let subscriber = tracing_subscriber::registry().with(layer.clone());

    let (code, _, _) = tracing::subscriber::with_default(subscriber, || {
        harness.dispatch(&["sort", "in", "out"])
    });
    assert_eq!(code, 3);

    let span = layer
        .span_named("dispatch.run")
        .expect("dispatch.run span must exist");
    assert_eq!(span.fields.get("example"), Some(&"sort".to_owned()));
    assert_eq!(span.fields.get("forwarded"), Some(&"2".to_owned()));
    assert!(layer.has_event(Level::INFO, "example completed"));
}

#[rstest]
fn unknown_example_emits_warning(harness: Harness) {
    let layer = RecordingLayer::default();
    let subscriber = tracing_subscriber::registry().with(layer.clone());

    tracing::subscriber::with_default(subscriber, || harness.dispatch(&["nope"]));

    assert!(layer.has_event(Level::WARN, "unknown example requested"));
    assert!(layer.span_named("dispatch.run").is_none());
}

#[test]
fn panic_message_handles_non_string_payloads() {
    let payload: Box<dyn Any + Send> = Box::new(42_u8);
    assert_eq!(panic_message(payload.as_ref()), "<non-string panic payload>");
    let owned: Box<dyn Any + Send> = Box::new(String::from("owned message"));
    assert_eq!(panic_message(owned.as_ref()), "owned message");
}
