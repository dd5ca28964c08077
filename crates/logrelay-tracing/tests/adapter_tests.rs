mod common;

use std::fmt;
use std::sync::atomic::{AtomicI32, AtomicUsize, Ordering};
use std::sync::Arc;

use common::Buffer;
use logrelay_core::{
    log_info, with_fields, with_level, with_output, Fields, InitError, Level, Logger,
};
use logrelay_tracing::native::{
    Entry, Formatter, Hook, HookError, HookRecord, LevelHooks, NativeLevel, TracingLogger,
};
use logrelay_tracing::{
    new_logger, report_caller, with_exit_fn, with_json_formatter, with_level_hooks, with_logger,
    ConfigurationError, TracingAdapter,
};

/// Counts how many times it is rendered.
struct Expensive(Arc<AtomicUsize>);

impl fmt::Display for Expensive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fetch_add(1, Ordering::SeqCst);
        f.write_str("expensive")
    }
}

/// Counts the Error entries it sees.
struct ErrorCounter {
    fired: AtomicUsize,
}

impl Hook for ErrorCounter {
    fn levels(&self) -> Vec<NativeLevel> {
        vec![NativeLevel::Error]
    }

    fn fire(&self, record: &HookRecord<'_>) -> Result<(), HookError> {
        assert_eq!(record.message, "payment declined");
        self.fired.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

fn initialized(opts: Vec<logrelay_core::LoggerOption>) -> Box<dyn Logger> {
    let mut logger = new_logger(Vec::new());
    logger.init(opts).unwrap();
    logger
}

// ============================================================
// Level gating
// ============================================================

#[test]
fn test_warn_level_drops_info() {
    let buffer = Buffer::default();
    let logger = initialized(vec![with_level(Level::Warn), with_output(buffer.output())]);

    logger.info(&[&"should not appear"]);
    assert!(buffer.contents().is_empty());

    logger.error(&[&"should appear"]);
    assert!(buffer.contents().contains("should appear"));
}

#[test]
fn test_disabled_level_does_not_format() {
    let rendered = Arc::new(AtomicUsize::new(0));
    let buffer = Buffer::default();
    let logger = initialized(vec![with_level(Level::Info), with_output(buffer.output())]);

    logger.debug(&[&Expensive(rendered.clone())]);
    logger.debugf(format_args!("{}", Expensive(rendered.clone())));
    assert_eq!(rendered.load(Ordering::SeqCst), 0);

    logger.info(&[&Expensive(rendered.clone())]);
    assert_eq!(rendered.load(Ordering::SeqCst), 1);
    assert!(buffer.contents().contains("expensive"));
}

#[test]
fn test_v_follows_configured_level() {
    let logger = initialized(vec![with_level(Level::Debug)]);
    assert!(logger.v(Level::Debug));
    assert!(logger.v(Level::Fatal));
    assert!(!logger.v(Level::Trace));
}

// ============================================================
// Output and formatting
// ============================================================

#[test]
fn test_custom_output_receives_logf() {
    let buffer = Buffer::default();
    let logger = initialized(vec![with_output(buffer.output())]);

    logger.infof(format_args!("test logger name: {}", "name"));

    assert!(buffer.contents().contains("test logger name: name"));
}

#[test]
fn test_log_joins_args_with_spaces() {
    let buffer = Buffer::default();
    let logger = initialized(vec![with_output(buffer.output())]);

    logger.warn(&[&"disk", &90, &"percent full"]);

    assert!(buffer.contents().contains("disk 90 percent full"));
}

#[test]
fn test_json_formatter_option() {
    let buffer = Buffer::default();
    let logger = initialized(vec![with_output(buffer.output()), with_json_formatter()]);

    logger
        .fields(Fields::new().with("request_id", "abc"))
        .infof(format_args!("handled"));

    let line = buffer.contents();
    let value: serde_json::Value = serde_json::from_str(line.trim()).unwrap();
    assert_eq!(value["level"], "INFO");
    assert_eq!(value["fields"]["message"], "handled");
    assert_eq!(value["fields"]["fields"], "request_id=abc");
}

#[test]
fn test_macros_reach_adapter() {
    let buffer = Buffer::default();
    let logger = initialized(vec![with_output(buffer.output())]);

    log_info!(logger, "listening on port {}", 8080);

    assert!(buffer.contents().contains("listening on port 8080"));
}

// ============================================================
// Fields
// ============================================================

#[test]
fn test_fields_appear_in_output() {
    let buffer = Buffer::default();
    let logger = initialized(vec![with_output(buffer.output())]);

    let child = logger.fields(Fields::new().with("key", "val"));
    child.info(&[&"message"]);

    let written = buffer.contents();
    assert!(written.contains("message"));
    assert!(written.contains("key=val"));
}

#[test]
fn test_fields_leave_parent_untouched() {
    let buffer = Buffer::default();
    let logger = initialized(vec![with_output(buffer.output())]);

    let _child = logger.fields(Fields::new().with("child_only", true));
    logger.info(&[&"from parent"]);

    assert!(!buffer.contents().contains("child_only"));
}

#[test]
fn test_initial_fields_attached_to_every_entry() {
    let buffer = Buffer::default();
    let logger = initialized(vec![
        with_output(buffer.output()),
        with_fields(Fields::new().with("service", "billing")),
    ]);

    logger.info(&[&"first"]);
    logger.fields(Fields::new().with("attempt", 2)).info(&[&"second"]);

    let written = buffer.contents();
    assert_eq!(written.matches("service=billing").count(), 2);
    assert!(written.contains("attempt=2"));
}

#[test]
fn test_fields_from_pairs_errors() {
    use serde_json::json;

    let fields = Fields::from_pairs([json!("k1"), json!("v1"), json!("k2"), json!(2)]).unwrap();
    assert_eq!(fields.len(), 2);

    assert!(Fields::from_pairs([json!("k1")]).is_err());
    assert!(Fields::from_pairs([json!(1), json!("v")]).is_err());
}

// ============================================================
// Pre-built loggers
// ============================================================

#[test]
fn test_prebuilt_logger_overrides_options() {
    let mut native = TracingLogger::new();
    native.set_level(NativeLevel::Warn);
    native.set_formatter(Formatter::Compact);

    let mut adapter = TracingAdapter::new([with_level(Level::Trace)]);
    adapter.init(vec![with_logger(native)]).unwrap();

    assert!(!adapter.v(Level::Info));
    assert!(adapter.v(Level::Warn));
    assert_eq!(adapter.options().level, Level::Warn);
    assert_eq!(adapter.tracing_options().formatter, Formatter::Compact);
}

#[test]
fn test_prebuilt_shared_logger_writes_to_its_output() {
    let buffer = Buffer::default();
    let mut native = TracingLogger::new();
    native.set_output(buffer.output());
    let native = Arc::new(native);

    let mut adapter = TracingAdapter::default();
    adapter.init(vec![with_logger(Arc::clone(&native))]).unwrap();
    adapter.infof(format_args!("through shared handle"));

    assert!(buffer.contents().contains("through shared handle"));
    assert!(adapter.options().out.same_sink(native.output()));
}

#[test]
fn test_prebuilt_entry_reads_parent_settings() {
    let buffer = Buffer::default();
    let mut native = TracingLogger::new();
    native.set_level(NativeLevel::Warn);
    native.set_output(buffer.output());
    let entry = Entry::new(Arc::new(native)).with_field("component", "scheduler");

    let mut adapter = TracingAdapter::default();
    adapter.init(vec![with_logger(entry)]).unwrap();

    assert!(!adapter.v(Level::Info));
    assert!(adapter.v(Level::Warn));
    assert_eq!(adapter.options().level, Level::Warn);

    adapter.warn(&[&"queue backed up"]);
    let written = buffer.contents();
    assert!(written.contains("queue backed up"));
    assert!(written.contains("component=scheduler"));
}

#[test]
fn test_unsupported_prebuilt_logger() {
    let mut adapter = TracingAdapter::default();
    let err = adapter.init(vec![with_logger(42u32)]).unwrap_err();

    let InitError::Configuration { logger, source } = &err;
    assert_eq!(*logger, "tracing");
    match source.downcast_ref::<ConfigurationError>() {
        Some(ConfigurationError::UnsupportedLogger { type_name }) => {
            assert_eq!(*type_name, "u32");
        }
        None => panic!("expected a ConfigurationError source"),
    }
    assert!(err.to_string().contains("u32"));
    assert!(!adapter.is_initialized());
}

#[test]
fn test_failed_init_keeps_previous_state() {
    let buffer = Buffer::default();
    let mut adapter = TracingAdapter::default();
    adapter
        .init(vec![with_level(Level::Error), with_output(buffer.output())])
        .unwrap();

    assert!(adapter
        .init(vec![with_level(Level::Trace), with_logger("not a logger")])
        .is_err());

    assert!(adapter.is_initialized());
    assert_eq!(adapter.options().level, Level::Error);
    adapter.error(&[&"still wired"]);
    assert!(buffer.contents().contains("still wired"));
}

// ============================================================
// Adapter options
// ============================================================

#[test]
fn test_level_hooks_option_reaches_logger() {
    let counter = Arc::new(ErrorCounter {
        fired: AtomicUsize::new(0),
    });
    let mut hooks = LevelHooks::new();
    hooks.add(counter.clone());

    let buffer = Buffer::default();
    let mut adapter = TracingAdapter::default();
    adapter
        .init(vec![with_output(buffer.output()), with_level_hooks(hooks)])
        .unwrap();

    adapter.error(&[&"payment declined"]);
    adapter.info(&[&"payment retried"]);

    assert_eq!(counter.fired.load(Ordering::SeqCst), 1);
    assert_eq!(adapter.tracing_options().hooks.for_level(NativeLevel::Error).len(), 1);
    assert!(buffer.contents().contains("payment retried"));
}

#[test]
fn test_report_caller_option_adds_location() {
    let buffer = Buffer::default();
    let mut adapter = TracingAdapter::default();
    adapter
        .init(vec![with_output(buffer.output()), report_caller()])
        .unwrap();

    adapter.info(&[&"with location"]);

    assert!(adapter.tracing_options().report_caller);
    let written = buffer.contents();
    assert!(written.contains("with location"));
    assert!(written.contains(".rs:"));
}

#[test]
fn test_report_caller_off_by_default() {
    let buffer = Buffer::default();
    let logger = initialized(vec![with_output(buffer.output())]);

    logger.info(&[&"no location"]);

    assert!(!buffer.contents().contains(".rs:"));
}

// ============================================================
// Fatal and lifecycle
// ============================================================

#[test]
fn test_fatal_invokes_exit_fn() {
    let code = Arc::new(AtomicI32::new(-1));
    let seen = code.clone();
    let buffer = Buffer::default();
    let logger = initialized(vec![
        with_output(buffer.output()),
        with_exit_fn(move |c| seen.store(c, Ordering::SeqCst)),
    ]);

    logger.fatalf(format_args!("cannot continue"));

    assert_eq!(code.load(Ordering::SeqCst), 1);
    assert!(buffer.contents().contains("cannot continue"));
}

#[test]
fn test_logging_before_init_is_silent() {
    let buffer = Buffer::default();
    let adapter = TracingAdapter::new([with_output(buffer.output())]);

    assert!(adapter.v(Level::Trace));
    adapter.error(&[&"nobody listening"]);

    assert!(buffer.contents().is_empty());
}

#[test]
fn test_options_report_facade_settings() {
    let buffer = Buffer::default();
    let logger = initialized(vec![
        with_level(Level::Debug),
        with_output(buffer.output()),
        with_json_formatter(),
    ]);

    let options = logger.options();
    assert_eq!(options.level, Level::Debug);
    assert_eq!(options.out.label(), "buffer");
    assert_eq!(logger.name(), "tracing");
}
