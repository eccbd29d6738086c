//! Utilities for structured reporting of experimental results.
//!
//! Results are collected into a JSON document whose nesting follows the call structure:
//! `push_context` and `push_collection_context` return RAII guards and everything reported
//! while a guard is alive ends up below its key.
//! The document is printed to stdout as a single line when the guard from `enable_reporting` is dropped.
//!
//! The reporter is thread local.
//! Reporting from threads other than the one which called `enable_reporting` is silently ignored,
//! so parallel code does not need to care.

use crate::built_info;
use serde_json::{Map, Value};
use std::cell::RefCell;

pub use serde_json::json;

#[derive(Debug)]
enum Frame {
    // key is `None` for collection items
    Object { key: Option<String>, object: Map<String, Value> },
    Collection { key: String, items: Vec<Value> },
}

#[derive(Debug, Default)]
struct Reporter {
    root: Map<String, Value>,
    stack: Vec<Frame>,
}

impl Reporter {
    fn current_object(&mut self) -> &mut Map<String, Value> {
        match self.stack.last_mut() {
            None => &mut self.root,
            Some(Frame::Object { object, .. }) => object,
            Some(Frame::Collection { .. }) => panic!("Cannot report value on collection"),
        }
    }

    fn push_object(&mut self, key: String) {
        assert!(!matches!(self.stack.last(), Some(Frame::Collection { .. })), "Cannot create object at key in collection");
        self.stack.push(Frame::Object { key: Some(key), object: Map::new() });
    }

    fn push_collection(&mut self, key: String) {
        assert!(
            !matches!(self.stack.last(), Some(Frame::Collection { .. })),
            "Cannot create collection at key in collection"
        );
        self.stack.push(Frame::Collection { key, items: Vec::new() });
    }

    fn push_item(&mut self) {
        assert!(matches!(self.stack.last(), Some(Frame::Collection { .. })), "Cannot create collection item in object");
        self.stack.push(Frame::Object { key: None, object: Map::new() });
    }

    fn report(&mut self, key: String, val: Value) {
        let prev = self.current_object().insert(key, val);
        if !cfg!(feature = "report-allow-override") {
            assert!(prev.is_none());
        }
    }

    fn pop(&mut self) {
        let (key, value) = match self.stack.pop().expect("tried to pop from empty context") {
            Frame::Object { key, object } => (key, Value::Object(object)),
            Frame::Collection { key, items } => (Some(key), Value::Array(items)),
        };

        match (key, self.stack.last_mut()) {
            (None, Some(Frame::Collection { items, .. })) => items.push(value),
            (Some(key), None) => {
                assert!(self.root.insert(key, value).is_none());
            }
            (Some(key), Some(Frame::Object { object, .. })) => {
                assert!(object.insert(key, value).is_none());
            }
            _ => panic!("Inconsistent context stack"),
        }
    }
}

thread_local! {
    static REPORTER: RefCell<Option<Reporter>> = RefCell::new(None);
}

fn with_reporter(f: impl FnOnce(&mut Reporter)) {
    REPORTER.with(|reporter| {
        if let Some(r) = reporter.borrow_mut().as_mut() {
            f(r)
        }
    });
}

#[must_use]
pub struct ContextGuard(());

impl Drop for ContextGuard {
    fn drop(&mut self) {
        with_reporter(Reporter::pop);
    }
}

/// Everything reported while the guard lives goes into an object under `key`.
pub fn push_context(key: String) -> ContextGuard {
    with_reporter(|r| r.push_object(key));
    ContextGuard(())
}

#[must_use]
pub struct CollectionContextGuard(());

impl Drop for CollectionContextGuard {
    fn drop(&mut self) {
        with_reporter(Reporter::pop);
    }
}

/// Open an array under `key`. Values have to be reported through `push_collection_item`.
pub fn push_collection_context(key: String) -> CollectionContextGuard {
    with_reporter(|r| r.push_collection(key));
    CollectionContextGuard(())
}

impl CollectionContextGuard {
    pub fn push_collection_item(&mut self) -> CollectionItemContextGuard {
        with_reporter(Reporter::push_item);
        CollectionItemContextGuard(self)
    }
}

#[must_use]
pub struct CollectionItemContextGuard<'a>(&'a CollectionContextGuard);

impl<'a> Drop for CollectionItemContextGuard<'a> {
    fn drop(&mut self) {
        with_reporter(Reporter::pop);
    }
}

pub fn report(key: String, val: Value) {
    if cfg!(feature = "report-to-stderr") {
        eprintln!("{}: {}", key, val);
    }
    report_silent(key, val)
}

pub fn report_silent(key: String, val: Value) {
    with_reporter(|r| r.report(key, val));
}

#[must_use]
pub struct ReportingGuard(());

impl Drop for ReportingGuard {
    fn drop(&mut self) {
        if let Some(r) = REPORTER.with(|reporter| reporter.borrow_mut().take()) {
            assert!(r.stack.is_empty());
            println!("{}", Value::Object(r.root));
        }
    }
}

#[macro_export]
macro_rules! report {
    ($k:expr, $($json:tt)+) => { $crate::report::report($k.to_string(), $crate::report::json!($($json)+)) };
}

#[macro_export]
macro_rules! report_silent {
    ($k:expr, $($json:tt)+) => { $crate::report::report_silent($k.to_string(), $crate::report::json!($($json)+)) };
}

/// Start collecting results on the current thread.
/// Reports build information, the host, the start time and the command line right away.
pub fn enable_reporting(program: &str) -> ReportingGuard {
    REPORTER.with(|reporter| reporter.replace(Some(Reporter::default())));

    report!("crate_version", built_info::PKG_VERSION);
    report!("build_target", built_info::TARGET);
    report!("build_profile", built_info::PROFILE);
    report!("feature_flags", built_info::FEATURES_STR);
    report!("build_with_rustc", built_info::RUSTC_VERSION);

    if let Ok(hostname) = std::process::Command::new("hostname").output() {
        report!("hostname", String::from_utf8_lossy(&hostname.stdout).trim());
    }

    report!("program", program);
    report!("start_time", format!("{}", time::now_utc().rfc822()));
    report!("args", std::env::args().collect::<Vec<String>>());

    ReportingGuard(())
}

pub mod benchmark;
pub use benchmark::*;
