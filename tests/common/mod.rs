//! In-memory test modules and counters shared by the integration tests.

#![allow(dead_code)]

use std::cell::Cell;
use std::rc::Rc;

use nativetest::runner::{LiveObjectCounter, ModuleExport, TestModule};

/// Live-object counter that test callables move directly.
#[derive(Clone, Default)]
pub struct SharedCounter(Rc<Cell<i64>>);

impl SharedCounter {
    pub fn new(start: i64) -> Self {
        Self(Rc::new(Cell::new(start)))
    }

    pub fn add(&self, delta: i64) {
        self.0.set(self.0.get() + delta);
    }
}

impl LiveObjectCounter for SharedCounter {
    fn count_live_objects(&self) -> i64 {
        self.0.get()
    }
}

/// Number of times a callable has been invoked.
#[derive(Clone, Default)]
pub struct CallCount(Rc<Cell<u32>>);

impl CallCount {
    pub fn get(&self) -> u32 {
        self.0.get()
    }

    fn bump(&self) -> u32 {
        self.0.set(self.0.get() + 1);
        self.0.get()
    }
}

/// A module assembled export by export.
#[derive(Default)]
pub struct FakeModule {
    exports: Vec<ModuleExport>,
    counter: Option<SharedCounter>,
}

impl FakeModule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an export that returns `status` on every call and counts its calls.
    pub fn with_export(mut self, name: &str, status: i32) -> (Self, CallCount) {
        let calls = CallCount::default();
        let seen = calls.clone();
        self.exports.push(ModuleExport::new(
            name,
            Rc::new(move || {
                seen.bump();
                status
            }),
        ));
        (self, calls)
    }

    /// Add an export whose body receives the 1-based call number.
    pub fn with_body(mut self, name: &str, body: impl Fn(u32) -> i32 + 'static) -> (Self, CallCount) {
        let calls = CallCount::default();
        let seen = calls.clone();
        self.exports
            .push(ModuleExport::new(name, Rc::new(move || body(seen.bump()))));
        (self, calls)
    }

    pub fn with_uncallable(mut self, name: &str) -> Self {
        self.exports.push(ModuleExport::uncallable(name));
        self
    }

    pub fn with_counter(mut self, counter: &SharedCounter) -> Self {
        self.counter = Some(counter.clone());
        self
    }
}

impl TestModule for FakeModule {
    fn name(&self) -> &str {
        "fake_module"
    }

    fn exports(&self) -> Vec<ModuleExport> {
        self.exports.clone()
    }

    fn live_object_counter(&self) -> Option<&dyn LiveObjectCounter> {
        self.counter.as_ref().map(|c| c as &dyn LiveObjectCounter)
    }
}

pub fn transcript(out: Vec<u8>) -> String {
    String::from_utf8(out).unwrap_or_else(|e| panic!("transcript is not UTF-8: {e}"))
}
