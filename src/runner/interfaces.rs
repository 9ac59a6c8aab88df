//! Test runner boundary interfaces
//!
//! This module defines the traits the runner consumes:
//! - `TestModule`: an imported module and its named exports
//! - `LiveObjectCounter`: the optional live-object introspection capability
//!
//! The native loader in `crate::module` implements both over a shared library. Tests implement them in
//! memory, which is how the leak protocol is exercised without building anything.

use std::fmt;
use std::rc::Rc;

/// A zero-argument test procedure returning its status (`0` = passed).
pub type TestCallable = Rc<dyn Fn() -> i32>;

/// One named export of a module, as listed by the module.
#[derive(Clone)]
pub struct ModuleExport {
    pub name: String,
    /// `None` when the export cannot be called
    pub callable: Option<TestCallable>,
}

impl ModuleExport {
    pub fn new(name: impl Into<String>, callable: TestCallable) -> Self {
        Self {
            name: name.into(),
            callable: Some(callable),
        }
    }

    /// An export that carries a name but nothing to call.
    pub fn uncallable(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            callable: None,
        }
    }
}

impl fmt::Debug for ModuleExport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModuleExport")
            .field("name", &self.name)
            .field("callable", &self.callable.is_some())
            .finish()
    }
}

/// A global live-object counter sampled around each repetition of the test battery.
pub trait LiveObjectCounter {
    fn count_live_objects(&self) -> i64;
}

/// An imported test module.
pub trait TestModule {
    /// Module name, for diagnostics.
    fn name(&self) -> &str;

    /// All module-level exports in the module's own order.
    fn exports(&self) -> Vec<ModuleExport>;

    /// The live-object counter, if the module was built with allocation tracking.
    fn live_object_counter(&self) -> Option<&dyn LiveObjectCounter>;
}

/// A discovered test: a name and the procedure to call.
#[derive(Clone)]
pub struct TestCase {
    pub name: String,
    callable: TestCallable,
}

impl TestCase {
    pub fn new(name: impl Into<String>, callable: TestCallable) -> Self {
        Self {
            name: name.into(),
            callable,
        }
    }

    /// Call the test and return its status.
    pub fn call(&self) -> i32 {
        (self.callable)()
    }

    /// Whether two cases share the same underlying procedure.
    pub fn same_callable(&self, other: &TestCase) -> bool {
        Rc::ptr_eq(&self.callable, &other.callable)
    }
}

impl fmt::Debug for TestCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestCase").field("name", &self.name).finish_non_exhaustive()
    }
}
