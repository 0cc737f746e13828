//! Circular dependency detection infrastructure.

use std::cell::RefCell;

use crate::error::{DiError, DiResult};
use crate::key::Key;

pub(crate) const MAX_DEPTH: usize = 1024;

// Thread-local resolution stack for circular dependency detection
thread_local! {
    static RESOLUTION_STACK: RefCell<Vec<&'static str>> = const { RefCell::new(Vec::new()) };
}

/// Guard for managing the thread-local resolution stack.
///
/// Pops its entry on drop, including during unwinding out of a panicking
/// producer, so the stack never holds stale names.
pub(crate) struct StackGuard {
    name: &'static str,
}

impl StackGuard {
    pub(crate) fn enter(name: &'static str) -> DiResult<Self> {
        RESOLUTION_STACK.with(|stack| {
            let mut stack = stack.borrow_mut();

            if stack.iter().any(|&n| n == name) {
                let mut path = stack.clone();
                path.push(name);
                return Err(DiError::Circular(path));
            }

            if stack.len() >= MAX_DEPTH {
                return Err(DiError::DepthExceeded(stack.len()));
            }

            stack.push(name);
            Ok(Self { name })
        })
    }
}

impl Drop for StackGuard {
    fn drop(&mut self) {
        RESOLUTION_STACK.with(|stack| {
            let last = stack.borrow_mut().pop();
            debug_assert_eq!(last, Some(self.name));
        });
    }
}

/// Runs a resolution with circular dependency detection for `key`.
pub(crate) fn with_circular_guard<T, F>(key: &Key, f: F) -> DiResult<T>
where
    F: FnOnce() -> DiResult<T>,
{
    let _guard = StackGuard::enter(key.display_name())?;
    f()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reentering_the_same_name_reports_the_path() {
        let outer = StackGuard::enter("A").unwrap();
        let inner = StackGuard::enter("B").unwrap();
        let err = StackGuard::enter("A").err().unwrap();
        assert_eq!(err, DiError::Circular(vec!["A", "B", "A"]));
        drop(inner);
        drop(outer);

        // Stack is clean again once the guards are gone.
        assert!(StackGuard::enter("A").is_ok());
    }

    #[test]
    fn depth_limit_is_enforced() {
        let names: Vec<&'static str> = (0..MAX_DEPTH)
            .map(|i| &*Box::leak(format!("T{i}").into_boxed_str()))
            .collect();
        let guards: Vec<StackGuard> = names.iter().map(|&n| StackGuard::enter(n).unwrap()).collect();

        assert_eq!(StackGuard::enter("one-too-many").err(), Some(DiError::DepthExceeded(MAX_DEPTH)));
        // Guards pop in reverse order of entry.
        guards.into_iter().rev().for_each(drop);
        assert!(StackGuard::enter("one-too-many").is_ok());
    }
}
