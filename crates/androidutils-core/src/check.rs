//! Guard checks that log why they failed.
//!
//! Each check answers a yes/no question about an input and, on "no", writes
//! the matching warning through the [`DebugLog`] it was built with. Callers use
//! them at the top of an operation to bail out early.

use std::collections::HashMap;

use crate::debug::DebugLog;

/// Checks bound to a log and the tag of the calling component.
#[derive(Debug, Clone, Copy)]
pub struct Check<'a> {
    log: DebugLog,
    tag: &'a str,
}

impl<'a> Check<'a> {
    pub fn new(log: DebugLog, tag: &'a str) -> Self {
        Self { log, tag }
    }

    /// Pass `value` through, logging when it is absent.
    pub fn not_null<T>(&self, variable: &str, method: &str, value: Option<T>) -> Option<T> {
        if value.is_none() {
            self.log.null_value(self.tag, variable, method);
        }
        value
    }

    /// A string that is present and non-empty.
    pub fn valid_string(&self, variable: &str, method: &str, value: Option<&str>) -> bool {
        let variable = format!("{} String", variable);
        match self.not_null(&variable, method, value) {
            Some(s) => self.positive_int(&variable, method, s.len() as i64),
            None => false,
        }
    }

    pub fn invalid_string(&self, variable: &str, method: &str, value: Option<&str>) -> bool {
        !self.valid_string(variable, method, value)
    }

    /// Strictly greater than zero.
    pub fn positive_int(&self, name: &str, method: &str, value: i64) -> bool {
        if value > 0 {
            return true;
        }
        self.log.warn(
            self.tag,
            &format!("The basic int variable {} has invalid value (less than 1).", name),
            method,
        );
        false
    }

    /// Every value is usable; logs each one that isn't.
    pub fn pass(&self, method: &str, values: &[&dyn Checkable]) -> bool {
        let mut has_invalid = false;
        for value in values {
            has_invalid |= value.is_unusable(self, method);
        }
        !has_invalid
    }

    pub fn not_pass(&self, method: &str, values: &[&dyn Checkable]) -> bool {
        !self.pass(method, values)
    }
}

/// A value that [`Check::pass`] knows how to judge.
pub trait Checkable {
    /// Whether the value is empty, non-positive or missing. Logs the reason.
    fn is_unusable(&self, check: &Check<'_>, method: &str) -> bool;
}

impl Checkable for str {
    fn is_unusable(&self, check: &Check<'_>, method: &str) -> bool {
        if self.is_empty() {
            check.log.zero_length(check.tag, "String", method);
            return true;
        }
        false
    }
}

impl Checkable for String {
    fn is_unusable(&self, check: &Check<'_>, method: &str) -> bool {
        self.as_str().is_unusable(check, method)
    }
}

impl Checkable for &str {
    fn is_unusable(&self, check: &Check<'_>, method: &str) -> bool {
        (**self).is_unusable(check, method)
    }
}

impl<T> Checkable for [T] {
    fn is_unusable(&self, check: &Check<'_>, method: &str) -> bool {
        if self.is_empty() {
            check.log.zero_size(check.tag, "Collection", method);
            return true;
        }
        false
    }
}

impl<T> Checkable for Vec<T> {
    fn is_unusable(&self, check: &Check<'_>, method: &str) -> bool {
        self.as_slice().is_unusable(check, method)
    }
}

impl<K, V, S> Checkable for HashMap<K, V, S> {
    fn is_unusable(&self, check: &Check<'_>, method: &str) -> bool {
        if self.is_empty() {
            check.log.zero_size(check.tag, "Map", method);
            return true;
        }
        false
    }
}

macro_rules! checkable_int {
    ($($ty:ty),*) => {
        $(
            impl Checkable for $ty {
                fn is_unusable(&self, check: &Check<'_>, method: &str) -> bool {
                    // Values above i64::MAX are still positive
                    let value = i64::try_from(*self).unwrap_or(i64::MAX);
                    !check.positive_int("integer", method, value)
                }
            }
        )*
    };
}

checkable_int!(i32, i64, u8, u32, usize);

impl<T: Checkable> Checkable for Option<T> {
    fn is_unusable(&self, check: &Check<'_>, method: &str) -> bool {
        match self {
            Some(value) => value.is_unusable(check, method),
            None => {
                check.log.null_value(check.tag, "Object", method);
                true
            }
        }
    }
}
