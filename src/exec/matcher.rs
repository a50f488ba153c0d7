// src/exec/matcher.rs

//! Output matchers: regex-triggered diagnostics layered over command output.
//!
//! A matcher never changes whether a command succeeded. Every matcher whose
//! pattern matches fires once, in registration order, and the command's own
//! exit status still decides success or failure afterwards.

use std::fmt;

use colored::Colorize;
use regex::{Captures, Regex};
use tracing::{debug, warn};

use crate::errors::Result;

pub type MatchHandler = Box<dyn Fn(&Captures<'_>)>;

pub struct OutputMatcher {
    pattern: Regex,
    handler: MatchHandler,
}

impl OutputMatcher {
    pub fn new(pattern: &str, handler: impl Fn(&Captures<'_>) + 'static) -> Result<Self> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
            handler: Box::new(handler),
        })
    }

    /// Matcher that prints a remediation hint when `pattern` shows up.
    pub fn hint(pattern: &str, message: impl Into<String>) -> Result<Self> {
        let message = message.into();
        Self::new(pattern, move |_| {
            warn!(hint = %message, "recognised failure pattern in command output");
            eprintln!("{}", message.yellow());
        })
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    /// Run the pattern against `output`, firing the handler on a match.
    ///
    /// Returns whether the handler fired.
    pub fn check(&self, output: &str) -> bool {
        match self.pattern.captures(output) {
            Some(caps) => {
                debug!(pattern = %self.pattern, "output matcher fired");
                (self.handler)(&caps);
                true
            }
            None => false,
        }
    }
}

impl fmt::Debug for OutputMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OutputMatcher")
            .field("pattern", &self.pattern.as_str())
            .finish_non_exhaustive()
    }
}

/// Check every matcher against `output`; returns how many fired.
pub fn apply_matchers(matchers: &[OutputMatcher], output: &str) -> usize {
    matchers.iter().filter(|m| m.check(output)).count()
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    fn recording(pattern: &str, label: &'static str, log: &Rc<RefCell<Vec<String>>>) -> OutputMatcher {
        let log = Rc::clone(log);
        OutputMatcher::new(pattern, move |caps| {
            log.borrow_mut().push(format!("{label}:{}", &caps[0]));
        })
        .unwrap()
    }

    #[test]
    fn all_matching_matchers_fire_in_registration_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let matchers = vec![
            recording("invalid user: \\w+", "user", &log),
            recording("Permission denied", "perm", &log),
            recording("no such file", "missing", &log),
        ];

        let fired = apply_matchers(
            &matchers,
            "chown: Permission denied\nchown: invalid user: deploy\n",
        );

        assert_eq!(fired, 2);
        assert_eq!(
            *log.borrow(),
            vec!["user:invalid user: deploy", "perm:Permission denied"]
        );
    }

    #[test]
    fn matcher_fires_once_even_with_repeated_matches() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let matchers = vec![recording("denied", "perm", &log)];

        apply_matchers(&matchers, "denied\ndenied\ndenied");

        assert_eq!(log.borrow().len(), 1);
    }

    #[test]
    fn invalid_pattern_is_rejected() {
        assert!(OutputMatcher::new("(unclosed", |_| {}).is_err());
    }
}
