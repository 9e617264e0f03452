//! Catch-table dispatch.
//!
//! A [`Catch`] is the decision point where a caught error is routed by
//! ancestry: clauses are tried in declaration order and only the first one
//! whose target the error inherits from runs, as with a sequence of `catch`
//! blocks ordered from most to least specific.
//!
//! ```rust
//! use baserr::{AnyError, Catch, ErrorRef, RootError};
//!
//! let err = RootError::new("root");
//! let handled = Catch::new(Some(ErrorRef::node(&err)))
//!     .on::<RootError>(|e| format!("root: {e}"))
//!     .on::<AnyError>(|_| "anything".to_string())
//!     .finish();
//! assert_eq!(handled.as_deref(), Some("root: root"));
//! ```

use std::any::type_name;

use tracing::debug;

use crate::ancestry::ErrorRef;
use crate::inherit::{Target, inherited_from};

/// Ordered catch clauses over a single candidate error.
#[must_use = "the handler result is only available through `finish` or `otherwise`"]
pub struct Catch<'a, R> {
    error: Option<ErrorRef<'a>>,
    caught: Option<R>,
}

impl<'a, R> Catch<'a, R> {
    /// Start a catch table for `error`. An absent error is never caught.
    pub fn new(error: Option<ErrorRef<'a>>) -> Self {
        Self {
            error,
            caught: None,
        }
    }

    /// Add a clause for errors inherited from `T`.
    ///
    /// `handler` receives the original error, not the matched ancestor. It
    /// runs only if no earlier clause caught the error.
    pub fn on<T: Target + ?Sized>(mut self, handler: impl FnOnce(ErrorRef<'a>) -> R) -> Self {
        if self.caught.is_some() {
            return self;
        }
        if let Some(error) = self.error {
            if inherited_from::<T>(Some(error)) {
                debug!(target_type = type_name::<T>(), error = %error, "caught");
                self.caught = Some(handler(error));
            }
        }
        self
    }

    /// Whether some clause has already caught the error.
    #[inline]
    pub fn is_caught(&self) -> bool {
        self.caught.is_some()
    }

    /// Result of the clause that caught the error, if any.
    pub fn finish(self) -> Option<R> {
        self.caught
    }

    /// Result of the clause that caught the error, or of `fallback`.
    pub fn otherwise<F>(self, fallback: F) -> R
    where
        F: FnOnce(Option<ErrorRef<'a>>) -> R,
    {
        match self.caught {
            Some(result) => result,
            None => fallback(self.error),
        }
    }
}
