//! Ancestry-chain nodes.
//!
//! [`Base<P>`] pairs a message with a parent slot whose type `P` is fixed at
//! the type level. [`RootError`] is the top of every hierarchy: its parent
//! type is the general [`AnyError`].
//!
//! Construction is leaf-only. [`Base::new`] and [`new_error`] set the
//! message and leave the parent slot empty, so walking from a freshly built
//! node stops after the node itself. Deeper chains come from consumer types
//! that embed a `Base` and implement [`Ancestry`] over a parent they hold.

use std::error::Error;
use std::fmt;

use crate::ancestry::{Ancestry, AnyError, ErrorRef, Parent};

/// An error declared to inherit from an error of type `P`.
///
/// The message is immutable after construction. The parent slot is owned
/// exclusively by the node and may be empty; an empty slot terminates the
/// chain.
pub struct Base<P> {
    message: String,
    parent: Option<P>,
}

/// First-level error. Used as the parent type of independent error families.
pub type RootError = Base<AnyError>;

impl<P: Parent> Base<P> {
    /// Create a node carrying `message`. The parent slot is left empty.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            parent: None,
        }
    }

    /// The message this node was built with.
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The parent value, if the slot holds one.
    #[inline]
    pub fn parent(&self) -> Option<&P> {
        self.parent.as_ref()
    }
}

impl<P: fmt::Debug> fmt::Debug for Base<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Base")
            .field("message", &self.message)
            .field("parent", &self.parent)
            .finish()
    }
}

impl<P> fmt::Display for Base<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl<P: Parent> Error for Base<P> {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.parent.as_ref().map(|parent| parent.erase().as_error())
    }
}

impl<P: Parent> Ancestry for Base<P> {
    #[inline]
    fn describe(&self) -> &str {
        &self.message
    }

    #[inline]
    fn ancestor(&self) -> Option<ErrorRef<'_>> {
        self.parent.as_ref().map(Parent::erase)
    }
}

/// Create an error of parent type `P` with a message, erased behind the
/// ancestry capability.
///
/// ```rust
/// use baserr::{Ancestry, AnyError, ErrorRef, inherited_from, new_error};
///
/// let leaf = new_error::<AnyError>("disk full");
/// assert_eq!(leaf.describe(), "disk full");
/// assert!(inherited_from::<AnyError>(Some(ErrorRef::Node(&*leaf))));
/// assert!(!inherited_from::<AnyError>(leaf.ancestor()));
/// ```
pub fn new_error<P: Parent>(message: impl Into<String>) -> Box<dyn Ancestry> {
    Box::new(Base::<P>::new(message))
}
