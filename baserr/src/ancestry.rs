//! The ancestry capability and the erased-error handle.
//!
//! A value is *ancestry-capable* when it implements [`Ancestry`]: it can
//! describe itself and name the next, more general error in its chain.
//! Links of a chain are passed around as [`ErrorRef`], a borrowed handle
//! that hides the concrete type of each link while still recording whether
//! the link can be walked further.
//!
//! # Parent slots
//!
//! The parent slot of a [`Base`](crate::Base) node is bounded by [`Parent`].
//! Every ancestry-capable type is a `Parent` automatically. The most general
//! parent is [`AnyError`], which owns an arbitrary error of either kind.

use std::error::Error;
use std::fmt;

/// Upcast helper for ancestry trait objects.
///
/// Implemented for every sized `'static` error; it exists so that a
/// `&dyn Ancestry` can be viewed as a `&dyn Error` for type checks.
pub trait AsError {
    /// Borrow `self` as a type-erased error.
    fn as_error(&self) -> &(dyn Error + 'static);
}

impl<E: Error + 'static> AsError for E {
    #[inline]
    fn as_error(&self) -> &(dyn Error + 'static) {
        self
    }
}

/// The ancestry capability.
///
/// Implemented by [`Base`](crate::Base) and by any consumer error type that
/// embeds a `Base` and forwards to it. A consumer type that holds an actual
/// parent instance returns it from [`ancestor`](Ancestry::ancestor); that is
/// how chains deeper than one link are assembled.
///
/// # Example
///
/// ```rust
/// use baserr::{Ancestry, Base, ErrorRef, RootError};
/// use std::fmt;
///
/// #[derive(Debug)]
/// struct StorageError {
///     base: Base<RootError>,
///     root: RootError,
/// }
///
/// impl fmt::Display for StorageError {
///     fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
///         fmt::Display::fmt(&self.base, f)
///     }
/// }
///
/// impl std::error::Error for StorageError {}
///
/// impl Ancestry for StorageError {
///     fn describe(&self) -> &str {
///         self.base.describe()
///     }
///
///     fn ancestor(&self) -> Option<ErrorRef<'_>> {
///         Some(ErrorRef::node(&self.root))
///     }
/// }
/// ```
pub trait Ancestry: AsError + Error + Send + Sync + 'static {
    /// Human-readable message of this link.
    fn describe(&self) -> &str;

    /// The declared parent, erased. `None` terminates the chain.
    fn ancestor(&self) -> Option<ErrorRef<'_>>;
}

/// Borrowed, type-erased link of an ancestry chain.
///
/// The discriminator records whether the link exposes the ancestry
/// capability. Only [`ErrorRef::Node`] links are walked by the matcher.
#[derive(Clone, Copy)]
pub enum ErrorRef<'a> {
    /// An ancestry-capable error.
    Node(&'a dyn Ancestry),
    /// Any other error. Walking stops here.
    Plain(&'a (dyn Error + 'static)),
}

impl<'a> ErrorRef<'a> {
    /// Erase an ancestry-capable value.
    #[inline]
    pub fn node<A: Ancestry>(node: &'a A) -> Self {
        Self::Node(node)
    }

    /// Erase a plain error. The result is never walked past.
    #[inline]
    pub fn plain<E: Error + 'static>(error: &'a E) -> Self {
        Self::Plain(error)
    }

    /// View the link as a plain `std::error::Error`.
    #[inline]
    pub fn as_error(self) -> &'a (dyn Error + 'static) {
        match self {
            Self::Node(node) => node.as_error(),
            Self::Plain(error) => error,
        }
    }

    /// The ancestry capability, if this link exposes it.
    #[inline]
    pub fn as_ancestry(self) -> Option<&'a dyn Ancestry> {
        match self {
            Self::Node(node) => Some(node),
            Self::Plain(_) => None,
        }
    }

    /// Next link in the chain.
    ///
    /// `None` for plain errors and for nodes whose parent slot is empty.
    #[inline]
    pub fn ancestor(self) -> Option<ErrorRef<'a>> {
        self.as_ancestry()?.ancestor()
    }

    /// Shorthand for [`inherited_from::<T>(Some(self))`](crate::inherited_from).
    #[inline]
    pub fn inherits<T: crate::Target + ?Sized>(self) -> bool {
        crate::inherited_from::<T>(Some(self))
    }
}

impl fmt::Debug for ErrorRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Node(node) => f.debug_tuple("Node").field(node).finish(),
            Self::Plain(error) => f.debug_tuple("Plain").field(error).finish(),
        }
    }
}

impl fmt::Display for ErrorRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.as_error(), f)
    }
}

impl<'a> From<&'a dyn Ancestry> for ErrorRef<'a> {
    #[inline]
    fn from(node: &'a dyn Ancestry) -> Self {
        Self::Node(node)
    }
}

impl<'a> From<&'a (dyn Error + 'static)> for ErrorRef<'a> {
    #[inline]
    fn from(error: &'a (dyn Error + 'static)) -> Self {
        Self::Plain(error)
    }
}

impl<'a> From<&'a (dyn Error + Send + Sync + 'static)> for ErrorRef<'a> {
    #[inline]
    fn from(error: &'a (dyn Error + Send + Sync + 'static)) -> Self {
        Self::Plain(error)
    }
}

impl<'a> From<&'a AnyError> for ErrorRef<'a> {
    #[inline]
    fn from(error: &'a AnyError) -> Self {
        error.erase()
    }
}

/// Bound on the parent slot of a [`Base`](crate::Base) node.
///
/// Ancestry-capable types implement this automatically. A plain error type
/// can be used as a parent by implementing it with [`ErrorRef::Plain`]:
///
/// ```rust
/// use baserr::{ErrorRef, Parent};
///
/// #[derive(Debug)]
/// struct Io;
/// # impl std::fmt::Display for Io {
/// #     fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { f.write_str("io") }
/// # }
/// # impl std::error::Error for Io {}
///
/// impl Parent for Io {
///     fn erase(&self) -> ErrorRef<'_> {
///         ErrorRef::Plain(self)
///     }
/// }
/// ```
pub trait Parent: fmt::Debug + Send + Sync + 'static {
    /// Erase the parent value into a chain link.
    fn erase(&self) -> ErrorRef<'_>;
}

impl<A: Ancestry> Parent for A {
    #[inline]
    fn erase(&self) -> ErrorRef<'_> {
        ErrorRef::Node(self)
    }
}

/// The general error capability.
///
/// Owns an error of any kind. As a parent type it is the least specific
/// ancestor (see [`RootError`](crate::RootError)); as a match target it is
/// satisfied by every present link.
///
/// Like `anyhow::Error`, `AnyError` does not implement `std::error::Error`.
/// Erasing it yields the error it holds, so it never appears as a link of
/// its own.
pub struct AnyError(Repr);

enum Repr {
    Node(Box<dyn Ancestry>),
    Plain(Box<dyn Error + Send + Sync + 'static>),
}

impl AnyError {
    /// Wrap a plain error. The chain is not walked past it.
    pub fn new<E>(error: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        Self(Repr::Plain(Box::new(error)))
    }

    /// Wrap an ancestry-capable error, keeping its chain walkable.
    pub fn from_ancestry<A: Ancestry>(node: A) -> Self {
        Self(Repr::Node(Box::new(node)))
    }

    /// Borrow the wrapped error as a chain link.
    #[inline]
    pub fn erase(&self) -> ErrorRef<'_> {
        match &self.0 {
            Repr::Node(node) => ErrorRef::Node(&**node),
            Repr::Plain(error) => ErrorRef::Plain(&**error),
        }
    }

    /// Whether the wrapped error exposes the ancestry capability.
    #[inline]
    pub fn is_ancestry(&self) -> bool {
        matches!(self.0, Repr::Node(_))
    }
}

impl Parent for AnyError {
    #[inline]
    fn erase(&self) -> ErrorRef<'_> {
        AnyError::erase(self)
    }
}

impl From<Box<dyn Ancestry>> for AnyError {
    fn from(node: Box<dyn Ancestry>) -> Self {
        Self(Repr::Node(node))
    }
}

impl From<Box<dyn Error + Send + Sync + 'static>> for AnyError {
    fn from(error: Box<dyn Error + Send + Sync + 'static>) -> Self {
        Self(Repr::Plain(error))
    }
}

impl fmt::Debug for AnyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Repr::Node(node) => fmt::Debug::fmt(node, f),
            Repr::Plain(error) => fmt::Debug::fmt(error, f),
        }
    }
}

impl fmt::Display for AnyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.erase(), f)
    }
}
