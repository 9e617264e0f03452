//! Ancestry matching.
//!
//! [`inherited_from::<T>`](inherited_from) answers the question a `catch`
//! block asks: is this error, or anything it declares as an ancestor, a `T`?
//!
//! ## Walk order
//!
//! The chain is walked strictly in parent order: candidate, its ancestor,
//! that ancestor's ancestor, and so on. Walking stops at the first empty
//! parent slot or after the first link that does not expose the ancestry
//! capability. There is no cycle detection; chains are acyclic because each
//! parent type is fixed to a more general type than its child.

use std::any::type_name;
use std::error::Error;
use std::iter::FusedIterator;

use tracing::trace;

use crate::ancestry::{AnyError, ErrorRef};

/// A type that chain links can be matched against.
///
/// Every `'static` error type is a target, satisfied only by links whose
/// dynamic type is exactly that type. [`AnyError`] is satisfied by every
/// present link.
pub trait Target: 'static {
    /// Whether `link` satisfies this target on its own, without walking.
    fn is_satisfied_by(link: ErrorRef<'_>) -> bool;
}

impl<E: Error + 'static> Target for E {
    #[inline]
    fn is_satisfied_by(link: ErrorRef<'_>) -> bool {
        link.as_error().is::<E>()
    }
}

impl Target for AnyError {
    #[inline]
    fn is_satisfied_by(_link: ErrorRef<'_>) -> bool {
        true
    }
}

/// Target satisfied by any ancestry-capable link.
///
/// Unlike [`AnyError`], a plain error that does not expose [`Ancestry`]
/// never satisfies it, so matching walks the chain only as far as the
/// candidate itself.
///
/// ```rust
/// use baserr::{AnyAncestry, ErrorRef, RootError, inherited_from};
///
/// let root = RootError::new("root");
/// let io = std::io::Error::other("denied");
/// assert!(inherited_from::<AnyAncestry>(Some(ErrorRef::node(&root))));
/// assert!(!inherited_from::<AnyAncestry>(Some(ErrorRef::plain(&io))));
/// ```
///
/// [`Ancestry`]: crate::Ancestry
#[derive(Debug)]
pub enum AnyAncestry {}

impl Target for AnyAncestry {
    #[inline]
    fn is_satisfied_by(link: ErrorRef<'_>) -> bool {
        link.as_ancestry().is_some()
    }
}

/// Check whether `candidate` is inherited from an error of type `T`.
///
/// Returns `false` for an absent candidate regardless of `T`, including
/// [`AnyError`]. Never fails.
///
/// ```rust
/// use baserr::{inherited_from, AnyError, ErrorRef, RootError};
///
/// let root = RootError::new("root");
/// assert!(inherited_from::<RootError>(Some(ErrorRef::node(&root))));
/// assert!(inherited_from::<AnyError>(Some(ErrorRef::node(&root))));
/// assert!(!inherited_from::<AnyError>(None));
/// ```
pub fn inherited_from<T: Target + ?Sized>(candidate: Option<ErrorRef<'_>>) -> bool {
    let target = type_name::<T>();
    for (depth, link) in Lineage::new(candidate).enumerate() {
        if T::is_satisfied_by(link) {
            trace!(target_type = target, depth, error = %link, "ancestry match");
            return true;
        }
        trace!(target_type = target, depth, error = %link, "ancestry link does not match");
    }
    false
}

/// Iterator over an ancestry chain, starting with the candidate itself.
///
/// ```rust
/// use baserr::{Lineage, ErrorRef, RootError};
///
/// let root = RootError::new("root");
/// let messages: Vec<String> = Lineage::new(Some(ErrorRef::node(&root)))
///     .map(|link| link.to_string())
///     .collect();
/// assert_eq!(messages, ["root"]);
/// ```
#[derive(Debug, Clone)]
pub struct Lineage<'a> {
    next: Option<ErrorRef<'a>>,
}

impl<'a> Lineage<'a> {
    /// Start a walk at `candidate`. An absent candidate yields nothing.
    #[inline]
    pub fn new(candidate: Option<ErrorRef<'a>>) -> Self {
        Self { next: candidate }
    }
}

impl<'a> Iterator for Lineage<'a> {
    type Item = ErrorRef<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.take()?;
        self.next = current.ancestor();
        Some(current)
    }
}

impl FusedIterator for Lineage<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Ancestry, Base, RootError};
    use std::fmt;

    #[derive(Debug)]
    struct Foreign;

    impl fmt::Display for Foreign {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("foreign")
        }
    }

    impl Error for Foreign {}

    /// Two-level node: holds an actual root instance as its parent.
    #[derive(Debug)]
    struct Child {
        base: Base<RootError>,
        root: RootError,
    }

    impl fmt::Display for Child {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            fmt::Display::fmt(&self.base, f)
        }
    }

    impl Error for Child {}

    impl Ancestry for Child {
        fn describe(&self) -> &str {
            self.base.describe()
        }

        fn ancestor(&self) -> Option<ErrorRef<'_>> {
            Some(ErrorRef::node(&self.root))
        }
    }

    fn child() -> Child {
        Child {
            base: Base::new("child"),
            root: RootError::new("root"),
        }
    }

    #[test]
    fn absent_candidate_never_matches() {
        assert!(!inherited_from::<AnyError>(None));
        assert!(!inherited_from::<RootError>(None));
        assert!(!inherited_from::<Foreign>(None));
    }

    #[test]
    fn exact_type_matches_at_depth_zero() {
        let root = RootError::new("root");
        assert!(inherited_from::<RootError>(Some(ErrorRef::node(&root))));

        let foreign = Foreign;
        assert!(inherited_from::<Foreign>(Some(ErrorRef::plain(&foreign))));
    }

    #[test]
    fn plain_error_is_not_walked() {
        let foreign = Foreign;
        assert!(!inherited_from::<RootError>(Some(ErrorRef::plain(&foreign))));
    }

    #[test]
    fn any_error_matches_every_present_link() {
        let foreign = Foreign;
        let root = RootError::new("root");
        assert!(inherited_from::<AnyError>(Some(ErrorRef::plain(&foreign))));
        assert!(inherited_from::<AnyError>(Some(ErrorRef::node(&root))));
    }

    #[test]
    fn walks_to_held_parent() {
        let child = child();
        let link = ErrorRef::node(&child);
        assert!(inherited_from::<Child>(Some(link)));
        assert!(inherited_from::<RootError>(Some(link)));
        assert!(!inherited_from::<Foreign>(Some(link)));
    }

    #[test]
    fn any_ancestry_matches_only_nodes() {
        let foreign = Foreign;
        let child = child();
        assert!(inherited_from::<AnyAncestry>(Some(ErrorRef::node(&child))));
        assert!(!inherited_from::<AnyAncestry>(Some(ErrorRef::plain(&foreign))));
        assert!(!inherited_from::<AnyAncestry>(None));

        let as_plain: &(dyn Error + 'static) = &child;
        assert!(!inherited_from::<AnyAncestry>(Some(ErrorRef::from(as_plain))));
    }

    #[test]
    fn fresh_leaf_has_no_ancestor_to_match() {
        let leaf = Base::<AnyError>::new("disk full");
        assert!(!inherited_from::<AnyError>(leaf.ancestor()));
    }

    #[test]
    fn lineage_yields_in_parent_order() {
        let child = child();
        let messages: Vec<String> = Lineage::new(Some(ErrorRef::node(&child)))
            .map(|link| link.to_string())
            .collect();
        assert_eq!(messages, ["child", "root"]);
    }

    #[test]
    fn lineage_stops_after_plain_link() {
        let foreign = Foreign;
        let mut walk = Lineage::new(Some(ErrorRef::plain(&foreign)));
        assert!(walk.next().is_some());
        assert!(walk.next().is_none());
        assert!(walk.next().is_none());
    }

    #[test]
    fn repeated_calls_agree() {
        let child = child();
        let link = Some(ErrorRef::node(&child));
        let first = inherited_from::<RootError>(link);
        for _ in 0..16 {
            assert_eq!(inherited_from::<RootError>(link), first);
        }
    }
}
