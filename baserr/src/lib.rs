//! Inherited errors.
//!
//! This crate provides a simple way to declare errors that inherit from
//! other errors and to check whether an error inherits from a given type,
//! the way an object-oriented `catch` block selects exceptions by base class.
//!
//! # Module Structure
//!
//! - [`ancestry`] - The ancestry capability, erased links and parent slots
//! - [`base`] - Ancestry-chain nodes, the root node and construction
//! - [`inherit`] - The ancestry-match predicate and chain walking
//! - [`catch`] - Ordered catch-table dispatch
//! - [`prelude`] - Common re-exports for convenience
//!
//! # Usage
//!
//! ```rust
//! use baserr::prelude::*;
//!
//! let leaf = new_error::<AnyError>("disk full");
//! assert_eq!(leaf.describe(), "disk full");
//!
//! // Construction never fills the parent slot.
//! assert!(!inherited_from::<AnyError>(leaf.ancestor()));
//!
//! // Every present error satisfies the general capability.
//! let root = RootError::new("root");
//! assert!(inherited_from::<AnyError>(Some(ErrorRef::node(&root))));
//! ```
//!
//! Chains deeper than one link are built by composition: a consumer type
//! embeds a [`Base`] for its message, holds its parent, and implements
//! [`Ancestry`] to expose both. See the [`Ancestry`] docs for an example.

pub mod ancestry;
pub mod base;
pub mod catch;
pub mod inherit;
pub mod prelude;

pub use ancestry::{Ancestry, AnyError, AsError, ErrorRef, Parent};
pub use base::{Base, RootError, new_error};
pub use catch::Catch;
pub use inherit::{AnyAncestry, Lineage, Target, inherited_from};
