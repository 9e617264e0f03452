//! Prelude module for common re-exports.
//!
//! ```rust
//! use baserr::prelude::*;
//! ```

// ─── Capability ─────────────────────────────────────────────────────
pub use crate::ancestry::{Ancestry, AnyError, AsError, ErrorRef, Parent};

// ─── Nodes ──────────────────────────────────────────────────────────
pub use crate::base::{Base, RootError, new_error};

// ─── Matching ───────────────────────────────────────────────────────
pub use crate::catch::Catch;
pub use crate::inherit::{AnyAncestry, Lineage, Target, inherited_from};
