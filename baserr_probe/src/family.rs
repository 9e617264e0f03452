//! Demonstration error family.
//!
//! ```text
//! RootError ← StorageError ← DiskFull
//!                          ← QuotaExceeded
//!           ← NetworkError ← Timeout
//! ```
//!
//! Every member embeds a [`Base`] that declares its parent type and holds
//! an instance of that parent, so the whole chain up to [`RootError`] can be
//! walked, both through [`Ancestry::ancestor`] and through
//! `std::error::Error::source`. Foreign errors are represented by
//! `std::io::Error`.

use std::fmt;
use std::io;

use baserr::{Ancestry, AnyError, Base, Catch, ErrorRef, RootError, inherited_from};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Declare a family member whose parent is built with a fixed message.
macro_rules! family_member {
    ($(#[$meta:meta])* $name:ident: $parent:ty = $parent_message:literal) => {
        $(#[$meta])*
        #[derive(Debug, Error)]
        #[error("{base}")]
        pub struct $name {
            base: Base<$parent>,
            #[source]
            parent: $parent,
        }

        impl $name {
            /// Create the error together with its ancestors.
            pub fn new(message: impl Into<String>) -> Self {
                Self {
                    base: Base::new(message),
                    parent: <$parent>::new($parent_message),
                }
            }
        }

        impl Ancestry for $name {
            fn describe(&self) -> &str {
                self.base.describe()
            }

            fn ancestor(&self) -> Option<ErrorRef<'_>> {
                Some(ErrorRef::node(&self.parent))
            }
        }
    };
}

family_member! {
    /// Any failure of the storage layer.
    StorageError: RootError = "root"
}

family_member! {
    /// No space left on the target device.
    DiskFull: StorageError = "storage"
}

family_member! {
    /// Per-tenant storage quota exhausted.
    QuotaExceeded: StorageError = "storage"
}

family_member! {
    /// Any failure of the network layer.
    NetworkError: RootError = "root"
}

family_member! {
    /// Remote peer did not answer in time.
    Timeout: NetworkError = "network"
}

/// Buildable family member, as named in probe files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FamilyMember {
    Root,
    Storage,
    DiskFull,
    QuotaExceeded,
    Network,
    Timeout,
    /// Foreign `std::io::Error`, outside the family.
    Io,
}

impl FamilyMember {
    /// Build an error of this kind carrying `message`.
    pub fn build(self, message: &str) -> AnyError {
        match self {
            Self::Root => AnyError::from_ancestry(RootError::new(message)),
            Self::Storage => AnyError::from_ancestry(StorageError::new(message)),
            Self::DiskFull => AnyError::from_ancestry(DiskFull::new(message)),
            Self::QuotaExceeded => AnyError::from_ancestry(QuotaExceeded::new(message)),
            Self::Network => AnyError::from_ancestry(NetworkError::new(message)),
            Self::Timeout => AnyError::from_ancestry(Timeout::new(message)),
            Self::Io => AnyError::new(io::Error::other(message.to_string())),
        }
    }
}

/// Matchable target, as named in probe files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetName {
    Root,
    Storage,
    DiskFull,
    QuotaExceeded,
    Network,
    Timeout,
    Io,
    /// Any present error.
    Any,
}

impl TargetName {
    /// Probe-file spelling of the target.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Root => "root",
            Self::Storage => "storage",
            Self::DiskFull => "disk_full",
            Self::QuotaExceeded => "quota_exceeded",
            Self::Network => "network",
            Self::Timeout => "timeout",
            Self::Io => "io",
            Self::Any => "any",
        }
    }

    /// Whether `link` is inherited from this target.
    pub fn matches(self, link: Option<ErrorRef<'_>>) -> bool {
        match self {
            Self::Root => inherited_from::<RootError>(link),
            Self::Storage => inherited_from::<StorageError>(link),
            Self::DiskFull => inherited_from::<DiskFull>(link),
            Self::QuotaExceeded => inherited_from::<QuotaExceeded>(link),
            Self::Network => inherited_from::<NetworkError>(link),
            Self::Timeout => inherited_from::<Timeout>(link),
            Self::Io => inherited_from::<io::Error>(link),
            Self::Any => inherited_from::<AnyError>(link),
        }
    }

    /// Append a clause for this target that yields the target's name.
    pub fn clause<'a>(self, catch: Catch<'a, TargetName>) -> Catch<'a, TargetName> {
        match self {
            Self::Root => catch.on::<RootError>(|_| self),
            Self::Storage => catch.on::<StorageError>(|_| self),
            Self::DiskFull => catch.on::<DiskFull>(|_| self),
            Self::QuotaExceeded => catch.on::<QuotaExceeded>(|_| self),
            Self::Network => catch.on::<NetworkError>(|_| self),
            Self::Timeout => catch.on::<Timeout>(|_| self),
            Self::Io => catch.on::<io::Error>(|_| self),
            Self::Any => catch.on::<AnyError>(|_| self),
        }
    }
}

impl fmt::Display for TargetName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
