//! Surrogate identifiers for refbook entities.
//!
//! Identifiers are stable integers assigned by the storage layer.

/// Identifier of a [`Refbook`](crate::Refbook).
pub type RefbookId = u32;

/// Identifier of a [`Version`](crate::Version).
pub type VersionId = u32;

/// Identifier of an [`Element`](crate::Element).
pub type ElementId = u32;
