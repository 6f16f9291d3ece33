//! # refbook-types
//!
//! Type definitions for versioned reference dictionaries ("refbooks").
//!
//! A refbook is a named code list (for example a disease classification)
//! that evolves through dated versions. Each version holds a flat set of
//! code → value elements.
//!
//! ## Features
//!
//! - `serde` (default): Enables serialization/deserialization support via serde.
//!
//! ## Usage
//!
//! ```rust
//! use chrono::NaiveDate;
//! use refbook_types::{Refbook, Version, VersionSelector};
//!
//! let refbook = Refbook::new(1, "ICD-10", "МКБ-10");
//! let version = Version {
//!     id: 10,
//!     refbook_id: refbook.id,
//!     version: "v1".to_string(),
//!     date_start: NaiveDate::from_ymd_opt(2022, 10, 1).unwrap(),
//! };
//!
//! let today = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
//! assert!(version.is_active_on(today));
//! assert_eq!(
//!     VersionSelector::from_param(None, today),
//!     VersionSelector::AsOfDate(today)
//! );
//! ```

#![warn(missing_docs)]

mod element;
mod ids;
mod refbook;
mod selector;
mod version;

pub use chrono::NaiveDate;
pub use element::{Element, ElementEntry};
pub use ids::{ElementId, RefbookId, VersionId};
pub use refbook::{Refbook, RefbookSummary};
pub use selector::{VersionSelector, DATE_FORMAT};
pub use version::Version;
