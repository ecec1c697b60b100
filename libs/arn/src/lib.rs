//! # arnkit-arn
//!
//! Parsing, formatting and wildcard matching for ARNs.
//!
//! ## Design Principles
//!
//! - Parsing is structural only: six colon-separated pieces, nothing checked
//!   against a list of known partitions, services or regions
//! - Formatting a parsed ARN reproduces the input byte for byte
//! - Policy variables (`${...}`) are rejected, never interpolated
//! - Superset checks treat `*` and `?` as wildcards and everything else as a
//!   literal
//!
//! ## ARN Format
//!
//! ```text
//! arn:partition:service:region:account-id:resource
//! arn:partition:service:region:account-id:resource-type/resource
//! arn:partition:service:region:account-id:resource-type:resource
//! ```
//!
//! Only the first five colons split the prefix; the rest belongs to the
//! resource suffix. Inside the suffix a colon takes priority over a slash.
//!
//! ## Superset Checks
//!
//! `a.is_superset_of(&b)` compares five prefix fields and the whole resource
//! suffix, each as an anchored wildcard match of `a` against `b`. Because the
//! suffix is compared as one string, a wildcard may cross the type/resource
//! delimiter. The relation is reflexive but neither symmetric nor guaranteed
//! transitive.

mod error;
mod pattern;
mod types;

pub use error::ArnError;
pub use pattern::{ArnPattern, WildcardPattern};
pub use types::{validate, Arn, ResourceDelimiter};
