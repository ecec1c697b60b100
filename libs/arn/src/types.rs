//! The parsed ARN type and its resource delimiter.
//!
//! An ARN has five fixed prefix fields followed by a resource suffix:
//!
//! ```text
//! scheme:partition:service:region:account-id:resource
//! scheme:partition:service:region:account-id:resource-type/resource
//! scheme:partition:service:region:account-id:resource-type:resource
//! ```

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use crate::error::ArnError;
use crate::pattern::WildcardPattern;

/// Marker that opens a policy variable reference such as `${aws:username}`.
const VARIABLE_MARKER: &str = "${";

/// Number of top-level colon-separated pieces in an ARN.
const PIECES: usize = 6;

// =============================================================================
// Validation
// =============================================================================

/// Checks that an ARN string can be parsed, without decomposing it.
///
/// Policy variables are rejected before the structure is looked at, so an
/// input that is both short and templated reports
/// [`ArnError::VariablesNotSupported`].
pub fn validate(raw: &str) -> Result<(), ArnError> {
    split_pieces(raw).map(|_| ())
}

/// Splits on the first five colons; anything after the fifth stays in the suffix.
fn split_pieces(raw: &str) -> Result<[&str; PIECES], ArnError> {
    if raw.contains(VARIABLE_MARKER) {
        return Err(ArnError::VariablesNotSupported);
    }

    let mut iter = raw.splitn(PIECES, ':');
    let mut pieces = [""; PIECES];
    for piece in pieces.iter_mut() {
        *piece = iter.next().ok_or(ArnError::Malformed)?;
    }

    Ok(pieces)
}

/// Splits a resource suffix into type, delimiter and resource.
///
/// A colon anywhere in the suffix takes priority over a slash, even one that
/// appears earlier.
fn split_suffix(suffix: &str) -> (&str, ResourceDelimiter, &str) {
    if let Some((resource_type, resource)) = suffix.split_once(':') {
        (resource_type, ResourceDelimiter::Colon, resource)
    } else if let Some((resource_type, resource)) = suffix.split_once('/') {
        (resource_type, ResourceDelimiter::Slash, resource)
    } else {
        ("", ResourceDelimiter::None, suffix)
    }
}

// =============================================================================
// Resource Delimiter
// =============================================================================

/// The separator found between the resource type and the resource.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ResourceDelimiter {
    /// The suffix is a bare resource with no type.
    #[default]
    None,
    /// `resource-type:resource`
    Colon,
    /// `resource-type/resource`
    Slash,
}

impl ResourceDelimiter {
    /// Returns the delimiter as it appears in the ARN string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::None => "",
            Self::Colon => ":",
            Self::Slash => "/",
        }
    }

    /// Returns true if the suffix had no delimiter.
    #[must_use]
    pub const fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

impl fmt::Display for ResourceDelimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl serde::Serialize for ResourceDelimiter {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> serde::Deserialize<'de> for ResourceDelimiter {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            "" => Ok(Self::None),
            ":" => Ok(Self::Colon),
            "/" => Ok(Self::Slash),
            other => Err(serde::de::Error::custom(format!(
                "invalid resource delimiter '{other}': expected '', ':' or '/'"
            ))),
        }
    }
}

// =============================================================================
// ARN
// =============================================================================

/// A parsed ARN.
///
/// Fields are stored verbatim; nothing is trimmed or case-folded, and any of
/// them may be empty. Formatting an `Arn` reproduces the exact string it was
/// parsed from.
///
/// # Example
///
/// ```
/// use arnkit_arn::{Arn, ResourceDelimiter};
///
/// let arn: Arn = "arn:aws:rds:region:account-id:db:db-instance-name".parse()?;
/// assert_eq!(arn.resource_type(), "db");
/// assert_eq!(arn.resource_delimiter(), ResourceDelimiter::Colon);
/// assert_eq!(arn.resource(), "db-instance-name");
/// assert_eq!(arn.to_string(), "arn:aws:rds:region:account-id:db:db-instance-name");
/// # Ok::<(), arnkit_arn::ArnError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Arn {
    scheme: String,
    partition: String,
    service: String,
    region: String,
    account_id: String,
    resource_type: String,
    resource: String,
    resource_delimiter: ResourceDelimiter,
}

impl Arn {
    /// Parses an ARN from a string.
    pub fn parse(raw: &str) -> Result<Self, ArnError> {
        let [scheme, partition, service, region, account_id, suffix] = split_pieces(raw)?;
        let (resource_type, resource_delimiter, resource) = split_suffix(suffix);

        Ok(Self {
            scheme: scheme.to_string(),
            partition: partition.to_string(),
            service: service.to_string(),
            region: region.to_string(),
            account_id: account_id.to_string(),
            resource_type: resource_type.to_string(),
            resource: resource.to_string(),
            resource_delimiter,
        })
    }

    /// The leading field, normally `arn`.
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    pub fn partition(&self) -> &str {
        &self.partition
    }

    pub fn service(&self) -> &str {
        &self.service
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    pub fn account_id(&self) -> &str {
        &self.account_id
    }

    /// The resource type, empty when the suffix had no delimiter.
    pub fn resource_type(&self) -> &str {
        &self.resource_type
    }

    pub fn resource(&self) -> &str {
        &self.resource
    }

    pub fn resource_delimiter(&self) -> ResourceDelimiter {
        self.resource_delimiter
    }

    /// Returns the tail of the ARN: type, delimiter and resource concatenated.
    #[must_use]
    pub fn resource_suffix(&self) -> String {
        let mut suffix = String::with_capacity(
            self.resource_type.len() + self.resource_delimiter.as_str().len() + self.resource.len(),
        );
        suffix.push_str(&self.resource_type);
        suffix.push_str(self.resource_delimiter.as_str());
        suffix.push_str(&self.resource);
        suffix
    }

    /// Returns the six slots compared by [`Arn::is_superset_of`]: the five
    /// prefix fields followed by the resource suffix.
    pub fn parts(&self) -> [Cow<'_, str>; PIECES] {
        [
            Cow::Borrowed(self.scheme.as_str()),
            Cow::Borrowed(self.partition.as_str()),
            Cow::Borrowed(self.service.as_str()),
            Cow::Borrowed(self.region.as_str()),
            Cow::Borrowed(self.account_id.as_str()),
            Cow::Owned(self.resource_suffix()),
        ]
    }

    /// Returns true if any slot contains a `*` or `?` wildcard.
    pub fn has_wildcards(&self) -> bool {
        self.parts().iter().any(|part| part.contains(&['*', '?'][..]))
    }

    /// Returns true if `self`, read as a wildcard pattern, covers `other`.
    ///
    /// Each of the six slots from [`Arn::parts`] must match in full. The
    /// resource suffix is compared as one flattened string, so a wildcard in
    /// the pattern's resource type can run across the delimiter into the
    /// candidate's resource. `a.is_superset_of(&b)` says nothing about
    /// `b.is_superset_of(&a)`.
    ///
    /// ```
    /// use arnkit_arn::Arn;
    ///
    /// let pattern: Arn = "arn:aws:s3:::bucket.name.*".parse()?;
    /// let object: Arn = "arn:aws:s3:::bucket.name.company/path/*".parse()?;
    /// assert!(pattern.is_superset_of(&object));
    /// assert!(!object.is_superset_of(&pattern));
    /// # Ok::<(), arnkit_arn::ArnError>(())
    /// ```
    pub fn is_superset_of(&self, other: &Arn) -> bool {
        if self == other {
            return true;
        }

        self.parts()
            .iter()
            .zip(other.parts().iter())
            .all(|(pattern, candidate)| WildcardPattern::new(pattern).is_match(candidate))
    }
}

impl fmt::Display for Arn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}:{}:{}:{}{}{}",
            self.scheme,
            self.partition,
            self.service,
            self.region,
            self.account_id,
            self.resource_type,
            self.resource_delimiter,
            self.resource
        )
    }
}

impl FromStr for Arn {
    type Err = ArnError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl serde::Serialize for Arn {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for Arn {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// Tests
// =============================================================================
