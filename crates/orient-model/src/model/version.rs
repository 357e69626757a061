//! Server release versions.

use std::fmt;
use std::str::FromStr;

use crate::error::VersionParseError;

/// Build component of a release.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BuildToken {
    Number(u32),
    /// Kept verbatim when the token is not numeric (e.g. `0-rc1`).
    Text(String),
}

impl fmt::Display for BuildToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildToken::Number(n) => write!(f, "{n}"),
            BuildToken::Text(s) => f.write_str(s),
        }
    }
}

/// A server release, parsed from `"<major>.<minor>[-<build>][.<build>] [suffix]"`.
///
/// ```rust
/// use orient_model::{BuildToken, SemanticVersion};
///
/// let v: SemanticVersion = "2.2.0-rc1 (build 123)".parse().unwrap();
/// assert_eq!((v.major, v.minor), (2, 2));
/// assert_eq!(v.build, Some(BuildToken::Text("0-rc1".to_string())));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SemanticVersion {
    /// The full release string.
    pub release: String,
    pub major: u32,
    pub minor: u32,
    pub build: Option<BuildToken>,
}

impl SemanticVersion {
    /// Parses a release string.
    ///
    /// Segments are split on `.`. A `-` in the minor segment separates the
    /// minor number from a build token; a third segment, when present,
    /// replaces that token. Only the part of the build token before the first
    /// space is kept, as a number when it parses as one.
    pub fn parse(release: &str) -> Result<Self, VersionParseError> {
        let mut segments = release.split('.');

        let major_segment = segments.next().unwrap_or_default();
        let major = major_segment
            .trim()
            .parse()
            .map_err(|_| VersionParseError::InvalidMajor {
                segment: major_segment.to_string(),
            })?;

        let minor_segment = segments.next().ok_or_else(|| VersionParseError::MissingMinor {
            release: release.to_string(),
        })?;

        let (minor_text, mut build_token) = match minor_segment.split_once('-') {
            Some((minor, rest)) => (minor, Some(rest.split('-').next().unwrap_or(rest))),
            None => (minor_segment, None),
        };
        let minor = minor_text
            .trim()
            .parse()
            .map_err(|_| VersionParseError::InvalidMinor {
                segment: minor_segment.to_string(),
            })?;

        if let Some(third) = segments.next() {
            build_token = Some(third);
        }

        let build = build_token.map(|token| {
            let prefix = token.split(' ').next().unwrap_or_default();
            match prefix.parse() {
                Ok(n) => BuildToken::Number(n),
                Err(_) => BuildToken::Text(prefix.to_string()),
            }
        });

        Ok(Self {
            release: release.to_string(),
            major,
            minor,
            build,
        })
    }

    /// Parses a release string received as raw bytes.
    pub fn from_bytes(release: &[u8]) -> Result<Self, VersionParseError> {
        let release = std::str::from_utf8(release).map_err(|_| VersionParseError::InvalidUtf8)?;
        Self::parse(release)
    }

    /// Returns true if this release is `major.minor` or newer.
    pub fn is_at_least(&self, major: u32, minor: u32) -> bool {
        (self.major, self.minor) >= (major, minor)
    }

    /// The build number, if the build token is numeric.
    pub fn build_number(&self) -> Option<u32> {
        match self.build {
            Some(BuildToken::Number(n)) => Some(n),
            _ => None,
        }
    }
}

impl FromStr for SemanticVersion {
    type Err = VersionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for SemanticVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.release)
    }
}
