//! Interpreter version and override tags.

use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use crate::error::IpydepsError;

static VERSION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\.(\d+)\.(\d+)").unwrap());

/// A `major.minor.micro` interpreter version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct PythonVersion {
    pub major: u32,
    pub minor: u32,
    pub micro: u32,
}

impl PythonVersion {
    /// Create a version from its parts.
    pub fn new(major: u32, minor: u32, micro: u32) -> Self {
        Self {
            major,
            minor,
            micro,
        }
    }

    /// Extract the first `X.Y.Z` found in interpreter output such as
    /// `Python 3.11.4` or `Python 3.12.0rc1`.
    pub fn parse(output: &str) -> Option<Self> {
        let caps = VERSION_REGEX.captures(output)?;
        Some(Self {
            major: caps[1].parse().ok()?,
            minor: caps[2].parse().ok()?,
            micro: caps[3].parse().ok()?,
        })
    }

    /// Tag for the major version, e.g. `python-3`.
    pub fn major_tag(&self) -> String {
        format!("python-{}", self.major)
    }

    /// Tag for the minor version, e.g. `python-3.11`.
    pub fn minor_tag(&self) -> String {
        format!("python-{}.{}", self.major, self.minor)
    }

    /// Tag for the micro version, e.g. `python-3.11.4`.
    pub fn micro_tag(&self) -> String {
        format!("python-{}.{}.{}", self.major, self.minor, self.micro)
    }

    /// Override document tags from least to most specific.
    pub fn tags(&self) -> [String; 3] {
        [self.major_tag(), self.minor_tag(), self.micro_tag()]
    }
}

impl fmt::Display for PythonVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.micro)
    }
}

impl FromStr for PythonVersion {
    type Err = IpydepsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| IpydepsError::InterpreterVersion {
            output: s.trim().to_string(),
        })
    }
}
