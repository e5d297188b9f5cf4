//! Upstream source repository detection.

use std::fmt;

use super::consts::SOURCE_URL_REGEX;

/// A GitHub repository identified by owner and name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceRepo {
    pub owner: String,
    pub name: String,
}

impl SourceRepo {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }

    /// Parse a `https://github.com/<owner>/<name>` URL.
    ///
    /// Anything after the name is ignored and a trailing `.git` is dropped.
    /// URLs pointing anywhere else yield `None`.
    pub fn from_source_url(url: &str) -> Option<Self> {
        let captures = SOURCE_URL_REGEX.captures(url)?;
        let name = &captures[2];
        let name = name.strip_suffix(".git").unwrap_or(name);
        Some(Self::new(&captures[1], name))
    }

    /// Whether this is `<org>/<name>` itself.
    pub fn is_repo(&self, org: &str, name: &str) -> bool {
        self.owner == org && self.name == name
    }
}

impl fmt::Display for SourceRepo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}
