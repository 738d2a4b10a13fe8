use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::DomainError;

const SCHEME_SEPARATOR: &str = "://";

/// A `scheme://target` location understood by the storage adapters.
///
/// The target always uses `/` as separator, independent of the host platform.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StorageUri {
    scheme: String,
    target: String,
}

impl StorageUri {
    pub fn new(scheme: &str, target: &str) -> Result<Self, DomainError> {
        if scheme.is_empty() || !scheme.chars().all(is_scheme_char) {
            return Err(DomainError::MalformedUri(format!(
                "{scheme}{SCHEME_SEPARATOR}{target}"
            )));
        }
        Ok(Self {
            scheme: scheme.to_ascii_lowercase(),
            target: target.to_string(),
        })
    }

    pub fn parse(value: &str) -> Result<Self, DomainError> {
        let (scheme, target) = value
            .split_once(SCHEME_SEPARATOR)
            .ok_or_else(|| DomainError::MalformedUri(value.to_string()))?;
        Self::new(scheme, target)
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    /// Last path segment of the target, empty when the target ends in `/`.
    pub fn basename(&self) -> &str {
        self.target.rsplit('/').next().unwrap_or_default()
    }

    /// Basename with its final extension removed. Dotfiles keep their name.
    pub fn file_stem(&self) -> &str {
        let name = self.basename();
        match name.rfind('.') {
            Some(0) | None => name,
            Some(index) => &name[..index],
        }
    }

    /// Lowercased final extension of the basename, if any.
    pub fn extension(&self) -> Option<String> {
        let name = self.basename();
        match name.rfind('.') {
            Some(0) | None => None,
            Some(index) => Some(name[index + 1..].to_ascii_lowercase()),
        }
    }

    pub fn dirname(&self) -> StorageUri {
        let target = match self.target.rfind('/') {
            Some(index) => &self.target[..index],
            None => "",
        };
        Self {
            scheme: self.scheme.clone(),
            target: target.to_string(),
        }
    }

    pub fn join(&self, segment: &str) -> StorageUri {
        let target = if self.target.is_empty() || self.target.ends_with('/') {
            format!("{}{segment}", self.target)
        } else {
            format!("{}/{segment}", self.target)
        };
        Self {
            scheme: self.scheme.clone(),
            target,
        }
    }
}

fn is_scheme_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.')
}

impl Display for StorageUri {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{SCHEME_SEPARATOR}{}", self.scheme, self.target)
    }
}

impl TryFrom<String> for StorageUri {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<StorageUri> for String {
    fn from(value: StorageUri) -> Self {
        value.to_string()
    }
}
