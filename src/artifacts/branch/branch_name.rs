use crate::artifacts::branch::{DEFAULT_BRANCH, HEADS_PREFIX, INVALID_BRANCH_NAME_REGEX};
use crate::errors::{KitError, Result};

/// Validated short branch name (`main`, `feature/x`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BranchName(String);

impl BranchName {
    pub fn try_parse(name: String) -> Result<Self> {
        if name.is_empty() {
            return Err(KitError::InvalidBranchName(name));
        }

        let re = regex::Regex::new(INVALID_BRANCH_NAME_REGEX)
            .map_err(|_| KitError::InvalidBranchName(name.clone()))?;

        if re.is_match(&name) {
            Err(KitError::InvalidBranchName(name))
        } else {
            Ok(Self(name))
        }
    }

    /// Parse a full ref name such as `refs/heads/main`
    pub fn try_from_ref_name(ref_name: &str) -> Result<Self> {
        match ref_name.strip_prefix(HEADS_PREFIX) {
            Some(name) => Self::try_parse(name.to_string()),
            None => Err(KitError::RefResolutionFailed {
                name: ref_name.to_string(),
                reason: format!("ref is not under {HEADS_PREFIX}"),
            }),
        }
    }

    pub fn to_ref_name(&self) -> String {
        format!("{HEADS_PREFIX}{}", self.0)
    }
}

impl Default for BranchName {
    fn default() -> Self {
        Self(DEFAULT_BRANCH.to_string())
    }
}

impl AsRef<str> for BranchName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BranchName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
