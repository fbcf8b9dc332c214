//! Branch naming
//!
//! Branches live under `refs/heads/`; HEAD points at one of them through a
//! symbolic ref of the form `ref: refs/heads/<name>`.

pub mod branch_name;

/// Branch that HEAD points at in a fresh repository
pub const DEFAULT_BRANCH: &str = "main";

/// Prefix of every branch ref name
pub const HEADS_PREFIX: &str = "refs/heads/";

pub const INVALID_BRANCH_NAME_REGEX: &str =
    r"^\.|\/\.|\.\.|^\/|\/$|\.lock$|@\{|[\x00-\x20\*:\?\[\\~\^\x7f]";
