//! Porcelain commands (user-facing operations)
//!
//! ## Commands
//!
//! - `init`: Create the `.kit` layout
//! - `add`: Stage files for commit
//! - `commit`: Record the index as a new commit
//! - `status`: Compare HEAD, index and working directory
//! - `log`: Show commit history
//! - `branch`: Create or list branches

pub mod add;
pub mod branch;
pub mod commit;
pub mod init;
pub mod log;
pub mod status;
