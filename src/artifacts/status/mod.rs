//! Three-way status
//!
//! Two independent comparisons per path:
//!
//! - staged vs. committed: the index against the flattened HEAD tree
//! - disk vs. staged: the working directory against the index, hashing each
//!   file without storing it
//!
//! ## Components
//!
//! - `file_change`: change classifications and their rendering
//! - `inspector`: per-path comparisons
//! - `status_info`: the report and the scan that builds it

pub mod file_change;
pub mod inspector;
pub mod status_info;
