//! Commit history traversal
//!
//! History is linear: each commit has at most one parent. `rev_list` walks
//! parent links from a starting commit, most recent first, until it reaches a
//! root commit.

pub mod rev_list;
