//! Index (staging area) data structures
//!
//! The index is persisted as a JSON array of entries, one per staged file:
//!
//! ```text
//! [
//!   {"path": "dir/b.txt", "hash": "<64 hex>", "mode": 33188, "size": 3, "mtime": 1700000000}
//! ]
//! ```

pub mod entry_mode;
pub mod index_entry;
