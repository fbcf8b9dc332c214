//! Object types and operations
//!
//! All content is stored as objects identified by SHA-256 hashes. There are
//! three types:
//!
//! - **Blob**: File content (raw bytes)
//! - **Tree**: Directory listing (modes, types, object IDs and names)
//! - **Commit**: Snapshot with an optional parent and a message
//!
//! Every object is hashed and stored in the framed form
//! `<type> <size>\0<content>`.

pub mod blob;
pub mod commit;
pub mod object;
pub mod object_id;
pub mod object_type;
pub mod tree;

/// Length of a SHA-256 hash in hexadecimal format
pub const OBJECT_ID_LENGTH: usize = 64;
