//! Database entry types
//!
//! Types used when reading trees back from the object store. A database
//! entry is a reference to an object together with its mode.

pub mod database_entry;
