use crate::areas::database::Database;
use crate::areas::repository::Repository;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use std::io::Write;

impl Repository {
    /// Print the blob id of a work-tree file; store the blob when `write` is set
    pub fn hash_object(&self, object_path: &str, write: bool) -> anyhow::Result<ObjectId> {
        let data = self.workspace().read_file(object_path)?;

        let oid = if write {
            self.database().put(&data, ObjectType::Blob)?
        } else {
            Database::hash_only(&data, ObjectType::Blob)
        };

        writeln!(self.writer(), "{}", oid)?;

        Ok(oid)
    }
}
