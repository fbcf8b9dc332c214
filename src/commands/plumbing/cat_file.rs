use crate::areas::repository::Repository;
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use std::io::Write;

/// What `cat-file` prints for an object
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatFileMode {
    /// The payload, with trees rendered one entry per line
    Pretty,
    /// Only the type tag
    Type,
}

impl Repository {
    pub fn cat_file(&self, object_id: &str, mode: CatFileMode) -> anyhow::Result<()> {
        let oid = ObjectId::try_parse(object_id.to_string())?;
        let (object_type, payload) = self.database().load_typed(&oid)?;

        match (mode, object_type) {
            (CatFileMode::Type, _) => writeln!(self.writer(), "{}", object_type)?,
            (CatFileMode::Pretty, ObjectType::Tree) => {
                let tree = self.database().load_tree(&oid)?;
                if !tree.is_empty() {
                    writeln!(self.writer(), "{}", tree.display())?;
                }
            }
            (CatFileMode::Pretty, _) => self.writer().write_all(&payload)?,
        }

        Ok(())
    }
}
