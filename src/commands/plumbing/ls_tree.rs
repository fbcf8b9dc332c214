use crate::areas::refs::HEAD_REF_NAME;
use crate::areas::repository::Repository;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use std::io::Write;

impl Repository {
    /// List every file of a tree, or of a commit's tree, with full paths
    ///
    /// `HEAD` names the commit the current branch points at.
    pub fn ls_tree(&self, object_sha: &str) -> anyhow::Result<()> {
        let oid = if object_sha == HEAD_REF_NAME {
            self.refs().read_head()?.ok_or_else(|| {
                anyhow::anyhow!("HEAD does not point at a commit yet")
            })?
        } else {
            ObjectId::try_parse(object_sha.to_string())?
        };

        let (object_type, _) = self.database().load_typed(&oid)?;
        let tree_oid = match object_type {
            ObjectType::Commit => self.database().load_commit(&oid)?.tree_oid().clone(),
            ObjectType::Tree => oid,
            ObjectType::Blob => anyhow::bail!("object {} is not a tree", oid),
        };

        for (path, entry) in self.database().flatten_tree(&tree_oid)? {
            writeln!(
                self.writer(),
                "{} {} {}\t{}",
                entry.mode,
                entry.object_type(),
                entry.oid,
                path
            )?;
        }

        Ok(())
    }
}
