//! Content-addressed object store
//!
//! Objects live under `.kit/objects/<aa>/<rest>` as zlib-compressed
//! `<type> <len>\0<payload>` buffers, where `aa` are the first two hex
//! characters of the SHA-256 of that uncompressed buffer.
//!
//! The store keeps no cache: every load re-reads and decompresses the file,
//! so nothing carries over between invocations.

use crate::artifacts::database::database_entry::DatabaseEntry;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object::{Object, ObjectHeader, Unpackable, frame};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::tree::Tree;
use crate::errors::{IoContext, KitError, Result};
use bytes::Bytes;
use fake::rand;
use std::collections::BTreeMap;
use std::io::{Read, Write};
use std::path::Path;
use tracing::debug;

#[derive(Debug)]
pub struct Database {
    path: Box<Path>,
}

impl Database {
    pub fn new(path: Box<Path>) -> Self {
        Database { path }
    }

    pub fn objects_path(&self) -> &Path {
        &self.path
    }

    /// Hash a payload as an object of the given type without storing it
    pub fn hash_only(payload: &[u8], object_type: ObjectType) -> ObjectId {
        ObjectId::digest(&frame(object_type, payload))
    }

    /// Store a raw payload under its content hash
    ///
    /// Writing the same payload twice is a no-op after the first write.
    pub fn put(&self, payload: &[u8], object_type: ObjectType) -> Result<ObjectId> {
        self.write_framed(frame(object_type, payload))
    }

    pub fn store(&self, object: &impl Object) -> Result<ObjectId> {
        self.write_framed(object.framed())
    }

    pub fn contains(&self, object_id: &ObjectId) -> bool {
        self.path.join(object_id.to_path()).is_file()
    }

    /// Load the payload of an object, with its header stripped
    pub fn load(&self, object_id: &ObjectId) -> Result<Bytes> {
        let framed = self.read_object(object_id)?;

        let nul = framed
            .iter()
            .position(|byte| *byte == 0)
            .ok_or_else(|| KitError::corrupt(object_id, "missing header delimiter"))?;

        Ok(framed.slice(nul + 1..))
    }

    /// Load an object along with its validated type
    pub fn load_typed(&self, object_id: &ObjectId) -> Result<(ObjectType, Bytes)> {
        let framed = self.read_object(object_id)?;
        let (header, payload) = ObjectHeader::split(&framed)
            .map_err(|err| KitError::corrupt(object_id, err.to_string()))?;

        Ok((header.object_type, payload))
    }

    pub fn load_blob(&self, object_id: &ObjectId) -> Result<Blob> {
        self.load_as(object_id, ObjectType::Blob)
    }

    pub fn load_tree(&self, object_id: &ObjectId) -> Result<Tree> {
        self.load_as(object_id, ObjectType::Tree)
    }

    pub fn load_commit(&self, object_id: &ObjectId) -> Result<Commit> {
        self.load_as(object_id, ObjectType::Commit)
    }

    fn load_as<T: Unpackable>(&self, object_id: &ObjectId, expected: ObjectType) -> Result<T> {
        let (object_type, payload) = self.load_typed(object_id)?;
        if object_type != expected {
            return Err(KitError::corrupt(
                object_id,
                format!("expected a {expected}, found a {object_type}"),
            ));
        }

        T::deserialize(payload).map_err(|err| KitError::corrupt(object_id, err.to_string()))
    }

    /// Reconstruct the flat `path -> entry` map of every blob under a tree
    ///
    /// Nested trees are expanded with their `/`-joined prefix; only blob
    /// entries end up in the result.
    pub fn flatten_tree(&self, tree_oid: &ObjectId) -> Result<BTreeMap<String, DatabaseEntry>> {
        let mut files = BTreeMap::new();
        let mut pending = vec![(String::new(), tree_oid.clone())];

        while let Some((prefix, oid)) = pending.pop() {
            for (name, entry) in self.load_tree(&oid)?.into_entries() {
                let path = if prefix.is_empty() {
                    name
                } else {
                    format!("{prefix}/{name}")
                };

                if entry.is_tree() {
                    pending.push((path, entry.oid));
                } else {
                    files.insert(path, entry);
                }
            }
        }

        Ok(files)
    }

    fn write_framed(&self, framed: Bytes) -> Result<ObjectId> {
        let object_id = ObjectId::digest(&framed);
        let object_path = self.path.join(object_id.to_path());

        // objects are immutable: an existing file already holds these bytes
        if object_path.exists() {
            return Ok(object_id);
        }

        let object_dir = object_path
            .parent()
            .ok_or_else(|| KitError::corrupt(&object_id, "invalid object path"))?;
        std::fs::create_dir_all(object_dir).at(object_dir)?;

        self.write_object(&object_path, framed)?;
        debug!(oid = %object_id, path = %object_path.display(), "stored object");

        Ok(object_id)
    }

    fn read_object(&self, object_id: &ObjectId) -> Result<Bytes> {
        let object_path = self.path.join(object_id.to_path());

        let compressed = match std::fs::read(&object_path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Err(KitError::ObjectNotFound {
                    oid: object_id.clone(),
                });
            }
            Err(err) => return Err(KitError::io(object_path, err)),
        };
        debug!(oid = %object_id, "loaded object");

        Self::decompress(&compressed).map_err(|err| {
            KitError::corrupt(object_id, format!("unable to decompress object: {err}"))
        })
    }

    fn write_object(&self, object_path: &Path, framed: Bytes) -> Result<()> {
        let object_dir = object_path.parent().unwrap_or(&self.path);
        let temp_object_path = object_dir.join(Self::generate_temp_name());

        let compressed = Self::compress(&framed).at(&temp_object_path)?;

        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&temp_object_path)
            .at(&temp_object_path)?;
        file.write_all(&compressed).at(&temp_object_path)?;

        // rename the temp file to the object file to make it atomic
        std::fs::rename(&temp_object_path, object_path).at(object_path)?;

        Ok(())
    }

    fn compress(data: &[u8]) -> std::io::Result<Vec<u8>> {
        let mut encoder =
            flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
        encoder.write_all(data)?;

        encoder.finish()
    }

    fn decompress(data: &[u8]) -> std::io::Result<Bytes> {
        let mut decoder = flate2::read::ZlibDecoder::new(data);
        let mut decompressed_content = Vec::new();
        decoder.read_to_end(&mut decompressed_content)?;

        Ok(decompressed_content.into())
    }

    fn generate_temp_name() -> String {
        format!("tmp-obj-{}", rand::random::<u32>())
    }
}
