use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;
use bytes::Bytes;

/// Produces the raw payload of an object (everything after the header)
pub trait Packable {
    fn serialize(&self) -> Bytes;
}

/// Rebuilds an object from its raw payload
///
/// Failures are reported as plain `anyhow` errors; the database turns them
/// into `CorruptObject` with the offending object id attached.
pub trait Unpackable {
    fn deserialize(payload: Bytes) -> anyhow::Result<Self>
    where
        Self: Sized;
}

pub trait Object: Packable {
    fn object_type(&self) -> ObjectType;

    fn display(&self) -> String;

    /// Header and payload as they are hashed and stored
    fn framed(&self) -> Bytes {
        frame(self.object_type(), &self.serialize())
    }

    fn object_id(&self) -> ObjectId {
        ObjectId::digest(&self.framed())
    }
}

/// Build `"<type> <len>\0<payload>"`
pub fn frame(object_type: ObjectType, payload: &[u8]) -> Bytes {
    let header = format!("{} {}\0", object_type.as_str(), payload.len());

    let mut framed = Vec::with_capacity(header.len() + payload.len());
    framed.extend_from_slice(header.as_bytes());
    framed.extend_from_slice(payload);

    Bytes::from(framed)
}

/// Parsed `"<type> <len>"` header of a stored object
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectHeader {
    pub object_type: ObjectType,
    pub size: usize,
}

impl ObjectHeader {
    /// Split a framed buffer into its validated header and the payload
    pub fn split(framed: &Bytes) -> anyhow::Result<(ObjectHeader, Bytes)> {
        let nul = framed
            .iter()
            .position(|byte| *byte == 0)
            .context("missing header delimiter")?;

        let header = std::str::from_utf8(&framed[..nul]).context("header is not valid utf-8")?;
        let (object_type, size) = header
            .split_once(' ')
            .with_context(|| format!("malformed header '{header}'"))?;

        let object_type = ObjectType::try_from(object_type).map_err(anyhow::Error::msg)?;
        let size = size
            .parse::<usize>()
            .with_context(|| format!("invalid object size '{size}'"))?;

        let payload = framed.slice(nul + 1..);
        if payload.len() != size {
            anyhow::bail!(
                "declared size {} does not match payload size {}",
                size,
                payload.len()
            );
        }

        Ok((ObjectHeader { object_type, size }, payload))
    }
}
