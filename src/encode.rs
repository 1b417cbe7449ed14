//! Walks a tag tree back out to NBT bytes, the inverse of `decode`.

use log::trace;

use crate::{
    compression::{self, Format},
    error::{Error, Result},
    kind::Kind,
    messages::Messages,
    progress::{CancellationToken, Progress},
    tree::{NodeId, Payload, Tree},
    writer::ByteWriter,
};

pub fn encode(tree: &Tree, root: NodeId) -> Result<Vec<u8>> {
    encode_with(tree, root, Format::Raw, None, &mut Progress::none(), &Messages::default())
}

pub fn encode_with(
    tree: &Tree,
    root: NodeId,
    format: Format,
    cancel: Option<&CancellationToken>,
    progress: &mut Progress<'_>,
    messages: &Messages,
) -> Result<Vec<u8>> {
    progress.report(0, &messages.encode_start);
    let mut writer = ByteWriter::new();
    let mut encoder = Encoder { tree, cancel };
    encoder.write_tag(&mut writer, root, true)?;
    progress.report(100, &messages.encode_done);
    compression::compress(&writer.into_bytes(), format)
}

struct Encoder<'a> {
    tree: &'a Tree,
    cancel: Option<&'a CancellationToken>,
}

impl<'a> Encoder<'a> {
    fn check_cancelled(&self) -> Result<()> {
        if let Some(token) = self.cancel {
            if token.is_cancelled() {
                return Err(Error::Cancelled);
            }
        }
        Ok(())
    }

    /// Writes the id+name header for `id` when `with_header` is set, then its payload.
    /// List elements are written bare (`with_header = false`): their kind comes from the
    /// list header and they are never named.
    fn write_tag(&mut self, writer: &mut ByteWriter, id: NodeId, with_header: bool) -> Result<()> {
        self.check_cancelled()?;
        let kind = self.tree.kind(id)?;
        if with_header {
            writer.write_u8(kind.id());
            writer.write_name(self.tree.name(id)?);
        }
        match self.tree.payload(id)? {
            Payload::Int64(v) => write_integral(writer, kind, *v)?,
            Payload::Float64(v) => write_floating(writer, kind, *v)?,
            Payload::Bytes(bytes) => {
                writer.write_i32(bytes.len() as i32);
                for b in bytes {
                    writer.write_i8(*b);
                }
            }
            Payload::String(s) => {
                let encoded = crate::mutf8::encode(s);
                writer.write_u16(encoded.len() as u16);
                writer.write_bytes(&encoded);
            }
            Payload::IntArray(values) => {
                writer.write_i32(values.len() as i32);
                for v in values {
                    writer.write_i32(*v);
                }
            }
            Payload::LongArray(values) => {
                writer.write_i32(values.len() as i32);
                for v in values {
                    writer.write_i64(*v);
                }
            }
            Payload::Children(children) if kind == Kind::List => {
                let children = children.clone();
                writer.write_u8(self.tree.element_kind(id)?.id());
                writer.write_i32(children.len() as i32);
                for child in &children {
                    self.write_tag(writer, *child, false)?;
                }
            }
            Payload::Children(children) => {
                trace!("writing compound with {} children", children.len());
                let children = children.clone();
                for child in &children {
                    self.write_tag(writer, *child, true)?;
                }
                writer.write_u8(Kind::End.id());
            }
        }
        Ok(())
    }
}

fn write_integral(writer: &mut ByteWriter, kind: Kind, value: i64) -> Result<()> {
    match kind {
        Kind::Byte => writer.write_i8(value as i8),
        Kind::Short => writer.write_i16(value as i16),
        Kind::Int => writer.write_i32(value as i32),
        Kind::Long => writer.write_i64(value),
        _ => return Err(Error::Internal("integral payload on non-integral kind".into())),
    }
    Ok(())
}

fn write_floating(writer: &mut ByteWriter, kind: Kind, value: f64) -> Result<()> {
    match kind {
        Kind::Float => writer.write_f32(value as f32),
        Kind::Double => writer.write_f64(value),
        _ => return Err(Error::Internal("floating payload on non-floating kind".into())),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode;

    #[test]
    fn round_trips_through_decode() {
        let mut tree = Tree::new();
        let root = tree.create_compound(Some("root".into()));
        let list = tree.create_list(Some("nums".into()), Kind::Int);
        for v in [1, 2, 3] {
            let n = tree.create_int(None, v);
            tree.append(list, n).unwrap();
        }
        tree.append(root, list).unwrap();

        let bytes = encode(&tree, root).unwrap();
        let decoded = decode::decode(&bytes).unwrap();
        let found = decoded.tree.child_by_name(decoded.root, "nums").unwrap().unwrap();
        let values: Vec<i64> = decoded
            .tree
            .children(found)
            .unwrap()
            .iter()
            .map(|&id| decoded.tree.as_i64(id).unwrap())
            .collect();
        assert_eq!(values, vec![1, 2, 3]);
    }

    #[test]
    fn empty_list_writes_end_element_kind() {
        let mut tree = Tree::new();
        let root = tree.create_compound(None);
        let list = tree.create_list(Some("empty".into()), Kind::End);
        tree.append(root, list).unwrap();
        let bytes = encode(&tree, root).unwrap();
        let decoded = decode::decode(&bytes).unwrap();
        let found = decoded.tree.child_by_name(decoded.root, "empty").unwrap().unwrap();
        assert_eq!(decoded.tree.element_kind(found).unwrap(), Kind::End);
        assert_eq!(decoded.tree.child_count(found).unwrap(), 0);
    }

    #[test]
    fn applies_requested_compression() {
        let mut tree = Tree::new();
        let root = tree.create_compound(None);
        let compressed = encode_with(
            &tree,
            root,
            Format::Gzip,
            None,
            &mut Progress::none(),
            &Messages::default(),
        )
        .unwrap();
        assert_eq!(compression::detect(&compressed), Format::Gzip);
    }
}
