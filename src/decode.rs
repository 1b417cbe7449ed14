//! Turns a byte buffer into an in-memory tag tree (`Tree`/`NodeId`).

use log::{debug, trace};

use crate::{
    compression,
    error::{Error, Result},
    kind::Kind,
    messages::Messages,
    progress::{CancellationToken, Progress},
    reader::ByteReader,
    tree::Tree,
};

pub struct Decoded {
    pub tree: Tree,
    pub root: crate::tree::NodeId,
    /// `true` when bytes followed the top-level tag. Non-fatal: `tree`/`root` are valid.
    pub leftover: bool,
}

pub fn decode(bytes: &[u8]) -> Result<Decoded> {
    decode_with(bytes, None, &mut Progress::none(), &Messages::default())
}

pub fn decode_with(
    bytes: &[u8],
    cancel: Option<&CancellationToken>,
    progress: &mut Progress<'_>,
    messages: &Messages,
) -> Result<Decoded> {
    progress.report(0, &messages.decode_start);
    let raw = compression::decompress(bytes, cancel)?;
    let mut decoder = Decoder {
        reader: ByteReader::new(&raw),
        tree: Tree::new(),
        cancel,
        total_len: raw.len().max(1),
    };
    let id_byte = decoder.reader.read_u8()?;
    let root_kind = Kind::try_from(id_byte)?;
    if root_kind == Kind::End {
        return Err(Error::BadTag(id_byte));
    }
    let root_name = decoder.reader.read_name()?;
    let root = decoder.parse_payload(root_kind, root_name, progress, messages)?;
    let leftover = !decoder.reader.is_empty();
    progress.report(100, &messages.decode_done);
    if leftover {
        debug!("trailing bytes after top-level tag, returning non-fatal LeftoverData");
    }
    Ok(Decoded {
        tree: decoder.tree,
        root,
        leftover,
    })
}

struct Decoder<'a> {
    reader: ByteReader<'a>,
    tree: Tree,
    cancel: Option<&'a CancellationToken>,
    total_len: usize,
}

impl<'a> Decoder<'a> {
    fn check_cancelled(&self) -> Result<()> {
        if let Some(token) = self.cancel {
            if token.is_cancelled() {
                return Err(Error::Cancelled);
            }
        }
        Ok(())
    }

    fn parse_payload(
        &mut self,
        kind: Kind,
        name: Option<String>,
        progress: &mut Progress<'_>,
        messages: &Messages,
    ) -> Result<crate::tree::NodeId> {
        self.check_cancelled()?;
        let percent = ((self.reader.position() * 100) / self.total_len).min(99) as u8;
        progress.report(percent, &messages.decode_start);

        let id = match kind {
            Kind::End => return Err(Error::Internal("attempted to parse an End tag body".into())),
            Kind::Byte => self.tree.create_byte(name, self.reader.read_i8()?),
            Kind::Short => self.tree.create_short(name, self.reader.read_i16()?),
            Kind::Int => self.tree.create_int(name, self.reader.read_i32()?),
            Kind::Long => self.tree.create_long(name, self.reader.read_i64()?),
            Kind::Float => self.tree.create_float(name, self.reader.read_f32()?),
            Kind::Double => self.tree.create_double(name, self.reader.read_f64()?),
            Kind::String => {
                let len = self.reader.read_u16()? as usize;
                let bytes = self.reader.read_bytes(len)?;
                let s = crate::mutf8::decode(bytes)?;
                self.tree.create_string(name, s)
            }
            Kind::ByteArray => {
                let len = read_array_len(&mut self.reader)?;
                let mut values = Vec::with_capacity(len);
                for _ in 0..len {
                    values.push(self.reader.read_i8()?);
                }
                self.tree.create_byte_array(name, values)
            }
            Kind::IntArray => {
                let len = read_array_len(&mut self.reader)?;
                let mut values = Vec::with_capacity(len);
                for _ in 0..len {
                    values.push(self.reader.read_i32()?);
                }
                self.tree.create_int_array(name, values)
            }
            Kind::LongArray => {
                let len = read_array_len(&mut self.reader)?;
                let mut values = Vec::with_capacity(len);
                for _ in 0..len {
                    values.push(self.reader.read_i64()?);
                }
                self.tree.create_long_array(name, values)
            }
            Kind::List => {
                let element_id = self.reader.read_u8()?;
                let element_kind = Kind::try_from(element_id)?;
                let len = read_array_len(&mut self.reader)?;
                if element_kind == Kind::End && len > 0 {
                    return Err(Error::BadList);
                }
                let list = self.tree.create_list(name, element_kind);
                for _ in 0..len {
                    self.check_cancelled()?;
                    let child = self.parse_payload(element_kind, None, progress, messages)?;
                    self.tree
                        .append(list, child)
                        .map_err(|_| Error::Internal("failed to append parsed list element".into()))?;
                }
                list
            }
            Kind::Compound => {
                let compound = self.tree.create_compound(name);
                loop {
                    self.check_cancelled()?;
                    let child_id_byte = self.reader.read_u8()?;
                    let child_kind = match Kind::try_from(child_id_byte) {
                        Ok(Kind::End) => break,
                        Ok(kind) => kind,
                        Err(_) => return Err(Error::BadTag(child_id_byte)),
                    };
                    let child_name = self.reader.read_name()?.ok_or(Error::BadKey)?;
                    trace!("compound child {child_name:?}: {child_kind:?}");
                    let child = self.parse_payload(child_kind, Some(child_name), progress, messages)?;
                    self.tree
                        .append(compound, child)
                        .map_err(|_| Error::Internal("failed to append parsed compound child".into()))?;
                }
                compound
            }
        };
        Ok(id)
    }
}

fn read_array_len(reader: &mut ByteReader<'_>) -> Result<usize> {
    let len = reader.read_i32()?;
    if len < 0 {
        return Err(Error::UnexpectedEndOfInput);
    }
    Ok(len as usize)
}
