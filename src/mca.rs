//! Reads and writes Anvil (`.mca`) region files: a 1024-slot grid of compressed NBT
//! chunks framed by two 4096-byte header sectors.

use log::{debug, trace, warn};

use crate::{
    compression::{self, Format},
    decode, encode,
    error::{Error, Result},
    messages::Messages,
    progress::CancellationToken,
    tree::{NodeId, Tree},
};

const SECTOR_SIZE: usize = 4096;
const HEADER_SIZE: usize = SECTOR_SIZE * 2;
const SLOTS: usize = 1024;
const GRID: usize = 32;

fn slot_index(x: u8, z: u8) -> usize {
    (x as usize % GRID) + (z as usize % GRID) * GRID
}

/// A chunk's grid coordinates and decoded tag tree, as returned by [`Region::parse_all`].
pub type DecodedChunk = ((u8, u8), decode::Decoded);

#[derive(Clone)]
struct ChunkSlot {
    /// Compression-type byte as stored on disk: 1 = gzip, 2 = zlib, anything else raw.
    compression: u8,
    data: Vec<u8>,
    timestamp: u32,
}

/// An Anvil region: a 32x32 grid of optional chunk payloads.
pub struct Region {
    slots: Vec<Option<ChunkSlot>>,
}

impl Default for Region {
    fn default() -> Self {
        Self::new()
    }
}

impl Region {
    pub fn new() -> Self {
        Self {
            slots: vec![None; SLOTS],
        }
    }

    /// Parses the `(x, z)` region coordinates out of a `r.<x>.<z>.mca` filename.
    pub fn parse_filename_coords(filename: &str) -> Option<(i32, i32)> {
        let name = filename.rsplit(['/', '\\']).next().unwrap_or(filename);
        let mut parts = name.split('.');
        if parts.next()? != "r" {
            return None;
        }
        let x: i32 = parts.next()?.parse().ok()?;
        let z: i32 = parts.next()?.parse().ok()?;
        if parts.next()? != "mca" {
            return None;
        }
        Some((x, z))
    }

    pub fn read(bytes: &[u8], skip_chunk_errors: bool) -> Result<Self> {
        Self::read_with(bytes, skip_chunk_errors, &Messages::default())
    }

    pub fn read_with(bytes: &[u8], skip_chunk_errors: bool, messages: &Messages) -> Result<Self> {
        trace!("{}", messages.mca_read_start);
        if bytes.len() < HEADER_SIZE {
            return Err(Error::BadMca("header truncated: fewer than 8192 bytes".into()));
        }
        let mut region = Self::new();
        for i in 0..SLOTS {
            let entry = &bytes[i * 4..i * 4 + 4];
            let sector_offset = u32::from_be_bytes([0, entry[0], entry[1], entry[2]]) as usize;
            let sector_count = entry[3] as usize;
            if sector_offset == 0 {
                continue;
            }
            let timestamp_offset = SECTOR_SIZE + i * 4;
            let timestamp = u32::from_be_bytes(
                bytes[timestamp_offset..timestamp_offset + 4]
                    .try_into()
                    .expect("slice of length 4"),
            );

            match read_chunk_slot(bytes, sector_offset, sector_count, timestamp) {
                Ok(slot) => region.slots[i] = Some(slot),
                Err(err) if skip_chunk_errors => {
                    warn!("skipping malformed chunk at slot {i}: {err}");
                }
                Err(err) => return Err(err),
            }
        }
        trace!("{}", messages.mca_read_done);
        Ok(region)
    }

    pub fn write(&self) -> Vec<u8> {
        let mut offsets = vec![[0u8; 4]; SLOTS];
        let mut timestamps = vec![0u32; SLOTS];
        let mut body = Vec::new();
        let mut cursor_sectors = 2u32;

        for (i, slot) in self.slots.iter().enumerate() {
            let Some(slot) = slot else { continue };
            let start = body.len();
            let length = (1 + slot.data.len()) as u32;
            body.extend_from_slice(&length.to_be_bytes());
            body.push(slot.compression);
            body.extend_from_slice(&slot.data);
            let written = body.len() - start;
            let sector_count = written.div_ceil(SECTOR_SIZE);
            let padded = sector_count * SECTOR_SIZE;
            body.resize(start + padded, 0);

            offsets[i] = [
                (cursor_sectors >> 16) as u8,
                (cursor_sectors >> 8) as u8,
                cursor_sectors as u8,
                sector_count as u8,
            ];
            timestamps[i] = slot.timestamp;
            cursor_sectors += sector_count as u32;
        }

        let mut out = Vec::with_capacity(HEADER_SIZE + body.len());
        for offset in &offsets {
            out.extend_from_slice(offset);
        }
        for timestamp in &timestamps {
            out.extend_from_slice(&timestamp.to_be_bytes());
        }
        out.extend_from_slice(&body);
        let padded_len = out.len().div_ceil(SECTOR_SIZE) * SECTOR_SIZE;
        out.resize(padded_len, 0);
        out
    }

    pub fn chunk(&self, x: u8, z: u8) -> Option<(&[u8], u32)> {
        self.slots[slot_index(x, z)]
            .as_ref()
            .map(|slot| (slot.data.as_slice(), slot.timestamp))
    }

    /// Stores an already-compressed chunk payload. `compression` is the on-disk type
    /// byte (1 gzip, 2 zlib); callers wanting this crate to compress should go through
    /// [`Region::set_decoded_chunk`] instead.
    pub fn set_chunk(&mut self, x: u8, z: u8, compression: u8, data: Vec<u8>, timestamp: u32) {
        self.slots[slot_index(x, z)] = Some(ChunkSlot {
            compression,
            data,
            timestamp,
        });
    }

    pub fn set_decoded_chunk(
        &mut self,
        x: u8,
        z: u8,
        tree: &Tree,
        root: NodeId,
        timestamp: u32,
    ) -> Result<()> {
        let data = encode::encode_with(
            tree,
            root,
            Format::Zlib,
            None,
            &mut crate::progress::Progress::none(),
            &crate::messages::Messages::default(),
        )?;
        self.set_chunk(x, z, 2, data, timestamp);
        Ok(())
    }

    pub fn remove_chunk(&mut self, x: u8, z: u8) {
        self.slots[slot_index(x, z)] = None;
    }

    /// Decodes every present chunk's NBT payload. Returns the successfully decoded
    /// chunks alongside a count of the ones that failed to parse; failures never abort
    /// the scan, matching `read`'s lenient-skip mode.
    pub fn parse_all(&self, cancel: Option<&CancellationToken>) -> Result<(Vec<DecodedChunk>, usize)> {
        let mut decoded = Vec::new();
        let mut failures = 0;
        for z in 0..GRID as u8 {
            for x in 0..GRID as u8 {
                if let Some(token) = cancel {
                    if token.is_cancelled() {
                        return Err(Error::Cancelled);
                    }
                }
                let Some(slot) = &self.slots[slot_index(x, z)] else {
                    continue;
                };
                let raw = match slot.compression {
                    1 | 2 => compression::decompress(&slot.data, cancel)?,
                    _ => slot.data.clone(),
                };
                match decode::decode(&raw) {
                    Ok(result) => decoded.push(((x, z), result)),
                    Err(err) => {
                        debug!("chunk ({x}, {z}) failed to decode: {err}");
                        failures += 1;
                    }
                }
            }
        }
        Ok((decoded, failures))
    }
}

fn read_chunk_slot(bytes: &[u8], sector_offset: usize, sector_count: usize, timestamp: u32) -> Result<ChunkSlot> {
    let start = sector_offset * SECTOR_SIZE;
    if start + 5 > bytes.len() {
        return Err(Error::BadMca("chunk header beyond end of file".into()));
    }
    let length = u32::from_be_bytes(bytes[start..start + 4].try_into().expect("slice of length 4")) as usize;
    if length == 0 {
        return Err(Error::BadMca("zero-length chunk".into()));
    }
    let compression = bytes[start + 4];
    let payload_start = start + 5;
    let payload_end = payload_start
        .checked_add(length - 1)
        .filter(|&end| end <= bytes.len())
        .ok_or_else(|| Error::BadMca("chunk payload beyond end of file".into()))?;
    let _ = sector_count; // sector_count is advisory; the length prefix is authoritative.
    Ok(ChunkSlot {
        compression,
        data: bytes[payload_start..payload_end].to_vec(),
        timestamp,
    })
}
