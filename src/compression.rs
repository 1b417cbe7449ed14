use std::io::{Read, Write};

use flate2::{
    bufread::{GzDecoder, ZlibDecoder},
    write::{GzEncoder, ZlibEncoder},
    Compression,
};
use log::trace;

use crate::{
    error::{Error, Result},
    progress::CancellationToken,
};

const CHUNK: usize = 64 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Gzip,
    Zlib,
    Raw,
}

/// Sniffs the leading bytes to tell gzip, zlib, and uncompressed NBT apart. Both
/// compressed forms start with a fixed magic; anything else is assumed raw.
pub fn detect(bytes: &[u8]) -> Format {
    match bytes {
        [0x1F, 0x8B, ..] => Format::Gzip,
        [0x78, ..] => Format::Zlib,
        _ => Format::Raw,
    }
}

pub(crate) fn decompress(bytes: &[u8], cancel: Option<&CancellationToken>) -> Result<Vec<u8>> {
    match detect(bytes) {
        Format::Gzip => {
            trace!("decompressing {} bytes as gzip", bytes.len());
            drain(GzDecoder::new(bytes), cancel)
        }
        Format::Zlib => {
            trace!("decompressing {} bytes as zlib", bytes.len());
            drain(ZlibDecoder::new(bytes), cancel)
        }
        Format::Raw => Ok(bytes.to_vec()),
    }
}

fn drain<R: Read>(mut reader: R, cancel: Option<&CancellationToken>) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    let mut buf = [0u8; CHUNK];
    loop {
        if let Some(token) = cancel {
            if token.is_cancelled() {
                return Err(Error::Cancelled);
            }
        }
        let n = reader
            .read(&mut buf)
            .map_err(|e| Error::Decompress(e.to_string()))?;
        if n == 0 {
            break;
        }
        out.extend_from_slice(&buf[..n]);
    }
    Ok(out)
}

pub(crate) fn compress(bytes: &[u8], format: Format) -> Result<Vec<u8>> {
    match format {
        Format::Raw => Ok(bytes.to_vec()),
        Format::Gzip => {
            let mut encoder = GzEncoder::new(Vec::new(), Compression::new(9));
            encoder
                .write_all(bytes)
                .map_err(|e| Error::Decompress(e.to_string()))?;
            encoder.finish().map_err(|e| Error::Decompress(e.to_string()))
        }
        Format::Zlib => {
            let mut encoder = ZlibEncoder::new(Vec::new(), Compression::new(9));
            encoder
                .write_all(bytes)
                .map_err(|e| Error::Decompress(e.to_string()))?;
            encoder.finish().map_err(|e| Error::Decompress(e.to_string()))
        }
    }
}
