use byteorder::{BigEndian, ByteOrder};

use crate::mutf8;

/// A growable big-endian byte sink, mirroring the read side in `reader.rs`.
pub(crate) struct ByteWriter {
    buf: Vec<u8>,
}

impl ByteWriter {
    pub(crate) fn new() -> Self {
        Self { buf: Vec::new() }
    }

    pub(crate) fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    pub(crate) fn write_u8(&mut self, n: u8) {
        self.buf.push(n);
    }

    pub(crate) fn write_i8(&mut self, n: i8) {
        self.buf.push(n as u8);
    }

    pub(crate) fn write_u16(&mut self, n: u16) {
        let mut tmp = [0u8; 2];
        BigEndian::write_u16(&mut tmp, n);
        self.buf.extend_from_slice(&tmp);
    }

    pub(crate) fn write_i16(&mut self, n: i16) {
        let mut tmp = [0u8; 2];
        BigEndian::write_i16(&mut tmp, n);
        self.buf.extend_from_slice(&tmp);
    }

    pub(crate) fn write_i32(&mut self, n: i32) {
        let mut tmp = [0u8; 4];
        BigEndian::write_i32(&mut tmp, n);
        self.buf.extend_from_slice(&tmp);
    }

    pub(crate) fn write_i64(&mut self, n: i64) {
        let mut tmp = [0u8; 8];
        BigEndian::write_i64(&mut tmp, n);
        self.buf.extend_from_slice(&tmp);
    }

    pub(crate) fn write_f32(&mut self, n: f32) {
        let mut tmp = [0u8; 4];
        BigEndian::write_f32(&mut tmp, n);
        self.buf.extend_from_slice(&tmp);
    }

    pub(crate) fn write_f64(&mut self, n: f64) {
        let mut tmp = [0u8; 8];
        BigEndian::write_f64(&mut tmp, n);
        self.buf.extend_from_slice(&tmp);
    }

    pub(crate) fn write_bytes(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Writes the length-prefixed modified-UTF-8 name. `None` writes a zero length, the
    /// inverse of `ByteReader::read_name`.
    pub(crate) fn write_name(&mut self, name: Option<&str>) {
        match name {
            Some(name) => {
                let encoded = mutf8::encode(name);
                self.write_u16(encoded.len() as u16);
                self.write_bytes(&encoded);
            }
            None => self.write_u16(0),
        }
    }
}
