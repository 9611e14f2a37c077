//! Little-endian, 1-byte packed field writer.

use crate::ids::ObjectId;

/// Wire value of an unassigned object reference.
pub const UNSET_REFERENCE: u16 = 0xFFFF;

/// Reserved byte value used for command padding.
pub const RESERVED: u8 = 0xFF;

/// Appends fixed-width fields with no implicit padding.
#[derive(Debug, Default)]
pub struct WireWriter {
    bytes: Vec<u8>,
}

impl WireWriter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_capacity(bytes: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(bytes),
        }
    }

    /// Number of bytes written so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn u8(&mut self, value: u8) {
        self.bytes.push(value);
    }

    pub fn bool(&mut self, value: bool) {
        self.bytes.push(u8::from(value));
    }

    pub fn u16(&mut self, value: u16) {
        self.bytes.extend_from_slice(&value.to_le_bytes());
    }

    pub fn u32(&mut self, value: u32) {
        self.bytes.extend_from_slice(&value.to_le_bytes());
    }

    pub fn i32(&mut self, value: i32) {
        self.bytes.extend_from_slice(&value.to_le_bytes());
    }

    pub fn f32(&mut self, value: f32) {
        self.bytes.extend_from_slice(&value.to_le_bytes());
    }

    /// Writes an object id.
    pub fn id(&mut self, id: ObjectId) {
        self.u16(id.raw());
    }

    /// Writes an optional reference, [`UNSET_REFERENCE`] when absent.
    pub fn reference(&mut self, reference: Option<ObjectId>) {
        self.u16(reference.map_or(UNSET_REFERENCE, ObjectId::raw));
    }

    /// Writes `count` reserved bytes.
    pub fn reserved(&mut self, count: usize) {
        self.bytes.extend(std::iter::repeat(RESERVED).take(count));
    }

    pub fn bytes(&mut self, bytes: &[u8]) {
        self.bytes.extend_from_slice(bytes);
    }

    /// Returns the written bytes.
    #[must_use]
    pub fn finish(self) -> Vec<u8> {
        self.bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integers_are_little_endian() {
        let mut writer = WireWriter::new();
        writer.u16(0x1234);
        writer.u32(0xAABB_CCDD);
        writer.i32(-2);
        assert_eq!(
            writer.finish(),
            vec![0x34, 0x12, 0xDD, 0xCC, 0xBB, 0xAA, 0xFE, 0xFF, 0xFF, 0xFF]
        );
    }

    #[test]
    fn float_is_ieee_little_endian() {
        let mut writer = WireWriter::new();
        writer.f32(1.0);
        assert_eq!(writer.finish(), vec![0x00, 0x00, 0x80, 0x3F]);
    }

    #[test]
    fn unset_reference_is_all_ones() {
        let mut writer = WireWriter::new();
        writer.reference(None);
        writer.reference(Some(ObjectId::new(0x0102)));
        assert_eq!(writer.finish(), vec![0xFF, 0xFF, 0x02, 0x01]);
    }

    #[test]
    fn reserved_bytes() {
        let mut writer = WireWriter::with_capacity(4);
        writer.u8(7);
        writer.reserved(3);
        assert_eq!(writer.len(), 4);
        assert_eq!(writer.finish(), vec![7, 0xFF, 0xFF, 0xFF]);
    }

    #[test]
    fn bool_is_one_byte() {
        let mut writer = WireWriter::new();
        assert!(writer.is_empty());
        writer.bool(true);
        writer.bool(false);
        assert_eq!(writer.finish(), vec![1, 0]);
    }
}
