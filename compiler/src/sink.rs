//! Receivers for finished objects.

use wire::{ObjectId, ObjectKind};

/// Receives each object as soon as its element closes.
///
/// Objects arrive innermost first: a child closes, and is emitted, before
/// its parent.
pub trait PoolSink {
    /// Called with the encoded record of every finished object.
    fn object(&mut self, kind: ObjectKind, id: ObjectId, bytes: &[u8]);

    /// Called for every element that is a direct child of the root, with
    /// its `name` attribute if it has one.
    fn root_element(&mut self, _name: Option<&str>, _id: ObjectId) {}
}

/// Location of one object inside a [`PoolImage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObjectEntry {
    #[cfg_attr(feature = "serde", serde(with = "kind_code"))]
    pub kind: ObjectKind,
    #[cfg_attr(feature = "serde", serde(with = "object_id"))]
    pub id: ObjectId,
    pub offset: usize,
    pub len: usize,
}

/// A named root-level element.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RootName {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(with = "object_id"))]
    pub id: ObjectId,
}

/// Collects the whole pool in memory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PoolImage {
    bytes: Vec<u8>,
    entries: Vec<ObjectEntry>,
    root_objects: usize,
    names: Vec<RootName>,
}

impl PoolImage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Concatenated records in emission order.
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    #[must_use]
    pub fn entries(&self) -> &[ObjectEntry] {
        &self.entries
    }

    /// Bytes of the record at `index` in emission order.
    #[must_use]
    pub fn record(&self, index: usize) -> Option<&[u8]> {
        let entry = self.entries.get(index)?;
        self.bytes.get(entry.offset..entry.offset + entry.len)
    }

    /// Finds the first record with `id`.
    #[must_use]
    pub fn find(&self, id: ObjectId) -> Option<&ObjectEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    #[must_use]
    pub fn object_count(&self) -> usize {
        self.entries.len()
    }

    /// Number of direct children of the root element.
    #[must_use]
    pub const fn root_objects(&self) -> usize {
        self.root_objects
    }

    /// Named root-level elements in document order.
    #[must_use]
    pub fn names(&self) -> &[RootName] {
        &self.names
    }
}

impl PoolSink for PoolImage {
    fn object(&mut self, kind: ObjectKind, id: ObjectId, bytes: &[u8]) {
        self.entries.push(ObjectEntry {
            kind,
            id,
            offset: self.bytes.len(),
            len: bytes.len(),
        });
        self.bytes.extend_from_slice(bytes);
    }

    fn root_element(&mut self, name: Option<&str>, id: ObjectId) {
        self.root_objects += 1;
        if let Some(name) = name {
            self.names.push(RootName {
                name: name.to_owned(),
                id,
            });
        }
    }
}

impl<S: PoolSink + ?Sized> PoolSink for &mut S {
    fn object(&mut self, kind: ObjectKind, id: ObjectId, bytes: &[u8]) {
        (**self).object(kind, id, bytes);
    }

    fn root_element(&mut self, name: Option<&str>, id: ObjectId) {
        (**self).root_element(name, id);
    }
}

#[cfg(feature = "serde")]
mod kind_code {
    use serde::{de, Deserialize, Deserializer, Serializer};
    use wire::ObjectKind;

    #[allow(clippy::trivially_copy_pass_by_ref)]
    pub fn serialize<S: Serializer>(kind: &ObjectKind, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(kind.xml_name())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<ObjectKind, D::Error> {
        let name = String::deserialize(deserializer)?;
        ObjectKind::from_xml_name(&name)
            .ok_or_else(|| de::Error::custom(format!("unknown object kind {name:?}")))
    }
}

#[cfg(feature = "serde")]
mod object_id {
    use serde::{Deserialize, Deserializer, Serializer};
    use wire::ObjectId;

    #[allow(clippy::trivially_copy_pass_by_ref)]
    pub fn serialize<S: Serializer>(id: &ObjectId, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u16(id.raw())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<ObjectId, D::Error> {
        u16::deserialize(deserializer).map(ObjectId::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_tracks_offsets() {
        let mut image = PoolImage::new();
        image.object(ObjectKind::NumberVariable, ObjectId::new(5), &[5, 0, 21, 0, 0, 0, 0]);
        image.object(ObjectKind::ObjectPointer, ObjectId::new(6), &[6, 0, 27, 255, 255]);
        assert_eq!(image.object_count(), 2);
        assert_eq!(image.bytes().len(), 12);
        assert_eq!(image.entries()[1].offset, 7);
        assert_eq!(image.record(1), Some(&[6, 0, 27, 255, 255][..]));
        assert_eq!(image.find(ObjectId::new(5)).map(|e| e.len), Some(7));
        assert!(image.record(2).is_none());
    }

    #[test]
    fn root_elements_counted_names_kept() {
        let mut image = PoolImage::new();
        image.root_element(Some("MainMask"), ObjectId::new(1000));
        image.root_element(None, ObjectId::new(1001));
        assert_eq!(image.root_objects(), 2);
        assert_eq!(
            image.names(),
            &[RootName {
                name: "MainMask".into(),
                id: ObjectId::new(1000)
            }]
        );
    }

    fn feed<S: PoolSink>(mut sink: S) {
        sink.object(ObjectKind::Macro, ObjectId::new(1), &[1, 0, 28, 0, 0]);
        sink.root_element(Some("m"), ObjectId::new(1));
    }

    #[test]
    fn borrowed_sink_forwards() {
        let mut image = PoolImage::new();
        feed(&mut image);
        assert_eq!(image.object_count(), 1);
        assert_eq!(image.root_objects(), 1);
        assert_eq!(image.names()[0].name, "m");
    }
}
