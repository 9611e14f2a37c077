//! Object identifiers.

/// A 16-bit object identifier, unique within one pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ObjectId(u16);

impl ObjectId {
    /// Creates a new object ID.
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    /// Returns the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }
}

impl From<u16> for ObjectId {
    fn from(id: u16) -> Self {
        Self(id)
    }
}

impl From<ObjectId> for u16 {
    fn from(id: ObjectId) -> Self {
        id.0
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Placement of a child object inside a container-like parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObjectReference {
    pub id: ObjectId,
    pub x: u16,
    pub y: u16,
}

impl ObjectReference {
    /// Bytes one reference occupies on the wire.
    pub const SIZE: usize = 6;

    #[must_use]
    pub const fn new(id: ObjectId, x: u16, y: u16) -> Self {
        Self { id, x, y }
    }
}

/// Binds a VT event on an object to a macro.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MacroReference {
    pub event: u8,
    pub macro_id: u8,
}

impl MacroReference {
    /// Bytes one macro reference occupies on the wire.
    pub const SIZE: usize = 2;
}

/// One polygon vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Point {
    pub x: u16,
    pub y: u16,
}

impl Point {
    /// Bytes one point occupies on the wire.
    pub const SIZE: usize = 4;
}

/// Two-letter language code supported by a working set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LanguageCode(pub [u8; 2]);

impl LanguageCode {
    /// Bytes one language code occupies on the wire.
    pub const SIZE: usize = 2;

    /// Builds a code from the first two bytes of `code`, space padded.
    #[must_use]
    pub fn from_bytes(code: &[u8]) -> Self {
        let first = code.first().copied().unwrap_or(b' ');
        let second = code.get(1).copied().unwrap_or(b' ');
        Self([first, second])
    }
}
