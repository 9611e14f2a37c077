//! Record model and byte layout for ISO 11783-6 object pools.
//!
//! This crate defines the 31 object kinds and 20 macro command kinds a
//! Virtual Terminal accepts, and serializes them little-endian with 1-byte
//! packing. It knows nothing about XML or screen geometry: callers build
//! records with final values and this crate lays them out.
//!
//! # Design Principles
//!
//! - **Counters are derived** - Variable sections are vectors; every count
//!   field is computed from a length at encode time.
//! - **Exact sizes** - [`ObjectRecord::byte_size`] is the length of
//!   [`ObjectRecord::encode`] output, always.
//! - **Rejected mutations are no-ops** - A mutation the kind does not
//!   support returns [`Unsupported`] and leaves the record untouched.
//!
//! # Example
//!
//! ```
//! use wire::{ObjectId, ObjectKind, ObjectRecord, ObjectReference};
//!
//! let mut mask = ObjectRecord::empty(ObjectId::new(1000), ObjectKind::DataMask);
//! mask.add_child(ObjectReference::new(ObjectId::new(2000), 10, 20)).unwrap();
//!
//! let bytes = mask.encode().unwrap();
//! assert_eq!(bytes.len(), ObjectKind::DataMask.fixed_size() + 6);
//! ```

mod command;
mod error;
mod ids;
mod kind;
mod layout;
mod object;
mod role;

pub use command::{Command, CommandKind, COMMAND_SIZE};
pub use error::{EncodeError, EncodeResult, Section, Unsupported};
pub use ids::{LanguageCode, MacroReference, ObjectId, ObjectReference, Point};
pub use kind::{ChildLayout, ObjectKind};
pub use layout::{WireWriter, RESERVED, UNSET_REFERENCE};
pub use object::{
    AlarmMask, ArchedBarGraph, AuxiliaryFunction, AuxiliaryInput, Button, Container, DataMask,
    Ellipse, FillAttributes, FontAttributes, InputAttributes, InputBoolean, InputList,
    InputNumber, InputString, Key, Line, LineAttributes, LinearBarGraph, Macro, Meter,
    NumberVariable, ObjectBody, ObjectPointer, ObjectRecord, OutputNumber, OutputString,
    PictureGraphic, Polygon, Rectangle, SectionCount, SoftKeyMask, StringVariable, WorkingSet,
};
pub use role::{Role, VtEvent};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_api_exports() {
        let _ = UNSET_REFERENCE;
        let _ = RESERVED;
        let _ = COMMAND_SIZE;
        let _ = ObjectKind::ALL;
        let _ = CommandKind::ALL;
        let _ = VtEvent::ALL;
        let _ = Role::ALL;
        let _ = ObjectRecord::empty(ObjectId::new(0), ObjectKind::WorkingSet);
        let _ = WireWriter::new();

        let _: EncodeResult<()> = Ok(());
    }

    #[test]
    fn element_sizes() {
        assert_eq!(ObjectReference::SIZE, 6);
        assert_eq!(MacroReference::SIZE, 2);
        assert_eq!(Point::SIZE, 4);
        assert_eq!(LanguageCode::SIZE, 2);
    }

    #[test]
    fn element_names_are_distinct() {
        for kind in ObjectKind::ALL {
            assert!(CommandKind::from_xml_name(kind.xml_name()).is_none());
        }
    }
}
