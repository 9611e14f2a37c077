use proptest::prelude::*;
use wire::{
    Command, LanguageCode, MacroReference, ObjectId, ObjectKind, ObjectRecord, ObjectReference,
    Point,
};

#[derive(Debug, Clone)]
enum Growth {
    Child(u16, u16, u16),
    Macro(u8, u8),
    Point(u16, u16),
    Language([u8; 2]),
    Command(u16, usize),
    RawData(usize),
}

fn kind_strategy() -> impl Strategy<Value = ObjectKind> {
    (0usize..ObjectKind::ALL.len()).prop_map(|i| ObjectKind::ALL[i])
}

fn growth_strategy() -> impl Strategy<Value = Growth> {
    prop_oneof![
        (any::<u16>(), any::<u16>(), any::<u16>()).prop_map(|(i, x, y)| Growth::Child(i, x, y)),
        (1u8..=26, any::<u8>()).prop_map(|(e, m)| Growth::Macro(e, m)),
        (any::<u16>(), any::<u16>()).prop_map(|(x, y)| Growth::Point(x, y)),
        any::<[u8; 2]>().prop_map(Growth::Language),
        (any::<u16>(), 0usize..40).prop_map(|(i, n)| Growth::Command(i, n)),
        (0usize..64).prop_map(Growth::RawData),
    ]
}

fn apply(record: &mut ObjectRecord, growth: &Growth) {
    // unsupported mutations are expected and ignored here
    let _ = match growth {
        Growth::Child(id, x, y) => {
            record.add_child(ObjectReference::new(ObjectId::new(*id), *x, *y))
        }
        Growth::Macro(event, macro_id) => record.add_macro(MacroReference {
            event: *event,
            macro_id: *macro_id,
        }),
        Growth::Point(x, y) => record.add_point(Point { x: *x, y: *y }),
        Growth::Language(code) => record.add_language(LanguageCode(*code)),
        Growth::Command(id, len) => {
            let command = if len % 3 == 0 {
                Command::ChangeChildPosition {
                    parent_id: ObjectId::new(*id),
                    child_id: ObjectId::new(1),
                    x: 0,
                    y: 0,
                }
            } else if len % 3 == 1 {
                Command::ChangeStringValue {
                    object_id: ObjectId::new(*id),
                    value: vec![b' '; *len],
                }
            } else {
                Command::HideShowObject {
                    object_id: ObjectId::new(*id),
                    show: true,
                }
            };
            record.add_command(command)
        }
        Growth::RawData(len) => record.set_raw_data(vec![0x5A; *len]),
    };
}

proptest! {
    #[test]
    fn prop_size_matches_encoding(
        kind in kind_strategy(),
        id in any::<u16>(),
        growth in prop::collection::vec(growth_strategy(), 0..60),
    ) {
        let mut record = ObjectRecord::empty(ObjectId::new(id), kind);
        for step in &growth {
            apply(&mut record, step);
        }

        let sections = record.sections();
        let expected = kind.fixed_size()
            + sections.iter().map(|s| s.count * s.element_size).sum::<usize>();
        prop_assert_eq!(record.byte_size(), expected);

        let bytes = record.encode().unwrap();
        prop_assert_eq!(bytes.len(), expected);
        prop_assert_eq!(u16::from_le_bytes([bytes[0], bytes[1]]), id);
        prop_assert_eq!(bytes[2], kind.type_code());
    }

    #[test]
    fn prop_rejected_growth_is_a_no_op(
        kind in kind_strategy(),
        growth in prop::collection::vec(growth_strategy(), 1..20),
    ) {
        let mut record = ObjectRecord::empty(ObjectId::new(1), kind);
        for step in &growth {
            let before = record.clone();
            let size_before = record.byte_size();
            apply(&mut record, step);
            if record == before {
                prop_assert_eq!(record.byte_size(), size_before);
            } else {
                prop_assert!(record.byte_size() > size_before || matches!(step, Growth::RawData(_)));
            }
        }
    }
}

#[test]
fn working_set_sections_in_wire_order() {
    let mut record = ObjectRecord::empty(ObjectId::new(1), ObjectKind::WorkingSet);
    record
        .add_language(LanguageCode::from_bytes(b"en"))
        .unwrap();
    record
        .add_macro(MacroReference {
            event: 1,
            macro_id: 4,
        })
        .unwrap();
    record
        .add_child(ObjectReference::new(ObjectId::new(2), 3, 4))
        .unwrap();

    let bytes = record.encode().unwrap();
    assert_eq!(bytes.len(), 10 + 6 + 2 + 2);
    // counters: objects, macros, languages
    assert_eq!(&bytes[7..10], &[1, 1, 1]);
    assert_eq!(&bytes[10..16], &[2, 0, 3, 0, 4, 0]);
    assert_eq!(&bytes[16..18], &[1, 4]);
    assert_eq!(&bytes[18..20], b"en");
}

#[test]
fn input_list_items_are_ids_only() {
    let mut record = ObjectRecord::empty(ObjectId::new(9), ObjectKind::InputList);
    record
        .add_child(ObjectReference::new(ObjectId::new(0x0102), 50, 60))
        .unwrap();
    let bytes = record.encode().unwrap();
    assert_eq!(bytes.len(), 13 + 2);
    assert_eq!(bytes[10], 1);
    assert_eq!(&bytes[13..], &[0x02, 0x01]);
}

#[test]
fn unset_references_encode_as_sentinel() {
    let record = ObjectRecord::empty(ObjectId::new(1), ObjectKind::ObjectPointer);
    assert_eq!(record.encode().unwrap(), vec![1, 0, 27, 0xFF, 0xFF]);
}
