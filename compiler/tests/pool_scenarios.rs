use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use compiler::{compile_str, Compilation, PoolImage, RunParams};
use raster::{reduce_color, ColorDepth};
use wire::{ObjectId, ObjectKind};

fn compile(target: RunParams, body: &str) -> Compilation<PoolImage> {
    let xml = format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<objectpool dimension="200" sk_width="60" sk_height="32">
{body}
</objectpool>"#
    );
    let done = compile_str(&xml, target).unwrap();
    assert!(done.diagnostics.is_empty(), "{:?}", done.diagnostics);
    done
}

fn record(image: &PoolImage, id: u16) -> &[u8] {
    let index = image
        .entries()
        .iter()
        .position(|entry| entry.id == ObjectId::new(id))
        .unwrap();
    image.record(index).unwrap()
}

#[test]
fn child_reference_unscaled_at_native_size() {
    let done = compile(
        RunParams::default(),
        r#"<workingset id="0"><datamask id="1000" pos_x="10" pos_y="20"/></workingset>"#,
    );
    let image = &done.sink;
    assert_eq!(image.object_count(), 2);
    assert_eq!(image.entries()[0].kind, ObjectKind::DataMask);
    assert_eq!(image.entries()[1].kind, ObjectKind::WorkingSet);

    let ws = image.record(1).unwrap();
    assert_eq!(ws.len(), ObjectKind::WorkingSet.fixed_size() + 6);
    assert_eq!(ws[7], 1);
    assert_eq!(&ws[10..16], &[0xE8, 0x03, 10, 0, 20, 0]);
}

#[test]
fn child_reference_scaled_by_two() {
    let done = compile(
        RunParams::new(400, 120, 64, 256),
        r#"<workingset id="0"><datamask id="1000" pos_x="10" pos_y="20"/></workingset>"#,
    );
    assert!((done.transform.dm_mult - 2.0).abs() < f32::EPSILON);
    assert_eq!(done.transform.dm_dx, 0);
    let ws = record(&done.sink, 0);
    assert_eq!(&ws[10..16], &[0xE8, 0x03, 20, 0, 40, 0]);
}

#[test]
fn button_scaled_by_designator_multiplier() {
    let done = compile(
        RunParams::new(200, 120, 64, 256),
        r#"<softkeymask id="2000" use="designator">
             <button id="2001" key_code="5" width="50" height="20"/>
           </softkeymask>"#,
    );
    let button = record(&done.sink, 2001);
    assert_eq!(button.len(), ObjectKind::Button.fixed_size());
    assert_eq!(&button[3..7], &[100, 0, 40, 0]);
    assert_eq!(button[9], 5);

    let mask = record(&done.sink, 2000);
    assert_eq!(mask[4], 1);
    assert_eq!(&mask[6..8], &[0xD1, 0x07]);
}

#[test]
fn picture_packed_to_sixteen_colours() {
    let pixels = [0u8, 1, 16, 18, 20, 255, 7, 46];
    let payload = STANDARD.encode(pixels);
    let done = compile(
        RunParams::new(200, 60, 32, 16),
        &format!(
            r#"<picturegraphic id="30" width="4">
                 <image_data image_width="4" image_height="2">{payload}</image_data>
               </picturegraphic>"#
        ),
    );
    let picture = record(&done.sink, 30);
    assert_eq!(picture.len(), ObjectKind::PictureGraphic.fixed_size() + 4);
    assert_eq!(&picture[5..9], &[4, 0, 2, 0]);
    assert_eq!(picture[9], ColorDepth::Sixteen.picture_format());
    assert_eq!(&picture[12..16], &[4, 0, 0, 0]);

    let expected: Vec<u8> = pixels
        .chunks(2)
        .map(|pair| {
            reduce_color(pair[0], ColorDepth::Sixteen) << 4
                | reduce_color(pair[1], ColorDepth::Sixteen)
        })
        .collect();
    assert_eq!(&picture[17..21], expected.as_slice());
    assert_eq!(&picture[17..21], &[0x01, 0x0F, 0x90, 0x7A]);
}

#[test]
fn input_string_value_space_padded() {
    let done = compile(
        RunParams::default(),
        r#"<inputstring id="40" length="5" value="ab"/>"#,
    );
    let input = record(&done.sink, 40);
    assert_eq!(input.len(), ObjectKind::InputString.fixed_size() + 5);
    assert_eq!(input[16], 5);
    assert_eq!(&input[17..22], b"ab   ");
}

#[test]
fn event_role_binds_macro() {
    let done = compile(
        RunParams::default(),
        r#"<datamask id="1">
             <macro id="5" role="on_activate">
               <command_hide_show_object object_id="1" hide_show="show"/>
             </macro>
           </datamask>"#,
    );
    let image = &done.sink;
    assert_eq!(image.entries()[0].kind, ObjectKind::Macro);

    let mac = record(image, 5);
    assert_eq!(mac.len(), ObjectKind::Macro.fixed_size() + 8);
    assert_eq!(&mac[3..5], &[8, 0]);
    assert_eq!(&mac[6..9], &[1, 0, 1]);

    let mask = record(image, 1);
    assert_eq!(mask[6], 0);
    assert_eq!(mask[7], 1);
    assert_eq!(&mask[8..10], &[1, 5]);
}

#[test]
fn reference_roles_fill_fields() {
    let done = compile(
        RunParams::default(),
        r#"<workingset id="0">
             <include_object id="1000" role="active_mask"/>
             <include_object id="1000"/>
           </workingset>
           <datamask id="1000">
             <include_object id="2000" role="soft_key_mask"/>
           </datamask>"#,
    );
    let ws = record(&done.sink, 0);
    assert_eq!(&ws[5..7], &[0xE8, 0x03]);
    assert_eq!(ws[7], 1);

    let mask = record(&done.sink, 1000);
    assert_eq!(&mask[4..6], &[0xD0, 0x07]);
    assert_eq!(mask[6], 0);
}

#[test]
fn polygon_points_scaled() {
    let done = compile(
        RunParams::new(400, 120, 64, 256),
        r#"<polygon id="5" width="10" height="10">
             <point pos_x="3" pos_y="4"/>
             <point pos_x="5" pos_y="0"/>
           </polygon>"#,
    );
    let polygon = record(&done.sink, 5);
    assert_eq!(polygon.len(), ObjectKind::Polygon.fixed_size() + 8);
    assert_eq!(&polygon[3..7], &[20, 0, 20, 0]);
    assert_eq!(polygon[12], 2);
    assert_eq!(&polygon[14..22], &[6, 0, 8, 0, 10, 0, 0, 0]);
}

#[test]
fn key_children_centred() {
    // sk_mult = min(120 / 60, 32 / 32) = 1, leaving 30 px on each side
    let done = compile(
        RunParams::new(200, 120, 32, 256),
        r#"<key id="10" key_code="1"><rectangle id="11" pos_x="2" pos_y="3"/></key>"#,
    );
    assert_eq!(done.transform.sk_dx, 30);
    assert_eq!(done.transform.sk_dy, 0);
    let key = record(&done.sink, 10);
    assert_eq!(&key[7..13], &[11, 0, 32, 0, 3, 0]);
}

#[test]
fn button_children_padded() {
    let done = compile(
        RunParams::new(400, 120, 64, 256),
        r#"<button id="20"><rectangle id="21" pos_x="1" pos_y="1"/></button>"#,
    );
    let button = record(&done.sink, 20);
    assert_eq!(&button[13..19], &[21, 0, 6, 0, 6, 0]);
}

#[test]
fn block_font_cells_offset_children() {
    let done = compile(
        RunParams::default(),
        r#"<container id="1">
             <outputstring id="2" pos_x="1" block_font_size="8x12" block_col="2" block_row="1"/>
           </container>"#,
    );
    let container = record(&done.sink, 1);
    assert_eq!(&container[10..16], &[2, 0, 17, 0, 12, 0]);
}

#[test]
fn language_codes_on_working_set() {
    let done = compile(
        RunParams::default(),
        r#"<workingset id="0"><language code="en"/><language code="de"/></workingset>"#,
    );
    let ws = record(&done.sink, 0);
    assert_eq!(ws[9], 2);
    assert_eq!(&ws[10..14], b"ende");
}

#[test]
fn change_size_command_scaled() {
    let done = compile(
        RunParams::new(400, 120, 64, 256),
        r#"<macro id="7">
             <command_change_size object_id="3" width="10" height="20"/>
           </macro>"#,
    );
    let mac = record(&done.sink, 7);
    assert_eq!(&mac[6..12], &[3, 0, 20, 0, 40, 0]);
}

#[test]
fn root_names_and_counts() {
    let done = compile(
        RunParams::default(),
        r#"<datamask id="1000" name="MainMask"><rectangle id="1" name="Inner"/></datamask>
           <numbervariable id="300" name="Speed"/>
           <macro id="1"/>"#,
    );
    let image = &done.sink;
    assert_eq!(image.object_count(), 4);
    assert_eq!(image.root_objects(), 3);
    let names: Vec<_> = image
        .names()
        .iter()
        .map(|n| (n.name.as_str(), n.id.raw()))
        .collect();
    assert_eq!(names, vec![("MainMask", 1000), ("Speed", 300)]);
}

#[test]
fn output_is_deterministic() {
    let body = r#"<datamask id="1"><rectangle id="2" pos_x="4" width="9" line_colour="red"/></datamask>"#;
    let first = compile(RunParams::new(300, 90, 48, 16), body);
    let second = compile(RunParams::new(300, 90, 48, 16), body);
    assert_eq!(first.sink, second.sink);
}
