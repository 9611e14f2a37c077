//! Builds the fixed portion of an object record from element attributes.
//!
//! Variable sections start empty; the assembler grows them from nested
//! elements. All reference fields start unset.

use raster::ColorDepth;
use wire::{
    AlarmMask, ArchedBarGraph, AuxiliaryFunction, AuxiliaryInput, Button, Container, DataMask,
    Ellipse, FillAttributes, FontAttributes, InputAttributes, InputBoolean, InputList,
    InputNumber, InputString, Key, Line, LineAttributes, LinearBarGraph, Macro, Meter,
    NumberVariable, ObjectBody, ObjectId, ObjectKind, ObjectPointer, ObjectRecord, OutputNumber,
    OutputString, PictureGraphic, Polygon, Rectangle, SoftKeyMask, StringVariable, WorkingSet,
};

use crate::attrs::{
    Resolver, ACOUSTIC_SIGNALS, ARCHED_BAR_GRAPH_OPTIONS, ELLIPSE_TYPES, FILL_TYPES, FONT_STYLES,
    FONT_TYPES, FUNCTION_TYPES, INPUT_NUMBER_OPTIONS, INPUT_STRING_OPTIONS, JUSTIFICATIONS,
    LINEAR_BAR_GRAPH_OPTIONS, LINE_DIRECTIONS, METER_OPTIONS, NUMBER_FORMATS, PICTURE_OPTIONS,
    POLYGON_TYPES, PRIORITIES, VALIDATION_TYPES,
};
use crate::transform::{scale, wrap_u16};

/// Current multiplier and colour depth applied to new records.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BuildContext {
    pub multiplier: f32,
    pub depth: ColorDepth,
}

impl BuildContext {
    #[must_use]
    pub const fn new(multiplier: f32, depth: ColorDepth) -> Self {
        Self { multiplier, depth }
    }

    /// `trunc(multiplier * attribute)` wrapped to 16 bits.
    fn scaled(self, r: &Resolver<'_>, name: &str) -> u16 {
        wrap_u16(scale(self.multiplier, r.int(name)))
    }

    /// Font size code grown by 3 per whole multiplier step.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub(crate) fn font_size(self, r: &mut Resolver<'_>) -> u8 {
        let steps = self.multiplier as i64 - 1;
        (r.font_size("font_size") + steps * 3) as u8
    }

    /// `trunc(multiplier * line_width)`.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn line_width(self, r: &Resolver<'_>) -> u8 {
        scale(self.multiplier, r.int("line_width")) as u8
    }
}

/// Declared string length in bytes, clamped to what the record's length
/// field can hold.
fn length(r: &mut Resolver<'_>, max: u16) -> usize {
    usize::from(r.clamped("length", max))
}

/// Largest value of an 8-bit length field.
const SHORT_STRING: u16 = 0xFF;
const LONG_STRING: u16 = u16::MAX;

/// Builds a record of `kind` with empty variable sections.
#[allow(clippy::too_many_lines)]
pub fn build_object(
    kind: ObjectKind,
    id: ObjectId,
    r: &mut Resolver<'_>,
    ctx: BuildContext,
) -> ObjectRecord {
    let depth = ctx.depth;
    let body = match kind {
        ObjectKind::WorkingSet => ObjectBody::WorkingSet(WorkingSet {
            background_colour: r.colour("background_colour", depth),
            selectable: r.flag("selectable"),
            ..WorkingSet::default()
        }),
        ObjectKind::DataMask => ObjectBody::DataMask(DataMask {
            background_colour: r.colour("background_colour", depth),
            ..DataMask::default()
        }),
        ObjectKind::AlarmMask => ObjectBody::AlarmMask(AlarmMask {
            background_colour: r.colour("background_colour", depth),
            priority: r.enum_u8("priority", &PRIORITIES),
            acoustic_signal: r.enum_u8("acoustic_signal", &ACOUSTIC_SIGNALS),
            ..AlarmMask::default()
        }),
        ObjectKind::Container => ObjectBody::Container(Container {
            width: ctx.scaled(r, "width"),
            height: ctx.scaled(r, "height"),
            hidden: r.flag("hidden"),
            ..Container::default()
        }),
        ObjectKind::SoftKeyMask => ObjectBody::SoftKeyMask(SoftKeyMask {
            background_colour: r.colour("background_colour", depth),
            ..SoftKeyMask::default()
        }),
        ObjectKind::Key => ObjectBody::Key(Key {
            background_colour: r.colour("background_colour", depth),
            key_code: r.u8("key_code"),
            ..Key::default()
        }),
        ObjectKind::Button => ObjectBody::Button(Button {
            width: ctx.scaled(r, "width"),
            height: ctx.scaled(r, "height"),
            background_colour: r.colour("background_colour", depth),
            border_colour: r.colour("border_colour", depth),
            key_code: r.u8("key_code"),
            latchable: r.flag("latchable"),
            ..Button::default()
        }),
        ObjectKind::InputBoolean => ObjectBody::InputBoolean(InputBoolean {
            background_colour: r.colour("background_colour", depth),
            width: ctx.scaled(r, "width"),
            value: r.u8("value"),
            enabled: r.flag("enabled"),
            ..InputBoolean::default()
        }),
        ObjectKind::InputString => {
            let len = length(r, SHORT_STRING);
            ObjectBody::InputString(InputString {
                width: ctx.scaled(r, "width"),
                height: ctx.scaled(r, "height"),
                background_colour: r.colour("background_colour", depth),
                options: r.options("options", &INPUT_STRING_OPTIONS),
                horizontal_justification: r.enum_u8("horizontal_justification", &JUSTIFICATIONS),
                value: r.latin1_padded("value", len),
                enabled: r.flag("enabled"),
                ..InputString::default()
            })
        }
        ObjectKind::InputNumber => ObjectBody::InputNumber(InputNumber {
            width: ctx.scaled(r, "width"),
            height: ctx.scaled(r, "height"),
            background_colour: r.colour("background_colour", depth),
            options: r.options("options", &INPUT_NUMBER_OPTIONS),
            value: r.u32("value"),
            min_value: r.u32("min_value"),
            max_value: r.u32("max_value"),
            offset: r.i32("offset"),
            scale: r.float("scale", 1.0),
            number_of_decimals: r.u8("number_of_decimals"),
            format: r.enum_u8("format", &NUMBER_FORMATS),
            horizontal_justification: r.enum_u8("horizontal_justification", &JUSTIFICATIONS),
            enabled: r.flag("enabled"),
            ..InputNumber::default()
        }),
        ObjectKind::InputList => ObjectBody::InputList(InputList {
            width: ctx.scaled(r, "width"),
            height: ctx.scaled(r, "height"),
            value: r.u8("value"),
            enabled: r.flag("enabled"),
            ..InputList::default()
        }),
        ObjectKind::OutputString => {
            let len = length(r, LONG_STRING);
            ObjectBody::OutputString(OutputString {
                width: ctx.scaled(r, "width"),
                height: ctx.scaled(r, "height"),
                background_colour: r.colour("background_colour", depth),
                options: r.options("options", &INPUT_STRING_OPTIONS),
                horizontal_justification: r.enum_u8("horizontal_justification", &JUSTIFICATIONS),
                value: r.latin1_padded("value", len),
                ..OutputString::default()
            })
        }
        ObjectKind::OutputNumber => ObjectBody::OutputNumber(OutputNumber {
            width: ctx.scaled(r, "width"),
            height: ctx.scaled(r, "height"),
            background_colour: r.colour("background_colour", depth),
            options: r.options("options", &INPUT_NUMBER_OPTIONS),
            value: r.u32("value"),
            offset: r.i32("offset"),
            scale: r.float("scale", 1.0),
            number_of_decimals: r.u8("number_of_decimals"),
            format: r.enum_u8("format", &NUMBER_FORMATS),
            horizontal_justification: r.enum_u8("horizontal_justification", &JUSTIFICATIONS),
            ..OutputNumber::default()
        }),
        ObjectKind::Line => ObjectBody::Line(Line {
            width: ctx.scaled(r, "width"),
            height: ctx.scaled(r, "height"),
            line_direction: r.enum_u8("line_direction", &LINE_DIRECTIONS),
            ..Line::default()
        }),
        ObjectKind::Rectangle => ObjectBody::Rectangle(Rectangle {
            width: ctx.scaled(r, "width"),
            height: ctx.scaled(r, "height"),
            line_suppression: r.line_suppression(),
            ..Rectangle::default()
        }),
        ObjectKind::Ellipse => ObjectBody::Ellipse(Ellipse {
            width: ctx.scaled(r, "width"),
            height: ctx.scaled(r, "height"),
            ellipse_type: r.enum_u8("ellipse_type", &ELLIPSE_TYPES),
            start_angle: r.u8("start_angle"),
            end_angle: r.u8("end_angle"),
            ..Ellipse::default()
        }),
        ObjectKind::Polygon => ObjectBody::Polygon(Polygon {
            width: ctx.scaled(r, "width"),
            height: ctx.scaled(r, "height"),
            polygon_type: r.enum_u8("polygon_type", &POLYGON_TYPES),
            ..Polygon::default()
        }),
        ObjectKind::Meter => ObjectBody::Meter(Meter {
            width: ctx.scaled(r, "width"),
            needle_colour: r.colour("needle_colour", depth),
            border_colour: r.colour("border_colour", depth),
            arc_and_tick_colour: r.colour("arc_and_tick_colour", depth),
            options: r.options("options", &METER_OPTIONS),
            number_of_ticks: r.u8("number_of_ticks"),
            start_angle: r.u8("start_angle"),
            end_angle: r.u8("end_angle"),
            min_value: r.u16("min_value"),
            max_value: r.u16("max_value"),
            value: r.u16("value"),
            ..Meter::default()
        }),
        ObjectKind::LinearBarGraph => ObjectBody::LinearBarGraph(LinearBarGraph {
            width: ctx.scaled(r, "width"),
            height: ctx.scaled(r, "height"),
            colour: r.colour("colour", depth),
            target_line_colour: r.colour("target_line_colour", depth),
            options: r.options("options", &LINEAR_BAR_GRAPH_OPTIONS),
            number_of_ticks: r.u8("number_of_ticks"),
            min_value: r.u16("min_value"),
            max_value: r.u16("max_value"),
            value: r.u16("value"),
            target_value: r.u16("target_value"),
            ..LinearBarGraph::default()
        }),
        ObjectKind::ArchedBarGraph => ObjectBody::ArchedBarGraph(ArchedBarGraph {
            width: ctx.scaled(r, "width"),
            height: ctx.scaled(r, "height"),
            colour: r.colour("colour", depth),
            target_line_colour: r.colour("target_line_colour", depth),
            options: r.options("options", &ARCHED_BAR_GRAPH_OPTIONS),
            start_angle: r.u8("start_angle"),
            end_angle: r.u8("end_angle"),
            bar_graph_width: r.u16("bar_graph_width"),
            min_value: r.u16("min_value"),
            max_value: r.u16("max_value"),
            value: r.u16("value"),
            target_value: r.u16("target_value"),
            ..ArchedBarGraph::default()
        }),
        ObjectKind::PictureGraphic => ObjectBody::PictureGraphic(PictureGraphic {
            width: ctx.scaled(r, "width"),
            format: depth.picture_format(),
            options: r.options("options", &PICTURE_OPTIONS),
            transparency_colour: r.colour("transparency_colour", depth),
            ..PictureGraphic::default()
        }),
        ObjectKind::NumberVariable => ObjectBody::NumberVariable(NumberVariable {
            value: r.u32("value"),
        }),
        ObjectKind::StringVariable => {
            let len = length(r, LONG_STRING);
            ObjectBody::StringVariable(StringVariable {
                value: r.latin1_padded("value", len),
            })
        }
        ObjectKind::FontAttributes => ObjectBody::FontAttributes(FontAttributes {
            font_colour: r.colour("font_colour", depth),
            font_size: ctx.font_size(r),
            font_type: r.enum_u8("font_type", &FONT_TYPES),
            font_style: r.options("font_style", &FONT_STYLES),
            ..FontAttributes::default()
        }),
        ObjectKind::LineAttributes => ObjectBody::LineAttributes(LineAttributes {
            line_colour: r.colour("line_colour", depth),
            line_width: ctx.line_width(r),
            line_art: r.line_art(),
            ..LineAttributes::default()
        }),
        ObjectKind::FillAttributes => ObjectBody::FillAttributes(FillAttributes {
            fill_type: r.enum_u8("fill_type", &FILL_TYPES),
            fill_colour: r.colour("fill_colour", depth),
            ..FillAttributes::default()
        }),
        ObjectKind::InputAttributes => {
            let len = length(r, SHORT_STRING);
            ObjectBody::InputAttributes(InputAttributes {
                validation_type: r.enum_u8("validation_type", &VALIDATION_TYPES),
                validation_string: r.latin1_padded("validation_string", len),
                ..InputAttributes::default()
            })
        }
        ObjectKind::ObjectPointer => ObjectBody::ObjectPointer(ObjectPointer::default()),
        ObjectKind::Macro => ObjectBody::Macro(Macro::default()),
        ObjectKind::AuxiliaryFunction => ObjectBody::AuxiliaryFunction(AuxiliaryFunction {
            background_colour: r.colour("background_colour", depth),
            function_type: r.enum_u8("function_type", &FUNCTION_TYPES),
            ..AuxiliaryFunction::default()
        }),
        ObjectKind::AuxiliaryInput => ObjectBody::AuxiliaryInput(AuxiliaryInput {
            background_colour: r.colour("background_colour", depth),
            function_type: r.enum_u8("function_type", &FUNCTION_TYPES),
            input_id: r.u8("input_id"),
            ..AuxiliaryInput::default()
        }),
    };
    ObjectRecord::new(id, body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attrs::Attributes;

    fn build(kind: ObjectKind, pairs: &[(&str, &str)], m: f32, depth: ColorDepth) -> ObjectRecord {
        let attrs: Attributes = pairs.iter().copied().collect();
        let mut r = Resolver::new(&attrs);
        build_object(kind, ObjectId::new(7), &mut r, BuildContext::new(m, depth))
    }

    #[test]
    fn every_kind_builds_with_fixed_size() {
        for kind in ObjectKind::ALL {
            let record = build(kind, &[], 1.0, ColorDepth::Full);
            assert_eq!(record.kind(), kind);
            assert_eq!(record.byte_size(), kind.fixed_size());
            assert_eq!(record.encode().unwrap().len(), kind.fixed_size());
        }
    }

    #[test]
    fn container_scales_by_multiplier() {
        let record = build(
            ObjectKind::Container,
            &[("width", "100"), ("height", "33"), ("hidden", "yes")],
            1.5,
            ColorDepth::Full,
        );
        let ObjectBody::Container(c) = record.body else {
            panic!("expected container");
        };
        assert_eq!((c.width, c.height), (150, 49));
        assert!(c.hidden);
    }

    #[test]
    fn string_value_is_padded_to_length() {
        let record = build(
            ObjectKind::OutputString,
            &[("length", "6"), ("value", "abc"), ("horizontal_justification", "middle")],
            1.0,
            ColorDepth::Full,
        );
        let ObjectBody::OutputString(s) = &record.body else {
            panic!("expected output string");
        };
        assert_eq!(s.value, b"abc   ".to_vec());
        assert_eq!(s.horizontal_justification, 1);
        assert_eq!(s.font_attributes, None);
        assert_eq!(record.byte_size(), ObjectKind::OutputString.fixed_size() + 6);
    }

    #[test]
    fn string_length_clamped_to_field_width() {
        let attrs: Attributes = [("length", "300"), ("value", "ab")].into_iter().collect();
        let mut r = Resolver::new(&attrs);
        let ctx = BuildContext::new(1.0, ColorDepth::Full);
        let input = build_object(ObjectKind::InputString, ObjectId::new(1), &mut r, ctx);
        assert_eq!(input.byte_size(), ObjectKind::InputString.fixed_size() + 255);
        assert!(input.encode().is_ok());
        let output = build_object(ObjectKind::OutputString, ObjectId::new(2), &mut r, ctx);
        assert_eq!(output.byte_size(), ObjectKind::OutputString.fixed_size() + 300);
        assert_eq!(r.into_issues().len(), 1);
    }

    #[test]
    fn colours_follow_depth() {
        let record = build(
            ObjectKind::DataMask,
            &[("background_colour", "white")],
            1.0,
            ColorDepth::Mono,
        );
        let ObjectBody::DataMask(mask) = record.body else {
            panic!("expected data mask");
        };
        assert_eq!(mask.background_colour, 1);
        assert_eq!(mask.soft_key_mask, None);
    }

    #[test]
    fn font_size_grows_with_whole_multiplier() {
        let record = build(
            ObjectKind::FontAttributes,
            &[("font_size", "8x8"), ("font_style", "bold+italic")],
            2.7,
            ColorDepth::Full,
        );
        let ObjectBody::FontAttributes(font) = record.body else {
            panic!("expected font attributes");
        };
        assert_eq!(font.font_size, 1 + 3);
        assert_eq!(font.font_style, 1 + 8);
    }

    #[test]
    fn line_width_scales() {
        let record = build(
            ObjectKind::LineAttributes,
            &[("line_width", "3"), ("line_art", "11110000")],
            1.5,
            ColorDepth::Full,
        );
        let ObjectBody::LineAttributes(line) = record.body else {
            panic!("expected line attributes");
        };
        assert_eq!(line.line_width, 4);
        assert_eq!(line.line_art, 0xF0);
    }

    #[test]
    fn picture_format_follows_depth() {
        for (depth, format) in [
            (ColorDepth::Mono, 0),
            (ColorDepth::Sixteen, 1),
            (ColorDepth::Full, 2),
        ] {
            let record = build(ObjectKind::PictureGraphic, &[("width", "10")], 2.0, depth);
            let picture = record.picture().unwrap();
            assert_eq!(picture.format, format);
            assert_eq!(picture.width, 20);
        }
    }

    #[test]
    fn input_number_scale_defaults_to_one() {
        let record = build(
            ObjectKind::InputNumber,
            &[("value", "5"), ("offset", "-3"), ("format", "exponential")],
            1.0,
            ColorDepth::Full,
        );
        let ObjectBody::InputNumber(n) = record.body else {
            panic!("expected input number");
        };
        assert!((n.scale - 1.0).abs() < f32::EPSILON);
        assert_eq!(n.offset, -3);
        assert_eq!(n.value, 5);
        assert_eq!(n.format, 1);
    }
}
