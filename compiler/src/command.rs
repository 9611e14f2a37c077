//! Builds macro commands from command elements.
//!
//! Geometry in commands is scaled by the integer part of the multiplier.

use wire::{Command, CommandKind};

use crate::attrs::{Resolver, FILL_TYPES, FONT_STYLES, FONT_TYPES, LINE_DIRECTIONS, PRIORITIES};
use crate::factory::BuildContext;
use crate::transform::{scale_whole, wrap_u16};

const HIDE_SHOW: [&str; 2] = ["hide", "show"];
const ENABLE_DISABLE: [&str; 2] = ["disable", "enable"];

/// Builds the command `kind` from its element's attributes.
///
/// A change-string-value command carries its text space-padded or cut to
/// the declared `length`, the same as string objects.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn build_command(kind: CommandKind, r: &mut Resolver<'_>, ctx: BuildContext) -> Command {
    let m = ctx.multiplier;
    match kind {
        CommandKind::HideShowObject => Command::HideShowObject {
            object_id: r.id("object_id"),
            show: r.enum_index("hide_show", &HIDE_SHOW) != 0,
        },
        CommandKind::EnableDisableObject => Command::EnableDisableObject {
            object_id: r.id("object_id"),
            enable: r.enum_index("enable_disable", &ENABLE_DISABLE) != 0,
        },
        CommandKind::SelectInputObject => Command::SelectInputObject {
            object_id: r.id("object_id"),
        },
        CommandKind::ControlAudioDevice => Command::ControlAudioDevice {
            repetitions: r.u8("number_of_repetitions"),
            frequency: r.u16("frequency"),
            on_time: r.u16("on_time"),
            off_time: r.u16("off_time"),
        },
        CommandKind::SetAudioVolume => Command::SetAudioVolume {
            volume: r.u8("volume"),
        },
        // offsets are stored biased by 127
        CommandKind::ChangeChildLocation => Command::ChangeChildLocation {
            parent_id: r.id("parent_id"),
            child_id: r.id("child_id"),
            dx: (scale_whole(m, r.int("d_pos_x")) + 127) as u8,
            dy: (scale_whole(m, r.int("d_pos_y")) + 127) as u8,
        },
        CommandKind::ChangeSize => Command::ChangeSize {
            object_id: r.id("object_id"),
            width: wrap_u16(scale_whole(m, r.int("width"))),
            height: wrap_u16(scale_whole(m, r.int("height"))),
        },
        CommandKind::ChangeBackgroundColour => Command::ChangeBackgroundColour {
            object_id: r.id("object_id"),
            colour: r.colour("background_colour", ctx.depth),
        },
        CommandKind::ChangeNumericValue => Command::ChangeNumericValue {
            object_id: r.id("object_id"),
            value: r.u32("value"),
        },
        CommandKind::ChangeStringValue => {
            let object_id = r.id("object_id");
            let len = usize::from(r.clamped("length", u16::MAX));
            Command::ChangeStringValue {
                object_id,
                value: r.latin1_padded("value", len),
            }
        }
        CommandKind::ChangeEndPoint => Command::ChangeEndPoint {
            object_id: r.id("object_id"),
            width: wrap_u16(scale_whole(m, r.int("width"))),
            height: wrap_u16(scale_whole(m, r.int("height"))),
            line_direction: r.enum_u8("line_direction", &LINE_DIRECTIONS),
        },
        CommandKind::ChangeFontAttributes => Command::ChangeFontAttributes {
            object_id: r.id("object_id"),
            colour: r.colour("font_colour", ctx.depth),
            size: ctx.font_size(r),
            font_type: r.enum_u8("font_type", &FONT_TYPES),
            style: r.options("font_style", &FONT_STYLES),
        },
        CommandKind::ChangeLineAttributes => Command::ChangeLineAttributes {
            object_id: r.id("object_id"),
            colour: r.colour("line_colour", ctx.depth),
            width: scale_whole(m, r.int("line_width")) as u8,
            art: r.line_art(),
        },
        CommandKind::ChangeFillAttributes => Command::ChangeFillAttributes {
            object_id: r.id("object_id"),
            fill_type: r.enum_u8("fill_type", &FILL_TYPES),
            colour: r.colour("fill_colour", ctx.depth),
            pattern: r.id("fill_pattern"),
        },
        CommandKind::ChangeActiveMask => Command::ChangeActiveMask {
            working_set: r.id("parent_id"),
            mask: r.id("child_id"),
        },
        CommandKind::ChangeSoftKeyMask => Command::ChangeSoftKeyMask {
            mask_type: mask_type(r.str("mask_type")),
            mask: r.id("parent_id"),
            soft_key_mask: r.id("child_id"),
        },
        CommandKind::ChangeAttribute => Command::ChangeAttribute {
            object_id: r.id("object_id"),
            attribute_id: r.u8("attribute_id"),
            value: r.u32("value"),
        },
        CommandKind::ChangePriority => Command::ChangePriority {
            object_id: r.id("object_id"),
            priority: r.enum_u8("priority", &PRIORITIES),
        },
        CommandKind::ChangeChildPosition => Command::ChangeChildPosition {
            parent_id: r.id("parent_id"),
            child_id: r.id("child_id"),
            x: wrap_u16(scale_whole(m, r.int("c_pos_x"))),
            y: wrap_u16(scale_whole(m, r.int("c_pos_y"))),
        },
        CommandKind::ChangeListItem => Command::ChangeListItem {
            list_id: r.id("parent_id"),
            index: r.u8("list_index"),
            item: r.id("child_id"),
        },
    }
}

/// 2 for an alarm mask, 1 (data mask) otherwise.
fn mask_type(value: Option<&str>) -> u8 {
    match value {
        Some("alarmmask" | "2") => 2,
        _ => 1,
    }
}
