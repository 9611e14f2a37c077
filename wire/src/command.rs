//! Macro command records.
//!
//! Every command starts with its one-byte VT function code. All commands
//! are 8 bytes except change-child-position (9) and change-string-value
//! (5 + length); unused trailing bytes are filled with [`RESERVED`].
//!
//! [`RESERVED`]: crate::RESERVED

use std::fmt;

use crate::error::{EncodeError, EncodeResult};
use crate::ids::ObjectId;
use crate::layout::WireWriter;

/// Size of every command except the two variable-size ones.
pub const COMMAND_SIZE: usize = 8;

/// The 20 supported command kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    HideShowObject,
    EnableDisableObject,
    SelectInputObject,
    ControlAudioDevice,
    SetAudioVolume,
    ChangeChildLocation,
    ChangeSize,
    ChangeBackgroundColour,
    ChangeNumericValue,
    ChangeStringValue,
    ChangeEndPoint,
    ChangeFontAttributes,
    ChangeLineAttributes,
    ChangeFillAttributes,
    ChangeActiveMask,
    ChangeSoftKeyMask,
    ChangeAttribute,
    ChangePriority,
    ChangeChildPosition,
    ChangeListItem,
}

impl CommandKind {
    pub const ALL: [CommandKind; 20] = [
        CommandKind::HideShowObject,
        CommandKind::EnableDisableObject,
        CommandKind::SelectInputObject,
        CommandKind::ControlAudioDevice,
        CommandKind::SetAudioVolume,
        CommandKind::ChangeChildLocation,
        CommandKind::ChangeSize,
        CommandKind::ChangeBackgroundColour,
        CommandKind::ChangeNumericValue,
        CommandKind::ChangeStringValue,
        CommandKind::ChangeEndPoint,
        CommandKind::ChangeFontAttributes,
        CommandKind::ChangeLineAttributes,
        CommandKind::ChangeFillAttributes,
        CommandKind::ChangeActiveMask,
        CommandKind::ChangeSoftKeyMask,
        CommandKind::ChangeAttribute,
        CommandKind::ChangePriority,
        CommandKind::ChangeChildPosition,
        CommandKind::ChangeListItem,
    ];

    #[must_use]
    pub const fn function_code(self) -> u8 {
        match self {
            Self::HideShowObject => 160,
            Self::EnableDisableObject => 161,
            Self::SelectInputObject => 162,
            Self::ControlAudioDevice => 163,
            Self::SetAudioVolume => 164,
            Self::ChangeChildLocation => 165,
            Self::ChangeSize => 166,
            Self::ChangeBackgroundColour => 167,
            Self::ChangeNumericValue => 168,
            Self::ChangeEndPoint => 169,
            Self::ChangeFontAttributes => 170,
            Self::ChangeLineAttributes => 171,
            Self::ChangeFillAttributes => 172,
            Self::ChangeActiveMask => 173,
            Self::ChangeSoftKeyMask => 174,
            Self::ChangeAttribute => 175,
            Self::ChangePriority => 176,
            Self::ChangeListItem => 177,
            Self::ChangeStringValue => 179,
            Self::ChangeChildPosition => 180,
        }
    }

    #[must_use]
    pub const fn xml_name(self) -> &'static str {
        match self {
            Self::HideShowObject => "command_hide_show_object",
            Self::EnableDisableObject => "command_enable_disable_object",
            Self::SelectInputObject => "command_select_input_object",
            Self::ControlAudioDevice => "command_control_audio_device",
            Self::SetAudioVolume => "command_set_audio_volume",
            Self::ChangeChildLocation => "command_change_child_location",
            Self::ChangeSize => "command_change_size",
            Self::ChangeBackgroundColour => "command_change_background_colour",
            Self::ChangeNumericValue => "command_change_numeric_value",
            Self::ChangeStringValue => "command_change_string_value",
            Self::ChangeEndPoint => "command_change_end_point",
            Self::ChangeFontAttributes => "command_change_font_attributes",
            Self::ChangeLineAttributes => "command_change_line_attributes",
            Self::ChangeFillAttributes => "command_change_fill_attributes",
            Self::ChangeActiveMask => "command_change_active_mask",
            Self::ChangeSoftKeyMask => "command_change_soft_key_mask",
            Self::ChangeAttribute => "command_change_attribute",
            Self::ChangePriority => "command_change_priority",
            Self::ChangeChildPosition => "command_change_child_position",
            Self::ChangeListItem => "command_change_list_item",
        }
    }

    #[must_use]
    pub fn from_xml_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.xml_name() == name)
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.xml_name())
    }
}

/// A command record stored in a macro.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    HideShowObject {
        object_id: ObjectId,
        show: bool,
    },
    EnableDisableObject {
        object_id: ObjectId,
        enable: bool,
    },
    SelectInputObject {
        object_id: ObjectId,
    },
    ControlAudioDevice {
        repetitions: u8,
        frequency: u16,
        on_time: u16,
        off_time: u16,
    },
    SetAudioVolume {
        volume: u8,
    },
    ChangeChildLocation {
        parent_id: ObjectId,
        child_id: ObjectId,
        dx: u8,
        dy: u8,
    },
    ChangeSize {
        object_id: ObjectId,
        width: u16,
        height: u16,
    },
    ChangeBackgroundColour {
        object_id: ObjectId,
        colour: u8,
    },
    ChangeNumericValue {
        object_id: ObjectId,
        value: u32,
    },
    ChangeStringValue {
        object_id: ObjectId,
        value: Vec<u8>,
    },
    ChangeEndPoint {
        object_id: ObjectId,
        width: u16,
        height: u16,
        line_direction: u8,
    },
    ChangeFontAttributes {
        object_id: ObjectId,
        colour: u8,
        size: u8,
        font_type: u8,
        style: u8,
    },
    ChangeLineAttributes {
        object_id: ObjectId,
        colour: u8,
        width: u8,
        art: u16,
    },
    ChangeFillAttributes {
        object_id: ObjectId,
        fill_type: u8,
        colour: u8,
        pattern: ObjectId,
    },
    ChangeActiveMask {
        working_set: ObjectId,
        mask: ObjectId,
    },
    ChangeSoftKeyMask {
        mask_type: u8,
        mask: ObjectId,
        soft_key_mask: ObjectId,
    },
    ChangeAttribute {
        object_id: ObjectId,
        attribute_id: u8,
        value: u32,
    },
    ChangePriority {
        object_id: ObjectId,
        priority: u8,
    },
    ChangeChildPosition {
        parent_id: ObjectId,
        child_id: ObjectId,
        x: u16,
        y: u16,
    },
    ChangeListItem {
        list_id: ObjectId,
        index: u8,
        item: ObjectId,
    },
}

impl Command {
    #[must_use]
    pub const fn kind(&self) -> CommandKind {
        match self {
            Self::HideShowObject { .. } => CommandKind::HideShowObject,
            Self::EnableDisableObject { .. } => CommandKind::EnableDisableObject,
            Self::SelectInputObject { .. } => CommandKind::SelectInputObject,
            Self::ControlAudioDevice { .. } => CommandKind::ControlAudioDevice,
            Self::SetAudioVolume { .. } => CommandKind::SetAudioVolume,
            Self::ChangeChildLocation { .. } => CommandKind::ChangeChildLocation,
            Self::ChangeSize { .. } => CommandKind::ChangeSize,
            Self::ChangeBackgroundColour { .. } => CommandKind::ChangeBackgroundColour,
            Self::ChangeNumericValue { .. } => CommandKind::ChangeNumericValue,
            Self::ChangeStringValue { .. } => CommandKind::ChangeStringValue,
            Self::ChangeEndPoint { .. } => CommandKind::ChangeEndPoint,
            Self::ChangeFontAttributes { .. } => CommandKind::ChangeFontAttributes,
            Self::ChangeLineAttributes { .. } => CommandKind::ChangeLineAttributes,
            Self::ChangeFillAttributes { .. } => CommandKind::ChangeFillAttributes,
            Self::ChangeActiveMask { .. } => CommandKind::ChangeActiveMask,
            Self::ChangeSoftKeyMask { .. } => CommandKind::ChangeSoftKeyMask,
            Self::ChangeAttribute { .. } => CommandKind::ChangeAttribute,
            Self::ChangePriority { .. } => CommandKind::ChangePriority,
            Self::ChangeChildPosition { .. } => CommandKind::ChangeChildPosition,
            Self::ChangeListItem { .. } => CommandKind::ChangeListItem,
        }
    }

    #[must_use]
    pub const fn function_code(&self) -> u8 {
        self.kind().function_code()
    }

    /// Number of bytes this command occupies in a macro.
    #[must_use]
    pub fn byte_size(&self) -> usize {
        match self {
            Self::ChangeStringValue { value, .. } => 5 + value.len(),
            Self::ChangeChildPosition { .. } => 9,
            _ => COMMAND_SIZE,
        }
    }

    /// Appends the command bytes to `writer`.
    ///
    /// # Errors
    ///
    /// Returns [`EncodeError::CommandTooLong`] if a string payload exceeds
    /// its 16-bit length field.
    pub fn encode_into(&self, writer: &mut WireWriter) -> EncodeResult<()> {
        writer.u8(self.function_code());
        match self {
            Self::HideShowObject { object_id, show } => {
                writer.id(*object_id);
                writer.bool(*show);
                writer.reserved(4);
            }
            Self::EnableDisableObject { object_id, enable } => {
                writer.id(*object_id);
                writer.bool(*enable);
                writer.reserved(4);
            }
            Self::SelectInputObject { object_id } => {
                writer.id(*object_id);
                writer.reserved(5);
            }
            Self::ControlAudioDevice {
                repetitions,
                frequency,
                on_time,
                off_time,
            } => {
                writer.u8(*repetitions);
                writer.u16(*frequency);
                writer.u16(*on_time);
                writer.u16(*off_time);
            }
            Self::SetAudioVolume { volume } => {
                writer.u8(*volume);
                writer.reserved(6);
            }
            Self::ChangeChildLocation {
                parent_id,
                child_id,
                dx,
                dy,
            } => {
                writer.id(*parent_id);
                writer.id(*child_id);
                writer.u8(*dx);
                writer.u8(*dy);
                writer.reserved(1);
            }
            Self::ChangeSize {
                object_id,
                width,
                height,
            } => {
                writer.id(*object_id);
                writer.u16(*width);
                writer.u16(*height);
                writer.reserved(1);
            }
            Self::ChangeBackgroundColour { object_id, colour } => {
                writer.id(*object_id);
                writer.u8(*colour);
                writer.reserved(4);
            }
            Self::ChangeNumericValue { object_id, value } => {
                writer.id(*object_id);
                writer.reserved(1);
                writer.u32(*value);
            }
            Self::ChangeStringValue { object_id, value } => {
                let length = u16::try_from(value.len()).map_err(|_| {
                    EncodeError::CommandTooLong {
                        function: CommandKind::ChangeStringValue.function_code(),
                        length: value.len(),
                    }
                })?;
                writer.id(*object_id);
                writer.u16(length);
                writer.bytes(value);
            }
            Self::ChangeEndPoint {
                object_id,
                width,
                height,
                line_direction,
            } => {
                writer.id(*object_id);
                writer.u16(*width);
                writer.u16(*height);
                writer.u8(*line_direction);
            }
            Self::ChangeFontAttributes {
                object_id,
                colour,
                size,
                font_type,
                style,
            } => {
                writer.id(*object_id);
                writer.u8(*colour);
                writer.u8(*size);
                writer.u8(*font_type);
                writer.u8(*style);
                writer.reserved(1);
            }
            Self::ChangeLineAttributes {
                object_id,
                colour,
                width,
                art,
            } => {
                writer.id(*object_id);
                writer.u8(*colour);
                writer.u8(*width);
                writer.u16(*art);
                writer.reserved(1);
            }
            Self::ChangeFillAttributes {
                object_id,
                fill_type,
                colour,
                pattern,
            } => {
                writer.id(*object_id);
                writer.u8(*fill_type);
                writer.u8(*colour);
                writer.id(*pattern);
                writer.reserved(1);
            }
            Self::ChangeActiveMask { working_set, mask } => {
                writer.id(*working_set);
                writer.id(*mask);
                writer.reserved(3);
            }
            Self::ChangeSoftKeyMask {
                mask_type,
                mask,
                soft_key_mask,
            } => {
                writer.u8(*mask_type);
                writer.id(*mask);
                writer.id(*soft_key_mask);
                writer.reserved(2);
            }
            Self::ChangeAttribute {
                object_id,
                attribute_id,
                value,
            } => {
                writer.id(*object_id);
                writer.u8(*attribute_id);
                writer.u32(*value);
            }
            Self::ChangePriority {
                object_id,
                priority,
            } => {
                writer.id(*object_id);
                writer.u8(*priority);
                writer.reserved(4);
            }
            Self::ChangeChildPosition {
                parent_id,
                child_id,
                x,
                y,
            } => {
                writer.id(*parent_id);
                writer.id(*child_id);
                writer.u16(*x);
                writer.u16(*y);
            }
            Self::ChangeListItem {
                list_id,
                index,
                item,
            } => {
                writer.id(*list_id);
                writer.u8(*index);
                writer.id(*item);
                writer.reserved(2);
            }
        }
        Ok(())
    }

    /// Encodes the command on its own.
    ///
    /// # Errors
    ///
    /// See [`Command::encode_into`].
    pub fn encode(&self) -> EncodeResult<Vec<u8>> {
        let mut writer = WireWriter::with_capacity(self.byte_size());
        self.encode_into(&mut writer)?;
        Ok(writer.finish())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(raw: u16) -> ObjectId {
        ObjectId::new(raw)
    }

    #[test]
    fn function_codes_are_unique() {
        let mut codes: Vec<u8> = CommandKind::ALL.iter().map(|k| k.function_code()).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), 20);
        assert!(!codes.contains(&178));
        assert_eq!(codes.first(), Some(&160));
        assert_eq!(codes.last(), Some(&180));
    }

    #[test]
    fn names_resolve() {
        for kind in CommandKind::ALL {
            assert_eq!(CommandKind::from_xml_name(kind.xml_name()), Some(kind));
        }
        assert_eq!(CommandKind::from_xml_name("macro"), None);
    }

    #[test]
    fn hide_show_layout() {
        let bytes = Command::HideShowObject {
            object_id: id(0x1234),
            show: true,
        }
        .encode()
        .unwrap();
        assert_eq!(bytes, vec![160, 0x34, 0x12, 1, 0xFF, 0xFF, 0xFF, 0xFF]);
    }

    #[test]
    fn numeric_value_layout() {
        let bytes = Command::ChangeNumericValue {
            object_id: id(7),
            value: 0x0102_0304,
        }
        .encode()
        .unwrap();
        assert_eq!(bytes, vec![168, 7, 0, 0xFF, 0x04, 0x03, 0x02, 0x01]);
    }

    #[test]
    fn audio_device_has_no_padding() {
        let bytes = Command::ControlAudioDevice {
            repetitions: 3,
            frequency: 440,
            on_time: 100,
            off_time: 50,
        }
        .encode()
        .unwrap();
        assert_eq!(bytes, vec![163, 3, 0xB8, 0x01, 100, 0, 50, 0]);
    }

    #[test]
    fn string_value_layout() {
        let command = Command::ChangeStringValue {
            object_id: id(9),
            value: b"ab ".to_vec(),
        };
        assert_eq!(command.byte_size(), 8);
        assert_eq!(
            command.encode().unwrap(),
            vec![179, 9, 0, 3, 0, b'a', b'b', b' ']
        );
    }

    #[test]
    fn child_position_is_nine_bytes() {
        let command = Command::ChangeChildPosition {
            parent_id: id(1),
            child_id: id(2),
            x: 10,
            y: 20,
        };
        assert_eq!(command.byte_size(), 9);
        assert_eq!(
            command.encode().unwrap(),
            vec![180, 1, 0, 2, 0, 10, 0, 20, 0]
        );
    }

    #[test]
    fn soft_key_mask_puts_type_first() {
        let bytes = Command::ChangeSoftKeyMask {
            mask_type: 2,
            mask: id(5),
            soft_key_mask: id(6),
        }
        .encode()
        .unwrap();
        assert_eq!(bytes, vec![174, 2, 5, 0, 6, 0, 0xFF, 0xFF]);
    }

    #[test]
    fn every_command_matches_its_size() {
        let commands = vec![
            Command::HideShowObject { object_id: id(1), show: false },
            Command::EnableDisableObject { object_id: id(1), enable: true },
            Command::SelectInputObject { object_id: id(1) },
            Command::ControlAudioDevice { repetitions: 1, frequency: 2, on_time: 3, off_time: 4 },
            Command::SetAudioVolume { volume: 50 },
            Command::ChangeChildLocation { parent_id: id(1), child_id: id(2), dx: 127, dy: 130 },
            Command::ChangeSize { object_id: id(1), width: 10, height: 20 },
            Command::ChangeBackgroundColour { object_id: id(1), colour: 4 },
            Command::ChangeNumericValue { object_id: id(1), value: 9 },
            Command::ChangeStringValue { object_id: id(1), value: vec![b'x'; 12] },
            Command::ChangeEndPoint { object_id: id(1), width: 1, height: 2, line_direction: 1 },
            Command::ChangeFontAttributes { object_id: id(1), colour: 1, size: 2, font_type: 0, style: 3 },
            Command::ChangeLineAttributes { object_id: id(1), colour: 1, width: 2, art: 0xFFFF },
            Command::ChangeFillAttributes { object_id: id(1), fill_type: 2, colour: 3, pattern: id(0xFFFF) },
            Command::ChangeActiveMask { working_set: id(1), mask: id(2) },
            Command::ChangeSoftKeyMask { mask_type: 1, mask: id(2), soft_key_mask: id(3) },
            Command::ChangeAttribute { object_id: id(1), attribute_id: 4, value: 5 },
            Command::ChangePriority { object_id: id(1), priority: 2 },
            Command::ChangeChildPosition { parent_id: id(1), child_id: id(2), x: 3, y: 4 },
            Command::ChangeListItem { list_id: id(1), index: 0, item: id(2) },
        ];
        assert_eq!(commands.len(), CommandKind::ALL.len());
        for command in commands {
            let bytes = command.encode().unwrap();
            assert_eq!(bytes.len(), command.byte_size(), "{}", command.kind());
            assert_eq!(bytes[0], command.function_code());
        }
    }

    #[test]
    fn oversized_string_is_rejected() {
        let command = Command::ChangeStringValue {
            object_id: id(1),
            value: vec![b' '; usize::from(u16::MAX) + 1],
        };
        assert!(matches!(
            command.encode(),
            Err(EncodeError::CommandTooLong { function: 179, .. })
        ));
    }
}
