//! Reference roles and VT event names.
//!
//! A nested reference either binds an event to a macro (its `role` names a
//! [`VtEvent`]), fills a single reference field of the parent (its `role`
//! names a [`Role`]), or is placed as a child.

use std::fmt;

/// Structural role of a nested reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    ActiveMask,
    FontAttributes,
    SoftKeyMask,
    VariableReference,
    ForegroundColour,
    InputAttributes,
    LineAttributes,
    FillAttributes,
    TargetValueVariableReference,
    FillPattern,
    ObjectPointerValue,
}

impl Role {
    pub const ALL: [Role; 11] = [
        Role::ActiveMask,
        Role::FontAttributes,
        Role::SoftKeyMask,
        Role::VariableReference,
        Role::ForegroundColour,
        Role::InputAttributes,
        Role::LineAttributes,
        Role::FillAttributes,
        Role::TargetValueVariableReference,
        Role::FillPattern,
        Role::ObjectPointerValue,
    ];

    /// Attribute value naming this role.
    #[must_use]
    pub const fn xml_name(self) -> &'static str {
        match self {
            Self::ActiveMask => "active_mask",
            Self::FontAttributes => "font_attributes",
            Self::SoftKeyMask => "soft_key_mask",
            Self::VariableReference => "variable_reference",
            Self::ForegroundColour => "foreground_colour",
            Self::InputAttributes => "input_attributes",
            Self::LineAttributes => "line_attributes",
            Self::FillAttributes => "fill_attributes",
            Self::TargetValueVariableReference => "target_value_variable_reference",
            Self::FillPattern => "fill_pattern",
            Self::ObjectPointerValue => "value",
        }
    }

    #[must_use]
    pub fn from_xml_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|role| role.xml_name() == name)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.xml_name())
    }
}

/// VT event a macro can be bound to. The wire id is the position in
/// [`VtEvent::ALL`] plus one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VtEvent {
    Activate,
    Deactivate,
    Show,
    Hide,
    Enable,
    Disable,
    ChangeActiveMask,
    ChangeSoftKeyMask,
    ChangeAttribute,
    ChangeBackgroundColour,
    ChangeFontAttributes,
    ChangeLineAttributes,
    ChangeFillAttributes,
    ChangeChildLocation,
    ChangeSize,
    ChangeValue,
    ChangePriority,
    ChangeEndPoint,
    InputFieldSelection,
    InputFieldDeselection,
    Esc,
    EntryOfValue,
    EntryOfNewValue,
    KeyPress,
    KeyRelease,
    ChangeChildPosition,
}

impl VtEvent {
    pub const ALL: [VtEvent; 26] = [
        VtEvent::Activate,
        VtEvent::Deactivate,
        VtEvent::Show,
        VtEvent::Hide,
        VtEvent::Enable,
        VtEvent::Disable,
        VtEvent::ChangeActiveMask,
        VtEvent::ChangeSoftKeyMask,
        VtEvent::ChangeAttribute,
        VtEvent::ChangeBackgroundColour,
        VtEvent::ChangeFontAttributes,
        VtEvent::ChangeLineAttributes,
        VtEvent::ChangeFillAttributes,
        VtEvent::ChangeChildLocation,
        VtEvent::ChangeSize,
        VtEvent::ChangeValue,
        VtEvent::ChangePriority,
        VtEvent::ChangeEndPoint,
        VtEvent::InputFieldSelection,
        VtEvent::InputFieldDeselection,
        VtEvent::Esc,
        VtEvent::EntryOfValue,
        VtEvent::EntryOfNewValue,
        VtEvent::KeyPress,
        VtEvent::KeyRelease,
        VtEvent::ChangeChildPosition,
    ];

    #[must_use]
    pub const fn xml_name(self) -> &'static str {
        match self {
            Self::Activate => "on_activate",
            Self::Deactivate => "on_deactivate",
            Self::Show => "on_show",
            Self::Hide => "on_hide",
            Self::Enable => "on_enable",
            Self::Disable => "on_disable",
            Self::ChangeActiveMask => "on_change_active_mask",
            Self::ChangeSoftKeyMask => "on_change_soft_key_mask",
            Self::ChangeAttribute => "on_change_attribute",
            Self::ChangeBackgroundColour => "on_change_background_colour",
            Self::ChangeFontAttributes => "on_change_font_attributes",
            Self::ChangeLineAttributes => "on_change_line_attributes",
            Self::ChangeFillAttributes => "on_change_fill_attributes",
            Self::ChangeChildLocation => "on_change_child_location",
            Self::ChangeSize => "on_change_size",
            Self::ChangeValue => "on_change_value",
            Self::ChangePriority => "on_change_priority",
            Self::ChangeEndPoint => "on_change_end_point",
            Self::InputFieldSelection => "on_input_field_selection",
            Self::InputFieldDeselection => "on_input_field_deselection",
            Self::Esc => "on_esc",
            Self::EntryOfValue => "on_entry_of_value",
            Self::EntryOfNewValue => "on_entry_of_new_value",
            Self::KeyPress => "on_key_press",
            Self::KeyRelease => "on_key_release",
            Self::ChangeChildPosition => "on_change_child_position",
        }
    }

    /// Event id written into a macro reference.
    #[must_use]
    pub const fn id(self) -> u8 {
        self as u8 + 1
    }

    #[must_use]
    pub fn from_xml_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|event| event.xml_name() == name)
    }
}

impl fmt::Display for VtEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.xml_name())
    }
}
