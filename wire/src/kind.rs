//! Object kinds and their element names.

use std::fmt;

use crate::role::Role;

/// The 31 object kinds of an ISO 11783-6 pool. The discriminant is the
/// wire type code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum ObjectKind {
    WorkingSet = 0,
    DataMask = 1,
    AlarmMask = 2,
    Container = 3,
    SoftKeyMask = 4,
    Key = 5,
    Button = 6,
    InputBoolean = 7,
    InputString = 8,
    InputNumber = 9,
    InputList = 10,
    OutputString = 11,
    OutputNumber = 12,
    Line = 13,
    Rectangle = 14,
    Ellipse = 15,
    Polygon = 16,
    Meter = 17,
    LinearBarGraph = 18,
    ArchedBarGraph = 19,
    PictureGraphic = 20,
    NumberVariable = 21,
    StringVariable = 22,
    FontAttributes = 23,
    LineAttributes = 24,
    FillAttributes = 25,
    InputAttributes = 26,
    ObjectPointer = 27,
    Macro = 28,
    AuxiliaryFunction = 29,
    AuxiliaryInput = 30,
}

/// How a kind stores its contained objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildLayout {
    /// Id plus x/y position, 6 bytes each.
    Placed,
    /// Id only, 2 bytes each.
    IdOnly,
}

impl ObjectKind {
    /// All kinds in type-code order.
    pub const ALL: [ObjectKind; 31] = [
        ObjectKind::WorkingSet,
        ObjectKind::DataMask,
        ObjectKind::AlarmMask,
        ObjectKind::Container,
        ObjectKind::SoftKeyMask,
        ObjectKind::Key,
        ObjectKind::Button,
        ObjectKind::InputBoolean,
        ObjectKind::InputString,
        ObjectKind::InputNumber,
        ObjectKind::InputList,
        ObjectKind::OutputString,
        ObjectKind::OutputNumber,
        ObjectKind::Line,
        ObjectKind::Rectangle,
        ObjectKind::Ellipse,
        ObjectKind::Polygon,
        ObjectKind::Meter,
        ObjectKind::LinearBarGraph,
        ObjectKind::ArchedBarGraph,
        ObjectKind::PictureGraphic,
        ObjectKind::NumberVariable,
        ObjectKind::StringVariable,
        ObjectKind::FontAttributes,
        ObjectKind::LineAttributes,
        ObjectKind::FillAttributes,
        ObjectKind::InputAttributes,
        ObjectKind::ObjectPointer,
        ObjectKind::Macro,
        ObjectKind::AuxiliaryFunction,
        ObjectKind::AuxiliaryInput,
    ];

    #[must_use]
    pub const fn type_code(self) -> u8 {
        self as u8
    }

    #[must_use]
    pub fn from_type_code(code: u8) -> Option<Self> {
        Self::ALL.get(usize::from(code)).copied()
    }

    /// Element name of this kind.
    #[must_use]
    pub const fn xml_name(self) -> &'static str {
        match self {
            Self::WorkingSet => "workingset",
            Self::DataMask => "datamask",
            Self::AlarmMask => "alarmmask",
            Self::Container => "container",
            Self::SoftKeyMask => "softkeymask",
            Self::Key => "key",
            Self::Button => "button",
            Self::InputBoolean => "inputboolean",
            Self::InputString => "inputstring",
            Self::InputNumber => "inputnumber",
            Self::InputList => "inputlist",
            Self::OutputString => "outputstring",
            Self::OutputNumber => "outputnumber",
            Self::Line => "line",
            Self::Rectangle => "rectangle",
            Self::Ellipse => "ellipse",
            Self::Polygon => "polygon",
            Self::Meter => "meter",
            Self::LinearBarGraph => "linearbargraph",
            Self::ArchedBarGraph => "archedbargraph",
            Self::PictureGraphic => "picturegraphic",
            Self::NumberVariable => "numbervariable",
            Self::StringVariable => "stringvariable",
            Self::FontAttributes => "fontattributes",
            Self::LineAttributes => "lineattributes",
            Self::FillAttributes => "fillattributes",
            Self::InputAttributes => "inputattributes",
            Self::ObjectPointer => "objectpointer",
            Self::Macro => "macro",
            Self::AuxiliaryFunction => "auxiliaryfunction",
            Self::AuxiliaryInput => "auxiliaryinput",
        }
    }

    #[must_use]
    pub fn from_xml_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.xml_name() == name)
    }

    /// Size of the record with every variable section empty.
    ///
    /// String kinds count their length field and the bytes that follow
    /// the value, not the value itself.
    #[must_use]
    pub const fn fixed_size(self) -> usize {
        match self {
            Self::WorkingSet => 10,
            Self::DataMask => 8,
            Self::AlarmMask => 10,
            Self::Container => 10,
            Self::SoftKeyMask => 6,
            Self::Key => 7,
            Self::Button => 13,
            Self::InputBoolean => 13,
            Self::InputString => 19,
            Self::InputNumber => 38,
            Self::InputList => 13,
            Self::OutputString => 17,
            Self::OutputNumber => 29,
            Self::Line => 11,
            Self::Rectangle => 13,
            Self::Ellipse => 15,
            Self::Polygon => 14,
            Self::Meter => 21,
            Self::LinearBarGraph => 24,
            Self::ArchedBarGraph => 27,
            Self::PictureGraphic => 17,
            Self::NumberVariable => 7,
            Self::StringVariable => 5,
            Self::FontAttributes => 8,
            Self::LineAttributes => 8,
            Self::FillAttributes => 8,
            Self::InputAttributes => 6,
            Self::ObjectPointer => 5,
            Self::Macro => 5,
            Self::AuxiliaryFunction => 6,
            Self::AuxiliaryInput => 7,
        }
    }

    /// How contained objects are stored, or `None` if the kind has none.
    #[must_use]
    pub const fn child_layout(self) -> Option<ChildLayout> {
        match self {
            Self::WorkingSet
            | Self::DataMask
            | Self::AlarmMask
            | Self::Container
            | Self::Key
            | Self::Button
            | Self::AuxiliaryFunction
            | Self::AuxiliaryInput => Some(ChildLayout::Placed),
            Self::SoftKeyMask | Self::InputList => Some(ChildLayout::IdOnly),
            _ => None,
        }
    }

    /// Whether the kind carries a macro reference list.
    #[must_use]
    pub const fn accepts_macros(self) -> bool {
        matches!(self.type_code(), 0..=20 | 23..=26)
    }

    /// Whether the kind has a reference field for `role`.
    #[must_use]
    pub const fn accepts_role(self, role: Role) -> bool {
        match role {
            Role::ActiveMask => matches!(self, Self::WorkingSet),
            Role::FontAttributes => matches!(
                self,
                Self::InputString | Self::InputNumber | Self::OutputString | Self::OutputNumber
            ),
            Role::SoftKeyMask => matches!(self, Self::DataMask | Self::AlarmMask),
            Role::VariableReference => matches!(
                self,
                Self::InputBoolean
                    | Self::InputString
                    | Self::InputNumber
                    | Self::InputList
                    | Self::OutputString
                    | Self::OutputNumber
                    | Self::Meter
                    | Self::LinearBarGraph
                    | Self::ArchedBarGraph
            ),
            Role::TargetValueVariableReference => {
                matches!(self, Self::LinearBarGraph | Self::ArchedBarGraph)
            }
            Role::ForegroundColour => matches!(self, Self::InputBoolean),
            Role::InputAttributes => matches!(self, Self::InputString),
            Role::LineAttributes => matches!(
                self,
                Self::Line | Self::Rectangle | Self::Ellipse | Self::Polygon
            ),
            Role::FillAttributes => {
                matches!(self, Self::Rectangle | Self::Ellipse | Self::Polygon)
            }
            Role::FillPattern => matches!(self, Self::FillAttributes),
            Role::ObjectPointerValue => matches!(self, Self::ObjectPointer),
        }
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.xml_name())
    }
}
