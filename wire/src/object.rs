//! Object records.
//!
//! Records hold their fixed fields and their variable sections as vectors.
//! Counters are never stored; they are derived from the vector lengths when
//! the record is encoded, so a counter always equals the number of elements
//! present.

use crate::command::Command;
use crate::error::{EncodeError, EncodeResult, Section, Unsupported};
use crate::ids::{LanguageCode, MacroReference, ObjectId, ObjectReference, Point};
use crate::kind::ObjectKind;
use crate::layout::WireWriter;
use crate::role::Role;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct WorkingSet {
    pub background_colour: u8,
    pub selectable: bool,
    pub active_mask: Option<ObjectId>,
    pub objects: Vec<ObjectReference>,
    pub macros: Vec<MacroReference>,
    pub languages: Vec<LanguageCode>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DataMask {
    pub background_colour: u8,
    pub soft_key_mask: Option<ObjectId>,
    pub objects: Vec<ObjectReference>,
    pub macros: Vec<MacroReference>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AlarmMask {
    pub background_colour: u8,
    pub soft_key_mask: Option<ObjectId>,
    pub priority: u8,
    pub acoustic_signal: u8,
    pub objects: Vec<ObjectReference>,
    pub macros: Vec<MacroReference>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Container {
    pub width: u16,
    pub height: u16,
    pub hidden: bool,
    pub objects: Vec<ObjectReference>,
    pub macros: Vec<MacroReference>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SoftKeyMask {
    pub background_colour: u8,
    pub keys: Vec<ObjectId>,
    pub macros: Vec<MacroReference>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Key {
    pub background_colour: u8,
    pub key_code: u8,
    pub objects: Vec<ObjectReference>,
    pub macros: Vec<MacroReference>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Button {
    pub width: u16,
    pub height: u16,
    pub background_colour: u8,
    pub border_colour: u8,
    pub key_code: u8,
    pub latchable: bool,
    pub objects: Vec<ObjectReference>,
    pub macros: Vec<MacroReference>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct InputBoolean {
    pub background_colour: u8,
    pub width: u16,
    pub foreground_colour: Option<ObjectId>,
    pub variable_reference: Option<ObjectId>,
    pub value: u8,
    pub enabled: bool,
    pub macros: Vec<MacroReference>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct InputString {
    pub width: u16,
    pub height: u16,
    pub background_colour: u8,
    pub font_attributes: Option<ObjectId>,
    pub input_attributes: Option<ObjectId>,
    pub options: u8,
    pub variable_reference: Option<ObjectId>,
    pub horizontal_justification: u8,
    /// Latin-1 bytes; the length field is `value.len()`.
    pub value: Vec<u8>,
    pub enabled: bool,
    pub macros: Vec<MacroReference>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct InputNumber {
    pub width: u16,
    pub height: u16,
    pub background_colour: u8,
    pub font_attributes: Option<ObjectId>,
    pub options: u8,
    pub variable_reference: Option<ObjectId>,
    pub value: u32,
    pub min_value: u32,
    pub max_value: u32,
    pub offset: i32,
    pub scale: f32,
    pub number_of_decimals: u8,
    pub format: u8,
    pub horizontal_justification: u8,
    pub enabled: bool,
    pub macros: Vec<MacroReference>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct InputList {
    pub width: u16,
    pub height: u16,
    pub variable_reference: Option<ObjectId>,
    pub value: u8,
    pub items: Vec<ObjectId>,
    pub enabled: bool,
    pub macros: Vec<MacroReference>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct OutputString {
    pub width: u16,
    pub height: u16,
    pub background_colour: u8,
    pub font_attributes: Option<ObjectId>,
    pub options: u8,
    pub variable_reference: Option<ObjectId>,
    pub horizontal_justification: u8,
    pub value: Vec<u8>,
    pub macros: Vec<MacroReference>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct OutputNumber {
    pub width: u16,
    pub height: u16,
    pub background_colour: u8,
    pub font_attributes: Option<ObjectId>,
    pub options: u8,
    pub variable_reference: Option<ObjectId>,
    pub value: u32,
    pub offset: i32,
    pub scale: f32,
    pub number_of_decimals: u8,
    pub format: u8,
    pub horizontal_justification: u8,
    pub macros: Vec<MacroReference>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Line {
    pub line_attributes: Option<ObjectId>,
    pub width: u16,
    pub height: u16,
    pub line_direction: u8,
    pub macros: Vec<MacroReference>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Rectangle {
    pub line_attributes: Option<ObjectId>,
    pub width: u16,
    pub height: u16,
    pub line_suppression: u8,
    pub fill_attributes: Option<ObjectId>,
    pub macros: Vec<MacroReference>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Ellipse {
    pub line_attributes: Option<ObjectId>,
    pub width: u16,
    pub height: u16,
    pub ellipse_type: u8,
    pub start_angle: u8,
    pub end_angle: u8,
    pub fill_attributes: Option<ObjectId>,
    pub macros: Vec<MacroReference>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Polygon {
    pub width: u16,
    pub height: u16,
    pub line_attributes: Option<ObjectId>,
    pub fill_attributes: Option<ObjectId>,
    pub polygon_type: u8,
    pub points: Vec<Point>,
    pub macros: Vec<MacroReference>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Meter {
    pub width: u16,
    pub needle_colour: u8,
    pub border_colour: u8,
    pub arc_and_tick_colour: u8,
    pub options: u8,
    pub number_of_ticks: u8,
    pub start_angle: u8,
    pub end_angle: u8,
    pub min_value: u16,
    pub max_value: u16,
    pub variable_reference: Option<ObjectId>,
    pub value: u16,
    pub macros: Vec<MacroReference>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct LinearBarGraph {
    pub width: u16,
    pub height: u16,
    pub colour: u8,
    pub target_line_colour: u8,
    pub options: u8,
    pub number_of_ticks: u8,
    pub min_value: u16,
    pub max_value: u16,
    pub variable_reference: Option<ObjectId>,
    pub value: u16,
    pub target_value_variable_reference: Option<ObjectId>,
    pub target_value: u16,
    pub macros: Vec<MacroReference>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ArchedBarGraph {
    pub width: u16,
    pub height: u16,
    pub colour: u8,
    pub target_line_colour: u8,
    pub options: u8,
    pub start_angle: u8,
    pub end_angle: u8,
    pub bar_graph_width: u16,
    pub min_value: u16,
    pub max_value: u16,
    pub variable_reference: Option<ObjectId>,
    pub value: u16,
    pub target_value_variable_reference: Option<ObjectId>,
    pub target_value: u16,
    pub macros: Vec<MacroReference>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PictureGraphic {
    pub width: u16,
    pub actual_width: u16,
    pub actual_height: u16,
    /// 0, 1 or 2 for 2, 16 or 256 colours.
    pub format: u8,
    pub options: u8,
    pub transparency_colour: u8,
    /// Packed pixel rows, written before the macro list.
    pub raw_data: Vec<u8>,
    pub macros: Vec<MacroReference>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct NumberVariable {
    pub value: u32,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct StringVariable {
    pub value: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct FontAttributes {
    pub font_colour: u8,
    pub font_size: u8,
    pub font_type: u8,
    pub font_style: u8,
    pub macros: Vec<MacroReference>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct LineAttributes {
    pub line_colour: u8,
    pub line_width: u8,
    pub line_art: u16,
    pub macros: Vec<MacroReference>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct FillAttributes {
    pub fill_type: u8,
    pub fill_colour: u8,
    pub fill_pattern: Option<ObjectId>,
    pub macros: Vec<MacroReference>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct InputAttributes {
    pub validation_type: u8,
    pub validation_string: Vec<u8>,
    pub macros: Vec<MacroReference>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ObjectPointer {
    pub value: Option<ObjectId>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Macro {
    pub commands: Vec<Command>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AuxiliaryFunction {
    pub background_colour: u8,
    pub function_type: u8,
    pub objects: Vec<ObjectReference>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AuxiliaryInput {
    pub background_colour: u8,
    pub function_type: u8,
    pub input_id: u8,
    pub objects: Vec<ObjectReference>,
}

/// Kind-specific part of a record.
#[derive(Debug, Clone, PartialEq)]
pub enum ObjectBody {
    WorkingSet(WorkingSet),
    DataMask(DataMask),
    AlarmMask(AlarmMask),
    Container(Container),
    SoftKeyMask(SoftKeyMask),
    Key(Key),
    Button(Button),
    InputBoolean(InputBoolean),
    InputString(InputString),
    InputNumber(InputNumber),
    InputList(InputList),
    OutputString(OutputString),
    OutputNumber(OutputNumber),
    Line(Line),
    Rectangle(Rectangle),
    Ellipse(Ellipse),
    Polygon(Polygon),
    Meter(Meter),
    LinearBarGraph(LinearBarGraph),
    ArchedBarGraph(ArchedBarGraph),
    PictureGraphic(PictureGraphic),
    NumberVariable(NumberVariable),
    StringVariable(StringVariable),
    FontAttributes(FontAttributes),
    LineAttributes(LineAttributes),
    FillAttributes(FillAttributes),
    InputAttributes(InputAttributes),
    ObjectPointer(ObjectPointer),
    Macro(Macro),
    AuxiliaryFunction(AuxiliaryFunction),
    AuxiliaryInput(AuxiliaryInput),
}

impl ObjectBody {
    /// A body of `kind` with zeroed fields and empty sections.
    #[must_use]
    pub fn empty(kind: ObjectKind) -> Self {
        match kind {
            ObjectKind::WorkingSet => Self::WorkingSet(WorkingSet::default()),
            ObjectKind::DataMask => Self::DataMask(DataMask::default()),
            ObjectKind::AlarmMask => Self::AlarmMask(AlarmMask::default()),
            ObjectKind::Container => Self::Container(Container::default()),
            ObjectKind::SoftKeyMask => Self::SoftKeyMask(SoftKeyMask::default()),
            ObjectKind::Key => Self::Key(Key::default()),
            ObjectKind::Button => Self::Button(Button::default()),
            ObjectKind::InputBoolean => Self::InputBoolean(InputBoolean::default()),
            ObjectKind::InputString => Self::InputString(InputString::default()),
            ObjectKind::InputNumber => Self::InputNumber(InputNumber::default()),
            ObjectKind::InputList => Self::InputList(InputList::default()),
            ObjectKind::OutputString => Self::OutputString(OutputString::default()),
            ObjectKind::OutputNumber => Self::OutputNumber(OutputNumber::default()),
            ObjectKind::Line => Self::Line(Line::default()),
            ObjectKind::Rectangle => Self::Rectangle(Rectangle::default()),
            ObjectKind::Ellipse => Self::Ellipse(Ellipse::default()),
            ObjectKind::Polygon => Self::Polygon(Polygon::default()),
            ObjectKind::Meter => Self::Meter(Meter::default()),
            ObjectKind::LinearBarGraph => Self::LinearBarGraph(LinearBarGraph::default()),
            ObjectKind::ArchedBarGraph => Self::ArchedBarGraph(ArchedBarGraph::default()),
            ObjectKind::PictureGraphic => Self::PictureGraphic(PictureGraphic::default()),
            ObjectKind::NumberVariable => Self::NumberVariable(NumberVariable::default()),
            ObjectKind::StringVariable => Self::StringVariable(StringVariable::default()),
            ObjectKind::FontAttributes => Self::FontAttributes(FontAttributes::default()),
            ObjectKind::LineAttributes => Self::LineAttributes(LineAttributes::default()),
            ObjectKind::FillAttributes => Self::FillAttributes(FillAttributes::default()),
            ObjectKind::InputAttributes => Self::InputAttributes(InputAttributes::default()),
            ObjectKind::ObjectPointer => Self::ObjectPointer(ObjectPointer::default()),
            ObjectKind::Macro => Self::Macro(Macro::default()),
            ObjectKind::AuxiliaryFunction => {
                Self::AuxiliaryFunction(AuxiliaryFunction::default())
            }
            ObjectKind::AuxiliaryInput => Self::AuxiliaryInput(AuxiliaryInput::default()),
        }
    }

    #[must_use]
    pub const fn kind(&self) -> ObjectKind {
        match self {
            Self::WorkingSet(_) => ObjectKind::WorkingSet,
            Self::DataMask(_) => ObjectKind::DataMask,
            Self::AlarmMask(_) => ObjectKind::AlarmMask,
            Self::Container(_) => ObjectKind::Container,
            Self::SoftKeyMask(_) => ObjectKind::SoftKeyMask,
            Self::Key(_) => ObjectKind::Key,
            Self::Button(_) => ObjectKind::Button,
            Self::InputBoolean(_) => ObjectKind::InputBoolean,
            Self::InputString(_) => ObjectKind::InputString,
            Self::InputNumber(_) => ObjectKind::InputNumber,
            Self::InputList(_) => ObjectKind::InputList,
            Self::OutputString(_) => ObjectKind::OutputString,
            Self::OutputNumber(_) => ObjectKind::OutputNumber,
            Self::Line(_) => ObjectKind::Line,
            Self::Rectangle(_) => ObjectKind::Rectangle,
            Self::Ellipse(_) => ObjectKind::Ellipse,
            Self::Polygon(_) => ObjectKind::Polygon,
            Self::Meter(_) => ObjectKind::Meter,
            Self::LinearBarGraph(_) => ObjectKind::LinearBarGraph,
            Self::ArchedBarGraph(_) => ObjectKind::ArchedBarGraph,
            Self::PictureGraphic(_) => ObjectKind::PictureGraphic,
            Self::NumberVariable(_) => ObjectKind::NumberVariable,
            Self::StringVariable(_) => ObjectKind::StringVariable,
            Self::FontAttributes(_) => ObjectKind::FontAttributes,
            Self::LineAttributes(_) => ObjectKind::LineAttributes,
            Self::FillAttributes(_) => ObjectKind::FillAttributes,
            Self::InputAttributes(_) => ObjectKind::InputAttributes,
            Self::ObjectPointer(_) => ObjectKind::ObjectPointer,
            Self::Macro(_) => ObjectKind::Macro,
            Self::AuxiliaryFunction(_) => ObjectKind::AuxiliaryFunction,
            Self::AuxiliaryInput(_) => ObjectKind::AuxiliaryInput,
        }
    }

    fn placed_children_mut(&mut self) -> Option<&mut Vec<ObjectReference>> {
        match self {
            Self::WorkingSet(o) => Some(&mut o.objects),
            Self::DataMask(o) => Some(&mut o.objects),
            Self::AlarmMask(o) => Some(&mut o.objects),
            Self::Container(o) => Some(&mut o.objects),
            Self::Key(o) => Some(&mut o.objects),
            Self::Button(o) => Some(&mut o.objects),
            Self::AuxiliaryFunction(o) => Some(&mut o.objects),
            Self::AuxiliaryInput(o) => Some(&mut o.objects),
            _ => None,
        }
    }

    fn listed_children_mut(&mut self) -> Option<&mut Vec<ObjectId>> {
        match self {
            Self::SoftKeyMask(o) => Some(&mut o.keys),
            Self::InputList(o) => Some(&mut o.items),
            _ => None,
        }
    }

    fn macros(&self) -> Option<&Vec<MacroReference>> {
        match self {
            Self::WorkingSet(o) => Some(&o.macros),
            Self::DataMask(o) => Some(&o.macros),
            Self::AlarmMask(o) => Some(&o.macros),
            Self::Container(o) => Some(&o.macros),
            Self::SoftKeyMask(o) => Some(&o.macros),
            Self::Key(o) => Some(&o.macros),
            Self::Button(o) => Some(&o.macros),
            Self::InputBoolean(o) => Some(&o.macros),
            Self::InputString(o) => Some(&o.macros),
            Self::InputNumber(o) => Some(&o.macros),
            Self::InputList(o) => Some(&o.macros),
            Self::OutputString(o) => Some(&o.macros),
            Self::OutputNumber(o) => Some(&o.macros),
            Self::Line(o) => Some(&o.macros),
            Self::Rectangle(o) => Some(&o.macros),
            Self::Ellipse(o) => Some(&o.macros),
            Self::Polygon(o) => Some(&o.macros),
            Self::Meter(o) => Some(&o.macros),
            Self::LinearBarGraph(o) => Some(&o.macros),
            Self::ArchedBarGraph(o) => Some(&o.macros),
            Self::PictureGraphic(o) => Some(&o.macros),
            Self::FontAttributes(o) => Some(&o.macros),
            Self::LineAttributes(o) => Some(&o.macros),
            Self::FillAttributes(o) => Some(&o.macros),
            Self::InputAttributes(o) => Some(&o.macros),
            Self::NumberVariable(_)
            | Self::StringVariable(_)
            | Self::ObjectPointer(_)
            | Self::Macro(_)
            | Self::AuxiliaryFunction(_)
            | Self::AuxiliaryInput(_) => None,
        }
    }

    fn macros_mut(&mut self) -> Option<&mut Vec<MacroReference>> {
        match self {
            Self::WorkingSet(o) => Some(&mut o.macros),
            Self::DataMask(o) => Some(&mut o.macros),
            Self::AlarmMask(o) => Some(&mut o.macros),
            Self::Container(o) => Some(&mut o.macros),
            Self::SoftKeyMask(o) => Some(&mut o.macros),
            Self::Key(o) => Some(&mut o.macros),
            Self::Button(o) => Some(&mut o.macros),
            Self::InputBoolean(o) => Some(&mut o.macros),
            Self::InputString(o) => Some(&mut o.macros),
            Self::InputNumber(o) => Some(&mut o.macros),
            Self::InputList(o) => Some(&mut o.macros),
            Self::OutputString(o) => Some(&mut o.macros),
            Self::OutputNumber(o) => Some(&mut o.macros),
            Self::Line(o) => Some(&mut o.macros),
            Self::Rectangle(o) => Some(&mut o.macros),
            Self::Ellipse(o) => Some(&mut o.macros),
            Self::Polygon(o) => Some(&mut o.macros),
            Self::Meter(o) => Some(&mut o.macros),
            Self::LinearBarGraph(o) => Some(&mut o.macros),
            Self::ArchedBarGraph(o) => Some(&mut o.macros),
            Self::PictureGraphic(o) => Some(&mut o.macros),
            Self::FontAttributes(o) => Some(&mut o.macros),
            Self::LineAttributes(o) => Some(&mut o.macros),
            Self::FillAttributes(o) => Some(&mut o.macros),
            Self::InputAttributes(o) => Some(&mut o.macros),
            Self::NumberVariable(_)
            | Self::StringVariable(_)
            | Self::ObjectPointer(_)
            | Self::Macro(_)
            | Self::AuxiliaryFunction(_)
            | Self::AuxiliaryInput(_) => None,
        }
    }

    fn reference_slot(&mut self, role: Role) -> Option<&mut Option<ObjectId>> {
        match (self, role) {
            (Self::WorkingSet(o), Role::ActiveMask) => Some(&mut o.active_mask),
            (Self::DataMask(o), Role::SoftKeyMask) => Some(&mut o.soft_key_mask),
            (Self::AlarmMask(o), Role::SoftKeyMask) => Some(&mut o.soft_key_mask),
            (Self::InputBoolean(o), Role::ForegroundColour) => Some(&mut o.foreground_colour),
            (Self::InputBoolean(o), Role::VariableReference) => Some(&mut o.variable_reference),
            (Self::InputString(o), Role::FontAttributes) => Some(&mut o.font_attributes),
            (Self::InputString(o), Role::InputAttributes) => Some(&mut o.input_attributes),
            (Self::InputString(o), Role::VariableReference) => Some(&mut o.variable_reference),
            (Self::InputNumber(o), Role::FontAttributes) => Some(&mut o.font_attributes),
            (Self::InputNumber(o), Role::VariableReference) => Some(&mut o.variable_reference),
            (Self::InputList(o), Role::VariableReference) => Some(&mut o.variable_reference),
            (Self::OutputString(o), Role::FontAttributes) => Some(&mut o.font_attributes),
            (Self::OutputString(o), Role::VariableReference) => Some(&mut o.variable_reference),
            (Self::OutputNumber(o), Role::FontAttributes) => Some(&mut o.font_attributes),
            (Self::OutputNumber(o), Role::VariableReference) => Some(&mut o.variable_reference),
            (Self::Line(o), Role::LineAttributes) => Some(&mut o.line_attributes),
            (Self::Rectangle(o), Role::LineAttributes) => Some(&mut o.line_attributes),
            (Self::Rectangle(o), Role::FillAttributes) => Some(&mut o.fill_attributes),
            (Self::Ellipse(o), Role::LineAttributes) => Some(&mut o.line_attributes),
            (Self::Ellipse(o), Role::FillAttributes) => Some(&mut o.fill_attributes),
            (Self::Polygon(o), Role::LineAttributes) => Some(&mut o.line_attributes),
            (Self::Polygon(o), Role::FillAttributes) => Some(&mut o.fill_attributes),
            (Self::Meter(o), Role::VariableReference) => Some(&mut o.variable_reference),
            (Self::LinearBarGraph(o), Role::VariableReference) => Some(&mut o.variable_reference),
            (Self::LinearBarGraph(o), Role::TargetValueVariableReference) => {
                Some(&mut o.target_value_variable_reference)
            }
            (Self::ArchedBarGraph(o), Role::VariableReference) => Some(&mut o.variable_reference),
            (Self::ArchedBarGraph(o), Role::TargetValueVariableReference) => {
                Some(&mut o.target_value_variable_reference)
            }
            (Self::FillAttributes(o), Role::FillPattern) => Some(&mut o.fill_pattern),
            (Self::ObjectPointer(o), Role::ObjectPointerValue) => Some(&mut o.value),
            _ => None,
        }
    }
}

/// Size and wire limit of one variable section of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionCount {
    pub section: Section,
    /// Value of the section's counter field.
    pub count: usize,
    /// Bytes per counted element.
    pub element_size: usize,
    /// Largest count the counter field can hold.
    pub max: usize,
}

impl SectionCount {
    const fn new(section: Section, count: usize, element_size: usize, max: usize) -> Self {
        Self {
            section,
            count,
            element_size,
            max,
        }
    }

    const fn u8(section: Section, count: usize, element_size: usize) -> Self {
        Self::new(section, count, element_size, u8::MAX as usize)
    }

    const fn u16(section: Section, count: usize, element_size: usize) -> Self {
        Self::new(section, count, element_size, u16::MAX as usize)
    }

    const fn u32(section: Section, count: usize, element_size: usize) -> Self {
        Self::new(section, count, element_size, u32::MAX as usize)
    }

    /// Bytes occupied by the section's elements.
    #[must_use]
    pub const fn byte_len(&self) -> usize {
        self.count * self.element_size
    }
}

/// One object of the pool: header plus kind-specific body.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectRecord {
    pub id: ObjectId,
    pub body: ObjectBody,
}

impl ObjectRecord {
    #[must_use]
    pub const fn new(id: ObjectId, body: ObjectBody) -> Self {
        Self { id, body }
    }

    /// A record of `kind` with zeroed fields and empty sections.
    #[must_use]
    pub fn empty(id: ObjectId, kind: ObjectKind) -> Self {
        Self::new(id, ObjectBody::empty(kind))
    }

    #[must_use]
    pub const fn kind(&self) -> ObjectKind {
        self.body.kind()
    }

    /// Appends a contained object.
    ///
    /// Kinds storing bare ids keep only `child.id`.
    pub fn add_child(&mut self, child: ObjectReference) -> Result<(), Unsupported> {
        if let Some(objects) = self.body.placed_children_mut() {
            objects.push(child);
            return Ok(());
        }
        match self.body.listed_children_mut() {
            Some(ids) => {
                ids.push(child.id);
                Ok(())
            }
            None => Err(Unsupported::Children),
        }
    }

    /// Appends an event-to-macro binding.
    pub fn add_macro(&mut self, reference: MacroReference) -> Result<(), Unsupported> {
        let macros = self.body.macros_mut().ok_or(Unsupported::Macros)?;
        macros.push(reference);
        Ok(())
    }

    /// Appends a polygon vertex.
    pub fn add_point(&mut self, point: Point) -> Result<(), Unsupported> {
        match &mut self.body {
            ObjectBody::Polygon(polygon) => {
                polygon.points.push(point);
                Ok(())
            }
            _ => Err(Unsupported::Points),
        }
    }

    /// Appends a command to a macro.
    pub fn add_command(&mut self, command: Command) -> Result<(), Unsupported> {
        match &mut self.body {
            ObjectBody::Macro(m) => {
                m.commands.push(command);
                Ok(())
            }
            _ => Err(Unsupported::Commands),
        }
    }

    /// Appends a supported language to a working set.
    pub fn add_language(&mut self, code: LanguageCode) -> Result<(), Unsupported> {
        match &mut self.body {
            ObjectBody::WorkingSet(ws) => {
                ws.languages.push(code);
                Ok(())
            }
            _ => Err(Unsupported::LanguageCodes),
        }
    }

    /// Writes `target` into the reference field selected by `role`.
    pub fn set_reference(&mut self, role: Role, target: ObjectId) -> Result<(), Unsupported> {
        let slot = self
            .body
            .reference_slot(role)
            .ok_or(Unsupported::Role(role))?;
        *slot = Some(target);
        Ok(())
    }

    /// Records the declared pixel size of a picture's image data.
    pub fn set_image_size(&mut self, width: u16, height: u16) -> Result<(), Unsupported> {
        match &mut self.body {
            ObjectBody::PictureGraphic(picture) => {
                picture.actual_width = width;
                picture.actual_height = height;
                Ok(())
            }
            _ => Err(Unsupported::ImageData),
        }
    }

    /// Installs packed pixel data on a picture.
    pub fn set_raw_data(&mut self, data: Vec<u8>) -> Result<(), Unsupported> {
        match &mut self.body {
            ObjectBody::PictureGraphic(picture) => {
                picture.raw_data = data;
                Ok(())
            }
            _ => Err(Unsupported::ImageData),
        }
    }

    /// The picture body, if this record is a picture graphic.
    #[must_use]
    pub fn picture(&self) -> Option<&PictureGraphic> {
        match &self.body {
            ObjectBody::PictureGraphic(picture) => Some(picture),
            _ => None,
        }
    }

    /// Variable sections in wire order.
    #[must_use]
    pub fn sections(&self) -> Vec<SectionCount> {
        use Section as S;

        let macros = self
            .body
            .macros()
            .map(|m| SectionCount::u8(S::Macros, m.len(), MacroReference::SIZE));
        let placed = |objects: &Vec<ObjectReference>| {
            SectionCount::u8(S::Objects, objects.len(), ObjectReference::SIZE)
        };

        let mut sections = match &self.body {
            ObjectBody::WorkingSet(o) => vec![placed(&o.objects)],
            ObjectBody::DataMask(o) => vec![placed(&o.objects)],
            ObjectBody::AlarmMask(o) => vec![placed(&o.objects)],
            ObjectBody::Container(o) => vec![placed(&o.objects)],
            ObjectBody::Key(o) => vec![placed(&o.objects)],
            ObjectBody::Button(o) => vec![placed(&o.objects)],
            ObjectBody::AuxiliaryFunction(o) => vec![placed(&o.objects)],
            ObjectBody::AuxiliaryInput(o) => vec![placed(&o.objects)],
            ObjectBody::SoftKeyMask(o) => vec![SectionCount::u8(S::Objects, o.keys.len(), 2)],
            ObjectBody::InputList(o) => vec![SectionCount::u8(S::ListItems, o.items.len(), 2)],
            ObjectBody::InputString(o) => vec![SectionCount::u8(S::Value, o.value.len(), 1)],
            ObjectBody::OutputString(o) => vec![SectionCount::u16(S::Value, o.value.len(), 1)],
            ObjectBody::StringVariable(o) => vec![SectionCount::u16(S::Value, o.value.len(), 1)],
            ObjectBody::InputAttributes(o) => {
                vec![SectionCount::u8(S::Value, o.validation_string.len(), 1)]
            }
            ObjectBody::Polygon(o) => {
                vec![SectionCount::u8(S::Points, o.points.len(), Point::SIZE)]
            }
            ObjectBody::PictureGraphic(o) => {
                vec![SectionCount::u32(S::RawData, o.raw_data.len(), 1)]
            }
            ObjectBody::Macro(o) => {
                let bytes = o.commands.iter().map(Command::byte_size).sum();
                vec![SectionCount::u16(S::Commands, bytes, 1)]
            }
            _ => Vec::new(),
        };
        sections.extend(macros);
        if let ObjectBody::WorkingSet(ws) = &self.body {
            sections.push(SectionCount::u8(
                S::LanguageCodes,
                ws.languages.len(),
                LanguageCode::SIZE,
            ));
        }
        sections
    }

    /// Exact number of bytes [`ObjectRecord::encode`] produces.
    #[must_use]
    pub fn byte_size(&self) -> usize {
        self.kind().fixed_size()
            + self
                .sections()
                .iter()
                .map(SectionCount::byte_len)
                .sum::<usize>()
    }

    /// Serializes the record, deriving every counter from its section.
    ///
    /// # Errors
    ///
    /// Returns [`EncodeError::CountOverflow`] if a section holds more
    /// elements than its counter field can express.
    pub fn encode(&self) -> EncodeResult<Vec<u8>> {
        let kind = self.kind();
        for section in self.sections() {
            if section.count > section.max {
                return Err(EncodeError::CountOverflow {
                    kind,
                    section: section.section,
                    count: section.count,
                    max: section.max,
                });
            }
        }

        let mut w = WireWriter::with_capacity(self.byte_size());
        w.id(self.id);
        w.u8(kind.type_code());

        // counters were range checked above
        match &self.body {
            ObjectBody::WorkingSet(o) => {
                w.u8(o.background_colour);
                w.bool(o.selectable);
                w.reference(o.active_mask);
                w.u8(o.objects.len() as u8);
                w.u8(o.macros.len() as u8);
                w.u8(o.languages.len() as u8);
                put_objects(&mut w, &o.objects);
                put_macros(&mut w, &o.macros);
                for code in &o.languages {
                    w.bytes(&code.0);
                }
            }
            ObjectBody::DataMask(o) => {
                w.u8(o.background_colour);
                w.reference(o.soft_key_mask);
                w.u8(o.objects.len() as u8);
                w.u8(o.macros.len() as u8);
                put_objects(&mut w, &o.objects);
                put_macros(&mut w, &o.macros);
            }
            ObjectBody::AlarmMask(o) => {
                w.u8(o.background_colour);
                w.reference(o.soft_key_mask);
                w.u8(o.priority);
                w.u8(o.acoustic_signal);
                w.u8(o.objects.len() as u8);
                w.u8(o.macros.len() as u8);
                put_objects(&mut w, &o.objects);
                put_macros(&mut w, &o.macros);
            }
            ObjectBody::Container(o) => {
                w.u16(o.width);
                w.u16(o.height);
                w.bool(o.hidden);
                w.u8(o.objects.len() as u8);
                w.u8(o.macros.len() as u8);
                put_objects(&mut w, &o.objects);
                put_macros(&mut w, &o.macros);
            }
            ObjectBody::SoftKeyMask(o) => {
                w.u8(o.background_colour);
                w.u8(o.keys.len() as u8);
                w.u8(o.macros.len() as u8);
                for key in &o.keys {
                    w.id(*key);
                }
                put_macros(&mut w, &o.macros);
            }
            ObjectBody::Key(o) => {
                w.u8(o.background_colour);
                w.u8(o.key_code);
                w.u8(o.objects.len() as u8);
                w.u8(o.macros.len() as u8);
                put_objects(&mut w, &o.objects);
                put_macros(&mut w, &o.macros);
            }
            ObjectBody::Button(o) => {
                w.u16(o.width);
                w.u16(o.height);
                w.u8(o.background_colour);
                w.u8(o.border_colour);
                w.u8(o.key_code);
                w.bool(o.latchable);
                w.u8(o.objects.len() as u8);
                w.u8(o.macros.len() as u8);
                put_objects(&mut w, &o.objects);
                put_macros(&mut w, &o.macros);
            }
            ObjectBody::InputBoolean(o) => {
                w.u8(o.background_colour);
                w.u16(o.width);
                w.reference(o.foreground_colour);
                w.reference(o.variable_reference);
                w.u8(o.value);
                w.bool(o.enabled);
                w.u8(o.macros.len() as u8);
                put_macros(&mut w, &o.macros);
            }
            ObjectBody::InputString(o) => {
                w.u16(o.width);
                w.u16(o.height);
                w.u8(o.background_colour);
                w.reference(o.font_attributes);
                w.reference(o.input_attributes);
                w.u8(o.options);
                w.reference(o.variable_reference);
                w.u8(o.horizontal_justification);
                w.u8(o.value.len() as u8);
                w.bytes(&o.value);
                w.bool(o.enabled);
                w.u8(o.macros.len() as u8);
                put_macros(&mut w, &o.macros);
            }
            ObjectBody::InputNumber(o) => {
                w.u16(o.width);
                w.u16(o.height);
                w.u8(o.background_colour);
                w.reference(o.font_attributes);
                w.u8(o.options);
                w.reference(o.variable_reference);
                w.u32(o.value);
                w.u32(o.min_value);
                w.u32(o.max_value);
                w.i32(o.offset);
                w.f32(o.scale);
                w.u8(o.number_of_decimals);
                w.u8(o.format);
                w.u8(o.horizontal_justification);
                w.bool(o.enabled);
                w.u8(o.macros.len() as u8);
                put_macros(&mut w, &o.macros);
            }
            ObjectBody::InputList(o) => {
                w.u16(o.width);
                w.u16(o.height);
                w.reference(o.variable_reference);
                w.u8(o.value);
                w.u8(o.items.len() as u8);
                w.bool(o.enabled);
                w.u8(o.macros.len() as u8);
                for item in &o.items {
                    w.id(*item);
                }
                put_macros(&mut w, &o.macros);
            }
            ObjectBody::OutputString(o) => {
                w.u16(o.width);
                w.u16(o.height);
                w.u8(o.background_colour);
                w.reference(o.font_attributes);
                w.u8(o.options);
                w.reference(o.variable_reference);
                w.u8(o.horizontal_justification);
                w.u16(o.value.len() as u16);
                w.bytes(&o.value);
                w.u8(o.macros.len() as u8);
                put_macros(&mut w, &o.macros);
            }
            ObjectBody::OutputNumber(o) => {
                w.u16(o.width);
                w.u16(o.height);
                w.u8(o.background_colour);
                w.reference(o.font_attributes);
                w.u8(o.options);
                w.reference(o.variable_reference);
                w.u32(o.value);
                w.i32(o.offset);
                w.f32(o.scale);
                w.u8(o.number_of_decimals);
                w.u8(o.format);
                w.u8(o.horizontal_justification);
                w.u8(o.macros.len() as u8);
                put_macros(&mut w, &o.macros);
            }
            ObjectBody::Line(o) => {
                w.reference(o.line_attributes);
                w.u16(o.width);
                w.u16(o.height);
                w.u8(o.line_direction);
                w.u8(o.macros.len() as u8);
                put_macros(&mut w, &o.macros);
            }
            ObjectBody::Rectangle(o) => {
                w.reference(o.line_attributes);
                w.u16(o.width);
                w.u16(o.height);
                w.u8(o.line_suppression);
                w.reference(o.fill_attributes);
                w.u8(o.macros.len() as u8);
                put_macros(&mut w, &o.macros);
            }
            ObjectBody::Ellipse(o) => {
                w.reference(o.line_attributes);
                w.u16(o.width);
                w.u16(o.height);
                w.u8(o.ellipse_type);
                w.u8(o.start_angle);
                w.u8(o.end_angle);
                w.reference(o.fill_attributes);
                w.u8(o.macros.len() as u8);
                put_macros(&mut w, &o.macros);
            }
            ObjectBody::Polygon(o) => {
                w.u16(o.width);
                w.u16(o.height);
                w.reference(o.line_attributes);
                w.reference(o.fill_attributes);
                w.u8(o.polygon_type);
                w.u8(o.points.len() as u8);
                w.u8(o.macros.len() as u8);
                for point in &o.points {
                    w.u16(point.x);
                    w.u16(point.y);
                }
                put_macros(&mut w, &o.macros);
            }
            ObjectBody::Meter(o) => {
                w.u16(o.width);
                w.u8(o.needle_colour);
                w.u8(o.border_colour);
                w.u8(o.arc_and_tick_colour);
                w.u8(o.options);
                w.u8(o.number_of_ticks);
                w.u8(o.start_angle);
                w.u8(o.end_angle);
                w.u16(o.min_value);
                w.u16(o.max_value);
                w.reference(o.variable_reference);
                w.u16(o.value);
                w.u8(o.macros.len() as u8);
                put_macros(&mut w, &o.macros);
            }
            ObjectBody::LinearBarGraph(o) => {
                w.u16(o.width);
                w.u16(o.height);
                w.u8(o.colour);
                w.u8(o.target_line_colour);
                w.u8(o.options);
                w.u8(o.number_of_ticks);
                w.u16(o.min_value);
                w.u16(o.max_value);
                w.reference(o.variable_reference);
                w.u16(o.value);
                w.reference(o.target_value_variable_reference);
                w.u16(o.target_value);
                w.u8(o.macros.len() as u8);
                put_macros(&mut w, &o.macros);
            }
            ObjectBody::ArchedBarGraph(o) => {
                w.u16(o.width);
                w.u16(o.height);
                w.u8(o.colour);
                w.u8(o.target_line_colour);
                w.u8(o.options);
                w.u8(o.start_angle);
                w.u8(o.end_angle);
                w.u16(o.bar_graph_width);
                w.u16(o.min_value);
                w.u16(o.max_value);
                w.reference(o.variable_reference);
                w.u16(o.value);
                w.reference(o.target_value_variable_reference);
                w.u16(o.target_value);
                w.u8(o.macros.len() as u8);
                put_macros(&mut w, &o.macros);
            }
            ObjectBody::PictureGraphic(o) => {
                w.u16(o.width);
                w.u16(o.actual_width);
                w.u16(o.actual_height);
                w.u8(o.format);
                w.u8(o.options);
                w.u8(o.transparency_colour);
                w.u32(o.raw_data.len() as u32);
                w.u8(o.macros.len() as u8);
                w.bytes(&o.raw_data);
                put_macros(&mut w, &o.macros);
            }
            ObjectBody::NumberVariable(o) => {
                w.u32(o.value);
            }
            ObjectBody::StringVariable(o) => {
                w.u16(o.value.len() as u16);
                w.bytes(&o.value);
            }
            ObjectBody::FontAttributes(o) => {
                w.u8(o.font_colour);
                w.u8(o.font_size);
                w.u8(o.font_type);
                w.u8(o.font_style);
                w.u8(o.macros.len() as u8);
                put_macros(&mut w, &o.macros);
            }
            ObjectBody::LineAttributes(o) => {
                w.u8(o.line_colour);
                w.u8(o.line_width);
                w.u16(o.line_art);
                w.u8(o.macros.len() as u8);
                put_macros(&mut w, &o.macros);
            }
            ObjectBody::FillAttributes(o) => {
                w.u8(o.fill_type);
                w.u8(o.fill_colour);
                w.reference(o.fill_pattern);
                w.u8(o.macros.len() as u8);
                put_macros(&mut w, &o.macros);
            }
            ObjectBody::InputAttributes(o) => {
                w.u8(o.validation_type);
                w.u8(o.validation_string.len() as u8);
                w.bytes(&o.validation_string);
                w.u8(o.macros.len() as u8);
                put_macros(&mut w, &o.macros);
            }
            ObjectBody::ObjectPointer(o) => {
                w.reference(o.value);
            }
            ObjectBody::Macro(o) => {
                let bytes: usize = o.commands.iter().map(Command::byte_size).sum();
                w.u16(bytes as u16);
                for command in &o.commands {
                    command.encode_into(&mut w)?;
                }
            }
            ObjectBody::AuxiliaryFunction(o) => {
                w.u8(o.background_colour);
                w.u8(o.function_type);
                w.u8(o.objects.len() as u8);
                put_objects(&mut w, &o.objects);
            }
            ObjectBody::AuxiliaryInput(o) => {
                w.u8(o.background_colour);
                w.u8(o.function_type);
                w.u8(o.input_id);
                w.u8(o.objects.len() as u8);
                put_objects(&mut w, &o.objects);
            }
        }

        debug_assert_eq!(w.len(), self.byte_size());
        Ok(w.finish())
    }
}

fn put_objects(w: &mut WireWriter, objects: &[ObjectReference]) {
    for reference in objects {
        w.id(reference.id);
        w.u16(reference.x);
        w.u16(reference.y);
    }
}

fn put_macros(w: &mut WireWriter, macros: &[MacroReference]) {
    for reference in macros {
        w.u8(reference.event);
        w.u8(reference.macro_id);
    }
}
