//! Stack machine that turns nested element events into object records.
//!
//! Every object element opens a record on the stack. Nested elements grow
//! the record on top: references become children, macro bindings or
//! reference fields; points, image data, language codes and commands are
//! appended to their sections. When an object element closes, its record is
//! encoded and handed to the sink.

use raster::ColorDepth;
use tracing::{debug, info, warn};
use wire::{
    CommandKind, LanguageCode, MacroReference, ObjectId, ObjectKind, ObjectRecord,
    ObjectReference, Point, Role, Unsupported, VtEvent,
};

use crate::attrs::{Attributes, Resolver};
use crate::command::build_command;
use crate::error::{CompileError, CompileResult, Diagnostic, Issue};
use crate::factory::{build_object, BuildContext};
use crate::limits::CompileLimits;
use crate::params::{Mode, RunParams};
use crate::picture::{install_image, ImageCapture};
use crate::sink::PoolSink;
use crate::transform::{block_font_offset, scale, wrap_u16, DeclaredGeometry, PoolTransform};

/// What an element name denotes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Element {
    Object(ObjectKind),
    Command(CommandKind),
    IncludeObject,
    ObjectPool,
    Point,
    ImageData,
    Language,
    Unknown,
}

impl Element {
    #[must_use]
    pub fn classify(name: &str) -> Self {
        if let Some(kind) = ObjectKind::from_xml_name(name) {
            return Self::Object(kind);
        }
        if let Some(kind) = CommandKind::from_xml_name(name) {
            return Self::Command(kind);
        }
        match name {
            "include_object" => Self::IncludeObject,
            "objectpool" => Self::ObjectPool,
            "point" => Self::Point,
            "image_data" => Self::ImageData,
            "language" => Self::Language,
            _ => Self::Unknown,
        }
    }
}

/// Result of a finished run.
#[derive(Debug)]
pub struct Compilation<S> {
    pub sink: S,
    /// Transform in effect at the end of the run.
    pub transform: PoolTransform,
    /// Diagnostics raised in best-effort mode, in document order.
    pub diagnostics: Vec<Diagnostic>,
}

/// Builds a pool from start, end and text events.
#[derive(Debug)]
pub struct Assembler<S: PoolSink> {
    sink: S,
    params: RunParams,
    limits: CompileLimits,
    depth: ColorDepth,
    stack: Vec<ObjectRecord>,
    transform: Option<PoolTransform>,
    multiplier: f32,
    element_depth: usize,
    capture: ImageCapture,
    diagnostics: Vec<Diagnostic>,
}

impl<S: PoolSink> Assembler<S> {
    /// Creates an assembler for one run; `params` are sanitized first.
    #[must_use]
    pub fn new(sink: S, params: RunParams, limits: CompileLimits) -> Self {
        let params = params.sanitize();
        let depth = params.color_depth();
        let capture = ImageCapture::new(limits.max_image_data_bytes);
        Self {
            sink,
            params,
            limits,
            depth,
            stack: Vec::new(),
            transform: None,
            multiplier: 1.0,
            element_depth: 0,
            capture,
            diagnostics: Vec::new(),
        }
    }

    #[must_use]
    pub const fn params(&self) -> &RunParams {
        &self.params
    }

    /// Transform computed from `objectpool`, if it has been seen.
    #[must_use]
    pub const fn transform(&self) -> Option<&PoolTransform> {
        self.transform.as_ref()
    }

    #[must_use]
    pub const fn multiplier(&self) -> f32 {
        self.multiplier
    }

    /// Number of objects currently open.
    #[must_use]
    pub fn open_objects(&self) -> usize {
        self.stack.len()
    }

    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Handles an opening tag.
    pub fn start_element(&mut self, name: &str, attrs: &Attributes) -> CompileResult<()> {
        let element = Element::classify(name);
        let mut r = Resolver::new(attrs);
        let id = r.id("id");

        if self.element_depth == 1 {
            self.sink.root_element(r.str("name"), id);
        }
        self.element_depth += 1;

        let mut issues = Vec::new();

        let created = match element {
            Element::Object(kind) => {
                if self.transform.is_none() {
                    issues.push(Issue::TransformNotSet);
                    self.transform = Some(PoolTransform::identity());
                    self.multiplier = 1.0;
                }
                self.apply_use(&mut r);
                Some(build_object(kind, id, &mut r, self.context()))
            }
            _ => None,
        };

        let role = r.str("role").filter(|value| !value.is_empty());
        let event = role.and_then(VtEvent::from_xml_name);
        let referencing = created.is_some() || element == Element::IncludeObject;

        if let (Some(event), false) = (event, self.stack.is_empty()) {
            let raw = r.int("id");
            if !(0..=i64::from(u8::MAX)).contains(&raw) {
                issues.push(Issue::ValueOutOfRange {
                    attribute: "id".to_owned(),
                    value: raw,
                });
            }
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let reference = MacroReference {
                event: event.id(),
                macro_id: raw as u8,
            };
            issues.extend(self.mutate_top(|top| top.add_macro(reference)));
        } else if referencing && !self.stack.is_empty() {
            if element == Element::IncludeObject {
                self.apply_use(&mut r);
            }
            let role = match role {
                Some(value) => Role::from_xml_name(value).or_else(|| {
                    issues.push(Issue::UnknownRole {
                        value: value.to_owned(),
                    });
                    None
                }),
                None => None,
            };
            let issue = match role {
                Some(role) => self.mutate_top(|top| top.set_reference(role, id)),
                None => {
                    let child = self.placement(&mut r, id);
                    self.mutate_top(|top| top.add_child(child))
                }
            };
            issues.extend(issue);
        } else {
            match element {
                Element::ObjectPool => self.open_pool(&r, &mut issues),
                Element::Point => {
                    let m = self.multiplier;
                    let point = Point {
                        x: wrap_u16(scale(m, r.int("pos_x"))),
                        y: wrap_u16(scale(m, r.int("pos_y"))),
                    };
                    issues.extend(self.mutate_top(|top| top.add_point(point)));
                }
                Element::ImageData => {
                    let width = r.u16("image_width");
                    let height = r.u16("image_height");
                    match self.mutate_top(|top| top.set_image_size(width, height)) {
                        Some(issue) => issues.push(issue),
                        None => self.capture.begin(),
                    }
                }
                Element::Language => {
                    let code = LanguageCode::from_bytes(&r.latin1("code"));
                    issues.extend(self.mutate_top(|top| top.add_language(code)));
                }
                Element::Command(kind) if !self.stack.is_empty() => {
                    self.apply_use(&mut r);
                    let command = build_command(kind, &mut r, self.context());
                    issues.extend(self.mutate_top(|top| top.add_command(command)));
                }
                _ if !self.stack.is_empty() && created.is_none() => {
                    issues.push(Issue::UnknownElement);
                }
                _ => {}
            }
        }

        let mut all = r.into_issues();
        all.append(&mut issues);
        for issue in all {
            self.report(name, issue)?;
        }

        if let Some(record) = created {
            if self.stack.len() >= self.limits.max_depth {
                return Err(CompileError::DepthExceeded {
                    limit: self.limits.max_depth,
                });
            }
            self.stack.push(record);
        }
        Ok(())
    }

    /// Handles a closing tag.
    pub fn end_element(&mut self, name: &str) -> CompileResult<()> {
        self.element_depth = self.element_depth.saturating_sub(1);
        match Element::classify(name) {
            Element::ImageData if self.capture.is_active() => {
                let text = self.capture.finish();
                let depth = self.depth;
                let issue = match self.stack.last_mut() {
                    Some(top) => install_image(top, &text, depth).err(),
                    None => Some(Issue::NoOpenObject),
                };
                if let Some(issue) = issue {
                    self.report(name, issue)?;
                }
            }
            Element::Object(_) => {
                if let Some(record) = self.stack.pop() {
                    let bytes = record.encode()?;
                    debug!(
                        kind = %record.kind(),
                        id = record.id.raw(),
                        size = bytes.len(),
                        "object finished"
                    );
                    self.sink.object(record.kind(), record.id, &bytes);
                }
            }
            _ => {}
        }
        Ok(())
    }

    /// Handles character data.
    pub fn characters(&mut self, text: &str) -> CompileResult<()> {
        self.capture.push(text)
    }

    /// Ends the run and hands back the sink.
    pub fn finish(self) -> Compilation<S> {
        Compilation {
            sink: self.sink,
            transform: self.transform.unwrap_or_default(),
            diagnostics: self.diagnostics,
        }
    }

    fn context(&self) -> BuildContext {
        BuildContext::new(self.multiplier, self.depth)
    }

    /// Switches the multiplier if the element carries a `use` attribute.
    fn apply_use(&mut self, r: &mut Resolver<'_>) {
        if let Some(selected) = r.multiplier_use() {
            let transform = self.transform.unwrap_or_default();
            self.multiplier = transform.select(selected);
        }
    }

    /// Computes the pool transform; later `objectpool` elements are ignored.
    fn open_pool(&mut self, r: &Resolver<'_>, issues: &mut Vec<Issue>) {
        if self.transform.is_some() {
            debug!("transform already set, objectpool ignored");
            return;
        }
        let declared = DeclaredGeometry {
            dimension: r.int("dimension"),
            sk_width: r.int("sk_width"),
            sk_height: r.int("sk_height"),
        };
        let (transform, zero) = PoolTransform::compute(&self.params, declared);
        issues.extend(zero);
        info!(
            dm_mult = transform.dm_mult,
            sk_mult = transform.sk_mult,
            dm_dx = transform.dm_dx,
            dm_dy = transform.dm_dy,
            sk_dx = transform.sk_dx,
            sk_dy = transform.sk_dy,
            "pool transform"
        );
        self.multiplier = transform.initial_multiplier();
        self.transform = Some(transform);
    }

    /// Scaled position of a child inside the object on top of the stack.
    fn placement(&self, r: &mut Resolver<'_>, id: ObjectId) -> ObjectReference {
        let m = self.multiplier;
        let (col, row) = match r.str("block_font_size") {
            Some(_) => {
                let font = r.font_size("block_font_size");
                block_font_offset(font, r.int("block_col"), r.int("block_row"), m)
            }
            None => (0, 0),
        };
        let (dx, dy) = match (self.transform, self.stack.last()) {
            (Some(transform), Some(top)) => transform.child_offset(top.kind(), m),
            _ => (0, 0),
        };
        let x = scale(m, r.int("pos_x")) + col + i64::from(dx);
        let y = scale(m, r.int("pos_y")) + row + i64::from(dy);
        ObjectReference::new(id, wrap_u16(x), wrap_u16(y))
    }

    /// Applies `mutate` to the top record, turning failure into an issue.
    fn mutate_top(
        &mut self,
        mutate: impl FnOnce(&mut ObjectRecord) -> Result<(), Unsupported>,
    ) -> Option<Issue> {
        let Some(top) = self.stack.last_mut() else {
            return Some(Issue::NoOpenObject);
        };
        mutate(top).err().map(|what| Issue::Unsupported {
            parent: top.kind(),
            what,
        })
    }

    fn report(&mut self, element: &str, issue: Issue) -> CompileResult<()> {
        let diagnostic = Diagnostic::new(element, issue);
        warn!("{diagnostic}");
        if self.params.mode == Mode::Strict {
            return Err(CompileError::Rejected(diagnostic));
        }
        self.diagnostics.push(diagnostic);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::PoolImage;

    fn attrs(pairs: &[(&str, &str)]) -> Attributes {
        pairs.iter().copied().collect()
    }

    fn assembler() -> Assembler<PoolImage> {
        Assembler::new(
            PoolImage::new(),
            RunParams::default(),
            CompileLimits::for_testing(),
        )
    }

    fn open_pool(asm: &mut Assembler<PoolImage>) {
        asm.start_element(
            "objectpool",
            &attrs(&[("dimension", "200"), ("sk_width", "60"), ("sk_height", "32")]),
        )
        .unwrap();
    }

    #[test]
    fn classify_names() {
        assert_eq!(
            Element::classify("datamask"),
            Element::Object(ObjectKind::DataMask)
        );
        assert_eq!(
            Element::classify("command_change_size"),
            Element::Command(CommandKind::ChangeSize)
        );
        assert_eq!(Element::classify("include_object"), Element::IncludeObject);
        assert_eq!(Element::classify("objectpool"), Element::ObjectPool);
        assert_eq!(Element::classify("bogus"), Element::Unknown);
    }

    #[test]
    fn object_emitted_on_close() {
        let mut asm = assembler();
        open_pool(&mut asm);
        asm.start_element("numbervariable", &attrs(&[("id", "300"), ("value", "9")]))
            .unwrap();
        assert_eq!(asm.open_objects(), 1);
        asm.end_element("numbervariable").unwrap();
        asm.end_element("objectpool").unwrap();
        let done = asm.finish();
        assert!(done.diagnostics.is_empty());
        assert_eq!(done.sink.bytes(), &[44, 1, 21, 9, 0, 0, 0]);
        assert_eq!(done.sink.root_objects(), 1);
    }

    #[test]
    fn object_before_pool_uses_identity() {
        let mut asm = assembler();
        asm.start_element("container", &attrs(&[("id", "1"), ("width", "10")]))
            .unwrap();
        asm.end_element("container").unwrap();
        let done = asm.finish();
        assert_eq!(done.transform, PoolTransform::identity());
        assert_eq!(done.diagnostics.len(), 1);
        assert_eq!(done.diagnostics[0].issue, Issue::TransformNotSet);
    }

    #[test]
    fn unknown_element_inside_object() {
        let mut asm = assembler();
        open_pool(&mut asm);
        asm.start_element("datamask", &attrs(&[("id", "1")])).unwrap();
        asm.start_element("sparkle", &attrs(&[])).unwrap();
        asm.end_element("sparkle").unwrap();
        asm.end_element("datamask").unwrap();
        let done = asm.finish();
        assert_eq!(
            done.diagnostics,
            vec![Diagnostic::new("sparkle", Issue::UnknownElement)]
        );
    }

    #[test]
    fn unknown_element_at_top_level_ignored() {
        let mut asm = assembler();
        open_pool(&mut asm);
        asm.start_element("comment", &attrs(&[])).unwrap();
        asm.end_element("comment").unwrap();
        assert!(asm.diagnostics().is_empty());
    }

    #[test]
    fn strict_mode_rejects() {
        let mut asm = Assembler::new(
            PoolImage::new(),
            RunParams::default().with_mode(Mode::Strict),
            CompileLimits::for_testing(),
        );
        open_pool(&mut asm);
        asm.start_element("rectangle", &attrs(&[("id", "1")])).unwrap();
        let err = asm
            .start_element("point", &attrs(&[("pos_x", "1")]))
            .unwrap_err();
        assert!(matches!(err, CompileError::Rejected(_)));
    }

    #[test]
    fn depth_limit() {
        let mut asm = assembler();
        open_pool(&mut asm);
        let limit = CompileLimits::for_testing().max_depth;
        for i in 0..limit {
            let id = i.to_string();
            asm.start_element("container", &attrs(&[("id", id.as_str())]))
                .unwrap();
        }
        let err = asm
            .start_element("container", &attrs(&[("id", "99")]))
            .unwrap_err();
        assert_eq!(err, CompileError::DepthExceeded { limit });
    }

    #[test]
    fn use_attribute_is_sticky() {
        let mut asm = Assembler::new(
            PoolImage::new(),
            RunParams::new(400, 120, 64, 256),
            CompileLimits::for_testing(),
        );
        asm.start_element(
            "objectpool",
            &attrs(&[("dimension", "200"), ("sk_width", "60"), ("sk_height", "64")]),
        )
        .unwrap();
        // min(2.0, min(2.0, 1.0))
        assert!((asm.multiplier() - 1.0).abs() < f32::EPSILON);
        asm.start_element("datamask", &attrs(&[("id", "1"), ("use", "mask")]))
            .unwrap();
        assert!((asm.multiplier() - 2.0).abs() < f32::EPSILON);
        asm.start_element("rectangle", &attrs(&[("id", "2")])).unwrap();
        assert!((asm.multiplier() - 2.0).abs() < f32::EPSILON);
    }
}
