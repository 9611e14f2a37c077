//! Geometry rescaling from the authored screen to the target VT.
//!
//! Data masks and soft key designators scale independently. Each gets a
//! uniform multiplier and a centering offset computed once when the
//! `objectpool` element opens.

use wire::ObjectKind;

use crate::error::Issue;
use crate::params::RunParams;

/// Block font cell widths, indexed by font size code.
const BLOCK_FONT_WIDTHS: [i64; 15] = [6, 8, 8, 12, 16, 16, 24, 32, 32, 48, 64, 64, 96, 128, 128];
/// Block font cell heights, indexed by font size code.
const BLOCK_FONT_HEIGHTS: [i64; 15] = [
    8, 8, 12, 16, 16, 24, 32, 32, 48, 64, 64, 96, 128, 128, 192,
];

/// Which multiplier an element's `use` attribute selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MultiplierUse {
    /// Data mask multiplier.
    Mask,
    /// Soft key designator multiplier.
    Designator,
    /// The smaller of the two.
    Both,
}

impl MultiplierUse {
    #[must_use]
    pub fn from_xml_name(name: &str) -> Option<Self> {
        match name {
            "mask" => Some(Self::Mask),
            "designator" => Some(Self::Designator),
            "both" => Some(Self::Both),
            _ => None,
        }
    }
}

/// Authored geometry declared on the `objectpool` element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DeclaredGeometry {
    pub dimension: i64,
    pub sk_width: i64,
    pub sk_height: i64,
}

/// Multipliers and centering offsets for one pool.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PoolTransform {
    pub dm_mult: f32,
    pub sk_mult: f32,
    pub dm_dx: i32,
    pub dm_dy: i32,
    pub sk_dx: i32,
    pub sk_dy: i32,
}

impl Default for PoolTransform {
    fn default() -> Self {
        Self::identity()
    }
}

#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
impl PoolTransform {
    /// No scaling, no offsets.
    #[must_use]
    pub const fn identity() -> Self {
        Self {
            dm_mult: 1.0,
            sk_mult: 1.0,
            dm_dx: 0,
            dm_dy: 0,
            sk_dx: 0,
            sk_dy: 0,
        }
    }

    /// Computes the transform for `declared` geometry on the target.
    ///
    /// A declared value that is zero or negative is replaced by the target
    /// value, so its ratio is 1, and reported.
    #[must_use]
    pub fn compute(target: &RunParams, declared: DeclaredGeometry) -> (Self, Vec<Issue>) {
        let mut issues = Vec::new();
        let mut checked = |attribute: &'static str, value: i64, fallback: u32| -> f32 {
            if value > 0 {
                value as f32
            } else {
                issues.push(Issue::ZeroGeometry { attribute });
                fallback as f32
            }
        };
        let dimension = checked("dimension", declared.dimension, target.dimension);
        let sk_width = checked("sk_width", declared.sk_width, target.sk_width);
        let sk_height = checked("sk_height", declared.sk_height, target.sk_height);

        let vt_dimension = target.dimension as f32;
        let vt_sk_width = target.sk_width as f32;
        let vt_sk_height = target.sk_height as f32;

        let dm_mult = vt_dimension / dimension;
        let sk_mult = (vt_sk_width / sk_width).min(vt_sk_height / sk_height);

        let centre = |space: f32, used: f32| (((space - used) as i32) / 2).max(0);
        let dm_dx = centre(vt_dimension, dm_mult * dimension);
        let transform = Self {
            dm_mult,
            sk_mult,
            dm_dx,
            dm_dy: dm_dx,
            sk_dx: centre(vt_sk_width, sk_mult * sk_width),
            sk_dy: centre(vt_sk_height, sk_mult * sk_height),
        };
        (transform, issues)
    }

    /// Multiplier active right after the root opens.
    #[must_use]
    pub fn initial_multiplier(&self) -> f32 {
        self.dm_mult.min(self.sk_mult)
    }

    #[must_use]
    pub fn select(&self, selected: MultiplierUse) -> f32 {
        match selected {
            MultiplierUse::Mask => self.dm_mult,
            MultiplierUse::Designator => self.sk_mult,
            MultiplierUse::Both => self.dm_mult.min(self.sk_mult),
        }
    }

    /// Offset added to a child placed inside a `parent` object.
    #[must_use]
    pub fn child_offset(&self, parent: ObjectKind, multiplier: f32) -> (i32, i32) {
        match parent {
            ObjectKind::DataMask | ObjectKind::AlarmMask => (self.dm_dx, self.dm_dy),
            ObjectKind::Key => (self.sk_dx, self.sk_dy),
            ObjectKind::Button => {
                let pad = (4.0 * multiplier) as i32 - 4;
                (pad, pad)
            }
            _ => (0, 0),
        }
    }
}

/// `trunc(multiplier * raw)`.
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
#[must_use]
pub fn scale(multiplier: f32, raw: i64) -> i64 {
    (multiplier * raw as f32) as i64
}

/// Scales `raw` by the integer part of `multiplier`.
#[allow(clippy::cast_possible_truncation)]
#[must_use]
pub fn scale_whole(multiplier: f32, raw: i64) -> i64 {
    (multiplier as i64).saturating_mul(raw)
}

/// Wraps a computed coordinate or size into a 16-bit field.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
#[must_use]
pub const fn wrap_u16(value: i64) -> u16 {
    value as u16
}

/// Pixel offset of a block-font cell.
///
/// The font code is multiplied by the integer part of `multiplier`; codes
/// outside the table give no offset.
#[allow(clippy::cast_possible_truncation)]
#[must_use]
pub fn block_font_offset(font: i64, col: i64, row: i64, multiplier: f32) -> (i64, i64) {
    let cell = font.saturating_mul(multiplier as i64);
    usize::try_from(cell)
        .ok()
        .filter(|&cell| cell < BLOCK_FONT_WIDTHS.len())
        .map_or((0, 0), |cell| {
            (
                col.saturating_mul(BLOCK_FONT_WIDTHS[cell]),
                row.saturating_mul(BLOCK_FONT_HEIGHTS[cell]),
            )
        })
}
