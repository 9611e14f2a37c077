//! Target terminal parameters.

use raster::ColorDepth;
use tracing::warn;

/// Smallest accepted data mask dimension in pixels.
pub const MIN_DIMENSION: u32 = 200;
/// Smallest accepted soft key designator width in pixels.
pub const MIN_SK_WIDTH: u32 = 60;
/// Smallest accepted soft key designator height in pixels.
pub const MIN_SK_HEIGHT: u32 = 32;

/// How diagnostics affect a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Mode {
    /// Log and collect diagnostics, keep compiling.
    #[default]
    BestEffort,
    /// Abort on the first diagnostic.
    Strict,
}

/// Geometry and colour depth of the target Virtual Terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RunParams {
    /// Data mask width and height in pixels.
    pub dimension: u32,
    pub sk_width: u32,
    pub sk_height: u32,
    /// 2, 16 or 256.
    pub colors: u32,
    pub mode: Mode,
}

impl Default for RunParams {
    fn default() -> Self {
        Self {
            dimension: MIN_DIMENSION,
            sk_width: MIN_SK_WIDTH,
            sk_height: MIN_SK_HEIGHT,
            colors: 256,
            mode: Mode::BestEffort,
        }
    }
}

impl RunParams {
    #[must_use]
    pub const fn new(dimension: u32, sk_width: u32, sk_height: u32, colors: u32) -> Self {
        Self {
            dimension,
            sk_width,
            sk_height,
            colors,
            mode: Mode::BestEffort,
        }
    }

    #[must_use]
    pub const fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    /// Raises undersized geometry to the minimums and replaces an
    /// unsupported colour count with 256, warning about each change.
    #[must_use]
    pub fn sanitize(mut self) -> Self {
        if self.dimension < MIN_DIMENSION {
            warn!(
                dimension = self.dimension,
                "dimension too small, using {MIN_DIMENSION}"
            );
            self.dimension = MIN_DIMENSION;
        }
        if self.sk_width < MIN_SK_WIDTH {
            warn!(
                sk_width = self.sk_width,
                "soft key width too small, using {MIN_SK_WIDTH}"
            );
            self.sk_width = MIN_SK_WIDTH;
        }
        if self.sk_height < MIN_SK_HEIGHT {
            warn!(
                sk_height = self.sk_height,
                "soft key height too small, using {MIN_SK_HEIGHT}"
            );
            self.sk_height = MIN_SK_HEIGHT;
        }
        if ColorDepth::from_colors(self.colors).is_none() {
            warn!(colors = self.colors, "invalid number of colours, using 256");
            self.colors = 256;
        }
        self
    }

    /// Colour depth for `colors`, 256 colours if unsupported.
    #[must_use]
    pub fn color_depth(&self) -> ColorDepth {
        ColorDepth::from_colors(self.colors).unwrap_or_default()
    }
}
