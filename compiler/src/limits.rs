//! Resource limits for a compilation run.

/// Bounds enforced while assembling a pool.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CompileLimits {
    /// Maximum number of simultaneously open objects.
    pub max_depth: usize,
    /// Maximum number of characters captured for one `image_data` element.
    pub max_image_data_bytes: usize,
}

impl Default for CompileLimits {
    fn default() -> Self {
        Self {
            max_depth: 256,
            max_image_data_bytes: 16 * 1024 * 1024,
        }
    }
}

impl CompileLimits {
    /// Creates limits suitable for testing with smaller values.
    #[must_use]
    pub const fn for_testing() -> Self {
        Self {
            max_depth: 8,
            max_image_data_bytes: 4096,
        }
    }

    /// Creates limits with no restrictions (use with caution).
    #[must_use]
    pub const fn unlimited() -> Self {
        Self {
            max_depth: usize::MAX,
            max_image_data_bytes: usize::MAX,
        }
    }
}
