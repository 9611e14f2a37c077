//! Colour quantization and raster packing for ISOBUS VT picture graphics.
//!
//! This crate turns decoded 256-colour image data into the packed raw data
//! a VT expects at its native colour depth. It knows nothing about objects
//! or pools.
//!
//! # Design Principles
//!
//! - **Pure tables** - Colour reduction is a fixed lookup, total over `0..=255`.
//! - **Row aligned** - Every packed row starts on a byte boundary.
//! - **Explicit errors** - Malformed image text returns structured errors, never panics.
//!
//! # Example
//!
//! ```
//! use raster::{decode_base64, pack_image, ColorDepth};
//!
//! // four pixels: black, white, white, black
//! let pixels = decode_base64("AAEBAA==").unwrap();
//! let packed = pack_image(&pixels, 4, 1, ColorDepth::Sixteen).unwrap();
//! assert_eq!(packed, vec![0x01, 0x10]);
//! ```

mod decode;
mod error;
mod packer;
mod palette;

pub use decode::{decode_base64, decoded_len};
pub use error::{RasterError, RasterResult};
pub use packer::{pack_image, RowPacker};
pub use palette::{reduce_color, ColorDepth};
