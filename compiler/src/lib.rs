//! Compiles XML object pool descriptions into ISO 11783-6 binary pools.
//!
//! This is the main compiler crate that ties together raster and wire: it
//! resolves attributes, scales geometry to the target terminal, builds object
//! records and hands each finished record to a [`PoolSink`].
//!
//! # Features
//!
//! - All 31 object kinds and 20 macro commands
//! - Geometry scaling with data-mask and soft-key multipliers
//! - Inline base64 pictures quantized to 2, 16 or 256 colours
//! - Best-effort and strict handling of authoring mistakes
//!
//! # Design Principles
//!
//! - **Streaming** - Objects are emitted as soon as their element closes.
//! - **No global state** - Everything a run needs lives in one [`Assembler`].
//! - **Deterministic** - Same document and parameters produce the same bytes.
//!
//! # Example
//!
//! ```
//! use compiler::{compile_str, RunParams};
//!
//! let xml = r#"<objectpool dimension="200" sk_width="60" sk_height="32">
//!     <numbervariable id="300" value="9"/>
//! </objectpool>"#;
//! let done = compile_str(xml, RunParams::default()).unwrap();
//! assert_eq!(done.sink.bytes(), &[44, 1, 21, 9, 0, 0, 0]);
//! ```

mod assembler;
mod attrs;
mod command;
mod error;
mod factory;
mod limits;
mod params;
mod picture;
mod sink;
mod transform;
mod xml;

pub use assembler::{Assembler, Compilation, Element};
pub use attrs::{atof, atoi, Attributes};
pub use error::{CompileError, CompileResult, Diagnostic, Issue};
pub use limits::CompileLimits;
pub use params::{Mode, RunParams, MIN_DIMENSION, MIN_SK_HEIGHT, MIN_SK_WIDTH};
pub use sink::{ObjectEntry, PoolImage, PoolSink, RootName};
pub use transform::{DeclaredGeometry, MultiplierUse, PoolTransform};
pub use xml::{compile_reader, compile_str};
