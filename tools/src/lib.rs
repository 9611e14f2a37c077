//! Output formats and statistics for the `vtpool` compiler.
//!
//! This crate provides what the command line tool prints and writes:
//!
//! - A C array dump of the pool with `#define`s for named root objects
//! - Run statistics (multipliers, offsets, sizes, object counts)
//! - A machine-readable JSON report
//!
//! # Design Principles
//!
//! - **First-class tooling** - These tools are part of the product, not afterthoughts.
//! - **Human-readable output** - Make it easy to see what the compiler produced.

use std::fmt::{self, Write as _};

use compiler::{Compilation, Diagnostic, ObjectEntry, PoolImage, RootName, RunParams};
use serde::Serialize;

/// Renders the pool as a C byte array followed by `POOL_SIZE` and one
/// `#define` per named root object.
#[must_use]
pub fn format_table(image: &PoolImage) -> String {
    let mut out = String::from("unsigned char *pool = {\n  ");
    let mut first = true;
    for index in 0..image.object_count() {
        let Some(record) = image.record(index) else {
            continue;
        };
        for (i, byte) in record.iter().enumerate() {
            if first {
                first = false;
            } else {
                out.push_str(", ");
                if i == 0 {
                    out.push_str("\n  ");
                }
            }
            let _ = write!(out, "{byte}");
        }
    }
    let _ = write!(out, "\n}};\n\n#define POOL_SIZE {}\n\n", image.bytes().len());
    for RootName { name, id } in image.names() {
        let _ = writeln!(out, "#define {name} {id}");
    }
    out
}

/// Summary of one compilation run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PoolStats {
    pub dm_multiplier: f32,
    pub sk_multiplier: f32,
    pub dm_dx: i32,
    pub dm_dy: i32,
    pub sk_dx: i32,
    pub sk_dy: i32,
    pub pool_size: usize,
    pub total_objects: usize,
    pub root_objects: usize,
    pub diagnostics: usize,
    /// BLAKE3 hash of the pool bytes, hex encoded.
    pub fingerprint: String,
}

impl PoolStats {
    #[must_use]
    pub fn new(done: &Compilation<PoolImage>) -> Self {
        let image = &done.sink;
        let transform = &done.transform;
        Self {
            dm_multiplier: transform.dm_mult,
            sk_multiplier: transform.sk_mult,
            dm_dx: transform.dm_dx,
            dm_dy: transform.dm_dy,
            sk_dx: transform.sk_dx,
            sk_dy: transform.sk_dy,
            pool_size: image.bytes().len(),
            total_objects: image.object_count(),
            root_objects: image.root_objects(),
            diagnostics: done.diagnostics.len(),
            fingerprint: blake3::hash(image.bytes()).to_hex().to_string(),
        }
    }
}

impl fmt::Display for PoolStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "* dmMultiplier: {:.6}", self.dm_multiplier)?;
        writeln!(f, "* skMultiplier: {:.6}", self.sk_multiplier)?;
        writeln!(f, "* dmDeltaX: {}", self.dm_dx)?;
        writeln!(f, "* dmDeltaY: {}", self.dm_dy)?;
        writeln!(f, "* skDeltaX: {}", self.sk_dx)?;
        writeln!(f, "* skDeltaY: {}", self.sk_dy)?;
        writeln!(f, "* generated pool size: {}", self.pool_size)?;
        writeln!(f, "* total number of objects: {}", self.total_objects)?;
        writeln!(f, "* number of root level objects: {}", self.root_objects)?;
        writeln!(f, "* diagnostics: {}", self.diagnostics)?;
        write!(f, "* blake3: {}", self.fingerprint)
    }
}

/// One diagnostic in a [`CompileReport`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportedDiagnostic {
    pub element: String,
    pub message: String,
}

impl From<&Diagnostic> for ReportedDiagnostic {
    fn from(diagnostic: &Diagnostic) -> Self {
        Self {
            element: diagnostic.element.clone(),
            message: diagnostic.issue.to_string(),
        }
    }
}

/// Everything known about a run, for `--report json`.
#[derive(Debug, Clone, Serialize)]
pub struct CompileReport {
    pub input: String,
    pub output: String,
    pub params: RunParams,
    pub stats: PoolStats,
    pub objects: Vec<ObjectEntry>,
    pub names: Vec<RootName>,
    pub diagnostics: Vec<ReportedDiagnostic>,
}

impl CompileReport {
    #[must_use]
    pub fn new(
        input: impl Into<String>,
        output: impl Into<String>,
        params: RunParams,
        done: &Compilation<PoolImage>,
    ) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            params,
            stats: PoolStats::new(done),
            objects: done.sink.entries().to_vec(),
            names: done.sink.names().to_vec(),
            diagnostics: done.diagnostics.iter().map(ReportedDiagnostic::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use compiler::compile_str;

    use super::*;

    const POOL: &str = r#"<objectpool dimension="200" sk_width="60" sk_height="32">
        <numbervariable id="300" name="Speed" value="9"/>
        <objectpointer id="6"/>
    </objectpool>"#;

    fn compiled() -> Compilation<PoolImage> {
        compile_str(POOL, RunParams::default()).unwrap()
    }

    #[test]
    fn table_layout() {
        let table = format_table(&compiled().sink);
        assert_eq!(
            table,
            "unsigned char *pool = {\n  \
             44, 1, 21, 9, 0, 0, 0, \n  6, 0, 27, 255, 255\n};\n\n\
             #define POOL_SIZE 12\n\n\
             #define Speed 300\n"
        );
    }

    #[test]
    fn empty_table() {
        let table = format_table(&PoolImage::new());
        assert_eq!(table, "unsigned char *pool = {\n  \n};\n\n#define POOL_SIZE 0\n\n");
    }

    #[test]
    fn stats_from_run() {
        let done = compiled();
        let stats = PoolStats::new(&done);
        assert_eq!(stats.pool_size, 12);
        assert_eq!(stats.total_objects, 2);
        assert_eq!(stats.root_objects, 2);
        assert_eq!(stats.dm_dx, 0);
        assert_eq!(stats.fingerprint.len(), 64);
        assert_eq!(
            stats.fingerprint,
            blake3::hash(done.sink.bytes()).to_hex().to_string()
        );
        let text = stats.to_string();
        assert!(text.contains("* dmMultiplier: 1.000000"));
        assert!(text.contains("* number of root level objects: 2"));
    }

    #[test]
    fn report_serializes() {
        let done = compiled();
        let report = CompileReport::new("in.xml", "out.iop", RunParams::default(), &done);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["stats"]["pool_size"], 12);
        assert_eq!(json["objects"][0]["kind"], "numbervariable");
        assert_eq!(json["objects"][1]["offset"], 7);
        assert_eq!(json["names"][0]["name"], "Speed");
        assert_eq!(json["params"]["mode"], "best_effort");
        assert!(json["diagnostics"].as_array().unwrap().is_empty());
    }
}
