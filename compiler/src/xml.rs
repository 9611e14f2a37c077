//! XML front end: feeds parser events into an [`Assembler`].

use std::fmt::Display;
use std::io::BufRead;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::assembler::{Assembler, Compilation};
use crate::attrs::Attributes;
use crate::error::{CompileError, CompileResult};
use crate::limits::CompileLimits;
use crate::params::RunParams;
use crate::sink::{PoolImage, PoolSink};

/// Compiles the XML document read from `reader` into `sink`.
///
/// # Errors
///
/// Returns [`CompileError::Xml`] for malformed input or read failures, and
/// any error raised by the assembler.
pub fn compile_reader<R: BufRead, S: PoolSink>(
    reader: R,
    sink: S,
    params: RunParams,
    limits: CompileLimits,
) -> CompileResult<Compilation<S>> {
    let mut reader = Reader::from_reader(reader);
    reader.config_mut().trim_text(true);
    let mut assembler = Assembler::new(sink, params, limits);
    let mut buf = Vec::new();

    loop {
        let event = reader
            .read_event_into(&mut buf)
            .map_err(|err| xml_error(reader.error_position(), err))?;
        match event {
            Event::Start(e) => {
                let (name, attrs) = element(&e, &reader)?;
                assembler.start_element(&name, &attrs)?;
            }
            Event::Empty(e) => {
                let (name, attrs) = element(&e, &reader)?;
                assembler.start_element(&name, &attrs)?;
                assembler.end_element(&name)?;
            }
            Event::End(e) => {
                let name = e.name();
                assembler.end_element(utf8(name.as_ref(), &reader)?)?;
            }
            Event::Text(e) => {
                let text = e.unescape().map_err(|err| xml_error(position(&reader), err))?;
                assembler.characters(&text)?;
            }
            Event::CData(e) => {
                let raw = e.into_inner();
                assembler.characters(utf8(&raw, &reader)?)?;
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    if assembler.open_objects() > 0 {
        return Err(xml_error(
            position(&reader),
            format!("input ended with {} open objects", assembler.open_objects()),
        ));
    }
    Ok(assembler.finish())
}

/// Compiles an in-memory document into a [`PoolImage`].
///
/// # Errors
///
/// See [`compile_reader`].
pub fn compile_str(xml: &str, params: RunParams) -> CompileResult<Compilation<PoolImage>> {
    compile_reader(xml.as_bytes(), PoolImage::new(), params, CompileLimits::default())
}

fn element<R>(start: &BytesStart<'_>, reader: &Reader<R>) -> CompileResult<(String, Attributes)> {
    let name = utf8(start.name().as_ref(), reader)?.to_owned();
    let mut attrs = Attributes::new();
    for attr in start.attributes() {
        let attr = attr.map_err(|err| xml_error(position(reader), err))?;
        let key = utf8(attr.key.as_ref(), reader)?.to_owned();
        let value = attr
            .unescape_value()
            .map_err(|err| xml_error(position(reader), err))?;
        attrs.push(key, value);
    }
    Ok((name, attrs))
}

fn utf8<'b, R>(bytes: &'b [u8], reader: &Reader<R>) -> CompileResult<&'b str> {
    std::str::from_utf8(bytes).map_err(|err| xml_error(position(reader), err))
}

fn position<R>(reader: &Reader<R>) -> u64 {
    reader.buffer_position().try_into().unwrap_or(u64::MAX)
}

fn xml_error(position: impl TryInto<u64>, err: impl Display) -> CompileError {
    CompileError::Xml {
        position: position.try_into().unwrap_or(u64::MAX),
        message: err.to_string(),
    }
}
