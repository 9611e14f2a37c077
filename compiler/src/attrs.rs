//! Typed lookup of element attributes.
//!
//! Every lookup is total: a missing attribute reads as zero (or the given
//! default), and a value that cannot be interpreted is recorded as an
//! [`Issue`] on the resolver and read as zero.

use raster::ColorDepth;

use crate::error::Issue;
use crate::transform::MultiplierUse;

/// The 16 standard colour names, in palette order.
pub const COLOUR_NAMES: [&str; 16] = [
    "black", "white", "green", "teal", "maroon", "purple", "olive", "silver", "grey", "blue",
    "lime", "cyan", "red", "magenta", "yellow", "navy",
];

/// Values read as `true` by [`Resolver::flag`].
pub const TRUE_WORDS: [&str; 6] = ["yes", "true", "on", "show", "enable", "1"];

pub const PRIORITIES: [&str; 3] = ["high", "medium", "low"];
pub const ACOUSTIC_SIGNALS: [&str; 4] = ["high", "medium", "low", "none"];
pub const JUSTIFICATIONS: [&str; 3] = ["left", "middle", "right"];
pub const ELLIPSE_TYPES: [&str; 4] = ["closed", "open", "closedsegment", "closedsection"];
pub const POLYGON_TYPES: [&str; 4] = ["convex", "nonconvex", "complex", "open"];
pub const FILL_TYPES: [&str; 4] = ["nofill", "linecolour", "fillcolour", "pattern"];
pub const FUNCTION_TYPES: [&str; 2] = ["boolean", "analog"];
pub const LINE_DIRECTIONS: [&str; 2] = ["toplefttobottomright", "bottomlefttotopright"];
pub const NUMBER_FORMATS: [&str; 2] = ["fixed", "exponential"];
pub const VALIDATION_TYPES: [&str; 2] = ["validcharacters", "invalidcharacters"];
pub const FONT_TYPES: [&str; 2] = ["latin1", "latin9"];

/// Font cell sizes, indexed by font size code.
pub const FONT_SIZES: [&str; 15] = [
    "6x8", "8x8", "8x12", "12x16", "16x16", "16x24", "24x32", "32x32", "32x48", "48x64", "64x64",
    "64x96", "96x128", "128x128", "128x192",
];

// Option tables: entry i sets bit i. Empty entries are unused bits.
pub const INPUT_STRING_OPTIONS: [&str; 2] = ["transparent", "autowrap"];
pub const INPUT_NUMBER_OPTIONS: [&str; 3] = ["transparent", "leadingzeros", "blankzero"];
pub const METER_OPTIONS: [&str; 4] = ["arc", "border", "ticks", "clockwise"];
pub const LINEAR_BAR_GRAPH_OPTIONS: [&str; 6] = [
    "border",
    "targetline",
    "ticks",
    "nofill",
    "horizontal",
    "growpositive",
];
pub const ARCHED_BAR_GRAPH_OPTIONS: [&str; 5] = ["border", "targetline", "", "nofill", "clockwise"];
pub const PICTURE_OPTIONS: [&str; 2] = ["transparent", "flashing"];
pub const FONT_STYLES: [&str; 7] = [
    "bold",
    "crossed",
    "underlined",
    "italic",
    "inverted",
    "flashinginverted",
    "flashinghidden",
];
pub const LINE_SUPPRESSION: [&str; 4] = ["top", "right", "bottom", "left"];

/// Attributes of one start element, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes {
    pairs: Vec<(String, String)>,
}

impl Attributes {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.pairs.push((name.into(), value.into()));
    }

    /// Value of the first attribute called `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut attrs = Self::new();
        for (name, value) in iter {
            attrs.push(name, value);
        }
        attrs
    }
}

/// Parses a leading decimal integer the way C `atoi` does.
///
/// Leading whitespace and one sign are accepted; parsing stops at the first
/// non-digit. Anything without digits is 0. Saturates instead of
/// overflowing.
#[must_use]
pub fn atoi(text: &str) -> i64 {
    let text = text.trim_start();
    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    let mut value: i64 = 0;
    for b in digits.bytes().take_while(u8::is_ascii_digit) {
        value = value.saturating_mul(10).saturating_add(i64::from(b - b'0'));
    }
    if negative {
        -value
    } else {
        value
    }
}

/// Parses the longest leading floating-point prefix, as C `atof` does.
#[must_use]
pub fn atof(text: &str) -> f32 {
    let text = text.trim_start();
    let bytes = text.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    let digits_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    if bytes.get(end) == Some(&b'.') {
        end += 1;
        while bytes.get(end).is_some_and(u8::is_ascii_digit) {
            end += 1;
        }
    }
    if end == digits_start || (end == digits_start + 1 && bytes[digits_start] == b'.') {
        return 0.0;
    }
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = exp_end;
        while bytes.get(exp_end).is_some_and(u8::is_ascii_digit) {
            exp_end += 1;
        }
        if exp_end > exp_digits {
            end = exp_end;
        }
    }
    text[..end].parse().unwrap_or(0.0)
}

/// Whether `text` starts like a number `atoi` would read digits from.
fn is_numeric(text: &str) -> bool {
    let text = text.trim_start();
    let digits = text.strip_prefix(['-', '+']).unwrap_or(text);
    digits.bytes().next().is_some_and(|b| b.is_ascii_digit())
}

/// Attribute reader that records uninterpretable values.
#[derive(Debug)]
pub struct Resolver<'a> {
    attrs: &'a Attributes,
    issues: Vec<Issue>,
}

impl<'a> Resolver<'a> {
    #[must_use]
    pub fn new(attrs: &'a Attributes) -> Self {
        Self {
            attrs,
            issues: Vec::new(),
        }
    }

    /// Raw attribute value.
    #[must_use]
    pub fn str(&self, name: &str) -> Option<&'a str> {
        self.attrs.get(name)
    }

    /// Integer value, 0 if missing or non-numeric.
    #[must_use]
    pub fn int(&self, name: &str) -> i64 {
        self.str(name).map_or(0, atoi)
    }

    /// Floating-point value, `default` if missing or empty.
    #[must_use]
    pub fn float(&self, name: &str, default: f32) -> f32 {
        match self.str(name) {
            Some(value) if !value.is_empty() => atof(value),
            _ => default,
        }
    }

    /// Integer value checked against an unsigned field of `max`.
    ///
    /// Out-of-range values are recorded and truncated to the field width by
    /// the caller.
    fn bounded(&mut self, name: &str, max: i64) -> i64 {
        let value = self.int(name);
        if !(0..=max).contains(&value) {
            self.issues.push(Issue::ValueOutOfRange {
                attribute: name.to_owned(),
                value,
            });
        }
        value
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn u8(&mut self, name: &str) -> u8 {
        self.bounded(name, i64::from(u8::MAX)) as u8
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn u16(&mut self, name: &str) -> u16 {
        self.bounded(name, i64::from(u16::MAX)) as u16
    }

    /// Value clamped to `0..=max`; anything outside is recorded.
    pub fn clamped(&mut self, name: &str, max: u16) -> u16 {
        let value = self.bounded(name, i64::from(max));
        u16::try_from(value.clamp(0, i64::from(max))).unwrap_or(max)
    }

    /// 32-bit value; negative numbers keep their two's complement bits.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn u32(&mut self, name: &str) -> u32 {
        let value = self.int(name);
        if value < i64::from(i32::MIN) || value > i64::from(u32::MAX) {
            self.issues.push(Issue::ValueOutOfRange {
                attribute: name.to_owned(),
                value,
            });
        }
        value as u32
    }

    #[allow(clippy::cast_possible_truncation)]
    pub fn i32(&mut self, name: &str) -> i32 {
        let value = self.int(name);
        if i32::try_from(value).is_err() {
            self.issues.push(Issue::ValueOutOfRange {
                attribute: name.to_owned(),
                value,
            });
        }
        value as i32
    }

    /// Object id value, 0 if missing.
    pub fn id(&mut self, name: &str) -> wire::ObjectId {
        wire::ObjectId::new(self.u16(name))
    }

    /// Position of the value in `table`, else its numeric value.
    ///
    /// A non-numeric value outside the table is recorded and reads as 0.
    pub fn enum_index(&mut self, name: &str, table: &[&str]) -> i64 {
        let Some(value) = self.str(name) else {
            return 0;
        };
        if let Some(index) = table.iter().position(|entry| *entry == value) {
            return i64::try_from(index).unwrap_or(0);
        }
        if value.is_empty() || is_numeric(value) {
            return atoi(value);
        }
        self.issues.push(Issue::UnknownValue {
            attribute: name.to_owned(),
            value: value.to_owned(),
        });
        0
    }

    /// [`Self::enum_index`] narrowed to a byte field.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn enum_u8(&mut self, name: &str, table: &[&str]) -> u8 {
        let value = self.enum_index(name, table);
        if !(0..=i64::from(u8::MAX)).contains(&value) {
            self.issues.push(Issue::ValueOutOfRange {
                attribute: name.to_owned(),
                value,
            });
        }
        value as u8
    }

    /// True iff the value is one of [`TRUE_WORDS`].
    #[must_use]
    pub fn flag(&self, name: &str) -> bool {
        self.str(name).is_some_and(|value| TRUE_WORDS.contains(&value))
    }

    /// Palette index of a colour name or number, reduced to `depth`.
    pub fn colour(&mut self, name: &str, depth: ColorDepth) -> u8 {
        let Some(value) = self.str(name) else {
            return 0;
        };
        let index = if let Some(index) = COLOUR_NAMES.iter().position(|c| *c == value) {
            u8::try_from(index).unwrap_or(0)
        } else if value.is_empty() || is_numeric(value) {
            let raw = atoi(value);
            u8::try_from(raw).unwrap_or_else(|_| {
                self.issues.push(Issue::ValueOutOfRange {
                    attribute: name.to_owned(),
                    value: raw,
                });
                0
            })
        } else {
            self.issues.push(Issue::UnknownValue {
                attribute: name.to_owned(),
                value: value.to_owned(),
            });
            0
        };
        depth.reduce(index)
    }

    /// Bit field with bit `i` set when `table[i]` occurs in the value.
    #[must_use]
    pub fn options(&self, name: &str, table: &[&str]) -> u8 {
        let value = self.str(name).unwrap_or_default();
        table
            .iter()
            .enumerate()
            .filter(|(_, option)| !option.is_empty() && value.contains(*option))
            .fold(0u8, |bits, (i, _)| bits | (1 << i))
    }

    /// Suppressed edges as named sides plus any numeric value.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    #[must_use]
    pub fn line_suppression(&self) -> u8 {
        let named = i64::from(self.options("line_suppression", &LINE_SUPPRESSION));
        (named + self.int("line_suppression")) as u8
    }

    /// A string of `0` and `1` read as a 16-bit pattern, first bit highest.
    #[must_use]
    pub fn line_art(&self) -> u16 {
        self.str("line_art")
            .unwrap_or_default()
            .bytes()
            .fold(0u16, |art, b| (art << 1) | u16::from(b == b'1'))
    }

    /// Font size code from a cell size like `8x12`, or a number.
    pub fn font_size(&mut self, name: &str) -> i64 {
        self.enum_index(name, &FONT_SIZES)
    }

    /// Which multiplier the `use` attribute selects, `None` if absent.
    pub fn multiplier_use(&mut self) -> Option<MultiplierUse> {
        let value = self.str("use")?;
        let selected = MultiplierUse::from_xml_name(value);
        if selected.is_none() {
            self.issues.push(Issue::UnknownValue {
                attribute: "use".to_owned(),
                value: value.to_owned(),
            });
        }
        selected
    }

    /// Latin-1 bytes of the value, space padded or truncated to `len`.
    pub fn latin1_padded(&mut self, name: &str, len: usize) -> Vec<u8> {
        let mut bytes = self.latin1(name);
        bytes.resize(len, b' ');
        bytes
    }

    /// Latin-1 bytes of the value; other characters become `?`.
    pub fn latin1(&mut self, name: &str) -> Vec<u8> {
        let value = self.str(name).unwrap_or_default();
        value
            .chars()
            .map(|c| {
                u8::try_from(u32::from(c)).unwrap_or_else(|_| {
                    self.issues.push(Issue::UnmappableCharacter {
                        attribute: name.to_owned(),
                        character: c,
                    });
                    b'?'
                })
            })
            .collect()
    }

    #[must_use]
    pub fn into_issues(self) -> Vec<Issue> {
        self.issues
    }
}
