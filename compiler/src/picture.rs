//! Inline image data for picture graphics.

use raster::{decode_base64, pack_image, ColorDepth};
use wire::{ObjectRecord, Unsupported};

use crate::error::{CompileError, CompileResult, Issue};

/// Character data collected between `image_data` tags.
#[derive(Debug)]
pub struct ImageCapture {
    text: String,
    active: bool,
    limit: usize,
}

impl ImageCapture {
    #[must_use]
    pub fn new(limit: usize) -> Self {
        Self {
            text: String::new(),
            active: false,
            limit,
        }
    }

    /// Starts collecting, discarding anything left over.
    pub fn begin(&mut self) {
        self.text.clear();
        self.active = true;
    }

    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Appends text if collecting; ignored otherwise.
    pub fn push(&mut self, text: &str) -> CompileResult<()> {
        if !self.active {
            return Ok(());
        }
        if self.text.len() + text.len() > self.limit {
            return Err(CompileError::ImageDataTooLarge { limit: self.limit });
        }
        self.text.push_str(text);
        Ok(())
    }

    /// Stops collecting and returns the collected text.
    pub fn finish(&mut self) -> String {
        self.active = false;
        std::mem::take(&mut self.text)
    }
}

/// Decodes `text`, packs it for `depth`, and installs it on a picture.
///
/// The record is left untouched if anything fails.
pub fn install_image(record: &mut ObjectRecord, text: &str, depth: ColorDepth) -> Result<(), Issue> {
    let Some(picture) = record.picture() else {
        return Err(Issue::Unsupported {
            parent: record.kind(),
            what: Unsupported::ImageData,
        });
    };
    let width = usize::from(picture.actual_width);
    let height = usize::from(picture.actual_height);

    let pixels = decode_base64(text).map_err(Issue::InvalidImageData)?;
    let expected = width * height;
    if pixels.len() != expected {
        return Err(Issue::PictureSizeMismatch {
            expected,
            actual: pixels.len(),
        });
    }
    let packed = pack_image(&pixels, width, height, depth).map_err(Issue::InvalidImageData)?;
    record
        .set_raw_data(packed)
        .map_err(|what| Issue::Unsupported {
            parent: record.kind(),
            what,
        })
}

#[cfg(test)]
mod tests {
    use wire::{ObjectId, ObjectKind};

    use super::*;

    fn picture(width: u16, height: u16) -> ObjectRecord {
        let mut record = ObjectRecord::empty(ObjectId::new(20), ObjectKind::PictureGraphic);
        record.set_image_size(width, height).unwrap();
        record
    }

    #[test]
    fn capture_only_while_active() {
        let mut capture = ImageCapture::new(64);
        capture.push("ignored").unwrap();
        capture.begin();
        capture.push("AAEB").unwrap();
        capture.push("\n AA==").unwrap();
        assert!(capture.is_active());
        assert_eq!(capture.finish(), "AAEB\n AA==");
        assert!(!capture.is_active());
        assert_eq!(capture.finish(), "");
    }

    #[test]
    fn capture_limit() {
        let mut capture = ImageCapture::new(4);
        capture.begin();
        capture.push("AAAA").unwrap();
        assert_eq!(
            capture.push("A"),
            Err(CompileError::ImageDataTooLarge { limit: 4 })
        );
    }

    #[test]
    fn installs_packed_pixels() {
        let mut record = picture(4, 1);
        install_image(&mut record, "AAEBAA==", ColorDepth::Sixteen).unwrap();
        assert_eq!(record.picture().unwrap().raw_data, vec![0x01, 0x10]);
        assert_eq!(record.byte_size(), ObjectKind::PictureGraphic.fixed_size() + 2);
    }

    #[test]
    fn size_mismatch_leaves_record() {
        let mut record = picture(3, 1);
        let before = record.clone();
        assert_eq!(
            install_image(&mut record, "AAEBAA==", ColorDepth::Full),
            Err(Issue::PictureSizeMismatch {
                expected: 3,
                actual: 4
            })
        );
        assert_eq!(record, before);
    }

    #[test]
    fn invalid_character_reported() {
        let mut record = picture(1, 1);
        let err = install_image(&mut record, "A*==", ColorDepth::Full).unwrap_err();
        assert!(matches!(err, Issue::InvalidImageData(_)));
    }

    #[test]
    fn non_picture_rejected() {
        let mut record = ObjectRecord::empty(ObjectId::new(1), ObjectKind::Rectangle);
        let err = install_image(&mut record, "AA==", ColorDepth::Full).unwrap_err();
        assert_eq!(
            err,
            Issue::Unsupported {
                parent: ObjectKind::Rectangle,
                what: Unsupported::ImageData
            }
        );
    }
}
