use std::fs;
use std::path::Path;

use crate::error::ImageError;

/// Default load address when a program gives none.
pub const DEFAULT_ORIG: u16 = 0x3000;

/// A program image: load address followed by consecutive words.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Image {
    orig: u16,
    words: Vec<u16>,
}

impl Image {
    /// Parse big-endian words; the first is the origin.
    pub fn from_bytes(bytes: &[u8]) -> Result<Image, ImageError> {
        if bytes.len() % 2 != 0 {
            return Err(ImageError::Unaligned { len: bytes.len() });
        }
        let mut words = bytes
            .chunks_exact(2)
            .map(|word| u16::from_be_bytes([word[0], word[1]]));
        let orig = words.next().ok_or(ImageError::Empty)?;
        Ok(Image {
            orig,
            words: words.collect(),
        })
    }

    pub fn read(path: impl AsRef<Path>) -> Result<Image, ImageError> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|source| ImageError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_bytes(&bytes)
    }

    pub fn orig(&self) -> u16 {
        self.orig
    }

    pub fn words(&self) -> &[u16] {
        &self.words
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_origin_and_words() {
        let image = Image::from_bytes(&[0x30, 0x00, 0x16, 0x21, 0xf0, 0x25]).unwrap();
        assert_eq!(image.orig(), 0x3000);
        assert_eq!(image.words(), &[0x1621, 0xf025]);
    }

    #[test]
    fn origin_only() {
        let image = Image::from_bytes(&[0x40, 0x00]).unwrap();
        assert_eq!(image.orig(), 0x4000);
        assert!(image.words().is_empty());
    }

    #[test]
    fn rejects_odd_length() {
        let err = Image::from_bytes(&[0x30, 0x00, 0x16]).unwrap_err();
        assert!(matches!(err, ImageError::Unaligned { len: 3 }));
    }

    #[test]
    fn rejects_empty() {
        let err = Image::from_bytes(&[]).unwrap_err();
        assert!(matches!(err, ImageError::Empty));
    }

    #[test]
    fn missing_file() {
        let err = Image::read("does/not/exist.obj").unwrap_err();
        assert!(matches!(err, ImageError::Io { .. }));
    }
}
