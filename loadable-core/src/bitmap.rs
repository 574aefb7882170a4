use std::{fmt, io::Cursor, sync::Arc};

use image::{ImageFormat, Rgba, RgbaImage};

use crate::error::Error;

/// Decoded, immutable RGBA bitmap shared between the sender and every view
/// that shows it.
///
/// Never empty: both dimensions are at least one pixel, so every `Image` can
/// be encoded as PNG.
#[derive(Clone)]
pub struct Image(Arc<RgbaImage>);

impl Image {
    pub fn new(buffer: RgbaImage) -> Result<Self, Error> {
        if buffer.width() == 0 || buffer.height() == 0 {
            return Err(Error::EmptyImage {
                width: buffer.width(),
                height: buffer.height(),
            });
        }
        Ok(Self(Arc::new(buffer)))
    }

    /// Returns `None` if `pixels` does not hold exactly `width * height` RGBA
    /// pixels or if the image would be empty.
    pub fn from_raw(width: u32, height: u32, pixels: Vec<u8>) -> Option<Self> {
        RgbaImage::from_raw(width, height, pixels).and_then(|buffer| Self::new(buffer).ok())
    }

    pub fn solid(width: u32, height: u32, color: [u8; 4]) -> Result<Self, Error> {
        Self::new(RgbaImage::from_pixel(width, height, Rgba(color)))
    }

    pub fn from_png(bytes: &[u8]) -> Result<Self, Error> {
        let decoded = image::load_from_memory_with_format(bytes, ImageFormat::Png)?;
        Self::new(decoded.into_rgba8())
    }

    pub fn to_png(&self) -> Result<Vec<u8>, Error> {
        let mut cursor = Cursor::new(Vec::new());
        self.0.write_to(&mut cursor, ImageFormat::Png)?;
        Ok(cursor.into_inner())
    }

    pub fn width(&self) -> u32 {
        self.0.width()
    }

    pub fn height(&self) -> u32 {
        self.0.height()
    }

    pub fn pixels(&self) -> &[u8] {
        self.0.as_raw()
    }

    pub fn as_rgba(&self) -> &RgbaImage {
        &self.0
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for Image {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
            || (self.width() == other.width()
                && self.height() == other.height()
                && self.pixels() == other.pixels())
    }
}

impl Eq for Image {}

impl fmt::Debug for Image {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Image({}x{})", self.width(), self.height())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn png_preserves_pixels() {
        let mut buffer = RgbaImage::new(3, 2);
        buffer.put_pixel(0, 0, Rgba([255, 0, 0, 255]));
        buffer.put_pixel(2, 1, Rgba([0, 0, 255, 128]));
        let image = Image::new(buffer).unwrap();

        let decoded = Image::from_png(&image.to_png().unwrap()).unwrap();

        assert!(!decoded.ptr_eq(&image));
        assert_eq!(decoded, image);
    }

    #[test]
    fn garbage_is_not_a_png() {
        assert!(matches!(
            Image::from_png(b"not a png"),
            Err(Error::ImageDecoding(_))
        ));
    }

    #[test]
    fn raw_size_must_match() {
        assert!(Image::from_raw(2, 2, vec![0; 15]).is_none());
        assert!(Image::from_raw(2, 2, vec![0; 16]).is_some());
    }

    #[test]
    fn empty_images_are_rejected() {
        assert!(matches!(
            Image::solid(0, 0, [0; 4]),
            Err(Error::EmptyImage {
                width: 0,
                height: 0
            })
        ));
        assert!(matches!(
            Image::new(RgbaImage::new(4, 0)),
            Err(Error::EmptyImage { width: 4, height: 0 })
        ));
        assert!(Image::from_raw(0, 3, Vec::new()).is_none());
    }

    #[test]
    fn smallest_image_encodes() {
        let image = Image::solid(1, 1, [1, 2, 3, 4]).unwrap();
        assert_eq!(Image::from_png(&image.to_png().unwrap()).unwrap(), image);
    }
}
