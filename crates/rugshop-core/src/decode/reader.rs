//! Raster decoding with EXIF orientation handling and a size guard.

use std::io::Cursor;

use exif::{In, Reader, Tag};
use image::{DynamicImage, ImageError, ImageReader, Limits};

use super::{DecodeError, DecodedImage, Orientation};

/// Decode any supported raster format (JPEG, PNG, WebP, GIF, BMP) into RGBA.
///
/// The header is inspected first so images whose longer side exceeds
/// `max_dimension` are rejected before any pixel buffer is allocated.
/// EXIF orientation is applied to the decoded bitmap, matching how browsers
/// draw photos straight off a phone.
///
/// # Errors
///
/// * `DecodeError::InvalidFormat` - the format could not be recognised
/// * `DecodeError::TooLarge` - a side exceeds `max_dimension`
/// * `DecodeError::CorruptedFile` - the data is truncated or malformed
pub fn decode_image(bytes: &[u8], max_dimension: u32) -> Result<DecodedImage, DecodeError> {
    let (width, height) = open_reader(bytes)?
        .into_dimensions()
        .map_err(map_image_error)?;

    if width.max(height) > max_dimension {
        return Err(DecodeError::TooLarge {
            width,
            height,
            max: max_dimension,
        });
    }

    let mut limits = Limits::default();
    limits.max_image_width = Some(max_dimension);
    limits.max_image_height = Some(max_dimension);

    let mut reader = open_reader(bytes)?;
    reader.limits(limits);
    let img = reader.decode().map_err(map_image_error)?;

    let oriented = apply_orientation(img, read_orientation(bytes));
    Ok(DecodedImage::from_rgba_image(oriented.into_rgba8()))
}

fn open_reader(bytes: &[u8]) -> Result<ImageReader<Cursor<&[u8]>>, DecodeError> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    if reader.format().is_none() {
        return Err(DecodeError::InvalidFormat);
    }
    Ok(reader)
}

fn map_image_error(err: ImageError) -> DecodeError {
    match err {
        ImageError::Unsupported(_) => DecodeError::InvalidFormat,
        other => DecodeError::CorruptedFile(other.to_string()),
    }
}

/// Read the EXIF orientation tag, defaulting to `Normal` when absent.
pub fn read_orientation(bytes: &[u8]) -> Orientation {
    let mut cursor = Cursor::new(bytes);

    match Reader::new().read_from_container(&mut cursor) {
        Ok(exif) => exif
            .get_field(Tag::Orientation, In::PRIMARY)
            .and_then(|field| field.value.get_uint(0))
            .map(Orientation::from)
            .unwrap_or_default(),
        Err(_) => Orientation::Normal,
    }
}

fn apply_orientation(img: DynamicImage, orientation: Orientation) -> DynamicImage {
    match orientation {
        Orientation::Normal => img,
        Orientation::FlipHorizontal => img.fliph(),
        Orientation::Rotate180 => img.rotate180(),
        Orientation::FlipVertical => img.flipv(),
        Orientation::Transpose => img.rotate90().fliph(),
        Orientation::Rotate90CW => img.rotate90(),
        Orientation::Transverse => img.rotate270().fliph(),
        Orientation::Rotate270CW => img.rotate270(),
    }
}
