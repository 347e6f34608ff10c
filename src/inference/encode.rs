//! PNG + data-URI framing of a raster snapshot.

use std::io::Cursor;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use image::ImageFormat;

use crate::error::QuickdigitError;
use crate::surface::PixelBuffer;

/// Prefix of every payload produced by [`to_data_uri`].
pub const PNG_DATA_URI_PREFIX: &str = "data:image/png;base64,";

/// Encodes the buffer as an opaque 8-bit RGBA PNG.
pub fn encode_png(buffer: &PixelBuffer) -> Result<Vec<u8>, QuickdigitError> {
    let mut bytes = Vec::new();
    buffer
        .to_rgba()
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .map_err(|source| QuickdigitError::ImageEncode { source })?;
    Ok(bytes)
}

/// Encodes the buffer as `data:image/png;base64,...`.
pub fn to_data_uri(buffer: &PixelBuffer) -> Result<String, QuickdigitError> {
    let png = encode_png(buffer)?;
    Ok(format!("{}{}", PNG_DATA_URI_PREFIX, STANDARD.encode(png)))
}

/// Extracts the PNG bytes from a payload built by [`to_data_uri`].
///
/// Returns `None` for anything that is not a base64 PNG data URI.
pub fn decode_data_uri(uri: &str) -> Option<Vec<u8>> {
    let payload = uri.strip_prefix(PNG_DATA_URI_PREFIX)?;
    STANDARD.decode(payload).ok()
}
