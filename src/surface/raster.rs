//! The fixed-size single-channel raster behind a drawing surface.

use image::{DynamicImage, GrayImage, ImageBuffer, Luma, RgbaImage};

/// An N×N grayscale raster, filled with a background intensity.
///
/// The side length is fixed at construction. Only the surface that owns the
/// buffer mutates it; everyone else sees it through `&PixelBuffer` or an
/// owned clone taken as a snapshot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    image: GrayImage,
    background: u8,
}

impl PixelBuffer {
    /// Allocates a `side × side` buffer filled with `background`.
    pub fn new(side: u32, background: u8) -> Self {
        Self {
            image: GrayImage::from_pixel(side, side, Luma([background])),
            background,
        }
    }

    #[inline]
    pub fn side(&self) -> u32 {
        self.image.width()
    }

    /// Intensity at cell `(x, y)`, or `None` outside the grid.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Option<u8> {
        self.image.get_pixel_checked(x, y).map(|p| p.0[0])
    }

    #[inline]
    pub(crate) fn put(&mut self, x: u32, y: u32, value: u8) {
        self.image.put_pixel(x, y, Luma([value]));
    }

    /// Raw row-major intensities, `side * side` bytes.
    #[inline]
    pub fn as_raw(&self) -> &[u8] {
        self.image.as_raw()
    }

    #[inline]
    pub fn as_image(&self) -> &GrayImage {
        &self.image
    }

    /// Resets every cell to the background value in one pass.
    pub fn clear(&mut self) {
        let background = self.background;
        self.image
            .pixels_mut()
            .for_each(|pixel| *pixel = Luma([background]));
    }

    /// Returns true if every cell still holds the background value.
    pub fn is_blank(&self) -> bool {
        self.image.as_raw().iter().all(|&v| v == self.background)
    }

    /// Cells whose intensity differs from the background, in row-major order.
    pub fn modified_cells(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.image
            .enumerate_pixels()
            .filter(|(_, _, pixel)| pixel.0[0] != self.background)
            .map(|(x, y, _)| (x, y))
    }

    /// Opaque RGBA copy, the layout a browser canvas exports.
    pub fn to_rgba(&self) -> RgbaImage {
        DynamicImage::ImageLuma8(self.image.clone()).to_rgba8()
    }

    /// Nearest-neighbour magnification: every logical cell becomes a crisp
    /// `scale × scale` block, with no smoothing between cells.
    ///
    /// `None` if `scale` is 0 or the magnified side does not fit in a `u32`.
    pub fn magnify(&self, scale: u32) -> Option<GrayImage> {
        if scale == 0 {
            return None;
        }
        let shown = self.side().checked_mul(scale)?;
        Some(ImageBuffer::from_fn(shown, shown, |x, y| {
            *self.image.get_pixel(x / scale, y / scale)
        }))
    }
}
