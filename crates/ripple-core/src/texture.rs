use std::{error::Error, fmt};

/// Output and texture pixel format of the software rasterizer.
pub type Pixel = u16;

/// Opaque handle the host uses to name a texture.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u32);

/// Row-major image the ripple pass resamples.
///
/// Width and height must be powers of two; sampling wraps with bit masks and
/// garbles the output otherwise.
pub trait TextureSource {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    fn pixels(&self) -> &[Pixel];
}

/// Resolves texture handles to images.
pub trait TextureLookup {
    type Texture: TextureSource;

    fn resolve(&self, handle: TextureHandle) -> Option<&Self::Texture>;
}

impl<T: TextureSource> TextureLookup for [T] {
    type Texture = T;

    fn resolve(&self, handle: TextureHandle) -> Option<&T> {
        self.get(handle.0 as usize)
    }
}

impl<T: TextureSource> TextureLookup for Vec<T> {
    type Texture = T;

    fn resolve(&self, handle: TextureHandle) -> Option<&T> {
        self.as_slice().resolve(handle)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextureError {
    NotPowerOfTwo { width: u32, height: u32 },
    PixelCountMismatch { expected: usize, actual: usize },
}

impl fmt::Display for TextureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextureError::NotPowerOfTwo { width, height } => {
                write!(f, "texture dimensions {width}x{height} must be non-zero powers of two")
            }
            TextureError::PixelCountMismatch { expected, actual } => {
                write!(f, "pixel buffer holds {actual} pixels, expected {expected}")
            }
        }
    }
}

impl Error for TextureError {}

#[derive(Clone, Debug, PartialEq)]
pub struct Image {
    width: u32,
    height: u32,
    pixels: Vec<Pixel>,
}

impl Image {
    pub fn new(width: u32, height: u32, pixels: Vec<Pixel>) -> Result<Self, TextureError> {
        if !width.is_power_of_two() || !height.is_power_of_two() {
            return Err(TextureError::NotPowerOfTwo { width, height });
        }
        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(TextureError::PixelCountMismatch {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Image whose pixel at `(row, col)` is `f(row, col)`.
    pub fn from_fn(
        width: u32,
        height: u32,
        mut f: impl FnMut(u32, u32) -> Pixel,
    ) -> Result<Self, TextureError> {
        let mut pixels = Vec::with_capacity(width as usize * height as usize);
        for row in 0..height {
            for col in 0..width {
                pixels.push(f(row, col));
            }
        }
        Self::new(width, height, pixels)
    }

    /// Two-tone checkerboard with square cells of `cell` pixels.
    pub fn checkerboard(size: u32, cell: u32, dark: Pixel, light: Pixel) -> Result<Self, TextureError> {
        let cell = cell.max(1);
        Self::from_fn(size, size, |row, col| {
            if ((row / cell) + (col / cell)) % 2 == 0 {
                dark
            } else {
                light
            }
        })
    }
}

impl TextureSource for Image {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_power_of_two() {
        assert_eq!(
            Image::new(100, 64, vec![0; 6400]),
            Err(TextureError::NotPowerOfTwo {
                width: 100,
                height: 64
            })
        );
        assert!(Image::new(0, 0, Vec::new()).is_err());
    }

    #[test]
    fn rejects_short_buffer() {
        assert_eq!(
            Image::new(8, 8, vec![0; 10]),
            Err(TextureError::PixelCountMismatch {
                expected: 64,
                actual: 10
            })
        );
    }

    #[test]
    fn from_fn_is_row_major() {
        let img = Image::from_fn(4, 2, |row, col| (row * 10 + col) as Pixel).expect("valid size");
        assert_eq!(img.pixels()[5], 11);
        assert_eq!(img.pixels()[3], 3);
    }

    #[test]
    fn checkerboard_alternates_cells() {
        let img = Image::checkerboard(8, 2, 0, 1).expect("valid size");
        assert_eq!(img.pixels()[0], 0);
        assert_eq!(img.pixels()[2], 1);
        assert_eq!(img.pixels()[2 * 8], 1);
        assert_eq!(img.pixels()[2 * 8 + 2], 0);
    }

    #[test]
    fn slices_resolve_handles_by_index() {
        let images = vec![Image::checkerboard(4, 1, 0, 1).expect("valid size")];
        assert!(images.resolve(TextureHandle(0)).is_some());
        assert!(images.resolve(TextureHandle(1)).is_none());
    }
}
