use super::{Disturbance, RippleField};
use crate::bits::most_significant_bit;
use crate::height_field::HeightField;
use crate::texture::{Pixel, TextureSource};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

impl<const BITS: u32> RippleField<BITS> {
    /// Write one impulse into the current buffer: full magnitude at `(x, y)`,
    /// three quarters of it on the four edge neighbours. `x` is the column.
    pub fn spawn_ripple(&mut self, disturbance: Disturbance) {
        let Disturbance { x, y, magnitude } = disturbance;
        log::trace!("ripple impulse {magnitude} at ({x}, {y})");
        let center = magnitude as i16;
        let edge = center.wrapping_sub((magnitude >> 2) as i16);

        let field = &mut self.buffers[self.current];
        field.set(y, x, center);
        field.set(y, x.wrapping_add(1), edge);
        field.set(y, x.wrapping_sub(1), edge);
        field.set(y.wrapping_add(1), x, edge);
        field.set(y.wrapping_sub(1), x, edge);
    }

    /// One damped wave step from the current buffer into the previous one.
    ///
    /// Works on the flattened grid: the loop index `i` runs one row ahead of
    /// the written cell `i - side`, and every read wraps over the whole field.
    /// The last cell of the field is never written.
    pub(crate) fn animate(&mut self) {
        let side = HeightField::<BITS>::SIDE;
        let len = HeightField::<BITS>::LEN;
        let mask = HeightField::<BITS>::LEN_MASK;

        let [a, b] = &mut self.buffers;
        let (src, dst) = if self.current == 0 { (a, b) } else { (b, a) };
        let src = src.cells();
        let dst = dst.cells_mut();

        for i in side..len + side - 1 {
            let sum = src[i.wrapping_sub(2 * side) & mask] as i32
                + src[i.wrapping_sub(side + 1) & mask] as i32
                + src[i.wrapping_sub(side - 1) & mask] as i32
                + src[i & mask] as i32;
            let out = &mut dst[i - side];
            let val = (sum >> 1) - *out as i32;
            *out = (val as i16).wrapping_sub((val >> 6) as i16);
        }
    }

    /// Resample `texture` through the previous buffer into the cache block.
    ///
    /// Each displacement `d` shifts the sample by `d >> 4` texels: forward
    /// horizontally, backward vertically, both wrapping over the texture.
    pub(crate) fn render<T>(&mut self, texture: &T)
    where
        T: TextureSource + ?Sized,
    {
        let (width, height) = (texture.width(), texture.height());
        if width == 0 || height == 0 {
            log::debug!("ripple render skipped for empty {width}x{height} texture");
            return;
        }
        debug_assert!(
            width.is_power_of_two() && height.is_power_of_two(),
            "ripple textures must have power-of-two dimensions"
        );

        let shift = most_significant_bit(width);
        let width_mask = width as i32 - 1;
        let height_mask = height as i32 - 1;
        let side = HeightField::<BITS>::SIDE;
        let source = texture.pixels();
        let heights = self.buffers[self.current ^ 1].cells();

        let render_row = |(row, out): (usize, &mut [Pixel])| {
            let base = row * side;
            for (col, px) in out.iter_mut().enumerate() {
                let i = base + col;
                let offset = (heights[i] >> 4) as i32;
                let u = (i as i32 + offset) & width_mask;
                let v = (row as i32 - offset) & height_mask;
                let texel = ((v as usize) << shift) + u as usize;
                *px = source.get(texel).copied().unwrap_or_default();
            }
        };

        #[cfg(feature = "parallel")]
        self.cache
            .par_chunks_mut(side)
            .enumerate()
            .for_each(render_row);
        #[cfg(not(feature = "parallel"))]
        self.cache.chunks_mut(side).enumerate().for_each(render_row);
    }
}
