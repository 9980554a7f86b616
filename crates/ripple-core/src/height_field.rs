/// Square toroidal grid of `i16` displacements with side `1 << BITS`.
///
/// Cells are stored row-major. All coordinate access wraps, so any signed
/// `(row, col)` maps to a valid cell.
#[derive(Clone, Debug, PartialEq)]
pub struct HeightField<const BITS: u32> {
    cells: Vec<i16>,
}

impl<const BITS: u32> HeightField<BITS> {
    pub const SIDE: usize = {
        assert!(BITS >= 2 && BITS <= 12, "grid side must be between 4 and 4096");
        1 << BITS
    };
    pub const LEN: usize = Self::SIDE * Self::SIDE;
    pub(crate) const SIDE_MASK: i32 = Self::SIDE as i32 - 1;
    pub(crate) const LEN_MASK: usize = Self::LEN - 1;

    pub fn new() -> Self {
        Self {
            cells: vec![0; Self::LEN],
        }
    }

    /// Flat index of `(row, col)` with both coordinates wrapped.
    #[inline]
    pub fn wrap(row: i32, col: i32) -> usize {
        ((col & Self::SIDE_MASK) + ((row & Self::SIDE_MASK) << BITS)) as usize
    }

    #[inline]
    pub fn get(&self, row: i32, col: i32) -> i16 {
        self.cells[Self::wrap(row, col)]
    }

    #[inline]
    pub fn set(&mut self, row: i32, col: i32, value: i16) {
        self.cells[Self::wrap(row, col)] = value;
    }

    pub fn cells(&self) -> &[i16] {
        &self.cells
    }

    pub(crate) fn cells_mut(&mut self) -> &mut [i16] {
        &mut self.cells
    }

    pub fn clear(&mut self) {
        self.cells.fill(0);
    }

    /// Sum of squared displacements.
    pub fn energy(&self) -> u64 {
        self.cells
            .iter()
            .map(|&v| {
                let v = v as i64;
                (v * v) as u64
            })
            .sum()
    }

    /// Largest absolute displacement.
    pub fn peak(&self) -> u16 {
        self.cells
            .iter()
            .map(|v| v.unsigned_abs())
            .max()
            .unwrap_or(0)
    }
}

impl<const BITS: u32> Default for HeightField<BITS> {
    fn default() -> Self {
        Self::new()
    }
}
