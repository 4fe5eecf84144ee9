use crate::Float;

/**
 * Per photo grid of `cell_size` x `cell_size` pixel cells. Every cell stores indices into the
 * registry's patch collection of the patches projecting into it.
 */
#[derive(Debug,Clone)]
pub struct CellGrid {
    cell_size: usize,
    rows: usize,
    cols: usize,
    cells: Vec<Vec<usize>>
}

impl CellGrid {
    pub fn new(width: usize, height: usize, cell_size: usize) -> CellGrid {
        assert!(cell_size > 0, "cell size has to be positive");
        let rows = (height + cell_size - 1)/cell_size;
        let cols = (width + cell_size - 1)/cell_size;
        CellGrid{cell_size, rows, cols, cells: vec![Vec::new(); rows*cols]}
    }

    pub fn cell_size(&self) -> usize {
        self.cell_size
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /**
     * Cell (row, col) containing the pixel (y,x), i.e. floor(pixel / cell_size). None outside the grid.
     */
    pub fn cell_of(&self, y: Float, x: Float) -> Option<(usize,usize)> {
        let size = self.cell_size as Float;
        let row = (y/size).floor();
        let col = (x/size).floor();
        match row >= 0.0 && col >= 0.0 && row < self.rows as Float && col < self.cols as Float {
            true => Some((row as usize, col as usize)),
            false => None
        }
    }

    pub fn patches(&self, row: usize, col: usize) -> &[usize] {
        &self.cells[row*self.cols + col]
    }

    pub fn patches_at_pixel(&self, y: Float, x: Float) -> &[usize] {
        match self.cell_of(y, x) {
            Some((r,c)) => self.patches(r, c),
            None => &[]
        }
    }

    /**
     * Returns the cell the patch was added to, None if the pixel lies outside the grid.
     */
    pub fn insert(&mut self, y: Float, x: Float, patch_index: usize) -> Option<(usize,usize)> {
        let (row, col) = self.cell_of(y, x)?;
        self.cells[row*self.cols + col].push(patch_index);
        Some((row, col))
    }

    pub fn patch_count(&self) -> usize {
        self.cells.iter().map(|c| c.len()).sum()
    }
}
