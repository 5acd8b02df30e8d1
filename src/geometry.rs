//! Matrix geometry and serpentine pixel addressing.
//!
//! The strip snakes through the matrix row by row: even rows run
//! left-to-right, odd rows right-to-left, matching the physical wiring.

/// Pixels in one matrix row
pub const PIXELS_PER_ROW: usize = 8;

/// Number of matrix rows
pub const NUM_ROWS: usize = 6;

/// Total pixels on the matrix
pub const NUM_PIXELS: usize = PIXELS_PER_ROW * NUM_ROWS;

/// Map a (column, row) coordinate to its linear strip index.
///
/// Callers keep coordinates in range; out-of-range input is a contract
/// violation, not a checked error.
pub const fn pixel_index(col: usize, row: usize) -> usize {
    if row.is_multiple_of(2) {
        row * PIXELS_PER_ROW + col
    } else {
        row * PIXELS_PER_ROW + (PIXELS_PER_ROW - 1 - col)
    }
}
