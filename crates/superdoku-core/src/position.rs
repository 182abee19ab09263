//! Board position addressing.

use std::fmt::{self, Display};

/// A cell address on the 9×9 board.
///
/// `x` is the column and `y` the row, both in the range 0-8. The row-major
/// flat index used by the boundary format is `y * 9 + x`.
///
/// # Examples
///
/// ```
/// use superdoku_core::Position;
///
/// let pos = Position::new(4, 2);
/// assert_eq!(pos.x(), 4);
/// assert_eq!(pos.y(), 2);
/// assert_eq!(pos.index(), 22);
/// assert_eq!(pos.box_index(), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    x: u8,
    y: u8,
}

impl Position {
    /// All 81 positions in row-major order.
    ///
    /// `ALL[i]` is the position with flat index `i`. The solver traverses
    /// cells in exactly this order.
    pub const ALL: [Self; 81] = {
        let mut all = [Self { x: 0, y: 0 }; 81];
        let mut i = 0;
        #[expect(clippy::cast_possible_truncation)]
        while i < 81 {
            all[i] = Self {
                x: (i % 9) as u8,
                y: (i / 9) as u8,
            };
            i += 1;
        }
        all
    };

    /// Positions of each row: `ROWS[y][x]` has coordinates `(x, y)`.
    pub const ROWS: [[Self; 9]; 9] = {
        let mut rows = [[Self { x: 0, y: 0 }; 9]; 9];
        let mut y = 0;
        #[expect(clippy::cast_possible_truncation)]
        while y < 9 {
            let mut x = 0;
            while x < 9 {
                rows[y][x] = Self {
                    x: x as u8,
                    y: y as u8,
                };
                x += 1;
            }
            y += 1;
        }
        rows
    };

    /// Positions of each column: `COLUMNS[x][y]` has coordinates `(x, y)`.
    pub const COLUMNS: [[Self; 9]; 9] = {
        let mut columns = [[Self { x: 0, y: 0 }; 9]; 9];
        let mut x = 0;
        #[expect(clippy::cast_possible_truncation)]
        while x < 9 {
            let mut y = 0;
            while y < 9 {
                columns[x][y] = Self {
                    x: x as u8,
                    y: y as u8,
                };
                y += 1;
            }
            x += 1;
        }
        columns
    };

    /// Positions of each 3×3 box, boxes numbered 0-8 left to right, top to
    /// bottom, cells within a box in row-major order.
    pub const BOXES: [[Self; 9]; 9] = {
        let mut boxes = [[Self { x: 0, y: 0 }; 9]; 9];
        let mut b = 0;
        #[expect(clippy::cast_possible_truncation)]
        while b < 9 {
            let mut i = 0;
            while i < 9 {
                boxes[b][i] = Self::from_box(b as u8, i as u8);
                i += 1;
            }
            b += 1;
        }
        boxes
    };

    /// Creates a position from column `x` and row `y`.
    ///
    /// # Panics
    ///
    /// Panics if `x` or `y` is not in the range 0-8.
    #[must_use]
    pub const fn new(x: u8, y: u8) -> Self {
        assert!(x < 9, "x coordinate out of range");
        assert!(y < 9, "y coordinate out of range");
        Self { x, y }
    }

    /// Creates a position from a row-major flat index.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not in the range 0-80.
    #[must_use]
    pub const fn from_index(index: usize) -> Self {
        assert!(index < 81, "flat index out of range");
        #[expect(clippy::cast_possible_truncation)]
        let (x, y) = ((index % 9) as u8, (index / 9) as u8);
        Self { x, y }
    }

    /// Creates a position from a box index and a cell index within the box.
    ///
    /// The box origin is `(3 * (box_index % 3), 3 * (box_index / 3))`; cells
    /// within the box are numbered 0-8 in row-major order from that origin.
    ///
    /// # Panics
    ///
    /// Panics if `box_index` or `cell_index` is not in the range 0-8.
    #[must_use]
    pub const fn from_box(box_index: u8, cell_index: u8) -> Self {
        assert!(box_index < 9, "box index out of range");
        assert!(cell_index < 9, "cell index out of range");
        Self {
            x: (box_index % 3) * 3 + cell_index % 3,
            y: (box_index / 3) * 3 + cell_index / 3,
        }
    }

    /// Returns the column coordinate (0-8).
    #[must_use]
    pub const fn x(self) -> u8 {
        self.x
    }

    /// Returns the row coordinate (0-8).
    #[must_use]
    pub const fn y(self) -> u8 {
        self.y
    }

    /// Returns the row-major flat index (0-80).
    #[must_use]
    pub const fn index(self) -> usize {
        self.y as usize * 9 + self.x as usize
    }

    /// Returns the index of the 3×3 box containing this position (0-8).
    #[must_use]
    pub const fn box_index(self) -> u8 {
        (self.y / 3) * 3 + self.x / 3
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_is_row_major() {
        for (i, pos) in Position::ALL.iter().enumerate() {
            assert_eq!(pos.index(), i);
            assert_eq!(*pos, Position::from_index(i));
        }
        assert_eq!(Position::ALL[0], Position::new(0, 0));
        assert_eq!(Position::ALL[1], Position::new(1, 0));
        assert_eq!(Position::ALL[9], Position::new(0, 1));
        assert_eq!(Position::ALL[80], Position::new(8, 8));
    }

    #[test]
    fn test_unit_tables() {
        for y in 0..9u8 {
            for x in 0..9u8 {
                let pos = Position::new(x, y);
                assert_eq!(Position::ROWS[usize::from(y)][usize::from(x)], pos);
                assert_eq!(Position::COLUMNS[usize::from(x)][usize::from(y)], pos);
            }
        }
        // Every position appears in exactly one box table entry
        for pos in Position::ALL {
            let members = Position::BOXES[usize::from(pos.box_index())];
            assert!(members.contains(&pos));
        }
    }

    #[test]
    fn test_box_index_origins() {
        assert_eq!(Position::new(0, 0).box_index(), 0);
        assert_eq!(Position::new(8, 0).box_index(), 2);
        assert_eq!(Position::new(4, 4).box_index(), 4);
        assert_eq!(Position::new(0, 8).box_index(), 6);
        assert_eq!(Position::new(8, 8).box_index(), 8);

        // from_box round-trips through box_index
        for b in 0..9u8 {
            for i in 0..9u8 {
                let pos = Position::from_box(b, i);
                assert_eq!(pos.box_index(), b);
            }
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(Position::new(3, 7).to_string(), "(3, 7)");
    }

    #[test]
    #[should_panic(expected = "x coordinate out of range")]
    fn test_new_x_out_of_range_panics() {
        let _ = Position::new(9, 0);
    }

    #[test]
    #[should_panic(expected = "y coordinate out of range")]
    fn test_new_y_out_of_range_panics() {
        let _ = Position::new(0, 9);
    }

    #[test]
    #[should_panic(expected = "flat index out of range")]
    fn test_from_index_out_of_range_panics() {
        let _ = Position::from_index(81);
    }

    #[test]
    #[should_panic(expected = "box index out of range")]
    fn test_from_box_out_of_range_panics() {
        let _ = Position::from_box(9, 0);
    }
}
