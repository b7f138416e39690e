//! Coordinate arithmetic and linearization.
//!
//! A claim is identified by `(x, y, z)`, each a bounded ordinal in
//! `[0, side)`. This module is the single place that knows how to turn
//! that triple into a dense id and back, and how to locate a cell's box.

/// Largest radix the rendering contract supports (base-36 alphabet).
pub const MAX_RADIX: usize = 36;

/// Linearize `(x, y, z)` into a dense id in `[0, side^3)`.
///
/// `id(x,y,z) = (x*S + y)*S + z` where `S = side`.
#[inline]
pub fn linear_id(x: usize, y: usize, z: usize, side: usize) -> usize {
    (x * side + y) * side + z
}

/// Inverse of [`linear_id`].
#[inline]
pub fn unlinearize(id: usize, side: usize) -> (usize, usize, usize) {
    let z = id % side;
    let rest = id / side;
    let y = rest % side;
    let x = rest / side;
    (x, y, z)
}

/// Index of the box containing cell `(x, y)` in a grid of magnitude `m`.
#[inline]
pub fn box_of(x: usize, y: usize, m: usize) -> usize {
    (y / m) * m + (x / m)
}

/// The `side` cell positions belonging to box `b`, in row-major order.
pub fn box_cells(b: usize, m: usize) -> Vec<(usize, usize)> {
    let side = m * m;
    let box_row = (b / m) * m;
    let box_col = (b % m) * m;
    let mut cells = Vec::with_capacity(side);
    for dy in 0..m {
        for dx in 0..m {
            cells.push((box_col + dx, box_row + dy));
        }
    }
    cells
}

/// Render a 0-based symbol `z` as a 1-based human-readable character, using
/// the base-36 alphabet (`1`-`9`, then `A`-`Z`) for radixes above 10.
pub fn symbol_char(z: usize) -> char {
    let value = z + 1;
    if value >= MAX_RADIX {
        return '?';
    }
    std::char::from_digit(value as u32, MAX_RADIX as u32)
        .unwrap_or('?')
        .to_ascii_uppercase()
}

/// Parse a human-readable symbol character back into a 0-based `z`, or
/// `None` for a blank marker.
pub fn symbol_value(c: char) -> Option<usize> {
    if c == '0' || c.is_whitespace() || c == '.' {
        return None;
    }
    c.to_digit(MAX_RADIX as u32).map(|d| d as usize - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linearize_roundtrip() {
        let side = 9;
        for x in 0..side {
            for y in 0..side {
                for z in 0..side {
                    let id = linear_id(x, y, z, side);
                    assert_eq!(unlinearize(id, side), (x, y, z));
                }
            }
        }
    }

    #[test]
    fn box_of_classic_sudoku() {
        assert_eq!(box_of(0, 0, 3), 0);
        assert_eq!(box_of(3, 0, 3), 1);
        assert_eq!(box_of(0, 3, 3), 3);
        assert_eq!(box_of(8, 8, 3), 8);
    }

    #[test]
    fn box_cells_cover_every_position_once() {
        let m = 3;
        let side = m * m;
        let mut seen = std::collections::HashSet::new();
        for b in 0..side {
            let cells = box_cells(b, m);
            assert_eq!(cells.len(), side);
            for c in cells {
                assert!(seen.insert(c), "cell {:?} covered by more than one box", c);
            }
        }
        assert_eq!(seen.len(), side * side);
    }

    #[test]
    fn symbol_char_roundtrip() {
        for z in 0..16 {
            let c = symbol_char(z);
            assert_eq!(symbol_value(c), Some(z));
        }
    }

    #[test]
    fn symbol_value_blank() {
        assert_eq!(symbol_value('0'), None);
        assert_eq!(symbol_value(' '), None);
    }
}
