//! §6 rendering contract: `side` rows of `side` `|`-enclosed cells, each
//! printing its known symbol or a space.

use std::fmt;

use crate::index::symbol_char;
use crate::puzzle::Puzzle;

impl fmt::Display for Puzzle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let side = self.side_length();
        for y in 0..side {
            write!(f, "|")?;
            for x in 0..side {
                let known = (0..side).find(|&z| self.claim_is_true(self.claim(x, y, z)));
                match known {
                    Some(z) => write!(f, "{}|", symbol_char(z))?,
                    None => write!(f, " |")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_known_and_unknown_cells() {
        let mut values = vec![0; 16];
        values[0] = 1;
        let mut puzzle = Puzzle::new(2, &values).unwrap();
        let claim = puzzle.claim(0, 0, 0);
        let mut event = crate::event::SolutionEvent::new("init");
        for c in puzzle.visible_claims(claim) {
            puzzle.falsify(c, &mut event).unwrap();
        }
        event.finish().unwrap();

        let rendered = puzzle.to_string();
        let first_line = rendered.lines().next().unwrap();
        assert!(first_line.starts_with("|1|"));
        assert_eq!(rendered.lines().count(), 4);
    }

    #[test]
    fn empty_grid_renders_all_blank() {
        let puzzle = Puzzle::new(2, &[0; 16]).unwrap();
        let rendered = puzzle.to_string();
        assert!(rendered.lines().all(|line| line == "| | | | |"));
    }
}
