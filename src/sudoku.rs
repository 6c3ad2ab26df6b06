//Sudoku: reduction to CNF, decoding a model back to a grid, and (as ambient
//scaffolding, not part of the DPLL core) puzzle generation and the `.ss`
//on-disk format.
use crate::assignment::{Assignment, VarValue};
use crate::cnf::{Clause, Cnf};
use crate::error::{SolverError, SolverResult};
use log::{debug, info};
use rand::Rng;

pub const SIZE: usize = 9;
pub const CELLS: usize = SIZE * SIZE;
pub const NUM_VARS: usize = SIZE * SIZE * SIZE;
pub const MIN_CLUES: usize = 17;
pub const MAX_HOLES: usize = CELLS - MIN_CLUES;

/// `var(r, c, d) = 81*r + 9*c + d`, for `r, c` in `0..9` and `d` in `1..=9`.
#[inline]
pub fn var(r: usize, c: usize, d: usize) -> i32 {
    (SIZE * SIZE * r + SIZE * c + d) as i32
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cells: [[u8; SIZE]; SIZE],
}

impl Grid {
    pub fn empty() -> Self {
        Grid {
            cells: [[0; SIZE]; SIZE],
        }
    }

    pub fn get(&self, r: usize, c: usize) -> u8 {
        self.cells[r][c]
    }

    pub fn set(&mut self, r: usize, c: usize, digit: u8) {
        self.cells[r][c] = digit;
    }

    pub fn filled_cells(&self) -> usize {
        self.cells.iter().flatten().filter(|&&d| d != 0).count()
    }

    pub fn is_valid_placement(&self, row: usize, col: usize, digit: u8) -> bool {
        for j in 0..SIZE {
            if self.cells[row][j] == digit {
                return false;
            }
        }
        for i in 0..SIZE {
            if self.cells[i][col] == digit {
                return false;
            }
        }
        let box_row = (row / 3) * 3;
        let box_col = (col / 3) * 3;
        for i in box_row..box_row + 3 {
            for j in box_col..box_col + 3 {
                if self.cells[i][j] == digit {
                    return false;
                }
            }
        }
        true
    }

    /// Fills the first empty cell it finds with each candidate digit in
    /// order, recursing, and undoing on failure -- a plain backtracking
    /// solver used only to generate and validate puzzles, never by the DPLL
    /// engine itself.
    pub fn solve_backtrack(&mut self) -> bool {
        for row in 0..SIZE {
            for col in 0..SIZE {
                if self.cells[row][col] != 0 {
                    continue;
                }
                for digit in 1..=9u8 {
                    if self.is_valid_placement(row, col, digit) {
                        self.cells[row][col] = digit;
                        if self.solve_backtrack() {
                            return true;
                        }
                        self.cells[row][col] = 0;
                    }
                }
                return false;
            }
        }
        true
    }

    pub fn has_solution(&self) -> bool {
        self.clone().solve_backtrack()
    }

    /// Generates a complete, valid grid: seed the three diagonal boxes (which
    /// never conflict with each other) with a fixed rotating pattern, then
    /// complete the rest by backtracking.
    pub fn generate_full() -> Self {
        let mut grid = Grid::empty();
        for b in 0..3 {
            let start = b * 3;
            for i in 0..3 {
                for j in 0..3 {
                    let digit = ((i * 3 + j + b * 3) % 9 + 1) as u8;
                    if grid.is_valid_placement(start + i, start + j, digit) {
                        grid.set(start + i, start + j, digit);
                    }
                }
            }
        }
        let solved = grid.solve_backtrack();
        debug_assert!(solved, "diagonal seed must always be completable");
        grid
    }

    /// Digs `holes` cells out of a complete grid one at a time, at random,
    /// keeping the dig only if the grid still has a solution afterward.
    /// Never digs below `MIN_CLUES` remaining filled cells.
    pub fn dig_holes(&mut self, holes: usize, rng: &mut impl Rng) {
        let holes = holes.min(MAX_HOLES);
        let mut dug = 0;
        let mut attempts = 0;
        // Bounded by attempts as well as target count: once few enough
        // filled cells remain, a random pick keeps landing on empties.
        while dug < holes && attempts < holes * 200 + 1000 {
            attempts += 1;
            let row = rng.gen_range(0..SIZE);
            let col = rng.gen_range(0..SIZE);
            if self.cells[row][col] == 0 {
                continue;
            }
            let original = self.cells[row][col];
            self.cells[row][col] = 0;
            if self.has_solution() {
                dug += 1;
                debug!("dug hole at ({}, {}), {} remaining", row, col, dug);
            } else {
                self.cells[row][col] = original;
            }
        }
        info!(
            "puzzle created with {} holes ({} clues remaining)",
            dug,
            self.filled_cells()
        );
    }

    pub fn to_ss(&self) -> String {
        let mut out = String::with_capacity(SIZE * (SIZE + 1));
        for row in &self.cells {
            for &d in row {
                out.push(if d == 0 { '%' } else { (b'0' + d) as char });
            }
            out.push('\n');
        }
        out
    }

    pub fn from_ss(text: &str) -> SolverResult<Self> {
        let lines: Vec<&str> = text.lines().filter(|l| !l.is_empty()).collect();
        if lines.len() != SIZE {
            return Err(SolverError::MalformedGrid { lines: lines.len() });
        }
        let mut grid = Grid::empty();
        for (r, line) in lines.iter().enumerate() {
            let chars: Vec<char> = line.chars().collect();
            if chars.len() != SIZE {
                return Err(SolverError::MalformedRow { row: r, chars: chars.len() });
            }
            for (c, &ch) in chars.iter().enumerate() {
                match ch {
                    '%' => grid.set(r, c, 0),
                    '1'..='9' => grid.set(r, c, ch as u8 - b'0'),
                    other => return Err(SolverError::InvalidCell { line: r, ch: other }),
                }
            }
        }
        Ok(grid)
    }
}

fn push_at_most_one(cnf: &mut Cnf, vars: &[i32]) {
    for i in 0..vars.len() {
        for j in (i + 1)..vars.len() {
            cnf.add_clause(Clause::new(vec![-vars[i], -vars[j]]));
        }
    }
}

/// Emits the four families of exactly-one constraints (cell, row, column,
/// box) plus one unit clause per hint.
pub fn encode(grid: &Grid) -> Cnf {
    let mut cnf = Cnf::new(NUM_VARS);

    // Cell constraints: each (r, c) holds exactly one digit.
    for r in 0..SIZE {
        for c in 0..SIZE {
            let vars: Vec<i32> = (1..=9).map(|d| var(r, c, d)).collect();
            cnf.add_clause(Clause::new(vars.clone()));
            push_at_most_one(&mut cnf, &vars);
        }
    }

    // Row constraints: each row holds every digit exactly once.
    for r in 0..SIZE {
        for d in 1..=9 {
            let vars: Vec<i32> = (0..SIZE).map(|c| var(r, c, d)).collect();
            cnf.add_clause(Clause::new(vars.clone()));
            push_at_most_one(&mut cnf, &vars);
        }
    }

    // Column constraints: symmetric to rows.
    for c in 0..SIZE {
        for d in 1..=9 {
            let vars: Vec<i32> = (0..SIZE).map(|r| var(r, c, d)).collect();
            cnf.add_clause(Clause::new(vars.clone()));
            push_at_most_one(&mut cnf, &vars);
        }
    }

    // Box constraints: each of the nine 3x3 boxes holds every digit exactly once.
    for box_row in 0..3 {
        for box_col in 0..3 {
            for d in 1..=9 {
                let mut vars = Vec::with_capacity(9);
                for i in 0..3 {
                    for j in 0..3 {
                        vars.push(var(box_row * 3 + i, box_col * 3 + j, d));
                    }
                }
                cnf.add_clause(Clause::new(vars.clone()));
                push_at_most_one(&mut cnf, &vars);
            }
        }
    }

    // Hints: one unit clause per filled cell in the input grid.
    for r in 0..SIZE {
        for c in 0..SIZE {
            let d = grid.get(r, c);
            if d != 0 {
                cnf.add_clause(Clause::new(vec![var(r, c, d as usize)]));
            }
        }
    }

    info!(
        "sudoku encoded to CNF: {} variables, {} clauses",
        cnf.num_vars(),
        cnf.num_clauses()
    );
    cnf
}

/// Reads the unique true digit out of each cell's nine variables. The
/// encoding guarantees exactly one `True` per cell; an assignment with none
/// or more than one (which soundness rules out) leaves the cell at 0.
pub fn decode(model: &Assignment) -> Grid {
    let mut grid = Grid::empty();
    for r in 0..SIZE {
        for c in 0..SIZE {
            for d in 1..=9 {
                if model.get(var(r, c, d) as usize) == VarValue::True {
                    grid.set(r, c, d as u8);
                    break;
                }
            }
        }
    }
    grid
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dpll::{DpllSolver, Verdict};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn var_numbering_matches_the_var_formula() {
        assert_eq!(var(0, 0, 1), 1);
        assert_eq!(var(0, 0, 9), 9);
        assert_eq!(var(8, 8, 9), 729);
    }

    #[test]
    fn ss_round_trip() {
        let mut grid = Grid::empty();
        grid.set(0, 0, 5);
        let text = grid.to_ss();
        let back = Grid::from_ss(&text).unwrap();
        assert_eq!(back.get(0, 0), 5);
        assert_eq!(back.get(0, 1), 0);
    }

    #[test]
    fn from_ss_rejects_wrong_line_count() {
        assert!(matches!(
            Grid::from_ss("%%%%%%%%%\n"),
            Err(SolverError::MalformedGrid { .. })
        ));
    }

    #[test]
    fn single_hint_is_sat_and_preserves_the_hint() {
        let mut grid = Grid::empty();
        grid.set(0, 0, 5);
        let cnf = encode(&grid);
        let (verdict, _) = DpllSolver::new(cnf).solve();
        let Verdict::Sat(model) = verdict else {
            panic!("expected SAT")
        };
        let solved = decode(&model);
        assert_eq!(solved.get(0, 0), 5);
        for row in 0..SIZE {
            let mut seen = [false; 10];
            for col in 0..SIZE {
                let d = solved.get(row, col) as usize;
                assert!(d >= 1 && d <= 9, "cell ({row},{col}) undetermined");
                assert!(!seen[d], "digit {d} repeats in row {row}");
                seen[d] = true;
            }
        }
    }

    #[test]
    fn conflicting_hints_in_a_row_are_unsat() {
        let mut grid = Grid::empty();
        grid.set(0, 0, 5);
        grid.set(0, 1, 5);
        let cnf = encode(&grid);
        let (verdict, _) = DpllSolver::new(cnf).solve();
        assert!(!verdict.is_sat());
    }

    #[test]
    fn a_complete_valid_grid_encodes_to_a_satisfiable_cnf() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut grid = Grid::generate_full();
        grid.dig_holes(0, &mut rng);
        let cnf = encode(&grid);
        let (verdict, _) = DpllSolver::new(cnf).solve();
        assert!(verdict.is_sat());
    }

    #[test]
    fn generated_puzzle_never_drops_below_the_minimum_clue_count() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut grid = Grid::generate_full();
        grid.dig_holes(MAX_HOLES + 50, &mut rng);
        assert!(grid.filled_cells() >= MIN_CLUES);
    }
}
