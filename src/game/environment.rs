//! Board environment: authoritative game state and terminal-condition oracle

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
    config::GridConfig,
    error::{Error, Result},
    players::Player,
};

/// A player symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mark {
    X,
    O,
}

impl Mark {
    /// Get the opposing symbol
    pub fn opponent(self) -> Mark {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }

    /// Convert symbol to the cell it occupies
    pub fn to_cell(self) -> Cell {
        match self {
            Mark::X => Cell::X,
            Mark::O => Cell::O,
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mark::X => write!(f, "X"),
            Mark::O => write!(f, "O"),
        }
    }
}

/// A cell on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    X,
    O,
}

impl Cell {
    pub fn to_char(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::X => 'X',
            Cell::O => 'O',
        }
    }

    pub fn from_char(c: char) -> Option<Cell> {
        match c {
            '.' | ' ' => Some(Cell::Empty),
            'X' | 'x' => Some(Cell::X),
            'O' | 'o' | '0' => Some(Cell::O),
            _ => None,
        }
    }

    /// Base-3 digit used by the state encoding: Empty=0, X=1, O=2
    pub fn digit(self) -> usize {
        match self {
            Cell::Empty => 0,
            Cell::X => 1,
            Cell::O => 2,
        }
    }

    fn to_mark(self) -> Option<Mark> {
        match self {
            Cell::X => Some(Mark::X),
            Cell::O => Some(Mark::O),
            Cell::Empty => None,
        }
    }
}

/// Outcome of a game, derived from board contents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Ongoing,
    Win(Mark),
    Draw,
}

/// Authoritative game state: board contents plus the cached terminal verdict.
///
/// One environment is created per game and discarded once the final value
/// updates have been applied. The terminal verdict is memoized once the game
/// ends; ongoing results are never cached.
#[derive(Debug, Clone)]
pub struct Environment {
    config: GridConfig,
    cells: Vec<Cell>,
    winner: Option<Mark>,
    ended: bool,
    render: bool,
}

impl Environment {
    /// Create an empty board.
    pub fn new(config: GridConfig) -> Self {
        Environment {
            config,
            cells: vec![Cell::Empty; config.num_cells()],
            winner: None,
            ended: false,
            render: false,
        }
    }

    /// Create an empty board that prints itself during [`Self::play_game`].
    pub fn with_render(config: GridConfig) -> Self {
        let mut env = Self::new(config);
        env.render = true;
        env
    }

    /// Create a board from a row-major string of cell characters.
    ///
    /// Accepts `.` or space for empty cells and `X`/`O` in either case.
    /// Piece counts are not validated: the enumerable state space includes
    /// boards that legal alternating play can never produce.
    ///
    /// # Errors
    ///
    /// Returns an error when the string is shorter than the board or
    /// contains an unrecognized character.
    pub fn from_marks(config: GridConfig, s: &str) -> Result<Self> {
        let chars: Vec<char> = s.chars().collect();
        if chars.len() < config.num_cells() {
            return Err(Error::InvalidBoardLength {
                expected: config.num_cells(),
                got: chars.len(),
            });
        }

        let mut env = Self::new(config);
        for (i, &c) in chars.iter().take(config.num_cells()).enumerate() {
            env.cells[i] = Cell::from_char(c).ok_or(Error::InvalidCellCharacter {
                character: c,
                position: i,
            })?;
        }
        Ok(env)
    }

    pub fn config(&self) -> GridConfig {
        self.config
    }

    fn checked_index(&self, row: usize, col: usize) -> Result<usize> {
        if !self.config.in_bounds(row, col) {
            return Err(Error::OutOfBounds {
                row,
                col,
                rows: self.config.rows(),
                cols: self.config.cols(),
            });
        }
        Ok(self.config.index(row, col))
    }

    /// Check whether a cell is unoccupied.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] on bad indices (caller error).
    pub fn is_empty(&self, row: usize, col: usize) -> Result<bool> {
        Ok(self.cells[self.checked_index(row, col)?] == Cell::Empty)
    }

    /// All unoccupied cells in row-major order.
    pub fn empty_cells(&self) -> Vec<(usize, usize)> {
        let mut cells = Vec::new();
        for row in 0..self.config.rows() {
            for col in 0..self.config.cols() {
                if self.cells[self.config.index(row, col)] == Cell::Empty {
                    cells.push((row, col));
                }
            }
        }
        cells
    }

    /// Place a mark on the board.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::GameOver`] once a terminal verdict has been
    /// cached, [`Error::OutOfBounds`] on bad indices, and
    /// [`Error::CellOccupied`] when the target cell already holds a mark.
    pub fn place(&mut self, row: usize, col: usize, mark: Mark) -> Result<()> {
        if self.ended {
            return Err(Error::GameOver);
        }
        let idx = self.checked_index(row, col)?;
        if self.cells[idx] != Cell::Empty {
            return Err(Error::CellOccupied { row, col });
        }
        self.cells[idx] = mark.to_cell();
        Ok(())
    }

    /// Scratch-board mutation for the enumerator. Resets the cached verdict
    /// so each combination is classified independently.
    pub(crate) fn set_cell(&mut self, idx: usize, cell: Cell) {
        self.cells[idx] = cell;
        self.ended = false;
        self.winner = None;
    }

    /// Encode the board as a single integer in `[0, 3^(rows*cols))`.
    ///
    /// Each cell contributes a base-3 digit (Empty=0, X=1, O=2) at
    /// positional weight `3^i`, with cells indexed row-major. Pure function
    /// of board contents; the all-empty board encodes to 0.
    pub fn encode_state(&self) -> usize {
        let mut state = 0;
        let mut weight = 1;
        for cell in &self.cells {
            state += weight * cell.digit();
            weight *= 3;
        }
        state
    }

    /// State id the board would have after a hypothetical placement,
    /// computed without mutating the live board.
    ///
    /// # Errors
    ///
    /// Fails on out-of-range indices or an occupied target cell.
    pub fn encode_with(&self, row: usize, col: usize, mark: Mark) -> Result<usize> {
        let idx = self.checked_index(row, col)?;
        if self.cells[idx] != Cell::Empty {
            return Err(Error::CellOccupied { row, col });
        }
        // The empty cell contributes digit 0, so the hypothetical digit
        // is a pure addition at that cell's positional weight.
        Ok(self.encode_state() + 3usize.pow(idx as u32) * mark.to_cell().digit())
    }

    /// Evaluate whether the game has ended, memoizing terminal verdicts.
    ///
    /// Conditions are checked in fixed priority order: each row, each
    /// column, the main diagonal, the anti-diagonal, then board-full (draw).
    /// The first satisfied condition sets the winner and short-circuits, so
    /// boards carrying winning lines for both symbols resolve
    /// deterministically rather than erroring. Ongoing results are not
    /// cached; pass `force` to re-evaluate an already-terminal board.
    pub fn check_terminal(&mut self, force: bool) -> bool {
        if !force && self.ended {
            return true;
        }

        let config = self.config;

        for row in 0..config.rows() {
            let indices = (0..config.cols()).map(|col| config.index(row, col));
            if let Some(mark) = self.line_owner(indices) {
                return self.finish(Some(mark));
            }
        }

        for col in 0..config.cols() {
            let indices = (0..config.rows()).map(|row| config.index(row, col));
            if let Some(mark) = self.line_owner(indices) {
                return self.finish(Some(mark));
            }
        }

        let main_diag = (0..config.rows()).map(|i| config.index(i, i));
        if let Some(mark) = self.line_owner(main_diag) {
            return self.finish(Some(mark));
        }

        let anti_diag = (0..config.rows()).map(|i| config.index(i, config.cols() - 1 - i));
        if let Some(mark) = self.line_owner(anti_diag) {
            return self.finish(Some(mark));
        }

        if !self.cells.contains(&Cell::Empty) {
            return self.finish(None);
        }

        self.ended = false;
        self.winner = None;
        false
    }

    fn finish(&mut self, winner: Option<Mark>) -> bool {
        self.winner = winner;
        self.ended = true;
        true
    }

    /// A line is owned when every cell carries the same non-empty mark.
    fn line_owner(&self, indices: impl Iterator<Item = usize>) -> Option<Mark> {
        let mut owner: Option<Mark> = None;
        for idx in indices {
            let mark = self.cells[idx].to_mark()?;
            match owner {
                None => owner = Some(mark),
                Some(m) if m != mark => return None,
                Some(_) => {}
            }
        }
        owner
    }

    pub fn ended(&self) -> bool {
        self.ended
    }

    pub fn winner(&self) -> Option<Mark> {
        self.winner
    }

    pub fn outcome(&self) -> Outcome {
        if !self.ended {
            Outcome::Ongoing
        } else {
            match self.winner {
                Some(mark) => Outcome::Win(mark),
                None => Outcome::Draw,
            }
        }
    }

    /// Reward for a player at the current state: +1.0 when `mark` is the
    /// winner, -1.0 when the opponent won, 0.0 when ongoing or drawn.
    ///
    /// Only meaningful after [`Self::check_terminal`] has evaluated the
    /// final state.
    pub fn reward(&self, mark: Mark) -> f64 {
        if !self.ended {
            return 0.0;
        }
        match self.winner {
            Some(winner) if winner == mark => 1.0,
            Some(_) => -1.0,
            None => 0.0,
        }
    }

    /// Drive one complete game between two players, `p1` acting first.
    ///
    /// Checks for termination before every ply, lets the acting player
    /// select and apply its move, then reports the resulting state id to
    /// both players. Once terminal, both players receive the final
    /// environment for their value update. Renders the board and result
    /// when the environment was built with [`Self::with_render`].
    ///
    /// # Errors
    ///
    /// Propagates player action failures; a well-formed loop never invokes
    /// a player on a terminal board.
    pub fn play_game(&mut self, p1: &mut dyn Player, p2: &mut dyn Player) -> Result<Outcome> {
        let mut first_to_act = true;

        while !self.check_terminal(false) {
            if self.render {
                println!("\n{self}");
            }

            let current: &mut dyn Player = if first_to_act { p1 } else { p2 };
            current.select_action(self)?;

            // Both players observe every ply: credit assignment walks the
            // shared trajectory, not per-seat turns.
            let state = self.encode_state();
            p1.observe_state(state);
            p2.observe_state(state);

            first_to_act = !first_to_act;
        }

        if self.render {
            println!("\n{self}");
        }

        p1.update_value_function(self);
        p2.update_value_function(self);

        let outcome = self.outcome();
        if self.render {
            match outcome {
                Outcome::Win(mark) => println!("\n{mark} player won!\n"),
                Outcome::Draw => println!("\nIt is a draw!\n"),
                Outcome::Ongoing => {}
            }
        }

        Ok(outcome)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let separator = vec!["-"; self.config.cols()].join("+");
        for row in 0..self.config.rows() {
            if row > 0 {
                writeln!(f, "{separator}")?;
            }
            for col in 0..self.config.cols() {
                if col > 0 {
                    write!(f, "|")?;
                }
                let cell = self.cells[self.config.index(row, col)];
                let c = match cell {
                    Cell::Empty => ' ',
                    _ => cell.to_char(),
                };
                write!(f, "{c}")?;
            }
            if row + 1 < self.config.rows() {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env() -> Environment {
        Environment::new(GridConfig::standard())
    }

    #[test]
    fn test_new_board_is_empty() {
        let env = env();
        for row in 0..3 {
            for col in 0..3 {
                assert!(env.is_empty(row, col).unwrap());
            }
        }
        assert_eq!(env.empty_cells().len(), 9);
        assert!(!env.ended());
        assert_eq!(env.outcome(), Outcome::Ongoing);
    }

    #[test]
    fn test_place_and_occupied() {
        let mut env = env();
        env.place(1, 1, Mark::X).unwrap();
        assert!(!env.is_empty(1, 1).unwrap());

        let err = env.place(1, 1, Mark::O).unwrap_err();
        assert!(matches!(err, Error::CellOccupied { row: 1, col: 1 }));
    }

    #[test]
    fn test_out_of_bounds() {
        let mut env = env();
        assert!(matches!(
            env.place(3, 0, Mark::X),
            Err(Error::OutOfBounds { .. })
        ));
        assert!(matches!(
            env.is_empty(0, 5),
            Err(Error::OutOfBounds { .. })
        ));
    }

    #[test]
    fn test_encode_state_positional_weights() {
        let config = GridConfig::standard();
        assert_eq!(Environment::new(config).encode_state(), 0);

        let mut env = Environment::new(config);
        env.place(0, 0, Mark::X).unwrap();
        assert_eq!(env.encode_state(), 1);

        let mut env = Environment::new(config);
        env.place(0, 0, Mark::O).unwrap();
        assert_eq!(env.encode_state(), 2);

        let mut env = Environment::new(config);
        env.place(0, 1, Mark::X).unwrap();
        assert_eq!(env.encode_state(), 3);

        let mut env = Environment::new(config);
        env.place(2, 2, Mark::O).unwrap();
        assert_eq!(env.encode_state(), 2 * 3usize.pow(8));
    }

    #[test]
    fn test_encode_with_is_pure() {
        let mut env = env();
        env.place(0, 0, Mark::X).unwrap();

        let before = env.encode_state();
        let hypothetical = env.encode_with(1, 1, Mark::O).unwrap();
        assert_eq!(env.encode_state(), before);

        env.place(1, 1, Mark::O).unwrap();
        assert_eq!(env.encode_state(), hypothetical);
    }

    #[test]
    fn test_encode_with_rejects_occupied() {
        let mut env = env();
        env.place(0, 0, Mark::X).unwrap();
        assert!(matches!(
            env.encode_with(0, 0, Mark::O),
            Err(Error::CellOccupied { .. })
        ));
    }

    #[test]
    fn test_win_detection_row() {
        let mut env = Environment::from_marks(GridConfig::standard(), "XXXOO....").unwrap();
        assert!(env.check_terminal(false));
        assert_eq!(env.winner(), Some(Mark::X));
        assert_eq!(env.outcome(), Outcome::Win(Mark::X));
    }

    #[test]
    fn test_win_detection_column() {
        let mut env = Environment::from_marks(GridConfig::standard(), "OX.OX.O..").unwrap();
        assert!(env.check_terminal(false));
        assert_eq!(env.winner(), Some(Mark::O));
    }

    #[test]
    fn test_win_detection_diagonals() {
        let mut env = Environment::from_marks(GridConfig::standard(), "XO..XO..X").unwrap();
        assert!(env.check_terminal(false));
        assert_eq!(env.winner(), Some(Mark::X));

        let mut env = Environment::from_marks(GridConfig::standard(), "X.O.OXO.X").unwrap();
        assert!(env.check_terminal(false));
        assert_eq!(env.winner(), Some(Mark::O));
    }

    #[test]
    fn test_terminal_memoization_and_game_over() {
        let mut env = Environment::from_marks(GridConfig::standard(), "XXXOO....").unwrap();
        assert!(env.check_terminal(false));
        // Cached verdict is reused and further placement is a caller error.
        assert!(env.check_terminal(false));
        assert!(matches!(env.place(2, 2, Mark::O), Err(Error::GameOver)));
    }

    #[test]
    fn test_ongoing_not_cached() {
        let mut env = env();
        env.place(0, 0, Mark::X).unwrap();
        assert!(!env.check_terminal(false));
        assert!(!env.ended());
        assert_eq!(env.winner(), None);
    }

    #[test]
    fn test_reward() {
        let mut env = Environment::from_marks(GridConfig::standard(), "XXXOO....").unwrap();
        env.check_terminal(false);
        assert_eq!(env.reward(Mark::X), 1.0);
        assert_eq!(env.reward(Mark::O), -1.0);

        let mut draw = Environment::from_marks(GridConfig::standard(), "XOXXOXOXO").unwrap();
        draw.check_terminal(false);
        assert!(draw.ended());
        assert_eq!(draw.reward(Mark::X), 0.0);
        assert_eq!(draw.reward(Mark::O), 0.0);

        let ongoing = Environment::new(GridConfig::standard());
        assert_eq!(ongoing.reward(Mark::X), 0.0);
    }

    #[test]
    fn test_display_uses_grid_separators() {
        let env = Environment::from_marks(GridConfig::standard(), "XOX O X O").unwrap();
        assert_eq!(format!("{env}"), "X|O|X\n-+-+-\n |O| \n-+-+-\nX| |O");
    }

    #[test]
    fn test_from_marks_errors() {
        assert!(matches!(
            Environment::from_marks(GridConfig::standard(), "XO"),
            Err(Error::InvalidBoardLength { expected: 9, got: 2 })
        ));
        assert!(matches!(
            Environment::from_marks(GridConfig::standard(), "XOZ......"),
            Err(Error::InvalidCellCharacter { character: 'Z', position: 2 })
        ));
    }
}
