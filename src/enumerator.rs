//! Exhaustive enumeration of the board state space
//!
//! Every combination of cell contents is visited exactly once and classified
//! with the same terminal-detection rules the live environment uses. The
//! output seeds per-agent value tables before any training happens.

use crate::{
    config::GridConfig,
    game::{Cell, Environment, Mark},
};

/// Classification of one enumerated cell combination
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateClass {
    pub state_id: usize,
    pub ended: bool,
    pub winner: Option<Mark>,
}

/// Enumerates all `3^(rows*cols)` cell combinations over a scratch board.
///
/// Combinations unreachable in real play, such as winning lines for both
/// symbols at once, are still classified; the terminal scan resolves them by
/// its fixed priority order. No deduplication by rotation or reflection is
/// performed, and traversal order carries no meaning.
pub struct StateEnumerator {
    config: GridConfig,
}

impl StateEnumerator {
    pub fn new(config: GridConfig) -> Self {
        StateEnumerator { config }
    }

    /// Produce the complete set of (state id, ended, winner) triples.
    pub fn enumerate_all(&self) -> Vec<StateClass> {
        let mut scratch = Environment::new(self.config);
        let mut results = Vec::with_capacity(self.config.num_states());
        self.visit(&mut scratch, 0, &mut results);
        results
    }

    /// Recursive fixed-position enumeration: try all three cell values at
    /// `idx`, recursing on the remaining cells, classifying at the leaves.
    fn visit(&self, scratch: &mut Environment, idx: usize, out: &mut Vec<StateClass>) {
        if idx == self.config.num_cells() {
            let state_id = scratch.encode_state();
            let ended = scratch.check_terminal(true);
            out.push(StateClass {
                state_id,
                ended,
                winner: scratch.winner(),
            });
            return;
        }

        for cell in [Cell::Empty, Cell::X, Cell::O] {
            scratch.set_cell(idx, cell);
            self.visit(scratch, idx + 1, out);
        }
    }
}
