//! Dense per-agent value table over the enumerated state space

use crate::{config::GridConfig, enumerator::StateClass, game::Mark};

/// Estimated win probability per state id, owned by exactly one agent.
///
/// The table is dense over the full encodable domain `[0, 3^(rows*cols))`,
/// so unreachable state ids are valid keys. An out-of-range id is an
/// invariant violation in the encoder, not a runtime condition: lookups
/// index the backing vector directly and panic on it.
#[derive(Debug, Clone)]
pub struct ValueTable {
    values: Vec<f64>,
}

impl ValueTable {
    /// Build the initial assignment from enumerated triples.
    ///
    /// Terminal states won by `mark` start at 1.0. Every other terminal
    /// state starts at 0.0, draws included: treating a draw like a loss is
    /// deliberate and biases the agent away from draws as strongly as from
    /// losses. Non-terminal states start at the neutral prior 0.5.
    pub fn initialize(mark: Mark, triples: &[StateClass], config: &GridConfig) -> Self {
        let mut values = vec![0.0; config.num_states()];
        for triple in triples {
            values[triple.state_id] = if triple.ended {
                if triple.winner == Some(mark) { 1.0 } else { 0.0 }
            } else {
                0.5
            };
        }
        ValueTable { values }
    }

    /// Table with every state at the same value. Useful for tests and
    /// ablations where the enumerated prior is not wanted.
    pub fn constant(config: &GridConfig, value: f64) -> Self {
        ValueTable {
            values: vec![value; config.num_states()],
        }
    }

    pub fn get(&self, state_id: usize) -> f64 {
        self.values[state_id]
    }

    pub fn set(&mut self, state_id: usize, value: f64) {
        self.values[state_id] = value;
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initialize_maps_outcomes() {
        let config = GridConfig::standard();
        let triples = [
            StateClass {
                state_id: 13,
                ended: true,
                winner: Some(Mark::X),
            },
            StateClass {
                state_id: 26,
                ended: true,
                winner: Some(Mark::O),
            },
            StateClass {
                state_id: 100,
                ended: true,
                winner: None,
            },
            StateClass {
                state_id: 7,
                ended: false,
                winner: None,
            },
        ];

        let table = ValueTable::initialize(Mark::X, &triples, &config);
        assert_eq!(table.len(), config.num_states());
        assert_eq!(table.get(13), 1.0);
        assert_eq!(table.get(26), 0.0);
        assert_eq!(table.get(100), 0.0); // draw counted like a loss
        assert_eq!(table.get(7), 0.5);
        assert_eq!(table.get(0), 0.0); // absent from triples

        let table_o = ValueTable::initialize(Mark::O, &triples, &config);
        assert_eq!(table_o.get(13), 0.0);
        assert_eq!(table_o.get(26), 1.0);
    }

    #[test]
    fn test_constant_table() {
        let config = GridConfig::standard();
        let table = ValueTable::constant(&config, 0.5);
        assert_eq!(table.len(), 19683);
        assert_eq!(table.get(0), 0.5);
        assert_eq!(table.get(19682), 0.5);
    }
}
