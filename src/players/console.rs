//! Interactive console player

use std::io::{BufRead, Write};

use crate::{
    error::{Error, Result},
    game::{Environment, Mark},
    players::Player,
};

/// Prompts a human for `row,col` moves, re-prompting until a legal one is
/// given. Invalid input never escapes the prompt loop; never learns.
///
/// Generic over its input and output streams so the prompt loop can be
/// exercised in tests.
pub struct ConsolePlayer<R, W> {
    mark: Mark,
    name: String,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> ConsolePlayer<R, W> {
    pub fn new(mark: Mark, input: R, output: W) -> Self {
        ConsolePlayer {
            mark,
            name: format!("Console-{mark}"),
            input,
            output,
        }
    }

    fn parse_move(line: &str) -> Option<(usize, usize)> {
        let (row, col) = line.trim().split_once(',')?;
        Some((row.trim().parse().ok()?, col.trim().parse().ok()?))
    }

    fn read_line(&mut self) -> Result<String> {
        let mut line = String::new();
        let read = self.input.read_line(&mut line)?;
        if read == 0 {
            return Err(Error::Io {
                operation: "read console move".to_string(),
                source: std::io::Error::new(
                    std::io::ErrorKind::UnexpectedEof,
                    "end of input while waiting for a move",
                ),
            });
        }
        Ok(line)
    }
}

impl<R: BufRead, W: Write> Player for ConsolePlayer<R, W> {
    fn mark(&self) -> Mark {
        self.mark
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn select_action(&mut self, env: &mut Environment) -> Result<(usize, usize)> {
        if env.empty_cells().is_empty() {
            return Err(Error::NoValidMoves);
        }

        let max = env.config().rows() - 1;
        loop {
            write!(
                self.output,
                "Enter row,col for your next move (row,col = 0..{max}): "
            )?;
            self.output.flush()?;

            let line = self.read_line()?;
            let Some((row, col)) = Self::parse_move(&line) else {
                writeln!(
                    self.output,
                    "Could not parse that move. Use the form row,col, e.g. 0,2."
                )?;
                continue;
            };

            match env.place(row, col, self.mark) {
                Ok(()) => return Ok((row, col)),
                Err(Error::OutOfBounds { .. }) | Err(Error::CellOccupied { .. }) => {
                    writeln!(
                        self.output,
                        "Move is invalid. Enter the coordinates row,col of an empty cell."
                    )?;
                }
                Err(other) => return Err(other),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;
    use crate::config::GridConfig;

    fn console_with_input(input: &str) -> ConsolePlayer<Cursor<Vec<u8>>, Vec<u8>> {
        ConsolePlayer::new(Mark::O, Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn test_accepts_valid_move() {
        let mut player = console_with_input("1,2\n");
        let mut env = Environment::new(GridConfig::standard());
        assert_eq!(player.select_action(&mut env).unwrap(), (1, 2));
        assert!(!env.is_empty(1, 2).unwrap());
    }

    #[test]
    fn test_reprompts_until_legal() {
        // Garbage, out of range, occupied, then a legal cell.
        let mut player = console_with_input("huh\n5,5\n0,0\n2,2\n");
        let mut env = Environment::new(GridConfig::standard());
        env.place(0, 0, Mark::X).unwrap();

        assert_eq!(player.select_action(&mut env).unwrap(), (2, 2));

        let transcript = String::from_utf8(player.output.clone()).unwrap();
        assert!(transcript.contains("Could not parse"));
        assert!(transcript.contains("Move is invalid"));
    }

    #[test]
    fn test_whitespace_tolerant_parsing() {
        let mut player = console_with_input(" 0 , 1 \n");
        let mut env = Environment::new(GridConfig::standard());
        assert_eq!(player.select_action(&mut env).unwrap(), (0, 1));
    }

    #[test]
    fn test_eof_is_an_io_error() {
        let mut player = console_with_input("");
        let mut env = Environment::new(GridConfig::standard());
        assert!(matches!(
            player.select_action(&mut env),
            Err(Error::Io { .. })
        ));
    }
}
