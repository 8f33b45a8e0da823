//! Text commands for interactive play
//!
//! Accepted forms: `<id>`, `tap <id>`, `u`/`undo`, `s`/`show`,
//! `?`/`h`/`help`, `q`/`quit`.

use crate::core::CardId;
use crate::{Result, SolitaireError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Activate(CardId),
    Undo,
    Show,
    Help,
    Quit,
}

impl Command {
    /// Parse one line of user input
    pub fn parse(input: &str) -> Result<Self> {
        let line = input.trim().to_lowercase();
        let mut words = line.split_whitespace();
        let Some(head) = words.next() else {
            return Err(SolitaireError::InvalidCommand("empty input".to_string()));
        };
        let rest: Vec<&str> = words.collect();

        let command = match (head, rest.as_slice()) {
            ("u" | "undo", []) => Command::Undo,
            ("s" | "show", []) => Command::Show,
            ("?" | "h" | "help", []) => Command::Help,
            ("q" | "quit" | "exit", []) => Command::Quit,
            ("t" | "tap", [id]) => Command::Activate(parse_card_id(id)?),
            (id, []) => Command::Activate(parse_card_id(id)?),
            _ => return Err(SolitaireError::InvalidCommand(input.trim().to_string())),
        };
        Ok(command)
    }

    pub fn help_text() -> &'static str {
        "Commands:\n  \
         <id> | tap <id>   activate a card\n  \
         u | undo          undo the last move\n  \
         s | show          show all piles\n  \
         ? | help          show this help\n  \
         q | quit          leave the game"
    }
}

fn parse_card_id(word: &str) -> Result<CardId> {
    word.parse::<u32>()
        .map(CardId::new)
        .map_err(|_| SolitaireError::InvalidCommand(format!("'{word}' is not a card id")))
}
