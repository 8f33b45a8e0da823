//! Level file loader (.json format)
//!
//! ```json
//! {
//!   "Playfield": [ { "CardFace": 12, "CardSuit": 0, "Position": { "x": 250, "y": 1000 } } ],
//!   "Stack":     [ { "CardFace": 2,  "CardSuit": 0, "Position": { "x": 0,   "y": 0 } } ]
//! }
//! ```
//!
//! Missing arrays count as empty. Entries missing a field are skipped.

use crate::core::{Position, Rank, Suit};
use crate::level::{CardConfig, LevelConfig};
use crate::{Result, SolitaireError};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct PositionEntry {
    x: f32,
    y: f32,
}

/// One card as written in the level file
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CardEntry {
    #[serde(rename = "CardFace", default, skip_serializing_if = "Option::is_none")]
    face: Option<i64>,

    #[serde(rename = "CardSuit", default, skip_serializing_if = "Option::is_none")]
    suit: Option<i64>,

    #[serde(rename = "Position", default, skip_serializing_if = "Option::is_none")]
    position: Option<PositionEntry>,
}

impl CardEntry {
    fn is_complete(&self) -> bool {
        self.face.is_some() && self.suit.is_some() && self.position.is_some()
    }

    fn to_config(&self, section: &str, index: usize) -> Result<Option<CardConfig>> {
        let (Some(face), Some(suit), Some(pos)) = (self.face, self.suit, &self.position) else {
            return Ok(None);
        };

        let rank = u8::try_from(face)
            .ok()
            .and_then(Rank::new)
            .ok_or_else(|| {
                SolitaireError::InvalidLevel(format!(
                    "{section}[{index}]: CardFace {face} out of range 0..=12"
                ))
            })?;
        let suit = u8::try_from(suit)
            .ok()
            .and_then(|s| Suit::try_from(s).ok())
            .ok_or_else(|| {
                SolitaireError::InvalidLevel(format!(
                    "{section}[{index}]: CardSuit {suit} out of range 0..=3"
                ))
            })?;

        Ok(Some(CardConfig::new(rank, suit, Position::new(pos.x, pos.y))))
    }
}

impl From<&CardConfig> for CardEntry {
    fn from(card: &CardConfig) -> Self {
        CardEntry {
            face: Some(card.rank.value() as i64),
            suit: Some(u8::from(card.suit) as i64),
            position: Some(PositionEntry {
                x: card.position.x,
                y: card.position.y,
            }),
        }
    }
}

/// A parsed level file
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LevelFile {
    #[serde(rename = "Playfield", default)]
    pub playfield: Vec<CardEntry>,

    #[serde(rename = "Stack", default)]
    pub stack: Vec<CardEntry>,
}

impl LevelFile {
    /// Load a level file from disk
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Load a level file from disk without blocking the runtime
    pub async fn load_async(path: &Path) -> Result<Self> {
        let contents = tokio::fs::read_to_string(path).await?;
        Self::parse(&contents)
    }

    /// Parse a level file from its text content
    pub fn parse(contents: &str) -> Result<Self> {
        Ok(serde_json::from_str(contents)?)
    }

    /// Number of entries that will be dropped for missing fields
    pub fn skipped_entries(&self) -> usize {
        self.playfield
            .iter()
            .chain(self.stack.iter())
            .filter(|entry| !entry.is_complete())
            .count()
    }

    /// Validate the entries and build the level configuration
    pub fn to_config(&self) -> Result<LevelConfig> {
        Ok(LevelConfig {
            playfield: convert_section("Playfield", &self.playfield)?,
            stack: convert_section("Stack", &self.stack)?,
        })
    }

    pub fn from_config(config: &LevelConfig) -> Self {
        LevelFile {
            playfield: config.playfield.iter().map(CardEntry::from).collect(),
            stack: config.stack.iter().map(CardEntry::from).collect(),
        }
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn convert_section(section: &str, entries: &[CardEntry]) -> Result<Vec<CardConfig>> {
    let mut cards = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        if let Some(card) = entry.to_config(section, index)? {
            cards.push(card);
        }
    }
    Ok(cards)
}
