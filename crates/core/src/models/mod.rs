//! Shared domain models.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Player identity is the trimmed display name; there is no separate id.
pub type PlayerName = String;

/// One atomic scoring event between two players.
///
/// Games are immutable once recorded and live in an append-only log,
/// most recent first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    /// Opaque unique token.
    pub id: String,
    /// First participant.
    #[serde(rename = "playerA")]
    pub player_a: PlayerName,
    /// Second participant, always distinct from the first.
    #[serde(rename = "playerB")]
    pub player_b: PlayerName,
    /// Magnitude of the result, at least 1.
    pub lines: u32,
    /// The participant who won; equals `player_a` or `player_b`.
    pub winner: PlayerName,
}

/// Reduced form of a [`Game`] carried inside a [`Match`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResult {
    /// Opaque unique token.
    pub id: String,
    /// Winner of the underlying game.
    pub winner: PlayerName,
}

/// One sub-contest inside a [`Session`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    /// Opaque unique token.
    pub id: String,
    /// Ordered results of the games played in this match.
    #[serde(default)]
    pub games: Vec<GameResult>,
    /// Overall match winner, if one has been declared. Must be one of the
    /// session's two players.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub winner: Option<PlayerName>,
}

/// A dated pairing of two players that accumulates matches over time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Opaque unique token.
    pub id: String,
    /// Calendar date in `YYYY-MM-DD` form, no time component.
    #[serde(rename = "dateISO")]
    pub date_iso: String,
    /// First participant, fixed at creation.
    #[serde(rename = "playerA")]
    pub player_a: PlayerName,
    /// Second participant, fixed at creation and distinct from the first.
    #[serde(rename = "playerB")]
    pub player_b: PlayerName,
    /// Matches played so far, append-only.
    #[serde(default)]
    pub matches: Vec<Match>,
}

/// One row of the derived standings table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankingEntry {
    /// Player the total belongs to.
    pub player: PlayerName,
    /// Sum of `lines` over all games this player won.
    pub total: u64,
}

/// UI color scheme preference, persisted as the bare `light`/`dark` strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorScheme {
    /// Light scheme (the default).
    #[default]
    Light,
    /// Dark scheme.
    Dark,
}

impl ColorScheme {
    /// Stable string form used for persistence.
    pub fn as_str(self) -> &'static str {
        match self {
            ColorScheme::Light => "light",
            ColorScheme::Dark => "dark",
        }
    }
}

impl fmt::Display for ColorScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColorScheme {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "light" => Ok(ColorScheme::Light),
            "dark" => Ok(ColorScheme::Dark),
            _ => Err(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn game_uses_wire_field_names() {
        let game = Game {
            id: "g-1".into(),
            player_a: "Ann".into(),
            player_b: "Bo".into(),
            lines: 3,
            winner: "Ann".into(),
        };
        let value = serde_json::to_value(&game).unwrap();
        assert_eq!(
            value,
            json!({
                "id": "g-1",
                "playerA": "Ann",
                "playerB": "Bo",
                "lines": 3,
                "winner": "Ann",
            })
        );
    }

    #[test]
    fn match_winner_is_omitted_when_absent() {
        let m = Match {
            id: "m-1".into(),
            games: vec![GameResult {
                id: "g-1".into(),
                winner: "Ann".into(),
            }],
            winner: None,
        };
        let value = serde_json::to_value(&m).unwrap();
        assert!(value.get("winner").is_none());

        let parsed: Match = serde_json::from_value(json!({"id": "m-2"})).unwrap();
        assert!(parsed.games.is_empty());
        assert!(parsed.winner.is_none());
    }

    #[test]
    fn session_round_trips_date_iso() {
        let session = Session {
            id: "s-1".into(),
            date_iso: "2024-01-01".into(),
            player_a: "Ann".into(),
            player_b: "Bo".into(),
            matches: Vec::new(),
        };
        let text = serde_json::to_string(&session).unwrap();
        assert!(text.contains("\"dateISO\":\"2024-01-01\""));
        let parsed: Session = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, session);
    }

    #[test]
    fn color_scheme_round_trips() {
        assert_eq!("light".parse(), Ok(ColorScheme::Light));
        assert_eq!("dark".parse(), Ok(ColorScheme::Dark));
        assert!("sepia".parse::<ColorScheme>().is_err());
        assert_eq!(ColorScheme::Dark.to_string(), "dark");
        assert_eq!(ColorScheme::default(), ColorScheme::Light);
    }
}
