//! Domain model facade and session/match repository.
//!
//! A [`Tracker`] owns the roster, the game log, the session list, the color
//! scheme preference, and the selection slots. Frontends construct exactly
//! one per process, drive every mutation through it, and re-query state after
//! each call; there are no hidden singletons.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{NaiveDate, Utc};
use thiserror::Error;
use tracing::{debug, warn};

use crate::{
    models::{ColorScheme, Game, Match, PlayerName, RankingEntry, Session},
    ranking::{compute_ranking, ranking_totals},
    selection::PairSelection,
    store::{keys, KvStore, StoreKey},
};

/// Business-rule violation reported by a mutating operation.
///
/// Rejections are ordinary values, never panics: the caller re-prompts and
/// no partial mutation has occurred.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    /// Player name was empty after trimming.
    #[error("player name is blank")]
    BlankName,
    /// The trimmed name is already on the roster (exact, case-sensitive).
    #[error("player {0:?} is already registered")]
    DuplicateName(PlayerName),
    /// Both participants of a game or session were the same player.
    #[error("both participants are {0:?}; two distinct players are required")]
    SamePlayer(PlayerName),
    /// A game's magnitude must be at least 1.
    #[error("lines must be at least 1")]
    InvalidLines,
    /// The declared winner is not one of the two participants.
    #[error("winner {0:?} is not one of the participants")]
    WinnerNotPlaying(PlayerName),
    /// A session participant is not on the roster.
    #[error("player {0:?} is not registered")]
    UnknownPlayer(PlayerName),
    /// The session date is missing or not a `YYYY-MM-DD` calendar date.
    #[error("invalid session date {0:?}")]
    InvalidDate(String),
    /// No session exists under the given id.
    #[error("no session with id {0:?}")]
    SessionNotFound(String),
}

static ID_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Generate a process-unique opaque identifier with the given prefix.
///
/// Combines a UTC timestamp with a process-local counter, so ids stay unique
/// across restarts as well as within a run.
pub fn next_id(prefix: &str) -> String {
    let seq = ID_COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("{prefix}-{}-{seq:04}", Utc::now().format("%Y%m%d%H%M%S%3f"))
}

/// The single in-memory domain model instance, bound to its store.
///
/// Every successful mutation writes the affected collections through to the
/// store before returning; roster and game-log changes additionally refresh
/// the persisted ranking snapshot. Persistence failures are logged and
/// swallowed, since the store only caches the tracker's own state.
#[derive(Debug)]
pub struct Tracker<S: KvStore> {
    store: S,
    players: Vec<PlayerName>,
    games: Vec<Game>,
    sessions: Vec<Session>,
    scheme: ColorScheme,
    selection: PairSelection,
}

impl<S: KvStore> Tracker<S> {
    /// Load the tracker state from the store.
    ///
    /// Each field resolves through the migration policy (current key, then
    /// legacy key, then empty default); malformed stored text is treated as
    /// absent.
    pub fn load(store: S) -> Self {
        let players: Vec<PlayerName> = keys::PLAYERS.read_json(&store).unwrap_or_default();
        let games: Vec<Game> = keys::GAMES.read_json(&store).unwrap_or_default();
        let sessions: Vec<Session> = keys::SESSIONS.read_json(&store).unwrap_or_default();
        let scheme = keys::SCHEME
            .read(&store)
            .and_then(|text| text.trim().parse().ok())
            .unwrap_or_default();
        debug!(
            players = players.len(),
            games = games.len(),
            sessions = sessions.len(),
            "loaded tracker state"
        );
        Self {
            store,
            players,
            games,
            sessions,
            scheme,
            selection: PairSelection::new(),
        }
    }

    /// The registered players, in registration order.
    pub fn players(&self) -> &[PlayerName] {
        &self.players
    }

    /// The game log, most recent first.
    pub fn games(&self) -> &[Game] {
        &self.games
    }

    /// The sessions, most recently created first.
    pub fn sessions(&self) -> &[Session] {
        &self.sessions
    }

    /// Current standings, recomputed from roster and game log on every call.
    /// The persisted snapshot is write-only and never read back here.
    pub fn ranking(&self) -> Vec<RankingEntry> {
        compute_ranking(&self.players, &self.games)
    }

    /// Current color scheme preference.
    pub fn scheme(&self) -> ColorScheme {
        self.scheme
    }

    /// Borrow the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Current state of the two player-pick slots.
    pub fn selection(&self) -> &PairSelection {
        &self.selection
    }

    /// Set or clear selection slot A, clearing slot B on collision.
    pub fn select_a(&mut self, value: Option<PlayerName>) {
        self.selection.set_a(value);
    }

    /// Set or clear selection slot B, clearing slot A on collision.
    pub fn select_b(&mut self, value: Option<PlayerName>) {
        self.selection.set_b(value);
    }

    /// Register a new player under their trimmed name.
    ///
    /// Blank names and exact duplicates are rejected; registration order is
    /// preserved because it drives display order and the ranking tie-break.
    pub fn register_player(&mut self, name: &str) -> Result<(), Rejection> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Rejection::BlankName);
        }
        if self.players.iter().any(|existing| existing == name) {
            return Err(Rejection::DuplicateName(name.to_string()));
        }
        self.players.push(name.to_string());
        debug!(player = name, "registered player");
        self.persist_players();
        self.persist_ranking_snapshot();
        Ok(())
    }

    /// Record one scoring event and return its freshly generated id.
    ///
    /// The game is prepended to the log, so [`Tracker::games`] yields the
    /// most recent game first.
    pub fn record_game(
        &mut self,
        player_a: &str,
        player_b: &str,
        lines: u32,
        winner: &str,
    ) -> Result<String, Rejection> {
        if player_a == player_b {
            return Err(Rejection::SamePlayer(player_a.to_string()));
        }
        if lines < 1 {
            return Err(Rejection::InvalidLines);
        }
        if winner != player_a && winner != player_b {
            return Err(Rejection::WinnerNotPlaying(winner.to_string()));
        }
        let game = Game {
            id: next_id("g"),
            player_a: player_a.to_string(),
            player_b: player_b.to_string(),
            lines,
            winner: winner.to_string(),
        };
        let id = game.id.clone();
        self.games.insert(0, game);
        debug!(id = %id, winner, lines, "recorded game");
        self.persist_games();
        self.persist_ranking_snapshot();
        Ok(id)
    }

    /// Create a session between two distinct roster players on a calendar
    /// date, returning its id.
    ///
    /// The session starts with no matches and is prepended to the session
    /// list. On success the selection slots are reset so the next pairing
    /// starts from a clean slate.
    pub fn create_session(
        &mut self,
        player_a: &str,
        player_b: &str,
        date_iso: &str,
    ) -> Result<String, Rejection> {
        for player in [player_a, player_b] {
            if !self.players.iter().any(|existing| existing == player) {
                return Err(Rejection::UnknownPlayer(player.to_string()));
            }
        }
        if player_a == player_b {
            return Err(Rejection::SamePlayer(player_a.to_string()));
        }
        if NaiveDate::parse_from_str(date_iso, "%Y-%m-%d").is_err() {
            return Err(Rejection::InvalidDate(date_iso.to_string()));
        }
        let session = Session {
            id: next_id("s"),
            date_iso: date_iso.to_string(),
            player_a: player_a.to_string(),
            player_b: player_b.to_string(),
            matches: Vec::new(),
        };
        let id = session.id.clone();
        self.sessions.insert(0, session);
        debug!(id = %id, player_a, player_b, date_iso, "created session");
        self.persist_sessions();
        self.selection.clear();
        Ok(id)
    }

    /// Append a match to an existing session.
    ///
    /// A declared match winner must be one of the session's two players.
    pub fn append_match(&mut self, session_id: &str, game_match: Match) -> Result<(), Rejection> {
        let session = self
            .sessions
            .iter_mut()
            .find(|session| session.id == session_id)
            .ok_or_else(|| Rejection::SessionNotFound(session_id.to_string()))?;
        if let Some(winner) = &game_match.winner {
            if winner != &session.player_a && winner != &session.player_b {
                return Err(Rejection::WinnerNotPlaying(winner.clone()));
            }
        }
        session.matches.push(game_match);
        debug!(session = session_id, "appended match");
        self.persist_sessions();
        Ok(())
    }

    /// Update the color scheme preference and persist it.
    pub fn set_scheme(&mut self, scheme: ColorScheme) {
        self.scheme = scheme;
        if let Err(err) = keys::SCHEME.write(&mut self.store, scheme.as_str()) {
            warn!("Failed to persist color scheme: {err:#}");
        }
    }

    fn persist_players(&mut self) {
        match serde_json::to_string(&self.players) {
            Ok(text) => self.persist(keys::PLAYERS, &text),
            Err(err) => warn!("Failed to encode roster: {err}"),
        }
    }

    fn persist_games(&mut self) {
        match serde_json::to_string(&self.games) {
            Ok(text) => self.persist(keys::GAMES, &text),
            Err(err) => warn!("Failed to encode game log: {err}"),
        }
    }

    fn persist_sessions(&mut self) {
        match serde_json::to_string(&self.sessions) {
            Ok(text) => self.persist(keys::SESSIONS, &text),
            Err(err) => warn!("Failed to encode sessions: {err}"),
        }
    }

    fn persist_ranking_snapshot(&mut self) {
        let totals = ranking_totals(&self.ranking());
        match serde_json::to_string(&totals) {
            Ok(text) => self.persist(keys::RANKING_TOTALS, &text),
            Err(err) => warn!("Failed to encode ranking snapshot: {err}"),
        }
    }

    fn persist(&mut self, key: StoreKey, text: &str) {
        if let Err(err) = key.write(&mut self.store, text) {
            warn!("Failed to persist {:?}: {err:#}", key.current);
        }
    }
}
