//! Ranking aggregation engine.

use std::collections::{BTreeMap, HashMap};

use crate::models::{Game, PlayerName, RankingEntry};

/// Derive the standings table from the roster and the game log.
///
/// Every roster player is listed, with total 0 when they have no wins. A game
/// whose winner is no longer in the roster still accumulates a total under
/// that name, so historical wins of removed or renamed players are not
/// silently dropped. The sort is stable descending by total; ties keep the
/// first-seen order (roster order first, then phantom winners in log order).
pub fn compute_ranking(roster: &[PlayerName], games: &[Game]) -> Vec<RankingEntry> {
    let mut entries: Vec<RankingEntry> = roster
        .iter()
        .map(|player| RankingEntry {
            player: player.clone(),
            total: 0,
        })
        .collect();
    let mut index: HashMap<PlayerName, usize> = entries
        .iter()
        .enumerate()
        .map(|(i, entry)| (entry.player.clone(), i))
        .collect();

    for game in games {
        let slot = *index.entry(game.winner.clone()).or_insert_with(|| {
            entries.push(RankingEntry {
                player: game.winner.clone(),
                total: 0,
            });
            entries.len() - 1
        });
        entries[slot].total += u64::from(game.lines);
    }

    entries.sort_by(|a, b| b.total.cmp(&a.total));
    entries
}

/// Flatten a ranking into the persisted snapshot mapping of name to total.
pub fn ranking_totals(ranking: &[RankingEntry]) -> BTreeMap<PlayerName, u64> {
    ranking
        .iter()
        .map(|entry| (entry.player.clone(), entry.total))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game(id: &str, a: &str, b: &str, lines: u32, winner: &str) -> Game {
        Game {
            id: id.to_string(),
            player_a: a.to_string(),
            player_b: b.to_string(),
            lines,
            winner: winner.to_string(),
        }
    }

    fn roster(names: &[&str]) -> Vec<PlayerName> {
        names.iter().map(|name| name.to_string()).collect()
    }

    #[test]
    fn zero_win_players_are_listed() {
        let ranking = compute_ranking(&roster(&["Ann", "Bo"]), &[]);
        assert_eq!(ranking.len(), 2);
        assert_eq!(ranking[0].player, "Ann");
        assert_eq!(ranking[0].total, 0);
        assert_eq!(ranking[1].player, "Bo");
        assert_eq!(ranking[1].total, 0);
    }

    #[test]
    fn ties_keep_roster_order() {
        let games = [
            game("g1", "Ann", "Bo", 3, "Ann"),
            game("g2", "Ann", "Bo", 5, "Bo"),
            game("g3", "Ann", "Bo", 2, "Ann"),
        ];
        let ranking = compute_ranking(&roster(&["Ann", "Bo"]), &games);
        assert_eq!(ranking[0].player, "Ann");
        assert_eq!(ranking[0].total, 5);
        assert_eq!(ranking[1].player, "Bo");
        assert_eq!(ranking[1].total, 5);
    }

    #[test]
    fn totals_sum_to_total_lines() {
        let games = [
            game("g1", "Ann", "Bo", 3, "Ann"),
            game("g2", "Ann", "Cid", 7, "Cid"),
            game("g3", "Bo", "Cid", 2, "Bo"),
        ];
        let ranking = compute_ranking(&roster(&["Ann", "Bo", "Cid"]), &games);
        let total: u64 = ranking.iter().map(|entry| entry.total).sum();
        let lines: u64 = games.iter().map(|g| u64::from(g.lines)).sum();
        assert_eq!(total, lines);
    }

    #[test]
    fn winner_outside_roster_is_phantom_registered() {
        let games = [game("g1", "Ann", "Gone", 4, "Gone")];
        let ranking = compute_ranking(&roster(&["Ann"]), &games);
        assert_eq!(ranking.len(), 2);
        assert_eq!(ranking[0].player, "Gone");
        assert_eq!(ranking[0].total, 4);
        assert_eq!(ranking[1].player, "Ann");
    }

    #[test]
    fn recomputation_is_idempotent() {
        let games = [game("g1", "Ann", "Bo", 3, "Ann")];
        let names = roster(&["Ann", "Bo"]);
        assert_eq!(
            compute_ranking(&names, &games),
            compute_ranking(&names, &games)
        );
    }

    #[test]
    fn totals_snapshot_maps_names_to_totals() {
        let games = [game("g1", "Ann", "Bo", 3, "Ann")];
        let totals = ranking_totals(&compute_ranking(&roster(&["Ann", "Bo"]), &games));
        assert_eq!(totals.get("Ann"), Some(&3));
        assert_eq!(totals.get("Bo"), Some(&0));
    }
}
