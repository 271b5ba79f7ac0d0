use std::collections::HashMap;
use uuid::Uuid;

use crate::models::matches::{Match, TeamStanding};
use crate::models::team::Team;

pub const POINTS_FOR_WIN: u32 = 3;
pub const POINTS_FOR_DRAW: u32 = 1;

/// Build a table from completed matches.
///
/// Every admitted team gets a row even before it has played. Rows are
/// ordered by points, goal difference, goals scored and finally name.
/// The table is derived from the match records on every call, so a
/// re-submitted result can never be counted twice.
pub fn compute_standings(teams: &[Team], matches: &[Match]) -> Vec<TeamStanding> {
    let mut rows: HashMap<Uuid, TeamStanding> = teams
        .iter()
        .filter(|team| team.status.is_admitted())
        .map(|team| (team.id, empty_row(team)))
        .collect();

    let names: HashMap<Uuid, &str> = teams.iter().map(|t| (t.id, t.name.as_str())).collect();

    for game in matches {
        let Some((score_a, score_b)) = game.final_score() else {
            continue;
        };

        for (team_id, scored, conceded) in [
            (game.team_a_id, score_a, score_b),
            (game.team_b_id, score_b, score_a),
        ] {
            let row = rows.entry(team_id).or_insert_with(|| TeamStanding {
                team_id,
                team_name: names.get(&team_id).unwrap_or(&"Unknown team").to_string(),
                ..zeroed(team_id)
            });
            row.games_played = row.games_played.saturating_add(1);
            row.goals_for = row.goals_for.saturating_add(scored);
            row.goals_against = row.goals_against.saturating_add(conceded);
            if scored > conceded {
                row.wins = row.wins.saturating_add(1);
                row.points = row.points.saturating_add(POINTS_FOR_WIN);
            } else if scored == conceded {
                row.draws = row.draws.saturating_add(1);
                row.points = row.points.saturating_add(POINTS_FOR_DRAW);
            } else {
                row.losses = row.losses.saturating_add(1);
            }
            row.goal_difference = row.goals_for as i64 - row.goals_against as i64;
        }
    }

    let mut table: Vec<TeamStanding> = rows.into_values().collect();
    table.sort_by(|a, b| {
        b.points
            .cmp(&a.points)
            .then_with(|| b.goal_difference.cmp(&a.goal_difference))
            .then_with(|| b.goals_for.cmp(&a.goals_for))
            .then_with(|| a.team_name.cmp(&b.team_name))
    });
    for (index, row) in table.iter_mut().enumerate() {
        row.position = index as u32 + 1;
    }
    table
}

fn empty_row(team: &Team) -> TeamStanding {
    TeamStanding {
        team_name: team.name.clone(),
        ..zeroed(team.id)
    }
}

fn zeroed(team_id: Uuid) -> TeamStanding {
    TeamStanding {
        team_id,
        team_name: String::new(),
        position: 0,
        games_played: 0,
        wins: 0,
        draws: 0,
        losses: 0,
        goals_for: 0,
        goals_against: 0,
        goal_difference: 0,
        points: 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use crate::models::matches::MatchStatus;
    use crate::models::team::TeamStatus;

    fn team(name: &str, status: TeamStatus) -> Team {
        let now = Utc::now();
        Team {
            id: Uuid::new_v4(),
            name: name.into(),
            tournament_id: Uuid::nil(),
            captain_id: Uuid::new_v4(),
            contact_email: None,
            contact_phone: None,
            players: vec![],
            status,
            created_at: now,
            updated_at: now,
        }
    }

    fn game(a: &Team, b: &Team, score: Option<(u32, u32)>, status: MatchStatus) -> Match {
        let now = Utc::now();
        Match {
            id: Uuid::new_v4(),
            tournament_id: Uuid::nil(),
            team_a_id: a.id,
            team_b_id: b.id,
            round: None,
            venue: None,
            scheduled_at: now,
            score_a: score.map(|s| s.0),
            score_b: score.map(|s| s.1),
            status,
            winner_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn points_and_ordering() {
        let lions = team("Lions", TeamStatus::Approved);
        let sharks = team("Sharks", TeamStatus::Approved);
        let hornets = team("Hornets", TeamStatus::Eliminated);
        let matches = vec![
            game(&lions, &sharks, Some((2, 0)), MatchStatus::Completed),
            game(&sharks, &hornets, Some((1, 1)), MatchStatus::Completed),
            game(&lions, &hornets, Some((0, 1)), MatchStatus::Completed),
        ];

        let table = compute_standings(&[lions.clone(), sharks.clone(), hornets.clone()], &matches);
        let order: Vec<&str> = table.iter().map(|r| r.team_name.as_str()).collect();
        assert_eq!(order, vec!["Hornets", "Lions", "Sharks"]);

        assert_eq!(table[0].points, 4);
        assert_eq!(table[0].position, 1);

        let lions_row = &table[1];
        assert_eq!((lions_row.wins, lions_row.losses, lions_row.points), (1, 1, 3));
        assert_eq!(lions_row.goal_difference, 1);
        assert_eq!(lions_row.position, 2);

        let sharks_row = &table[2];
        assert_eq!((sharks_row.draws, sharks_row.losses, sharks_row.points), (1, 1, 1));
        assert_eq!(sharks_row.goal_difference, -2);
    }

    #[test]
    fn unfinished_matches_are_ignored() {
        let lions = team("Lions", TeamStatus::Approved);
        let sharks = team("Sharks", TeamStatus::Approved);
        let matches = vec![
            game(&lions, &sharks, Some((3, 0)), MatchStatus::InProgress),
            game(&lions, &sharks, None, MatchStatus::Scheduled),
            game(&lions, &sharks, Some((1, 0)), MatchStatus::Cancelled),
        ];
        let table = compute_standings(&[lions, sharks], &matches);
        assert!(table.iter().all(|row| row.games_played == 0 && row.points == 0));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn pending_teams_get_no_row() {
        let lions = team("Lions", TeamStatus::Approved);
        let pending = team("Pending", TeamStatus::Pending);
        let table = compute_standings(&[lions, pending], &[]);
        assert_eq!(table.len(), 1);
        assert_eq!(table[0].position, 1);
    }

    #[test]
    fn extreme_scores_saturate_instead_of_overflowing() {
        let lions = team("Lions", TeamStatus::Approved);
        let sharks = team("Sharks", TeamStatus::Approved);
        let blowout = game(&lions, &sharks, Some((u32::MAX, 0)), MatchStatus::Completed);
        let table = compute_standings(&[lions.clone(), sharks], &[blowout.clone(), blowout]);

        assert_eq!(table[0].team_id, lions.id);
        assert_eq!(table[0].goals_for, u32::MAX);
        assert_eq!(table[0].games_played, 2);
        assert_eq!(table[0].goal_difference, u32::MAX as i64);
    }
}
