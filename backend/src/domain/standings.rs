//! League-table ordering.

use std::cmp::Ordering;

use shared::TeamStandingRow;

/// The standings comparator: points descending, then goal difference
/// descending, then goals-for descending. Rows equal on all three keep
/// their incoming relative order (the sort is stable).
pub fn standings_order(a: &TeamStandingRow, b: &TeamStandingRow) -> Ordering {
    b.points
        .cmp(&a.points)
        .then(b.goal_difference.cmp(&a.goal_difference))
        .then(b.goals_for.cmp(&a.goals_for))
}

/// Sort rows into rank order in place
pub fn sort_rows(rows: &mut [TeamStandingRow]) {
    rows.sort_by(standings_order);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(team: &str, points: u32, goal_difference: i32, goals_for: u32) -> TeamStandingRow {
        TeamStandingRow {
            id: format!("standing::{}", team),
            group: "Tuesday".to_string(),
            team: team.to_string(),
            played: 0,
            won: 0,
            drawn: 0,
            lost: 0,
            goals_for,
            goals_against: 0,
            goal_difference,
            points,
        }
    }

    #[test]
    fn test_points_then_difference() {
        // A(pts=10,dif=2), B(pts=10,dif=5), C(pts=12,dif=0) ranks as C, B, A
        let mut rows = vec![row("A", 10, 2, 0), row("B", 10, 5, 0), row("C", 12, 0, 0)];
        sort_rows(&mut rows);

        let order: Vec<_> = rows.iter().map(|r| r.team.as_str()).collect();
        assert_eq!(order, vec!["C", "B", "A"]);
    }

    #[test]
    fn test_more_points_always_ranks_first() {
        // Points dominate regardless of difference or goals-for
        let mut rows = vec![row("A", 9, 50, 80), row("B", 10, -20, 1)];
        sort_rows(&mut rows);
        assert_eq!(rows[0].team, "B");
    }

    #[test]
    fn test_goals_for_breaks_remaining_ties() {
        let mut rows = vec![row("A", 10, 3, 12), row("B", 10, 3, 15)];
        sort_rows(&mut rows);
        assert_eq!(rows[0].team, "B");
    }

    #[test]
    fn test_full_tie_keeps_incoming_order() {
        let mut rows = vec![row("First", 10, 3, 12), row("Second", 10, 3, 12)];
        sort_rows(&mut rows);
        assert_eq!(rows[0].team, "First");
        assert_eq!(rows[1].team, "Second");
    }
}
