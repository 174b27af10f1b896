use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use shared::{
    RankBand, RankedStandingRow, ReplaceStandingsRequest, ReplaceStandingsResponse,
    StandingRowResponse, StandingsTableResponse, TeamStandingRow, UpsertStandingRowRequest,
};

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::ranking::position_deltas;
use crate::domain::standings::sort_rows;
use crate::storage::repositories::StandingsRepository;
use crate::storage::store::DocumentStore;

/// Service for the league table, per group/division.
///
/// The previous-snapshot archive is what the movement arrows compare
/// against; it is replaced wholesale by `replace_table` and never
/// edited row by row.
#[derive(Clone)]
pub struct StandingsService {
    standings: StandingsRepository,
}

impl StandingsService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            standings: StandingsRepository::new(store),
        }
    }

    /// Insert or edit one row. Without an explicit ID, an existing row
    /// for the same (team, group) is updated in place so manual entry
    /// cannot duplicate a team.
    pub async fn upsert_row(
        &self,
        request: UpsertStandingRowRequest,
    ) -> DomainResult<StandingRowResponse> {
        let team = request.team.trim().to_string();
        let group = request.group.trim().to_string();
        if team.is_empty() {
            return Err(DomainError::validation("Team name cannot be empty"));
        }
        if group.is_empty() {
            return Err(DomainError::validation("Group cannot be empty"));
        }

        let existing = match &request.id {
            Some(id) => Some(self.standings.get_row(id).await?.ok_or_else(|| {
                DomainError::not_found(format!("Standing row not found: {}", id))
            })?),
            None => self.standings.find_by_team(&group, &team).await?,
        };

        let mut row = match existing {
            Some(row) => {
                info!("Updating standings row for {} in {}", team, group);
                row
            }
            None => {
                info!("Inserting standings row for {} in {}", team, group);
                TeamStandingRow {
                    id: TeamStandingRow::generate_id(Utc::now().timestamp_millis() as u64),
                    group: group.clone(),
                    team: team.clone(),
                    played: 0,
                    won: 0,
                    drawn: 0,
                    lost: 0,
                    goals_for: 0,
                    goals_against: 0,
                    goal_difference: 0,
                    points: 0,
                }
            }
        };

        row.group = group;
        row.team = team;
        row.played = request.played;
        row.won = request.won;
        row.drawn = request.drawn;
        row.lost = request.lost;
        row.goals_for = request.goals_for;
        row.goals_against = request.goals_against;
        row.refresh_derived();

        self.standings.store_row(&row).await?;

        Ok(StandingRowResponse {
            row,
            success_message: "Standings row saved".to_string(),
        })
    }

    pub async fn delete_row(&self, row_id: &str) -> DomainResult<()> {
        let row = self
            .standings
            .get_row(row_id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Standing row not found: {}", row_id)))?;
        info!("Deleting standings row for {} in {}", row.team, row.group);
        self.standings.delete_row(row_id).await?;
        Ok(())
    }

    /// The ranked table for one group: rows in standings order with
    /// 1-based ranks, movement versus the archived snapshot (keyed by
    /// team name) and the display band.
    pub async fn table(&self, group: &str) -> DomainResult<StandingsTableResponse> {
        let (mut current, mut previous) = self.standings.load_group_with_previous(group).await?;
        sort_rows(&mut current);
        sort_rows(&mut previous);

        let deltas = position_deltas(&current, &previous, |row| row.team.clone());

        let rows = current
            .into_iter()
            .zip(deltas)
            .enumerate()
            .map(|(index, (row, delta))| RankedStandingRow {
                rank: index + 1,
                delta,
                band: RankBand::for_rank(index + 1),
                row,
            })
            .collect();

        Ok(StandingsTableResponse {
            group: group.to_string(),
            rows,
        })
    }

    /// Replace a group's table wholesale. The outgoing rows become the
    /// new previous snapshot, the old snapshot is discarded, and the
    /// incoming rows are installed with fresh IDs and derived fields.
    ///
    /// The steps are sequential writes, not a transaction; a failure
    /// partway leaves the group needing a re-run.
    pub async fn replace_table(
        &self,
        group: &str,
        request: ReplaceStandingsRequest,
    ) -> DomainResult<ReplaceStandingsResponse> {
        for input in &request.rows {
            if input.team.trim().is_empty() {
                return Err(DomainError::validation("Team name cannot be empty"));
            }
        }

        let (current, stale) = self.standings.load_group_with_previous(group).await?;
        info!(
            "Replacing standings for {}: {} incoming, {} archived, {} stale snapshots",
            group,
            request.rows.len(),
            current.len(),
            stale.len()
        );

        for row in &stale {
            self.standings.delete_previous_row(&row.id).await?;
        }
        for row in &current {
            self.standings.store_previous_row(row).await?;
            self.standings.delete_row(&row.id).await?;
        }

        let base = Utc::now().timestamp_millis() as u64;
        for (index, input) in request.rows.iter().enumerate() {
            let mut row = TeamStandingRow {
                // Offset by position: millisecond IDs would collide in a loop
                id: TeamStandingRow::generate_id(base + index as u64),
                group: group.to_string(),
                team: input.team.trim().to_string(),
                played: input.played,
                won: input.won,
                drawn: input.drawn,
                lost: input.lost,
                goals_for: input.goals_for,
                goals_against: input.goals_against,
                goal_difference: 0,
                points: 0,
            };
            row.refresh_derived();
            self.standings.store_row(&row).await?;
        }

        Ok(ReplaceStandingsResponse {
            installed: request.rows.len(),
            archived: current.len(),
            success_message: format!("Standings for {} replaced", group),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use shared::{RankDelta, StandingRowInput};

    use crate::storage::MemoryStore;

    fn setup_test() -> StandingsService {
        StandingsService::new(Arc::new(MemoryStore::new()))
    }

    fn upsert_request(group: &str, team: &str, won: u32, gf: u32, ga: u32) -> UpsertStandingRowRequest {
        UpsertStandingRowRequest {
            id: None,
            group: group.to_string(),
            team: team.to_string(),
            played: won,
            won,
            drawn: 0,
            lost: 0,
            goals_for: gf,
            goals_against: ga,
        }
    }

    fn input(team: &str, won: u32, drawn: u32, gf: u32, ga: u32) -> StandingRowInput {
        StandingRowInput {
            team: team.to_string(),
            played: won + drawn,
            won,
            drawn,
            lost: 0,
            goals_for: gf,
            goals_against: ga,
        }
    }

    #[tokio::test]
    async fn test_upsert_computes_derived_fields() {
        let service = setup_test();

        let response = service
            .upsert_row(UpsertStandingRowRequest {
                id: None,
                group: "Group A".to_string(),
                team: "  Rovers ".to_string(),
                played: 5,
                won: 3,
                drawn: 1,
                lost: 1,
                goals_for: 10,
                goals_against: 6,
            })
            .await
            .expect("Failed to upsert row");

        assert_eq!(response.row.team, "Rovers");
        assert_eq!(response.row.points, 10);
        assert_eq!(response.row.goal_difference, 4);
    }

    #[tokio::test]
    async fn test_upsert_without_id_updates_same_team_in_place() {
        let service = setup_test();

        let first = service
            .upsert_row(upsert_request("Group A", "Rovers", 1, 2, 0))
            .await
            .expect("Failed to insert row");
        tokio::time::sleep(tokio::time::Duration::from_millis(2)).await;
        let second = service
            .upsert_row(upsert_request("Group A", "Rovers", 2, 5, 1))
            .await
            .expect("Failed to update row");

        assert_eq!(first.row.id, second.row.id);
        assert_eq!(second.row.points, 6);

        let table = service.table("Group A").await.expect("Failed to build table");
        assert_eq!(table.rows.len(), 1);
    }

    #[tokio::test]
    async fn test_same_team_in_other_group_is_separate() {
        let service = setup_test();

        service
            .upsert_row(upsert_request("Group A", "Rovers", 1, 2, 0))
            .await
            .expect("Failed to insert row");
        tokio::time::sleep(tokio::time::Duration::from_millis(2)).await;
        service
            .upsert_row(upsert_request("Group B", "Rovers", 1, 2, 0))
            .await
            .expect("Failed to insert row");

        let a = service.table("Group A").await.expect("table A");
        let b = service.table("Group B").await.expect("table B");
        assert_eq!(a.rows.len(), 1);
        assert_eq!(b.rows.len(), 1);
        assert_ne!(a.rows[0].row.id, b.rows[0].row.id);
    }

    #[tokio::test]
    async fn test_upsert_with_unknown_id() {
        let service = setup_test();

        let mut request = upsert_request("Group A", "Rovers", 1, 2, 0);
        request.id = Some("standing::nonexistent".to_string());
        let result = service.upsert_row(request).await;
        assert!(matches!(result, Err(DomainError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_table_order_rank_and_band() {
        let service = setup_test();

        // A: 3 pts, gd 0; B: 3 pts, gd +2; C: 6 pts
        service
            .upsert_row(upsert_request("Group A", "A", 1, 1, 1))
            .await
            .expect("insert A");
        tokio::time::sleep(tokio::time::Duration::from_millis(2)).await;
        service
            .upsert_row(upsert_request("Group A", "B", 1, 3, 1))
            .await
            .expect("insert B");
        tokio::time::sleep(tokio::time::Duration::from_millis(2)).await;
        service
            .upsert_row(upsert_request("Group A", "C", 2, 4, 1))
            .await
            .expect("insert C");

        let table = service.table("Group A").await.expect("Failed to build table");
        let names: Vec<&str> = table.rows.iter().map(|r| r.row.team.as_str()).collect();
        assert_eq!(names, vec!["C", "B", "A"]);
        assert_eq!(table.rows[0].rank, 1);
        assert_eq!(table.rows[2].rank, 3);
        assert_eq!(table.rows[0].band, RankBand::Top);

        // No snapshot yet: every row is a first appearance.
        assert!(table.rows.iter().all(|r| r.delta.is_none()));
    }

    #[tokio::test]
    async fn test_replace_table_archives_and_produces_deltas() {
        let service = setup_test();

        service
            .replace_table(
                "Group A",
                ReplaceStandingsRequest {
                    rows: vec![input("A", 2, 0, 5, 1), input("B", 1, 0, 3, 2)],
                },
            )
            .await
            .expect("Failed to install table");

        // B overtakes A in the new round.
        let response = service
            .replace_table(
                "Group A",
                ReplaceStandingsRequest {
                    rows: vec![input("A", 2, 0, 5, 1), input("B", 3, 0, 8, 2)],
                },
            )
            .await
            .expect("Failed to replace table");

        assert_eq!(response.installed, 2);
        assert_eq!(response.archived, 2);

        let table = service.table("Group A").await.expect("Failed to build table");
        assert_eq!(table.rows[0].row.team, "B");
        assert_eq!(table.rows[0].delta, Some(RankDelta::Up));
        assert_eq!(table.rows[1].row.team, "A");
        assert_eq!(table.rows[1].delta, Some(RankDelta::Down));
    }

    #[tokio::test]
    async fn test_replace_table_new_team_has_no_delta() {
        let service = setup_test();

        service
            .replace_table(
                "Group A",
                ReplaceStandingsRequest {
                    rows: vec![input("A", 1, 0, 2, 0)],
                },
            )
            .await
            .expect("Failed to install table");

        service
            .replace_table(
                "Group A",
                ReplaceStandingsRequest {
                    rows: vec![input("A", 1, 0, 2, 0), input("New", 0, 0, 0, 0)],
                },
            )
            .await
            .expect("Failed to replace table");

        let table = service.table("Group A").await.expect("Failed to build table");
        let new_row = table
            .rows
            .iter()
            .find(|r| r.row.team == "New")
            .expect("missing new team");
        assert_eq!(new_row.delta, None);
        let kept_row = table
            .rows
            .iter()
            .find(|r| r.row.team == "A")
            .expect("missing kept team");
        assert_eq!(kept_row.delta, Some(RankDelta::Same));
    }

    #[tokio::test]
    async fn test_delete_row() {
        let service = setup_test();

        let created = service
            .upsert_row(upsert_request("Group A", "Rovers", 1, 2, 0))
            .await
            .expect("Failed to insert row");

        service
            .delete_row(&created.row.id)
            .await
            .expect("Failed to delete row");

        let table = service.table("Group A").await.expect("Failed to build table");
        assert!(table.rows.is_empty());

        let result = service.delete_row(&created.row.id).await;
        assert!(matches!(result, Err(DomainError::NotFound(_))));
    }
}
