use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use shared::{PlayerResponse, ScorerRow, ScorerTableResponse, UpdateGoalsRequest};

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::ranking::count_delta;
use crate::storage::repositories::PlayerRepository;
use crate::storage::store::DocumentStore;

/// Service for the top-scorer table.
///
/// Goal counts live on the player document. Each update snapshots the
/// old count into `previous_goals`, which is what the delta indicators
/// compare against.
#[derive(Clone)]
pub struct ScorerService {
    players: PlayerRepository,
}

impl ScorerService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            players: PlayerRepository::new(store),
        }
    }

    /// Set a player's goal count, keeping the old count as the snapshot
    pub async fn update_goals(&self, request: UpdateGoalsRequest) -> DomainResult<PlayerResponse> {
        let mut player = self
            .players
            .get_player(&request.player_id)
            .await?
            .ok_or_else(|| {
                DomainError::not_found(format!("Player not found: {}", request.player_id))
            })?;

        info!(
            "Updating goals for {}: {} -> {}",
            player.name, player.goals, request.goals
        );

        player.previous_goals = Some(player.goals);
        player.goals = request.goals;
        player.updated_at = Utc::now().to_rfc3339();
        self.players.store_player(&player).await?;

        Ok(PlayerResponse {
            player,
            success_message: "Goals updated successfully".to_string(),
        })
    }

    /// Ranked scorer table over active players, goals descending with
    /// name as the tiebreak. Players without a snapshot get no delta.
    pub async fn scorer_table(&self) -> DomainResult<ScorerTableResponse> {
        let mut players = self.players.list_active_players().await?;
        players.sort_by(|a, b| {
            b.goals
                .cmp(&a.goals)
                .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
        });

        let rows = players
            .into_iter()
            .enumerate()
            .map(|(index, player)| ScorerRow {
                rank: index + 1,
                delta: count_delta(player.goals, player.previous_goals),
                player_id: player.id,
                name: player.name,
                goals: player.goals,
            })
            .collect();

        Ok(ScorerTableResponse { rows })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use shared::{Player, RankDelta};

    use crate::storage::MemoryStore;

    fn player(id: &str, name: &str, goals: u32) -> Player {
        Player {
            id: id.to_string(),
            name: name.to_string(),
            jersey_number: None,
            positions: vec![],
            active: true,
            goals,
            previous_goals: None,
            created_at: "2025-01-01T00:00:00Z".to_string(),
            updated_at: "2025-01-01T00:00:00Z".to_string(),
        }
    }

    async fn setup_test(players: &[Player]) -> ScorerService {
        let store: Arc<dyn DocumentStore> = Arc::new(MemoryStore::new());
        let repo = PlayerRepository::new(store.clone());
        for p in players {
            repo.store_player(p).await.expect("Failed to seed player");
        }
        ScorerService::new(store)
    }

    #[tokio::test]
    async fn test_update_goals_keeps_snapshot() {
        let service = setup_test(&[player("p1", "Ana", 3)]).await;

        let response = service
            .update_goals(UpdateGoalsRequest {
                player_id: "p1".to_string(),
                goals: 5,
            })
            .await
            .expect("Failed to update goals");

        assert_eq!(response.player.goals, 5);
        assert_eq!(response.player.previous_goals, Some(3));
    }

    #[tokio::test]
    async fn test_update_goals_unknown_player() {
        let service = setup_test(&[]).await;

        let result = service
            .update_goals(UpdateGoalsRequest {
                player_id: "ghost".to_string(),
                goals: 1,
            })
            .await;
        assert!(matches!(result, Err(DomainError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_scorer_table_ranking_and_deltas() {
        let mut ana = player("p1", "Ana", 2);
        ana.previous_goals = Some(4);
        let mut bob = player("p2", "Bob", 7);
        bob.previous_goals = Some(5);
        let cleo = player("p3", "Cleo", 7);

        let service = setup_test(&[ana, bob, cleo]).await;

        let table = service.scorer_table().await.expect("Failed to build table");
        assert_eq!(table.rows.len(), 3);

        // Bob and Cleo tie on goals; name breaks the tie.
        assert_eq!(table.rows[0].name, "Bob");
        assert_eq!(table.rows[0].rank, 1);
        assert_eq!(table.rows[0].delta, Some(RankDelta::Up));

        assert_eq!(table.rows[1].name, "Cleo");
        assert_eq!(table.rows[1].rank, 2);
        assert_eq!(table.rows[1].delta, None);

        assert_eq!(table.rows[2].name, "Ana");
        assert_eq!(table.rows[2].rank, 3);
        assert_eq!(table.rows[2].delta, Some(RankDelta::Down));
    }

    #[tokio::test]
    async fn test_scorer_table_skips_inactive_players() {
        let mut retired = player("p2", "Bob", 10);
        retired.active = false;
        let service = setup_test(&[player("p1", "Ana", 1), retired]).await;

        let table = service.scorer_table().await.expect("Failed to build table");
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0].name, "Ana");
    }

    #[tokio::test]
    async fn test_unchanged_goals_show_same() {
        let mut ana = player("p1", "Ana", 4);
        ana.previous_goals = Some(4);
        let service = setup_test(&[ana]).await;

        let table = service.scorer_table().await.expect("Failed to build table");
        assert_eq!(table.rows[0].delta, Some(RankDelta::Same));
    }
}
