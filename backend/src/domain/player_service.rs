use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use shared::{
    CreatePlayerRequest, Player, PlayerListResponse, PlayerResponse, UpdatePlayerRequest,
};

use crate::domain::error::{DomainError, DomainResult};
use crate::storage::repositories::PlayerRepository;
use crate::storage::store::DocumentStore;

const MAX_NAME_LENGTH: usize = 100;

/// Service for managing the club roster
#[derive(Clone)]
pub struct PlayerService {
    players: PlayerRepository,
}

impl PlayerService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            players: PlayerRepository::new(store),
        }
    }

    /// Register a new player
    pub async fn create_player(&self, request: CreatePlayerRequest) -> DomainResult<PlayerResponse> {
        let name = request.name.trim().to_string();
        info!("Creating player: name={}", name);

        validate_name(&name)?;

        // Pre-write existence check; the store itself enforces nothing
        if self.players.find_by_name(&name).await?.is_some() {
            return Err(DomainError::conflict(format!(
                "Player \"{}\" already exists",
                name
            )));
        }

        let now = Utc::now();
        let timestamp = now.to_rfc3339();
        let player = Player {
            id: Player::generate_id(now.timestamp_millis() as u64),
            name,
            jersey_number: request.jersey_number,
            positions: request.positions,
            active: true,
            goals: 0,
            previous_goals: None,
            created_at: timestamp.clone(),
            updated_at: timestamp,
        };

        self.players.store_player(&player).await?;

        info!("Created player: {} with ID: {}", player.name, player.id);

        Ok(PlayerResponse {
            player,
            success_message: "Player created successfully".to_string(),
        })
    }

    /// Get a player by ID
    pub async fn get_player(&self, player_id: &str) -> DomainResult<Option<Player>> {
        Ok(self.players.get_player(player_id).await?)
    }

    /// List all players ordered by name, inactive ones included
    pub async fn list_players(&self) -> DomainResult<PlayerListResponse> {
        let players = self.players.list_players().await?;
        info!("Found {} players", players.len());
        Ok(PlayerListResponse { players })
    }

    /// Update name, jersey number or positions of an existing player
    pub async fn update_player(
        &self,
        player_id: &str,
        request: UpdatePlayerRequest,
    ) -> DomainResult<PlayerResponse> {
        info!("Updating player: {}", player_id);

        let mut player = self
            .players
            .get_player(player_id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Player not found: {}", player_id)))?;

        if let Some(name) = request.name {
            let name = name.trim().to_string();
            validate_name(&name)?;
            if name != player.name {
                if let Some(existing) = self.players.find_by_name(&name).await? {
                    if existing.id != player.id {
                        return Err(DomainError::conflict(format!(
                            "Player \"{}\" already exists",
                            name
                        )));
                    }
                }
            }
            player.name = name;
        }
        if let Some(jersey_number) = request.jersey_number {
            player.jersey_number = Some(jersey_number);
        }
        if let Some(positions) = request.positions {
            player.positions = positions;
        }
        player.updated_at = Utc::now().to_rfc3339();

        self.players.store_player(&player).await?;

        Ok(PlayerResponse {
            player,
            success_message: "Player updated successfully".to_string(),
        })
    }

    /// Activate or deactivate a player. Deactivation is the expected
    /// "delete" for players with attendance history.
    pub async fn set_active(&self, player_id: &str, active: bool) -> DomainResult<PlayerResponse> {
        info!("Setting player {} active={}", player_id, active);

        let mut player = self
            .players
            .get_player(player_id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Player not found: {}", player_id)))?;

        player.active = active;
        player.updated_at = Utc::now().to_rfc3339();
        self.players.store_player(&player).await?;

        let success_message = if active {
            "Player activated".to_string()
        } else {
            "Player deactivated".to_string()
        };
        Ok(PlayerResponse {
            player,
            success_message,
        })
    }

    /// Hard delete. The attendance history keeps referencing the ID, so
    /// prefer deactivation.
    pub async fn delete_player(&self, player_id: &str) -> DomainResult<()> {
        let player = self
            .players
            .get_player(player_id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Player not found: {}", player_id)))?;

        warn!(
            "Hard-deleting player {} ({}); attendance history is orphaned",
            player.name, player.id
        );
        self.players.delete_player(player_id).await?;
        Ok(())
    }
}

fn validate_name(name: &str) -> DomainResult<()> {
    if name.is_empty() {
        return Err(DomainError::validation("Player name cannot be empty"));
    }
    if name.len() > MAX_NAME_LENGTH {
        return Err(DomainError::validation(format!(
            "Player name cannot exceed {} characters",
            MAX_NAME_LENGTH
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn setup_test() -> PlayerService {
        PlayerService::new(Arc::new(MemoryStore::new()))
    }

    fn create_request(name: &str) -> CreatePlayerRequest {
        CreatePlayerRequest {
            name: name.to_string(),
            jersey_number: Some(9),
            positions: vec!["Forward".to_string()],
        }
    }

    #[tokio::test]
    async fn test_create_player() {
        let service = setup_test();

        let response = service
            .create_player(create_request("  Ana Torres "))
            .await
            .expect("Failed to create player");

        assert_eq!(response.player.name, "Ana Torres");
        assert_eq!(response.player.jersey_number, Some(9));
        assert!(response.player.active);
        assert_eq!(response.player.goals, 0);
        assert_eq!(response.player.previous_goals, None);
        assert!(!response.player.id.is_empty());
    }

    #[tokio::test]
    async fn test_create_player_validation() {
        let service = setup_test();

        let result = service.create_player(create_request("   ")).await;
        assert!(matches!(result, Err(DomainError::Validation(_))));

        let result = service.create_player(create_request(&"x".repeat(101))).await;
        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[tokio::test]
    async fn test_duplicate_name_is_conflict() {
        let service = setup_test();

        service
            .create_player(create_request("Ana"))
            .await
            .expect("Failed to create player");

        tokio::time::sleep(tokio::time::Duration::from_millis(2)).await;

        let result = service.create_player(create_request("Ana")).await;
        assert!(matches!(result, Err(DomainError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_update_player() {
        let service = setup_test();

        let created = service
            .create_player(create_request("Ana"))
            .await
            .expect("Failed to create player");

        let response = service
            .update_player(
                &created.player.id,
                UpdatePlayerRequest {
                    name: Some("Ana Maria".to_string()),
                    jersey_number: Some(11),
                    positions: Some(vec!["Keeper".to_string()]),
                },
            )
            .await
            .expect("Failed to update player");

        assert_eq!(response.player.name, "Ana Maria");
        assert_eq!(response.player.jersey_number, Some(11));
        assert_eq!(response.player.positions, vec!["Keeper".to_string()]);
        assert_eq!(response.player.created_at, created.player.created_at);
    }

    #[tokio::test]
    async fn test_update_to_existing_name_is_conflict() {
        let service = setup_test();

        service
            .create_player(create_request("Ana"))
            .await
            .expect("Failed to create Ana");
        tokio::time::sleep(tokio::time::Duration::from_millis(2)).await;
        let bob = service
            .create_player(create_request("Bob"))
            .await
            .expect("Failed to create Bob");

        let result = service
            .update_player(
                &bob.player.id,
                UpdatePlayerRequest {
                    name: Some("Ana".to_string()),
                    jersey_number: None,
                    positions: None,
                },
            )
            .await;
        assert!(matches!(result, Err(DomainError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_update_nonexistent_player() {
        let service = setup_test();

        let result = service
            .update_player(
                "player::nonexistent",
                UpdatePlayerRequest {
                    name: Some("Ana".to_string()),
                    jersey_number: None,
                    positions: None,
                },
            )
            .await;
        assert!(matches!(result, Err(DomainError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_deactivate_and_reactivate() {
        let service = setup_test();

        let created = service
            .create_player(create_request("Ana"))
            .await
            .expect("Failed to create player");

        let response = service
            .set_active(&created.player.id, false)
            .await
            .expect("Failed to deactivate");
        assert!(!response.player.active);

        let response = service
            .set_active(&created.player.id, true)
            .await
            .expect("Failed to reactivate");
        assert!(response.player.active);
    }

    #[tokio::test]
    async fn test_list_players_ordered_by_name() {
        let service = setup_test();

        service
            .create_player(create_request("Bob"))
            .await
            .expect("Failed to create Bob");
        tokio::time::sleep(tokio::time::Duration::from_millis(2)).await;
        service
            .create_player(create_request("Ana"))
            .await
            .expect("Failed to create Ana");

        let response = service.list_players().await.expect("Failed to list players");
        assert_eq!(response.players.len(), 2);
        assert_eq!(response.players[0].name, "Ana");
        assert_eq!(response.players[1].name, "Bob");
    }

    #[tokio::test]
    async fn test_delete_player() {
        let service = setup_test();

        let created = service
            .create_player(create_request("Ana"))
            .await
            .expect("Failed to create player");

        service
            .delete_player(&created.player.id)
            .await
            .expect("Failed to delete player");

        let player = service
            .get_player(&created.player.id)
            .await
            .expect("Failed to query player");
        assert!(player.is_none());

        let result = service.delete_player(&created.player.id).await;
        assert!(matches!(result, Err(DomainError::NotFound(_))));
    }
}
