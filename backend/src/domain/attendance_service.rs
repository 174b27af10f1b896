use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use anyhow::anyhow;
use tracing::info;

use shared::{
    AttendanceCell, AttendanceRecord, DebtRow, DebtTableResponse, ToggleAttendanceRequest,
    ToggleAttendanceResponse,
};

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::ledger::{aggregate_debts, cell_status, index_records};
use crate::storage::repositories::{AttendanceRepository, EventRepository, PlayerRepository};
use crate::storage::store::DocumentStore;

/// Service for the attendance/debt grid.
///
/// Cell toggles cycle Absent -> Pending -> Paid -> Absent. While a toggle
/// is writing, further triggers on the same cell are ignored rather than
/// queued, so a double-click cannot skip a state.
#[derive(Clone)]
pub struct AttendanceService {
    attendance: AttendanceRepository,
    players: PlayerRepository,
    events: EventRepository,
    busy_cells: Arc<Mutex<HashSet<(String, String)>>>,
}

/// Claim on a (player, event) cell, released on drop
struct CellClaim {
    cells: Arc<Mutex<HashSet<(String, String)>>>,
    key: (String, String),
}

impl Drop for CellClaim {
    fn drop(&mut self) {
        if let Ok(mut cells) = self.cells.lock() {
            cells.remove(&self.key);
        }
    }
}

impl AttendanceService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            attendance: AttendanceRepository::new(store.clone()),
            players: PlayerRepository::new(store.clone()),
            events: EventRepository::new(store),
            busy_cells: Arc::new(Mutex::new(HashSet::new())),
        }
    }

    /// Advance a cell to its next status and snapshot the event's current
    /// cost as the applied charge. Returns `applied: false` without
    /// touching the store when the cell already has a write in flight.
    pub async fn toggle_cell(
        &self,
        request: ToggleAttendanceRequest,
    ) -> DomainResult<ToggleAttendanceResponse> {
        let claim = match self.claim_cell(&request.player_id, &request.event_id)? {
            Some(claim) => claim,
            None => {
                info!(
                    "Ignoring toggle for busy cell ({}, {})",
                    request.player_id, request.event_id
                );
                return Ok(ToggleAttendanceResponse {
                    applied: false,
                    record: None,
                });
            }
        };

        let player = self
            .players
            .get_player(&request.player_id)
            .await?
            .ok_or_else(|| {
                DomainError::not_found(format!("Player not found: {}", request.player_id))
            })?;
        let event = self
            .events
            .get_event(&request.event_id)
            .await?
            .ok_or_else(|| {
                DomainError::not_found(format!("Event not found: {}", request.event_id))
            })?;

        let current = self
            .attendance
            .get_record(&request.player_id, &request.event_id)
            .await?
            .map(|record| record.status)
            .unwrap_or_default();
        let next = current.next();

        let record = AttendanceRecord {
            player_id: player.id,
            event_id: event.id,
            status: next,
            applied_charge: Some(event.cost),
        };
        self.attendance.upsert_record(&record).await?;

        info!(
            "Toggled cell ({}, {}): {:?} -> {:?}",
            record.player_id, record.event_id, current, next
        );

        drop(claim);
        Ok(ToggleAttendanceResponse {
            applied: true,
            record: Some(record),
        })
    }

    /// Assemble the full debt grid: events as columns in date order,
    /// active players as rows in name order, plus each player's
    /// outstanding total.
    pub async fn debt_table(&self) -> DomainResult<DebtTableResponse> {
        let (mut players, events, records) = self.attendance.load_grid_inputs().await?;

        // The store orders by raw string; display order is case-insensitive.
        players.sort_by_key(|player| player.name.to_lowercase());

        let index = index_records(&records);
        let totals = aggregate_debts(&players, &events, &index);

        let rows = players
            .iter()
            .map(|player| DebtRow {
                player_id: player.id.clone(),
                player_name: player.name.clone(),
                total_due: totals.get(&player.id).copied().unwrap_or(0.0),
                cells: events
                    .iter()
                    .map(|event| AttendanceCell {
                        event_id: event.id.clone(),
                        status: cell_status(&index, &player.id, &event.id),
                    })
                    .collect(),
            })
            .collect();

        Ok(DebtTableResponse { events, rows })
    }

    /// Insert the cell into the busy set; None when it is already there.
    /// The lock is never held across an await.
    fn claim_cell(&self, player_id: &str, event_id: &str) -> DomainResult<Option<CellClaim>> {
        let key = (player_id.to_string(), event_id.to_string());
        let mut cells = self
            .busy_cells
            .lock()
            .map_err(|_| DomainError::Store(anyhow!("Busy-cell lock poisoned")))?;
        if !cells.insert(key.clone()) {
            return Ok(None);
        }
        Ok(Some(CellClaim {
            cells: self.busy_cells.clone(),
            key,
        }))
    }
}
