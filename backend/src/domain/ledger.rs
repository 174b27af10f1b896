//! Debt ledger aggregation.
//!
//! Pure computation over already-fetched data: no store access, no hidden
//! state. Each player's outstanding balance is the sum of the charges of
//! their `Pending` attendance records across the given events; `Paid` and
//! `Absent` records, and pairs with no record at all, contribute nothing.

use std::collections::{BTreeMap, HashMap};

use shared::{AttendanceRecord, AttendanceStatus, Event, Player};

/// Lookup index from (player_id, event_id) to the pair's record
pub type RecordIndex<'a> = HashMap<(&'a str, &'a str), &'a AttendanceRecord>;

/// Build the pair index. Record IDs already guarantee at most one record
/// per pair, so a plain insert suffices.
pub fn index_records(records: &[AttendanceRecord]) -> RecordIndex<'_> {
    records
        .iter()
        .map(|record| ((record.player_id.as_str(), record.event_id.as_str()), record))
        .collect()
}

/// Status of one cell. A missing record defaults to `Absent`; this is the
/// single place that rule is applied.
pub fn cell_status(index: &RecordIndex<'_>, player_id: &str, event_id: &str) -> AttendanceStatus {
    index
        .get(&(player_id, event_id))
        .map(|record| record.status)
        .unwrap_or_default()
}

/// Outstanding balance per player.
///
/// For every `Pending` record the charge is the record's `applied_charge`,
/// falling back to the event's current cost. The result is keyed by player
/// ID and independent of traversal order.
pub fn aggregate_debts(
    players: &[Player],
    events: &[Event],
    index: &RecordIndex<'_>,
) -> BTreeMap<String, f64> {
    let mut totals = BTreeMap::new();
    for player in players {
        let mut total = 0.0;
        for event in events {
            if let Some(record) = index.get(&(player.id.as_str(), event.id.as_str())) {
                if record.status == AttendanceStatus::Pending {
                    total += record.applied_charge.unwrap_or(event.cost);
                }
            }
        }
        totals.insert(player.id.clone(), total);
    }
    totals
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(id: &str, name: &str) -> Player {
        Player {
            id: id.to_string(),
            name: name.to_string(),
            jersey_number: None,
            positions: vec![],
            active: true,
            goals: 0,
            previous_goals: None,
            created_at: "2025-01-01T00:00:00Z".to_string(),
            updated_at: "2025-01-01T00:00:00Z".to_string(),
        }
    }

    fn event(id: &str, cost: f64) -> Event {
        Event {
            id: id.to_string(),
            name: format!("Event {}", id),
            date: "2025-03-01".to_string(),
            cost,
        }
    }

    fn record(
        player_id: &str,
        event_id: &str,
        status: AttendanceStatus,
        applied_charge: Option<f64>,
    ) -> AttendanceRecord {
        AttendanceRecord {
            player_id: player_id.to_string(),
            event_id: event_id.to_string(),
            status,
            applied_charge,
        }
    }

    #[test]
    fn test_pending_record_charges_player() {
        // Players Ana and Bob, one event at 50, Ana pending
        let players = vec![player("1", "Ana"), player("2", "Bob")];
        let events = vec![event("10", 50.0)];
        let records = vec![record("1", "10", AttendanceStatus::Pending, None)];

        let totals = aggregate_debts(&players, &events, &index_records(&records));
        assert_eq!(totals["1"], 50.0);
        assert_eq!(totals["2"], 0.0);
    }

    #[test]
    fn test_applied_charge_wins_over_event_cost() {
        let players = vec![player("1", "Ana")];
        let events = vec![event("10", 80.0)];
        let records = vec![record("1", "10", AttendanceStatus::Pending, Some(50.0))];

        let totals = aggregate_debts(&players, &events, &index_records(&records));
        assert_eq!(totals["1"], 50.0);
    }

    #[test]
    fn test_paid_and_absent_contribute_zero() {
        let players = vec![player("1", "Ana")];
        let events = vec![event("10", 50.0), event("11", 30.0)];
        let records = vec![
            record("1", "10", AttendanceStatus::Paid, Some(50.0)),
            record("1", "11", AttendanceStatus::Absent, Some(30.0)),
        ];

        let totals = aggregate_debts(&players, &events, &index_records(&records));
        assert_eq!(totals["1"], 0.0);
    }

    #[test]
    fn test_no_pending_records_means_all_zero() {
        let players = vec![player("1", "Ana"), player("2", "Bob"), player("3", "Cleo")];
        let events = vec![event("10", 50.0), event("11", 25.0)];

        let totals = aggregate_debts(&players, &events, &index_records(&[]));
        assert_eq!(totals.len(), 3);
        assert!(totals.values().all(|&total| total == 0.0));
    }

    #[test]
    fn test_empty_players_yields_empty_mapping() {
        let events = vec![event("10", 50.0)];
        let records = vec![record("1", "10", AttendanceStatus::Pending, None)];

        let totals = aggregate_debts(&[], &events, &index_records(&records));
        assert!(totals.is_empty());
    }

    #[test]
    fn test_empty_events_yields_zero_totals() {
        let players = vec![player("1", "Ana")];
        let records = vec![record("1", "10", AttendanceStatus::Pending, Some(50.0))];

        let totals = aggregate_debts(&players, &[], &index_records(&records));
        assert_eq!(totals["1"], 0.0);
    }

    #[test]
    fn test_pending_contribution_is_monotonic() {
        // The aggregated total is at least the pending record's charge
        let players = vec![player("1", "Ana")];
        let events = vec![event("10", 50.0), event("11", 25.0)];
        let records = vec![
            record("1", "10", AttendanceStatus::Pending, Some(40.0)),
            record("1", "11", AttendanceStatus::Pending, None),
        ];

        let totals = aggregate_debts(&players, &events, &index_records(&records));
        assert!(totals["1"] >= 40.0);
        assert_eq!(totals["1"], 65.0);
    }

    #[test]
    fn test_aggregation_is_idempotent() {
        let players = vec![player("2", "Bob"), player("1", "Ana")];
        let events = vec![event("11", 25.0), event("10", 50.0)];
        let records = vec![
            record("1", "10", AttendanceStatus::Pending, None),
            record("2", "11", AttendanceStatus::Pending, Some(10.0)),
        ];
        let index = index_records(&records);

        let first = aggregate_debts(&players, &events, &index);
        let second = aggregate_debts(&players, &events, &index);
        assert_eq!(first, second);
    }

    #[test]
    fn test_cell_status_defaults_to_absent() {
        let records = vec![record("1", "10", AttendanceStatus::Pending, None)];
        let index = index_records(&records);

        assert_eq!(cell_status(&index, "1", "10"), AttendanceStatus::Pending);
        assert_eq!(cell_status(&index, "1", "99"), AttendanceStatus::Absent);
        assert_eq!(cell_status(&index, "99", "10"), AttendanceStatus::Absent);
    }
}
