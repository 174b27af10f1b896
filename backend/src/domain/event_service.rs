use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use tracing::{info, warn};

use shared::{CreateEventRequest, Event, EventListResponse, EventResponse, UpdateEventRequest};

use crate::domain::error::{DomainError, DomainResult};
use crate::storage::repositories::EventRepository;
use crate::storage::store::DocumentStore;

const MAX_NAME_LENGTH: usize = 120;

/// Service for chargeable club events (training sessions, tournaments, fees)
#[derive(Clone)]
pub struct EventService {
    events: EventRepository,
}

impl EventService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            events: EventRepository::new(store),
        }
    }

    pub async fn create_event(&self, request: CreateEventRequest) -> DomainResult<EventResponse> {
        let name = request.name.trim().to_string();
        info!("Creating event: name={} date={}", name, request.date);

        validate_name(&name)?;
        validate_date(&request.date)?;
        validate_cost(request.cost)?;

        let event = Event {
            id: Event::generate_id(Utc::now().timestamp_millis() as u64),
            name,
            date: request.date,
            cost: request.cost,
        };

        self.events.store_event(&event).await?;

        info!("Created event: {} with ID: {}", event.name, event.id);

        Ok(EventResponse {
            event,
            success_message: "Event created successfully".to_string(),
        })
    }

    pub async fn get_event(&self, event_id: &str) -> DomainResult<Option<Event>> {
        Ok(self.events.get_event(event_id).await?)
    }

    /// List events for management, most recent date first. The debt grid
    /// loads its own ascending copy.
    pub async fn list_events(&self) -> DomainResult<EventListResponse> {
        let events = self.events.list_events(true).await?;
        info!("Found {} events", events.len());
        Ok(EventListResponse { events })
    }

    /// Update an event. A cost change only affects cells toggled from
    /// now on; charges already applied keep their snapshot.
    pub async fn update_event(
        &self,
        event_id: &str,
        request: UpdateEventRequest,
    ) -> DomainResult<EventResponse> {
        info!("Updating event: {}", event_id);

        let mut event = self
            .events
            .get_event(event_id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Event not found: {}", event_id)))?;

        if let Some(name) = request.name {
            let name = name.trim().to_string();
            validate_name(&name)?;
            event.name = name;
        }
        if let Some(date) = request.date {
            validate_date(&date)?;
            event.date = date;
        }
        if let Some(cost) = request.cost {
            validate_cost(cost)?;
            if cost != event.cost {
                info!(
                    "Event {} cost changed {} -> {}; existing charges keep their snapshot",
                    event.id, event.cost, cost
                );
            }
            event.cost = cost;
        }

        self.events.store_event(&event).await?;

        Ok(EventResponse {
            event,
            success_message: "Event updated successfully".to_string(),
        })
    }

    /// Hard delete. Attendance records for the event stay behind and
    /// simply stop appearing in the grid.
    pub async fn delete_event(&self, event_id: &str) -> DomainResult<()> {
        let event = self
            .events
            .get_event(event_id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Event not found: {}", event_id)))?;

        warn!("Deleting event {} ({})", event.name, event.id);
        self.events.delete_event(event_id).await?;
        Ok(())
    }
}

fn validate_name(name: &str) -> DomainResult<()> {
    if name.is_empty() {
        return Err(DomainError::validation("Event name cannot be empty"));
    }
    if name.len() > MAX_NAME_LENGTH {
        return Err(DomainError::validation(format!(
            "Event name cannot exceed {} characters",
            MAX_NAME_LENGTH
        )));
    }
    Ok(())
}

fn validate_date(date: &str) -> DomainResult<()> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map(|_| ())
        .map_err(|_| DomainError::validation(format!("Invalid date (expected YYYY-MM-DD): {}", date)))
}

fn validate_cost(cost: f64) -> DomainResult<()> {
    if !cost.is_finite() || cost < 0.0 {
        return Err(DomainError::validation("Event cost must be zero or positive"));
    }
    Ok(())
}
