use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use tracing::{info, warn};

use shared::{
    CreateMatchRequest, Match, MatchListResponse, MatchResponse, MatchScheduleResponse,
    SetCallUpsRequest, SetScoreRequest,
};

use crate::domain::error::{DomainError, DomainResult};
use crate::storage::repositories::MatchRepository;
use crate::storage::store::DocumentStore;

/// Service for scheduled and completed matches
#[derive(Clone)]
pub struct MatchService {
    matches: MatchRepository,
}

impl MatchService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            matches: MatchRepository::new(store),
        }
    }

    /// Schedule a match. A new match has no score and counts as upcoming.
    pub async fn create_match(&self, request: CreateMatchRequest) -> DomainResult<MatchResponse> {
        let opponent = request.opponent.trim().to_string();
        let venue = request.venue.trim().to_string();
        info!("Creating match: vs {} on {}", opponent, request.date);

        if opponent.is_empty() {
            return Err(DomainError::validation("Opponent cannot be empty"));
        }
        if venue.is_empty() {
            return Err(DomainError::validation("Venue cannot be empty"));
        }
        validate_date(&request.date)?;
        validate_time(&request.time)?;

        let match_entry = Match {
            id: Match::generate_id(Utc::now().timestamp_millis() as u64),
            date: request.date,
            time: request.time,
            venue,
            opponent,
            called_up: request.called_up,
            score: None,
        };
        self.matches.store_match(&match_entry).await?;

        Ok(MatchResponse {
            match_entry,
            success_message: "Match created successfully".to_string(),
        })
    }

    /// All matches, most recent date first
    pub async fn list_matches(&self) -> DomainResult<MatchListResponse> {
        let matches = self.matches.list_matches().await?;
        info!("Found {} matches", matches.len());
        Ok(MatchListResponse { matches })
    }

    /// Matches split around the given date: `upcoming` is everything on
    /// or after it, `past` the rest. Malformed dates sort as past so a
    /// bad document cannot hide in the upcoming list forever.
    pub async fn schedule(&self, reference: NaiveDate) -> DomainResult<MatchScheduleResponse> {
        let matches = self.matches.list_matches().await?;

        let mut upcoming = Vec::new();
        let mut past = Vec::new();
        for match_entry in matches {
            match match_entry.parsed_date() {
                Ok(date) if date >= reference => upcoming.push(match_entry),
                Ok(_) => past.push(match_entry),
                Err(_) => {
                    warn!(
                        "Match {} has an unparsable date {:?}; listing it as past",
                        match_entry.id, match_entry.date
                    );
                    past.push(match_entry);
                }
            }
        }
        // The list comes date-descending; upcoming reads better soonest-first.
        upcoming.reverse();

        Ok(MatchScheduleResponse { upcoming, past })
    }

    /// Record (or correct) a final score. Scoring marks the match
    /// completed; overwriting an existing score is allowed.
    pub async fn set_score(
        &self,
        match_id: &str,
        request: SetScoreRequest,
    ) -> DomainResult<MatchResponse> {
        let score = request.score.trim().to_string();
        if score.is_empty() {
            return Err(DomainError::validation("Score cannot be empty"));
        }

        let mut match_entry = self.require_match(match_id).await?;
        info!(
            "Setting score for match {} vs {}: {:?} -> {}",
            match_entry.id, match_entry.opponent, match_entry.score, score
        );
        match_entry.score = Some(score);
        self.matches.store_match(&match_entry).await?;

        Ok(MatchResponse {
            match_entry,
            success_message: "Score recorded".to_string(),
        })
    }

    /// Replace the called-up list wholesale
    pub async fn set_call_ups(
        &self,
        match_id: &str,
        request: SetCallUpsRequest,
    ) -> DomainResult<MatchResponse> {
        let mut match_entry = self.require_match(match_id).await?;
        info!(
            "Setting {} call-ups for match {}",
            request.called_up.len(),
            match_entry.id
        );
        match_entry.called_up = request.called_up;
        self.matches.store_match(&match_entry).await?;

        Ok(MatchResponse {
            match_entry,
            success_message: "Call-ups updated".to_string(),
        })
    }

    pub async fn delete_match(&self, match_id: &str) -> DomainResult<()> {
        let match_entry = self.require_match(match_id).await?;
        info!("Deleting match {} vs {}", match_entry.id, match_entry.opponent);
        self.matches.delete_match(match_id).await?;
        Ok(())
    }

    async fn require_match(&self, match_id: &str) -> DomainResult<Match> {
        self.matches
            .get_match(match_id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Match not found: {}", match_id)))
    }
}

fn validate_date(date: &str) -> DomainResult<()> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map(|_| ())
        .map_err(|_| DomainError::validation(format!("Invalid date (expected YYYY-MM-DD): {}", date)))
}

fn validate_time(time: &str) -> DomainResult<()> {
    chrono::NaiveTime::parse_from_str(time, "%H:%M")
        .map(|_| ())
        .map_err(|_| DomainError::validation(format!("Invalid time (expected HH:MM): {}", time)))
}
