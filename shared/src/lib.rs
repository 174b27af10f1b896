use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Player ID in format: "player::epoch_millis"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: String,
    pub name: String,
    /// Jersey number, if assigned
    pub jersey_number: Option<u32>,
    /// Position tags (e.g. "Keeper", "Defender", "Forward")
    pub positions: Vec<String>,
    /// Soft-delete flag; inactive players keep their attendance history
    pub active: bool,
    /// Current goal count
    pub goals: u32,
    /// Goal count at the time goals were last updated, for movement indicators
    pub previous_goals: Option<u32>,
    /// RFC 3339 timestamp
    pub created_at: String,
    /// RFC 3339 timestamp
    pub updated_at: String,
}

/// A chargeable occasion (practice, match or fee) that can generate a
/// per-player charge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub name: String,
    /// ISO 8601 date (YYYY-MM-DD)
    pub date: String,
    /// Non-negative cost charged per attending player
    pub cost: f64,
}

/// Attendance/payment state for one (player, event) cell.
///
/// A missing record is equivalent to `Absent` with no charge; the lookup
/// boundary applies that default, never the callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttendanceStatus {
    Pending,
    Paid,
    Absent,
}

/// Visual weight for an attendance status symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emphasis {
    Positive,
    Negative,
    Muted,
}

/// Display mapping for one attendance status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusDisplay {
    pub symbol: &'static str,
    pub emphasis: Emphasis,
}

impl AttendanceStatus {
    /// The toggle cycle: Absent -> Pending -> Paid -> Absent -> ...
    pub fn next(self) -> Self {
        match self {
            AttendanceStatus::Absent => AttendanceStatus::Pending,
            AttendanceStatus::Pending => AttendanceStatus::Paid,
            AttendanceStatus::Paid => AttendanceStatus::Absent,
        }
    }

    /// Fixed symbol/emphasis mapping for rendering a cell
    pub fn display(self) -> StatusDisplay {
        match self {
            AttendanceStatus::Paid => StatusDisplay {
                symbol: "✓",
                emphasis: Emphasis::Positive,
            },
            AttendanceStatus::Pending => StatusDisplay {
                symbol: "X",
                emphasis: Emphasis::Negative,
            },
            AttendanceStatus::Absent => StatusDisplay {
                symbol: "-",
                emphasis: Emphasis::Muted,
            },
        }
    }
}

impl Default for AttendanceStatus {
    fn default() -> Self {
        AttendanceStatus::Absent
    }
}

/// One attendance record per (player, event) pair.
///
/// Stored under the deterministic ID `attendance::<player_id>::<event_id>`,
/// which enforces pair uniqueness at the store-key level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub player_id: String,
    pub event_id: String,
    pub status: AttendanceStatus,
    /// Charge snapshotted from the event's cost at transition time.
    /// Once written it is not recomputed from the event unless the cell
    /// is toggled again.
    pub applied_charge: Option<f64>,
}

impl AttendanceRecord {
    /// Deterministic document ID for a (player, event) pair
    pub fn pair_id(player_id: &str, event_id: &str) -> String {
        format!("attendance::{}::{}", player_id, event_id)
    }
}

/// One row of a league table, scoped to a named group/division.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamStandingRow {
    pub id: String,
    pub group: String,
    pub team: String,
    pub played: u32,
    pub won: u32,
    pub drawn: u32,
    pub lost: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    /// Derived: goals_for - goals_against
    pub goal_difference: i32,
    /// Derived: 3 * won + drawn
    pub points: u32,
}

impl TeamStandingRow {
    pub fn generate_id(epoch_millis: u64) -> String {
        format!("standing::{}", epoch_millis)
    }

    pub fn computed_goal_difference(goals_for: u32, goals_against: u32) -> i32 {
        goals_for as i32 - goals_against as i32
    }

    pub fn computed_points(won: u32, drawn: u32) -> u32 {
        won * 3 + drawn
    }

    /// Recompute the derived fields from the raw aggregates
    pub fn refresh_derived(&mut self) {
        self.goal_difference = Self::computed_goal_difference(self.goals_for, self.goals_against);
        self.points = Self::computed_points(self.won, self.drawn);
    }
}

/// A scheduled or completed match.
///
/// A match without a score is upcoming; assigning a score completes it.
/// The model does not forbid re-editing the score afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub id: String,
    /// ISO 8601 date (YYYY-MM-DD)
    pub date: String,
    /// 24h clock (HH:MM)
    pub time: String,
    pub venue: String,
    pub opponent: String,
    /// Display names of called-up players
    pub called_up: Vec<String>,
    /// Final score string (e.g. "4-2"); None while upcoming
    pub score: Option<String>,
}

impl Match {
    pub fn generate_id(epoch_millis: u64) -> String {
        format!("match::{}", epoch_millis)
    }

    /// Parse the match date; malformed dates are an error, not a panic
    pub fn parsed_date(&self) -> Result<NaiveDate, chrono::ParseError> {
        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d")
    }
}

/// Movement of a ranked row relative to the previous snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RankDelta {
    Up,
    Down,
    Same,
}

/// Presentation-only grouping of standings rows by rank position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RankBand {
    /// Ranks 1-8
    Top,
    /// Ranks 9-16
    Middle,
    /// Ranks 17-24
    Lower,
    /// Everything below
    Remainder,
}

impl RankBand {
    /// Band for a 1-based rank position
    pub fn for_rank(rank: usize) -> Self {
        match rank {
            1..=8 => RankBand::Top,
            9..=16 => RankBand::Middle,
            17..=24 => RankBand::Lower,
            _ => RankBand::Remainder,
        }
    }
}

// ---------------------------------------------------------------------------
// Roster management DTOs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreatePlayerRequest {
    pub name: String,
    pub jersey_number: Option<u32>,
    #[serde(default)]
    pub positions: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UpdatePlayerRequest {
    pub name: Option<String>,
    pub jersey_number: Option<u32>,
    pub positions: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SetPlayerActiveRequest {
    pub active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlayerResponse {
    pub player: Player,
    pub success_message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlayerListResponse {
    pub players: Vec<Player>,
}

// ---------------------------------------------------------------------------
// Event management DTOs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreateEventRequest {
    pub name: String,
    pub cost: f64,
    /// ISO 8601 date (YYYY-MM-DD)
    pub date: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UpdateEventRequest {
    pub name: Option<String>,
    pub cost: Option<f64>,
    pub date: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EventResponse {
    pub event: Event,
    pub success_message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EventListResponse {
    pub events: Vec<Event>,
}

// ---------------------------------------------------------------------------
// Attendance / debt ledger DTOs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToggleAttendanceRequest {
    pub player_id: String,
    pub event_id: String,
}

/// `applied` is false when the cell already had a write in flight and the
/// trigger was ignored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToggleAttendanceResponse {
    pub applied: bool,
    pub record: Option<AttendanceRecord>,
}

/// One cell of the debt grid
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AttendanceCell {
    pub event_id: String,
    pub status: AttendanceStatus,
}

/// One player row of the debt grid, cells in event-column order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DebtRow {
    pub player_id: String,
    pub player_name: String,
    pub total_due: f64,
    pub cells: Vec<AttendanceCell>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DebtTableResponse {
    /// Column headers, ordered by event date ascending
    pub events: Vec<Event>,
    /// Active players ordered by display name
    pub rows: Vec<DebtRow>,
}

// ---------------------------------------------------------------------------
// Standings DTOs
// ---------------------------------------------------------------------------

/// Raw aggregates for one standings row; derived fields are recomputed
/// server-side on every write.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StandingRowInput {
    pub team: String,
    pub played: u32,
    pub won: u32,
    pub drawn: u32,
    pub lost: u32,
    pub goals_for: u32,
    pub goals_against: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UpsertStandingRowRequest {
    /// Existing row to edit; when absent, a row with the same (team, group)
    /// is updated in place, otherwise a new row is inserted.
    pub id: Option<String>,
    pub group: String,
    pub team: String,
    pub played: u32,
    pub won: u32,
    pub drawn: u32,
    pub lost: u32,
    pub goals_for: u32,
    pub goals_against: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StandingRowResponse {
    pub row: TeamStandingRow,
    pub success_message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReplaceStandingsRequest {
    pub rows: Vec<StandingRowInput>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReplaceStandingsResponse {
    pub installed: usize,
    pub archived: usize,
    pub success_message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RankedStandingRow {
    /// 1-based position under the points/difference/goals-for order
    pub rank: usize,
    /// Movement versus the previous snapshot; None for first appearances
    pub delta: Option<RankDelta>,
    pub band: RankBand,
    pub row: TeamStandingRow,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StandingsTableResponse {
    pub group: String,
    pub rows: Vec<RankedStandingRow>,
}

// ---------------------------------------------------------------------------
// Goal-scorer DTOs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UpdateGoalsRequest {
    pub player_id: String,
    pub goals: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScorerRow {
    pub rank: usize,
    /// Compares current goals against the previous-goals snapshot;
    /// None when no snapshot exists yet
    pub delta: Option<RankDelta>,
    pub player_id: String,
    pub name: String,
    pub goals: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScorerTableResponse {
    pub rows: Vec<ScorerRow>,
}

// ---------------------------------------------------------------------------
// Match DTOs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreateMatchRequest {
    /// ISO 8601 date (YYYY-MM-DD)
    pub date: String,
    /// 24h clock (HH:MM)
    pub time: String,
    pub venue: String,
    pub opponent: String,
    #[serde(default)]
    pub called_up: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SetScoreRequest {
    pub score: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SetCallUpsRequest {
    pub called_up: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchResponse {
    pub match_entry: Match,
    pub success_message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchListResponse {
    pub matches: Vec<Match>,
}

/// Matches split around an explicit reference date
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchScheduleResponse {
    pub upcoming: Vec<Match>,
    pub past: Vec<Match>,
}

// ---------------------------------------------------------------------------
// ID helpers
// ---------------------------------------------------------------------------

impl Player {
    /// Generate a player ID based on timestamp
    pub fn generate_id(epoch_millis: u64) -> String {
        format!("player::{}", epoch_millis)
    }

    /// Parse a player ID to extract the timestamp
    pub fn parse_id(id: &str) -> Result<u64, EntityIdError> {
        parse_prefixed_id(id, "player")
    }
}

impl Event {
    /// Generate an event ID based on timestamp
    pub fn generate_id(epoch_millis: u64) -> String {
        format!("event::{}", epoch_millis)
    }

    /// Parse an event ID to extract the timestamp
    pub fn parse_id(id: &str) -> Result<u64, EntityIdError> {
        parse_prefixed_id(id, "event")
    }
}

fn parse_prefixed_id(id: &str, prefix: &str) -> Result<u64, EntityIdError> {
    let parts: Vec<&str> = id.split("::").collect();
    if parts.len() != 2 || parts[0] != prefix {
        return Err(EntityIdError::InvalidFormat);
    }
    parts[1]
        .parse::<u64>()
        .map_err(|_| EntityIdError::InvalidTimestamp)
}

#[derive(Debug, Clone, PartialEq)]
pub enum EntityIdError {
    InvalidFormat,
    InvalidTimestamp,
}

impl fmt::Display for EntityIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityIdError::InvalidFormat => write!(f, "Invalid entity ID format"),
            EntityIdError::InvalidTimestamp => write!(f, "Invalid timestamp in entity ID"),
        }
    }
}

impl std::error::Error for EntityIdError {}
