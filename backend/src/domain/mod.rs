//! # Domain Module
//!
//! Business logic for the club tracker: roster, chargeable events, the
//! attendance/debt ledger, league standings, goal scorers and matches.
//! It operates independently of the HTTP layer and of any concrete
//! document store.
//!
//! ## Module Organization
//!
//! - **ledger**: pure debt aggregation over attendance records
//! - **ranking**: movement indicators for ranked lists
//! - **standings**: the league-table total order
//! - ***_service**: one service per managed area, each owning its
//!   repositories and validation
//!
//! ## Business Rules
//!
//! - Attendance cells cycle Absent → Pending → Paid → Absent
//! - Only `Pending` charges count toward a player's outstanding balance
//! - Standings points and goal difference are derived, never stored raw
//! - Rank movement always compares against an explicit previous snapshot

pub mod attendance_service;
pub mod error;
pub mod event_service;
pub mod ledger;
pub mod match_service;
pub mod player_service;
pub mod ranking;
pub mod scorer_service;
pub mod standings;
pub mod standings_service;

pub use attendance_service::AttendanceService;
pub use error::{DomainError, DomainResult};
pub use event_service::EventService;
pub use match_service::MatchService;
pub use player_service::PlayerService;
pub use scorer_service::ScorerService;
pub use standings_service::StandingsService;
