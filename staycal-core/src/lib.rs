//! Core types for the staycal ecosystem.
//!
//! This crate provides the types shared by the staycal CLI and the
//! notification service:
//! - `Visit`, `Visitor` and `Profile` rows as the reservation service
//!   stores them
//! - the visit review state machine
//! - pure calendar logic: day intervals and the month grid view-model

pub mod config;
pub mod date_span;
pub mod error;
pub mod grid;
pub mod palette;
pub mod profile;
pub mod visit;
pub mod visitor;

pub use date_span::DateSpan;
pub use error::{StaycalError, StaycalResult};
pub use grid::{DayCell, MonthGrid, VisitSegment};
pub use palette::Color;
pub use profile::{OwnerStatus, Profile};
pub use visit::{Decision, Visit, VisitStatus};
pub use visitor::Visitor;
