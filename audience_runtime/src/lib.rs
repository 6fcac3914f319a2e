//! Shared runtime utilities for the audience builder.
//!
//! This crate re-exports the data contracts from `audience_schema` and defines
//! the session command set plus its text form, without depending on the
//! sizing engine in `audience_core`.

pub mod command_text;
pub mod commands;

pub use audience_schema::*;
pub use command_text::{parse_command_line, CommandParseError};
pub use commands::{BattlegroundDirective, BudgetField, CommandPayload, ScaleTarget};
