use std::num::{IntErrorKind, ParseIntError};

use thiserror::Error;

use crate::{
    AudienceBranch, AudienceLogic, BattlegroundDirective, BudgetField, CommandPayload,
    ConstructionMode, ScaleTarget, SegmentKey, ZoneType,
};

#[derive(Debug, Error)]
pub enum CommandParseError {
    #[error("empty command")]
    Empty,
    #[error("unknown command: {0}")]
    UnknownCommand(String),
    #[error("missing argument: {0}")]
    MissingArgument(&'static str),
    #[error("invalid integer '{value}' for {context}: {source}")]
    InvalidInteger {
        value: String,
        context: &'static str,
        source: ParseIntError,
    },
    #[error("invalid construction mode '{0}'")]
    InvalidMode(String),
    #[error("invalid scale target '{0}'")]
    InvalidScaleTarget(String),
    #[error("invalid audience '{0}'")]
    InvalidAudience(String),
    #[error("invalid audience logic '{0}'")]
    InvalidLogic(String),
    #[error("invalid zone type '{0}'")]
    InvalidZone(String),
    #[error("invalid switch '{0}' (expected on/off)")]
    InvalidSwitch(String),
    #[error("invalid battleground directive '{0}'")]
    InvalidDirective(String),
    #[error("invalid budget field '{0}'")]
    InvalidBudgetField(String),
}

/// Parse one line of the text command protocol.
///
/// Lines starting with `#` are treated as empty so scripts can carry comments.
pub fn parse_command_line(input: &str) -> Result<CommandPayload, CommandParseError> {
    let trimmed = input.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Err(CommandParseError::Empty);
    }

    let (verb, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb.to_ascii_lowercase(), rest.trim()),
        None => (trimmed.to_ascii_lowercase(), ""),
    };
    let mut parts = rest.split_whitespace();

    match verb.as_str() {
        "next" => Ok(CommandPayload::NextStep),
        "back" | "prev" => Ok(CommandPayload::PreviousStep),
        "mode" => {
            let token = parts
                .next()
                .ok_or(CommandParseError::MissingArgument("mode"))?;
            Ok(CommandPayload::SetMode {
                mode: parse_mode(token)?,
            })
        }
        // Segment keys embed provider ids, which may contain spaces.
        "toggle" | "select" => Ok(CommandPayload::ToggleSegment {
            key: segment_key(rest)?,
        }),
        "base" => Ok(CommandPayload::ToggleBase {
            key: segment_key(rest)?,
        }),
        "scale" => {
            let target_str = parts
                .next()
                .ok_or(CommandParseError::MissingArgument("target"))?;
            let value_str = parts
                .next()
                .ok_or(CommandParseError::MissingArgument("value"))?;
            let target = parse_scale_target(target_str)?;
            let value = parse_i64(value_str, "scale value")?;
            Ok(CommandPayload::SetScale { target, value })
        }
        "audience" => {
            let token = parts
                .next()
                .ok_or(CommandParseError::MissingArgument("audience"))?;
            Ok(CommandPayload::ToggleAudience {
                branch: parse_branch(token)?,
            })
        }
        "logic" => {
            let token = parts
                .next()
                .ok_or(CommandParseError::MissingArgument("logic"))?;
            Ok(CommandPayload::SetLogic {
                logic: parse_logic(token)?,
            })
        }
        "zone" => {
            let token = parts
                .next()
                .ok_or(CommandParseError::MissingArgument("zone"))?;
            Ok(CommandPayload::SetZoneType {
                zone: parse_zone(token)?,
            })
        }
        "stores" => {
            let value_str = parts
                .next()
                .ok_or(CommandParseError::MissingArgument("stores"))?;
            Ok(CommandPayload::SetMinTotalStores {
                value: parse_i64(value_str, "minimum total stores")?,
            })
        }
        "balance" => {
            let value_str = parts
                .next()
                .ok_or(CommandParseError::MissingArgument("balance"))?;
            Ok(CommandPayload::SetBalance {
                value: parse_i64(value_str, "balance")?,
            })
        }
        "client" => {
            let token = parts
                .next()
                .ok_or(CommandParseError::MissingArgument("switch"))?;
            Ok(CommandPayload::SetClientPresenceFilter {
                enabled: parse_switch(token)?,
            })
        }
        "battleground" | "bg" => {
            let token = parts.next().unwrap_or("apply").to_ascii_lowercase();
            let directive = match token.as_str() {
                "apply" | "on" => BattlegroundDirective::Apply,
                "clear" | "off" => BattlegroundDirective::Clear,
                other => return Err(CommandParseError::InvalidDirective(other.to_string())),
            };
            Ok(CommandPayload::Battleground { directive })
        }
        "budget" => {
            let field_str = parts
                .next()
                .ok_or(CommandParseError::MissingArgument("budget field"))?;
            let field = parse_budget_field(field_str)?;
            let raw = parts.collect::<Vec<_>>().join(" ");
            Ok(CommandPayload::SetBudget { field, raw })
        }
        "name" => Ok(CommandPayload::SetName {
            name: rest.to_string(),
        }),
        "describe" | "description" => Ok(CommandPayload::SetDescription {
            description: rest.to_string(),
        }),
        "reach" => Ok(CommandPayload::SetTargetReach {
            raw: rest.to_string(),
        }),
        "dates" => {
            let start = parts
                .next()
                .ok_or(CommandParseError::MissingArgument("start date"))?;
            let end = parts
                .next()
                .ok_or(CommandParseError::MissingArgument("end date"))?;
            Ok(CommandPayload::SetDates {
                start: start.to_string(),
                end: end.to_string(),
            })
        }
        other => Err(CommandParseError::UnknownCommand(other.to_string())),
    }
}

fn segment_key(rest: &str) -> Result<SegmentKey, CommandParseError> {
    if rest.is_empty() {
        return Err(CommandParseError::MissingArgument("segment"));
    }
    Ok(SegmentKey::from(rest))
}

/// Integers too wide for `i64` saturate; the engine clamps them afterwards.
fn parse_i64(value: &str, context: &'static str) -> Result<i64, CommandParseError> {
    match value.parse::<i64>() {
        Ok(parsed) => Ok(parsed),
        Err(source) => match source.kind() {
            IntErrorKind::PosOverflow => Ok(i64::MAX),
            IntErrorKind::NegOverflow => Ok(i64::MIN),
            _ => Err(CommandParseError::InvalidInteger {
                value: value.to_string(),
                context,
                source,
            }),
        },
    }
}

fn parse_mode(token: &str) -> Result<ConstructionMode, CommandParseError> {
    match token.to_ascii_lowercase().as_str() {
        "validation" | "validate" | "v" => Ok(ConstructionMode::Validation),
        "extension" | "extend" | "e" => Ok(ConstructionMode::Extension),
        other => Err(CommandParseError::InvalidMode(other.to_string())),
    }
}

fn parse_scale_target(token: &str) -> Result<ScaleTarget, CommandParseError> {
    match token.to_ascii_lowercase().as_str() {
        "primary" | "p" => Ok(ScaleTarget::Primary),
        "secondary" | "s" => Ok(ScaleTarget::Secondary),
        "profile" => Ok(ScaleTarget::Profile),
        other => Err(CommandParseError::InvalidScaleTarget(other.to_string())),
    }
}

fn parse_branch(token: &str) -> Result<AudienceBranch, CommandParseError> {
    match token.to_ascii_lowercase().as_str() {
        "primary" | "p" => Ok(AudienceBranch::Primary),
        "secondary" | "s" => Ok(AudienceBranch::Secondary),
        other => Err(CommandParseError::InvalidAudience(other.to_string())),
    }
}

fn parse_logic(token: &str) -> Result<AudienceLogic, CommandParseError> {
    match token.to_ascii_lowercase().as_str() {
        "and" | "&" => Ok(AudienceLogic::And),
        "or" | "|" => Ok(AudienceLogic::Or),
        other => Err(CommandParseError::InvalidLogic(other.to_string())),
    }
}

fn parse_zone(token: &str) -> Result<ZoneType, CommandParseError> {
    match token.to_ascii_lowercase().as_str() {
        "postcode" | "district" => Ok(ZoneType::Postcode),
        "hex" | "h3" => Ok(ZoneType::Hex),
        other => Err(CommandParseError::InvalidZone(other.to_string())),
    }
}

fn parse_switch(token: &str) -> Result<bool, CommandParseError> {
    match token.to_ascii_lowercase().as_str() {
        "on" | "true" | "yes" | "1" => Ok(true),
        "off" | "false" | "no" | "0" => Ok(false),
        other => Err(CommandParseError::InvalidSwitch(other.to_string())),
    }
}

fn parse_budget_field(token: &str) -> Result<BudgetField, CommandParseError> {
    match token.to_ascii_lowercase().as_str() {
        "linear" | "tvr" => Ok(BudgetField::Linear),
        "ctv" => Ok(BudgetField::Ctv),
        "ooh" => Ok(BudgetField::Ooh),
        "overall" | "total" => Ok(BudgetField::Overall),
        other => Err(CommandParseError::InvalidBudgetField(other.to_string())),
    }
}
