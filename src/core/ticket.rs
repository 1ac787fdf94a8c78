//! Support ticket identifiers and the record logged for each accepted ticket.
//!
//! Identifiers are the prefix followed by the last six digits of the
//! millisecond timestamp. Two tickets accepted in the same millisecond (or
//! exactly 1000 seconds apart) get the same identifier.

use crate::core::value::FieldValues;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::{SystemTime, UNIX_EPOCH};

pub const SUBMITTED_BY: &str = "Web Form";

pub fn ticket_number(prefix: &str, unix_millis: u128) -> String {
    format!("{prefix}{:06}", unix_millis % 1_000_000)
}

pub fn ticket_number_at(prefix: &str, time: SystemTime) -> String {
    let millis = time
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis())
        .unwrap_or_default();
    ticket_number(prefix, millis)
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketRecord {
    pub ticket_number: String,
    #[serde(flatten)]
    pub values: FieldValues,
    pub timestamp: DateTime<Utc>,
    pub submitted_by: &'static str,
}

impl TicketRecord {
    pub fn new(ticket_number: impl Into<String>, values: FieldValues, at: SystemTime) -> Self {
        Self {
            ticket_number: ticket_number.into(),
            values,
            timestamp: DateTime::<Utc>::from(at),
            submitted_by: SUBMITTED_BY,
        }
    }
}
