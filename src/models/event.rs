//! Event model

use serde::{Deserialize, Serialize};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Event instant. Bare dates are read as midnight UTC.
    #[serde(with = "event_date")]
    pub date: DateTime<Utc>,
    /// Display label only; `date` is authoritative for comparisons
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub location: String,
    #[serde(rename = "type", default)]
    pub event_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organizer: Option<Organizer>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organizer_id: Option<String>,
    #[serde(default)]
    pub capacity: u32,
    #[serde(default, alias = "attendees")]
    pub attendee_count: u32,
    #[serde(default)]
    pub is_registered: bool,
    #[serde(default, alias = "isAttended")]
    pub has_attended: bool,
    #[serde(default)]
    pub has_feedback: bool,
}

/// Collection endpoints send the organizer's name, detail endpoints the person
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Organizer {
    Person { id: String, name: String },
    Name(String),
}

impl Event {
    /// Id of the owning organizer, when the payload carries it
    pub fn organizer_id(&self) -> Option<&str> {
        match (&self.organizer_id, &self.organizer) {
            (Some(id), _) => Some(id.as_str()),
            (None, Some(Organizer::Person { id, .. })) => Some(id.as_str()),
            _ => None,
        }
    }

    pub fn organizer_name(&self) -> Option<&str> {
        match &self.organizer {
            Some(Organizer::Person { name, .. }) | Some(Organizer::Name(name)) => Some(name.as_str()),
            None => None,
        }
    }

    pub fn is_past(&self, now: DateTime<Utc>) -> bool {
        self.date < now
    }

    pub fn is_full(&self) -> bool {
        self.attendee_count >= self.capacity
    }

    pub fn seats_left(&self) -> u32 {
        self.capacity.saturating_sub(self.attendee_count)
    }
}

/// Query filters understood by `GET /api/event`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EventQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registered: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attended: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub venue: Option<String>,
}

impl EventQuery {
    pub fn registered() -> Self {
        Self { registered: Some(true), ..Self::default() }
    }

    pub fn attended() -> Self {
        Self { attended: Some(true), ..Self::default() }
    }

    pub fn at_venue(venue_id: impl Into<String>) -> Self {
        Self { venue: Some(venue_id.into()), ..Self::default() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
    pub title: String,
    pub description: String,
    pub date: NaiveDate,
    pub time: String,
    pub location: String,
    #[serde(rename = "type")]
    pub event_type: String,
    pub capacity: u32,
}

impl CreateEventRequest {
    /// Check the form before it is sent. Returns the first problem found.
    pub fn validate(&self) -> Result<(), String> {
        let required = [
            ("Title", &self.title),
            ("Description", &self.description),
            ("Time", &self.time),
            ("Location", &self.location),
            ("Event type", &self.event_type),
        ];
        for (label, value) in required {
            if value.trim().is_empty() {
                return Err(format!("{} is required", label));
            }
        }
        if self.capacity == 0 {
            return Err("Capacity must be at least 1".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkAttendanceRequest {
    pub code: String,
}

/// Parse the date formats the API is known to send
pub fn parse_event_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return Some(instant.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

mod event_date {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&date.to_rfc3339_opts(SecondsFormat::Secs, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_event_date(&raw)
            .ok_or_else(|| de::Error::custom(format!("unrecognized event date: {}", raw)))
    }
}
