//! Test data helpers for creating credentials and API payloads

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::{json, Value};
use eventdesk::models::{Event, Venue};

/// Bearer credential for a user; valid for a day
pub fn create_test_token(user_id: &str, name: &str, role: &str) -> String {
    let exp = (Utc::now() + Duration::days(1)).timestamp();
    encode(
        &Header::default(),
        &json!({ "id": user_id, "name": name, "role": role, "exp": exp }),
        &EncodingKey::from_secret(b"test-secret"),
    )
    .expect("Failed to encode test token")
}

/// Bearer credential that expired an hour ago
pub fn create_expired_token(role: &str) -> String {
    let exp = (Utc::now() - Duration::hours(1)).timestamp();
    encode(
        &Header::default(),
        &json!({ "id": "expired", "name": "Expired", "role": role, "exp": exp }),
        &EncodingKey::from_secret(b"test-secret"),
    )
    .expect("Failed to encode test token")
}

pub fn event_json(id: &str, title: &str, date: DateTime<Utc>, capacity: u32, attendees: u32) -> Value {
    json!({
        "id": id,
        "title": title,
        "description": format!("About {}", title),
        "date": date.to_rfc3339(),
        "time": "7:00 PM",
        "location": "Main Hall",
        "type": "social",
        "organizer": { "id": "organizer-1", "name": "Olivia Organizer" },
        "capacity": capacity,
        "attendeeCount": attendees,
        "isRegistered": false,
        "hasAttended": false,
        "hasFeedback": false
    })
}

pub fn create_test_event(id: &str, title: &str, date: DateTime<Utc>, capacity: u32, attendees: u32) -> Event {
    serde_json::from_value(event_json(id, title, date, capacity, attendees)).expect("Invalid test event")
}

pub fn venue_json(id: &str, name: &str, address: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "address": address,
        "capacity": 120,
        "facilities": ["Sound system", "Wooden floor"],
        "contactInfo": "venue@example.com",
        "description": "Ballroom with a bar"
    })
}

pub fn create_test_venue(id: &str, name: &str, address: &str) -> Venue {
    serde_json::from_value(venue_json(id, name, address)).expect("Invalid test venue")
}

pub fn feedback_json(id: &str, event_id: &str, rating: u8, comment: &str) -> Value {
    json!({
        "id": id,
        "eventId": event_id,
        "rating": rating,
        "comment": comment,
        "createdAt": Utc::now().to_rfc3339()
    })
}

pub fn profile_json(id: &str, name: &str, role: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "email": format!("{}@example.com", id),
        "role": role,
        "bio": "Dancer",
        "phone": "+1 555 0100"
    })
}
