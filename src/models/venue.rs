//! Venue model

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Venue {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub capacity: u32,
    #[serde(default)]
    pub facilities: Vec<String>,
    #[serde(default)]
    pub contact_info: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateVenueRequest {
    pub name: String,
    pub address: String,
    pub capacity: u32,
    pub description: String,
    pub contact_info: String,
    pub facilities: Vec<String>,
}

impl CreateVenueRequest {
    /// Add a facility, trimmed. Blank and duplicate entries are ignored.
    pub fn add_facility(&mut self, facility: &str) -> bool {
        let facility = facility.trim();
        if facility.is_empty() || self.facilities.iter().any(|f| f == facility) {
            return false;
        }
        self.facilities.push(facility.to_string());
        true
    }

    /// Check the form before it is sent. Returns the first problem found.
    pub fn validate(&self) -> Result<(), String> {
        let required = [
            ("Name", &self.name),
            ("Address", &self.address),
            ("Description", &self.description),
            ("Contact information", &self.contact_info),
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
