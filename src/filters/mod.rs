//! List filtering
//!
//! A [`FilterSpec`] narrows a fetched collection by a free-text query, exact
//! category values and a [`DateBucket`]. All active parts must match. The
//! result keeps the input order and an empty spec returns every item.

pub mod date_bucket;

pub use date_bucket::DateBucket;

use chrono::{DateTime, TimeZone, Utc};
use crate::models::{Event, Venue};

/// Text fields a query can be matched against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextField {
    Title,
    Description,
    Name,
    Address,
}

/// Fields with a closed set of values, filtered by exact match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CategoryField {
    Type,
    Location,
}

/// Something a list view can filter
pub trait Filterable {
    fn text_field(&self, field: TextField) -> Option<&str>;

    /// Fields searched when the spec does not name any
    fn default_text_fields() -> &'static [TextField]
    where
        Self: Sized;

    fn category(&self, _field: CategoryField) -> Option<&str> {
        None
    }

    /// Instant used by date buckets; items without one only match [`DateBucket::Any`]
    fn instant(&self) -> Option<DateTime<Utc>> {
        None
    }
}

impl<T: Filterable> Filterable for &T {
    fn text_field(&self, field: TextField) -> Option<&str> {
        (**self).text_field(field)
    }

    fn default_text_fields() -> &'static [TextField] {
        T::default_text_fields()
    }

    fn category(&self, field: CategoryField) -> Option<&str> {
        (**self).category(field)
    }

    fn instant(&self) -> Option<DateTime<Utc>> {
        (**self).instant()
    }
}

impl Filterable for Event {
    fn text_field(&self, field: TextField) -> Option<&str> {
        match field {
            TextField::Title => Some(&self.title),
            TextField::Description => Some(&self.description),
            TextField::Name | TextField::Address => None,
        }
    }

    fn default_text_fields() -> &'static [TextField] {
        &[TextField::Title, TextField::Description]
    }

    fn category(&self, field: CategoryField) -> Option<&str> {
        match field {
            CategoryField::Type => Some(&self.event_type),
            CategoryField::Location => Some(&self.location),
        }
    }

    fn instant(&self) -> Option<DateTime<Utc>> {
        Some(self.date)
    }
}

impl Filterable for Venue {
    fn text_field(&self, field: TextField) -> Option<&str> {
        match field {
            TextField::Name => Some(&self.name),
            TextField::Address => Some(&self.address),
            TextField::Title | TextField::Description => None,
        }
    }

    fn default_text_fields() -> &'static [TextField] {
        &[TextField::Name, TextField::Address]
    }
}

/// Filter state of one list view
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSpec {
    pub query: String,
    /// Overrides the item type's default text fields
    pub text_fields: Option<Vec<TextField>>,
    pub categories: Vec<(CategoryField, String)>,
    pub bucket: DateBucket,
}

impl FilterSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    pub fn with_text_fields(mut self, fields: &[TextField]) -> Self {
        self.text_fields = Some(fields.to_vec());
        self
    }

    /// Require an exact category value. Empty and "all" leave the field unfiltered.
    pub fn with_category(mut self, field: CategoryField, value: impl Into<String>) -> Self {
        let value = value.into();
        let value = value.trim();
        if !value.is_empty() && !value.eq_ignore_ascii_case("all") {
            self.categories.retain(|(existing, _)| *existing != field);
            self.categories.push((field, value.to_string()));
        }
        self
    }

    pub fn with_bucket(mut self, bucket: DateBucket) -> Self {
        self.bucket = bucket;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.query.is_empty() && self.categories.is_empty() && self.bucket == DateBucket::Any
    }

    pub fn matches<T: Filterable, Tz: TimeZone>(&self, item: &T, now: &DateTime<Tz>) -> bool {
        self.matches_query(item) && self.matches_categories(item) && self.matches_bucket(item, now)
    }

    /// Items that match, in their original order
    pub fn apply<'a, T: Filterable, Tz: TimeZone>(&self, items: &'a [T], now: &DateTime<Tz>) -> Vec<&'a T> {
        items.iter().filter(|item| self.matches(*item, now)).collect()
    }

    fn matches_query<T: Filterable>(&self, item: &T) -> bool {
        let needle = self.query.to_lowercase();
        if needle.is_empty() {
            return true;
        }
        let fields = self.text_fields.as_deref().unwrap_or_else(|| T::default_text_fields());
        fields
            .iter()
            .filter_map(|field| item.text_field(*field))
            .any(|text| text.to_lowercase().contains(&needle))
    }

    fn matches_categories<T: Filterable>(&self, item: &T) -> bool {
        self.categories
            .iter()
            .all(|(field, wanted)| item.category(*field) == Some(wanted.as_str()))
    }

    fn matches_bucket<T: Filterable, Tz: TimeZone>(&self, item: &T, now: &DateTime<Tz>) -> bool {
        match (self.bucket, item.instant()) {
            (DateBucket::Any, _) => true,
            (bucket, Some(instant)) => bucket.matches(instant, now),
            (_, None) => false,
        }
    }
}

/// Distinct non-empty values of a category, in first-seen order
pub fn distinct_values<T: Filterable>(items: &[T], field: CategoryField) -> Vec<String> {
    let mut values: Vec<String> = Vec::new();
    for value in items.iter().filter_map(|item| item.category(field)) {
        if !value.is_empty() && !values.iter().any(|seen| seen == value) {
            values.push(value.to_string());
        }
    }
    values
}
