use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use uuid::Uuid;

/// Generated identifier carried by every record.
///
/// The store still addresses records by position; the id only lets the form
/// find the record it is editing after other rows moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub Uuid);

impl RecordId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RecordId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ReferralSource {
    #[default]
    Unset,
    Internet,
    Friend,
    Advertisement,
}

impl ReferralSource {
    pub const ALL: [ReferralSource; 4] = [
        ReferralSource::Unset,
        ReferralSource::Internet,
        ReferralSource::Friend,
        ReferralSource::Advertisement,
    ];

    pub fn as_wire(self) -> &'static str {
        match self {
            ReferralSource::Unset => "",
            ReferralSource::Internet => "internet",
            ReferralSource::Friend => "friend",
            ReferralSource::Advertisement => "advertisement",
        }
    }

    /// Unknown values, including the dropdown placeholder text, read as unset.
    pub fn from_wire(value: &str) -> Self {
        match value.trim() {
            "internet" => ReferralSource::Internet,
            "friend" => ReferralSource::Friend,
            "advertisement" => ReferralSource::Advertisement,
            _ => ReferralSource::Unset,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ReferralSource::Unset => "Select an option",
            ReferralSource::Internet => "Internet",
            ReferralSource::Friend => "Friend",
            ReferralSource::Advertisement => "Advertisement",
        }
    }
}

impl Serialize for ReferralSource {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_wire())
    }
}

impl<'de> Deserialize<'de> for ReferralSource {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Value::deserialize(deserializer)?;
        Ok(match raw {
            Value::String(text) => ReferralSource::from_wire(&text),
            _ => ReferralSource::Unset,
        })
    }
}

/// A 1-5 score picked from the emoji row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Rating(u8);

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(value: u8) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&value).then_some(Self(value))
    }

    /// Rating for the zero-based icon position in the picker.
    pub fn from_index(index: usize) -> Option<Self> {
        index
            .checked_add(1)
            .and_then(|value| u8::try_from(value).ok())
            .and_then(Self::new)
    }

    pub fn get(self) -> u8 {
        self.0
    }

    pub fn index(self) -> usize {
        usize::from(self.0 - 1)
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Ratings travel as a bare number when set and as `""` when unset.
mod rating_wire {
    use super::*;

    pub fn serialize<S: Serializer>(
        value: &Option<Rating>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(rating) => serializer.serialize_u8(rating.get()),
            None => serializer.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Rating>, D::Error> {
        let raw = Value::deserialize(deserializer)?;
        let parsed = match raw {
            Value::Number(number) => number.as_u64().and_then(|n| u8::try_from(n).ok()),
            Value::String(text) => text.trim().parse::<u8>().ok(),
            _ => None,
        };
        Ok(parsed.and_then(Rating::new))
    }
}

fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let raw = Value::deserialize(deserializer)?;
    Ok(match raw {
        Value::String(text) => text,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextField {
    FirstName,
    LastName,
    Email,
    Phone,
    Source,
    Feedback,
}

impl TextField {
    pub const ALL: [TextField; 6] = [
        TextField::FirstName,
        TextField::LastName,
        TextField::Email,
        TextField::Phone,
        TextField::Source,
        TextField::Feedback,
    ];

    pub fn wire_name(self) -> &'static str {
        match self {
            TextField::FirstName => "firstName",
            TextField::LastName => "lastName",
            TextField::Email => "email",
            TextField::Phone => "phone",
            TextField::Source => "source",
            TextField::Feedback => "feedback",
        }
    }

    pub fn from_wire_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.wire_name() == name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RatingField {
    Registration,
    Navigation,
}

impl RatingField {
    pub const ALL: [RatingField; 2] = [RatingField::Registration, RatingField::Navigation];

    pub fn wire_name(self) -> &'static str {
        match self {
            RatingField::Registration => "registrationRating",
            RatingField::Navigation => "navigationRating",
        }
    }

    pub fn from_wire_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.wire_name() == name)
    }
}

/// One submitted feedback form.
///
/// Serializes with the camelCase keys of the browser form so data written by
/// either side loads in the other. Equality compares field values and ignores
/// `id`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FeedbackRecord {
    #[serde(deserialize_with = "lenient_text")]
    pub first_name: String,
    #[serde(deserialize_with = "lenient_text")]
    pub last_name: String,
    #[serde(deserialize_with = "lenient_text")]
    pub email: String,
    #[serde(deserialize_with = "lenient_text")]
    pub phone: String,
    pub source: ReferralSource,
    #[serde(deserialize_with = "lenient_text")]
    pub feedback: String,
    #[serde(with = "rating_wire")]
    pub registration_rating: Option<Rating>,
    #[serde(with = "rating_wire")]
    pub navigation_rating: Option<Rating>,
    pub id: RecordId,
}

impl FeedbackRecord {
    pub fn text(&self, field: TextField) -> &str {
        match field {
            TextField::FirstName => &self.first_name,
            TextField::LastName => &self.last_name,
            TextField::Email => &self.email,
            TextField::Phone => &self.phone,
            TextField::Source => self.source.as_wire(),
            TextField::Feedback => &self.feedback,
        }
    }

    pub fn set_text(&mut self, field: TextField, value: String) {
        match field {
            TextField::FirstName => self.first_name = value,
            TextField::LastName => self.last_name = value,
            TextField::Email => self.email = value,
            TextField::Phone => self.phone = value,
            TextField::Source => self.source = ReferralSource::from_wire(&value),
            TextField::Feedback => self.feedback = value,
        }
    }

    pub fn rating(&self, field: RatingField) -> Option<Rating> {
        match field {
            RatingField::Registration => self.registration_rating,
            RatingField::Navigation => self.navigation_rating,
        }
    }

    pub fn set_rating(&mut self, field: RatingField, rating: Option<Rating>) {
        match field {
            RatingField::Registration => self.registration_rating = rating,
            RatingField::Navigation => self.navigation_rating = rating,
        }
    }

    /// True when every field is empty or unset.
    pub fn is_blank(&self) -> bool {
        TextField::ALL
            .into_iter()
            .all(|field| self.text(field).is_empty())
            && RatingField::ALL
                .into_iter()
                .all(|field| self.rating(field).is_none())
    }
}

impl PartialEq for FeedbackRecord {
    fn eq(&self, other: &Self) -> bool {
        self.first_name == other.first_name
            && self.last_name == other.last_name
            && self.email == other.email
            && self.phone == other.phone
            && self.source == other.source
            && self.feedback == other.feedback
            && self.registration_rating == other.registration_rating
            && self.navigation_rating == other.navigation_rating
    }
}

impl Eq for FeedbackRecord {}
