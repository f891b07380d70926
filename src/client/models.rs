//! Wire types for the safety backend's JSON API.
//!
//! The backend is the source of truth for every entity here; the client only
//! keeps transient copies. Documents coming from the backend identify trips
//! and contacts with `_id`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// Session Types
// =============================================================================

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct User {
    #[serde(default, alias = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
}

/// Token plus profile, as cached in browser storage.
#[derive(Clone, Debug, PartialEq)]
pub struct Session {
    pub token: String,
    pub user: User,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

impl From<AuthResponse> for Session {
    fn from(auth: AuthResponse) -> Self {
        Session {
            token: auth.token,
            user: auth.user,
        }
    }
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

// =============================================================================
// Trip Types
// =============================================================================

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Trip {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub destination: String,
    #[serde(default)]
    pub interval_minutes: Option<u32>,
    #[serde(with = "timestamp")]
    pub next_check_due: DateTime<Utc>,
    #[serde(default)]
    pub status: Option<String>,
}

/// Wrapper for /trip/active response (`trip` is null when none is active)
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct ActiveTripResponse {
    #[serde(default)]
    pub trip: Option<Trip>,
}

/// Wrapper for POST /trip response
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct TripResponse {
    pub trip: Trip,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct StartTripRequest {
    pub destination: String,
    pub interval_minutes: u32,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct CheckInRequest {
    pub trip_id: String,
    pub lat: f64,
    pub lng: f64,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct CheckInResponse {
    #[serde(with = "timestamp")]
    pub next_check_due: DateTime<Utc>,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct SosRequest {
    pub lat: f64,
    pub lng: f64,
    pub reason: String,
}

// =============================================================================
// Contact Types
// =============================================================================

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Contact {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub name: String,
    pub phone: String,
    /// Stored as an empty string by the backend when the user gave none
    #[serde(default)]
    pub email: Option<String>,
}

impl Contact {
    pub fn display_email(&self) -> Option<&str> {
        self.email.as_deref().filter(|e| !e.is_empty())
    }
}

/// Wrapper for GET /contacts response
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct ContactsResponse {
    #[serde(default)]
    pub contacts: Vec<Contact>,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct NewContact {
    pub name: String,
    pub phone: String,
    pub email: String,
}

// =============================================================================
// Missed Check-in Types
// =============================================================================

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct MissedTrip {
    #[serde(rename = "_id", alias = "id", default)]
    pub id: String,
    pub destination: String,
    pub overdue_minutes: f64,
    #[serde(with = "timestamp")]
    pub next_check_due: DateTime<Utc>,
}

impl MissedTrip {
    /// Overdue minutes with one decimal place, e.g. "12.5"
    pub fn overdue_display(&self) -> String {
        format!("{:.1}", self.overdue_minutes)
    }
}

/// Wrapper for GET /scan_missed_checks response
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct MissedChecksResponse {
    #[serde(default)]
    pub missed_trips: Vec<MissedTrip>,
}

/// Backend timestamps are ISO-8601. Values without an offset come from the
/// backend's UTC clock and are read as UTC.
pub mod timestamp {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn parse(raw: &str) -> Option<DateTime<Utc>> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.with_timezone(&Utc));
        }
        raw.parse::<NaiveDateTime>().ok().map(|naive| naive.and_utc())
    }

    pub fn serialize<S: Serializer>(dt: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&dt.to_rfc3339())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| de::Error::custom(format!("invalid timestamp: {raw}")))
    }
}
