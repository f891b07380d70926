//! Client constants: API location, storage keys, geolocation options and
//! the fixed user-facing prompts.

/// Base path every backend call is made under.
pub const API_BASE: &str = "/api";

/// localStorage key holding the bearer token.
pub const TOKEN_KEY: &str = "authToken";
/// localStorage key holding the JSON-encoded user profile.
pub const USER_KEY: &str = "user";

/// Geolocation fix timeout.
pub const GEO_TIMEOUT_MS: u32 = 10_000;
/// Cached fixes are never accepted.
pub const GEO_MAXIMUM_AGE_MS: u32 = 0;

/// Countdown refresh period.
pub const TICK_INTERVAL_MS: u64 = 1_000;

/// Prefix added to the 10-digit contact phone number before it is sent.
pub const PHONE_COUNTRY_CODE: &str = "+91";

pub const SOS_REASON: &str = "Emergency SOS triggered by user";
pub const SOS_CONFIRMATION: &str = "🚨 Are you sure you want to trigger an EMERGENCY SOS alert?";
pub const DELETE_CONTACT_CONFIRMATION: &str = "Are you sure you want to delete this contact?";

pub const CHECKIN_SUCCESS: &str = "✓ Check-in recorded successfully!";
pub const CHECKIN_PERMISSION_DENIED: &str =
    "Location permission denied. Please enable location access.";
pub const SOS_PERMISSION_DENIED: &str =
    "Location permission denied. Please enable location access for SOS to work.";

pub const BACKEND_UNHEALTHY: &str =
    "Backend is not responding properly. Please check if the server is running.";
