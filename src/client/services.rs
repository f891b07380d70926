//! Browser capabilities the controller depends on, behind traits so the
//! controller runs unchanged under test.

use async_trait::async_trait;

use super::error::ClientError;

/// A geolocation fix.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
}

/// One high-accuracy position request (10 s timeout, no cached fixes).
#[async_trait(?Send)]
pub trait Geolocator {
    async fn current_position(&self) -> Result<Position, ClientError>;
}

/// Blocking yes/no confirmation.
pub trait Prompt {
    fn confirm(&self, message: &str) -> bool;
}

/// Periodic refresh of the countdown display.
pub trait Ticker {
    fn start(&self) -> Box<dyn TickerHandle>;
}

/// Stops the periodic refresh it was returned for.
pub trait TickerHandle {
    fn cancel(self: Box<Self>);
}
