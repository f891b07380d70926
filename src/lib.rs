//! EchoCheck - personal-safety check-in client
//!
//! A Dioxus web client for a safety backend:
//! - Account login/signup with a cached session
//! - Timed trips with a live check-in countdown
//! - Geolocated check-ins and SOS alerts with a delivery report
//! - Trusted contacts and an on-demand missed check-in scan
//!
//! The `server` feature adds a dev server that serves the client and
//! forwards `/api/*` to the backend.

pub mod app;
pub mod client;

#[cfg(feature = "server")]
pub mod api;
#[cfg(feature = "server")]
pub mod config;
