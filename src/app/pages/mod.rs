//! Screen components. Which one is shown depends on whether a session exists.

mod auth;
mod home;

pub use auth::AuthPage;
pub use home::HomePage;
