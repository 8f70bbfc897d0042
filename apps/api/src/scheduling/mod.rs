// Interview scheduling: calendar events plus invitation emails for selected candidates.
// Calendar and mailer backends are picked once at startup and carried in AppState.

pub mod calendar;
pub mod handlers;
pub mod interviews;
pub mod mailer;
