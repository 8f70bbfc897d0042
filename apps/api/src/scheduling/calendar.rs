//! Calendar client — interview events on Google Calendar (REST v3, bearer token).
//!
//! `AppState` holds an `Arc<dyn Calendar>`: `GoogleCalendar` when a token is configured,
//! `UnconfiguredCalendar` otherwise.

use async_trait::async_trait;
use chrono::{DateTime, Duration, NaiveDateTime, SecondsFormat, Utc};
use reqwest::{Client, Response, Url};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use thiserror::Error;
use tracing::{debug, info};

const CALENDAR_API_BASE: &str = "https://www.googleapis.com/calendar/v3";
pub const DEFAULT_LIST_LIMIT: u32 = 10;

#[derive(Debug, Error)]
pub enum CalendarError {
    #[error("Calendar is not configured (set GOOGLE_CALENDAR_TOKEN)")]
    NotConfigured,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Calendar API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Invalid calendar URL: {0}")]
    InvalidUrl(String),

    #[error("Event end time is out of range")]
    TimeOutOfRange,
}

// ────────────────────────────────────────────────────────────────────────────
// Event models
// ────────────────────────────────────────────────────────────────────────────

/// When an interview starts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EventStart {
    /// An absolute instant, sent with a UTC offset.
    Instant(DateTime<Utc>),
    /// Wall-clock time in the event's time zone.
    Local(NaiveDateTime),
}

impl EventStart {
    /// `None` when the result falls outside chrono's representable range.
    pub fn checked_plus(self, duration: Duration) -> Option<Self> {
        match self {
            EventStart::Instant(t) => t.checked_add_signed(duration).map(EventStart::Instant),
            EventStart::Local(t) => t.checked_add_signed(duration).map(EventStart::Local),
        }
    }

    fn to_api_string(self) -> String {
        match self {
            EventStart::Instant(t) => t.to_rfc3339_opts(SecondsFormat::Secs, true),
            EventStart::Local(t) => t.format("%Y-%m-%dT%H:%M:%S").to_string(),
        }
    }
}

/// An event to create.
#[derive(Debug, Clone)]
pub struct EventDraft {
    pub summary: String,
    pub description: String,
    pub location: Option<String>,
    pub start: EventStart,
    pub duration: Duration,
    pub timezone: String,
    pub attendees: Vec<String>,
}

impl EventDraft {
    /// Draft with the default slot: one hour from now, 30 minutes long.
    pub fn new(summary: impl Into<String>, description: impl Into<String>, timezone: &str) -> Self {
        Self {
            summary: summary.into(),
            description: description.into(),
            location: None,
            start: EventStart::Instant(Utc::now() + Duration::hours(1)),
            duration: Duration::minutes(30),
            timezone: timezone.to_string(),
            attendees: Vec::new(),
        }
    }

    /// Request body for `events.insert`.
    pub fn to_request_body(&self) -> Result<Value, CalendarError> {
        let end = self
            .start
            .checked_plus(self.duration)
            .ok_or(CalendarError::TimeOutOfRange)?;
        Ok(json!({
            "summary": self.summary,
            "location": self.location,
            "description": self.description,
            "start": { "dateTime": self.start.to_api_string(), "timeZone": self.timezone },
            "end": { "dateTime": end.to_api_string(), "timeZone": self.timezone },
            "attendees": self.attendees.iter().map(|e| json!({ "email": e })).collect::<Vec<_>>(),
            "reminders": { "useDefault": true },
        }))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventTime {
    pub date_time: Option<String>,
    pub date: Option<String>,
    pub time_zone: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attendee {
    pub email: String,
    pub response_status: Option<String>,
}

/// Event as returned by the calendar API (only the fields the screener uses).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    pub id: String,
    pub html_link: Option<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub start: Option<EventTime>,
    pub end: Option<EventTime>,
    #[serde(default)]
    pub attendees: Vec<Attendee>,
}

#[derive(Debug, Deserialize)]
struct EventList {
    #[serde(default)]
    items: Vec<CalendarEvent>,
}

#[derive(Debug, Deserialize)]
struct GoogleError {
    error: GoogleErrorBody,
}

#[derive(Debug, Deserialize)]
struct GoogleErrorBody {
    message: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Trait + backends
// ────────────────────────────────────────────────────────────────────────────

#[async_trait]
pub trait Calendar: Send + Sync {
    /// Creates the event and asks the calendar to notify all attendees.
    async fn create_event(&self, draft: &EventDraft) -> Result<CalendarEvent, CalendarError>;

    /// Upcoming single events ordered by start time.
    async fn list_events(&self, max_results: u32) -> Result<Vec<CalendarEvent>, CalendarError>;

    /// Fetches the event, overwrites the given top-level fields, and saves it.
    async fn update_event(
        &self,
        event_id: &str,
        fields: &Map<String, Value>,
    ) -> Result<CalendarEvent, CalendarError>;

    async fn delete_event(&self, event_id: &str) -> Result<(), CalendarError>;
}

/// Google Calendar over REST with a pre-issued OAuth access token.
#[derive(Clone)]
pub struct GoogleCalendar {
    client: Client,
    access_token: String,
    calendar_id: String,
}

impl GoogleCalendar {
    pub fn new(access_token: String, calendar_id: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .expect("Failed to build HTTP client"),
            access_token,
            calendar_id,
        }
    }

    fn events_url(&self, event_id: Option<&str>) -> Result<Url, CalendarError> {
        let mut url =
            Url::parse(CALENDAR_API_BASE).map_err(|e| CalendarError::InvalidUrl(e.to_string()))?;
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| CalendarError::InvalidUrl(CALENDAR_API_BASE.to_string()))?;
            segments.extend(["calendars", self.calendar_id.as_str(), "events"]);
            if let Some(id) = event_id {
                segments.push(id);
            }
        }
        Ok(url)
    }

    async fn get_event_value(&self, event_id: &str) -> Result<Value, CalendarError> {
        let response = self
            .client
            .get(self.events_url(Some(event_id))?)
            .bearer_auth(&self.access_token)
            .send()
            .await?;
        Ok(check_status(response).await?.json().await?)
    }
}

#[async_trait]
impl Calendar for GoogleCalendar {
    async fn create_event(&self, draft: &EventDraft) -> Result<CalendarEvent, CalendarError> {
        let response = self
            .client
            .post(self.events_url(None)?)
            .bearer_auth(&self.access_token)
            .query(&[("sendUpdates", "all")])
            .json(&draft.to_request_body()?)
            .send()
            .await?;
        let event: CalendarEvent = check_status(response).await?.json().await?;
        info!("Created calendar event {}", event.id);
        Ok(event)
    }

    async fn list_events(&self, max_results: u32) -> Result<Vec<CalendarEvent>, CalendarError> {
        let now = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
        let max_results = max_results.to_string();
        let response = self
            .client
            .get(self.events_url(None)?)
            .bearer_auth(&self.access_token)
            .query(&[
                ("timeMin", now.as_str()),
                ("maxResults", max_results.as_str()),
                ("singleEvents", "true"),
                ("orderBy", "startTime"),
            ])
            .send()
            .await?;
        let list: EventList = check_status(response).await?.json().await?;
        debug!("Listed {} upcoming events", list.items.len());
        Ok(list.items)
    }

    async fn update_event(
        &self,
        event_id: &str,
        fields: &Map<String, Value>,
    ) -> Result<CalendarEvent, CalendarError> {
        let mut event = self.get_event_value(event_id).await?;
        merge_fields(&mut event, fields);
        let response = self
            .client
            .put(self.events_url(Some(event_id))?)
            .bearer_auth(&self.access_token)
            .json(&event)
            .send()
            .await?;
        Ok(check_status(response).await?.json().await?)
    }

    async fn delete_event(&self, event_id: &str) -> Result<(), CalendarError> {
        let response = self
            .client
            .delete(self.events_url(Some(event_id))?)
            .bearer_auth(&self.access_token)
            .send()
            .await?;
        check_status(response).await?;
        info!("Deleted calendar event {event_id}");
        Ok(())
    }
}

/// Used when no calendar token is configured. Every call fails with `NotConfigured`.
pub struct UnconfiguredCalendar;

#[async_trait]
impl Calendar for UnconfiguredCalendar {
    async fn create_event(&self, _draft: &EventDraft) -> Result<CalendarEvent, CalendarError> {
        Err(CalendarError::NotConfigured)
    }

    async fn list_events(&self, _max: u32) -> Result<Vec<CalendarEvent>, CalendarError> {
        Err(CalendarError::NotConfigured)
    }

    async fn update_event(
        &self,
        _event_id: &str,
        _fields: &Map<String, Value>,
    ) -> Result<CalendarEvent, CalendarError> {
        Err(CalendarError::NotConfigured)
    }

    async fn delete_event(&self, _event_id: &str) -> Result<(), CalendarError> {
        Err(CalendarError::NotConfigured)
    }
}

/// Shallow merge: each top-level key in `fields` replaces the event's value.
pub fn merge_fields(event: &mut Value, fields: &Map<String, Value>) {
    if let Value::Object(obj) = event {
        for (k, v) in fields {
            obj.insert(k.clone(), v.clone());
        }
    }
}

async fn check_status(response: Response) -> Result<Response, CalendarError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<GoogleError>(&body)
        .map(|e| e.error.message)
        .unwrap_or(body);
    Err(CalendarError::Api {
        status: status.as_u16(),
        message,
    })
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn local(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 14)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn test_request_body_local_time() {
        let mut draft = EventDraft::new("Interview", "Interview with Alice", "Asia/Kolkata");
        draft.start = EventStart::Local(local(10, 0));
        draft.attendees = vec!["alice@example.com".to_string()];

        let body = draft.to_request_body().unwrap();
        assert_eq!(body["start"]["dateTime"], "2025-03-14T10:00:00");
        assert_eq!(body["end"]["dateTime"], "2025-03-14T10:30:00");
        assert_eq!(body["start"]["timeZone"], "Asia/Kolkata");
        assert_eq!(body["attendees"][0]["email"], "alice@example.com");
        assert_eq!(body["reminders"]["useDefault"], true);
        assert!(body["location"].is_null());
    }

    #[test]
    fn test_request_body_instant_uses_utc_suffix() {
        let mut draft = EventDraft::new("Interview", "", "UTC");
        draft.start = EventStart::Instant(local(9, 0).and_utc());
        draft.duration = Duration::minutes(45);
        let body = draft.to_request_body().unwrap();
        assert_eq!(body["start"]["dateTime"], "2025-03-14T09:00:00Z");
        assert_eq!(body["end"]["dateTime"], "2025-03-14T09:45:00Z");
    }

    #[test]
    fn test_request_body_rejects_end_past_max_time() {
        let mut draft = EventDraft::new("Interview", "", "UTC");
        draft.start = EventStart::Local(NaiveDateTime::MAX);
        assert!(matches!(
            draft.to_request_body(),
            Err(CalendarError::TimeOutOfRange)
        ));

        draft.start = EventStart::Instant(DateTime::<Utc>::MAX_UTC);
        assert!(matches!(
            draft.to_request_body(),
            Err(CalendarError::TimeOutOfRange)
        ));
    }

    #[test]
    fn test_default_slot_is_in_the_future() {
        let draft = EventDraft::new("Interview", "", "UTC");
        match draft.start {
            EventStart::Instant(t) => assert!(t > Utc::now()),
            EventStart::Local(_) => panic!("default start should be an instant"),
        }
        assert_eq!(draft.duration, Duration::minutes(30));
    }

    #[test]
    fn test_events_url_escapes_calendar_id() {
        let cal = GoogleCalendar::new("token".into(), "team hr@group.calendar".into());
        let url = cal.events_url(Some("abc123")).unwrap();
        assert_eq!(
            url.as_str(),
            "https://www.googleapis.com/calendar/v3/calendars/team%20hr@group.calendar/events/abc123"
        );
    }

    #[test]
    fn test_merge_fields_overwrites_top_level() {
        let mut event = json!({"id": "e1", "summary": "Interview", "location": "Room 1"});
        let fields: Map<String, Value> =
            serde_json::from_value(json!({"summary": "Final interview", "colorId": "5"})).unwrap();
        merge_fields(&mut event, &fields);
        assert_eq!(event["summary"], "Final interview");
        assert_eq!(event["location"], "Room 1");
        assert_eq!(event["colorId"], "5");
    }

    #[test]
    fn test_event_deserializes_from_api_shape() {
        let event: CalendarEvent = serde_json::from_str(
            r#"{"id":"e1","htmlLink":"https://calendar.google.com/event?eid=e1",
                "summary":"Interview","start":{"dateTime":"2025-03-14T10:00:00+05:30","timeZone":"Asia/Kolkata"},
                "attendees":[{"email":"a@x.io","responseStatus":"needsAction"}]}"#,
        )
        .unwrap();
        assert_eq!(event.html_link.as_deref(), Some("https://calendar.google.com/event?eid=e1"));
        assert_eq!(event.attendees[0].response_status.as_deref(), Some("needsAction"));
    }

    #[tokio::test]
    async fn test_unconfigured_calendar_errors() {
        let err = UnconfiguredCalendar.list_events(5).await.unwrap_err();
        assert!(matches!(err, CalendarError::NotConfigured));
    }
}
