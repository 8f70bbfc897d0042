//! Interview scheduling — one calendar event plus one invitation email per selected
//! candidate. A failure for one candidate is recorded in its outcome and the loop moves on.

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::scheduling::calendar::{Calendar, EventDraft, EventStart};
use crate::scheduling::mailer::{Mailer, OutgoingEmail};

pub const INVITATION_SUBJECT: &str = "Interview Invitation";
pub const DEFAULT_EVENT_TITLE: &str = "Interview";
pub const DEFAULT_DURATION_MINUTES: i64 = 30;
pub const MAX_DURATION_MINUTES: i64 = 24 * 60;

/// A candidate picked for an interview.
#[derive(Debug, Clone, Deserialize)]
pub struct InterviewCandidate {
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Slot and labelling shared by every invite in one scheduling call.
#[derive(Debug, Clone)]
pub struct InterviewPlan {
    pub title: String,
    /// Wall-clock start in `timezone`; `None` means one hour from now.
    pub start: Option<NaiveDateTime>,
    pub duration: Duration,
    pub timezone: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InviteStatus {
    Scheduled,
    EmailFailed,
    CalendarFailed,
    Skipped,
}

#[derive(Debug, Clone, Serialize)]
pub struct InviteOutcome {
    pub name: String,
    pub email: Option<String>,
    pub status: InviteStatus,
    pub event_id: Option<String>,
    pub event_link: Option<String>,
    pub detail: Option<String>,
}

pub fn invitation_body(name: &str, event_link: Option<&str>) -> String {
    format!(
        "Dear {name},\n\nWe are pleased to invite you for an interview.\nEvent Link: {}\n\nBest regards,\nHR Team",
        event_link.unwrap_or("(link unavailable)")
    )
}

fn draft_for(candidate: &InterviewCandidate, email: &str, plan: &InterviewPlan) -> EventDraft {
    let mut draft = EventDraft::new(
        plan.title.clone(),
        format!("Interview with {}", candidate.name),
        &plan.timezone,
    );
    if let Some(start) = plan.start {
        draft.start = EventStart::Local(start);
    }
    draft.duration = plan.duration;
    draft.attendees = vec![email.to_string()];
    draft
}

/// Creates an event and sends an invitation for every candidate that has an email.
/// Candidates without one are skipped. Outcomes come back in input order.
pub async fn schedule_interviews(
    calendar: &dyn Calendar,
    mailer: &dyn Mailer,
    candidates: &[InterviewCandidate],
    plan: &InterviewPlan,
) -> Vec<InviteOutcome> {
    let mut outcomes = Vec::with_capacity(candidates.len());

    for candidate in candidates {
        let email = match candidate.email.as_deref().map(str::trim) {
            Some(e) if !e.is_empty() => e.to_string(),
            _ => {
                info!("Skipping {}: no email on record", candidate.name);
                outcomes.push(InviteOutcome {
                    name: candidate.name.clone(),
                    email: None,
                    status: InviteStatus::Skipped,
                    event_id: None,
                    event_link: None,
                    detail: Some("No email address".to_string()),
                });
                continue;
            }
        };

        let event = match calendar
            .create_event(&draft_for(candidate, &email, plan))
            .await
        {
            Ok(event) => event,
            Err(e) => {
                warn!("Calendar event for {} failed: {e}", candidate.name);
                outcomes.push(InviteOutcome {
                    name: candidate.name.clone(),
                    email: Some(email),
                    status: InviteStatus::CalendarFailed,
                    event_id: None,
                    event_link: None,
                    detail: Some(e.to_string()),
                });
                continue;
            }
        };

        let message = OutgoingEmail {
            to: email.clone(),
            subject: INVITATION_SUBJECT.to_string(),
            body: invitation_body(&candidate.name, event.html_link.as_deref()),
            from: None,
        };
        let (status, detail) = match mailer.send(&message).await {
            Ok(()) => (InviteStatus::Scheduled, None),
            Err(e) => (InviteStatus::EmailFailed, Some(e.to_string())),
        };

        outcomes.push(InviteOutcome {
            name: candidate.name.clone(),
            email: Some(email),
            status,
            event_id: Some(event.id),
            event_link: event.html_link,
            detail,
        });
    }

    outcomes
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use chrono::NaiveDate;
    use serde_json::{Map, Value};

    use super::*;
    use crate::scheduling::calendar::{CalendarError, CalendarEvent};
    use crate::scheduling::mailer::MailError;

    #[derive(Default)]
    struct FakeCalendar {
        drafts: Mutex<Vec<EventDraft>>,
        fail_for: Option<String>,
    }

    #[async_trait]
    impl Calendar for FakeCalendar {
        async fn create_event(&self, draft: &EventDraft) -> Result<CalendarEvent, CalendarError> {
            if self.fail_for.as_deref() == draft.attendees.first().map(String::as_str) {
                return Err(CalendarError::Api {
                    status: 403,
                    message: "forbidden".to_string(),
                });
            }
            let mut drafts = self.drafts.lock().unwrap();
            drafts.push(draft.clone());
            let id = format!("evt{}", drafts.len());
            Ok(CalendarEvent {
                html_link: Some(format!("https://calendar.example/{id}")),
                id,
                summary: Some(draft.summary.clone()),
                description: Some(draft.description.clone()),
                status: Some("confirmed".to_string()),
                start: None,
                end: None,
                attendees: vec![],
            })
        }

        async fn list_events(&self, _max: u32) -> Result<Vec<CalendarEvent>, CalendarError> {
            Ok(vec![])
        }

        async fn update_event(
            &self,
            _event_id: &str,
            _fields: &Map<String, Value>,
        ) -> Result<CalendarEvent, CalendarError> {
            Err(CalendarError::NotConfigured)
        }

        async fn delete_event(&self, _event_id: &str) -> Result<(), CalendarError> {
            Ok(())
        }
    }

    #[derive(Default)]
    struct FakeMailer {
        sent: Mutex<Vec<OutgoingEmail>>,
        fail: bool,
    }

    #[async_trait]
    impl Mailer for FakeMailer {
        async fn send(&self, email: &OutgoingEmail) -> Result<(), MailError> {
            if self.fail {
                return Err(MailError::NotConfigured);
            }
            self.sent.lock().unwrap().push(email.clone());
            Ok(())
        }
    }

    fn plan() -> InterviewPlan {
        InterviewPlan {
            title: DEFAULT_EVENT_TITLE.to_string(),
            start: None,
            duration: Duration::minutes(DEFAULT_DURATION_MINUTES),
            timezone: "Asia/Kolkata".to_string(),
        }
    }

    fn candidate(name: &str, email: Option<&str>) -> InterviewCandidate {
        InterviewCandidate {
            name: name.to_string(),
            email: email.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_schedules_and_emails_each_candidate() {
        let calendar = FakeCalendar::default();
        let mailer = FakeMailer::default();
        let candidates = vec![
            candidate("Alice", Some("alice@example.com")),
            candidate("Carol", Some("carol@example.com")),
        ];

        let outcomes = schedule_interviews(&calendar, &mailer, &candidates, &plan()).await;

        assert!(outcomes.iter().all(|o| o.status == InviteStatus::Scheduled));
        let sent = mailer.sent.lock().unwrap();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].subject, INVITATION_SUBJECT);
        assert!(sent[0].body.starts_with("Dear Alice,"));
        assert!(sent[0].body.contains("https://calendar.example/evt1"));

        let drafts = calendar.drafts.lock().unwrap();
        assert_eq!(drafts[1].description, "Interview with Carol");
        assert_eq!(drafts[1].attendees, vec!["carol@example.com"]);
    }

    #[tokio::test]
    async fn test_candidates_without_email_are_skipped() {
        let calendar = FakeCalendar::default();
        let mailer = FakeMailer::default();
        let candidates = vec![candidate("Bob", None), candidate("Dan", Some("  "))];

        let outcomes = schedule_interviews(&calendar, &mailer, &candidates, &plan()).await;

        assert_eq!(outcomes.len(), 2);
        assert!(outcomes.iter().all(|o| o.status == InviteStatus::Skipped));
        assert!(calendar.drafts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_one_calendar_failure_does_not_stop_others() {
        let calendar = FakeCalendar {
            fail_for: Some("alice@example.com".to_string()),
            ..Default::default()
        };
        let mailer = FakeMailer::default();
        let candidates = vec![
            candidate("Alice", Some("alice@example.com")),
            candidate("Carol", Some("carol@example.com")),
        ];

        let outcomes = schedule_interviews(&calendar, &mailer, &candidates, &plan()).await;

        assert_eq!(outcomes[0].status, InviteStatus::CalendarFailed);
        assert_eq!(outcomes[1].status, InviteStatus::Scheduled);
        assert_eq!(mailer.sent.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_email_failure_keeps_event() {
        let calendar = FakeCalendar::default();
        let mailer = FakeMailer {
            fail: true,
            ..Default::default()
        };
        let outcomes = schedule_interviews(
            &calendar,
            &mailer,
            &[candidate("Alice", Some("alice@example.com"))],
            &plan(),
        )
        .await;
        assert_eq!(outcomes[0].status, InviteStatus::EmailFailed);
        assert_eq!(outcomes[0].event_id.as_deref(), Some("evt1"));
    }

    #[tokio::test]
    async fn test_explicit_start_is_local_time() {
        let calendar = FakeCalendar::default();
        let mailer = FakeMailer::default();
        let start = NaiveDate::from_ymd_opt(2025, 6, 2)
            .unwrap()
            .and_hms_opt(15, 0, 0)
            .unwrap();
        let plan = InterviewPlan {
            start: Some(start),
            ..plan()
        };
        schedule_interviews(
            &calendar,
            &mailer,
            &[candidate("Alice", Some("alice@example.com"))],
            &plan,
        )
        .await;
        let drafts = calendar.drafts.lock().unwrap();
        assert_eq!(drafts[0].start, EventStart::Local(start));
    }

    #[test]
    fn test_invitation_body_without_link() {
        let body = invitation_body("Alice", None);
        assert!(body.contains("Event Link: (link unavailable)"));
        assert!(body.ends_with("Best regards,\nHR Team"));
    }
}
