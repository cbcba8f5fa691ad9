//! View models handed to the page surface
//!
//! These carry everything a renderer needs (labels, colors, links) so that the
//! workflow can be asserted on without a live rendering surface.

use chrono::{DateTime, FixedOffset, Utc};
use serde::Serialize;
use crate::models::{Event, SeatsIndicator};
use crate::utils::helpers::format_date;

/// Placeholder shown before the user picks an event
pub const EVENT_PLACEHOLDER: &str = "Choose an event...";

/// Compact summary of an ongoing event on the landing page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuickCard {
    pub event_id: String,
    pub name: String,
    pub venue: String,
    pub registered: u32,
    pub capacity: u32,
    pub seats_left: u32,
    pub indicator: SeatsIndicator,
    pub capacity_percentage: u32,
}

impl QuickCard {
    pub fn from_event(event: &Event) -> Self {
        Self {
            event_id: event.id.clone(),
            name: event.name.clone(),
            venue: event.venue.clone(),
            registered: event.registered_count,
            capacity: event.max_capacity,
            seats_left: event.available_seats(),
            indicator: event.seats_indicator(),
            capacity_percentage: event.capacity_percentage(),
        }
    }

    pub fn seats_label(&self) -> String {
        format!("{} seats left", self.seats_left)
    }

    pub fn attendance_label(&self) -> String {
        format!("{}/{}", self.registered, self.capacity)
    }
}

/// Tile pointing at the full listing when more events run than fit
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryTile {
    pub remaining: usize,
    pub link: String,
}

impl SummaryTile {
    pub fn label(&self) -> String {
        format!("+{} more events running", self.remaining)
    }
}

/// Content of the quick-events region
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum QuickEventsView {
    Cards {
        cards: Vec<QuickCard>,
        more: Option<SummaryTile>,
    },
    /// Nothing is running right now
    Empty { link: String },
    /// The catalog could not be fetched
    Error { message: String },
}

impl QuickEventsView {
    pub fn cards(&self) -> &[QuickCard] {
        match self {
            QuickEventsView::Cards { cards, .. } => cards,
            _ => &[],
        }
    }

    pub fn summary(&self) -> Option<&SummaryTile> {
        match self {
            QuickEventsView::Cards { more, .. } => more.as_ref(),
            _ => None,
        }
    }
}

/// One entry of the event selection control
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventOption {
    pub value: String,
    pub label: String,
}

impl EventOption {
    pub fn placeholder() -> Self {
        Self {
            value: String::new(),
            label: EVENT_PLACEHOLDER.to_string(),
        }
    }

    pub fn from_event(event: &Event, offset: FixedOffset) -> Self {
        Self {
            value: event.id.clone(),
            label: format!("{} - {}", event.name, format_date(event.start_date, offset)),
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.value.is_empty()
    }
}

/// Everything rendered from one catalog fetch
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogView {
    pub quick_events: QuickEventsView,
    /// Placeholder first, then every event regardless of status
    pub options: Vec<EventOption>,
}

impl CatalogView {
    pub fn build(
        events: &[Event],
        now: DateTime<Utc>,
        max_cards: usize,
        offset: FixedOffset,
        events_page: &str,
    ) -> Self {
        let running: Vec<&Event> = events.iter().filter(|e| e.is_running_at(now)).collect();

        let quick_events = if running.is_empty() {
            QuickEventsView::Empty { link: events_page.to_string() }
        } else {
            let cards = running.iter().take(max_cards).map(|e| QuickCard::from_event(e)).collect();
            let more = (running.len() > max_cards).then(|| SummaryTile {
                remaining: running.len() - max_cards,
                link: events_page.to_string(),
            });
            QuickEventsView::Cards { cards, more }
        };

        let options = std::iter::once(EventOption::placeholder())
            .chain(events.iter().map(|e| EventOption::from_event(e, offset)))
            .collect();

        Self { quick_events, options }
    }

    /// Options excluding the placeholder
    pub fn event_options(&self) -> impl Iterator<Item = &EventOption> {
        self.options.iter().filter(|o| !o.is_placeholder())
    }
}

/// Outcome line of the confirmation email
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum EmailStatus {
    Sent { email: String },
    Failed,
}

impl EmailStatus {
    pub fn is_sent(&self) -> bool {
        matches!(self, EmailStatus::Sent { .. })
    }

    pub fn message(&self) -> String {
        match self {
            EmailStatus::Sent { email } => format!("Confirmation email sent to {}", email),
            EmailStatus::Failed => "Email delivery failed. Please save this QR code.".to_string(),
        }
    }
}

/// Buttons offered under the gate pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ResultAction {
    DownloadIdCard { registration_id: String, name: String },
    DownloadQr { source: String, name: String },
}

/// The success panel shown after a registration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultPanel {
    pub registration_id: String,
    pub registrant_name: String,
    pub qr_code_image: String,
    pub email_status: EmailStatus,
    pub actions: Vec<ResultAction>,
}

impl ResultPanel {
    pub fn new(
        registration_id: String,
        registrant_name: String,
        qr_code_image: String,
        email_status: EmailStatus,
    ) -> Self {
        let actions = vec![
            ResultAction::DownloadIdCard {
                registration_id: registration_id.clone(),
                name: registrant_name.clone(),
            },
            ResultAction::DownloadQr {
                source: qr_code_image.clone(),
                name: registrant_name.clone(),
            },
        ];

        Self {
            registration_id,
            registrant_name,
            qr_code_image,
            email_status,
            actions,
        }
    }
}

/// Content of the result region
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ResultView {
    Loading { message: String },
    Success(ResultPanel),
}

impl ResultView {
    pub fn sending_email() -> Self {
        ResultView::Loading {
            message: "Sending confirmation email...".to_string(),
        }
    }
}

/// Transient text under the download buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DownloadStatus {
    Generating,
    Downloaded,
    Failed,
}

impl DownloadStatus {
    pub fn message(&self) -> &'static str {
        match self {
            DownloadStatus::Generating => "Generating ID Card PDF...",
            DownloadStatus::Downloaded => "ID Card downloaded successfully!",
            DownloadStatus::Failed => "Failed to download ID card. Please try again.",
        }
    }
}
