//! Terminal rendering of the page for the command-line client

use std::io::Write;
use std::sync::Mutex;
use tracing::{debug, info};
use super::{DownloadStatus, EventOption, PageSurface, QuickEventsView, Region, ResultView};

/// Writes every page update as plain text to stdout
#[derive(Debug, Default)]
pub struct TerminalSurface {
    // serializes multi-line blocks from concurrent tasks
    out: Mutex<()>,
}

impl TerminalSurface {
    pub fn new() -> Self {
        Self::default()
    }

    fn emit(&self, lines: &[String]) {
        let _lock = self.out.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        for line in lines {
            let _ = writeln!(handle, "{}", line);
        }
    }
}

impl PageSurface for TerminalSurface {
    fn alert(&self, message: &str) {
        self.emit(&[format!("[!] {}", message)]);
    }

    fn render_quick_events(&self, view: &QuickEventsView) {
        if let Ok(json) = serde_json::to_string(view) {
            debug!(view = %json, "Rendering quick events");
        }

        let lines = match view {
            QuickEventsView::Cards { cards, more } => {
                let mut lines = vec!["Running now:".to_string()];
                for card in cards {
                    lines.push(format!(
                        "  [LIVE] {} @ {} | {} | {} ({}% full) | register: {}",
                        card.name,
                        card.venue,
                        card.attendance_label(),
                        card.seats_label(),
                        card.capacity_percentage,
                        card.event_id,
                    ));
                }
                if let Some(tile) = more {
                    lines.push(format!("  {} -> {}", tile.label(), tile.link));
                }
                lines
            }
            QuickEventsView::Empty { link } => vec![
                "No events currently running".to_string(),
                format!("  Check upcoming events -> {}", link),
            ],
            QuickEventsView::Error { message } => vec![message.clone()],
        };
        self.emit(&lines);
    }

    fn render_event_options(&self, options: &[EventOption]) {
        let lines: Vec<String> = options
            .iter()
            .map(|option| {
                if option.is_placeholder() {
                    option.label.clone()
                } else {
                    format!("  ({}) {}", option.value, option.label)
                }
            })
            .collect();
        self.emit(&lines);
    }

    fn select_event(&self, event_id: &str) {
        self.emit(&[format!("Selected event {}", event_id)]);
    }

    fn show_result(&self, view: &ResultView) {
        let lines = match view {
            ResultView::Loading { message } => vec![message.clone()],
            ResultView::Success(panel) => vec![
                "Registration Successful!".to_string(),
                "Your gate pass has been generated".to_string(),
                panel.email_status.message(),
                format!("Registration ID: {}", panel.registration_id),
                "This QR code is valid for single entry only".to_string(),
            ],
        };
        self.emit(&lines);
    }

    fn set_download_status(&self, status: Option<DownloadStatus>) {
        if let Some(status) = status {
            self.emit(&[status.message().to_string()]);
        }
    }

    fn reset_form(&self) {
        debug!("Registration form reset");
    }

    fn scroll_into_view(&self, region: Region) {
        debug!(region = ?region, "Scroll into view");
    }

    fn focus(&self, region: Region) {
        debug!(region = ?region, "Focus");
    }

    fn set_body_flag(&self, flag: &str, enabled: bool) {
        debug!(flag = flag, enabled = enabled, "Body flag changed");
    }

    fn print(&self) {
        info!("Print requested; no print dialog in terminal mode");
    }

    fn show_slide(&self, index: usize) {
        debug!(index = index, "Carousel slide shown");
    }
}
