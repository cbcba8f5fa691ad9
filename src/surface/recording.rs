//! Surface that records every call
//!
//! Used to assert on the page choreography without a rendering backend.

use std::sync::Mutex;
use super::{DownloadStatus, EventOption, PageSurface, QuickEventsView, Region, ResultView};

/// One recorded interaction with the page
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceCall {
    Alert(String),
    QuickEvents(QuickEventsView),
    EventOptions(Vec<EventOption>),
    SelectEvent(String),
    Result(ResultView),
    DownloadStatus(Option<DownloadStatus>),
    ResetForm,
    Scroll(Region),
    Focus(Region),
    BodyFlag { flag: String, enabled: bool },
    Print,
    Slide(usize),
}

#[derive(Debug, Default)]
pub struct RecordingSurface {
    calls: Mutex<Vec<SurfaceCall>>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&self, call: SurfaceCall) {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(call);
    }

    /// Snapshot of all calls so far
    pub fn calls(&self) -> Vec<SurfaceCall> {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn alerts(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                SurfaceCall::Alert(message) => Some(message),
                _ => None,
            })
            .collect()
    }

    pub fn last_result(&self) -> Option<ResultView> {
        self.calls().into_iter().rev().find_map(|call| match call {
            SurfaceCall::Result(view) => Some(view),
            _ => None,
        })
    }

    pub fn last_quick_events(&self) -> Option<QuickEventsView> {
        self.calls().into_iter().rev().find_map(|call| match call {
            SurfaceCall::QuickEvents(view) => Some(view),
            _ => None,
        })
    }

    pub fn last_options(&self) -> Option<Vec<EventOption>> {
        self.calls().into_iter().rev().find_map(|call| match call {
            SurfaceCall::EventOptions(options) => Some(options),
            _ => None,
        })
    }

    /// Current download status text, following set/clear order
    pub fn download_status(&self) -> Option<DownloadStatus> {
        self.calls()
            .into_iter()
            .rev()
            .find_map(|call| match call {
                SurfaceCall::DownloadStatus(status) => Some(status),
                _ => None,
            })
            .flatten()
    }

    pub fn selected_event(&self) -> Option<String> {
        self.calls().into_iter().rev().find_map(|call| match call {
            SurfaceCall::SelectEvent(id) => Some(id),
            _ => None,
        })
    }

    pub fn contains(&self, call: &SurfaceCall) -> bool {
        self.calls().iter().any(|c| c == call)
    }

    pub fn clear(&self) {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clear();
    }
}

impl PageSurface for RecordingSurface {
    fn alert(&self, message: &str) {
        self.record(SurfaceCall::Alert(message.to_string()));
    }

    fn render_quick_events(&self, view: &QuickEventsView) {
        self.record(SurfaceCall::QuickEvents(view.clone()));
    }

    fn render_event_options(&self, options: &[EventOption]) {
        self.record(SurfaceCall::EventOptions(options.to_vec()));
    }

    fn select_event(&self, event_id: &str) {
        self.record(SurfaceCall::SelectEvent(event_id.to_string()));
    }

    fn show_result(&self, view: &ResultView) {
        self.record(SurfaceCall::Result(view.clone()));
    }

    fn set_download_status(&self, status: Option<DownloadStatus>) {
        self.record(SurfaceCall::DownloadStatus(status));
    }

    fn reset_form(&self) {
        self.record(SurfaceCall::ResetForm);
    }

    fn scroll_into_view(&self, region: Region) {
        self.record(SurfaceCall::Scroll(region));
    }

    fn focus(&self, region: Region) {
        self.record(SurfaceCall::Focus(region));
    }

    fn set_body_flag(&self, flag: &str, enabled: bool) {
        self.record(SurfaceCall::BodyFlag {
            flag: flag.to_string(),
            enabled,
        });
    }

    fn print(&self) {
        self.record(SurfaceCall::Print);
    }

    fn show_slide(&self, index: usize) {
        self.record(SurfaceCall::Slide(index));
    }
}
