//! Page surface abstraction
//!
//! Everything the workflow, the downloads and the carousel would otherwise do
//! to the DOM goes through [`PageSurface`]. Implementations decide how to
//! render: the binary prints to the terminal, tests record every call.

pub mod views;
pub mod recording;
pub mod terminal;

pub use views::{
    CatalogView, DownloadStatus, EmailStatus, EventOption, QuickCard, QuickEventsView,
    ResultAction, ResultPanel, ResultView, SummaryTile,
};
pub use recording::{RecordingSurface, SurfaceCall};
pub use terminal::TerminalSurface;

/// Page regions that can be scrolled to or focused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    Carousel,
    QuickEvents,
    EventSelect,
    RegistrationForm,
    Result,
    DownloadStatus,
}

/// Body-level flag toggled while printing
pub const PRINTING_FLAG: &str = "printing";

/// Rendering and browser-runtime collaborator of the page
pub trait PageSurface: Send + Sync {
    /// Blocking message box
    fn alert(&self, message: &str);

    fn render_quick_events(&self, view: &QuickEventsView);

    fn render_event_options(&self, options: &[EventOption]);

    /// Set the value of the event selection control
    fn select_event(&self, event_id: &str);

    fn show_result(&self, view: &ResultView);

    /// `None` clears the status text
    fn set_download_status(&self, status: Option<DownloadStatus>);

    /// Clear every registration form field
    fn reset_form(&self);

    fn scroll_into_view(&self, region: Region);

    fn focus(&self, region: Region);

    fn set_body_flag(&self, flag: &str, enabled: bool);

    /// Open the print dialog
    fn print(&self);

    /// Highlight the active slide and indicator
    fn show_slide(&self, _index: usize) {}
}
