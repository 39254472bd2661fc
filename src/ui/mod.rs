use iced::{
    widget::{button, column, text, text_input, Space},
    Element, Length,
};

use crate::domain::{AppError, DownloadPhase, DownloadRequest, SaveOutcome};

/// Main view state
pub struct DownloadView {
    pub source_url: String,
    pub status_message: String,
    phase: DownloadPhase,
}

impl Default for DownloadView {
    fn default() -> Self {
        Self {
            source_url: String::new(),
            status_message: "Paste a link to download its audio".to_string(),
            phase: DownloadPhase::Idle,
        }
    }
}

#[derive(Debug, Clone)]
pub enum DownloadMessage {
    UrlChanged(String),
    DownloadPressed,
}

impl DownloadView {
    pub fn update(&mut self, message: DownloadMessage) {
        match message {
            DownloadMessage::UrlChanged(url) => {
                self.source_url = url;
            }
            DownloadMessage::DownloadPressed => {
                // Will be handled by the app
            }
        }
    }

    pub fn phase(&self) -> DownloadPhase {
        self.phase
    }

    pub fn is_busy(&self) -> bool {
        self.phase == DownloadPhase::Requesting
    }

    /// Move to `Requesting` and hand out the request to issue.
    ///
    /// Returns `Ok(None)` while a request is already in flight, so a second
    /// press never produces a second request.
    pub fn begin_submit(&mut self) -> Result<Option<DownloadRequest>, AppError> {
        if self.is_busy() {
            return Ok(None);
        }

        if self.source_url.trim().is_empty() {
            self.status_message = AppError::Validation.to_string();
            return Err(AppError::Validation);
        }

        let request = DownloadRequest::audio(self.source_url.clone());
        self.phase = DownloadPhase::Requesting;
        self.status_message = "Downloading...".to_string();
        Ok(Some(request))
    }

    /// Back to `Idle` whatever the outcome.
    pub fn finish_submit(&mut self, result: &Result<SaveOutcome, AppError>) {
        self.phase = DownloadPhase::Idle;
        self.status_message = match result {
            Ok(SaveOutcome::Saved(path)) => format!("Saved: {}", path.display()),
            Ok(SaveOutcome::Cancelled) => "Save cancelled".to_string(),
            Err(e) => e.to_string(),
        };
    }

    pub fn view(&self) -> Element<'_, DownloadMessage> {
        let (label, on_press) = if self.is_busy() {
            ("Loading...", None)
        } else {
            ("Download", Some(DownloadMessage::DownloadPressed))
        };

        column![
            text("Audio Downloader").size(32),
            Space::new().height(Length::Fixed(20.0)),
            text("Media URL:").size(16),
            text_input("https://...", &self.source_url)
                .on_input(DownloadMessage::UrlChanged)
                .on_submit(DownloadMessage::DownloadPressed)
                .padding(10),
            Space::new().height(Length::Fixed(10.0)),
            button(label).on_press_maybe(on_press).padding([10, 20]),
            Space::new().height(Length::Fixed(10.0)),
            text(&self.status_message).size(14),
        ]
        .padding(20)
        .spacing(10)
        .into()
    }
}
