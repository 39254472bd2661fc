use iced::Task;
use rfd::{AsyncMessageDialog, MessageButtons, MessageLevel};
use tracing::{debug, warn};

use crate::api::ApiClient;
use crate::application::{DialogSaver, DownloadCoordinator};
use crate::config::ServiceConfig;
use crate::domain::{AppError, SaveOutcome};
use crate::ui::{DownloadMessage, DownloadView};

pub const WINDOW_TITLE: &str = "Audio Downloader";

pub struct DownloadApp {
    view: DownloadView,
    coordinator: DownloadCoordinator<DialogSaver>,
}

impl Default for DownloadApp {
    fn default() -> Self {
        let config = ServiceConfig::from_env().unwrap_or_else(|e| {
            warn!("{}; falling back to default service URLs", e);
            ServiceConfig::default()
        });
        Self::new(&config)
    }
}

impl DownloadApp {
    pub fn new(config: &ServiceConfig) -> Self {
        let api_client = ApiClient::new(config.download_service.clone());

        Self {
            view: DownloadView::default(),
            coordinator: DownloadCoordinator::new(api_client, DialogSaver),
        }
    }

    #[cfg(test)]
    fn view_state(&self) -> &DownloadView {
        &self.view
    }
}

#[derive(Debug, Clone)]
pub enum Message {
    UiMessage(DownloadMessage),
    /// Fetch and save finished, successfully or not
    DownloadCompleted(Result<SaveOutcome, AppError>),
    NotificationDismissed,
}

pub fn update(app: &mut DownloadApp, message: Message) -> Task<Message> {
    match message {
        Message::UiMessage(ui_msg) => {
            let pressed = matches!(ui_msg, DownloadMessage::DownloadPressed);
            app.view.update(ui_msg);

            if pressed {
                match app.view.begin_submit() {
                    Ok(Some(request)) => {
                        let coordinator = app.coordinator.clone();

                        // iced Task::perform runs in the background tokio executor
                        return Task::perform(
                            async move { coordinator.submit(request).await },
                            Message::DownloadCompleted,
                        );
                    }
                    Ok(None) => debug!("download already in flight, ignoring press"),
                    Err(e) => return notify(e),
                }
            }
        }
        Message::DownloadCompleted(result) => {
            app.view.finish_submit(&result);
            if let Err(e) = result {
                return notify(e);
            }
        }
        Message::NotificationDismissed => {}
    }
    Task::none()
}

pub fn view(app: &DownloadApp) -> iced::Element<'_, Message> {
    app.view.view().map(Message::UiMessage)
}

/// Modal error dialog; the UI is already back to idle when it shows.
fn notify(error: AppError) -> Task<Message> {
    Task::perform(
        async move {
            AsyncMessageDialog::new()
                .set_level(MessageLevel::Error)
                .set_title(WINDOW_TITLE)
                .set_description(error.to_string())
                .set_buttons(MessageButtons::Ok)
                .show()
                .await;
        },
        |_| Message::NotificationDismissed,
    )
}
