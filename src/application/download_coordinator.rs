use std::future::Future;

use tracing::{info, warn};

use crate::{
    api::ApiClient,
    domain::{AppError, DownloadRequest, DownloadResult, SaveOutcome},
};

/// Hands a downloaded payload to the platform's save mechanism.
pub trait FileSaver {
    fn save(
        &self,
        result: DownloadResult,
    ) -> impl Future<Output = Result<SaveOutcome, AppError>> + Send;
}

/// Native "save as" dialog, pre-filled with the result's filename.
#[derive(Debug, Clone, Copy, Default)]
pub struct DialogSaver;

impl FileSaver for DialogSaver {
    async fn save(&self, result: DownloadResult) -> Result<SaveOutcome, AppError> {
        let Some(handle) = rfd::AsyncFileDialog::new()
            .set_file_name(&result.filename)
            .save_file()
            .await
        else {
            return Ok(SaveOutcome::Cancelled);
        };

        let path = handle.path().to_path_buf();
        tokio::fs::write(&path, &result.payload)
            .await
            .map_err(|e| AppError::Io(format!("Failed to write {}: {}", path.display(), e)))?;

        Ok(SaveOutcome::Saved(path))
    }
}

#[derive(Clone)]
pub struct DownloadCoordinator<S = DialogSaver> {
    api_client: ApiClient,
    saver: S,
}

impl<S: FileSaver> DownloadCoordinator<S> {
    pub fn new(api_client: ApiClient, saver: S) -> Self {
        Self { api_client, saver }
    }

    pub async fn fetch(&self, request: &DownloadRequest) -> Result<DownloadResult, AppError> {
        let payload = self.api_client.fetch_media(request).await.map_err(|e| {
            warn!(source_url = %request.source_url, "download failed: {}", e);
            AppError::Download(e.to_string())
        })?;

        info!(
            source_url = %request.source_url,
            bytes = payload.len(),
            "download received"
        );
        Ok(DownloadResult::new(payload))
    }

    /// One request, then at most one save.
    pub async fn submit(&self, request: DownloadRequest) -> Result<SaveOutcome, AppError> {
        let result = self.fetch(&request).await?;
        self.saver.save(result).await
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::sync::{Arc, Mutex};

    use bytes::Bytes;
    use mockito::Matcher;
    use url::Url;

    use super::*;
    use crate::domain::SAVED_FILENAME;

    #[derive(Clone, Default)]
    struct RecordingSaver {
        saved: Arc<Mutex<Vec<DownloadResult>>>,
    }

    impl RecordingSaver {
        fn saved(&self) -> Vec<DownloadResult> {
            self.saved.lock().unwrap().clone()
        }
    }

    impl FileSaver for RecordingSaver {
        fn save(
            &self,
            result: DownloadResult,
        ) -> impl Future<Output = Result<SaveOutcome, AppError>> + Send {
            let saved = self.saved.clone();
            async move {
                let path = PathBuf::from(&result.filename);
                saved.lock().unwrap().push(result);
                Ok(SaveOutcome::Saved(path))
            }
        }
    }

    fn coordinator(base: &str, saver: RecordingSaver) -> DownloadCoordinator<RecordingSaver> {
        DownloadCoordinator::new(ApiClient::new(Url::parse(base).unwrap()), saver)
    }

    #[tokio::test]
    async fn test_submit_saves_exact_payload_once() {
        let mut server = mockito::Server::new_async().await;
        let payload = Bytes::from_static(b"ID3\x04\x00\x00\x00\x00\x00\x00\xff\xfbmp3 frames");
        let mock = server
            .mock("GET", "/download")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("url".into(), "https://youtu.be/dQw4w9WgXcQ?t=42".into()),
                Matcher::UrlEncoded("type".into(), "audio".into()),
            ]))
            .with_status(200)
            .with_body(payload.clone())
            .expect(1)
            .create_async()
            .await;

        let saver = RecordingSaver::default();
        let outcome = coordinator(&server.url(), saver.clone())
            .submit(DownloadRequest::audio("https://youtu.be/dQw4w9WgXcQ?t=42"))
            .await
            .unwrap();

        assert_eq!(outcome, SaveOutcome::Saved(PathBuf::from(SAVED_FILENAME)));
        let saved = saver.saved();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].filename, "audio.mp3");
        assert_eq!(saved[0].payload, payload);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_submit_error_status_is_download_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/download")
            .match_query(Matcher::Any)
            .with_status(404)
            .create_async()
            .await;

        let saver = RecordingSaver::default();
        let err = coordinator(&server.url(), saver.clone())
            .submit(DownloadRequest::audio("https://example.com/missing"))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Download(_)));
        assert!(saver.saved().is_empty());
    }

    #[tokio::test]
    async fn test_submit_unreachable_service_is_download_error() {
        let saver = RecordingSaver::default();
        let err = coordinator("http://127.0.0.1:1/", saver.clone())
            .submit(DownloadRequest::audio("https://example.com/song"))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Download(_)));
        assert!(saver.saved().is_empty());
    }
}
