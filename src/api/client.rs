use bytes::{Bytes, BytesMut};
use futures::{Stream, TryStreamExt};
use reqwest::Client;
use thiserror::Error;
use tracing::debug;
use url::Url;

use crate::domain::DownloadRequest;

const DOWNLOAD_PATH: &str = "download";

/// Upper bound on the buffer reserved from `Content-Length`. The header is only a hint.
const MAX_PREALLOCATION: u64 = 16 * 1024 * 1024;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Invalid service URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

pub type Result<T> = std::result::Result<T, ApiError>;

/// Client for the external download service.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: Url,
}

impl ApiClient {
    pub fn new(base_url: Url) -> Self {
        Self {
            http: Client::new(),
            base_url,
        }
    }

    /// `{base}/download?url=<source>&type=<media type>`, with the source URL
    /// percent-encoded as a query value.
    pub fn download_url(&self, request: &DownloadRequest) -> Result<Url> {
        let mut url = self.base_url.join(DOWNLOAD_PATH)?;
        url.query_pairs_mut()
            .append_pair("url", &request.source_url)
            .append_pair("type", request.media_type.as_str());
        Ok(url)
    }

    /// Sends the GET and hands back the announced body length with the body chunks.
    pub async fn download_file_stream(
        &self,
        request: &DownloadRequest,
    ) -> Result<(Option<u64>, impl Stream<Item = Result<Bytes>>)> {
        let url = self.download_url(request)?;
        debug!(%url, "requesting media");

        let response = self.http.get(url).send().await?.error_for_status()?;

        let total_size = response.content_length();
        let stream = response.bytes_stream().map_err(ApiError::RequestError);

        Ok((total_size, stream))
    }

    /// Fetch the whole payload into memory.
    pub async fn fetch_media(&self, request: &DownloadRequest) -> Result<Bytes> {
        let (total_size, stream) = self.download_file_stream(request).await?;
        let capacity = total_size.unwrap_or(0).min(MAX_PREALLOCATION) as usize;

        let buffer = stream
            .try_fold(BytesMut::with_capacity(capacity), |mut buffer, chunk| async move {
                buffer.extend_from_slice(&chunk);
                Ok(buffer)
            })
            .await?;

        Ok(buffer.freeze())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    #[test]
    fn test_download_url_encodes_source() {
        let client = ApiClient::new(Url::parse("http://localhost:5000/").unwrap());
        let request = DownloadRequest::audio("https://example.com/watch?v=abc&t=10 s");
        let url = client.download_url(&request).unwrap();

        assert_eq!(url.path(), "/download");
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(
            pairs,
            vec![
                ("url".to_string(), "https://example.com/watch?v=abc&t=10 s".to_string()),
                ("type".to_string(), "audio".to_string()),
            ]
        );
        assert!(!url.query().unwrap().contains("v=abc&t"));
    }

    #[test]
    fn test_download_url_keeps_base_path() {
        let client = ApiClient::new(Url::parse("http://localhost:5000/media/").unwrap());
        let url = client
            .download_url(&DownloadRequest::audio("https://example.com/a"))
            .unwrap();
        assert_eq!(url.path(), "/media/download");
    }

    #[tokio::test]
    async fn test_fetch_media_returns_exact_bytes() {
        let mut server = mockito::Server::new_async().await;
        let payload: Vec<u8> = (0..=255u8).cycle().take(10_000).collect();
        let mock = server
            .mock("GET", "/download")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("url".into(), "https://example.com/song".into()),
                Matcher::UrlEncoded("type".into(), "audio".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "audio/mpeg")
            .with_body(payload.clone())
            .expect(1)
            .create_async()
            .await;

        let client = ApiClient::new(Url::parse(&server.url()).unwrap());
        let bytes = client
            .fetch_media(&DownloadRequest::audio("https://example.com/song"))
            .await
            .unwrap();

        assert_eq!(bytes.as_ref(), payload.as_slice());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_media_survives_bogus_content_length() {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let server = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = [0u8; 4096];
            let _ = socket.read(&mut request).await;
            socket
                .write_all(b"HTTP/1.1 200 OK\r\nContent-Length: 1000000000000000\r\n\r\nabc")
                .await
                .unwrap();
            socket.shutdown().await.unwrap();
        });

        let client = ApiClient::new(Url::parse(&format!("http://{}/", addr)).unwrap());
        let result = client
            .fetch_media(&DownloadRequest::audio("https://example.com/song"))
            .await;

        assert!(matches!(result, Err(ApiError::RequestError(_))));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_fetch_media_rejects_error_status() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/download")
            .match_query(Matcher::Any)
            .with_status(500)
            .with_body("converter crashed")
            .create_async()
            .await;

        let client = ApiClient::new(Url::parse(&server.url()).unwrap());
        let err = client
            .fetch_media(&DownloadRequest::audio("https://example.com/song"))
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::RequestError(_)));
        assert!(err.to_string().contains("500"));
    }
}
