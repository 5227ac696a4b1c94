use crate::api::request::HttpRequest;
use crate::api::response::Response;
use crate::config::settings::Settings;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Failed to create HTTP client: {0}")]
    Build(#[source] reqwest::Error),

    #[error("unable to send request to {host}:{port}. {source}")]
    Send {
        host: String,
        port: u16,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to read response from {host}:{port}. {source}")]
    Receive {
        host: String,
        port: u16,
        #[source]
        source: reqwest::Error,
    },
}

/// Talks to the management REST service. One request per invocation.
pub struct RestClient {
    host: String,
    port: u16,
    base_url: String,
    http_client: reqwest::Client,
}

impl RestClient {
    pub fn new(settings: &Settings) -> Result<Self, ClientError> {
        let http_client = reqwest::Client::builder()
            .build()
            .map_err(ClientError::Build)?;

        Ok(Self {
            host: settings.host.clone(),
            port: settings.port,
            base_url: settings.base_url(),
            http_client,
        })
    }

    fn build_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    /// Sends the request and reads the whole response back.
    pub async fn process(&self, request: &HttpRequest) -> Result<Response, ClientError> {
        let url = self.build_url(&request.path());

        let response = self
            .http_client
            .request(request.method().clone(), &url)
            .headers(request.headers().clone())
            .body(request.content().to_vec())
            .send()
            .await
            .map_err(|source| ClientError::Send {
                host: self.host.clone(),
                port: self.port,
                source,
            })?;

        let status = response.status();
        log::debug!("{} {} -> {}", request.method(), url, status);

        let body = response
            .bytes()
            .await
            .map_err(|source| ClientError::Receive {
                host: self.host.clone(),
                port: self.port,
                source,
            })?
            .to_vec();

        Ok(Response::new(status, body))
    }
}
