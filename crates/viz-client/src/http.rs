// Archivo: http.rs
// Propósito: implementación HTTP del `AlgorithmService` sobre `reqwest`.
// La URL base y el timeout se toman del entorno (`new_from_env`) o se pasan
// explícitamente. Cualquier estado no-2xx se convierte en
// `ServiceError::Status`; el núcleo no interpreta códigos individuales.
use crate::errors::{Result, ServiceError};
use crate::service::AlgorithmService;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use viz_domain::{AlgorithmConfig, AlgorithmExecuteRequest, AlgorithmListResponse, AlgorithmMetadata, AlgorithmResult};

const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000/api";
const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Cliente HTTP del servicio de algoritmos.
pub struct HttpAlgorithmService {
    client: reqwest::Client,
    base_url: String,
}

impl HttpAlgorithmService {
    /// Crea el cliente con URL base y timeout explícitos. El timeout aplica
    /// a cada petición completa; agotarlo se reporta como error de
    /// transporte, indistinguible de cualquier otro fallo de red.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ServiceError::Transport(e.to_string()))?;
        Ok(Self { client, base_url: base_url.trim_end_matches('/').to_string() })
    }

    /// Crea el cliente leyendo `ALGOVIZ_API_URL` y `ALGOVIZ_API_TIMEOUT_MS`
    /// del entorno (se carga `.env` si existe), con valores por defecto
    /// razonables para desarrollo local.
    pub fn new_from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        let base_url = std::env::var("ALGOVIZ_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let timeout_ms = std::env::var("ALGOVIZ_API_TIMEOUT_MS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(DEFAULT_TIMEOUT_MS);
        Self::new(&base_url, Duration::from_millis(timeout_ms))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(%url, "GET al servicio de algoritmos");
        let response = self.client.get(&url).send().await?;
        Self::decode(response).await
    }

    async fn post_json<T: DeserializeOwned, B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(%url, "POST al servicio de algoritmos");
        let response = self.client.post(&url).json(body).send().await?;
        Self::decode(response).await
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ServiceError::Status { status: status.as_u16(), message });
        }
        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl AlgorithmService for HttpAlgorithmService {
    async fn list_algorithms(&self) -> Result<AlgorithmListResponse> {
        self.get_json("/algorithms").await
    }

    async fn get_config(&self, name: &str) -> Result<AlgorithmConfig> {
        self.get_json(&format!("/algorithms/{}/config", name)).await
    }

    async fn get_metadata(&self, name: &str) -> Result<AlgorithmMetadata> {
        self.get_json(&format!("/algorithms/{}/metadata", name)).await
    }

    async fn execute(&self, name: &str, request: &AlgorithmExecuteRequest) -> Result<AlgorithmResult> {
        self.post_json(&format!("/algorithms/{}/execute", name), request).await
    }
}
