// Archivo: service.rs
// Propósito: definir el trait `AlgorithmService`, el contrato que deben
// implementar los accesos al servicio de ejecución (HTTP, in-memory, etc.).
use crate::errors::Result;
use async_trait::async_trait;
use viz_domain::{AlgorithmConfig, AlgorithmExecuteRequest, AlgorithmListResponse, AlgorithmMetadata, AlgorithmResult};

/// Contrato del servicio remoto de algoritmos.
///
/// Corresponde uno a uno con las rutas del servicio:
/// - `GET /algorithms`
/// - `GET /algorithms/{name}/config`
/// - `GET /algorithms/{name}/metadata`
/// - `POST /algorithms/{name}/execute`
#[async_trait]
pub trait AlgorithmService: Send + Sync {
    /// Obtiene el catálogo completo de algoritmos disponibles.
    async fn list_algorithms(&self) -> Result<AlgorithmListResponse>;

    /// Obtiene el esquema de configuración del algoritmo `name`.
    async fn get_config(&self, name: &str) -> Result<AlgorithmConfig>;

    /// Obtiene los metadatos del algoritmo `name`.
    async fn get_metadata(&self, name: &str) -> Result<AlgorithmMetadata>;

    /// Ejecuta el algoritmo `name` y devuelve el resultado completo
    /// (secuencia de pasos, valor final y métricas) de forma atómica.
    async fn execute(&self, name: &str, request: &AlgorithmExecuteRequest) -> Result<AlgorithmResult>;
}
