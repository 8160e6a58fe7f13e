// algorithm.rs
use crate::DomainError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

fn empty_object() -> JsonValue {
  JsonValue::Object(serde_json::Map::new())
}

/// Un paso discreto de la ejecución de un algoritmo.
///
/// `step_id` es ordinal, único dentro de un resultado y estrictamente
/// creciente desde 0. `timestamp` lo asigna el productor (segundos desde el
/// inicio de la ejecución) y sólo sirve para mostrar: la reproducción nunca
/// lo usa para planificar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlgorithmStep {
  pub step_id: u64,
  pub action: String,
  pub data_snapshot: JsonValue,
  /// Índices que la vista debe resaltar en este paso.
  #[serde(default)]
  pub highlight: Vec<usize>,
  pub description: String,
  pub timestamp: f64,
}

/// Metadatos de un algoritmo del catálogo. Inmutables una vez obtenidos.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlgorithmMetadata {
  pub name: String,
  pub display_name: String,
  pub category: String,
  pub description: String,
  #[serde(default)]
  pub complexity_time: Option<String>,
  #[serde(default)]
  pub complexity_space: Option<String>,
  #[serde(default)]
  pub author: Option<String>,
}

impl AlgorithmMetadata {
  /// Crea metadatos validando que `name` no esté vacío (es el identificador
  /// único dentro del catálogo).
  pub fn new(name: &str, display_name: &str, category: &str, description: &str) -> Result<Self, DomainError> {
    if name.trim().is_empty() {
      return Err(DomainError::ValidationError("El nombre del algoritmo no puede estar vacío".to_string()));
    }
    Ok(Self { name: name.to_string(),
              display_name: display_name.to_string(),
              category: category.to_string(),
              description: description.to_string(),
              complexity_time: None,
              complexity_space: None,
              author: None })
  }

  pub fn with_complexity(mut self, time: &str, space: &str) -> Self {
    self.complexity_time = Some(time.to_string());
    self.complexity_space = Some(space.to_string());
    self
  }

  pub fn with_author(mut self, author: &str) -> Self {
    self.author = Some(author.to_string());
    self
  }
}

/// Resultado completo de una ejecución: secuencia ordenada e inmutable de
/// pasos, valor final y métricas. Se crea de forma atómica por una petición
/// de ejecución exitosa y se reemplaza entero, nunca se muta in situ.
///
/// Una secuencia vacía es válida y significa "no hay pasos que reproducir".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlgorithmResult {
  pub algorithm_name: String,
  pub steps: Vec<AlgorithmStep>,
  pub final_result: JsonValue,
  pub performance_metrics: JsonValue,
  pub execution_time: f64,
  pub created_at: DateTime<Utc>,
}

impl AlgorithmResult {
  pub fn total_steps(&self) -> usize {
    self.steps.len()
  }

  pub fn is_empty(&self) -> bool {
    self.steps.is_empty()
  }

  pub fn step(&self, index: usize) -> Option<&AlgorithmStep> {
    self.steps.get(index)
  }

  /// Comprueba el invariante de la secuencia: los `step_id` son 0..n en
  /// orden. Los productores bien formados siempre lo cumplen; esta
  /// verificación existe para rechazar trazas corruptas antes de usarlas.
  pub fn validate(&self) -> Result<(), DomainError> {
    for (i, step) in self.steps.iter().enumerate() {
      if step.step_id != i as u64 {
        return Err(DomainError::ValidationError(format!(
          "step_id fuera de orden: se esperaba {} y se encontró {}", i, step.step_id
        )));
      }
    }
    Ok(())
  }
}

/// Esquema de configuración de un algoritmo (`GET /algorithms/{name}/config`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlgorithmConfig {
  pub name: String,
  pub schema: JsonValue,
}

/// Cuerpo de `POST /algorithms/{name}/execute`. `config` es opcional en el
/// productor y por defecto es un objeto vacío.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlgorithmExecuteRequest {
  pub data: JsonValue,
  #[serde(default = "empty_object")]
  pub config: JsonValue,
}

impl AlgorithmExecuteRequest {
  pub fn new(data: JsonValue) -> Self {
    Self { data, config: empty_object() }
  }

  pub fn with_config(data: JsonValue, config: JsonValue) -> Self {
    Self { data, config }
  }
}

/// Respuesta de `GET /algorithms`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlgorithmListResponse {
  pub algorithms: Vec<AlgorithmMetadata>,
  pub total: usize,
}
