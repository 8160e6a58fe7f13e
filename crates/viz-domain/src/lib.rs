//! viz-domain: modelo de datos de ejecuciones de algoritmos
//!
//! Define los tipos que viajan por el contrato de red del servicio de
//! algoritmos (`AlgorithmMetadata`, `AlgorithmStep`, `AlgorithmResult`,
//! `AlgorithmConfig`) y las peticiones/respuestas asociadas. Los nombres de
//! campo son el contrato estable del servicio y no deben cambiarse.
//!
//! Los campos opacos (`data_snapshot`, `final_result`, `performance_metrics`,
//! `schema`) se modelan como `serde_json::Value`: el núcleo de reproducción
//! no impone ningún esquema sobre ellos.
mod algorithm;
mod errors;

pub use algorithm::{
  AlgorithmConfig, AlgorithmExecuteRequest, AlgorithmListResponse, AlgorithmMetadata,
  AlgorithmResult, AlgorithmStep,
};
pub use errors::{DomainError, Result};
