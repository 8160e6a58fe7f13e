//! Crate `viz-client` — acceso al servicio remoto de algoritmos
//!
//! Define el contrato `AlgorithmService` (las cuatro rutas del servicio de
//! ejecución), una implementación HTTP sobre `reqwest`
//! (`HttpAlgorithmService`) y una implementación en memoria útil para
//! pruebas y demos (`InMemoryAlgorithmService`).
//!
//! Diseño resumido:
//! - El consumidor (el núcleo de reproducción) sólo conoce el trait; las
//!   fallas de transporte, estado HTTP y decodificación se colapsan en un
//!   único `ServiceError` opaco con mensaje legible.
//! - No hay reintentos: una petición fallida requiere que el usuario vuelva
//!   a invocarla explícitamente.
//!
//! Ejemplo rápido:
//! ```rust
//! use viz_client::InMemoryAlgorithmService;
//! let service = InMemoryAlgorithmService::with_demo_algorithms();
//! ```
pub mod errors;
pub mod http;
pub mod service;
pub mod stubs;

pub use errors::*;
pub use http::*;
pub use service::*;
pub use stubs::*;
