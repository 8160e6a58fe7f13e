//! Crate `playback` — máquina de estados de reproducción de ejecuciones
//!
//! Este crate es el núcleo del sistema: `ResultStore` posee el algoritmo
//! seleccionado, el resultado obtenido del servicio (secuencia ordenada de
//! pasos, valor final y métricas) y el cursor de reproducción; `Scheduler`
//! es el temporizador auto-rearmable que avanza el cursor un paso por tick
//! durante la reproducción automática.
//!
//! Diseño resumido:
//! - Modelo cooperativo: toda mutación ocurre en callbacks discretos
//!   (acción de usuario, tick del temporizador, respuesta de red) que corren
//!   hasta completarse; el candado interno nunca se retiene a través de un
//!   punto de suspensión.
//! - Los derivados (`total_steps`, `current_step_data`, `has_next_step`,
//!   `has_prev_step`) se recomputan en cada lectura; nunca se almacenan como
//!   campos mutables independientes.
//! - Los fallos de red nunca escapan de la operación: se convierten en el
//!   campo `error` visible para el usuario y `loading` se limpia en todos
//!   los caminos de salida.
//!
//! Ejemplo rápido:
//! ```rust,no_run
//! use playback::ResultStore;
//! use viz_client::InMemoryAlgorithmService;
//! use std::sync::Arc;
//! let service = Arc::new(InMemoryAlgorithmService::with_demo_algorithms());
//! let store = ResultStore::new(service);
//! ```
pub mod scheduler;
pub mod store;

pub use scheduler::Scheduler;
pub use store::{PlaybackState, ResultStore, DEFAULT_PLAYBACK_SPEED_MS};
