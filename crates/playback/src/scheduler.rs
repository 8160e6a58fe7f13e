// Archivo: scheduler.rs
// Propósito: implementar el temporizador de reproducción automática. Es un
// bucle de temporizador de un solo disparo que se rearma a sí mismo, no un
// intervalo fijo: cada tick relee la velocidad vigente, así los cambios de
// velocidad y la pausa surten efecto en el siguiente tick sin deriva ni
// ticks solapados.
use crate::store::StoreState;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::task::JoinHandle;

fn locked<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|e| e.into_inner())
}

/// Temporizador de reproducción.
///
/// Invariante: a lo sumo un tick pendiente a la vez. `start` reemplaza (y
/// aborta) cualquier cadena anterior; `stop` cancela el tick pendiente antes
/// de que dispare. El candado del estado jamás se retiene durante la espera.
pub struct Scheduler {
    handle: Mutex<Option<JoinHandle<()>>>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self { handle: Mutex::new(None) }
    }

    /// Arranca la cadena de ticks sobre `state`. Cada iteración: leer la
    /// velocidad vigente, dormir ese lapso (el disparo único armado),
    /// y al despertar avanzar un paso si `is_playing && has_next_step`;
    /// si alguna condición falla, apagar `is_playing` y no rearmar.
    pub(crate) fn start(&self, state: Arc<Mutex<StoreState>>) {
        let task = tokio::spawn(async move {
            loop {
                let delay = {
                    let st = locked(&state);
                    if !st.is_playing {
                        break;
                    }
                    Duration::from_millis(st.playback_speed)
                };
                tokio::time::sleep(delay).await;
                let mut st = locked(&state);
                if !st.is_playing {
                    break;
                }
                if st.has_next_step() {
                    st.cursor += 1;
                    tracing::debug!(cursor = st.cursor, "avance automático del cursor");
                } else {
                    st.is_playing = false;
                    tracing::debug!("reproducción completada, temporizador apagado");
                    break;
                }
            }
        });
        if let Some(previous) = locked(&self.handle).replace(task) {
            previous.abort();
        }
    }

    /// Cancela el tick pendiente, si existe. Idempotente.
    pub fn stop(&self) {
        if let Some(handle) = locked(&self.handle).take() {
            handle.abort();
        }
    }

    /// Indica si hay una cadena de ticks viva (armada y sin terminar).
    pub fn is_armed(&self) -> bool {
        locked(&self.handle).as_ref().map(|h| !h.is_finished()).unwrap_or(false)
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}
