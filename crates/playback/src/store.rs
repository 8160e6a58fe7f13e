// Archivo: store.rs
// Propósito: implementar `ResultStore`, el dueño único del resultado
// vigente, el cursor de reproducción y el estado de carga/error. Todas las
// mutaciones pasan por sus operaciones; ningún colaborador externo toca el
// estado directamente.
use crate::scheduler::Scheduler;
use serde_json::Value as JsonValue;
use std::sync::{Arc, Mutex, MutexGuard};
use viz_client::AlgorithmService;
use viz_domain::{AlgorithmConfig, AlgorithmExecuteRequest, AlgorithmMetadata, AlgorithmResult, AlgorithmStep};

/// Milisegundos entre pasos por defecto.
pub const DEFAULT_PLAYBACK_SPEED_MS: u64 = 300;

/// Estado observable de la reproducción, derivado de `is_playing` y de la
/// posición del cursor. `Idle` y `Paused` sólo se distinguen por si el
/// cursor ya se movió alguna vez.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Idle,
    Playing,
    Paused,
}

/// Estado interno del store. Los derivados (`total_steps`, `has_next_step`,
/// `has_prev_step`) se calculan siempre sobre estos campos, nunca se
/// almacenan aparte.
pub(crate) struct StoreState {
    pub(crate) algorithms: Vec<AlgorithmMetadata>,
    pub(crate) algorithms_total: usize,
    pub(crate) current_algorithm: Option<AlgorithmMetadata>,
    pub(crate) current_result: Option<AlgorithmResult>,
    pub(crate) cursor: usize,
    pub(crate) is_playing: bool,
    pub(crate) loading: bool,
    pub(crate) error: Option<String>,
    pub(crate) playback_speed: u64,
}

impl StoreState {
    fn new(playback_speed: u64) -> Self {
        Self { algorithms: Vec::new(),
               algorithms_total: 0,
               current_algorithm: None,
               current_result: None,
               cursor: 0,
               is_playing: false,
               loading: false,
               error: None,
               playback_speed }
    }

    pub(crate) fn total_steps(&self) -> usize {
        self.current_result.as_ref().map(|r| r.total_steps()).unwrap_or(0)
    }

    pub(crate) fn has_next_step(&self) -> bool {
        self.cursor + 1 < self.total_steps()
    }

    pub(crate) fn has_prev_step(&self) -> bool {
        self.cursor > 0
    }
}

/// Store de resultados y reproducción.
///
/// Posee el catálogo, el algoritmo seleccionado, el resultado vigente y el
/// cursor, y controla en exclusiva al `Scheduler`. Las operaciones asíncronas
/// (`fetch_algorithm_list`, `execute_algorithm`, `fetch_config`) capturan
/// cualquier fallo del servicio en el campo `error`; nunca lo propagan.
///
/// Invariante del cursor: `0 <= cursor < max(1, total_steps)`. Con cero
/// pasos, `current_step_data` es `None` y ambos `has_*_step` son falsos.
pub struct ResultStore<S: AlgorithmService> {
    service: Arc<S>,
    state: Arc<Mutex<StoreState>>,
    scheduler: Scheduler,
}

impl<S: AlgorithmService> ResultStore<S> {
    /// Crea el store con la velocidad de reproducción por defecto.
    pub fn new(service: Arc<S>) -> Self {
        Self::with_playback_speed(service, DEFAULT_PLAYBACK_SPEED_MS)
    }

    /// Crea el store con una velocidad inicial explícita (ms entre pasos).
    pub fn with_playback_speed(service: Arc<S>, playback_speed: u64) -> Self {
        Self { service,
               state: Arc::new(Mutex::new(StoreState::new(playback_speed.max(1)))),
               scheduler: Scheduler::new() }
    }

    fn lock(&self) -> MutexGuard<'_, StoreState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    // --- operaciones asíncronas (puntos de suspensión del sistema) ---

    /// Reemplaza el catálogo con la respuesta del servicio. Ante un fallo
    /// deja el catálogo anterior intacto y registra el mensaje en `error`.
    /// `loading` se limpia en ambos caminos de salida.
    pub async fn fetch_algorithm_list(&self) {
        {
            let mut st = self.lock();
            st.loading = true;
            st.error = None;
        }
        let outcome = self.service.list_algorithms().await;
        let mut st = self.lock();
        match outcome {
            Ok(response) => {
                st.algorithms = response.algorithms;
                st.algorithms_total = response.total;
            }
            Err(e) => {
                tracing::warn!(error = %e, "fallo al obtener el catálogo");
                st.error = Some(format!("No se pudo obtener la lista de algoritmos: {}", e));
            }
        }
        st.loading = false;
    }

    /// Ejecuta el algoritmo seleccionado con `data` y `config`. Sin selección
    /// es un no-op silencioso. Con éxito, la respuesta reemplaza el resultado
    /// de forma atómica, el cursor vuelve a 0 y la reproducción se detiene;
    /// con fallo, el resultado previo queda intacto y sólo se registra
    /// `error`. Llamadas solapadas no se deduplican: gana la última respuesta
    /// en resolverse.
    pub async fn execute_algorithm(&self, data: JsonValue, config: JsonValue) {
        let name = {
            let mut st = self.lock();
            let name = match st.current_algorithm.as_ref() {
                Some(algorithm) => algorithm.name.clone(),
                None => return,
            };
            st.loading = true;
            st.error = None;
            name
        };
        let request = AlgorithmExecuteRequest { data, config };
        let outcome = self.service.execute(&name, &request).await;
        let mut st = self.lock();
        match outcome {
            Ok(result) => {
                self.scheduler.stop();
                st.current_result = Some(result);
                st.cursor = 0;
                st.is_playing = false;
            }
            Err(e) => {
                tracing::warn!(algorithm = %name, error = %e, "fallo al ejecutar el algoritmo");
                st.error = Some(format!("La ejecución del algoritmo falló: {}", e));
            }
        }
        st.loading = false;
    }

    /// Obtiene el esquema de configuración de `name` y lo devuelve tal cual
    /// (el store no lo interpreta). Ante un fallo registra `error` y
    /// devuelve `None`.
    pub async fn fetch_config(&self, name: &str) -> Option<AlgorithmConfig> {
        {
            let mut st = self.lock();
            st.loading = true;
            st.error = None;
        }
        let outcome = self.service.get_config(name).await;
        let mut st = self.lock();
        let config = match outcome {
            Ok(config) => Some(config),
            Err(e) => {
                st.error = Some(format!("No se pudo obtener la configuración: {}", e));
                None
            }
        };
        st.loading = false;
        config
    }

    // --- operaciones síncronas ---

    /// Selecciona `algorithm`: descarta el resultado vigente, devuelve el
    /// cursor a 0 y detiene cualquier reproducción en curso. No emite
    /// ninguna petición.
    pub fn select_algorithm(&self, algorithm: AlgorithmMetadata) {
        self.scheduler.stop();
        let mut st = self.lock();
        st.current_algorithm = Some(algorithm);
        st.current_result = None;
        st.cursor = 0;
        st.is_playing = false;
    }

    /// Avanza un paso si existe siguiente; en el límite es un no-op.
    pub fn next_step(&self) {
        let mut st = self.lock();
        if st.has_next_step() {
            st.cursor += 1;
        }
    }

    /// Retrocede un paso si existe anterior; en el límite es un no-op.
    pub fn prev_step(&self) {
        let mut st = self.lock();
        if st.has_prev_step() {
            st.cursor -= 1;
        }
    }

    /// Mueve el cursor a `index` sólo si `index < total_steps`; fuera de
    /// rango se ignora en silencio, no es un error.
    pub fn go_to_step(&self, index: usize) {
        let mut st = self.lock();
        if index < st.total_steps() {
            st.cursor = index;
        }
    }

    /// Cambia la velocidad (ms entre pasos). Surte efecto en el próximo tick
    /// armado; el tick ya pendiente conserva su demora. Cero se ignora.
    pub fn set_playback_speed(&self, milliseconds: u64) {
        if milliseconds == 0 {
            return;
        }
        self.lock().playback_speed = milliseconds;
    }

    /// Inicia la reproducción automática. Idempotente: si ya está
    /// reproduciendo no arma una segunda cadena de ticks.
    pub fn play(&self) {
        {
            let mut st = self.lock();
            if st.is_playing {
                return;
            }
            st.is_playing = true;
        }
        self.scheduler.start(Arc::clone(&self.state));
    }

    /// Pausa la reproducción y cancela el tick pendiente. Idempotente.
    pub fn pause(&self) {
        self.scheduler.stop();
        self.lock().is_playing = false;
    }

    /// Pausa y devuelve el cursor a 0.
    pub fn reset(&self) {
        self.pause();
        self.lock().cursor = 0;
    }

    /// Limpia el mensaje de error vigente.
    pub fn clear_error(&self) {
        self.lock().error = None;
    }

    // --- lecturas (estado y derivados) ---

    pub fn algorithms(&self) -> Vec<AlgorithmMetadata> {
        self.lock().algorithms.clone()
    }

    pub fn algorithms_total(&self) -> usize {
        self.lock().algorithms_total
    }

    pub fn current_algorithm(&self) -> Option<AlgorithmMetadata> {
        self.lock().current_algorithm.clone()
    }

    pub fn current_result(&self) -> Option<AlgorithmResult> {
        self.lock().current_result.clone()
    }

    pub fn cursor(&self) -> usize {
        self.lock().cursor
    }

    pub fn is_playing(&self) -> bool {
        self.lock().is_playing
    }

    pub fn loading(&self) -> bool {
        self.lock().loading
    }

    pub fn error(&self) -> Option<String> {
        self.lock().error.clone()
    }

    pub fn playback_speed(&self) -> u64 {
        self.lock().playback_speed
    }

    /// Pasos del resultado vigente, o vacío si no hay resultado.
    pub fn steps(&self) -> Vec<AlgorithmStep> {
        self.lock().current_result.as_ref().map(|r| r.steps.clone()).unwrap_or_default()
    }

    pub fn total_steps(&self) -> usize {
        self.lock().total_steps()
    }

    /// Paso bajo el cursor, o `None` si la secuencia está vacía.
    pub fn current_step_data(&self) -> Option<AlgorithmStep> {
        let st = self.lock();
        st.current_result.as_ref().and_then(|r| r.step(st.cursor)).cloned()
    }

    pub fn has_next_step(&self) -> bool {
        self.lock().has_next_step()
    }

    pub fn has_prev_step(&self) -> bool {
        self.lock().has_prev_step()
    }

    /// Estado de reproducción derivado; nunca se almacena.
    pub fn playback_state(&self) -> PlaybackState {
        let st = self.lock();
        if st.is_playing {
            PlaybackState::Playing
        } else if st.cursor > 0 {
            PlaybackState::Paused
        } else {
            PlaybackState::Idle
        }
    }

    /// Indica si hay una cadena de ticks armada. Expuesto para poder
    /// verificar que pausar o reemplazar estado no filtra temporizadores.
    pub fn is_timer_armed(&self) -> bool {
        self.scheduler.is_armed()
    }
}
