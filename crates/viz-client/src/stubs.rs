// Archivo: stubs.rs
// Propósito: implementación en memoria del `AlgorithmService` para pruebas
// y wiring rápido, más generadores de trazas de demostración (bubble sort y
// hello world). Estas implementaciones no tocan la red.
use crate::errors::{Result, ServiceError};
use crate::service::AlgorithmService;
use async_trait::async_trait;
use chrono::Utc;
use serde_json::{json, Value as JsonValue};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};
use viz_domain::{AlgorithmConfig, AlgorithmExecuteRequest, AlgorithmListResponse, AlgorithmMetadata, AlgorithmResult, AlgorithmStep};

fn locked<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|e| e.into_inner())
}

/// Servicio de algoritmos en memoria.
///
/// Pensado para pruebas locales y demos: sirve un catálogo fijo, resultados
/// enlatados por nombre y permite forzar el fallo de la *próxima* llamada a
/// `list_algorithms` o `execute` para ejercitar los caminos de error del
/// consumidor.
pub struct InMemoryAlgorithmService {
    catalog: Mutex<Vec<AlgorithmMetadata>>,
    results: Mutex<HashMap<String, AlgorithmResult>>,
    schemas: Mutex<HashMap<String, JsonValue>>,
    fail_list: Mutex<Option<String>>,
    fail_execute: Mutex<Option<String>>,
    execute_delay: Mutex<Option<Duration>>,
}

impl InMemoryAlgorithmService {
    /// Crea un servicio vacío, sin algoritmos registrados.
    pub fn new() -> Self {
        Self { catalog: Mutex::new(Vec::new()),
               results: Mutex::new(HashMap::new()),
               schemas: Mutex::new(HashMap::new()),
               fail_list: Mutex::new(None),
               fail_execute: Mutex::new(None),
               execute_delay: Mutex::new(None) }
    }

    /// Crea un servicio pre-cargado con los algoritmos de demostración
    /// (`bubble_sort`, `hello_world` y `stone_distribution`) y sus esquemas.
    pub fn with_demo_algorithms() -> Self {
        let service = Self::new();
        service.register(bubble_sort_metadata(), bubble_sort_schema(), bubble_sort_trace(&[89, 34, 67, 23, 78]));
        service.register(hello_world_metadata(), hello_world_schema(), hello_world_trace(1, 1));
        service.register(stone_distribution_metadata(),
                         stone_distribution_schema(),
                         stone_distribution_trace(3, 6, 3));
        service
    }

    /// Registra un algoritmo: metadatos de catálogo, esquema de configuración
    /// y el resultado enlatado que devolverá `execute`.
    pub fn register(&self, metadata: AlgorithmMetadata, schema: JsonValue, result: AlgorithmResult) {
        locked(&self.schemas).insert(metadata.name.clone(), schema);
        locked(&self.results).insert(metadata.name.clone(), result);
        locked(&self.catalog).push(metadata);
    }

    /// Fuerza que la próxima llamada a `list_algorithms` falle con `message`.
    pub fn fail_next_list(&self, message: &str) {
        *locked(&self.fail_list) = Some(message.to_string());
    }

    /// Fuerza que la próxima llamada a `execute` falle con `message`.
    pub fn fail_next_execute(&self, message: &str) {
        *locked(&self.fail_execute) = Some(message.to_string());
    }

    /// Añade una demora artificial a cada `execute`, útil para ejercitar
    /// peticiones solapadas en pruebas.
    pub fn set_execute_delay(&self, delay: Duration) {
        *locked(&self.execute_delay) = Some(delay);
    }
}

impl Default for InMemoryAlgorithmService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AlgorithmService for InMemoryAlgorithmService {
    async fn list_algorithms(&self) -> Result<AlgorithmListResponse> {
        if let Some(message) = locked(&self.fail_list).take() {
            return Err(ServiceError::Transport(message));
        }
        let algorithms = locked(&self.catalog).clone();
        let total = algorithms.len();
        Ok(AlgorithmListResponse { algorithms, total })
    }

    async fn get_config(&self, name: &str) -> Result<AlgorithmConfig> {
        locked(&self.schemas)
            .get(name)
            .cloned()
            .map(|schema| AlgorithmConfig { name: name.to_string(), schema })
            .ok_or_else(|| ServiceError::Status { status: 404, message: format!("Algoritmo '{}' no registrado", name) })
    }

    async fn get_metadata(&self, name: &str) -> Result<AlgorithmMetadata> {
        locked(&self.catalog)
            .iter()
            .find(|m| m.name == name)
            .cloned()
            .ok_or_else(|| ServiceError::Status { status: 404, message: format!("Algoritmo '{}' no registrado", name) })
    }

    async fn execute(&self, name: &str, request: &AlgorithmExecuteRequest) -> Result<AlgorithmResult> {
        // La respuesta queda fijada al recibir la petición; la demora sólo
        // retrasa su entrega, igual que una respuesta viajando por la red.
        let delay = *locked(&self.execute_delay);
        let response = self.resolve_execute(name, request);
        if let Some(d) = delay {
            tokio::time::sleep(d).await;
        }
        response
    }
}

impl InMemoryAlgorithmService {
    /// Resuelve una petición de ejecución. `bubble_sort` y
    /// `stone_distribution` se recalculan sobre la petición, como hace el
    /// servicio real; el resto devuelve el resultado registrado.
    fn resolve_execute(&self, name: &str, request: &AlgorithmExecuteRequest) -> Result<AlgorithmResult> {
        if let Some(message) = locked(&self.fail_execute).take() {
            return Err(ServiceError::Transport(message));
        }
        if name == "bubble_sort" {
            if let Some(values) = request.data.get("array").and_then(|v| v.as_array()) {
                let array: Vec<i64> = values.iter().filter_map(|v| v.as_i64()).collect();
                if array.len() >= 2 && array.len() == values.len() {
                    return Ok(bubble_sort_trace(&array));
                }
                return Err(ServiceError::Status { status: 500,
                                                  message: "El array debe contener al menos 2 números".to_string() });
            }
        }
        if name == "stone_distribution" {
            // Los valores por defecto del stub son pequeños para que la
            // búsqueda enlatada sea barata; el esquema documenta los del
            // servicio real.
            let cfg = &request.config;
            let k_boxes = cfg.get("k_boxes").and_then(|v| v.as_u64()).unwrap_or(3) as usize;
            let n_stones = cfg.get("n_stones").and_then(|v| v.as_u64()).unwrap_or(6);
            let p_parts = cfg.get("p_parts").and_then(|v| v.as_u64()).unwrap_or(3) as usize;
            if p_parts < 2 || n_stones % p_parts as u64 != 0 {
                return Err(ServiceError::Status { status: 500,
                                                  message: format!("Las {} piedras no se pueden dividir en {} partes iguales",
                                                                   n_stones, p_parts) });
            }
            if p_parts > k_boxes {
                return Err(ServiceError::Status { status: 500,
                                                  message: format!("El número de partes {} no puede superar el de casillas {}",
                                                                   p_parts, k_boxes) });
            }
            return Ok(stone_distribution_trace(k_boxes, n_stones, p_parts));
        }
        locked(&self.results)
            .get(name)
            .cloned()
            .ok_or_else(|| ServiceError::Status { status: 404, message: format!("Algoritmo '{}' no registrado", name) })
    }
}

/// Grabadora de pasos usada por los generadores de trazas: asigna
/// `step_id` ordinal y `timestamp` relativo al inicio.
struct StepRecorder {
    steps: Vec<AlgorithmStep>,
    started: Instant,
}

impl StepRecorder {
    fn new() -> Self {
        Self { steps: Vec::new(), started: Instant::now() }
    }

    fn add(&mut self, action: &str, data_snapshot: JsonValue, highlight: Vec<usize>, description: String) {
        let step_id = self.steps.len() as u64;
        self.steps.push(AlgorithmStep { step_id,
                                        action: action.to_string(),
                                        data_snapshot,
                                        highlight,
                                        description,
                                        timestamp: self.started.elapsed().as_secs_f64() });
    }

    fn into_result(self, algorithm_name: &str, final_result: JsonValue, performance_metrics: JsonValue) -> AlgorithmResult {
        AlgorithmResult { algorithm_name: algorithm_name.to_string(),
                          execution_time: self.started.elapsed().as_secs_f64(),
                          steps: self.steps,
                          final_result,
                          performance_metrics,
                          created_at: Utc::now() }
    }
}

pub fn bubble_sort_metadata() -> AlgorithmMetadata {
    AlgorithmMetadata { name: "bubble_sort".to_string(),
                        display_name: "Ordenamiento burbuja".to_string(),
                        category: "ordenamiento".to_string(),
                        description: "Ordena el array comparando e intercambiando elementos adyacentes".to_string(),
                        complexity_time: Some("O(n²)".to_string()),
                        complexity_space: Some("O(1)".to_string()),
                        author: Some("demo".to_string()) }
}

pub fn bubble_sort_schema() -> JsonValue {
    json!({
        "type": "object",
        "properties": {
            "array": { "type": "array", "items": {"type": "number"}, "minItems": 2, "maxItems": 50 }
        },
        "required": ["array"]
    })
}

/// Genera la traza completa de un ordenamiento burbuja sobre `array`:
/// un paso `initialize`, por cada pasada `pass_start`, pares
/// `compare`/`swap_start`/`swap_complete`, un `pass_complete`, y un paso
/// final `complete`. Cada snapshot lleva el array vigente, los índices en
/// comparación o intercambio, el rango ya ordenado y los contadores.
pub fn bubble_sort_trace(array: &[i64]) -> AlgorithmResult {
    let mut recorder = StepRecorder::new();
    let mut arr = array.to_vec();
    let n = arr.len();
    let mut comparisons: u64 = 0;
    let mut swaps: u64 = 0;
    let mut iterations: u64 = 0;

    let metrics = |comparisons: u64, swaps: u64, iterations: u64| {
        json!({"comparisons": comparisons, "swaps": swaps, "iterations": iterations, "array_length": n})
    };
    let sorted_tail = |from: usize| -> Vec<usize> { (from..n).collect() };

    recorder.add("initialize",
                 json!({"array": arr, "comparing": [], "swapping": [], "sorted": [],
                        "performance": metrics(comparisons, swaps, iterations)}),
                 vec![],
                 format!("Inicializar el array: {:?}", arr));

    for i in 0..n {
        iterations += 1;
        recorder.add("pass_start",
                     json!({"array": arr, "comparing": [], "swapping": [], "sorted": sorted_tail(n - i),
                            "current_pass": i + 1, "performance": metrics(comparisons, swaps, iterations)}),
                     vec![],
                     format!("Comienza la pasada {}", i + 1));

        let mut swapped = false;
        for j in 0..n.saturating_sub(i + 1) {
            comparisons += 1;
            recorder.add("compare",
                         json!({"array": arr, "comparing": [j, j + 1], "swapping": [], "sorted": sorted_tail(n - i),
                                "current_pass": i + 1, "performance": metrics(comparisons, swaps, iterations)}),
                         vec![j, j + 1],
                         format!("Comparar {} y {}", arr[j], arr[j + 1]));

            if arr[j] > arr[j + 1] {
                recorder.add("swap_start",
                             json!({"array": arr, "comparing": [], "swapping": [j, j + 1], "sorted": sorted_tail(n - i),
                                    "current_pass": i + 1, "performance": metrics(comparisons, swaps, iterations)}),
                             vec![j, j + 1],
                             format!("Hay que intercambiar {} y {}", arr[j], arr[j + 1]));
                arr.swap(j, j + 1);
                swapped = true;
                swaps += 1;
                recorder.add("swap_complete",
                             json!({"array": arr, "comparing": [], "swapping": [j, j + 1], "sorted": sorted_tail(n - i),
                                    "current_pass": i + 1, "performance": metrics(comparisons, swaps, iterations)}),
                             vec![j, j + 1],
                             format!("Intercambio completado en las posiciones {} y {}", j, j + 1));
            }
        }

        recorder.add("pass_complete",
                     json!({"array": arr, "comparing": [], "swapping": [], "sorted": sorted_tail(n - i - 1),
                            "current_pass": i + 1, "performance": metrics(comparisons, swaps, iterations)}),
                     vec![n - i - 1],
                     format!("Pasada {} completada", i + 1));

        if !swapped {
            break;
        }
    }

    recorder.add("complete",
                 json!({"array": arr, "comparing": [], "swapping": [], "sorted": sorted_tail(0),
                        "performance": metrics(comparisons, swaps, iterations)}),
                 (0..n).collect(),
                 format!("Ordenamiento completado: {:?}", arr));

    let final_result = json!({"sorted_array": arr, "original_array": array,
                              "comparisons": comparisons, "swaps": swaps, "iterations": iterations});
    let performance = metrics(comparisons, swaps, iterations);
    recorder.into_result("bubble_sort", final_result, performance)
}

pub fn hello_world_metadata() -> AlgorithmMetadata {
    AlgorithmMetadata { name: "hello_world".to_string(),
                        display_name: "Hello World (1+1)".to_string(),
                        category: "basic".to_string(),
                        description: "Ejemplo mínimo: calcula 1+1 mostrando los pasos".to_string(),
                        complexity_time: Some("O(1)".to_string()),
                        complexity_space: Some("O(1)".to_string()),
                        author: None }
}

pub fn hello_world_schema() -> JsonValue {
    json!({
        "num1": { "type": "number", "default": 1, "min": 0, "max": 100 },
        "num2": { "type": "number", "default": 1, "min": 0, "max": 100 }
    })
}

/// Traza de tres pasos que muestra la suma `num1 + num2`.
pub fn hello_world_trace(num1: i64, num2: i64) -> AlgorithmResult {
    let mut recorder = StepRecorder::new();
    recorder.add("initialize",
                 json!({"num1": num1, "num2": num2, "result": null}),
                 vec![0, 1],
                 format!("Inicializar los números: {} y {}", num1, num2));
    recorder.add("calculate",
                 json!({"num1": num1, "num2": num2, "result": null, "operation": "+"}),
                 vec![0, 1],
                 format!("Calcular: {} + {}", num1, num2));
    let result = num1 + num2;
    recorder.add("result",
                 json!({"num1": num1, "num2": num2, "result": result}),
                 vec![2],
                 format!("Resultado: {}", result));
    recorder.into_result("hello_world",
                         json!({"result": result}),
                         json!({"operations": 1}))
}

pub fn stone_distribution_metadata() -> AlgorithmMetadata {
    AlgorithmMetadata { name: "stone_distribution".to_string(),
                        display_name: "Distribución de piedras".to_string(),
                        category: "optimización".to_string(),
                        description: "Reparte N piedras de K casillas en P partes iguales con el mínimo de movimientos (búsqueda BFS)".to_string(),
                        complexity_time: Some("O(estados × transiciones)".to_string()),
                        complexity_space: Some("O(estados)".to_string()),
                        author: Some("demo".to_string()) }
}

pub fn stone_distribution_schema() -> JsonValue {
    json!({
        "type": "object",
        "properties": {
            "k_boxes": { "type": "integer", "minimum": 3, "maximum": 20, "default": 9 },
            "n_stones": { "type": "integer", "minimum": 3, "maximum": 300, "default": 90 },
            "p_parts": { "type": "integer", "minimum": 2, "maximum": 10, "default": 3 }
        },
        "required": ["k_boxes", "n_stones", "p_parts"]
    })
}

/// Un movimiento de la solución: `half` traslada la mitad (entera) de las
/// piedras de una casilla, `all` las traslada todas.
struct StoneMove {
    kind: &'static str,
    from: usize,
    to: usize,
    amount: u64,
    state: Vec<u64>,
}

const BFS_STATE_LIMIT: usize = 100_000;

/// Genera la traza del problema de distribución de piedras: todas las
/// piedras empiezan en la casilla 0 y hay que dejar `n_stones / p_parts` en
/// cada una de las primeras `p_parts` casillas usando el mínimo de
/// movimientos. La búsqueda es BFS sobre el espacio de estados, acotada a
/// `BFS_STATE_LIMIT` estados; si se agota, la traza termina en
/// `no_solution` con `min_steps = -1`.
///
/// Precondición (la valida el servicio): `p_parts` divide a `n_stones` y
/// no supera a `k_boxes`.
pub fn stone_distribution_trace(k_boxes: usize, n_stones: u64, p_parts: usize) -> AlgorithmResult {
    let mut recorder = StepRecorder::new();
    let target_per_part = n_stones / p_parts as u64;
    let mut initial_state = vec![0u64; k_boxes];
    initial_state[0] = n_stones;
    let target_state: Vec<u64> = (0..k_boxes).map(|i| if i < p_parts { target_per_part } else { 0 }).collect();

    recorder.add("initialize",
                 json!({"current_state": initial_state, "target_state": target_state,
                        "k_boxes": k_boxes, "n_stones": n_stones, "p_parts": p_parts,
                        "target_per_part": target_per_part, "step_count": 0}),
                 vec![0],
                 format!("Estado inicial: la casilla 0 tiene {} piedras; objetivo: {} casillas con {} cada una",
                         n_stones, p_parts, target_per_part));

    let (solution, states_explored) = bfs_solve(&initial_state, &target_state, k_boxes, &mut recorder);

    let final_result = match solution {
        Some(path) => {
            let min_steps = path.len();
            for (i, mv) in path.iter().enumerate() {
                let how = if mv.kind == "half" { "la mitad" } else { "todas" };
                recorder.add("move",
                             json!({"current_state": mv.state, "target_state": target_state,
                                    "step_count": i + 1, "action_type": mv.kind,
                                    "from_box": mv.from, "to_box": mv.to, "amount": mv.amount}),
                             vec![mv.from, mv.to],
                             format!("Paso {}: mover {} ({} piedras) de la casilla {} a la {}",
                                     i + 1, how, mv.amount, mv.from, mv.to));
            }
            recorder.add("complete",
                         json!({"current_state": target_state, "target_state": target_state,
                                "step_count": min_steps, "solution_found": true}),
                         (0..p_parts).collect(),
                         format!("Solución encontrada: {} movimientos para el reparto en {} partes", min_steps, p_parts));
            let path_json: Vec<JsonValue> = path.iter()
                                                .map(|mv| {
                                                    json!({"action_type": mv.kind, "from_box": mv.from,
                                                           "to_box": mv.to, "amount": mv.amount, "state": mv.state})
                                                })
                                                .collect();
            json!({"min_steps": min_steps, "path": path_json,
                   "initial_state": initial_state, "target_state": target_state,
                   "k_boxes": k_boxes, "n_stones": n_stones, "p_parts": p_parts})
        }
        None => {
            recorder.add("no_solution",
                         json!({"current_state": initial_state, "target_state": target_state, "step_count": -1}),
                         vec![],
                         "Sin solución dentro del límite de búsqueda; prueba otros parámetros".to_string());
            json!({"min_steps": -1, "path": [],
                   "initial_state": initial_state, "target_state": target_state})
        }
    };

    let performance = json!({"states_explored": states_explored, "state_limit": BFS_STATE_LIMIT});
    recorder.into_result("stone_distribution", final_result, performance)
}

fn bfs_solve(initial: &[u64],
             target: &[u64],
             k_boxes: usize,
             recorder: &mut StepRecorder)
             -> (Option<Vec<StoneMove>>, usize) {
    use std::collections::{HashSet, VecDeque};

    let mut queue: VecDeque<(Vec<u64>, Vec<usize>)> = VecDeque::new();
    let mut visited: HashSet<Vec<u64>> = HashSet::new();
    // los caminos se reconstruyen por índice de movimiento para no clonar
    // el camino completo en cada estado encolado
    let mut moves: Vec<StoneMove> = Vec::new();
    let mut explored = 0usize;

    visited.insert(initial.to_vec());
    queue.push_back((initial.to_vec(), Vec::new()));

    while let Some((state, path)) = queue.pop_front() {
        if explored >= BFS_STATE_LIMIT {
            return (None, explored);
        }
        explored += 1;

        if state == target {
            let solution = path.into_iter()
                               .map(|idx| {
                                   let mv = &moves[idx];
                                   StoneMove { kind: mv.kind, from: mv.from, to: mv.to, amount: mv.amount, state: mv.state.clone() }
                               })
                               .collect();
            return (Some(solution), explored);
        }

        if explored % 1000 == 0 {
            recorder.add("searching",
                         json!({"current_state": state, "target_state": target,
                                "step_count": path.len(), "states_explored": explored,
                                "queue_size": queue.len()}),
                         vec![],
                         format!("Buscando... {} estados explorados", explored));
        }

        for mv in generate_moves(&state, k_boxes) {
            if visited.insert(mv.state.clone()) {
                let mut next_path = path.clone();
                let next_state = mv.state.clone();
                next_path.push(moves.len());
                moves.push(mv);
                queue.push_back((next_state, next_path));
            }
        }
    }

    (None, explored)
}

fn generate_moves(state: &[u64], k_boxes: usize) -> Vec<StoneMove> {
    let mut result = Vec::new();
    for i in 0..k_boxes {
        if state[i] == 0 {
            continue;
        }
        for j in 0..k_boxes {
            if i == j {
                continue;
            }
            if state[i] >= 2 {
                let half = state[i] / 2;
                let mut next = state.to_vec();
                next[i] -= half;
                next[j] += half;
                result.push(StoneMove { kind: "half", from: i, to: j, amount: half, state: next });
            }
            let all = state[i];
            let mut next = state.to_vec();
            next[i] = 0;
            next[j] += all;
            result.push(StoneMove { kind: "all", from: i, to: j, amount: all, state: next });
        }
    }
    result
}
