// Pruebas del temporizador de reproducción con tiempo pausado de tokio:
// el reloj avanza de forma determinista, así que las posiciones del cursor
// en cada instante son exactas.
use playback::ResultStore;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use viz_client::InMemoryAlgorithmService;
use viz_domain::{AlgorithmMetadata, AlgorithmResult};

fn demo_meta() -> AlgorithmMetadata {
  AlgorithmMetadata::new("demo", "Demo", "pruebas", "resultado sintético").expect("metadata")
}

fn demo_result(n: usize) -> AlgorithmResult {
  let steps: Vec<_> = (0..n).map(|i| {
                               json!({
                                 "step_id": i,
                                 "action": "advance",
                                 "data_snapshot": {"i": i},
                                 "highlight": [],
                                 "description": format!("paso {}", i),
                                 "timestamp": 0.0
                               })
                             })
                             .collect();
  serde_json::from_value(json!({
    "algorithm_name": "demo",
    "steps": steps,
    "final_result": null,
    "performance_metrics": {},
    "execution_time": 0.0,
    "created_at": "2024-05-01T12:00:00Z"
  })).expect("demo result")
}

async fn store_with_steps(n: usize, speed_ms: u64) -> ResultStore<InMemoryAlgorithmService> {
  let service = Arc::new(InMemoryAlgorithmService::new());
  service.register(demo_meta(), json!({}), demo_result(n));
  let store = ResultStore::with_playback_speed(service, speed_ms);
  store.select_algorithm(demo_meta());
  store.execute_algorithm(json!({}), json!({})).await;
  store
}

#[tokio::test(start_paused = true)]
async fn playback_runs_to_completion_and_disarms() {
  let store = store_with_steps(3, 50).await;
  store.play();
  assert!(store.is_playing());
  assert!(store.is_timer_armed());

  tokio::time::sleep(Duration::from_millis(500)).await;
  // 0→1→2 y luego el tick final apaga la reproducción sin rearmar
  assert_eq!(store.cursor(), 2);
  assert!(!store.is_playing());
  assert!(!store.is_timer_armed());
}

#[tokio::test(start_paused = true)]
async fn play_twice_arms_a_single_tick_chain() {
  let store = store_with_steps(6, 50).await;
  store.play();
  store.play();

  tokio::time::sleep(Duration::from_millis(125)).await;
  // ticks en t=50 y t=100: una sola cadena avanza exactamente dos pasos
  assert_eq!(store.cursor(), 2);
}

#[tokio::test(start_paused = true)]
async fn pause_cancels_the_pending_tick() {
  let store = store_with_steps(10, 50).await;
  store.play();

  tokio::time::sleep(Duration::from_millis(60)).await;
  assert_eq!(store.cursor(), 1);

  store.pause();
  assert!(!store.is_playing());
  assert!(!store.is_timer_armed());

  tokio::time::sleep(Duration::from_millis(500)).await;
  // el tick cancelado nunca disparó
  assert_eq!(store.cursor(), 1);
}

#[tokio::test(start_paused = true)]
async fn speed_change_takes_effect_on_the_next_tick() {
  let store = store_with_steps(20, 100).await;
  store.play();

  tokio::time::sleep(Duration::from_millis(250)).await;
  assert_eq!(store.cursor(), 2);

  // el tick ya armado conserva los 100 ms; los siguientes usan 10 ms
  store.set_playback_speed(10);
  tokio::time::sleep(Duration::from_millis(105)).await;
  // t=300 con la demora vieja, luego t=310..350 con la nueva
  assert_eq!(store.cursor(), 8);
}

#[tokio::test(start_paused = true)]
async fn select_during_playback_stops_the_timer() {
  let store = store_with_steps(10, 50).await;
  store.play();
  tokio::time::sleep(Duration::from_millis(120)).await;
  assert_eq!(store.cursor(), 2);

  store.select_algorithm(demo_meta());
  assert!(!store.is_playing());
  assert!(!store.is_timer_armed());
  assert!(store.current_result().is_none());

  tokio::time::sleep(Duration::from_millis(300)).await;
  assert_eq!(store.cursor(), 0);
}

#[tokio::test(start_paused = true)]
async fn successful_execute_during_playback_stops_the_timer() {
  let store = store_with_steps(10, 50).await;
  store.play();
  tokio::time::sleep(Duration::from_millis(120)).await;
  assert_eq!(store.cursor(), 2);

  store.execute_algorithm(json!({}), json!({})).await;
  assert!(!store.is_playing());
  assert!(!store.is_timer_armed());
  assert_eq!(store.cursor(), 0);

  tokio::time::sleep(Duration::from_millis(300)).await;
  // sin temporizador viejo actuando sobre el resultado nuevo
  assert_eq!(store.cursor(), 0);
}

#[tokio::test(start_paused = true)]
async fn play_with_no_steps_stops_on_the_first_tick() {
  let store = store_with_steps(0, 50).await;
  store.play();
  assert!(store.is_playing());

  tokio::time::sleep(Duration::from_millis(200)).await;
  assert_eq!(store.cursor(), 0);
  assert!(!store.is_playing());
  assert!(!store.is_timer_armed());
}

#[tokio::test(start_paused = true)]
async fn play_after_pause_resumes_from_the_cursor() {
  let store = store_with_steps(5, 50).await;
  store.play();
  tokio::time::sleep(Duration::from_millis(60)).await;
  store.pause();
  assert_eq!(store.cursor(), 1);

  store.play();
  tokio::time::sleep(Duration::from_millis(500)).await;
  assert_eq!(store.cursor(), 4);
  assert!(!store.is_playing());
}
