use playback::ResultStore;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use viz_client::{bubble_sort_metadata, bubble_sort_schema, bubble_sort_trace, InMemoryAlgorithmService};
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

fn service_with_demo(n: usize) -> Arc<InMemoryAlgorithmService> {
  let service = Arc::new(InMemoryAlgorithmService::new());
  service.register(demo_meta(), json!({}), demo_result(n));
  service
}

#[tokio::test]
async fn fetch_list_replaces_catalog_and_clears_loading() {
  let service = Arc::new(InMemoryAlgorithmService::new());
  service.register(bubble_sort_metadata(), bubble_sort_schema(), bubble_sort_trace(&[2, 1]));
  let store = ResultStore::new(service);

  store.fetch_algorithm_list().await;
  assert_eq!(store.algorithms(), vec![bubble_sort_metadata()]);
  assert_eq!(store.algorithms_total(), 1);
  assert!(!store.loading());
  assert!(store.error().is_none());
}

#[tokio::test]
async fn fetch_list_failure_keeps_previous_catalog() {
  let service = service_with_demo(3);
  let store = ResultStore::new(Arc::clone(&service));

  store.fetch_algorithm_list().await;
  assert_eq!(store.algorithms().len(), 1);

  service.fail_next_list("caída simulada");
  store.fetch_algorithm_list().await;
  // sin sobreescritura parcial: el catálogo anterior sobrevive
  assert_eq!(store.algorithms().len(), 1);
  assert!(!store.loading());
  assert!(store.error().is_some());
}

#[tokio::test]
async fn execute_replaces_result_and_resets_cursor() {
  let service = service_with_demo(3);
  let store = ResultStore::new(service);
  store.select_algorithm(demo_meta());

  store.execute_algorithm(json!({"arr": [3, 1, 2]}), json!({})).await;
  assert_eq!(store.total_steps(), 3);
  assert_eq!(store.cursor(), 0);
  assert_eq!(store.current_step_data().map(|s| s.step_id), Some(0));
  assert!(!store.is_playing());
  assert!(!store.loading());
  assert!(store.error().is_none());
}

#[tokio::test]
async fn execute_failure_leaves_result_and_cursor_untouched() {
  let service = service_with_demo(3);
  let store = ResultStore::new(Arc::clone(&service));
  store.select_algorithm(demo_meta());
  store.execute_algorithm(json!({}), json!({})).await;
  store.go_to_step(1);

  service.fail_next_execute("el servicio explotó");
  store.execute_algorithm(json!({}), json!({})).await;

  assert!(store.error().is_some());
  assert!(!store.loading());
  assert_eq!(store.total_steps(), 3);
  assert_eq!(store.cursor(), 1);
}

#[tokio::test(start_paused = true)]
async fn overlapping_executes_keep_the_last_response_to_resolve() {
  let service = service_with_demo(3);
  let store = Arc::new(ResultStore::new(Arc::clone(&service)));
  store.select_algorithm(demo_meta());

  // la primera petición tarda 200 ms; su respuesta queda fijada en 3 pasos
  service.set_execute_delay(Duration::from_millis(200));
  let slow = {
    let store = Arc::clone(&store);
    tokio::spawn(async move { store.execute_algorithm(json!({}), json!({})).await })
  };
  tokio::task::yield_now().await;

  // la segunda sale después pero resuelve antes (50 ms) con 5 pasos
  service.register(demo_meta(), json!({}), demo_result(5));
  service.set_execute_delay(Duration::from_millis(50));
  let fast = {
    let store = Arc::clone(&store);
    tokio::spawn(async move { store.execute_algorithm(json!({}), json!({})).await })
  };
  tokio::task::yield_now().await;

  tokio::time::sleep(Duration::from_millis(60)).await;
  assert_eq!(store.total_steps(), 5);

  // al resolverse la petición lenta, su respuesta obsoleta sobreescribe a
  // la rápida: sin deduplicación, gana la última en llegar
  tokio::time::sleep(Duration::from_millis(150)).await;
  slow.await.expect("join");
  fast.await.expect("join");
  assert_eq!(store.total_steps(), 3);
  assert_eq!(store.cursor(), 0);
  assert!(!store.loading());
  assert!(store.error().is_none());
}

#[tokio::test]
async fn execute_without_selection_is_a_silent_noop() {
  let service = service_with_demo(3);
  let store = ResultStore::new(service);

  store.execute_algorithm(json!({}), json!({})).await;
  assert!(store.current_result().is_none());
  assert!(store.error().is_none());
  assert!(!store.loading());
}

#[tokio::test]
async fn clear_error_only_clears_the_message() {
  let service = service_with_demo(3);
  let store = ResultStore::new(Arc::clone(&service));
  store.select_algorithm(demo_meta());
  store.execute_algorithm(json!({}), json!({})).await;

  service.fail_next_execute("fallo transitorio");
  store.execute_algorithm(json!({}), json!({})).await;
  assert!(store.error().is_some());

  store.clear_error();
  assert!(store.error().is_none());
  // el resultado previo sigue disponible
  assert_eq!(store.total_steps(), 3);
}

#[tokio::test]
async fn fetch_config_passes_schema_through() {
  let service = Arc::new(InMemoryAlgorithmService::new());
  service.register(bubble_sort_metadata(), bubble_sort_schema(), bubble_sort_trace(&[2, 1]));
  let store = ResultStore::new(service);

  let config = store.fetch_config("bubble_sort").await.expect("config");
  assert_eq!(config.name, "bubble_sort");
  assert_eq!(config.schema["required"], json!(["array"]));
  assert!(!store.loading());

  // algoritmo inexistente: error registrado, None devuelto
  assert!(store.fetch_config("nadie").await.is_none());
  assert!(store.error().is_some());
  assert!(!store.loading());
}
