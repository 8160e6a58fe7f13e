use playback::ResultStore;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use viz_client::InMemoryAlgorithmService;

#[tokio::main]
async fn main() {
    // Servicio en memoria con los algoritmos de demostración
    let service = Arc::new(InMemoryAlgorithmService::with_demo_algorithms());
    let store = ResultStore::with_playback_speed(service, 50);

    // Catálogo
    store.fetch_algorithm_list().await;
    for meta in store.algorithms() {
        println!("{} — {} ({})", meta.name, meta.display_name, meta.category);
    }

    // Seleccionar y ejecutar bubble_sort sobre datos propios
    let bubble = store.algorithms().into_iter().find(|m| m.name == "bubble_sort").expect("bubble_sort en el catálogo");
    store.select_algorithm(bubble);
    store.execute_algorithm(json!({"array": [5, 2, 9, 1, 7]}), json!({})).await;
    println!("\npasos totales: {}", store.total_steps());

    // Recorrer a mano los tres primeros pasos
    for _ in 0..3 {
        if let Some(step) = store.current_step_data() {
            println!("[{}] {}: {}", step.step_id, step.action, step.description);
        }
        store.next_step();
    }

    // Reproducción automática hasta el final
    store.go_to_step(0);
    store.play();
    while store.is_playing() {
        tokio::time::sleep(Duration::from_millis(25)).await;
    }
    let last = store.current_step_data().expect("último paso");
    println!("\nreproducción terminada en el paso {}: {}", last.step_id, last.description);
}
