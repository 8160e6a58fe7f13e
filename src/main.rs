use playback::ResultStore;
use serde_json::json;
use std::error::Error;
use std::io::{self, Write};
use std::sync::Arc;
use std::time::Duration;
use viz_client::InMemoryAlgorithmService;

/// Pequeño menú interactivo para recorrer ejecuciones de algoritmos usando
/// el `ResultStore` sobre el servicio en memoria de demostración.
///
/// Opciones soportadas:
/// 1) Ver catálogo de algoritmos
/// 2) Seleccionar algoritmo
/// 3) Ejecutar algoritmo (con datos de demostración)
/// 4) Paso siguiente / 5) Paso anterior / 6) Ir a un paso
/// 7) Reproducir hasta el final
/// 8) Cambiar velocidad
/// 9) Reiniciar
/// 10) Salir
#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt().with_env_filter(tracing_subscriber::EnvFilter::from_default_env()).init();

    let service = Arc::new(InMemoryAlgorithmService::with_demo_algorithms());
    let store = ResultStore::new(service);

    loop {
        println!("\n== Menú de reproducción ==");
        println!("1) Ver catálogo de algoritmos");
        println!("2) Seleccionar algoritmo");
        println!("3) Ejecutar algoritmo seleccionado");
        println!("4) Paso siguiente");
        println!("5) Paso anterior");
        println!("6) Ir a un paso");
        println!("7) Reproducir hasta el final");
        println!("8) Cambiar velocidad (ms entre pasos)");
        println!("9) Reiniciar reproducción");
        println!("10) Salir");
        print!("Elige una opción: ");
        io::stdout().flush().ok();

        let mut choice = String::new();
        io::stdin().read_line(&mut choice)?;
        match choice.trim() {
            "1" => {
                store.fetch_algorithm_list().await;
                if let Some(e) = store.error() {
                    eprintln!("Error: {}", e);
                    continue;
                }
                println!("\nNOMBRE          | CATEGORÍA     | DESCRIPCIÓN");
                println!("------------------------------------------------------------");
                for meta in store.algorithms() {
                    println!("{:<15} | {:<13} | {}", meta.name, meta.category, meta.description);
                }
            }
            "2" => {
                let name = prompt("Nombre del algoritmo: ")?;
                match store.algorithms().into_iter().find(|m| m.name == name) {
                    Some(meta) => {
                        println!("Seleccionado: {}", meta.display_name);
                        store.select_algorithm(meta);
                    }
                    None => eprintln!("No hay ningún algoritmo llamado '{}' (usa la opción 1 primero)", name),
                }
            }
            "3" => {
                let data = match store.current_algorithm().map(|m| m.name) {
                    Some(name) if name == "bubble_sort" => json!({"array": [89, 34, 67, 23, 78, 45, 12]}),
                    Some(_) => json!({}),
                    None => {
                        eprintln!("Primero selecciona un algoritmo (opción 2)");
                        continue;
                    }
                };
                store.execute_algorithm(data, json!({})).await;
                match store.error() {
                    Some(e) => eprintln!("Error: {}", e),
                    None => println!("Ejecución completada: {} pasos", store.total_steps()),
                }
            }
            "4" => {
                store.next_step();
                print_current(&store);
            }
            "5" => {
                store.prev_step();
                print_current(&store);
            }
            "6" => {
                let raw = prompt("Número de paso: ")?;
                match raw.parse::<usize>() {
                    Ok(index) => {
                        store.go_to_step(index);
                        print_current(&store);
                    }
                    Err(_) => eprintln!("'{}' no es un índice válido", raw),
                }
            }
            "7" => {
                if store.total_steps() == 0 {
                    eprintln!("No hay resultado que reproducir (ejecuta primero, opción 3)");
                    continue;
                }
                store.play();
                let mut last_printed = None;
                while store.is_playing() {
                    let current = store.cursor();
                    if last_printed != Some(current) {
                        print_current(&store);
                        last_printed = Some(current);
                    }
                    tokio::time::sleep(Duration::from_millis(25)).await;
                }
                println!("Reproducción terminada en el paso {}", store.cursor());
            }
            "8" => {
                let raw = prompt("Milisegundos entre pasos: ")?;
                match raw.parse::<u64>() {
                    Ok(ms) if ms > 0 => {
                        store.set_playback_speed(ms);
                        println!("Velocidad: {} ms", ms);
                    }
                    _ => eprintln!("'{}' no es una velocidad válida", raw),
                }
            }
            "9" => {
                store.reset();
                println!("Cursor en 0, reproducción detenida");
            }
            "10" => break,
            other => eprintln!("Opción desconocida: {}", other),
        }
    }

    Ok(())
}

fn print_current<S: viz_client::AlgorithmService>(store: &ResultStore<S>) {
    match store.current_step_data() {
        Some(step) => println!("[{}/{}] {}: {}", step.step_id, store.total_steps(), step.action, step.description),
        None => println!("(sin pasos)"),
    }
}

fn prompt(message: &str) -> Result<String, Box<dyn Error>> {
    print!("{}", message);
    io::stdout().flush().ok();
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}
