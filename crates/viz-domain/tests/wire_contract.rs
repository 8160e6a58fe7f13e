use serde_json::json;
use viz_domain::{AlgorithmExecuteRequest, AlgorithmListResponse, AlgorithmMetadata, AlgorithmResult};

#[test]
fn list_response_matches_wire_shape() {
  // shape exactly as the execution service serializes it
  let payload = json!({
    "algorithms": [
      {
        "name": "bubble_sort",
        "display_name": "Ordenamiento burbuja",
        "category": "ordenamiento",
        "description": "Ordena comparando e intercambiando elementos adyacentes",
        "complexity_time": "O(n²)",
        "complexity_space": "O(1)",
        "author": "demo"
      }
    ],
    "total": 1
  });

  let resp: AlgorithmListResponse = serde_json::from_value(payload).expect("decode list response");
  assert_eq!(resp.total, 1);
  assert_eq!(resp.algorithms.len(), 1);
  assert_eq!(resp.algorithms[0].name, "bubble_sort");
  assert_eq!(resp.algorithms[0].complexity_time.as_deref(), Some("O(n²)"));
}

#[test]
fn metadata_optional_fields_can_be_absent() {
  let payload = json!({
    "name": "hello_world",
    "display_name": "Hello World (1+1)",
    "category": "basic",
    "description": "ejemplo mínimo"
  });
  let meta: AlgorithmMetadata = serde_json::from_value(payload).expect("decode metadata");
  assert!(meta.complexity_time.is_none());
  assert!(meta.author.is_none());
}

#[test]
fn result_round_trips_with_stable_field_names() {
  let payload = json!({
    "algorithm_name": "bubble_sort",
    "steps": [
      {
        "step_id": 0,
        "action": "initialize",
        "data_snapshot": {"array": [3, 1, 2]},
        "highlight": [],
        "description": "estado inicial",
        "timestamp": 0.0
      },
      {
        "step_id": 1,
        "action": "compare",
        "data_snapshot": {"array": [3, 1, 2], "comparing": [0, 1]},
        "highlight": [0, 1],
        "description": "comparar 3 y 1",
        "timestamp": 0.001
      }
    ],
    "final_result": {"sorted_array": [1, 2, 3]},
    "performance_metrics": {"comparisons": 3, "swaps": 2},
    "execution_time": 0.004,
    "created_at": "2024-05-01T12:00:00Z"
  });

  let result: AlgorithmResult = serde_json::from_value(payload.clone()).expect("decode result");
  assert_eq!(result.total_steps(), 2);
  assert_eq!(result.steps[1].highlight, vec![0, 1]);
  result.validate().expect("step ids in order");

  // re-serialization keeps the exact field names of the contract
  let back = serde_json::to_value(&result).expect("encode result");
  assert_eq!(back["steps"][0]["step_id"], json!(0));
  assert_eq!(back["algorithm_name"], json!("bubble_sort"));
  assert_eq!(back["performance_metrics"]["swaps"], json!(2));
}

#[test]
fn result_validate_rejects_out_of_order_step_ids() {
  let payload = json!({
    "algorithm_name": "x",
    "steps": [
      {"step_id": 1, "action": "a", "data_snapshot": {}, "highlight": [], "description": "", "timestamp": 0.0}
    ],
    "final_result": null,
    "performance_metrics": {},
    "execution_time": 0.0,
    "created_at": "2024-05-01T12:00:00Z"
  });
  let result: AlgorithmResult = serde_json::from_value(payload).expect("decode result");
  assert!(result.validate().is_err());
}

#[test]
fn execute_request_defaults_config_to_empty_object() {
  let req: AlgorithmExecuteRequest = serde_json::from_value(json!({"data": {"array": [2, 1]}})).expect("decode request");
  assert_eq!(req.config, json!({}));

  let req = AlgorithmExecuteRequest::new(json!({"array": [2, 1]}));
  let wire = serde_json::to_value(&req).expect("encode request");
  assert_eq!(wire, json!({"data": {"array": [2, 1]}, "config": {}}));
}

#[test]
fn metadata_name_must_not_be_empty() {
  assert!(AlgorithmMetadata::new("", "X", "cat", "desc").is_err());
  assert!(AlgorithmMetadata::new("ok", "X", "cat", "desc").is_ok());
}
