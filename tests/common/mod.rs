//! Common test utilities for integration tests

use pauta_cli::model::{RawRecord, Record};
use std::fs;
use std::path::Path;

/// Builds a normalized record from its essential fields.
#[allow(dead_code)]
pub fn make_record(outlet: &str, provider: &str, month: &str, year: u16, amount: f64) -> Record {
    let raw: RawRecord = serde_json::from_str(&format!(
        r#"{{"Medio":{},"Proveedor":{},"Mes":{},"Resolución":"RES-{}-001","Importe":{}}}"#,
        serde_json::json!(outlet),
        serde_json::json!(provider),
        serde_json::json!(month),
        year,
        amount
    ))
    .expect("record json parses");
    Record::from_raw(raw, year, &format!("pauta_bsas_{year}.json"))
}

/// The three-record synthetic dataset used across the aggregate and pipeline
/// tests: Canal A 2023/100, Canal A 2024/50, Canal B 2023/200.
#[allow(dead_code)]
pub fn synthetic_dataset() -> Vec<Record> {
    vec![
        make_record("Canal A", "Prov Uno", "Enero", 2023, 100.0),
        make_record("Canal A", "Prov Uno", "Febrero", 2024, 50.0),
        make_record("Canal B", "Prov Dos", "Enero", 2023, 200.0),
    ]
}

/// Writes a dataset JSON file into a directory.
#[allow(dead_code)]
pub fn write_dataset_file(dir: &Path, name: &str, body: &str) {
    fs::create_dir_all(dir).unwrap();
    fs::write(dir.join(name), body).unwrap();
}

/// Dataset body matching the 2023 slice of the synthetic dataset.
#[allow(dead_code)]
pub const DATASET_2023: &str = r#"[
  {"Medio":"Canal A","Proveedor":"Prov Uno","Mes":"Enero","Resolución":"RES-2023-001","Importe":100},
  {"Medio":"Canal B","Proveedor":"Prov Dos","Mes":"Enero","Resolución":"RES-2023-002","Importe":200}
]"#;

/// Dataset body matching the 2024 slice of the synthetic dataset.
#[allow(dead_code)]
pub const DATASET_2024: &str = r#"[
  {"Medio":"Canal A","Proveedor":"Prov Uno","Mes":"Febrero","Resolución":"RES-2024-001","Importe":50}
]"#;
