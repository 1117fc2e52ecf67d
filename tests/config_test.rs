//! Integration tests for TOML configuration loading

use pauta_cli::config::ResolvedConfigFile;
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_full_config_file_round_trip() {
    let mut tmp = NamedTempFile::new().unwrap();
    write!(
        tmp,
        r#"
        year = "2024"
        query = "canal"
        base_url = "https://example.com/data"
        datasets = ["pauta_bsas_2023.json", "pauta_bsas_2024.json"]
        concurrent_fetches = 2
        top_n = 10
        share_base_url = "https://example.com/"
        "#,
    )
    .unwrap();

    let config = ResolvedConfigFile::from_toml_file(tmp.path()).unwrap();
    assert_eq!(config.year, "2024");
    assert_eq!(config.query, "canal");
    assert_eq!(config.resolved.base_url, "https://example.com/data");
    assert_eq!(config.resolved.datasets.len(), 2);
    assert_eq!(config.resolved.concurrent_fetches, 2);
    assert_eq!(config.resolved.top_n, 10);
}

#[test]
fn test_data_dir_is_optional() {
    let mut tmp = NamedTempFile::new().unwrap();
    write!(
        tmp,
        r#"
        data_dir = "data/local"
        "#,
    )
    .unwrap();

    let config = ResolvedConfigFile::from_toml_file(tmp.path()).unwrap();
    assert_eq!(
        config.resolved.data_dir.as_deref(),
        Some(std::path::Path::new("data/local"))
    );
}

#[test]
fn test_invalid_toml_is_rejected() {
    let mut tmp = NamedTempFile::new().unwrap();
    write!(tmp, "year = [unclosed").unwrap();
    assert!(ResolvedConfigFile::from_toml_file(tmp.path()).is_err());
}

#[test]
fn test_missing_file_is_an_io_error() {
    let result = ResolvedConfigFile::from_toml_file(std::path::Path::new("/no/such/config.toml"));
    assert!(result.is_err());
}
