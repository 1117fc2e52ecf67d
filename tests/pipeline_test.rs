//! Integration tests for the filter & sort pipeline and the export serializers

#[path = "common/mod.rs"]
mod common;

use common::*;
use pauta_cli::export::{export_file_name, to_csv, to_spreadsheet_html};
use pauta_cli::pipeline::{filter_and_sort, YearFilter};

#[test]
fn test_year_filter_orders_by_outlet_total() {
    let records = synthetic_dataset();
    let out = filter_and_sort(&records, "", YearFilter::Year(2023));

    // Canal B's 2023 outlet total (200) beats Canal A's (100).
    assert_eq!(out.len(), 2);
    assert_eq!(out[0].outlet, "Canal B");
    assert_eq!(out[1].outlet, "Canal A");
}

#[test]
fn test_all_years_orders_by_year_descending_first() {
    let records = synthetic_dataset();
    let out = filter_and_sort(&records, "", YearFilter::All);

    assert_eq!(out.len(), 3);
    assert_eq!(out[0].year, 2024);
    assert_eq!(out[1].year, 2023);
    assert_eq!(out[2].year, 2023);
}

#[test]
fn test_query_is_accent_and_case_insensitive() {
    let mut records = synthetic_dataset();
    records.push(make_record("Página Nueve", "Prov Tres", "Marzo", 2023, 10.0));

    let out = filter_and_sort(&records, "PÁGINA", YearFilter::All);
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].outlet, "Página Nueve");

    let out = filter_and_sort(&records, "pagina", YearFilter::All);
    assert_eq!(out.len(), 1);
}

#[test]
fn test_query_and_year_filter_compose() {
    let records = synthetic_dataset();
    let out = filter_and_sort(&records, "canal a", YearFilter::Year(2023));
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].year, 2023);
    assert_eq!(out[0].outlet, "Canal A");
}

#[test]
fn test_csv_round_trips_quoted_field() {
    let record = make_record("Canal \"La Voz\"", "Prov", "Enero", 2023, 10.0);
    let csv = to_csv(&[&record]);
    let data_line = csv.lines().nth(1).unwrap();

    // Standard CSV unquoting: strip the outer quotes, collapse doubled quotes.
    let first_field_raw = "\"Canal \"\"La Voz\"\"\"";
    assert!(data_line.starts_with(first_field_raw));
    let inner = &first_field_raw[1..first_field_raw.len() - 1];
    let unquoted = inner.replace("\"\"", "\"");
    assert_eq!(unquoted, "Canal \"La Voz\"");
}

#[test]
fn test_export_of_filtered_slice() {
    let records = synthetic_dataset();
    let slice = filter_and_sort(&records, "", YearFilter::Year(2023));
    let csv = to_csv(&slice);

    assert_eq!(csv.lines().count(), 3);
    assert!(csv.contains("\"Canal B\""));
    assert!(!csv.contains("2024"));

    let html = to_spreadsheet_html(&slice);
    assert!(html.contains("<td>Canal B</td>"));
}

#[test]
fn test_export_file_names_match_scope() {
    assert_eq!(export_file_name(YearFilter::All, "csv"), "pauta_filtrada_todos.csv");
    assert_eq!(export_file_name(YearFilter::Year(2023), "xls"), "pauta_filtrada_2023.xls");
}
