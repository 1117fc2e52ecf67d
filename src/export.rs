use crate::model::Record;
use crate::pipeline::YearFilter;

/// Fixed export column order, matching the dashboard's download headers.
const COLUMNS: &[&str] = &["Medio", "Proveedor", "Mes", "Resolución", "Año", "Importe"];

/// Renders records as CSV text.
///
/// Text fields are always double-quoted with embedded quotes doubled; the
/// year and amount columns are numeric and unquoted. Rows are separated by
/// `\n` with no trailing newline, matching the original export byte for byte.
pub fn to_csv(records: &[&Record]) -> String {
    let mut lines = Vec::with_capacity(records.len() + 1);
    lines.push(COLUMNS.join(","));
    for r in records {
        lines.push(format!(
            "{},{},{},{},{},{}",
            csv_field(&r.outlet),
            csv_field(&r.provider),
            csv_field(&r.month),
            csv_field(&r.resolution),
            r.year,
            r.amount
        ));
    }
    lines.join("\n")
}

/// Renders records as a minimal HTML-table document that spreadsheet
/// applications open as a worksheet (the classic `.xls` HTML payload).
/// All text fields are HTML-escaped.
pub fn to_spreadsheet_html(records: &[&Record]) -> String {
    let mut out = String::from(
        "<html><head><meta charset=\"utf-8\"></head><body><table><thead><tr>",
    );
    for col in COLUMNS {
        out.push_str("<th>");
        out.push_str(&html_escape(col));
        out.push_str("</th>");
    }
    out.push_str("</tr></thead><tbody>");
    for r in records {
        out.push_str("<tr>");
        for text in [&r.outlet, &r.provider, &r.month, &r.resolution] {
            out.push_str("<td>");
            out.push_str(&html_escape(text));
            out.push_str("</td>");
        }
        out.push_str(&format!("<td>{}</td><td>{}</td>", r.year, r.amount));
        out.push_str("</tr>");
    }
    out.push_str("</tbody></table></body></html>");
    out
}

/// Download file name for an export scope: `pauta_filtrada_todos.csv`,
/// `pauta_filtrada_2023.xls`, and so on.
pub fn export_file_name(scope: YearFilter, extension: &str) -> String {
    match scope {
        YearFilter::All => format!("pauta_filtrada_todos.{extension}"),
        YearFilter::Year(y) => format!("pauta_filtrada_{y}.{extension}"),
    }
}

fn csv_field(text: &str) -> String {
    format!("\"{}\"", text.replace('"', "\"\""))
}

fn html_escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{RawRecord, Record};

    fn record(outlet: &str, provider: &str, month: &str, year: u16, amount: f64) -> Record {
        let raw: RawRecord = serde_json::from_str(&format!(
            r#"{{"Medio":{},"Proveedor":{},"Mes":{},"Resolución":"R-1","Importe":{}}}"#,
            serde_json::json!(outlet),
            serde_json::json!(provider),
            serde_json::json!(month),
            amount
        ))
        .unwrap();
        Record::from_raw(raw, year, "test.json")
    }

    #[test]
    fn test_csv_header_and_row_shape() {
        let r = record("Canal A", "Prov", "Enero", 2023, 100.0);
        let csv = to_csv(&[&r]);
        let mut lines = csv.lines();
        assert_eq!(lines.next().unwrap(), "Medio,Proveedor,Mes,Resolución,Año,Importe");
        assert_eq!(lines.next().unwrap(), "\"Canal A\",\"Prov\",\"Enero\",\"R-1\",2023,100");
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_csv_escapes_embedded_quotes_by_doubling() {
        let r = record("Canal \"Nueve\"", "Prov", "Enero", 2023, 1.0);
        let csv = to_csv(&[&r]);
        assert!(csv.contains("\"Canal \"\"Nueve\"\"\""));
    }

    #[test]
    fn test_csv_fractional_amount() {
        let r = record("Canal A", "Prov", "Enero", 2023, 1500.5);
        assert!(to_csv(&[&r]).ends_with(",2023,1500.5"));
    }

    #[test]
    fn test_csv_empty_slice_is_header_only() {
        assert_eq!(to_csv(&[]), "Medio,Proveedor,Mes,Resolución,Año,Importe");
    }

    #[test]
    fn test_spreadsheet_html_escapes_text() {
        let r = record("Canal <A> & \"B\"", "O'Prov", "Enero", 2023, 1.0);
        let html = to_spreadsheet_html(&[&r]);
        assert!(html.contains("<td>Canal &lt;A&gt; &amp; &quot;B&quot;</td>"));
        assert!(html.contains("<td>O&#39;Prov</td>"));
        assert!(html.contains("<td>2023</td><td>1</td>"));
    }

    #[test]
    fn test_spreadsheet_html_is_a_complete_document() {
        let html = to_spreadsheet_html(&[]);
        assert!(html.starts_with("<html>"));
        assert!(html.ends_with("</html>"));
        assert!(html.contains("<th>Importe</th>"));
    }

    #[test]
    fn test_export_file_name_by_scope() {
        assert_eq!(export_file_name(YearFilter::All, "csv"), "pauta_filtrada_todos.csv");
        assert_eq!(export_file_name(YearFilter::Year(2024), "xls"), "pauta_filtrada_2024.xls");
    }
}
