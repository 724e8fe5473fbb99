//! Writes research records to disk as JSON or single-row CSV.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::EngineError;
use crate::research::{ResearchConfidence, ResearchRecord};

/// `{dir}/price_research_{YYYYMMDD_HHMMSS}.json`
#[must_use]
pub fn default_export_path(dir: &Path, now: DateTime<Utc>) -> PathBuf {
    dir.join(format!("price_research_{}.json", now.format("%Y%m%d_%H%M%S")))
}

/// Writes `record` to `path`, as CSV when the extension is `csv` and as
/// pretty-printed JSON otherwise. Missing parent directories are created.
///
/// # Errors
///
/// Returns [`EngineError::ExportIo`], [`EngineError::ExportJson`] or
/// [`EngineError::ExportCsv`] when the file cannot be produced.
pub fn write_research_record(record: &ResearchRecord, path: &Path) -> Result<(), EngineError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| io_error(path, source))?;
    }

    if is_csv(path) {
        write_csv(record, path)
    } else {
        let json = serde_json::to_string_pretty(record)?;
        fs::write(path, json).map_err(|source| io_error(path, source))
    }
}

fn is_csv(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
}

fn io_error(path: &Path, source: std::io::Error) -> EngineError {
    EngineError::ExportIo {
        path: path.display().to_string(),
        source,
    }
}

/// Flattened record; CSV has no nesting.
#[derive(Serialize)]
struct ResearchRow<'a> {
    researched_at: String,
    product: &'a str,
    search_terms: &'a str,
    sold_listings_url: &'a str,
    current_listings_url: &'a str,
    average_sold_price: Option<f64>,
    sales_volume: Option<u32>,
    price_trend: Option<&'a str>,
    notes: Option<&'a str>,
    research_again_on: String,
    confidence: ResearchConfidence,
}

impl<'a> From<&'a ResearchRecord> for ResearchRow<'a> {
    fn from(record: &'a ResearchRecord) -> Self {
        Self {
            researched_at: record.researched_at.to_rfc3339(),
            product: &record.product,
            search_terms: &record.search_terms,
            sold_listings_url: &record.sold_listings_url,
            current_listings_url: &record.current_listings_url,
            average_sold_price: record.findings.average_sold_price,
            sales_volume: record.findings.sales_volume,
            price_trend: record.findings.price_trend.as_deref(),
            notes: record.findings.notes.as_deref(),
            research_again_on: record.research_again_on.to_rfc3339(),
            confidence: record.confidence,
        }
    }
}

fn write_csv(record: &ResearchRecord, path: &Path) -> Result<(), EngineError> {
    let csv_error = |source| EngineError::ExportCsv {
        path: path.display().to_string(),
        source,
    };

    let mut writer = csv::WriterBuilder::new()
        .has_headers(true)
        .from_path(path)
        .map_err(csv_error)?;
    writer
        .serialize(ResearchRow::from(record))
        .map_err(csv_error)?;
    writer.flush().map_err(|source| io_error(path, source))
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::research::ResearchPackage;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 9, 5, 7).single().expect("timestamp")
    }

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "pricer_export_{name}_{}",
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn default_path_is_timestamped() {
        let path = default_export_path(Path::new("exports"), now());
        assert_eq!(path, Path::new("exports/price_research_20240301_090507.json"));
    }

    #[test]
    fn json_export_round_trips() {
        let dir = scratch_dir("json");
        let path = dir.join("nested").join("record.json");
        let record = ResearchPackage::new("Widget", "widget", 90, now()).template;

        write_research_record(&record, &path).expect("export");

        let written = fs::read_to_string(&path).expect("read back");
        let parsed: ResearchRecord = serde_json::from_str(&written).expect("parse");
        assert_eq!(parsed, record);
        assert!(written.contains("\"confidence\": \"medium\""));
        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn csv_export_has_header_and_one_row() {
        let dir = scratch_dir("csv");
        let path = dir.join("record.CSV");
        let record = ResearchPackage::new("Widget, large", "widget", 90, now()).template;

        write_research_record(&record, &path).expect("export");

        let written = fs::read_to_string(&path).expect("read back");
        let lines: Vec<&str> = written.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("researched_at,product,search_terms"));
        assert!(lines[0].ends_with("research_again_on,confidence"));
        assert!(lines[1].contains("\"Widget, large\""));
        assert!(lines[1].ends_with(",medium"));
        let _ = fs::remove_dir_all(dir);
    }
}
