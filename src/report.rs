//! CSV report output.

use std::io::Read;
use std::path::Path;
use tokio::fs;

use crate::models::ReportRow;
use crate::types::{AuditError, AuditResult};

/// Header row, in column order.
pub const REPORT_COLUMNS: [&str; 8] = [
    "position",
    "title",
    "link",
    "final_url",
    "http_code",
    "status",
    "displayed_link",
    "snippet",
];

/// Serialize rows to CSV bytes. The header is always written, even for an
/// empty report.
pub fn render_csv(rows: &[ReportRow]) -> Result<Vec<u8>, csv::Error> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    wtr.write_record(REPORT_COLUMNS)?;
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))
}

/// Truncate `path` and write the full report to it.
pub async fn write_report(path: &Path, rows: &[ReportRow]) -> AuditResult<()> {
    let report_error = |reason: String| AuditError::Report {
        path: path.to_path_buf(),
        reason,
    };

    let data = render_csv(rows).map_err(|e| report_error(e.to_string()))?;
    fs::write(path, data)
        .await
        .map_err(|e| report_error(e.to_string()))?;
    Ok(())
}

/// Parse a report previously produced by [`render_csv`].
pub fn read_rows<R: Read>(reader: R) -> Result<Vec<ReportRow>, csv::Error> {
    csv::ReaderBuilder::new()
        .from_reader(reader)
        .deserialize()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_rows() -> Vec<ReportRow> {
        vec![
            ReportRow {
                position: 1,
                title: Some("Home, \"quoted\"".to_string()),
                link: "https://example.com/".to_string(),
                final_url: "https://example.com/".to_string(),
                http_code: Some(200),
                status: "OK".to_string(),
                displayed_link: Some("https://example.com".to_string()),
                snippet: Some("Line one\nline two".to_string()),
            },
            ReportRow {
                position: 2,
                title: None,
                link: "https://example.com/old".to_string(),
                final_url: "https://example.com/old".to_string(),
                http_code: None,
                status: "Error: connection failed".to_string(),
                displayed_link: None,
                snippet: None,
            },
            ReportRow {
                position: 3,
                title: Some("Über uns".to_string()),
                link: "https://example.com/about".to_string(),
                final_url: "https://example.com/de/about".to_string(),
                http_code: Some(404),
                status: "Not Found".to_string(),
                displayed_link: Some("example.com › about".to_string()),
                snippet: None,
            },
        ]
    }

    #[test]
    fn test_header_only_when_empty() {
        let data = render_csv(&[]).unwrap();
        assert_eq!(
            String::from_utf8(data).unwrap(),
            "position,title,link,final_url,http_code,status,displayed_link,snippet\n"
        );
    }

    #[test]
    fn test_absent_fields_are_empty_strings() {
        let data = String::from_utf8(render_csv(&sample_rows()[1..2]).unwrap()).unwrap();
        let line = data.lines().nth(1).unwrap();
        assert_eq!(
            line,
            "2,,https://example.com/old,https://example.com/old,,Error: connection failed,,"
        );
    }

    #[test]
    fn test_round_trip() {
        let rows = sample_rows();
        let data = render_csv(&rows).unwrap();

        let parsed = read_rows(data.as_slice()).unwrap();

        assert_eq!(parsed, rows);
    }

    #[tokio::test]
    async fn test_write_report_truncates_existing_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("serp_results.csv");
        std::fs::write(&path, "stale content that is much longer than the new report\n".repeat(50))
            .unwrap();

        write_report(&path, &sample_rows()[..1]).await.unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(!written.contains("stale"));
        // the first sample row has a quoted multi-line snippet
        let rows = read_rows(std::fs::File::open(&path).unwrap()).unwrap();
        assert_eq!(rows, sample_rows()[..1].to_vec());
    }

    #[tokio::test]
    async fn test_write_report_into_missing_directory_fails() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("no-such-dir").join("out.csv");

        let result = write_report(&path, &sample_rows()).await;

        assert!(matches!(result, Err(AuditError::Report { .. })));
    }
}
