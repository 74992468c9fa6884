pub mod csv;
pub mod sheet;
pub mod template;

pub use kosha_core::{DraftExpense, ImportReport, SkipReason, SkippedRow};

use std::path::Path;

use chrono::NaiveDate;
use thiserror::Error;

use kosha_core::Classifier;
use kosha_extract::PdfTextSource;

/// Parser selected for a file, by trailing extension only. There is no
/// content sniffing and no fallback between formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Csv,
    Spreadsheet,
    Document,
}

impl SourceFormat {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "csv" => Some(SourceFormat::Csv),
            "xlsx" | "xls" => Some(SourceFormat::Spreadsheet),
            "pdf" => Some(SourceFormat::Document),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }
}

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Unsupported file format '{0}'. Please use CSV, Excel, or PDF")]
    UnsupportedFormat(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Csv(#[from] csv::CsvImportError),
    #[error(transparent)]
    Sheet(#[from] sheet::SheetError),
    #[error(transparent)]
    Document(#[from] kosha_extract::ScanError),
}

/// Context threaded into every parser: the import-day date used as the
/// fallback for unparseable dates, and the category classifier. Building
/// it once at the call site keeps the parsers free of clocks and other
/// ambient state.
#[derive(Debug, Clone)]
pub struct ImportContext {
    pub today: NaiveDate,
    pub classifier: Classifier,
}

impl ImportContext {
    pub fn new(today: NaiveDate) -> Self {
        Self { today, classifier: Classifier::default() }
    }

    pub fn with_classifier(today: NaiveDate, classifier: Classifier) -> Self {
        Self { today, classifier }
    }
}

/// Parse an already-buffered file. `file_name` is used only to pick the
/// parser by extension.
pub fn import_bytes(
    file_name: &str,
    bytes: &[u8],
    ctx: &ImportContext,
) -> Result<ImportReport, ImportError> {
    let path = Path::new(file_name);
    let format = SourceFormat::from_path(path).ok_or_else(|| {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_string();
        ImportError::UnsupportedFormat(ext)
    })?;

    tracing::info!(file_name, ?format, "importing file");

    let report = match format {
        SourceFormat::Csv => {
            let text = String::from_utf8_lossy(bytes);
            csv::parse_csv(&text, ctx.today, &ctx.classifier)?
        }
        SourceFormat::Spreadsheet => sheet::parse_bytes(bytes, ctx.today, &ctx.classifier)?,
        SourceFormat::Document => {
            kosha_extract::scan_document(&PdfTextSource, bytes, ctx.today, &ctx.classifier)?
        }
    };

    tracing::info!(
        records = report.records.len(),
        skipped = report.skipped.len(),
        "import complete"
    );
    Ok(report)
}

/// Read and parse a file. The read is the only asynchronous step; parsing
/// runs to completion on the buffered bytes.
pub async fn import_path(path: &Path, ctx: &ImportContext) -> Result<ImportReport, ImportError> {
    let bytes = tokio::fs::read(path).await?;
    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
    import_bytes(name, &bytes, ctx)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> ImportContext {
        ImportContext::new(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap())
    }

    #[test]
    fn format_from_extension() {
        assert_eq!(SourceFormat::from_extension("csv"), Some(SourceFormat::Csv));
        assert_eq!(SourceFormat::from_extension("XLSX"), Some(SourceFormat::Spreadsheet));
        assert_eq!(SourceFormat::from_extension("xls"), Some(SourceFormat::Spreadsheet));
        assert_eq!(SourceFormat::from_extension("pdf"), Some(SourceFormat::Document));
        assert_eq!(SourceFormat::from_extension("txt"), None);
    }

    #[test]
    fn format_from_path_uses_trailing_extension() {
        assert_eq!(
            SourceFormat::from_path(Path::new("statement.2024.CSV")),
            Some(SourceFormat::Csv)
        );
        assert_eq!(SourceFormat::from_path(Path::new("no_extension")), None);
    }

    #[test]
    fn unsupported_extension_is_rejected() {
        let err = import_bytes("expenses.txt", b"whatever", &ctx()).unwrap_err();
        assert!(matches!(err, ImportError::UnsupportedFormat(ext) if ext == "txt"));
    }

    #[test]
    fn csv_routing_parses_records() {
        let data = b"Amount,Category,Date,Description\n450,Food,2024-01-12,Swiggy\n";
        let report = import_bytes("expenses.csv", data, &ctx()).unwrap();
        assert_eq!(report.records.len(), 1);
    }

    #[test]
    fn garbage_pdf_is_a_document_error() {
        let err = import_bytes("statement.pdf", b"not a pdf", &ctx()).unwrap_err();
        assert!(matches!(err, ImportError::Document(_)));
    }

    #[tokio::test]
    async fn import_path_reads_and_parses() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("expenses.csv");
        tokio::fs::write(&path, template::template_csv()).await.unwrap();

        let report = import_path(&path, &ctx()).await.unwrap();
        assert_eq!(report.records.len(), 5);
    }

    #[tokio::test]
    async fn import_path_missing_file_is_io_error() {
        let err = import_path(Path::new("/nonexistent/expenses.csv"), &ctx())
            .await
            .unwrap_err();
        assert!(matches!(err, ImportError::Io(_)));
    }
}
