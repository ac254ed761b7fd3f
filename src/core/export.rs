use crate::domain::model::HistoryEntry;
use crate::domain::ports::Storage;
use crate::utils::error::{AppError, Result};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::str::FromStr;
use zip::write::{FileOptions, ZipWriter};

pub const ZIP_FILE_NAME: &str = "history_export.zip";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Csv,
    Tsv,
    Json,
}

impl ExportFormat {
    pub fn file_name(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "history.csv",
            ExportFormat::Tsv => "history.tsv",
            ExportFormat::Json => "history.json",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "tsv" => Ok(ExportFormat::Tsv),
            "json" => Ok(ExportFormat::Json),
            other => Err(AppError::InvalidConfigValueError {
                field: "export.formats".to_string(),
                value: other.to_string(),
                reason: "Unsupported format. Valid formats: csv, tsv, json".to_string(),
            }),
        }
    }
}

/// Writes a session's history through a `Storage` backend.
pub struct HistoryExporter<S: Storage> {
    storage: S,
    formats: Vec<ExportFormat>,
    compress: bool,
}

impl<S: Storage> HistoryExporter<S> {
    pub fn new(storage: S, formats: Vec<ExportFormat>, compress: bool) -> Self {
        Self {
            storage,
            formats,
            compress,
        }
    }

    /// Returns the names of the files written; nothing is written for an empty history.
    pub fn export(&self, history: &[HistoryEntry]) -> Result<Vec<String>> {
        if history.is_empty() {
            tracing::info!("History is empty, nothing to export");
            return Ok(Vec::new());
        }

        let mut rendered = Vec::with_capacity(self.formats.len());
        for format in &self.formats {
            rendered.push((format.file_name(), render(*format, history)?));
        }

        if self.compress {
            let zip_data = bundle(&rendered)?;
            tracing::debug!("Writing ZIP file ({} bytes) to storage", zip_data.len());
            self.storage.write_file(ZIP_FILE_NAME, &zip_data)?;
            tracing::info!("Exported {} history entries to {}", history.len(), ZIP_FILE_NAME);
            return Ok(vec![ZIP_FILE_NAME.to_string()]);
        }

        let mut written = Vec::with_capacity(rendered.len());
        for (name, data) in rendered {
            self.storage.write_file(name, &data)?;
            written.push(name.to_string());
        }
        tracing::info!("Exported {} history entries to {:?}", history.len(), written);
        Ok(written)
    }
}

fn render(format: ExportFormat, history: &[HistoryEntry]) -> Result<Vec<u8>> {
    match format {
        ExportFormat::Csv => write_delimited(csv::WriterBuilder::new(), history),
        ExportFormat::Tsv => {
            let mut builder = csv::WriterBuilder::new();
            builder.delimiter(b'\t');
            write_delimited(builder, history)
        }
        ExportFormat::Json => Ok(serde_json::to_vec_pretty(history)?),
    }
}

fn write_delimited(builder: csv::WriterBuilder, history: &[HistoryEntry]) -> Result<Vec<u8>> {
    let mut writer = builder.from_writer(Vec::new());
    for entry in history {
        writer.serialize(entry)?;
    }
    writer
        .into_inner()
        .map_err(|e| AppError::IoError(std::io::Error::other(e.to_string())))
}

fn bundle(files: &[(&str, Vec<u8>)]) -> Result<Vec<u8>> {
    let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));

    for (name, data) in files {
        zip.start_file::<_, ()>(*name, FileOptions::default())?;
        zip.write_all(data)?;
    }

    // 完成並取回底層 Vec<u8>
    let cursor = zip.finish()?;
    Ok(cursor.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct MockStorage {
        files: Rc<RefCell<HashMap<String, Vec<u8>>>>,
    }

    impl MockStorage {
        fn get_file(&self, path: &str) -> Option<Vec<u8>> {
            self.files.borrow().get(path).cloned()
        }
    }

    impl Storage for MockStorage {
        fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            self.files.borrow_mut().insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    fn sample_history() -> Vec<HistoryEntry> {
        vec![
            HistoryEntry {
                domain: "Length".to_string(),
                input_value: 1000.0,
                source_unit: "m".to_string(),
                target_unit: "km".to_string(),
                result_text: "1.000000 km".to_string(),
                converted_at: Utc.with_ymd_and_hms(2026, 10, 17, 9, 30, 0).unwrap(),
            },
            HistoryEntry {
                domain: "Temperature".to_string(),
                input_value: 100.0,
                source_unit: "C".to_string(),
                target_unit: "F".to_string(),
                result_text: "212.0000 F".to_string(),
                converted_at: Utc.with_ymd_and_hms(2026, 10, 17, 9, 31, 0).unwrap(),
            },
        ]
    }

    #[test]
    fn test_export_plain_files() {
        let storage = MockStorage::default();
        let exporter = HistoryExporter::new(
            storage.clone(),
            vec![ExportFormat::Csv, ExportFormat::Tsv, ExportFormat::Json],
            false,
        );

        let written = exporter.export(&sample_history()).unwrap();
        assert_eq!(written, vec!["history.csv", "history.tsv", "history.json"]);

        let csv = String::from_utf8(storage.get_file("history.csv").unwrap()).unwrap();
        let mut lines = csv.lines();
        assert_eq!(
            lines.next().unwrap(),
            "domain,input_value,source_unit,target_unit,result_text,converted_at"
        );
        assert!(lines.next().unwrap().starts_with("Length,1000.0,m,km,1.000000 km,2026-10-17T09:30:00"));

        let tsv = String::from_utf8(storage.get_file("history.tsv").unwrap()).unwrap();
        assert!(tsv.lines().nth(2).unwrap().starts_with("Temperature\t100.0\tC\tF\t212.0000 F\t"));

        let json: Vec<HistoryEntry> =
            serde_json::from_slice(&storage.get_file("history.json").unwrap()).unwrap();
        assert_eq!(json, sample_history());
    }

    #[test]
    fn test_export_compressed_bundle() {
        let storage = MockStorage::default();
        let exporter = HistoryExporter::new(storage.clone(), vec![ExportFormat::Csv, ExportFormat::Json], true);

        let written = exporter.export(&sample_history()).unwrap();
        assert_eq!(written, vec![ZIP_FILE_NAME]);

        let zip_bytes = storage.get_file(ZIP_FILE_NAME).unwrap();
        let mut archive = zip::ZipArchive::new(std::io::Cursor::new(zip_bytes)).unwrap();
        let mut names: Vec<String> = (0..archive.len())
            .map(|i| archive.by_index(i).unwrap().name().to_string())
            .collect();
        names.sort();
        assert_eq!(names, vec!["history.csv", "history.json"]);
    }

    #[test]
    fn test_empty_history_writes_nothing() {
        let storage = MockStorage::default();
        let exporter = HistoryExporter::new(storage.clone(), vec![ExportFormat::Csv], true);

        assert!(exporter.export(&[]).unwrap().is_empty());
        assert!(storage.files.borrow().is_empty());
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!("CSV".parse::<ExportFormat>().unwrap(), ExportFormat::Csv);
        assert_eq!("json".parse::<ExportFormat>().unwrap(), ExportFormat::Json);
        assert!("xml".parse::<ExportFormat>().is_err());
    }
}
