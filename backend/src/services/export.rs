//! Delimited-text export of parish views.

use serde::{Deserialize, Serialize};

use crate::models::{ParishField, ParishRecord, Scope};

/// MIME type of the export artifact.
pub const CSV_CONTENT_TYPE: &str = "text/csv; charset=utf-8";

/// Errors raised while writing an export.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("CSV write failed: {0}")]
    Csv(#[from] csv::Error),
    #[error("CSV buffer flush failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("export needs at least one column")]
    NoColumns,
}

/// One output column: which record field to write and under which heading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportColumn {
    pub field: ParishField,
    pub label: String,
}

impl ExportColumn {
    pub fn new(field: ParishField, label: impl Into<String>) -> Self {
        Self {
            field,
            label: label.into(),
        }
    }
}

impl From<ParishField> for ExportColumn {
    fn from(field: ParishField) -> Self {
        Self::new(field, field.display_label())
    }
}

/// The nine columns of the explorer table, in display order.
pub fn explorer_columns() -> Vec<ExportColumn> {
    [
        ParishField::Parish,
        ParishField::Canton,
        ParishField::Province,
        ParishField::Infrastructure,
        ParishField::Wells,
        ParishField::ContaminatedSites,
        ParishField::HealthRate,
        ParishField::AfroPercentage,
        ParishField::Population,
    ]
    .into_iter()
    .map(ExportColumn::from)
    .collect()
}

/// File name of the download for a scope, e.g. `datos_Esmeraldas.csv`.
///
/// Path separators, quotes and control characters become `_` so the name is
/// always a valid `Content-Disposition` value.
pub fn export_file_name(scope: &Scope) -> String {
    let label: String = scope
        .label()
        .chars()
        .map(|c| match c {
            '/' | '\\' | '"' => '_',
            c if c.is_control() => '_',
            other => other,
        })
        .collect();
    format!("datos_{}.csv", label)
}

/// Serialize records as UTF-8 CSV: a header row of labels, then one row per record.
pub fn to_delimited_text(
    dataset: &[ParishRecord],
    columns: &[ExportColumn],
) -> Result<Vec<u8>, ExportError> {
    if columns.is_empty() {
        return Err(ExportError::NoColumns);
    }

    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(columns.iter().map(|c| c.label.as_str()))?;
    for record in dataset {
        writer.write_record(columns.iter().map(|c| c.field.render(record)))?;
    }

    writer
        .into_inner()
        .map_err(|e| ExportError::Io(e.into_error()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(parish: &str, infrastructure: u32, health_rate: f64) -> ParishRecord {
        ParishRecord {
            parish: parish.to_string(),
            canton: "Canton".to_string(),
            province: "Orellana".to_string(),
            infrastructure,
            health_rate,
            ..Default::default()
        }
    }

    #[test]
    fn test_two_records_three_columns() {
        let data = vec![record("Dayuma", 12, 2.5), record("Taracoa", 0, 7.0)];
        let columns = vec![
            ExportColumn::new(ParishField::HealthRate, "Salud"),
            ExportColumn::new(ParishField::Parish, "Parroquia"),
            ExportColumn::new(ParishField::Infrastructure, "Infra"),
        ];

        let bytes = to_delimited_text(&data, &columns).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "Salud,Parroquia,Infra");
        assert_eq!(lines[1], "2.5,Dayuma,12");
        assert_eq!(lines[2], "7.0,Taracoa,0");
    }

    #[test]
    fn test_empty_dataset_writes_header_only() {
        let bytes = to_delimited_text(&[], &explorer_columns()).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert_eq!(text.lines().count(), 1);
        assert!(text.starts_with("Parroquia,Cantón,Provincia,Infraestructura"));
    }

    #[test]
    fn test_fields_with_delimiters_are_quoted() {
        let data = vec![record("San Pedro, Centro", 1, 1.0)];
        let columns = vec![ExportColumn::from(ParishField::Parish)];

        let text = String::from_utf8(to_delimited_text(&data, &columns).unwrap()).unwrap();
        assert_eq!(text.lines().nth(1), Some("\"San Pedro, Centro\""));
    }

    #[test]
    fn test_no_columns_is_an_error() {
        assert!(matches!(
            to_delimited_text(&[], &[]),
            Err(ExportError::NoColumns)
        ));
    }

    #[test]
    fn test_export_file_name() {
        assert_eq!(export_file_name(&Scope::All), "datos_Todas.csv");
        assert_eq!(
            export_file_name(&Scope::Province("Esmeraldas".to_string())),
            "datos_Esmeraldas.csv"
        );
        assert_eq!(
            export_file_name(&Scope::Province("a/b".to_string())),
            "datos_a_b.csv"
        );
    }

    #[test]
    fn test_export_file_name_replaces_control_characters() {
        for label in ["a\u{1}b", "a\tb", "a\u{7f}b", "a\rb", "a\"b"] {
            assert_eq!(
                export_file_name(&Scope::Province(label.to_string())),
                "datos_a_b.csv",
                "{:?}",
                label
            );
        }
        assert_eq!(
            export_file_name(&Scope::Province("Santo Domingo de los Tsáchilas".to_string())),
            "datos_Santo Domingo de los Tsáchilas.csv"
        );
    }

    #[test]
    fn test_explorer_columns_order() {
        let labels: Vec<String> = explorer_columns().into_iter().map(|c| c.label).collect();
        assert_eq!(labels.len(), 9);
        assert_eq!(labels[0], "Parroquia");
        assert_eq!(labels[6], "Salud (10k hab)");
        assert_eq!(labels[8], "Población");
    }
}
