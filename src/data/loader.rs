use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use arrow::array::{Array, Float32Array, Float64Array, Int32Array, Int64Array};
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;
use thiserror::Error;

use super::model::LossTable;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Errors attributable to the shape of the input rather than I/O.
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),
    #[error("expected a top-level JSON object mapping series names to arrays")]
    NotAMapping,
}

/// Load a loss table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.json`    – `{ "train": [0.9, 0.5, ...], "val": [1.0, 0.7, ...] }`
/// * `.csv`     – header row of series names, one numeric column per series
/// * `.parquet` – one numeric column per series
pub fn load_table(path: &Path) -> Result<LossTable> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "json" => load_json(path),
        "csv" => load_csv(path),
        "parquet" | "pq" => load_parquet(path),
        other => Err(FormatError::UnsupportedExtension(other.to_string()).into()),
    }
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (columns-oriented, the default `df.to_json()`):
///
/// ```json
/// {
///   "train": [0.92, 0.55, 0.31],
///   "val":   [1.05, 0.74, 0.60]
/// }
/// ```
///
/// `serde_json` iterates object keys alphabetically, so series order in the
/// table is alphabetical regardless of file order.
fn load_json(path: &Path) -> Result<LossTable> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let map = root.as_object().ok_or(FormatError::NotAMapping)?;

    let mut columns = Vec::with_capacity(map.len());
    for (name, val) in map {
        let arr = val
            .as_array()
            .with_context(|| format!("series '{name}' is not an array"))?;

        let values = arr
            .iter()
            .enumerate()
            .map(|(i, v)| {
                v.as_f64()
                    .with_context(|| format!("series '{name}'[{i}]: not a number"))
            })
            .collect::<Result<Vec<f64>>>()?;

        columns.push((name.clone(), values));
    }

    Ok(LossTable::from_columns(columns))
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with one series name per column, one epoch per row.
/// Blank cells are skipped so a shorter series can trail off early:
///
/// ```text
/// train,val
/// 0.92,1.05
/// 0.55,0.74
/// 0.31,
/// ```
fn load_csv(path: &Path) -> Result<LossTable> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut columns: Vec<(String, Vec<f64>)> =
        headers.into_iter().map(|h| (h, Vec::new())).collect();

    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;

        for (col_idx, cell) in record.iter().enumerate() {
            let cell = cell.trim();
            if cell.is_empty() {
                continue;
            }
            let Some((name, values)) = columns.get_mut(col_idx) else {
                continue;
            };
            let v = cell.parse::<f64>().with_context(|| {
                format!("row {row_no}, column '{name}': '{cell}' is not a number")
            })?;
            values.push(v);
        }
    }

    Ok(LossTable::from_columns(columns))
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with one numeric column per series.
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`).  Float64, Float32 and integer columns
/// are accepted; anything else is an error.
fn load_parquet(path: &Path) -> Result<LossTable> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut columns: Vec<(String, Vec<f64>)> = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();

        if columns.is_empty() {
            columns = schema
                .fields()
                .iter()
                .map(|f| (f.name().clone(), Vec::new()))
                .collect();
        }

        for (col_idx, (name, values)) in columns.iter_mut().enumerate() {
            let col = batch.column(col_idx);
            append_numeric_column(col, values).with_context(|| format!("column '{name}'"))?;
        }
    }

    Ok(LossTable::from_columns(columns))
}

/// Append every non-null value of a numeric Arrow column as `f64`.
fn append_numeric_column(col: &Arc<dyn Array>, out: &mut Vec<f64>) -> Result<()> {
    match col.data_type() {
        DataType::Float64 => {
            let arr = col
                .as_any()
                .downcast_ref::<Float64Array>()
                .context("expected Float64Array")?;
            out.extend(arr.iter().flatten());
        }
        DataType::Float32 => {
            let arr = col
                .as_any()
                .downcast_ref::<Float32Array>()
                .context("expected Float32Array")?;
            out.extend(arr.iter().flatten().map(|v| v as f64));
        }
        DataType::Int64 => {
            let arr = col
                .as_any()
                .downcast_ref::<Int64Array>()
                .context("expected Int64Array")?;
            out.extend(arr.iter().flatten().map(|v| v as f64));
        }
        DataType::Int32 => {
            let arr = col
                .as_any()
                .downcast_ref::<Int32Array>()
                .context("expected Int32Array")?;
            out.extend(arr.iter().flatten().map(|v| v as f64));
        }
        other => bail!("column type {other:?} is not numeric"),
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    use arrow::datatypes::{Field, Schema};
    use arrow::record_batch::RecordBatch;
    use parquet::arrow::ArrowWriter;

    fn write_temp(name: &str, contents: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(name);
        std::fs::write(&path, contents).unwrap();
        (dir, path)
    }

    #[test]
    fn json_mapping_loads_every_series() {
        let (_dir, path) = write_temp("losses.json", r#"{"a": [1, 2, 3], "b": [3, 2, 1]}"#);
        let table = load_table(&path).unwrap();

        assert_eq!(table.len(), 2);
        let names: Vec<&str> = table.names().collect();
        assert_eq!(names, ["a", "b"]);
        assert_eq!(table.series[0].values, [1.0, 2.0, 3.0]);
        assert_eq!(table.series[1].values, [3.0, 2.0, 1.0]);
    }

    #[test]
    fn json_empty_series_loads_as_empty() {
        let (_dir, path) = write_temp("losses.json", r#"{"a": []}"#);
        let table = load_table(&path).unwrap();

        assert_eq!(table.len(), 1);
        assert!(table.series[0].values.is_empty());
        assert_eq!(table.max_len(), 0);
    }

    #[test]
    fn json_top_level_array_is_rejected() {
        let (_dir, path) = write_temp("losses.json", "[1, 2, 3]");
        let err = load_table(&path).unwrap_err();
        assert!(err.downcast_ref::<FormatError>().is_some());
    }

    #[test]
    fn json_non_numeric_value_is_rejected() {
        let (_dir, path) = write_temp("losses.json", r#"{"a": [1, "x"]}"#);
        assert!(load_table(&path).is_err());
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("does_not_exist.json");
        assert!(load_table(&path).is_err());
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let (_dir, path) = write_temp("losses.yaml", "a: [1]");
        let err = load_table(&path).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<FormatError>(),
            Some(FormatError::UnsupportedExtension(ext)) if ext == "yaml"
        ));
    }

    #[test]
    fn csv_columns_become_series() {
        let (_dir, path) = write_temp("losses.csv", "train,val\n0.92,1.05\n0.55,0.74\n0.31,\n");
        let table = load_table(&path).unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.series[0].name, "train");
        assert_eq!(table.series[0].values, [0.92, 0.55, 0.31]);
        assert_eq!(table.series[1].values, [1.05, 0.74]);
    }

    #[test]
    fn csv_non_numeric_cell_is_rejected() {
        let (_dir, path) = write_temp("losses.csv", "train\nabc\n");
        assert!(load_table(&path).is_err());
    }

    #[test]
    fn parquet_columns_become_series() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("losses.parquet");

        let schema = Arc::new(Schema::new(vec![
            Field::new("train", DataType::Float64, false),
            Field::new("val", DataType::Float64, false),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(Float64Array::from(vec![0.92, 0.55, 0.31])),
                Arc::new(Float64Array::from(vec![1.05, 0.74, 0.60])),
            ],
        )
        .unwrap();

        let file = std::fs::File::create(&path).unwrap();
        let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let table = load_table(&path).unwrap();
        assert_eq!(table.len(), 2);
        let names: Vec<&str> = table.names().collect();
        assert_eq!(names, ["train", "val"]);
        assert_eq!(table.series[0].values, [0.92, 0.55, 0.31]);
        assert_eq!(table.series[1].values, [1.05, 0.74, 0.60]);
    }
}
