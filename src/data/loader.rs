use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{Array, AsArray, Float32Array, Float64Array, Int32Array, Int64Array, StringArray};
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use super::model::{
    LaunchRecord, LaunchTable, Outcome, COL_BOOSTER_CATEGORY, COL_BOOSTER_VERSION, COL_CLASS,
    COL_FLIGHT_NUMBER, COL_LAUNCH_SITE, COL_PAYLOAD_MASS,
};
use crate::error::{DataError, Result};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the launch table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row, one launch per line (the usual export)
/// * `.parquet` – same columns, written by Pandas / Polars / `generate_sample`
///
/// Required columns: `Launch Site`, `Payload Mass (kg)`,
/// `Booster Version Category`, `class`. `Flight Number` and
/// `Booster Version` are picked up when present; anything else is ignored.
pub fn load_file(path: &Path) -> Result<LaunchTable> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let table = match ext.as_str() {
        "csv" => load_csv(path)?,
        "parquet" | "pq" => load_parquet(path)?,
        other => return Err(DataError::UnsupportedFormat(other.to_string())),
    };
    log::info!("Loaded {} launch records from {}", table.len(), path.display());
    Ok(table)
}

fn open(path: &Path) -> Result<File> {
    File::open(path).map_err(|source| DataError::Unavailable {
        path: path.to_path_buf(),
        source,
    })
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<LaunchTable> {
    read_csv(open(path)?)
}

/// Column positions resolved from the header row.
struct CsvColumns {
    site: usize,
    payload: usize,
    category: usize,
    class: usize,
    flight_number: Option<usize>,
    booster_version: Option<usize>,
}

impl CsvColumns {
    fn resolve(headers: &csv::StringRecord) -> Result<Self> {
        let find = |name: &str| headers.iter().position(|h| h.trim() == name);
        let require = |name: &'static str| find(name).ok_or(DataError::MissingColumn(name));

        Ok(Self {
            site: require(COL_LAUNCH_SITE)?,
            payload: require(COL_PAYLOAD_MASS)?,
            category: require(COL_BOOSTER_CATEGORY)?,
            class: require(COL_CLASS)?,
            flight_number: find(COL_FLIGHT_NUMBER),
            booster_version: find(COL_BOOSTER_VERSION),
        })
    }
}

/// Parse launch records from any CSV source with a header row.
pub fn read_csv<R: Read>(source: R) -> Result<LaunchTable> {
    let mut reader = csv::Reader::from_reader(source);
    let cols = CsvColumns::resolve(reader.headers()?)?;

    let mut records = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result?;
        let cell = |idx: usize| record.get(idx).unwrap_or("").trim();

        let flight_number = match cols.flight_number.map(cell) {
            None | Some("") => None,
            Some(s) => Some(parse_flight_number(s, row_no)?),
        };
        let booster_version = cols
            .booster_version
            .map(cell)
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        records.push(LaunchRecord {
            flight_number,
            launch_site: cell(cols.site).to_string(),
            class: parse_outcome(cell(cols.class), row_no)?,
            payload_mass_kg: parse_payload(cell(cols.payload), row_no)?,
            booster_version,
            booster_version_category: cell(cols.category).to_string(),
        });
    }

    Ok(LaunchTable::from_records(records))
}

fn invalid(row: usize, column: &'static str, value: impl ToString) -> DataError {
    DataError::InvalidValue {
        row,
        column,
        value: value.to_string(),
    }
}

fn parse_payload(s: &str, row: usize) -> Result<f64> {
    match s.parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => Ok(v),
        _ => Err(invalid(row, COL_PAYLOAD_MASS, s)),
    }
}

/// Accepts `0`/`1` and the `0.0`/`1.0` spelling some exports produce.
fn parse_outcome(s: &str, row: usize) -> Result<Outcome> {
    let v = s.parse::<f64>().map_err(|_| invalid(row, COL_CLASS, s))?;
    outcome_from_f64(v).ok_or_else(|| invalid(row, COL_CLASS, s))
}

fn outcome_from_f64(v: f64) -> Option<Outcome> {
    if v.fract() != 0.0 || !(0.0..=1.0).contains(&v) {
        return None;
    }
    Outcome::try_from(v as u8).ok()
}

/// Flight numbers stored as floats must still be whole and non-negative.
fn flight_number_from_f64(v: f64) -> Option<u32> {
    (v.is_finite() && v.fract() == 0.0 && (0.0..=u32::MAX as f64).contains(&v)).then_some(v as u32)
}

fn parse_flight_number(s: &str, row: usize) -> Result<u32> {
    s.parse::<u32>().map_err(|_| invalid(row, COL_FLIGHT_NUMBER, s))
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with the same column names as the CSV export.
///
/// Numeric columns may be stored as Int32/Int64/Float32/Float64; text
/// columns as Utf8 or LargeUtf8.
fn load_parquet(path: &Path) -> Result<LaunchTable> {
    let file = open(path)?;
    let reader = ParquetRecordBatchReaderBuilder::try_new(file)?.build()?;

    let mut records = Vec::new();
    for batch_result in reader {
        let batch = batch_result?;
        append_batch(&batch, &mut records)?;
    }

    Ok(LaunchTable::from_records(records))
}

fn append_batch(batch: &RecordBatch, out: &mut Vec<LaunchRecord>) -> Result<()> {
    let schema = batch.schema();
    let column = |name: &str| schema.index_of(name).ok().map(|i| batch.column(i));
    let require = |name: &'static str| column(name).ok_or(DataError::MissingColumn(name));

    let site = require(COL_LAUNCH_SITE)?;
    let payload = require(COL_PAYLOAD_MASS)?;
    let category = require(COL_BOOSTER_CATEGORY)?;
    let class = require(COL_CLASS)?;
    let flight_col = column(COL_FLIGHT_NUMBER);
    let booster_version = column(COL_BOOSTER_VERSION);

    // Row numbers continue across batches.
    let offset = out.len();
    for row in 0..batch.num_rows() {
        let row_no = offset + row;

        let mass = extract_f64(payload, row)
            .filter(|v| v.is_finite() && *v >= 0.0)
            .ok_or_else(|| invalid(row_no, COL_PAYLOAD_MASS, describe_cell(payload, row)))?;
        let outcome = extract_f64(class, row)
            .and_then(outcome_from_f64)
            .ok_or_else(|| invalid(row_no, COL_CLASS, describe_cell(class, row)))?;
        let site_label = extract_string(site, row)
            .ok_or_else(|| invalid(row_no, COL_LAUNCH_SITE, describe_cell(site, row)))?;
        let category_label = extract_string(category, row)
            .ok_or_else(|| invalid(row_no, COL_BOOSTER_CATEGORY, describe_cell(category, row)))?;

        let flight_number = match flight_col {
            Some(c) if !c.is_null(row) => Some(
                extract_f64(c, row)
                    .and_then(flight_number_from_f64)
                    .ok_or_else(|| invalid(row_no, COL_FLIGHT_NUMBER, describe_cell(c, row)))?,
            ),
            _ => None,
        };

        out.push(LaunchRecord {
            flight_number,
            launch_site: site_label,
            class: outcome,
            payload_mass_kg: mass,
            booster_version: booster_version.and_then(|c| extract_string(c, row)),
            booster_version_category: category_label,
        });
    }
    Ok(())
}

// -- Arrow helpers --

/// Read a numeric cell as `f64`; `None` for nulls or non-numeric columns.
fn extract_f64(col: &Arc<dyn Array>, row: usize) -> Option<f64> {
    if col.is_null(row) {
        return None;
    }
    match col.data_type() {
        DataType::Float64 => col.as_any().downcast_ref::<Float64Array>().map(|a| a.value(row)),
        DataType::Float32 => col
            .as_any()
            .downcast_ref::<Float32Array>()
            .map(|a| a.value(row) as f64),
        DataType::Int64 => col
            .as_any()
            .downcast_ref::<Int64Array>()
            .map(|a| a.value(row) as f64),
        DataType::Int32 => col
            .as_any()
            .downcast_ref::<Int32Array>()
            .map(|a| a.value(row) as f64),
        _ => None,
    }
}

/// Read a text cell; `None` for nulls or non-text columns.
fn extract_string(col: &Arc<dyn Array>, row: usize) -> Option<String> {
    if col.is_null(row) {
        return None;
    }
    match col.data_type() {
        DataType::Utf8 => col
            .as_any()
            .downcast_ref::<StringArray>()
            .map(|s| s.value(row).to_string()),
        DataType::LargeUtf8 => Some(col.as_string::<i64>().value(row).to_string()),
        _ => None,
    }
}

fn describe_cell(col: &Arc<dyn Array>, row: usize) -> String {
    if col.is_null(row) {
        return "<null>".to_string();
    }
    match extract_f64(col, row) {
        Some(v) => v.to_string(),
        None => format!("<{:?}>", col.data_type()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCENARIO_CSV: &str = "\
,Flight Number,Launch Site,Mission Outcome,class,Payload Mass (kg),Booster Version,Booster Version Category
0,1,SiteA,True,1,3000.0,F9 v1.0  B0003,v1.0
1,2,SiteA,True,0,7000.0,F9 v1.0  B0004,v1.0
2,3,SiteB,True,1,3000.0,F9 FT B1021,FT
3,4,SiteB,True,1,9000.0,F9 FT B1022,FT
";

    #[test]
    fn reads_required_and_optional_columns() {
        let table = read_csv(SCENARIO_CSV.as_bytes()).unwrap();
        assert_eq!(table.len(), 4);

        let first = &table.records[0];
        assert_eq!(first.launch_site, "SiteA");
        assert_eq!(first.payload_mass_kg, 3000.0);
        assert_eq!(first.class, Outcome::Success);
        assert_eq!(first.booster_version_category, "v1.0");
        assert_eq!(first.flight_number, Some(1));
        assert_eq!(first.booster_version.as_deref(), Some("F9 v1.0  B0003"));

        assert_eq!(table.records[1].class, Outcome::Failure);
        assert_eq!(table.records[3].launch_site, "SiteB");
    }

    #[test]
    fn preserves_row_order_and_bounds() {
        let table = read_csv(SCENARIO_CSV.as_bytes()).unwrap();
        let masses: Vec<f64> = table.iter().map(|r| r.payload_mass_kg).collect();
        assert_eq!(masses, vec![3000.0, 7000.0, 3000.0, 9000.0]);

        let bounds = table.payload_bounds().unwrap();
        assert_eq!((bounds.min, bounds.max), (3000.0, 9000.0));
    }

    #[test]
    fn optional_columns_may_be_absent() {
        let csv = "Launch Site,Payload Mass (kg),Booster Version Category,class\nX,10,B5,1\n";
        let table = read_csv(csv.as_bytes()).unwrap();
        assert_eq!(table.records[0].flight_number, None);
        assert_eq!(table.records[0].booster_version, None);
    }

    #[test]
    fn missing_required_column_is_reported() {
        let csv = "Launch Site,Booster Version Category,class\nX,B5,1\n";
        match read_csv(csv.as_bytes()) {
            Err(DataError::MissingColumn(name)) => assert_eq!(name, COL_PAYLOAD_MASS),
            other => panic!("expected MissingColumn, got {other:?}"),
        }
    }

    #[test]
    fn class_outside_zero_one_is_rejected() {
        let csv = "Launch Site,Payload Mass (kg),Booster Version Category,class\nX,10,B5,2\n";
        match read_csv(csv.as_bytes()) {
            Err(DataError::InvalidValue { row, column, value }) => {
                assert_eq!(row, 0);
                assert_eq!(column, COL_CLASS);
                assert_eq!(value, "2");
            }
            other => panic!("expected InvalidValue, got {other:?}"),
        }
    }

    #[test]
    fn negative_payload_is_rejected() {
        let csv = "Launch Site,Payload Mass (kg),Booster Version Category,class\nX,-5,B5,1\n";
        assert!(matches!(
            read_csv(csv.as_bytes()),
            Err(DataError::InvalidValue { column: COL_PAYLOAD_MASS, .. })
        ));
    }

    #[test]
    fn float_spelled_class_is_accepted() {
        let csv = "Launch Site,Payload Mass (kg),Booster Version Category,class\nX,10,B5,1.0\n";
        let table = read_csv(csv.as_bytes()).unwrap();
        assert_eq!(table.records[0].class, Outcome::Success);
    }

    #[test]
    fn bundled_dataset_loads() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("data/spacex_launch_dash.csv");
        let table = load_file(&path).unwrap();
        assert_eq!(table.len(), 56);

        let bounds = table.payload_bounds().unwrap();
        assert_eq!((bounds.min, bounds.max), (0.0, 9600.0));

        let successes = table.iter().filter(|r| r.class == Outcome::Success).count();
        assert_eq!(successes, 24);
    }

    #[test]
    fn missing_file_is_unavailable() {
        let err = load_file(Path::new("definitely/not/here/launches.csv")).unwrap_err();
        assert!(matches!(err, DataError::Unavailable { .. }));
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let err = load_file(Path::new("launches.xlsx")).unwrap_err();
        assert!(matches!(err, DataError::UnsupportedFormat(ext) if ext == "xlsx"));
    }

    fn write_parquet(name: &str, batch: &RecordBatch) -> std::path::PathBuf {
        use parquet::arrow::ArrowWriter;

        let path = std::env::temp_dir().join(format!("spacex-dash-{}-{name}.parquet", std::process::id()));
        let file = File::create(&path).unwrap();
        let mut writer = ArrowWriter::try_new(file, batch.schema(), None).unwrap();
        writer.write(batch).unwrap();
        writer.close().unwrap();
        path
    }

    #[test]
    fn parquet_flight_number_must_be_whole() {
        use arrow::datatypes::{Field, Schema};

        let schema = Arc::new(Schema::new(vec![
            Field::new(COL_FLIGHT_NUMBER, DataType::Float64, true),
            Field::new(COL_LAUNCH_SITE, DataType::Utf8, false),
            Field::new(COL_PAYLOAD_MASS, DataType::Float64, false),
            Field::new(COL_BOOSTER_CATEGORY, DataType::Utf8, false),
            Field::new(COL_CLASS, DataType::Int64, false),
        ]));
        for bad in [-3.0, 2.5] {
            let batch = RecordBatch::try_new(
                schema.clone(),
                vec![
                    Arc::new(Float64Array::from(vec![Some(1.0), Some(bad)])),
                    Arc::new(StringArray::from(vec!["SiteA", "SiteB"])),
                    Arc::new(Float64Array::from(vec![3000.0, 9000.0])),
                    Arc::new(StringArray::from(vec!["v1.0", "FT"])),
                    Arc::new(Int64Array::from(vec![1, 0])),
                ],
            )
            .unwrap();
            let path = write_parquet("flight", &batch);
            let result = load_file(&path);
            std::fs::remove_file(&path).ok();

            match result {
                Err(DataError::InvalidValue { row, column, value }) => {
                    assert_eq!(row, 1);
                    assert_eq!(column, COL_FLIGHT_NUMBER);
                    assert_eq!(value, bad.to_string());
                }
                other => panic!("expected InvalidValue for {bad}, got {other:?}"),
            }
        }
    }

    #[test]
    fn parquet_null_flight_number_is_absent() {
        use arrow::datatypes::{Field, Schema};

        let schema = Arc::new(Schema::new(vec![
            Field::new(COL_FLIGHT_NUMBER, DataType::Int64, true),
            Field::new(COL_LAUNCH_SITE, DataType::Utf8, false),
            Field::new(COL_PAYLOAD_MASS, DataType::Float64, false),
            Field::new(COL_BOOSTER_CATEGORY, DataType::Utf8, false),
            Field::new(COL_CLASS, DataType::Int64, false),
        ]));
        let batch = RecordBatch::try_new(
            schema,
            vec![
                Arc::new(Int64Array::from(vec![Some(7), None])),
                Arc::new(StringArray::from(vec!["SiteA", "SiteB"])),
                Arc::new(Float64Array::from(vec![3000.0, 9000.0])),
                Arc::new(StringArray::from(vec!["v1.0", "FT"])),
                Arc::new(Int64Array::from(vec![1, 0])),
            ],
        )
        .unwrap();
        let path = write_parquet("nullflight", &batch);
        let table = load_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(table.records[0].flight_number, Some(7));
        assert_eq!(table.records[1].flight_number, None);
    }

    #[test]
    fn parquet_file_loads_like_csv() {
        use arrow::array::{Float64Array, Int64Array, StringArray};
        use arrow::datatypes::{Field, Schema};

        let schema = Arc::new(Schema::new(vec![
            Field::new(COL_LAUNCH_SITE, DataType::Utf8, false),
            Field::new(COL_PAYLOAD_MASS, DataType::Float64, false),
            Field::new(COL_BOOSTER_CATEGORY, DataType::Utf8, false),
            Field::new(COL_CLASS, DataType::Int64, false),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(StringArray::from(vec!["SiteA", "SiteB"])),
                Arc::new(Float64Array::from(vec![3000.0, 9000.0])),
                Arc::new(StringArray::from(vec!["v1.0", "FT"])),
                Arc::new(Int64Array::from(vec![1, 0])),
            ],
        )
        .unwrap();

        let path = write_parquet("roundtrip", &batch);

        let table = load_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(
            table.records,
            vec![
                LaunchRecord::new("SiteA", 3000.0, "v1.0", Outcome::Success),
                LaunchRecord::new("SiteB", 9000.0, "FT", Outcome::Failure),
            ]
        );
    }
}
