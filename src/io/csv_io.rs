use std::io::Read;
use std::path::Path;

use crate::error::AdvisorError;
use crate::models::{BatchResult, FieldPlan};

fn plan_reader<R: Read>(rdr: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(rdr)
}

fn parse_plan_records<R: Read>(rdr: &mut csv::Reader<R>) -> Result<Vec<FieldPlan>, AdvisorError> {
    let mut plans = Vec::new();
    for result in rdr.deserialize() {
        let plan: FieldPlan = result?;
        plans.push(plan);
    }
    Ok(plans)
}

/// Read field plans from a CSV file with a header row.
pub fn read_plans_csv(path: impl AsRef<Path>) -> Result<Vec<FieldPlan>, AdvisorError> {
    let file = std::fs::File::open(path.as_ref())?;
    parse_plan_records(&mut plan_reader(file))
}

/// Read field plans from CSV bytes.
pub fn read_plans_csv_from_bytes(data: &[u8]) -> Result<Vec<FieldPlan>, AdvisorError> {
    parse_plan_records(&mut plan_reader(data))
}

/// Write batch results as CSV, one row per field.
pub fn write_results_csv(
    results: &[BatchResult],
    path: impl AsRef<Path>,
) -> Result<(), AdvisorError> {
    let mut wtr = csv::Writer::from_path(path.as_ref())?;
    for result in results {
        wtr.serialize(result)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Render batch results as CSV text.
pub fn results_to_csv_string(results: &[BatchResult]) -> Result<String, AdvisorError> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    for result in results {
        wtr.serialize(result)?;
    }
    let bytes = wtr
        .into_inner()
        .map_err(|e| AdvisorError::Io(e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| AdvisorError::ParseError(format!("Invalid UTF-8: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
field_id,crop,variety,area_hectares,soil_type,region,ph,nitrogen,phosphorus,potassium
F1, rice ,IR36,1.0,alluvial,Punjab,6.5,340,18,210
F2,wheat,HD2967,2.5,,Kerala,,,,
";

    #[test]
    fn test_read_plans_with_blank_soil_columns() {
        let plans = read_plans_csv_from_bytes(SAMPLE.as_bytes()).unwrap();
        assert_eq!(plans.len(), 2);
        assert_eq!(plans[0].crop, "rice");
        assert_eq!(plans[0].ph, Some(6.5));
        assert_eq!(plans[1].soil_type, None);
        assert_eq!(plans[1].nitrogen, None);
        assert_eq!(plans[1].area_hectares, 2.5);
    }

    #[test]
    fn test_read_plans_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plans.csv");
        std::fs::write(&path, SAMPLE).unwrap();
        let plans = read_plans_csv(&path).unwrap();
        assert_eq!(plans[1].field_id, "F2");
    }

    #[test]
    fn test_bad_number_is_csv_error() {
        let data = "field_id,crop,variety,area_hectares,region\nF1,rice,IR36,lots,Punjab\n";
        let err = read_plans_csv_from_bytes(data.as_bytes()).unwrap_err();
        assert!(matches!(err, AdvisorError::Csv(_)));
    }

    #[test]
    fn test_write_results() {
        let plans = read_plans_csv_from_bytes(SAMPLE.as_bytes()).unwrap();
        let results = vec![
            BatchResult::failure(&plans[0], "Invalid area"),
            BatchResult::failure(&plans[1], "Invalid area"),
        ];
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.csv");
        write_results_csv(&results, &path).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("field_id,crop,variety,expected_yield"));
        assert_eq!(content.lines().count(), 3);
        assert_eq!(content, results_to_csv_string(&results).unwrap());
    }
}
