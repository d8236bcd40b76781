use std::path::Path;

use crate::error::AdvisorError;
use crate::models::{BatchResult, FieldPlan};

/// Read field plans from a JSON array file.
pub fn read_plans_json(path: impl AsRef<Path>) -> Result<Vec<FieldPlan>, AdvisorError> {
    let content = std::fs::read_to_string(path.as_ref())?;
    Ok(serde_json::from_str(&content)?)
}

/// Read field plans from JSON bytes.
pub fn read_plans_json_from_bytes(data: &[u8]) -> Result<Vec<FieldPlan>, AdvisorError> {
    let content = std::str::from_utf8(data)
        .map_err(|e| AdvisorError::ParseError(format!("Invalid UTF-8: {e}")))?;
    Ok(serde_json::from_str(content)?)
}

/// Write batch results as a JSON array.
pub fn write_results_json(
    results: &[BatchResult],
    path: impl AsRef<Path>,
    pretty: bool,
) -> Result<(), AdvisorError> {
    let content = if pretty {
        serde_json::to_string_pretty(results)?
    } else {
        serde_json::to_string(results)?
    };
    std::fs::write(path.as_ref(), content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optional_soil_fields_may_be_omitted() {
        let data = br#"[
            {"field_id": "N-7", "crop": "maize", "variety": "DHM 117",
             "area_hectares": 3.0, "region": "Karnataka", "ph": 6.1}
        ]"#;
        let plans = read_plans_json_from_bytes(data).unwrap();
        assert_eq!(plans.len(), 1);
        assert_eq!(plans[0].ph, Some(6.1));
        assert_eq!(plans[0].soil_type, None);
        assert_eq!(plans[0].potassium, None);
    }

    #[test]
    fn test_invalid_utf8() {
        let err = read_plans_json_from_bytes(&[0xff, 0xfe]).unwrap_err();
        assert!(matches!(err, AdvisorError::ParseError(_)));
    }

    #[test]
    fn test_missing_required_field() {
        let err = read_plans_json_from_bytes(br#"[{"field_id": "X"}]"#).unwrap_err();
        assert!(matches!(err, AdvisorError::Json(_)));
    }

    #[test]
    fn test_write_and_read_back_results() {
        let plan: FieldPlan = serde_json::from_str(
            r#"{"field_id": "A", "crop": "rice", "area_hectares": 0.0, "region": "Punjab"}"#,
        )
        .unwrap();
        let results = vec![BatchResult::failure(&plan, "Invalid area")];
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        write_results_json(&results, &path, true).unwrap();
        let loaded: Vec<BatchResult> =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(loaded, results);
    }
}
