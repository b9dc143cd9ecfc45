use std::io;

use crate::model::FoodEntry;
use crate::ImportError;

/// Serialize entries as a JSON array of records.
pub fn to_json(entries: &[FoodEntry], pretty: bool) -> Result<String, ImportError> {
    let json = if pretty {
        serde_json::to_string_pretty(entries)?
    } else {
        serde_json::to_string(entries)?
    };
    Ok(json)
}

/// Serialize entries as CSV with a `food_name,calories,protein,fat,carbs,fiber` header.
pub fn to_csv(entries: &[FoodEntry]) -> Result<String, ImportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    if entries.is_empty() {
        writer.write_record(["food_name", "calories", "protein", "fat", "carbs", "fiber"])?;
    }
    for entry in entries {
        writer.serialize(entry)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ImportError::Io(e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| ImportError::Io(io::Error::new(io::ErrorKind::InvalidData, e)))
}

/// Render entries back into table rows, one per line. The output can be fed
/// straight back into the parser.
pub fn to_table_text(entries: &[FoodEntry]) -> String {
    entries
        .iter()
        .map(FoodEntry::to_table_line)
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_table;
    use pretty_assertions::assert_eq;

    fn sample() -> Vec<FoodEntry> {
        vec![
            FoodEntry::new("Kimchi (50g)", 15.0, 1.1, 0.2, 2.4, 1.2),
            FoodEntry::new("Half of \"Big Salad\"", 684.0, 51.9, 27.5, 63.0, 22.7),
        ]
    }

    #[test]
    fn test_json_round_trips_records() {
        let json = to_json(&sample(), false).unwrap();
        let back: Vec<FoodEntry> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, sample());
    }

    #[test]
    fn test_pretty_json_is_multiline() {
        let json = to_json(&sample(), true).unwrap();
        assert!(json.lines().count() > 2);
        assert!(json.contains("\"food_name\": \"Kimchi (50g)\""));
    }

    #[test]
    fn test_csv_has_header_and_quotes_names() {
        let csv = to_csv(&sample()).unwrap();
        let mut lines = csv.lines();
        assert_eq!(
            lines.next(),
            Some("food_name,calories,protein,fat,carbs,fiber")
        );
        assert!(lines.next().unwrap().starts_with("Kimchi (50g),15"));
        assert!(lines.next().unwrap().starts_with("\"Half of \"\"Big Salad\"\"\","));
    }

    #[test]
    fn test_csv_of_no_entries_is_header_only() {
        let csv = to_csv(&[]).unwrap();
        assert_eq!(csv.trim_end(), "food_name,calories,protein,fat,carbs,fiber");
    }

    #[test]
    fn test_table_text_reparses_to_same_entries() {
        let text = to_table_text(&sample());
        assert_eq!(parse_table(&text), sample());
    }
}
