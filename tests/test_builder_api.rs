use macro_import::{
    text_to_entries, text_to_recipe, FoodEntry, ImportError, ImportResult, MacroImporter,
    OutputFormat,
};
use std::io::Write;

const LUNCH: &str = "\
Food Item Calories Protein (g) Fat (g) Carbs (g) Fiber (g)
2x Eggs (Spray Oil) 144 12.6 9.5 0.8 0.0
Kimchi (50g) 15 1.1 0.2 2.4 1.2
Rice (150g) 195 4.0 0.4 43.0 0.6
TOTAL 354 17.7 10.1 46.2 1.8
";

#[test]
fn test_builder_entries_with_totals() {
    let result = MacroImporter::builder().text(LUNCH).build().unwrap();

    match result {
        ImportResult::Entries { entries, totals } => {
            assert_eq!(entries.len(), 3);
            assert_eq!(totals.calories, 354.0);
            assert!((totals.carbs - 46.2).abs() < 1e-9);
        }
        other => panic!("Expected entries, got {:?}", other),
    }
}

#[test]
fn test_builder_requires_source() {
    let result = MacroImporter::builder().build();
    assert!(matches!(result, Err(ImportError::BuilderError(_))));
}

#[test]
fn test_builder_blank_text() {
    let result = MacroImporter::builder().text("  \n  ").build();
    assert!(matches!(result, Err(ImportError::EmptyInput)));
}

/// Zero parsed rows is the caller-visible failure signal
#[test]
fn test_builder_nothing_parsed() {
    let result = MacroImporter::builder()
        .text("Food Item Calories Protein Fat Carbs Fiber\nDAILY TOTAL 1 2 3 4 5")
        .build();
    assert!(matches!(result, Err(ImportError::NoEntries)));
}

#[test]
fn test_builder_strict_reports_line() {
    let err = MacroImporter::builder()
        .text("Kimchi (50g) 15 1.1 0.2 2.4 1.2\nRice 195 4.0 0.4 lots 0.6")
        .strict()
        .build()
        .unwrap_err();

    assert_eq!(err.to_string(), "Line 2: 'lots' is not a number");
}

#[test]
fn test_builder_permissive_skips_same_line() {
    let result = MacroImporter::builder()
        .text("Kimchi (50g) 15 1.1 0.2 2.4 1.2\nRice 195 4.0 0.4 lots 0.6")
        .build()
        .unwrap();
    match result {
        ImportResult::Entries { entries, .. } => assert_eq!(entries.len(), 1),
        other => panic!("Expected entries, got {:?}", other),
    }
}

#[test]
fn test_builder_custom_skip_keywords() {
    let result = MacroImporter::builder()
        .text("Total Greek Yogurt 95 4.0 9.0 3.8 0.0")
        .skip_keywords(["food item", "daily total"])
        .build()
        .unwrap();
    match result {
        ImportResult::Entries { entries, .. } => {
            assert_eq!(entries[0].food_name, "Total Greek Yogurt")
        }
        other => panic!("Expected entries, got {:?}", other),
    }
}

#[test]
fn test_builder_recipe() {
    let result = MacroImporter::builder()
        .text(LUNCH)
        .recipe("Egg Fried Rice")
        .build()
        .unwrap();

    match result {
        ImportResult::Recipe(recipe) => {
            assert_eq!(recipe.name, "Egg Fried Rice");
            assert_eq!(recipe.ingredients.len(), 3);
            assert_eq!(recipe.totals.calories, 354.0);
        }
        other => panic!("Expected recipe, got {:?}", other),
    }
}

#[test]
fn test_builder_recipe_portion_log_entry() {
    let result = MacroImporter::builder()
        .text(LUNCH)
        .recipe("Egg Fried Rice")
        .portion(1.5)
        .build()
        .unwrap();

    match result {
        ImportResult::LogEntry(entry) => {
            assert_eq!(entry.food_name, "Recipe: Egg Fried Rice (1.5x portion)");
            assert_eq!(entry.calories, 531.0);
        }
        other => panic!("Expected log entry, got {:?}", other),
    }
}

#[test]
fn test_builder_portion_without_recipe() {
    let result = MacroImporter::builder().text(LUNCH).portion(2.0).build();
    assert!(matches!(result, Err(ImportError::BuilderError(_))));
}

#[test]
fn test_builder_recipe_with_render_format() {
    let result = MacroImporter::builder()
        .text(LUNCH)
        .recipe("Egg Fried Rice")
        .format(OutputFormat::Json)
        .build();
    assert!(matches!(result, Err(ImportError::BuilderError(_))));
}

#[test]
fn test_builder_invalid_portion() {
    let result = MacroImporter::builder()
        .text(LUNCH)
        .recipe("Egg Fried Rice")
        .portion(-1.0)
        .build();
    assert!(matches!(result, Err(ImportError::InvalidPortion(_))));
}

#[test]
fn test_builder_json_output() {
    let result = MacroImporter::builder()
        .text(LUNCH)
        .format(OutputFormat::Json)
        .build()
        .unwrap();

    match result {
        ImportResult::Rendered(json) => {
            let entries: Vec<FoodEntry> = serde_json::from_str(&json).unwrap();
            assert_eq!(entries.len(), 3);
            assert_eq!(entries[1].food_name, "Kimchi (50g)");
        }
        other => panic!("Expected rendered output, got {:?}", other),
    }
}

#[test]
fn test_builder_csv_output() {
    let result = MacroImporter::builder()
        .text(LUNCH)
        .format(OutputFormat::Csv)
        .build()
        .unwrap();

    match result {
        ImportResult::Rendered(csv) => {
            assert!(csv.starts_with("food_name,calories,protein,fat,carbs,fiber"));
            assert_eq!(csv.lines().count(), 4);
        }
        other => panic!("Expected rendered output, got {:?}", other),
    }
}

#[test]
fn test_builder_reads_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(LUNCH.as_bytes()).unwrap();

    let result = MacroImporter::builder().file(file.path()).build().unwrap();
    match result {
        ImportResult::Entries { entries, .. } => assert_eq!(entries.len(), 3),
        other => panic!("Expected entries, got {:?}", other),
    }
}

#[test]
fn test_builder_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let result = MacroImporter::builder()
        .file(dir.path().join("missing.txt"))
        .build();
    assert!(matches!(result, Err(ImportError::Io(_))));
}

#[test]
fn test_convenience_text_to_entries() {
    let entries = text_to_entries(LUNCH).unwrap();
    assert_eq!(entries.len(), 3);

    assert!(matches!(text_to_entries(""), Err(ImportError::EmptyInput)));
}

#[test]
fn test_convenience_text_to_recipe() {
    let recipe = text_to_recipe(LUNCH, "Lunch Box").unwrap();
    assert_eq!(recipe.name, "Lunch Box");

    let json = recipe.ingredients_json().unwrap();
    let back: Vec<FoodEntry> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, recipe.ingredients);
}
