//! Paste a table, preview it, then save it as a recipe and log a portion.

use macro_import::{calculate_totals, parse_table, Recipe};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let pasted = r#"
Food Item Calories Protein (g) Fat (g) Carbs (g) Fiber (g)
Pork & Shrimp Dumplings (4) 320 16.0 14.0 32.0 1.5
Kimchi (50g) 15 1.1 0.2 2.4 1.2
Honey (1 tsp) 21 0.0 0.0 6.0 0.0
TOTAL 356 17.1 14.2 40.4 2.7
"#;

    println!("=== Preview ===");
    let entries = parse_table(pasted);
    for entry in &entries {
        println!("{}", entry.to_table_line());
    }
    println!("Parsed {} items. Total: {}", entries.len(), calculate_totals(&entries));

    println!("\n=== Recipe ===");
    let recipe = Recipe::new("Dumpling Plate", entries)?;
    println!("{} ({:.0} cal)", recipe.name, recipe.totals.calories);
    println!("{}", recipe.ingredients_json()?);

    println!("\n=== Log half a plate ===");
    let logged = recipe.to_log_entry(0.5)?;
    println!("{}", logged.to_table_line());

    Ok(())
}
