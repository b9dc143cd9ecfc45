use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::Add;

use crate::ImportError;

/// One food item and its macro fields, as parsed from a single table row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodEntry {
    pub food_name: String,
    pub calories: f64,
    pub protein: f64,
    pub fat: f64,
    pub carbs: f64,
    pub fiber: f64,
}

impl FoodEntry {
    pub fn new(
        food_name: impl Into<String>,
        calories: f64,
        protein: f64,
        fat: f64,
        carbs: f64,
        fiber: f64,
    ) -> Self {
        Self {
            food_name: food_name.into(),
            calories,
            protein,
            fat,
            carbs,
            fiber,
        }
    }

    /// Render the entry back into the row format accepted by the parser:
    /// the name followed by `calories protein fat carbs fiber`.
    ///
    /// Re-parsing gives back an equal entry only when the name contains no
    /// skip keyword; "Low Calories Bowl" renders fine but parses to nothing.
    pub fn to_table_line(&self) -> String {
        format!(
            "{} {} {} {} {} {}",
            self.food_name, self.calories, self.protein, self.fat, self.carbs, self.fiber
        )
    }

    /// The entry's macros on their own, without the name.
    pub fn macros(&self) -> MacroTotals {
        MacroTotals {
            calories: self.calories,
            protein: self.protein,
            fat: self.fat,
            carbs: self.carbs,
            fiber: self.fiber,
        }
    }
}

/// Column sums over a set of entries
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MacroTotals {
    pub calories: f64,
    pub protein: f64,
    pub fat: f64,
    pub carbs: f64,
    pub fiber: f64,
}

impl MacroTotals {
    /// Sum the five macro columns. An empty slice gives all zeros.
    pub fn from_entries(entries: &[FoodEntry]) -> Self {
        entries.iter().map(FoodEntry::macros).sum()
    }

    /// Multiply every field by `portion`.
    pub fn scaled(&self, portion: f64) -> Self {
        Self {
            calories: self.calories * portion,
            protein: self.protein * portion,
            fat: self.fat * portion,
            carbs: self.carbs * portion,
            fiber: self.fiber * portion,
        }
    }
}

impl Add for MacroTotals {
    type Output = MacroTotals;

    fn add(self, other: MacroTotals) -> MacroTotals {
        MacroTotals {
            calories: self.calories + other.calories,
            protein: self.protein + other.protein,
            fat: self.fat + other.fat,
            carbs: self.carbs + other.carbs,
            fiber: self.fiber + other.fiber,
        }
    }
}

impl Sum for MacroTotals {
    fn sum<I: Iterator<Item = MacroTotals>>(iter: I) -> Self {
        iter.fold(MacroTotals::default(), Add::add)
    }
}

impl fmt::Display for MacroTotals {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.0} cal | {:.1}g P | {:.1}g F | {:.1}g C | {:.1}g Fiber",
            self.calories, self.protein, self.fat, self.carbs, self.fiber
        )
    }
}

/// A named dish: its ingredient rows plus precomputed totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub name: String,
    pub ingredients: Vec<FoodEntry>,
    pub totals: MacroTotals,
}

impl Recipe {
    /// Build a recipe, computing its totals from the ingredients.
    ///
    /// Fails if the name is blank or there are no ingredients.
    pub fn new(name: impl Into<String>, ingredients: Vec<FoodEntry>) -> Result<Self, ImportError> {
        let name: String = name.into();
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(ImportError::InvalidRecipe(
                "Recipe name cannot be empty".to_string(),
            ));
        }
        if ingredients.is_empty() {
            return Err(ImportError::InvalidRecipe(format!(
                "Recipe '{}' has no ingredients",
                name
            )));
        }

        let totals = MacroTotals::from_entries(&ingredients);
        Ok(Self {
            name,
            ingredients,
            totals,
        })
    }

    /// Collapse the recipe into a single log row, scaled by `portion`.
    ///
    /// The row is named `Recipe: <name>`, with a `(<portion>x portion)`
    /// suffix unless the portion is exactly one. The portion always keeps
    /// its decimal point, so 2 is written `2.0x`.
    pub fn to_log_entry(&self, portion: f64) -> Result<FoodEntry, ImportError> {
        if !portion.is_finite() || portion <= 0.0 {
            return Err(ImportError::InvalidPortion(portion));
        }

        let mut food_name = format!("Recipe: {}", self.name);
        if portion != 1.0 {
            food_name.push_str(&format!(" ({:?}x portion)", portion));
        }

        let scaled = self.totals.scaled(portion);
        Ok(FoodEntry {
            food_name,
            calories: scaled.calories,
            protein: scaled.protein,
            fat: scaled.fat,
            carbs: scaled.carbs,
            fiber: scaled.fiber,
        })
    }

    /// Ingredients as a JSON array of records
    pub fn ingredients_json(&self) -> Result<String, ImportError> {
        Ok(serde_json::to_string(&self.ingredients)?)
    }
}
