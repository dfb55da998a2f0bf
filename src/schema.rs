use serde::{Deserialize, Serialize};

use crate::constants::labels::ANOMALY_LABEL_COLUMN;
use crate::types::ColumnName;

/// Semantic group a schema column belongs to.
///
/// The group decides the target type and the coercion fallback applied by
/// the cleaning engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnGroup {
    /// Required non-empty string key (`gtin`).
    Identifier,
    /// Free text, coercible to empty string.
    Text,
    /// Numeric reading with `-1` sentinel fallback.
    Nutrient,
    /// Boolean ingredient/process indicator, fail-open to `false`.
    Tag,
    /// Boolean data-quality indicator, fail-open to `false`.
    Flag,
}

/// Fixed column schema the engine cleans against.
///
/// The schema is plain injected data rather than module-level state, so the
/// engine can be exercised with alternate or partial schemas. Columns not
/// listed here are dropped by projection; listed columns absent from the
/// input are tolerated (treated as all-missing), except that a missing
/// identifier column is a fatal precondition for non-empty inputs.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ColumnSchema {
    /// Identifier column name.
    pub identifier: ColumnName,
    /// Free-text columns, in expansion order.
    pub text: Vec<ColumnName>,
    /// Numeric nutrient columns.
    pub nutrient: Vec<ColumnName>,
    /// Boolean ingredient/process tag columns.
    pub tag: Vec<ColumnName>,
    /// Boolean data-quality flag columns.
    pub flag: Vec<ColumnName>,
    /// Text column that must be non-empty for a row to survive cleaning.
    /// The completeness filter is skipped when this is `None` or the
    /// column is absent from the input.
    #[serde(default)]
    pub required_text: Option<ColumnName>,
}

impl ColumnSchema {
    /// Canonical product-nutrition schema used by the reference dataset.
    pub fn product_nutrition() -> Self {
        Self {
            identifier: "gtin".to_string(),
            text: to_names(&["category_name", "product_name", "ingredients_text"]),
            nutrient: to_names(&[
                "calories",
                "total_fat",
                "sat_fat",
                "trans_fat",
                "unsat_fat",
                "cholesterol",
                "sodium",
                "carbs",
                "dietary_fiber",
                "total_sugars",
                "added_sugars",
                "protein",
                "potassium",
            ]),
            tag: to_names(&[
                "is_whole_grain",
                "is_omega_three",
                "is_healthy_oils",
                "is_healthy_fats",
                "is_seed_oil",
                "is_refined_grains",
                "is_deep_fried",
                "is_sugars_added",
                "is_artificial_sweeteners",
                "is_artificial_flavors",
                "is_artificial_preservatives",
                "is_artificial_colors",
                "is_artificial_red_color",
                "is_ph_oil",
                "is_aspartame",
                "is_acesulfame_potassium",
                "is_saccharin",
                "is_corn_syrup",
                "is_brominated_vegetable_oil",
                "is_potassium_bromate",
                "is_titanium_dioxide",
                "is_phosphate_additives",
                "is_polysorbate60",
                "is_mercury_fish",
                "is_caregeenan",
                "is_natural_non_kcal_sweeteners",
                "is_natural_additives",
                "is_unspecific_ingredient",
                "is_propellant",
                "is_starch",
                "is_active_live_cultures",
            ]),
            flag: to_names(&[
                "flag_calorie_mismatch",
                "flag_fat_mismatch",
                "flag_carb_mismatch",
                "flag_sugar_mismatch",
                "flag_missing_added_sugars",
                "flag_extra_added_sugars",
                "flag_low_sodium",
                "flag_high_sodium",
                "flag_negative_values",
                "flag_type_error",
            ]),
            required_text: Some("ingredients_text".to_string()),
        }
    }

    /// Full projection list in output order: identifier, text, nutrient,
    /// tag, flag, then the derived anomaly label.
    pub fn kept_columns(&self) -> Vec<&str> {
        let mut kept = Vec::with_capacity(
            1 + self.text.len() + self.nutrient.len() + self.tag.len() + self.flag.len() + 1,
        );
        kept.push(self.identifier.as_str());
        kept.extend(self.text.iter().map(String::as_str));
        kept.extend(self.nutrient.iter().map(String::as_str));
        kept.extend(self.tag.iter().map(String::as_str));
        kept.extend(self.flag.iter().map(String::as_str));
        kept.push(ANOMALY_LABEL_COLUMN);
        kept
    }

    /// Columns whose raw values participate in caret-marker label
    /// derivation: text, nutrient, and tag (never identifier or flags).
    pub fn marker_columns(&self) -> impl Iterator<Item = &str> {
        self.text
            .iter()
            .chain(self.nutrient.iter())
            .chain(self.tag.iter())
            .map(String::as_str)
    }

    /// Group membership lookup for a schema column name.
    pub fn group_of(&self, name: &str) -> Option<ColumnGroup> {
        if name == self.identifier {
            Some(ColumnGroup::Identifier)
        } else if self.text.iter().any(|c| c == name) {
            Some(ColumnGroup::Text)
        } else if self.nutrient.iter().any(|c| c == name) {
            Some(ColumnGroup::Nutrient)
        } else if self.tag.iter().any(|c| c == name) {
            Some(ColumnGroup::Tag)
        } else if self.flag.iter().any(|c| c == name) {
            Some(ColumnGroup::Flag)
        } else {
            None
        }
    }
}

impl Default for ColumnSchema {
    fn default() -> Self {
        Self::product_nutrition()
    }
}

fn to_names(names: &[&str]) -> Vec<ColumnName> {
    names.iter().map(|name| name.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_schema_column_counts() {
        let schema = ColumnSchema::product_nutrition();
        assert_eq!(schema.text.len(), 3);
        assert_eq!(schema.nutrient.len(), 13);
        assert_eq!(schema.tag.len(), 31);
        assert_eq!(schema.flag.len(), 10);
        // 1 identifier + groups + derived label
        assert_eq!(schema.kept_columns().len(), 1 + 3 + 13 + 31 + 10 + 1);
    }

    #[test]
    fn kept_columns_end_with_label() {
        let schema = ColumnSchema::product_nutrition();
        let kept = schema.kept_columns();
        assert_eq!(kept.first(), Some(&"gtin"));
        assert_eq!(kept.last(), Some(&ANOMALY_LABEL_COLUMN));
    }

    #[test]
    fn group_lookup_covers_all_groups() {
        let schema = ColumnSchema::product_nutrition();
        assert_eq!(schema.group_of("gtin"), Some(ColumnGroup::Identifier));
        assert_eq!(schema.group_of("product_name"), Some(ColumnGroup::Text));
        assert_eq!(schema.group_of("calories"), Some(ColumnGroup::Nutrient));
        assert_eq!(schema.group_of("is_starch"), Some(ColumnGroup::Tag));
        assert_eq!(schema.group_of("flag_low_sodium"), Some(ColumnGroup::Flag));
        assert_eq!(schema.group_of("label_is_anomaly"), None);
        assert_eq!(schema.group_of("unrelated"), None);
    }

    #[test]
    fn marker_columns_exclude_identifier_and_flags() {
        let schema = ColumnSchema::product_nutrition();
        let markers: Vec<&str> = schema.marker_columns().collect();
        assert_eq!(markers.len(), 3 + 13 + 31);
        assert!(!markers.contains(&"gtin"));
        assert!(!markers.contains(&"flag_type_error"));
    }
}
