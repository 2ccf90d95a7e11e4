//! The built-in recipe catalog.
//!
//! Every recipe the viewer can show lives in [`CATALOG`], a fixed table that
//! is compiled into the binary and never changes at runtime.

use serde::Serialize;

/// An immutable recipe record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Recipe {
    /// Display name
    pub name: &'static str,
    /// Ingredients, in display order
    pub ingredients: &'static [&'static str],
    /// Preparation steps, in display order
    pub steps: &'static [&'static str],
    /// Human readable preparation time (e.g. "15 min")
    pub prep_time: &'static str,
    /// Serving count, kept as text so ranges like "2-3" survive
    pub servings: &'static str,
}

/// The fixed, ordered collection of all selectable recipes.
pub static CATALOG: [Recipe; 5] = [
    Recipe {
        name: "Garlic Butter Pasta",
        ingredients: &["Pasta", "Butter", "Garlic", "Parmesan cheese"],
        steps: &[
            "Cook pasta according to package directions",
            "Melt butter in a pan and sauté minced garlic until fragrant",
            "Toss cooked pasta with garlic butter",
            "Top with grated Parmesan and serve",
        ],
        prep_time: "15 min",
        servings: "2-3",
    },
    Recipe {
        name: "Honey Mustard Chicken",
        ingredients: &["Chicken breast", "Honey", "Dijon mustard", "Olive oil"],
        steps: &[
            "Mix honey, mustard, and olive oil in a bowl",
            "Season chicken with salt and pepper",
            "Pan-fry chicken until golden on both sides",
            "Brush with honey mustard glaze and serve",
        ],
        prep_time: "20 min",
        servings: "2",
    },
    Recipe {
        name: "Caprese Salad",
        ingredients: &[
            "Fresh mozzarella",
            "Tomatoes",
            "Fresh basil",
            "Balsamic glaze",
            "Olive oil",
        ],
        steps: &[
            "Slice tomatoes and mozzarella into rounds",
            "Arrange alternating slices on a plate",
            "Tuck fresh basil leaves between slices",
            "Drizzle with olive oil and balsamic glaze",
        ],
        prep_time: "10 min",
        servings: "2",
    },
    Recipe {
        name: "Avocado Toast",
        ingredients: &["Bread", "Avocado", "Lemon", "Salt"],
        steps: &[
            "Toast bread until golden and crispy",
            "Mash avocado with a squeeze of lemon juice and salt",
            "Spread avocado mixture generously on toast",
            "Add pepper or red pepper flakes if desired",
        ],
        prep_time: "5 min",
        servings: "1",
    },
    Recipe {
        name: "Banana Pancakes",
        ingredients: &["Bananas", "Eggs", "Cinnamon"],
        steps: &[
            "Mash 2 ripe bananas in a bowl",
            "Beat in 2 eggs and a pinch of cinnamon",
            "Heat a non-stick pan over medium heat",
            "Pour small circles of batter and cook until bubbles form, then flip",
        ],
        prep_time: "10 min",
        servings: "2",
    },
];

/// Get the full catalog.
pub fn catalog() -> &'static [Recipe] {
    &CATALOG
}

impl Recipe {
    /// Look up a catalog entry by name, ignoring ASCII case.
    pub fn by_name(name: &str) -> Option<&'static Recipe> {
        let name = name.trim();
        CATALOG.iter().find(|r| r.name.eq_ignore_ascii_case(name))
    }

    /// Check whether this reference points into [`CATALOG`].
    ///
    /// Compares addresses, not contents.
    pub fn is_catalog_member(&self) -> bool {
        CATALOG.iter().any(|r| std::ptr::eq(r, self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_is_non_empty() {
        assert_eq!(catalog().len(), 5);
    }

    #[test]
    fn test_catalog_entries_have_steps_and_ingredients() {
        for recipe in catalog() {
            assert!(!recipe.ingredients.is_empty(), "{}", recipe.name);
            assert!(
                (3..=5).contains(&recipe.ingredients.len()),
                "{} should have 3-5 ingredients",
                recipe.name
            );
            assert_eq!(recipe.steps.len(), 4, "{}", recipe.name);
        }
    }

    #[test]
    fn test_avocado_toast_fields() {
        let recipe = Recipe::by_name("Avocado Toast").expect("Avocado Toast is in the catalog");
        assert_eq!(recipe.ingredients.len(), 4);
        assert_eq!(recipe.steps.len(), 4);
        assert_eq!(recipe.prep_time, "5 min");
        assert_eq!(recipe.servings, "1");
        assert_eq!(recipe.ingredients[0], "Bread");
        assert_eq!(recipe.steps[0], "Toast bread until golden and crispy");
    }

    #[test]
    fn test_by_name_ignores_case_and_whitespace() {
        let recipe = Recipe::by_name("  caprese SALAD ").unwrap();
        assert_eq!(recipe.name, "Caprese Salad");
        assert!(Recipe::by_name("Beef Wellington").is_none());
    }

    #[test]
    fn test_catalog_membership_is_by_identity() {
        assert!(CATALOG[2].is_catalog_member());

        let copy = CATALOG[2];
        assert!(!copy.is_catalog_member());
        assert_eq!(copy, CATALOG[2]);
    }

    #[test]
    fn test_recipe_serializes_to_json() {
        let json = serde_json::to_value(&CATALOG[3]).unwrap();
        assert_eq!(json["name"], "Avocado Toast");
        assert_eq!(json["prep_time"], "5 min");
        assert_eq!(json["ingredients"].as_array().unwrap().len(), 4);
    }
}
