//! Text formats used by recipe entry forms.
//!
//! Ingredients are entered on one line, comma separated, with an optional
//! quantity in parentheses: `Flour (1 cup), Sugar, Eggs (2)`.

use std::sync::OnceLock;

use regex::Regex;

use super::Ingredient;

/// Matches `name (quantity)` with the quantity in trailing parentheses.
const QUANTITY_PATTERN: &str = r"^(.*?)\s*\((.*?)\)$";

fn quantity_regex() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| Regex::new(QUANTITY_PATTERN).ok()).as_ref()
}

/// Parses a comma separated ingredient line. Empty items are skipped.
pub fn parse_ingredients(input: &str) -> Vec<Ingredient> {
    input
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(|item| match quantity_regex().and_then(|re| re.captures(item)) {
            Some(caps) => {
                let name = caps[1].trim();
                let quantity = caps[2].trim();
                if quantity.is_empty() {
                    Ingredient::new(name)
                } else {
                    Ingredient::with_quantity(name, quantity)
                }
            }
            None => Ingredient::new(item),
        })
        .collect()
}

/// Formats ingredients back into the single-line form used by
/// [`parse_ingredients`].
pub fn format_ingredients(ingredients: &[Ingredient]) -> String {
    ingredients
        .iter()
        .map(|ing| match &ing.quantity {
            Some(q) => format!("{} ({})", ing.name, q),
            None => ing.name.clone(),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Splits instructions on newlines, dropping blank steps.
pub fn parse_instructions(input: &str) -> Vec<String> {
    input
        .lines()
        .map(str::trim)
        .filter(|step| !step.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ingredients_with_quantities() {
        let parsed = parse_ingredients("Flour (1 cup), Sugar ,Eggs (2), ");
        assert_eq!(
            parsed,
            vec![
                Ingredient::with_quantity("Flour", "1 cup"),
                Ingredient::new("Sugar"),
                Ingredient::with_quantity("Eggs", "2"),
            ]
        );
    }

    #[test]
    fn test_parse_ingredients_empty() {
        assert!(parse_ingredients("").is_empty());
        assert!(parse_ingredients(" , ,").is_empty());
    }

    #[test]
    fn test_empty_parentheses_drop_quantity() {
        assert_eq!(parse_ingredients("Salt ()"), vec![Ingredient::new("Salt")]);
    }

    #[test]
    fn test_format_is_inverse_of_parse() {
        let line = "Flour (1 cup), Sugar, Eggs (2)";
        assert_eq!(format_ingredients(&parse_ingredients(line)), line);
    }

    #[test]
    fn test_parse_instructions() {
        let steps = parse_instructions("Boil water\n\n  Add pasta  \r\nDrain\n");
        assert_eq!(steps, vec!["Boil water", "Add pasta", "Drain"]);
    }
}
