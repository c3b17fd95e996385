const NO_ALTERNATIVE: &str = "No alternative needed";

fn alternative_for(item: &str) -> Option<&'static str> {
    match item {
        "bread" => Some("whole grain or almond flour bread"),
        "rice" => Some("cauliflower rice"),
        "soda" => Some("sparkling water with lemon"),
        "pasta" => Some("zucchini noodles or shirataki noodles"),
        "sugar" => Some("stevia or monk fruit sweetener"),
        _ => None,
    }
}

/// Suggests diabetic-friendly swaps for a comma-separated shopping list.
pub fn recommend_groceries(items: &str) -> String {
    let suggestions: Vec<String> = items
        .split(',')
        .map(|item| item.trim().to_lowercase())
        .filter(|item| !item.is_empty())
        .map(|item| {
            let alternative = alternative_for(&item).unwrap_or(NO_ALTERNATIVE);
            format!("{} → {}", item, alternative)
        })
        .collect();

    format!("Grocery Recommendations:\n{}", suggestions.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bread_rice_kale() {
        assert_eq!(
            recommend_groceries("bread, rice, kale"),
            "Grocery Recommendations:\n\
             bread → whole grain or almond flour bread\n\
             rice → cauliflower rice\n\
             kale → No alternative needed"
        );
    }

    #[test]
    fn test_items_are_normalized() {
        let text = recommend_groceries(" SODA ,Pasta,, ");
        assert_eq!(
            text,
            "Grocery Recommendations:\n\
             soda → sparkling water with lemon\n\
             pasta → zucchini noodles or shirataki noodles"
        );
    }
}
