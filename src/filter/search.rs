//! Comma-separated multi-term search

use super::Searchable;

/// Split a search string into lowercase terms; empty terms are dropped
pub fn parse_terms(search: &str) -> Vec<String> {
    search
        .split(',')
        .map(|t| t.trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .collect()
}

/// Keep the items whose search text contains every term.
///
/// An empty search (or one made only of commas and spaces) returns the input
/// unchanged. Surviving items keep their original order.
pub fn search_list<T: Searchable>(search: &str, items: Vec<T>) -> Vec<T> {
    let terms = parse_terms(search);
    if terms.is_empty() {
        return items;
    }

    items
        .into_iter()
        .filter(|item| {
            let text = item.search_text().to_lowercase();
            terms.iter().all(|term| text.contains(term.as_str()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Named(&'static str, &'static str);

    impl Searchable for Named {
        fn search_text(&self) -> String {
            format!("{} {}", self.0, self.1)
        }
    }

    fn names(items: &[Named]) -> Vec<&'static str> {
        items.iter().map(|n| n.0).collect()
    }

    fn pantry() -> Vec<Named> {
        vec![
            Named("Chicken Breast", "Tyson"),
            Named("Beef Jerky", "Jack Link's"),
            Named("Chicken Thigh", "Perdue"),
            Named("Greek Yogurt", "Chobani"),
        ]
    }

    #[test]
    fn test_parse_terms() {
        assert_eq!(parse_terms(" Chicken, ,TYSON ,"), vec!["chicken", "tyson"]);
        assert!(parse_terms("").is_empty());
        assert!(parse_terms(" , ,").is_empty());
    }

    #[test]
    fn test_empty_search_is_identity() {
        let result = search_list("", pantry());
        assert_eq!(names(&result), names(&pantry()));
    }

    #[test]
    fn test_blank_terms_are_identity() {
        let result = search_list(" , ", pantry());
        assert_eq!(result.len(), 4);
    }

    #[test]
    fn test_single_term_case_insensitive() {
        let items = vec![Named("Chicken Breast", ""), Named("Beef Jerky", "")];
        let result = search_list("chick", items);
        assert_eq!(names(&result), vec!["Chicken Breast"]);
    }

    #[test]
    fn test_terms_are_anded() {
        let result = search_list("chicken, perdue", pantry());
        assert_eq!(names(&result), vec!["Chicken Thigh"]);
    }

    #[test]
    fn test_brand_is_searched() {
        let result = search_list("CHOBANI", pantry());
        assert_eq!(names(&result), vec!["Greek Yogurt"]);
    }

    #[test]
    fn test_result_is_ordered_subset_containing_all_terms() {
        let search = "chicken,t";
        let result = search_list(search, pantry());
        assert_eq!(names(&result), vec!["Chicken Breast", "Chicken Thigh"]);
        for item in &result {
            let text = item.search_text().to_lowercase();
            assert!(parse_terms(search).iter().all(|t| text.contains(t.as_str())));
        }
    }

    #[test]
    fn test_no_match_yields_empty() {
        assert!(search_list("tofu", pantry()).is_empty());
    }
}
