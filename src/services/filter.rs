// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Category and free-text filtering over the prompt list.

use crate::models::category::ALL;
use crate::models::Prompt;

/// Select the prompts matching `category` and `query`, preserving input order.
///
/// A prompt matches when the category is `"all"` or equals the prompt's
/// category, and the query is empty or a case-insensitive substring of the
/// title, the description or any tag. Unknown categories match nothing.
pub fn filter_prompts(prompts: &[Prompt], category: &str, query: &str) -> Vec<Prompt> {
    let needle = query.to_lowercase();

    prompts
        .iter()
        .filter(|p| category == ALL || p.category == category)
        .filter(|p| p.matches_query(&needle))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn prompt(id: &str, title: &str, category: &str, tags: &[&str]) -> Prompt {
        serde_json::from_value(json!({
            "id": id,
            "title": title,
            "description": format!("About {}", title),
            "content": "...",
            "category": category,
            "tags": tags,
        }))
        .unwrap()
    }

    fn sample() -> Vec<Prompt> {
        vec![
            prompt("1", "Code Review Expert", "coding", &["debugging"]),
            prompt("2", "Marketing Copy", "marketing", &["sales"]),
        ]
    }

    fn ids(prompts: &[Prompt]) -> Vec<&str> {
        prompts.iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn test_filter_by_category() {
        assert_eq!(ids(&filter_prompts(&sample(), "coding", "")), vec!["1"]);
    }

    #[test]
    fn test_filter_by_tag() {
        assert_eq!(ids(&filter_prompts(&sample(), ALL, "sales")), vec!["2"]);
    }

    #[test]
    fn test_filter_no_match() {
        assert!(filter_prompts(&sample(), ALL, "zzz").is_empty());
    }

    #[test]
    fn test_filter_all_empty_is_identity() {
        let prompts = sample();
        assert_eq!(filter_prompts(&prompts, ALL, ""), prompts);
    }

    #[test]
    fn test_filter_is_case_insensitive() {
        assert_eq!(ids(&filter_prompts(&sample(), ALL, "REVIEW")), vec!["1"]);
        assert_eq!(ids(&filter_prompts(&sample(), ALL, "about")), vec!["1", "2"]);
    }

    #[test]
    fn test_unknown_category_and_empty_input() {
        assert!(filter_prompts(&sample(), "astrology", "").is_empty());
        assert!(filter_prompts(&[], ALL, "anything").is_empty());
    }

    #[test]
    fn test_category_and_query_combine() {
        assert!(filter_prompts(&sample(), "coding", "sales").is_empty());
        assert_eq!(ids(&filter_prompts(&sample(), "marketing", "sal")), vec!["2"]);
    }

    #[test]
    fn test_category_filter_only_returns_that_category() {
        let prompts: Vec<Prompt> = (0..30)
            .map(|i| {
                let category = ["coding", "writing", "design"][i % 3];
                prompt(&i.to_string(), &format!("Prompt {}", i), category, &[])
            })
            .collect();

        for category in ["coding", "writing", "design"] {
            let filtered = filter_prompts(&prompts, category, "");
            assert_eq!(filtered.len(), 10);
            assert!(filtered.iter().all(|p| p.category == category));

            // Input order is kept
            let positions: Vec<usize> = filtered
                .iter()
                .map(|p| p.id.parse::<usize>().unwrap())
                .collect();
            assert!(positions.windows(2).all(|w| w[0] < w[1]));
        }
    }
}
