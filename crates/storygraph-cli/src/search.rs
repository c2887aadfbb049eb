//! Fuzzy person-name search, for picking an ego seed from the CLI.
//!
//! Substring matches rank above subsequence matches; within each class,
//! earlier and tighter matches rank higher. Scoring is intentionally simple:
//! the datasets are curated and small.

use storygraph_model::{Dataset, PersonRow};

/// Match score, higher is better. `None` when the name does not match.
pub fn fuzzy_score(query: &str, name: &str) -> Option<i64> {
    let q = query.trim().to_lowercase();
    if q.is_empty() {
        return None;
    }
    let n = name.to_lowercase();

    if let Some(pos) = n.find(&q) {
        let slack = n.chars().count() as i64 - q.chars().count() as i64;
        return Some(1_000 - pos as i64 - slack);
    }

    // Subsequence match: all query chars appear in order, gaps penalized.
    let mut rest = n.as_str();
    let mut gaps = 0i64;
    for ch in q.chars() {
        match rest.find(ch) {
            Some(pos) => {
                gaps += rest[..pos].chars().count() as i64;
                rest = &rest[pos + ch.len_utf8()..];
            }
            None => return None,
        }
    }
    Some(100 - gaps)
}

/// Matching persons, best first; ties broken by raw id for stable output.
pub fn search_persons<'a>(data: &'a Dataset, query: &str) -> Vec<(i64, &'a PersonRow)> {
    let mut matches: Vec<(i64, &PersonRow)> = data
        .persons()
        .iter()
        .filter_map(|p| fuzzy_score(query, &p.name).map(|s| (s, p)))
        .collect();
    matches.sort_by_key(|(score, p)| (-score, p.person_id));
    matches
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substring_beats_subsequence() {
        let sub = fuzzy_score("mack", "George Leslie Mackay").expect("substring");
        let seq = fuzzy_score("mcky", "George Leslie Mackay").expect("subsequence");
        assert!(sub > seq);
    }

    #[test]
    fn exact_match_ranks_highest() {
        let exact = fuzzy_score("mackay", "Mackay").expect("exact");
        let partial = fuzzy_score("mackay", "George Leslie Mackay").expect("partial");
        assert!(exact > partial);
    }

    #[test]
    fn non_matches_and_blank_queries_return_none() {
        assert!(fuzzy_score("zz", "Mackay").is_none());
        assert!(fuzzy_score("   ", "Mackay").is_none());
    }

    #[test]
    fn search_orders_best_first() {
        let data = Dataset::from_json_str(
            r#"{"persons": [
                {"person_id": 1, "name": "George Leslie Mackay"},
                {"person_id": 2, "name": "Mackay"},
                {"person_id": 3, "name": "Lin Maosheng"}
            ]}"#,
        )
        .expect("data");
        let hits = search_persons(&data, "mackay");
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].1.person_id, 2);
        assert_eq!(hits[1].1.person_id, 1);
    }
}
