//! Weighted tag ranking
//!
//! Every query token selects at most one tag; each reference of a selected tag
//! adds its count to the reference's running weight. References are ordered by
//! total weight, heaviest first. Equal weights keep first-seen order.

use super::dictionary::Dictionary;
use crate::model::PlayList;
use std::collections::HashMap;

/// A reference and its accumulated weight
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedReference {
    pub name: String,
    pub weight: u64,
}

/// Split a query on single spaces and lower-case each token
///
/// Empty tokens (from repeated spaces) are dropped.
pub fn tokenize(query: &str) -> Vec<String> {
    query
        .split(' ')
        .filter(|token| !token.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// Rank the dictionary's references against `query`
///
/// A missing dictionary, an empty query or a query with no known tag all give
/// an empty ranking.
pub fn rank(dictionary: Option<&Dictionary>, query: &str) -> Vec<RankedReference> {
    let Some(dictionary) = dictionary else {
        log::debug!("Search before dictionary is loaded; no matches");
        return Vec::new();
    };

    let mut ranked: Vec<RankedReference> = Vec::new();
    let mut slots: HashMap<String, usize> = HashMap::new();

    for token in tokenize(query) {
        let Some(tag) = dictionary.tag(&token) else {
            log::debug!("No tag named {:?}", token);
            continue;
        };

        for reference in &tag.reference_array {
            match slots.get(&reference.name) {
                Some(&slot) => {
                    let weight = &mut ranked[slot].weight;
                    *weight = weight.saturating_add(reference.count);
                }
                None => {
                    slots.insert(reference.name.clone(), ranked.len());
                    ranked.push(RankedReference {
                        name: reference.name.clone(),
                        weight: reference.count,
                    });
                }
            }
        }
    }

    // sort_by is stable
    ranked.sort_by(|a, b| b.weight.cmp(&a.weight));
    ranked
}

/// Run `query` and build the result playlist
///
/// Each ranked reference becomes a play named by its translation, or by the
/// raw reference key when the dictionary has no translation for it.
pub fn search(dictionary: Option<&Dictionary>, query: &str) -> PlayList {
    let mut result = PlayList::transient(query.trim());

    for reference in rank(dictionary, query) {
        let name = dictionary
            .and_then(|d| d.translation(&reference.name))
            .unwrap_or(reference.name.as_str());
        result.add_play(name);
    }

    log::info!("Search {:?}: {} results", query, result.len());
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Item;

    fn dictionary() -> Dictionary {
        Dictionary::from_json(
            r#"{
                "tagArray": [
                    {"name": "cat", "referenceArray": [{"name": "X", "count": 3}, {"name": "Y", "count": 1}]},
                    {"name": "dog", "referenceArray": [{"name": "Y", "count": 2}, {"name": "Z", "count": 5}]}
                ],
                "translationArray": [{"key": "Z", "value": "zebra.json"}]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_weights_accumulate_across_tags() {
        let dictionary = dictionary();
        let ranked = rank(Some(&dictionary), "cat dog");

        assert_eq!(ranked.len(), 3);
        assert_eq!(ranked[0], RankedReference { name: "Z".into(), weight: 5 });
        // X and Y tie at 3; X was seen first
        assert_eq!(ranked[1], RankedReference { name: "X".into(), weight: 3 });
        assert_eq!(ranked[2], RankedReference { name: "Y".into(), weight: 3 });
    }

    #[test]
    fn test_tokens_are_lower_cased() {
        let dictionary = dictionary();
        let ranked = rank(Some(&dictionary), "CAT");
        assert_eq!(ranked[0].name, "X");
    }

    #[test]
    fn test_repeated_token_counts_twice() {
        let dictionary = dictionary();
        let ranked = rank(Some(&dictionary), "cat cat");
        assert_eq!(ranked[0].weight, 6);
    }

    #[test]
    fn test_huge_counts_saturate() {
        let dictionary = Dictionary::from_json(&format!(
            r#"{{"tagArray": [
                {{"name": "a", "referenceArray": [{{"name": "X", "count": {}}}]}},
                {{"name": "b", "referenceArray": [{{"name": "X", "count": 1}}, {{"name": "Y", "count": 7}}]}}
            ]}}"#,
            u64::MAX
        ))
        .unwrap();

        let ranked = rank(Some(&dictionary), "a b");
        assert_eq!(ranked[0], RankedReference { name: "X".into(), weight: u64::MAX });
        assert_eq!(ranked[1].weight, 7);
    }

    #[test]
    fn test_no_matches() {
        let dictionary = dictionary();
        assert!(rank(Some(&dictionary), "").is_empty());
        assert!(rank(Some(&dictionary), "   ").is_empty());
        assert!(rank(Some(&dictionary), "bird fish").is_empty());
        assert!(rank(None, "cat").is_empty());
    }

    #[test]
    fn test_search_translates_names() {
        let dictionary = dictionary();
        let result = search(Some(&dictionary), "cat dog");

        let names: Vec<_> = result.plays().iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["zebra.json", "X", "Y"]);
        assert!(result.storage_key().is_none());
    }

    #[test]
    fn test_search_without_dictionary_is_empty() {
        let result = search(None, "cat");
        assert!(result.is_empty());
    }
}
