//! Live text filtering of catalog lists.
//!
//! Matching is a case-insensitive substring test against an entity's name
//! or its description. The query is used as typed: a whitespace-only query
//! is a literal substring, not an empty one.

use crate::models::{DecorationImage, DecorationType, Event};

/// Something the search box can match against.
pub trait Searchable {
    fn search_name(&self) -> &str;
    fn search_description(&self) -> &str;

    /// Whether this item matches an already-lowercased query.
    fn matches_lowercase(&self, query_lower: &str) -> bool {
        self.search_name().to_lowercase().contains(query_lower)
            || self.search_description().to_lowercase().contains(query_lower)
    }
}

impl Searchable for Event {
    fn search_name(&self) -> &str {
        &self.name
    }
    fn search_description(&self) -> &str {
        self.description_text()
    }
}

impl Searchable for DecorationType {
    fn search_name(&self) -> &str {
        &self.name
    }
    fn search_description(&self) -> &str {
        self.description_text()
    }
}

impl Searchable for DecorationImage {
    fn search_name(&self) -> &str {
        &self.name
    }
    fn search_description(&self) -> &str {
        self.description_text()
    }
}

/// Items matching `query`, in their original order.
pub fn filter<'a, T: Searchable>(items: &'a [T], query: &str) -> Vec<&'a T> {
    if query.is_empty() {
        return items.iter().collect();
    }
    let query_lower = query.to_lowercase();
    items
        .iter()
        .filter(|item| item.matches_lowercase(&query_lower))
        .collect()
}

/// Indices into `items` of the entries matching `query`, ascending.
pub fn filtered_indices<T: Searchable>(items: &[T], query: &str) -> Vec<usize> {
    let query_lower = query.to_lowercase();
    items
        .iter()
        .enumerate()
        .filter(|(_, item)| query.is_empty() || item.matches_lowercase(&query_lower))
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(id: i64, name: &str, description: Option<&str>) -> Event {
        Event {
            id,
            name: name.to_string(),
            description: description.map(str::to_string),
            is_active: Some(true),
            created_at: None,
            updated_at: None,
            decoration_types: vec![],
        }
    }

    fn wedding_events() -> Vec<Event> {
        vec![
            event(1, "Haldi", Some("turmeric")),
            event(2, "Sangeet", Some("music night")),
        ]
    }

    #[test]
    fn query_matches_description() {
        let events = wedding_events();
        let hits = filter(&events, "musi");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Sangeet");
    }

    #[test]
    fn match_is_case_insensitive_on_name() {
        let events = wedding_events();
        let hits = filter(&events, "HAL");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, 1);
    }

    #[test]
    fn empty_query_returns_everything_in_order() {
        let events = wedding_events();
        let hits: Vec<Event> = filter(&events, "").into_iter().cloned().collect();
        assert_eq!(hits, events);
    }

    #[test]
    fn whitespace_query_is_literal() {
        let events = wedding_events();
        // "music night" contains a space, "Haldi"/"turmeric" do not.
        let hits = filter(&events, " ");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, 2);
        assert!(filter(&events, "  ").is_empty());
    }

    #[test]
    fn missing_description_only_matches_name() {
        let events = vec![event(3, "Mehendi", None)];
        assert_eq!(filter(&events, "mehen").len(), 1);
        assert!(filter(&events, "henna").is_empty());
    }

    #[test]
    fn filter_does_not_touch_input() {
        let events = wedding_events();
        let before = events.clone();
        let _ = filter(&events, "x");
        assert_eq!(events, before);
    }

    #[test]
    fn results_are_ordered_subset_that_match() {
        let events = vec![
            event(1, "Reception", Some("evening party")),
            event(2, "Haldi", Some("Turmeric ceremony")),
            event(3, "Baraat", Some("groom procession")),
            event(4, "Vidaai", Some("farewell ceremony")),
        ];
        for query in ["cer", "R", "o", "zzz", "Ceremony"] {
            let hits = filter(&events, query);
            let ids: Vec<i64> = hits.iter().map(|e| e.id).collect();
            let mut sorted = ids.clone();
            sorted.sort();
            assert_eq!(ids, sorted, "order preserved for {query:?}");
            let q = query.to_lowercase();
            for hit in hits {
                assert!(
                    hit.name.to_lowercase().contains(&q)
                        || hit.description_text().to_lowercase().contains(&q)
                );
            }
        }
    }

    #[test]
    fn indices_agree_with_filter() {
        let events = wedding_events();
        assert_eq!(filtered_indices(&events, ""), vec![0, 1]);
        assert_eq!(filtered_indices(&events, "night"), vec![1]);
        assert!(filtered_indices(&events, "nope").is_empty());
    }
}
