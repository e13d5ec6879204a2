//! Optional overlap merging
//!
//! By default the engine keeps duplicate and overlapping entities from
//! different sources. When `merge_overlaps` is enabled this pass runs last:
//! identical `(text, label)` pairs collapse to their first occurrence, and an
//! entity whose text is contained in a longer entity is dropped. Survivors
//! keep their original relative order.

use crate::domain::Entity;
use std::collections::HashSet;

/// Collapse duplicate and contained entities
pub fn merge_overlaps(entities: Vec<Entity>) -> Vec<Entity> {
    let mut seen: HashSet<Entity> = HashSet::with_capacity(entities.len());
    let unique: Vec<Entity> = entities
        .into_iter()
        .filter(|e| seen.insert(e.clone()))
        .collect();

    unique
        .iter()
        .filter(|candidate| {
            !unique.iter().any(|other| {
                other.text.len() > candidate.text.len() && other.text.contains(&candidate.text)
            })
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::labels;

    #[test]
    fn test_identical_pairs_collapse() {
        let merged = merge_overlaps(vec![
            Entity::new("Jean", labels::PERSON),
            Entity::new("jean@x.fr", labels::EMAIL),
            Entity::new("Jean", labels::PERSON),
        ]);
        assert_eq!(
            merged,
            vec![
                Entity::new("Jean", labels::PERSON),
                Entity::new("jean@x.fr", labels::EMAIL),
            ]
        );
    }

    #[test]
    fn test_contained_entities_are_dropped() {
        let merged = merge_overlaps(vec![
            Entity::new("2024-03-12", labels::PHONE),
            Entity::new("2024-03-12", labels::DATE),
            Entity::new("12 rue de la Paix", labels::ADDRESS),
            Entity::new("Paix", labels::PERSON),
        ]);
        assert_eq!(
            merged,
            vec![
                Entity::new("2024-03-12", labels::PHONE),
                Entity::new("2024-03-12", labels::DATE),
                Entity::new("12 rue de la Paix", labels::ADDRESS),
            ]
        );
    }

    #[test]
    fn test_empty_input() {
        assert!(merge_overlaps(Vec::new()).is_empty());
    }
}
