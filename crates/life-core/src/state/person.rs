//! Person Records
//!
//! Family members, friends, and background NPCs live in a single arena keyed
//! by a stable id. Group membership (family, friends, strangers) is a filter
//! over the arena's relation field rather than physical list migration, so a
//! promotion (stranger to friend) is a field write and never a
//! remove-while-iterating hazard. Records are never physically removed;
//! death flips `alive` once.

use serde::{Deserialize, Serialize};

/// Stable handle into the [`People`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PersonId(pub u32);

/// How a person relates to the agent. Mutable: a stranger can become a
/// friend, a friend a spouse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationType {
    Parent,
    Grandparent,
    Sibling,
    Spouse,
    Child,
    Friend,
    Stranger,
}

/// One person in the agent's world.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonRecord {
    pub name: String,
    pub age: f32,
    pub gender: super::Gender,
    pub relation: RelationType,
    pub alive: bool,
    pub health: f32,
    pub mental_health: f32,
    /// Quality of the relationship with the agent, [0, 100].
    pub relationship_quality: f32,
}

impl PersonRecord {
    pub fn new(name: impl Into<String>, age: f32, gender: super::Gender, relation: RelationType) -> Self {
        Self {
            name: name.into(),
            age,
            gender,
            relation,
            alive: true,
            health: 85.0,
            mental_health: 75.0,
            relationship_quality: 60.0,
        }
    }

    /// Mark dead. Write-once; a dead person stays dead.
    pub fn mark_dead(&mut self) {
        self.alive = false;
    }
}

/// Arena of every person the agent knows.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct People {
    records: Vec<PersonRecord>,
}

impl People {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record, returning its stable id.
    pub fn insert(&mut self, person: PersonRecord) -> PersonId {
        let id = PersonId(self.records.len() as u32);
        self.records.push(person);
        id
    }

    pub fn get(&self, id: PersonId) -> Option<&PersonRecord> {
        self.records.get(id.0 as usize)
    }

    pub fn get_mut(&mut self, id: PersonId) -> Option<&mut PersonRecord> {
        self.records.get_mut(id.0 as usize)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (PersonId, &PersonRecord)> {
        self.records
            .iter()
            .enumerate()
            .map(|(i, p)| (PersonId(i as u32), p))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (PersonId, &mut PersonRecord)> {
        self.records
            .iter_mut()
            .enumerate()
            .map(|(i, p)| (PersonId(i as u32), p))
    }

    /// Ids of living people with the given relation. Collected up front so
    /// callers can mutate the arena while walking the group.
    pub fn alive_with(&self, relation: RelationType) -> Vec<PersonId> {
        self.iter()
            .filter(|(_, p)| p.alive && p.relation == relation)
            .map(|(id, _)| id)
            .collect()
    }

    /// Count of living people with the given relation.
    pub fn count_alive(&self, relation: RelationType) -> usize {
        self.records
            .iter()
            .filter(|p| p.alive && p.relation == relation)
            .count()
    }

    /// The living spouse, if any.
    pub fn spouse(&self) -> Option<PersonId> {
        self.alive_with(RelationType::Spouse).into_iter().next()
    }

    /// Reclassify a person, e.g. stranger -> friend on a social event, or
    /// friend -> spouse on marriage.
    pub fn reclassify(&mut self, id: PersonId, relation: RelationType) {
        if let Some(p) = self.get_mut(id) {
            p.relation = relation;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Gender;

    fn sample(relation: RelationType) -> PersonRecord {
        PersonRecord::new("Pat", 55.0, Gender::Female, relation)
    }

    #[test]
    fn test_insert_returns_stable_ids() {
        let mut people = People::new();
        let a = people.insert(sample(RelationType::Parent));
        let b = people.insert(sample(RelationType::Friend));
        assert_ne!(a, b);
        assert_eq!(people.get(a).unwrap().relation, RelationType::Parent);
        assert_eq!(people.get(b).unwrap().relation, RelationType::Friend);
    }

    #[test]
    fn test_death_keeps_record_in_arena() {
        let mut people = People::new();
        let id = people.insert(sample(RelationType::Parent));
        people.get_mut(id).unwrap().mark_dead();
        assert_eq!(people.len(), 1);
        assert_eq!(people.count_alive(RelationType::Parent), 0);
        assert!(!people.get(id).unwrap().alive);
    }

    #[test]
    fn test_reclassify_moves_logical_group() {
        let mut people = People::new();
        let id = people.insert(sample(RelationType::Stranger));
        assert_eq!(people.count_alive(RelationType::Friend), 0);

        people.reclassify(id, RelationType::Friend);
        assert_eq!(people.count_alive(RelationType::Friend), 1);
        assert_eq!(people.count_alive(RelationType::Stranger), 0);
        // Same record, same id
        assert_eq!(people.get(id).unwrap().name, "Pat");
    }

    #[test]
    fn test_alive_with_snapshot_allows_mutation() {
        let mut people = People::new();
        for _ in 0..3 {
            people.insert(sample(RelationType::Friend));
        }
        let ids = people.alive_with(RelationType::Friend);
        for id in ids {
            people.get_mut(id).unwrap().age += 1.0;
        }
        assert!(people.iter().all(|(_, p)| p.age == 56.0));
    }

    #[test]
    fn test_spouse_lookup() {
        let mut people = People::new();
        assert!(people.spouse().is_none());
        let id = people.insert(sample(RelationType::Spouse));
        assert_eq!(people.spouse(), Some(id));
        people.get_mut(id).unwrap().mark_dead();
        assert!(people.spouse().is_none());
    }
}
