//! Family and Relationship Handlers
//!
//! Seeds the agent's starting social world, ages everyone alongside the
//! agent, runs elderly mortality checks, and drives relationship
//! progression: dating, marriage, births, breakups, and the promotion of
//! background NPCs into the friend group.

use crate::config::FamilyTuning;
use crate::output::NarrativeLog;
use crate::rng::RandomStream;
use crate::state::{
    Gender, PersonRecord, RelationType, RelationshipStatus, StateRecord, DAYS_PER_YEAR,
};

const NAMES: &[&str] = &[
    "Sam", "Jordan", "Casey", "Riley", "Morgan", "Avery", "Quinn", "Rowan", "Taylor", "Devon",
    "Jamie", "Skyler", "Reese", "Emerson", "Hayden", "Parker",
];

fn random_person(
    rng: &mut RandomStream,
    age_lo: f32,
    age_hi: f32,
    relation: RelationType,
) -> PersonRecord {
    let name = *rng.uniform_choice(NAMES);
    let gender = match rng.integer(0, 2) {
        0 => Gender::Male,
        1 => Gender::Female,
        _ => Gender::NonBinary,
    };
    let age = rng.uniform(age_lo, age_hi);
    let mut person = PersonRecord::new(name, age, gender, relation);
    person.relationship_quality = rng.uniform(40.0, 80.0);
    person.health = rng.uniform(60.0, 95.0);
    person
}

/// Populate the arena with the agent's starting family, friends, and
/// background NPCs. Draw order is fixed for determinism.
pub fn seed_social_world(state: &mut StateRecord, tuning: &FamilyTuning, rng: &mut RandomStream) {
    // Two parents, most of the time still around at agent age 25
    for _ in 0..2 {
        let person = random_person(rng, 48.0, 62.0, RelationType::Parent);
        state.people.insert(person);
    }
    // Maybe a surviving grandparent
    if rng.chance(0.5) {
        let person = random_person(rng, 72.0, 88.0, RelationType::Grandparent);
        state.people.insert(person);
    }
    let siblings = rng.integer(0, 2);
    for _ in 0..siblings {
        let person = random_person(rng, 20.0, 32.0, RelationType::Sibling);
        state.people.insert(person);
    }
    for _ in 0..tuning.starting_friends {
        let person = random_person(rng, 22.0, 35.0, RelationType::Friend);
        state.people.insert(person);
    }
    for _ in 0..tuning.starting_npcs {
        let person = random_person(rng, 20.0, 60.0, RelationType::Stranger);
        state.people.insert(person);
    }
}

/// Age everyone by one day and, on year boundaries, run elderly mortality
/// checks. A family death costs the agent dearly.
pub fn family_daily(
    state: &mut StateRecord,
    tuning: &FamilyTuning,
    rng: &mut RandomStream,
    log: &mut NarrativeLog,
) {
    for (_, person) in state.people.iter_mut() {
        if person.alive {
            person.age += 1.0 / DAYS_PER_YEAR;
        }
    }

    if state.day % 365 != 0 || state.day == 0 {
        return;
    }

    // Snapshot ids first; deaths mutate the arena while we walk the group.
    let ids: Vec<_> = state
        .people
        .iter()
        .filter(|(_, p)| p.alive && p.age > tuning.elderly_age)
        .map(|(id, _)| id)
        .collect();

    for id in ids {
        if !rng.chance(tuning.elderly_death_chance) {
            continue;
        }
        let (name, relation) = {
            let person = state.people.get_mut(id).expect("id from live snapshot");
            person.mark_dead();
            (person.name.clone(), person.relation)
        };
        log.push(state.day, format!("{name} passed away"));
        let close = matches!(
            relation,
            RelationType::Parent | RelationType::Spouse | RelationType::Child
        );
        if close {
            state.happiness -= 25.0;
            state.mental_health -= 15.0;
        } else {
            state.happiness -= 10.0;
            state.mental_health -= 5.0;
        }
        state.social_support -= 5.0;
    }
}

/// Dating can become marriage; marriage can bring a child.
pub fn relationship_progression(
    state: &mut StateRecord,
    tuning: &FamilyTuning,
    rng: &mut RandomStream,
    log: &mut NarrativeLog,
) {
    match state.relationship_status {
        RelationshipStatus::Dating => {
            let p = tuning.marriage_chance * (state.relationship_satisfaction / 50.0);
            if state.relationship_satisfaction > 60.0 && rng.chance(p) {
                state.relationship_status = RelationshipStatus::Married;
                // The partner joins the arena as a spouse
                let partner = random_person(rng, state.age - 4.0, state.age + 4.0, RelationType::Spouse);
                let name = partner.name.clone();
                state.people.insert(partner);
                state.happiness += 30.0;
                state.life_goals_completed += 1;
                log.push(state.day, format!("Married {name}"));
            }
        }
        RelationshipStatus::Married => {
            if rng.chance(tuning.pregnancy_chance) {
                let mut child = random_person(rng, 0.0, 0.0, RelationType::Child);
                child.age = 0.0;
                child.health = 95.0;
                let name = child.name.clone();
                state.people.insert(child);
                let hospital_bill = if state.has_health_insurance { 800.0 } else { 3500.0 };
                state.money -= hospital_bill;
                state.happiness += 30.0;
                state.energy -= 20.0;
                state.life_goals_completed += 1;
                log.push(state.day, format!("Child born: {name}"));
            }
        }
        RelationshipStatus::Single => {}
    }
}

/// Daily relationship-satisfaction drift, with breakup checks at the bottom
/// of the range.
pub fn relationship_drift(
    state: &mut StateRecord,
    tuning: &FamilyTuning,
    rng: &mut RandomStream,
    log: &mut NarrativeLog,
) {
    if state.relationship_status == RelationshipStatus::Single {
        return;
    }

    // Neglect pulls satisfaction down; social support props it up a little.
    let drift = rng.uniform(0.0, 0.8) - state.social_support * 0.003;
    state.relationship_satisfaction -= drift;

    if state.relationship_satisfaction < tuning.breakup_threshold
        && rng.chance(tuning.breakup_chance)
    {
        let was_married = state.relationship_status == RelationshipStatus::Married;
        state.relationship_status = RelationshipStatus::Single;
        state.relationship_satisfaction = 0.0;
        state.happiness -= if was_married { 30.0 } else { 15.0 };
        state.mental_health -= if was_married { 12.0 } else { 5.0 };
        // An ex-spouse stays in the arena as a friend-tier contact
        if let Some(spouse) = state.people.spouse() {
            state.people.reclassify(spouse, RelationType::Friend);
        }
        log.push(
            state.day,
            if was_married { "Divorced" } else { "Relationship ended" },
        );
    }
}

/// Promote one living background NPC into the friend group, if any exist.
/// Returns true when a promotion happened.
pub fn promote_npc_to_friend(
    state: &mut StateRecord,
    rng: &mut RandomStream,
    log: &mut NarrativeLog,
) -> bool {
    let strangers = state.people.alive_with(RelationType::Stranger);
    if strangers.is_empty() {
        return false;
    }
    let pick = *rng.uniform_choice(&strangers);
    state.people.reclassify(pick, RelationType::Friend);
    if let Some(person) = state.people.get_mut(pick) {
        person.relationship_quality += 15.0;
    }
    let name = state.people.get(pick).map(|p| p.name.clone()).unwrap_or_default();
    state.social_support += 4.0;
    log.push(state.day, format!("Became friends with {name}"));
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Tuning;

    fn setup() -> (StateRecord, FamilyTuning, RandomStream, NarrativeLog) {
        let mut rng = RandomStream::seeded(41);
        let mut state = StateRecord::generate(&mut rng);
        let tuning = Tuning::default().family;
        seed_social_world(&mut state, &tuning, &mut rng);
        (state, tuning, rng, NarrativeLog::new())
    }

    #[test]
    fn test_seeding_populates_groups() {
        let (state, tuning, _, _) = setup();
        assert_eq!(state.people.count_alive(RelationType::Parent), 2);
        assert_eq!(state.people.count_alive(RelationType::Friend), tuning.starting_friends);
        assert_eq!(state.people.count_alive(RelationType::Stranger), tuning.starting_npcs);
    }

    #[test]
    fn test_everyone_ages_daily() {
        let (mut state, tuning, mut rng, mut log) = setup();
        state.day = 10; // not a year boundary
        let ages_before: Vec<f32> = state.people.iter().map(|(_, p)| p.age).collect();

        family_daily(&mut state, &tuning, &mut rng, &mut log);
        for ((_, p), before) in state.people.iter().zip(ages_before) {
            assert!(p.age > before);
        }
    }

    #[test]
    fn test_elderly_checks_only_on_year_boundary() {
        let (mut state, mut tuning, mut rng, mut log) = setup();
        tuning.elderly_death_chance = 1.0;
        tuning.elderly_age = 10.0; // everyone qualifies
        state.day = 100;

        family_daily(&mut state, &tuning, &mut rng, &mut log);
        assert!(state.people.iter().all(|(_, p)| p.alive));

        state.day = 365;
        family_daily(&mut state, &tuning, &mut rng, &mut log);
        assert!(state.people.iter().all(|(_, p)| !p.alive));
    }

    #[test]
    fn test_marriage_promotes_status_and_adds_spouse() {
        let (mut state, mut tuning, mut rng, mut log) = setup();
        state.relationship_status = RelationshipStatus::Dating;
        state.relationship_satisfaction = 90.0;
        tuning.marriage_chance = 1.0;

        relationship_progression(&mut state, &tuning, &mut rng, &mut log);
        assert_eq!(state.relationship_status, RelationshipStatus::Married);
        assert!(state.people.spouse().is_some());
        assert_eq!(state.life_goals_completed, 1);
    }

    #[test]
    fn test_birth_adds_child_and_bills() {
        let (mut state, mut tuning, mut rng, mut log) = setup();
        state.relationship_status = RelationshipStatus::Married;
        tuning.pregnancy_chance = 1.0;
        let money_before = state.money;

        relationship_progression(&mut state, &tuning, &mut rng, &mut log);
        assert_eq!(state.living_children(), 1);
        assert_eq!(state.money, money_before - 3500.0);
    }

    #[test]
    fn test_breakup_reclassifies_spouse() {
        let (mut state, mut tuning, mut rng, mut log) = setup();
        state.relationship_status = RelationshipStatus::Married;
        state.people.insert(random_person(&mut rng, 25.0, 30.0, RelationType::Spouse));
        state.relationship_satisfaction = 5.0;
        tuning.breakup_chance = 1.0;

        relationship_drift(&mut state, &tuning, &mut rng, &mut log);
        assert_eq!(state.relationship_status, RelationshipStatus::Single);
        assert!(state.people.spouse().is_none());
    }

    #[test]
    fn test_npc_promotion_moves_relation() {
        let (mut state, _tuning, mut rng, mut log) = setup();
        let strangers_before = state.people.count_alive(RelationType::Stranger);
        let friends_before = state.people.count_alive(RelationType::Friend);
        let total_before = state.people.len();

        assert!(promote_npc_to_friend(&mut state, &mut rng, &mut log));
        assert_eq!(state.people.count_alive(RelationType::Stranger), strangers_before - 1);
        assert_eq!(state.people.count_alive(RelationType::Friend), friends_before + 1);
        // Arena size unchanged: no physical migration
        assert_eq!(state.people.len(), total_before);
    }
}
