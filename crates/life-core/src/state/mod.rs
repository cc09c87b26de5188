//! Simulation state: the agent's own record and the people around them.

pub mod person;
pub mod record;

pub use person::{People, PersonId, PersonRecord, RelationType};
pub use record::{
    CauseOfEnd, ChronicCondition, Crime, Gender, Personality, RelationshipStatus, StateRecord,
    TransportMode, DAYS_PER_YEAR,
};
