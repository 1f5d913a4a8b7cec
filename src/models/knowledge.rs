// src/models/knowledge.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Represents the 'planets' table in the database.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Planet {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub planet_type: String,
    pub distance_from_earth: String,
}

/// Represents the 'missions' table in the database.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Mission {
    pub id: i64,
    pub name: String,
    pub agency: String,
    pub mission_date: Option<chrono::NaiveDate>,
    pub objective: String,
    pub description: String,
}

/// Read-only reference data the chat assistant interpolates into replies.
/// Loaded once and cached; stale data is acceptable.
#[derive(Debug, Clone, Default)]
pub struct KnowledgeBase {
    pub planets: Vec<Planet>,
    pub missions: Vec<Mission>,
}

impl KnowledgeBase {
    pub fn find_planet(&self, name: &str) -> Option<&Planet> {
        self.planets
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
    }

    pub fn find_mission_containing(&self, fragment: &str) -> Option<&Mission> {
        let fragment = fragment.to_lowercase();
        self.missions
            .iter()
            .find(|m| m.name.to_lowercase().contains(&fragment))
    }

    pub fn missions_by_agency(&self, agency: &str) -> Vec<&Mission> {
        self.missions.iter().filter(|m| m.agency == agency).collect()
    }
}
