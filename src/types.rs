//! Shared types: the religion document schema and API request/response bodies.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Deity typology
// ---------------------------------------------------------------------------

/// How the religion structures the divine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeityType {
    /// Single deity.
    Monotheistic,
    /// Multiple deities.
    Polytheistic,
    /// God is the universe.
    Pantheistic,
    /// Everything has a spirit.
    Animistic,
}

impl fmt::Display for DeityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Monotheistic => write!(f, "monotheistic"),
            Self::Polytheistic => write!(f, "polytheistic"),
            Self::Pantheistic => write!(f, "pantheistic"),
            Self::Animistic => write!(f, "animistic"),
        }
    }
}

impl Default for DeityType {
    fn default() -> Self {
        Self::Polytheistic
    }
}

impl DeityType {
    /// Parse a backend-supplied string. Returns `None` on anything
    /// unrecognized so the assembler can apply its own fallback.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "monotheistic" => Some(Self::Monotheistic),
            "polytheistic" => Some(Self::Polytheistic),
            "pantheistic" => Some(Self::Pantheistic),
            "animistic" => Some(Self::Animistic),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Religion document tree
// ---------------------------------------------------------------------------

/// A god or goddess of the pantheon.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Deity {
    pub name: String,
    pub title: String,
    /// Power domain (war, wisdom, nature, ...).
    pub domain: String,
    pub description: String,
    #[serde(default)]
    pub attributes: Vec<String>,
    #[serde(default)]
    pub symbols: Vec<String>,
}

/// A holy book or scripture.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SacredText {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub chapters: Vec<String>,
    pub language: String,
    /// How the text came to exist.
    pub origin_story: String,
}

/// A recurring religious ceremony.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ritual {
    pub name: String,
    pub purpose: String,
    pub frequency: String,
    pub participants: String,
    #[serde(default)]
    pub steps: Vec<String>,
    #[serde(default)]
    pub materials_needed: Vec<String>,
    pub significance: String,
}

/// A commandment with its consequences.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MoralRule {
    pub rule: String,
    pub description: String,
    /// Light, medium or heavy.
    pub severity: String,
    pub punishment: String,
    pub reward: String,
}

/// A mythological story carried by the faith.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Legend {
    pub title: String,
    pub story: String,
    #[serde(default)]
    pub characters: Vec<String>,
    pub moral_lesson: String,
    pub cultural_impact: String,
}

/// The afterlife accounting of the faith.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RewardPunishment {
    #[serde(default)]
    pub rewards: Vec<String>,
    #[serde(default)]
    pub punishments: Vec<String>,
    pub afterlife_concept: String,
    #[serde(default)]
    pub judgment_criteria: Vec<String>,
}

/// A sacred emblem.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Symbol {
    pub name: String,
    pub meaning: String,
    pub visual_description: String,
    pub usage_context: String,
}

/// The full religion document. Self-contained tree: every list field is
/// always present (possibly empty), every scalar defaults to an empty string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Religion {
    pub name: String,
    pub description: String,
    pub deity_type: DeityType,
    /// Language the content was generated in.
    pub language: String,
    #[serde(default)]
    pub deities: Vec<Deity>,
    #[serde(default)]
    pub sacred_texts: Vec<SacredText>,
    #[serde(default)]
    pub rituals: Vec<Ritual>,
    #[serde(default)]
    pub moral_rules: Vec<MoralRule>,
    #[serde(default)]
    pub legends: Vec<Legend>,
    #[serde(default)]
    pub reward_punishment: RewardPunishment,
    #[serde(default)]
    pub symbols: Vec<Symbol>,
    #[serde(default)]
    pub core_beliefs: Vec<String>,
    #[serde(default)]
    pub practices: Vec<String>,
    #[serde(default)]
    pub holy_places: Vec<String>,
    pub religious_leaders: String,
    pub creation_myth: String,
}

// ---------------------------------------------------------------------------
// Components
// ---------------------------------------------------------------------------

/// A religion sub-part that can be generated or appended on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentType {
    Deity,
    Ritual,
    Legend,
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Deity => write!(f, "deity"),
            Self::Ritual => write!(f, "ritual"),
            Self::Legend => write!(f, "legend"),
        }
    }
}

impl ComponentType {
    /// Parse a user-supplied component type string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "deity" => Some(Self::Deity),
            "ritual" => Some(Self::Ritual),
            "legend" => Some(Self::Legend),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// API request bodies
// ---------------------------------------------------------------------------

/// Parameters for a full religion generation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerateRequest {
    #[serde(default)]
    pub theme: Option<String>,
    #[serde(default)]
    pub culture: Option<String>,
    #[serde(default = "default_complexity")]
    pub complexity: String,
    #[serde(default)]
    pub deity_type: Option<String>,
    #[serde(default = "default_language")]
    pub language: String,
}

fn default_complexity() -> String {
    "medium".into()
}

fn default_language() -> String {
    "Turkish".into()
}

/// Parameters for a standalone component generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentRequest {
    pub component_type: String,
    #[serde(default)]
    pub context: String,
    #[serde(default)]
    pub religion_id: Option<String>,
}

/// Parameters for batch variations on a shared theme.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariationRequest {
    pub base_theme: String,
    #[serde(default = "default_variation_count")]
    pub count: u32,
}

fn default_variation_count() -> u32 {
    3
}

// ---------------------------------------------------------------------------
// Stored records
// ---------------------------------------------------------------------------

/// A religion as held by the in-memory store and returned to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredReligion {
    pub id: String,
    pub religion: Religion,
    pub created_at: DateTime<Utc>,
    /// Wall-clock seconds the backend call took.
    pub generation_time: f64,
}

/// One row of the `GET /religions` listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReligionSummary {
    pub id: String,
    pub name: String,
    pub description: String,
    pub deity_type: DeityType,
    pub created_at: DateTime<Utc>,
    pub generation_time: f64,
}

impl From<&StoredReligion> for ReligionSummary {
    fn from(stored: &StoredReligion) -> Self {
        Self {
            id: stored.id.clone(),
            name: stored.religion.name.clone(),
            description: stored.religion.description.clone(),
            deity_type: stored.religion.deity_type,
            created_at: stored.created_at,
            generation_time: stored.generation_time,
        }
    }
}
