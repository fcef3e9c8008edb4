//! Religion assembler: parsed backend JSON -> fully-populated `Religion`.
//!
//! Missing list fields become empty sequences and missing scalars become
//! empty strings; the only hard failure is a value that is not an object at
//! all. A half-filled deity or ritual never aborts assembly.

use crate::error::ApiError;
use crate::types::*;
use serde_json::Value;

/// Assemble a full `Religion` from parsed backend output, falling back to the
/// originating request for deity type and language.
pub fn assemble_religion(raw: &Value, request: &GenerateRequest) -> Result<Religion, ApiError> {
    let obj = raw
        .as_object()
        .ok_or_else(|| ApiError::Schema("religion payload is not a JSON object".into()))?;

    let requested_deity_type = request
        .deity_type
        .as_deref()
        .and_then(DeityType::parse)
        .unwrap_or_default();
    let deity_type = obj
        .get("deity_type")
        .and_then(Value::as_str)
        .and_then(DeityType::parse)
        .unwrap_or(requested_deity_type);

    let language = obj
        .get("language")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .unwrap_or(&request.language)
        .to_string();

    Ok(Religion {
        name: string_field(raw, "name", "Unnamed Religion"),
        description: string_field(raw, "description", ""),
        deity_type,
        language,
        deities: list_field(raw, "deities", assemble_deity),
        sacred_texts: list_field(raw, "sacred_texts", assemble_sacred_text),
        rituals: list_field(raw, "rituals", assemble_ritual),
        moral_rules: list_field(raw, "moral_rules", assemble_moral_rule),
        legends: list_field(raw, "legends", assemble_legend),
        reward_punishment: assemble_reward_punishment(raw.get("reward_punishment")),
        symbols: list_field(raw, "symbols", assemble_symbol),
        core_beliefs: string_list(raw, "core_beliefs"),
        practices: string_list(raw, "practices"),
        holy_places: string_list(raw, "holy_places"),
        religious_leaders: string_field(raw, "religious_leaders", ""),
        creation_myth: string_field(raw, "creation_myth", ""),
    })
}

/// Assemble a single component of the given type, validating only that the
/// value is an object.
pub fn assemble_component(raw: &Value) -> Result<Value, ApiError> {
    if !raw.is_object() {
        return Err(ApiError::Schema("component payload is not a JSON object".into()));
    }
    Ok(raw.clone())
}

// -- Per-record assembly ------------------------------------------------------

pub fn assemble_deity(raw: &Value) -> Deity {
    Deity {
        name: string_field(raw, "name", ""),
        title: string_field(raw, "title", ""),
        domain: string_field(raw, "domain", ""),
        description: string_field(raw, "description", ""),
        attributes: string_list(raw, "attributes"),
        symbols: string_list(raw, "symbols"),
    }
}

pub fn assemble_sacred_text(raw: &Value) -> SacredText {
    SacredText {
        title: string_field(raw, "title", ""),
        content: string_field(raw, "content", ""),
        chapters: string_list(raw, "chapters"),
        language: string_field(raw, "language", ""),
        origin_story: string_field(raw, "origin_story", ""),
    }
}

pub fn assemble_ritual(raw: &Value) -> Ritual {
    Ritual {
        name: string_field(raw, "name", ""),
        purpose: string_field(raw, "purpose", ""),
        frequency: string_field(raw, "frequency", ""),
        participants: string_field(raw, "participants", ""),
        steps: string_list(raw, "steps"),
        materials_needed: string_list(raw, "materials_needed"),
        significance: string_field(raw, "significance", ""),
    }
}

pub fn assemble_moral_rule(raw: &Value) -> MoralRule {
    MoralRule {
        rule: string_field(raw, "rule", ""),
        description: string_field(raw, "description", ""),
        severity: string_field(raw, "severity", ""),
        punishment: string_field(raw, "punishment", ""),
        reward: string_field(raw, "reward", ""),
    }
}

pub fn assemble_legend(raw: &Value) -> Legend {
    Legend {
        title: string_field(raw, "title", ""),
        story: string_field(raw, "story", ""),
        characters: string_list(raw, "characters"),
        moral_lesson: string_field(raw, "moral_lesson", ""),
        cultural_impact: string_field(raw, "cultural_impact", ""),
    }
}

fn assemble_reward_punishment(raw: Option<&Value>) -> RewardPunishment {
    let raw = match raw {
        Some(v) => v,
        None => return RewardPunishment::default(),
    };
    RewardPunishment {
        rewards: string_list(raw, "rewards"),
        punishments: string_list(raw, "punishments"),
        afterlife_concept: string_field(raw, "afterlife_concept", ""),
        judgment_criteria: string_list(raw, "judgment_criteria"),
    }
}

pub fn assemble_symbol(raw: &Value) -> Symbol {
    Symbol {
        name: string_field(raw, "name", ""),
        meaning: string_field(raw, "meaning", ""),
        visual_description: string_field(raw, "visual_description", ""),
        usage_context: string_field(raw, "usage_context", ""),
    }
}

// -- Field helpers ------------------------------------------------------------

fn string_field(raw: &Value, key: &str, default: &str) -> String {
    raw.get(key)
        .and_then(Value::as_str)
        .unwrap_or(default)
        .to_string()
}

fn string_list(raw: &Value, key: &str) -> Vec<String> {
    raw.get(key)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(String::from)
                .collect()
        })
        .unwrap_or_default()
}

fn list_field<T>(raw: &Value, key: &str, assemble: fn(&Value) -> T) -> Vec<T> {
    raw.get(key)
        .and_then(Value::as_array)
        .map(|items| items.iter().filter(|v| v.is_object()).map(assemble).collect())
        .unwrap_or_default()
}
