//! Generation pipeline: prompt -> backend -> JSON extraction -> assembly.

use crate::assemble;
use crate::backend::{extract, TextBackend};
use crate::error::ApiError;
use crate::prompt;
use crate::types::*;
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, warn};

/// Cultures cycled through when producing variations on a theme.
const VARIATION_CULTURES: &[&str] = &["ancient", "modern", "fantasy", "futuristic", "tribal"];

/// Complexities cycled through when producing variations.
const VARIATION_COMPLEXITIES: &[&str] = &["simple", "medium", "complex"];

/// Orchestrates religion and component generation against a text backend.
pub struct ReligionGenerator {
    backend: Arc<dyn TextBackend>,
    default_language: String,
}

impl ReligionGenerator {
    pub fn new(backend: Arc<dyn TextBackend>, default_language: &str) -> Self {
        Self {
            backend,
            default_language: default_language.to_string(),
        }
    }

    /// Generate a full religion from request parameters.
    pub async fn generate(&self, request: &GenerateRequest) -> Result<Religion, ApiError> {
        let user_prompt = prompt::build_religion_prompt(request);
        let text = self
            .backend
            .complete(prompt::SYSTEM_INSTRUCTION, &user_prompt)
            .await?;
        let raw = extract::extract_json_object(&text)?;
        let religion = assemble::assemble_religion(&raw, request)?;
        info!("Generated religion: {}", religion.name);
        Ok(religion)
    }

    /// Generate a single component. When an existing religion is supplied its
    /// name and core beliefs are spliced into the context for consistency.
    pub async fn generate_component(
        &self,
        component_type: ComponentType,
        context: &str,
        existing: Option<&Religion>,
    ) -> Result<Value, ApiError> {
        let mut context = context.to_string();
        if let Some(religion) = existing {
            context.push_str(&format!(" Existing religion: {}.", religion.name));
            if !religion.core_beliefs.is_empty() {
                context.push_str(&format!(
                    " Core beliefs: {}",
                    religion.core_beliefs.join(", ")
                ));
            }
        }

        let user_prompt = prompt::build_component_prompt(component_type, &context);
        let text = self
            .backend
            .complete(prompt::SYSTEM_INSTRUCTION, &user_prompt)
            .await?;
        let raw = extract::extract_json_object(&text)?;
        assemble::assemble_component(&raw)
    }

    /// Generate `count` variations on a shared theme, cycling culture and
    /// complexity per variation. Individual failures are logged and skipped;
    /// the surviving variations are returned in order.
    pub async fn variations(&self, base_theme: &str, count: u32) -> Vec<Religion> {
        let mut results = Vec::new();
        for i in 0..count as usize {
            let request = GenerateRequest {
                theme: Some(base_theme.to_string()),
                culture: Some(VARIATION_CULTURES[i % VARIATION_CULTURES.len()].to_string()),
                complexity: VARIATION_COMPLEXITIES[i % VARIATION_COMPLEXITIES.len()].to_string(),
                deity_type: None,
                language: self.default_language.clone(),
            };
            match self.generate(&request).await {
                Ok(religion) => results.push(religion),
                Err(e) => warn!("Variation {} of '{}' failed: {}", i + 1, base_theme, e),
            }
        }
        results
    }

    /// Generate one additional component and append it to the matching list
    /// field. Exactly one element is added; everything else stays untouched.
    pub async fn expand(
        &self,
        mut religion: Religion,
        component_type: ComponentType,
    ) -> Result<Religion, ApiError> {
        let context = format!("Create a fitting {component_type} for this religion.");
        let raw = self
            .generate_component(component_type, &context, Some(&religion))
            .await?;

        match component_type {
            ComponentType::Deity => religion.deities.push(assemble::assemble_deity(&raw)),
            ComponentType::Ritual => religion.rituals.push(assemble::assemble_ritual(&raw)),
            ComponentType::Legend => religion.legends.push(assemble::assemble_legend(&raw)),
        }

        info!("Expanded '{}' with a new {}", religion.name, component_type);
        Ok(religion)
    }
}
