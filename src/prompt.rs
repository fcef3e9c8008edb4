//! Natural-language prompt builder.
//!
//! Composes the instruction strings sent to the text backend: a full-religion
//! prompt embedding the request parameters and the target JSON schema, and
//! narrower per-component prompts for deity / ritual / legend generation.

use crate::types::{ComponentType, GenerateRequest};
use tracing::debug;

/// Fixed system instruction describing the required output shape.
pub const SYSTEM_INSTRUCTION: &str = "You are a creative religion designer. \
You invent coherent fictional belief systems. Always answer with a single \
JSON object matching the requested schema, with no prose before or after it.";

/// JSON skeleton the backend must fill in for a full religion.
const RELIGION_SCHEMA: &str = r#"{
    "name": "Religion name",
    "description": "General description of the religion",
    "deity_type": "monotheistic|polytheistic|pantheistic|animistic",
    "language": "Output language",
    "deities": [
        {
            "name": "Deity name",
            "title": "Title",
            "domain": "Power domain",
            "description": "Description",
            "attributes": ["attribute1", "attribute2"],
            "symbols": ["symbol1", "symbol2"]
        }
    ],
    "sacred_texts": [
        {
            "title": "Sacred text name",
            "content": "Content summary",
            "chapters": ["chapter1", "chapter2"],
            "language": "Language",
            "origin_story": "How it was created"
        }
    ],
    "rituals": [
        {
            "name": "Ritual name",
            "purpose": "Purpose",
            "frequency": "Frequency",
            "participants": "Participants",
            "steps": ["step1", "step2"],
            "materials_needed": ["material1", "material2"],
            "significance": "Significance"
        }
    ],
    "moral_rules": [
        {
            "rule": "Rule",
            "description": "Description",
            "severity": "Light|Medium|Heavy",
            "punishment": "Punishment",
            "reward": "Reward"
        }
    ],
    "legends": [
        {
            "title": "Legend name",
            "story": "Story",
            "characters": ["character1", "character2"],
            "moral_lesson": "Moral lesson",
            "cultural_impact": "Cultural impact"
        }
    ],
    "reward_punishment": {
        "rewards": ["reward1", "reward2"],
        "punishments": ["punishment1", "punishment2"],
        "afterlife_concept": "Afterlife concept",
        "judgment_criteria": ["criterion1", "criterion2"]
    },
    "symbols": [
        {
            "name": "Symbol name",
            "meaning": "Meaning",
            "visual_description": "Visual description",
            "usage_context": "Usage context"
        }
    ],
    "core_beliefs": ["belief1", "belief2"],
    "practices": ["practice1", "practice2"],
    "holy_places": ["holy place1", "holy place2"],
    "religious_leaders": "Role of religious leaders",
    "creation_myth": "Creation myth"
}"#;

/// All-content-in-language directives for the languages the service ships
/// with. Anything else gets a generic English directive with the language
/// spliced in (passthrough, not validation).
const LANGUAGE_INSTRUCTIONS: &[(&str, &str)] = &[
    (
        "Turkish",
        "TÜM İÇERİĞİ TÜRKÇE OLARAK ÜRET. Din adı, açıklamalar, tanrı isimleri, ritüeller, efsaneler - her şey Türkçe olsun.",
    ),
    (
        "English",
        "GENERATE ALL CONTENT IN ENGLISH. Religion name, descriptions, deity names, rituals, legends - everything should be in English.",
    ),
    (
        "Spanish",
        "GENERA TODO EL CONTENIDO EN ESPAÑOL. Nombre de la religión, descripciones, nombres de deidades, rituales, leyendas - todo debe estar en español.",
    ),
    (
        "French",
        "GÉNÉREZ TOUT LE CONTENU EN FRANÇAIS. Nom de la religion, descriptions, noms des divinités, rituels, légendes - tout doit être en français.",
    ),
    (
        "German",
        "GENERIEREN SIE ALLE INHALTE AUF DEUTSCH. Religionsname, Beschreibungen, Gottheitsnamen, Rituale, Legenden - alles sollte auf Deutsch sein.",
    ),
    (
        "Italian",
        "GENERA TUTTO IL CONTENUTO IN ITALIANO. Nome della religione, descrizioni, nomi delle divinità, rituali, leggende - tutto dovrebbe essere in italiano.",
    ),
    (
        "Portuguese",
        "GERE TODO O CONTEÚDO EM PORTUGUÊS. Nome da religião, descrições, nomes das divindades, rituais, lendas - tudo deve estar em português.",
    ),
    (
        "Russian",
        "СОЗДАЙТЕ ВЕСЬ КОНТЕНТ НА РУССКОМ ЯЗЫКЕ. Название религии, описания, имена божеств, ритуалы, легенды - все должно быть на русском языке.",
    ),
    (
        "Arabic",
        "أنشئ كل المحتوى باللغة العربية. اسم الدين، الأوصاف، أسماء الآلهة، الطقوس، الأساطير - كل شيء يجب أن يكون باللغة العربية.",
    ),
    (
        "Japanese",
        "すべてのコンテンツを日本語で生成してください。宗教名、説明、神々の名前、儀式、伝説 - すべて日本語である必要があります。",
    ),
    (
        "Chinese",
        "用中文生成所有内容。宗教名称、描述、神祇名称、仪式、传说 - 一切都应该是中文。",
    ),
];

/// Directive forcing all generated content into the target language.
fn language_instruction(language: &str) -> String {
    LANGUAGE_INSTRUCTIONS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(language))
        .map(|(_, text)| (*text).to_string())
        .unwrap_or_else(|| format!("GENERATE ALL CONTENT IN {}.", language.to_uppercase()))
}

/// Map complexity to a level-of-detail directive. Unrecognized values pass
/// through verbatim so callers can experiment with free-text complexities.
fn complexity_instruction(complexity: &str) -> String {
    match complexity.trim().to_lowercase().as_str() {
        "simple" => {
            "Keep it simple: 1-2 deities, 2-3 rituals, a handful of moral rules.".to_string()
        }
        "medium" => {
            "Moderate detail: 3-5 deities, 4-6 rituals, a developed moral code.".to_string()
        }
        "complex" => "Rich detail: 6 or more deities, 8 or more rituals, an intricate \
                      cosmology with interlocking legends."
            .to_string(),
        other => format!("Level of detail: {other}."),
    }
}

/// Build the full-religion generation prompt.
pub fn build_religion_prompt(request: &GenerateRequest) -> String {
    let theme = request.theme.as_deref().unwrap_or("general");
    let culture = request.culture.as_deref().unwrap_or("universal");
    let deity_type = request.deity_type.as_deref().unwrap_or("polytheistic");
    let language = &request.language;

    let mut prompt = String::with_capacity(4096);
    prompt.push_str("Create a detailed religion system according to the following criteria:\n\n");
    prompt.push_str(&format!("Theme: {theme}\n"));
    prompt.push_str(&format!("Culture: {culture}\n"));
    prompt.push_str(&format!("Complexity: {}\n", request.complexity));
    prompt.push_str(&format!("Deity Type: {deity_type}\n"));
    prompt.push_str(&format!("Language: {language}\n\n"));

    prompt.push_str(&language_instruction(language));
    prompt.push_str("\n\n");
    prompt.push_str(&complexity_instruction(&request.complexity));
    prompt.push_str("\n\n");

    prompt.push_str("Please create a religion system in the following JSON format:\n\n");
    prompt.push_str(RELIGION_SCHEMA);
    prompt.push_str("\n\n");

    prompt.push_str(&format!(
        "IMPORTANT: Set the deity_type field to \"{deity_type}\" exactly. \
         Create a deity system that matches this parameter.\n\n"
    ));
    prompt.push_str("- monotheistic: Single deity (example: Christianity, Islam)\n");
    prompt.push_str("- polytheistic: Multiple deities (example: Ancient Greek, Norse mythology)\n");
    prompt.push_str("- pantheistic: God=Universe (example: Spinoza's philosophy)\n");
    prompt
        .push_str("- animistic: Everything has a spirit (example: Shamanism, indigenous religions)\n\n");
    prompt.push_str(
        "Please create a creative and detailed religion system. Fill every section \
         and create a consistent mythology.",
    );

    debug!("Religion prompt: {} chars", prompt.len());
    prompt
}

/// Build a narrower prompt for a single component.
pub fn build_component_prompt(component_type: ComponentType, context: &str) -> String {
    let (task, schema) = match component_type {
        ComponentType::Deity => (
            "Design a creative deity/goddess.",
            r#"{
    "name": "Deity name",
    "title": "Title",
    "domain": "Power domain",
    "description": "Description",
    "attributes": ["attribute1", "attribute2"],
    "symbols": ["symbol1", "symbol2"]
}"#,
        ),
        ComponentType::Ritual => (
            "Design a detailed religious ritual.",
            r#"{
    "name": "Ritual name",
    "purpose": "Purpose",
    "frequency": "Frequency",
    "participants": "Participants",
    "steps": ["step1", "step2"],
    "materials_needed": ["material1", "material2"],
    "significance": "Significance"
}"#,
        ),
        ComponentType::Legend => (
            "Write a mythological legend.",
            r#"{
    "title": "Legend name",
    "story": "Story",
    "characters": ["character1", "character2"],
    "moral_lesson": "Moral lesson",
    "cultural_impact": "Cultural impact"
}"#,
        ),
    };

    let mut prompt = String::with_capacity(1024);
    prompt.push_str(task);
    if !context.trim().is_empty() {
        prompt.push(' ');
        prompt.push_str(context.trim());
    }
    prompt.push_str("\n\nIn JSON format:\n");
    prompt.push_str(schema);

    debug!(
        "Component prompt ({}): {} chars",
        component_type,
        prompt.len()
    );
    prompt
}
