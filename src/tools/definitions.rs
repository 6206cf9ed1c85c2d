//! Protocol-facing tool catalog.
//!
//! Names, parameter names, and enum values are the remote API's vocabulary
//! and must not be translated; a calling agent addresses the tools by these
//! exact strings.

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::types::SearchDomain;

/// A tool definition as handed to the protocol layer's `list_tools`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub input_schema: serde_json::Value,
}

impl ToolDefinition {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        input_schema: serde_json::Value,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            input_schema,
        }
    }
}

/// The three search tools, in a fixed order.
pub fn tool_definitions() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition::new(
            SearchDomain::LegalText.tool_name(),
            "Recherche un article dans un texte légal (loi, ordonnance, décret, arrêté) \
             par numéro de texte et numéro d'article, ou par mots-clés dans une loi précise. \
             Exemple: article 7 de la loi 78-17 -> {text_id: \"78-17\", search: \"7\", champ: \"NUM_ARTICLE\"}",
            json!({
                "type": "object",
                "properties": {
                    "search": {"type": "string"},
                    "text_id": {"type": "string"},
                    "champ": {"type": "string", "enum": ["ALL", "TITLE", "TABLE", "NUM_ARTICLE", "ARTICLE"]},
                    "type_recherche": {"type": "string", "enum": ["TOUS_LES_MOTS_DANS_UN_CHAMP", "EXPRESSION_EXACTE", "AU_MOINS_UN_MOT"]},
                    "page_size": {"type": "integer", "maximum": 100}
                },
                "required": ["search"]
            }),
        ),
        ToolDefinition::new(
            SearchDomain::Code.tool_name(),
            "Recherche des articles juridiques dans les codes de loi français. \
             Exemple: le PACS dans le Code civil -> {search: \"pacte civil de solidarité\", code_name: \"Code civil\"}",
            json!({
                "type": "object",
                "properties": {
                    "search": {"type": "string"},
                    "code_name": {"type": "string"},
                    "champ": {"type": "string", "enum": ["ALL", "TITLE", "TABLE", "NUM_ARTICLE", "ARTICLE"]},
                    "sort": {"type": "string", "enum": ["PERTINENCE", "DATE_ASC", "DATE_DESC"]},
                    "type_recherche": {"type": "string", "enum": ["TOUS_LES_MOTS_DANS_UN_CHAMP", "EXPRESSION_EXACTE", "AU_MOINS_UN_MOT"]},
                    "page_size": {"type": "integer", "maximum": 100},
                    "fetch_all": {"type": "boolean"}
                },
                "required": ["search", "code_name"]
            }),
        ),
        ToolDefinition::new(
            SearchDomain::CaseLaw.tool_name(),
            "Recherche des jurisprudences judiciaires dans la base JURI de Legifrance \
             (termes ou numéros d'affaires, filtre bulletin, juridictions).",
            json!({
                "type": "object",
                "properties": {
                    "search": {"type": "string"},
                    "publication_bulletin": {"type": "array", "items": {"type": "string", "enum": ["T", "F"]}},
                    "sort": {"type": "string", "enum": ["PERTINENCE", "DATE_DESC", "DATE_ASC"]},
                    "champ": {"type": "string", "enum": ["ALL", "TITLE", "ABSTRATS", "TEXTE", "RESUMES", "NUM_AFFAIRE"]},
                    "type_recherche": {"type": "string", "enum": ["TOUS_LES_MOTS_DANS_UN_CHAMP", "EXPRESSION_EXACTE", "AU_MOINS_UN_MOT"]},
                    "page_size": {"type": "integer", "maximum": 100},
                    "fetch_all": {"type": "boolean"},
                    "juri_keys": {"type": "array", "items": {"type": "string"}},
                    "juridiction_judiciaire": {"type": "array", "items": {"type": "string"}}
                },
                "required": ["search"]
            }),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_has_three_tools() {
        let defs = tool_definitions();
        assert_eq!(defs.len(), 3);
        let names: Vec<&str> = defs.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "rechercher_dans_texte_legal",
                "rechercher_code",
                "rechercher_jurisprudence_judiciaire"
            ]
        );
    }

    #[test]
    fn test_every_definition_names_a_resolvable_domain() {
        for def in tool_definitions() {
            assert!(SearchDomain::from_tool_name(&def.name).is_some());
        }
    }

    #[test]
    fn test_schemas_are_objects_requiring_search() {
        for def in tool_definitions() {
            assert_eq!(def.input_schema["type"], "object");
            let required = def.input_schema["required"].as_array().unwrap();
            assert!(required.contains(&serde_json::json!("search")));
        }
    }
}
