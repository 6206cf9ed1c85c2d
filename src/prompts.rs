//! Predefined prompts for the calling agent.
//!
//! Data only; rendering belongs to the protocol layer.

use serde::Serialize;

/// Name of the sourced legal-research prompt.
pub const LEGAL_EXPERT_PROMPT: &str = "agent_juridique_expert";

/// One message of a predefined prompt.
#[derive(Debug, Clone, Serialize)]
pub struct PromptMessage {
    pub role: &'static str,
    pub text: String,
}

/// The expert legal-research prompt: instructs the agent to search, cite
/// official sources, and reason step by step over the tools in this crate.
pub fn legal_expert_prompt(question: &str) -> Vec<PromptMessage> {
    vec![
        PromptMessage {
            role: "assistant",
            text: "Tu es un agent juridique expert qui cite toujours ses sources dans le corps du texte.\n\
                   Lorsque des références sont citées (article d'un code, numéro de décision de justice), \
                   tu dois systématiquement utiliser les outils à ta disposition pour aller chercher leur contenu et l'analyser.\n\
                   Tu dois :\n\
                   - Expliquer ton raisonnement étape par étape\n\
                   - Utiliser les outils pertinents\n\
                   - Fournir une synthèse claire, sourcée, avec des liens officiels vers les articles."
                .to_string(),
        },
        PromptMessage {
            role: "user",
            text: format!("Voici ma question juridique : {question}"),
        },
    ]
}
