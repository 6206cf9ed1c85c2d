//! Normalization of heterogeneous raw results into a uniform record.
//!
//! Inbound data quality from the remote corpus is not uniform: a missing
//! optional field becomes a JSON null in the normalized item, never an error.
//! Ordering matches the aggregated result exactly; no local re-ranking.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::search::paginate::AggregatedResult;
use crate::types::{SearchCriteria, SearchDomain};

/// Uniform result record handed back to the calling agent.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NormalizedItem {
    /// Remote identifier of the document or decision
    pub id: Value,
    /// Title or summary line
    pub title: Value,
    /// Canonical source reference (official Legifrance link when provided)
    pub reference: Value,
    /// Domain-specific extracted sub-fields
    pub fields: Map<String, Value>,
}

/// Map every raw item of `aggregated` into a [`NormalizedItem`].
pub fn normalize(
    domain: SearchDomain,
    criteria: &SearchCriteria,
    aggregated: &AggregatedResult,
) -> Vec<NormalizedItem> {
    aggregated
        .items
        .iter()
        .map(|raw| normalize_item(domain, criteria, raw))
        .collect()
}

fn normalize_item(domain: SearchDomain, criteria: &SearchCriteria, raw: &Value) -> NormalizedItem {
    let id = first_of(raw, &["id", "cid", "num"]);
    let title = first_of(raw, &["title", "titre", "titre_long"]);
    let reference = first_of(raw, &["url", "link", "lien"]);

    let fields = match domain {
        SearchDomain::LegalText | SearchDomain::Code => {
            extract_keys(raw, &["num_article", "num", "texte", "etat", "date", "nature"])
        }
        SearchDomain::CaseLaw => match criteria.juri_keys() {
            // Caller-selected keys only; unknown keys are ignored because the
            // remote schema evolves.
            Some(keys) => {
                let mut fields = Map::new();
                for key in keys {
                    if let Some(value) = raw.get(key.as_str()) {
                        fields.insert(key.clone(), value.clone());
                    }
                }
                fields
            }
            None => extract_keys(
                raw,
                &["juridiction", "formation", "solution", "numero", "date"],
            ),
        },
    };

    NormalizedItem {
        id,
        title,
        reference,
        fields,
    }
}

/// First present key wins; all absent yields null.
fn first_of(raw: &Value, keys: &[&str]) -> Value {
    keys.iter()
        .find_map(|key| raw.get(*key))
        .cloned()
        .unwrap_or(Value::Null)
}

/// Copy the listed keys, nulling the absent ones so every item carries the
/// same shape.
fn extract_keys(raw: &Value, keys: &[&str]) -> Map<String, Value> {
    keys.iter()
        .map(|key| {
            (
                (*key).to_string(),
                raw.get(*key).cloned().unwrap_or(Value::Null),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn aggregate(items: Vec<Value>) -> AggregatedResult {
        AggregatedResult {
            items,
            pages_fetched: 1,
            truncated: false,
            declared_total: None,
        }
    }

    fn code_criteria() -> SearchCriteria {
        SearchCriteria::builder("pacs")
            .code_name("Code civil")
            .validate(SearchDomain::Code)
            .unwrap()
    }

    #[test]
    fn test_missing_optional_fields_become_null() {
        let aggregated = aggregate(vec![json!({"id": "LEGIARTI0001"})]);
        let items = normalize(SearchDomain::Code, &code_criteria(), &aggregated);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, json!("LEGIARTI0001"));
        assert_eq!(items[0].title, Value::Null);
        assert_eq!(items[0].reference, Value::Null);
        assert_eq!(items[0].fields["texte"], Value::Null);
    }

    #[test]
    fn test_french_field_aliases_probed() {
        let aggregated = aggregate(vec![json!({
            "cid": "JURITEXT0002",
            "titre": "Arrêt n° 123",
            "lien": "https://www.legifrance.gouv.fr/juri/id/JURITEXT0002"
        })]);
        let criteria = SearchCriteria::builder("x")
            .validate(SearchDomain::CaseLaw)
            .unwrap();
        let items = normalize(SearchDomain::CaseLaw, &criteria, &aggregated);
        assert_eq!(items[0].id, json!("JURITEXT0002"));
        assert_eq!(items[0].title, json!("Arrêt n° 123"));
        assert!(items[0].reference.as_str().unwrap().contains("legifrance"));
    }

    #[test]
    fn test_juri_key_filter_retains_only_listed_keys() {
        let aggregated = aggregate(vec![json!({
            "id": "J1",
            "solution": "cassation",
            "formation": "chambre sociale",
            "juridiction": "Cour de cassation"
        })]);
        let criteria = SearchCriteria::builder("x")
            .juri_keys(vec!["solution".into(), "cle_inconnue".into()])
            .validate(SearchDomain::CaseLaw)
            .unwrap();
        let items = normalize(SearchDomain::CaseLaw, &criteria, &aggregated);
        assert_eq!(items[0].fields.len(), 1);
        assert_eq!(items[0].fields["solution"], json!("cassation"));
        // Unknown filter key is ignored, not an error.
        assert!(!items[0].fields.contains_key("cle_inconnue"));
    }

    #[test]
    fn test_order_is_stable() {
        let aggregated = aggregate(vec![
            json!({"id": "c"}),
            json!({"id": "a"}),
            json!({"id": "b"}),
        ]);
        let items = normalize(SearchDomain::Code, &code_criteria(), &aggregated);
        let ids: Vec<&str> = items.iter().map(|i| i.id.as_str().unwrap()).collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
    }
}
