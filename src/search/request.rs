//! Wire request construction.
//!
//! Pure mapping from validated criteria to the parameter names and shape each
//! domain's endpoint expects. Fields irrelevant to a domain are dropped
//! silently; `None` values never reach the wire (serde skips them, the typed
//! equivalent of the original service stripping nulls before posting).

use serde::Serialize;

use crate::error::SearchError;
use crate::types::{BulletinFlag, FieldSelector, MatchMode, SearchCriteria, SearchDomain, SortOrder};

/// One ready-to-send search request: endpoint path plus JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct WireRequest {
    pub endpoint: &'static str,
    pub body: serde_json::Value,
}

impl WireRequest {
    /// Return a copy of this request targeting page `page` (1-based).
    ///
    /// Page 1 carries no explicit cursor, matching what a single-page request
    /// sends.
    pub fn for_page(&self, page: u32) -> Self {
        let mut body = self.body.clone();
        if page > 1
            && let Some(obj) = body.as_object_mut()
        {
            obj.insert("page".into(), serde_json::json!(page));
        }
        Self {
            endpoint: self.endpoint,
            body,
        }
    }
}

#[derive(Serialize)]
struct LegalTextBody<'a> {
    search: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    text_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    champ: Option<FieldSelector>,
    #[serde(skip_serializing_if = "Option::is_none")]
    type_recherche: Option<MatchMode>,
    page_size: u32,
}

#[derive(Serialize)]
struct CodeBody<'a> {
    search: &'a str,
    code_name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    champ: Option<FieldSelector>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sort: Option<SortOrder>,
    #[serde(skip_serializing_if = "Option::is_none")]
    type_recherche: Option<MatchMode>,
    page_size: u32,
}

#[derive(Serialize)]
struct CaseLawBody<'a> {
    search: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    publication_bulletin: Option<&'a [BulletinFlag]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sort: Option<SortOrder>,
    #[serde(skip_serializing_if = "Option::is_none")]
    champ: Option<FieldSelector>,
    #[serde(skip_serializing_if = "Option::is_none")]
    type_recherche: Option<MatchMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    juridiction_judiciaire: Option<&'a [String]>,
    page_size: u32,
}

/// Map validated criteria onto the wire shape of `domain`.
///
/// Deterministic: equal inputs always produce an identical request. Fails
/// with a validation error (never a network call) if the criteria violate the
/// domain's rules, e.g. a selector from another domain's vocabulary.
pub fn build(domain: SearchDomain, criteria: &SearchCriteria) -> Result<WireRequest, SearchError> {
    criteria.ensure_valid_for(domain)?;

    let body = match domain {
        SearchDomain::LegalText => serde_json::to_value(LegalTextBody {
            search: criteria.search(),
            text_id: criteria.text_id(),
            champ: criteria.field(),
            type_recherche: criteria.match_mode(),
            page_size: criteria.page_size(),
        }),
        SearchDomain::Code => serde_json::to_value(CodeBody {
            search: criteria.search(),
            // ensure_valid_for guarantees presence
            code_name: criteria.code_name().unwrap_or_default(),
            champ: criteria.field(),
            sort: criteria.sort(),
            type_recherche: criteria.match_mode(),
            page_size: criteria.page_size(),
        }),
        SearchDomain::CaseLaw => serde_json::to_value(CaseLawBody {
            search: criteria.search(),
            publication_bulletin: criteria.publication_bulletin(),
            sort: criteria.sort(),
            champ: criteria.field(),
            type_recherche: criteria.match_mode(),
            juridiction_judiciaire: criteria.jurisdictions(),
            page_size: criteria.page_size(),
        }),
    }
    .map_err(|e| SearchError::validation("arguments", e.to_string()))?;

    Ok(WireRequest {
        endpoint: domain.endpoint(),
        body,
    })
}
