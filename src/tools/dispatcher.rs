//! Per-invocation tool dispatch.
//!
//! One call moves through validate → rate-gate → fetch → normalize, and
//! either returns a [`SearchResponse`] or a single typed [`SearchError`].
//! Arguments are rejected before any network traffic; a failure at any later
//! step surfaces as-is, never as a silently partial success.

use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::client::HttpClient;
use crate::config::ApiConfig;
use crate::error::SearchError;
use crate::limiter::RateLimiter;
use crate::search::{NormalizedItem, Paginator, normalize};
use crate::types::{BulletinFlag, CriteriaBuilder, SearchCriteria, SearchDomain};

/// Successful result of one tool invocation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub items: Vec<NormalizedItem>,
    /// True when aggregation stopped at the page cap
    pub truncated: bool,
    pub total_fetched: usize,
}

/// Entry point for tool invocations.
///
/// Holds the shared rate limiter by handle; everything else is per-invocation
/// state. Clone-cheap, safe to share across concurrent invocations.
#[derive(Clone)]
pub struct ToolDispatcher {
    http: HttpClient,
    limiter: Arc<RateLimiter>,
    page_cap: u32,
}

impl ToolDispatcher {
    /// Build a dispatcher from configuration and an injected limiter.
    pub fn new(config: &ApiConfig, limiter: Arc<RateLimiter>) -> Result<Self, SearchError> {
        Ok(Self {
            http: HttpClient::new(config)?,
            limiter,
            page_cap: config.page_cap,
        })
    }

    /// Execute the named tool with raw JSON arguments.
    #[instrument(skip(self, arguments), fields(tool = %tool))]
    pub async fn dispatch(
        &self,
        tool: &str,
        arguments: serde_json::Value,
    ) -> Result<SearchResponse, SearchError> {
        let domain = SearchDomain::from_tool_name(tool).ok_or_else(|| SearchError::UnknownTool {
            name: tool.to_string(),
        })?;

        let criteria = parse_arguments(domain, arguments)?;

        let paginator = Paginator::new(&self.http, &self.limiter, self.page_cap);
        let aggregated = paginator.run(domain, &criteria).await?;

        debug!(
            items = aggregated.items.len(),
            pages = aggregated.pages_fetched,
            truncated = aggregated.truncated,
            "aggregation complete"
        );

        let items = normalize(domain, &criteria, &aggregated);
        Ok(SearchResponse {
            total_fetched: items.len(),
            truncated: aggregated.truncated,
            items,
        })
    }

    /// Like [`dispatch`](Self::dispatch), but folds failure into the
    /// structured error body so protocol glue gets plain JSON either way.
    pub async fn dispatch_value(&self, tool: &str, arguments: serde_json::Value) -> serde_json::Value {
        match self.dispatch(tool, arguments).await {
            Ok(response) => serde_json::to_value(response).unwrap_or_default(),
            Err(err) => serde_json::to_value(err.to_body()).unwrap_or_default(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct LegalTextArgs {
    search: String,
    text_id: Option<String>,
    champ: Option<String>,
    type_recherche: Option<String>,
    page_size: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct CodeArgs {
    search: String,
    code_name: Option<String>,
    champ: Option<String>,
    sort: Option<String>,
    type_recherche: Option<String>,
    page_size: Option<u32>,
    fetch_all: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct CaseLawArgs {
    search: String,
    publication_bulletin: Option<Vec<String>>,
    sort: Option<String>,
    champ: Option<String>,
    type_recherche: Option<String>,
    page_size: Option<u32>,
    fetch_all: Option<bool>,
    juri_keys: Option<Vec<String>>,
    juridiction_judiciaire: Option<Vec<String>>,
}

fn parse_arguments(
    domain: SearchDomain,
    arguments: serde_json::Value,
) -> Result<SearchCriteria, SearchError> {
    let builder = match domain {
        SearchDomain::LegalText => {
            let args: LegalTextArgs = decode(arguments)?;
            let mut builder = CriteriaBuilder::new(args.search);
            if let Some(id) = args.text_id {
                builder = builder.text_id(id);
            }
            builder = apply_common(builder, args.champ, args.type_recherche, args.page_size)?;
            builder
        }
        SearchDomain::Code => {
            let args: CodeArgs = decode(arguments)?;
            let mut builder =
                CriteriaBuilder::new(args.search).fetch_all(args.fetch_all.unwrap_or(false));
            if let Some(name) = args.code_name {
                builder = builder.code_name(name);
            }
            if let Some(sort) = args.sort {
                builder = builder.sort(sort.parse()?);
            }
            builder = apply_common(builder, args.champ, args.type_recherche, args.page_size)?;
            builder
        }
        SearchDomain::CaseLaw => {
            let args: CaseLawArgs = decode(arguments)?;
            let mut builder =
                CriteriaBuilder::new(args.search).fetch_all(args.fetch_all.unwrap_or(false));
            if let Some(flags) = args.publication_bulletin {
                let flags = flags
                    .iter()
                    .map(|f| BulletinFlag::from_str(f))
                    .collect::<Result<Vec<_>, _>>()?;
                builder = builder.publication_bulletin(flags);
            }
            if let Some(sort) = args.sort {
                builder = builder.sort(sort.parse()?);
            }
            if let Some(keys) = args.juri_keys {
                builder = builder.juri_keys(keys);
            }
            if let Some(list) = args.juridiction_judiciaire {
                builder = builder.jurisdictions(list);
            }
            builder = apply_common(builder, args.champ, args.type_recherche, args.page_size)?;
            builder
        }
    };

    builder.validate(domain)
}

fn apply_common(
    mut builder: CriteriaBuilder,
    champ: Option<String>,
    type_recherche: Option<String>,
    page_size: Option<u32>,
) -> Result<CriteriaBuilder, SearchError> {
    if let Some(champ) = champ {
        builder = builder.field(champ.parse()?);
    }
    if let Some(mode) = type_recherche {
        builder = builder.match_mode(mode.parse()?);
    }
    if let Some(size) = page_size {
        builder = builder.page_size(size);
    }
    Ok(builder)
}

fn decode<T: serde::de::DeserializeOwned>(value: serde_json::Value) -> Result<T, SearchError> {
    serde_json::from_value(value).map_err(|e| SearchError::validation("arguments", e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn dispatcher() -> ToolDispatcher {
        // Never contacted in these tests; validation fails first.
        let config = ApiConfig::new("test-key", "http://127.0.0.1:9").unwrap();
        let limiter = Arc::new(RateLimiter::new(100));
        ToolDispatcher::new(&config, limiter).unwrap()
    }

    #[tokio::test]
    async fn test_unknown_tool() {
        let err = dispatcher()
            .dispatch("rechercher_doctrine", json!({"search": "x"}))
            .await
            .unwrap_err();
        assert!(matches!(err, SearchError::UnknownTool { .. }));
    }

    #[tokio::test]
    async fn test_invalid_champ_fails_validation() {
        let err = dispatcher()
            .dispatch(
                "rechercher_jurisprudence_judiciaire",
                json!({"search": "licenciement", "champ": "PAS_UN_CHAMP"}),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, SearchError::Validation { field: "champ", .. }));
    }

    #[tokio::test]
    async fn test_missing_search_is_argument_error() {
        let err = dispatcher()
            .dispatch("rechercher_code", json!({"code_name": "Code civil"}))
            .await
            .unwrap_err();
        assert!(matches!(err, SearchError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_missing_code_name_named() {
        let err = dispatcher()
            .dispatch("rechercher_code", json!({"search": "bail"}))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            SearchError::Validation { field: "code_name", .. }
        ));
    }

    #[tokio::test]
    async fn test_bad_bulletin_flag() {
        let err = dispatcher()
            .dispatch(
                "rechercher_jurisprudence_judiciaire",
                json!({"search": "x", "publication_bulletin": ["X"]}),
            )
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            SearchError::Validation { field: "publication_bulletin", .. }
        ));
    }

    #[tokio::test]
    async fn test_dispatch_value_shapes_error() {
        let value = dispatcher()
            .dispatch_value("rechercher_doctrine", json!({"search": "x"}))
            .await;
        assert_eq!(value["errorKind"], "unknown_tool");
    }
}
