//! Validated search criteria.
//!
//! A [`SearchCriteria`] is built once per tool invocation via
//! [`CriteriaBuilder::validate`] and is immutable afterwards; nothing past
//! that point can produce an invalid combination, so the request builder and
//! paginator work from a trusted value object.

use crate::error::SearchError;
use crate::types::domain::{BulletinFlag, FieldSelector, MatchMode, SearchDomain, SortOrder};

/// Hard ceiling on `page_size`, regardless of caller input.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Page size used when the caller does not supply one.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Immutable, validated arguments of one search invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchCriteria {
    search: String,
    text_id: Option<String>,
    code_name: Option<String>,
    field: Option<FieldSelector>,
    match_mode: Option<MatchMode>,
    sort: Option<SortOrder>,
    page_size: u32,
    fetch_all: bool,
    publication_bulletin: Option<Vec<BulletinFlag>>,
    juri_keys: Option<Vec<String>>,
    jurisdictions: Option<Vec<String>>,
}

impl SearchCriteria {
    pub fn builder(search: impl Into<String>) -> CriteriaBuilder {
        CriteriaBuilder::new(search)
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn text_id(&self) -> Option<&str> {
        self.text_id.as_deref()
    }

    pub fn code_name(&self) -> Option<&str> {
        self.code_name.as_deref()
    }

    pub fn field(&self) -> Option<FieldSelector> {
        self.field
    }

    pub fn match_mode(&self) -> Option<MatchMode> {
        self.match_mode
    }

    pub fn sort(&self) -> Option<SortOrder> {
        self.sort
    }

    /// Effective page size, already clamped to [`MAX_PAGE_SIZE`].
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Whether exhaustive retrieval was requested.
    pub fn fetch_all(&self) -> bool {
        self.fetch_all
    }

    pub fn publication_bulletin(&self) -> Option<&[BulletinFlag]> {
        self.publication_bulletin.as_deref()
    }

    /// Case-law key retention filter, if supplied.
    pub fn juri_keys(&self) -> Option<&[String]> {
        self.juri_keys.as_deref()
    }

    pub fn jurisdictions(&self) -> Option<&[String]> {
        self.jurisdictions.as_deref()
    }

    /// Re-check the domain-dependent rules. Cheap; called by the request
    /// builder so an out-of-domain selector can never reach the wire.
    pub fn ensure_valid_for(&self, domain: SearchDomain) -> Result<(), SearchError> {
        if self.search.trim().is_empty() {
            return Err(SearchError::validation("search", "must not be empty"));
        }
        if let Some(field) = self.field
            && !domain.allowed_fields().contains(&field)
        {
            return Err(SearchError::validation(
                "champ",
                format!(
                    "{} is not searchable in the {} domain",
                    field.as_str(),
                    domain.endpoint()
                ),
            ));
        }
        if domain == SearchDomain::Code && self.code_name.is_none() {
            return Err(SearchError::validation("code_name", "required for code search"));
        }
        Ok(())
    }
}

/// Accumulates raw arguments, then validates them against a domain.
#[derive(Debug, Clone, Default)]
pub struct CriteriaBuilder {
    search: String,
    text_id: Option<String>,
    code_name: Option<String>,
    field: Option<FieldSelector>,
    match_mode: Option<MatchMode>,
    sort: Option<SortOrder>,
    page_size: Option<u32>,
    fetch_all: bool,
    publication_bulletin: Option<Vec<BulletinFlag>>,
    juri_keys: Option<Vec<String>>,
    jurisdictions: Option<Vec<String>>,
}

impl CriteriaBuilder {
    pub fn new(search: impl Into<String>) -> Self {
        Self {
            search: search.into(),
            ..Self::default()
        }
    }

    pub fn text_id(mut self, id: impl Into<String>) -> Self {
        self.text_id = Some(id.into());
        self
    }

    pub fn code_name(mut self, name: impl Into<String>) -> Self {
        self.code_name = Some(name.into());
        self
    }

    pub fn field(mut self, field: FieldSelector) -> Self {
        self.field = Some(field);
        self
    }

    pub fn match_mode(mut self, mode: MatchMode) -> Self {
        self.match_mode = Some(mode);
        self
    }

    pub fn sort(mut self, sort: SortOrder) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn page_size(mut self, size: u32) -> Self {
        self.page_size = Some(size);
        self
    }

    pub fn fetch_all(mut self, fetch_all: bool) -> Self {
        self.fetch_all = fetch_all;
        self
    }

    pub fn publication_bulletin(mut self, flags: Vec<BulletinFlag>) -> Self {
        self.publication_bulletin = Some(flags);
        self
    }

    pub fn juri_keys(mut self, keys: Vec<String>) -> Self {
        self.juri_keys = Some(keys);
        self
    }

    pub fn jurisdictions(mut self, list: Vec<String>) -> Self {
        self.jurisdictions = Some(list);
        self
    }

    /// Validate against `domain` and freeze into a [`SearchCriteria`].
    ///
    /// `page_size` above [`MAX_PAGE_SIZE`] is clamped; below 1 is rejected.
    /// Fields the domain never uses are kept as-is here and dropped by the
    /// request builder.
    pub fn validate(self, domain: SearchDomain) -> Result<SearchCriteria, SearchError> {
        let page_size = match self.page_size {
            Some(0) => return Err(SearchError::validation("page_size", "must be at least 1")),
            Some(n) => n.min(MAX_PAGE_SIZE),
            None => DEFAULT_PAGE_SIZE,
        };

        let criteria = SearchCriteria {
            search: self.search,
            text_id: self.text_id,
            code_name: self.code_name,
            field: self.field,
            match_mode: self.match_mode,
            sort: self.sort,
            page_size,
            fetch_all: self.fetch_all,
            publication_bulletin: self.publication_bulletin,
            juri_keys: self.juri_keys,
            jurisdictions: self.jurisdictions,
        };
        criteria.ensure_valid_for(domain)?;
        Ok(criteria)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_size_clamped_to_ceiling() {
        let criteria = SearchCriteria::builder("contrat")
            .page_size(250)
            .validate(SearchDomain::LegalText)
            .unwrap();
        assert_eq!(criteria.page_size(), MAX_PAGE_SIZE);
    }

    #[test]
    fn test_page_size_zero_rejected() {
        let err = SearchCriteria::builder("contrat")
            .page_size(0)
            .validate(SearchDomain::LegalText)
            .unwrap_err();
        assert!(matches!(
            err,
            SearchError::Validation { field: "page_size", .. }
        ));
    }

    #[test]
    fn test_default_page_size_applied() {
        let criteria = SearchCriteria::builder("contrat")
            .validate(SearchDomain::LegalText)
            .unwrap();
        assert_eq!(criteria.page_size(), DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn test_empty_search_rejected() {
        let err = SearchCriteria::builder("   ")
            .validate(SearchDomain::LegalText)
            .unwrap_err();
        assert!(matches!(err, SearchError::Validation { field: "search", .. }));
    }

    #[test]
    fn test_code_requires_code_name() {
        let err = SearchCriteria::builder("pacte civil de solidarité")
            .validate(SearchDomain::Code)
            .unwrap_err();
        assert!(matches!(
            err,
            SearchError::Validation { field: "code_name", .. }
        ));
    }

    #[test]
    fn test_field_must_belong_to_domain() {
        let err = SearchCriteria::builder("affaire")
            .field(FieldSelector::NumAffaire)
            .validate(SearchDomain::Code)
            .unwrap_err();
        assert!(matches!(err, SearchError::Validation { field: "champ", .. }));

        SearchCriteria::builder("affaire")
            .field(FieldSelector::NumAffaire)
            .validate(SearchDomain::CaseLaw)
            .unwrap();
    }
}
