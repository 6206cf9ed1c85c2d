//! Closed vocabularies of the Legifrance search API.
//!
//! Wire strings match the remote API exactly and are never altered locally.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SearchError;

/// The three legal-corpus categories, each with its own request shape and
/// response schema. Resolved from the invoked tool name, immutable afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchDomain {
    /// Statutes: lois, ordonnances, décrets, arrêtés (LODA base)
    LegalText,
    /// Codified law articles (Code civil, Code du travail, ...)
    Code,
    /// Judicial case law (JURI base)
    CaseLaw,
}

impl SearchDomain {
    /// Resolve a domain from the invoked tool name.
    pub fn from_tool_name(name: &str) -> Option<Self> {
        match name {
            "rechercher_dans_texte_legal" => Some(Self::LegalText),
            "rechercher_code" => Some(Self::Code),
            "rechercher_jurisprudence_judiciaire" => Some(Self::CaseLaw),
            _ => None,
        }
    }

    /// The tool name exposing this domain.
    pub fn tool_name(&self) -> &'static str {
        match self {
            Self::LegalText => "rechercher_dans_texte_legal",
            Self::Code => "rechercher_code",
            Self::CaseLaw => "rechercher_jurisprudence_judiciaire",
        }
    }

    /// Remote API endpoint path for this domain.
    pub fn endpoint(&self) -> &'static str {
        match self {
            Self::LegalText => "loda",
            Self::Code => "code",
            Self::CaseLaw => "juri",
        }
    }

    /// Searchable zones valid for this domain.
    pub fn allowed_fields(&self) -> &'static [FieldSelector] {
        use FieldSelector::*;
        match self {
            Self::LegalText | Self::Code => &[All, Title, Table, NumArticle, Article],
            Self::CaseLaw => &[All, Title, Abstrats, Texte, Resumes, NumAffaire],
        }
    }
}

impl fmt::Display for SearchDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.endpoint())
    }
}

/// Searchable zone within a document (the `champ` parameter).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldSelector {
    #[serde(rename = "ALL")]
    All,
    #[serde(rename = "TITLE")]
    Title,
    #[serde(rename = "TABLE")]
    Table,
    #[serde(rename = "NUM_ARTICLE")]
    NumArticle,
    #[serde(rename = "ARTICLE")]
    Article,
    // Case-law zones
    #[serde(rename = "ABSTRATS")]
    Abstrats,
    #[serde(rename = "TEXTE")]
    Texte,
    #[serde(rename = "RESUMES")]
    Resumes,
    #[serde(rename = "NUM_AFFAIRE")]
    NumAffaire,
}

impl FieldSelector {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "ALL",
            Self::Title => "TITLE",
            Self::Table => "TABLE",
            Self::NumArticle => "NUM_ARTICLE",
            Self::Article => "ARTICLE",
            Self::Abstrats => "ABSTRATS",
            Self::Texte => "TEXTE",
            Self::Resumes => "RESUMES",
            Self::NumAffaire => "NUM_AFFAIRE",
        }
    }
}

impl FromStr for FieldSelector {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ALL" => Ok(Self::All),
            "TITLE" => Ok(Self::Title),
            "TABLE" => Ok(Self::Table),
            "NUM_ARTICLE" => Ok(Self::NumArticle),
            "ARTICLE" => Ok(Self::Article),
            "ABSTRATS" => Ok(Self::Abstrats),
            "TEXTE" => Ok(Self::Texte),
            "RESUMES" => Ok(Self::Resumes),
            "NUM_AFFAIRE" => Ok(Self::NumAffaire),
            other => Err(SearchError::validation(
                "champ",
                format!("unknown search field {other:?}"),
            )),
        }
    }
}

/// How the free-text query is matched server-side (`type_recherche`).
/// Passed through verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchMode {
    #[serde(rename = "TOUS_LES_MOTS_DANS_UN_CHAMP")]
    AllWordsInField,
    #[serde(rename = "EXPRESSION_EXACTE")]
    ExactPhrase,
    #[serde(rename = "AU_MOINS_UN_MOT")]
    AnyWord,
}

impl MatchMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AllWordsInField => "TOUS_LES_MOTS_DANS_UN_CHAMP",
            Self::ExactPhrase => "EXPRESSION_EXACTE",
            Self::AnyWord => "AU_MOINS_UN_MOT",
        }
    }
}

impl FromStr for MatchMode {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "TOUS_LES_MOTS_DANS_UN_CHAMP" => Ok(Self::AllWordsInField),
            "EXPRESSION_EXACTE" => Ok(Self::ExactPhrase),
            "AU_MOINS_UN_MOT" => Ok(Self::AnyWord),
            other => Err(SearchError::validation(
                "type_recherche",
                format!("unknown match mode {other:?}"),
            )),
        }
    }
}

/// Result ordering requested from the remote API (`sort`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortOrder {
    #[serde(rename = "PERTINENCE")]
    Relevance,
    #[serde(rename = "DATE_ASC")]
    DateAsc,
    #[serde(rename = "DATE_DESC")]
    DateDesc,
}

impl FromStr for SortOrder {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PERTINENCE" => Ok(Self::Relevance),
            "DATE_ASC" => Ok(Self::DateAsc),
            "DATE_DESC" => Ok(Self::DateDesc),
            other => Err(SearchError::validation(
                "sort",
                format!("unknown sort order {other:?}"),
            )),
        }
    }
}

/// Bulletin publication filter for case law (`publication_bulletin`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BulletinFlag {
    #[serde(rename = "T")]
    Published,
    #[serde(rename = "F")]
    NotPublished,
}

impl FromStr for BulletinFlag {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "T" => Ok(Self::Published),
            "F" => Ok(Self::NotPublished),
            other => Err(SearchError::validation(
                "publication_bulletin",
                format!("expected \"T\" or \"F\", got {other:?}"),
            )),
        }
    }
}
