use crate::index::{BranchCatalogEntry, LocalityCatalogEntry};

/// Maximum suggestions returned for an ambiguous branch match.
pub const BRANCH_SUGGESTION_LIMIT: usize = 10;

/// Maximum suggestions returned for an ambiguous locality match.
pub const LOCALITY_SUGGESTION_LIMIT: usize = 5;

/// Result of resolving one address against a catalog index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchOutcome<E> {
    /// Exactly one catalog entry survived the funnel.
    Resolved(E),
    /// Several candidates remain; display strings in catalog order, capped.
    Ambiguous(Vec<String>),
    /// Nothing to offer.
    Unresolved,
}

impl<E: CatalogDisplay> MatchOutcome<E> {
    /// Display string of the resolved entry, if any.
    #[must_use]
    pub fn matched(&self) -> Option<&str> {
        match self {
            MatchOutcome::Resolved(entry) => Some(entry.display()),
            MatchOutcome::Ambiguous(_) | MatchOutcome::Unresolved => None,
        }
    }

    /// Candidates offered for manual review; empty unless ambiguous.
    #[must_use]
    pub fn suggestions(&self) -> &[String] {
        match self {
            MatchOutcome::Ambiguous(candidates) => candidates,
            MatchOutcome::Resolved(_) | MatchOutcome::Unresolved => &[],
        }
    }

    #[must_use]
    pub fn is_resolved(&self) -> bool {
        matches!(self, MatchOutcome::Resolved(_))
    }

    /// Builds an ambiguous outcome from the first `limit` candidates, or
    /// `Unresolved` when there are none.
    pub(crate) fn ambiguous<'a, I>(candidates: I, limit: usize) -> Self
    where
        I: IntoIterator<Item = &'a E>,
        E: 'a,
    {
        let suggestions: Vec<String> = candidates
            .into_iter()
            .take(limit)
            .map(|e| e.display().to_owned())
            .collect();
        if suggestions.is_empty() {
            MatchOutcome::Unresolved
        } else {
            MatchOutcome::Ambiguous(suggestions)
        }
    }
}

/// The string an entry is shown and exported as.
pub trait CatalogDisplay {
    fn display(&self) -> &str;
}

impl CatalogDisplay for BranchCatalogEntry {
    fn display(&self) -> &str {
        &self.name
    }
}

impl CatalogDisplay for LocalityCatalogEntry {
    fn display(&self) -> &str {
        &self.raw
    }
}

impl<E: CatalogDisplay + ?Sized> CatalogDisplay for &E {
    fn display(&self) -> &str {
        (**self).display()
    }
}
