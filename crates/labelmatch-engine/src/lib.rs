//! Resolves merchant shipping addresses against a carrier catalog.
//!
//! Build a [`CatalogIndex`] once, then resolve records against it with
//! [`annotate_record`] / [`annotate_batch`], or call the resolvers directly.
//! Every test in the funnels is exact containment on normalized text; an
//! address that cannot be pinned to one entry comes back for manual review.

pub mod annotate;
pub mod branch;
pub mod index;
pub mod locality;
pub mod normalize;
pub mod outcome;
pub mod prepare;
pub mod query;

pub use annotate::{
    annotate_batch, annotate_record, AnnotatedRecord, BatchReport, BatchSummary, MatchStatus,
};
pub use branch::{is_caba_class, resolve_branch};
pub use index::{
    BranchCatalogEntry, BranchIndex, BranchSummary, CatalogIndex, CatalogSummary,
    LocalityCatalogEntry, LocalityIndex, LocalitySummary,
};
pub use locality::resolve_locality;
pub use normalize::{normalize, tokenize};
pub use outcome::{
    CatalogDisplay, MatchOutcome, BRANCH_SUGGESTION_LIMIT, LOCALITY_SUGGESTION_LIMIT,
};
pub use query::AddressQuery;
