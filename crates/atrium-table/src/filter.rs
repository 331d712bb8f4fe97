//! Free-text search and status filtering.
//!
//! Always a full pass over the store; relative order is preserved.

use atrium_core::{Record, RecordKind, StatusSet, status::parse_status};

/// Status predicate of a table. `All` bypasses the predicate entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFilter<S> {
  All,
  Only(S),
}

impl<S> Default for StatusFilter<S> {
  fn default() -> Self { Self::All }
}

impl<S: StatusSet> StatusFilter<S> {
  /// Parse `"all"` or a status name of `kind`.
  pub fn parse(kind: RecordKind, value: &str) -> atrium_core::Result<Self> {
    if value.trim().eq_ignore_ascii_case("all") {
      Ok(Self::All)
    } else {
      parse_status(kind, value).map(Self::Only)
    }
  }

  pub fn admits(&self, status: S) -> bool {
    match self {
      Self::All => true,
      Self::Only(s) => *s == status,
    }
  }

  /// `All`, then every status in declaration order, then back to `All`.
  pub fn cycle(self) -> Self {
    let all = S::all();
    match self {
      Self::All => all.first().copied().map_or(Self::All, Self::Only),
      Self::Only(s) => {
        let pos = all.iter().position(|x| *x == s).unwrap_or(all.len());
        all.get(pos + 1).copied().map_or(Self::All, Self::Only)
      }
    }
  }

  pub fn label(&self) -> &'static str {
    match self {
      Self::All => "all",
      Self::Only(s) => s.as_str(),
    }
  }
}

/// Whether any searchable field of `record` contains `needle`, which must
/// already be lowercase. An empty needle matches everything.
pub fn matches_query<R: Record>(record: &R, needle: &str) -> bool {
  needle.is_empty()
    || record
      .search_fields()
      .iter()
      .any(|field| field.to_lowercase().contains(needle))
}

/// The visible subset of `records`.
pub fn filter_records<'a, R: Record>(
  records: &'a [R],
  query: &str,
  status: StatusFilter<R::Status>,
) -> Vec<&'a R> {
  let needle = query.to_lowercase();
  records
    .iter()
    .filter(|r| status.admits(r.status()))
    .filter(|r| matches_query(*r, &needle))
    .collect()
}
