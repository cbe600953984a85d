//! Query resolution over a catalog.
//!
//! The selection surface searches by display name. An exact
//! (case-insensitive) name match always wins; otherwise results are ranked
//! by fuzzy score with a boost for prefix matches.

use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

use crate::catalog::AppDescriptor;

/// Rank catalog entries against a query, best match first.
///
/// Entries that don't match at all are dropped. The underlying catalog is
/// not reordered; ranking operates on references.
pub fn rank<'a>(catalog: &'a [AppDescriptor], query: &str) -> Vec<&'a AppDescriptor> {
    let matcher = SkimMatcherV2::default();
    let query_lower = query.to_lowercase();

    let mut scored: Vec<(&AppDescriptor, i64)> = catalog
        .iter()
        .filter_map(|app| {
            let name_lower = app.name.to_lowercase();
            let score = matcher.fuzzy_match(&name_lower, &query_lower)?;
            let prefix_boost = if name_lower.starts_with(&query_lower) { 100 } else { 0 };
            Some((app, score + prefix_boost))
        })
        .collect();

    scored.sort_by(|a, b| b.1.cmp(&a.1));
    scored.into_iter().map(|(app, _)| app).collect()
}

/// Resolve a query to the single best matching entry.
pub fn resolve<'a>(catalog: &'a [AppDescriptor], query: &str) -> Option<&'a AppDescriptor> {
    if let Some(exact) = catalog.iter().find(|a| a.name.eq_ignore_ascii_case(query)) {
        return Some(exact);
    }
    rank(catalog, query).into_iter().next()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn app(name: &str) -> AppDescriptor {
        AppDescriptor {
            name: name.to_string(),
            path: PathBuf::from(format!("/Applications/{}.app", name)),
            bundle_id: None,
        }
    }

    #[test]
    fn exact_name_match_wins_over_fuzzy() {
        let catalog = vec![app("Safari Technology Preview"), app("Safari")];
        let found = resolve(&catalog, "safari").unwrap();
        assert_eq!(found.name, "Safari");
    }

    #[test]
    fn prefix_matches_rank_first() {
        let catalog = vec![app("Notesmith"), app("Notes"), app("OneNote")];
        let ranked = rank(&catalog, "note");
        assert!(!ranked.is_empty());
        assert!(ranked[0].name.to_lowercase().starts_with("note"));
    }

    #[test]
    fn fuzzy_match_finds_abbreviations() {
        let catalog = vec![app("Visual Studio Code"), app("Mail")];
        let found = resolve(&catalog, "vsc").unwrap();
        assert_eq!(found.name, "Visual Studio Code");
    }

    #[test]
    fn unmatched_query_resolves_to_none() {
        let catalog = vec![app("Mail")];
        assert!(resolve(&catalog, "zzzzqqq").is_none());
        assert!(rank(&catalog, "zzzzqqq").is_empty());
    }
}
