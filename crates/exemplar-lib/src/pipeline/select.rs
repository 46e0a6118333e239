use std::collections::BTreeMap;

use futures::future;
use tracing::debug;

use crate::config::{PER_LANGUAGE_RESULTS, SCORE_CEILING, SCORE_FLOOR, TARGET_LANGUAGES};
use crate::index::search::{Candidate, SnippetQuery};

/// A hand-picked snippet always included for its language, regardless of
/// what the live query returns. Override entries bypass the similarity
/// filter and carry their configured score into ranking unchanged.
#[derive(Clone, Debug)]
pub struct OverrideEntry {
    pub name: String,
    pub score: f32,
    pub path: Option<String>,
}

/// Selector configuration, passed at construction.
#[derive(Clone, Debug)]
pub struct SelectorConfig {
    /// Languages to query, one concurrent query each.
    pub languages: Vec<String>,
    /// Nearest-neighbor count per language.
    pub per_language: usize,
    /// Per-language override table.
    pub overrides: BTreeMap<String, Vec<OverrideEntry>>,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            languages: TARGET_LANGUAGES.iter().map(ToString::to_string).collect(),
            per_language: PER_LANGUAGE_RESULTS,
            overrides: default_overrides(),
        }
    }
}

/// Hand-curated snippets that queries reliably miss.
fn default_overrides() -> BTreeMap<String, Vec<OverrideEntry>> {
    let mut overrides = BTreeMap::new();
    overrides.insert(
        "javascript.v3".to_string(),
        vec![
            OverrideEntry {
                name: "javascript.v3_cloudwatch-logs_get-log-events-paginated.md".to_string(),
                score: 0.9,
                path: None,
            },
            OverrideEntry {
                name: "javascript.v3_cloudwatch-logs_describe-log-groups.md".to_string(),
                score: 0.9,
                path: None,
            },
        ],
    );
    overrides
}

/// Queries each configured language concurrently and merges the results
/// into one flat candidate pool.
pub struct CandidateSelector {
    config: SelectorConfig,
}

impl CandidateSelector {
    #[must_use]
    pub fn new(config: SelectorConfig) -> Self {
        Self { config }
    }

    /// Run all per-language queries concurrently and flatten the results.
    ///
    /// Fail-fast join: the first query error aborts the whole selection.
    pub async fn select(
        &self,
        query: &dyn SnippetQuery,
        vector: &[f32],
    ) -> anyhow::Result<Vec<Candidate>> {
        let per_language = future::try_join_all(
            self.config
                .languages
                .iter()
                .map(|language| self.select_language(query, language, vector)),
        )
        .await?;

        let pool: Vec<Candidate> = per_language.into_iter().flatten().collect();
        debug!(candidates = pool.len(), "Merged per-language candidates");
        Ok(pool)
    }

    /// Candidates for one language: override entries unconditionally, plus
    /// queried results that fall inside the similarity window.
    async fn select_language(
        &self,
        query: &dyn SnippetQuery,
        language: &str,
        vector: &[f32],
    ) -> anyhow::Result<Vec<Candidate>> {
        let queried = query
            .nearest(language, vector, self.config.per_language)
            .await?;

        let mut candidates: Vec<Candidate> = self
            .config
            .overrides
            .get(language)
            .map(|entries| {
                entries
                    .iter()
                    .map(|entry| Candidate {
                        score: entry.score,
                        language: language.to_string(),
                        name: entry.name.clone(),
                        path: entry.path.clone(),
                    })
                    .collect()
            })
            .unwrap_or_default();

        candidates.extend(queried.into_iter().filter(|c| in_window(c.score)));
        Ok(candidates)
    }
}

/// Similarity window for queried candidates: [`SCORE_FLOOR`, `SCORE_CEILING`).
fn in_window(score: f32) -> bool {
    score >= SCORE_FLOOR && score < SCORE_CEILING
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;

    /// Query engine returning fixed per-language results.
    struct ScriptedQuery {
        results: BTreeMap<String, Vec<Candidate>>,
        fail_language: Option<String>,
    }

    impl ScriptedQuery {
        fn new(results: &[(&str, &[f32])]) -> Self {
            let map = results
                .iter()
                .map(|(language, scores)| {
                    let candidates = scores
                        .iter()
                        .enumerate()
                        .map(|(i, score)| Candidate {
                            score: *score,
                            language: (*language).to_string(),
                            name: format!("{language}_snippet_{i}.md"),
                            path: None,
                        })
                        .collect();
                    ((*language).to_string(), candidates)
                })
                .collect();
            Self {
                results: map,
                fail_language: None,
            }
        }

        fn failing_for(language: &str) -> Self {
            Self {
                results: BTreeMap::new(),
                fail_language: Some(language.to_string()),
            }
        }
    }

    #[async_trait]
    impl SnippetQuery for ScriptedQuery {
        async fn nearest(
            &self,
            language: &str,
            _vector: &[f32],
            limit: usize,
        ) -> anyhow::Result<Vec<Candidate>> {
            if self.fail_language.as_deref() == Some(language) {
                anyhow::bail!("query failed for {language}");
            }
            let mut results = self.results.get(language).cloned().unwrap_or_default();
            results.truncate(limit);
            Ok(results)
        }
    }

    fn config(languages: &[&str]) -> SelectorConfig {
        SelectorConfig {
            languages: languages.iter().map(ToString::to_string).collect(),
            per_language: PER_LANGUAGE_RESULTS,
            overrides: BTreeMap::new(),
        }
    }

    #[test]
    fn window_bounds_are_half_open() {
        assert!(!in_window(0.799_999));
        assert!(in_window(0.8));
        assert!(in_window(0.99));
        assert!(!in_window(SCORE_CEILING));
        assert!(!in_window(1.0));
    }

    #[test]
    fn default_config_has_javascript_overrides() {
        let config = SelectorConfig::default();
        let entries = config.overrides.get("javascript.v3").unwrap();
        assert!(!entries.is_empty());
        assert!(entries.iter().all(|e| (e.score - 0.9).abs() < f32::EPSILON));
    }

    #[tokio::test]
    async fn filters_queried_results_to_window() {
        let query = ScriptedQuery::new(&[("ruby", &[0.999, 0.9, 0.5])]);
        let selector = CandidateSelector::new(config(&["ruby"]));

        let pool = selector.select(&query, &[]).await.unwrap();
        assert_eq!(pool.len(), 1);
        assert!((pool[0].score - 0.9).abs() < f32::EPSILON);
    }

    #[tokio::test]
    async fn overrides_bypass_the_window() {
        let mut cfg = config(&["javascript.v3"]);
        cfg.overrides.insert(
            "javascript.v3".to_string(),
            vec![OverrideEntry {
                name: "curated.md".to_string(),
                score: 0.3,
                path: None,
            }],
        );
        let query = ScriptedQuery::new(&[("javascript.v3", &[0.5])]);
        let selector = CandidateSelector::new(cfg);

        let pool = selector.select(&query, &[]).await.unwrap();
        // The 0.5 queried result is filtered; the 0.3 override survives.
        assert_eq!(pool.len(), 1);
        assert_eq!(pool[0].name, "curated.md");
    }

    #[tokio::test]
    async fn overrides_included_even_when_query_is_empty() {
        let mut cfg = config(&["javascript.v3"]);
        cfg.overrides.insert(
            "javascript.v3".to_string(),
            vec![OverrideEntry {
                name: "curated.md".to_string(),
                score: 0.9,
                path: None,
            }],
        );
        let query = ScriptedQuery::new(&[]);
        let selector = CandidateSelector::new(cfg);

        let pool = selector.select(&query, &[]).await.unwrap();
        assert_eq!(pool.len(), 1);
        assert_eq!(pool[0].language, "javascript.v3");
    }

    #[tokio::test]
    async fn flattens_across_languages() {
        let query = ScriptedQuery::new(&[("ruby", &[0.85]), ("php", &[0.9, 0.82])]);
        let selector = CandidateSelector::new(config(&["ruby", "php"]));

        let pool = selector.select(&query, &[]).await.unwrap();
        assert_eq!(pool.len(), 3);
        assert!(pool.iter().any(|c| c.language == "ruby"));
        assert!(pool.iter().any(|c| c.language == "php"));
    }

    #[tokio::test]
    async fn no_dedup_of_repeated_names() {
        let mut cfg = config(&["ruby"]);
        cfg.overrides.insert(
            "ruby".to_string(),
            vec![OverrideEntry {
                name: "ruby_snippet_0.md".to_string(),
                score: 0.9,
                path: None,
            }],
        );
        let query = ScriptedQuery::new(&[("ruby", &[0.85])]);
        let selector = CandidateSelector::new(cfg);

        // Same name arrives twice: once via override, once via query.
        let pool = selector.select(&query, &[]).await.unwrap();
        assert_eq!(pool.len(), 2);
        assert_eq!(pool[0].name, pool[1].name);
    }

    #[tokio::test]
    async fn one_failed_language_aborts_selection() {
        let query = ScriptedQuery::failing_for("php");
        let selector = CandidateSelector::new(config(&["ruby", "php", "swift"]));

        let result = selector.select(&query, &[]).await;
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("php"));
    }
}
