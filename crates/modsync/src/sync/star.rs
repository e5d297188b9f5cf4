//! Upstream star count adoption.

use super::progress::{ProgressCallback, SyncProgress, emit};
use crate::github::{GraphQlApi, short_error_message};
use crate::module::{Module, SourceRepo};

/// Raise each module's star count to its upstream repository's count when
/// that is higher.
///
/// Modules without a cross-repository `sourceUrl` are left alone. Lookups
/// run in batches of `batch_size`; a failed batch is logged and its modules
/// keep their counts. Returns how many counts were raised.
pub(crate) async fn raise_upstream_stars<C: GraphQlApi + ?Sized>(
    client: &C,
    modules: &mut [Module],
    org: &str,
    batch_size: usize,
    on_progress: Option<&ProgressCallback>,
) -> usize {
    let upstream: Vec<(usize, SourceRepo)> = modules
        .iter()
        .enumerate()
        .filter_map(|(index, module)| module.upstream_source(org).map(|source| (index, source)))
        .collect();
    if upstream.is_empty() {
        return 0;
    }

    let batches = upstream.len().div_ceil(batch_size.max(1));
    let mut raised = 0;

    for (batch_index, chunk) in upstream.chunks(batch_size.max(1)).enumerate() {
        let batch = batch_index + 1;
        emit(
            on_progress,
            SyncProgress::FetchingStars {
                batch,
                batches,
                count: chunk.len(),
            },
        );

        let sources: Vec<SourceRepo> = chunk.iter().map(|(_, source)| source.clone()).collect();
        let counts = match client.get_star_counts(&sources).await {
            Ok(counts) => counts,
            Err(e) => {
                let error = short_error_message(&e);
                tracing::warn!(batch, batches, error = %error, "Star count lookup failed");
                emit(
                    on_progress,
                    SyncProgress::StarLookupFailed {
                        batch,
                        batches,
                        error,
                    },
                );
                continue;
            }
        };

        for ((index, source), stars) in chunk.iter().zip(counts) {
            let Some(stars) = stars else {
                tracing::debug!(source = %source, "Upstream repository not found");
                continue;
            };
            let module = &mut modules[*index];
            if module.raise_stars(stars) {
                raised += 1;
                emit(
                    on_progress,
                    SyncProgress::StarsRaised {
                        module_id: module.module_id.clone(),
                        source: source.to_string(),
                        stars,
                    },
                );
            }
        }
    }

    raised
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::github::{GitHubError, MockGraphQl};
    use crate::module::types::tests::module;

    const ORG: &str = "KernelSU-Modules-Repo";

    fn with_source(id: &str, source_url: &str, stars: u64) -> Module {
        let mut m = module(id);
        m.source_url = Some(source_url.to_string());
        m.stargazer_count = stars;
        m
    }

    #[tokio::test]
    async fn test_only_cross_repository_sources_are_queried() {
        let mock = MockGraphQl::new();
        mock.push_data(json!({ "repo0": { "stargazerCount": 90 } }));

        let mut modules = vec![
            module("plain"),
            with_source("own", &format!("https://github.com/{ORG}/own"), 1),
            with_source("forked", "https://github.com/alice/forked.git", 3),
        ];
        let raised = raise_upstream_stars(&mock, &mut modules, ORG, 50, None).await;

        assert_eq!(raised, 1);
        assert_eq!(modules[2].stargazer_count, 90);
        assert_eq!(modules[1].stargazer_count, 1);
        let queries = mock.queries();
        assert_eq!(queries.len(), 1);
        assert!(queries[0].contains(r#"repository(owner: "alice", name: "forked")"#));
    }

    #[tokio::test]
    async fn test_lower_upstream_count_is_ignored() {
        let mock = MockGraphQl::new();
        mock.push_data(json!({ "repo0": { "stargazerCount": 2 } }));

        let mut modules = vec![with_source("foo", "https://github.com/alice/foo", 40)];
        let raised = raise_upstream_stars(&mock, &mut modules, ORG, 50, None).await;

        assert_eq!(raised, 0);
        assert_eq!(modules[0].stargazer_count, 40);
    }

    #[tokio::test]
    async fn test_failed_batch_is_skipped() {
        let mock = MockGraphQl::new();
        mock.push_error(GitHubError::GraphQl("rate limited".to_string()));
        mock.push_data(json!({ "repo0": { "stargazerCount": 70 } }));

        let mut modules = vec![
            with_source("a", "https://github.com/x/a", 1),
            with_source("b", "https://github.com/x/b", 1),
            with_source("c", "https://github.com/x/c", 1),
        ];
        let raised = raise_upstream_stars(&mock, &mut modules, ORG, 2, None).await;

        assert_eq!(raised, 1);
        assert_eq!(modules[0].stargazer_count, 1);
        assert_eq!(modules[1].stargazer_count, 1);
        assert_eq!(modules[2].stargazer_count, 70);
        assert_eq!(mock.queries().len(), 2);
    }

    #[tokio::test]
    async fn test_no_upstream_sources_makes_no_request() {
        let mock = MockGraphQl::new();
        let mut modules = vec![module("a"), module("b")];
        assert_eq!(raise_upstream_stars(&mock, &mut modules, ORG, 50, None).await, 0);
        assert!(mock.queries().is_empty());
    }
}
