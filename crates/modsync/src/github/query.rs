//! GraphQL query builders.
//!
//! Organization and repository names are interpolated into the query text as
//! they are. They come from the registry organization itself, so no escaping
//! is attempted.

use crate::module::SourceRepo;

/// Repositories requested per listing page.
pub const PAGE_SIZE: usize = 10;

/// Releases requested per repository.
pub const RELEASES_PER_REPOSITORY: usize = 20;

/// Assets requested per release.
pub const ASSETS_PER_RELEASE: usize = 50;

/// Direct collaborators requested per repository.
pub const COLLABORATORS_PER_REPOSITORY: usize = 100;

/// Alias used for the `index`-th entry of a star count query.
pub fn star_alias(index: usize) -> String {
    format!("repo{index}")
}

fn release_fields(include_is_latest: bool) -> String {
    let is_latest = if include_is_latest { "\n      isLatest" } else { "" };
    format!(
        r#"name
      url
      isDraft
      description
      descriptionHTML
      createdAt
      publishedAt
      updatedAt
      tagName
      isPrerelease{is_latest}
      releaseAssets(first: {ASSETS_PER_RELEASE}) {{
        edges {{
          node {{
            name
            contentType
            downloadUrl
            downloadCount
            size
          }}
        }}
      }}"#
    )
}

fn repository_fields() -> String {
    let latest = release_fields(false);
    let release = release_fields(true);
    format!(
        r#"name
    description
    url
    homepageUrl
    collaborators(affiliation: DIRECT, first: {COLLABORATORS_PER_REPOSITORY}) {{
      edges {{
        node {{
          login
          name
        }}
      }}
    }}
    readme: object(expression: "HEAD:README.md") {{
      ... on Blob {{
        text
      }}
    }}
    moduleJson: object(expression: "HEAD:module.json") {{
      ... on Blob {{
        text
      }}
    }}
    latestRelease {{
      {latest}
    }}
    releases(first: {RELEASES_PER_REPOSITORY}) {{
      edges {{
        node {{
          {release}
        }}
      }}
    }}
    updatedAt
    createdAt
    stargazerCount"#
    )
}

/// Build the paginated organization listing query.
///
/// Public repositories only, most recently updated first. The `after`
/// argument is left out entirely when there is no cursor yet.
pub fn repositories_query(org: &str, cursor: Option<&str>) -> String {
    let after = cursor
        .map(|cursor| format!(r#", after: "{cursor}""#))
        .unwrap_or_default();
    let fields = repository_fields();
    format!(
        r#"{{
  organization(login: "{org}") {{
    repositories(first: {PAGE_SIZE}{after}, orderBy: {{field: UPDATED_AT, direction: DESC}}, privacy: PUBLIC) {{
      edges {{
        node {{
          {fields}
        }}
        cursor
      }}
      pageInfo {{
        hasNextPage
        endCursor
      }}
      totalCount
    }}
  }}
}}"#
    )
}

/// Build the single repository lookup query.
pub fn repository_query(org: &str, name: &str) -> String {
    let fields = repository_fields();
    format!(
        r#"{{
  repository(owner: "{org}", name: "{name}") {{
    {fields}
  }}
}}"#
    )
}

/// Build a batched star count query.
///
/// Each repository is looked up under a positional alias (`repo0`, `repo1`,
/// ...) so results can be matched back to `repos` by index.
pub fn star_count_query(repos: &[SourceRepo]) -> String {
    let lookups = repos
        .iter()
        .enumerate()
        .map(|(index, repo)| {
            format!(
                r#"  {}: repository(owner: "{}", name: "{}") {{
    stargazerCount
  }}"#,
                star_alias(index),
                repo.owner,
                repo.name
            )
        })
        .collect::<Vec<_>>()
        .join("\n");
    format!("{{\n{lookups}\n}}")
}
