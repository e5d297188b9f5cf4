use std::collections::HashSet;

use super::metadata::{AdjustmentKind, AuthorAdjustment};
use super::types::Author;
use crate::github::Collaborator;

/// Profile link for a GitHub login.
fn profile_link(login: &str) -> String {
    format!("https://github.com/{login}")
}

/// Build a module's author list.
///
/// Collaborators come first, in order, named by display name or login. Any
/// collaborator whose name or login is listed by a `remove` adjustment is
/// dropped. `add` adjustments are then appended unless an author with the
/// same name is already listed.
pub fn build_authors<'a>(
    collaborators: impl IntoIterator<Item = &'a Collaborator>,
    adjustments: &[AuthorAdjustment],
) -> Vec<Author> {
    let removed: HashSet<&str> = adjustments
        .iter()
        .filter(|a| a.kind == AdjustmentKind::Remove)
        .map(|a| a.name.as_str())
        .collect();

    let mut authors: Vec<Author> = collaborators
        .into_iter()
        .filter_map(|collaborator| {
            let name = collaborator
                .name
                .as_deref()
                .filter(|name| !name.is_empty())
                .unwrap_or(&collaborator.login);
            let is_removed =
                removed.contains(name) || removed.contains(collaborator.login.as_str());
            (!is_removed).then(|| Author::new(name, profile_link(&collaborator.login)))
        })
        .collect();

    let mut names: HashSet<String> = authors.iter().map(|a| a.name.clone()).collect();
    for addition in adjustments.iter().filter(|a| a.kind == AdjustmentKind::Add) {
        if names.insert(addition.name.clone()) {
            authors.push(Author::new(
                addition.name.as_str(),
                addition.link.clone().unwrap_or_default(),
            ));
        }
    }

    authors
}
