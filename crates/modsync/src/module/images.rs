//! Release note image rewriting.
//!
//! Images attached to release notes are written in markdown as
//! `https://github.com/<owner>/<repo>/assets/<id>/<uuid>`, which is public.
//! GitHub's rendered HTML instead points at a session-signed
//! `private-user-images.githubusercontent.com` URL that expires. The two share
//! the UUID, so the signed URL can be swapped back for the public one.

use regex::{NoExpand, Regex};

use super::consts::PUBLIC_IMAGE_REGEX;

/// Replace signed private image URLs in `html` with the public URLs found in
/// `markdown`.
///
/// Only `src`/`href` style URLs followed by a closing quote are rewritten.
/// If GitHub changes either URL scheme this silently stops matching.
pub fn replace_private_images(markdown: Option<&str>, html: &str) -> String {
    let Some(markdown) = markdown.filter(|m| !m.is_empty()) else {
        return html.to_string();
    };

    let mut public_images: Vec<(&str, &str)> = Vec::new();
    for captures in PUBLIC_IMAGE_REGEX.captures_iter(markdown) {
        let (Some(url), Some(id)) = (captures.get(0), captures.get(1)) else {
            continue;
        };
        if !public_images.iter().any(|(seen, _)| *seen == url.as_str()) {
            public_images.push((url.as_str(), id.as_str()));
        }
    }

    let mut html = html.to_string();
    for (url, id) in public_images {
        let pattern = format!(
            r#"https://private-user-images\.githubusercontent\.com/\d+/\d+-{}\.[^"\n]*""#,
            regex::escape(id)
        );
        let Ok(private_image) = Regex::new(&pattern) else {
            continue;
        };
        let replacement = format!("{url}\"");
        html = private_image
            .replace_all(&html, NoExpand(&replacement))
            .into_owned();
    }
    html
}
