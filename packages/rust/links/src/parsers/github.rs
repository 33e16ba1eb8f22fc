//! Code host (GitHub) URL parser.

use traceboard_shared::{ArtifactReference, CodeChangeRef};
use url::Url;

use super::{RefParser, path_segments};

/// Recognizes pull request URLs of the form
/// `https://github.com/<owner>/<repo>/pull/<number>`.
pub struct GithubPullParser;

impl RefParser for GithubPullParser {
    fn attempt(&self, url: &Url, raw: &str) -> Option<ArtifactReference> {
        if url.host_str()? != "github.com" {
            return None;
        }

        let parts = path_segments(url);
        if parts.len() < 4 || parts[2] != "pull" {
            return None;
        }
        let number: u64 = parts[3].parse().ok()?;

        Some(ArtifactReference::Code(CodeChangeRef {
            owner: parts[0].to_string(),
            repo: parts[1].to_string(),
            number,
            url: raw.to_string(),
        }))
    }

    fn name(&self) -> &str {
        "github"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attempt(raw: &str) -> Option<ArtifactReference> {
        GithubPullParser.attempt(&Url::parse(raw).unwrap(), raw)
    }

    #[test]
    fn parses_pull_url() {
        match attempt("https://github.com/acme/widgets/pull/42") {
            Some(ArtifactReference::Code(c)) => {
                assert_eq!(c.owner, "acme");
                assert_eq!(c.repo, "widgets");
                assert_eq!(c.number, 42);
            }
            other => panic!("expected code ref, got {other:?}"),
        }
    }

    #[test]
    fn parses_pull_url_with_trailing_segments() {
        assert!(attempt("https://github.com/acme/widgets/pull/42/files").is_some());
    }

    #[test]
    fn rejects_non_numeric_number() {
        assert!(attempt("https://github.com/acme/widgets/pull/abc").is_none());
    }

    #[test]
    fn rejects_issue_urls() {
        assert!(attempt("https://github.com/acme/widgets/issues/42").is_none());
    }

    #[test]
    fn rejects_short_paths() {
        assert!(attempt("https://github.com/acme/widgets").is_none());
    }
}
