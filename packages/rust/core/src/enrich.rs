//! Best-effort reference enrichment.
//!
//! Enrichment attaches live metadata to a bounded prefix of each reference
//! list. Every fetch is independent: a failure keeps the bare reference and
//! never aborts the row or the run. References are never reordered or
//! dropped. Calls run sequentially, within a row and across rows, so output
//! order always matches input order.

use async_trait::async_trait;
use tracing::debug;

use traceboard_connectors::{ConfluenceClient, GithubClient};
use traceboard_shared::{CodeChangeRef, CorrelationRow, DesignRef, DocRef, Result, WorkItem};

/// Default bound on enrichment calls per reference kind per row.
pub const DEFAULT_MAX_PER_KIND: usize = 5;

// ---------------------------------------------------------------------------
// Client seams
// ---------------------------------------------------------------------------

/// Capability seam for code-change metadata lookups.
#[async_trait]
pub trait CodeChangeClient: Send + Sync {
    async fn fetch(&self, reference: &CodeChangeRef) -> Result<CodeChangeMeta>;
}

/// Capability seam for documentation-page metadata lookups.
#[async_trait]
pub trait DocsPageClient: Send + Sync {
    async fn fetch(&self, page_id: u64) -> Result<DocPageMeta>;
}

#[async_trait]
impl CodeChangeClient for GithubClient {
    async fn fetch(&self, reference: &CodeChangeRef) -> Result<CodeChangeMeta> {
        let pull = self
            .get_pull(&reference.owner, &reference.repo, reference.number)
            .await?;
        Ok(CodeChangeMeta {
            title: pull.title,
            state: pull.state,
            merged_at: pull.merged_at,
        })
    }
}

#[async_trait]
impl DocsPageClient for ConfluenceClient {
    async fn fetch(&self, page_id: u64) -> Result<DocPageMeta> {
        let page = self.get_page(page_id).await?;
        Ok(DocPageMeta { title: page.title })
    }
}

// ---------------------------------------------------------------------------
// Enriched types
// ---------------------------------------------------------------------------

/// Metadata for a code change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeChangeMeta {
    pub title: String,
    pub state: String,
    pub merged_at: Option<String>,
}

/// Metadata for a documentation page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocPageMeta {
    pub title: String,
}

/// Outcome of one enrichment attempt, explicit at the type level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefMeta<M> {
    /// Metadata fetched successfully.
    Enriched(M),
    /// Not attempted (gated off or beyond the bound) or the fetch failed.
    Bare,
}

impl<M> RefMeta<M> {
    pub fn is_enriched(&self) -> bool {
        matches!(self, Self::Enriched(_))
    }
}

/// A reference with its optional metadata alongside.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrichedRef<R, M> {
    pub reference: R,
    pub meta: RefMeta<M>,
}

/// A correlation row after enrichment. Same members, same order.
#[derive(Debug, Clone)]
pub struct EnrichedRow {
    pub item: WorkItem,
    /// Design references pass through unenriched.
    pub design: Vec<DesignRef>,
    pub code: Vec<EnrichedRef<CodeChangeRef, CodeChangeMeta>>,
    pub docs: Vec<EnrichedRef<DocRef, DocPageMeta>>,
    pub tracker_keys: Vec<String>,
}

/// Injected clients and bounds for an enrichment pass.
///
/// A reference kind is only attempted when its client is configured; `None`
/// passes every reference of that kind through bare with no call made.
pub struct EnrichOptions<'a> {
    pub code_client: Option<&'a dyn CodeChangeClient>,
    pub docs_client: Option<&'a dyn DocsPageClient>,
    pub max_per_kind: usize,
}

impl Default for EnrichOptions<'_> {
    fn default() -> Self {
        Self {
            code_client: None,
            docs_client: None,
            max_per_kind: DEFAULT_MAX_PER_KIND,
        }
    }
}

// ---------------------------------------------------------------------------
// Enrichment pass
// ---------------------------------------------------------------------------

/// Enrich all rows sequentially. At most one attempt per reference, no
/// retries.
pub async fn enrich_rows(rows: &[CorrelationRow], opts: &EnrichOptions<'_>) -> Vec<EnrichedRow> {
    let mut out = Vec::with_capacity(rows.len());
    for row in rows {
        out.push(enrich_row(row, opts).await);
    }
    out
}

/// Enrich a single row within the per-kind bound.
pub async fn enrich_row(row: &CorrelationRow, opts: &EnrichOptions<'_>) -> EnrichedRow {
    let mut code = Vec::with_capacity(row.code.len());
    for (i, reference) in row.code.iter().enumerate() {
        let meta = match opts.code_client {
            Some(client) if i < opts.max_per_kind => match client.fetch(reference).await {
                Ok(meta) => RefMeta::Enriched(meta),
                Err(e) => {
                    debug!(url = %reference.url, error = %e, "code enrichment failed, keeping bare reference");
                    RefMeta::Bare
                }
            },
            _ => RefMeta::Bare,
        };
        code.push(EnrichedRef {
            reference: reference.clone(),
            meta,
        });
    }

    let mut docs = Vec::with_capacity(row.docs.len());
    for (i, reference) in row.docs.iter().enumerate() {
        let meta = match opts.docs_client {
            Some(client) if i < opts.max_per_kind => match client.fetch(reference.page_id).await {
                Ok(meta) => RefMeta::Enriched(meta),
                Err(e) => {
                    debug!(url = %reference.url, error = %e, "docs enrichment failed, keeping bare reference");
                    RefMeta::Bare
                }
            },
            _ => RefMeta::Bare,
        };
        docs.push(EnrichedRef {
            reference: reference.clone(),
            meta,
        });
    }

    EnrichedRow {
        item: row.item.clone(),
        design: row.design.clone(),
        code,
        docs,
        tracker_keys: row.tracker_keys.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use traceboard_shared::TraceboardError;

    struct FlakyCodeClient;

    #[async_trait]
    impl CodeChangeClient for FlakyCodeClient {
        async fn fetch(&self, reference: &CodeChangeRef) -> Result<CodeChangeMeta> {
            if reference.number == 13 {
                return Err(TraceboardError::Service {
                    url: reference.url.clone(),
                    status: 500,
                });
            }
            Ok(CodeChangeMeta {
                title: format!("PR {}", reference.number),
                state: "open".into(),
                merged_at: None,
            })
        }
    }

    struct TitleDocsClient;

    #[async_trait]
    impl DocsPageClient for TitleDocsClient {
        async fn fetch(&self, page_id: u64) -> Result<DocPageMeta> {
            Ok(DocPageMeta {
                title: format!("Page {page_id}"),
            })
        }
    }

    fn code_ref(number: u64) -> CodeChangeRef {
        CodeChangeRef {
            owner: "acme".into(),
            repo: "widgets".into(),
            number,
            url: format!("https://github.com/acme/widgets/pull/{number}"),
        }
    }

    fn row_with_code(numbers: &[u64]) -> CorrelationRow {
        let mut row = CorrelationRow::empty(WorkItem {
            key: "ABC-1".into(),
            ..Default::default()
        });
        row.code = numbers.iter().copied().map(code_ref).collect();
        row
    }

    #[tokio::test]
    async fn failure_is_isolated_per_reference() {
        let row = row_with_code(&[13, 42]);
        let client = FlakyCodeClient;
        let opts = EnrichOptions {
            code_client: Some(&client),
            ..Default::default()
        };

        let enriched = enrich_row(&row, &opts).await;
        assert_eq!(enriched.code.len(), 2);
        assert!(!enriched.code[0].meta.is_enriched());
        assert!(enriched.code[1].meta.is_enriched());
        // Order unchanged regardless of outcome.
        assert_eq!(enriched.code[0].reference.number, 13);
        assert_eq!(enriched.code[1].reference.number, 42);
    }

    #[tokio::test]
    async fn references_beyond_bound_pass_through_bare() {
        let row = row_with_code(&[1, 2, 3, 4]);
        let client = FlakyCodeClient;
        let opts = EnrichOptions {
            code_client: Some(&client),
            max_per_kind: 2,
            ..Default::default()
        };

        let enriched = enrich_row(&row, &opts).await;
        assert!(enriched.code[0].meta.is_enriched());
        assert!(enriched.code[1].meta.is_enriched());
        assert!(!enriched.code[2].meta.is_enriched());
        assert!(!enriched.code[3].meta.is_enriched());
    }

    #[tokio::test]
    async fn unconfigured_kind_is_never_attempted() {
        let mut row = row_with_code(&[1]);
        row.docs.push(DocRef {
            page_id: 9,
            url: "https://team.atlassian.net/wiki/pages/9".into(),
        });

        let enriched = enrich_row(&row, &EnrichOptions::default()).await;
        assert!(!enriched.code[0].meta.is_enriched());
        assert!(!enriched.docs[0].meta.is_enriched());
    }

    #[tokio::test]
    async fn docs_enrichment_attaches_title() {
        let mut row = row_with_code(&[]);
        row.docs.push(DocRef {
            page_id: 123456,
            url: "https://team.atlassian.net/wiki/pages/123456".into(),
        });

        let docs = TitleDocsClient;
        let opts = EnrichOptions {
            docs_client: Some(&docs),
            ..Default::default()
        };

        let enriched = enrich_row(&row, &opts).await;
        assert_eq!(
            enriched.docs[0].meta,
            RefMeta::Enriched(DocPageMeta {
                title: "Page 123456".into()
            })
        );
    }
}
