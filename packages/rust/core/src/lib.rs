//! Core correlation engine and report pipelines.
//!
//! The flow shared by the pipelines: pull work items from the tracker,
//! extract and classify artifact references from their text, optionally
//! enrich those references via the owning services, and render markdown
//! reports (matrix, orphans, relationship graph).

pub mod correlate;
pub mod enrich;
pub mod graph;
pub mod pipelines;
pub mod render;
pub mod tally;

pub use correlate::{correlate, orphans};
pub use enrich::{
    enrich_rows, CodeChangeClient, CodeChangeMeta, DocPageMeta, DocsPageClient, EnrichOptions,
    EnrichedRef, EnrichedRow, RefMeta,
};
pub use graph::{build_graph, Graph, GraphEdge, GraphNode};
pub use render::{render, RenderedReport};
