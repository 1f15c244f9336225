//! Pluggable named-entity tagging capability.
//!
//! The extractor treats NER as a replaceable black box: given text, return
//! typed entity spans. No model ships with this crate; consumers wire in a
//! tagger built once at startup and pass `None` when initialization failed,
//! in which case every NER-dependent heuristic is skipped.

/// Entity classes the extractor consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityLabel {
    Person,
    Org,
}

/// One tagged span. `start`/`end` are byte offsets into the text passed to
/// [`EntityTagger::tag`].
#[derive(Debug, Clone)]
pub struct EntitySpan {
    pub label: EntityLabel,
    pub text: String,
    pub start: usize,
    pub end: usize,
}

pub trait EntityTagger {
    /// Tag entities in `text`, in document order.
    fn tag(&self, text: &str) -> Vec<EntitySpan>;
}
