//! Conversation memory for document references.
//!
//! Tracks what the agent has recently seen so that follow-up references
//! ("that doc", a bare title) can be resolved without asking the user for
//! an id.

use opsdeck_core::types::DocumentSummary;
use serde::{Deserialize, Serialize};

/// Session-scoped memory consulted by the document-reference resolver.
///
/// Both fields are overwritten wholesale: there is no merging with prior
/// state, and update operations ignore empty input. The memory is owned by
/// the session; the resolver only reads and overwrites it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConversationMemory {
    /// The most recent document listing, slimmed to id + title.
    #[serde(default)]
    last_listed_docs: Vec<DocumentSummary>,

    /// The most recently resolved document id.
    #[serde(default)]
    last_doc_id: Option<String>,
}

impl ConversationMemory {
    /// Creates an empty memory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the most recent listing.
    pub fn last_listed_docs(&self) -> &[DocumentSummary] {
        &self.last_listed_docs
    }

    /// Returns the most recently resolved document id.
    pub fn last_doc_id(&self) -> Option<&str> {
        self.last_doc_id.as_deref()
    }

    /// Records a document listing.
    ///
    /// Overwrites the previous listing. A listing with exactly one entry
    /// also pins that entry as the last resolved document, so an immediate
    /// "that doc" follow-up lands on it. Empty listings are ignored.
    pub fn record_listing(&mut self, docs: &[DocumentSummary]) {
        let slim: Vec<DocumentSummary> = docs
            .iter()
            .filter(|doc| !doc.id.trim().is_empty())
            .cloned()
            .collect();

        if slim.is_empty() {
            return;
        }

        if slim.len() == 1 {
            self.last_doc_id = Some(slim[0].id.clone());
        }
        self.last_listed_docs = slim;
    }

    /// Records a successful resolution.
    ///
    /// Overwrites the previous value; empty ids are ignored.
    pub fn record_resolved(&mut self, doc_id: impl Into<String>) {
        let doc_id = doc_id.into();
        if !doc_id.trim().is_empty() {
            self.last_doc_id = Some(doc_id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(id: &str, title: &str) -> DocumentSummary {
        DocumentSummary::new(id, title)
    }

    #[test]
    fn new_memory_is_empty() {
        let memory = ConversationMemory::new();
        assert!(memory.last_listed_docs().is_empty());
        assert!(memory.last_doc_id().is_none());
    }

    #[test]
    fn listing_overwrites_previous_state() {
        let mut memory = ConversationMemory::new();
        memory.record_listing(&[doc("a", "One"), doc("b", "Two")]);
        memory.record_listing(&[doc("c", "Three")]);

        assert_eq!(memory.last_listed_docs().len(), 1);
        assert_eq!(memory.last_listed_docs()[0].id, "c");
    }

    #[test]
    fn sole_listing_entry_pins_last_doc_id() {
        let mut memory = ConversationMemory::new();
        memory.record_listing(&[doc("only", "The One")]);

        assert_eq!(memory.last_doc_id(), Some("only"));
    }

    #[test]
    fn multi_entry_listing_leaves_last_doc_id_alone() {
        let mut memory = ConversationMemory::new();
        memory.record_resolved("kept");
        memory.record_listing(&[doc("a", "One"), doc("b", "Two")]);

        assert_eq!(memory.last_doc_id(), Some("kept"));
    }

    #[test]
    fn empty_inputs_are_no_ops() {
        let mut memory = ConversationMemory::new();
        memory.record_listing(&[doc("a", "One")]);
        memory.record_resolved("a");

        memory.record_listing(&[]);
        memory.record_resolved("");
        memory.record_resolved("   ");

        assert_eq!(memory.last_listed_docs().len(), 1);
        assert_eq!(memory.last_doc_id(), Some("a"));
    }

    #[test]
    fn entries_without_ids_are_dropped() {
        let mut memory = ConversationMemory::new();
        memory.record_listing(&[doc("", "ghost"), doc("real", "Real")]);

        assert_eq!(memory.last_listed_docs().len(), 1);
        // Only one entry survived, so it also becomes the last resolved doc.
        assert_eq!(memory.last_doc_id(), Some("real"));
    }
}
