//! Candidate generation for ambiguous document references.
//!
//! A reference coming out of an agent turn can be a bare id, a UUID buried
//! in prose, a title fragment, or a phrase like "that doc" that only makes
//! sense against conversation memory. Generation walks a fixed priority
//! order (precise signals first, broad fallbacks last) and produces a
//! de-duplicated candidate list for the resolution driver to try.

use std::collections::HashSet;
use std::sync::LazyLock;

use opsdeck_core::types::DocumentSummary;
use regex::Regex;

use crate::session::ConversationMemory;

/// Canonical 8-4-4-4-12 UUID shape, case-insensitive.
static UUID_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\b[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}\b",
    )
    .expect("UUID pattern compiles")
});

/// Phrases that refer to a document only through conversation context.
const AMBIGUOUS_REFERENCES: &[&str] = &[
    "this document",
    "that document",
    "the document",
    "this doc",
    "that doc",
    "the doc",
    "doc",
    "document",
];

/// Normalizes text for title comparison: trim, lowercase, collapse
/// internal whitespace to single spaces.
pub(crate) fn normalize(value: &str) -> String {
    value
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Extracts the first UUID-shaped substring, lower-cased.
pub(crate) fn extract_uuid(value: &str) -> Option<String> {
    UUID_PATTERN
        .find(value)
        .map(|m| m.as_str().to_lowercase())
}

/// An ordered, de-duplicated list of candidate ids.
#[derive(Debug, Default)]
struct CandidateList {
    candidates: Vec<String>,
    seen: HashSet<String>,
}

impl CandidateList {
    fn add(&mut self, candidate: &str) {
        let candidate = candidate.trim();
        if candidate.is_empty() || self.seen.contains(candidate) {
            return;
        }
        self.seen.insert(candidate.to_string());
        self.candidates.push(candidate.to_string());
    }

    fn into_vec(self) -> Vec<String> {
        self.candidates
    }
}

/// Generates candidate document ids for a raw reference.
///
/// `known_docs` is the latest listing (possibly empty when the listing call
/// failed); `memory` supplies conversational context. Candidates come out
/// in strict priority order:
///
/// 1. the raw reference itself, when it is a known id or no listing exists
/// 2. an embedded UUID, under the same rule
/// 3. exact normalized-title matches, in listing order
/// 4. a containment title match, only when it is unambiguous
/// 5. the last resolved doc, for back-references like "that doc"
/// 6. remembered listing entries whose title matches exactly
/// 7. the only known document, when there is exactly one
/// 8. the last resolved doc, when it still appears in the listing
pub fn generate_candidates(
    raw_reference: &str,
    known_docs: &[DocumentSummary],
    memory: &ConversationMemory,
) -> Vec<String> {
    let mut list = CandidateList::default();

    let requested = raw_reference.trim();
    let requested_norm = normalize(requested);
    let known_ids: HashSet<&str> = known_docs
        .iter()
        .filter(|doc| !doc.id.is_empty())
        .map(|doc| doc.id.as_str())
        .collect();

    // Keep the raw value only when no listing exists or it is a known id.
    if !requested.is_empty() && (known_ids.is_empty() || known_ids.contains(requested)) {
        list.add(requested);
    }

    // Same rule for UUIDs extracted from free-form inputs.
    if let Some(uuid) = extract_uuid(requested) {
        if known_ids.is_empty() || known_ids.contains(uuid.as_str()) {
            list.add(&uuid);
        }
    }

    // Title-based references.
    if !requested_norm.is_empty() {
        let exact_matches: Vec<&str> = known_docs
            .iter()
            .filter(|doc| !doc.id.is_empty() && normalize(&doc.title) == requested_norm)
            .map(|doc| doc.id.as_str())
            .collect();
        for id in &exact_matches {
            list.add(id);
        }

        if exact_matches.is_empty() {
            let contains_matches: Vec<&str> = known_docs
                .iter()
                .filter(|doc| !doc.id.is_empty() && normalize(&doc.title).contains(&requested_norm))
                .map(|doc| doc.id.as_str())
                .collect();
            // An ambiguous containment match is discarded, not guessed at.
            if let [only] = contains_matches.as_slice() {
                list.add(only);
            }
        }
    }

    // Conversational back-references.
    if AMBIGUOUS_REFERENCES.contains(&requested_norm.as_str()) {
        if let Some(last_doc_id) = memory.last_doc_id() {
            list.add(last_doc_id);
        }
    }

    if !requested_norm.is_empty() {
        for entry in memory.last_listed_docs() {
            if normalize(&entry.title) == requested_norm {
                list.add(&entry.id);
            }
        }
    }

    // If the requested id matched nothing and there is only one doc, try it.
    if known_ids.len() == 1 {
        if let Some(only) = known_ids.iter().next() {
            list.add(only);
        }
    }

    // If we remember a doc and it still exists, try it last.
    if let Some(last_doc_id) = memory.last_doc_id() {
        if known_ids.contains(last_doc_id) {
            list.add(last_doc_id);
        }
    }

    list.into_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(id: &str, title: &str) -> DocumentSummary {
        DocumentSummary::new(id, title)
    }

    #[test]
    fn raw_reference_kept_when_no_listing() {
        let candidates = generate_candidates("abc-123", &[], &ConversationMemory::new());
        assert_eq!(candidates, vec!["abc-123"]);
    }

    #[test]
    fn raw_reference_dropped_when_unknown() {
        let docs = [doc("a1", "Spec"), doc("a2", "Notes")];
        let candidates = generate_candidates("abc-123", &docs, &ConversationMemory::new());
        assert!(candidates.is_empty());
    }

    #[test]
    fn embedded_uuid_is_extracted_and_lowercased() {
        let reference = "please open 0B9C3E88-1111-4222-8333-ABCDEFABCDEF for me";
        let candidates = generate_candidates(reference, &[], &ConversationMemory::new());

        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0], reference.trim());
        assert_eq!(candidates[1], "0b9c3e88-1111-4222-8333-abcdefabcdef");
    }

    #[test]
    fn embedded_uuid_requires_known_id_when_listed() {
        let uuid = "0b9c3e88-1111-4222-8333-abcdefabcdef";
        let reference = format!("open {uuid} now");

        let other = [doc("a1", "Spec")];
        assert!(generate_candidates(&reference, &other, &ConversationMemory::new()).is_empty());

        let known = [doc(uuid, "Spec")];
        let candidates = generate_candidates(&reference, &known, &ConversationMemory::new());
        assert_eq!(candidates, vec![uuid.to_string()]);
    }

    #[test]
    fn exact_title_match_is_case_and_whitespace_insensitive() {
        let docs = [doc("a1", "Release  Notes")];
        let candidates =
            generate_candidates("  release notes ", &docs, &ConversationMemory::new());
        assert_eq!(candidates, vec!["a1"]);
    }

    #[test]
    fn exact_match_suppresses_containment() {
        let docs = [doc("a1", "Spec"), doc("a2", "Spec v2")];
        let candidates = generate_candidates("Spec", &docs, &ConversationMemory::new());
        assert_eq!(candidates, vec!["a1"]);
    }

    #[test]
    fn unique_containment_match_is_used() {
        let docs = [doc("a1", "Spec v2"), doc("a2", "Roadmap")];
        let candidates = generate_candidates("spec", &docs, &ConversationMemory::new());
        assert_eq!(candidates, vec!["a1"]);
    }

    #[test]
    fn ambiguous_containment_is_discarded() {
        let docs = [doc("a1", "Spec v1"), doc("a2", "Spec v2")];
        let candidates = generate_candidates("spec", &docs, &ConversationMemory::new());
        assert!(candidates.is_empty());
    }

    #[test]
    fn back_reference_uses_last_resolved_doc() {
        let mut memory = ConversationMemory::new();
        memory.record_resolved("a9");

        for reference in ["the doc", "That Document", "doc"] {
            let candidates = generate_candidates(reference, &[], &memory);
            assert_eq!(candidates, vec!["a9"], "reference: {reference}");
        }
    }

    #[test]
    fn back_reference_without_memory_yields_nothing() {
        let candidates = generate_candidates("that doc", &[], &ConversationMemory::new());
        assert!(candidates.is_empty());
    }

    #[test]
    fn remembered_titles_match_when_listing_is_gone() {
        let mut memory = ConversationMemory::new();
        memory.record_listing(&[doc("m1", "Sprint Plan"), doc("m2", "Retro")]);

        let candidates = generate_candidates("sprint plan", &[], &memory);
        assert_eq!(candidates, vec!["m1"]);
    }

    #[test]
    fn sole_document_fallback_fires_for_any_reference() {
        let docs = [doc("only", "Whatever")];
        let candidates = generate_candidates("zzz", &docs, &ConversationMemory::new());
        assert_eq!(candidates, vec!["only"]);
    }

    #[test]
    fn sole_document_fallback_precedes_last_resolved() {
        let mut memory = ConversationMemory::new();
        memory.record_resolved("only");

        // Both fallbacks point at the same doc: it appears exactly once.
        let docs = [doc("only", "Whatever")];
        let candidates = generate_candidates("zzz", &docs, &memory);
        assert_eq!(candidates, vec!["only"]);
    }

    #[test]
    fn last_resolved_fallback_requires_doc_to_still_exist() {
        let mut memory = ConversationMemory::new();
        memory.record_resolved("gone");

        let docs = [doc("a1", "Spec"), doc("a2", "Notes")];
        assert!(generate_candidates("zzz", &docs, &memory).is_empty());

        memory.record_resolved("a2");
        assert_eq!(generate_candidates("zzz", &docs, &memory), vec!["a2"]);
    }

    #[test]
    fn candidates_are_deduplicated_in_first_seen_order() {
        let mut memory = ConversationMemory::new();
        memory.record_resolved("a1");
        memory.record_listing(&[doc("a1", "Spec")]);

        // Raw id, exact title, sole-doc and last-resolved all point at a1.
        let docs = [doc("a1", "Spec")];
        let candidates = generate_candidates("a1", &docs, &memory);
        assert_eq!(candidates, vec!["a1"]);
    }

    #[test]
    fn generation_is_idempotent() {
        let mut memory = ConversationMemory::new();
        memory.record_listing(&[doc("m1", "Plan"), doc("m2", "Retro")]);
        memory.record_resolved("m2");

        let docs = [doc("m1", "Plan"), doc("m2", "Retro")];
        let first = generate_candidates("plan", &docs, &memory);
        let second = generate_candidates("plan", &docs, &memory);
        assert_eq!(first, second);
    }

    #[test]
    fn empty_reference_yields_no_identifier_candidates() {
        let candidates = generate_candidates("   ", &[], &ConversationMemory::new());
        assert!(candidates.is_empty());
    }

    #[test]
    fn normalize_collapses_whitespace() {
        assert_eq!(normalize("  Release \t Notes \n"), "release notes");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn extract_uuid_ignores_malformed_shapes() {
        assert_eq!(extract_uuid("no uuid here"), None);
        assert_eq!(extract_uuid("0b9c3e88-1111-4222-8333"), None);
        assert_eq!(
            extract_uuid("ID: 0B9C3E88-1111-4222-8333-ABCDEFABCDEF."),
            Some("0b9c3e88-1111-4222-8333-abcdefabcdef".to_string())
        );
    }
}
