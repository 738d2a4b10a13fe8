use crate::SourceDocument;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StaleReason {
    UriChanged,
    ModifiedChanged,
    SizeChanged,
    ContentChanged,
}

/// Decide whether a preview derived from `original` no longer matches `updated`.
///
/// Location, modification time and size are compared first. Content hashes
/// are compared only when both snapshots carry one.
pub fn is_stale(updated: &SourceDocument, original: &SourceDocument) -> Option<StaleReason> {
    if updated.uri != original.uri {
        return Some(StaleReason::UriChanged);
    }
    if updated.fingerprint.modified != original.fingerprint.modified {
        return Some(StaleReason::ModifiedChanged);
    }
    if updated.fingerprint.size != original.fingerprint.size {
        return Some(StaleReason::SizeChanged);
    }
    match (
        &updated.fingerprint.content_hash,
        &original.fingerprint.content_hash,
    ) {
        (Some(after), Some(before)) if after != before => Some(StaleReason::ContentChanged),
        _ => None,
    }
}
