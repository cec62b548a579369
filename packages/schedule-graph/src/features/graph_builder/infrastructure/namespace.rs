// Id namespacing and label helpers
//
// Schedule ids are `"{name}-{index}"` with the index taken from the unfiltered
// input, node ids are `"{schedule_id}-{raw_id}"`.

use ahash::AHashSet;

use crate::features::schedule_ingest::ScheduleIndex;
use crate::shared::{intern, InternedString, NodeKind};

#[inline]
pub fn schedule_id(name: &str, index: usize) -> InternedString {
    intern(format!("{}-{}", name, index))
}

#[inline]
pub fn node_id(schedule_id: &str, raw_id: &str) -> InternedString {
    intern(format!("{}-{}", schedule_id, raw_id))
}

pub fn dependency_edge_id(schedule_id: &str, source: &str, target: &str) -> String {
    format!("{}-{}-{}", schedule_id, source, target)
}

pub fn sequence_edge_id(previous_root: &str, root: &str) -> String {
    format!("{}->{}", previous_root, root)
}

/// Claim `base` in `taken`, suffixing `#n` until the id is free
pub fn claim_unique_id(base: String, taken: &mut AHashSet<InternedString>) -> InternedString {
    let mut candidate = intern(&base);
    let mut n = 1usize;
    while taken.contains(&candidate) {
        candidate = intern(format!("{}#{}", base, n));
        n += 1;
    }
    taken.insert(candidate.clone());
    candidate
}

/// Last namespace segment: `bevy_app::main_schedule::Update` → `Update`
pub fn label_from_qualified_name<'a>(qualified_name: &'a str, separator: &str) -> &'a str {
    if separator.is_empty() {
        return qualified_name;
    }
    qualified_name
        .rsplit(separator)
        .next()
        .unwrap_or(qualified_name)
}

/// Set or system. The name tables win; for ids listed in neither, the source
/// format's prefix convention (`Set(..)` vs `System(..)`) decides.
pub fn resolve_kind(index: &ScheduleIndex, raw_id: &str, set_id_prefix: &str) -> NodeKind {
    if index.is_set(raw_id) {
        NodeKind::Set
    } else if index.is_system(raw_id) {
        NodeKind::System
    } else if raw_id.starts_with(set_id_prefix) {
        NodeKind::Set
    } else {
        NodeKind::System
    }
}
