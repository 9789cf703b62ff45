use std::collections::hash_map::Entry;
use std::collections::HashMap;

use super::walker::Batch;
use crate::model::{MethodCandidate, Signature};

struct Survivor<'a> {
    depth: usize,
    position: usize,
    class_name: &'a str,
    method: &'a MethodCandidate,
}

/// Keep one candidate per signature: the one declared closest to the traversal
/// start. Output is ordered by depth, then declaration order within the node,
/// and every entry is stamped with the class it was taken from.
pub(crate) fn eliminate_overrides(batches: &[Batch<'_>]) -> Vec<MethodCandidate> {
    let mut best: HashMap<&Signature, Survivor<'_>> = HashMap::new();
    for batch in batches {
        for (position, method) in batch.methods.iter().copied().enumerate() {
            let candidate = Survivor { depth: batch.depth, position, class_name: batch.class_name, method };
            match best.entry(method.signature()) {
                Entry::Vacant(slot) => {
                    slot.insert(candidate);
                }
                Entry::Occupied(mut slot) => {
                    let kept = slot.get();
                    if candidate.depth < kept.depth {
                        log::debug!(
                            "{} on {} overrides the one on {}",
                            method.signature(),
                            candidate.class_name,
                            kept.class_name
                        );
                        slot.insert(candidate);
                    } else {
                        log::debug!(
                            "{} on {} is overridden by {}",
                            method.signature(),
                            candidate.class_name,
                            kept.class_name
                        );
                    }
                }
            }
        }
    }
    let mut survivors: Vec<Survivor<'_>> = best.into_values().collect();
    survivors.sort_by_key(|s| (s.depth, s.position));
    survivors
        .into_iter()
        .map(|s| s.method.accepted_from(s.class_name))
        .collect()
}
