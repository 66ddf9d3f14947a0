//! Residual content diff: what part of a desired tree is not yet present in
//! an observed tree.
//!
//! The comparison is one-directional. The observed tree may carry any number
//! of extra keys (generated identifiers, timestamps, server-side defaults)
//! without producing a residual. Only keys the observed tree actually has are
//! examined; desired keys it lacks stay in the residual untouched.

use residual_types::{Mapping, Node};
use tracing::{debug, trace};

use crate::residual::Residual;

/// Compute the residual of `desired` against `observed`.
///
/// Works on a deep copy of `desired`; neither input is modified. An empty
/// residual means the desired state is already satisfied.
///
/// When the top-level values are not both mappings, the pair is judged as a
/// whole: two non-empty sequences go through [`sequence_satisfied`], anything
/// else through deep equality. A satisfied pair leaves the empty value of
/// the desired kind; an unsatisfied one leaves all of `desired`.
pub fn content_diff(desired: &Node, observed: &Node) -> Residual {
    let node = match (desired, observed) {
        (Node::Mapping(d), Node::Mapping(o)) => Node::Mapping(prune_mapping(d.clone(), o)),
        (Node::Sequence(d), Node::Sequence(o)) if !d.is_empty() && !o.is_empty() => {
            if sequence_satisfied(d, o) {
                desired.emptied()
            } else {
                desired.clone()
            }
        }
        _ if desired == observed => desired.emptied(),
        _ => desired.clone(),
    };
    Residual::new(node)
}

/// Strip from `residual` every entry confirmed present in `observed`.
fn prune_mapping(mut residual: Mapping, observed: &Mapping) -> Mapping {
    for (key, ov) in observed {
        let Some(rv) = residual.get_mut(key) else {
            continue;
        };

        let satisfied = match (&mut *rv, ov) {
            (Node::Mapping(r), Node::Mapping(o)) if !r.is_empty() && !o.is_empty() => {
                *r = prune_mapping(std::mem::take(&mut *r), o);
                false
            }
            (Node::Sequence(r), Node::Sequence(o)) if !r.is_empty() && !o.is_empty() => {
                sequence_satisfied(r, o)
            }
            (rv, ov) => *rv == *ov,
        };

        if satisfied || rv.is_empty() {
            trace!(%key, "desired entry satisfied");
            residual.remove(key);
        }
    }
    residual
}

/// Decide whether the desired sequence is fully satisfied by the observed one.
///
/// Lengths must match. Each desired element must then either appear in
/// `observed` by deep equality or, when it is a mapping, be satisfied by some
/// observed mapping under the same residual rules (extra observed keys are
/// fine). Order does not matter, and several desired elements may be
/// satisfied by the same observed element.
pub fn sequence_satisfied(desired: &[Node], observed: &[Node]) -> bool {
    if desired.len() != observed.len() {
        debug!(
            desired_len = desired.len(),
            observed_len = observed.len(),
            "sequence length mismatch"
        );
        return false;
    }

    desired.iter().enumerate().all(|(index, item)| {
        if observed.contains(item) {
            return true;
        }
        let found = match item {
            Node::Mapping(wanted) => observed
                .iter()
                .filter_map(Node::as_mapping)
                .any(|candidate| prune_mapping(wanted.clone(), candidate).is_empty()),
            _ => false,
        };
        if !found {
            debug!(index, kind = %item.kind(), "no observed element satisfies desired element");
        }
        found
    })
}
