use crate::quorum::QuorumSet;

/// Return the canonical form of a quorum set, so that logically equal quorum
/// sets hash identically.
///
/// Every level is rebuilt bottom-up:
/// - A singleton inner set `{t:1, [x]}` is removed and `x` is moved into the
///   validators of its parent: `{t:n, [a], {t:1, [x]}}` becomes `{t:n, [a,x]}`.
/// - A level `{t:1, [], inner}` that only wraps one inner set is replaced by
///   that inner set. This applies to the root too: the returned root may be a
///   former inner set.
/// - Validators are sorted, and inner sets are sorted by their total order.
///
/// The input is not modified. `normalize(&normalize(q)) == normalize(q)`.
pub fn normalize(quorum_set: &QuorumSet) -> QuorumSet {
    let mut validators = quorum_set.validators.clone();
    let mut inner_sets = Vec::with_capacity(quorum_set.inner_sets.len());

    for inner in quorum_set.inner_sets.iter() {
        let inner = normalize(inner);

        if inner.is_singleton() {
            validators.extend(inner.validators);
        } else {
            inner_sets.push(inner);
        }
    }

    let only_one_inner = validators.is_empty() && inner_sets.len() == 1;
    if quorum_set.threshold == 1 && only_one_inner {
        if let Some(only) = inner_sets.pop() {
            return only;
        }
    }

    validators.sort();
    inner_sets.sort();

    QuorumSet {
        threshold: quorum_set.threshold,
        validators,
        inner_sets,
    }
}

impl QuorumSet {
    /// Returns the normalized form of this quorum set. See [`normalize`].
    pub fn normalized(&self) -> QuorumSet {
        normalize(self)
    }
}
