use std::collections::BTreeSet;
use std::fmt;

use crate::node::NodeId;

/// The deepest level an inner set may live at. The root is at level 0.
pub const MAXIMUM_QUORUM_NESTING_LEVEL: u32 = 2;

/// The maximum number of validators in a quorum set, counting all levels.
pub const MAXIMUM_QUORUM_NODES: usize = 1000;

/// The quorum set a node declares: which nodes and groups of nodes it trusts,
/// and how many of them have to agree.
///
/// It supports structures like `a,b,c,(d,e,f),(g,h,(i,j,k,l))`, with at most
/// two levels of nesting below the root, see [`is_quorum_set_sane`].
///
/// `validators` is semantically a set. A duplicate is a structural defect that
/// the sanity check rejects, it is never deduplicated silently.
///
/// [`is_quorum_set_sane`]: crate::is_quorum_set_sane
#[derive(Debug, Clone, Default)]
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash)]
#[derive(serde::Deserialize, serde::Serialize)]
pub struct QuorumSet {
    /// The number of direct entries, validators and inner sets counted
    /// together, that have to be satisfied.
    #[serde(rename = "t")]
    pub threshold: u32,

    #[serde(rename = "v", default)]
    pub validators: Vec<NodeId>,

    #[serde(rename = "innerSets", default)]
    pub inner_sets: Vec<QuorumSet>,
}

impl fmt::Display for QuorumSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{t:{}, [", self.threshold)?;

        for (i, v) in self.validators.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{v}")?;
        }

        write!(f, "]")?;

        for inner in self.inner_sets.iter() {
            write!(f, ", {inner}")?;
        }

        write!(f, "}}")
    }
}

impl QuorumSet {
    pub fn new(
        threshold: u32,
        validators: Vec<NodeId>,
        inner_sets: Vec<QuorumSet>,
    ) -> Self {
        Self {
            threshold,
            validators,
            inner_sets,
        }
    }

    /// Build a flat quorum set without inner sets.
    pub fn with_validators<I, T>(threshold: u32, validators: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: ToString,
    {
        Self {
            threshold,
            validators: validators.into_iter().map(|x| x.to_string()).collect(),
            inner_sets: vec![],
        }
    }

    /// The quorum set `{t:1, [node_id]}`: a node that trusts only itself.
    ///
    /// It stands in for the quorum set of a node that has externalized a
    /// value, since it no longer depends on its peers for that slot.
    pub fn singleton(node_id: NodeId) -> Self {
        Self {
            threshold: 1,
            validators: vec![node_id],
            inner_sets: vec![],
        }
    }

    /// Number of direct entries: validators plus inner sets.
    pub fn total_entries(&self) -> usize {
        self.validators.len() + self.inner_sets.len()
    }

    /// Whether this is `{t:1, [x]}` for some `x`.
    pub fn is_singleton(&self) -> bool {
        self.threshold == 1
            && self.validators.len() == 1
            && self.inner_sets.is_empty()
    }

    /// Call `f` once for every distinct node in this quorum set.
    ///
    /// Validators of a level are visited before descending into its inner
    /// sets, inner sets in their given order. Levels deeper than
    /// [`MAXIMUM_QUORUM_NESTING_LEVEL`] are not visited: such a quorum set is
    /// insane anyway.
    pub fn for_all_nodes<F>(&self, mut f: F)
    where F: FnMut(&NodeId) {
        let mut visited = BTreeSet::new();
        self.for_all_nodes_internal(0, &mut visited, &mut f);
    }

    fn for_all_nodes_internal<'a, F>(
        &'a self,
        depth: u32,
        visited: &mut BTreeSet<&'a NodeId>,
        f: &mut F,
    ) where
        F: FnMut(&NodeId),
    {
        if depth > MAXIMUM_QUORUM_NESTING_LEVEL {
            return;
        }

        for node_id in self.validators.iter() {
            if visited.insert(node_id) {
                f(node_id);
            }
        }

        for inner in self.inner_sets.iter() {
            inner.for_all_nodes_internal(depth + 1, visited, f);
        }
    }

    /// Returns every node this quorum set transitively trusts.
    pub fn all_nodes(&self) -> BTreeSet<NodeId> {
        let mut nodes = BTreeSet::new();
        self.for_all_nodes(|node_id| {
            nodes.insert(node_id.clone());
        });
        nodes
    }
}
