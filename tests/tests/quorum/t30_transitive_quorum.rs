use std::collections::BTreeMap;

use anyhow::Result;
use fbas::is_quorum;
use fbas::is_v_blocking_filtered;
use fbas::NodeId;
use fbas::QuorumSet;

use crate::fixtures::org_quorum_set;
use crate::fixtures::statements_of;
use crate::fixtures::tier1_quorum_set;
use crate::fixtures::tier1_validators;
use crate::fixtures::ut_harness;
use crate::fixtures::v;

fn quorum(root: &QuorumSet, st: &BTreeMap<NodeId, QuorumSet>) -> bool {
    is_quorum(root, st, |q| Some(q.clone()), |_| true)
}

/// Every validator of the tiered network declares the same quorum set.
#[tracing::instrument]
#[test_harness::test(harness = ut_harness)]
fn tiered_network_quorum() -> Result<()> {
    let q = tier1_quorum_set();
    let all = tier1_validators();

    tracing::info!("--- every validator agrees");
    {
        let st = statements_of(all.iter(), &q);
        assert!(quorum(&q, &st));
    }

    tracing::info!("--- one organization is down");
    {
        let up: Vec<NodeId> =
            all.iter().filter(|n| !n.starts_with("sdf-")).cloned().collect();
        let st = statements_of(up.iter(), &q);
        assert!(quorum(&q, &st));
    }

    tracing::info!("--- two organizations are down");
    {
        let up: Vec<NodeId> = all
            .iter()
            .filter(|n| !n.starts_with("sdf-") && !n.starts_with("lobstr-"))
            .cloned()
            .collect();
        let st = statements_of(up.iter(), &q);
        assert!(!quorum(&q, &st));
    }

    tracing::info!("--- one validator of each of three organizations is down");
    {
        let down = [v("sdf", 1), v("lobstr", 2), v("keybase", 3)];
        let up: Vec<NodeId> =
            all.iter().filter(|n| !down.contains(n)).cloned().collect();
        let st = statements_of(up.iter(), &q);
        assert!(quorum(&q, &st));
    }

    Ok(())
}

/// A validator whose own quorum set is not satisfied is removed, and the
/// removal cascades to the validators that depend on it.
#[tracing::instrument]
#[test_harness::test(harness = ut_harness)]
fn tiered_network_cascade() -> Result<()> {
    let tier1 = tier1_quorum_set();
    let all = tier1_validators();

    // Only 2 validators of each of `satoshipay` and `keybase` are up, and they
    // trust their own organization only. The remaining tier1 nodes of `sdf`
    // and `lobstr` are up.
    let mut st = BTreeMap::new();
    for n in all.iter() {
        if n.starts_with("sdf-") || n.starts_with("lobstr-") {
            st.insert(n.clone(), tier1.clone());
        }
    }
    for org in ["satoshipay", "keybase"] {
        for i in 1..=2 {
            st.insert(v(org, i), org_quorum_set(org));
        }
    }

    tracing::info!("--- 4 organizations agree");
    {
        assert!(quorum(&tier1, &st));
    }

    tracing::info!("--- keybase-2 is down, keybase falls apart");
    {
        let mut st = st.clone();
        st.remove(&v("keybase", 2));

        // `keybase-1` is removed since `keybase` is not sliced. Still 3
        // organizations agree.
        assert!(quorum(&tier1, &st));
        assert!(quorum(&org_quorum_set("satoshipay"), &st));
        assert!(!quorum(&org_quorum_set("keybase"), &st));
    }

    tracing::info!("--- lobstr-1 and lobstr-2 are down");
    {
        let mut st = st.clone();
        st.remove(&v("keybase", 2));
        st.remove(&v("lobstr", 1));
        st.remove(&v("lobstr", 2));

        // Only `sdf` and `satoshipay` remain: the tier1 nodes are removed,
        // while `satoshipay` is still a quorum on its own.
        assert!(!quorum(&tier1, &st));
        assert!(quorum(&org_quorum_set("satoshipay"), &st));
    }

    Ok(())
}

/// The validators that moved on block the local node.
#[tracing::instrument]
#[test_harness::test(harness = ut_harness)]
fn tiered_network_v_blocking_filtered() -> Result<()> {
    let q = tier1_quorum_set();

    let mut ballots: BTreeMap<NodeId, u32> =
        tier1_validators().into_iter().map(|n| (n, 1)).collect();

    let ahead = |b: &u32| *b > 1;

    assert!(!is_v_blocking_filtered(&q, &ballots, ahead));

    for n in [v("sdf", 1), v("sdf", 2), v("lobstr", 1)] {
        ballots.insert(n, 2);
    }
    assert!(!is_v_blocking_filtered(&q, &ballots, ahead));

    ballots.insert(v("lobstr", 3), 2);
    assert!(is_v_blocking_filtered(&q, &ballots, ahead));

    Ok(())
}
