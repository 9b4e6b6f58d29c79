use std::collections::BTreeSet;

use anyhow::Result;
use fbas::is_quorum_slice;
use fbas::is_v_blocking;
use fbas::testing::nid;
use fbas::testing::qs;
use fbas::NodeId;
use maplit::btreeset;

use crate::fixtures::tier1_quorum_set;
use crate::fixtures::ut_harness;
use crate::fixtures::v;

/// A flat quorum set `{t:2, [A,B,C]}`.
#[tracing::instrument]
#[test_harness::test(harness = ut_harness)]
fn flat_slice_and_v_blocking() -> Result<()> {
    let q = qs(2, ["A", "B", "C"]);

    tracing::info!("--- slices");
    {
        assert!(is_quorum_slice(&q, &btreeset! {nid("A"), nid("B")}));
        assert!(!is_quorum_slice(&q, &btreeset! {nid("A")}));
    }

    tracing::info!("--- v-blocking: (1 + 3) - 2 = 2 nodes");
    {
        assert!(is_v_blocking(&q, &btreeset! {nid("A"), nid("B")}));
        assert!(!is_v_blocking(&q, &btreeset! {nid("A")}));
    }

    Ok(())
}

/// A tiered quorum set: 3 of 4 organizations, 2 of 3 validators of each.
#[tracing::instrument]
#[test_harness::test(harness = ut_harness)]
fn tiered_slice_and_v_blocking() -> Result<()> {
    let q = tier1_quorum_set();

    tracing::info!("--- 2 validators of 3 organizations slice it");
    {
        let nodes: BTreeSet<NodeId> = btreeset! {
            v("sdf", 1), v("sdf", 2),
            v("lobstr", 1), v("lobstr", 3),
            v("keybase", 2), v("keybase", 3),
        };
        assert!(is_quorum_slice(&q, &nodes));
    }

    tracing::info!("--- all validators of 2 organizations do not");
    {
        let nodes: BTreeSet<NodeId> = btreeset! {
            v("sdf", 1), v("sdf", 2), v("sdf", 3),
            v("lobstr", 1), v("lobstr", 2), v("lobstr", 3),
            v("keybase", 1),
        };
        assert!(!is_quorum_slice(&q, &nodes));
    }

    tracing::info!("--- 2 validators of 2 organizations block it");
    {
        let nodes: BTreeSet<NodeId> = btreeset! {
            v("satoshipay", 1), v("satoshipay", 3),
            v("keybase", 1), v("keybase", 2),
        };
        assert!(is_v_blocking(&q, &nodes));
    }

    tracing::info!("--- 1 validator of every organization does not");
    {
        let nodes: BTreeSet<NodeId> = btreeset! {
            v("sdf", 1), v("lobstr", 1), v("satoshipay", 1), v("keybase", 1),
        };
        assert!(!is_v_blocking(&q, &nodes));
    }

    Ok(())
}
