use anyhow::Result;
use fbas::errors::InsaneQuorumSet;
use fbas::is_quorum_set_sane;
use fbas::node_weight;
use fbas::quorum::check_quorum_set_sanity;
use fbas::testing::nid;
use fbas::testing::qs;
use fbas::testing::qs_inner;
use fbas::QuorumSet;
use pretty_assertions::assert_eq;

use crate::fixtures::tier1_quorum_set;
use crate::fixtures::tier1_validators;
use crate::fixtures::ut_harness;

#[tracing::instrument]
#[test_harness::test(harness = ut_harness)]
fn sanity_rejects_broken_quorum_sets() -> Result<()> {
    tracing::info!("--- threshold 0");
    {
        let q = qs(0, ["A"]);
        assert!(!is_quorum_set_sane(&q, false));
        assert_eq!(
            Err(InsaneQuorumSet::ThresholdOutOfRange {
                depth: 0,
                threshold: 0,
                total_entries: 1,
            }),
            check_quorum_set_sanity(&q, false)
        );
    }

    tracing::info!("--- A is a validator and a member of an inner set");
    {
        let q = qs_inner(1, ["A"], vec![qs(1, ["A", "B"])]);
        assert!(!is_quorum_set_sane(&q, false));
        assert_eq!(
            Err(InsaneQuorumSet::DuplicateNode { node_id: nid("A") }),
            check_quorum_set_sanity(&q, false)
        );
    }

    tracing::info!("--- an empty inner set");
    {
        let q = QuorumSet::new(1, vec![], vec![QuorumSet::default()]);
        assert!(!is_quorum_set_sane(&q, false));
    }

    Ok(())
}

#[tracing::instrument]
#[test_harness::test(harness = ut_harness)]
fn sanity_extra_checks() -> Result<()> {
    let tier1 = tier1_quorum_set();
    assert!(is_quorum_set_sane(&tier1, false));
    assert!(is_quorum_set_sane(&tier1, true));

    // Any single validator is v-blocking, it is not a majority.
    let any_of_three = qs(1, ["A", "B", "C"]);
    assert!(is_quorum_set_sane(&any_of_three, false));
    assert!(!is_quorum_set_sane(&any_of_three, true));

    Ok(())
}

#[tracing::instrument]
#[test_harness::test(harness = ut_harness)]
fn weight_of_nodes() -> Result<()> {
    tracing::info!("--- a node absent from the quorum set weighs 0");
    {
        for q in [qs(1, ["A"]), qs(2, ["A", "B", "C"]), tier1_quorum_set()] {
            assert_eq!(0, node_weight(&nid("Z"), &q));
        }
    }

    tracing::info!("--- tiered: 2/3 of the organization, 3/4 of the tier");
    {
        let q = tier1_quorum_set();
        for n in tier1_validators() {
            assert_eq!(u64::MAX / 2, node_weight(&n, &q), "weight of {}", n);
        }
    }

    Ok(())
}
