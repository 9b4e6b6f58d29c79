use anyhow::Result;
use fbas::scp::statement::Statement;
use fbas::scp::statement::StatementKind;
use fbas::scp::statement::StatementPayload;
use fbas::testing::envelope;
use fbas::testing::externalize;
use fbas::testing::prepare;
use fbas::Config;
use fbas::EnvelopeState;
use pretty_assertions::assert_eq;

use crate::fixtures::tier1_scp;
use crate::fixtures::tier1_validators;
use crate::fixtures::ut_harness;
use crate::fixtures::v;

/// The counter of the ballot a node is preparing, 0 for other statements.
fn prepared_counter(st: &Statement) -> u32 {
    match &st.payload {
        StatementPayload::Prepare { ballot, .. } => ballot.counter,
        _ => 0,
    }
}

#[tracing::instrument]
#[test_harness::test(harness = ut_harness)]
fn quorum_and_v_blocking_on_ballots() -> Result<()> {
    let (mut scp, h) = tier1_scp(v("sdf", 1), Config::default())?;

    let moved_on = |st: &Statement| prepared_counter(st) >= 2;
    let staying = |st: &Statement| prepared_counter(st) < 2;

    tracing::info!("--- every validator prepares ballot 1");
    {
        for n in tier1_validators() {
            scp.receive_envelope(envelope(prepare(&n, 3, h, 1)));
        }

        assert!(scp.is_quorum(3, |_| true));
        assert!(!scp.is_quorum(3, moved_on));
        assert!(!scp.is_v_blocking(3, moved_on));

        let want =
            vec![v("sdf", 2), v("sdf", 3), v("lobstr", 1), v("lobstr", 2)];
        assert_eq!(want, scp.find_closest_v_blocking(3, staying));
    }

    tracing::info!("--- sdf-3 moves on to ballot 2");
    {
        scp.receive_envelope(envelope(prepare(v("sdf", 3), 3, h, 2)));

        assert!(!scp.is_v_blocking(3, moved_on));

        let want = vec![v("sdf", 2), v("lobstr", 1), v("lobstr", 2)];
        assert_eq!(want, scp.find_closest_v_blocking(3, staying));
    }

    tracing::info!("--- sdf-2, lobstr-1 and lobstr-2 move on: v-blocking");
    {
        for n in [v("sdf", 2), v("lobstr", 1), v("lobstr", 2)] {
            scp.receive_envelope(envelope(prepare(&n, 3, h, 2)));
        }

        assert!(scp.is_v_blocking(3, moved_on));
        assert!(scp.find_closest_v_blocking(3, staying).is_empty());

        // Two organizations are not a quorum of a 3 of 4 tier.
        assert!(!scp.is_quorum(3, moved_on));
    }

    tracing::info!("--- satoshipay-1 and satoshipay-3 move on: quorum");
    {
        for n in [v("satoshipay", 1), v("satoshipay", 3)] {
            scp.receive_envelope(envelope(prepare(&n, 3, h, 2)));
        }

        assert!(scp.is_quorum(3, moved_on));
    }

    Ok(())
}

/// A node that externalized only trusts itself for the slot.
#[tracing::instrument]
#[test_harness::test(harness = ut_harness)]
fn quorum_of_externalized_nodes() -> Result<()> {
    let (mut scp, h) = tier1_scp(v("lobstr", 1), Config::default())?;

    let externalized =
        |st: &Statement| st.kind() == StatementKind::Externalize;

    let first =
        [v("sdf", 2), v("sdf", 3), v("satoshipay", 1), v("satoshipay", 2)];
    for n in first.iter() {
        let st = externalize(n, 9, h);
        assert_eq!(EnvelopeState::Valid, scp.receive_envelope(envelope(st)));
    }

    assert!(!scp.is_quorum(9, externalized));

    for n in [v("keybase", 1), v("keybase", 3)] {
        let st = externalize(&n, 9, h);
        assert_eq!(EnvelopeState::Valid, scp.receive_envelope(envelope(st)));
    }

    assert!(scp.is_quorum(9, externalized));

    Ok(())
}

#[tracing::instrument]
#[test_harness::test(harness = ut_harness)]
fn query_unknown_slot() -> Result<()> {
    let (scp, _h) = tier1_scp(v("sdf", 1), Config::default())?;

    assert!(scp.get_slot(100).is_none());
    assert!(!scp.is_quorum(100, |_| true));
    assert!(!scp.is_v_blocking(100, |_| true));

    // Nobody agrees, the local node is blocked already.
    assert!(scp.find_closest_v_blocking(100, |_| true).is_empty());

    Ok(())
}

#[tracing::instrument]
#[test_harness::test(harness = ut_harness)]
fn purge_old_slots() -> Result<()> {
    let (mut scp, h) = tier1_scp(v("sdf", 1), Config::default())?;

    for slot_index in 1..=5 {
        scp.receive_envelope(envelope(prepare(v("sdf", 2), slot_index, h, 1)));
    }
    assert_eq!(5, scp.slot_count());

    scp.purge_slots(4);

    assert_eq!(2, scp.slot_count());
    assert!(scp.get_slot(3).is_none());
    assert!(scp.get_slot(4).is_some());
    assert!(scp.get_slot(5).is_some());

    Ok(())
}
