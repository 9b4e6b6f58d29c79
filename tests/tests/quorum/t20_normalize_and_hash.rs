use anyhow::Result;
use fbas::hash_quorum_set;
use fbas::normalize;
use fbas::testing::qs;
use fbas::QuorumSet;
use pretty_assertions::assert_eq;

use crate::fixtures::tier1_quorum_set;
use crate::fixtures::ut_harness;

/// `{t:1, [], {t:1, [A]}}` normalizes to `{t:1, [A]}`.
#[tracing::instrument]
#[test_harness::test(harness = ut_harness)]
fn normalize_wrapped_singleton() -> Result<()> {
    let q = QuorumSet::new(1, vec![], vec![qs(1, ["A"])]);

    let n = normalize(&q);
    assert_eq!(qs(1, ["A"]), n);
    assert_eq!(n, normalize(&n));

    Ok(())
}

/// A quorum set loaded from json hashes the same as its equivalent built in
/// code, whatever the member order.
#[tracing::instrument]
#[test_harness::test(harness = ut_harness)]
fn hash_of_json_quorum_set() -> Result<()> {
    let json = r#"{
        "t": 3,
        "innerSets": [
            {"t": 2, "v": ["keybase-3", "keybase-2", "keybase-1"]},
            {"t": 2, "v": ["sdf-1", "sdf-2", "sdf-3"]},
            {"t": 2, "v": ["satoshipay-2", "satoshipay-1", "satoshipay-3"]},
            {"t": 2, "v": ["lobstr-1", "lobstr-3", "lobstr-2"]}
        ]
    }"#;

    let loaded: QuorumSet = serde_json::from_str(json)?;
    let built = tier1_quorum_set();

    tracing::info!("--- as is, the member order matters");
    {
        assert_ne!(loaded, built);
        assert_ne!(hash_quorum_set(&loaded)?, hash_quorum_set(&built)?);
    }

    tracing::info!("--- normalized, it does not");
    {
        assert_eq!(normalize(&loaded), normalize(&built));
        assert_eq!(loaded.content_hash()?, built.content_hash()?);
    }

    tracing::info!("--- wrapping in a single-entry level does not change it");
    {
        let wrapped = QuorumSet::new(1, vec![], vec![loaded.clone()]);
        assert_eq!(loaded.content_hash()?, wrapped.content_hash()?);
    }

    Ok(())
}
