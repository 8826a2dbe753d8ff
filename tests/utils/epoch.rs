use nimbus::utils::epoch::FetchEpoch;

#[test]
fn test_latest_epoch_wins() {
    let epoch = FetchEpoch::new();
    let first = epoch.begin();
    let second = epoch.begin();

    assert!(!epoch.is_current(first));
    assert!(epoch.is_current(second));
}

#[test]
fn test_invalidate_makes_everything_stale() {
    let epoch = FetchEpoch::new();
    let started = epoch.begin();
    epoch.invalidate();

    assert!(!epoch.is_current(started));
}

#[test]
fn test_clones_share_the_counter() {
    let epoch = FetchEpoch::new();
    let handle = epoch.clone();

    let started = epoch.begin();
    assert!(handle.is_current(started));

    handle.begin();
    assert!(!epoch.is_current(started));
}
