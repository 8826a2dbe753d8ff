use nimbus::utils::debounce::Debouncer;
use std::time::Duration;
use tokio::sync::mpsc;

#[tokio::test(start_paused = true)]
async fn test_only_last_value_is_delivered() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut debouncer = Debouncer::new(Duration::from_millis(300), tx);

    debouncer.call("c");
    tokio::time::sleep(Duration::from_millis(100)).await;
    debouncer.call("cl");
    tokio::time::sleep(Duration::from_millis(100)).await;
    debouncer.call("clu");
    assert!(debouncer.is_pending());

    tokio::time::sleep(Duration::from_millis(350)).await;

    assert_eq!(rx.recv().await, Some("clu"));
    assert!(rx.try_recv().is_err());
    assert!(!debouncer.is_pending());
}

#[tokio::test(start_paused = true)]
async fn test_nothing_delivered_before_delay() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut debouncer = Debouncer::new(Duration::from_millis(300), tx);

    debouncer.call(1);
    tokio::time::sleep(Duration::from_millis(299)).await;
    assert!(rx.try_recv().is_err());

    tokio::time::sleep(Duration::from_millis(2)).await;
    assert_eq!(rx.recv().await, Some(1));
}

#[tokio::test(start_paused = true)]
async fn test_cancel_drops_pending_value() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut debouncer = Debouncer::new(Duration::from_millis(50), tx);

    debouncer.call("stale");
    debouncer.cancel();
    tokio::time::sleep(Duration::from_millis(100)).await;

    assert!(rx.try_recv().is_err());
}

#[tokio::test(start_paused = true)]
async fn test_drop_cancels_pending_value() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    {
        let mut debouncer = Debouncer::new(Duration::from_millis(50), tx);
        debouncer.call("gone");
    }
    tokio::time::sleep(Duration::from_millis(100)).await;

    // The sender went away with the aborted task
    assert_eq!(rx.recv().await, None);
}
