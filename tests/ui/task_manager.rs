use crate::fake_backend::{account, cluster, cron_action, FakeBackend};
use nimbus::constants::SUCCESS_ACTION_DISABLED;
use nimbus::models::Operation;
use nimbus::schedule::{FormEffect, FormMsg, Submission};
use nimbus::service::actions::RowAction;
use nimbus::service::{Identity, InventoryService};
use nimbus::ui::core::{Action, TaskManager, View};
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc::UnboundedReceiver;

fn service(backend: Arc<FakeBackend>) -> InventoryService {
    InventoryService::new(backend, Identity::anonymous(), 100)
}

async fn next(rx: &mut UnboundedReceiver<Action>) -> Action {
    tokio::time::timeout(Duration::from_secs(2), rx.recv())
        .await
        .expect("timed out waiting for an action")
        .expect("channel closed")
}

#[tokio::test]
async fn test_view_load_carries_epoch() {
    let backend = Arc::new(FakeBackend {
        clusters: vec![cluster("c1", "a1"), cluster("c2", "a1")],
        ..Default::default()
    });
    let (mut tasks, mut rx) = TaskManager::new();

    tasks.spawn_view_load(service(backend), View::Clusters, 7);
    assert!(tasks.is_busy());

    match next(&mut rx).await {
        Action::ClustersLoaded { epoch, clusters } => {
            assert_eq!(epoch, 7);
            assert_eq!(clusters.len(), 2);
        }
        other => panic!("unexpected action {other:?}"),
    }
}

#[tokio::test]
async fn test_failed_row_action_reports_error() {
    let backend = Arc::new(FakeBackend {
        actions: Mutex::new(vec![cron_action("x1", "c1")]),
        fail_writes: true,
        ..Default::default()
    });
    let (mut tasks, mut rx) = TaskManager::new();

    tasks.spawn_row_action(service(backend), "x1".to_string(), RowAction::Enable, 3);

    match next(&mut rx).await {
        Action::RowActionFailed { epoch, message } => {
            assert_eq!(epoch, 3);
            assert!(message.contains("x1"));
            assert!(message.contains("boom"));
        }
        other => panic!("unexpected action {other:?}"),
    }
}

#[tokio::test]
async fn test_row_action_reload_failure_is_a_load_failure() {
    let backend = Arc::new(FakeBackend {
        actions: Mutex::new(vec![cron_action("x1", "c1")]),
        fail_action_list: AtomicBool::new(true),
        ..Default::default()
    });
    let (mut tasks, mut rx) = TaskManager::new();

    tasks.spawn_row_action(service(backend), "x1".to_string(), RowAction::Disable, 4);

    // The write went through, so it is reported as done
    assert!(matches!(next(&mut rx).await, Action::ShowInfo(ref m) if m == SUCCESS_ACTION_DISABLED));
    match next(&mut rx).await {
        Action::LoadFailed { view, epoch, message } => {
            assert_eq!(view, View::Schedules);
            assert_eq!(epoch, 4);
            assert!(message.contains("connection reset"));
        }
        other => panic!("unexpected action {other:?}"),
    }
}

#[tokio::test]
async fn test_row_action_reports_then_reloads() {
    let backend = Arc::new(FakeBackend {
        actions: Mutex::new(vec![cron_action("x1", "c1")]),
        ..Default::default()
    });
    let (mut tasks, mut rx) = TaskManager::new();

    tasks.spawn_row_action(service(backend), "x1".to_string(), RowAction::Disable, 2);

    assert!(matches!(next(&mut rx).await, Action::ShowInfo(ref m) if m == SUCCESS_ACTION_DISABLED));
    match next(&mut rx).await {
        Action::ActionsLoaded { epoch, actions } => {
            assert_eq!(epoch, 2);
            assert!(!actions[0].enabled);
        }
        other => panic!("unexpected action {other:?}"),
    }
}

#[tokio::test]
async fn test_form_effects() {
    let backend = Arc::new(FakeBackend {
        accounts: vec![account("a1", "prod")],
        clusters: vec![cluster("c1", "a1"), cluster("c2", "a2")],
        ..Default::default()
    });
    let (mut tasks, mut rx) = TaskManager::new();

    assert!(tasks.spawn_form_effect(service(backend.clone()), FormEffect::None).is_none());
    assert!(tasks.spawn_form_effect(service(backend.clone()), FormEffect::Reload).is_none());

    tasks.spawn_form_effect(service(backend.clone()), FormEffect::LoadAccounts { epoch: 1 });
    match next(&mut rx).await {
        Action::Schedule(FormMsg::AccountsLoaded { epoch, accounts }) => {
            assert_eq!(epoch, 1);
            assert_eq!(accounts[0].id, "a1");
        }
        other => panic!("unexpected action {other:?}"),
    }

    tasks.spawn_form_effect(
        service(backend.clone()),
        FormEffect::LoadClusters {
            account_id: "a2".to_string(),
            epoch: 4,
        },
    );
    match next(&mut rx).await {
        Action::Schedule(FormMsg::ClustersLoaded { epoch, clusters }) => {
            assert_eq!(epoch, 4);
            assert_eq!(clusters.len(), 1);
            assert_eq!(clusters[0].id, "c2");
        }
        other => panic!("unexpected action {other:?}"),
    }
}

#[tokio::test]
async fn test_submit_reports_outcome() {
    let backend = Arc::new(FakeBackend {
        fail_writes: true,
        ..Default::default()
    });
    let (mut tasks, mut rx) = TaskManager::new();

    tasks.spawn_form_effect(
        service(backend),
        FormEffect::Submit {
            submission: Submission::PowerNow {
                cluster_id: "c1".to_string(),
                operation: Operation::PowerOn,
            },
            epoch: 5,
        },
    );

    assert!(matches!(
        next(&mut rx).await,
        Action::Schedule(FormMsg::SubmitFailed { epoch: 5, .. })
    ));
}

#[tokio::test]
async fn test_fire_sends_nothing_back() {
    let backend = Arc::new(FakeBackend::new());
    let (mut tasks, mut rx) = TaskManager::new();

    tasks.spawn_form_effect(
        service(backend.clone()),
        FormEffect::Fire(Submission::PowerNow {
            cluster_id: "c1".to_string(),
            operation: Operation::PowerOff,
        }),
    );

    while tasks.is_busy() {
        tokio::time::sleep(Duration::from_millis(5)).await;
        tasks.cleanup_finished_tasks();
    }

    assert!(rx.try_recv().is_err());
    assert_eq!(backend.calls(), vec!["power_off:c1"]);
}

#[tokio::test]
async fn test_cleanup_drops_finished_tasks() {
    let backend = Arc::new(FakeBackend::new());
    let (mut tasks, mut rx) = TaskManager::new();

    tasks.spawn_overview_load(service(backend.clone()));
    tasks.spawn_view_load(service(backend), View::Events, 1);
    assert_eq!(tasks.task_count(), 2);

    next(&mut rx).await;
    next(&mut rx).await;

    let mut finished = Vec::new();
    while finished.len() < 2 {
        finished.extend(tasks.cleanup_finished_tasks());
        tokio::task::yield_now().await;
    }
    finished.sort();
    assert_eq!(finished, vec![1, 2]);
    assert!(!tasks.is_busy());
}
