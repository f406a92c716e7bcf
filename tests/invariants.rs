// SPDX-License-Identifier: MPL-2.0
//! Property tests: random sequences of manager operations must never break
//! the presentation invariants.

use std::collections::HashMap;
use std::time::Duration;

use agora_toast::domain::toast::{
    DismissalMethod, PresentationState, PresentationStateKind, Priority, ToastId, ToastItem,
    ToastPolicy,
};
use agora_toast::notifications::{ManagerSnapshot, ToastManager};
use agora_toast::telemetry::TelemetryEvent;
use agora_toast::test_utils::{RecordedEvent, RecordingRouter, RecordingTelemetry};
use proptest::prelude::*;
use tokio::time::sleep;

#[derive(Debug, Clone)]
enum Op {
    Show {
        priority: Priority,
        key: Option<u8>,
        duration_secs: u64,
    },
    Dismiss(usize),
    DismissAll,
    UserDismiss,
    Advance(u64),
    Background,
    Foreground,
}

fn priority_strategy() -> impl Strategy<Value = Priority> {
    prop_oneof![
        6 => Just(Priority::Normal),
        2 => Just(Priority::Elevated),
        1 => Just(Priority::Critical),
    ]
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        5 => (priority_strategy(), prop::option::of(0u8..3), 1u64..=4).prop_map(
            |(priority, key, duration_secs)| Op::Show {
                priority,
                key,
                duration_secs,
            }
        ),
        1 => (0usize..64).prop_map(Op::Dismiss),
        1 => Just(Op::DismissAll),
        1 => Just(Op::UserDismiss),
        3 => (0u64..1_500).prop_map(Op::Advance),
        1 => Just(Op::Background),
        1 => Just(Op::Foreground),
    ]
}

/// Ids that still count as the live representative of their dedupe key.
/// Toasts on their way out (dismissing, or about to be preempted) are not.
fn live_ids(snapshot: &ManagerSnapshot) -> Vec<ToastId> {
    let mut ids = match snapshot.state {
        PresentationState::Presenting(id) => vec![id],
        PresentationState::Interrupted { next, .. } => vec![next],
        PresentationState::Idle | PresentationState::Dismissing { .. } => Vec::new(),
    };
    ids.extend(&snapshot.queued);
    ids.extend(&snapshot.restoration);
    ids
}

fn check_snapshot(
    snapshot: &ManagerSnapshot,
    keys: &HashMap<ToastId, u8>,
    max_queue: usize,
) -> Result<(), TestCaseError> {
    prop_assert!(
        snapshot.queued.len() <= max_queue,
        "queue holds {} items, bound is {}",
        snapshot.queued.len(),
        max_queue
    );

    let mut per_key: HashMap<u8, ToastId> = HashMap::new();
    for id in live_ids(snapshot) {
        if let Some(key) = keys.get(&id) {
            if let Some(existing) = per_key.insert(*key, id) {
                prop_assert_eq!(existing, id, "two live toasts share key {}", key);
            }
        }
    }
    Ok(())
}

/// Walks the event stream: shown and dismissed must strictly alternate, with
/// coalescing into the visible toast carrying its identity forward.
fn check_dismissal_pairing(events: &[TelemetryEvent]) -> Result<(), TestCaseError> {
    let mut on_screen: Option<ToastId> = None;
    for event in events {
        match *event {
            TelemetryEvent::ToastShown { id, .. } => {
                prop_assert_eq!(on_screen, None, "{} shown over another toast", id);
                on_screen = Some(id);
            }
            TelemetryEvent::ToastDismissed { id, .. } => {
                prop_assert_eq!(on_screen, Some(id), "unexpected dismissal of {}", id);
                on_screen = None;
            }
            TelemetryEvent::ToastCoalesced { original, updated } => {
                if on_screen == Some(original) {
                    on_screen = Some(updated);
                }
            }
            TelemetryEvent::ToastDropped { .. } | TelemetryEvent::StateTransition { .. } => {}
        }
    }
    prop_assert_eq!(on_screen, None, "a toast was never dismissed");
    Ok(())
}

/// Consecutive presentation starts respect the minimum interval unless the
/// later one is critical or came in through preemption.
fn check_rate_limit(
    events: &[RecordedEvent],
    priorities: &HashMap<ToastId, Priority>,
    interval: Duration,
) -> Result<(), TestCaseError> {
    let mut previous = None;
    for (index, recorded) in events.iter().enumerate() {
        let TelemetryEvent::ToastShown { id, .. } = recorded.event else {
            continue;
        };
        let critical = priorities.get(&id) == Some(&Priority::Critical);
        let preempted = matches!(
            events.get(index + 1).map(|next| &next.event),
            Some(TelemetryEvent::StateTransition {
                from: PresentationStateKind::Interrupted,
                to: PresentationStateKind::Presenting,
            })
        );
        if let Some(previous) = previous {
            if !preempted && !critical {
                let gap = recorded.at - previous;
                prop_assert!(gap >= interval, "presentations only {:?} apart", gap);
            }
        }
        previous = Some(recorded.at);
    }
    Ok(())
}

async fn exercise(ops: Vec<Op>, max_queue: usize) -> Result<(), TestCaseError> {
    // A window longer than any generated run keeps every key claim fresh.
    let policy = ToastPolicy::builder()
        .max_queue_size(max_queue)
        .coalescing_window(Duration::from_secs(60))
        .build()
        .expect("valid policy");
    let router = RecordingRouter::new();
    let telemetry = RecordingTelemetry::new();
    let manager = ToastManager::builder(policy, router.clone())
        .telemetry(telemetry.clone())
        .spawn();

    let mut keys = HashMap::new();
    let mut priorities = HashMap::new();
    let mut submitted = Vec::new();

    for op in ops {
        match op {
            Op::Show {
                priority,
                key,
                duration_secs,
            } => {
                let mut item = ToastItem::info(format!("toast {}", submitted.len()))
                    .with_priority(priority)
                    .with_duration(Duration::from_secs(duration_secs));
                if let Some(key) = key {
                    item = item.with_dedupe_key(format!("key-{key}"));
                    keys.insert(item.id(), key);
                }
                priorities.insert(item.id(), priority);
                submitted.push(item.id());
                manager.show(item).await;
            }
            Op::Dismiss(index) => {
                if !submitted.is_empty() {
                    manager.dismiss(submitted[index % submitted.len()]).await;
                }
            }
            Op::DismissAll => manager.dismiss_all().await,
            Op::UserDismiss => {
                router.user_dismiss(DismissalMethod::UserTap);
            }
            Op::Advance(ms) => sleep(Duration::from_millis(ms)).await,
            Op::Background => manager.enter_background().await,
            Op::Foreground => manager.enter_foreground().await,
        }

        let snapshot = manager.snapshot().await.expect("manager is running");
        check_snapshot(&snapshot, &keys, max_queue)?;
        prop_assert!(!router.overlapped(), "router asked to present twice");
    }

    // Everything admitted eventually drains.
    manager.enter_foreground().await;
    sleep(Duration::from_secs(120)).await;
    let snapshot = manager.snapshot().await.expect("manager is running");
    prop_assert!(snapshot.state.is_idle(), "stuck in {:?}", snapshot.state);
    prop_assert!(snapshot.queued.is_empty());
    prop_assert!(snapshot.restoration.is_empty());

    check_dismissal_pairing(&telemetry.events())?;
    check_rate_limit(
        &telemetry.timed_events(),
        &priorities,
        policy.minimum_interval(),
    )?;
    Ok(())
}

fn run(ops: Vec<Op>, max_queue: usize) -> Result<(), TestCaseError> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .start_paused(true)
        .build()
        .expect("failed to build runtime");
    runtime.block_on(exercise(ops, max_queue))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(96))]

    #[test]
    fn random_operations_preserve_invariants(
        ops in prop::collection::vec(op_strategy(), 1..40),
        max_queue in 0usize..4,
    ) {
        run(ops, max_queue)?;
    }
}
