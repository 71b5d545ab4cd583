//! World transfer scenarios driven through a full runtime.
mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{FakeSwitcher, Fixture};
use runtime::{
    CollaboratorKind, Event, ExternalEvent, Routed, Runtime, RuntimeConfig, RuntimeError, Topic,
    TransferEvent,
};
use world_core::{
    AdvanceOutcome, RequestOutcome, RequestRejection, SessionState, TrackerConfig, TransferState,
    WorldId,
};

#[tokio::test]
async fn request_to_current_world_is_rejected_and_idle() {
    let fixture = Fixture::new();
    let (switcher, log) = FakeSwitcher::ready_on(1);
    let runtime = fixture.start(switcher).await;
    let handle = runtime.handle();

    let outcome = handle.request_transfer(WorldId(301)).await.unwrap();

    assert_eq!(
        outcome,
        RequestOutcome::Rejected(RequestRejection::AlreadyOnWorld(WorldId(301)))
    );
    assert_eq!(handle.transfer_state().await.unwrap(), TransferState::Idle);
    assert_eq!(
        fixture.notifier.messages(),
        vec!["World Hopper: You are already on World 301".to_owned()]
    );

    runtime.ingest(ExternalEvent::Tick).await.unwrap();
    assert_eq!(log.lock().unwrap().probes, 0);

    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn never_ready_switcher_aborts_exactly_once() {
    let fixture = Fixture::new();
    let (switcher, log) = FakeSwitcher::never_ready();
    let runtime = fixture.start(switcher).await;
    let handle = runtime.handle();
    let mut transfer_rx = runtime.subscribe(Topic::Transfer);

    let outcome = handle.request_transfer(WorldId(302)).await.unwrap();
    assert_eq!(
        outcome,
        RequestOutcome::Accepted {
            target: WorldId(302),
            replaced: None
        }
    );

    let mut outcomes = Vec::new();
    for _ in 0..10 {
        outcomes.push(handle.advance().await.unwrap());
    }

    let aborts = outcomes
        .iter()
        .filter(|o| matches!(o, AdvanceOutcome::Aborted { .. }))
        .count();
    assert_eq!(aborts, 1);
    assert_eq!(
        outcomes[9],
        AdvanceOutcome::Aborted {
            target: WorldId(302),
            attempts: 10
        }
    );
    assert_eq!(handle.transfer_state().await.unwrap(), TransferState::Idle);

    assert_eq!(handle.advance().await.unwrap(), AdvanceOutcome::Idle);
    {
        let log = log.lock().unwrap();
        assert_eq!(log.prepares, 10);
        assert!(log.executed.is_empty());
    }

    let messages = fixture.notifier.messages();
    assert_eq!(
        messages.last().map(String::as_str),
        Some(
            "World Hopper: Failed to quick-hop after 10 attempts. Aborting hop target. (Game likely blocking the hop)"
        )
    );

    let mut aborted_events = 0;
    while let Ok(event) = transfer_rx.try_recv() {
        if matches!(event, Event::Transfer(TransferEvent::Aborted { .. })) {
            aborted_events += 1;
        }
    }
    assert_eq!(aborted_events, 1);

    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn switcher_ready_on_third_probe_hops_once() {
    let fixture = Fixture::new();
    let (switcher, log) = FakeSwitcher::ready_on(3);
    let runtime = fixture.start(switcher).await;
    let handle = runtime.handle();

    handle.request_transfer(WorldId(303)).await.unwrap();

    let first = runtime.ingest(ExternalEvent::Tick).await.unwrap();
    let second = runtime.ingest(ExternalEvent::Tick).await.unwrap();
    assert_eq!(
        second,
        Routed::Ticked(AdvanceOutcome::Probed {
            target: WorldId(303),
            attempts: 2
        })
    );
    assert!(matches!(first, Routed::Ticked(AdvanceOutcome::Probed { attempts: 1, .. })));

    let third = runtime.ingest(ExternalEvent::Tick).await.unwrap();
    assert_eq!(
        third,
        Routed::Ticked(AdvanceOutcome::Succeeded {
            target: WorldId(303),
            attempts: 2
        })
    );

    {
        let log = log.lock().unwrap();
        assert_eq!(log.prepares, 2);
        assert_eq!(log.executed, vec![WorldId(303)]);
    }
    assert_eq!(handle.transfer_state().await.unwrap(), TransferState::Idle);

    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn new_target_discards_probe_progress() {
    let fixture = Fixture::new();
    let (switcher, _log) = FakeSwitcher::never_ready();
    let runtime = fixture.start(switcher).await;
    let handle = runtime.handle();

    handle.request_transfer(WorldId(302)).await.unwrap();
    handle.advance().await.unwrap();
    handle.advance().await.unwrap();
    assert_eq!(handle.transfer_state().await.unwrap().attempts(), 2);

    let same = handle.request_transfer(WorldId(302)).await.unwrap();
    assert_eq!(
        same,
        RequestOutcome::AlreadyInProgress {
            target: WorldId(302),
            attempts: 2
        }
    );

    let replaced = handle.request_transfer(WorldId(304)).await.unwrap();
    assert_eq!(
        replaced,
        RequestOutcome::Accepted {
            target: WorldId(304),
            replaced: Some(WorldId(302))
        }
    );
    assert_eq!(
        handle.transfer_state().await.unwrap(),
        TransferState::Probing {
            target: WorldId(304),
            attempts: 0
        }
    );

    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn precondition_failures_notify_once_and_change_nothing() {
    let fixture = Fixture::new();
    let (switcher, _log) = FakeSwitcher::ready_on(1);
    let runtime = fixture.start(switcher).await;
    let handle = runtime.handle();

    fixture.session.set_enabled(false);
    let outcome = handle.request_transfer(WorldId(302)).await.unwrap();
    assert_eq!(
        outcome,
        RequestOutcome::Rejected(RequestRejection::FeatureDisabled)
    );

    fixture.session.set_enabled(true);
    fixture.session.set_state(SessionState::Loading);
    let outcome = handle.request_transfer(WorldId(302)).await.unwrap();
    assert_eq!(outcome, RequestOutcome::Rejected(RequestRejection::NotLoggedIn));

    fixture.session.set_state(SessionState::LoggedIn);
    let outcome = handle.request_transfer(WorldId(999)).await.unwrap();
    assert_eq!(
        outcome,
        RequestOutcome::Rejected(RequestRejection::UnknownWorld(WorldId(999)))
    );

    assert_eq!(handle.transfer_state().await.unwrap(), TransferState::Idle);
    assert_eq!(
        fixture.notifier.messages(),
        vec![
            "World Hopper: World hopping is disabled in the configuration.".to_owned(),
            "World Hopper: Cannot quick-hop while not logged in or at login screen.".to_owned(),
            "World Hopper: World 999 not found in the world list. Cannot hop.".to_owned(),
        ]
    );

    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn hop_blocked_keeps_target_for_next_tick() {
    let fixture = Fixture::new();
    let (switcher, log) = FakeSwitcher::ready_on(2);
    let runtime = fixture.start(switcher).await;
    let handle = runtime.handle();

    handle.request_transfer(WorldId(302)).await.unwrap();
    runtime.ingest(ExternalEvent::Tick).await.unwrap();

    let routed = runtime
        .ingest(ExternalEvent::ChatMessage {
            channel: runtime::ChatChannel::GameMessage,
            text: TrackerConfig::DEFAULT_HOP_BLOCKED_MESSAGE.to_owned(),
        })
        .await
        .unwrap();
    assert_eq!(routed, Routed::HopBlocked);
    assert_eq!(
        handle.transfer_state().await.unwrap(),
        TransferState::Probing {
            target: WorldId(302),
            attempts: 1
        }
    );
    assert!(
        fixture
            .notifier
            .messages()
            .iter()
            .any(|m| m.starts_with("World Hopper: Hop blocked by game"))
    );

    let routed = runtime.ingest(ExternalEvent::Tick).await.unwrap();
    assert!(matches!(
        routed,
        Routed::Ticked(AdvanceOutcome::Succeeded { .. })
    ));
    assert_eq!(log.lock().unwrap().executed, vec![WorldId(302)]);

    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn login_screen_request_switches_without_probing() {
    let fixture = Fixture::new();
    fixture.session.set_state(SessionState::LoginScreen);
    let (switcher, log) = FakeSwitcher::never_ready();
    let runtime = fixture.start(switcher).await;
    let handle = runtime.handle();

    let outcome = handle.request_transfer(WorldId(303)).await.unwrap();

    assert_eq!(
        outcome,
        RequestOutcome::SwitchedAtLogin {
            target: WorldId(303),
            replaced: None
        }
    );
    assert_eq!(handle.transfer_state().await.unwrap(), TransferState::Idle);
    {
        let log = log.lock().unwrap();
        assert_eq!(log.changed, vec![WorldId(303)]);
        assert_eq!(log.probes, 0);
    }

    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn login_screen_switch_reports_dropped_transfer() {
    let fixture = Fixture::new();
    let (switcher, log) = FakeSwitcher::never_ready();
    let runtime = fixture.start(switcher).await;
    let handle = runtime.handle();
    let mut transfer_rx = runtime.subscribe(Topic::Transfer);

    handle.request_transfer(WorldId(302)).await.unwrap();
    handle.advance().await.unwrap();

    fixture.session.set_state(SessionState::LoginScreen);
    let outcome = handle.request_transfer(WorldId(303)).await.unwrap();

    assert_eq!(
        outcome,
        RequestOutcome::SwitchedAtLogin {
            target: WorldId(303),
            replaced: Some(WorldId(302))
        }
    );
    assert_eq!(handle.transfer_state().await.unwrap(), TransferState::Idle);
    assert_eq!(log.lock().unwrap().changed, vec![WorldId(303)]);

    let mut switched = None;
    while let Ok(event) = transfer_rx.try_recv() {
        if let Event::Transfer(TransferEvent::SwitchedAtLogin { replaced, .. }) = event {
            switched = Some(replaced);
        }
    }
    assert_eq!(switched, Some(Some(WorldId(302))));

    runtime.shutdown().await.unwrap();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_requests_and_ticks_never_overlap_on_the_switcher() {
    let fixture = Fixture::new();
    let (switcher, log) = FakeSwitcher::never_ready();
    let config = RuntimeConfig {
        tracker: TrackerConfig::new().with_max_transfer_attempts(1_000),
        event_buffer_size: 4_096,
        ..RuntimeConfig::default()
    };
    let runtime = fixture.start_with(switcher, config).await;
    let mut transfer_rx = runtime.subscribe(Topic::Transfer);

    let mut tasks = Vec::new();
    for n in 0..8u32 {
        let handle = runtime.handle();
        let ingestor = runtime.ingestor();
        let target = WorldId(302 + n % 3);
        tasks.push(tokio::spawn(async move {
            for i in 0..25u32 {
                if (n + i) % 3 == 0 {
                    handle.request_transfer(target).await.unwrap();
                } else {
                    ingestor.ingest(ExternalEvent::Tick).await.unwrap();
                }
            }
        }));
    }

    for task in tasks {
        task.await.unwrap();
    }

    let state = runtime.handle().transfer_state().await.unwrap();
    assert!(!state.is_idle());
    assert!(!log.lock().unwrap().overlapped);

    let mut replacements = 0;
    while let Ok(event) = transfer_rx.try_recv() {
        if let Event::Transfer(TransferEvent::Requested {
            replaced: Some(previous),
            target,
        }) = event
        {
            assert_ne!(previous, target);
            replacements += 1;
        }
    }
    assert!(replacements > 0);

    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn shutdown_clears_in_flight_transfer_and_registry() {
    let fixture = Fixture::new();
    let (switcher, _log) = FakeSwitcher::never_ready();
    let runtime = fixture.start(switcher).await;
    let handle = runtime.handle();
    let mut transfer_rx = runtime.subscribe(Topic::Transfer);

    handle.request_transfer(WorldId(302)).await.unwrap();
    assert!(!runtime.registry().is_empty());

    runtime.shutdown().await.unwrap();

    let mut cleared = false;
    while let Ok(event) = transfer_rx.try_recv() {
        if event == Event::Transfer(TransferEvent::Cleared { target: WorldId(302) }) {
            cleared = true;
        }
    }
    assert!(cleared);
    assert!(handle.registry().is_empty());
    assert!(matches!(
        handle.advance().await,
        Err(RuntimeError::CommandChannelClosed)
    ));
}

#[tokio::test]
async fn built_in_ticker_drives_the_transfer() {
    let fixture = Fixture::new();
    let (switcher, log) = FakeSwitcher::ready_on(2);
    let runtime = Runtime::builder()
        .config(RuntimeConfig {
            tick_interval: Some(Duration::from_millis(10)),
            ..RuntimeConfig::default()
        })
        .world_list(fixture.worlds.clone())
        .session_gate(fixture.session.clone())
        .transfer_resource(switcher)
        .notifier(fixture.notifier.clone())
        .build()
        .await
        .unwrap();
    let mut transfer_rx = runtime.subscribe(Topic::Transfer);

    runtime.handle().request_transfer(WorldId(304)).await.unwrap();

    let succeeded = tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            match transfer_rx.recv().await {
                Ok(Event::Transfer(TransferEvent::Succeeded { target, .. })) => break target,
                Ok(_) => continue,
                Err(error) => panic!("transfer topic closed: {error}"),
            }
        }
    })
    .await
    .expect("ticker should complete the hop");

    assert_eq!(succeeded, WorldId(304));
    assert_eq!(log.lock().unwrap().executed, vec![WorldId(304)]);

    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn builder_requires_core_collaborators() {
    let fixture = Fixture::new();

    let result = Runtime::builder()
        .world_list(fixture.worlds.clone())
        .session_gate(fixture.session.clone())
        .build()
        .await;

    assert!(matches!(
        result,
        Err(RuntimeError::MissingCollaborator {
            kind: CollaboratorKind::TransferResource
        })
    ));

    let result = Runtime::builder()
        .session_gate(fixture.session.clone() as Arc<dyn world_core::SessionGate>)
        .build()
        .await;
    assert!(matches!(
        result,
        Err(RuntimeError::MissingCollaborator {
            kind: CollaboratorKind::WorldList
        })
    ));
}
