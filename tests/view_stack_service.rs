//! Integration tests for the page view stack service

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::*;
use viewstack::view::view_type_name;
use viewstack::{
    HostNavigation, NavigationError, NavigationParameter, NavigatorConfig, PageHandle,
    View, ViewModel, ViewStackService,
};

#[tokio::test]
async fn test_push_records_stack_in_order() {
    let (service, host) = Fixture::new().pages();
    let (a, b, c) = (vm::<Alpha>(), vm::<Beta>(), vm::<Gamma>());

    service.push(a.clone(), None, true).await.unwrap();
    service.push(b.clone(), None, true).await.unwrap();
    service.push(c.clone(), None, true).await.unwrap();

    assert_eq!(ids(&service.current_stack()), vec![a.id(), b.id(), c.id()]);
    assert_eq!(service.top().map(|top| top.id()), Some(c.id()));
    assert_eq!(host.depth(), 3);
}

#[tokio::test]
async fn test_n_pushes_then_n_pops_returns_to_empty() {
    let (service, host) = Fixture::new().pages();
    let mut pushed = service.pushed();
    let mut popped = service.popped();

    let view_models: Vec<Arc<dyn ViewModel>> = (0..5).map(|_| vm::<Alpha>()).collect();
    for view_model in &view_models {
        service.push(view_model.clone(), None, true).await.unwrap();
    }
    for _ in 0..view_models.len() {
        service.pop(true).await.unwrap();
    }

    assert!(service.current_stack().is_empty());
    assert_eq!(host.depth(), 0);

    let pushed = drain(&mut pushed);
    let popped = drain(&mut popped);
    assert_eq!(pushed.len(), 5);
    assert_eq!(popped.len(), 5);

    let expected: Vec<_> = ids(&view_models).into_iter().map(Some).collect();
    assert_eq!(pushed.iter().map(event_id).collect::<Vec<_>>(), expected);
    let mut reversed = expected.clone();
    reversed.reverse();
    assert_eq!(popped.iter().map(event_id).collect::<Vec<_>>(), reversed);
}

#[tokio::test]
async fn test_pop_returns_departed_view_model() {
    let (service, _host) = Fixture::new().pages();
    let (a, b) = (vm::<Alpha>(), vm::<Beta>());
    service.push(a.clone(), None, false).await.unwrap();
    service.push(b.clone(), None, false).await.unwrap();

    let departed = service.pop(false).await.unwrap();
    assert_eq!(departed.map(|view_model| view_model.id()), Some(b.id()));
    assert_eq!(ids(&service.current_stack()), vec![a.id()]);
}

#[tokio::test]
async fn test_pop_all_clears_with_single_popped_event() {
    let (service, host) = Fixture::new().pages();
    let (a, b, c) = (vm::<Alpha>(), vm::<Beta>(), vm::<Gamma>());
    for view_model in [&a, &b, &c] {
        service.push(view_model.clone(), None, true).await.unwrap();
    }

    let mut popped = service.popped();
    let departed = service.pop_all(true).await.unwrap();

    assert!(service.current_stack().is_empty());
    assert_eq!(host.depth(), 0);
    assert_eq!(ids(&departed), vec![a.id(), b.id(), c.id()]);

    let events = drain(&mut popped);
    assert_eq!(events.len(), 1);
    assert_eq!(event_id(&events[0]), Some(c.id()));
}

#[tokio::test]
async fn test_remove_from_middle_of_stack() {
    let (service, host) = Fixture::new().pages();
    let (a, b, c) = (vm::<Alpha>(), vm::<Beta>(), vm::<Gamma>());
    for view_model in [&a, &b, &c] {
        service.push(view_model.clone(), None, true).await.unwrap();
    }

    let mut popping = service.popping();
    let mut popped = service.popped();
    service.remove(&b, None, true).await.unwrap();

    assert_eq!(ids(&service.current_stack()), vec![a.id(), c.id()]);
    assert_eq!(host.depth(), 2);

    let removal_events: Vec<_> = drain(&mut popping)
        .into_iter()
        .chain(drain(&mut popped))
        .collect();
    assert_eq!(removal_events.len(), 1);
    assert_eq!(event_id(&removal_events[0]), Some(b.id()));
}

#[tokio::test]
async fn test_remove_absent_view_model_fails_and_keeps_stack() {
    let (service, host) = Fixture::new().pages();
    let a = vm::<Alpha>();
    service.push(a.clone(), None, false).await.unwrap();

    let result = service.remove(&vm::<Beta>(), None, false).await;
    assert!(matches!(result, Err(NavigationError::ItemNotFound { .. })));
    assert_eq!(ids(&service.current_stack()), vec![a.id()]);
    assert_eq!(host.depth(), 1);
}

#[tokio::test]
async fn test_remove_on_empty_stack_reports_empty() {
    let (service, _host) = Fixture::new().pages();
    let result = service.remove(&vm::<Alpha>(), None, false).await;
    assert!(matches!(result, Err(NavigationError::EmptyStack)));
}

#[tokio::test]
async fn test_current_stack_reads_are_stable() {
    let (service, _host) = Fixture::new().pages();
    service.push(vm::<Alpha>(), None, false).await.unwrap();
    service.push(vm::<Beta>(), None, false).await.unwrap();

    let first = ids(&service.current_stack());
    let second = ids(&service.current_stack());
    assert_eq!(first, second);
    assert_eq!(service.snapshot().version(), 2);
}

#[tokio::test]
async fn test_late_subscriber_does_not_see_earlier_pushes() {
    let (service, _host) = Fixture::new().pages();
    service.push(vm::<Alpha>(), None, true).await.unwrap();
    service.push(vm::<Beta>(), None, true).await.unwrap();

    let mut pushing = service.pushing();
    assert!(drain(&mut pushing).is_empty());

    let c = vm::<Gamma>();
    service.push(c.clone(), None, true).await.unwrap();
    let events = drain(&mut pushing);
    assert_eq!(events.len(), 1);
    assert_eq!(event_id(&events[0]), Some(c.id()));
}

#[tokio::test]
async fn test_every_subscriber_receives_full_sequence() {
    let (service, _host) = Fixture::new().pages();
    let mut first = service.pushed();
    let mut second = service.pushed();

    let (a, b) = (vm::<Alpha>(), vm::<Beta>());
    service.push(a.clone(), None, true).await.unwrap();
    service.push(b.clone(), None, true).await.unwrap();

    for receiver in [&mut first, &mut second] {
        let events = drain(receiver);
        assert_eq!(
            events.iter().map(event_id).collect::<Vec<_>>(),
            vec![Some(a.id()), Some(b.id())]
        );
    }
}

#[tokio::test]
async fn test_unregistered_view_rejects_push_without_touching_host() {
    let (service, host) = Fixture::new().pages();
    service.push(vm::<Alpha>(), None, false).await.unwrap();
    let before = ids(&service.current_stack());
    let operations = host.operation_count();
    let mut pushing = service.pushing();

    let result = service.push(vm::<Unregistered>(), None, true).await;

    match result {
        Err(error @ NavigationError::ViewResolution { .. }) => assert!(error.is_fail_fast()),
        other => panic!("expected a resolution error, got {:?}", other),
    }
    assert_eq!(ids(&service.current_stack()), before);
    assert_eq!(host.operation_count(), operations);
    assert!(drain(&mut pushing).is_empty());
}

#[tokio::test]
async fn test_unknown_contract_is_a_resolution_error() {
    let (service, host) = Fixture::new().pages();
    let result = service.push(vm::<Beta>(), Some("compact"), false).await;
    match result {
        Err(NavigationError::ViewResolution { contract, .. }) => {
            assert_eq!(contract.as_deref(), Some("compact"))
        }
        other => panic!("expected a resolution error, got {:?}", other),
    }
    assert_eq!(host.depth(), 0);
}

#[tokio::test]
async fn test_popup_registration_cannot_be_pushed_as_page() {
    let (service, host) = Fixture::new().pages();
    let result = service.push(vm::<Dialog>(), None, false).await;

    match result {
        Err(NavigationError::ViewResolution { reason, .. }) => {
            assert!(reason.contains("popup"), "reason: {}", reason)
        }
        other => panic!("expected a resolution error, got {:?}", other),
    }
    assert_eq!(host.operation_count(), 0);
}

#[tokio::test]
async fn test_contract_selects_view() {
    let (service, host) = Fixture::new().pages();
    service.push(vm::<Alpha>(), Some("compact"), false).await.unwrap();
    service.push(vm::<Alpha>(), None, false).await.unwrap();

    let stack = host.stack();
    assert!(view_type_name(&stack[0]).ends_with("CompactPageView"));
    assert!(view_type_name(&stack[1]).ends_with("::PageView"));
}

#[tokio::test]
async fn test_pop_on_empty_stack_surfaces_host_error() {
    let (service, _host) = Fixture::new().pages();
    let result = service.pop(true).await;
    assert!(matches!(result, Err(NavigationError::EmptyStack)));
    assert!(service.current_stack().is_empty());
}

#[tokio::test]
async fn test_host_failure_leaves_snapshot_unchanged() {
    let (service, host) = Fixture::new().pages();
    let a = vm::<Alpha>();
    service.push(a.clone(), None, false).await.unwrap();

    host.fail_next("surface detached");
    let result = service.push(vm::<Beta>(), None, false).await;
    assert!(matches!(result, Err(NavigationError::Host(_))));
    assert_eq!(ids(&service.current_stack()), vec![a.id()]);

    host.fail_next("surface detached");
    assert!(service.pop(false).await.is_err());
    assert_eq!(ids(&service.current_stack()), vec![a.id()]);
}

#[tokio::test]
async fn test_push_new_creates_through_factory() {
    let (service, host) = Fixture::new().pages();
    let created = service.push_new::<Alpha>(None, false).await.unwrap();

    assert_eq!(ids(&service.current_stack()), vec![created.id()]);
    assert_eq!(host.depth(), 1);

    let result = service.push_new::<Gamma>(None, false).await;
    assert!(matches!(result, Err(NavigationError::ViewModelCreation { .. })));
    assert_eq!(host.depth(), 1);
}

#[tokio::test]
async fn test_lifecycle_hooks_receive_parameters() {
    let (service, _host) = Fixture::new().pages();
    let recorder = Arc::new(Recorder::default());
    let parameter = NavigationParameter::new().with("item", 42);

    service
        .push_with_parameter(recorder.clone(), &parameter, None, true)
        .await
        .unwrap();
    assert_eq!(recorder.navigated_to_count(), 1);
    assert_eq!(
        recorder.last_parameter().and_then(|p| p.get_as::<u32>("item")),
        Some(42)
    );

    service.pop(true).await.unwrap();
    assert_eq!(recorder.navigated_from_count(), 1);
}

#[tokio::test]
async fn test_removed_view_model_is_navigated_from() {
    let (service, _host) = Fixture::new().pages();
    let recorder = Arc::new(Recorder::default());
    let as_view_model: Arc<dyn ViewModel> = recorder.clone();

    service.push(vm::<Alpha>(), None, false).await.unwrap();
    service.push(as_view_model.clone(), None, false).await.unwrap();
    service.push(vm::<Beta>(), None, false).await.unwrap();

    service.remove(&as_view_model, None, false).await.unwrap();
    assert_eq!(recorder.navigated_from_count(), 1);
    assert_eq!(service.current_stack().len(), 2);
}

#[tokio::test]
async fn test_animation_flag_follows_config() {
    let (headless, _host) = Fixture::new().pages();
    let mut pushed = headless.pushed();
    headless.push(vm::<Alpha>(), None, true).await.unwrap();
    assert!(!drain(&mut pushed)[0].animated());

    let (animated, _host) = Fixture::new()
        .with_config(NavigatorConfig::default())
        .pages();
    let mut pushed = animated.pushed();
    animated.push(vm::<Alpha>(), None, true).await.unwrap();
    animated.push(vm::<Beta>(), None, false).await.unwrap();
    let events = drain(&mut pushed);
    assert!(events[0].animated());
    assert!(!events[1].animated());
}

#[tokio::test]
async fn test_snapshot_reflects_only_completed_operations() {
    let (service, host) = Fixture::new()
        .with_config(NavigatorConfig::default())
        .with_page_delay(Duration::from_millis(100))
        .pages();
    let mut pushing = service.pushing();
    let a = vm::<Alpha>();

    let task = {
        let service = service.clone();
        let a = a.clone();
        tokio::spawn(async move { service.push(a, None, true).await })
    };

    let event = pushing.recv().await.unwrap();
    assert_eq!(event_id(&event), Some(a.id()));
    assert!(service.current_stack().is_empty());
    assert_eq!(host.depth(), 0);

    task.await.unwrap().unwrap();
    assert_eq!(ids(&service.current_stack()), vec![a.id()]);
}

#[tokio::test]
async fn test_every_push_and_pop_reaches_a_slow_subscriber() {
    let (service, _host) = Fixture::new().pages();
    let mut pushed = service.pushed();
    let mut popped = service.popped();

    let view_models: Vec<Arc<dyn ViewModel>> = (0..200).map(|_| vm::<Alpha>()).collect();
    for view_model in &view_models {
        service.push(view_model.clone(), None, false).await.unwrap();
    }
    for _ in 0..view_models.len() {
        service.pop(false).await.unwrap();
    }

    let pushed = drain(&mut pushed);
    let popped = drain(&mut popped);
    assert_eq!(pushed.len(), 200);
    assert_eq!(popped.len(), 200);

    let expected: Vec<_> = ids(&view_models).into_iter().map(Some).collect();
    assert_eq!(pushed.iter().map(event_id).collect::<Vec<_>>(), expected);
    assert_eq!(event_id(&popped[0]), expected[199]);
    assert_eq!(event_id(&popped[199]), expected[0]);
}

#[tokio::test]
async fn test_remove_of_page_missing_from_snapshot_is_not_rolled_back() {
    let (service, host) = Fixture::new().pages();
    let a = vm::<Alpha>();
    service.push(a.clone(), None, false).await.unwrap();

    // presented behind the service's back
    let b = vm::<Beta>();
    let stray: PageHandle = Arc::new(PageView::default());
    stray.bind(b.clone());
    host.push(stray, false).await.unwrap();
    assert_eq!(host.depth(), 2);
    let before = service.snapshot();

    let result = service.remove(&b, None, false).await;

    match result {
        Err(NavigationError::ItemNotFound { view_model }) => assert_eq!(view_model, "Beta"),
        other => panic!("expected ItemNotFound, got {:?}", other),
    }
    assert_eq!(host.depth(), 1);
    let after = service.snapshot();
    assert_eq!(after.ids(), vec![a.id()]);
    assert_eq!(after.version(), before.version());
}

#[test]
fn test_service_is_shareable_across_tasks() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ViewStackService>();
}
