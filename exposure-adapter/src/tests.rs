use crate::*;

use exposure::ExposureEventKind::{Appear, Disappear, FullyVisible, HalfVisible};
use exposure::{
    Bounds, ExposureEngine, ExposureEvent, ExposureEventKind, ExposureSource, FrameSnapshot,
    Observation, RenderedItem,
};

use alloc::string::ToString;
use alloc::vec;
use alloc::vec::Vec;

type Event = ExposureEvent<u32, &'static str>;

/// A uniform-height list whose render window is the viewport plus `overscan` on each side.
#[derive(Clone, Debug)]
struct ListSurface {
    viewport_height: i32,
    item_height: i32,
    count: u32,
    offset: i32,
    overscan: i32,
    registered: u32,
    unregistered: u32,
}

impl ListSurface {
    fn new(count: u32) -> Self {
        Self {
            viewport_height: 1000,
            item_height: 300,
            count,
            offset: 0,
            overscan: 0,
            registered: 0,
            unregistered: 0,
        }
    }

    fn with_overscan(mut self, overscan: i32) -> Self {
        self.overscan = overscan;
        self
    }
}

impl ExposureSource<u32, &'static str> for ListSurface {
    fn viewport_bounds(&self) -> Bounds {
        Bounds::vertical(0, self.viewport_height)
    }

    fn for_each_rendered_item(&self, emit: &mut dyn FnMut(RenderedItem<u32, &'static str>)) {
        for i in 0..self.count {
            let top = i as i32 * self.item_height - self.offset;
            let bottom = top + self.item_height;
            if bottom > -self.overscan && top < self.viewport_height + self.overscan {
                emit(RenderedItem::new(i, Bounds::vertical(top, bottom), "row"));
            }
        }
    }
}

impl ScrollContainer<u32, &'static str> for ListSurface {
    fn register(&mut self) {
        self.registered += 1;
    }

    fn unregister(&mut self) {
        self.unregistered += 1;
    }
}

type ListController = Controller<u32, &'static str, ListSurface>;

fn kinds(batch: &[Event]) -> Vec<(u32, ExposureEventKind)> {
    batch.iter().map(|e| (e.key, e.kind)).collect()
}

fn scroll_to(controller: &mut ListController, offset: i32) {
    if let Some(surface) = controller.container_mut() {
        surface.offset = offset;
    }
}

fn first_screen() -> Vec<(u32, ExposureEventKind)> {
    vec![
        (0, Appear),
        (0, HalfVisible),
        (0, FullyVisible),
        (1, Appear),
        (1, HalfVisible),
        (1, FullyVisible),
        (2, Appear),
        (2, HalfVisible),
        (2, FullyVisible),
        (3, Appear),
    ]
}

#[test]
fn attach_registers_and_reports_items_already_on_screen() {
    let mut controller = ListController::default();
    assert_eq!(controller.state(), AttachState::Detached);

    let batch = controller.attach(ListSurface::new(10), 0).unwrap();
    assert_eq!(kinds(batch), first_screen());

    assert!(controller.is_tracking());
    assert_eq!(controller.container().unwrap().registered, 1);
    assert_eq!(controller.engine().visible_count(), 4);
}

#[test]
fn controller_debug_includes_state_and_engine() {
    let mut controller = ListController::default();
    controller.attach(ListSurface::new(2), 0).unwrap();
    let text = alloc::format!("{controller:?}");
    assert!(text.contains("Tracking"), "{text}");
    assert!(text.contains("ExposureEngine"), "{text}");
}

#[test]
fn second_attach_is_rejected_and_keeps_the_first_container() {
    let mut controller = ListController::default();
    controller.attach(ListSurface::new(10), 0).unwrap();

    let err = controller.attach(ListSurface::new(2), 16).unwrap_err();
    assert_eq!(err, LifecycleError::AlreadyAttached);
    assert_eq!(controller.container().unwrap().count, 10);
    assert_eq!(controller.engine().pass_count(), 1);
}

#[test]
fn scrolls_while_paused_are_ignored_until_resume() {
    let mut controller = ListController::default();
    controller.attach(ListSurface::new(10), 0).unwrap();

    controller.pause().unwrap();
    assert_eq!(controller.state(), AttachState::Paused);

    scroll_to(&mut controller, 1000);
    assert!(controller.on_scroll(16).is_empty());
    assert!(controller.on_scroll_state_changed(ScrollPhase::Idle, 32).is_empty());
    assert!(controller.refresh(48).is_empty());
    assert_eq!(controller.engine().visible_count(), 4);
    assert_eq!(controller.engine().pass_count(), 1);

    let batch = controller.resume(64).unwrap();
    assert_eq!(
        kinds(batch),
        vec![
            (3, HalfVisible),
            (4, Appear),
            (4, HalfVisible),
            (4, FullyVisible),
            (5, Appear),
            (5, HalfVisible),
            (5, FullyVisible),
            (6, Appear),
            (6, HalfVisible),
            (0, Disappear),
            (1, Disappear),
            (2, Disappear),
        ]
    );
    assert!(batch.iter().all(|e| e.timestamp_ms == 64));
    assert!(controller.is_tracking());
}

#[test]
fn detach_clears_state_and_returns_the_container() {
    let mut controller = ListController::default();
    controller.attach(ListSurface::new(10), 0).unwrap();

    let surface = controller.detach().unwrap();
    assert_eq!(surface.registered, 1);
    assert_eq!(surface.unregistered, 1);
    assert_eq!(controller.state(), AttachState::Detached);
    assert!(controller.engine().store().is_empty());
    assert_eq!(controller.engine().visible_count(), 0);

    assert!(controller.detach().is_none());

    let batch = controller.attach(surface, 100).unwrap();
    assert_eq!(kinds(batch), first_screen());
    assert_eq!(controller.container().unwrap().registered, 2);
}

#[test]
fn detach_emits_no_disappear() {
    let mut controller = ListController::default();
    let log: SharedEventLog<u32, &'static str> = SharedEventLog::new();
    controller.subscribe(log.clone());
    controller.attach(ListSurface::new(10), 0).unwrap();
    let seen = log.borrow().len();

    controller.detach();
    assert_eq!(log.borrow().len(), seen);
    assert_eq!(log.stats().disappear, 0);
}

#[test]
fn only_idle_scroll_phase_runs_a_pass() {
    let mut controller = ListController::default();
    controller.attach(ListSurface::new(10), 0).unwrap();

    scroll_to(&mut controller, 1000);
    assert!(controller.on_scroll_state_changed(ScrollPhase::Dragging, 16).is_empty());
    assert!(controller.on_scroll_state_changed(ScrollPhase::Settling, 32).is_empty());
    assert_eq!(controller.engine().pass_count(), 1);

    let batch = controller.on_scroll_state_changed(ScrollPhase::Idle, 48);
    assert!(!batch.is_empty());
    assert_eq!(controller.engine().pass_count(), 2);

    // Already caught up.
    assert!(controller.on_scroll(64).is_empty());
}

#[test]
fn lifecycle_misuse_is_reported() {
    let mut controller = ListController::default();
    assert_eq!(controller.pause(), Err(LifecycleError::NotAttached));
    assert_eq!(controller.resume(0).unwrap_err(), LifecycleError::NotAttached);
    assert!(controller.on_scroll(0).is_empty());
    assert!(controller.refresh(0).is_empty());

    controller.attach(ListSurface::new(3), 0).unwrap();
    assert!(controller.resume(16).unwrap().is_empty());
    assert_eq!(controller.pause(), Ok(()));
    assert_eq!(controller.pause(), Ok(()));
    assert_eq!(controller.state(), AttachState::Paused);

    assert_eq!(
        LifecycleError::NotAttached.to_string(),
        "controller is not attached to a scroll container"
    );
}

#[test]
fn paused_controller_still_rejects_attach() {
    let mut controller = ListController::default();
    controller.attach(ListSurface::new(3), 0).unwrap();
    controller.pause().unwrap();

    assert_eq!(
        controller.attach(ListSurface::new(3), 16).unwrap_err(),
        LifecycleError::AlreadyAttached
    );
    assert!(controller.detach().is_some());
    assert!(controller.attach(ListSurface::new(3), 32).is_ok());
}

#[test]
fn dataset_reset_restarts_every_cycle_without_disappear() {
    let mut controller = ListController::default();
    controller.attach(ListSurface::new(10), 0).unwrap();

    controller.on_dataset_reset();
    assert!(controller.engine().store().is_empty());

    let batch = controller.refresh(16);
    assert_eq!(kinds(batch), first_screen());
}

#[test]
fn removed_item_is_reported_again_from_appear() {
    let mut controller = ListController::default();
    controller.attach(ListSurface::new(10), 0).unwrap();

    assert!(controller.on_item_removed(&1));
    assert!(!controller.on_item_removed(&1));
    assert!(!controller.on_item_removed(&99));

    let batch = controller.refresh(16);
    assert_eq!(
        kinds(batch),
        vec![(1, Appear), (1, HalfVisible), (1, FullyVisible)]
    );
}

#[test]
fn overscan_items_at_zero_visibility_disappear() {
    let mut controller = ListController::default();
    let surface = ListSurface::new(1).with_overscan(500);
    controller.attach(surface, 0).unwrap();
    assert_eq!(controller.engine().visible_count(), 1);

    // Still rendered inside the overscan area, but no longer visible.
    scroll_to(&mut controller, 400);
    let batch = controller.on_scroll(16);
    assert_eq!(kinds(batch), vec![(0, Disappear)]);
    assert_eq!(batch[0].snapshot, "row");
    assert_eq!(batch[0].fraction, 0.0);
    assert!(controller.engine().store().is_empty());
    assert!(controller.on_scroll(32).is_empty());
}

#[test]
fn recorded_frames_replay_through_the_controller() {
    let mut frame = FrameSnapshot::new(Bounds::vertical(0, 1000)).with_item(
        7u32,
        Bounds::vertical(800, 1100),
        "Product card",
    );

    let mut controller: Controller<u32, &'static str, FrameSnapshot<u32, &'static str>> =
        Controller::default();
    let log: SharedEventLog<u32, &'static str> = SharedEventLog::new();
    controller.subscribe(log.clone());

    assert_eq!(
        kinds(controller.attach(frame.clone(), 0).unwrap()),
        vec![(7, Appear), (7, HalfVisible)]
    );

    frame.scroll_content_by(-300);
    *controller.container_mut().unwrap() = frame.clone();
    assert_eq!(kinds(controller.on_scroll(16)), vec![(7, FullyVisible)]);

    frame.scroll_content_by(-800);
    *controller.container_mut().unwrap() = frame;
    assert_eq!(kinds(controller.on_scroll(32)), vec![(7, Disappear)]);

    let stats = log.stats();
    assert_eq!(
        stats,
        ExposureStats {
            appear: 1,
            half_visible: 1,
            fully_visible: 1,
            disappear: 1,
        }
    );
    assert_eq!(log.borrow().latest().unwrap().kind, Disappear);
}

#[test]
fn event_log_keeps_newest_first_within_capacity() {
    let mut engine: ExposureEngine<u32, &'static str> = ExposureEngine::default();
    let log: SharedEventLog<u32, &'static str> = SharedEventLog::with_capacity(3);
    engine.subscribe(log.clone());

    engine.apply_observations([Observation::new(1, 1.0, "a"), Observation::new(2, 0.2, "b")], 0);

    let log = log.borrow();
    assert_eq!(log.capacity(), 3);
    assert_eq!(log.len(), 3);
    let kept: Vec<_> = log.entries().map(|e| (e.key, e.kind)).collect();
    assert_eq!(kept, vec![(2, Appear), (1, FullyVisible), (1, HalfVisible)]);

    // Counters include evicted entries.
    assert_eq!(log.stats().total(), 4);
    assert_eq!(log.stats().count(Appear), 2);
}

#[test]
fn event_log_capacity_is_at_least_one() {
    let mut log: EventLog<u32, &'static str> = EventLog::with_capacity(0);
    assert_eq!(log.capacity(), 1);
    assert!(log.is_empty());

    let mut engine: ExposureEngine<u32, &'static str> = ExposureEngine::default();
    let batch = engine.apply_observations([Observation::new(1, 0.6, "a")], 0);
    for event in batch {
        log.record(event);
    }
    assert_eq!(log.len(), 1);
    assert_eq!(log.latest().unwrap().kind, HalfVisible);

    log.clear();
    assert!(log.is_empty());
    assert_eq!(log.stats(), ExposureStats::default());
    assert_eq!(EventLog::<u32, &'static str>::new().capacity(), DEFAULT_LOG_CAPACITY);
}

#[test]
fn held_log_borrow_drops_events_instead_of_panicking() {
    let mut controller = ListController::default();
    let log: SharedEventLog<u32, &'static str> = SharedEventLog::new();
    controller.subscribe(log.clone());

    let guard = log.borrow();
    let batch_len = controller.attach(ListSurface::new(10), 0).unwrap().len();
    assert_eq!(batch_len, 10);
    assert!(guard.is_empty());
    drop(guard);

    assert_eq!(log.stats().total(), 0);
    scroll_to(&mut controller, 1000);
    controller.on_scroll(16);
    assert_eq!(log.stats().total(), 12);
}

#[test]
fn stats_display_lists_every_kind() {
    let stats = ExposureStats {
        appear: 3,
        half_visible: 2,
        fully_visible: 1,
        disappear: 0,
    };
    assert_eq!(stats.to_string(), "appear:3 | half:2 | full:1 | disappear:0");
    assert_eq!(stats.total(), 6);
}

#[test]
fn controller_from_engine_keeps_listeners() {
    let mut engine: ExposureEngine<u32, &'static str> = ExposureEngine::default();
    let log: SharedEventLog<u32, &'static str> = SharedEventLog::new();
    engine.subscribe(log.clone());

    let mut controller: ListController = Controller::from_engine(engine);
    controller.attach(ListSurface::new(10), 0).unwrap();
    assert_eq!(log.stats().appear, 4);

    let engine = {
        controller.detach();
        controller.into_engine()
    };
    assert_eq!(engine.listeners().len(), 1);
}
