//! Timers and events working together

use attest_core::events::{event_types, WINDOW};
use attest_core::sync::lock;
use attest_core::{
    Event, EventDispatcher, Reschedule, Scheduler, Subscription, TimerGuard, Viewport,
};
use std::sync::{Arc, Mutex};

#[test]
fn handler_can_schedule_and_timer_can_unsubscribe() {
    let scheduler = Scheduler::new();
    let dispatcher = EventDispatcher::new();
    let handle = scheduler.handle();

    let log: Arc<Mutex<Vec<String>>> = Arc::default();
    let timers: Arc<Mutex<Vec<TimerGuard>>> = Arc::default();
    let subscription: Arc<Mutex<Option<Subscription>>> = Arc::default();

    let sub = {
        let (log, timers, subscription) = (log.clone(), timers.clone(), subscription.clone());
        dispatcher.register(WINDOW, event_types::SCROLL, move |event| {
            let scroll_y = event.viewport().map_or(0.0, |v| v.scroll_y);
            lock(&log).push(format!("scroll {scroll_y}"));

            let (log, subscription) = (log.clone(), subscription.clone());
            let guard = handle.once(100, move |now| {
                lock(&log).push(format!("settled at {now}"));
                // Stop listening once the first scroll has settled
                lock(&subscription).take();
            });
            lock(&timers).extend(guard);
        })
    };
    *lock(&subscription) = Some(sub);
    assert_eq!(dispatcher.handler_count(), 1);

    dispatcher.dispatch(&mut Event::scroll(Viewport::new(800.0, 600.0).with_scroll(120.0)));
    scheduler.advance(100);
    assert_eq!(dispatcher.handler_count(), 0);

    dispatcher.dispatch(&mut Event::scroll(Viewport::new(800.0, 600.0).with_scroll(240.0)));
    scheduler.advance(100);

    assert_eq!(*lock(&log), ["scroll 120", "settled at 100"]);
}

#[test]
fn timers_due_together_fire_in_schedule_order() {
    let scheduler = Scheduler::new();
    let handle = scheduler.handle();
    let order: Arc<Mutex<Vec<u32>>> = Arc::default();

    let guards: Vec<_> = (0..4u32)
        .filter_map(|i| {
            let order = order.clone();
            handle.once(50, move |_| lock(&order).push(i))
        })
        .collect();
    assert_eq!(guards.len(), 4);

    assert_eq!(scheduler.advance(50), 4);
    assert_eq!(*lock(&order), [0, 1, 2, 3]);
    assert_eq!(scheduler.pending(), 0);
}

#[test]
fn rescheduling_timer_fires_repeatedly_within_one_advance() {
    let scheduler = Scheduler::new();
    let fired: Arc<Mutex<Vec<u64>>> = Arc::default();
    let record = fired.clone();
    let mut remaining = 3;
    let _guard = scheduler.handle().schedule(10, move |now| {
        lock(&record).push(now);
        remaining -= 1;
        if remaining == 0 {
            Reschedule::Done
        } else {
            Reschedule::After(25)
        }
    });

    assert_eq!(scheduler.advance(1000), 3);
    assert_eq!(*lock(&fired), [10, 35, 60]);
    assert_eq!(scheduler.now_ms(), 1000);
    assert_eq!(scheduler.fired_total(), 3);
}

#[test]
fn dropping_the_scheduler_detaches_handles() {
    let scheduler = Scheduler::new();
    let handle = scheduler.handle();
    let guard = handle.interval(10, |_| {});
    assert!(guard.as_ref().is_some_and(TimerGuard::is_active));

    drop(scheduler);
    assert!(!handle.is_alive());
    assert!(handle.once(10, |_| {}).is_none());
    assert!(!guard.as_ref().is_some_and(TimerGuard::is_active));
}
