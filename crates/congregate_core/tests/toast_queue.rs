use congregate_core::{ManualClock, ToastKind, ToastQueue, DEFAULT_TOAST_TTL};
use std::sync::Arc;
use std::time::Duration;

fn manual_queue() -> (Arc<ManualClock>, ToastQueue) {
    let clock = Arc::new(ManualClock::new());
    let queue = ToastQueue::with_clock(clock.clone(), DEFAULT_TOAST_TTL);
    (clock, queue)
}

#[test]
fn toast_is_present_before_delay_and_absent_after() {
    let (clock, mut queue) = manual_queue();
    let id = queue.push("x", ToastKind::Success);

    clock.advance(Duration::from_millis(3999));
    assert!(queue.contains(id));

    clock.advance(Duration::from_millis(1));
    assert!(!queue.contains(id));
    assert_eq!(queue.tick(), vec![id]);
}

#[test]
fn dismiss_removes_immediately_and_ignores_unknown_ids() {
    let (_clock, mut queue) = manual_queue();
    let first = queue.success("first");
    let second = queue.info("second");

    queue.dismiss(first);
    queue.dismiss(first);

    let remaining = queue.entries();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, second);
}

#[test]
fn display_order_is_fifo_without_deduplication() {
    let (_clock, mut queue) = manual_queue();
    let a = queue.success("same");
    let b = queue.success("same");
    let c = queue.error("other");

    let entries = queue.entries();
    let order: Vec<_> = entries.iter().map(|toast| toast.id).collect();
    assert_eq!(order, vec![a, b, c]);
    assert_ne!(a, b);
    assert_eq!(entries[0].message, entries[1].message);
    assert_eq!(entries[2].kind, ToastKind::Error);
}

#[test]
fn each_toast_expires_on_its_own_timer() {
    let (clock, mut queue) = manual_queue();
    let early = queue.success("early");
    clock.advance(Duration::from_millis(2000));
    let late = queue.success("late");

    clock.advance(Duration::from_millis(2000));
    assert_eq!(queue.tick(), vec![early]);
    assert!(queue.contains(late));

    clock.advance(Duration::from_millis(1999));
    assert!(queue.contains(late));
    clock.advance(Duration::from_millis(1));
    assert_eq!(queue.tick(), vec![late]);
    assert!(queue.is_empty());
}

#[test]
fn dismissing_one_toast_leaves_others_timers_untouched() {
    let (clock, mut queue) = manual_queue();
    let a = queue.success("a");
    let b = queue.success("b");

    clock.advance(Duration::from_millis(1000));
    queue.dismiss(a);
    clock.advance(Duration::from_millis(2999));
    assert!(queue.contains(b));
    clock.advance(Duration::from_millis(1));
    assert!(!queue.contains(b));
}

#[test]
fn default_kind_is_success() {
    assert_eq!(ToastKind::default(), ToastKind::Success);
}

#[test]
fn custom_delay_is_honoured() {
    let clock = Arc::new(ManualClock::new());
    let mut queue = ToastQueue::with_clock(clock.clone(), Duration::from_millis(500));
    let id = queue.info("short");

    clock.advance(Duration::from_millis(499));
    assert!(queue.contains(id));
    clock.advance(Duration::from_millis(1));
    assert!(!queue.contains(id));
}
