//! Integration tests for the compare match timer.

use rxsim::devices::timer::{TIMER_DEFAULT_COMPARE, TIMER_INTERRUPT_PRIORITY};
use rxsim::{CompareMatchTimer, InterruptController, Peripheral};

fn enabled_timer() -> CompareMatchTimer {
    let mut timer = CompareMatchTimer::new();
    timer.write8(CompareMatchTimer::ENABLE_OFFSET, 1);
    timer.write8(CompareMatchTimer::INTERRUPT_ENABLE_OFFSET, 1);
    timer
}

#[test]
fn test_overflow_at_default_compare() {
    let mut timer = enabled_timer();
    let mut interrupts = InterruptController::new();
    assert_eq!(timer.compare(), TIMER_DEFAULT_COMPARE);

    timer.tick(1000, &mut interrupts);

    assert_eq!(timer.counter(), 0);
    assert_eq!(interrupts.len(), 1);
    assert_eq!(
        interrupts.pop_next().map(|r| r.priority),
        Some(TIMER_INTERRUPT_PRIORITY)
    );
    assert_eq!(TIMER_INTERRUPT_PRIORITY, 3);
}

#[test]
fn test_accumulates_small_ticks() {
    let mut timer = enabled_timer();
    let mut interrupts = InterruptController::new();

    for _ in 0..999 {
        timer.tick(1, &mut interrupts);
    }
    assert_eq!(timer.counter(), 999);
    assert!(!interrupts.has_pending());

    timer.tick(1, &mut interrupts);
    assert_eq!(timer.counter(), 0);
    assert_eq!(interrupts.len(), 1);
}

#[test]
fn test_one_interrupt_per_match() {
    let mut timer = enabled_timer();
    let mut interrupts = InterruptController::new();

    // A tick far past the compare value still matches once
    timer.tick(5000, &mut interrupts);
    timer.tick(1000, &mut interrupts);

    assert_eq!(interrupts.len(), 2);
    assert_eq!(timer.counter(), 0);
}

#[test]
fn test_counter_visible_through_registers() {
    let mut timer = enabled_timer();
    let mut interrupts = InterruptController::new();
    timer.write32(CompareMatchTimer::COMPARE_OFFSET, 0x0001_0000);

    timer.tick(0x1234, &mut interrupts);

    assert_eq!(timer.read32(CompareMatchTimer::COUNTER_OFFSET), 0x1234);
    assert_eq!(timer.read16(CompareMatchTimer::COUNTER_OFFSET), 0x1234);
    assert_eq!(timer.read8(CompareMatchTimer::COUNTER_OFFSET + 1), 0x12);
}

#[test]
fn test_stopped_timer_keeps_counter() {
    let mut timer = enabled_timer();
    let mut interrupts = InterruptController::new();
    timer.tick(10, &mut interrupts);

    timer.write8(CompareMatchTimer::ENABLE_OFFSET, 0);
    timer.tick(10_000, &mut interrupts);

    assert_eq!(timer.counter(), 10);
    assert!(!interrupts.has_pending());
}

#[test]
fn test_preset_counter() {
    let mut timer = enabled_timer();
    let mut interrupts = InterruptController::new();
    timer.write32(CompareMatchTimer::COUNTER_OFFSET, 995);

    timer.tick(5, &mut interrupts);

    assert_eq!(timer.counter(), 0);
    assert!(interrupts.has_pending());
}
