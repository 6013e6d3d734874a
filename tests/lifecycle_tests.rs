// Host-side tests for the frame loop state machine and interval timer.

mod common;

use common::field_core::lifecycle::*;
use common::MockScheduler;
use std::time::Duration;

#[test]
fn start_requests_exactly_one_frame() {
    let mut sched = MockScheduler::default();
    let mut anim = AnimationLoop::new(false);

    assert_eq!(anim.start(&mut sched), Ok(StartOutcome::Started));
    assert!(anim.is_running());
    assert_eq!(sched.outstanding.len(), 1);
    assert_eq!(
        anim.state(),
        LoopState::Running {
            pending: Some(sched.outstanding[0])
        }
    );
}

#[test]
fn reduced_motion_start_does_not_schedule() {
    let mut sched = MockScheduler::default();
    let mut anim = AnimationLoop::new(true);

    assert_eq!(anim.start(&mut sched), Ok(StartOutcome::StaticFrame));
    assert!(sched.requests <= 1);
    assert!(sched.outstanding.is_empty());
    assert!(!anim.is_running());
    assert!(!anim.begin_frame());
}

#[test]
fn second_start_keeps_a_single_pending_frame() {
    let mut sched = MockScheduler::default();
    let mut anim = AnimationLoop::new(false);
    anim.start(&mut sched).unwrap();

    assert_eq!(anim.start(&mut sched), Ok(StartOutcome::AlreadyRunning));
    assert_eq!(sched.requests, 1);
    assert_eq!(sched.outstanding.len(), 1);
}

#[test]
fn stop_twice_is_idempotent_and_leaves_nothing_pending() {
    let mut sched = MockScheduler::default();
    let mut anim = AnimationLoop::new(false);
    anim.start(&mut sched).unwrap();

    anim.stop(&mut sched);
    anim.stop(&mut sched);
    assert!(sched.outstanding.is_empty());
    assert_eq!(sched.cancels, 1);
    assert_eq!(anim.state(), LoopState::Stopped);
}

#[test]
fn stop_on_a_never_started_loop_is_a_no_op() {
    let mut sched = MockScheduler::default();
    let mut anim = AnimationLoop::default();
    anim.stop(&mut sched);
    assert_eq!(sched.cancels, 0);
    assert_eq!(anim.state(), LoopState::Stopped);
}

#[test]
fn each_delivered_frame_schedules_the_next() {
    let mut sched = MockScheduler::default();
    let mut anim = AnimationLoop::new(false);
    anim.start(&mut sched).unwrap();

    for _ in 0..5 {
        assert!(sched.deliver().is_some());
        assert!(anim.begin_frame());
        anim.schedule_next(&mut sched).unwrap();
        assert_eq!(sched.outstanding.len(), 1);
    }
    assert_eq!(sched.requests, 6);

    anim.stop(&mut sched);
    assert!(sched.outstanding.is_empty());
}

#[test]
fn schedule_next_does_not_double_request_while_pending() {
    let mut sched = MockScheduler::default();
    let mut anim = AnimationLoop::new(false);
    anim.start(&mut sched).unwrap();

    anim.schedule_next(&mut sched).unwrap();
    assert_eq!(sched.requests, 1);
}

#[test]
fn frame_delivered_after_stop_is_ignored() {
    let mut sched = MockScheduler::default();
    let mut anim = AnimationLoop::new(false);
    anim.start(&mut sched).unwrap();
    anim.stop(&mut sched);

    assert!(!anim.begin_frame());
    anim.schedule_next(&mut sched).unwrap();
    assert_eq!(sched.requests, 1);
}

#[test]
fn failed_request_leaves_loop_stopped() {
    let mut sched = MockScheduler {
        fail: true,
        ..Default::default()
    };
    let mut anim = AnimationLoop::new(false);
    assert!(matches!(anim.start(&mut sched), Err(LoopError::Request(_))));
    assert!(!anim.is_running());

    sched.fail = false;
    anim.start(&mut sched).unwrap();
    sched.deliver();
    assert!(anim.begin_frame());
    sched.fail = true;
    assert!(anim.schedule_next(&mut sched).is_err());
    assert_eq!(anim.state(), LoopState::Stopped);
}

#[test]
fn toggling_reduced_motion_allows_restart() {
    let mut sched = MockScheduler::default();
    let mut anim = AnimationLoop::new(false);
    anim.start(&mut sched).unwrap();

    anim.set_reduced_motion(true);
    anim.stop(&mut sched);
    assert_eq!(anim.start(&mut sched), Ok(StartOutcome::StaticFrame));

    anim.set_reduced_motion(false);
    assert_eq!(anim.start(&mut sched), Ok(StartOutcome::Started));
    assert_eq!(sched.outstanding.len(), 1);
}

#[test]
fn interval_timer_fires_once_per_interval() {
    let mut t = IntervalTimer::new(Duration::from_secs(2));
    assert!(!t.tick(Duration::from_secs(1)));
    assert!(t.tick(Duration::from_secs(1)));
    assert!(!t.tick(Duration::from_millis(500)));
    assert!(!t.tick(Duration::from_millis(1400)));
    assert!(t.tick(Duration::from_millis(100)));
}

#[test]
fn interval_timer_does_not_burst_after_a_long_stall() {
    let mut t = IntervalTimer::new(Duration::from_secs(1));
    assert!(t.tick(Duration::from_secs(10)));
    assert!(!t.tick(Duration::from_millis(10)));
}

#[test]
fn zero_interval_never_fires() {
    let mut t = IntervalTimer::new(Duration::ZERO);
    assert!(!t.tick(Duration::from_secs(5)));
}

#[test]
fn reset_discards_accumulated_time() {
    let mut t = IntervalTimer::new(Duration::from_secs(1));
    t.tick(Duration::from_millis(900));
    t.reset();
    assert!(!t.tick(Duration::from_millis(200)));
}
