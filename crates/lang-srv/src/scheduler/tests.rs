use super::Scheduler;
use std::time::{Duration, Instant};

fn ms(n: u64) -> Duration {
  Duration::from_millis(n)
}

#[test]
fn idle() {
  let mut s = Scheduler::new(ms(100));
  assert!(s.deadline().is_none());
  assert!(!s.take_due(Instant::now() + ms(1000)));
}

#[test]
fn fires_once() {
  let t = Instant::now();
  let mut s = Scheduler::new(ms(100));
  s.request(t);
  assert_eq!(s.deadline(), Some(t + ms(100)));
  assert!(!s.take_due(t + ms(99)));
  assert!(s.take_due(t + ms(100)));
  assert!(s.deadline().is_none());
  assert!(!s.take_due(t + ms(500)));
}

#[test]
fn coalesce() {
  let t = Instant::now();
  let mut s = Scheduler::new(ms(100));
  for n in [0, 30, 60, 90] {
    s.request(t + ms(n));
  }
  assert!(!s.take_due(t + ms(150)));
  assert!(s.take_due(t + ms(190)));
  assert!(!s.take_due(t + ms(1000)));
}

#[test]
fn rearm_after_fire() {
  let t = Instant::now();
  let mut s = Scheduler::new(ms(100));
  s.request(t);
  assert!(s.take_due(t + ms(100)));
  s.request(t + ms(120));
  assert!(!s.take_due(t + ms(200)));
  assert!(s.take_due(t + ms(220)));
}
