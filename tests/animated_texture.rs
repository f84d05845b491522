use std::{
    cell::{Cell, RefCell},
    rc::Rc,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use est_animtex::prelude::*;

#[derive(Debug, Default)]
struct FrameLog {
    smooth: Option<bool>,
    repeat: Option<bool>,
    mipmap_calls: usize,
    create_calls: usize,
}

struct StubTexture {
    id: TextureId,
    fail_mipmaps: bool,
    log: Rc<RefCell<FrameLog>>,
}

impl FrameTexture for StubTexture {
    fn id(&self) -> TextureId {
        self.id
    }

    fn create(&mut self) -> Result<(), TextureError> {
        self.log.borrow_mut().create_calls += 1;
        Ok(())
    }

    fn build_hardware_mipmaps(&mut self) -> Result<(), TextureError> {
        self.log.borrow_mut().mipmap_calls += 1;
        if self.fail_mipmaps {
            Err(TextureError::GpuError)
        } else {
            Ok(())
        }
    }

    fn set_smooth(&mut self, smooth: bool) {
        self.log.borrow_mut().smooth = Some(smooth);
    }

    fn set_repeat(&mut self, repeat: bool) {
        self.log.borrow_mut().repeat = Some(repeat);
    }
}

/// Stopwatch whose clock only moves when the test says so.
struct ManualClock {
    now: Rc<Cell<Duration>>,
    started: Duration,
}

impl Stopwatch for ManualClock {
    fn restart(&mut self) {
        self.started = self.now.get();
    }

    fn elapsed(&self) -> Duration {
        self.now.get() - self.started
    }
}

#[derive(Default)]
struct RepaintCounter(AtomicUsize);

impl RepaintCounter {
    fn count(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

impl RepaintRequester for RepaintCounter {
    fn repaint(&self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

struct Harness {
    texture: AnimatedTexture<StubTexture, ManualClock>,
    now: Rc<Cell<Duration>>,
    repaints: Arc<RepaintCounter>,
    logs: Vec<Rc<RefCell<FrameLog>>>,
}

impl Harness {
    fn new(delays_ms: &[u64]) -> Self {
        Self::with_failing_mipmaps(delays_ms, &[])
    }

    fn with_failing_mipmaps(delays_ms: &[u64], failing: &[usize]) -> Self {
        let now = Rc::new(Cell::new(Duration::ZERO));
        let repaints = Arc::new(RepaintCounter::default());
        let mut logs = Vec::new();

        let frames: Vec<AnimationFrame<StubTexture>> = delays_ms
            .iter()
            .enumerate()
            .map(|(index, ms)| {
                let log = Rc::new(RefCell::new(FrameLog::default()));
                logs.push(log.clone());

                AnimationFrame::new(
                    StubTexture {
                        id: TextureId::from_raw(10 + index as u64),
                        fail_mipmaps: failing.contains(&index),
                        log,
                    },
                    Duration::from_millis(*ms),
                )
            })
            .collect();

        let texture = AnimatedTexture::from_frames_with_timer(
            Point2::new(32, 32),
            frames,
            false,
            repaints.clone(),
            ManualClock {
                now: now.clone(),
                started: Duration::ZERO,
            },
        )
        .expect("valid animation");

        Self {
            texture,
            now,
            repaints,
            logs,
        }
    }

    fn advance(&self, ms: u64) {
        self.now.set(self.now.get() + Duration::from_millis(ms));
    }

    fn tick(&mut self, ms: u64) -> bool {
        self.advance(ms);
        self.texture.update_animation()
    }
}

#[test]
fn starts_on_the_first_frame() {
    let harness = Harness::new(&[100, 200, 50]);

    assert_eq!(harness.texture.current_frame(), 0);
    assert_eq!(harness.texture.id(), TextureId::from_raw(10));
    assert_eq!(harness.texture.frame_count(), 3);
    assert_eq!(harness.texture.size(), Point2::new(32, 32));
    assert!(harness.texture.is_animated());
    assert!(!harness.texture.is_smooth());
    assert!(!harness.texture.is_repeating());
}

#[test]
fn follows_per_frame_delays_and_wraps() {
    let mut harness = Harness::new(&[100, 200, 50]);

    assert!(harness.tick(100));
    assert_eq!(harness.texture.current_frame(), 1);
    assert_eq!(harness.texture.id(), TextureId::from_raw(11));

    assert!(harness.tick(200));
    assert_eq!(harness.texture.current_frame(), 2);

    assert!(harness.tick(50));
    assert_eq!(harness.texture.current_frame(), 0);
    assert_eq!(harness.texture.id(), TextureId::from_raw(10));

    assert!(!harness.tick(10));
    assert_eq!(harness.texture.current_frame(), 0);

    assert_eq!(harness.repaints.count(), 3);
}

#[test]
fn visits_every_frame_once_per_cycle() {
    let delays = [30, 30, 30, 30, 30];
    let mut harness = Harness::new(&delays);
    let mut visited = vec![harness.texture.current_frame()];

    for _ in 0..delays.len() {
        assert!(harness.tick(30));
        visited.push(harness.texture.current_frame());
        assert_eq!(
            harness.texture.id(),
            TextureId::from_raw(10 + harness.texture.current_frame() as u64)
        );
    }

    assert_eq!(visited, vec![0, 1, 2, 3, 4, 0]);
}

#[test]
fn early_poll_changes_nothing() {
    let mut harness = Harness::new(&[100, 100]);

    assert!(!harness.tick(99));
    assert_eq!(harness.texture.current_frame(), 0);
    assert_eq!(harness.texture.id(), TextureId::from_raw(10));
    assert_eq!(harness.repaints.count(), 0);

    // The zero-point was not reset: one more millisecond completes the delay.
    assert!(harness.tick(1));
    assert_eq!(harness.texture.current_frame(), 1);
}

#[test]
fn overdue_frame_advances_only_one_step() {
    let mut harness = Harness::new(&[10, 10, 10]);

    assert!(harness.tick(1000));
    assert_eq!(harness.texture.current_frame(), 1);
    assert_eq!(harness.repaints.count(), 1);
}

#[test]
fn zero_delay_advances_on_every_poll() {
    let mut harness = Harness::new(&[0, 0, 100]);

    assert!(harness.tick(0));
    assert_eq!(harness.texture.current_frame(), 1);

    assert!(harness.tick(0));
    assert_eq!(harness.texture.current_frame(), 2);

    assert!(!harness.tick(0));
    assert_eq!(harness.texture.current_frame(), 2);
    assert_eq!(harness.repaints.count(), 2);
}

#[test]
fn advancing_materializes_the_new_frame() {
    let mut harness = Harness::new(&[5, 5]);

    harness.tick(5);
    harness.tick(5);

    assert_eq!(harness.logs[0].borrow().create_calls, 1);
    assert_eq!(harness.logs[1].borrow().create_calls, 1);
}

#[test]
fn smooth_and_repeat_reach_every_frame() {
    let mut harness = Harness::new(&[10, 10, 10]);

    harness.texture.set_smooth(true);
    harness.texture.set_smooth(false);
    harness.texture.set_repeat(true);

    assert!(!harness.texture.is_smooth());
    assert!(harness.texture.is_repeating());
    for log in &harness.logs {
        assert_eq!(log.borrow().smooth, Some(false));
        assert_eq!(log.borrow().repeat, Some(true));
    }
}

#[test]
fn mipmap_failures_are_absorbed() {
    let mut harness = Harness::with_failing_mipmaps(&[10, 10, 10], &[1]);

    assert!(!harness.texture.has_mipmaps());
    assert!(harness.texture.build_hardware_mipmaps());
    assert!(harness.texture.has_mipmaps());

    for log in &harness.logs {
        assert_eq!(log.borrow().mipmap_calls, 1);
    }
}
