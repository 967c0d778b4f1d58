use atomic_counter::{AtomicCounter, RelaxedCounter};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Reports progress over a fixed number of grid points.
///
/// Work only bumps a RelaxedCounter, a background thread copies the count
/// into the indicatif bar every refresh_rate milliseconds until the Bar is
/// dropped.
pub struct Bar {
    counter: Arc<RelaxedCounter>,
    /// The indicatif bar being drawn.
    pub pbar: Arc<ProgressBar>,
}

impl Bar {
    /// Creates a hidden Bar of length len with a prefix.
    pub fn new(len: u64, refresh_rate: u64, prefix: String) -> Self {
        let pbar = Arc::new(ProgressBar::hidden());
        pbar.set_length(len);
        pbar.set_prefix(prefix);
        pbar.set_style(ProgressStyle::default_bar()
                           .template("{prefix}[{bar:40}] {pos}/{len} [{elapsed_precise}]")
                           .progress_chars("=>-"));
        let counter = Arc::new(RelaxedCounter::new(0));
        let (watched_bar, watched_counter) = (pbar.clone(), counter.clone());
        thread::spawn(move || {
            while Arc::strong_count(&watched_counter) > 1
                  && !watched_bar.is_finished()
            {
                watched_bar.set_position(watched_counter.get() as u64);
                thread::sleep(Duration::from_millis(refresh_rate));
            }
        });
        Self { counter, pbar }
    }

    /// Draws the Bar to stderr.
    pub fn display(&self) {
        self.pbar.set_draw_target(ProgressDrawTarget::stderr())
    }

    /// Creates a Bar that is drawn from the start.
    pub fn visible(len: u64, refresh_rate: u64, prefix: String) -> Self {
        let bar = Self::new(len, refresh_rate, prefix);
        bar.display();
        bar
    }

    /// Counts one finished point.
    pub fn tick(&self) {
        self.counter.inc();
    }

    /// The number of finished points.
    pub fn position(&self) -> usize {
        self.counter.get()
    }
}

impl Drop for Bar {
    fn drop(&mut self) {
        if !self.pbar.is_finished() {
            self.pbar.set_position(self.counter.get() as u64);
            self.pbar.finish_and_clear();
        }
    }
}
