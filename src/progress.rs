// src/progress.rs
use std::path::Path;

/// Progress reporting for a run. The CLI logs; tests can record.
pub trait Progress {
    /// Called at the start with the number of output files the scrape will write.
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// One output file finished.
    fn item_done(&mut self, _category: &str, _path: &Path) {}

    /// Called at the end of a successful run.
    fn finish(&mut self) {}
}

/// Shorter-lived handle to an optional sink, so it can be passed down more
/// than once.
pub fn reborrow<'a>(progress: &'a mut Option<&mut dyn Progress>) -> Option<&'a mut dyn Progress> {
    progress.as_mut().map(|p| &mut **p as &mut dyn Progress)
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}

/// Emits `[n/total]` lines through the logger.
#[derive(Default)]
pub struct LogProgress {
    total: usize,
    done: usize,
}

impl Progress for LogProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
        self.done = 0;
    }
    fn log(&mut self, msg: &str) {
        logf!("{msg}");
    }
    fn item_done(&mut self, category: &str, path: &Path) {
        self.done += 1;
        logf!("[{}/{}] {category} → {}", self.done, self.total, path.display());
    }
    fn finish(&mut self) {
        logf!("Done: {} files written.", self.done);
    }
}
