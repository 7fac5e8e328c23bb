//! Progress reporting for long-running scans.

/// Receives percentage updates (0..=100) from a long-running operation.
pub trait ProgressSink {
    fn report(&mut self, percent: u8);
}

/// Discards every update.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn report(&mut self, _percent: u8) {}
}

impl<F: FnMut(u8)> ProgressSink for F {
    fn report(&mut self, percent: u8) {
        self(percent)
    }
}

/// Tracks `done / total` steps and forwards only increases to the inner sink,
/// so downstream observers see a non-decreasing stream.
pub struct ProgressTracker<'a, S: ProgressSink + ?Sized> {
    sink: &'a mut S,
    total: u64,
    done: u64,
    last: Option<u8>,
}

impl<'a, S: ProgressSink + ?Sized> ProgressTracker<'a, S> {
    pub fn new(sink: &'a mut S, total: u64) -> Self {
        Self {
            sink,
            total,
            done: 0,
            last: None,
        }
    }

    /// Marks one more step complete.
    pub fn step(&mut self) {
        self.done = (self.done + 1).min(self.total);
        let percent = if self.total == 0 {
            100
        } else {
            (self.done * 100 / self.total) as u8
        };
        self.emit(percent);
    }

    /// Reports 100% regardless of how many steps ran.
    pub fn finish(&mut self) {
        self.done = self.total;
        self.emit(100);
    }

    fn emit(&mut self, percent: u8) {
        if self.last.is_some_and(|last| percent <= last) {
            return;
        }
        self.last = Some(percent);
        self.sink.report(percent);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracker_is_monotonic_and_deduplicated() {
        let mut seen = Vec::new();
        {
            let mut sink = |p: u8| seen.push(p);
            let mut tracker = ProgressTracker::new(&mut sink, 4);
            for _ in 0..6 {
                tracker.step();
            }
            tracker.finish();
        }
        assert_eq!(seen, vec![25, 50, 75, 100]);
    }

    #[test]
    fn empty_total_reports_completion() {
        let mut seen = Vec::new();
        {
            let mut sink = |p: u8| seen.push(p);
            ProgressTracker::new(&mut sink, 0).finish();
        }
        assert_eq!(seen, vec![100]);
    }
}
