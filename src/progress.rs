//! Progress-callback trait for per-lecture conversion events.
//!
//! Inject an [`Arc<dyn ConversionProgressCallback>`] via
//! [`crate::config::ConversionConfigBuilder::progress_callback`] to receive
//! events as the driver walks through the lecture folders.
//!
//! # Example
//!
//! ```rust
//! use beamer2mdx::{ConversionProgressCallback, ConversionConfig};
//! use std::sync::{Arc, atomic::{AtomicUsize, Ordering}};
//!
//! struct CountingCallback {
//!     completed: Arc<AtomicUsize>,
//! }
//!
//! impl ConversionProgressCallback for CountingCallback {
//!     fn on_lecture_complete(&self, lecture_id: &str, index: usize, total: usize, slides: usize) {
//!         self.completed.fetch_add(1, Ordering::SeqCst);
//!         eprintln!("{lecture_id} ({index}/{total}): {slides} slides");
//!     }
//! }
//!
//! let counter = Arc::new(CountingCallback {
//!     completed: Arc::new(AtomicUsize::new(0)),
//! });
//!
//! let config = ConversionConfig::builder()
//!     .progress_callback(counter as Arc<dyn ConversionProgressCallback>)
//!     .build()
//!     .unwrap();
//! ```

use std::sync::Arc;

/// Called by the driver as it processes each lecture.
///
/// Lectures are converted one at a time, so events arrive in order. The
/// trait is still `Send + Sync` so a callback can be shared with other tasks
/// (a UI thread, a log forwarder). All methods default to no-ops.
pub trait ConversionProgressCallback: Send + Sync {
    /// Called once after lecture discovery, before any extraction.
    ///
    /// # Arguments
    /// * `total_lectures` — number of lectures that will be processed
    fn on_conversion_start(&self, total_lectures: usize) {
        let _ = total_lectures;
    }

    /// Called just before the extractor runs for a lecture.
    ///
    /// # Arguments
    /// * `lecture_id` — folder name, e.g. `L3`
    /// * `index`      — 1-indexed position in the run
    /// * `total`      — lectures in the run
    fn on_lecture_start(&self, lecture_id: &str, index: usize, total: usize) {
        let _ = (lecture_id, index, total);
    }

    /// Called when a lecture document has been written.
    ///
    /// `slides` is the number of slides left after overlay merging.
    fn on_lecture_complete(&self, lecture_id: &str, index: usize, total: usize, slides: usize) {
        let _ = (lecture_id, index, total, slides);
    }

    /// Called when a lecture fails. With `fail_fast` enabled this is the last
    /// event before the run aborts.
    fn on_lecture_error(&self, lecture_id: &str, index: usize, total: usize, error: &str) {
        let _ = (lecture_id, index, total, error);
    }

    /// Called once after every lecture has been attempted.
    ///
    /// # Arguments
    /// * `total_lectures` — lectures in the run
    /// * `success_count`  — lectures written without error
    fn on_conversion_complete(&self, total_lectures: usize, success_count: usize) {
        let _ = (total_lectures, success_count);
    }
}

/// A no-op implementation for callers that don't need progress events.
pub struct NoopProgressCallback;

impl ConversionProgressCallback for NoopProgressCallback {}

/// Convenience alias matching the type stored in [`crate::config::ConversionConfig`].
pub type ProgressCallback = Arc<dyn ConversionProgressCallback>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct TrackingCallback {
        starts: Arc<AtomicUsize>,
        completes: Arc<AtomicUsize>,
        errors: Arc<AtomicUsize>,
        started_total: Arc<AtomicUsize>,
        completed_total: Arc<AtomicUsize>,
    }

    impl ConversionProgressCallback for TrackingCallback {
        fn on_conversion_start(&self, total_lectures: usize) {
            self.started_total.store(total_lectures, Ordering::SeqCst);
        }

        fn on_lecture_start(&self, _lecture_id: &str, _index: usize, _total: usize) {
            self.starts.fetch_add(1, Ordering::SeqCst);
        }

        fn on_lecture_complete(&self, _lecture_id: &str, _index: usize, _total: usize, _slides: usize) {
            self.completes.fetch_add(1, Ordering::SeqCst);
        }

        fn on_lecture_error(&self, _lecture_id: &str, _index: usize, _total: usize, _error: &str) {
            self.errors.fetch_add(1, Ordering::SeqCst);
        }

        fn on_conversion_complete(&self, _total_lectures: usize, success_count: usize) {
            self.completed_total.store(success_count, Ordering::SeqCst);
        }
    }

    #[test]
    fn noop_callback_does_not_panic() {
        let cb = NoopProgressCallback;
        cb.on_conversion_start(2);
        cb.on_lecture_start("L1", 1, 2);
        cb.on_lecture_complete("L1", 1, 2, 12);
        cb.on_lecture_error("L2", 2, 2, "missing pdf");
        cb.on_conversion_complete(2, 1);
    }

    #[test]
    fn tracking_callback_receives_events() {
        let tracker = TrackingCallback {
            starts: Arc::new(AtomicUsize::new(0)),
            completes: Arc::new(AtomicUsize::new(0)),
            errors: Arc::new(AtomicUsize::new(0)),
            started_total: Arc::new(AtomicUsize::new(0)),
            completed_total: Arc::new(AtomicUsize::new(0)),
        };

        tracker.on_conversion_start(3);
        assert_eq!(tracker.started_total.load(Ordering::SeqCst), 3);

        tracker.on_lecture_start("L1", 1, 3);
        tracker.on_lecture_complete("L1", 1, 3, 20);
        tracker.on_lecture_start("L2", 2, 3);
        tracker.on_lecture_complete("L2", 2, 3, 14);
        tracker.on_lecture_start("L3", 3, 3);
        tracker.on_lecture_error("L3", 3, 3, "pdftotext exited with 1");

        assert_eq!(tracker.starts.load(Ordering::SeqCst), 3);
        assert_eq!(tracker.completes.load(Ordering::SeqCst), 2);
        assert_eq!(tracker.errors.load(Ordering::SeqCst), 1);

        tracker.on_conversion_complete(3, 2);
        assert_eq!(tracker.completed_total.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn arc_dyn_callback_works() {
        let cb: Arc<dyn ConversionProgressCallback> = Arc::new(NoopProgressCallback);
        cb.on_conversion_start(4);
        cb.on_lecture_start("L1", 1, 4);
        cb.on_lecture_complete("L1", 1, 4, 9);
    }
}
