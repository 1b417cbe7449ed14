use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::{Duration, Instant},
};

/// A cheap, cloneable flag a caller can flip from another thread to abort a long decode,
/// encode, or region scan between chunks.
#[derive(Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        Self(Arc::new(AtomicBool::new(false)))
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

const REPORT_INTERVAL: Duration = Duration::from_millis(500);

type SinkFn<'a> = Box<dyn FnMut(u8, &str) + 'a>;

/// Throttled progress reporting: the wrapped callback fires at most once per interval,
/// plus always at completion, so a caller driving a UI isn't flooded with updates.
pub struct Progress<'a> {
    sink: Option<SinkFn<'a>>,
    last_report: Option<Instant>,
}

impl<'a> Progress<'a> {
    pub fn new<F>(sink: F) -> Self
    where
        F: FnMut(u8, &str) + 'a,
    {
        Self {
            sink: Some(Box::new(sink)),
            last_report: None,
        }
    }

    pub fn none() -> Self {
        Self {
            sink: None,
            last_report: None,
        }
    }

    pub(crate) fn report(&mut self, percent: u8, message: &str) {
        let Some(sink) = self.sink.as_mut() else {
            return;
        };
        let now = Instant::now();
        let due = match self.last_report {
            Some(last) => now.duration_since(last) >= REPORT_INTERVAL,
            None => true,
        };
        if due || percent >= 100 {
            sink(percent, message);
            self.last_report = Some(now);
        }
    }
}
