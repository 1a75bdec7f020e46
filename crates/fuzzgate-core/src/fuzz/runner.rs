//! Fuzzing execution loop.
//!
//! Feeds the corpus to a target one call at a time under a session duration
//! budget, awaits deferred results under a per-call timeout, and keeps the
//! first occurrence of each distinct failure signature.

use std::cell::Cell;
use std::collections::HashSet;
use std::future::Future;
use std::panic::{self, AssertUnwindSafe};
use std::time::{Duration, Instant};

use futures::future::{self, BoxFuture, FutureExt};
use tracing::debug;

use super::classifier::{classify, Failure, Thrown};
use super::report::{sanitize_tuple, CrashRecord, FuzzReport, Gate};
use super::target::FuzzTarget;
use super::value::{CallResult, DeferredValue, Value};
use super::value_gen::{generate_corpus, generate_corpus_seeded};

pub const DEFAULT_DURATION_MS: u64 = 10_000;
pub const DEFAULT_TIMEOUT_MS: u64 = 5_000;

thread_local! {
    static CONTAINED: Cell<bool> = const { Cell::new(false) };
}

/// Whether the current thread is executing target code whose panics the
/// engine catches and records. Panic hooks use this to stay quiet for
/// contained panics while still reporting everything else.
pub fn panic_is_contained() -> bool {
    CONTAINED.with(Cell::get)
}

/// Restores the previous containment flag, also during unwinding.
struct ContainedGuard(bool);

impl Drop for ContainedGuard {
    fn drop(&mut self) {
        CONTAINED.with(|flag| flag.set(self.0));
    }
}

fn contained<R>(f: impl FnOnce() -> R) -> R {
    let _guard = ContainedGuard(CONTAINED.with(|flag| flag.replace(true)));
    f()
}

/// Mark every poll of a deferred computation as target code.
fn contain_future(mut pending: BoxFuture<'static, CallResult>) -> BoxFuture<'static, CallResult> {
    Box::pin(future::poll_fn(move |cx| {
        contained(|| pending.as_mut().poll(cx))
    }))
}

/// Configuration for a fuzz session.
#[derive(Debug, Clone)]
pub struct FuzzConfig {
    /// Wall-clock budget, checked before each call.
    pub duration: Duration,
    /// Maximum wait for a deferred result.
    pub timeout: Duration,
    /// Seed for the random corpus tail. `None` draws fresh entropy.
    pub seed: Option<u64>,
    /// Stop after the first recorded crash.
    pub fail_fast: bool,
}

impl FuzzConfig {
    pub fn from_millis(duration_ms: u64, timeout_ms: u64) -> Self {
        Self {
            duration: Duration::from_millis(duration_ms),
            timeout: Duration::from_millis(timeout_ms),
            ..Self::default()
        }
    }
}

impl Default for FuzzConfig {
    fn default() -> Self {
        Self {
            duration: Duration::from_millis(DEFAULT_DURATION_MS),
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            seed: None,
            fail_fast: false,
        }
    }
}

/// Crash list plus the set of signatures already recorded.
#[derive(Default)]
struct CrashLog {
    seen: HashSet<String>,
    crashes: Vec<CrashRecord>,
}

impl CrashLog {
    /// Record a failure if its signature is new. Returns whether it was recorded.
    fn record(&mut self, failure: Failure, input: &[Value], elapsed_ms: f64, call: u64) -> bool {
        if !self.seen.insert(failure.signature()) {
            return false;
        }
        debug!(
            label = %failure.label,
            message = %failure.message,
            call,
            "new crash signature"
        );
        self.crashes.push(CrashRecord {
            input: sanitize_tuple(input),
            message: failure.message,
            label: failure.label,
            elapsed_ms,
            kind: failure.kind,
            call,
        });
        true
    }
}

/// Runs a corpus against one target.
pub struct FuzzRunner {
    config: FuzzConfig,
}

impl FuzzRunner {
    pub fn new(config: FuzzConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FuzzConfig {
        &self.config
    }

    /// Fuzz `target` and return the session report.
    ///
    /// Target failures never surface as errors here; they become crash records.
    /// Deferred results are raced against the per-call timeout only when this
    /// runs inside a Tokio runtime; under any other executor they are awaited
    /// inline and a result that never settles stalls the session.
    pub async fn run<T: FuzzTarget + ?Sized>(&self, target: &T, name: &str) -> FuzzReport {
        let arity = target.arity().max(1);
        let corpus = match self.config.seed {
            Some(seed) => generate_corpus_seeded(arity, seed),
            None => generate_corpus(arity),
        };
        debug!(function = name, arity, corpus = corpus.len(), "fuzz session started");

        let start = Instant::now();
        let mut runs = 0u64;
        let mut log = CrashLog::default();

        for input in &corpus {
            if start.elapsed() > self.config.duration {
                debug!(function = name, runs, "duration budget exhausted");
                break;
            }
            runs += 1;
            let call_start = Instant::now();
            if let Err(failure) = self.invoke(target, input).await {
                let recorded = log.record(failure, input, millis(call_start.elapsed()), runs);
                if recorded && self.config.fail_fast {
                    break;
                }
            }
        }

        let gate = if log.crashes.is_empty() {
            Gate::Pass
        } else {
            Gate::Fail
        };
        let report = FuzzReport {
            target: name.to_string(),
            runs,
            crashes: log.crashes,
            elapsed_ms: millis(start.elapsed()),
            gate,
            corpus_size: corpus.len(),
            seed: self.config.seed,
        };
        debug!(
            function = name,
            runs = report.runs,
            crashes = report.crashes.len(),
            gate = ?report.gate,
            "fuzz session finished"
        );
        report
    }

    /// One call: synchronous errors and panics first, then the deferred result if any.
    async fn invoke<T: FuzzTarget + ?Sized>(
        &self,
        target: &T,
        input: &[Value],
    ) -> Result<(), Failure> {
        let call = AssertUnwindSafe(|| contained(|| target.call(input)));
        let result = match panic::catch_unwind(call) {
            Ok(result) => result,
            Err(payload) => return Err(Failure::from_panic(payload.as_ref())),
        };
        match result {
            Ok(Value::Deferred(deferred)) => settle(deferred, self.config.timeout).await,
            Ok(_) => Ok(()),
            Err(thrown) => Err(classify(&thrown)),
        }
    }
}

/// Race a deferred result against `timeout`.
///
/// The computation runs as its own task and only the join handle is raced, so
/// on timeout the task is detached and keeps running; it is never cancelled.
/// Outside a Tokio runtime there is no task or timer to use, and the
/// computation is awaited in place with panics still caught.
async fn settle(deferred: DeferredValue, timeout: Duration) -> Result<(), Failure> {
    let Some(pending) = deferred.take() else {
        return Ok(());
    };
    let pending = contain_future(pending);
    let Ok(runtime) = tokio::runtime::Handle::try_current() else {
        debug!("no Tokio runtime, awaiting deferred result without a timeout");
        return match AssertUnwindSafe(pending).catch_unwind().await {
            Ok(Ok(_)) => Ok(()),
            Ok(Err(thrown)) => Err(classify(&thrown)),
            Err(payload) => Err(Failure::from_panic(payload.as_ref())),
        };
    };
    let handle = runtime.spawn(pending);
    match tokio::time::timeout(timeout, handle).await {
        Ok(Ok(Ok(_))) => Ok(()),
        Ok(Ok(Err(thrown))) => Err(classify(&thrown)),
        Ok(Err(join_err)) if join_err.is_panic() => {
            let payload = join_err.into_panic();
            Err(Failure::from_panic(payload.as_ref()))
        }
        Ok(Err(join_err)) => Err(classify(&Thrown::error(join_err.to_string()))),
        Err(_elapsed) => Err(Failure::timeout()),
    }
}

fn millis(elapsed: Duration) -> f64 {
    elapsed.as_secs_f64() * 1000.0
}

/// Fuzz `target` with the given budgets in milliseconds.
///
/// The per-call timeout is enforced only inside a Tokio runtime; see
/// [`FuzzRunner::run`].
pub async fn fuzz<T: FuzzTarget + ?Sized>(
    target: &T,
    name: &str,
    duration_ms: u64,
    timeout_ms: u64,
) -> FuzzReport {
    FuzzRunner::new(FuzzConfig::from_millis(duration_ms, timeout_ms))
        .run(target, name)
        .await
}
