use crate::store::Context;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;
use std::sync::mpsc;
use std::sync::Mutex;
use std::sync::PoisonError;

/// Default pool size: the host's available parallelism.
pub fn default_workers() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

/// A bounded pool of scoped worker threads shared by the pipeline stages.
///
/// Workers claim items through an atomic cursor, so a pool of one worker
/// processes items in order and any larger pool produces the same output.
/// Each worker builds its own state once (typically a pooled store
/// connection) and drops it when it exits.
#[derive(Clone, Copy, Debug)]
pub(crate) struct WorkerPool {
    stop_worker_on_error: bool,
    workers: usize,
}
impl WorkerPool {
    pub(crate) fn new(workers: usize) -> Self {
        Self {
            stop_worker_on_error: false,
            workers: workers.max(1),
        }
    }

    /// A worker whose item fails returns instead of claiming more items.
    /// Other workers keep going.
    pub(crate) fn stop_worker_on_error(mut self) -> Self {
        self.stop_worker_on_error = true;
        self
    }

    /// Runs `work` over every item and returns the outputs in item order,
    /// or every error reported by any worker.
    ///
    /// Once `ctx` is cancelled workers stop claiming items; errors raised
    /// after cancellation are discarded and the outputs produced so far are
    /// returned.
    pub(crate) fn run<Item, State, Output, Error, Setup, Work>(
        &self,
        ctx: &Context,
        items: &[Item],
        setup: Setup,
        work: Work,
    ) -> Result<Vec<Output>, Vec<Error>>
    where
        Item: Sync,
        Output: Send,
        Error: Send,
        Setup: Fn() -> Result<State, Error> + Sync,
        Work: Fn(&mut State, &Item) -> Result<Output, Vec<Error>> + Sync,
    {
        if items.is_empty() {
            return Ok(vec![]);
        }
        let workers = self.workers.min(items.len());
        let next_item = AtomicUsize::new(0);
        let errors: Mutex<Vec<Error>> = Mutex::new(vec![]);
        let (sender, receiver) = mpsc::sync_channel::<(usize, Output)>(items.len());
        let stop_worker_on_error = self.stop_worker_on_error;

        std::thread::scope(|s| {
            let handles: Vec<_> = (0..workers)
                .map(|_| {
                    let sender = sender.clone();
                    let next_item = &next_item;
                    let errors = &errors;
                    let setup = &setup;
                    let work = &work;

                    s.spawn(move || {
                        if ctx.is_cancelled() {
                            return;
                        }
                        let mut state = match setup() {
                            Ok(state) => state,
                            Err(err) => {
                                if !ctx.is_cancelled() {
                                    lock(errors).push(err);
                                }
                                return;
                            },
                        };

                        loop {
                            if ctx.is_cancelled() {
                                break;
                            }
                            let idx = next_item.fetch_add(1, Ordering::Relaxed);
                            if idx >= items.len() {
                                break;
                            }
                            match work(&mut state, &items[idx]) {
                                Ok(output) => {
                                    if sender.send((idx, output)).is_err() {
                                        break;
                                    }
                                },
                                Err(errs) => {
                                    if !ctx.is_cancelled() {
                                        lock(errors).extend(errs);
                                    }
                                    if stop_worker_on_error {
                                        break;
                                    }
                                },
                            }
                        }
                    })
                })
                .collect();

            for handle in handles {
                if let Err(panic) = handle.join() {
                    std::panic::resume_unwind(panic);
                }
            }
        });
        drop(sender);

        let errors = errors.into_inner().unwrap_or_else(PoisonError::into_inner);
        if !errors.is_empty() {
            return Err(errors);
        }
        let mut outputs: Vec<(usize, Output)> = receiver.into_iter().collect();
        outputs.sort_by_key(|(idx, _)| *idx);
        Ok(outputs.into_iter().map(|(_, output)| output).collect())
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
