//! The candidate-scoring worker pool.
//!
//! Candidates are full reactor clones, so workers evaluate them with no
//! shared mutable state; results are reduced back into submission order
//! to keep runs deterministic regardless of worker count.

use crossbeam_channel::{Receiver, Sender};
use fission_sim::{Reactor, Summary};
use std::thread::JoinHandle;

struct Job {
    index: usize,
    reactor: Reactor,
}

struct Scored {
    index: usize,
    reactor: Reactor,
    summary: Summary,
}

/// A fixed set of evaluation workers fed over channels.
pub(crate) struct ScoringPool {
    job_tx: Option<Sender<Job>>,
    result_rx: Receiver<Scored>,
    workers: Vec<JoinHandle<()>>,
}

impl ScoringPool {
    pub(crate) fn new(worker_count: usize) -> ScoringPool {
        let (job_tx, job_rx) = crossbeam_channel::unbounded::<Job>();
        let (result_tx, result_rx) = crossbeam_channel::unbounded::<Scored>();

        let workers = (0..worker_count.max(1))
            .map(|w| {
                let rx = job_rx.clone();
                let tx = result_tx.clone();
                std::thread::Builder::new()
                    .name(format!("fission-score-{w}"))
                    .spawn(move || {
                        while let Ok(mut job) = rx.recv() {
                            let summary = job.reactor.summary();
                            let scored = Scored {
                                index: job.index,
                                reactor: job.reactor,
                                summary,
                            };
                            if tx.send(scored).is_err() {
                                break;
                            }
                        }
                    })
                    .expect("spawn scoring worker")
            })
            .collect();

        ScoringPool {
            job_tx: Some(job_tx),
            result_rx,
            workers,
        }
    }

    /// Evaluate a batch, returning results in submission order.
    pub(crate) fn evaluate(&self, candidates: Vec<Reactor>) -> Vec<(Reactor, Summary)> {
        let n = candidates.len();
        let tx = self.job_tx.as_ref().expect("pool is live");
        for (index, reactor) in candidates.into_iter().enumerate() {
            tx.send(Job { index, reactor }).expect("scoring worker alive");
        }
        let mut slots: Vec<Option<(Reactor, Summary)>> = (0..n).map(|_| None).collect();
        for _ in 0..n {
            let scored = self.result_rx.recv().expect("scoring worker alive");
            slots[scored.index] = Some((scored.reactor, scored.summary));
        }
        slots
            .into_iter()
            .map(|s| s.expect("every candidate was scored"))
            .collect()
    }
}

impl Drop for ScoringPool {
    fn drop(&mut self) {
        // Closing the job channel lets the workers drain and exit.
        self.job_tx.take();
        for handle in self.workers.drain(..) {
            let _ = handle.join();
        }
    }
}
