use std::thread;

use crossbeam_channel::{bounded, unbounded, Receiver, Sender};
use log::{debug, warn};

use crate::{Aligner, AlignerError, AlignerParameters, AlignmentResult, Sequence};

struct WorkItem {
    index: usize,
    seq1: Sequence,
    seq2: Sequence,
}

struct WorkResult {
    index: usize,
    worker_id: usize,
    result: Result<AlignmentResult, AlignerError>,
}

/// Fixed pool of worker threads, each owning its own [`Aligner`].
///
/// Alignments share nothing, so workers never coordinate beyond the queues.
pub struct BatchAligner {
    work_tx: Option<Sender<WorkItem>>,
    result_rx: Receiver<WorkResult>,
    workers: Vec<thread::JoinHandle<()>>,
}

impl BatchAligner {
    pub fn new(parameters: &AlignerParameters) -> Result<Self, AlignerError> {
        let aligner = Aligner::from_parameters(parameters)?;
        Self::with_aligner(aligner, parameters.workers())
    }

    pub fn with_aligner(aligner: Aligner, workers: usize) -> Result<Self, AlignerError> {
        if workers == 0 {
            return Err(AlignerError::InvalidConfig("Batch needs at least one worker".to_string()));
        }

        let (work_tx, work_rx) = bounded::<WorkItem>(workers * 2);
        let (result_tx, result_rx) = unbounded();
        let mut handles = Vec::with_capacity(workers);

        for worker_id in 0..workers {
            let aligner = aligner.clone();
            let work_rx = work_rx.clone();
            let result_tx = result_tx.clone();
            let handle = thread::Builder::new()
                .name(format!("align-worker-{}", worker_id))
                .spawn(move || Self::worker(worker_id, aligner, work_rx, result_tx))?;
            handles.push(handle);
        }
        debug!("Started {} alignment workers", workers);

        Ok(Self {
            work_tx: Some(work_tx),
            result_rx,
            workers: handles,
        })
    }

    pub fn workers(&self) -> usize {
        self.workers.len()
    }

    fn worker(worker_id: usize, mut aligner: Aligner, work_rx: Receiver<WorkItem>, result_tx: Sender<WorkResult>) {
        while let Ok(work) = work_rx.recv() {
            let result = aligner.align(&work.seq1, &work.seq2);
            if result_tx
                .send(WorkResult {
                    index: work.index,
                    worker_id,
                    result,
                })
                .is_err()
            {
                break;
            }
        }
    }

    /// Aligns every pair and returns the results in input order.
    ///
    /// The first failing pair aborts the batch with its error.
    pub fn align_parallel(&self, sequences: Vec<(Sequence, Sequence)>) -> Result<Vec<AlignmentResult>, AlignerError> {
        let work_tx = self
            .work_tx
            .as_ref()
            .ok_or_else(|| AlignerError::BatchError("Work queue closed".to_string()))?;

        let total = sequences.len();
        let mut results: Vec<Option<AlignmentResult>> = vec![None; total];
        let mut work_items = sequences.into_iter().enumerate();
        let mut pending = 0;
        let mut received = 0;

        while received < total {
            // Keep the queue topped up without blocking on a full channel
            while pending < self.workers.len() * 2 {
                match work_items.next() {
                    Some((index, (seq1, seq2))) => {
                        work_tx
                            .send(WorkItem { index, seq1, seq2 })
                            .map_err(|e| AlignerError::BatchError(e.to_string()))?;
                        pending += 1;
                    }
                    None => break,
                }
            }

            let work_result = self
                .result_rx
                .recv()
                .map_err(|e| AlignerError::BatchError(e.to_string()))?;
            pending -= 1;
            received += 1;

            match work_result.result {
                Ok(result) => results[work_result.index] = Some(result),
                Err(e) => {
                    warn!(
                        "Worker {} failed on pair {}: {}",
                        work_result.worker_id, work_result.index, e
                    );
                    self.drain(pending);
                    return Err(e);
                }
            }
        }

        results
            .into_iter()
            .enumerate()
            .map(|(index, result)| {
                result.ok_or_else(|| AlignerError::BatchError(format!("Missing result for pair {}", index)))
            })
            .collect()
    }

    /// Discards results still in flight so the next batch starts clean.
    fn drain(&self, pending: usize) {
        for _ in 0..pending {
            if self.result_rx.recv().is_err() {
                break;
            }
        }
    }
}

impl Drop for BatchAligner {
    fn drop(&mut self) {
        // Close the work channel to stop workers
        self.work_tx.take();

        // Wait for workers to finish
        while let Some(worker) = self.workers.pop() {
            let _ = worker.join();
        }
    }
}
