//! Stream fan-out
//!
//! One forward-only chunk sequence is replicated into N views with
//! [`ChunkTee`]. [`run_fanout`] then walks the views in lock-step rounds:
//! chunk *i* reaches every digester before chunk *i + 1* reaches any, so the
//! tee never holds more than the chunks between the slowest and fastest
//! view.

use super::ResultSet;
use super::traits::Digester;
use crate::error::InternalError;
use crate::progress::{ProgressProvider, ProgressUpdate};
use crate::source::ChunkSource;
use crate::{Error, Result};
use bytes::Bytes;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::io;
use std::rc::Rc;

struct TeeState<I> {
    /// Dropped once the upstream is exhausted or has failed
    source: Option<I>,
    buffer: VecDeque<Bytes>,
    /// Absolute index of `buffer[0]`
    base: usize,
    /// Absolute index of the next chunk for each view
    cursors: Vec<usize>,
}

impl<I> TeeState<I>
where
    I: Iterator<Item = io::Result<Bytes>>,
{
    fn next_for(&mut self, view: usize) -> Option<io::Result<Bytes>> {
        let offset = self.cursors[view] - self.base;

        if let Some(chunk) = self.buffer.get(offset) {
            let chunk = chunk.clone();
            self.advance(view);
            return Some(Ok(chunk));
        }

        match self.source.as_mut()?.next() {
            Some(Ok(chunk)) => {
                self.buffer.push_back(chunk.clone());
                self.advance(view);
                Some(Ok(chunk))
            }
            Some(Err(e)) => {
                self.source = None;
                Some(Err(e))
            }
            None => {
                self.source = None;
                None
            }
        }
    }

    fn advance(&mut self, view: usize) {
        self.cursors[view] += 1;

        let slowest = self.cursors.iter().copied().min().unwrap_or(self.base);
        while self.base < slowest && self.buffer.pop_front().is_some() {
            self.base += 1;
        }
    }
}

/// Splits one chunk iterator into independent forward-only views
pub struct ChunkTee;

impl ChunkTee {
    /// Replicate `source` into `n` views yielding the same chunks in the
    /// same order
    ///
    /// Chunks are buffered only until every view has seen them. A read
    /// error is yielded to whichever view pulls it; the others then end.
    pub fn split<I>(source: I, n: usize) -> Vec<TeeView<I>>
    where
        I: Iterator<Item = io::Result<Bytes>>,
    {
        let state = Rc::new(RefCell::new(TeeState {
            source: Some(source),
            buffer: VecDeque::new(),
            base: 0,
            cursors: vec![0; n],
        }));

        (0..n)
            .map(|index| TeeView {
                state: Rc::clone(&state),
                index,
            })
            .collect()
    }
}

/// One replicated view produced by [`ChunkTee::split`]
pub struct TeeView<I> {
    state: Rc<RefCell<TeeState<I>>>,
    index: usize,
}

impl<I> TeeView<I> {
    /// Chunks currently held for views that have not yet seen them
    pub fn buffered_chunks(&self) -> usize {
        self.state.borrow().buffer.len()
    }
}

impl<I> Iterator for TeeView<I>
where
    I: Iterator<Item = io::Result<Bytes>>,
{
    type Item = io::Result<Bytes>;

    fn next(&mut self) -> Option<Self::Item> {
        self.state.borrow_mut().next_for(self.index)
    }
}

/// Results of one fan-out run
#[derive(Debug, Clone, Default)]
pub struct FanoutOutcome {
    /// Digests in the order the digesters were supplied
    pub results: ResultSet,
    pub bytes_processed: u64,
    pub chunks: u64,
}

/// Feed every chunk of `source` to every digester, then finalize them all
///
/// With no digesters the source is released unread.
pub fn run_fanout(
    source: ChunkSource,
    digesters: Vec<(&'static str, Box<dyn Digester>)>,
    progress: &dyn ProgressProvider,
) -> Result<FanoutOutcome> {
    if digesters.is_empty() {
        log::debug!("No digesters selected, skipping input");
        return Ok(FanoutOutcome::default());
    }

    let total_bytes = source.size_hint();
    let views = ChunkTee::split(source.into_chunks(), digesters.len());
    let mut lanes: Vec<_> = digesters.into_iter().zip(views).collect();
    let lane_count = lanes.len();

    let mut bytes_processed = 0u64;
    let mut chunks = 0u64;

    loop {
        let mut delivered: Option<Bytes> = None;
        let mut ended = 0usize;

        for ((name, digester), view) in lanes.iter_mut() {
            match view.next() {
                Some(Ok(chunk)) => {
                    if let Some(first) = &delivered {
                        if !same_chunk(first, &chunk) {
                            return Err(InternalError::fanout(format!(
                                "{name} received chunk {chunks} out of step"
                            ))
                            .into());
                        }
                    }
                    digester.update(&chunk);
                    delivered = Some(chunk);
                }
                Some(Err(e)) => return Err(Error::from(e)),
                None => ended += 1,
            }
        }

        match delivered {
            None if ended == lane_count => break,
            Some(chunk) if ended == 0 => {
                bytes_processed += chunk.len() as u64;
                chunks += 1;
                progress.report(ProgressUpdate::HashProgress {
                    bytes_processed,
                    total_bytes,
                });
            }
            _ => {
                return Err(InternalError::fanout(format!(
                    "{ended} of {lane_count} views ended early at chunk {chunks}"
                ))
                .into());
            }
        }
    }

    let results = lanes
        .into_iter()
        .map(|((name, digester), _)| (name.to_string(), digester.finalize()))
        .collect();

    log::trace!("Fan-out delivered {chunks} chunks ({bytes_processed} bytes) to {lane_count} digesters");

    Ok(FanoutOutcome {
        results,
        bytes_processed,
        chunks,
    })
}

/// Views hand out clones of one buffered `Bytes`, so a round is consistent
/// exactly when every lane saw the same allocation
fn same_chunk(a: &Bytes, b: &Bytes) -> bool {
    a.len() == b.len() && a.as_ptr() == b.as_ptr()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hashing::DigesterKind;
    use crate::progress::{NullProvider, RecordingProvider};
    use std::sync::{Arc, Mutex};

    fn ok_chunks(chunks: &[&'static [u8]]) -> Vec<io::Result<Bytes>> {
        chunks.iter().map(|c| Ok(Bytes::from_static(c))).collect()
    }

    /// Records the chunks it sees and whether it was finalized
    struct Probe {
        seen: Arc<Mutex<Vec<Vec<u8>>>>,
    }

    impl Digester for Probe {
        fn update(&mut self, chunk: &[u8]) {
            self.seen.lock().unwrap().push(chunk.to_vec());
        }

        fn finalize(self: Box<Self>) -> String {
            self.seen.lock().unwrap().concat().len().to_string()
        }

        fn kind(&self) -> DigesterKind {
            DigesterKind::Length
        }
    }

    fn probes(n: usize) -> (Vec<(&'static str, Box<dyn Digester>)>, Vec<Arc<Mutex<Vec<Vec<u8>>>>>) {
        const NAMES: [&str; 4] = ["A", "B", "C", "D"];
        let logs: Vec<_> = (0..n).map(|_| Arc::new(Mutex::new(Vec::new()))).collect();
        let digesters = logs
            .iter()
            .enumerate()
            .map(|(i, log)| {
                let probe: Box<dyn Digester> = Box::new(Probe {
                    seen: Arc::clone(log),
                });
                (NAMES[i], probe)
            })
            .collect();
        (digesters, logs)
    }

    #[test]
    fn test_views_see_identical_sequences() {
        let mut views = ChunkTee::split(ok_chunks(&[b"ab", b"", b"cde"]).into_iter(), 3);

        let first: Vec<_> = views[0].by_ref().map(|c| c.unwrap()).collect();
        let third: Vec<_> = views[2].by_ref().map(|c| c.unwrap()).collect();
        let second: Vec<_> = views[1].by_ref().map(|c| c.unwrap()).collect();

        assert_eq!(first, [&b"ab"[..], b"", b"cde"]);
        assert_eq!(first, second);
        assert_eq!(first, third);
    }

    #[test]
    fn test_tee_buffers_only_unseen_chunks() {
        let mut views = ChunkTee::split(ok_chunks(&[b"1", b"2", b"3"]).into_iter(), 2);

        views[0].next();
        views[0].next();
        assert_eq!(views[0].buffered_chunks(), 2);

        views[1].next();
        assert_eq!(views[1].buffered_chunks(), 1);
        views[1].next();
        assert_eq!(views[1].buffered_chunks(), 0);
    }

    #[test]
    fn test_lock_step_keeps_buffer_bounded() {
        let data: Vec<io::Result<Bytes>> = (0..100u8).map(|i| Ok(Bytes::from(vec![i; 4]))).collect();
        let mut views = ChunkTee::split(data.into_iter(), 4);

        for _ in 0..100 {
            for view in views.iter_mut() {
                assert!(view.next().is_some());
                assert!(view.buffered_chunks() <= 1);
            }
        }
        assert!(views.iter_mut().all(|v| v.next().is_none()));
    }

    #[test]
    fn test_every_digester_sees_every_chunk_in_order() {
        let (digesters, logs) = probes(3);
        let source = ChunkSource::from_chunks(ok_chunks(&[b"hash", b"", b"me"]), None);

        let outcome = run_fanout(source, digesters, &NullProvider).unwrap();

        for log in &logs {
            assert_eq!(*log.lock().unwrap(), [b"hash".to_vec(), vec![], b"me".to_vec()]);
        }
        assert_eq!(outcome.results.names(), ["A", "B", "C"]);
        assert_eq!(outcome.results.get("B"), Some("6"));
        assert_eq!(outcome.bytes_processed, 6);
        assert_eq!(outcome.chunks, 3);
    }

    /// Appends `(name, chunk)` to a log shared by every digester of a run
    struct Interleaved {
        name: &'static str,
        log: Arc<Mutex<Vec<(&'static str, Vec<u8>)>>>,
    }

    impl Digester for Interleaved {
        fn update(&mut self, chunk: &[u8]) {
            self.log.lock().unwrap().push((self.name, chunk.to_vec()));
        }

        fn finalize(self: Box<Self>) -> String {
            String::new()
        }

        fn kind(&self) -> DigesterKind {
            DigesterKind::Standard
        }
    }

    #[test]
    fn test_chunk_reaches_every_digester_before_the_next_chunk() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let digesters: Vec<(&'static str, Box<dyn Digester>)> = ["A", "B", "C"]
            .into_iter()
            .map(|name| {
                let digester: Box<dyn Digester> = Box::new(Interleaved {
                    name,
                    log: Arc::clone(&log),
                });
                (name, digester)
            })
            .collect();
        let source = ChunkSource::from_chunks(ok_chunks(&[b"0", b"1", b"2"]), None);

        run_fanout(source, digesters, &NullProvider).unwrap();

        let expected: Vec<(&str, Vec<u8>)> = [b"0", b"1", b"2"]
            .iter()
            .flat_map(|chunk| ["A", "B", "C"].map(|name| (name, chunk.to_vec())))
            .collect();
        assert_eq!(*log.lock().unwrap(), expected);
    }

    #[test]
    fn test_empty_input_still_finalizes() {
        let (digesters, logs) = probes(2);
        let source = ChunkSource::from_chunks(Vec::<io::Result<Bytes>>::new(), Some(0));

        let outcome = run_fanout(source, digesters, &NullProvider).unwrap();

        assert_eq!(outcome.results.len(), 2);
        assert_eq!(outcome.results.get("A"), Some("0"));
        assert!(logs[0].lock().unwrap().is_empty());
    }

    #[test]
    fn test_no_digesters_short_circuits() {
        let source = ChunkSource::from_chunks(
            std::iter::from_fn(|| -> Option<io::Result<Bytes>> { panic!("source must not be read") }),
            None,
        );

        let outcome = run_fanout(source, Vec::new(), &NullProvider).unwrap();
        assert!(outcome.results.is_empty());
        assert_eq!(outcome.chunks, 0);
    }

    #[test]
    fn test_read_error_propagates() {
        let (digesters, _) = probes(2);
        let chunks = vec![
            Ok(Bytes::from_static(b"ok")),
            Err(io::Error::new(io::ErrorKind::ConnectionReset, "reset")),
        ];
        let source = ChunkSource::from_chunks(chunks, None);

        let err = run_fanout(source, digesters, &NullProvider).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_progress_reported_per_chunk() {
        let (digesters, _) = probes(1);
        let provider = RecordingProvider::new();
        let source = ChunkSource::from_chunks(ok_chunks(&[b"abc", b"de"]), Some(5));

        run_fanout(source, digesters, &provider).unwrap();

        assert_eq!(
            provider.updates(),
            [
                ProgressUpdate::HashProgress {
                    bytes_processed: 3,
                    total_bytes: Some(5)
                },
                ProgressUpdate::HashProgress {
                    bytes_processed: 5,
                    total_bytes: Some(5)
                },
            ]
        );
    }
}
