//! Tick loop driving a session
//!
//! The scheduler task is the only writer of its [`Session`]. Input reaches it
//! over a channel and is applied as soon as it arrives; the session's
//! heading latch keeps that to one turn per tick. Every change is published
//! as a [`Snapshot`] on a watch channel for whoever draws the board.

use anyhow::{Context, Result};
use rand::Rng;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::{Instant, sleep_until};
use tracing::{debug, info, warn};

use crate::game::{GameEngine, InputOutcome, Session, Signal, Snapshot, TickOutcome};
use crate::storage::HighScoreStore;

/// Signals buffered between ticks before new ones are dropped
const SIGNAL_BUFFER: usize = 64;

pub struct Scheduler<R> {
    engine: GameEngine<R>,
    session: Session,
    store: Arc<dyn HighScoreStore>,
    writer: Option<HighScoreWriter>,
}

impl<R: Rng + Send + 'static> Scheduler<R> {
    /// Start a session using the stored high score
    pub fn new(mut engine: GameEngine<R>, store: Arc<dyn HighScoreStore>) -> Self {
        let session = engine.new_session(store.read_high_score());
        Self::from_session(engine, session, store)
    }

    pub fn from_session(
        engine: GameEngine<R>,
        session: Session,
        store: Arc<dyn HighScoreStore>,
    ) -> Self {
        Self {
            engine,
            session,
            store,
            writer: None,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Run one tick and persist a raised high score
    pub fn tick(&mut self) -> TickOutcome {
        let outcome = self.engine.step(&mut self.session);

        if let Some(score) = outcome.high_score {
            self.persist(score);
        }

        outcome
    }

    pub fn input(&mut self, signal: Signal) -> InputOutcome {
        let outcome = self.engine.handle_input(&mut self.session, signal);
        debug!(?signal, ?outcome, "input");
        outcome
    }

    /// Fire-and-forget write; goes through the writer task while the loop runs
    fn persist(&self, score: u32) {
        match &self.writer {
            Some(writer) => writer.write(score),
            None => self.store.write_high_score(score),
        }
    }

    fn tick_interval(&self) -> Duration {
        Duration::from_micros((self.session.tick_interval_ms * 1000.0).round() as u64)
    }

    /// Drive the session until `stop` fires or every signal sender is gone
    pub async fn run(
        mut self,
        mut signals: mpsc::Receiver<Signal>,
        frames: watch::Sender<Snapshot>,
        mut stop: oneshot::Receiver<()>,
    ) -> Session {
        info!("scheduler started");
        self.writer = Some(HighScoreWriter::spawn(Arc::clone(&self.store)));
        frames.send_replace(self.session.snapshot());

        // Deadlines accumulate so sub-millisecond intervals are not rounded away
        let mut deadline = Instant::now() + self.tick_interval();
        let timer = sleep_until(deadline);
        tokio::pin!(timer);

        loop {
            tokio::select! {
                biased;

                _ = &mut stop => break,

                maybe_signal = signals.recv() => {
                    let Some(signal) = maybe_signal else {
                        break;
                    };
                    if self.input(signal) != InputOutcome::Ignored {
                        frames.send_replace(self.session.snapshot());
                    }
                }

                _ = &mut timer => {
                    // While over this is only a heartbeat: the engine leaves
                    // the session untouched until a restart comes in
                    if !self.session.is_over {
                        self.tick();
                        frames.send_replace(self.session.snapshot());
                    }
                    deadline = (deadline + self.tick_interval()).max(Instant::now());
                    timer.as_mut().reset(deadline);
                }
            }
        }

        // Pending writes land before the session is handed back
        if let Some(writer) = self.writer.take() {
            writer.finish().await;
        }

        info!(score = self.session.score, "scheduler stopped");
        self.session
    }

    /// Spawn the loop onto the current runtime
    pub fn spawn(self) -> SchedulerHandle {
        let (signal_tx, signal_rx) = mpsc::channel(SIGNAL_BUFFER);
        let (frame_tx, frame_rx) = watch::channel(self.session.snapshot());
        let (stop_tx, stop_rx) = oneshot::channel();

        let task = tokio::spawn(self.run(signal_rx, frame_tx, stop_rx));

        SchedulerHandle {
            signals: signal_tx,
            frames: frame_rx,
            stop: stop_tx,
            task,
        }
    }
}

/// Single task that applies high score writes in order
///
/// Each write runs on the blocking pool, but the next one only starts after
/// the previous one is done, and a score at or below the last written one is
/// skipped. A slow write can never be overtaken by an older value.
struct HighScoreWriter {
    scores: mpsc::UnboundedSender<u32>,
    task: JoinHandle<()>,
}

impl HighScoreWriter {
    fn spawn(store: Arc<dyn HighScoreStore>) -> Self {
        let (scores, mut rx) = mpsc::unbounded_channel::<u32>();

        let task = tokio::spawn(async move {
            let mut written = None;
            while let Some(mut score) = rx.recv().await {
                while let Ok(next) = rx.try_recv() {
                    score = score.max(next);
                }
                if written.is_some_and(|last| score <= last) {
                    continue;
                }

                let store = Arc::clone(&store);
                match tokio::task::spawn_blocking(move || store.write_high_score(score)).await {
                    Ok(()) => written = Some(score),
                    Err(err) => warn!(error = %err, score, "high score write failed"),
                }
            }
        });

        Self { scores, task }
    }

    fn write(&self, score: u32) {
        // Only fails once the task is gone, which happens after `finish`
        let _ = self.scores.send(score);
    }

    async fn finish(self) {
        drop(self.scores);
        if let Err(err) = self.task.await {
            warn!(error = %err, "high score writer failed");
        }
    }
}

/// Owner of a running scheduler task
pub struct SchedulerHandle {
    signals: mpsc::Sender<Signal>,
    frames: watch::Receiver<Snapshot>,
    stop: oneshot::Sender<()>,
    task: JoinHandle<Session>,
}

impl SchedulerHandle {
    /// Queue a signal for the session
    pub fn send(&self, signal: Signal) -> Result<()> {
        self.signals
            .try_send(signal)
            .context("Failed to deliver input to scheduler")
    }

    /// Receiver for published snapshots
    pub fn frames(&self) -> watch::Receiver<Snapshot> {
        self.frames.clone()
    }

    /// Stop the tick loop and hand back the final session
    pub async fn stop(self) -> Result<Session> {
        // The task may already have exited, in which case there is nobody to tell
        let _ = self.stop.send(());
        self.task.await.context("Scheduler task failed")
    }
}
