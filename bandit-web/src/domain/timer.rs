use std::{collections::HashMap, sync::Arc, time::Duration};

use bandit_client::{
    domain::{format_hms, TaskId},
    SessionToken,
};
use serde::Serialize;
use time::OffsetDateTime;
use tokio::{
    sync::{watch, RwLock},
    task::JoinHandle,
    time::{Instant, MissedTickBehavior},
};

use super::TimerError;

/// A running timer owned by one session.
///
/// A background task publishes the elapsed whole seconds once per period.
/// Dropping the timer aborts that task.
#[derive(Debug)]
pub struct SessionTimer {
    task_id: TaskId,
    notes: Option<String>,
    started_at: OffsetDateTime,
    started: Instant,
    elapsed_rx: watch::Receiver<u64>,
    ticker: JoinHandle<()>,
}

/// The event a timer turns into when it is stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoppedTimer {
    pub task_id: TaskId,
    pub notes: Option<String>,
    pub started_at: OffsetDateTime,
    pub elapsed: u64,
}

/// Point-in-time view of a running timer, also the `/timer` JSON body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimerSnapshot {
    pub task_id: TaskId,
    pub elapsed: u64,
    pub formatted: String,
}

impl SessionTimer {
    pub fn start(task_id: TaskId, notes: Option<String>, period: Duration) -> Self {
        let started = Instant::now();
        let (elapsed_tx, elapsed_rx) = watch::channel(0);

        let ticker = tokio::spawn(async move {
            let mut interval = tokio::time::interval_at(started + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if elapsed_tx.send(started.elapsed().as_secs()).is_err() {
                    break;
                }
            }
        });

        Self {
            task_id,
            notes,
            started_at: OffsetDateTime::now_utc(),
            started,
            elapsed_rx,
            ticker,
        }
    }

    pub fn task_id(&self) -> TaskId {
        self.task_id
    }

    pub fn elapsed(&self) -> u64 {
        self.started.elapsed().as_secs()
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        let elapsed = self.elapsed();
        TimerSnapshot {
            task_id: self.task_id,
            elapsed,
            formatted: format_hms(elapsed),
        }
    }

    /// A receiver that sees every tick until the timer goes away.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.elapsed_rx.clone()
    }

    /// What recording the timer now would store. The timer keeps running
    /// until it is dropped.
    pub fn stopped(&self) -> StoppedTimer {
        StoppedTimer {
            task_id: self.task_id,
            notes: self.notes.clone(),
            started_at: self.started_at,
            elapsed: self.elapsed(),
        }
    }
}

impl Drop for SessionTimer {
    fn drop(&mut self) {
        self.ticker.abort();
    }
}

/// Running timers, at most one per session token.
#[derive(Debug, Clone)]
pub struct TimerRegistry {
    period: Duration,
    timers: Arc<RwLock<HashMap<SessionToken, SessionTimer>>>,
}

impl TimerRegistry {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            timers: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub async fn start(
        &self,
        token: &SessionToken,
        task_id: TaskId,
        notes: Option<String>,
    ) -> Result<TimerSnapshot, TimerError> {
        let mut timers = self.timers.write().await;
        if timers.contains_key(token) {
            return Err(TimerError::TimerAlreadyRunning);
        }

        let timer = SessionTimer::start(task_id, notes, self.period);
        let snapshot = timer.snapshot();
        timers.insert(token.clone(), timer);

        Ok(snapshot)
    }

    /// Take the session's timer out of the registry if it runs for `task_id`.
    /// It keeps ticking until dropped, so a failed recording can hand it back
    /// with [`TimerRegistry::restore`].
    pub async fn take(
        &self,
        token: &SessionToken,
        task_id: TaskId,
    ) -> Result<SessionTimer, TimerError> {
        let mut timers = self.timers.write().await;
        match timers.get(token) {
            Some(timer) if timer.task_id() == task_id => {}
            _ => return Err(TimerError::NoTimerRunning),
        }

        timers.remove(token).ok_or(TimerError::NoTimerRunning)
    }

    /// Put a taken timer back. Fails, dropping `timer`, when the session
    /// started another one in the meantime.
    pub async fn restore(
        &self,
        token: &SessionToken,
        timer: SessionTimer,
    ) -> Result<(), TimerError> {
        let mut timers = self.timers.write().await;
        if timers.contains_key(token) {
            return Err(TimerError::TimerAlreadyRunning);
        }

        timers.insert(token.clone(), timer);
        Ok(())
    }

    /// Throw the session's timer for `task_id` away without recording it.
    pub async fn discard(&self, token: &SessionToken, task_id: TaskId) -> Result<(), TimerError> {
        self.take(token, task_id).await.map(drop)
    }

    /// Drop whatever timer the session has. Used on logout and when the
    /// backend no longer accepts the session.
    pub async fn end_session(&self, token: &SessionToken) {
        self.timers.write().await.remove(token);
    }

    pub async fn snapshot(&self, token: &SessionToken) -> Option<TimerSnapshot> {
        self.timers.read().await.get(token).map(SessionTimer::snapshot)
    }

    pub async fn subscribe(&self, token: &SessionToken) -> Option<watch::Receiver<u64>> {
        self.timers.read().await.get(token).map(SessionTimer::subscribe)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECOND: Duration = Duration::from_secs(1);

    fn token(value: &str) -> SessionToken {
        SessionToken::new(value)
    }

    #[tokio::test(start_paused = true)]
    async fn ticks_once_per_period() {
        let timer = SessionTimer::start(TaskId::new(3), None, SECOND);
        let mut ticks = timer.subscribe();

        ticks.changed().await.unwrap();
        assert_eq!(*ticks.borrow_and_update(), 1);
        ticks.changed().await.unwrap();
        assert_eq!(*ticks.borrow_and_update(), 2);
        ticks.changed().await.unwrap();
        assert_eq!(*ticks.borrow_and_update(), 3);

        assert_eq!(timer.snapshot().formatted, "0:00:03");
    }

    #[tokio::test(start_paused = true)]
    async fn stop_returns_elapsed_and_ends_ticking() {
        let timer = SessionTimer::start(TaskId::new(3), Some("focus".into()), SECOND);
        let mut ticks = timer.subscribe();

        tokio::time::sleep(Duration::from_secs(90)).await;
        let stopped = timer.stopped();
        drop(timer);

        assert_eq!(stopped.elapsed, 90);
        assert_eq!(stopped.task_id, TaskId::new(3));
        assert_eq!(stopped.notes.as_deref(), Some("focus"));

        // The ticker is gone, so the sender side closes.
        ticks.borrow_and_update();
        assert!(ticks.changed().await.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_timer_aborts_ticker() {
        let timer = SessionTimer::start(TaskId::new(1), None, SECOND);
        let mut ticks = timer.subscribe();
        drop(timer);

        assert!(ticks.changed().await.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn second_start_for_same_session_is_rejected() {
        let registry = TimerRegistry::new(SECOND);
        registry.start(&token("a"), TaskId::new(1), None).await.unwrap();

        let err = registry
            .start(&token("a"), TaskId::new(2), None)
            .await
            .unwrap_err();
        assert_eq!(err, TimerError::TimerAlreadyRunning);

        // Other sessions are independent.
        assert!(registry.start(&token("b"), TaskId::new(2), None).await.is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn stop_without_timer_is_rejected() {
        let registry = TimerRegistry::new(SECOND);
        let err = registry.take(&token("a"), TaskId::new(1)).await.unwrap_err();
        assert_eq!(err, TimerError::NoTimerRunning);
    }

    #[tokio::test(start_paused = true)]
    async fn stop_for_other_task_leaves_timer_running() {
        let registry = TimerRegistry::new(SECOND);
        registry.start(&token("a"), TaskId::new(1), None).await.unwrap();

        let err = registry.take(&token("a"), TaskId::new(2)).await.unwrap_err();
        assert_eq!(err, TimerError::NoTimerRunning);
        assert!(registry.snapshot(&token("a")).await.is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn registry_stop_reports_elapsed() {
        let registry = TimerRegistry::new(SECOND);
        registry.start(&token("a"), TaskId::new(1), None).await.unwrap();
        tokio::time::sleep(Duration::from_secs(3661)).await;

        let snapshot = registry.snapshot(&token("a")).await.unwrap();
        assert_eq!(snapshot.formatted, "1:01:01");

        let timer = registry.take(&token("a"), TaskId::new(1)).await.unwrap();
        assert_eq!(timer.stopped().elapsed, 3661);
        assert!(registry.snapshot(&token("a")).await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn restored_timer_keeps_counting_from_its_start() {
        let registry = TimerRegistry::new(SECOND);
        registry.start(&token("a"), TaskId::new(1), None).await.unwrap();
        tokio::time::sleep(Duration::from_secs(60)).await;

        let timer = registry.take(&token("a"), TaskId::new(1)).await.unwrap();
        tokio::time::sleep(Duration::from_secs(5)).await;
        registry.restore(&token("a"), timer).await.unwrap();

        let snapshot = registry.snapshot(&token("a")).await.unwrap();
        assert_eq!(snapshot.elapsed, 65);
    }

    #[tokio::test(start_paused = true)]
    async fn restore_does_not_replace_a_newer_timer() {
        let registry = TimerRegistry::new(SECOND);
        registry.start(&token("a"), TaskId::new(1), None).await.unwrap();
        let taken = registry.take(&token("a"), TaskId::new(1)).await.unwrap();
        registry.start(&token("a"), TaskId::new(2), None).await.unwrap();

        let err = registry.restore(&token("a"), taken).await.unwrap_err();
        assert_eq!(err, TimerError::TimerAlreadyRunning);
        assert_eq!(
            registry.snapshot(&token("a")).await.unwrap().task_id,
            TaskId::new(2)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn discard_and_end_session_free_the_slot() {
        let registry = TimerRegistry::new(SECOND);
        registry.start(&token("a"), TaskId::new(1), None).await.unwrap();
        registry.discard(&token("a"), TaskId::new(1)).await.unwrap();
        assert!(registry.subscribe(&token("a")).await.is_none());

        registry.start(&token("a"), TaskId::new(1), None).await.unwrap();
        registry.end_session(&token("a")).await;
        assert!(registry.snapshot(&token("a")).await.is_none());
        assert!(registry.start(&token("a"), TaskId::new(4), None).await.is_ok());
    }
}
