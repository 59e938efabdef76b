//! Countdown runner for the pomodoro machine.
//!
//! Owns the single live ticker: a tokio task firing once per second while
//! the timer runs. Starting while a countdown is live is a no-op; reset
//! aborts any pending tick *before* the machine is touched, so a stale tick
//! can never land on updated state; the ticker ends itself when a phase
//! completes (the machine idles at the boundary); dropping the runner aborts
//! whatever is live.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tokio::time::{self, Duration};

use super::pomodoro::PomodoroTimer;
use crate::events::Event;

/// Drives a [`PomodoroTimer`] on a 1-second interval.
///
/// Must live inside a tokio runtime.
pub struct Countdown {
    timer: Arc<Mutex<PomodoroTimer>>,
    ticker: Arc<Mutex<Option<JoinHandle<()>>>>,
    events: mpsc::UnboundedSender<Event>,
}

impl Countdown {
    /// Wrap a timer; the receiver yields every emitted [`Event`].
    pub fn new(timer: PomodoroTimer) -> (Self, mpsc::UnboundedReceiver<Event>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let runner = Self {
            timer: Arc::new(Mutex::new(timer)),
            ticker: Arc::new(Mutex::new(None)),
            events: tx,
        };
        (runner, rx)
    }

    pub async fn snapshot(&self) -> PomodoroTimer {
        self.timer.lock().await.clone()
    }

    /// Begin counting down in the current phase.
    ///
    /// Returns `false` without spawning anything when a countdown is already
    /// live: there is never more than one ticker.
    pub async fn start(&self) -> bool {
        {
            let mut guard = self.timer.lock().await;
            if !guard.start() {
                return false;
            }
            let _ = self.events.send(Event::TimerStarted {
                phase: guard.phase(),
                duration_secs: guard.remaining_seconds(),
                at: Utc::now(),
            });
        }
        self.spawn_ticker().await;
        true
    }

    /// Abort any pending tick, then force the machine back to Work-Idle.
    pub async fn reset(&self) {
        self.cancel_ticker().await;
        let mut guard = self.timer.lock().await;
        guard.reset();
        let _ = self.events.send(Event::TimerReset { at: Utc::now() });
    }

    /// Reconfigure durations; a running countdown is unaffected until its
    /// next phase reset.
    pub async fn set_durations(&self, work_minutes: Option<u32>, break_minutes: Option<u32>) {
        let mut guard = self.timer.lock().await;
        if let Some(minutes) = work_minutes {
            guard.set_work_minutes(minutes);
        }
        if let Some(minutes) = break_minutes {
            guard.set_break_minutes(minutes);
        }
    }

    async fn spawn_ticker(&self) {
        let mut ticker_guard = self.ticker.lock().await;
        if let Some(handle) = ticker_guard.take() {
            handle.abort();
        }

        let timer = self.timer.clone();
        let events = self.events.clone();

        let handle = tokio::spawn(async move {
            let mut interval = time::interval(Duration::from_secs(1));
            // The first interval tick resolves immediately; consume it so
            // the first machine tick lands one second after start.
            interval.tick().await;
            loop {
                interval.tick().await;
                let mut guard = timer.lock().await;
                if !guard.is_running() {
                    break;
                }
                if let Some(end) = guard.tick() {
                    let _ = events.send(Event::PhaseCompleted {
                        finished: end.finished,
                        completed_cycles: end.completed_cycles,
                        at: Utc::now(),
                    });
                    break;
                }
            }
        });

        *ticker_guard = Some(handle);
    }

    async fn cancel_ticker(&self) {
        if let Some(handle) = self.ticker.lock().await.take() {
            handle.abort();
        }
    }
}

impl Drop for Countdown {
    fn drop(&mut self) {
        if let Ok(mut guard) = self.ticker.try_lock() {
            if let Some(handle) = guard.take() {
                handle.abort();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::Phase;

    #[tokio::test(start_paused = true)]
    async fn work_phase_runs_to_break_idle() {
        let (countdown, mut events) = Countdown::new(PomodoroTimer::new(1, 5));
        assert!(countdown.start().await);

        time::sleep(Duration::from_secs(61)).await;

        let timer = countdown.snapshot().await;
        assert_eq!(timer.phase(), Phase::Break);
        assert!(!timer.is_running());
        assert_eq!(timer.completed_cycles(), 1);
        assert_eq!(timer.remaining_seconds(), 5 * 60);

        assert!(matches!(
            events.recv().await,
            Some(Event::TimerStarted { phase: Phase::Work, .. })
        ));
        assert!(matches!(
            events.recv().await,
            Some(Event::PhaseCompleted { finished: Phase::Work, completed_cycles: 1, .. })
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn second_start_is_rejected_while_running() {
        let (countdown, _events) = Countdown::new(PomodoroTimer::new(25, 5));
        assert!(countdown.start().await);
        assert!(!countdown.start().await);
    }

    #[tokio::test(start_paused = true)]
    async fn reset_cancels_the_pending_tick() {
        let (countdown, _events) = Countdown::new(PomodoroTimer::new(25, 5));
        countdown.start().await;
        time::sleep(Duration::from_millis(5500)).await;

        countdown.reset().await;
        // No stale tick may land after the reset.
        time::sleep(Duration::from_secs(10)).await;

        let timer = countdown.snapshot().await;
        assert!(!timer.is_running());
        assert_eq!(timer.remaining_seconds(), 25 * 60);
        assert_eq!(timer.accumulated_study_seconds(), 5);
    }

    #[tokio::test(start_paused = true)]
    async fn countdown_stops_at_the_boundary_without_auto_continuing() {
        let (countdown, _events) = Countdown::new(PomodoroTimer::new(1, 1));
        countdown.start().await;
        time::sleep(Duration::from_secs(300)).await;

        let timer = countdown.snapshot().await;
        // Break never started by itself.
        assert_eq!(timer.phase(), Phase::Break);
        assert_eq!(timer.remaining_seconds(), 60);
        assert_eq!(timer.completed_cycles(), 1);
    }
}
