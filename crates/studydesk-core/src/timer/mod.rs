mod countdown;
mod pomodoro;

pub use countdown::Countdown;
pub use pomodoro::{Phase, PhaseEnd, PomodoroTimer};
