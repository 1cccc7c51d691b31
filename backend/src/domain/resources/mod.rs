//! Owned resource kinds and their client representations.
//!
//! Category, task, schedule and timer settings are owned directly by a user.
//! Pomodoros only exist inside a task and inherit its owner.

mod category;
mod pomodoro;
mod schedule;
mod task;
mod timer_settings;
pub(crate) mod validation;

pub use self::category::{Category, CategoryRepresentation};
pub use self::pomodoro::{MAX_POMODORO_SECONDS, Pomodoro, PomodoroRepresentation};
pub use self::schedule::{Schedule, ScheduleRepresentation};
pub use self::task::{Task, TaskRepresentation};
pub use self::timer_settings::{TimerSettings, TimerSettingsRepresentation};
pub use self::validation::FieldError;

/// Upper bound for names and titles.
pub const NAME_MAX: usize = 50;
pub const DESCRIPTION_MAX: usize = 200;

#[cfg(test)]
mod tests;
