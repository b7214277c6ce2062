mod engine;
mod hooks;
mod segment;
mod view;

pub use engine::{SessionContext, SessionState, TimerEngine};
pub use hooks::{NoopHooks, SessionHooks};
pub use segment::Segment;
pub use view::{format_mmss, CycleProgress, SessionView, TimerMode};
