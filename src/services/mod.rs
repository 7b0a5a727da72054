// SPDX-License-Identifier: MIT

//! Services module - the timer core.

pub mod resolver;
pub mod session;
pub mod ticker;
pub mod timer;

pub use resolver::{resolve, DurationSet, EffectiveConfig};
pub use session::{TimerSession, TimerSnapshot};
pub use ticker::{TimerEvent, TimerHandle};
pub use timer::{Completion, Phase, TimerEngine};
