//! Analog stick and button handling for the blockfall engine.
//!
//! [`AnalogInput`] implements the engine's [`InputPort`](blockfall_engine::InputPort)
//! over any [`AnalogSource`]: a pair of raw axis readings and a push button.
//! Thresholds, per-axis debounce and hold-to-reset are configured through
//! [`StickConfig`]. Nothing here touches hardware; a board support layer only
//! has to implement [`AnalogSource`].

pub use self::{analog::*, axis::*, config::*, hold::*};

mod analog;
mod axis;
mod config;
mod hold;
