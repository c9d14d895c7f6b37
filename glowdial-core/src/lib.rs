#![no_std]

mod duty;
mod filter;
mod pipeline;
mod ring;
mod watch;

pub use duty::DutyScale;
pub use filter::average;
pub use pipeline::{Pipeline, Stats, Update};
pub use ring::{Arena, SampleRing};
pub use watch::{Excursion, LevelWatch};
