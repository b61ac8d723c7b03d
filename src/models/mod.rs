// Domain models: crash records from the collector and the views derived from them

mod chart;
mod crash;

pub use chart::{ChartSeries, ContainerKey};
pub use crash::{ContainerLogTranscript, CrashCountRecord, CrashEvent, CrashReport};
