pub mod alerts;
pub mod allocate;
pub mod backtest;
pub mod cache;
pub mod classify;
pub mod compose;
pub mod ingest;
pub mod opportunities;
pub mod pipeline;
pub mod skill;
