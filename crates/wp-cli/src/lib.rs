//! Library side of the water point cleaner CLI: logging setup and the
//! staged cleaning pipeline.

pub mod logging;
pub mod pipeline;
pub mod types;
