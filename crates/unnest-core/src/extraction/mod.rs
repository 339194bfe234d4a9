//! Recursive extraction driver.

mod cancel;
mod engine;

pub use cancel::CancellationToken;
pub use engine::EngineState;
pub use engine::ExtractionEngine;
