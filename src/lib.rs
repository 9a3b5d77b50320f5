pub mod config;
pub mod error;
pub mod fetch;
pub mod output;
pub mod pipeline;
pub mod process;
pub mod report;
pub mod stats;

pub use config::PipelineConfig;
pub use error::GrayBookError;
pub use process::{EmployeeRecord, NormalizedRow, RawTable};
