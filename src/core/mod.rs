pub mod convert;
pub mod etl;
pub mod mapping;
pub mod queries;
pub mod sql_script;

pub use crate::domain::model::{GraphRecord, NodeParams, Row, Value};
pub use crate::domain::ports::{GraphSink, RelationalSource};
pub use crate::utils::error::Result;
