pub mod filter;
pub mod record;
pub mod report_filter;
pub mod time;

pub use filter::*;
pub use record::*;
pub use report_filter::*;
pub use time::*;
