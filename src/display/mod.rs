pub mod format;
pub mod status;
pub mod table;

pub use format::{format_date, format_optional_date, format_price};
pub use status::{OperationStatus, display_status};
pub use table::{TableDisplay, render_stats};
