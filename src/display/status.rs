//! Status line output for CLI operations

/// Outcome category for a user-facing operation
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OperationStatus {
    InProgress,
    Success,
    Warning,
    Error,
}

/// Display operation status with a leading symbol
pub fn display_status(operation: &str, status: OperationStatus) {
    let (symbol, message) = match status {
        OperationStatus::InProgress => ("⏳", format!("In progress: {}", operation)),
        OperationStatus::Success => ("✅", format!("Completed: {}", operation)),
        OperationStatus::Warning => ("⚠️", format!("Warning: {}", operation)),
        OperationStatus::Error => ("❌", format!("Error: {}", operation)),
    };

    // Add space before emoji to prevent terminal clipping
    println!(" {} {}", symbol, message);
}
