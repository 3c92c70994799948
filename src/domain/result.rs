//! Result type alias for the report pipeline

use super::errors::ReportError;

/// Result type alias for report operations
///
/// Uses `ReportError` as the error type. Use this throughout the codebase
/// for fallible operations.
///
/// # Examples
///
/// ```
/// use cdp_report::domain::result::Result;
/// use cdp_report::domain::errors::ReportError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(ReportError::Configuration("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, ReportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_with_question_mark() -> Result<()> {
        fn inner() -> Result<i32> {
            Ok(42)
        }

        let value = inner()?;
        assert_eq!(value, 42);
        Ok(())
    }

    #[test]
    fn test_result_err() {
        let result: Result<i32> = Err(ReportError::Configuration("test error".to_string()));
        assert!(result.is_err());
    }
}
