//! Result type alias for Harvest

use super::errors::HarvestError;

/// Result type alias for Harvest operations
///
/// # Examples
///
/// ```
/// use harvest::domain::result::Result;
/// use harvest::domain::errors::HarvestError;
///
/// fn failing_function() -> Result<()> {
///     Err(HarvestError::Configuration("missing collection".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, HarvestError>;

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
}
