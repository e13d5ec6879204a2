//! Result type alias for Caviard

use super::errors::CaviardError;

/// Result type alias for Caviard operations
///
/// # Examples
///
/// ```
/// use caviard::domain::result::Result;
/// use caviard::domain::errors::CaviardError;
///
/// fn failing_function() -> Result<()> {
///     Err(CaviardError::Configuration("missing locale".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, CaviardError>;

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
