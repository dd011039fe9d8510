//! Result alias for API handlers

use crate::problem::Problem;

/// Standard result type for API handlers.
///
/// `Problem` implements `IntoResponse`, so Axum converts the error side
/// straight into an `application/problem+json` response.
pub type ApiResult<T = ()> = Result<T, Problem>;

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_api_result_err() {
        let result: ApiResult<i32> = Err(Problem::new(
            StatusCode::BAD_REQUEST,
            "Bad Request",
            "Invalid input",
        ));
        assert!(result.is_err());
    }
}
