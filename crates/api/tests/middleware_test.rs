use axum::http::StatusCode;
use axum::response::IntoResponse;
use rstest::rstest;

use detailbook_api::middleware::error_handling::AppError;
use detailbook_core::errors::BookingError;

#[rstest]
#[case(BookingError::NotFound("Service missing".to_string()), StatusCode::NOT_FOUND)]
#[case(BookingError::Validation("Bad input".to_string()), StatusCode::BAD_REQUEST)]
#[case(BookingError::InvalidRange("End before start".to_string()), StatusCode::BAD_REQUEST)]
#[case(BookingError::Database(eyre::eyre!("connection refused")), StatusCode::INTERNAL_SERVER_ERROR)]
fn test_error_status_mapping(#[case] error: BookingError, #[case] expected: StatusCode) {
    let response = AppError(error).into_response();
    assert_eq!(response.status(), expected);
}

#[test]
fn test_eyre_report_maps_to_internal_error() {
    let err: AppError = eyre::eyre!("pool exhausted").into();
    let response = err.into_response();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
