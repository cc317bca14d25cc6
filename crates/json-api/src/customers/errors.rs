//! Customer Errors

use salvo::http::StatusError;

use venda_app::domain::customers::CustomersServiceError;

use crate::errors;

pub(crate) fn into_status_error(error: CustomersServiceError) -> StatusError {
    match error {
        CustomersServiceError::NotFound => errors::not_found("not_found", &error),
        CustomersServiceError::AlreadyExists => errors::conflict("already_exists", &error),
        CustomersServiceError::InvalidReference | CustomersServiceError::InvalidData => {
            errors::bad_request(&error)
        }
        CustomersServiceError::Sql(source) => errors::internal("customer storage failed", &source),
    }
}

#[cfg(test)]
mod tests {
    use salvo::http::StatusCode;

    use super::*;

    #[test]
    fn missing_record_is_not_found() {
        let error = into_status_error(CustomersServiceError::NotFound);

        assert_eq!(error.code, StatusCode::NOT_FOUND);
        assert_eq!(error.brief, "not_found");
    }

    #[test]
    fn duplicate_record_is_a_conflict() {
        let error = into_status_error(CustomersServiceError::AlreadyExists);

        assert_eq!(error.code, StatusCode::CONFLICT);
        assert_eq!(error.brief, "already_exists");
    }
}
