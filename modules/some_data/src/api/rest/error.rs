use std::fmt::Display;

use apikit::Problem;

/// Map an extractor rejection (bad query string, malformed or ill-typed JSON,
/// missing content type) to a `400 Bad Request` problem.
#[must_use]
pub fn bad_request_from_rejection(rejection: &impl Display, instance: &str) -> Problem {
    tracing::debug!(%rejection, instance, "Rejected request input");
    apikit::bad_request(rejection.to_string()).with_instance(instance)
}
