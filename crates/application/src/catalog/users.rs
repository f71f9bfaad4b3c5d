//! Users resource cases.

use serde_json::json;
use stubprobe_domain::{
    DomainResult, RequestSpec, ResourceGroup, StatusExpectation, TestCase, random_resource_id,
};

use super::Credentials;

fn case(name: &str, request: RequestSpec, expected: StatusExpectation) -> TestCase {
    TestCase::new(ResourceGroup::Users, name, request, expected)
}

fn listing(sort: &str, order: &str) -> DomainResult<RequestSpec> {
    Ok(RequestSpec::get("/users")?
        .with_query("sort", sort)
        .with_query("order", order))
}

fn by_id(request: DomainResult<RequestSpec>) -> DomainResult<RequestSpec> {
    Ok(request?.with_path_param("id", random_resource_id()))
}

pub(super) fn cases(credentials: &Credentials) -> DomainResult<Vec<TestCase>> {
    let auth = |request: RequestSpec| credentials.authenticated(request);

    Ok(vec![
        case(
            "list_users_success",
            auth(listing("created_at", "desc")?),
            StatusExpectation::of([200, 204]),
        ),
        case(
            "list_users_with_email_filter",
            auth(listing("email_address", "asc")?.with_query("email_address", "mash@example.com")),
            StatusExpectation::of([200, 204]),
        ),
        case(
            "list_users_unauthorized",
            RequestSpec::get("/users")?,
            StatusExpectation::of([401]),
        ),
        case(
            "list_users_invalid_sort",
            auth(listing("not_valid", "asc")?),
            StatusExpectation::of([400, 422]),
        ),
        case(
            "list_users_invalid_order",
            auth(listing("email_address", "descending")?),
            StatusExpectation::of([400, 422]),
        ),
        case(
            "create_user_success",
            RequestSpec::post("/users")?.with_json(json!({
                "email_address": "newuser@example.com",
                "password": "CorrectHorseBatteryStaple",
            })),
            StatusExpectation::of([201]),
        ),
        case(
            "create_user_missing_fields",
            RequestSpec::post("/users")?.with_json(json!({"email_address": "missingpass@example.com"})),
            StatusExpectation::of([400, 422]),
        ),
        case(
            "get_user_success",
            auth(by_id(RequestSpec::get("/users/{id}"))?),
            StatusExpectation::of([200, 404]),
        ),
        case(
            "get_user_unauthorized",
            by_id(RequestSpec::get("/users/{id}"))?,
            StatusExpectation::of([401]),
        ),
        case(
            "update_user_success",
            auth(by_id(RequestSpec::put("/users/{id}"))?.with_json(json!({
                "email_address": "updated@example.com",
                "password": "NewPass123",
            }))),
            StatusExpectation::of([200, 404]),
        ),
        case(
            "delete_user_success",
            auth(by_id(RequestSpec::delete("/users/{id}"))?),
            StatusExpectation::of([204, 404]),
        ),
    ])
}
