//! Things resource cases, including the `quantity` boundary checks.

use serde_json::json;
use stubprobe_domain::{
    DomainResult, RequestSpec, ResourceGroup, StatusExpectation, TestCase, random_resource_id,
};

use super::{Credentials, QUANTITY_RANGE};

fn case(name: impl Into<String>, request: RequestSpec, expected: StatusExpectation) -> TestCase {
    TestCase::new(ResourceGroup::Things, name, request, expected)
}

fn listing() -> DomainResult<RequestSpec> {
    RequestSpec::get("/things")
}

fn by_id(request: DomainResult<RequestSpec>) -> DomainResult<RequestSpec> {
    Ok(request?.with_path_param("id", random_resource_id()))
}

/// Both ends of the range.
fn valid_quantities() -> [i64; 2] {
    [*QUANTITY_RANGE.start(), *QUANTITY_RANGE.end()]
}

/// Just below the range, the negative unit, just above the range.
fn invalid_quantities() -> [i64; 3] {
    [*QUANTITY_RANGE.start() - 1, -1, *QUANTITY_RANGE.end() + 1]
}

pub(super) fn cases(credentials: &Credentials) -> DomainResult<Vec<TestCase>> {
    let auth = |request: RequestSpec| credentials.authenticated(request);

    let mut cases = vec![
        case(
            "list_things_basic",
            auth(listing()?.with_query("sort", "created_at").with_query("order", "desc")),
            StatusExpectation::of([200, 204]),
        ),
        case(
            "list_things_with_all_filters",
            auth(
                listing()?
                    .with_query("name", "Apple")
                    .with_query("colour", "red")
                    .with_query("quantity", "100")
                    .with_query("sort", "quantity")
                    .with_query("order", "asc"),
            ),
            StatusExpectation::of([200, 204]),
        ),
        case("list_things_unauthorized", listing()?, StatusExpectation::of([401])),
        case(
            "list_things_invalid_sort",
            auth(listing()?.with_query("sort", "invalid").with_query("order", "asc")),
            StatusExpectation::of([400, 422]),
        ),
        case(
            "list_things_invalid_order",
            auth(listing()?.with_query("sort", "name").with_query("order", "wrong")),
            StatusExpectation::of([400, 422]),
        ),
        case(
            "create_thing_success",
            auth(RequestSpec::post("/things")?.with_json(json!({
                "name": "Banana",
                "colour": "yellow",
                "quantity": 50,
            }))),
            StatusExpectation::of([201]),
        ),
        case(
            "create_thing_missing_fields",
            auth(RequestSpec::post("/things")?.with_json(json!({"name": "NoColour"}))),
            StatusExpectation::of([400, 422]),
        ),
        case(
            "get_thing_success",
            auth(by_id(RequestSpec::get("/things/{id}"))?),
            StatusExpectation::of([200, 404]),
        ),
        case(
            "get_thing_unauthorized",
            by_id(RequestSpec::get("/things/{id}"))?,
            StatusExpectation::of([401]),
        ),
        case(
            "update_thing_success",
            auth(by_id(RequestSpec::put("/things/{id}"))?.with_json(json!({
                "name": "UpdatedThing",
                "colour": "blue",
                "quantity": 77,
            }))),
            StatusExpectation::of([200, 404]),
        ),
        case(
            "delete_thing_success",
            auth(by_id(RequestSpec::delete("/things/{id}"))?),
            StatusExpectation::of([204, 404]),
        ),
    ];

    for quantity in valid_quantities() {
        cases.push(case(
            format!("quantity_boundary_valid[{quantity}]"),
            auth(RequestSpec::post("/things")?.with_json(json!({
                "name": "BoundaryThing",
                "colour": "green",
                "quantity": quantity,
            }))),
            StatusExpectation::of([201]),
        ));
    }

    for quantity in invalid_quantities() {
        cases.push(case(
            format!("quantity_boundary_invalid[{quantity}]"),
            auth(RequestSpec::post("/things")?.with_json(json!({
                "name": "BoundaryThing",
                "colour": "blue",
                "quantity": quantity,
            }))),
            StatusExpectation::of([400, 422]),
        ));
    }

    Ok(cases)
}
