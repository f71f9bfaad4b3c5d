//! Pet store cases. The pet store is unauthenticated.

use serde_json::{Value, json};
use stubprobe_domain::{
    BodyShape, DomainResult, FixtureSpec, RequestSpec, ResourceGroup, StatusExpectation, TestCase,
};

fn valid_pet() -> Value {
    json!({"name": "Fluffy", "tag": "dog"})
}

fn case(name: &str, request: RequestSpec, expected: StatusExpectation) -> TestCase {
    TestCase::new(ResourceGroup::Pets, name, request, expected)
}

fn create_pet_fixture() -> DomainResult<FixtureSpec> {
    Ok(FixtureSpec::create(RequestSpec::post("/pets")?.with_json(valid_pet())))
}

fn filtered_listing() -> DomainResult<RequestSpec> {
    Ok(RequestSpec::get("/pets")?
        .with_query_repeated("tags", ["dog"])
        .with_query("limit", "5"))
}

pub(super) fn cases() -> DomainResult<Vec<TestCase>> {
    Ok(vec![
        case("get_all_pets", RequestSpec::get("/pets")?, StatusExpectation::of([200]))
            .expect_body(BodyShape::IsArray),
        case("get_pets_with_query_params", filtered_listing()?, StatusExpectation::of([200]))
            .expect_body(BodyShape::IsArray),
        case("get_pets_is_idempotent", filtered_listing()?, StatusExpectation::of([200]))
            .expect_body(BodyShape::IsArray)
            .repeated(2),
        case(
            "add_pet_success",
            RequestSpec::post("/pets")?.with_json(valid_pet()),
            StatusExpectation::of([200]),
        )
        .expect_body(BodyShape::has_keys(["id", "name"])),
        case(
            "add_pet_missing_name",
            RequestSpec::post("/pets")?.with_json(json!({"tag": "dog"})),
            StatusExpectation::of([400, 422]),
        ),
        case(
            "add_pet_empty_body",
            RequestSpec::post("/pets")?.with_json(json!({})),
            StatusExpectation::of([400, 422]),
        ),
        case("get_pet_by_id", RequestSpec::get("/pets/{id}")?, StatusExpectation::of([200]))
            .expect_body(BodyShape::has_keys(["id", "name"]))
            .with_fixture(create_pet_fixture()?),
        case(
            "get_pet_by_id_invalid",
            RequestSpec::get("/pets/abc")?,
            StatusExpectation::of([400, 422]),
        ),
        case(
            "get_pet_by_id_not_found",
            RequestSpec::get("/pets/999999")?,
            StatusExpectation::of([404, 200]),
        ),
        case(
            "delete_pet_success",
            RequestSpec::delete("/pets/{id}")?,
            StatusExpectation::of([204, 200]),
        )
        .with_fixture(create_pet_fixture()?),
        case(
            "delete_pet_invalid_id",
            RequestSpec::delete("/pets/invalid")?,
            StatusExpectation::of([400, 422]),
        ),
        case(
            "delete_pet_not_found",
            RequestSpec::delete("/pets/999999")?,
            StatusExpectation::of([404, 204, 200]),
        ),
    ])
}
