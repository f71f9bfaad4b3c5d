//! In-process stand-in for the schema-driven stub server.
//!
//! Routes every request through [`StubApi`], which validates credentials,
//! query parameters and payloads the way a Prism mock of the pet store and
//! users/things OpenAPI documents does.
#![allow(dead_code)]

use std::time::Duration;

use serde_json::{Value, json};
use wiremock::matchers::any;
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

pub const TOKEN: &str = "valid.jwt.token.here";
const BEARER: &str = "Bearer valid.jwt.token.here";
/// `base64("user:pass")`
pub const BASIC: &str = "Basic dXNlcjpwYXNz";

#[derive(Clone, Copy, Default)]
pub struct StubApi {
    /// Return created pets without an `id`.
    pub omit_pet_id: bool,
    /// Hold every response back this long.
    pub delay: Option<Duration>,
}

impl StubApi {
    pub async fn start(self) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(any()).respond_with(self).mount(&server).await;
        server
    }
}

fn json_body(request: &Request) -> Option<Value> {
    serde_json::from_slice(&request.body).ok()
}

fn query(request: &Request, key: &str) -> Option<String> {
    request
        .url
        .query_pairs()
        .find(|(k, _)| *k == key)
        .map(|(_, v)| v.into_owned())
}

fn authorization(request: &Request) -> Option<&str> {
    request
        .headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
}

fn has_string(body: &Value, key: &str) -> bool {
    body.get(key).is_some_and(Value::is_string)
}

fn listing(request: &Request, sorts: &[&str]) -> ResponseTemplate {
    let sort_ok = query(request, "sort").is_none_or(|s| sorts.contains(&s.as_str()));
    let order_ok = query(request, "order").is_none_or(|o| o == "asc" || o == "desc");
    if sort_ok && order_ok {
        ResponseTemplate::new(200).set_body_json(json!([]))
    } else {
        ResponseTemplate::new(422).set_body_json(json!({"error": "invalid query"}))
    }
}

impl StubApi {
    fn pets(&self, request: &Request, id: Option<&str>) -> ResponseTemplate {
        match (request.method.as_str(), id) {
            ("GET", None) => ResponseTemplate::new(200).set_body_json(json!([])),
            ("POST", None) => match json_body(request) {
                Some(body) if has_string(&body, "name") => {
                    let pet = if self.omit_pet_id {
                        json!({"name": body["name"]})
                    } else {
                        json!({"id": 7, "name": body["name"], "tag": body["tag"]})
                    };
                    ResponseTemplate::new(200).set_body_json(pet)
                }
                _ => ResponseTemplate::new(422),
            },
            (method, Some(id)) => match id.parse::<i64>() {
                Err(_) => ResponseTemplate::new(400),
                Ok(999_999) => ResponseTemplate::new(404),
                Ok(id) if method == "GET" => {
                    ResponseTemplate::new(200).set_body_json(json!({"id": id, "name": "Fluffy"}))
                }
                Ok(_) if method == "DELETE" => ResponseTemplate::new(204),
                Ok(_) => ResponseTemplate::new(405),
            },
            _ => ResponseTemplate::new(405),
        }
    }

    fn users(request: &Request, id: Option<&str>) -> ResponseTemplate {
        let creating = request.method.as_str() == "POST" && id.is_none();
        if !creating && authorization(request) != Some(BEARER) {
            return ResponseTemplate::new(401);
        }
        match (request.method.as_str(), id) {
            ("GET", None) => listing(request, &["created_at", "email_address"]),
            ("POST", None) => match json_body(request) {
                Some(body) if has_string(&body, "email_address") && has_string(&body, "password") => {
                    ResponseTemplate::new(201).set_body_json(json!({"id": "b3f1", "email_address": body["email_address"]}))
                }
                _ => ResponseTemplate::new(422),
            },
            ("GET" | "PUT", Some(_)) => ResponseTemplate::new(404),
            ("DELETE", Some(_)) => ResponseTemplate::new(204),
            _ => ResponseTemplate::new(405),
        }
    }

    fn things(request: &Request, id: Option<&str>) -> ResponseTemplate {
        if authorization(request) != Some(BEARER) {
            return ResponseTemplate::new(401);
        }
        match (request.method.as_str(), id) {
            ("GET", None) => listing(request, &["created_at", "name", "colour", "quantity"]),
            ("POST", None) => {
                let valid = json_body(request).is_some_and(|body| {
                    has_string(&body, "name")
                        && has_string(&body, "colour")
                        && body["quantity"]
                            .as_i64()
                            .is_some_and(|q| (1..=1000).contains(&q))
                });
                if valid {
                    ResponseTemplate::new(201).set_body_json(json!({"id": "9a2c"}))
                } else {
                    ResponseTemplate::new(400)
                }
            }
            ("GET", Some(_)) => ResponseTemplate::new(404),
            ("PUT", Some(_)) => ResponseTemplate::new(200).set_body_json(json!({})),
            ("DELETE", Some(_)) => ResponseTemplate::new(204),
            _ => ResponseTemplate::new(405),
        }
    }

    fn token(request: &Request) -> ResponseTemplate {
        if authorization(request) == Some(BASIC) {
            ResponseTemplate::new(200).set_body_json(json!({"token": TOKEN}))
        } else {
            ResponseTemplate::new(401)
        }
    }
}

impl Respond for StubApi {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let segments: Vec<&str> = request.url.path().trim_matches('/').split('/').collect();
        let response = match segments.as_slice() {
            ["pets"] => self.pets(request, None),
            ["pets", id] => self.pets(request, Some(*id)),
            ["users"] => Self::users(request, None),
            ["users", id] => Self::users(request, Some(*id)),
            ["things"] => Self::things(request, None),
            ["things", id] => Self::things(request, Some(*id)),
            ["auth", "token"] => Self::token(request),
            _ => ResponseTemplate::new(404),
        };
        match self.delay {
            Some(delay) => response.set_delay(delay),
            None => response,
        }
    }
}
