//! Navigation over real HTTP: entry point, follows, chains and refresh.

use hapi_client::request::{Follow, MessageBody, Method, Request};
use hapi_client::{CustomRel, RegisteredRel, Resource};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::{client, mount_entry_point, PROFILE};

fn acme(reference: &str) -> CustomRel {
    CustomRel::curie("acme", reference).unwrap()
}

#[tokio::test]
async fn test_entry_point_sent_with_profile() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .and(header("Accept", format!("application/hal+json; profile=\"{PROFILE}\"").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(crate::common::entry_point()))
        .expect(1)
        .mount(&server)
        .await;

    let entry_point = client(&server).entry_point().await.unwrap();

    assert_eq!(entry_point.link(acme("creditor")).unwrap().href(), "/creditors/1");
    assert_eq!(entry_point.links(RegisteredRel::Curies).unwrap().len(), 1);
}

#[tokio::test]
async fn test_entry_point_fetched_once_per_client() {
    let server = MockServer::start().await;
    mount_entry_point(&server, 1).await;
    Mock::given(method("GET"))
        .and(path("/creditors/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "name": "ACME" })))
        .expect(2)
        .mount(&server)
        .await;

    let client = client(&server);
    let first = client.follow(Follow::new(acme("creditor"))).await.unwrap();
    let second = client.clone().follow(Follow::new(acme("creditor"))).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(first.state()["name"], "ACME");
}

#[tokio::test]
async fn test_embedded_relation_makes_no_request() {
    let server = MockServer::start().await;
    mount_entry_point(&server, 1).await;

    let profile = client(&server).follow(Follow::new(acme("profile"))).await.unwrap();

    assert_eq!(profile.state()["name"], "demo creditor");
}

#[tokio::test]
async fn test_follow_templated_link() {
    let server = MockServer::start().await;
    mount_entry_point(&server, 1).await;
    Mock::given(method("GET"))
        .and(path("/orders"))
        .and(query_param("page", "2"))
        .and(query_param("size", "50"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "_links": { "self": { "href": "/orders?page=2&size=50" } },
            "_embedded": { "acme:orders": [{ "reference": "ORD-1" }, { "reference": "ORD-2" }] }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let page = client(&server)
        .follow(
            Follow::new(acme("orders"))
                .with_url_variable("page", 2)
                .with_url_variable("size", 50),
        )
        .await
        .unwrap();

    let references: Vec<_> = page
        .embedded_resources(acme("orders"))
        .unwrap()
        .iter()
        .map(|order| order.state()["reference"].clone())
        .collect();
    assert_eq!(references, [json!("ORD-1"), json!("ORD-2")]);
}

#[tokio::test]
async fn test_follow_with_json_body() {
    let server = MockServer::start().await;
    mount_entry_point(&server, 1).await;
    Mock::given(method("POST"))
        .and(path("/orders"))
        .and(header("Content-Type", "application/json; charset=UTF-8"))
        .and(header("X-Request-Id", "5b1c"))
        .and(body_json(json!({ "reference": "ORD-3" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "reference": "ORD-3", "state": "open" })))
        .expect(1)
        .mount(&server)
        .await;

    let order = client(&server)
        .follow(
            Follow::new(acme("create-order"))
                .with_method(Method::Post)
                .with_header("X-Request-Id", "5b1c")
                .with_body(MessageBody::json(&json!({ "reference": "ORD-3" })).unwrap()),
        )
        .await
        .unwrap();

    assert_eq!(order.state()["state"], "open");
}

#[tokio::test]
async fn test_follow_chain() {
    let server = MockServer::start().await;
    mount_entry_point(&server, 1).await;
    Mock::given(method("GET"))
        .and(path("/creditors/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "_links": { "acme:mandates": { "href": "/creditors/1/mandates" } },
            "_embedded": { "acme:bank-account": { "iban": "DE02120300000000202051" } }
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/creditors/1/mandates"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "count": 3 })))
        .expect(1)
        .mount(&server)
        .await;

    let mandates = client(&server)
        .follow_chain([Follow::new(acme("creditor")), Follow::new(acme("mandates"))])
        .await
        .unwrap();

    assert_eq!(mandates.state()["count"], 3);
}

#[tokio::test]
async fn test_send_explicit_url() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/orders/ORD%2F1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let deleted = client(&server)
        .send(
            Request::new("/orders/{id}")
                .with_method(Method::Delete)
                .with_url_variable("id", "ORD/1"),
        )
        .await
        .unwrap();

    assert_eq!(deleted, Resource::default());
}

#[tokio::test]
async fn test_refresh_follows_self_link() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/orders/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "state": "closed",
            "_links": { "self": { "href": "/orders/1" } }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let stale = Resource::from_value(json!({
        "state": "open",
        "_links": { "self": { "href": format!("{}/orders/1", server.uri()) } }
    }))
    .unwrap();

    let fresh = client(&server).refresh(&stale).await;

    assert_eq!(fresh.state()["state"], "closed");
}

#[tokio::test]
async fn test_refresh_keeps_resource_on_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/orders/1"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let resource = Resource::from_value(json!({
        "state": "open",
        "_links": { "self": { "href": "/orders/1" } }
    }))
    .unwrap();

    assert_eq!(client(&server).refresh(&resource).await, resource);
}
