use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use server::{startup, ServerState};

fn build_app() -> Router {
    startup::app(ServerState::in_memory(true))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<&str>) -> anyhow::Result<(StatusCode, Vec<u8>)> {
    let mut req = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(b) => {
            req = req.header(header::CONTENT_TYPE, "application/json");
            Body::from(b.to_string())
        }
        None => Body::empty(),
    };
    let res = app.clone().oneshot(req.body(body)?).await?;
    let status = res.status();
    let bytes = to_bytes(res.into_body(), usize::MAX).await?;
    Ok((status, bytes.to_vec()))
}

async fn create_widget(app: &Router) -> anyhow::Result<Value> {
    let (status, body) = send(
        app,
        Method::POST,
        "/products",
        Some(r#"{"name":"Widget","price":9.99,"stock":5,"category":"tools"}"#),
    )
    .await?;
    assert_eq!(status, StatusCode::CREATED);
    Ok(serde_json::from_slice(&body)?)
}

#[tokio::test]
async fn create_returns_201_with_generated_id() -> anyhow::Result<()> {
    let app = build_app();
    let created = create_widget(&app).await?;

    let id = created["id"].as_str().unwrap_or_default();
    assert!(!id.is_empty());
    assert_eq!(created["name"], "Widget");
    assert_eq!(created["description"], "");
    assert_eq!(created["price"], 9.99);
    assert_eq!(created["stock"], 5);
    assert_eq!(created["category"], "tools");
    Ok(())
}

#[tokio::test]
async fn create_ignores_client_supplied_id() -> anyhow::Result<()> {
    let app = build_app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/products",
        Some(r#"{"id":"mine","name":"Bolt","price":0.1,"stock":100,"category":"hardware"}"#),
    )
    .await?;
    assert_eq!(status, StatusCode::CREATED);
    let created: Value = serde_json::from_slice(&body)?;
    assert_ne!(created["id"], "mine");

    let (status, _) = send(&app, Method::GET, "/products/mine", None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn create_with_invalid_json_is_400() -> anyhow::Result<()> {
    let app = build_app();
    let (status, body) = send(&app, Method::POST, "/products", Some("{\"name\": ")).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(String::from_utf8(body)?, "Invalid request body");

    let (_, body) = send(&app, Method::GET, "/products", None).await?;
    assert_eq!(serde_json::from_slice::<Value>(&body)?, json!([]));
    Ok(())
}

#[tokio::test]
async fn create_with_negative_stock_is_400() -> anyhow::Result<()> {
    let app = build_app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/products",
        Some(r#"{"name":"Widget","price":1.0,"stock":-1,"category":"tools"}"#),
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(String::from_utf8(body)?, "stock must not be negative");
    Ok(())
}

#[tokio::test]
async fn permissive_catalog_accepts_negative_values() -> anyhow::Result<()> {
    let app = startup::app(ServerState::in_memory(false));
    let (status, body) = send(
        &app,
        Method::POST,
        "/products",
        Some(r#"{"name":"Refund","price":-5.0,"stock":-1,"category":"misc"}"#),
    )
    .await?;
    assert_eq!(status, StatusCode::CREATED);
    let created: Value = serde_json::from_slice(&body)?;
    assert_eq!(created["price"], -5.0);
    Ok(())
}

#[tokio::test]
async fn list_returns_every_product() -> anyhow::Result<()> {
    let app = build_app();
    let (status, body) = send(&app, Method::GET, "/products", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(serde_json::from_slice::<Value>(&body)?, json!([]));

    let a = create_widget(&app).await?;
    let b = create_widget(&app).await?;

    let (status, body) = send(&app, Method::GET, "/products", None).await?;
    assert_eq!(status, StatusCode::OK);
    let list: Vec<Value> = serde_json::from_slice(&body)?;
    assert_eq!(list.len(), 2);
    assert!(list.contains(&a));
    assert!(list.contains(&b));
    Ok(())
}

#[tokio::test]
async fn get_unknown_id_is_404() -> anyhow::Result<()> {
    let app = build_app();
    let (status, body) = send(&app, Method::GET, "/products/does-not-exist", None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(String::from_utf8(body)?, "Product not found");
    Ok(())
}

#[tokio::test]
async fn get_returns_created_product() -> anyhow::Result<()> {
    let app = build_app();
    let created = create_widget(&app).await?;
    let id = created["id"].as_str().unwrap_or_default();

    let (status, body) = send(&app, Method::GET, &format!("/products/{id}"), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(serde_json::from_slice::<Value>(&body)?, created);
    Ok(())
}

#[tokio::test]
async fn put_replaces_all_fields_and_keeps_id() -> anyhow::Result<()> {
    let app = build_app();
    let created = create_widget(&app).await?;
    let id = created["id"].as_str().unwrap_or_default().to_string();

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/products/{id}"),
        Some(r#"{"id":"other","name":"Gadget","description":"shiny","price":19.5,"stock":2,"category":"toys"}"#),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    let expected = json!({
        "id": id,
        "name": "Gadget",
        "description": "shiny",
        "price": 19.5,
        "stock": 2,
        "category": "toys",
    });
    assert_eq!(serde_json::from_slice::<Value>(&body)?, expected);

    let (_, body) = send(&app, Method::GET, &format!("/products/{id}"), None).await?;
    assert_eq!(serde_json::from_slice::<Value>(&body)?, expected);
    Ok(())
}

#[tokio::test]
async fn put_errors() -> anyhow::Result<()> {
    let app = build_app();

    // unknown id wins over a malformed body
    let (status, body) = send(&app, Method::PUT, "/products/nope", Some("garbage")).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(String::from_utf8(body)?, "Product not found");

    let created = create_widget(&app).await?;
    let id = created["id"].as_str().unwrap_or_default();
    let (status, body) = send(&app, Method::PUT, &format!("/products/{id}"), Some("garbage")).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(String::from_utf8(body)?, "Invalid request body");

    // failed replace leaves the record untouched
    let (_, body) = send(&app, Method::GET, &format!("/products/{id}"), None).await?;
    assert_eq!(serde_json::from_slice::<Value>(&body)?, created);
    Ok(())
}

#[tokio::test]
async fn delete_then_get_is_404() -> anyhow::Result<()> {
    let app = build_app();
    let created = create_widget(&app).await?;
    let uri = format!("/products/{}", created["id"].as_str().unwrap_or_default());

    let (status, body) = send(&app, Method::DELETE, &uri, None).await?;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_empty());

    let (status, body) = send(&app, Method::GET, &uri, None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(String::from_utf8(body)?, "Product not found");

    let (status, _) = send(&app, Method::DELETE, &uri, None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn unsupported_methods_are_405() -> anyhow::Result<()> {
    let app = build_app();
    let created = create_widget(&app).await?;
    let uri = format!("/products/{}", created["id"].as_str().unwrap_or_default());

    let (status, _) = send(&app, Method::PATCH, &uri, Some("{}")).await?;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    let (status, _) = send(&app, Method::DELETE, "/products", None).await?;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    let (status, _) = send(&app, Method::POST, &uri, Some("{}")).await?;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);

    // nothing changed
    let (_, body) = send(&app, Method::GET, &uri, None).await?;
    assert_eq!(serde_json::from_slice::<Value>(&body)?, created);
    Ok(())
}

#[tokio::test]
async fn health_reports_product_count() -> anyhow::Result<()> {
    let app = build_app();
    create_widget(&app).await?;
    let (status, body) = send(&app, Method::GET, "/health", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(serde_json::from_slice::<Value>(&body)?, json!({"status": "ok", "products": 1}));
    Ok(())
}

#[tokio::test]
async fn unknown_path_is_404() -> anyhow::Result<()> {
    let app = build_app();
    let (status, _) = send(&app, Method::GET, "/orders", None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn separate_states_do_not_share_products() -> anyhow::Result<()> {
    let a = build_app();
    let b = build_app();
    create_widget(&a).await?;
    let (_, body) = send(&b, Method::GET, "/products", None).await?;
    assert_eq!(serde_json::from_slice::<Value>(&body)?, json!([]));
    Ok(())
}

#[tokio::test]
async fn empty_id_is_an_unknown_product() -> anyhow::Result<()> {
    let app = build_app();
    create_widget(&app).await?;

    for (method, body) in [
        (Method::GET, None),
        (Method::PUT, Some(r#"{"name":"Ghost"}"#)),
        (Method::DELETE, None),
    ] {
        let (status, text) = send(&app, method.clone(), "/products/", body).await?;
        assert_eq!(status, StatusCode::NOT_FOUND, "{method} /products/");
        assert_eq!(String::from_utf8(text)?, "Product not found", "{method} /products/");
    }

    // nothing was created or removed under the empty id
    let (_, body) = send(&app, Method::GET, "/products", None).await?;
    assert_eq!(serde_json::from_slice::<Vec<Value>>(&body)?.len(), 1);
    Ok(())
}

#[tokio::test]
async fn json_null_body_is_rejected() -> anyhow::Result<()> {
    let app = build_app();
    let (status, body) = send(&app, Method::POST, "/products", Some("null")).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(String::from_utf8(body)?, "Invalid request body");
    Ok(())
}
