use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

struct TestApp {
    router: Router,
    data_dir: tempfile::TempDir,
}

impl TestApp {
    async fn new() -> anyhow::Result<Self> {
        let data_dir = tempfile::tempdir()?;
        let router = server::build_app(&data_dir.path().to_string_lossy()).await?;
        Ok(Self { router, data_dir })
    }

    async fn send(&self, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let body = match body {
            Some(v) => Body::from(v.to_string()),
            None => Body::empty(),
        };
        let req = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(body)
            .expect("request");
        let res = self.router.clone().oneshot(req).await.expect("response");
        let status = res.status();
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.expect("body");
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }

    fn file(&self, name: &str) -> Value {
        let raw = std::fs::read_to_string(self.data_dir.path().join(name)).expect("data file");
        serde_json::from_str(&raw).expect("json file")
    }
}

fn product(name: &str, supplier: &str) -> Value {
    json!({
        "name": name,
        "description": "Kit teclado e mouse sem fio",
        "price": 200.0,
        "stock_quantity": 8,
        "supplier_id": supplier,
        "status": "on"
    })
}

fn campaign(name: &str) -> Value {
    json!({
        "supplier_id": "s001",
        "name": name,
        "start_date": "2025-11-01",
        "end_date": "2025-11-30",
        "discount_percentage": 15
    })
}

#[tokio::test]
async fn create_returns_201_with_fresh_id() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    let (status, first) = app.send("POST", "/products", Some(product("Teclado", "s001"))).await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, second) = app.send("POST", "/products", Some(product("Monitor", "s001"))).await;
    assert_eq!(status, StatusCode::CREATED);

    let id1 = first["id"].as_str().unwrap();
    let id2 = second["id"].as_str().unwrap();
    assert_eq!(id1.len(), 40);
    assert_ne!(id1, id2);

    let (status, list) = app.send("GET", "/products", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 2);
    assert_eq!(app.file("products.json").as_array().unwrap().len(), 2);
    Ok(())
}

#[tokio::test]
async fn missing_required_field_is_400_and_not_stored() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    let mut body = product("Teclado", "s001");
    body.as_object_mut().unwrap().remove("price");
    let (status, err) = app.send("POST", "/products", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(err["error"].is_string());

    let (status, err) = app.send("POST", "/products", Some(product("  ", "s001"))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(err["error"], "name is required");

    assert!(app.file("products.json").as_array().unwrap().is_empty());
    Ok(())
}

#[tokio::test]
async fn malformed_json_is_400() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    let req = Request::builder()
        .method("POST")
        .uri("/stores")
        .header("content-type", "application/json")
        .body(Body::from("{\"store_name\": "))?;
    let res = app.router.clone().oneshot(req).await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn unknown_id_is_404() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    for collection in ["users", "products", "orders", "stores", "suppliers", "campaigns"] {
        let (status, err) = app.send("GET", &format!("/{collection}/does-not-exist"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{collection}");
        assert!(err["error"].as_str().unwrap().contains("not found"));
    }
    Ok(())
}

#[tokio::test]
async fn update_keeps_original_id() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    let (_, created) = app.send("POST", "/products", Some(product("Teclado", "s001"))).await;
    let id = created["id"].as_str().unwrap().to_string();

    let (status, updated) = app
        .send("PUT", &format!("/products/{id}"), Some(json!({"id": "hijack", "price": 180.5})))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["id"], id.as_str());
    assert_eq!(updated["price"], 180.5);
    assert_eq!(updated["name"], "Teclado");

    let (status, _) = app.send("GET", "/products/hijack", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, fetched) = app.send("GET", &format!("/products/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["price"], 180.5);
    Ok(())
}

#[tokio::test]
async fn update_that_breaks_validation_is_rejected() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    let (_, created) = app.send("POST", "/products", Some(product("Teclado", "s001"))).await;
    let id = created["id"].as_str().unwrap();
    let (status, _) = app
        .send("PUT", &format!("/products/{id}"), Some(json!({"stock_quantity": -3})))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(app.file("products.json")[0]["stock_quantity"], 8);

    let (status, _) = app.send("PUT", "/products/nope", Some(json!({"price": 1.0}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn delete_removes_exactly_one() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    let (_, a) = app.send("POST", "/products", Some(product("Teclado", "s001"))).await;
    app.send("POST", "/products", Some(product("Monitor", "s001"))).await;
    let id = a["id"].as_str().unwrap();

    let (status, body) = app.send("DELETE", &format!("/products/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "product deleted");
    assert_eq!(body["id"], id);
    let stored = app.file("products.json");
    assert_eq!(stored.as_array().unwrap().len(), 1);
    assert_eq!(stored[0]["name"], "Monitor");

    let before = app.file("products.json");
    let (status, _) = app.send("DELETE", &format!("/products/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(app.file("products.json"), before);
    Ok(())
}

#[tokio::test]
async fn duplicate_supplier_and_name_is_409() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    let (status, _) = app.send("POST", "/products", Some(product("Teclado", "s001"))).await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, err) = app.send("POST", "/products", Some(product("teclado", "s001"))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(err["error"].as_str().unwrap().contains("supplier_id and name"));

    let (status, _) = app.send("POST", "/campaigns", Some(campaign("Black Friday"))).await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, _) = app.send("POST", "/campaigns", Some(campaign("Black Friday"))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(app.file("campaign.json").as_array().unwrap().len(), 1);
    Ok(())
}

#[tokio::test]
async fn campaign_with_inverted_dates_is_400() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    let mut body = campaign("Natal");
    body["end_date"] = json!("2025-10-01");
    let (status, err) = app.send("POST", "/campaigns", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(err["error"].as_str().unwrap().contains("end_date"));
    Ok(())
}

#[tokio::test]
async fn user_password_never_leaves_the_server() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    let body = json!({"name": "Bandit", "email": "bandit@heeler.com", "pwd": "S3curePass!", "role": "admin"});
    let (status, created) = app.send("POST", "/users", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(created.get("pwd").is_none());
    assert_eq!(created["role"], "admin");
    assert_eq!(created["status"], "on");

    let stored = app.file("users.json");
    let hash = stored[0]["pwd"].as_str().unwrap();
    assert!(hash.starts_with("$argon2"));

    let (_, listed) = app.send("GET", "/users", None).await;
    assert!(listed[0].get("pwd").is_none());

    let dup = json!({"name": "Other", "email": "BANDIT@heeler.com", "pwd": "x"});
    let (status, _) = app.send("POST", "/users", Some(dup)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    Ok(())
}

#[tokio::test]
async fn stores_and_suppliers_validate_formats() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    let store = json!({
        "store_name": "Bingo Heeler",
        "cnpj": "12.345.678/0001-90",
        "address": "Rua Exemplo, 123",
        "phone_number": "48 9696 5858",
        "contact_email": "down@bingo.com"
    });
    let (status, _) = app.send("POST", "/stores", Some(store.clone())).await;
    assert_eq!(status, StatusCode::CREATED);

    let mut other = store.clone();
    other["store_name"] = json!("Outra Loja");
    other["cnpj"] = json!("12345678000190");
    let (status, _) = app.send("POST", "/stores", Some(other)).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let mut bad = store;
    bad["store_name"] = json!("Loja Nova");
    bad["cnpj"] = json!("123");
    let (status, _) = app.send("POST", "/stores", Some(bad)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let supplier = json!({
        "supplier_name": "Judite Heeler",
        "supplier_category": "Informatica, Seguranca",
        "contact_email": "not-an-email",
        "phone_number": "48 9696 5858"
    });
    let (status, err) = app.send("POST", "/suppliers", Some(supplier)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(err["error"].as_str().unwrap().contains("contact_email"));
    Ok(())
}

#[tokio::test]
async fn orders_accept_legacy_item_field() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    let order = json!({
        "store_id": "st001",
        "item": [
            {"product_id": "p001", "quantity": 2, "campaign_id": "c001", "unit_price": 200.0},
            {"product_id": "p002", "quantity": 1, "campaign_id": null, "unit_price": 850.0}
        ],
        "status": "Pending",
        "date": "2025-09-28 10:30:00"
    });
    let (status, created) = app.send("POST", "/orders", Some(order)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["total_amount"], 1250.0);
    assert_eq!(created["items"].as_array().unwrap().len(), 2);

    let id = created["id"].as_str().unwrap();
    let (status, updated) = app
        .send("PUT", &format!("/orders/{id}"), Some(json!({"status": "Shipped"})))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["status"], "Shipped");
    assert_eq!(updated["total_amount"], 1250.0);
    Ok(())
}

#[tokio::test]
async fn list_supports_pagination() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    for i in 0..5 {
        app.send("POST", "/products", Some(product(&format!("P{i}"), "s001"))).await;
    }
    let (status, page) = app.send("GET", "/products?page=2&per_page=2", None).await;
    assert_eq!(status, StatusCode::OK);
    let page = page.as_array().unwrap();
    assert_eq!(page.len(), 2);
    assert_eq!(page[0]["name"], "P2");

    let (status, _) = app.send("GET", "/products?page=abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn health_metrics_and_docs() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    let (status, body) = app.send("GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    app.send("POST", "/products", Some(product("Teclado", "s001"))).await;
    let req = Request::builder().uri("/metrics").body(Body::empty())?;
    let res = app.router.clone().oneshot(req).await?;
    assert_eq!(res.status(), StatusCode::OK);
    let text = axum::body::to_bytes(res.into_body(), usize::MAX).await?;
    assert!(String::from_utf8_lossy(&text).contains("central_store_mutations_total"));

    let (status, doc) = app.send("GET", "/api-docs/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(doc["paths"]["/campaigns/{id}"].is_object());
    Ok(())
}

#[tokio::test]
async fn composite_keys_do_not_collide_across_separators() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    let (status, _) = app.send("POST", "/products", Some(product("c", "a|b"))).await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, _) = app.send("POST", "/products", Some(product("b|c", "a"))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(app.file("products.json").as_array().unwrap().len(), 2);
    Ok(())
}

#[tokio::test]
async fn unknown_routes_and_methods_answer_with_json() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    let (status, err) = app.send("GET", "/nope", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(err["error"], "route not found");

    let (status, err) = app.send("GET", "/products/a/b", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(err["error"].is_string());

    let req = Request::builder().method("PATCH").uri("/products").body(Body::empty())?;
    let res = app.router.clone().oneshot(req).await?;
    assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert!(res.headers().contains_key("allow"));
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await?;
    let err: Value = serde_json::from_slice(&bytes)?;
    assert_eq!(err["error"], "method not allowed");
    Ok(())
}
