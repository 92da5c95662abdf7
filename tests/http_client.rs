//! End-to-end tests: `HttpStorefront` and `CartSession` against a live server
//! bound to an ephemeral port.

use jewellery_mart::cart::{reconcile_after_fetch, AddToCart, AppState, CartRecord};
use jewellery_mart::catalog::{Product, ProductQuery};
use jewellery_mart::client::{HttpStorefront, ProductLookup, StorefrontApi};
use jewellery_mart::config::AppConfig;
use jewellery_mart::router::create_app_router;
use jewellery_mart::session::CartSession;
use jewellery_mart::{ErrorKind, StorefrontError};
use serde_json::json;
use std::sync::Arc;

const USER: &str = "shopper@example.com";

/// Client configured the way a deployment would be, via `STOREFRONT_API_URL`.
fn client_for(base_url: String) -> HttpStorefront {
    let config =
        AppConfig::from_lookup(|key| (key == "STOREFRONT_API_URL").then(|| base_url.clone()))
            .unwrap();
    HttpStorefront::from_config(&config).unwrap()
}

/// Starts the service on 127.0.0.1:0 and returns the state and a client.
async fn spawn_server() -> (Arc<AppState>, HttpStorefront) {
    let state = Arc::new(AppState::new());
    for (id, price) in [("A", 100.0), ("B", 30.0), ("C", 20.0)] {
        let product: Product = serde_json::from_value(json!({
            "id": id, "name": format!("Piece {id}"), "category": "rings",
            "metalType": "gold", "price": price
        }))
        .unwrap();
        state.catalog.insert(product).unwrap();
    }

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = create_app_router(state.clone());
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (state, client_for(format!("http://{addr}")))
}

#[tokio::test]
async fn test_client_reads_catalog() {
    let (_, client) = spawn_server().await;

    let product = client.product("B").await.unwrap();
    assert_eq!(product.price, 30.0);

    let err = client.product("missing").await.unwrap_err();
    assert!(matches!(err, StorefrontError::ProductNotFound(_)));

    let query = ProductQuery {
        sort: Some("priceHighToLow".into()),
        limit: Some(2),
        ..ProductQuery::default()
    };
    let listed = client.products(&query).await.unwrap();
    let ids: Vec<_> = listed.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["A", "B"]);
}

#[tokio::test]
async fn test_reconcile_over_http_drops_deleted_product() {
    let (state, client) = spawn_server().await;
    for (id, quantity, grams, price) in [
        ("A", 2, 5.0, 500.0),
        ("B", 1, 10.0, 300.0),
        ("C", 1, 1.0, 20.0),
    ] {
        client
            .add_to_cart(&AddToCart {
                user_id: USER.into(),
                product_id: id.into(),
                quantity: Some(quantity),
                grams: Some(grams),
                final_price: Some(price),
            })
            .await
            .unwrap();
    }

    // C leaves the catalog but stays in the stored cart
    state.catalog.delete("C").unwrap();

    let record: CartRecord = client.cart(USER).await.unwrap();
    assert_eq!(record.len(), 3);

    let lines = reconcile_after_fetch(&record, &client).await;
    assert_eq!(lines.len(), 2);
    let total: f64 = lines.iter().map(|l| l.item_total()).sum();
    assert_eq!(total, 1300.0);
}

#[tokio::test]
async fn test_rejected_input_is_a_validation_failure() {
    let (state, client) = spawn_server().await;
    client
        .add_to_cart(&AddToCart {
            user_id: USER.into(),
            product_id: "A".into(),
            quantity: None,
            grams: None,
            final_price: None,
        })
        .await
        .unwrap();

    let err = client.update_quantity(USER, "A", 0).await.unwrap_err();
    assert!(matches!(err, StorefrontError::InvalidQuantity(0)));
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert_eq!(err.user_message(), "Quantity must be at least 1.");

    let err = client
        .add_to_cart(&AddToCart {
            user_id: USER.into(),
            product_id: "A".into(),
            quantity: None,
            grams: Some(-2.0),
            final_price: None,
        })
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert!(matches!(&err, StorefrontError::InvalidInput(m) if m.contains("Grams")));

    assert_eq!(state.cart_record(USER).quantities, vec![Some(1)]);
}

#[tokio::test]
async fn test_session_over_http() {
    let (state, client) = spawn_server().await;
    let api: Arc<dyn StorefrontApi> = Arc::new(client);

    let mut session = CartSession::login(api.clone(), USER).unwrap();
    assert!(session.load().await.unwrap().is_empty());

    let a = api.product("A").await.unwrap();
    let b = api.product("B").await.unwrap();
    session.add(&a, Some(5.0)).await.unwrap();
    session.add(&a, Some(5.0)).await.unwrap();
    session.add(&b, Some(10.0)).await.unwrap();
    assert_eq!(session.total(), 1300.0);

    let err = session.change_quantity("A", 0).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert_eq!(session.total(), 1300.0);

    session.change_quantity("A", 3).await.unwrap();
    assert_eq!(session.total(), 1800.0);

    session.remove("B").await.unwrap();
    assert_eq!(session.total(), 1500.0);

    assert_eq!(state.cart_record(USER).quantities, vec![Some(3)]);

    // A fresh session sees the same cart
    let user = session.logout();
    let mut again = CartSession::login(api, user).unwrap();
    again.load().await.unwrap();
    assert_eq!(again.total(), 1500.0);
}

#[tokio::test]
async fn test_unreachable_backend_is_a_transport_failure() {
    // Bind then drop to get a port with nothing listening
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let api: Arc<dyn StorefrontApi> = Arc::new(client_for(format!("http://{addr}")));
    let mut session = CartSession::login(api, USER).unwrap();

    let err = session.load().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Transport);
    assert!(session.lines().is_empty());
}
