//! Full dashboard lifecycle against the live api-server.
//!
//! # Design
//! Starts the server on a random port with an in-memory store, then drives
//! `Dashboard` over real HTTP using ureq. Validates that request building,
//! response parsing and the dashboard flows work end-to-end with the actual
//! server.

use std::sync::Arc;
use std::time::Instant;

use api_server::MemoryStore;
use crud_core::{
    ApiClient, ApiError, Dashboard, HttpMethod, HttpRequest, HttpResponse, Level, ListView, Tab, Transport,
    TransportError,
};

/// Executes requests with ureq, returning 4xx/5xx responses as data so the
/// core decides what a status means.
struct Ureq(ureq::Agent);

impl Ureq {
    fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self(agent)
    }
}

impl Transport for Ureq {
    fn execute(&mut self, req: HttpRequest) -> Result<HttpResponse, TransportError> {
        let result = match (req.method, req.body) {
            (HttpMethod::Get, _) => self.0.get(&req.path).call(),
            (HttpMethod::Delete, _) => self.0.delete(&req.path).call(),
            (HttpMethod::Post, Some(body)) => self
                .0
                .post(&req.path)
                .content_type("application/json")
                .send(body.as_bytes()),
            (HttpMethod::Post, None) => self.0.post(&req.path).send_empty(),
        };
        let mut response = result.map_err(|e| TransportError(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| TransportError(e.to_string()))?;
        Ok(HttpResponse {
            status,
            headers: Vec::new(),
            body,
        })
    }
}

/// Start the server on a random port and return its `/api` base URL.
fn start_server() -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            api_server::run(listener, Arc::new(MemoryStore::new()), std::future::pending()).await
        })
        .unwrap();
    });

    format!("http://{addr}/api")
}

#[test]
fn dashboard_lifecycle() {
    let base = start_server();
    let mut dash = Dashboard::new(ApiClient::new(&base), Ureq::new());
    let now = Instant::now();

    // Step 1: initial load — connected, both lists empty.
    dash.load();
    assert!(dash.status.backend.ok, "backend should be connected");
    assert!(dash.status.database.ok, "database should be connected");
    assert!(matches!(dash.users, ListView::Empty(_)));
    assert!(matches!(dash.products, ListView::Empty(_)));

    // Step 2: a user with only required fields.
    dash.user_form.name = "Ana".to_string();
    dash.user_form.email = "ana@x.com".to_string();
    assert_eq!(dash.submit_user(now), Level::Success);
    let ana = dash.users.items()[0].clone();
    assert_eq!(ana.name, "Ana");
    assert!(ana.age.is_none());
    assert!(ana.city.is_none());

    // Step 3: missing name is rejected with the server's message.
    dash.user_form.email = "nameless@x.com".to_string();
    assert_eq!(dash.submit_user(now), Level::Error);
    assert_eq!(dash.notifications.latest().unwrap().message, "name is required");
    assert_eq!(dash.users.items().len(), 1);

    // Step 4: a product from the products tab; in-stock defaults on.
    dash.show_tab(Tab::Products);
    dash.product_form.name = "Pen".to_string();
    dash.product_form.price = "1.5".to_string();
    assert_eq!(dash.submit_product(now), Level::Success);
    let pen = dash.products.items()[0].clone();
    assert_eq!(pen.price, 1.5);
    assert!(pen.in_stock);

    // Step 5: delete the user after confirming.
    assert_eq!(dash.delete_user(ana.id, |_| true, now), Some(Level::Success));
    assert!(matches!(dash.users, ListView::Empty(_)));

    // Step 6: deleting again reports an error; products are untouched.
    assert_eq!(dash.delete_user(ana.id, |_| true, now), Some(Level::Error));
    assert_eq!(dash.notifications.latest().unwrap().message, "Error deleting user");
    dash.refresh_products();
    assert_eq!(dash.products.items(), &[pen]);
}

#[test]
fn raw_client_round_trips() {
    let base = start_server();
    let client = ApiClient::new(&base);
    let mut transport = Ureq::new();

    let report = client.parse_health(transport.execute(client.build_health()).unwrap()).unwrap();
    assert!(report.is_ok());

    let input = crud_core::NewProduct {
        name: "Mug".to_string(),
        price: 8.0,
        category: Some("Kitchen".to_string()),
        description: None,
        in_stock: false,
    };
    let req = client.build_create_product(&input).unwrap();
    let created = client.parse_create_product(transport.execute(req).unwrap()).unwrap();
    assert_eq!(created.category.as_deref(), Some("Kitchen"));
    assert!(!created.in_stock);

    let listed = client
        .parse_list_products(transport.execute(client.build_list_products()).unwrap())
        .unwrap();
    assert_eq!(listed, vec![created.clone()]);

    let req = client.build_delete_product(created.id);
    client.parse_delete_product(transport.execute(req).unwrap()).unwrap();

    let req = client.build_delete_product(created.id);
    let err = client.parse_delete_product(transport.execute(req).unwrap()).unwrap_err();
    assert!(matches!(err, ApiError::NotFound { .. }));
    assert_eq!(err.server_message(), Some("Product not found"));
}

#[test]
fn unreachable_backend_degrades() {
    // Bind then drop to get a port nothing listens on.
    let addr = std::net::TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap();
    let mut dash = Dashboard::new(ApiClient::new(&format!("http://{addr}/api")), Ureq::new());

    dash.load();
    assert!(!dash.status.backend.ok);
    assert_eq!(dash.status.database.text, "Unknown");
    assert!(matches!(dash.users, ListView::Failed(_)));

    dash.user_form.name = "Ana".to_string();
    dash.user_form.email = "ana@x.com".to_string();
    assert_eq!(dash.submit_user(Instant::now()), Level::Error);
    assert_eq!(
        dash.notifications.latest().unwrap().message,
        "Error adding user. Please try again."
    );
}
