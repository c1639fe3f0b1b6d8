//! End-to-end run against a live server.
//!
//! # Design
//! Starts the server on a random port over a sled temporary database, then
//! drives every endpoint over real HTTP with ureq, building requests and
//! reading responses through `ClientsApi`.

use std::sync::Arc;

use baggage_core::{
    ApiError, ClientDraft, ClientId, ClientRecord, ClientService, ClientsApi, HttpMethod,
    HttpRequest, HttpResponse,
};
use baggage_server::{app, run, SledClientStore};

const EXISTING_ID: &str = "bbbbbbbbbbbbbbbbbbbbbbbb";
const MISSING_ID: &str = "AAAAAAAAAAAAAAAAAAAAAAAA";

/// Execute an `HttpRequest` using ureq and return an `HttpResponse`.
///
/// Disables ureq's automatic status-code-as-error behavior so 4xx/5xx
/// responses are returned as data rather than `Err`.
fn execute(req: HttpRequest) -> HttpResponse {
    let agent = ureq::Agent::config_builder()
        .http_status_as_error(false)
        .build()
        .new_agent();

    // `ClientsApi` always attaches a JSON body to POST and PUT.
    let body = req.body.unwrap_or_default();
    let mut response = match req.method {
        HttpMethod::Get => agent.get(&req.path).call(),
        HttpMethod::Post => agent
            .post(&req.path)
            .content_type("application/json")
            .send(body.as_bytes()),
        HttpMethod::Put => agent
            .put(&req.path)
            .content_type("application/json")
            .send(body.as_bytes()),
    }
    .expect("HTTP transport error");

    let status = response.status().as_u16();
    let body = response.body_mut().read_to_string().unwrap_or_default();

    HttpResponse {
        status,
        headers: Vec::new(),
        body,
    }
}

/// Seed one record and serve on an ephemeral port; returns the base URL.
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
            let store = SledClientStore::temporary().unwrap();
            store
                .insert(&ClientRecord {
                    id: ClientId::from(EXISTING_ID),
                    name: "Erick".to_string(),
                    bags: 3,
                    flight_code: "EA-123".to_string(),
                })
                .await
                .unwrap();

            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            run(listener, app(ClientService::new(Arc::new(store)))).await
        })
        .unwrap();
    });

    format!("http://{addr}")
}

#[test]
fn clients_lifecycle() {
    let api = ClientsApi::new(&start_server());

    // Step 1: list holds the seeded record.
    let clients = api.parse_list_clients(execute(api.build_list_clients())).unwrap();
    assert_eq!(clients.len(), 1);
    assert_eq!(clients[0].id.as_str(), EXISTING_ID);

    // Step 2: get by id.
    let client = api
        .parse_get_client(execute(api.build_get_client(EXISTING_ID)))
        .unwrap();
    assert_eq!(client.bags, 3);
    assert_eq!(client.name, "Erick");
    assert_eq!(client.flight_code, "EA-123");

    // Step 3: unknown id.
    let err = api
        .parse_get_client(execute(api.build_get_client(MISSING_ID)))
        .unwrap_err();
    assert!(matches!(err, ApiError::NotFound(ref m) if m == "Client not found"));

    // Step 4: empty id.
    let err = api.parse_get_client(execute(api.build_get_client(""))).unwrap_err();
    assert!(matches!(err, ApiError::Validation(ref m) if m == "ID field is required"));

    // Step 5: create without data, then with bad bags.
    let req = api.build_create_client(None).unwrap();
    let err = api.parse_create_client(execute(req)).unwrap_err();
    assert_eq!(err.to_string(), "Client data is required");

    let bad = ClientDraft::new("Tester", 6, "EA-232");
    let req = api.build_create_client(Some(&bad)).unwrap();
    let err = api.parse_create_client(execute(req)).unwrap_err();
    assert_eq!(err.to_string(), "Bags should be a number between 1 and 5");

    // Step 6: create succeeds with an assigned id.
    let draft = ClientDraft::new("Tester", 2, "EA-232");
    let req = api.build_create_client(Some(&draft)).unwrap();
    let created = api.parse_create_client(execute(req)).unwrap();
    assert!(!created.id.is_empty());
    assert_eq!(created.bags, 2);
    assert_eq!(created.name, "Tester");
    assert_eq!(created.flight_code, "EA-232");

    // Step 7: update without id.
    let req = api
        .build_update_client(Some(&ClientDraft::new("Erick", 2, "EA-232")))
        .unwrap();
    let err = api.parse_update_client(execute(req)).unwrap_err();
    assert_eq!(err.to_string(), "ID field is required");

    // Step 8: update the seeded record.
    let update = ClientDraft::new("Tester1", 3, "EA-233").with_id(EXISTING_ID);
    let req = api.build_update_client(Some(&update)).unwrap();
    let ack = api.parse_update_client(execute(req)).unwrap();
    assert!(ack.success);

    let updated = api
        .parse_get_client(execute(api.build_get_client(EXISTING_ID)))
        .unwrap();
    assert_eq!(updated.id.as_str(), EXISTING_ID);
    assert_eq!(updated.bags, 3);
    assert_eq!(updated.name, "Tester1");
    assert_eq!(updated.flight_code, "EA-233");

    // Step 9: list holds both records.
    let clients = api.parse_list_clients(execute(api.build_list_clients())).unwrap();
    assert_eq!(clients.len(), 2);
    assert!(clients.iter().any(|c| c.id == created.id));
}
