//! Full lifecycle test against a live todo server.
//!
//! # Design
//! Starts the server with an in-memory store on a random port, then
//! exercises every client operation over real HTTP using ureq. Validates
//! that the client's request building and response parsing agree with the
//! server's wire format end-to-end.

use todo_client::{ApiError, HttpMethod, HttpRequest, HttpResponse, TodoClient};

/// Execute an `HttpRequest` using ureq and return an `HttpResponse`.
///
/// Disables ureq's automatic status-code-as-error behavior so 4xx/5xx
/// responses are returned as data rather than `Err`, letting the client
/// handle status interpretation.
fn execute(req: HttpRequest) -> HttpResponse {
    let agent = ureq::Agent::config_builder()
        .http_status_as_error(false)
        .build()
        .new_agent();

    let mut response = match (req.method, req.body) {
        (HttpMethod::Get, _) => agent.get(&req.url).call(),
        (HttpMethod::Delete, _) => agent.delete(&req.url).call(),
        (HttpMethod::Post, Some(body)) => {
            agent.post(&req.url).content_type("application/json").send(body.as_bytes())
        }
        (HttpMethod::Post, None) => agent.post(&req.url).send_empty(),
        (HttpMethod::Put, Some(body)) => {
            agent.put(&req.url).content_type("application/json").send(body.as_bytes())
        }
        (HttpMethod::Put, None) => agent.put(&req.url).send_empty(),
    }
    .expect("HTTP transport error");

    let status = response.status().as_u16();
    let body = response.body_mut().read_to_string().unwrap_or_default();

    HttpResponse::new(status, body)
}

fn start_server() -> std::net::SocketAddr {
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
            todo_server::run(listener, todo_server::app()).await
        })
        .unwrap();
    });

    addr
}

#[test]
fn crud_lifecycle() {
    let addr = start_server();
    let client = TodoClient::new(&format!("http://{addr}/api"));

    // list: empty
    let todos = client.parse_list_todos(execute(client.build_list_todos())).unwrap();
    assert!(todos.is_empty(), "expected empty list");

    // create
    let req = client.build_create_todo("Buy milk").unwrap();
    let created = client.parse_create_todo(execute(req)).unwrap();
    assert_eq!(created.title, "Buy milk");
    assert!(!created.completed);
    let id = created.id.clone();

    // blank title is rejected and nothing is stored
    let req = client.build_create_todo("   ").unwrap();
    let err = client.parse_create_todo(execute(req)).unwrap_err();
    assert!(matches!(err, ApiError::BadRequest(_)));

    // toggle on
    let req = client.build_toggle_todo(&id, true).unwrap();
    let updated = client.parse_toggle_todo(execute(req)).unwrap();
    assert_eq!(updated.id, id);
    assert_eq!(updated.title, "Buy milk");
    assert!(updated.completed);

    // toggle on again is a no-op success
    let req = client.build_toggle_todo(&id, true).unwrap();
    let same = client.parse_toggle_todo(execute(req)).unwrap();
    assert_eq!(same, updated);

    // list: the one completed todo
    let todos = client.parse_list_todos(execute(client.build_list_todos())).unwrap();
    assert_eq!(todos, vec![updated]);

    // malformed id
    let err = client
        .parse_delete_todo(execute(client.build_delete_todo("nope")))
        .unwrap_err();
    assert!(matches!(err, ApiError::BadRequest(_)));

    // delete
    client
        .parse_delete_todo(execute(client.build_delete_todo(&id)))
        .unwrap();

    // delete again: NotFound
    let err = client
        .parse_delete_todo(execute(client.build_delete_todo(&id)))
        .unwrap_err();
    assert!(matches!(err, ApiError::NotFound(_)));

    // toggle after delete: NotFound
    let req = client.build_toggle_todo(&id, false).unwrap();
    let err = client.parse_toggle_todo(execute(req)).unwrap_err();
    assert!(matches!(err, ApiError::NotFound(_)));

    // list: empty again
    let todos = client.parse_list_todos(execute(client.build_list_todos())).unwrap();
    assert!(todos.is_empty(), "expected empty list after delete");
}
