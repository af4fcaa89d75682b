//! `RestClient` against a canned local HTTP server.

use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use rehearsal_client::{
    BookingQuery, ClientConfig, ClientError, ReservationSubmitter, RestClient, RoomCatalog, Session,
    UserDirectory,
};
use rehearsal_engine::{parse_time, validate_booking_request, BookingPolicy, BookingRequest, RoomId};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

// ── Canned backend ──────────────────────────────────────────────────────────

struct Backend {
    client: RestClient,
    /// Raw requests in arrival order.
    requests: Arc<Mutex<Vec<String>>>,
}

impl Backend {
    fn request(&self, n: usize) -> String {
        self.requests.lock().unwrap()[n].clone()
    }
}

/// Serve one connection per canned `(status, body)` and record each request.
async fn backend(responses: Vec<(u16, &'static str)>) -> Backend {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let requests = Arc::new(Mutex::new(Vec::new()));
    let seen = Arc::clone(&requests);

    tokio::spawn(async move {
        for (status, body) in responses {
            let (mut socket, _) = listener.accept().await.unwrap();
            let request = read_request(&mut socket).await;
            seen.lock().unwrap().push(request);
            let response = format!(
                "HTTP/1.1 {status} {}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                reason(status),
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
        }
    });

    let config = ClientConfig::new(format!("http://{addr}")).unwrap();
    Backend {
        client: RestClient::new(&config).unwrap(),
        requests,
    }
}

fn reason(status: u16) -> &'static str {
    match status {
        200 | 201 => "OK",
        400 => "Bad Request",
        401 => "Unauthorized",
        503 => "Service Unavailable",
        _ => "Status",
    }
}

/// Read headers plus a `content-length` body.
async fn read_request(socket: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 2048];
    loop {
        let n = socket.read(&mut chunk).await.unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(head_end) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            let head = String::from_utf8_lossy(&buf[..head_end]).to_lowercase();
            let body_len = head
                .lines()
                .find_map(|line| line.strip_prefix("content-length:"))
                .and_then(|v| v.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if buf.len() >= head_end + 4 + body_len {
                break;
            }
        }
    }
    String::from_utf8_lossy(&buf).into_owned()
}

fn session() -> Session {
    Session::new("tok-123")
}

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 16).unwrap()
}

// ── Reads ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn list_rooms_sends_bearer_token() {
    let backend = backend(vec![(200, r#"[{"_id":"a","nome":"Sala A"},{"_id":"b","nome":"Palco"}]"#)]).await;

    let rooms = backend.client.list_rooms(&session()).await.unwrap();

    assert_eq!(rooms.len(), 2);
    assert_eq!(rooms[0].id, RoomId::new("a"));
    assert_eq!(rooms[1].name, "Palco");
    let request = backend.request(0);
    assert!(request.starts_with("GET /api/local/listarLocais "));
    assert!(request.to_lowercase().contains("authorization: bearer tok-123"));
}

#[tokio::test]
async fn reservations_query_by_date_and_skip_malformed_rows() {
    let body = r#"[
        {"_id":"e1","pecaRelacionada":"Hamlet","data":"2026-03-16T00:00:00.000Z",
         "horarioInicio":"14:00","horarioFim":"15:00","local":{"_id":"a","nome":"Sala A"},
         "participantes":["u1",{"_id":"u2"}]},
        {"_id":"e2","pecaRelacionada":"Macbeth","data":"2026-03-16",
         "horarioInicio":"16:00","horarioFim":"15:00","local":"a"},
        {"_id":"e3","pecaRelacionada":"Otelo","horarioInicio":"noite","horarioFim":"22:00","local":"b"}
    ]"#;
    let backend = backend(vec![(200, body)]).await;

    let reservations = backend.client.list_reservations(&session(), day()).await.unwrap();

    assert_eq!(reservations.len(), 1);
    assert_eq!(reservations[0].label, "Hamlet");
    assert_eq!(reservations[0].room_id, RoomId::new("a"));
    assert_eq!(reservations[0].participants.len(), 2);
    assert!(backend
        .request(0)
        .starts_with("GET /api/ensaio/listarEnsaios?data=2026-03-16 "));
}

#[tokio::test]
async fn user_search_passes_name() {
    let backend = backend(vec![(200, r#"[{"_id":"u1","nome":"Ana Souza"}]"#)]).await;

    let users = backend.client.search_users(&session(), "Ana").await.unwrap();

    assert_eq!(users[0].name, "Ana Souza");
    assert!(backend
        .request(0)
        .starts_with("GET /api/usuario/listarUsuarios?nome=Ana "));
}

// ── Writes ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_reservation_posts_backend_fields() {
    let backend = backend(vec![(201, r#"{"mensagem":"ok"}"#)]).await;
    let request = BookingRequest {
        label: "Leitura".to_string(),
        room_id: Some(RoomId::new("a")),
        date: Some(day()),
        start: Some(parse_time("10:00").unwrap()),
        ..Default::default()
    };
    let booking = validate_booking_request(&request, &BookingPolicy::quick()).unwrap();

    backend.client.create_reservation(&session(), &booking).await.unwrap();

    let sent = backend.request(0);
    assert!(sent.starts_with("POST /api/ensaio/criarEnsaio "));
    assert!(sent.contains(r#""pecaRelacionada":"Leitura""#));
    assert!(sent.contains(r#""horarioInicio":"10:00""#));
    assert!(sent.contains(r#""horarioFim":"11:00""#));
    assert!(sent.contains(r#""data":"2026-03-16""#));
}

// ── Status mapping ──────────────────────────────────────────────────────────

#[tokio::test]
async fn unauthorized_status_maps_to_unauthorized() {
    let backend = backend(vec![(401, r#"{"erro":"Token inválido"}"#)]).await;

    let err = backend.client.list_rooms(&session()).await.unwrap_err();

    assert!(matches!(err, ClientError::Unauthorized));
}

#[tokio::test]
async fn backend_error_message_is_surfaced() {
    let backend = backend(vec![(400, r#"{"erro":"Local já cadastrado"}"#)]).await;

    let err = backend.client.create_room(&session(), "Sala A").await.unwrap_err();

    match err {
        ClientError::Api { status, message } => {
            assert_eq!(status, 400);
            assert_eq!(message, "Local já cadastrado");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
    assert!(backend.request(0).contains(r#"{"nome":"Sala A"}"#));
}

#[tokio::test]
async fn error_without_body_uses_status_reason() {
    let backend = backend(vec![(503, "")]).await;

    let err = backend.client.list_reservations(&session(), day()).await.unwrap_err();

    match err {
        ClientError::Api { status, message } => {
            assert_eq!(status, 503);
            assert_eq!(message, "Service Unavailable");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}
