//! Integration tests for `HttpOracle` against a one-shot HTTP responder.

use std::time::Duration;

use dotgrid_board::{Board, Line, Square};
use dotgrid_oracle::{HttpOracle, Oracle, OracleError, OutcomeReport};
use dotgrid_protocol::PlayerId;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

// =========================================================================
// Helpers
// =========================================================================

/// Serves exactly one request with `status` and `body`, and hands back the
/// raw request body it received.
async fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("http://{}", listener.local_addr().unwrap());

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let request = read_request(&mut socket).await;
        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.unwrap();
        request
    });

    (url, handle)
}

/// Reads headers plus a `Content-Length` body and returns the request line
/// followed by the body.
async fn read_request(socket: &mut tokio::net::TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    loop {
        let n = socket.read(&mut chunk).await.unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);

        let text = String::from_utf8_lossy(&buf).to_string();
        if let Some(split) = text.find("\r\n\r\n") {
            let headers = &text[..split];
            let length = headers
                .lines()
                .find_map(|l| {
                    let (name, value) = l.split_once(':')?;
                    name.eq_ignore_ascii_case("content-length")
                        .then(|| value.trim().parse::<usize>().ok())
                        .flatten()
                })
                .unwrap_or(0);
            let body = &text[split + 4..];
            if body.len() >= length {
                let request_line = headers.lines().next().unwrap_or_default();
                return format!("{request_line}\n{body}");
            }
        }
    }
    String::from_utf8_lossy(&buf).to_string()
}

fn line(s: &str) -> Line {
    s.parse().unwrap()
}

// =========================================================================
// choose_move
// =========================================================================

#[tokio::test]
async fn test_choose_move_posts_board_and_parses_line() {
    let (url, server) = serve_once(
        "200 OK",
        r#"{"move":{"row1":1,"col1":1,"row2":0,"col2":1}}"#,
    )
    .await;
    let oracle = HttpOracle::new(format!("{url}/")).unwrap();

    let mut board = Board::standard();
    board.add_line(line("0,0-0,1")).unwrap();
    let chosen = oracle
        .choose_move(&board, &PlayerId::automated())
        .await
        .unwrap();

    assert_eq!(chosen, Some(line("0,1-1,1")));

    let request = server.await.unwrap();
    assert!(request.starts_with("POST /api/move "), "got {request}");
    let body: serde_json::Value =
        serde_json::from_str(request.split_once('\n').unwrap().1).unwrap();
    assert_eq!(body["player_id"], "ai-player");
    assert_eq!(body["board"]["lines"]["0,0-0,1"], true);
}

#[tokio::test]
async fn test_choose_move_null_is_none() {
    let (url, _server) = serve_once("200 OK", r#"{"move":null}"#).await;
    let oracle = HttpOracle::new(url).unwrap();

    let chosen = oracle
        .choose_move(&Board::standard(), &PlayerId::automated())
        .await
        .unwrap();

    assert_eq!(chosen, None);
}

#[tokio::test]
async fn test_choose_move_non_adjacent_is_invalid_line() {
    let (url, _server) = serve_once(
        "200 OK",
        r#"{"move":{"row1":0,"col1":0,"row2":2,"col2":2}}"#,
    )
    .await;
    let oracle = HttpOracle::new(url).unwrap();

    let err = oracle
        .choose_move(&Board::standard(), &PlayerId::automated())
        .await
        .unwrap_err();

    assert!(matches!(err, OracleError::InvalidLine(_)));
}

#[tokio::test]
async fn test_choose_move_server_error_is_http_error() {
    let (url, _server) =
        serve_once("500 Internal Server Error", r#"{"error":"boom"}"#).await;
    let oracle = HttpOracle::new(url).unwrap();

    let err = oracle
        .choose_move(&Board::standard(), &PlayerId::automated())
        .await
        .unwrap_err();

    assert!(matches!(err, OracleError::Http(_)));
}

#[tokio::test]
async fn test_unreachable_oracle_is_http_error() {
    // Port 1 is reserved and nothing listens on it.
    let oracle =
        HttpOracle::with_timeout("http://127.0.0.1:1", Some(Duration::from_secs(2))).unwrap();

    let err = oracle
        .choose_move(&Board::standard(), &PlayerId::automated())
        .await
        .unwrap_err();

    assert!(matches!(err, OracleError::Http(_)));
}

// =========================================================================
// report_outcome
// =========================================================================

#[tokio::test]
async fn test_report_outcome_posts_update() {
    let (url, server) = serve_once("200 OK", r#"{"status":"updated"}"#).await;
    let oracle = HttpOracle::new(url).unwrap();

    let mut board = Board::standard();
    for l in ["0,0-0,1", "0,0-1,0", "1,0-1,1", "0,1-1,1"] {
        board.add_line(line(l)).unwrap();
    }
    board.claim(Square::new(0, 0), PlayerId::automated());
    let report = OutcomeReport {
        board,
        completed: vec![Square::new(0, 0)],
        player: PlayerId::automated(),
    };

    oracle.report_outcome(&report).await.unwrap();

    let request = server.await.unwrap();
    assert!(request.starts_with("POST /api/update "), "got {request}");
    let body: serde_json::Value =
        serde_json::from_str(request.split_once('\n').unwrap().1).unwrap();
    assert_eq!(body["completed_squares"], serde_json::json!(["0,0"]));
    assert_eq!(body["board"]["squares"]["0,0"], "ai-player");
    assert_eq!(body["player_id"], "ai-player");
}
