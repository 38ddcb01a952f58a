use super::*;

#[test]
fn accepts_websocket_urls() {
    let url = parse_server_url("ws://127.0.0.1:3001/ws").expect("url");
    assert_eq!(url.port(), Some(3001));
    assert!(parse_server_url("wss://quiz.example/ws").is_ok());
}

#[test]
fn rejects_non_websocket_urls() {
    let err = parse_server_url("http://127.0.0.1:3001/ws").expect_err("http");
    assert!(err.to_string().contains("ws://"));
    assert!(parse_server_url("not a url").is_err());
}

async fn serve_once(events: Vec<ServerEvent>) -> Url {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        let (stream, _) = listener.accept().await.expect("accept");
        let mut socket = tokio_tungstenite::accept_async(stream)
            .await
            .expect("handshake");
        for event in events {
            let text = serde_json::to_string(&event).expect("json");
            socket.send(Message::Text(text)).await.expect("send");
        }
        while let Some(Ok(_)) = socket.next().await {}
    });
    parse_server_url(&format!("ws://{addr}/ws")).expect("url")
}

#[tokio::test]
async fn running_snapshot_ends_with_current_question() {
    let question = shared::domain::Question {
        id: shared::domain::QuestionId(4),
        text: "riddle".into(),
        answer: "answer".into(),
    };
    let url = serve_once(vec![
        ServerEvent::CompetitionStatus(true),
        ServerEvent::QuestionsUpdate(vec![question.clone()]),
        ServerEvent::QuestionUpdate(question),
    ])
    .await;

    let mut connection = QuizConnection::connect(&url).await.expect("connect");
    let events = connection.read_snapshot().await.expect("snapshot");
    assert_eq!(events.len(), 3);
    assert!(matches!(events[2], ServerEvent::QuestionUpdate(_)));
}

#[tokio::test]
async fn running_snapshot_without_current_question_is_rejected() {
    let url = serve_once(vec![
        ServerEvent::CompetitionStatus(true),
        ServerEvent::QuestionsUpdate(Vec::new()),
        ServerEvent::ShowAnswer,
    ])
    .await;

    let mut connection = QuizConnection::connect(&url).await.expect("connect");
    let err = connection.read_snapshot().await.expect_err("bad snapshot");
    assert!(err.to_string().contains("expected questionUpdate third"));
}
