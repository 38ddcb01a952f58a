use super::*;
use crate::domain::QuestionId;
use serde_json::json;

fn riddle() -> Question {
    Question {
        id: QuestionId(3),
        text: "I speak without a mouth\nand hear without ears.".into(),
        answer: "Echo".into(),
    }
}

#[test]
fn server_events_use_camel_case_type_tags() {
    let status = serde_json::to_value(ServerEvent::CompetitionStatus(true)).expect("json");
    assert_eq!(status, json!({ "type": "competitionStatus", "payload": true }));

    let question = serde_json::to_value(ServerEvent::QuestionUpdate(riddle())).expect("json");
    assert_eq!(
        question,
        json!({
            "type": "questionUpdate",
            "payload": {
                "id": 3,
                "text": "I speak without a mouth\nand hear without ears.",
                "answer": "Echo",
            },
        })
    );
}

#[test]
fn show_answer_event_has_no_payload() {
    let value = serde_json::to_value(ServerEvent::ShowAnswer).expect("json");
    assert_eq!(value, json!({ "type": "showAnswer" }));
}

#[test]
fn catalog_event_carries_questions_in_order() {
    let mut second = riddle();
    second.id = QuestionId(4);
    let event = ServerEvent::QuestionsUpdate(vec![riddle(), second]);
    let value = serde_json::to_value(&event).expect("json");
    assert_eq!(value["type"], "questionsUpdate");
    assert_eq!(value["payload"][0]["id"], 3);
    assert_eq!(value["payload"][1]["id"], 4);
    assert_eq!(event.name(), "questionsUpdate");
}

#[test]
fn parses_payloadless_client_commands() {
    let cases = [
        ("startCompetition", ClientCommand::StartCompetition),
        ("endCompetition", ClientCommand::EndCompetition),
        ("nextQuestion", ClientCommand::NextQuestion),
        ("previousQuestion", ClientCommand::PreviousQuestion),
        ("showAnswer", ClientCommand::ShowAnswer),
    ];
    for (name, expected) in cases {
        let raw = json!({ "type": name }).to_string();
        let parsed: ClientCommand = serde_json::from_str(&raw).expect("command");
        assert_eq!(parsed, expected);
        assert_eq!(parsed.name(), name);
    }
}

#[test]
fn rejects_unknown_client_command() {
    let raw = json!({ "type": "deleteEverything" }).to_string();
    assert!(serde_json::from_str::<ClientCommand>(&raw).is_err());
}

#[test]
fn only_navigation_commands_have_a_direction() {
    assert_eq!(ClientCommand::NextQuestion.direction(), Some(Direction::Next));
    assert_eq!(
        ClientCommand::PreviousQuestion.direction(),
        Some(Direction::Previous)
    );
    assert_eq!(ClientCommand::ShowAnswer.direction(), None);
}
