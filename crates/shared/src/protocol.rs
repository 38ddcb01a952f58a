use serde::{Deserialize, Serialize};

use crate::domain::{Direction, Question};

/// Controller intents. None of them carries a payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
pub enum ClientCommand {
    StartCompetition,
    EndCompetition,
    NextQuestion,
    PreviousQuestion,
    ShowAnswer,
}

impl ClientCommand {
    pub fn name(self) -> &'static str {
        match self {
            Self::StartCompetition => "startCompetition",
            Self::EndCompetition => "endCompetition",
            Self::NextQuestion => "nextQuestion",
            Self::PreviousQuestion => "previousQuestion",
            Self::ShowAnswer => "showAnswer",
        }
    }

    pub fn direction(self) -> Option<Direction> {
        match self {
            Self::NextQuestion => Some(Direction::Next),
            Self::PreviousQuestion => Some(Direction::Previous),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
pub enum ServerEvent {
    CompetitionStatus(bool),
    QuestionsUpdate(Vec<Question>),
    QuestionUpdate(Question),
    ShowAnswer,
}

impl ServerEvent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::CompetitionStatus(_) => "competitionStatus",
            Self::QuestionsUpdate(_) => "questionsUpdate",
            Self::QuestionUpdate(_) => "questionUpdate",
            Self::ShowAnswer => "showAnswer",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[cfg(test)]
#[path = "tests/protocol_tests.rs"]
mod tests;
