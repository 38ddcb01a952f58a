use shared::{domain::Question, protocol::ServerEvent};

/// What a newly joined connection needs to match everyone else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub started: bool,
    pub questions: Vec<Question>,
    /// Present only while the competition is running.
    pub current_question: Option<Question>,
}

impl Snapshot {
    /// Connect-time messages in delivery order: status, catalog, then the
    /// current question if any.
    pub fn into_events(self) -> Vec<ServerEvent> {
        let mut events = vec![
            ServerEvent::CompetitionStatus(self.started),
            ServerEvent::QuestionsUpdate(self.questions),
        ];
        if let Some(question) = self.current_question {
            events.push(ServerEvent::QuestionUpdate(question));
        }
        events
    }
}
