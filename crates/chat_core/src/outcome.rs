/// A reply from the agent endpoint, already stripped of transport details.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AgentReply {
    pub reply: String,
    /// Raw source tags, in the order the backend listed them.
    pub sources: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryOutcome {
    Answered(AgentReply),
    /// Network failure or an unreadable response. Details are logged by the
    /// engine; the transcript only shows a fixed message.
    RequestFailed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    Accepted,
    /// Backend answered with an `error` field.
    Rejected { error: String },
    RequestFailed,
}
