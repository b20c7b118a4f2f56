use crate::source::unique_categories;
use crate::view_model::{EntryView, SourceBadge, PLACEHOLDER_TEXT};

pub type EntryId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Bot,
}

impl Sender {
    /// Avatar icon identifier.
    pub fn avatar(self) -> &'static str {
        match self {
            Sender::User => "fa-user",
            Sender::Bot => "fa-robot",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Sender::User => "you",
            Sender::Bot => "bot",
        }
    }
}

/// A finalized transcript message. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub text: String,
    pub sender: Sender,
    pub sources: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum EntryKind {
    Message(Message),
    Placeholder,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Entry {
    id: EntryId,
    kind: EntryKind,
}

/// Append-only conversation log. Only placeholders are ever removed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Transcript {
    entries: Vec<Entry>,
    next_id: EntryId,
    latest: Option<EntryId>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a message and moves the scroll marker to it.
    ///
    /// `sources` only produce badges for bot messages.
    pub fn render(
        &mut self,
        text: impl Into<String>,
        sender: Sender,
        sources: Vec<String>,
    ) -> EntryId {
        let sources = match sender {
            Sender::Bot => sources,
            Sender::User => Vec::new(),
        };
        self.push(EntryKind::Message(Message {
            text: text.into(),
            sender,
            sources,
        }))
    }

    /// Appends a "Thinking..." entry for a pending request.
    pub fn push_placeholder(&mut self) -> EntryId {
        self.push(EntryKind::Placeholder)
    }

    /// Removes a placeholder entry. Returns false when the id is unknown or
    /// refers to a finalized message.
    pub fn remove(&mut self, id: EntryId) -> bool {
        let Some(index) = self
            .entries
            .iter()
            .position(|entry| entry.id == id && entry.kind == EntryKind::Placeholder)
        else {
            return false;
        };
        self.entries.remove(index);
        if self.latest == Some(id) {
            self.latest = self.entries.last().map(|entry| entry.id);
        }
        true
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The entry the view should be scrolled to.
    pub fn latest(&self) -> Option<EntryId> {
        self.latest
    }

    pub fn messages(&self) -> impl Iterator<Item = &Message> {
        self.entries.iter().filter_map(|entry| match &entry.kind {
            EntryKind::Message(message) => Some(message),
            EntryKind::Placeholder => None,
        })
    }

    pub fn view(&self) -> Vec<EntryView> {
        self.entries.iter().map(entry_view).collect()
    }

    fn push(&mut self, kind: EntryKind) -> EntryId {
        self.next_id += 1;
        let id = self.next_id;
        self.entries.push(Entry { id, kind });
        self.latest = Some(id);
        id
    }
}

fn entry_view(entry: &Entry) -> EntryView {
    match &entry.kind {
        EntryKind::Message(message) => EntryView {
            id: entry.id,
            sender: message.sender,
            lines: split_lines(&message.text),
            badges: unique_categories(&message.sources)
                .into_iter()
                .map(SourceBadge::from)
                .collect(),
            placeholder: false,
        },
        EntryKind::Placeholder => EntryView {
            id: entry.id,
            sender: Sender::Bot,
            lines: vec![PLACEHOLDER_TEXT.to_string()],
            badges: Vec::new(),
            placeholder: true,
        },
    }
}

fn split_lines(text: &str) -> Vec<String> {
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line).to_owned())
        .collect()
}
