/// Color group for a task status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusTag {
    InProgress,
    Review,
    Blocked,
    Backlog,
    Default,
}

const KEYWORDS: &[(&[&str], StatusTag)] = &[
    (&["progress", "doing"], StatusTag::InProgress),
    (&["review", "waiting"], StatusTag::Review),
    (&["blocked", "hold"], StatusTag::Blocked),
    (&["todo", "backlog"], StatusTag::Backlog),
];

impl StatusTag {
    /// Case-insensitive keyword match. Groups are tried in order and the
    /// first hit wins.
    pub fn classify(status: &str) -> Self {
        let status = status.to_lowercase();
        KEYWORDS
            .iter()
            .find(|(words, _)| words.iter().any(|w| status.contains(w)))
            .map(|(_, tag)| *tag)
            .unwrap_or(StatusTag::Default)
    }
}
