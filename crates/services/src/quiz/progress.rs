/// Aggregated view of quiz progress, useful for UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizProgress {
    /// 1-based position of the current place; equals `total` once exhausted.
    pub position: usize,
    pub total: usize,
    pub score: u32,
    pub skipped: usize,
}
