/// Aggregated view of quiz progress, useful for a progress bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizProgress {
    /// Questions issued so far, including the one on screen.
    pub issued: u32,
    pub total: u32,
    pub remaining: u32,
    pub score: u32,
    pub is_complete: bool,
}
