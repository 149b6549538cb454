#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshEvent {
    /// The quiet interval for `generation` elapsed with no newer schedule.
    Due { generation: u64 },
}
