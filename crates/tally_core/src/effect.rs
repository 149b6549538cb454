use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Arm the debounce timer; replaces any refresh still pending.
    ScheduleRefresh { generation: u64, delay: Duration },
    /// Show the rendered summary table in a read-only view.
    ShowSummary { table: String },
}
