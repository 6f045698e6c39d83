/// Every user intent the TUI understands, produced by [`crate::input::map_event`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    None,
    Quit,
    Tick,
    Resize(u16, u16),

    // Navigation
    MoveUp,
    MoveDown,
    PageUp,
    PageDown,
    GoTop,
    GoBottom,
    DrillIn,
    NavigateBack,

    // Search box
    StartSearch,
    SearchInput(char),
    SearchConfirm,
    SearchCancel,

    // Selection and export
    ToggleSelect,
    ClearSelection,
    Export,

    Retry,
    ToggleHelp,
}
