// Keyboard focus across the search box and the visible tab rows.
// Arrow keys move a single focus position; rows are counted in display order
// across every window section.

/// Where keyboard focus currently sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    SearchBox,
    Row(usize),
}

/// Keys the focus ring reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    Up,
    Down,
    Enter,
}

/// Trait defining the focus manager interface.
pub trait FocusManagerTrait {
    fn handle_key(&mut self, key: NavKey) -> Option<usize>;
    fn set_row_count(&mut self, rows: usize);
    fn focus(&self) -> Focus;
    fn reset(&mut self);
}

/// Roving focus over `row_count` rows plus the search box above them.
#[derive(Debug)]
pub struct FocusManager {
    focus: Focus,
    row_count: usize,
    wrap: bool,
}

impl FocusManager {
    pub fn new(row_count: usize, wrap: bool) -> Self {
        Self {
            focus: Focus::SearchBox,
            row_count,
            wrap,
        }
    }

    fn move_down(&mut self) {
        if self.row_count == 0 {
            self.focus = Focus::SearchBox;
            return;
        }
        self.focus = match self.focus {
            Focus::SearchBox => Focus::Row(0),
            Focus::Row(i) if i + 1 < self.row_count => Focus::Row(i + 1),
            Focus::Row(i) => {
                if self.wrap {
                    Focus::Row(0)
                } else {
                    Focus::Row(i)
                }
            }
        };
    }

    fn move_up(&mut self) {
        if self.row_count == 0 {
            self.focus = Focus::SearchBox;
            return;
        }
        self.focus = match self.focus {
            Focus::SearchBox => Focus::Row(self.row_count - 1),
            Focus::Row(0) => Focus::SearchBox,
            Focus::Row(i) => Focus::Row(i - 1),
        };
    }
}

impl Default for FocusManager {
    fn default() -> Self {
        Self::new(0, true)
    }
}

impl FocusManagerTrait for FocusManager {
    /// Applies a key press. `Enter` on a row returns that row's index.
    fn handle_key(&mut self, key: NavKey) -> Option<usize> {
        match key {
            NavKey::Down => self.move_down(),
            NavKey::Up => self.move_up(),
            NavKey::Enter => {
                if let Focus::Row(i) = self.focus {
                    return Some(i);
                }
            }
        }
        None
    }

    /// Updates the number of visible rows, pulling focus back inside the list.
    fn set_row_count(&mut self, rows: usize) {
        self.row_count = rows;
        if let Focus::Row(i) = self.focus {
            self.focus = if rows == 0 {
                Focus::SearchBox
            } else {
                Focus::Row(i.min(rows - 1))
            };
        }
    }

    fn focus(&self) -> Focus {
        self.focus
    }

    fn reset(&mut self) {
        self.focus = Focus::SearchBox;
    }
}
