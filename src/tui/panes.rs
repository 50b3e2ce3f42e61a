use crossterm::event::KeyCode;

use super::app::{Command, Focus, Pane};
use crate::controllers::{ListEvent, RecipeEvent, current_page};
use crate::models::{ItemId, PageButtons, page_count};
use crate::state::AppState;

fn step_down(selected: usize, len: usize) -> usize {
    if len == 0 { 0 } else { (selected + 1).min(len - 1) }
}

pub(crate) struct SearchInput {
    current_input: String,
}

impl SearchInput {
    pub fn new() -> Self {
        Self {
            current_input: String::new(),
        }
    }
}

impl Pane for SearchInput {
    fn focus(&self) -> Focus {
        Focus::Search
    }

    fn input(&self) -> Option<&str> {
        Some(&self.current_input)
    }

    fn handle_key(
        &mut self,
        key: KeyCode,
        _state: &AppState,
        commands: &mut Vec<Command>,
    ) -> Option<Box<dyn Pane>> {
        match key {
            KeyCode::Char(c) => {
                self.current_input.push(c);
                None
            }
            KeyCode::Backspace => {
                self.current_input.pop();
                None
            }
            KeyCode::Enter => {
                let query = self.current_input.trim().to_string();
                if query.is_empty() {
                    return None;
                }
                commands.push(Command::Search(query));
                Some(Box::new(ResultsPane::new()))
            }
            KeyCode::Esc => Some(Box::new(ResultsPane::new())),
            _ => None,
        }
    }
}

/// Browsing the current results page
pub(crate) struct ResultsPane {
    selected: usize,
}

impl ResultsPane {
    pub fn new() -> Self {
        Self { selected: 0 }
    }
}

impl Pane for ResultsPane {
    fn focus(&self) -> Focus {
        Focus::Results
    }

    fn selected(&self) -> Option<usize> {
        Some(self.selected)
    }

    fn handle_key(
        &mut self,
        key: KeyCode,
        state: &AppState,
        commands: &mut Vec<Command>,
    ) -> Option<Box<dyn Pane>> {
        let visible = current_page(state);
        let total = state.search.as_ref().map_or(0, |s| s.results.len());
        let buttons = PageButtons::for_page(state.view.page, page_count(total, state.view.per_page));

        match key {
            KeyCode::Down | KeyCode::Char('j') => {
                self.selected = step_down(self.selected, visible.len());
                None
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = self.selected.saturating_sub(1);
                None
            }
            KeyCode::Char('n') | KeyCode::Right => {
                if let Some(page) = buttons.next {
                    commands.push(Command::GoToPage(page));
                    self.selected = 0;
                }
                None
            }
            KeyCode::Char('p') | KeyCode::Left => {
                if let Some(page) = buttons.prev {
                    commands.push(Command::GoToPage(page));
                    self.selected = 0;
                }
                None
            }
            KeyCode::Enter => {
                let summary = visible.get(self.selected)?;
                commands.push(Command::OpenRecipe(summary.id.clone()));
                Some(Box::new(RecipePane))
            }
            _ => None,
        }
    }
}

pub(crate) struct RecipePane;

impl Pane for RecipePane {
    fn focus(&self) -> Focus {
        Focus::Recipe
    }

    fn handle_key(
        &mut self,
        key: KeyCode,
        _state: &AppState,
        commands: &mut Vec<Command>,
    ) -> Option<Box<dyn Pane>> {
        let event = match key {
            KeyCode::Char('+') | KeyCode::Char('=') => RecipeEvent::IncreaseServings,
            KeyCode::Char('-') => RecipeEvent::DecreaseServings,
            KeyCode::Char('a') => RecipeEvent::AddToList,
            KeyCode::Char('l') => RecipeEvent::ToggleLike,
            _ => return None,
        };
        commands.push(Command::Recipe(event));
        None
    }
}

pub(crate) struct ListPane {
    selected: usize,
}

impl ListPane {
    pub fn new() -> Self {
        Self { selected: 0 }
    }

    fn selected_id(&self, state: &AppState) -> Option<ItemId> {
        state
            .list
            .as_ref()?
            .get_index(self.selected)
            .map(|item| item.id)
    }
}

impl Pane for ListPane {
    fn focus(&self) -> Focus {
        Focus::List
    }

    fn selected(&self) -> Option<usize> {
        Some(self.selected)
    }

    fn handle_key(
        &mut self,
        key: KeyCode,
        state: &AppState,
        commands: &mut Vec<Command>,
    ) -> Option<Box<dyn Pane>> {
        let len = state.list.as_ref().map_or(0, |list| list.len());

        match key {
            KeyCode::Down | KeyCode::Char('j') => {
                self.selected = step_down(self.selected, len);
                None
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = self.selected.saturating_sub(1);
                None
            }
            KeyCode::Char('d') | KeyCode::Delete => {
                let id = self.selected_id(state)?;
                commands.push(Command::List(ListEvent::Delete(id)));
                // keep the cursor on a real row once this one is gone
                self.selected = self.selected.min(len.saturating_sub(2));
                None
            }
            KeyCode::Char('e') => {
                let id = self.selected_id(state)?;
                Some(Box::new(QuantityEdit::new(id, self.selected)))
            }
            _ => None,
        }
    }
}

/// Typing a new quantity for one shopping item
pub(crate) struct QuantityEdit {
    id: ItemId,
    row: usize,
    current_input: String,
}

impl QuantityEdit {
    pub fn new(id: ItemId, row: usize) -> Self {
        Self {
            id,
            row,
            current_input: String::new(),
        }
    }
}

impl Pane for QuantityEdit {
    fn focus(&self) -> Focus {
        Focus::List
    }

    fn input(&self) -> Option<&str> {
        Some(&self.current_input)
    }

    fn selected(&self) -> Option<usize> {
        Some(self.row)
    }

    fn handle_key(
        &mut self,
        key: KeyCode,
        _state: &AppState,
        commands: &mut Vec<Command>,
    ) -> Option<Box<dyn Pane>> {
        match key {
            KeyCode::Char(c) if c.is_ascii_digit() || c == '.' => {
                self.current_input.push(c);
                None
            }
            KeyCode::Backspace => {
                self.current_input.pop();
                None
            }
            KeyCode::Enter => {
                if let Ok(quantity) = self.current_input.parse::<f64>() {
                    commands.push(Command::List(ListEvent::UpdateCount(self.id, quantity)));
                }
                Some(Box::new(ListPane { selected: self.row }))
            }
            KeyCode::Esc => Some(Box::new(ListPane { selected: self.row })),
            _ => None,
        }
    }
}

pub(crate) struct LikesPane {
    selected: usize,
}

impl LikesPane {
    pub fn new() -> Self {
        Self { selected: 0 }
    }
}

impl Pane for LikesPane {
    fn focus(&self) -> Focus {
        Focus::Likes
    }

    fn selected(&self) -> Option<usize> {
        Some(self.selected)
    }

    fn handle_key(
        &mut self,
        key: KeyCode,
        state: &AppState,
        commands: &mut Vec<Command>,
    ) -> Option<Box<dyn Pane>> {
        match key {
            KeyCode::Down | KeyCode::Char('j') => {
                self.selected = step_down(self.selected, state.likes.count());
                None
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = self.selected.saturating_sub(1);
                None
            }
            KeyCode::Enter => {
                let like = state.likes.get_index(self.selected)?;
                commands.push(Command::OpenRecipe(like.id.clone()));
                Some(Box::new(RecipePane))
            }
            _ => None,
        }
    }
}
