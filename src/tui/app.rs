use crossterm::event::KeyCode;
use ratatui::Frame;

use super::panes::{LikesPane, ListPane, RecipePane, ResultsPane, SearchInput};
use super::views::{self, Cursor};
use crate::controllers::{ListEvent, RecipeEvent};
use crate::state::AppState;

pub enum AppAction {
    Continue,
    Quit,
}

/// Something a key press asks the application to do
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Search(String),
    GoToPage(usize),
    OpenRecipe(String),
    Recipe(RecipeEvent),
    List(ListEvent),
    DismissNotice,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Search,
    Results,
    Recipe,
    List,
    Likes,
}

impl Focus {
    fn next(self) -> Self {
        match self {
            Focus::Search | Focus::Likes => Focus::Results,
            Focus::Results => Focus::Recipe,
            Focus::Recipe => Focus::List,
            Focus::List => Focus::Likes,
        }
    }
}

pub(crate) trait Pane {
    fn focus(&self) -> Focus;

    /// Text being typed, for panes that take free input
    fn input(&self) -> Option<&str> {
        None
    }

    fn selected(&self) -> Option<usize> {
        None
    }

    fn handle_key(
        &mut self,
        key: KeyCode,
        state: &AppState,
        commands: &mut Vec<Command>,
    ) -> Option<Box<dyn Pane>>;
}

pub(crate) fn pane_for(focus: Focus) -> Box<dyn Pane> {
    match focus {
        Focus::Search => Box::new(SearchInput::new()),
        Focus::Results => Box::new(ResultsPane::new()),
        Focus::Recipe => Box::new(RecipePane),
        Focus::List => Box::new(ListPane::new()),
        Focus::Likes => Box::new(LikesPane::new()),
    }
}

pub struct ForkfulApp {
    pane: Box<dyn Pane>,
}

impl Default for ForkfulApp {
    fn default() -> Self {
        Self::new()
    }
}

impl ForkfulApp {
    pub fn new() -> Self {
        Self {
            pane: pane_for(Focus::Search),
        }
    }

    pub fn focus(&self) -> Focus {
        self.pane.focus()
    }

    pub fn render(&self, state: &AppState, frame: &mut Frame) {
        let cursor = Cursor {
            focus: self.pane.focus(),
            selected: self.pane.selected(),
            input: self.pane.input(),
        };
        views::draw(frame, state, &cursor);
    }

    /// Map a key press to commands for the controllers
    pub fn handle_key(&mut self, key: KeyCode, state: &AppState) -> (AppAction, Vec<Command>) {
        let mut commands = Vec::new();

        // the notice blocks everything until acknowledged
        if state.view.notice.is_some() {
            commands.push(Command::DismissNotice);
            return (AppAction::Continue, commands);
        }

        let typing = self.pane.input().is_some();
        match key {
            KeyCode::Esc if !typing => return (AppAction::Quit, commands),
            KeyCode::Char('q') if !typing => return (AppAction::Quit, commands),
            KeyCode::Char('/') if !typing => {
                self.pane = pane_for(Focus::Search);
                return (AppAction::Continue, commands);
            }
            KeyCode::Tab => {
                self.pane = pane_for(self.pane.focus().next());
                return (AppAction::Continue, commands);
            }
            _ => {}
        }

        if let Some(next) = self.pane.handle_key(key, state, &mut commands) {
            self.pane = next;
        }

        (AppAction::Continue, commands)
    }
}
