use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use super::app::Focus;
use crate::controllers::current_page;
use crate::models::{PageButtons, TITLE_LIMIT, format_quantity, limit_title, page_count};
use crate::state::{AppState, LoadStatus};

/// Where the user is: focused pane, its selected row and any text being typed
pub struct Cursor<'a> {
    pub focus: Focus,
    pub selected: Option<usize>,
    pub input: Option<&'a str>,
}

fn block<'a>(title: impl Into<Line<'a>>, focused: bool) -> Block<'a> {
    let style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    Block::default()
        .borders(Borders::ALL)
        .border_style(style)
        .title(title)
}

fn row_style(is_selected: bool, is_highlighted: bool) -> Style {
    let mut style = Style::default();
    if is_highlighted {
        style = style.add_modifier(Modifier::BOLD).fg(Color::Cyan);
    }
    if is_selected {
        style = style.add_modifier(Modifier::REVERSED);
    }
    style
}

fn loader() -> Paragraph<'static> {
    Paragraph::new("Loading...")
}

pub fn draw(frame: &mut Frame, state: &AppState, cursor: &Cursor) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .split(frame.area());

    render_search_bar(frame, rows[0], state, cursor);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(32),
            Constraint::Percentage(43),
            Constraint::Percentage(25),
        ])
        .split(rows[1]);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(columns[0]);

    render_results(frame, left[0], state, cursor);
    render_likes(frame, left[1], state, cursor);
    render_recipe(frame, columns[1], state, cursor);
    render_list(frame, columns[2], state, cursor);
    render_help(frame, rows[2], cursor);

    if let Some(notice) = &state.view.notice {
        render_notice(frame, notice);
    }
}

fn render_search_bar(frame: &mut Frame, area: Rect, state: &AppState, cursor: &Cursor) {
    let text = match (cursor.focus, cursor.input) {
        (Focus::Search, Some(input)) => format!("{}_", input),
        _ => state
            .search
            .as_ref()
            .map(|search| search.query.clone())
            .unwrap_or_default(),
    };

    let title = format!("Search recipes  ♥ {}", state.likes.count());
    frame.render_widget(
        Paragraph::new(text).block(block(title, cursor.focus == Focus::Search)),
        area,
    );
}

fn render_results(frame: &mut Frame, area: Rect, state: &AppState, cursor: &Cursor) {
    let focused = cursor.focus == Focus::Results;
    let total = state.search.as_ref().map_or(0, |search| search.results.len());
    let pages = page_count(total, state.view.per_page);
    let title = if pages > 0 {
        format!("Results (page {}/{})", state.view.page, pages)
    } else {
        "Results".to_string()
    };

    if state.view.search_status == LoadStatus::Loading {
        frame.render_widget(loader().block(block(title, focused)), area);
        return;
    }

    let mut lines: Vec<Line> = current_page(state)
        .iter()
        .enumerate()
        .map(|(i, summary)| {
            let is_selected = focused && cursor.selected == Some(i);
            let is_highlighted = state.view.highlighted.as_deref() == Some(summary.id.as_str());
            Line::from(vec![
                Span::styled(
                    limit_title(&summary.title, TITLE_LIMIT),
                    row_style(is_selected, is_highlighted),
                ),
                Span::styled(
                    format!("  {}", summary.publisher),
                    Style::default().add_modifier(Modifier::DIM),
                ),
            ])
        })
        .collect();

    if state.search.is_some() && total == 0 && state.view.search_status == LoadStatus::Idle {
        lines.push(Line::from("No recipes found"));
    }

    let buttons = PageButtons::for_page(state.view.page, pages);
    let mut navigation = Vec::new();
    if let Some(prev) = buttons.prev {
        navigation.push(Span::raw(format!("< Page {} (p)", prev)));
    }
    if let Some(next) = buttons.next {
        if !navigation.is_empty() {
            navigation.push(Span::raw("   "));
        }
        navigation.push(Span::raw(format!("Page {} > (n)", next)));
    }
    if !navigation.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(navigation));
    }

    frame.render_widget(Paragraph::new(lines).block(block(title, focused)), area);
}

fn render_recipe(frame: &mut Frame, area: Rect, state: &AppState, cursor: &Cursor) {
    let focused = cursor.focus == Focus::Recipe;

    if state.view.recipe_status == LoadStatus::Loading {
        frame.render_widget(loader().block(block("Recipe", focused)), area);
        return;
    }

    let Some(recipe) = &state.recipe else {
        frame.render_widget(
            Paragraph::new("Pick a recipe from the results")
                .block(block("Recipe", focused)),
            area,
        );
        return;
    };

    let heart = if state.current_recipe_liked() { "♥" } else { "♡" };
    let mut lines = vec![
        Line::styled(
            recipe.title.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Line::from(format!("by {}", recipe.author)),
        Line::from(format!(
            "{} minutes   {} servings   {}",
            recipe.prep_time_minutes, recipe.servings, heart
        )),
        Line::from(""),
    ];

    lines.extend(recipe.ingredients.iter().map(|ingredient| {
        let quantity = format_quantity(ingredient.quantity);
        let parts: Vec<&str> = [quantity.as_str(), ingredient.unit.as_str(), ingredient.name.as_str()]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect();
        Line::from(format!("• {}", parts.join(" ")))
    }));

    if !recipe.url.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(format!("Directions: {}", recipe.url)));
    }

    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(block("Recipe", focused)),
        area,
    );
}

fn render_list(frame: &mut Frame, area: Rect, state: &AppState, cursor: &Cursor) {
    let focused = cursor.focus == Focus::List;

    let lines: Vec<Line> = state
        .list
        .iter()
        .flat_map(|list| list.items())
        .enumerate()
        .map(|(i, item)| {
            let is_selected = focused && cursor.selected == Some(i);
            let quantity = match (is_selected, cursor.input) {
                (true, Some(input)) => format!("[{}_]", input),
                _ => format_quantity(item.quantity),
            };
            let text = [quantity.as_str(), item.unit.as_str(), item.name.as_str()]
                .into_iter()
                .filter(|part| !part.is_empty())
                .collect::<Vec<_>>()
                .join(" ");
            Line::styled(text, row_style(is_selected, false))
        })
        .collect();

    frame.render_widget(
        Paragraph::new(lines).block(block("Shopping list", focused)),
        area,
    );
}

fn render_likes(frame: &mut Frame, area: Rect, state: &AppState, cursor: &Cursor) {
    let focused = cursor.focus == Focus::Likes;
    let title = if state.likes.is_session_only() {
        format!("Likes ({}, not saved)", state.likes.count())
    } else {
        format!("Likes ({})", state.likes.count())
    };

    let lines: Vec<Line> = state
        .likes
        .iter()
        .enumerate()
        .map(|(i, like)| {
            let is_selected = focused && cursor.selected == Some(i);
            Line::from(vec![
                Span::styled(
                    limit_title(&like.title, TITLE_LIMIT),
                    row_style(is_selected, false),
                ),
                Span::styled(
                    format!("  {}", like.author),
                    Style::default().add_modifier(Modifier::DIM),
                ),
            ])
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).block(block(title, focused)), area);
}

fn render_help(frame: &mut Frame, area: Rect, cursor: &Cursor) {
    let help = match cursor.focus {
        Focus::Search => "Enter search · Esc results · Tab next pane",
        Focus::Results => "↑↓ select · Enter open · n/p page · / search · Tab next · q quit",
        Focus::Recipe => "+/- servings · a add to list · l like · Tab next · q quit",
        Focus::List if cursor.input.is_some() => "type quantity · Enter save · Esc cancel",
        Focus::List => "↑↓ select · e edit quantity · d delete · Tab next · q quit",
        Focus::Likes => "↑↓ select · Enter open · Tab next · q quit",
    };
    frame.render_widget(
        Paragraph::new(help).style(Style::default().add_modifier(Modifier::DIM)),
        area,
    );
}

fn render_notice(frame: &mut Frame, notice: &str) {
    let area = frame.area();
    let width = area.width.min(50);
    let popup = Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + area.height.saturating_sub(5) / 2,
        width,
        height: 5.min(area.height),
    };

    frame.render_widget(Clear, popup);
    frame.render_widget(
        Paragraph::new(vec![Line::from(notice.to_string()), Line::from(""), Line::from("Press any key")])
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Red))
                    .title("Error"),
            ),
        popup,
    );
}
