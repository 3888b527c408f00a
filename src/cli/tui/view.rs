//! Browser screen: title, module tree, status line and help bar

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::cli::display::{category_label, tree_prefix, version_label};
use crate::orchestrator::{Activity, Orchestrator};
use crate::tree::NodeId;

use super::theme::Theme;

pub const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub fn render(frame: &mut Frame, orchestrator: &Orchestrator, theme: &Theme, spinner: usize) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Tree
            Constraint::Length(1), // Status
            Constraint::Length(1), // Help bar
        ])
        .split(frame.area());

    render_tree(frame, chunks[0], orchestrator, theme);
    render_status(frame, chunks[1], orchestrator, theme, spinner);
    render_help(frame, chunks[2]);
}

fn render_tree(frame: &mut Frame, area: Rect, orchestrator: &Orchestrator, theme: &Theme) {
    let tree = orchestrator.tree();
    let (installed, total) = tree
        .roots()
        .iter()
        .map(|&root| tree.installed_count(root))
        .fold((0, 0), |(i, t), (ri, rt)| (i + ri, t + rt));

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" Modules ({installed}/{total} installed) "))
        .title_style(theme.highlight);

    if tree.is_empty() {
        let empty = Paragraph::new(Line::from(Span::styled("No modules registered", theme.muted)))
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = tree
        .flat_visible()
        .iter()
        .map(|&id| ListItem::new(row(orchestrator, theme, id)))
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(theme.selected);

    let mut state = ListState::default();
    state.select(orchestrator.selected_node().map(|_| orchestrator.selected_index()));
    frame.render_stateful_widget(list, area, &mut state);
}

fn row<'a>(orchestrator: &Orchestrator, theme: &Theme, id: NodeId) -> Line<'a> {
    let tree = orchestrator.tree();
    let node = tree.node(id);
    let mut spans = vec![Span::styled(tree_prefix(tree, id), theme.muted)];

    match node.module() {
        Some(module) => {
            let resolver = orchestrator.resolver();
            let state = resolver.resolve(module.as_ref());
            let installed = resolver.installed_version(module.as_ref());
            spans.push(Span::styled(state.marker(), theme.state_style(state)));
            spans.push(Span::raw(format!(" {} ", node.name)));
            spans.push(Span::styled(
                version_label(module.as_ref(), state, installed),
                theme.muted,
            ));
        }
        None => {
            let arrow = if tree.is_expanded(&node.id) { "▾ " } else { "▸ " };
            spans.push(Span::styled(arrow, theme.muted));
            spans.push(Span::styled(category_label(tree, id), theme.category));
        }
    }

    Line::from(spans)
}

fn render_status(
    frame: &mut Frame,
    area: Rect,
    orchestrator: &Orchestrator,
    theme: &Theme,
    spinner: usize,
) {
    let line = match orchestrator.activity() {
        Activity::Working { verb, module } => Line::from(vec![
            Span::styled(SPINNER_FRAMES[spinner % SPINNER_FRAMES.len()], theme.highlight),
            Span::raw(format!(" {} {}...", verb.progressive(), module)),
        ]),
        Activity::Idle => match orchestrator.status() {
            Some(status) => Line::from(Span::styled(
                status.text.clone(),
                theme.status_style(status.kind),
            )),
            None => Line::from(""),
        },
    };

    frame.render_widget(Paragraph::new(line), area);
}

fn render_help(frame: &mut Frame, area: Rect) {
    let help_text = Line::from(vec![
        Span::raw(" "),
        Span::styled("↑↓", Style::default().fg(Color::Cyan)),
        Span::raw(" Move  "),
        Span::styled("•", Style::default().fg(Color::DarkGray)),
        Span::raw("  "),
        Span::styled("←→", Style::default().fg(Color::Cyan)),
        Span::raw(" Fold  "),
        Span::styled("•", Style::default().fg(Color::DarkGray)),
        Span::raw("  "),
        Span::styled("Enter", Style::default().fg(Color::Cyan)),
        Span::raw(" Install/Update  "),
        Span::styled("•", Style::default().fg(Color::DarkGray)),
        Span::raw("  "),
        Span::styled("Del", Style::default().fg(Color::Cyan)),
        Span::raw(" Uninstall  "),
        Span::styled("•", Style::default().fg(Color::DarkGray)),
        Span::raw("  "),
        Span::styled("q", Style::default().fg(Color::Cyan)),
        Span::raw(" Quit"),
    ]);

    let help = Paragraph::new(help_text).style(Style::default().bg(Color::DarkGray));

    frame.render_widget(help, area);
}
