//! Server list table widget.

use ratatui::{
    buffer::Buffer,
    layout::Constraint,
    style::{Modifier, Style},
    widgets::{Block, Borders, Cell, Row, Table as TableView, Widget as _},
};

use super::base::{Widget, WidgetBase, clip, widget_any};
use crate::domain::entities::ServerInfo;
use crate::presentation::events::LauncherKey;
use crate::presentation::theme::LauncherTheme;

/// Rows above the first entry: top border and header.
const HEADER_ROWS: i32 = 2;

/// Scrollable, filterable list of public servers.
#[derive(Debug, Clone)]
pub struct ServerTable {
    base: WidgetBase,
    servers: Vec<ServerInfo>,
    filter: String,
    selected: Option<String>,
    scroll: usize,
    size: (i32, i32),
}

impl ServerTable {
    /// Creates an empty table.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            base: WidgetBase::new(true),
            servers: Vec::new(),
            filter: String::new(),
            selected: None,
            scroll: 0,
            size: (0, 0),
        }
    }

    /// Replaces the servers, most players first.
    pub fn set_servers(&mut self, mut servers: Vec<ServerInfo>) {
        servers.sort_by(|a, b| {
            b.players
                .cmp(&a.players)
                .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
        });
        self.servers = servers;
        self.scroll = 0;
    }

    /// Filters rows by name.
    pub fn set_filter(&mut self, filter: &str) {
        filter.clone_into(&mut self.filter);
        self.scroll = 0;
    }

    /// Sets the size used on the next layout.
    pub const fn set_size(&mut self, width: i32, height: i32) {
        self.size = (width, height);
    }

    /// Rows passing the filter, in display order.
    #[must_use]
    pub fn rows(&self) -> Vec<&ServerInfo> {
        self.servers
            .iter()
            .filter(|server| server.matches(&self.filter))
            .collect()
    }

    /// Hash of the selected row.
    #[must_use]
    pub fn selected_hash(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Selects the row with the given hash, if listed.
    pub fn select_hash(&mut self, hash: &str) {
        if self.servers.iter().any(|server| server.hash == hash) {
            self.selected = Some(hash.to_owned());
            self.ensure_visible();
        } else {
            self.selected = None;
        }
    }

    /// Scrolls by wheel notches; positive moves up.
    pub fn scroll(&mut self, delta: i32) {
        let max = self.rows().len().saturating_sub(self.capacity());
        let magnitude = usize::try_from(delta.unsigned_abs()).unwrap_or(usize::MAX);
        self.scroll = if delta > 0 {
            self.scroll.saturating_sub(magnitude)
        } else {
            self.scroll.saturating_add(magnitude).min(max)
        };
    }

    /// First visible row.
    #[must_use]
    pub const fn scroll_offset(&self) -> usize {
        self.scroll
    }

    fn capacity(&self) -> usize {
        usize::try_from(self.base.bounds.height - HEADER_ROWS - 1).unwrap_or(0)
    }

    fn selected_index(&self, rows: &[&ServerInfo]) -> Option<usize> {
        let hash = self.selected.as_deref()?;
        rows.iter().position(|server| server.hash == hash)
    }

    fn select_index(&mut self, index: usize) -> bool {
        let rows = self.rows();
        let Some(server) = rows.get(index) else {
            return false;
        };
        let hash = server.hash.clone();
        let changed = self.selected.as_deref() != Some(hash.as_str());
        self.selected = Some(hash);
        self.ensure_visible();
        changed
    }

    fn ensure_visible(&mut self) {
        let rows = self.rows();
        let Some(index) = self.selected_index(&rows) else {
            return;
        };
        let capacity = self.capacity().max(1);
        if index < self.scroll {
            self.scroll = index;
        } else if index >= self.scroll + capacity {
            self.scroll = index + 1 - capacity;
        }
    }
}

impl Default for ServerTable {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for ServerTable {
    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn size(&self) -> (i32, i32) {
        self.size
    }

    fn draw(&self, buf: &mut Buffer, theme: &LauncherTheme) {
        let Some(area) = clip(self.base.bounds, buf.area) else {
            return;
        };
        let rows = self.rows();
        let selected = self.selected_index(&rows);
        let body = rows
            .iter()
            .enumerate()
            .skip(self.scroll)
            .take(self.capacity())
            .map(|(i, server)| {
                let row = Row::new(vec![
                    Cell::from(server.name.as_str()),
                    Cell::from(format!("{}/{}", server.players, server.max_players)),
                    Cell::from(server.uptime_text()),
                    Cell::from(server.software.as_str()),
                ]);
                if Some(i) == selected {
                    row.style(theme.button(true, false))
                } else {
                    row
                }
            });

        let header = Row::new(vec!["Name", "Players", "Uptime", "Software"])
            .style(Style::default().add_modifier(Modifier::BOLD));
        TableView::new(
            body,
            [
                Constraint::Fill(1),
                Constraint::Length(9),
                Constraint::Length(7),
                Constraint::Length(16),
            ],
        )
        .header(header)
        .style(theme.background())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.border(self.base.selected)),
        )
        .render(area, buf);
    }

    fn handles_click(&self) -> bool {
        true
    }

    fn on_click(&mut self, _x: i32, y: i32) -> bool {
        let Ok(row) = usize::try_from(y - self.base.bounds.y - HEADER_ROWS) else {
            return false;
        };
        if row >= self.capacity() {
            return false;
        }
        self.select_index(self.scroll + row)
    }

    fn on_key_down(&mut self, key: LauncherKey) -> bool {
        let count = self.rows().len();
        if count == 0 {
            return false;
        }
        let last = count - 1;
        let page = self.capacity().max(1);
        let current = self.selected_index(&self.rows());
        let target = match (key, current) {
            (LauncherKey::Home, _) | (LauncherKey::Down, None) => 0,
            (LauncherKey::End, _) => last,
            (LauncherKey::Up, None | Some(0)) => 0,
            (LauncherKey::Up, Some(i)) => i - 1,
            (LauncherKey::Down, Some(i)) => (i + 1).min(last),
            (LauncherKey::PageUp, i) => i.unwrap_or(0).saturating_sub(page),
            (LauncherKey::PageDown, i) => (i.unwrap_or(0) + page).min(last),
            _ => return false,
        };
        self.select_index(target)
    }

    widget_any!();
}
