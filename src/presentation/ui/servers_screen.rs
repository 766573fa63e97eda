//! Public server list.

use tracing::warn;

use super::context::LauncherContext;
use super::registry::{ScreenAction, ScreenId};
use super::screen::{Screen, WidgetId, WidgetSet};
use crate::application::tasks::TaskPoll;
use crate::domain::{Anchor, Placement};
use crate::presentation::widgets::{Button, Label, LabelTone, ServerTable, TextInput};

const REFRESH: &str = "Refresh";
const WORKING: &str = "Working..";

/// Click actions of the servers screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServersAction {
    /// Return to the main screen.
    Back,
    /// Join the server in the hash input.
    Connect,
    /// Fetch the list again.
    Refresh,
    /// A row was clicked.
    Table,
}

/// Searchable server table with connect controls.
pub struct ServersScreen {
    widgets: WidgetSet<ServersAction>,
    search: WidgetId,
    hash: WidgetId,
    connect: WidgetId,
    refresh: WidgetId,
    table: WidgetId,
    status: WidgetId,
}

impl ServersScreen {
    /// Creates the screen.
    #[must_use]
    pub fn new() -> Self {
        let mut widgets = WidgetSet::new();
        let search = widgets.add(
            TextInput::new(40).hint("Search servers.."),
            Placement::new(Anchor::Min, Anchor::Min, 1, 0),
        );
        let hash = widgets.add(
            TextInput::new(50).hint("classicube.net/server/play/..."),
            Placement::new(Anchor::Min, Anchor::Max, 1, 0),
        );
        widgets.add_clickable(
            Button::new("Back", 14),
            Placement::new(Anchor::Max, Anchor::Min, 1, 0),
            ServersAction::Back,
        );
        let connect = widgets.add_clickable(
            Button::new("Connect", 16),
            Placement::new(Anchor::Max, Anchor::Max, 1, 0),
            ServersAction::Connect,
        );
        let refresh = widgets.add_clickable(
            Button::new(REFRESH, 14),
            Placement::new(Anchor::Max, Anchor::Min, 16, 0),
            ServersAction::Refresh,
        );
        let table = widgets.add_clickable(
            ServerTable::new(),
            Placement::new(Anchor::Min, Anchor::Min, 1, 3),
            ServersAction::Table,
        );
        let status = widgets.add(
            Label::new(""),
            Placement::new(Anchor::Min, Anchor::Max, 2, 3),
        );

        Self {
            widgets,
            search,
            hash,
            connect,
            refresh,
            table,
            status,
        }
    }

    fn table_mut(&mut self) -> Option<&mut ServerTable> {
        self.widgets.get_mut::<ServerTable>(self.table)
    }

    fn fill_table(&mut self, ctx: &LauncherContext) {
        let filter = self.widgets.input_text(self.search).to_string();
        let hash = self.widgets.input_text(self.hash).to_string();
        if let Some(table) = self.table_mut() {
            table.set_servers(ctx.tasks.servers().to_vec());
            table.set_filter(&filter);
            table.select_hash(&hash);
        }
    }

    fn copy_selected_hash(&mut self) {
        let selected = self
            .widgets
            .get::<ServerTable>(self.table)
            .and_then(ServerTable::selected_hash)
            .map(str::to_string);
        if let Some(hash) = selected {
            self.widgets.set_input_text(self.hash, hash);
        }
    }

    fn set_refresh_text(&mut self, text: &str) {
        if let Some(button) = self.widgets.get_mut::<Button>(self.refresh) {
            button.set_text(text);
        }
    }

    fn connect(&mut self, ctx: &mut LauncherContext) {
        let input = self.widgets.input_text(self.hash).to_string();
        if let Err(e) = ctx.connect_to_server(&input) {
            warn!(error = %e, "Failed to join server");
            self.widgets.set_label(self.status, e.to_string(), LabelTone::Error);
        }
    }

    fn refresh(&mut self, ctx: &mut LauncherContext) {
        if ctx.tasks.fetch_servers.is_working() {
            return;
        }
        ctx.tasks.run_fetch_servers();
        self.set_refresh_text(WORKING);
        self.widgets.set_label(self.status, "", LabelTone::Normal);
    }
}

impl Default for ServersScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen for ServersScreen {
    type Action = ServersAction;

    fn widgets(&self) -> &WidgetSet<ServersAction> {
        &self.widgets
    }

    fn widgets_mut(&mut self) -> &mut WidgetSet<ServersAction> {
        &mut self.widgets
    }

    fn init(&mut self, ctx: &mut LauncherContext) {
        self.widgets.set_enter_default(self.connect);
        self.fill_table(ctx);
        if ctx.tasks.fetch_servers.is_working() {
            self.set_refresh_text(WORKING);
        }
    }

    fn reposition(&mut self, window: (i32, i32)) {
        let (width, height) = window;
        if let Some(table) = self.table_mut() {
            table.set_size((width - 2).max(1), (height - 7).max(1));
        }
        self.widgets.relayout(window);
    }

    fn tick(&mut self, ctx: &mut LauncherContext) -> ScreenAction {
        self.widgets.tick();
        match ctx.tasks.fetch_servers.poll() {
            TaskPoll::Succeeded => {
                self.fill_table(ctx);
                self.set_refresh_text(REFRESH);
            }
            TaskPoll::Failed(e) => {
                self.set_refresh_text(REFRESH);
                self.widgets.set_label(
                    self.status,
                    format!("Failed to fetch servers: {e}"),
                    LabelTone::Error,
                );
            }
            TaskPoll::Idle | TaskPoll::Pending => {}
        }
        ScreenAction::None
    }

    fn mouse_wheel(&mut self, _ctx: &mut LauncherContext, delta: i32) -> ScreenAction {
        if let Some(table) = self.table_mut() {
            table.scroll(delta);
        }
        ScreenAction::None
    }

    fn handle_click(
        &mut self,
        ctx: &mut LauncherContext,
        action: ServersAction,
        _x: i32,
        _y: i32,
    ) -> ScreenAction {
        match action {
            ServersAction::Back => return ScreenAction::Navigate(ScreenId::Main),
            ServersAction::Connect => self.connect(ctx),
            ServersAction::Refresh => self.refresh(ctx),
            ServersAction::Table => self.copy_selected_hash(),
        }
        ScreenAction::None
    }

    fn text_changed(&mut self, _ctx: &mut LauncherContext, id: WidgetId) -> ScreenAction {
        if id == self.search {
            let filter = self.widgets.input_text(self.search).to_string();
            if let Some(table) = self.table_mut() {
                table.set_filter(&filter);
            }
        } else if id == self.hash {
            let hash = self.widgets.input_text(self.hash).to_string();
            if let Some(table) = self.table_mut() {
                table.select_hash(hash.trim());
            }
        } else if id == self.table {
            self.copy_selected_hash();
        }
        ScreenAction::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::ServerInfo;
    use crate::domain::ports::mocks::sample_server;
    use crate::presentation::events::LauncherKey;
    use crate::presentation::ui::context::test_support::{Harness, harness, open, settle};
    use tempfile::TempDir;

    fn servers() -> Vec<ServerInfo> {
        let mut quiet = sample_server();
        quiet.hash = "ffff0000".to_string();
        quiet.name = "Quiet lobby".to_string();
        quiet.players = 0;
        vec![quiet, sample_server()]
    }

    async fn with_servers(dir: &TempDir) -> Harness {
        let mut h = harness(dir.path());
        h.api.set_servers(Ok(servers()));
        h.ctx.tasks.run_fetch_servers();
        settle(&mut h.ctx, |ctx| {
            ctx.tasks.fetch_servers.tick();
            ctx.tasks.fetch_servers.is_completed()
        })
        .await;
        h
    }

    fn table(screen: &ServersScreen) -> &ServerTable {
        screen.widgets.get::<ServerTable>(screen.table).unwrap()
    }

    fn type_into(screen: &mut ServersScreen, ctx: &mut LauncherContext, id: WidgetId, text: &str) {
        screen.widgets.clear_selection();
        let bounds = screen.widgets.widget(id).unwrap().base().bounds;
        screen.mouse_down(ctx, bounds.x + 1, bounds.y + 1);
        screen.mouse_up(ctx, bounds.x + 1, bounds.y + 1);
        for c in text.chars() {
            screen.key_press(ctx, c);
        }
    }

    #[tokio::test]
    async fn test_init_fills_table_from_task() {
        let dir = TempDir::new().unwrap();
        let mut h = with_servers(&dir).await;
        let mut screen = ServersScreen::new();
        open(&mut screen, &mut h.ctx);

        let names: Vec<_> = table(&screen).rows().iter().map(|s| s.name.clone()).collect();
        assert_eq!(names, ["Freebuild", "Quiet lobby"]);
        assert_eq!(screen.widgets.enter_default(), Some(screen.connect));
    }

    #[tokio::test]
    async fn test_search_filters_rows() {
        let dir = TempDir::new().unwrap();
        let mut h = with_servers(&dir).await;
        let mut screen = ServersScreen::new();
        open(&mut screen, &mut h.ctx);

        let search = screen.search;
        type_into(&mut screen, &mut h.ctx, search, "quiet");
        let rows = table(&screen).rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].hash, "ffff0000");
    }

    #[tokio::test]
    async fn test_typed_hash_selects_row() {
        let dir = TempDir::new().unwrap();
        let mut h = with_servers(&dir).await;
        let mut screen = ServersScreen::new();
        open(&mut screen, &mut h.ctx);

        let hash = screen.hash;
        type_into(&mut screen, &mut h.ctx, hash, "ffff0000");
        assert_eq!(table(&screen).selected_hash(), Some("ffff0000"));
    }

    #[tokio::test]
    async fn test_row_click_copies_hash_and_connects() {
        let dir = TempDir::new().unwrap();
        let mut h = with_servers(&dir).await;
        let mut screen = ServersScreen::new();
        open(&mut screen, &mut h.ctx);

        let bounds = screen.widgets.widget(screen.table).unwrap().base().bounds;
        let row_y = bounds.y + 2;
        screen.mouse_down(&mut h.ctx, bounds.x + 3, row_y);
        screen.mouse_up(&mut h.ctx, bounds.x + 3, row_y);
        assert_eq!(screen.widgets.input_text(screen.hash), "0123abcd");

        screen.handle_click(&mut h.ctx, ServersAction::Connect, 0, 0);
        let launches = h.game.launches();
        assert_eq!(launches.len(), 1);
        assert_eq!(launches[0].ip, "10.0.0.1");
    }

    #[tokio::test]
    async fn test_arrow_keys_copy_hash() {
        let dir = TempDir::new().unwrap();
        let mut h = with_servers(&dir).await;
        let mut screen = ServersScreen::new();
        open(&mut screen, &mut h.ctx);

        while screen.widgets.selected() != Some(screen.table) {
            screen.key_down(&mut h.ctx, LauncherKey::Tab);
        }
        screen.key_down(&mut h.ctx, LauncherKey::Down);
        assert_eq!(screen.widgets.input_text(screen.hash), "0123abcd");
        screen.key_down(&mut h.ctx, LauncherKey::Down);
        assert_eq!(screen.widgets.input_text(screen.hash), "ffff0000");
    }

    #[tokio::test]
    async fn test_unknown_hash_reports_error() {
        let dir = TempDir::new().unwrap();
        let mut h = with_servers(&dir).await;
        let mut screen = ServersScreen::new();
        open(&mut screen, &mut h.ctx);

        screen.widgets.set_input_text(screen.hash, "nothere");
        screen.handle_click(&mut h.ctx, ServersAction::Connect, 0, 0);
        assert!(h.game.launches().is_empty());
        let status = screen.widgets.get::<Label>(screen.status).unwrap();
        assert!(status.text().contains("nothere"));
    }

    #[tokio::test]
    async fn test_refresh_shows_working_until_done() {
        let dir = TempDir::new().unwrap();
        let mut h = harness(dir.path());
        let mut screen = ServersScreen::new();
        open(&mut screen, &mut h.ctx);
        assert!(table(&screen).rows().is_empty());

        screen.handle_click(&mut h.ctx, ServersAction::Refresh, 0, 0);
        let text = |s: &ServersScreen| s.widgets.get::<Button>(s.refresh).unwrap().text().to_string();
        assert_eq!(text(&screen), WORKING);

        for _ in 0..100 {
            screen.tick(&mut h.ctx);
            if text(&screen) == REFRESH {
                break;
            }
            tokio::time::sleep(std::time::Duration::from_millis(2)).await;
        }
        assert_eq!(text(&screen), REFRESH);
        assert_eq!(table(&screen).rows().len(), 1);
    }

    #[tokio::test]
    async fn test_reposition_fills_window() {
        let dir = TempDir::new().unwrap();
        let mut h = harness(dir.path());
        let mut screen = ServersScreen::new();
        open(&mut screen, &mut h.ctx);
        screen.reposition((100, 40));

        let bounds = screen.widgets.widget(screen.table).unwrap().base().bounds;
        assert_eq!((bounds.width, bounds.height), (98, 33));
    }
}
