// Headless shell: owns the numbered workspaces and turns commands into
// layout-engine calls.

use std::collections::BTreeMap;

use tyle_core::{ContentPane, Vec2, WorkspaceId};
use tyle_input::Command;
use tyle_layout::{LayoutConfig, SessionRecord, Tile, Workspace};

use crate::address::resolve_address;
use crate::pane::ItemPane;
use crate::settings::TyleSettings;

pub type TyleWorkspace = Workspace<ItemPane>;

pub struct Shell {
    workspaces: BTreeMap<WorkspaceId, TyleWorkspace>,
    current: WorkspaceId,
    config: LayoutConfig,
    resize_step: i32,
    search_url_prefix: String,
}

impl Shell {
    /// Workspaces `1..=workspace_count`, each with one default tile.
    pub fn new(settings: &TyleSettings) -> Self {
        let config = settings.layout_config();
        let workspaces = (1..=settings.workspace_count.max(1))
            .map(|id| (id, Workspace::new(config.clone())))
            .collect();
        Self {
            workspaces,
            current: 1,
            config,
            resize_step: settings.resize_step,
            search_url_prefix: settings.search_url_prefix.clone(),
        }
    }

    /// Restore from a saved session. Workspaces missing from the record start
    /// fresh; ids beyond the configured count are dropped. The selected id is
    /// clamped into range.
    pub fn from_record(record: &SessionRecord, settings: &TyleSettings) -> Self {
        let mut shell = Self::new(settings);
        for (&id, ws_record) in &record.workspaces {
            match shell.workspaces.get_mut(&id) {
                Some(slot) => *slot = Workspace::from_record(ws_record, shell.config.clone()),
                None => log::warn!("Dropping saved workspace {} (only {} configured)", id, shell.workspaces.len()),
            }
        }
        shell.current = record.current_workspace.clamp(1, shell.last_id());
        // Restored trees queue an initial focus notification each.
        for ws in shell.workspaces.values_mut() {
            ws.drain_focus_changes();
        }
        shell
    }

    pub fn to_record(&self) -> SessionRecord {
        SessionRecord {
            current_workspace: self.current,
            workspaces: self.workspaces.iter().map(|(&id, ws)| (id, ws.to_record())).collect(),
        }
    }

    // ── Dispatch ────────────────────────────────

    /// Apply one command to the current workspace (or the workspace set).
    /// Returns whether anything changed. `Show`, `Save` and `Quit` belong to
    /// the caller and are ignored here.
    pub fn dispatch(&mut self, command: Command) -> bool {
        let changed = match command {
            Command::AddTile => self.current_workspace_mut().add_tile(None).is_some(),
            Command::NewItem => self.new_item(),
            Command::RemoveCurrentItem => {
                let ws = self.current_workspace_mut();
                let before = ws.active_tile().map(|t| t.item_count());
                ws.remove_current_item() || before != ws.active_tile().map(|t| t.item_count())
            }
            Command::NextItem => self.cycle_item(1),
            Command::PrevItem => self.cycle_item(-1),
            Command::MoveFocus(step) => {
                let ws = self.current_workspace_mut();
                if ws.tile_count() < 2 {
                    false
                } else {
                    ws.cycle_focus(step as isize);
                    true
                }
            }
            Command::ResizeActive(steps) => {
                let delta = steps.saturating_mul(self.resize_step);
                self.current_workspace_mut().resize_active_tile(delta)
            }
            Command::MoveTile(direction) => self.current_workspace_mut().move_tile(direction),
            Command::SetTilingMode(mode) => self.current_workspace_mut().set_tiling_mode(mode),
            Command::SwitchWorkspace(id) => self.switch_workspace(id),
            Command::MoveTileToWorkspace(id) => self.move_tile_to_workspace(id),
            Command::Open(text) => self.open(&text),
            Command::Click { x, y } => self.current_workspace_mut().focus_at(Vec2::new(x as f32, y as f32)),
            Command::Show | Command::Save | Command::Quit => false,
        };
        self.flush_focus_changes();
        changed
    }

    pub fn switch_workspace(&mut self, id: WorkspaceId) -> bool {
        if id == self.current || !self.workspaces.contains_key(&id) {
            return false;
        }
        log::debug!("workspace {} -> {}", self.current, id);
        self.current = id;
        true
    }

    // ── Tile transfer ───────────────────────────

    /// Take the active tile out of the current workspace. Refused when it is
    /// the workspace's only tile.
    pub fn detach_active_tile(&mut self) -> Option<Tile<ItemPane>> {
        let ws = self.current_workspace_mut();
        let id = ws.active_tile_id()?;
        ws.detach_tile(id)
    }

    /// Hand a detached tile to workspace `target`. An unknown target gives
    /// the tile back.
    pub fn swap_tile_into_workspace(
        &mut self,
        tile: Tile<ItemPane>,
        target: WorkspaceId,
    ) -> Result<(), Tile<ItemPane>> {
        match self.workspaces.get_mut(&target) {
            Some(ws) => {
                ws.attach_tile(tile);
                Ok(())
            }
            None => Err(tile),
        }
    }

    pub fn move_tile_to_workspace(&mut self, target: WorkspaceId) -> bool {
        if target == self.current || !self.workspaces.contains_key(&target) {
            return false;
        }
        let Some(tile) = self.detach_active_tile() else {
            return false;
        };
        let id = tile.id();
        match self.swap_tile_into_workspace(tile, target) {
            Ok(()) => {
                log::debug!("moved tile {} to workspace {}", id, target);
                true
            }
            Err(tile) => {
                self.current_workspace_mut().attach_tile(tile);
                false
            }
        }
    }

    // ── Items ───────────────────────────────────

    fn new_item(&mut self) -> bool {
        let seed = self.config.default_pane_seed.clone();
        match self.current_workspace_mut().active_tile_mut() {
            Some(tile) => {
                tile.pane_mut().open_item(&seed);
                true
            }
            None => false,
        }
    }

    fn cycle_item(&mut self, step: isize) -> bool {
        match self.current_workspace_mut().active_tile_mut() {
            Some(tile) if tile.item_count() > 1 => {
                tile.pane_mut().cycle(step);
                true
            }
            _ => false,
        }
    }

    /// Resolve `text` and load it into the active tile's current item.
    fn open(&mut self, text: &str) -> bool {
        let Some(url) = resolve_address(text, &self.search_url_prefix) else {
            return false;
        };
        match self.current_workspace_mut().active_tile_mut() {
            Some(tile) => {
                log::debug!("tile {}: {:?} -> {}", tile.id(), tile.pane().current(), url);
                tile.pane_mut().replace_current(&url);
                true
            }
            None => false,
        }
    }

    fn flush_focus_changes(&mut self) {
        for (id, ws) in self.workspaces.iter_mut() {
            for change in ws.drain_focus_changes() {
                log::debug!("workspace {} focus {:?} -> {}", id, change.old, change.new);
            }
        }
    }

    // ── Accessors ───────────────────────────────

    pub fn current_id(&self) -> WorkspaceId {
        self.current
    }

    pub fn workspace_ids(&self) -> Vec<WorkspaceId> {
        self.workspaces.keys().copied().collect()
    }

    pub fn workspace(&self, id: WorkspaceId) -> Option<&TyleWorkspace> {
        self.workspaces.get(&id)
    }

    pub fn current_workspace(&self) -> &TyleWorkspace {
        &self.workspaces[&self.current]
    }

    pub fn current_workspace_mut(&mut self) -> &mut TyleWorkspace {
        let current = self.current;
        self.workspaces.entry(current).or_insert_with(|| Workspace::new(self.config.clone()))
    }

    fn last_id(&self) -> WorkspaceId {
        self.workspaces.keys().next_back().copied().unwrap_or(1)
    }

    /// Text dump for the terminal front end: a workspace strip with tile
    /// counts, the current tree, and the active tile's tab titles.
    pub fn describe(&self) -> String {
        let strip: Vec<String> = self
            .workspace_ids()
            .into_iter()
            .filter_map(|id| {
                let ws = self.workspace(id)?;
                let marker = if id == self.current { "*" } else { "" };
                Some(format!("{}{}({})", marker, id, ws.tile_count()))
            })
            .collect();

        let ws = self.current_workspace();
        let tabs = ws
            .active_tile()
            .map(|tile| {
                let pane = tile.pane();
                let current = pane.current_index();
                (0..pane.item_count())
                    .filter_map(|i| {
                        let title = pane.title(i)?;
                        Some(if Some(i) == current { format!("[{}]", title) } else { title })
                    })
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .unwrap_or_default();

        format!("workspaces {}\n{}tabs {}", strip.join(" "), ws.describe(), tabs)
    }
}
