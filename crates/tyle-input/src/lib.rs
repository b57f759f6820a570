// Shell command vocabulary for Tyle.
// Maps hotkeys and typed command lines onto the commands a workspace shell
// dispatches to the layout engine.

use tyle_core::{Direction, Key, Modifiers, TilingMode, WorkspaceId};

// ──────────────────────────────────────────────
// Commands
// ──────────────────────────────────────────────

/// Everything the shell can ask of the active workspace (or of the set of
/// workspaces).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    AddTile,
    NewItem,
    RemoveCurrentItem,
    NextItem,
    PrevItem,
    /// Cycle the active tile by this many positions.
    MoveFocus(i32),
    /// Grow (positive) or shrink the active tile, in resize steps.
    ResizeActive(i32),
    MoveTile(Direction),
    SetTilingMode(TilingMode),
    SwitchWorkspace(WorkspaceId),
    MoveTileToWorkspace(WorkspaceId),
    /// Point the active tile at an address or search query.
    Open(String),
    /// Activate the tile under a viewport position.
    Click { x: i32, y: i32 },
    Show,
    Save,
    Quit,
}

impl Command {
    /// Every bindable command, in the order a settings page would list them.
    pub fn all_actions() -> Vec<Command> {
        let mut actions = vec![
            Command::AddTile,
            Command::NewItem,
            Command::RemoveCurrentItem,
            Command::NextItem,
            Command::PrevItem,
            Command::MoveFocus(-1),
            Command::MoveFocus(1),
            Command::ResizeActive(1),
            Command::ResizeActive(-1),
            Command::MoveTile(Direction::Left),
            Command::MoveTile(Direction::Right),
            Command::MoveTile(Direction::Up),
            Command::MoveTile(Direction::Down),
        ];
        actions.extend(TilingMode::ALL.into_iter().map(Command::SetTilingMode));
        actions.extend((1..=9).map(Command::SwitchWorkspace));
        actions.extend((1..=9).map(Command::MoveTileToWorkspace));
        actions
    }

    /// Stable name used for keybinding overrides in settings.json.
    /// Commands that carry free-form data have no key.
    pub fn action_key(&self) -> Option<String> {
        let key = match self {
            Command::AddTile => "add_tile".to_string(),
            Command::NewItem => "new_item".to_string(),
            Command::RemoveCurrentItem => "close_item".to_string(),
            Command::NextItem => "next_item".to_string(),
            Command::PrevItem => "prev_item".to_string(),
            Command::MoveFocus(-1) => "focus_prev".to_string(),
            Command::MoveFocus(1) => "focus_next".to_string(),
            Command::ResizeActive(1) => "grow".to_string(),
            Command::ResizeActive(-1) => "shrink".to_string(),
            Command::MoveTile(dir) => format!("move_{}", dir.as_str()),
            Command::SetTilingMode(mode) => format!("mode_{}", mode.as_str()),
            Command::SwitchWorkspace(id) => format!("workspace_{}", id),
            Command::MoveTileToWorkspace(id) => format!("send_to_workspace_{}", id),
            Command::Save => "save".to_string(),
            Command::Quit => "quit".to_string(),
            Command::MoveFocus(_)
            | Command::ResizeActive(_)
            | Command::Open(_)
            | Command::Click { .. }
            | Command::Show => return None,
        };
        Some(key)
    }

    pub fn from_action_key(key: &str) -> Option<Command> {
        let command = match key {
            "add_tile" => Command::AddTile,
            "new_item" => Command::NewItem,
            "close_item" => Command::RemoveCurrentItem,
            "next_item" => Command::NextItem,
            "prev_item" => Command::PrevItem,
            "focus_prev" => Command::MoveFocus(-1),
            "focus_next" => Command::MoveFocus(1),
            "grow" => Command::ResizeActive(1),
            "shrink" => Command::ResizeActive(-1),
            "save" => Command::Save,
            "quit" => Command::Quit,
            other => {
                if let Some(dir) = other.strip_prefix("move_") {
                    Command::MoveTile(Direction::from_name(dir)?)
                } else if let Some(mode) = other.strip_prefix("mode_") {
                    Command::SetTilingMode(TilingMode::from_name(mode)?)
                } else if let Some(id) = other.strip_prefix("send_to_workspace_") {
                    Command::MoveTileToWorkspace(id.parse().ok()?)
                } else if let Some(id) = other.strip_prefix("workspace_") {
                    Command::SwitchWorkspace(id.parse().ok()?)
                } else {
                    return None;
                }
            }
        };
        Some(command)
    }

    /// Parse one typed command line, e.g. `move left`, `mode bsp`,
    /// `open example.com`. Returns `None` for blank or unrecognized input.
    pub fn parse(line: &str) -> Option<Command> {
        let line = line.trim();
        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };

        let command = match verb.to_ascii_lowercase().as_str() {
            "tile" | "add-tile" => Command::AddTile,
            "tab" | "new-item" => Command::NewItem,
            "close" | "close-item" => Command::RemoveCurrentItem,
            "next" | "next-item" => Command::NextItem,
            "prev" | "prev-item" => Command::PrevItem,
            "focus" => Command::MoveFocus(parse_count(rest)?),
            "resize" => Command::ResizeActive(parse_count(rest)?),
            "move" => Command::MoveTile(Direction::from_name(&rest.to_ascii_lowercase())?),
            "mode" => Command::SetTilingMode(TilingMode::from_name(&rest.to_ascii_lowercase())?),
            "workspace" | "ws" => Command::SwitchWorkspace(rest.parse().ok()?),
            "send" => Command::MoveTileToWorkspace(rest.parse().ok()?),
            "open" if !rest.is_empty() => Command::Open(rest.to_string()),
            "click" => {
                let (x, y) = rest.split_once(char::is_whitespace)?;
                Command::Click {
                    x: x.trim().parse().ok()?,
                    y: y.trim().parse().ok()?,
                }
            }
            "show" => Command::Show,
            "save" => Command::Save,
            "quit" | "exit" => Command::Quit,
            _ => return None,
        };
        Some(command)
    }
}

/// Signed count argument; empty means 1.
fn parse_count(arg: &str) -> Option<i32> {
    if arg.is_empty() {
        return Some(1);
    }
    arg.strip_prefix('+').unwrap_or(arg).parse().ok()
}

// ──────────────────────────────────────────────
// Hotkeys
// ──────────────────────────────────────────────

/// A key plus the exact modifier set that must be held.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Hotkey {
    pub key: Key,
    pub shift: bool,
    pub ctrl: bool,
    pub meta: bool,
    pub alt: bool,
}

impl Hotkey {
    pub fn new(key: Key, shift: bool, ctrl: bool, meta: bool, alt: bool) -> Self {
        Self {
            key,
            shift,
            ctrl,
            meta,
            alt,
        }
    }

    /// Character keys compare case-insensitively; modifiers must match exactly.
    pub fn matches(&self, key: Key, modifiers: Modifiers) -> bool {
        let same_key = match (self.key, key) {
            (Key::Char(a), Key::Char(b)) => a.eq_ignore_ascii_case(&b),
            (a, b) => a == b,
        };
        same_key
            && self.shift == modifiers.shift
            && self.ctrl == modifiers.ctrl
            && self.meta == modifiers.meta
            && self.alt == modifiers.alt
    }

    pub fn key_name(&self) -> String {
        match self.key {
            Key::Char(c) => c.to_ascii_uppercase().to_string(),
            Key::Enter => "Enter".to_string(),
            Key::Tab => "Tab".to_string(),
            Key::Escape => "Escape".to_string(),
            Key::Up => "Up".to_string(),
            Key::Down => "Down".to_string(),
            Key::Left => "Left".to_string(),
            Key::Right => "Right".to_string(),
        }
    }

    pub fn key_from_name(name: &str) -> Option<Key> {
        match name {
            "Enter" | "Return" => Some(Key::Enter),
            "Tab" => Some(Key::Tab),
            "Escape" | "Esc" => Some(Key::Escape),
            "Up" => Some(Key::Up),
            "Down" => Some(Key::Down),
            "Left" => Some(Key::Left),
            "Right" => Some(Key::Right),
            _ => {
                let mut chars = name.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Some(Key::Char(c.to_ascii_lowercase())),
                    _ => None,
                }
            }
        }
    }

    pub fn modifiers(&self) -> Modifiers {
        Modifiers {
            shift: self.shift,
            ctrl: self.ctrl,
            alt: self.alt,
            meta: self.meta,
        }
    }

    /// Parse the form produced by [`Hotkey::display`]. Modifier names are
    /// case-insensitive and may come in any order; `Cmd` is accepted for Meta.
    pub fn parse(text: &str) -> Option<Hotkey> {
        let mut parts: Vec<&str> = text.split('+').map(str::trim).collect();
        let key = Self::key_from_name(parts.pop()?)?;
        let mut hotkey = Hotkey::new(key, false, false, false, false);
        for part in parts {
            match part.to_ascii_lowercase().as_str() {
                "shift" => hotkey.shift = true,
                "ctrl" | "control" => hotkey.ctrl = true,
                "alt" | "option" => hotkey.alt = true,
                "meta" | "cmd" | "super" => hotkey.meta = true,
                _ => return None,
            }
        }
        Some(hotkey)
    }

    /// Human-readable form such as `Ctrl+Shift+T`.
    pub fn display(&self) -> String {
        let mut parts = Vec::new();
        if self.ctrl {
            parts.push("Ctrl".to_string());
        }
        if self.alt {
            parts.push("Alt".to_string());
        }
        if self.meta {
            parts.push("Meta".to_string());
        }
        if self.shift {
            parts.push("Shift".to_string());
        }
        parts.push(self.key_name());
        parts.join("+")
    }
}

fn ctrl(key: Key) -> Hotkey {
    Hotkey::new(key, false, true, false, false)
}

fn ctrl_shift(key: Key) -> Hotkey {
    Hotkey::new(key, true, true, false, false)
}

fn ctrl_alt(key: Key) -> Hotkey {
    Hotkey::new(key, false, true, false, true)
}

fn alt_shift(key: Key) -> Hotkey {
    Hotkey::new(key, true, false, false, true)
}

// ──────────────────────────────────────────────
// Keymap
// ──────────────────────────────────────────────

/// Ordered hotkey table. The first binding that matches wins.
#[derive(Debug, Clone)]
pub struct Keymap {
    pub bindings: Vec<(Hotkey, Command)>,
}

impl Keymap {
    pub fn new() -> Self {
        Self {
            bindings: Self::default_bindings(),
        }
    }

    pub fn default_bindings() -> Vec<(Hotkey, Command)> {
        let mut bindings = vec![
            (ctrl_shift(Key::Char('t')), Command::AddTile),
            (ctrl(Key::Char('t')), Command::NewItem),
            (ctrl(Key::Char('w')), Command::RemoveCurrentItem),
            (ctrl(Key::Tab), Command::NextItem),
            (ctrl_shift(Key::Tab), Command::PrevItem),
            (alt_shift(Key::Left), Command::MoveFocus(-1)),
            (alt_shift(Key::Right), Command::MoveFocus(1)),
            (ctrl_alt(Key::Left), Command::MoveFocus(-1)),
            (ctrl_alt(Key::Right), Command::MoveFocus(1)),
            (ctrl_alt(Key::Up), Command::ResizeActive(1)),
            (ctrl_alt(Key::Down), Command::ResizeActive(-1)),
            (ctrl_shift(Key::Left), Command::MoveTile(Direction::Left)),
            (ctrl_shift(Key::Right), Command::MoveTile(Direction::Right)),
            (ctrl_shift(Key::Up), Command::MoveTile(Direction::Up)),
            (ctrl_shift(Key::Down), Command::MoveTile(Direction::Down)),
            (ctrl_shift(Key::Char('h')), Command::SetTilingMode(TilingMode::Horizontal)),
            (ctrl_shift(Key::Char('v')), Command::SetTilingMode(TilingMode::Vertical)),
            (ctrl_shift(Key::Char('b')), Command::SetTilingMode(TilingMode::Bsp)),
            (ctrl(Key::Char('s')), Command::Save),
            (ctrl(Key::Char('q')), Command::Quit),
        ];
        for (id, digit) in (1..=4).zip(['1', '2', '3', '4']) {
            bindings.push((ctrl(Key::Char(digit)), Command::SwitchWorkspace(id)));
            bindings.push((ctrl_alt(Key::Char(digit)), Command::MoveTileToWorkspace(id)));
        }
        bindings
    }

    /// Defaults with `overrides` applied. Overrides replace every default
    /// binding of the commands they name, and steal their hotkeys from any
    /// other command that had them. A command may be overridden with several
    /// hotkeys.
    pub fn with_overrides(overrides: Vec<(Hotkey, Command)>) -> Self {
        let mut map = Self::new();
        map.bindings
            .retain(|(h, c)| !overrides.iter().any(|(oh, oc)| oc == c || oh == h));
        map.bindings.extend(overrides);
        map
    }

    /// Match a key + modifiers against the table.
    pub fn match_hotkey(&self, key: Key, modifiers: Modifiers) -> Option<Command> {
        self.bindings
            .iter()
            .find(|(hotkey, _)| hotkey.matches(key, modifiers))
            .map(|(_, command)| command.clone())
    }

    pub fn hotkey_for(&self, command: &Command) -> Option<&Hotkey> {
        self.bindings
            .iter()
            .find(|(_, c)| c == command)
            .map(|(hotkey, _)| hotkey)
    }
}

impl Default for Keymap {
    fn default() -> Self {
        Self::new()
    }
}

mod tests;
