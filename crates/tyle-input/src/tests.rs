#[cfg(test)]
mod tests {
    use crate::{Command, Hotkey, Keymap};
    use tyle_core::{Direction, Key, Modifiers, TilingMode};

    fn ctrl() -> Modifiers {
        Modifiers {
            ctrl: true,
            ..Default::default()
        }
    }

    fn ctrl_shift() -> Modifiers {
        Modifiers {
            ctrl: true,
            shift: true,
            ..Default::default()
        }
    }

    fn ctrl_alt() -> Modifiers {
        Modifiers {
            ctrl: true,
            alt: true,
            ..Default::default()
        }
    }

    fn alt_shift() -> Modifiers {
        Modifiers {
            alt: true,
            shift: true,
            ..Default::default()
        }
    }

    // ── Default hotkey table ────────────────────

    #[test]
    fn ctrl_shift_t_adds_tile_and_ctrl_t_opens_item() {
        let map = Keymap::new();
        assert_eq!(map.match_hotkey(Key::Char('T'), ctrl_shift()), Some(Command::AddTile));
        assert_eq!(map.match_hotkey(Key::Char('t'), ctrl()), Some(Command::NewItem));
    }

    #[test]
    fn ctrl_w_closes_current_item() {
        let map = Keymap::new();
        assert_eq!(map.match_hotkey(Key::Char('w'), ctrl()), Some(Command::RemoveCurrentItem));
    }

    #[test]
    fn ctrl_tab_cycles_items() {
        let map = Keymap::new();
        assert_eq!(map.match_hotkey(Key::Tab, ctrl()), Some(Command::NextItem));
        assert_eq!(map.match_hotkey(Key::Tab, ctrl_shift()), Some(Command::PrevItem));
    }

    #[test]
    fn focus_bindings_cycle_both_ways() {
        let map = Keymap::new();
        assert_eq!(map.match_hotkey(Key::Left, alt_shift()), Some(Command::MoveFocus(-1)));
        assert_eq!(map.match_hotkey(Key::Right, alt_shift()), Some(Command::MoveFocus(1)));
        assert_eq!(map.match_hotkey(Key::Left, ctrl_alt()), Some(Command::MoveFocus(-1)));
        assert_eq!(map.match_hotkey(Key::Right, ctrl_alt()), Some(Command::MoveFocus(1)));
    }

    #[test]
    fn ctrl_alt_vertical_arrows_resize() {
        let map = Keymap::new();
        assert_eq!(map.match_hotkey(Key::Up, ctrl_alt()), Some(Command::ResizeActive(1)));
        assert_eq!(map.match_hotkey(Key::Down, ctrl_alt()), Some(Command::ResizeActive(-1)));
    }

    #[test]
    fn ctrl_shift_arrows_move_tile() {
        let map = Keymap::new();
        for (key, dir) in [
            (Key::Left, Direction::Left),
            (Key::Right, Direction::Right),
            (Key::Up, Direction::Up),
            (Key::Down, Direction::Down),
        ] {
            assert_eq!(map.match_hotkey(key, ctrl_shift()), Some(Command::MoveTile(dir)));
        }
    }

    #[test]
    fn ctrl_shift_letters_pick_tiling_mode() {
        let map = Keymap::new();
        assert_eq!(
            map.match_hotkey(Key::Char('h'), ctrl_shift()),
            Some(Command::SetTilingMode(TilingMode::Horizontal))
        );
        assert_eq!(
            map.match_hotkey(Key::Char('V'), ctrl_shift()),
            Some(Command::SetTilingMode(TilingMode::Vertical))
        );
        assert_eq!(
            map.match_hotkey(Key::Char('b'), ctrl_shift()),
            Some(Command::SetTilingMode(TilingMode::Bsp))
        );
    }

    #[test]
    fn digits_switch_and_send_to_workspace() {
        let map = Keymap::new();
        assert_eq!(map.match_hotkey(Key::Char('3'), ctrl()), Some(Command::SwitchWorkspace(3)));
        assert_eq!(map.match_hotkey(Key::Char('2'), ctrl_alt()), Some(Command::MoveTileToWorkspace(2)));
        assert_eq!(map.match_hotkey(Key::Char('5'), ctrl()), None);
    }

    #[test]
    fn modifiers_must_match_exactly() {
        let map = Keymap::new();
        assert_eq!(map.match_hotkey(Key::Char('t'), Modifiers::default()), None);
        let extra = Modifiers {
            meta: true,
            ..ctrl_shift()
        };
        assert_eq!(map.match_hotkey(Key::Char('t'), extra), None);
    }

    // ── Overrides ───────────────────────────────

    #[test]
    fn override_replaces_default_binding() {
        let hotkey = Hotkey::new(Key::Char('n'), false, true, false, false);
        let map = Keymap::with_overrides(vec![(hotkey.clone(), Command::AddTile)]);

        assert_eq!(map.match_hotkey(Key::Char('n'), ctrl()), Some(Command::AddTile));
        assert_eq!(map.match_hotkey(Key::Char('t'), ctrl_shift()), None);
        assert_eq!(map.hotkey_for(&Command::AddTile), Some(&hotkey));
    }

    #[test]
    fn override_steals_hotkey_from_other_command() {
        let hotkey = Hotkey::new(Key::Char('w'), false, true, false, false);
        let map = Keymap::with_overrides(vec![(hotkey, Command::Quit)]);

        assert_eq!(map.match_hotkey(Key::Char('w'), ctrl()), Some(Command::Quit));
        assert_eq!(map.hotkey_for(&Command::RemoveCurrentItem), None);
    }

    #[test]
    fn command_can_be_overridden_with_two_hotkeys() {
        let a = Hotkey::new(Key::Char('j'), false, false, true, false);
        let b = Hotkey::new(Key::Char('k'), false, false, true, false);
        let map = Keymap::with_overrides(vec![
            (a.clone(), Command::MoveFocus(1)),
            (b.clone(), Command::MoveFocus(1)),
        ]);
        assert_eq!(map.match_hotkey(a.key, a.modifiers()), Some(Command::MoveFocus(1)));
        assert_eq!(map.match_hotkey(b.key, b.modifiers()), Some(Command::MoveFocus(1)));
        assert_eq!(map.match_hotkey(Key::Right, alt_shift()), None);
        assert_eq!(map.match_hotkey(Key::Left, alt_shift()), Some(Command::MoveFocus(-1)));
    }

    #[test]
    fn key_names_round_trip() {
        for (hotkey, _) in Keymap::default_bindings() {
            assert_eq!(Hotkey::key_from_name(&hotkey.key_name()), Some(hotkey.key));
        }
        assert_eq!(Hotkey::key_from_name("Esc"), Some(Key::Escape));
        assert_eq!(Hotkey::key_from_name("PageUp"), None);
    }

    #[test]
    fn hotkey_display() {
        let hotkey = Hotkey::new(Key::Char('t'), true, true, false, false);
        assert_eq!(hotkey.display(), "Ctrl+Shift+T");
        let hotkey = Hotkey::new(Key::Left, false, true, false, true);
        assert_eq!(hotkey.display(), "Ctrl+Alt+Left");
    }

    #[test]
    fn hotkey_parse_reads_display_form() {
        for (hotkey, _) in Keymap::default_bindings() {
            assert_eq!(Hotkey::parse(&hotkey.display()), Some(hotkey));
        }
    }

    #[test]
    fn hotkey_parse_is_lenient_about_modifier_spelling() {
        let hotkey = Hotkey::parse("shift + CMD + b").unwrap();
        assert_eq!(hotkey.key, Key::Char('b'));
        assert!(hotkey.shift && hotkey.meta && !hotkey.ctrl && !hotkey.alt);
        assert_eq!(Hotkey::parse("Hyper+B"), None);
        assert_eq!(Hotkey::parse("Ctrl+"), None);
    }

    #[test]
    fn parsed_chord_drives_keymap() {
        let map = Keymap::new();
        let hotkey = Hotkey::parse("Ctrl+Alt+Up").unwrap();
        assert_eq!(map.match_hotkey(hotkey.key, hotkey.modifiers()), Some(Command::ResizeActive(1)));
    }

    // ── Action keys ─────────────────────────────

    #[test]
    fn every_bindable_action_has_a_key() {
        for action in Command::all_actions() {
            let key = action.action_key().expect("bindable action without key");
            assert_eq!(Command::from_action_key(&key), Some(action));
        }
    }

    #[test]
    fn data_carrying_commands_have_no_key() {
        assert_eq!(Command::Open("x".into()).action_key(), None);
        assert_eq!(Command::MoveFocus(3).action_key(), None);
        assert_eq!(Command::from_action_key("teleport"), None);
        assert_eq!(Command::from_action_key("move_sideways"), None);
    }

    // ── Typed command lines ─────────────────────

    #[test]
    fn parse_simple_verbs() {
        assert_eq!(Command::parse("tile"), Some(Command::AddTile));
        assert_eq!(Command::parse("  close  "), Some(Command::RemoveCurrentItem));
        assert_eq!(Command::parse("SHOW"), Some(Command::Show));
        assert_eq!(Command::parse("exit"), Some(Command::Quit));
    }

    #[test]
    fn parse_arguments() {
        assert_eq!(Command::parse("focus"), Some(Command::MoveFocus(1)));
        assert_eq!(Command::parse("focus -2"), Some(Command::MoveFocus(-2)));
        assert_eq!(Command::parse("resize +3"), Some(Command::ResizeActive(3)));
        assert_eq!(Command::parse("move Up"), Some(Command::MoveTile(Direction::Up)));
        assert_eq!(Command::parse("mode bsp"), Some(Command::SetTilingMode(TilingMode::Bsp)));
        assert_eq!(Command::parse("workspace 2"), Some(Command::SwitchWorkspace(2)));
        assert_eq!(Command::parse("send 4"), Some(Command::MoveTileToWorkspace(4)));
        assert_eq!(
            Command::parse("open rust lang book"),
            Some(Command::Open("rust lang book".to_string()))
        );
        assert_eq!(Command::parse("click 300 40"), Some(Command::Click { x: 300, y: 40 }));
    }

    #[test]
    fn parse_rejects_garbage() {
        assert_eq!(Command::parse(""), None);
        assert_eq!(Command::parse("open"), None);
        assert_eq!(Command::parse("mode diagonal"), None);
        assert_eq!(Command::parse("move"), None);
        assert_eq!(Command::parse("workspace two"), None);
        assert_eq!(Command::parse("click 300"), None);
        assert_eq!(Command::parse("dance"), None);
    }
}
