// Item pane: the in-memory tab strip hosted by every tile.

use tyle_core::ContentPane;

/// An ordered list of addresses with one of them current.
#[derive(Debug, Clone, Default)]
pub struct ItemPane {
    items: Vec<String>,
    current: usize,
}

impl ItemPane {
    pub fn current(&self) -> Option<&str> {
        self.items.get(self.current).map(String::as_str)
    }

    /// Advance the current item by `step`, wrapping. No-op when empty.
    pub fn cycle(&mut self, step: isize) {
        if self.items.is_empty() {
            return;
        }
        let len = self.items.len() as isize;
        self.current = (self.current as isize + step).rem_euclid(len) as usize;
    }

    /// Short label for a tab: the host of a URL, or the text itself.
    pub fn title(&self, index: usize) -> Option<String> {
        let item = self.items.get(index)?;
        let rest = item.split_once("://").map_or(item.as_str(), |(_, rest)| rest);
        let host = rest.split(['/', '?', '#']).next().unwrap_or(rest);
        if host.is_empty() {
            Some("New Tab".to_string())
        } else {
            Some(host.to_string())
        }
    }
}

impl ContentPane for ItemPane {
    fn create(items: &[String]) -> Self {
        Self {
            items: items.to_vec(),
            current: items.len().saturating_sub(1),
        }
    }

    fn item_count(&self) -> usize {
        self.items.len()
    }

    fn current_index(&self) -> Option<usize> {
        (!self.items.is_empty()).then_some(self.current)
    }

    fn close_item(&mut self, index: usize) {
        if index >= self.items.len() {
            return;
        }
        self.items.remove(index);
        if index < self.current || self.current >= self.items.len() {
            self.current = self.current.saturating_sub(1);
        }
    }

    fn items(&self) -> Vec<String> {
        self.items.clone()
    }

    fn open_item(&mut self, item: &str) {
        self.items.push(item.to_string());
        self.current = self.items.len() - 1;
    }

    fn select_item(&mut self, index: usize) {
        if index < self.items.len() {
            self.current = index;
        }
    }

    fn replace_current(&mut self, item: &str) {
        match self.items.get_mut(self.current) {
            Some(slot) => *slot = item.to_string(),
            None => self.open_item(item),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pane(items: &[&str]) -> ItemPane {
        let items: Vec<String> = items.iter().map(|s| s.to_string()).collect();
        ItemPane::create(&items)
    }

    #[test]
    fn last_item_is_current_after_create() {
        let p = pane(&["a", "b", "c"]);
        assert_eq!(p.current_index(), Some(2));
        assert_eq!(p.current(), Some("c"));
    }

    #[test]
    fn closing_before_current_keeps_current_item() {
        let mut p = pane(&["a", "b", "c"]);
        p.select_item(1);
        p.close_item(0);
        assert_eq!(p.current(), Some("b"));
    }

    #[test]
    fn closing_current_last_item_moves_back() {
        let mut p = pane(&["a", "b"]);
        p.close_item(1);
        assert_eq!(p.current(), Some("a"));
        p.close_item(0);
        assert_eq!(p.current_index(), None);
        assert_eq!(p.item_count(), 0);
    }

    #[test]
    fn close_out_of_range_is_ignored() {
        let mut p = pane(&["a"]);
        p.close_item(3);
        assert_eq!(p.item_count(), 1);
    }

    #[test]
    fn cycle_wraps() {
        let mut p = pane(&["a", "b", "c"]);
        p.cycle(1);
        assert_eq!(p.current(), Some("a"));
        p.cycle(-1);
        assert_eq!(p.current(), Some("c"));
    }

    #[test]
    fn replace_current_on_empty_pane_opens_item() {
        let mut p = ItemPane::default();
        p.replace_current("https://example.com");
        assert_eq!(p.items(), vec!["https://example.com".to_string()]);
        p.replace_current("https://rust-lang.org");
        assert_eq!(p.item_count(), 1);
        assert_eq!(p.current(), Some("https://rust-lang.org"));
    }

    #[test]
    fn title_is_host() {
        let p = pane(&["https://www.example.com/path?q=1", "about:blank", "https://"]);
        assert_eq!(p.title(0).as_deref(), Some("www.example.com"));
        assert_eq!(p.title(1).as_deref(), Some("about:blank"));
        assert_eq!(p.title(2).as_deref(), Some("New Tab"));
        assert_eq!(p.title(9), None);
    }
}
