//! Tab state management
//!
//! This module provides testable tab bookkeeping without any surface or
//! window dependencies. Tab state tracks the ordered list of tabs, their
//! labels, and the active tab.

/// Unique identifier for a tab
pub type TabId = u64;

/// Metadata about a single tab
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabInfo {
    /// Unique identifier for this tab
    pub id: TabId,
    /// Label shown in the tab strip
    pub title: String,
}

impl TabInfo {
    pub fn new(id: TabId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
        }
    }
}

/// Manages tab list and active tab selection
#[derive(Debug, Clone)]
pub struct TabState {
    /// List of all tabs, in strip order
    tabs: Vec<TabInfo>,
    /// Index of the currently active tab
    active_index: usize,
    /// Next ID to assign to a new tab
    next_id: TabId,
}

impl Default for TabState {
    fn default() -> Self {
        Self::new()
    }
}

impl TabState {
    /// Create a new empty tab state
    pub fn new() -> Self {
        Self {
            tabs: Vec::new(),
            active_index: 0,
            next_id: 1,
        }
    }

    /// Label for the next tab: "Tab N" with N = current count + 1
    ///
    /// Labels are fixed at creation and never renumbered, so two open tabs
    /// can share a label after a close.
    pub fn next_title(&self) -> String {
        format!("Tab {}", self.tabs.len() + 1)
    }

    /// Add a new tab with the given title and return its ID
    ///
    /// The tab is added to the end of the list but is not automatically activated.
    pub fn add_tab(&mut self, title: impl Into<String>) -> TabId {
        let id = self.next_id;
        self.next_id += 1;
        self.tabs.push(TabInfo::new(id, title));
        id
    }

    /// Add a tab and make it the active tab
    pub fn add_tab_and_activate(&mut self, title: impl Into<String>) -> TabId {
        let id = self.add_tab(title);
        self.switch_to(id);
        id
    }

    /// Close a tab by ID
    ///
    /// Returns the closed tab info if found. If the closed tab was active,
    /// the tab that slides into its slot becomes active (or the new last
    /// tab when the closed one was last).
    pub fn close_tab(&mut self, id: TabId) -> Option<TabInfo> {
        let index = self.tabs.iter().position(|t| t.id == id)?;
        let tab = self.tabs.remove(index);

        if self.tabs.is_empty() {
            self.active_index = 0;
        } else if index < self.active_index {
            self.active_index -= 1;
        } else if index == self.active_index && self.active_index >= self.tabs.len() {
            self.active_index = self.tabs.len() - 1;
        }

        Some(tab)
    }

    /// Close the currently active tab
    pub fn close_active(&mut self) -> Option<TabInfo> {
        let id = self.active_id()?;
        self.close_tab(id)
    }

    /// Switch to a tab by ID
    pub fn switch_to(&mut self, id: TabId) -> bool {
        match self.index_of(id) {
            Some(index) => {
                self.active_index = index;
                true
            }
            None => false,
        }
    }

    /// Switch to a tab by index
    pub fn switch_to_index(&mut self, index: usize) -> bool {
        if index < self.tabs.len() {
            self.active_index = index;
            true
        } else {
            false
        }
    }

    /// Switch to the next tab (wraps around)
    pub fn next_tab(&mut self) {
        if !self.tabs.is_empty() {
            self.active_index = (self.active_index + 1) % self.tabs.len();
        }
    }

    /// Switch to the previous tab (wraps around)
    pub fn previous_tab(&mut self) {
        if !self.tabs.is_empty() {
            self.active_index = if self.active_index == 0 {
                self.tabs.len() - 1
            } else {
                self.active_index - 1
            };
        }
    }

    pub fn active(&self) -> Option<&TabInfo> {
        self.tabs.get(self.active_index)
    }

    pub fn active_id(&self) -> Option<TabId> {
        self.active().map(|t| t.id)
    }

    pub fn active_index(&self) -> usize {
        self.active_index
    }

    pub fn tabs(&self) -> &[TabInfo] {
        &self.tabs
    }

    pub fn index_of(&self, id: TabId) -> Option<usize> {
        self.tabs.iter().position(|t| t.id == id)
    }

    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }
}
