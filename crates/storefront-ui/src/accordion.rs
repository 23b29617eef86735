//! FAQ and footer accordions. At most one section is open at a time.

/// A set of sections where opening one closes the others.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Accordion {
    len: usize,
    open: Option<usize>,
}

impl Accordion {
    pub fn new(len: usize) -> Self {
        Self { len, open: None }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn open_index(&self) -> Option<usize> {
        self.open
    }

    pub fn is_open(&self, index: usize) -> bool {
        self.open == Some(index)
    }

    /// Header clicked. Out-of-range indices are ignored.
    pub fn toggle(&mut self, index: usize) {
        if index >= self.len {
            return;
        }
        self.open = if self.open == Some(index) {
            None
        } else {
            Some(index)
        };
    }

    pub fn close_all(&mut self) {
        self.open = None;
    }
}

/// The footer link columns: an accordion only on narrow screens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterColumns {
    columns: Accordion,
    desktop_breakpoint: u32,
    width: u32,
}

impl FooterColumns {
    pub fn new(len: usize, desktop_breakpoint: u32, width: u32) -> Self {
        let mut footer = Self {
            columns: Accordion::new(len),
            desktop_breakpoint,
            width,
        };
        footer.resize(width);
        footer
    }

    fn is_narrow(&self) -> bool {
        self.width <= self.desktop_breakpoint
    }

    /// Header clicked; ignored on wide screens.
    pub fn toggle(&mut self, index: usize) {
        if self.is_narrow() {
            self.columns.toggle(index);
        }
    }

    /// Wide screens show every column and none is active.
    pub fn resize(&mut self, width: u32) {
        self.width = width;
        if !self.is_narrow() {
            self.columns.close_all();
        }
    }

    /// Whether a column's links are shown.
    pub fn is_expanded(&self, index: usize) -> bool {
        index < self.columns.len() && (!self.is_narrow() || self.columns.is_open(index))
    }

    /// Whether a column carries the `active` class.
    pub fn is_active(&self, index: usize) -> bool {
        self.columns.is_open(index)
    }
}
