/// Previous/Next availability for the list footer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageControls {
    pub page: u32,
    pub pages: u32,
}

impl PageControls {
    pub fn new(page: u32, pages: u32) -> Self {
        Self { page: page.max(1), pages }
    }

    /// Controls are hidden for a single page (or none).
    pub fn is_visible(&self) -> bool {
        self.pages > 1
    }

    pub fn previous_enabled(&self) -> bool {
        self.page > 1
    }

    pub fn next_enabled(&self) -> bool {
        self.page < self.pages
    }

    pub fn previous(&self) -> Option<u32> {
        self.previous_enabled().then(|| self.page - 1)
    }

    pub fn next(&self) -> Option<u32> {
        self.next_enabled().then(|| self.page + 1)
    }

    /// Clamps `page` into `1..=pages` (or to 1 when there are no pages).
    pub fn clamp(&self, page: u32) -> u32 {
        page.clamp(1, self.pages.max(1))
    }
}
