// page.rs - Menu selection synced to carousel slides
//
// Page state that used to live in globals: which menu item is active and
// which slide it maps to.

/// Carousel transition time when jumping to a slide.
pub const SLIDE_SPEED_MS: u32 = 1000;

const SLIDES: &[(&str, usize)] = &[
    ("senatic", 0),
    ("TalentoTech", 1),
    ("AvanzaTec", 2),
    ("Gobiernodigital", 3),
    ("Yawa", 4),
];

/// Slide for a menu value; unknown values fall back to the first slide.
pub fn slide_index(value: &str) -> usize {
    SLIDES
        .iter()
        .find(|(name, _)| *name == value)
        .map_or(0, |&(_, idx)| idx)
}

pub struct PageState {
    items: Vec<String>,
    active: Option<usize>,
}

impl PageState {
    pub fn new<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            items: items.into_iter().map(Into::into).collect(),
            active: None,
        }
    }

    /// Activate a menu item (deactivating every other one) and return the
    /// slide to navigate to. Values not in the menu still map to a slide
    /// but leave no item active.
    pub fn select(&mut self, value: &str) -> usize {
        self.active = self.items.iter().position(|v| v == value);
        let slide = slide_index(value);
        log::debug!("menu {value:?} -> slide {slide}");
        slide
    }

    pub fn active(&self) -> Option<&str> {
        self.active.map(|i| self.items[i].as_str())
    }

    pub fn is_active(&self, value: &str) -> bool {
        self.active() == Some(value)
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }
}

impl Default for PageState {
    fn default() -> Self {
        Self::new(SLIDES.iter().map(|(name, _)| *name))
    }
}
