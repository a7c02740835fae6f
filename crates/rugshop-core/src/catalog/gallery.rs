//! Product detail gallery navigation.

/// Minimum horizontal travel, in CSS pixels, for a swipe to count.
pub const SWIPE_THRESHOLD: f64 = 50.0;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gallery {
    images: Vec<String>,
    active: usize,
}

impl Gallery {
    pub fn new(images: Vec<String>) -> Self {
        Self { images, active: 0 }
    }

    pub fn images(&self) -> &[String] {
        &self.images
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn active_image(&self) -> Option<&str> {
        self.images.get(self.active).map(String::as_str)
    }

    /// Wraps from the last image to the first.
    pub fn next(&mut self) {
        if !self.images.is_empty() {
            self.active = (self.active + 1) % self.images.len();
        }
    }

    /// Wraps from the first image to the last.
    pub fn prev(&mut self) {
        if !self.images.is_empty() {
            self.active = self.active.checked_sub(1).unwrap_or(self.images.len() - 1);
        }
    }

    /// Thumbnail click. Out-of-range indices are ignored.
    pub fn select(&mut self, index: usize) {
        if index < self.images.len() {
            self.active = index;
        }
    }

    /// Apply a touch gesture from `start_x` to `end_x`. Swiping left shows
    /// the next image, swiping right the previous one.
    pub fn swipe(&mut self, start_x: f64, end_x: f64) {
        let travel = start_x - end_x;
        if travel > SWIPE_THRESHOLD {
            self.next();
        } else if travel < -SWIPE_THRESHOLD {
            self.prev();
        }
    }
}
