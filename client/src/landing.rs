//! Landing page scroll effects: the auto-hiding navbar and the
//! reveal-on-scroll sections. Both are plain per-event state machines; the
//! page glue feeds them scroll offsets and intersection ratios.

use std::collections::HashSet;

/// Scroll depth below which the navbar never hides.
pub const HIDE_THRESHOLD: f64 = 90.0;

/// Fraction of an element that must be visible before it reveals.
pub const REVEAL_RATIO: f64 = 0.15;

/// Bottom viewport margin shrink applied when observing reveal targets.
pub const REVEAL_BOTTOM_MARGIN: f64 = 0.10;

/// Hides the navbar while scrolling down past [`HIDE_THRESHOLD`], shows it
/// again on any upward scroll.
#[derive(Debug, Default)]
pub struct NavbarAutoHide {
    previous_offset: f64,
    hidden: bool,
}

impl NavbarAutoHide {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle one scroll event; returns whether the navbar is now hidden.
    /// The previous offset updates unconditionally.
    pub fn on_scroll(&mut self, offset: f64) -> bool {
        self.hidden = offset > self.previous_offset && offset > HIDE_THRESHOLD;
        self.previous_offset = offset;
        self.hidden
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }
}

/// Fire-once visibility reveals: each observed element gains its visible
/// state the first time it intersects enough, then stops being watched.
#[derive(Debug, Default)]
pub struct RevealOnScroll {
    observed: HashSet<String>,
    revealed: HashSet<String>,
}

impl RevealOnScroll {
    /// Start observing the given targets. An empty list is a no-op
    /// controller that never reveals anything.
    pub fn new<I, S>(targets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            observed: targets.into_iter().map(Into::into).collect(),
            revealed: HashSet::new(),
        }
    }

    /// Handle one intersection notification. Returns `true` only when this
    /// event reveals the element, which also unobserves it.
    pub fn on_intersection(&mut self, target: &str, visible_ratio: f64) -> bool {
        if visible_ratio < REVEAL_RATIO {
            return false;
        }
        if self.observed.remove(target) {
            self.revealed.insert(target.to_string());
            return true;
        }
        false
    }

    pub fn is_revealed(&self, target: &str) -> bool {
        self.revealed.contains(target)
    }

    pub fn is_observing(&self, target: &str) -> bool {
        self.observed.contains(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navbar_stays_visible_scrolling_up() {
        let mut navbar = NavbarAutoHide::new();
        navbar.on_scroll(500.0);

        // Upward scroll while deep in the page: never hidden.
        assert!(!navbar.on_scroll(400.0));
        assert!(!navbar.on_scroll(400.0));
    }

    #[test]
    fn test_navbar_hides_past_threshold() {
        let mut navbar = NavbarAutoHide::new();

        // Scrolling down but still above the fold: visible.
        assert!(!navbar.on_scroll(50.0));
        // Crossing the threshold downward: hidden.
        assert!(navbar.on_scroll(120.0));
        // Coming back up: visible again.
        assert!(!navbar.on_scroll(100.0));
        // Down again past the threshold: hidden again.
        assert!(navbar.on_scroll(150.0));
    }

    #[test]
    fn test_navbar_previous_offset_always_updates() {
        let mut navbar = NavbarAutoHide::new();
        navbar.on_scroll(200.0);
        navbar.on_scroll(80.0);
        // 80 -> 95 is downward past the threshold, so the 80 must have been
        // recorded even though that event changed nothing visually.
        assert!(navbar.on_scroll(95.0));
    }

    #[test]
    fn test_reveal_fires_once() {
        let mut reveal = RevealOnScroll::new(["hero", "features"]);

        assert!(!reveal.on_intersection("hero", 0.05));
        assert!(!reveal.is_revealed("hero"));

        assert!(reveal.on_intersection("hero", 0.2));
        assert!(reveal.is_revealed("hero"));
        assert!(!reveal.is_observing("hero"));

        // Scrolling away and back never re-fires.
        assert!(!reveal.on_intersection("hero", 0.9));
        assert!(reveal.is_revealed("hero"));

        assert!(reveal.on_intersection("features", REVEAL_RATIO));
    }

    #[test]
    fn test_unknown_targets_are_ignored() {
        let mut reveal = RevealOnScroll::new(Vec::<String>::new());
        assert!(!reveal.on_intersection("hero", 1.0));
        assert!(!reveal.is_revealed("hero"));
    }
}
