//! Product carousels: paging, dots, swipes and auto-slide.

use std::time::Duration;

use crate::config::{CarouselConfig, LayoutConfig, StorefrontConfig};
use crate::timing::{Interval, Timer};

/// Which carousel on the home page, for picking its auto-slide interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarouselKind {
    Featured,
    MostSelling,
    Other,
}

/// How the track moved to its current position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Smooth,
    Instant,
}

/// Sizes measured from the page, in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackGeometry {
    pub item_width: f64,
    pub item_margin: f64,
    pub track_width: f64,
    pub container_width: f64,
}

/// Breakpoints, swipe threshold and timing for one carousel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarouselSettings {
    pub tablet_breakpoint: u32,
    pub desktop_breakpoint: u32,
    pub min_swipe_distance: u32,
    pub interval: Duration,
    pub resize_debounce: Duration,
}

impl CarouselSettings {
    pub fn from_config(config: &StorefrontConfig, kind: CarouselKind) -> Self {
        Self::new(&config.layout, &config.carousel, kind)
    }

    pub fn new(layout: &LayoutConfig, carousel: &CarouselConfig, kind: CarouselKind) -> Self {
        let interval_ms = match kind {
            CarouselKind::Featured => carousel.featured_interval_ms,
            CarouselKind::MostSelling => carousel.most_selling_interval_ms,
            CarouselKind::Other => carousel.default_interval_ms,
        };
        Self {
            tablet_breakpoint: layout.tablet_breakpoint,
            desktop_breakpoint: layout.desktop_breakpoint,
            min_swipe_distance: carousel.min_swipe_distance,
            interval: Duration::from_millis(interval_ms),
            resize_debounce: layout.debounce(),
        }
    }

    /// Items visible at once for a viewport width.
    pub fn items_per_view(&self, width: u32) -> usize {
        if width <= self.tablet_breakpoint {
            1
        } else if width <= self.desktop_breakpoint {
            2
        } else {
            4
        }
    }
}

impl Default for CarouselSettings {
    fn default() -> Self {
        Self::new(&LayoutConfig::default(), &CarouselConfig::default(), CarouselKind::Other)
    }
}

/// One carousel's position and timers.
#[derive(Debug, Clone)]
pub struct Carousel {
    settings: CarouselSettings,
    item_count: usize,
    per_view: usize,
    index: usize,
    transition: Transition,
    auto: Interval,
    resize: Timer,
    pending_width: Option<u32>,
}

impl Carousel {
    pub fn new(item_count: usize, viewport_width: u32, settings: CarouselSettings) -> Self {
        let per_view = settings.items_per_view(viewport_width);
        Self {
            auto: Interval::new(settings.interval),
            resize: Timer::new(settings.resize_debounce),
            settings,
            item_count,
            per_view,
            index: 0,
            transition: Transition::Instant,
            pending_width: None,
        }
    }

    /// A carousel with no items is never shown.
    pub fn is_hidden(&self) -> bool {
        self.item_count == 0
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn items_per_view(&self) -> usize {
        self.per_view
    }

    pub fn transition(&self) -> Transition {
        self.transition
    }

    /// Last index that still fills the view.
    pub fn max_index(&self) -> usize {
        self.item_count.saturating_sub(self.per_view)
    }

    /// Jump to an index. Before the start wraps to the end, past the end
    /// wraps to the start.
    pub fn move_to(&mut self, index: i64) {
        self.slide(index, Transition::Smooth);
        self.auto.reset();
    }

    pub fn next(&mut self) {
        self.move_to(self.index as i64 + self.per_view as i64);
    }

    pub fn prev(&mut self) {
        self.move_to(self.index as i64 - self.per_view as i64);
    }

    /// A finished touch. Returns whether it moved the carousel.
    pub fn swipe(&mut self, start_x: f64, end_x: f64) -> bool {
        let distance = end_x - start_x;
        let min = f64::from(self.settings.min_swipe_distance);
        if distance > min {
            self.prev();
            true
        } else if distance < -min {
            self.next();
            true
        } else {
            false
        }
    }

    /// Start index of every dot.
    pub fn dots(&self) -> Vec<usize> {
        if self.is_hidden() {
            return Vec::new();
        }
        let count = self.item_count.div_ceil(self.per_view);
        (0..count).map(|i| i * self.per_view).collect()
    }

    /// The last dot whose page starts at or before the current index.
    pub fn active_dot(&self) -> Option<usize> {
        self.dots().iter().rposition(|&start| start <= self.index)
    }

    pub fn click_dot(&mut self, dot: usize) {
        if let Some(start) = self.dots().get(dot).copied() {
            self.move_to(start as i64);
        }
    }

    pub fn render_dots(&self) -> String {
        let active = self.active_dot();
        self.dots()
            .iter()
            .enumerate()
            .map(|(i, start)| {
                let class = if Some(i) == active { "dot active" } else { "dot" };
                format!(r#"<span class="{}" data-slide-index="{}"></span>"#, class, start)
            })
            .collect()
    }

    /// Horizontal track offset for the current index, clamped so the last
    /// item never scrolls past the container edge.
    pub fn translation(&self, geometry: &TrackGeometry) -> f64 {
        let step = geometry.item_width + geometry.item_margin;
        let translation = -(self.index as f64) * step;
        let max_translation = (geometry.track_width - geometry.container_width).max(0.0);
        translation.max(-max_translation)
    }

    /// Viewport resized. Applied once the resize debounce runs out.
    pub fn resize(&mut self, width: u32) {
        self.pending_width = Some(width);
        self.resize.restart();
    }

    /// Let time pass: applies pending resizes and runs auto-slide.
    pub fn advance(&mut self, elapsed: Duration) {
        if self.resize.advance(elapsed) {
            if let Some(width) = self.pending_width.take() {
                self.apply_width(width);
            }
        }
        if self.is_hidden() {
            return;
        }
        for _ in 0..self.auto.advance(elapsed) {
            self.auto_step();
        }
    }

    fn auto_step(&mut self) {
        let target = if self.index >= self.max_index() {
            0
        } else {
            self.index as i64 + self.per_view as i64
        };
        self.slide(target, Transition::Smooth);
    }

    fn apply_width(&mut self, width: u32) {
        let per_view = self.settings.items_per_view(width);
        if per_view != self.per_view {
            tracing::trace!(per_view, width, "carousel items per view changed");
        }
        self.per_view = per_view;
        self.slide(self.index as i64, Transition::Instant);
    }

    fn slide(&mut self, index: i64, transition: Transition) {
        let max = self.max_index();
        self.index = if index < 0 {
            max
        } else if index as usize > max {
            0
        } else {
            index as usize
        };
        self.transition = transition;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn desktop(items: usize) -> Carousel {
        Carousel::new(items, 1280, CarouselSettings::default())
    }

    #[test]
    fn test_items_per_view() {
        let settings = CarouselSettings::default();
        assert_eq!(settings.items_per_view(375), 1);
        assert_eq!(settings.items_per_view(768), 1);
        assert_eq!(settings.items_per_view(769), 2);
        assert_eq!(settings.items_per_view(1024), 2);
        assert_eq!(settings.items_per_view(1025), 4);
    }

    #[test]
    fn test_intervals_by_kind() {
        let config = StorefrontConfig::default();
        assert_eq!(CarouselSettings::from_config(&config, CarouselKind::Featured).interval, ms(8000));
        assert_eq!(CarouselSettings::from_config(&config, CarouselKind::MostSelling).interval, ms(9000));
        assert_eq!(CarouselSettings::from_config(&config, CarouselKind::Other).interval, ms(7000));
    }

    #[test]
    fn test_move_wraps() {
        let mut carousel = desktop(10);
        assert_eq!(carousel.max_index(), 6);

        carousel.move_to(-1);
        assert_eq!(carousel.index(), 6);
        carousel.move_to(7);
        assert_eq!(carousel.index(), 0);
        carousel.move_to(6);
        assert_eq!(carousel.index(), 6);
    }

    #[test]
    fn test_arrows_page_by_view() {
        let mut carousel = desktop(10);
        carousel.next();
        assert_eq!(carousel.index(), 4);
        carousel.next();
        assert_eq!(carousel.index(), 0);
        carousel.prev();
        assert_eq!(carousel.index(), 6);
    }

    #[test]
    fn test_fewer_items_than_view() {
        let mut carousel = desktop(3);
        assert_eq!(carousel.max_index(), 0);
        carousel.next();
        assert_eq!(carousel.index(), 0);
        assert_eq!(carousel.dots(), vec![0]);
    }

    #[test]
    fn test_dots() {
        let mut carousel = desktop(10);
        assert_eq!(carousel.dots(), vec![0, 4, 8]);
        assert_eq!(carousel.active_dot(), Some(0));

        carousel.move_to(6);
        assert_eq!(carousel.active_dot(), Some(1));

        carousel.click_dot(1);
        assert_eq!(carousel.index(), 4);
        assert_eq!(
            carousel.render_dots(),
            concat!(
                r#"<span class="dot" data-slide-index="0"></span>"#,
                r#"<span class="dot active" data-slide-index="4"></span>"#,
                r#"<span class="dot" data-slide-index="8"></span>"#,
            )
        );
    }

    #[test]
    fn test_swipe() {
        let mut carousel = Carousel::new(5, 375, CarouselSettings::default());
        assert!(!carousel.swipe(100.0, 140.0));
        assert!(carousel.swipe(200.0, 100.0));
        assert_eq!(carousel.index(), 1);
        assert!(carousel.swipe(100.0, 200.0));
        assert_eq!(carousel.index(), 0);
        assert!(carousel.swipe(100.0, 200.0));
        assert_eq!(carousel.index(), 4);
    }

    #[test]
    fn test_auto_slide_loops() {
        let mut carousel = desktop(10);
        carousel.advance(ms(7000));
        assert_eq!(carousel.index(), 4);
        // 4 + 4 is past the end, so the move wraps.
        carousel.advance(ms(7000));
        assert_eq!(carousel.index(), 0);

        carousel.move_to(6);
        carousel.advance(ms(7000));
        assert_eq!(carousel.index(), 0);
    }

    #[test]
    fn test_manual_move_resets_auto_slide() {
        let mut carousel = desktop(10);
        carousel.advance(ms(6000));
        carousel.next();
        carousel.advance(ms(6000));
        assert_eq!(carousel.index(), 4);
        carousel.advance(ms(1000));
        assert_eq!(carousel.index(), 0);
    }

    #[test]
    fn test_hidden_carousel() {
        let mut carousel = desktop(0);
        assert!(carousel.is_hidden());
        assert!(carousel.dots().is_empty());
        assert_eq!(carousel.active_dot(), None);
        carousel.advance(ms(20_000));
        assert_eq!(carousel.index(), 0);
    }

    #[test]
    fn test_translation_clamped() {
        let mut carousel = desktop(10);
        let geometry = TrackGeometry {
            item_width: 200.0,
            item_margin: 20.0,
            track_width: 2200.0,
            container_width: 900.0,
        };
        assert_eq!(carousel.translation(&geometry), 0.0);
        carousel.move_to(4);
        assert_eq!(carousel.translation(&geometry), -880.0);
        carousel.move_to(6);
        assert_eq!(carousel.translation(&geometry), -1300.0);
    }

    #[test]
    fn test_resize_is_debounced() {
        let mut carousel = desktop(10);
        carousel.move_to(6);

        carousel.resize(900);
        carousel.advance(ms(100));
        carousel.resize(375);
        carousel.advance(ms(100));
        assert_eq!(carousel.items_per_view(), 4);

        carousel.advance(ms(100));
        assert_eq!(carousel.items_per_view(), 1);
        assert_eq!(carousel.index(), 6);
        assert_eq!(carousel.transition(), Transition::Instant);
        assert_eq!(carousel.dots().len(), 10);
    }
}
