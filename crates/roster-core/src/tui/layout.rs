//! Responsive constraint-based layouts.
//!
//! The screen is a vertical stack: search box, record table, pagination bar
//! and status line. Breakpoints don't change the stack; they decide how many
//! table columns fit and whether help is shown compact.
//!
//! # Breakpoints
//!
//! - **Wide** (>= 200 cols)
//! - **Standard** (120-199 cols)
//! - **Compact** (80-119 cols)
//! - **Minimal** (< 80 cols): email column dropped, compact help

use ftui::layout::{Constraint, Flex, Rect};
use tracing::debug;

/// Smallest usable terminal.
pub const MIN_WIDTH: u16 = 40;
pub const MIN_HEIGHT: u16 = 10;

/// Terminal size breakpoints for responsive layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Breakpoint {
    /// Minimal terminal (< 80 columns).
    Minimal,
    /// Compact terminal (80-119 columns).
    Compact,
    /// Standard terminal (120-199 columns).
    Standard,
    /// Wide terminal (>= 200 columns).
    Wide,
}

impl Breakpoint {
    /// Determine breakpoint from terminal dimensions.
    pub fn from_size(width: u16, _height: u16) -> Self {
        match width {
            w if w >= 200 => Breakpoint::Wide,
            w if w >= 120 => Breakpoint::Standard,
            w if w >= 80 => Breakpoint::Compact,
            _ => Breakpoint::Minimal,
        }
    }

    /// Human-readable name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Breakpoint::Minimal => "minimal",
            Breakpoint::Compact => "compact",
            Breakpoint::Standard => "standard",
            Breakpoint::Wide => "wide",
        }
    }
}

/// Layout areas for the main view.
#[derive(Debug, Clone, Copy)]
pub struct MainAreas {
    /// Search box at top.
    pub search: Rect,
    /// Record table.
    pub table: Rect,
    /// Page buttons and selection summary.
    pub pager: Rect,
    /// Status line at bottom.
    pub status: Rect,
}

/// Layout calculator for one frame.
#[derive(Debug, Clone, Copy)]
pub struct ResponsiveLayout {
    area: Rect,
    breakpoint: Breakpoint,
}

impl ResponsiveLayout {
    pub fn new(area: Rect) -> Self {
        Self {
            area,
            breakpoint: Breakpoint::from_size(area.width, area.height),
        }
    }

    pub fn breakpoint(&self) -> Breakpoint {
        self.breakpoint
    }

    /// Below the minimum size only a warning is drawn.
    pub fn is_too_small(&self) -> bool {
        self.area.width < MIN_WIDTH || self.area.height < MIN_HEIGHT
    }

    /// Compute the main view areas.
    pub fn main_areas(&self) -> MainAreas {
        let table_min = match self.breakpoint {
            Breakpoint::Minimal => 5,
            _ => 10,
        };
        let chunks = Flex::vertical()
            .constraints([
                Constraint::Fixed(3),       // Search box
                Constraint::Min(table_min), // Record table
                Constraint::Fixed(1),       // Pagination bar
                Constraint::Fixed(1),       // Status line
            ])
            .split(self.area);

        MainAreas {
            search: chunks[0],
            table: chunks[1],
            pager: chunks[2],
            status: chunks[3],
        }
    }

    /// Centered popup sized as a percentage of the screen.
    ///
    /// At least 30x10, never closer than 2 cells to any edge.
    pub fn popup_area(&self, width_pct: u16, height_pct: u16) -> Rect {
        let width = (self.area.width as u32 * width_pct as u32 / 100) as u16;
        let height = (self.area.height as u32 * height_pct as u32 / 100) as u16;

        let width = width.max(30).min(self.area.width.saturating_sub(4));
        let height = height.max(10).min(self.area.height.saturating_sub(4));

        let x = (self.area.width.saturating_sub(width)) / 2;
        let y = (self.area.height.saturating_sub(height)) / 2;

        Rect::new(self.area.x + x, self.area.y + y, width, height)
    }
}

/// Tracks terminal size across resizes.
#[derive(Debug, Clone)]
pub struct LayoutState {
    prev_breakpoint: Option<Breakpoint>,
    current_breakpoint: Breakpoint,
    current_size: (u16, u16),
}

impl LayoutState {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            prev_breakpoint: None,
            current_breakpoint: Breakpoint::from_size(width, height),
            current_size: (width, height),
        }
    }

    /// Record a new terminal size. Returns true if the breakpoint changed.
    pub fn update(&mut self, width: u16, height: u16) -> bool {
        let new_breakpoint = Breakpoint::from_size(width, height);
        let changed = new_breakpoint != self.current_breakpoint;

        if changed {
            debug!(
                from = self.current_breakpoint.name(),
                to = new_breakpoint.name(),
                "layout.breakpoint_change"
            );
        }
        if self.current_size != (width, height) {
            debug!(
                old_width = self.current_size.0,
                old_height = self.current_size.1,
                new_width = width,
                new_height = height,
                "layout.resize"
            );
        }

        self.prev_breakpoint = Some(self.current_breakpoint);
        self.current_breakpoint = new_breakpoint;
        self.current_size = (width, height);
        changed
    }

    pub fn breakpoint(&self) -> Breakpoint {
        self.current_breakpoint
    }

    /// Whether the last update crossed a breakpoint.
    pub fn did_breakpoint_change(&self) -> bool {
        self.prev_breakpoint
            .map(|prev| prev != self.current_breakpoint)
            .unwrap_or(false)
    }

    pub fn size(&self) -> (u16, u16) {
        self.current_size
    }
}
