//! Plain-text rendering of a widget view

use flipclock_animation::CellView;
use flipclock_theme::Palette;
use flipclock_widget::ClockView;
use std::fmt::Write;

/// Text a cell shows at this instant: the outgoing face until the flip is
/// halfway through
fn visible_text(cell: &CellView) -> &str {
    match cell {
        CellView::Static { text } => text,
        CellView::Flipping {
            front,
            back,
            progress,
            ..
        } => {
            if *progress < 0.5 {
                front
            } else {
                back
            }
        }
    }
}

/// One status line for the terminal
pub fn render_line(view: &ClockView) -> String {
    let separator = if view.separator_visible() { ':' } else { ' ' };
    let mut line = format!(
        "{:>2}{}{}",
        visible_text(&view.hour),
        separator,
        visible_text(&view.minute)
    );

    if let Some(date) = &view.date_line {
        let _ = write!(line, "  {}", date.text());
    }
    let _ = write!(
        line,
        "  [{} {} {:.0}px]",
        if view.scheme.is_dark() { "dark" } else { "light" },
        view.menu.size,
        view.metrics.font_size
    );
    if view.ring.active {
        line.push_str(" (o)");
    }
    if view.menu.open {
        let _ = write!(line, "  menu: size={} theme={}", view.menu.size, view.menu.theme);
    }
    line
}

/// Palette as `name: value` presentation properties
pub fn render_palette(palette: &Palette) -> String {
    palette
        .properties()
        .iter()
        .map(|(name, value)| format!("{name}: {value};"))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use flipclock_core::{HostSignals, ManualClock};
    use flipclock_widget::{ClockWidget, WidgetConfig};
    use std::sync::Arc;

    #[test]
    fn test_render_line() {
        let clock = ManualClock::at_time(21, 7, 0);
        let mut widget = ClockWidget::new(
            WidgetConfig::default(),
            Arc::new(clock),
            HostSignals::default(),
        );
        widget.mount();
        widget.set_attribute("theme", "dark");

        let line = render_line(&widget.view());
        assert!(line.starts_with(" 9:07"), "{line}");
        assert!(line.contains("Good night"), "{line}");
        assert!(line.contains("[dark medium 88px]"), "{line}");
    }

    #[test]
    fn test_flipping_cell_switches_halfway() {
        let cell = CellView::Flipping {
            front: "05".to_string(),
            back: "06".to_string(),
            front_angle: -45.0,
            back_angle: 135.0,
            progress: 0.25,
        };
        assert_eq!(visible_text(&cell), "05");
    }

    #[test]
    fn test_render_palette() {
        assert_eq!(
            render_palette(&Palette::dark()),
            "--sfc: #1c1b1f; --txt: #e6e1e5; --txt-variant: #cac4d0; --accent: #6750a4;"
        );
    }
}
