//! Figure sizing from measured text extents

use crate::figure::Figure;
use crate::render::{AxisId, FigureSize, Renderer};
use crate::ticks::TickResult;

/// Tick label and title font size, in pixels
pub const FONT_SIZE: f64 = 12.0;
/// Narrowest figure produced
pub const MIN_WIDTH: u32 = 800;
/// Shortest panel produced
pub const MIN_PANEL_HEIGHT: u32 = 300;

/// Plot area of a single panel before axis decorations
const PLOT_WIDTH: f64 = 640.0;
const PLOT_HEIGHT: f64 = 200.0;
/// Gap between tick labels, titles and the image border
const PADDING: f64 = 16.0;
/// Space reserved above the first panel
pub(crate) const TOP_MARGIN: f64 = 24.0;
/// Space reserved below the last panel for the independent axis
pub(crate) const BOTTOM_MARGIN: f64 = 56.0;

/// Image size for `figure` so no tick label or title is clipped
pub fn figure_size(figure: &Figure, renderer: &dyn Renderer, font_size: f64) -> FigureSize {
    let line_height = renderer.measure_text("0", font_size).height;
    let widest = |ticks: Option<&TickResult>| {
        ticks.map_or(0.0, |t| {
            t.labels
                .iter()
                .map(|l| renderer.measure_text(l, font_size).width)
                .fold(0.0, f64::max)
        })
    };

    let mut left: f64 = 0.0;
    let mut right: f64 = 0.0;
    let mut panel_height = f64::from(MIN_PANEL_HEIGHT);
    for panel in figure.panels() {
        left = left.max(widest(panel.primary_ticks()) + line_height);
        if panel.secondary_ticks().is_some() {
            let title = renderer.measure_text(&panel.axis_title(AxisId::Secondary), font_size);
            right = right.max(widest(panel.secondary_ticks()) + line_height.max(title.height));
        }
        let entries = panel.legend_entries().len();
        let rows = entries.div_ceil(panel.legend_columns().max(1));
        let needed = PLOT_HEIGHT + 2.0 * line_height + rows as f64 * line_height + PADDING;
        panel_height = panel_height.max(needed);
    }

    let independent_title = renderer.measure_text(&figure.independent_title(), font_size);
    let width = (left + right + PLOT_WIDTH + 2.0 * PADDING).max(independent_title.width + 2.0 * PADDING);
    let panels = figure.len().max(1) as f64;
    let height = TOP_MARGIN + panels * panel_height + BOTTOM_MARGIN.max(2.0 * line_height + PADDING);

    FigureSize {
        width: (width.ceil() as u32).max(MIN_WIDTH),
        height: height.ceil() as u32,
    }
}

/// Vertical band `(top, height)` of each panel's plot area, top to bottom
pub fn panel_bands(size: FigureSize, panels: usize) -> Vec<(f64, f64)> {
    if panels == 0 {
        return Vec::new();
    }
    let usable = (f64::from(size.height) - TOP_MARGIN - BOTTOM_MARGIN).max(0.0);
    let band = usable / panels as f64;
    let gap = (band * 0.15).min(2.0 * PADDING + FONT_SIZE);
    (0..panels)
        .map(|i| (TOP_MARGIN + i as f64 * band, band - gap))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::panel::Panel;
    use crate::render::RecordingRenderer;
    use crate::series::Series;
    use crate::source::VectorSource;

    fn figure(panels: usize) -> Figure {
        let mut figure = Figure::new();
        for _ in 0..panels {
            let mut panel = Panel::new();
            let source = VectorSource::new(vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]).unwrap();
            panel.add_series(Series::new(source, "s").unwrap()).unwrap();
            figure.add_panel(panel).unwrap();
        }
        figure
    }

    #[test]
    fn test_minimum_size_per_panel() {
        let renderer = RecordingRenderer::new();
        let one = figure_size(&figure(1), &renderer, FONT_SIZE);
        let three = figure_size(&figure(3), &renderer, FONT_SIZE);
        assert!(one.width >= MIN_WIDTH);
        assert!(one.height >= MIN_PANEL_HEIGHT);
        assert!(three.height >= 3 * MIN_PANEL_HEIGHT);
        assert!(three.height > one.height);
    }

    #[test]
    fn test_empty_figure_still_has_a_size() {
        let size = figure_size(&Figure::new(), &RecordingRenderer::new(), FONT_SIZE);
        assert_eq!(size.width, MIN_WIDTH);
        assert!(size.height >= MIN_PANEL_HEIGHT);
    }

    #[test]
    fn test_panel_bands_do_not_overlap() {
        let size = FigureSize {
            width: 800,
            height: 980,
        };
        let bands = panel_bands(size, 3);
        assert_eq!(bands.len(), 3);
        for pair in bands.windows(2) {
            assert!(pair[0].0 + pair[0].1 < pair[1].0);
        }
        assert!(panel_bands(size, 0).is_empty());
    }
}
