//! PNG export of an engagement table.
//!
//! The canvas is created at exactly `width_in × dpi` by `height_in × dpi`
//! pixels and never cropped. After writing, the PNG header is read back and
//! checked against the requested size.
//!
//! Text is drawn with a bundled DejaVu Sans, registered with plotters on
//! first export, so no system fonts are needed.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use plotters::prelude::*;
use plotters::style::register_font;
use tracing::debug;

use crate::config::ChartStyle;
use crate::error::RenderError;
use crate::palette::Palette;
use crate::table::{EngagementTable, DAY_COUNT, HOUR_COUNT};

/// Result of a successful export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
}

impl fmt::Display for ExportSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Success: Generated '{}' with dimensions {}x{} pixels.",
            self.path.display(),
            self.width,
            self.height
        )
    }
}

/// Turns a table plus display metadata into an image file.
pub trait Exporter {
    fn export(
        &self,
        table: &EngagementTable,
        style: &ChartStyle,
        path: &Path,
    ) -> Result<ExportSummary, RenderError>;
}

/// Pixel rectangle, `x0..x1` by `y0..y1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub x0: i32,
    pub y0: i32,
    pub x1: i32,
    pub y1: i32,
}

impl PixelRect {
    pub fn width(&self) -> i32 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> i32 {
        self.y1 - self.y0
    }

    /// Inclusive corner pixels, as plotters expects for filled rectangles.
    fn corners(&self) -> [(i32, i32); 2] {
        [(self.x0, self.y0), (self.x1 - 1, self.y1 - 1)]
    }
}

/// Where the grid and color bar sit on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub canvas: (u32, u32),
    pub grid: PixelRect,
    pub colorbar: PixelRect,
}

impl Layout {
    /// Margins scale with the canvas so the chart keeps its proportions.
    pub fn for_canvas(width: u32, height: u32) -> Self {
        let w = width as f64;
        let h = height as f64;

        let left = (w * 0.14).round() as i32;
        let right = (w * 0.20).round() as i32;
        let top = (h * 0.10).round() as i32;
        let bottom = (h * 0.15).round() as i32;

        let grid = PixelRect {
            x0: left,
            y0: top,
            x1: (width as i32 - right).max(left + 1),
            y1: (height as i32 - bottom).max(top + 1),
        };

        let gap = (w * 0.03).round().max(1.0) as i32;
        let bar_width = (w * 0.04).round().max(1.0) as i32;
        let colorbar = PixelRect {
            x0: grid.x1 + gap,
            y0: grid.y0,
            x1: (grid.x1 + gap + bar_width).min(width as i32),
            y1: grid.y1,
        };

        Self {
            canvas: (width, height),
            grid,
            colorbar,
        }
    }

    /// Pixel rectangle for the cell at `(row, col)`, border already removed.
    pub fn cell(&self, row: usize, col: usize, border: u32) -> PixelRect {
        let cell_w = self.grid.width() as f64 / HOUR_COUNT as f64;
        let cell_h = self.grid.height() as f64 / DAY_COUNT as f64;

        let x0 = self.grid.x0 + (col as f64 * cell_w).round() as i32;
        let x1 = self.grid.x0 + ((col + 1) as f64 * cell_w).round() as i32;
        let y0 = self.grid.y0 + (row as f64 * cell_h).round() as i32;
        let y1 = self.grid.y0 + ((row + 1) as f64 * cell_h).round() as i32;

        let border = border as i32;
        PixelRect {
            x0,
            y0,
            x1: (x1 - border).max(x0 + 1),
            y1: (y1 - border).max(y0 + 1),
        }
    }
}

/// plotters bitmap exporter.
#[derive(Debug, Clone, Copy, Default)]
pub struct PngExporter;

impl PngExporter {
    pub fn new() -> Self {
        Self
    }
}

fn backend_err<E: std::error::Error + Send + Sync>(err: DrawingAreaErrorKind<E>) -> RenderError {
    RenderError::Backend(err.to_string())
}

/// DejaVu Sans, see `assets/DejaVuSans-LICENSE.txt`.
static BUNDLED_FONT: &[u8] = include_bytes!("../assets/DejaVuSans.ttf");

/// Font family every label is drawn with.
const FONT_FAMILY: &str = "sans-serif";

fn register_bundled_font() -> Result<(), RenderError> {
    static REGISTERED: OnceLock<bool> = OnceLock::new();
    let ok = *REGISTERED
        .get_or_init(|| register_font(FONT_FAMILY, FontStyle::Normal, BUNDLED_FONT).is_ok());
    if ok {
        Ok(())
    } else {
        Err(RenderError::Font(format!(
            "bundled font for '{FONT_FAMILY}' could not be parsed"
        )))
    }
}

fn ensure_parent_exists(path: &Path) -> Result<(), RenderError> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() && !parent.is_dir() => {
            Err(RenderError::OutputDirMissing(parent.to_path_buf()))
        }
        _ => Ok(()),
    }
}

fn draw_chart<DB: DrawingBackend>(
    root: &DrawingArea<DB, plotters::coord::Shift>,
    table: &EngagementTable,
    style: &ChartStyle,
    layout: &Layout,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    root.fill(&WHITE)?;

    let (min, max) = (table.min_score(), table.max_score());
    let palette: Palette = style.palette;
    debug!(min, max, "drawing {} cells", DAY_COUNT * HOUR_COUNT);

    for (row, (_, scores)) in table.rows().enumerate() {
        for (col, &score) in scores.iter().enumerate() {
            let rect = layout.cell(row, col, style.cell_border_px);
            let color = palette.color_for(score, min, max);
            root.draw(&Rectangle::new(rect.corners(), color.filled()))?;
        }
    }

    // Color bar, high values at the top
    let bar = layout.colorbar;
    let span = (bar.height() - 1).max(1) as f64;
    for y in bar.y0..bar.y1 {
        let t = 1.0 - (y - bar.y0) as f64 / span;
        root.draw(&Rectangle::new(
            [(bar.x0, y), (bar.x1 - 1, y)],
            palette.color_at(t).filled(),
        ))?;
    }
    root.draw(&Rectangle::new(bar.corners(), BLACK.stroke_width(1)))?;

    labels::draw_labels(root, table, style, layout)?;

    Ok(())
}

mod labels {
    use plotters::prelude::*;
    use plotters::style::text_anchor::{HPos, Pos, VPos};
    use plotters::style::FontTransform;

    use super::{Layout, FONT_FAMILY};
    use crate::config::ChartStyle;
    use crate::table::{EngagementTable, DAY_COUNT, HOUR_COUNT};

    pub(super) fn draw_labels<DB: DrawingBackend>(
        root: &DrawingArea<DB, plotters::coord::Shift>,
        table: &EngagementTable,
        style: &ChartStyle,
        layout: &Layout,
    ) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
        let centered = Pos::new(HPos::Center, VPos::Center);
        let (w, h) = (layout.canvas.0 as i32, layout.canvas.1 as i32);
        let grid = layout.grid;

        let title = TextStyle::from((FONT_FAMILY, 16).into_font().style(FontStyle::Bold))
            .pos(centered);
        root.draw(&Text::new(style.title.clone(), (w / 2, grid.y0 / 2), title))?;

        let axis = TextStyle::from((FONT_FAMILY, 12).into_font()).pos(centered);
        root.draw(&Text::new(
            style.x_label.clone(),
            ((grid.x0 + grid.x1) / 2, h - (h - grid.y1) / 4),
            axis.clone(),
        ))?;
        let vertical = TextStyle::from(
            (FONT_FAMILY, 12)
                .into_font()
                .transform(FontTransform::Rotate270),
        )
        .pos(centered);
        root.draw(&Text::new(
            style.y_label.clone(),
            (grid.x0 / 4, (grid.y0 + grid.y1) / 2),
            vertical.clone(),
        ))?;
        root.draw(&Text::new(
            style.colorbar_label.clone(),
            (w - (w - layout.colorbar.x1) / 3, (grid.y0 + grid.y1) / 2),
            vertical,
        ))?;

        let tick = TextStyle::from((FONT_FAMILY, 9).into_font()).pos(centered);
        for (row, label) in table.day_labels().iter().enumerate() {
            let cell = layout.cell(row, 0, 0);
            root.draw(&Text::new(
                label.to_string(),
                (grid.x0 * 2 / 3, (cell.y0 + cell.y1) / 2),
                tick.clone(),
            ))?;
        }
        let hour_tick = TextStyle::from(
            (FONT_FAMILY, 8)
                .into_font()
                .transform(FontTransform::Rotate270),
        )
        .pos(Pos::new(HPos::Right, VPos::Center));
        for (col, label) in table.hour_labels().iter().enumerate().take(HOUR_COUNT) {
            let cell = layout.cell(DAY_COUNT - 1, col, 0);
            root.draw(&Text::new(
                label.clone(),
                ((cell.x0 + cell.x1) / 2, grid.y1 + 4),
                hour_tick.clone(),
            ))?;
        }

        let bar = layout.colorbar;
        for (value, y) in [(table.max_score(), bar.y0), (table.min_score(), bar.y1)] {
            root.draw(&Text::new(
                value.to_string(),
                (bar.x1 + 14, y),
                tick.clone(),
            ))?;
        }

        Ok(())
    }
}

impl Exporter for PngExporter {
    fn export(
        &self,
        table: &EngagementTable,
        style: &ChartStyle,
        path: &Path,
    ) -> Result<ExportSummary, RenderError> {
        ensure_parent_exists(path)?;
        register_bundled_font()?;

        let (width, height) = style.canvas_px();
        let layout = Layout::for_canvas(width, height);
        debug!(path = %path.display(), width, height, palette = %style.palette, "rendering heatmap");

        {
            let root = BitMapBackend::new(path, (width, height)).into_drawing_area();
            draw_chart(&root, table, style, &layout).map_err(backend_err)?;
            root.present().map_err(backend_err)?;
        }

        let actual = image::image_dimensions(path)?;
        if actual != (width, height) {
            return Err(RenderError::DimensionMismatch {
                expected: (width, height),
                actual,
            });
        }

        Ok(ExportSummary {
            path: path.to_path_buf(),
            width,
            height,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_message() {
        let summary = ExportSummary {
            path: PathBuf::from("chart.png"),
            width: 512,
            height: 512,
        };
        assert_eq!(
            summary.to_string(),
            "Success: Generated 'chart.png' with dimensions 512x512 pixels."
        );
    }

    #[test]
    fn test_layout_fits_canvas() {
        let layout = Layout::for_canvas(512, 512);
        assert!(layout.grid.x0 > 0 && layout.grid.y0 > 0);
        assert!(layout.grid.x1 < layout.colorbar.x0);
        assert!(layout.colorbar.x1 <= 512);
        assert!(layout.grid.y1 <= 512);
        assert_eq!(layout.colorbar.y0, layout.grid.y0);
        assert_eq!(layout.colorbar.y1, layout.grid.y1);
    }

    #[test]
    fn test_cells_tile_grid_without_overlap() {
        let layout = Layout::for_canvas(512, 512);
        let first = layout.cell(0, 0, 0);
        let last = layout.cell(DAY_COUNT - 1, HOUR_COUNT - 1, 0);
        assert_eq!((first.x0, first.y0), (layout.grid.x0, layout.grid.y0));
        assert_eq!((last.x1, last.y1), (layout.grid.x1, layout.grid.y1));

        for col in 1..HOUR_COUNT {
            assert_eq!(layout.cell(0, col - 1, 0).x1, layout.cell(0, col, 0).x0);
        }
        for row in 1..DAY_COUNT {
            assert_eq!(layout.cell(row - 1, 0, 0).y1, layout.cell(row, 0, 0).y0);
        }
    }

    #[test]
    fn test_cell_border_shrinks_cell() {
        let layout = Layout::for_canvas(512, 512);
        let plain = layout.cell(3, 10, 0);
        let bordered = layout.cell(3, 10, 1);
        assert_eq!(bordered.x0, plain.x0);
        assert_eq!(bordered.width(), plain.width() - 1);
        assert_eq!(bordered.height(), plain.height() - 1);
    }

    #[test]
    fn test_tiny_canvas_keeps_cells_non_empty() {
        let layout = Layout::for_canvas(8, 8);
        let cell = layout.cell(6, 23, 5);
        assert!(cell.width() >= 1);
        assert!(cell.height() >= 1);
    }

    #[test]
    fn test_missing_parent_dir_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("chart.png");
        assert!(matches!(
            ensure_parent_exists(&path),
            Err(RenderError::OutputDirMissing(_))
        ));
        assert!(ensure_parent_exists(Path::new("chart.png")).is_ok());
    }
}
