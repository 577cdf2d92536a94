//! Stacked-fraction bar chart of interaction types per residue.
//!
//! Uses the bitmap backend for raster formats (PNG by default) and the SVG
//! backend when the output path ends in `.svg`.

use crate::counts::CountTable;
use crate::errors::ReportError;
use crate::interactions::InteractionCategory;

use plotters::coord::Shift;
use plotters::prelude::*;
use std::error::Error;
use std::path::Path;

/// Default chart title.
pub const DEFAULT_TITLE: &str = "Protein-Ligand Contacts (PLIP)";

/// Output size in pixels.
const CHART_SIZE: (u32, u32) = (1800, 750);
/// Height of the legend strip below the chart.
const LEGEND_HEIGHT: u32 = 90;
/// Fraction of each residue slot covered by its bar.
const BAR_WIDTH: f64 = 0.8;

/// Bar color of an interaction category.
pub fn category_color(category: InteractionCategory) -> RGBColor {
    match category {
        InteractionCategory::HydrogenBond => RGBColor(0x4C, 0xAF, 0x50),
        InteractionCategory::Hydrophobic => RGBColor(0x9B, 0x59, 0xB6),
        InteractionCategory::Ionic => RGBColor(0xFF, 0x14, 0x93),
        InteractionCategory::WaterBridge => RGBColor(0x1E, 0x88, 0xE5),
    }
}

/// Render the stacked-fraction chart of `table` to `path`.
///
/// Each residue gets one bar whose segments are that residue's counts
/// divided by `total`, the number of interactions in the whole report.
pub fn plot_stacked_fractions(
    table: &CountTable,
    total: usize,
    path: &Path,
    title: &str,
) -> Result<(), ReportError> {
    let is_svg = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"));
    let drawn = match is_svg {
        true => draw(
            SVGBackend::new(path, CHART_SIZE).into_drawing_area(),
            table,
            total,
            title,
        ),
        false => draw(
            BitMapBackend::new(path, CHART_SIZE).into_drawing_area(),
            table,
            total,
            title,
        ),
    };
    drawn.map_err(|e| ReportError::Plot(e.to_string()))
}

fn draw<DB: DrawingBackend>(
    root: DrawingArea<DB, Shift>,
    table: &CountTable,
    total: usize,
    title: &str,
) -> Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)?;
    let (width, height) = root.dim_in_pixel();

    if table.is_empty() {
        root.draw(&Text::new(
            "No interactions",
            ((width / 2) as i32 - 80, (height / 2) as i32),
            ("sans-serif", 32).into_font().color(&BLACK),
        ))?;
        root.present()?;
        return Ok(());
    }

    let (chart_area, legend_area) = root.split_vertically((height - LEGEND_HEIGHT) as i32);

    let labels = table.labels();
    let fractions = table.fractions(total);
    let y_max = fractions
        .iter()
        .map(|f| f.iter().sum::<f64>())
        .fold(0.0f64, f64::max)
        .max(f64::EPSILON)
        * 1.1;

    let mut chart = ChartBuilder::on(&chart_area)
        .caption(title, ("sans-serif", 36).into_font().style(FontStyle::Bold))
        .margin(20)
        .x_label_area_size(110)
        .y_label_area_size(90)
        .build_cartesian_2d((0..labels.len()).into_segmented(), 0.0..y_max)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(labels.len())
        .x_label_formatter(&|x| match x {
            SegmentValue::CenterOf(idx) => labels
                .get(*idx)
                .map(|l| l.to_string())
                .unwrap_or_default(),
            _ => String::new(),
        })
        .x_label_style(
            ("sans-serif", 16)
                .into_font()
                .transform(FontTransform::Rotate90),
        )
        .x_desc("Residue")
        .y_desc("Interactions Fraction")
        .axis_desc_style(("sans-serif", 20))
        .draw()?;

    let margin = ((1.0 - BAR_WIDTH) / 2.0 * slot_width(width, labels.len())) as u32;
    let mut bottoms = vec![0.0f64; labels.len()];
    for category in InteractionCategory::ALL {
        let color = category_color(category);
        let bars: Vec<Rectangle<_>> = fractions
            .iter()
            .enumerate()
            .map(|(idx, f)| {
                let y0 = bottoms[idx];
                let y1 = y0 + f[category.index()];
                bottoms[idx] = y1;
                let mut bar = Rectangle::new(
                    [
                        (SegmentValue::Exact(idx), y0),
                        (SegmentValue::Exact(idx + 1), y1),
                    ],
                    color.filled(),
                );
                bar.set_margin(0, 0, margin, margin);
                bar
            })
            .collect();
        chart.draw_series(bars)?;
    }

    draw_legend(&legend_area)?;
    root.present()?;
    Ok(())
}

/// Approximate pixel width of one residue slot on the x axis.
fn slot_width(width: u32, n: usize) -> f64 {
    f64::from(width.saturating_sub(150)) / n.max(1) as f64
}

/// Horizontal legend, one colored box per category.
fn draw_legend<DB: DrawingBackend>(area: &DrawingArea<DB, Shift>) -> Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    const ITEM_WIDTH: i32 = 220;
    const BOX_SIZE: i32 = 20;

    let (width, _) = area.dim_in_pixel();
    let n_items = InteractionCategory::ALL.len() as i32;
    let x_start = (width as i32 - n_items * ITEM_WIDTH) / 2;
    let y = 45;

    area.draw(&Text::new(
        "Interaction type",
        (x_start, 10),
        ("sans-serif", 18).into_font().color(&BLACK),
    ))?;
    for (i, category) in InteractionCategory::ALL.iter().enumerate() {
        let x = x_start + i as i32 * ITEM_WIDTH;
        area.draw(&Rectangle::new(
            [(x, y), (x + BOX_SIZE, y + BOX_SIZE)],
            category_color(*category).filled(),
        ))?;
        area.draw(&Text::new(
            category.display_name(),
            (x + BOX_SIZE + 8, y),
            ("sans-serif", 18).into_font().color(&BLACK),
        ))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legend_colors() {
        assert_eq!(
            category_color(InteractionCategory::HydrogenBond).rgb(),
            (76, 175, 80)
        );
        assert_eq!(
            category_color(InteractionCategory::WaterBridge).rgb(),
            (30, 136, 229)
        );
        let distinct: std::collections::HashSet<_> = InteractionCategory::ALL
            .iter()
            .map(|c| category_color(*c).rgb())
            .collect();
        assert_eq!(distinct.len(), 4);
    }

    #[test]
    fn slot_widths() {
        assert_eq!(slot_width(1150, 10), 100.0);
        assert_eq!(slot_width(1150, 0), 1000.0);
    }
}
