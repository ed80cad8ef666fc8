#![cfg(feature = "web")]
use crate::category::RiskCategory;
use plotters::prelude::*;
use std::error::Error;

/// Configuration options for the distribution chart
#[derive(Clone, Debug)]
pub struct ChartOptions {
    /// Title displayed at the top of the chart
    pub title: String,

    /// Label for the count axis
    pub y_label: String,

    /// Width of the chart in pixels
    pub width: u32,

    /// Height of the chart in pixels
    pub height: u32,

    /// Bar fill color
    pub bar_color: RGBColor,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            title: "Zones per Risk Category".to_string(),
            y_label: "Zones".to_string(),
            width: 900,
            height: 360,
            // High Risk orange red
            bar_color: RGBColor(0xFF, 0x45, 0x00),
        }
    }
}

/// Renders per-category zone counts as an SVG bar chart
///
/// `counts` is expected in category declaration order, as produced by
/// `metrics::category_counts`; each bar is labelled with the category at
/// its position.
///
/// # Examples
/// ```
/// use flood_monitor::chart::{ChartOptions, render_distribution_chart};
/// use flood_monitor::metrics::category_counts;
///
/// let counts = category_counts(&[]);
/// let svg = render_distribution_chart(&counts, &ChartOptions::default()).unwrap();
/// assert!(svg.contains("<svg"));
/// ```
pub fn render_distribution_chart(
    counts: &[(RiskCategory, usize)],
    options: &ChartOptions,
) -> Result<String, Box<dyn Error>> {
    if counts.is_empty() {
        return Err("no categories to chart".into());
    }

    let max_count = counts.iter().map(|(_, count)| *count).max().unwrap_or(0) as u32;
    let last = (counts.len() - 1) as u32;

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (options.width, options.height))
            .into_drawing_area();
        root.fill(&WHITE)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(&options.title, ("sans-serif", 22).into_font())
            .margin(10)
            .x_label_area_size(40)
            .y_label_area_size(50)
            .build_cartesian_2d((0u32..last).into_segmented(), 0u32..max_count + 1)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(counts.len())
            .x_label_formatter(&|value| match value {
                SegmentValue::CenterOf(i) => counts
                    .get(*i as usize)
                    .map(|(category, _)| category.label().to_string())
                    .unwrap_or_default(),
                _ => String::new(),
            })
            .y_desc(&options.y_label)
            .draw()?;

        chart.draw_series(
            Histogram::vertical(&chart)
                .style(options.bar_color.filled())
                .margin(12)
                .data(
                    counts
                        .iter()
                        .enumerate()
                        .map(|(i, (_, count))| (i as u32, *count as u32)),
                ),
        )?;

        root.present()?;
    }

    Ok(svg)
}
