//! Chart Plotter Module
//! Creates the dashboard visualizations using egui_plot.

use crate::metrics::{
    ChangeRecord, ColumnStats, NationalTrend, PivotTable, RegionalDelta,
};
use egui::{Color32, RichText, Stroke};
use egui_plot::{
    Bar, BarChart, HLine, Legend, Line, LineStyle, Plot, PlotPoint, PlotPoints, Points, Polygon,
    Text,
};

/// Trend line color
pub const TREND_COLOR: Color32 = Color32::from_rgb(52, 152, 219); // Blue
/// Projection reference color
pub const PREDICTION_COLOR: Color32 = Color32::from_rgb(231, 76, 60); // Red
/// Bar color for the regional charts
pub const BAR_COLOR: Color32 = Color32::from_rgb(26, 188, 156); // Teal

/// Cell highlight for positive year-over-year changes
pub const POSITIVE_BG: Color32 = Color32::from_rgb(173, 216, 230); // Light blue
/// Cell highlight for negative year-over-year changes
pub const NEGATIVE_BG: Color32 = Color32::from_rgb(250, 128, 114); // Salmon

/// Region palette for the stacked-area chart (matplotlib tab20 order).
pub const PALETTE: [Color32; 20] = [
    Color32::from_rgb(31, 119, 180),
    Color32::from_rgb(174, 199, 232),
    Color32::from_rgb(255, 127, 14),
    Color32::from_rgb(255, 187, 120),
    Color32::from_rgb(44, 160, 44),
    Color32::from_rgb(152, 223, 138),
    Color32::from_rgb(214, 39, 40),
    Color32::from_rgb(255, 152, 150),
    Color32::from_rgb(148, 103, 189),
    Color32::from_rgb(197, 176, 213),
    Color32::from_rgb(140, 86, 75),
    Color32::from_rgb(196, 156, 148),
    Color32::from_rgb(227, 119, 194),
    Color32::from_rgb(247, 182, 210),
    Color32::from_rgb(127, 127, 127),
    Color32::from_rgb(199, 199, 199),
    Color32::from_rgb(188, 189, 34),
    Color32::from_rgb(219, 219, 141),
    Color32::from_rgb(23, 190, 207),
    Color32::from_rgb(158, 218, 229),
];

/// Creates the dashboard charts and tables.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Format a value as a grouped integer ("51,829,023").
    pub fn format_count(value: f64) -> String {
        let rounded = value.round() as i64;
        let mut digits = rounded.abs().to_string();
        let mut grouped = String::new();
        while digits.len() > 3 {
            let split = digits.len() - 3;
            grouped = format!(",{}{}", &digits[split..], grouped);
            digits.truncate(split);
        }
        format!("{}{}{}", if rounded < 0 { "-" } else { "" }, digits, grouped)
    }

    /// National population by year, with the projection drawn as a dashed
    /// reference line plus label.
    pub fn draw_trend_chart(ui: &mut egui::Ui, trend: &NationalTrend) {
        let series: Vec<[f64; 2]> = trend
            .points
            .iter()
            .map(|p| [p.year as f64, p.population])
            .collect();
        let label_x = trend
            .points
            .last()
            .map(|p| p.year as f64)
            .unwrap_or(trend.projected_year as f64);
        let prediction = trend.projected_population;

        Plot::new("national_trend")
            .height(380.0)
            .allow_scroll(false)
            .x_axis_label("Year")
            .y_axis_label("Population")
            .legend(Legend::default())
            .show(ui, |plot_ui| {
                plot_ui.line(
                    Line::new(PlotPoints::from_iter(series.iter().copied()))
                        .color(TREND_COLOR)
                        .width(2.0)
                        .name("Population"),
                );
                plot_ui.points(
                    Points::new(PlotPoints::from_iter(series.iter().copied()))
                        .radius(3.5)
                        .color(TREND_COLOR),
                );
                plot_ui.hline(
                    HLine::new(prediction)
                        .color(PREDICTION_COLOR)
                        .style(LineStyle::Dashed { length: 8.0 })
                        .name("Prediction"),
                );
                plot_ui.text(Text::new(
                    PlotPoint::new(label_x, prediction),
                    RichText::new(format!("Prediction {}", Self::format_count(prediction)))
                        .color(PREDICTION_COLOR)
                        .size(13.0),
                ));
            });
    }

    /// Horizontal bar chart of five-year absolute change per region,
    /// largest at the top.
    pub fn draw_diff_bars(ui: &mut egui::Ui, records: &[RegionalDelta]) {
        let entries: Vec<(String, f64)> = records
            .iter()
            .map(|r| (r.region.clone(), r.diff))
            .collect();
        Self::draw_hbar_chart(ui, "regional_diff", "Population Change", &entries);
    }

    /// Horizontal bar chart of five-year change rate per region (percent).
    pub fn draw_rate_bars(ui: &mut egui::Ui, records: &[RegionalDelta]) {
        let entries: Vec<(String, f64)> = records
            .iter()
            .map(|r| (r.region.clone(), r.rate))
            .collect();
        Self::draw_hbar_chart(ui, "regional_rate", "Change Rate (%)", &entries);
    }

    fn draw_hbar_chart(ui: &mut egui::Ui, id: &str, x_label: &str, entries: &[(String, f64)]) {
        let n = entries.len();
        // highest value at the top of the chart
        let labels: Vec<String> = entries.iter().rev().map(|(region, _)| region.clone()).collect();
        let bars: Vec<Bar> = entries
            .iter()
            .enumerate()
            .map(|(i, (region, value))| {
                Bar::new((n - 1 - i) as f64, *value)
                    .name(region)
                    .width(0.6)
                    .fill(BAR_COLOR)
            })
            .collect();

        Plot::new(id)
            .height((n as f32 * 22.0 + 60.0).max(180.0))
            .allow_scroll(false)
            .x_axis_label(x_label)
            .y_axis_formatter(move |mark, _range| {
                let idx = mark.value.round() as usize;
                if idx < labels.len() {
                    labels[idx].clone()
                } else {
                    String::new()
                }
            })
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars).horizontal());
            });
    }

    /// Stacked area chart of the region×year pivot. Missing cells stack as
    /// zero-height segments.
    pub fn draw_area_chart(ui: &mut egui::Ui, pivot: &PivotTable) {
        Plot::new("stacked_area")
            .height(420.0)
            .allow_scroll(false)
            .x_axis_label("Year")
            .y_axis_label("Population")
            .legend(Legend::default())
            .show(ui, |plot_ui| {
                let mut lower = vec![0.0f64; pivot.years.len()];
                for (ri, region) in pivot.regions.iter().enumerate() {
                    let upper: Vec<f64> = pivot
                        .years
                        .iter()
                        .enumerate()
                        .map(|(yi, &year)| {
                            lower[yi] + pivot.value(year, region).unwrap_or(0.0)
                        })
                        .collect();

                    let mut band: Vec<[f64; 2]> = pivot
                        .years
                        .iter()
                        .enumerate()
                        .map(|(yi, &year)| [year as f64, upper[yi]])
                        .collect();
                    band.extend(
                        pivot
                            .years
                            .iter()
                            .enumerate()
                            .rev()
                            .map(|(yi, &year)| [year as f64, lower[yi]]),
                    );

                    let color = PALETTE[ri % PALETTE.len()];
                    plot_ui.polygon(
                        Polygon::new(PlotPoints::from(band))
                            .fill_color(color.gamma_multiply(0.85))
                            .stroke(Stroke::new(1.0, color))
                            .name(region),
                    );
                    lower = upper;
                }
            });
    }

    /// Year-over-year change table; positive deltas highlighted light blue,
    /// negative ones salmon.
    pub fn draw_changes_table(ui: &mut egui::Ui, records: &[ChangeRecord]) {
        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                egui::Grid::new("changes_table")
                    .striped(true)
                    .min_col_width(70.0)
                    .spacing([12.0, 4.0])
                    .show(ui, |ui| {
                        ui.label(RichText::new("Region").strong().size(12.0));
                        ui.label(RichText::new("Year").strong().size(12.0));
                        ui.label(RichText::new("Population").strong().size(12.0));
                        ui.label(RichText::new("Change").strong().size(12.0));
                        ui.end_row();

                        for record in records {
                            let bg = if record.delta > 0.0 {
                                POSITIVE_BG
                            } else {
                                NEGATIVE_BG
                            };
                            ui.label(RichText::new(&record.region).size(12.0));
                            ui.label(RichText::new(record.year.to_string()).size(12.0));
                            ui.label(
                                RichText::new(Self::format_count(record.population)).size(12.0),
                            );
                            ui.label(
                                RichText::new(Self::format_count(record.delta))
                                    .size(12.0)
                                    .color(Color32::BLACK)
                                    .background_color(bg),
                            );
                            ui.end_row();
                        }
                    });
            });
    }

    /// Descriptive-statistics table, one row per numeric column.
    pub fn draw_describe_table(ui: &mut egui::Ui, stats: &[ColumnStats]) {
        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                egui::Grid::new("describe_table")
                    .striped(true)
                    .min_col_width(60.0)
                    .spacing([10.0, 4.0])
                    .show(ui, |ui| {
                        ui.label(RichText::new("Column").strong().size(12.0));
                        ui.label(RichText::new("Count").strong().size(12.0));
                        ui.label(RichText::new("Mean").strong().size(12.0));
                        ui.label(RichText::new("Std").strong().size(12.0));
                        ui.label(RichText::new("Min").strong().size(12.0));
                        ui.label(RichText::new("25%").strong().size(12.0));
                        ui.label(RichText::new("50%").strong().size(12.0));
                        ui.label(RichText::new("75%").strong().size(12.0));
                        ui.label(RichText::new("Max").strong().size(12.0));
                        ui.end_row();

                        for s in stats {
                            ui.label(RichText::new(&s.column).size(12.0));
                            ui.label(RichText::new(s.count.to_string()).size(12.0));
                            for value in [s.mean, s.std, s.min, s.q25, s.median, s.q75, s.max] {
                                ui.label(RichText::new(format!("{value:.2}")).size(12.0));
                            }
                            ui.end_row();
                        }
                    });
            });
    }
}
