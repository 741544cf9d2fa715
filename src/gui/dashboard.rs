//! Dashboard Widget
//! Central tabbed panel rendering the five derived views.

use crate::charts::ChartPlotter;
use crate::metrics::AnalysisBundle;
use egui::{Color32, RichText, ScrollArea};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DashboardTab {
    Summary,
    Trend,
    Regional,
    Changes,
    AreaChart,
}

impl DashboardTab {
    const ALL: [DashboardTab; 5] = [
        DashboardTab::Summary,
        DashboardTab::Trend,
        DashboardTab::Regional,
        DashboardTab::Changes,
        DashboardTab::AreaChart,
    ];

    fn title(self) -> &'static str {
        match self {
            DashboardTab::Summary => "Summary Stats",
            DashboardTab::Trend => "National Trend",
            DashboardTab::Regional => "Regional Analysis",
            DashboardTab::Changes => "Change Table",
            DashboardTab::AreaChart => "Stacked Area",
        }
    }
}

/// Tabbed display area over one analysis result.
pub struct Dashboard {
    bundle: Option<AnalysisBundle>,
    selected: DashboardTab,
}

impl Default for Dashboard {
    fn default() -> Self {
        Self {
            bundle: None,
            selected: DashboardTab::Summary,
        }
    }
}

impl Dashboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Discard the current result (a new upload supersedes it).
    pub fn clear(&mut self) {
        self.bundle = None;
    }

    pub fn set_bundle(&mut self, bundle: AnalysisBundle) {
        self.bundle = Some(bundle);
        self.selected = DashboardTab::Summary;
    }

    pub fn bundle(&self) -> Option<&AnalysisBundle> {
        self.bundle.as_ref()
    }

    /// Draw the dashboard. Without an upload this is the neutral idle
    /// prompt, not an error.
    pub fn show(&mut self, ui: &mut egui::Ui) {
        if self.bundle.is_none() {
            ui.centered_and_justified(|ui| {
                ui.label(
                    RichText::new("Upload a population_trends.csv file to begin")
                        .size(18.0)
                        .color(Color32::GRAY),
                );
            });
            return;
        }

        ui.horizontal(|ui| {
            for tab in DashboardTab::ALL {
                ui.selectable_value(&mut self.selected, tab, tab.title());
            }
        });
        ui.separator();

        let selected = self.selected;
        let Some(bundle) = &self.bundle else {
            return;
        };

        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| match selected {
                DashboardTab::Summary => Self::show_summary(ui, bundle),
                DashboardTab::Trend => Self::show_trend(ui, bundle),
                DashboardTab::Regional => Self::show_regional(ui, bundle),
                DashboardTab::Changes => Self::show_changes(ui, bundle),
                DashboardTab::AreaChart => Self::show_area(ui, bundle),
            });
    }

    fn show_summary(ui: &mut egui::Ui, bundle: &AnalysisBundle) {
        ui.heading("Summary Statistics");
        ui.add_space(8.0);

        ui.label(RichText::new("Schema").strong());
        ui.add_space(4.0);
        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.monospace(bundle.schema.info_text());
            });

        ui.add_space(12.0);
        ui.label(RichText::new("Descriptive Statistics").strong());
        ui.add_space(4.0);
        ChartPlotter::draw_describe_table(ui, &bundle.describe);
    }

    fn show_trend(ui: &mut egui::Ui, bundle: &AnalysisBundle) {
        ui.heading("National Population Trend");
        ui.add_space(8.0);
        ChartPlotter::draw_trend_chart(ui, &bundle.trend);
        ui.add_space(8.0);
        ui.label(format!(
            "Projected population in {}: {}",
            bundle.trend.projected_year,
            ChartPlotter::format_count(bundle.trend.projected_population)
        ));
        if bundle.trend.is_backcast {
            ui.label(
                RichText::new(
                    "Target year is not beyond the observed data; the value above is a backward extrapolation.",
                )
                .size(11.0)
                .color(Color32::from_rgb(243, 156, 18)),
            );
        }
    }

    fn show_regional(ui: &mut egui::Ui, bundle: &AnalysisBundle) {
        ui.heading("Regional Population Change (Last 5 Years)");
        ui.add_space(8.0);

        if bundle.regional.is_empty() {
            ui.label(
                RichText::new("Not enough history for a five-year comparison.")
                    .color(Color32::GRAY),
            );
            return;
        }

        ui.label(RichText::new("Population Change").strong());
        ChartPlotter::draw_diff_bars(ui, &bundle.regional.by_diff);

        ui.add_space(14.0);
        ui.label(RichText::new("Population Change Rate (%)").strong());
        ChartPlotter::draw_rate_bars(ui, &bundle.regional.by_rate);
    }

    fn show_changes(ui: &mut egui::Ui, bundle: &AnalysisBundle) {
        ui.heading("Top Year-over-Year Changes");
        ui.add_space(8.0);
        if bundle.top_changes.is_empty() {
            ui.label(RichText::new("No year-over-year changes to show.").color(Color32::GRAY));
            return;
        }
        ChartPlotter::draw_changes_table(ui, &bundle.top_changes);
    }

    fn show_area(ui: &mut egui::Ui, bundle: &AnalysisBundle) {
        ui.heading("Population by Region");
        ui.add_space(8.0);
        if bundle.pivot.is_empty() {
            ui.label(RichText::new("No regional data to chart.").color(Color32::GRAY));
            return;
        }
        ChartPlotter::draw_area_chart(ui, &bundle.pivot);
    }
}
