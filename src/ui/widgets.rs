use bevy_egui::egui;
use climategen::color_scale::Rgb;
use climategen::insight::{RegionBreakdown, YearInsight};
use climategen::layer::{Layer, LayerConfig};

const LEGEND_STEPS: usize = 48;

pub fn color32(color: Rgb) -> egui::Color32 {
    let [r, g, b] = color.0;
    egui::Color32::from_rgb(r, g, b)
}

/// Gradient bar plus one labelled swatch per breakpoint
pub fn legend(ui: &mut egui::Ui, layer: &LayerConfig) {
    ui.label(egui::RichText::new(format!("{} {}", layer.icon, layer.label)).strong());
    ui.label(egui::RichText::new(&layer.description).small());

    let (rect, _) =
        ui.allocate_exact_size(egui::vec2(ui.available_width(), 14.0), egui::Sense::hover());
    let colors = layer.scale.sample_gradient(LEGEND_STEPS);
    let step = rect.width() / colors.len() as f32;
    for (i, color) in colors.iter().enumerate() {
        let min = egui::pos2(rect.left() + i as f32 * step, rect.top());
        // Overlap by half a pixel so no seams show between cells
        let cell = egui::Rect::from_min_size(min, egui::vec2(step + 0.5, rect.height()));
        ui.painter().rect_filled(cell, 0.0, color32(*color));
    }

    ui.horizontal_wrapped(|ui| {
        for breakpoint in layer.scale.breakpoints() {
            ui.colored_label(color32(breakpoint.color), "■");
            ui.label(format_value(breakpoint.value, layer.layer));
        }
    });
    ui.label(egui::RichText::new(&layer.unit).small().weak());
}

pub fn insight_summary(ui: &mut egui::Ui, insight: &YearInsight, layer: &LayerConfig) {
    ui.label(&insight.interpretation);
    ui.add_space(4.0);
    egui::Grid::new("insight_grid")
        .num_columns(2)
        .striped(true)
        .show(ui, |ui| {
            ui.label("Global average");
            ui.label(format!(
                "{} {}",
                format_value(insight.global_avg, insight.layer),
                layer.unit
            ));
            ui.end_row();

            ui.label("Change vs. baseline");
            let change = match insight.layer {
                Layer::Anomaly => format!("{:+.2} °C", insight.change_vs_baseline),
                Layer::Drought | Layer::FireRisk => {
                    format!("{:+.0}%", insight.change_vs_baseline * 100.0)
                }
            };
            ui.label(change);
            ui.end_row();

            ui.label("Observed period");
            ui.label(format!("{}%", insight.percentile));
            ui.end_row();

            ui.label("Regions monitored");
            ui.label(insight.regions_monitored.to_string());
            ui.end_row();

            ui.label("Extreme months");
            ui.label(format!(
                "{} warm / {} cold",
                insight.high_extremes_total, insight.low_extremes_total
            ));
            ui.end_row();

            if insight.layer != Layer::Anomaly {
                ui.label("Mean anomaly");
                ui.label(format!("{:+.2} °C", insight.mean_anomaly));
                ui.end_row();
            }

            if let Some(count) = insight.regions_over_threshold {
                ui.label("Regions on alert");
                ui.label(count.to_string());
                ui.end_row();
            }
        });
}

pub fn region_breakdown(ui: &mut egui::Ui, region: &RegionBreakdown) {
    ui.label(egui::RichText::new(&region.name).strong());
    egui::Grid::new("region_grid").num_columns(2).show(ui, |ui| {
        ui.label("Baseline");
        ui.label(format!("{:.1} °C", region.baseline));
        ui.end_row();

        ui.label("Temperature");
        ui.label(format!("{:.1} °C", region.temperature));
        ui.end_row();

        ui.label("Anomaly");
        ui.label(format!("{:+.2} °C", region.anomaly));
        ui.end_row();

        ui.label("Warming");
        ui.label(format!("{:+.2} °C / decade", region.decadal_trend));
        ui.end_row();

        ui.label("Extreme months");
        ui.label(format!("{} warm / {} cold", region.high_extremes, region.low_extremes));
        ui.end_row();

        if let Some(month) = &region.latest_high_extreme {
            ui.label("Latest warm extreme");
            ui.label(month);
            ui.end_row();
        }
    });
}

fn format_value(value: f32, layer: Layer) -> String {
    match layer {
        Layer::Anomaly => format!("{value:+.1}"),
        Layer::Drought | Layer::FireRisk => format!("{value:.2}"),
    }
}
