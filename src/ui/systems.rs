use crate::globe::resources::{ClimateData, GlobeScene, RegionSelection, ViewState};
use crate::ui::PANEL_WIDTH;
use crate::ui::widgets::{insight_summary, legend, region_breakdown};
use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};
use climategen::insight::year_insight;
use climategen::layer::Layer;
use climategen::timeline::PlaybackSpeed;

pub fn render_control_panel(
    mut contexts: EguiContexts,
    data: Res<ClimateData>,
    scene: Res<GlobeScene>,
    mut view: ResMut<ViewState>,
    mut selection: ResMut<RegionSelection>,
) {
    // Resources are only written on interaction
    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };

    egui::SidePanel::right("control_panel")
        .exact_width(PANEL_WIDTH)
        .resizable(false)
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.heading("EcoVig-IA");
                ui.label(egui::RichText::new("Regional warming, extrapolated year by year").weak());
                ui.add_space(10.0);

                render_time_controls(ui, &mut view);

                ui.add_space(10.0);
                ui.separator();
                render_layer_selector(ui, &mut view, &data, &scene);

                ui.add_space(10.0);
                ui.separator();
                let layer_config = scene.composer().catalog().get(view.layer);
                legend(ui, layer_config);

                ui.add_space(10.0);
                ui.separator();
                let insight = year_insight(data.record(), &view.context(), selection.0.as_deref());
                ui.heading(format!("Year {}", insight.year));
                insight_summary(ui, &insight, layer_config);

                ui.add_space(10.0);
                ui.separator();
                ui.heading("Regions");
                render_region_list(ui, &data, &mut selection);
                if let Some(breakdown) = &insight.selection {
                    ui.add_space(6.0);
                    region_breakdown(ui, breakdown);
                }

                ui.add_space(10.0);
                ui.separator();
                let metadata = data.record().metadata();
                ui.label(
                    egui::RichText::new(format!("Baseline period: {}", metadata.baseline_period))
                        .small(),
                );
                if !metadata.notes.is_empty() {
                    ui.label(egui::RichText::new(&metadata.notes).small().weak());
                }
            });
        });
}

fn render_time_controls(ui: &mut egui::Ui, view: &mut ResMut<ViewState>) {
    let (min_year, max_year) = view.year_range();
    let mut year = view.year();
    if ui
        .add(egui::Slider::new(&mut year, min_year..=max_year).text("Year"))
        .changed()
    {
        view.set_year(year);
    }

    ui.horizontal(|ui| {
        if ui.button("◀").on_hover_text("Previous year (←)").clicked() {
            view.step(false);
        }
        let label = if view.playing { "Pause" } else { "Play" };
        if ui.button(label).on_hover_text("Space").clicked() {
            view.toggle_playback();
        }
        if ui.button("▶").on_hover_text("Next year (→)").clicked() {
            view.step(true);
        }

        ui.separator();
        for speed in PlaybackSpeed::ALL {
            if ui
                .selectable_label(view.speed == speed, format!("{}×", speed.multiplier()))
                .clicked()
            {
                view.speed = speed;
            }
        }
    });
}

fn render_layer_selector(
    ui: &mut egui::Ui,
    view: &mut ResMut<ViewState>,
    data: &ClimateData,
    scene: &GlobeScene,
) {
    ui.horizontal_wrapped(|ui| {
        for layer_config in scene.composer().catalog().iter() {
            let text = format!("{} {}", layer_config.icon, layer_config.label);
            if ui
                .selectable_label(view.layer == layer_config.layer, text)
                .on_hover_text(&layer_config.description)
                .clicked()
            {
                view.layer = layer_config.layer;
            }
        }
    });

    let variables = &data.record().metadata().variables_available;
    if variables.len() > 1 {
        let mut variable_id = view.variable_id.clone();
        egui::ComboBox::from_label("Variable")
            .selected_text(&variable_id)
            .show_ui(ui, |ui| {
                for variable in variables {
                    ui.selectable_value(&mut variable_id, variable.clone(), variable);
                }
            });
        if variable_id != view.variable_id {
            view.variable_id = variable_id;
        }
    }

    if view.layer != Layer::Anomaly {
        ui.label(
            egui::RichText::new("Index derived from the thermal anomaly").small().weak(),
        );
    }
}

fn render_region_list(
    ui: &mut egui::Ui,
    data: &ClimateData,
    selection: &mut ResMut<RegionSelection>,
) {
    for region in data.record().regions() {
        let selected = selection.0.as_deref() == Some(region.name.as_str());
        if ui.selectable_label(selected, &region.name).clicked() {
            selection.0 = if selected {
                None
            } else {
                Some(region.name.clone())
            };
        }
    }
}
