use crate::{
    route::variant::RouteVariant,
    ui::overlay::{LegendEntry, OverlayState},
};
use egui::{Color32, Rect, Sense, Stroke, Ui, Vec2};

/// Immediate-mode legend and variant toggle for a route map
///
/// # Examples
///
/// ```ignore
/// if let Some(variant) = RouteOverlay::new(&route_map.overlay_state()).show(ui) {
///     route_map.select_variant(variant);
/// }
/// ```
pub struct RouteOverlay<'a> {
    state: &'a OverlayState,
    swatch_width: f32,
    background: Color32,
}

impl<'a> RouteOverlay<'a> {
    pub fn new(state: &'a OverlayState) -> Self {
        Self {
            state,
            swatch_width: 28.0,
            background: Color32::from_black_alpha(180),
        }
    }

    pub fn swatch_width(mut self, width: f32) -> Self {
        self.swatch_width = width;
        self
    }

    pub fn background(mut self, color: Color32) -> Self {
        self.background = color;
        self
    }

    /// Draws the overlay; returns the variant the user picked, if any
    pub fn show(self, ui: &mut Ui) -> Option<RouteVariant> {
        if self.state.is_empty() {
            return None;
        }

        let mut picked = None;
        egui::Frame::none()
            .fill(self.background)
            .rounding(6.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                for entry in &self.state.legend {
                    ui.horizontal(|ui| {
                        self.paint_swatch(ui, entry);
                        ui.label(&entry.label);
                    });
                }

                if let Some(toggle) = &self.state.toggle {
                    ui.separator();
                    ui.horizontal(|ui| {
                        for variant in toggle.options() {
                            let selected = toggle.active == variant;
                            let response = ui.selectable_label(selected, toggle.caption(variant));
                            if response.clicked() && !selected {
                                picked = Some(variant);
                            }
                        }
                    });
                }
            });
        picked
    }

    fn paint_swatch(&self, ui: &mut Ui, entry: &LegendEntry) {
        let (rect, _) = ui.allocate_exact_size(Vec2::new(self.swatch_width, 12.0), Sense::hover());
        let stroke = Stroke::new(3.0, Color32::from(entry.color));
        let line = swatch_line(rect);

        if entry.dashed {
            ui.painter()
                .extend(egui::Shape::dashed_line(&line, stroke, 5.0, 4.0));
        } else {
            ui.painter().line_segment(line, stroke);
        }
    }
}

fn swatch_line(rect: Rect) -> [egui::Pos2; 2] {
    let y = rect.center().y;
    [egui::pos2(rect.left(), y), egui::pos2(rect.right(), y)]
}
