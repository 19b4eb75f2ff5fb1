use eframe::egui;
use egui_plot::{Line, Plot, PlotPoints};

use lander_sim::config::Scenario;
use lander_sim::sim::{Channel, ControllerKind, Outcome, Run};

fn main() -> eframe::Result {
    let scenario = Scenario::default();
    let app = LanderViz::new(scenario);
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1400.0, 900.0]),
        ..Default::default()
    };
    eframe::run_native("Lander Descent Simulator", options, Box::new(|_| Ok(Box::new(app))))
}

struct LanderViz {
    scenario: Scenario,
    controller: ControllerKind,
    run: Option<Run>,
    error: Option<String>,
}

impl LanderViz {
    fn new(scenario: Scenario) -> Self {
        let mut app = Self { scenario, controller: ControllerKind::BangBang, run: None, error: None };
        app.rerun();
        app
    }

    fn rerun(&mut self) {
        let controller = self.controller.build(&self.scenario);
        match Run::from_scenario(&self.scenario, controller) {
            Ok(mut run) => {
                run.run_to_completion();
                self.run = Some(run);
                self.error = None;
            }
            Err(e) => {
                self.run = None;
                self.error = Some(e.to_string());
            }
        }
    }
}

impl eframe::App for LanderViz {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.heading(format!("Scenario: {}", self.scenario.name));
            ui.horizontal(|ui| {
                let before = self.controller;
                ui.selectable_value(&mut self.controller, ControllerKind::BangBang, "Bang-bang");
                ui.selectable_value(&mut self.controller, ControllerKind::Pid, "PID");
                ui.selectable_value(&mut self.controller, ControllerKind::Idle, "Idle");
                if ui.button("Restart").clicked() || before != self.controller {
                    self.rerun();
                }
            });
            if let Some(err) = &self.error {
                ui.colored_label(egui::Color32::RED, err);
            }
            if let Some(run) = &self.run {
                let s = run.state();
                let verdict = match run.outcome() {
                    Outcome::Landed => "LANDED",
                    Outcome::Crashed => "CRASHED",
                    Outcome::InFlight => "IN FLIGHT",
                };
                ui.label(format!(
                    "{verdict}  |  t = {:.2} s  |  y = {:.2} m  |  vy = {:.2} m/s  |  th = {:.4} rad",
                    s.time, s.pos.y, s.vel.y, s.th
                ));
            }
        });

        let Some(run) = &self.run else { return };
        let log = run.telemetry();

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                let available = ui.available_width();
                let cell_w = available / 3.0 - 8.0;
                let cell_h = 200.0;

                for row in Channel::ALL.chunks(3) {
                    ui.horizontal(|ui| {
                        for &channel in row {
                            ui.vertical(|ui| {
                                ui.label(channel.title());
                                let points: PlotPoints = channel.series(log).into_iter().collect();
                                Plot::new(channel.title())
                                    .width(cell_w)
                                    .height(cell_h)
                                    .x_axis_label("Time (s)")
                                    .show(ui, |plot_ui| {
                                        plot_ui.line(Line::new(channel.title(), points));
                                    });
                            });
                        }
                    });
                }

                // Height vs downrange
                ui.label("Trajectory (m)");
                let points: PlotPoints = log.states().map(|s| [s.pos.x, s.pos.y]).collect();
                Plot::new("trajectory")
                    .width(available - 8.0)
                    .height(cell_h * 1.5)
                    .x_axis_label("Downrange (m)")
                    .show(ui, |plot_ui| {
                        plot_ui.line(Line::new("Trajectory", points));
                    });
            });
        });
    }
}
