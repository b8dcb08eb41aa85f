use std::cell::RefCell;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

use eframe::egui::{self, CentralPanel, Color32, Context, RichText};
use eframe::{App, Frame};
use egui_reorder::{ReorderList, ReorderResponse, ReorderUi};
use tracing_subscriber::EnvFilter;

/// One section of the resume. Order in the list is the order the resume
/// renders in.
#[derive(Clone)]
struct Section {
    title: &'static str,
    tint: Color32,
}

impl Section {
    fn new(title: &'static str, tint: Color32) -> Self {
        Self { title, tint }
    }
}

// row identity follows the section title, which is stable across reorders
impl Hash for Section {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.title.hash(state);
    }
}

fn default_sections() -> Vec<Section> {
    vec![
        Section::new("Profile", egui::hex_color!("#fc9d9a")),
        Section::new("Experience", egui::hex_color!("#f9cdad")),
        Section::new("Education", egui::hex_color!("#c8c8a9")),
        Section::new("Skills", egui::hex_color!("#83af9b")),
        Section::new("Projects", egui::hex_color!("#ecd078")),
        Section::new("References", egui::hex_color!("#53777a")),
    ]
}

struct ResumeApp {
    sections: ReorderList<Section>,
    reorder: ReorderUi,
    /// Orders the reorder callback has reported, newest last.
    notified: Rc<RefCell<Vec<&'static str>>>,
    status: String,
}

impl ResumeApp {
    fn new() -> Self {
        let notified = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&notified);
        let sections = ReorderList::new(default_sections()).on_reorder(move |sections| {
            let titles: Vec<&'static str> = sections.iter().map(|s| s.title).collect();
            tracing::info!(?titles, "section order changed");
            *sink.borrow_mut() = titles;
        });

        Self {
            sections,
            reorder: ReorderUi::default(),
            notified,
            status: String::new(),
        }
    }
}

impl App for ResumeApp {
    fn update(&mut self, ctx: &Context, _frame: &mut Frame) {
        CentralPanel::default().show(ctx, |ui| {
            ui.heading("Resume sections");
            ui.label("Drag a handle to change the order the resume renders in.");
            ui.add_space(8.0);

            let response =
                self.reorder
                    .ui(ui, &mut self.sections, |ui, handle, _index, section| {
                        ui.horizontal(|ui| {
                            handle.ui(ui, section, |ui| {
                                ui.label(RichText::new("≡").color(section.tint).strong());
                            });
                            ui.label(section.title);
                        });
                    });

            match response {
                ReorderResponse::Completed {
                    from,
                    to,
                    changed: true,
                } => {
                    self.status = format!("Moved section from position {from} to {to}");
                }
                ReorderResponse::Canceled => {
                    self.status = "Drag canceled".to_owned();
                }
                _ => {}
            }

            ui.add_space(8.0);
            if ui.button("Restore default order").clicked() {
                self.sections.reset();
                self.status = "Default order restored".to_owned();
            }

            if !self.status.is_empty() {
                ui.label(&self.status);
            }
            let notified = self.notified.borrow();
            if !notified.is_empty() {
                ui.label(format!("Last notified order: {}", notified.join(" → ")));
            }
        });
    }
}

fn main() -> Result<(), eframe::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    eframe::run_native(
        "Resume section reorder",
        eframe::NativeOptions::default(),
        Box::new(|_| Box::new(ResumeApp::new())),
    )
}
