use std::time::Instant;

use anyhow::Result;
use chrono::{Datelike, NaiveDate};
use eframe::egui::{self, Color32, RichText, ScrollArea, TextEdit, TopBottomPanel, Ui};
use tracing::{info, warn};

use crate::clipboard::{ClipboardWriter, SystemClipboard};
use crate::commit::Field;
use crate::config::{AppConfig, Theme};
use crate::form::CommitForm;
use crate::notify::{Notifier, Toasts};
use crate::picker::{MonthView, long_date};
use crate::session::CommandSession;

const WEEKDAY_HEADERS: [&str; 7] = ["Mo", "Tu", "We", "Th", "Fr", "Sa", "Su"];
const MUTED: Color32 = Color32::from_rgb(161, 180, 201);
const ERROR_TEXT: Color32 = Color32::from_rgb(255, 106, 106);
const ACCENT: Color32 = Color32::from_rgb(95, 220, 208);
const COMMAND_BG: Color32 = Color32::from_rgb(15, 23, 42);
const COMMAND_TEXT: Color32 = Color32::from_rgb(226, 234, 246);

pub fn run_gui(config: AppConfig) -> Result<()> {
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Steins Git")
            .with_inner_size([640.0, 760.0])
            .with_min_inner_size([480.0, 560.0]),
        ..Default::default()
    };

    let theme = config.theme;
    let app = SteinsGitApp::new(config.form(), Box::new(SystemClipboard::default()));
    info!(
        clock = config.clock.label(),
        today = %config.clock.today(),
        "opening commit form"
    );

    eframe::run_native(
        "Steins Git",
        native_options,
        Box::new(move |cc| {
            configure_theme(&cc.egui_ctx, theme);
            Ok(Box::new(app))
        }),
    )
    .map_err(|err| anyhow::anyhow!("failed to launch Steins Git window: {err}"))?;

    Ok(())
}

fn configure_theme(ctx: &egui::Context, theme: Theme) {
    let visuals = match theme {
        Theme::Dark => {
            let mut visuals = egui::Visuals::dark();
            visuals.override_text_color = Some(Color32::from_rgb(226, 234, 246));
            visuals.panel_fill = Color32::from_rgb(8, 16, 26);
            visuals.window_fill = Color32::from_rgb(12, 20, 32);
            visuals.widgets.inactive.bg_fill = Color32::from_rgb(16, 24, 38);
            visuals.widgets.hovered.bg_fill = Color32::from_rgb(26, 42, 62);
            visuals.widgets.active.bg_fill = Color32::from_rgb(34, 60, 88);
            visuals.selection.bg_fill = Color32::from_rgb(43, 148, 178);
            visuals
        }
        Theme::Light => egui::Visuals::light(),
    };
    ctx.set_visuals(visuals);
}

struct SteinsGitApp {
    form: CommitForm,
    date_input: String,
    time_input: String,
    message_input: String,
    calendar: Option<MonthView>,
    session: CommandSession,
    clipboard: Box<dyn ClipboardWriter>,
    toasts: Toasts,
}

impl SteinsGitApp {
    fn new(form: CommitForm, clipboard: Box<dyn ClipboardWriter>) -> Self {
        let date_input = form.value(Field::Date).to_string();
        let time_input = form.value(Field::Time).to_string();
        let message_input = form.value(Field::Message).to_string();
        Self {
            form,
            date_input,
            time_input,
            message_input,
            calendar: None,
            session: CommandSession::default(),
            clipboard,
            toasts: Toasts::default(),
        }
    }

    fn sync_input(&mut self, field: Field) {
        match field {
            Field::Date => self.form.set_date_text(self.date_input.clone()),
            Field::Time => self.form.set_time(self.time_input.clone()),
            Field::Message => self.form.set_message(self.message_input.clone()),
        }
    }

    fn pick_date(&mut self, date: NaiveDate) {
        self.form.set_date(date);
        self.date_input = self.form.value(Field::Date).to_string();
        self.calendar = None;
    }

    fn toggle_calendar(&mut self) {
        self.calendar = match self.calendar {
            Some(_) => None,
            None => {
                let bounds = self.form.bounds();
                let focus = self.form.selected_date().unwrap_or(bounds.max());
                Some(MonthView::containing(bounds.clamp(focus)))
            }
        };
    }

    fn submit(&mut self) {
        if let Err(errors) = self
            .session
            .submit(&self.form, self.clipboard.as_mut(), &mut self.toasts)
        {
            warn!(%errors, "generate pressed with an invalid form");
            self.toasts.notify(&errors.to_string());
        }
    }

    fn recopy(&mut self) {
        self.session.recopy(self.clipboard.as_mut(), &mut self.toasts);
    }

    fn show_date_field(&mut self, ui: &mut Ui) {
        ui.label(RichText::new("Date of commit").strong());
        ui.horizontal(|ui| {
            let picker_label = match self.form.selected_date() {
                Some(date) => RichText::new(long_date(date)),
                None => RichText::new("Pick a date").color(MUTED),
            };
            let pickable = !self.form.bounds().is_empty();
            if ui
                .add_enabled(
                    pickable,
                    egui::Button::new(picker_label).min_size(egui::vec2(240.0, 26.0)),
                )
                .clicked()
            {
                self.toggle_calendar();
            }
            if ui
                .add(
                    TextEdit::singleline(&mut self.date_input)
                        .hint_text("YYYY-MM-DD")
                        .desired_width(120.0),
                )
                .changed()
            {
                self.sync_input(Field::Date);
            }
        });

        if let Some(view) = self.calendar {
            self.show_calendar(ui, view);
        }
        self.show_field_footer(ui, Field::Date, "The date you want your commit to be made.");
    }

    fn show_calendar(&mut self, ui: &mut Ui, view: MonthView) {
        let bounds = *self.form.bounds();
        let cells = view.cells(&bounds, self.form.selected_date());
        let mut picked = None;

        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.horizontal(|ui| {
                let previous = view.previous(&bounds);
                if ui
                    .add_enabled(previous.is_some(), egui::Button::new("<"))
                    .clicked()
                {
                    self.calendar = previous;
                }
                ui.label(RichText::new(view.title()).strong());
                let next = view.next(&bounds);
                if ui
                    .add_enabled(next.is_some(), egui::Button::new(">"))
                    .clicked()
                {
                    self.calendar = next;
                }
            });

            egui::Grid::new("calendar_grid")
                .spacing([4.0, 4.0])
                .show(ui, |ui| {
                    for header in WEEKDAY_HEADERS {
                        ui.label(RichText::new(header).color(MUTED));
                    }
                    ui.end_row();

                    for week in cells.chunks(7) {
                        for cell in week {
                            let mut text = RichText::new(format!("{:>2}", cell.date.day()));
                            if !cell.in_month {
                                text = text.color(MUTED);
                            }
                            if ui
                                .add_enabled(
                                    cell.enabled,
                                    egui::SelectableLabel::new(cell.selected, text),
                                )
                                .clicked()
                            {
                                picked = Some(cell.date);
                            }
                        }
                        ui.end_row();
                    }
                });
        });

        if let Some(date) = picked {
            self.pick_date(date);
        }
    }

    fn show_time_field(&mut self, ui: &mut Ui) {
        ui.label(RichText::new("Time of commit").strong());
        if ui
            .add(
                TextEdit::singleline(&mut self.time_input)
                    .hint_text("HH:MM")
                    .desired_width(90.0),
            )
            .changed()
        {
            self.sync_input(Field::Time);
        }
        self.show_field_footer(ui, Field::Time, "The time you want your commit to be made.");
    }

    fn show_message_field(&mut self, ui: &mut Ui) {
        ui.label(RichText::new("Commit message").strong());
        if ui
            .add(
                TextEdit::singleline(&mut self.message_input)
                    .hint_text("fix bug")
                    .desired_width(f32::INFINITY),
            )
            .changed()
        {
            self.sync_input(Field::Message);
        }
        self.show_field_footer(ui, Field::Message, "The message you want your commit to have.");
    }

    fn show_field_footer(&self, ui: &mut Ui, field: Field, description: &str) {
        ui.label(RichText::new(description).small().color(MUTED));
        let state = self.form.field_state(field);
        if let Some(reason) = state.reason() {
            ui.label(RichText::new(reason).small().color(ERROR_TEXT));
        }
    }

    fn show_generate(&mut self, ui: &mut Ui) {
        let enabled = self.form.submit_enabled();
        let clicked = ui
            .add_enabled(
                enabled,
                egui::Button::new(RichText::new("Generate").strong())
                    .min_size(egui::vec2(120.0, 28.0)),
            )
            .clicked();
        let enter = enabled && ui.input(|input| input.key_pressed(egui::Key::Enter));
        if clicked || enter {
            self.submit();
        }
    }

    fn show_command(&mut self, ui: &mut Ui) {
        let Some(command) = self.session.current() else {
            return;
        };
        let text = command.to_string();

        ui.label(RichText::new("Your time travel commit command :").strong());
        let response = egui::Frame::group(ui.style())
            .fill(COMMAND_BG)
            .show(ui, |ui| {
                ui.add(
                    egui::Label::new(RichText::new(text).monospace().color(COMMAND_TEXT))
                        .wrap()
                        .sense(egui::Sense::click()),
                )
            })
            .inner;
        if response.on_hover_text("Click to copy again").clicked() {
            self.recopy();
        }
    }
}

impl eframe::App for SteinsGitApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();

        TopBottomPanel::top("header")
            .resizable(false)
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    ui.heading(RichText::new("Steins Git").strong().size(28.0));
                });
            });

        TopBottomPanel::bottom("footer")
            .resizable(false)
            .show(ctx, |ui| {
                let status = match self.toasts.active(now) {
                    Some(title) => RichText::new(title).color(ACCENT),
                    None => RichText::new("Click the generated command to copy it again.")
                        .color(MUTED),
                };
                ui.label(status);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            ScrollArea::vertical().show(ui, |ui| {
                self.show_date_field(ui);
                ui.add_space(16.0);
                self.show_time_field(ui);
                ui.add_space(16.0);
                self.show_message_field(ui);
                ui.add_space(20.0);
                self.show_generate(ui);
                ui.add_space(20.0);
                self.show_command(ui);
            });
        });

        if let Some(wait) = self.toasts.remaining(now) {
            ctx.request_repaint_after(wait);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::clipboard::ClipboardError;
    use crate::picker::DateBounds;
    use crate::session::COPIED_TITLE;

    #[derive(Clone, Default)]
    struct SharedClipboard {
        writes: Rc<RefCell<Vec<String>>>,
    }

    impl ClipboardWriter for SharedClipboard {
        fn copy(&mut self, text: &str) -> Result<(), ClipboardError> {
            self.writes.borrow_mut().push(text.to_string());
            Ok(())
        }
    }

    fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid test date")
    }

    fn app() -> (SteinsGitApp, SharedClipboard) {
        let clipboard = SharedClipboard::default();
        let form = CommitForm::new(DateBounds::up_to(ymd(2026, 10, 18)));
        (SteinsGitApp::new(form, Box::new(clipboard.clone())), clipboard)
    }

    #[test]
    fn typed_inputs_flow_into_form() {
        let (mut app, clipboard) = app();
        app.date_input = "2024-03-15".to_string();
        app.sync_input(Field::Date);
        app.time_input = "14:30".to_string();
        app.sync_input(Field::Time);
        assert!(!app.form.submit_enabled());

        app.message_input = "fix bug".to_string();
        app.sync_input(Field::Message);
        assert!(app.form.submit_enabled());

        app.submit();
        let expected = "git commit --date=\"2024-03-15T14:30Z\" -m \"fix bug\"";
        assert_eq!(
            app.session.current().map(ToString::to_string).as_deref(),
            Some(expected)
        );
        assert_eq!(*clipboard.writes.borrow(), vec![expected.to_string()]);
        assert_eq!(app.toasts.active(Instant::now()), Some(COPIED_TITLE));
    }

    #[test]
    fn picking_a_date_fills_text_and_closes_calendar() {
        let (mut app, _) = app();
        app.toggle_calendar();
        assert_eq!(app.calendar, Some(MonthView::containing(ymd(2026, 10, 1))));

        app.pick_date(ymd(1999, 12, 31));
        assert_eq!(app.date_input, "1999-12-31");
        assert_eq!(app.form.selected_date(), Some(ymd(1999, 12, 31)));
        assert!(app.calendar.is_none());
    }

    #[test]
    fn calendar_opens_on_selected_month() {
        let (mut app, _) = app();
        app.pick_date(ymd(1990, 5, 20));
        app.toggle_calendar();
        assert_eq!(app.calendar, Some(MonthView::containing(ymd(1990, 5, 9))));
        app.toggle_calendar();
        assert!(app.calendar.is_none());
    }

    #[test]
    fn recopy_without_command_does_nothing() {
        let (mut app, clipboard) = app();
        app.recopy();
        assert!(clipboard.writes.borrow().is_empty());
        assert_eq!(app.toasts.active(Instant::now()), None);
    }
}
