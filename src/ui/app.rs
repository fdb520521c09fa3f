//! Application shell: eframe host wiring the timeline to its collaborators.

use std::cell::Cell;
use std::path::PathBuf;
use std::rc::Rc;

use chrono::{DateTime, Duration, Local, NaiveDate, TimeZone};
use directories::ProjectDirs;

use crate::models::event::Event;
use crate::models::settings::TimelineSettings;
use crate::services::database::Database;
use crate::services::event::EventService;
use crate::services::notifier::{ChangeNotifier, Subscription};
use crate::services::settings::SettingsService;
use crate::services::store::EventStore;
use crate::ui::event_dialog::{render_event_dialog, EventDialogResult, EventDialogState};
use crate::ui::get_week_start;
use crate::ui::timeline_view::render_timeline;
use crate::ui::toast::ToastManager;

pub struct TimelineApp {
    /// Leaked for the 'static lifetime required by eframe.
    database: &'static Database,
    settings: TimelineSettings,
    /// Leftmost visible day.
    first_day: NaiveDate,
    /// Events of the visible range, re-fetched when the notifier fires.
    events: Vec<Event>,
    dialog: Option<EventDialogState>,
    toasts: ToastManager,
    notifier: Rc<ChangeNotifier>,
    refresh_needed: Rc<Cell<bool>>,
    subscription: Option<Subscription>,
}

impl TimelineApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let database = initialize_database();
        let settings = load_settings_or_default(database);
        let first_day = get_week_start(Local::now().date_naive(), 1);

        let notifier = Rc::new(ChangeNotifier::new());
        let refresh_needed = Rc::new(Cell::new(true));
        let flag = Rc::clone(&refresh_needed);
        let subscription = Some(notifier.subscribe(move || flag.set(true)));

        Self {
            database,
            settings,
            first_day,
            events: Vec::new(),
            dialog: None,
            toasts: ToastManager::new(),
            notifier,
            refresh_needed,
            subscription,
        }
    }

    fn visible_range(&self) -> Option<(DateTime<Local>, DateTime<Local>)> {
        let start = day_start(self.first_day)?;
        let end = day_start(self.first_day + Duration::days(self.settings.days_visible as i64))?;
        Some((start, end))
    }

    fn refetch(&mut self) {
        let Some((start, end)) = self.visible_range() else {
            return;
        };
        let service = EventService::new(self.database.connection());
        match service.fetch_events(start, end) {
            Ok(events) => self.events = events,
            Err(err) => {
                log::error!("Failed to fetch events: {:#}", err);
                self.toasts.error("Failed to load events");
                self.events = Vec::new();
            }
        }
    }

    fn render_toolbar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Timeboard");
                ui.separator();

                if ui.button("◀").clicked() {
                    self.first_day = self.first_day - Duration::days(self.settings.days_visible as i64);
                    self.refresh_needed.set(true);
                }
                if ui.button("Today").clicked() {
                    self.first_day = get_week_start(Local::now().date_naive(), 1);
                    self.refresh_needed.set(true);
                }
                if ui.button("▶").clicked() {
                    self.first_day = self.first_day + Duration::days(self.settings.days_visible as i64);
                    self.refresh_needed.set(true);
                }

                let last_day =
                    self.first_day + Duration::days(self.settings.days_visible as i64 - 1);
                ui.label(format!(
                    "{} – {}",
                    self.first_day.format("%b %d"),
                    last_day.format("%b %d, %Y")
                ));
            });
        });
    }

    fn render_dialog(&mut self, ctx: &egui::Context) {
        let Some(mut state) = self.dialog.take() else {
            return;
        };

        match render_event_dialog(ctx, &mut state) {
            None => self.dialog = Some(state),
            Some(EventDialogResult::Cancel) => {}
            Some(EventDialogResult::Save(event)) => {
                let service = EventService::new(self.database.connection());
                let saved = if state.event_id.is_some() {
                    service.update(&event)
                } else {
                    service.create(event).map(|_| ())
                };
                match saved {
                    Ok(()) => {
                        self.toasts.info("Event saved");
                        self.notifier.notify();
                    }
                    Err(err) => {
                        log::error!("Failed to save event: {:#}", err);
                        state.error = Some("Failed to save event".to_string());
                        self.dialog = Some(state);
                    }
                }
            }
            Some(EventDialogResult::Delete(id)) => {
                let service = EventService::new(self.database.connection());
                match service.delete(&id) {
                    Ok(()) => {
                        self.toasts.info("Event deleted");
                        self.notifier.notify();
                    }
                    Err(err) => {
                        log::error!("Failed to delete event {}: {:#}", id, err);
                        self.toasts.error("Failed to delete event");
                    }
                }
            }
        }
    }
}

impl eframe::App for TimelineApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.refresh_needed.replace(false) {
            self.refetch();
        }

        self.render_toolbar(ctx);

        let service = EventService::new(self.database.connection());
        let mut interaction = None;
        egui::CentralPanel::default().show(ctx, |ui| {
            interaction = Some(render_timeline(
                ui,
                self.first_day,
                &self.events,
                &self.settings,
                &service,
            ));
        });

        if let Some(interaction) = interaction {
            if let Some(event) = interaction.event_to_edit {
                self.dialog = Some(EventDialogState::for_event(&event));
            }
            if let Some((day, time)) = interaction.create_at {
                self.dialog = Some(EventDialogState::for_new(day, time));
            }
            if let Some(moved) = interaction.rescheduled {
                let persisted = interaction.persistence_error.is_none();
                // Optimistic: the block renders at its new slot immediately.
                if let Some(existing) = self.events.iter_mut().find(|e| e.id == moved.id) {
                    *existing = moved;
                }
                if persisted {
                    self.notifier.notify();
                }
            }
            if let Some(message) = interaction.persistence_error {
                self.toasts.error(message);
            }
        }

        self.render_dialog(ctx);
        self.toasts.render(ctx);
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        if let Some(subscription) = self.subscription.take() {
            self.notifier.unsubscribe(subscription);
        }
    }
}

fn day_start(day: NaiveDate) -> Option<DateTime<Local>> {
    // earliest() resolves the DST gap when midnight does not exist.
    Local
        .from_local_datetime(&day.and_hms_opt(0, 0, 0)?)
        .earliest()
}

fn resolve_database_path() -> PathBuf {
    if cfg!(debug_assertions) {
        return PathBuf::from("timeboard.db");
    }
    ProjectDirs::from("", "", "timeboard")
        .map(|dirs| {
            let data_dir = dirs.data_dir();
            if let Err(err) = std::fs::create_dir_all(data_dir) {
                log::warn!("Failed to create data directory: {}", err);
            }
            data_dir.join("timeboard.db")
        })
        .unwrap_or_else(|| PathBuf::from("timeboard.db"))
}

/// Initialize the database and leak it for the 'static lifetime eframe needs.
fn initialize_database() -> &'static Database {
    let path = resolve_database_path();
    let db = match Database::new(path.to_str().unwrap_or("timeboard.db")) {
        Ok(db) => {
            if let Err(err) = db.initialize_schema() {
                log::warn!("Failed to initialize database schema: {}", err);
            }
            db
        }
        Err(err) => {
            log::warn!("Failed to open database, using in-memory fallback: {}", err);
            Database::new(":memory:").expect("Failed to create fallback in-memory database")
        }
    };
    Box::leak(Box::new(db))
}

fn load_settings_or_default(database: &Database) -> TimelineSettings {
    SettingsService::new(database).get().unwrap_or_else(|err| {
        log::warn!("Failed to load settings, using defaults: {}", err);
        TimelineSettings::default()
    })
}
