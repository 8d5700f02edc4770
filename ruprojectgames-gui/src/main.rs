use std::sync::Arc;

use iced::{
    Alignment, Color, Element,
    Length::{self, Fill},
    Task, Theme, application, clipboard,
    widget::{
        button, center, column, container, mouse_area, opaque, pick_list, row, space, stack, text,
    },
};
use ruprojectgames_lib::{HttpBackend, TranslationRecord, config::CoreConfig, notify::Notification};
use strum::IntoEnumIterator;
use tracing::{error, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use crate::{
    components::{
        SharedBackend,
        admin_panel::{self, AdminPanel},
        guide,
        listing::{self, Listing},
        toasts::{self, Toasts},
    },
    config::{Cfg, GuiConfig},
};

pub mod components;
pub mod config;

fn main() -> iced::Result {
    // Human friendly panicking in release mode
    human_panic::setup_panic!();

    // Logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set up logging: {e}");
    }

    let core = CoreConfig::load().unwrap_or_else(|e| {
        error!("{e}, using the default configuration");
        CoreConfig::default()
    });
    let backend: SharedBackend = match connect(&core) {
        Ok(backend) => Arc::new(backend),
        Err(e) => {
            error!("Unable to start: {e}");
            std::process::exit(1);
        }
    };
    let cfg = GuiConfig::load().into_handle();

    application(
        move || App::new(backend.clone(), cfg.clone()),
        App::update,
        App::view,
    )
    .theme(App::theme)
    .title(App::title)
    .run()
}

/// Build the backend from `core`, falling back to the stock endpoints when the configured
/// ones are unusable.
fn connect(core: &CoreConfig) -> ruprojectgames_lib::Result<HttpBackend> {
    HttpBackend::new(core).or_else(|e| {
        error!("{e}, using the default endpoints");
        let mut fallback = CoreConfig::default();
        fallback.request_timeout_secs = core.request_timeout_secs;
        HttpBackend::new(&fallback)
    })
}

#[derive(Debug, Clone)]
enum Message {
    AdminButtonPressed,
    ThemeSelected(config::Theme),
    DeleteConfirmed,
    DeleteCancelled,
    // Components
    Listing(listing::Message),
    AdminPanel(admin_panel::Message),
    Toasts(toasts::Message),
}

struct App {
    title: String,
    cfg: Cfg,
    /// Row waiting for the admin to confirm its removal
    pending_delete: Option<TranslationRecord>,
    // Components
    listing: Listing,
    admin_panel: AdminPanel,
    toasts: Toasts,
}

impl App {
    pub fn new(backend: SharedBackend, cfg: Cfg) -> (Self, Task<Message>) {
        let (listing, listing_task) = Listing::new(backend.clone(), cfg.clone());

        (
            Self {
                title: "RuProjectGames".into(),
                cfg,
                pending_delete: None,
                listing,
                admin_panel: AdminPanel::new(backend),
                toasts: Toasts::new(),
            },
            listing_task.map(Message::Listing),
        )
    }

    // Update application state based on messages passed by view()
    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::AdminButtonPressed => {
                self.admin_panel.toggle();
                Task::none()
            }
            Message::ThemeSelected(theme) => {
                let mut cfg = self.cfg.write();
                cfg.theme = theme;
                if let Err(e) = cfg.save() {
                    warn!("Failed to save the theme: {e}");
                }
                Task::none()
            }
            Message::DeleteConfirmed => match self.pending_delete.take() {
                Some(record) => {
                    let action = self.admin_panel.delete(record.id().clone());
                    self.admin_panel_action(action)
                }
                None => Task::none(),
            },
            Message::DeleteCancelled => {
                self.pending_delete = None;
                Task::none()
            }
            // Redirect messages to relevant child components
            Message::Listing(message) => match self.listing.update(message) {
                listing::Action::None => Task::none(),
                listing::Action::Run(task) => task.map(Message::Listing),
                listing::Action::Notify(notification) => self.notify(notification),
                listing::Action::CopyLink(url) => Task::batch([
                    clipboard::write(url),
                    self.notify(Notification::success(
                        "Ссылка скопирована",
                        "Вставьте её в адресную строку браузера",
                    )),
                ]),
                listing::Action::Delete(id) => {
                    self.pending_delete = self.listing.store().get(&id).cloned();
                    Task::none()
                }
            },
            Message::AdminPanel(message) => {
                let action = self.admin_panel.update(message);
                self.admin_panel_action(action)
            }
            Message::Toasts(message) => {
                self.toasts.update(message);
                Task::none()
            }
        }
    }

    fn admin_panel_action(&mut self, action: admin_panel::Action) -> Task<Message> {
        match action {
            admin_panel::Action::None => Task::none(),
            admin_panel::Action::Run(task) => task.map(Message::AdminPanel),
            admin_panel::Action::Notify(notification) => self.notify(notification),
            admin_panel::Action::Reload(notification) => Task::batch([
                self.notify(notification),
                self.listing.refresh().map(Message::Listing),
            ]),
        }
    }

    fn notify(&mut self, notification: Notification) -> Task<Message> {
        self.toasts.push(notification).map(Message::Toasts)
    }

    // Render the application and pass along messages from components to update()
    pub fn view(&self) -> Element<'_, Message> {
        let admin_label = if self.admin_panel.is_visible() {
            "Скрыть админ-панель"
        } else {
            "Админ-панель"
        };
        let themes: Vec<config::Theme> = config::Theme::iter().collect();

        let header = row![
            column![
                text(self.title.as_str()).size(28),
                text("Русификаторы модов для популярных игр").size(14)
            ],
            space::horizontal(),
            pick_list(themes, Some(self.cfg.read().theme), Message::ThemeSelected),
            button(admin_label)
                .style(button::secondary)
                .on_press(Message::AdminButtonPressed)
        ]
        .spacing(10)
        .align_y(Alignment::Center);

        let mut content = column![header].spacing(20).padding(20).height(Fill);

        // Delete buttons come and go with the panel
        let gateway = if self.admin_panel.is_visible() {
            content = content.push(self.admin_panel.view().map(Message::AdminPanel));
            self.admin_panel.writable_gateway()
        } else {
            None
        };

        content = content
            .push(self.listing.view(gateway).map(Message::Listing))
            .push(guide::view());

        let base = stack![content, self.toasts.view().map(Message::Toasts)]
            .width(Fill)
            .height(Fill);

        match &self.pending_delete {
            Some(record) => modal(
                base,
                confirm_delete(record),
                Some(Message::DeleteCancelled),
            ),
            None => base.into(),
        }
    }

    pub fn title(&self) -> String {
        self.title.clone()
    }

    pub fn theme(&self) -> Theme {
        self.cfg.read().theme()
    }
}

fn confirm_delete(record: &TranslationRecord) -> Element<'_, Message> {
    container(
        column![
            text("Удалить русификатор?").size(20),
            text(format!("{} {}", record.mod_name(), record.version())),
            row![
                space::horizontal(),
                button("Отмена")
                    .style(button::secondary)
                    .on_press(Message::DeleteCancelled),
                button("Удалить")
                    .style(button::danger)
                    .on_press(Message::DeleteConfirmed)
            ]
            .spacing(10)
        ]
        .spacing(15),
    )
    .padding(20)
    .width(400)
    .style(container::rounded_box)
    .into()
}

pub fn modal<'a, Message>(
    base: impl Into<Element<'a, Message>>,
    content: impl Into<Element<'a, Message>>,
    on_click_outside: Option<Message>,
) -> Element<'a, Message>
where
    Message: Clone + 'a,
{
    let mouse_area = mouse_area(center(opaque(content)).style(|_theme| {
        container::Style {
            background: Some(
                Color {
                    a: 0.8,
                    ..Color::BLACK
                }
                .into(),
            ),
            ..container::Style::default()
        }
    }));

    stack![
        base.into(),
        opaque(if let Some(msg) = on_click_outside {
            mouse_area.on_press(msg)
        } else {
            mouse_area
        })
    ]
    .width(Length::Fill)
    .height(Length::Fill)
    .into()
}
