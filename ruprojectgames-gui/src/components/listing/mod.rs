use iced::{
    Alignment, Element,
    Length::Fill,
    Task,
    widget::{Column, button, column, container, row, scrollable, space, text, text_input},
};
use ruprojectgames_lib::{
    Result, TranslationId, TranslationRecord,
    filter::{self, FilterCriteria, Tab},
    gateway::SubmissionGateway,
    notify::{self, Notification},
    store::{ListingStore, LoadOutcome, LoadState, LoadTicket},
};
use tracing::warn;

use crate::{components::SharedBackend, config::Cfg};

mod entry;

pub const EMPTY_LISTING: &str = "Русификаторы скоро появятся";

#[derive(Debug, Clone)]
pub enum Message {
    QueryChanged(String),
    TabSelected(Tab),
    RefreshButtonPressed,
    Loaded(LoadTicket, Result<Vec<TranslationRecord>>),
    DownloadButtonPressed(String),
    DeleteButtonPressed(TranslationId),
}

/// Action used for communicating with the parent component
pub enum Action {
    None,
    Run(Task<Message>),
    Notify(Notification),
    CopyLink(String),
    Delete(TranslationId),
}

/// Search box, game tabs and the filtered list of translations.
pub struct Listing {
    backend: SharedBackend,
    cfg: Cfg,
    store: ListingStore,
    criteria: FilterCriteria,
}

impl Listing {
    pub fn new(backend: SharedBackend, cfg: Cfg) -> (Self, Task<Message>) {
        let tab = cfg.read().listing.last_tab;
        let mut listing = Self {
            backend,
            cfg,
            store: ListingStore::new(),
            criteria: FilterCriteria::new("", tab),
        };
        let task = listing.refresh();

        (listing, task)
    }

    /// Fetch the whole catalogue again. A load that is still running is superseded.
    pub fn refresh(&mut self) -> Task<Message> {
        let ticket = self.store.begin_load();
        let backend = self.backend.clone();

        Task::perform(async move { backend.list(None).await }, move |result| {
            Message::Loaded(ticket, result)
        })
    }

    pub fn store(&self) -> &ListingStore {
        &self.store
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn update(&mut self, message: Message) -> Action {
        match message {
            Message::QueryChanged(query) => {
                self.criteria.query = query;
                Action::None
            }
            Message::TabSelected(tab) => {
                self.criteria.tab = tab;

                let mut cfg = self.cfg.write();
                cfg.listing.last_tab = tab;
                if let Err(e) = cfg.save() {
                    warn!("Failed to remember the selected tab: {e}");
                }

                Action::None
            }
            Message::RefreshButtonPressed => Action::Run(self.refresh()),
            Message::Loaded(ticket, result) => match self.store.finish_load(ticket, result) {
                LoadOutcome::Failed(e) => {
                    Action::Notify(Notification::failed(notify::Action::Load, &e))
                }
                LoadOutcome::Loaded { .. } | LoadOutcome::Stale => Action::None,
            },
            Message::DownloadButtonPressed(url) => Action::CopyLink(url),
            Message::DeleteButtonPressed(id) => Action::Delete(id),
        }
    }

    /// `gateway` is only passed while an admin is logged in; rows then get a delete button.
    pub fn view<'a>(&'a self, gateway: Option<&'a SubmissionGateway>) -> Element<'a, Message> {
        let search = text_input("Поиск по названию или автору...", &self.criteria.query)
            .on_input(Message::QueryChanged)
            .padding(10);

        let tabs = Tab::iter().fold(row![].spacing(5), |tabs, tab| {
            let style = if tab == self.criteria.tab {
                button::primary
            } else {
                button::subtle
            };
            tabs.push(
                button(text(tab.label()))
                    .style(style)
                    .on_press(Message::TabSelected(tab)),
            )
        });

        let refresh = if self.store.is_loading() {
            button("Обновить")
        } else {
            button("Обновить").on_press(Message::RefreshButtonPressed)
        };

        column![
            search,
            row![tabs, space::horizontal(), refresh.style(button::secondary)]
                .align_y(Alignment::Center),
            self.results(gateway),
        ]
        .spacing(10)
        .into()
    }

    fn results<'a>(&'a self, gateway: Option<&'a SubmissionGateway>) -> Element<'a, Message> {
        let visible = filter::filter(self.store.records(), &self.criteria);

        if visible.is_empty() {
            let message = match self.store.state() {
                LoadState::Idle | LoadState::Loading => "Загрузка...",
                LoadState::Failed(_) => "Не удалось загрузить список",
                LoadState::Loaded => EMPTY_LISTING,
            };

            return container(text(message).size(18))
                .center_x(Fill)
                .padding(40)
                .into();
        }

        let rows = visible
            .into_iter()
            .map(|record| entry::view(record, gateway));

        scrollable(Column::with_children(rows).spacing(8))
            .height(Fill)
            .into()
    }
}
