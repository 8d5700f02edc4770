use std::time::Duration;

use iced::{
    Alignment, Element, Theme, border,
    Length::Fill,
    Task,
    widget::{Column, button, column, container, row, space, text},
};
use ruprojectgames_lib::notify::{Level, Notification};

const LIFETIME: Duration = Duration::from_secs(5);
const MAX_VISIBLE: usize = 5;

#[derive(Debug, Clone)]
pub enum Message {
    Dismiss(u64),
}

struct Toast {
    id: u64,
    notification: Notification,
}

/// Notifications stacked in the bottom right corner. Each one goes away on its own after a few
/// seconds or when dismissed.
#[derive(Default)]
pub struct Toasts {
    items: Vec<Toast>,
    next_id: u64,
}

impl Toasts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, notification: Notification) -> Task<Message> {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        self.items.push(Toast { id, notification });

        // The oldest toast makes room once the stack is full
        if self.items.len() > MAX_VISIBLE {
            self.items.remove(0);
        }

        Task::perform(async { tokio::time::sleep(LIFETIME).await }, move |()| {
            Message::Dismiss(id)
        })
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn update(&mut self, message: Message) {
        match message {
            Message::Dismiss(id) => self.items.retain(|toast| toast.id != id),
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        let toasts = self.items.iter().map(|toast| {
            let level = toast.notification.level;

            container(
                row![
                    column![
                        text(toast.notification.title.as_str()).size(15),
                        text(toast.notification.body.as_str()).size(13)
                    ]
                    .spacing(2),
                    space::horizontal(),
                    button("✕")
                        .style(button::text)
                        .on_press(Message::Dismiss(toast.id))
                ]
                .align_y(Alignment::Center),
            )
            .padding(12)
            .width(320)
            .style(move |theme: &Theme| {
                let palette = theme.extended_palette();
                let pair = match level {
                    Level::Success => palette.success.base,
                    Level::Error => palette.danger.base,
                };

                container::Style {
                    background: Some(pair.color.into()),
                    text_color: Some(pair.text),
                    border: border::rounded(6),
                    ..container::Style::default()
                }
            })
            .into()
        });

        container(Column::with_children(toasts).spacing(8))
            .padding(20)
            .align_right(Fill)
            .align_bottom(Fill)
            .into()
    }
}
