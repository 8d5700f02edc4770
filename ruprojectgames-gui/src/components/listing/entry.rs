use iced::{
    Alignment, Element,
    Length::Fill,
    widget::{button, column, container, row, space, text},
};
use ruprojectgames_lib::{TranslationRecord, gateway::SubmissionGateway};

use crate::components::listing::Message;

/// One published translation with its download button, and a delete button for admins.
pub fn view<'a>(
    record: &'a TranslationRecord,
    gateway: Option<&'a SubmissionGateway>,
) -> Element<'a, Message> {
    let details = column![
        text(record.mod_name().as_str()).size(18),
        text(record.game().name()).size(13),
        text(format!(
            "Автор: {} • Версия: {}",
            record.author(),
            record.version()
        ))
        .size(13),
    ]
    .spacing(2);

    let mut actions = row![
        button("Скачать")
            .style(button::primary)
            .on_press(Message::DownloadButtonPressed(record.download_url().clone()))
    ]
    .spacing(5);

    if let Some(gateway) = gateway {
        let delete = button("Удалить").style(button::danger);
        actions = actions.push(if gateway.is_deleting(record.id()) {
            delete
        } else {
            delete.on_press(Message::DeleteButtonPressed(record.id().clone()))
        });
    }

    container(row![details, space::horizontal(), actions].align_y(Alignment::Center))
        .padding(10)
        .width(Fill)
        .style(container::rounded_box)
        .into()
}
