use iced::{
    Element,
    widget::{button, column, pick_list, row, text, text_input},
};
use ruprojectgames_lib::{
    Game,
    gateway::{SubmissionGateway, SubmitState},
};
use strum::IntoEnumIterator;

use crate::components::admin_panel::Message;

pub fn view(gateway: &SubmissionGateway) -> Element<'_, Message> {
    let form = gateway.form();
    let submitting = gateway.is_submitting();

    let games: Vec<Game> = Game::iter().collect();
    let mut submit = button(if submitting {
        "Добавление..."
    } else {
        "Добавить русификатор"
    })
    .style(button::primary);
    if !submitting {
        submit = submit.on_press(Message::SubmitButtonPressed);
    }

    let mut content = column![
        text("Добавить русификатор").size(18),
        column![
            text("Игра").size(13),
            pick_list(games, Some(form.game), Message::GameSelected),
        ]
        .spacing(4),
        field(
            "Название мода",
            "Например: Falskaar",
            &form.mod_name,
            Message::ModNameChanged,
            submitting
        ),
        field(
            "Автор русификатора",
            "Ваш ник или имя команды",
            &form.author,
            Message::AuthorChanged,
            submitting
        ),
        row![
            field(
                "Версия",
                "1.0 или 2.5.3",
                &form.version,
                Message::VersionChanged,
                submitting
            ),
            field(
                "Ссылка на скачивание",
                "https://...",
                &form.download_url,
                Message::DownloadUrlChanged,
                submitting
            ),
        ]
        .spacing(10),
        submit,
    ]
    .spacing(10);

    // Failures stay next to the form until the next attempt
    if let SubmitState::Failed(reason) = gateway.state() {
        content = content.push(text(reason.as_str()).size(13).style(text::danger));
    }

    content.into()
}

/// A labelled text input that stops taking input while a submission is in flight.
fn field<'a>(
    label: &'a str,
    placeholder: &'a str,
    value: &'a str,
    on_input: fn(String) -> Message,
    locked: bool,
) -> Element<'a, Message> {
    let input = text_input(placeholder, value);

    column![
        text(label).size(13),
        if locked { input } else { input.on_input(on_input) }
    ]
    .spacing(4)
    .into()
}
