use iced::{
    Element,
    Length::Fill,
    widget::{Column, column, container, row, text},
};
use ruprojectgames_lib::Game;
use strum::IntoEnumIterator;

/// How to install a downloaded translation, one card per game.
pub fn view<'a, Message: 'a>() -> Element<'a, Message> {
    let cards = Game::iter().map(|game| {
        let steps = game
            .install_steps()
            .into_iter()
            .zip(1..)
            .map(|(step, n)| text(format!("{n}. {step}")).size(14).into());

        container(
            column![
                text(game.name()).size(18),
                Column::with_children(steps).spacing(4)
            ]
            .spacing(8),
        )
        .padding(15)
        .width(Fill)
        .style(container::rounded_box)
        .into()
    });

    column![
        text("Как установить русификатор").size(22),
        row(cards).spacing(10)
    ]
    .spacing(10)
    .into()
}
