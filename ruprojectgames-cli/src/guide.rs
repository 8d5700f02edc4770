use clap::Args as ClapArgs;
use colored::Colorize;
use ruprojectgames_lib::Game;
use strum::IntoEnumIterator;

#[derive(ClapArgs, Debug, Clone)]
pub struct Args {
    /// Only show the instructions for this game
    #[arg(short, long, value_enum)]
    pub game: Option<Game>,
}

pub fn games() {
    for game in Game::iter() {
        println!("{game}");
    }
}

pub fn show(args: &Args) {
    println!("{}", "Как установить русификатор?".bold());

    let games: Vec<Game> = match args.game {
        Some(game) => vec![game],
        None => Game::iter().collect(),
    };

    for game in games {
        println!("\n{}", game.name().red().bold());
        for line in steps(game) {
            println!("{line}");
        }
    }
}

fn steps(game: Game) -> Vec<String> {
    game.install_steps()
        .iter()
        .zip(1..)
        .map(|(step, n)| format!("  {n}. {step}"))
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_steps_are_numbered() {
        assert_eq!(
            steps(Game::Witcher3),
            [
                "  1. Скачайте русификатор мода",
                "  2. Скопируйте файлы в папку Mods",
                "  3. Запустите игру через Script Merger",
            ]
        );
    }
}
