use clap::Args;
use colored::Colorize;
use ruprojectgames_lib::{
    Backend, Catalog, Game, Result, TranslationId, TranslationRecord,
    filter::Tab,
    notify::{Level, Notification},
};

#[derive(Args, Debug, Clone)]
pub struct ListArgs {
    /// Only show translations whose mod name or author contains this text
    #[arg(short, long)]
    pub query: Option<String>,
    /// Only show translations for this game
    #[arg(short, long, value_enum)]
    pub game: Option<Game>,
}

#[derive(Args, Debug, Clone)]
pub struct AdminArgs {
    /// Admin password
    #[arg(long, env = "RUPROJECTGAMES_PASSWORD", hide_env_values = true)]
    pub password: String,
}

#[derive(Args, Debug, Clone)]
pub struct AddArgs {
    #[arg(short, long, value_enum, default_value_t = Game::default())]
    pub game: Game,
    #[arg(long)]
    pub mod_name: String,
    #[arg(long)]
    pub author: String,
    #[arg(long)]
    pub mod_version: String,
    /// Download link of the translation archive
    #[arg(long)]
    pub url: String,
    #[command(flatten)]
    pub admin: AdminArgs,
}

#[derive(Args, Debug, Clone)]
pub struct RemoveArgs {
    pub id: String,
    #[command(flatten)]
    pub admin: AdminArgs,
}

pub async fn list<B: Backend>(catalog: &mut Catalog<B>, args: &ListArgs) -> Result<()> {
    catalog.load_game(args.game).await?;
    catalog.set_tab(Tab::from(args.game));
    catalog.set_query(args.query.clone().unwrap_or_default());

    let visible = catalog.visible();
    if visible.is_empty() {
        println!("{}", "Русификаторы скоро появятся".bold());
        return Ok(());
    }

    for record in visible {
        println!("{}", format_record(record));
    }

    Ok(())
}

pub async fn add<B: Backend>(catalog: &mut Catalog<B>, args: AddArgs) -> Result<()> {
    login(catalog, args.admin).await?;

    let form = catalog.gateway_mut().form_mut();
    form.game = args.game;
    form.mod_name = args.mod_name;
    form.author = args.author;
    form.version = args.mod_version;
    form.download_url = args.url;

    let result = catalog.create().await;
    report(catalog);

    result
}

pub async fn remove<B: Backend>(catalog: &mut Catalog<B>, args: RemoveArgs) -> Result<()> {
    login(catalog, args.admin).await?;

    let result = catalog.delete(&TranslationId::from(args.id)).await;
    report(catalog);

    result
}

async fn login<B: Backend>(catalog: &mut Catalog<B>, admin: AdminArgs) -> Result<()> {
    catalog.session_mut().set_password(admin.password);
    let result = catalog.authenticate().await;
    // The login toast is noise on the command line
    catalog.take_notifications();

    result
}

/// Print the successful toasts. Failures are reported by the caller together with the exit
/// code.
fn report<B: Backend>(catalog: &mut Catalog<B>) {
    for notification in catalog.take_notifications() {
        if notification.level == Level::Success {
            println!("{}", format_notification(&notification).green());
        }
    }
}

fn format_notification(notification: &Notification) -> String {
    format!("{} {}", notification.title, notification.body)
}

fn format_record(record: &TranslationRecord) -> String {
    format!(
        "[{}] {} {}\n    {} • Автор: {}\n    {}",
        record.id(),
        record.mod_name(),
        record.version(),
        record.game(),
        record.author(),
        record.download_url()
    )
}
