//! cardwise: headless runner for the card rewards engine.
//!
//! Usage:
//!   cardwise --db wallet.db --user alice import --file cards.json
//!   cardwise --db wallet.db --user alice best --category Dining
//!   cardwise --db wallet.db --user alice expiring --once --date 2025-06-10
//!   cardwise --db wallet.db --user alice categories --json
//!   cardwise --db wallet.db --user alice favorite --category Dining

use anyhow::{bail, Context, Result};
use cardwise_core::{
    clock::{FixedClock, SystemClock},
    config::RewardsConfig,
    model::{Card, Category, ExpiryNotice, MatchResult},
    store::RewardsStore,
    wallet::Wallet,
};
use chrono::NaiveDate;
use std::env;

const COMMANDS: &[&str] = &["import", "cards", "best", "expiring", "categories", "favorite"];
const VALUE_FLAGS: &[&str] = &["--db", "--user", "--data-dir", "--date", "--file", "--category"];

#[derive(serde::Deserialize)]
#[serde(untagged)]
enum ImportFile {
    Wrapped { cards: Vec<Card> },
    Bare(Vec<Card>),
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let db = flag_value(&args, "--db").unwrap_or(":memory:");
    let user = flag_value(&args, "--user").unwrap_or("local");
    let json = args.iter().any(|a| a == "--json");

    let Some(command) = find_command(&args) else {
        print_usage();
        bail!("no command given");
    };

    let config = match flag_value(&args, "--data-dir") {
        Some(dir) => RewardsConfig::load(dir)?,
        None => RewardsConfig::builtin(),
    };

    let store = RewardsStore::open(db)?;
    store.migrate()?;

    let builder = Wallet::builder(user, store).config(config);
    let mut wallet = match flag_value(&args, "--date") {
        Some(raw) => {
            let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .with_context(|| format!("--date expects YYYY-MM-DD, got {raw}"))?;
            builder.clock(FixedClock::new(date)).build()?
        }
        None => builder.clock(SystemClock).build()?,
    };

    log::debug!(
        "cardwise: db={db} user={} command={command} today={}",
        wallet.user_id(),
        wallet.today()
    );

    match command.as_str() {
        "import" => {
            let path = flag_value(&args, "--file").context("import requires --file PATH")?;
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Cannot read {path}"))?;
            let cards = match serde_json::from_str::<ImportFile>(&content)? {
                ImportFile::Wrapped { cards } => cards,
                ImportFile::Bare(cards) => cards,
            };
            let count = wallet.add_cards(cards)?.len();
            let discovered = wallet.load()?.discovered;
            println!("imported {count} cards ({} new categories)", discovered.len());
        }
        "cards" => {
            let cards = wallet.cards()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&cards)?);
            } else {
                print_cards(&cards);
            }
        }
        "best" => {
            let category = flag_value(&args, "--category").context("best requires --category NAME")?;
            let results = wallet.best_cards(category)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&results)?);
            } else {
                print_ranking(category, &results);
            }
        }
        "expiring" => {
            let once = args.iter().any(|a| a == "--once");
            let notices = wallet.expiring_notices(once)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&notices)?);
            } else {
                print_notices(&notices);
            }
        }
        "categories" => {
            let categories = wallet.categories()?;
            let favorites = wallet.favorites()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&categories)?);
            } else {
                print_categories(&categories, |c| favorites.contains(&c.id));
            }
        }
        "favorite" => {
            let name = flag_value(&args, "--category").context("favorite requires --category NAME")?;
            let snapshot = wallet.load()?;
            let Some(category) = snapshot.catalog.resolve(name) else {
                bail!("unknown category: {name}");
            };
            let id = category.id.clone();
            let label = category.name.clone();
            let now_favorite = wallet.toggle_favorite(&id)?;
            println!(
                "{label} {}",
                if now_favorite { "added to favorites" } else { "removed from favorites" }
            );
        }
        _ => unreachable!("command list and match arms disagree"),
    }

    Ok(())
}

fn print_cards(cards: &[Card]) {
    if cards.is_empty() {
        println!("  (no cards)");
        return;
    }
    for card in cards {
        let issuer = card.issuer.as_deref().unwrap_or("-");
        println!("{} [{}] default {}%", card.name, issuer, card.default_rate);
        for bonus in &card.bonuses {
            let window = match (bonus.start_date, bonus.end_date) {
                (None, None) => "always".to_string(),
                (start, end) => format!(
                    "{} .. {}",
                    start.map(|d| d.to_string()).unwrap_or_default(),
                    end.map(|d| d.to_string()).unwrap_or_default(),
                ),
            };
            println!(
                "  {:<16} {:>12}  {window}",
                bonus.category,
                bonus.reward_type.format_rate(bonus.rate)
            );
        }
    }
}

fn print_ranking(category: &str, results: &[MatchResult]) {
    println!("=== BEST CARDS: {category} ===");
    if results.is_empty() {
        println!("  (no cards)");
        return;
    }
    for (i, r) in results.iter().enumerate() {
        let source = if r.is_default { "default rate" } else { "bonus" };
        let until = r.end_date.map(|d| format!(" until {d}")).unwrap_or_default();
        println!(
            "  {:>2}. {:<24} {:>12}  ({source}{until})",
            i + 1,
            r.card_name,
            r.reward_type.format_rate(r.rate)
        );
    }
}

fn print_notices(notices: &[ExpiryNotice]) {
    if notices.is_empty() {
        println!("  (nothing expiring today or tomorrow)");
        return;
    }
    for n in notices {
        println!("{}: {}", n.title(), n.body());
    }
}

fn print_categories(categories: &[Category], is_favorite: impl Fn(&Category) -> bool) {
    for c in categories {
        let star = if is_favorite(c) { "*" } else { " " };
        let kind = if c.is_custom { "custom" } else { "built-in" };
        println!("{star} {:<20} {kind}", c.name);
    }
}

/// The first positional argument naming a command. Flag values are skipped,
/// so `--user best` does not read as the `best` command.
fn find_command(args: &[String]) -> Option<&String> {
    args.iter()
        .enumerate()
        .skip(1)
        .find(|(i, a)| {
            COMMANDS.contains(&a.as_str()) && !VALUE_FLAGS.contains(&args[i - 1].as_str())
        })
        .map(|(_, a)| a)
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

fn print_usage() {
    println!("usage: cardwise [--db PATH] [--user ID] [--data-dir DIR] [--date YYYY-MM-DD] [--json] <command>");
    println!("commands:");
    println!("  import --file PATH      add cards from a JSON file");
    println!("  cards                   list cards and bonuses");
    println!("  best --category NAME    rank cards for a purchase category");
    println!("  expiring [--once]       bonuses ending today or tomorrow");
    println!("  categories              list categories, favorites first");
    println!("  favorite --category N   toggle a favorite category");
}
