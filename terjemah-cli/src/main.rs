mod render;

use clap::{Arg, ArgAction, ArgMatches, Command, value_parser};
use std::path::PathBuf;
use std::sync::Arc;
use terjemah::storage::JsonFileStore;
use terjemah::{
    CapturedInput, Config, FontSize, InputMethod, LanguageCode, Resolver, ThemeMode,
    TranslationSession,
};
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn language_arg(name: &'static str, short: char, help: &'static str) -> Arg {
    Arg::new(name)
        .long(name)
        .short(short)
        .help(help)
        .value_parser(|s: &str| s.parse::<LanguageCode>())
}

fn translation_args(command: Command) -> Command {
    command
        .arg(language_arg(
            "from",
            'f',
            "Source language: id, zh-CN or zh-TW (default: id)",
        ))
        .arg(language_arg(
            "to",
            't',
            "Target language: id, zh-CN or zh-TW (default: zh-CN)",
        ))
        .arg(
            Arg::new("offline")
                .long("offline")
                .help("Switch to offline mode (remembered for later runs)")
                .action(ArgAction::SetTrue)
                .conflicts_with("online"),
        )
        .arg(
            Arg::new("online")
                .long("online")
                .help("Switch to online mode (remembered for later runs)")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("speak")
                .long("speak")
                .help("Read the translation aloud")
                .action(ArgAction::SetTrue),
        )
}

fn cli() -> Command {
    Command::new("terjemah")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Indonesian ⇄ Chinese phrase translator")
        .subcommand_required(true)
        .arg(
            Arg::new("store")
                .long("store")
                .short('s')
                .global(true)
                .help("Path of the store file (default: $TERJEMAH_STORE_PATH or .terjemah/store.json)")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("latency-ms")
                .long("latency-ms")
                .global(true)
                .help("Simulated online latency in milliseconds (default: 500)")
                .value_parser(value_parser!(u64)),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .help("Show detailed logs")
                .action(ArgAction::SetTrue),
        )
        .subcommand(translation_args(
            Command::new("translate").about("Translate text").arg(
                Arg::new("text")
                    .help("Text to translate")
                    .required(true)
                    .index(1),
            ),
        ))
        .subcommand(translation_args(
            Command::new("capture")
                .about("Capture voice or handwriting input and translate it")
                .arg(
                    Arg::new("method")
                        .help("Input method: voice or handwriting")
                        .required(true)
                        .index(1)
                        .value_parser(["voice", "handwriting"]),
                ),
        ))
        .subcommand(
            Command::new("history").about("List past translations").arg(
                Arg::new("favorites")
                    .long("favorites")
                    .help("Only show favorites")
                    .action(ArgAction::SetTrue),
            ),
        )
        .subcommand(
            Command::new("show")
                .about("Show a past translation")
                .arg(Arg::new("id").required(true).index(1)),
        )
        .subcommand(
            Command::new("favorite")
                .about("Star or unstar a past translation")
                .arg(Arg::new("id").required(true).index(1)),
        )
        .subcommand(
            Command::new("clear").about("Clear the history").arg(
                Arg::new("favorites")
                    .long("favorites")
                    .help("Only remove the favorite marks, keeping entries")
                    .action(ArgAction::SetTrue),
            ),
        )
        .subcommand(
            Command::new("settings")
                .about("Show or change preferences")
                .arg(
                    Arg::new("font-size")
                        .long("font-size")
                        .help("small, medium or large")
                        .value_parser(|s: &str| s.parse::<FontSize>()),
                )
                .arg(
                    Arg::new("offline")
                        .long("offline")
                        .help("Enable or disable offline mode")
                        .value_parser(value_parser!(bool)),
                )
                .arg(
                    Arg::new("theme")
                        .long("theme")
                        .help("light or dark")
                        .value_parser(|s: &str| s.parse::<ThemeMode>())
                        .conflicts_with("toggle-theme"),
                )
                .arg(
                    Arg::new("toggle-theme")
                        .long("toggle-theme")
                        .help("Switch between light and dark")
                        .action(ArgAction::SetTrue),
                ),
        )
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(matches: &ArgMatches) -> Result<Config, Box<dyn std::error::Error>> {
    let mut config = Config::from_env()?;
    if let Some(path) = matches.get_one::<PathBuf>("store") {
        config.store_path = path.clone();
    }
    if let Some(latency_ms) = matches.get_one::<u64>("latency-ms") {
        config.latency_ms = *latency_ms;
    }
    Ok(config)
}

/// Apply --from/--to/--offline/--online to the session
fn apply_translation_args(session: &mut TranslationSession, matches: &ArgMatches) {
    if let Some(from) = matches.get_one::<LanguageCode>("from") {
        session.set_source_language(*from);
    }
    if let Some(to) = matches.get_one::<LanguageCode>("to") {
        session.set_target_language(*to);
    }
    if matches.get_flag("offline") {
        session.set_offline_mode(true);
    } else if matches.get_flag("online") {
        session.set_offline_mode(false);
    }
}

async fn translate_and_print(session: &mut TranslationSession, speak: bool) {
    if session.submit().await.is_none() && session.source_text().trim().is_empty() {
        eprintln!("❌ Nothing to translate");
        return;
    }
    render::print_result(session);
    if speak {
        session.speak_result();
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let matches = cli().get_matches();
    init_tracing(matches.get_flag("verbose"));

    let config = load_config(&matches)?;
    debug!("Using store {}", config.store_path.display());

    let store = JsonFileStore::open(&config.store_path)?;
    let mut session = TranslationSession::new(Arc::new(store), Resolver::new(config.latency_ms))
        .with_speaker(Box::new(render::ConsoleSpeaker));

    match matches.subcommand() {
        Some(("translate", sub)) => {
            let text = sub
                .get_one::<String>("text")
                .ok_or("missing text to translate")?;
            apply_translation_args(&mut session, sub);
            session.set_input_method(InputMethod::Text);
            session.set_source_text(text);
            translate_and_print(&mut session, sub.get_flag("speak")).await;
        }
        Some(("capture", sub)) => {
            apply_translation_args(&mut session, sub);
            let input = match sub.get_one::<String>("method").map(String::as_str) {
                Some("voice") => CapturedInput::Voice {
                    samples: Vec::new(),
                    sample_rate: 16_000,
                },
                _ => CapturedInput::Handwriting(Vec::new()),
            };
            let recognized = session.capture(&input)?.to_string();
            println!("🎙️  Captured: {}", recognized);
            translate_and_print(&mut session, sub.get_flag("speak")).await;
        }
        Some(("history", sub)) => {
            session.set_show_favorites_only(sub.get_flag("favorites"));
            render::print_history(&session);
        }
        Some(("show", sub)) => {
            let id = sub.get_one::<String>("id").ok_or("missing entry id")?;
            if !session.select_entry(id) {
                return Err(format!("No translation with id {}", id).into());
            }
            render::print_result(&session);
        }
        Some(("favorite", sub)) => {
            let id = sub.get_one::<String>("id").ok_or("missing entry id")?;
            match session.toggle_favorite(id) {
                Some(true) => println!("★ Added {} to favorites", id),
                Some(false) => println!("☆ Removed {} from favorites", id),
                None => return Err(format!("No translation with id {}", id).into()),
            }
        }
        Some(("clear", sub)) => {
            session.set_show_favorites_only(sub.get_flag("favorites"));
            session.clear_history();
            if session.show_favorites_only() {
                println!("Cleared favorites");
            } else {
                println!("Cleared history");
            }
        }
        Some(("settings", sub)) => {
            if let Some(font_size) = sub.get_one::<FontSize>("font-size") {
                session.set_font_size(*font_size);
            }
            if let Some(offline) = sub.get_one::<bool>("offline") {
                session.set_offline_mode(*offline);
            }
            if let Some(theme) = sub.get_one::<ThemeMode>("theme") {
                session.set_theme_mode(*theme);
            } else if sub.get_flag("toggle-theme") {
                session.toggle_theme();
            }
            render::print_preferences(session.preferences());
        }
        _ => unreachable!("a subcommand is required"),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_is_well_formed() {
        cli().debug_assert();
    }

    #[test]
    fn test_translate_args_parse_languages() {
        let matches = cli()
            .try_get_matches_from(["terjemah", "translate", "Halo", "--to", "zh-Hant", "--offline"])
            .unwrap();
        let (name, sub) = matches.subcommand().unwrap();
        assert_eq!(name, "translate");
        assert_eq!(
            sub.get_one::<LanguageCode>("to"),
            Some(&LanguageCode::ChineseTraditional)
        );
        assert!(sub.get_flag("offline"));
    }

    #[test]
    fn test_rejects_unknown_language() {
        let result = cli().try_get_matches_from(["terjemah", "translate", "Halo", "--to", "fr"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_offline_and_online_conflict() {
        let result = cli().try_get_matches_from([
            "terjemah",
            "translate",
            "Halo",
            "--offline",
            "--online",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_global_store_flag_after_subcommand() {
        let matches = cli()
            .try_get_matches_from(["terjemah", "history", "--store", "/tmp/x.json"])
            .unwrap();
        let config = load_config(&matches).unwrap();
        assert_eq!(config.store_path, PathBuf::from("/tmp/x.json"));
    }
}
