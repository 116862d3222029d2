use crate::app::render::{
    render_character, render_index, render_listings, render_outcome, render_realm_group,
    render_summary_list,
};
use crate::armory::{
    ArmoryClient, CharacterIdentity, RealmIdentity, RealmLookup, Selection, TokenProvider,
    create_token_provider, fetch_character, list_realms, realm_index, require_token,
    resolve_realm_identity,
};
use crate::chronicle::{
    Chronicler, FileSummaryStore, GeminiNarrator, SummaryCache, SummaryKey, Temperatures,
};
use crate::cli::{Cli, Commands, Partition, SummaryCommands};
use crate::config::Config;
use anyhow::{Context, Result, bail};
use std::sync::Arc;
use tracing::info;

fn armory_client(config: &Config) -> Result<ArmoryClient> {
    let locale = config.battlenet.locale()?;
    Ok(ArmoryClient::new(
        &config.battlenet.api_base_template,
        locale,
        config.battlenet.request_timeout_secs,
    ))
}

fn summary_cache(config: &Config) -> SummaryCache {
    let store = FileSummaryStore::new(config.cache.resolved_directory());
    SummaryCache::new(Arc::new(store), config.cache.max_entries)
}

fn chronicler(config: &Config) -> Result<Chronicler> {
    let narrator = GeminiNarrator::new(&config.gemini)?;
    Ok(Chronicler::new(
        Box::new(narrator),
        summary_cache(config),
        Temperatures::from(&config.gemini),
    ))
}

async fn acquire_token(provider: &dyn TokenProvider) -> Result<String> {
    let token = require_token(provider).await?;
    info!(provider = provider.name(), "obtained bearer token");
    Ok(token)
}

async fn run_token(config: &Config) -> Result<()> {
    let provider = create_token_provider(&config.battlenet)?;
    acquire_token(provider.as_ref()).await?;
    println!("Token acquired via {}.", provider.name());
    Ok(())
}

async fn run_realms(
    config: &Config,
    partition: Partition,
    locale: Option<crate::armory::Locale>,
    index: bool,
) -> Result<()> {
    let client = armory_client(config)?;
    let provider = create_token_provider(&config.battlenet)?;
    let token = acquire_token(provider.as_ref()).await?;

    if index {
        let entries = realm_index(&client, partition.region, partition.game_version, &token).await?;
        println!("{}", render_index(&entries));
        return Ok(());
    }

    let selection = Selection::default()
        .with_region(partition.region)
        .with_game_version(partition.game_version)
        .with_locale(locale.unwrap_or(client.locale()));
    let listings = list_realms(&client, selection, &token).await?;
    println!("{}", render_listings(&listings));
    Ok(())
}

async fn run_realm(
    config: &Config,
    partition: Partition,
    slug: &str,
    chronicle: bool,
    refresh: bool,
) -> Result<()> {
    let client = armory_client(config)?;
    let provider = create_token_provider(&config.battlenet)?;
    let token = acquire_token(provider.as_ref()).await?;

    let identity = RealmIdentity::new(partition.region, partition.game_version, slug.trim());
    let group = match resolve_realm_identity(&client, &identity, &token).await? {
        RealmLookup::Found(group) => group,
        RealmLookup::NotFound(missing) => {
            println!("◆ {}", missing.fallback_name);
            bail!("{}", missing.error);
        }
    };
    println!("{}", render_realm_group(&group, &identity.slug));

    if chronicle {
        let chronicler = chronicler(config)?;
        let outcome = chronicler
            .realm_chronicle(&group, identity.region, &identity.slug, refresh)
            .await?;
        println!("\n{}", render_outcome(&outcome));
    }
    Ok(())
}

async fn run_character(
    config: &Config,
    partition: Partition,
    realm_slug: &str,
    name: &str,
    chronicle: bool,
    refresh: bool,
) -> Result<()> {
    let client = armory_client(config)?;
    let provider = create_token_provider(&config.battlenet)?;
    let token = acquire_token(provider.as_ref()).await?;

    let identity = CharacterIdentity::new(
        RealmIdentity::new(partition.region, partition.game_version, realm_slug.trim()),
        name,
    );
    let profile = fetch_character(&client, &identity, &token).await?;
    println!("{}", render_character(&profile));

    if chronicle {
        let chronicler = chronicler(config)?;
        let outcome = chronicler
            .character_chronicle(&profile, identity.realm.region, refresh)
            .await?;
        println!("\n{}", render_outcome(&outcome));
    }
    Ok(())
}

fn run_summaries(config: &Config, command: SummaryCommands) -> Result<()> {
    let cache = summary_cache(config);
    match command {
        SummaryCommands::List { key: None } => {
            let keys = cache.keys()?;
            if keys.is_empty() {
                println!("No stored chronicles.");
            }
            for key in keys {
                println!("{key}  ({} entries)", cache.get(&key).len());
            }
        }
        SummaryCommands::List { key: Some(key) } => {
            let entries = cache.get(&SummaryKey::from_raw(key));
            println!("{}", render_summary_list(&entries));
        }
        SummaryCommands::Show { key, index } => {
            let entry = cache
                .select(&SummaryKey::from_raw(key.as_str()), index)
                .with_context(|| format!("No stored chronicle at index {index} for {key}"))?;
            println!("{}\n\n{}", entry.formatted_timestamp(), entry.text);
        }
        SummaryCommands::Delete { key, index } => {
            if cache.delete(&SummaryKey::from_raw(key.as_str()), index)? {
                println!("Deleted chronicle {index} from {key}.");
            } else {
                println!("Nothing to delete at index {index} for {key}.");
            }
        }
        SummaryCommands::Clear { key } => {
            cache.clear(&SummaryKey::from_raw(key.as_str()))?;
            println!("Cleared {key}.");
        }
    }
    Ok(())
}

pub async fn dispatch(cli: Cli, config: Config) -> Result<()> {
    match cli.command {
        Commands::Token => run_token(&config).await,
        Commands::Realms {
            partition,
            locale,
            index,
        } => run_realms(&config, partition, locale, index).await,
        Commands::Realm {
            partition,
            slug,
            chronicle,
            refresh,
        } => run_realm(&config, partition, &slug, chronicle, refresh).await,
        Commands::Character {
            partition,
            realm_slug,
            name,
            chronicle,
            refresh,
        } => run_character(&config, partition, &realm_slug, &name, chronicle, refresh).await,
        Commands::Summaries { summary_command } => run_summaries(&config, summary_command),
    }
}
