use crate::armory::{
    CharacterProfile, ConnectedRealmGroup, GuildRole, RealmIndexEntry, RealmListing,
};
use crate::chronicle::{CachedSummary, ChronicleOutcome};

const PREVIEW_CHARS: usize = 72;

fn or_unavailable<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(|| "unavailable".to_string(), |v| v.to_string())
}

pub fn render_realm_group(group: &ConnectedRealmGroup, slug: &str) -> String {
    let realm = group.member(slug).or_else(|| group.primary());
    let mut lines = Vec::new();
    if let Some(realm) = realm {
        lines.push(format!("◆ {} ({})", realm.name, realm.slug));
        lines.push(String::new());
        lines.push(format!("  Type        {}", realm.type_text));
        lines.push(format!("  Category    {}", realm.category_text));
        lines.push(format!("  Timezone    {}", realm.timezone));
        lines.push(format!("  Locale      {}", realm.locale));
        lines.push(format!("  Region      {}", realm.region_text));
    }
    lines.push(format!("  Status      {}", group.status_text));
    lines.push(format!("  Population  {}", group.population_text));
    if group.has_queue {
        lines.push("  Queue       yes".to_string());
    }
    lines.push(String::new());
    lines.push(format!("  {}", group.connection_label()));
    lines.join("\n")
}

pub fn render_listings(listings: &[RealmListing]) -> String {
    if listings.is_empty() {
        return "No realms found for this selection.".to_string();
    }
    let width = listings.iter().map(|l| l.name.chars().count()).max().unwrap_or(0);
    listings
        .iter()
        .map(|l| {
            format!(
                "{:<width$}  {:<24}  {:<6}  {:<10}  {}",
                l.name, l.slug, l.status_text, l.population_text, l.type_text
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_index(entries: &[RealmIndexEntry]) -> String {
    entries
        .iter()
        .map(|e| format!("{}  ({})", e.name, e.slug))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_character(profile: &CharacterProfile) -> String {
    let mut lines = vec![
        format!(
            "◆ {} - {} {} {}",
            profile.name, profile.level, profile.race, profile.class
        ),
        String::new(),
        format!("  Realm          {} ({})", profile.realm_name, profile.region),
        format!("  Faction        {}", profile.faction),
        format!("  Gender         {}", profile.gender),
        format!("  Game version   {}", profile.game_version_display),
        format!("  Title          {}", profile.title.as_deref().unwrap_or("N/A")),
    ];

    match profile.guild_name.as_deref() {
        Some(guild) => {
            let role = match profile.guild_role() {
                Some(GuildRole::GuildMaster) => "Guild Master",
                Some(GuildRole::Officer) => "Officer",
                Some(GuildRole::Member) => "Member",
                None => "rank unknown",
            };
            let members = profile
                .guild_member_count
                .map(|n| format!(", {n} members"))
                .unwrap_or_default();
            lines.push(format!("  Guild          {guild} ({role}{members})"));
        }
        None => lines.push("  Guild          No Guild".to_string()),
    }

    lines.push(format!(
        "  Item level     {}",
        or_unavailable(profile.average_item_level)
    ));
    lines.push(format!(
        "  Achievements   {}",
        or_unavailable(profile.achievement_points)
    ));
    if profile.game_version.has_collections() {
        lines.push(format!(
            "  Mounts         {}",
            or_unavailable(profile.mounts_collected)
        ));
        lines.push(format!(
            "  Pets           {}",
            or_unavailable(profile.pets_collected)
        ));
    }

    let flags = profile.pvp_flags;
    let mut honors = Vec::new();
    if flags.is_battlemaster {
        honors.push("Battlemaster");
    }
    if flags.has_250k_hk {
        honors.push("250,000 honorable kills");
    } else if flags.has_100k_hk {
        honors.push("100,000 honorable kills");
    }
    if !honors.is_empty() {
        lines.push(format!("  PvP            {}", honors.join(", ")));
    }
    if let Some(avatar) = profile.avatar_url.as_deref() {
        lines.push(format!("  Avatar         {avatar}"));
    }
    lines.join("\n")
}

pub fn render_outcome(outcome: &ChronicleOutcome) -> String {
    match outcome {
        ChronicleOutcome::Cached(summary) => format!(
            "── Chronicle (saved {}) ──\n\n{}",
            summary.formatted_timestamp(),
            summary.text
        ),
        ChronicleOutcome::Generated(summary) => format!(
            "── Chronicle (generated {}) ──\n\n{}",
            summary.formatted_timestamp(),
            summary.text
        ),
        ChronicleOutcome::Unavailable(err) => format!("── Chronicle ──\n\n{}", err.user_message()),
    }
}

fn preview(text: &str) -> String {
    let first_line = text.lines().find(|l| !l.trim().is_empty()).unwrap_or("").trim();
    if first_line.chars().count() <= PREVIEW_CHARS {
        return first_line.to_string();
    }
    let cut: String = first_line.chars().take(PREVIEW_CHARS).collect();
    format!("{cut}…")
}

pub fn render_summary_list(entries: &[CachedSummary]) -> String {
    if entries.is_empty() {
        return "No stored chronicles.".to_string();
    }
    entries
        .iter()
        .enumerate()
        .map(|(i, entry)| format!("[{i}] {}  {}", entry.formatted_timestamp(), preview(&entry.text)))
        .collect::<Vec<_>>()
        .join("\n")
}
