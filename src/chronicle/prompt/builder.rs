use super::engine::TeraEngine;
use crate::armory::GuildRole;
use crate::chronicle::payload::{CharacterPayload, RealmPayload};
use crate::error::ChronicleError;
use tera::Context;

const ITEM_LEVEL_THRESHOLD: u32 = 500;
const ACHIEVEMENT_POINTS_THRESHOLD: u32 = 20_000;
const MOUNT_THRESHOLD: u32 = 400;
const PET_THRESHOLD: u32 = 800;

const GUILD_SIZEABLE: u32 = 100;
const GUILD_LARGE: u32 = 500;
const GUILD_MASSIVE: u32 = 800;

const CHARACTER_TEMPLATE: &str = "\
Adopt the persona of a seasoned Azerothian chronicler recounting tales of heroes of Azeroth, of stories of great adventurers. \
Write a moderate summary, aiming for 4 to 5 paragraphs. \
Make it an engaging and flavorful summary of the adventurer known as \"{{ name }}\".

This {{ race }} {{ class }} of level {{ level }} hails from the {{ realm }} realm in the {{ region }} region and fights for the {{ faction }}. \
In your summary, act as if you do not know if the player is male or female. \
If the player's class is of a darker nature, like death knight or warlock, try to match the tone.
{%- if title %} They currently bear the title \"{{ title }}\".{% endif %}
{%- if guild %} They stand {{ guild_role }}{{ guild_size }}. Weave a narrative of their role within this guild and the guild's place in the world.
{%- else %} They currently wander Azeroth unaffiliated with a guild, perhaps preferring the solitude of a lone adventurer or seeking the right banner to rally behind.
{%- endif %}
{%- if item_level %} Their prowess in combat is reflected in their formidable average equipment power of {{ item_level }}.{% endif %}
{%- if deeds | length > 0 %} Their exploits have not gone unnoticed.{% for deed in deeds %} {{ deed }}{% endfor %}{% endif %}
{%- if collection %} {{ collection }}{% endif %}

Weave these details (or lack thereof, omitting gracefully if details are sparse or insignificant) into a compelling narrative fitting the Warcraft universe. \
You do not need to use the exact sentences as I used above, it is merely to provide useful information for your narrative summary of the character. \
Mention their game version context ({{ game_version }}) if they are playing on a Classic or Classic Era server. \
Do not mention this game version detail if they are on retail. \
Focus on making them sound like a notable figure or hero of Azeroth that stands for a righteous cause for the people of Azeroth, perhaps hinting at their motivations or impact. \
End with a sentence that sparks curiosity about their past exploits or future adventures. \
Avoid clichés like \"gather 'round\". \
Ensure the tone matches the character's class ({{ class }}) and faction ({{ faction }}) where appropriate.";

const REALM_TEMPLATE: &str = "\
Adopt the persona of a knowledgeable and eloquent Azerothian chronicler or historian, recounting tales of Azeroth, of stories of great adventurers. \
Do not reference anything indicating the digital nature of the game or the world. \
Do not present this in the first person or name yourself. \
Present the summary of the specified realm below in a factual, but stylized role-playing demeanor.
Your task is to generate a detailed historical summary (approximately 2-3 paragraphs) for the World of Warcraft realm specified below.

**Realm Details Provided:**
*   **Realm Name:** {{ name }}
*   **Region:** {{ region }}
*   **Realm Type:** {{ realm_type }}
*   **Game Category:** {{ category }}

**Instructions for the Chronicler:**

1.  **Focus:** Craft a narrative history centered *specifically* on the \"{{ name }}\" ({{ region }}) realm within the context of the {{ category }} game version.
2.  **Origin:** Discuss its origins. Based on your training data, mention the *general time period* or *expansion context* when \"{{ name }}\" likely launched. \
Do NOT state a specific month or year unless verifiable public knowledge for *this specific realm*.
3.  **Realm Type Influence & Gameplay Focus:** Explain how its designation as a **\"{{ realm_type }}\"** realm shapes its culture and the typical experiences of its inhabitants. \
The gameplay focus here is {{ focus }}; describe what this means for adventurers on that realm. \
Stick to the acronyms PVE or PVP when referencing the realm type or gameplay focus. The only exception is RP, which you can write out as Roleplaying.
4.  **Notable History & Community:** Weave in any *widely known and verifiable* historical events, significant server-first achievements (relevant to the {{ category }}), \
or renowned *long-standing guilds specifically associated with \"{{ name }}\" or its connected group*.
5.  **Famous Guilds:** Mention globally famous competitive guilds **ONLY IF** they had a well-documented presence *directly tied to \"{{ name }}\"*. Otherwise do not mention them at all.
6.  **Tone & Style:** Write with narrative flair, evocative language, and the authority of an Azerothian historian.
7.  **Handling Scarcity:** If details specific to \"{{ name }}\" are scarce, acknowledge this humbly rather than fabricating information.
8.  **Length:** Aim for 2-3 informative paragraphs. End with a sentence that sparks curiosity about the server's past exploits or future adventures. \
Avoid clichés like \"gather 'round\" or \"From the dusty tomes\".

Begin your chronicle now for \"{{ name }}\" ({{ region }}).";

const CHARACTER_NAME: &str = "character";
const REALM_NAME: &str = "realm";

/// Descriptive ruleset and the gameplay focus it implies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RealmRuleset {
    pub descriptive: String,
    pub focus: String,
}

impl RealmRuleset {
    /// Classify by ruleset code when present, else by the displayed type.
    pub fn classify(type_code: &str, type_text: &str) -> Self {
        let source = if type_code.trim().is_empty() {
            type_text
        } else {
            type_code
        };
        let key: String = source
            .chars()
            .filter(char::is_ascii_alphanumeric)
            .map(|c| c.to_ascii_lowercase())
            .collect();

        let (descriptive, focus) = match key.as_str() {
            "normal" => ("Normal (PvE Focus)", "PvE"),
            "pve" => ("PvE", "PvE"),
            "pvp" => ("PvP", "PvP"),
            "rp" => ("RP", "Roleplaying"),
            "rppvp" => ("RPPvP", "Roleplaying with PVP"),
            _ => {
                return Self {
                    descriptive: format!("{type_text} (Unknown Ruleset)"),
                    focus: format!("an unclear focus based on type '{type_text}'"),
                };
            }
        };
        Self {
            descriptive: descriptive.into(),
            focus: focus.into(),
        }
    }
}

/// `12345` → `"12,345"`.
pub fn group_thousands(value: u32) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

pub fn guild_role_phrase(rank: Option<u32>, guild: &str) -> String {
    match rank.map(GuildRole::from_rank) {
        Some(GuildRole::GuildMaster) => format!("leading the guild \"{guild}\" as Guild Master"),
        Some(GuildRole::Officer) => {
            format!("holding a position of authority as an Officer within the guild \"{guild}\"")
        }
        Some(GuildRole::Member) | None => format!("a member of the guild \"{guild}\""),
    }
}

pub fn guild_size_phrase(member_count: Option<u32>, realm: &str) -> String {
    let Some(count) = member_count else {
        return " (whose full strength remains chronicled elsewhere)".into();
    };
    let shown = group_thousands(count);
    if count > GUILD_MASSIVE {
        format!(
            ", a truly massive community whose influence undoubtedly shapes their realm, boasting over {shown} members"
        )
    } else if count > GUILD_LARGE {
        format!(", a large and influential guild known across {realm}, home to more than {shown} adventurers")
    } else if count > GUILD_SIZEABLE {
        format!(", a sizeable fellowship of over {shown} souls")
    } else {
        String::new()
    }
}

fn deeds(payload: &CharacterPayload) -> Vec<String> {
    let mut deeds = Vec::new();
    if payload.is_battlemaster {
        deeds.push(
            "Known across the battlegrounds of Azeroth, they have earned the prestigious and hard-won title of Battlemaster."
                .to_string(),
        );
    }
    if payload.has_250k_hks {
        deeds.push(
            "Their prowess in the theater of war is undeniable, having claimed over 250,000 honorable kills against foes of the opposing faction."
                .to_string(),
        );
    } else if payload.has_100k_hks {
        deeds.push(
            "A veteran of countless skirmishes, they have amassed over 100,000 honorable kills in service to their faction."
                .to_string(),
        );
    }
    if let Some(points) = payload.achievement_points
        && points >= ACHIEVEMENT_POINTS_THRESHOLD
    {
        deeds.push(format!(
            "Their long list of deeds across the world has earned them a significant {} achievement points.",
            group_thousands(points)
        ));
    }
    deeds
}

fn collection_phrase(mounts: Option<u32>, pets: Option<u32>) -> Option<String> {
    let mounts = mounts.filter(|&m| m >= MOUNT_THRESHOLD).map(group_thousands);
    let pets = pets.filter(|&p| p >= PET_THRESHOLD).map(group_thousands);
    let lead = "Beyond the battlefield, their dedication extends to collecting the wonders of Azeroth";
    match (mounts, pets) {
        (Some(m), Some(p)) => Some(format!(
            "{lead}; their stables boast around {m} mounts, while their menagerie overflows with roughly {p} unique companion pets."
        )),
        (Some(m), None) => Some(format!(
            "{lead}, particularly evident in their impressive stable containing around {m} mounts."
        )),
        (None, Some(p)) => Some(format!(
            "{lead}, showcased by a delightful menagerie holding roughly {p} unique companion pets."
        )),
        (None, None) => None,
    }
}

/// Ensure the default templates are registered in the engine.
fn ensure_defaults(engine: &mut TeraEngine) -> anyhow::Result<()> {
    if !engine.has_template(CHARACTER_NAME) {
        engine.add_template(CHARACTER_NAME, CHARACTER_TEMPLATE)?;
    }
    if !engine.has_template(REALM_NAME) {
        engine.add_template(REALM_NAME, REALM_TEMPLATE)?;
    }
    Ok(())
}

fn prompt_error(err: &anyhow::Error) -> ChronicleError {
    ChronicleError::Prompt(format!("{err:#}"))
}

/// Build the character chronicle prompt. The payload is validated first.
pub fn build_character_prompt(
    engine: &mut TeraEngine,
    payload: &CharacterPayload,
) -> Result<String, ChronicleError> {
    payload.validate()?;
    ensure_defaults(engine).map_err(|e| prompt_error(&e))?;

    let mut ctx = Context::new();
    ctx.insert("name", &payload.name);
    ctx.insert("race", &payload.race);
    ctx.insert("class", &payload.class);
    ctx.insert("level", &payload.level);
    ctx.insert("realm", &payload.realm);
    ctx.insert("region", &payload.region);
    ctx.insert("faction", &payload.faction);
    ctx.insert("title", &payload.title.as_deref().filter(|t| !t.is_empty()));
    ctx.insert("guild", &payload.guild);
    if let Some(guild) = payload.guild.as_deref() {
        ctx.insert("guild_role", &guild_role_phrase(payload.guild_rank, guild));
        ctx.insert(
            "guild_size",
            &guild_size_phrase(payload.guild_member_count, &payload.realm),
        );
    }
    ctx.insert(
        "item_level",
        &payload
            .average_item_level
            .filter(|&ilvl| ilvl >= ITEM_LEVEL_THRESHOLD),
    );
    ctx.insert("deeds", &deeds(payload));
    ctx.insert(
        "collection",
        &collection_phrase(payload.mounts_collected, payload.pets_collected),
    );
    ctx.insert("game_version", &payload.game_version_display);

    engine
        .render(CHARACTER_NAME, &ctx)
        .map_err(|e| prompt_error(&e))
}

/// Build the realm chronicle prompt. The payload is validated first.
pub fn build_realm_prompt(
    engine: &mut TeraEngine,
    payload: &RealmPayload,
) -> Result<String, ChronicleError> {
    payload.validate()?;
    ensure_defaults(engine).map_err(|e| prompt_error(&e))?;

    let ruleset = RealmRuleset::classify(&payload.type_code, &payload.realm_type);
    let mut ctx = Context::new();
    ctx.insert("name", &payload.name);
    ctx.insert("region", &payload.region);
    ctx.insert("realm_type", &ruleset.descriptive);
    ctx.insert("focus", &ruleset.focus);
    ctx.insert("category", &payload.category);

    engine.render(REALM_NAME, &ctx).map_err(|e| prompt_error(&e))
}
