use std::time::Duration;

use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::battlenet::{
    achievements, character_media, character_profile, client, mounts, pets, roster,
};
use realmscribe::ArmoryError;
use realmscribe::armory::{
    ACHIEVEMENT_100K_HONORABLE_KILLS, ACHIEVEMENT_BATTLEMASTER, ArmoryClient, CharacterIdentity,
    GameVersion, GuildRole, Locale, RealmIdentity, Region, fetch_character,
    fetch_character_profile,
};

const BASE: &str = "/profile/wow/character/area-52/thrall";

async fn mount_json(server: &MockServer, route: &str, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

async fn mount_retail_character(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path(BASE))
        .and(query_param("namespace", "profile-us"))
        .respond_with(ResponseTemplate::new(200).set_body_json(character_profile()))
        .expect(1)
        .mount(server)
        .await;
    mount_json(server, &format!("{BASE}/character-media"), character_media()).await;
    mount_json(server, &format!("{BASE}/collections/mounts"), mounts(3)).await;
    mount_json(
        server,
        &format!("{BASE}/achievements"),
        achievements(&[ACHIEVEMENT_100K_HONORABLE_KILLS, ACHIEVEMENT_BATTLEMASTER]),
    )
    .await;
    mount_json(
        server,
        "/data/wow/guild/area-52/horde-vanguard/roster",
        roster(&[(7, 4), (42, 0), (99, 1)]),
    )
    .await;
}

#[tokio::test]
async fn aggregates_every_sub_resource() {
    let server = MockServer::start().await;
    mount_retail_character(&server).await;
    mount_json(&server, &format!("{BASE}/collections/pets"), pets(&[1, 1, 2, 3])).await;

    let identity = CharacterIdentity::new(
        RealmIdentity::new(Region::Us, GameVersion::Retail, "area-52"),
        "  THRALL ",
    );
    let profile = fetch_character(&client(&server), &identity, "tok").await.unwrap();

    assert_eq!(profile.name, "Thrall");
    assert_eq!(profile.level, 80);
    assert_eq!(profile.class, "Shaman");
    assert_eq!(profile.realm_name, "Area 52");
    assert_eq!(profile.region, "US");
    assert_eq!(profile.title.as_deref(), Some("Thrall the Warchief"));
    assert_eq!(profile.guild_name.as_deref(), Some("Horde Vanguard"));
    assert_eq!(profile.guild_rank, Some(0));
    assert_eq!(profile.guild_role(), Some(GuildRole::GuildMaster));
    assert_eq!(profile.guild_member_count, Some(3));
    assert_eq!(profile.average_item_level, Some(612));
    assert_eq!(profile.achievement_points, Some(21450));
    assert_eq!(profile.mounts_collected, Some(3));
    assert_eq!(profile.pets_collected, Some(3));
    assert_eq!(
        profile.avatar_url.as_deref(),
        Some("https://render.example/avatar.jpg")
    );
    assert!(profile.pvp_flags.has_100k_hk);
    assert!(profile.pvp_flags.is_battlemaster);
    assert!(!profile.pvp_flags.has_250k_hk);
    assert_eq!(profile.game_version_display, "Retail");
    server.verify().await;
}

#[tokio::test]
async fn failed_pet_fetch_leaves_only_pets_unavailable() {
    let server = MockServer::start().await;
    mount_retail_character(&server).await;
    Mock::given(method("GET"))
        .and(path(format!("{BASE}/collections/pets")))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let profile = fetch_character_profile(
        &client(&server),
        Region::Us,
        GameVersion::Retail,
        "area-52",
        "thrall",
        "tok",
    )
    .await
    .unwrap();

    assert_eq!(profile.pets_collected, None);
    assert_eq!(profile.mounts_collected, Some(3));
    assert_eq!(profile.guild_rank, Some(0));
    assert!(profile.avatar_url.is_some());
}

#[tokio::test]
async fn classic_era_never_requests_collections() {
    let server = MockServer::start().await;
    let base = "/profile/wow/character/mankrik/thrall";

    let mut profile_body = character_profile();
    profile_body["realm"] = serde_json::json!({"id": 4384, "name": "Mankrik", "slug": "mankrik"});
    profile_body["guild"] = serde_json::Value::Null;
    profile_body
        .as_object_mut()
        .unwrap()
        .remove("achievement_points");

    Mock::given(method("GET"))
        .and(path(base))
        .and(query_param("namespace", "profile-classic1x-us"))
        .respond_with(ResponseTemplate::new(200).set_body_json(profile_body))
        .mount(&server)
        .await;
    mount_json(&server, &format!("{base}/achievements"), achievements(&[])).await;
    Mock::given(method("GET"))
        .and(path(format!("{base}/collections/mounts")))
        .respond_with(ResponseTemplate::new(200).set_body_json(mounts(1)))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("{base}/collections/pets")))
        .respond_with(ResponseTemplate::new(200).set_body_json(pets(&[1])))
        .expect(0)
        .mount(&server)
        .await;

    let profile = fetch_character_profile(
        &client(&server),
        Region::Us,
        GameVersion::ClassicEra,
        "mankrik",
        "Thrall",
        "tok",
    )
    .await
    .unwrap();

    assert_eq!(profile.mounts_collected, None);
    assert_eq!(profile.pets_collected, None);
    assert_eq!(profile.guild_name, None);
    assert_eq!(profile.guild_role(), None);
    // Falls back to the achievement summary's total.
    assert_eq!(profile.achievement_points, Some(21450));
    // Media 404s; the avatar is simply unavailable.
    assert_eq!(profile.avatar_url, None);
    assert_eq!(profile.game_version_display, "Classic Era");
    server.verify().await;
}

#[tokio::test]
async fn character_missing_from_roster_has_no_rank() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(BASE))
        .respond_with(ResponseTemplate::new(200).set_body_json(character_profile()))
        .mount(&server)
        .await;
    mount_json(
        &server,
        "/data/wow/guild/area-52/horde-vanguard/roster",
        roster(&[(7, 1)]),
    )
    .await;

    let profile = fetch_character_profile(
        &client(&server),
        Region::Us,
        GameVersion::Retail,
        "area-52",
        "thrall",
        "tok",
    )
    .await
    .unwrap();

    assert_eq!(profile.guild_name.as_deref(), Some("Horde Vanguard"));
    assert_eq!(profile.guild_rank, None);
    assert_eq!(profile.guild_member_count, Some(1));
}

#[tokio::test]
async fn missing_character_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(BASE))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
            "code": 404, "type": "BLZWEBAPI00000404", "detail": "Not Found"
        })))
        .mount(&server)
        .await;

    let err = fetch_character_profile(
        &client(&server),
        Region::Us,
        GameVersion::Retail,
        "area-52",
        "thrall",
        "tok",
    )
    .await
    .unwrap_err();

    assert!(err.is_not_found());
    assert!(err.user_message().contains("not found"));
}

#[tokio::test]
async fn slow_base_profile_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(BASE))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(character_profile())
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let client = ArmoryClient::new(&server.uri(), Locale::EnUs, 1);
    let err = fetch_character_profile(
        &client,
        Region::Us,
        GameVersion::Retail,
        "area-52",
        "thrall",
        "tok",
    )
    .await
    .unwrap_err();

    assert!(matches!(err, ArmoryError::Timeout { seconds: 1 }));
    assert_eq!(err.user_message(), "API request timed out after 1 seconds.");
}
