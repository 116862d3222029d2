use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::battlenet::{client, connected_group, realm, search};
use realmscribe::armory::{
    GameVersion, Locale, RealmIdentity, RealmLookup, RealmStatus, Region, Selection, list_realms,
    realm_index, resolve_realm, resolve_realm_identity,
};

const SEARCH_PATH: &str = "/data/wow/search/connected-realm";

#[tokio::test]
async fn resolves_single_realm_group() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .and(query_param("namespace", "dynamic-us"))
        .and(query_param("realms.slug", "stormrage"))
        .and(query_param("locale", "en_US"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search(vec![connected_group(
            60,
            "UP",
            "FULL",
            vec![realm(60, "stormrage", "Stormrage", "NORMAL", "Normal")],
        )])))
        .expect(1)
        .mount(&server)
        .await;

    let lookup = resolve_realm(&client(&server), Region::Us, "dynamic", "stormrage", "tok")
        .await
        .unwrap();
    let group = lookup.found().expect("stormrage should resolve");

    assert_eq!(group.id, Some(60));
    assert_eq!(group.status_code, RealmStatus::Up);
    assert_eq!(group.status_text, "Up");
    assert_eq!(group.population_code, "FULL");
    assert!(!group.is_connected());
    let primary = group.primary().unwrap();
    assert_eq!(primary.name, "Stormrage");
    assert_eq!(primary.type_code, "NORMAL");
    assert_eq!(primary.region_text, "North America");
    server.verify().await;
}

#[tokio::test]
async fn unknown_slug_yields_title_cased_fallback() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(search(Vec::new())))
        .mount(&server)
        .await;

    let lookup = resolve_realm(&client(&server), Region::Us, "dynamic", "nonexistent-slug", "tok")
        .await
        .unwrap();
    let RealmLookup::NotFound(missing) = lookup else {
        panic!("expected not found");
    };
    assert_eq!(missing.fallback_name, "Nonexistent Slug");
    assert!(missing.error.contains("No connected realms"));
}

#[tokio::test]
async fn secondary_member_resolves_to_its_group() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .and(query_param("namespace", "dynamic-classic1x-eu"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search(vec![
            connected_group(
                5,
                "UP",
                "LOW",
                vec![realm(5, "ashbringer", "Ashbringer", "PVP", "PvP")],
            ),
            connected_group(
                9,
                "DOWN",
                "MEDIUM",
                vec![
                    realm(9, "firemaw", "Firemaw", "PVP", "PvP"),
                    realm(10, "gehennas", "Gehennas", "PVP", "PvP"),
                ],
            ),
        ])))
        .mount(&server)
        .await;

    let identity = RealmIdentity::new(Region::Eu, GameVersion::ClassicEra, "gehennas");
    let lookup = resolve_realm_identity(&client(&server), &identity, "tok")
        .await
        .unwrap();
    let group = lookup.found().unwrap();

    assert_eq!(group.id, Some(9));
    assert_eq!(group.status_code, RealmStatus::Down);
    assert!(group.is_connected());
    assert_eq!(group.member("gehennas").unwrap().name, "Gehennas");
    assert_eq!(group.connection_label(), "Connected realms: Firemaw, Gehennas");
}

#[tokio::test]
async fn results_without_the_slug_are_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(search(vec![connected_group(
            1,
            "UP",
            "LOW",
            vec![realm(1, "elsewhere", "Elsewhere", "NORMAL", "Normal")],
        )])))
        .mount(&server)
        .await;

    let lookup = resolve_realm(&client(&server), Region::Us, "dynamic", "area-52", "tok")
        .await
        .unwrap();
    let RealmLookup::NotFound(missing) = lookup else {
        panic!("expected not found");
    };
    assert_eq!(missing.fallback_name, "Area 52");
    assert!(missing.error.contains("area-52"));
}

#[tokio::test]
async fn search_failure_propagates_as_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = resolve_realm(&client(&server), Region::Us, "dynamic", "stormrage", "tok")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        realmscribe::ArmoryError::Api { status: 503, .. }
    ));
}

#[tokio::test]
async fn listing_sorts_by_name_and_drops_placeholder_realms() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .and(query_param("namespace", "dynamic-classic-us"))
        .and(query_param("locale", "de_DE"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search(vec![
            connected_group(3, "UP", "HIGH", vec![realm(3, "grobbulus", "Grobbulus", "RPPVP", "RP-PvP")]),
            connected_group(4, "UP", "LOW", vec![realm(4, "us-ps-1", "US PS 1", "NORMAL", "Normal")]),
            connected_group(2, "UP", "FULL", vec![realm(2, "benediction", "Benediction", "PVP", "PvP")]),
        ])))
        .mount(&server)
        .await;

    let selection = Selection::default()
        .with_game_version(GameVersion::Classic)
        .with_locale(Locale::DeDe);
    let listings = list_realms(&client(&server), selection, "tok").await.unwrap();
    let names: Vec<&str> = listings.iter().map(|l| l.name.as_str()).collect();
    assert_eq!(names, vec!["Benediction", "Grobbulus"]);
    assert_eq!(listings[1].type_text, "RP-PvP");
}

#[tokio::test]
async fn realm_index_filters_test_realms() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/wow/realm/index"))
        .and(query_param("namespace", "dynamic-us"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "realms": [
                {"id": 1, "name": "Test Realm 2", "slug": "test-realm-2"},
                {"id": 2, "name": "Area 52", "slug": "area-52"},
                {"id": 3, "name": "", "slug": "nameless"}
            ]
        })))
        .mount(&server)
        .await;

    let entries = realm_index(&client(&server), Region::Us, GameVersion::Retail, "tok")
        .await
        .unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].slug, "area-52");
}

#[tokio::test]
async fn listing_requests_names_in_the_selected_locale() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .and(query_param("locale", "en_US"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search(vec![connected_group(
            7,
            "UP",
            "LOW",
            vec![realm(7, "argent-dawn", "Argent Dawn", "RP", "Roleplaying")],
        )])))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .and(query_param("locale", "fr_FR"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search(vec![connected_group(
            7,
            "UP",
            "LOW",
            vec![realm(7, "argent-dawn", "Aube d'argent", "RP", "JdR")],
        )])))
        .expect(1)
        .mount(&server)
        .await;

    // Client default stays en_US; only the selection asks for French.
    let selection = Selection::default().with_locale(Locale::FrFr);
    let listings = list_realms(&client(&server), selection, "tok").await.unwrap();

    assert_eq!(listings.len(), 1);
    assert_eq!(listings[0].name, "Aube d'argent");
    assert_eq!(listings[0].type_text, "JdR");
    server.verify().await;
}
