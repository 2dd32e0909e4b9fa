use super::*;

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["storefinder"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}

#[test]
fn parses_search_with_all_flags() {
    let cli = Cli::try_parse_from([
        "storefinder",
        "search",
        "--lat",
        "-33.86",
        "--lng",
        "151.2",
        "--radius",
        "12.5",
        "--limit",
        "20",
        "--only-open",
    ])
    .expect("expected valid cli args");

    let Some(Commands::Search {
        lat,
        lng,
        radius,
        limit,
        only_open,
    }) = cli.command
    else {
        panic!("expected search command");
    };
    assert_eq!(lat, Some(-33.86));
    assert_eq!(lng, Some(151.2));
    assert_eq!(radius, Some(12.5));
    assert_eq!(limit, Some(20));
    assert!(only_open);
}

#[test]
fn search_accepts_negative_limit() {
    let cli = Cli::try_parse_from(["storefinder", "search", "--limit", "-5"])
        .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Search {
            limit: Some(-5),
            ..
        })
    ));
}

#[test]
fn search_flags_are_optional() {
    let cli = Cli::try_parse_from(["storefinder", "search"]).expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Search {
            lat: None,
            lng: None,
            radius: None,
            limit: None,
            only_open: false
        })
    ));
}

#[test]
fn parses_city_command() {
    let cli =
        Cli::try_parse_from(["storefinder", "city", "Utrecht"]).expect("expected valid cli args");
    assert!(matches!(cli.command, Some(Commands::City { ref name }) if name == "Utrecht"));
}

#[test]
fn city_requires_name() {
    assert!(Cli::try_parse_from(["storefinder", "city"]).is_err());
}

#[test]
fn parses_cities_and_session() {
    let cli = Cli::try_parse_from(["storefinder", "cities"]).expect("expected valid cli args");
    assert!(matches!(cli.command, Some(Commands::Cities)));
    let cli = Cli::try_parse_from(["storefinder", "session"]).expect("expected valid cli args");
    assert!(matches!(cli.command, Some(Commands::Session)));
}

#[test]
fn parses_locate_with_gps() {
    let cli = Cli::try_parse_from(["storefinder", "locate", "--gps", "51.9244,4.4777"])
        .expect("expected valid cli args");
    let Some(Commands::Locate { gps: Some(pos) }) = cli.command else {
        panic!("expected locate with gps");
    };
    assert!((pos.latitude - 51.9244).abs() < f64::EPSILON);
    assert!((pos.longitude - 4.4777).abs() < f64::EPSILON);
    assert!(pos.accuracy.is_none());
}

#[test]
fn locate_rejects_malformed_gps() {
    assert!(Cli::try_parse_from(["storefinder", "locate", "--gps", "51.9"]).is_err());
}

#[test]
fn base_url_is_global() {
    let cli = Cli::try_parse_from([
        "storefinder",
        "cities",
        "--base-url",
        "http://stores.test/api/v1",
    ])
    .expect("expected valid cli args");
    assert_eq!(cli.base_url.as_deref(), Some("http://stores.test/api/v1"));
}

#[test]
fn parse_position_accepts_spaces_and_negatives() {
    let pos = parse_position(" -12.5 , 130.25 ").expect("should parse");
    assert!((pos.latitude + 12.5).abs() < f64::EPSILON);
    assert!((pos.longitude - 130.25).abs() < f64::EPSILON);
}

#[test]
fn parse_position_rejects_garbage() {
    assert!(parse_position("north,south").is_err());
    assert!(parse_position("52.0").is_err());
}
