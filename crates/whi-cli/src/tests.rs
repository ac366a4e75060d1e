use super::*;

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["whi"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}

#[test]
fn parses_index_with_date_and_json() {
    let cli = Cli::try_parse_from(["whi", "index", "--date", "2024-07-04", "--json"])
        .expect("expected valid cli args");
    let Some(Commands::Index { source }) = cli.command else {
        panic!("expected index command");
    };
    assert_eq!(source.date, NaiveDate::from_ymd_opt(2024, 7, 4));
    assert!(source.json);
    assert!(source.url.is_none());
}

#[test]
fn rejects_malformed_date() {
    assert!(Cli::try_parse_from(["whi", "index", "--date", "07/04/2024"]).is_err());
}

#[test]
fn explicit_date_is_reference_date() {
    let source = SourceArgs {
        date: NaiveDate::from_ymd_opt(2024, 12, 25),
        ..SourceArgs::default()
    };
    assert_eq!(source.reference_date().to_string(), "2024-12-25");
}

#[test]
fn parses_region_by_coordinates() {
    let cli = Cli::try_parse_from([
        "whi", "region", "--lat", "33.749", "--lon", "-84.388", "--radius", "25",
    ])
    .expect("expected valid cli args");
    let Some(Commands::Region {
        lat,
        lon,
        zip,
        radius,
        ..
    }) = cli.command
    else {
        panic!("expected region command");
    };
    assert_eq!(lat, Some(33.749));
    assert_eq!(lon, Some(-84.388));
    assert!(zip.is_none());
    assert!((radius - 25.0).abs() < f64::EPSILON);
}

#[test]
fn region_by_zip_uses_default_radius() {
    let cli = Cli::try_parse_from(["whi", "region", "--zip", "30303"])
        .expect("expected valid cli args");
    let Some(Commands::Region { zip, radius, .. }) = cli.command else {
        panic!("expected region command");
    };
    assert_eq!(zip.as_deref(), Some("30303"));
    assert!((radius - DEFAULT_RADIUS_MILES).abs() < f64::EPSILON);
}

#[test]
fn region_requires_a_center() {
    assert!(Cli::try_parse_from(["whi", "region"]).is_err());
    assert!(Cli::try_parse_from(["whi", "region", "--lat", "33.7"]).is_err());
}

#[test]
fn region_rejects_both_point_and_zip() {
    assert!(Cli::try_parse_from([
        "whi", "region", "--lat", "33.7", "--lon", "-84.3", "--zip", "30303"
    ])
    .is_err());
}

#[test]
fn parses_extract_from_file() {
    let cli = Cli::try_parse_from(["whi", "extract", "--file", "page.html"])
        .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Extract { file: Some(_), url: None })
    ));
}

#[test]
fn parses_classify_fraction() {
    let cli = Cli::try_parse_from(["whi", "classify", "0.7"]).expect("expected valid cli args");
    let Some(Commands::Classify { fraction }) = cli.command else {
        panic!("expected classify command");
    };
    assert!((fraction - 0.7).abs() < f64::EPSILON);
}

#[test]
fn help_is_answered_by_the_parser() {
    let err = Cli::try_parse_from(["whi", "--help"]).unwrap_err();
    assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
}

#[test]
fn classify_needs_only_thresholds() {
    let thresholds = whi_core::SeverityThresholds::default();
    assert!(run::run_classify(&thresholds, 0.7).is_ok());
}

#[test]
fn classify_rejects_fraction_out_of_range() {
    let thresholds = whi_core::SeverityThresholds::default();
    let err = run::run_classify(&thresholds, 1.5).unwrap_err();
    assert!(err.to_string().contains("between 0 and 1"), "error was {err}");
}
