use preprocessor::presentation::Environment;

#[test]
fn given_known_names_when_parsing_environment_then_maps_case_insensitively() {
    let cases = [
        ("local", Environment::Local),
        ("Development", Environment::Local),
        ("test", Environment::Test),
        (" PROD ", Environment::Prod),
        ("production", Environment::Prod),
    ];

    for (input, expected) in cases {
        assert_eq!(Environment::try_from(input.to_string()), Ok(expected), "{input}");
    }
}

#[test]
fn given_unknown_name_when_parsing_environment_then_returns_error() {
    let result = Environment::try_from("staging".to_string());

    assert!(result.unwrap_err().contains("staging"));
}

#[test]
fn given_environment_when_naming_settings_file_then_uses_lowercase_suffix() {
    assert_eq!(Environment::Prod.settings_file(), "appsettings.prod");
    assert_eq!(Environment::Local.to_string(), "local");
}
