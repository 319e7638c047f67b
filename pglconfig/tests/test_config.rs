use pglconfig::Config;
use serde_yaml::{Number, Value};

fn load_in_tempdir() -> (tempfile::TempDir, Config) {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::load_config(dir.path().to_str().unwrap()).unwrap();
    (dir, config)
}

#[test]
fn test_defaults_are_embedded() {
    let (_dir, config) = load_in_tempdir();

    // Les valeurs par défaut de la galerie sont présentes sans fichier externe
    assert_eq!(
        config.get_value(&["gallery", "page_size"]).unwrap(),
        Value::Number(Number::from(50))
    );
    assert_eq!(
        config.get_value(&["gallery", "window_capacity"]).unwrap(),
        Value::Number(Number::from(200))
    );
    assert_eq!(
        config.get_value(&["cache", "thumbnails", "capacity"]).unwrap(),
        Value::Number(Number::from(150))
    );
}

#[test]
fn test_set_value_round_trip() {
    let (dir, config) = load_in_tempdir();

    config
        .set_value(&["gallery", "page_size"], Value::Number(Number::from(20)))
        .unwrap();
    assert_eq!(
        config.get_value(&["gallery", "page_size"]).unwrap(),
        Value::Number(Number::from(20))
    );

    // La valeur persiste au rechargement
    let reloaded = Config::load_config(dir.path().to_str().unwrap()).unwrap();
    assert_eq!(
        reloaded.get_value(&["gallery", "page_size"]).unwrap(),
        Value::Number(Number::from(20))
    );
}

#[test]
fn test_missing_path_is_an_error() {
    let (_dir, config) = load_in_tempdir();
    assert!(config.get_value(&["no", "such", "path"]).is_err());
}

#[test]
fn test_keys_are_case_insensitive() {
    let (_dir, config) = load_in_tempdir();

    assert_eq!(
        config.get_value(&["GALLERY", "Page_Size"]).unwrap(),
        Value::Number(Number::from(50))
    );
}

#[test]
fn test_env_override_wins() {
    let dir = tempfile::tempdir().unwrap();
    std::env::set_var("PGLPHOTO_CONFIG__GALLERY__DEBOUNCE_MS", "250");
    let config = Config::load_config(dir.path().to_str().unwrap()).unwrap();
    std::env::remove_var("PGLPHOTO_CONFIG__GALLERY__DEBOUNCE_MS");

    assert_eq!(
        config.get_value(&["gallery", "debounce_ms"]).unwrap(),
        Value::Number(Number::from(250))
    );
}

#[test]
fn test_external_file_merges_over_defaults() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("config.yaml"),
        "gallery:\n  page_size: 25\n",
    )
    .unwrap();

    let config = Config::load_config(dir.path().to_str().unwrap()).unwrap();

    // La valeur externe prime, le reste vient des défauts intégrés
    assert_eq!(
        config.get_value(&["gallery", "page_size"]).unwrap(),
        Value::Number(Number::from(25))
    );
    assert_eq!(
        config.get_value(&["gallery", "window_capacity"]).unwrap(),
        Value::Number(Number::from(200))
    );
}

#[test]
fn test_managed_dir_is_created_and_resolved() {
    let (dir, config) = load_in_tempdir();

    let managed = config
        .get_managed_dir(&["favorites", "directory"], "favorites_data")
        .unwrap();

    let managed_path = std::path::Path::new(&managed);
    assert!(managed_path.is_absolute() || managed.starts_with(dir.path().to_str().unwrap()));
    assert!(managed_path.exists());
}
