//! Integration tests for modelfetch

mod cli_tests {
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;
    use std::io::Write;
    use std::path::Path;
    use tempfile::TempDir;
    use zip::write::SimpleFileOptions;

    /// Command isolated from the user's config and cache
    fn modelfetch(home: &TempDir) -> Command {
        let mut cmd = cargo_bin_cmd!("modelfetch");
        cmd.env("MODELFETCH_CONFIG", home.path().join("config.toml"))
            .env("MODELFETCH_CACHE_ROOT", home.path().join("cache"))
            .env("CI", "true");
        cmd
    }

    fn write_zip(path: &Path, entries: &[(&str, &[u8])]) {
        let file = std::fs::File::create(path).unwrap();
        let mut writer = zip::ZipWriter::new(file);
        for (name, contents) in entries {
            writer
                .start_file(*name, SimpleFileOptions::default())
                .unwrap();
            writer.write_all(contents).unwrap();
        }
        writer.finish().unwrap();
    }

    fn file_locator(path: &Path) -> String {
        url::Url::from_file_path(path).unwrap().to_string()
    }

    #[test]
    fn help_displays() {
        let home = TempDir::new().unwrap();
        modelfetch(&home)
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("Download and unpack model archives"));
    }

    #[test]
    fn version_displays() {
        let home = TempDir::new().unwrap();
        modelfetch(&home)
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("modelfetch"));
    }

    #[test]
    fn fetch_file_locator_end_to_end() {
        let home = TempDir::new().unwrap();
        let archive = home.path().join("widget-42.zip");
        write_zip(
            &archive,
            &[
                ("widget-42.gltf", b"{\"asset\":{}}"),
                ("widget-42.bin", b"\0\0\0\0"),
                ("texture.png", b"png"),
            ],
        );

        let expected = home
            .path()
            .join("cache")
            .join("Models")
            .join("widget-42")
            .join("widget-42.gltf");

        modelfetch(&home)
            .args(["fetch", &file_locator(&archive)])
            .assert()
            .success()
            .stdout(predicate::str::contains(expected.display().to_string()));

        assert!(expected.is_file());
        assert!(expected.with_file_name("texture.png").is_file());
    }

    #[test]
    fn fetch_json_reports_cache_hit_for_repeated_locator() {
        let home = TempDir::new().unwrap();
        let archive = home.path().join("chair.zip");
        write_zip(&archive, &[("Chair.GLTF", b"{}")]);
        let locator = file_locator(&archive);

        modelfetch(&home)
            .args(["fetch", "--format", "json", &locator, &locator])
            .assert()
            .success()
            .stdout(predicate::str::contains("\"cache_hit\": true"))
            .stdout(predicate::str::contains("\"cache_hit\": false"));
    }

    #[test]
    fn fetch_malformed_locator_fails() {
        let home = TempDir::new().unwrap();
        modelfetch(&home)
            .args(["fetch", "not a url"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid locator"));
    }

    #[test]
    fn fetch_empty_extension_fails() {
        let home = TempDir::new().unwrap();
        let archive = home.path().join("widget-42.zip");
        write_zip(&archive, &[("widget-42.gltf", b"{}")]);

        modelfetch(&home)
            .args(["fetch", "--extension", "", &file_locator(&archive)])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Extension must not be empty"));

        assert!(!home.path().join("cache").join("Models").exists());
    }

    #[test]
    fn fetch_unreadable_locator_shows_network_hint() {
        let home = TempDir::new().unwrap();
        let missing = home.path().join("missing.zip");

        modelfetch(&home)
            .args(["fetch", &file_locator(&missing)])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Download failed"))
            .stderr(predicate::str::contains("Hint:"));
    }

    #[test]
    fn fetch_without_entry_point_fails() {
        let home = TempDir::new().unwrap();
        let archive = home.path().join("parts.zip");
        write_zip(&archive, &[("parts.bin", b"bin"), ("parts.png", b"png")]);

        modelfetch(&home)
            .args(["fetch", &file_locator(&archive)])
            .assert()
            .failure()
            .stderr(predicate::str::contains("No .gltf file found"));
    }

    #[test]
    fn locate_finds_entry_point() {
        let home = TempDir::new().unwrap();
        std::fs::write(home.path().join("Model.GLTF"), b"{}").unwrap();

        modelfetch(&home)
            .args(["locate", &home.path().display().to_string()])
            .assert()
            .success()
            .stdout(predicate::str::contains("Model.GLTF"));
    }

    #[test]
    fn locate_missing_directory_fails() {
        let home = TempDir::new().unwrap();
        modelfetch(&home)
            .args(["locate", &home.path().join("nope").display().to_string()])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Not a directory"));
    }

    #[test]
    fn cache_path_uses_override() {
        let home = TempDir::new().unwrap();
        modelfetch(&home)
            .args(["cache", "path"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Models"));
    }

    #[test]
    fn cache_list_empty() {
        let home = TempDir::new().unwrap();
        modelfetch(&home)
            .args(["cache", "list"])
            .assert()
            .success()
            .stdout(predicate::str::contains("No cached assets"));
    }

    #[test]
    fn config_path() {
        let home = TempDir::new().unwrap();
        modelfetch(&home)
            .args(["config", "path"])
            .assert()
            .success()
            .stdout(predicate::str::contains("config.toml"));
    }

    #[test]
    fn config_show() {
        let home = TempDir::new().unwrap();
        modelfetch(&home)
            .args(["config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("[locate]"));
    }
}
