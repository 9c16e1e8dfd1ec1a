//! Tests for the file lifecycle module.

use std::fs::{self, File};
use std::time::{Duration, SystemTime};

use tempfile::TempDir;

use super::*;

/// Moves the modification time of `path` forward by `secs`.
fn touch_forward(path: &std::path::Path, secs: u64) {
    let file = File::options().write(true).open(path).unwrap();
    file.set_modified(SystemTime::now() + Duration::from_secs(secs))
        .unwrap();
}

mod paths {
    use super::*;

    #[test]
    fn backup_path_appends_suffix() {
        let file = ConfigFile::new("/data/config.yml");
        assert_eq!(
            file.backup_path(),
            std::path::Path::new("/data/config.yml.bak")
        );
    }

    #[test]
    fn in_dir_splits_forward_slashes() {
        let base = std::path::Path::new("/data");
        let file = ConfigFile::in_dir(base, "lang/lang-eng.yml");
        assert_eq!(file.path(), base.join("lang").join("lang-eng.yml"));
    }

    #[test]
    fn in_dir_treats_leading_slash_as_relative() {
        let base = std::path::Path::new("/data");
        let file = ConfigFile::in_dir(base, "/config.yml");
        assert_eq!(file.path(), base.join("config.yml"));
    }
}

mod ensure_exists {
    use super::*;

    #[test]
    fn creates_missing_file_with_default_content() {
        let dir = TempDir::new().unwrap();
        let file = ConfigFile::new(dir.path().join("config.yml"));

        let created = file.ensure_exists(Some(b"# Defaults\nkey: 1\n")).unwrap();

        assert!(created);
        assert_eq!(file.read_raw().unwrap(), "# Defaults\nkey: 1\n");
    }

    #[test]
    fn creates_empty_file_without_default() {
        let dir = TempDir::new().unwrap();
        let file = ConfigFile::new(dir.path().join("config.yml"));

        assert!(file.ensure_exists(None).unwrap());
        assert!(file.exists());
        assert_eq!(file.read_raw().unwrap(), "");
    }

    #[test]
    fn creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let file = ConfigFile::new(dir.path().join("a").join("b").join("config.yml"));

        assert!(file.ensure_exists(None).unwrap());
        assert!(file.exists());
    }

    #[test]
    fn leaves_existing_file_untouched() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yml");
        fs::write(&path, "key: mine\n").unwrap();
        let file = ConfigFile::new(&path);

        let created = file.ensure_exists(Some(b"key: default\n")).unwrap();

        assert!(!created);
        assert_eq!(file.read_raw().unwrap(), "key: mine\n");
    }

    #[test]
    fn is_idempotent() {
        let dir = TempDir::new().unwrap();
        let file = ConfigFile::new(dir.path().join("config.yml"));

        assert!(file.ensure_exists(Some(b"a: 1\n")).unwrap());
        assert!(!file.ensure_exists(Some(b"b: 2\n")).unwrap());
        assert_eq!(file.read_raw().unwrap(), "a: 1\n");
    }

    #[test]
    fn reports_create_error_when_parent_is_a_file() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "").unwrap();
        let file = ConfigFile::new(blocker.join("config.yml"));

        let err = file.ensure_exists(None).unwrap_err();
        assert!(matches!(err, FileError::Create { .. }));
    }
}

mod read_write {
    use super::*;

    #[test]
    fn read_missing_file_is_read_error() {
        let dir = TempDir::new().unwrap();
        let file = ConfigFile::new(dir.path().join("missing.yml"));

        let err = file.read_raw().unwrap_err();
        assert!(matches!(err, FileError::Read { .. }));
        assert!(err.to_string().contains("missing.yml"));
    }

    #[test]
    fn read_rejects_invalid_utf8() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("binary.yml");
        fs::write(&path, [0xff, 0xfe, 0x00]).unwrap();

        let err = ConfigFile::new(&path).read_raw().unwrap_err();
        assert!(matches!(err, FileError::Read { .. }));
    }

    #[test]
    fn write_overwrites_instead_of_appending() {
        let dir = TempDir::new().unwrap();
        let file = ConfigFile::new(dir.path().join("config.yml"));

        file.write_raw("first: 1\nsecond: 2\n").unwrap();
        file.write_raw("third: 3\n").unwrap();

        assert_eq!(file.read_raw().unwrap(), "third: 3\n");
    }

    #[test]
    fn write_leaves_no_temp_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yml");
        ConfigFile::new(&path).write_raw("a: 1\n").unwrap();

        assert!(!dir.path().join("config.yml.tmp").exists());
    }

    #[test]
    fn write_preserves_utf8() {
        let dir = TempDir::new().unwrap();
        let file = ConfigFile::new(dir.path().join("lang-jpn.yml"));

        file.write_raw("greeting: こんにちは\n").unwrap();
        assert_eq!(file.read_raw().unwrap(), "greeting: こんにちは\n");
    }
}

mod backup {
    use super::*;

    #[test]
    fn missing_primary_is_a_no_op() {
        let dir = TempDir::new().unwrap();
        let file = ConfigFile::new(dir.path().join("config.yml"));

        assert_eq!(file.backup().unwrap(), BackupOutcome::NoSource);
        assert!(!file.backup_path().exists());
    }

    #[test]
    fn first_backup_copies_content() {
        let dir = TempDir::new().unwrap();
        let file = ConfigFile::new(dir.path().join("config.yml"));
        file.write_raw("# c\nkey: 1\n").unwrap();

        let outcome = file.backup().unwrap();

        assert!(outcome.copied());
        assert_eq!(
            fs::read_to_string(file.backup_path()).unwrap(),
            "# c\nkey: 1\n"
        );
    }

    #[test]
    fn second_backup_without_changes_does_nothing() {
        let dir = TempDir::new().unwrap();
        let file = ConfigFile::new(dir.path().join("config.yml"));
        file.write_raw("key: 1\n").unwrap();

        assert_eq!(file.backup().unwrap(), BackupOutcome::Copied);
        assert_eq!(file.backup().unwrap(), BackupOutcome::UpToDate);
    }

    #[test]
    fn newer_primary_refreshes_backup() {
        let dir = TempDir::new().unwrap();
        let file = ConfigFile::new(dir.path().join("config.yml"));
        file.write_raw("key: 1\n").unwrap();
        file.backup().unwrap();

        file.write_raw("key: 2\n").unwrap();
        touch_forward(file.path(), 10);

        assert_eq!(file.backup().unwrap(), BackupOutcome::Copied);
        assert_eq!(fs::read_to_string(file.backup_path()).unwrap(), "key: 2\n");
    }

    #[test]
    fn newer_backup_is_kept() {
        let dir = TempDir::new().unwrap();
        let file = ConfigFile::new(dir.path().join("config.yml"));
        file.write_raw("key: primary\n").unwrap();
        fs::write(file.backup_path(), "key: backup\n").unwrap();
        touch_forward(file.backup_path(), 10);

        assert_eq!(file.backup().unwrap(), BackupOutcome::UpToDate);
        assert_eq!(
            fs::read_to_string(file.backup_path()).unwrap(),
            "key: backup\n"
        );
    }
}

mod resources {
    use super::*;

    #[test]
    fn embedded_resources_return_registered_bytes() {
        let mut resources = EmbeddedResources::new().with("a.yml", b"a: 1\n");
        resources.insert("b.yml", b"b: 2\n".to_vec());

        assert_eq!(resources.open("a.yml").as_deref(), Some(&b"a: 1\n"[..]));
        assert_eq!(resources.open("b.yml").as_deref(), Some(&b"b: 2\n"[..]));
        assert!(resources.open("c.yml").is_none());
    }

    #[test]
    fn directory_resources_read_nested_files() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("lang")).unwrap();
        fs::write(dir.path().join("lang").join("lang-eng.yml"), "hi: Hello\n").unwrap();
        let resources = DirectoryResources::new(dir.path());

        assert_eq!(
            resources.open("lang/lang-eng.yml").as_deref(),
            Some(&b"hi: Hello\n"[..])
        );
        assert!(resources.open("lang/lang-deu.yml").is_none());
    }
}
