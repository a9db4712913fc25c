//! End-to-end runs against a stand-in ffmpeg script.
#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use album_converter::{run, OutputFormat, Quality, RunConfig};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

/// Writes its arguments into the output file (the last argument).
/// Written once, before any test can spawn it.
fn fake_ffmpeg() -> PathBuf {
    static FAKE: OnceLock<PathBuf> = OnceLock::new();
    FAKE.get_or_init(|| {
        let dir = std::env::temp_dir().join(format!("album-converter-tools-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("ffmpeg");
        fs::write(
            &path,
            "#!/bin/sh\nfor last; do :; done\necho \"$@\" > \"$last\"\n",
        )
        .unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path
    })
    .clone()
}

fn touch(path: &Path) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, b"audio").unwrap();
}

fn sorted_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn converts_a_music_library() {
    let music = TempDir::new().unwrap();
    let root = music.path();
    touch(&root.join("Green Day/Kerplunk/01.flac"));
    touch(&root.join("Green Day/Kerplunk/02.WAV"));
    touch(&root.join("Green Day/Kerplunk/folder.jpg"));
    touch(&root.join("Green Day/Insomniac/01.mp3"));
    touch(&root.join("Tipper/Bio.txt"));

    let config = RunConfig {
        ffmpeg_path: Some(fake_ffmpeg()),
        quality: Some(Quality::from_token("5")),
        ..RunConfig::new(root, OutputFormat::Ogg)
    };
    run(&config).unwrap();

    assert_eq!(
        sorted_names(&root.join("Green Day")),
        vec!["Insomniac", "Insomniac (ogg)", "Kerplunk", "Kerplunk (ogg)"]
    );
    assert_eq!(sorted_names(&root.join("Green Day/Kerplunk (ogg)")), vec!["01.ogg", "02.ogg"]);
    assert_eq!(sorted_names(&root.join("Tipper")), vec!["Bio.txt"]);

    let recorded = fs::read_to_string(root.join("Green Day/Kerplunk (ogg)/01.ogg")).unwrap();
    assert!(recorded.contains("-qscale:a 5 -vn -codec:a libvorbis -n"));

    // Sources are left alone
    assert_eq!(fs::read(root.join("Green Day/Kerplunk/01.flac")).unwrap(), b"audio");
}

#[test]
fn second_run_does_not_convert_its_own_output() {
    let music = TempDir::new().unwrap();
    touch(&music.path().join("Album/01.flac"));

    let config = RunConfig {
        ffmpeg_path: Some(fake_ffmpeg()),
        ..RunConfig::new(music.path(), OutputFormat::Mp3)
    };
    run(&config).unwrap();
    run(&config).unwrap();

    assert_eq!(sorted_names(music.path()), vec!["Album", "Album (mp3)"]);
    assert_eq!(sorted_names(&music.path().join("Album (mp3)")), vec!["01.mp3"]);
}

#[test]
fn missing_ffmpeg_fails_before_any_directory_is_created() {
    let music = TempDir::new().unwrap();
    touch(&music.path().join("Album/01.flac"));

    let config = RunConfig {
        ffmpeg_path: Some(music.path().join("bin/ffmpeg")),
        ..RunConfig::new(music.path(), OutputFormat::Flac)
    };
    assert!(run(&config).is_err());
    assert_eq!(sorted_names(music.path()), vec!["Album"]);
}
