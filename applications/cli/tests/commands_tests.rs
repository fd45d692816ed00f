use cadenza_cli::{AppConfig, Cli};
use cadenza_core::CadenzaError;
use clap::Parser;
use tempfile::TempDir;

struct TestEnv {
    config: AppConfig,
    dir: TempDir,
}

impl TestEnv {
    fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");

        let mut config = AppConfig::default();
        config.storage.database_url =
            format!("sqlite://{}", dir.path().join("cadenza.db").display());
        config.playback.paced = false;

        Self { config, dir }
    }

    async fn run(&self, args: &[&str]) -> anyhow::Result<String> {
        let cli = Cli::try_parse_from(std::iter::once("cadenza").chain(args.iter().copied()))?;
        let mut out = Vec::new();
        cadenza_cli::run(cli.command, &self.config, &mut out).await?;
        Ok(String::from_utf8(out)?)
    }

    /// One second of stereo 16-bit audio at 8 kHz
    fn write_wav(&self, name: &str) -> String {
        let path = self.dir.path().join(name);
        let spec = hound::WavSpec {
            channels: 2,
            sample_rate: 8_000,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };

        let mut writer = hound::WavWriter::create(&path, spec).unwrap();
        for i in 0..8_000_i32 {
            let sample = ((i % 100) * 200 - 10_000) as i16;
            writer.write_sample(sample).unwrap();
            writer.write_sample(sample).unwrap();
        }
        writer.finalize().unwrap();

        path.display().to_string()
    }
}

fn cadenza_error(err: &anyhow::Error) -> &CadenzaError {
    err.downcast_ref::<CadenzaError>()
        .unwrap_or_else(|| panic!("expected a CadenzaError, got: {err:#}"))
}

#[tokio::test]
async fn test_users_add_and_list() {
    let env = TestEnv::new();

    let out = env
        .run(&["users", "add", "-n", "Ada", "-e", "ada@example.com", "-p", "pw"])
        .await
        .unwrap();
    assert_eq!(out.trim(), "Created user 1");

    let out = env.run(&["users", "list"]).await.unwrap();
    assert!(out.contains("1 - Ada <ada@example.com>"));
}

#[tokio::test]
async fn test_duplicate_email_is_reported() {
    let env = TestEnv::new();
    env.run(&["users", "add", "-n", "Ada", "-e", "ada@example.com", "-p", "pw"])
        .await
        .unwrap();

    let err = env
        .run(&["users", "add", "-n", "Other", "-e", "ADA@example.com", "-p", "pw"])
        .await
        .unwrap_err();

    assert!(matches!(cadenza_error(&err), CadenzaError::Duplicate(_)));
}

#[tokio::test]
async fn test_playlist_workflow() {
    let env = TestEnv::new();
    env.run(&["users", "add", "-n", "Ada", "-e", "ada@example.com", "-p", "pw"])
        .await
        .unwrap();
    env.run(&["songs", "add", "-t", "Clair de Lune", "-a", "Debussy", "--audio", "/m/1.flac"])
        .await
        .unwrap();
    env.run(&["songs", "add", "-t", "Gymnopedie", "-a", "Satie", "--audio", "/m/2.flac"])
        .await
        .unwrap();

    let out = env.run(&["playlists", "create", "--as", "1", "Favorites"]).await.unwrap();
    assert_eq!(out.trim(), "Created playlist 1");

    env.run(&["playlists", "add", "--as", "1", "1", "2"]).await.unwrap();
    env.run(&["playlists", "add", "--as", "1", "1", "1"]).await.unwrap();

    let out = env.run(&["playlists", "show", "1"]).await.unwrap();
    let lines: Vec<&str> = out.lines().skip(1).map(str::trim).collect();
    assert_eq!(
        lines,
        vec!["1. Satie - Gymnopedie (song 2)", "2. Debussy - Clair de Lune (song 1)"]
    );

    let out = env.run(&["playlists", "list", "--owner", "1"]).await.unwrap();
    assert!(out.contains("1 - Favorites"));
}

#[tokio::test]
async fn test_playlist_mutation_by_non_owner_is_denied() {
    let env = TestEnv::new();
    env.run(&["users", "add", "-n", "Ada", "-e", "ada@example.com", "-p", "pw"])
        .await
        .unwrap();
    env.run(&["users", "add", "-n", "Bob", "-e", "bob@example.com", "-p", "pw"])
        .await
        .unwrap();
    env.run(&["playlists", "create", "--as", "1", "Favorites"]).await.unwrap();

    let err = env
        .run(&["playlists", "rename", "--as", "2", "1", "Mine now"])
        .await
        .unwrap_err();
    assert!(matches!(cadenza_error(&err), CadenzaError::PermissionDenied(_)));

    let out = env.run(&["playlists", "list"]).await.unwrap();
    assert!(out.contains("1 - Favorites"));
}

#[tokio::test]
async fn test_song_delete_clears_playlists() {
    let env = TestEnv::new();
    env.run(&["users", "add", "-n", "Ada", "-e", "ada@example.com", "-p", "pw"])
        .await
        .unwrap();
    env.run(&["songs", "add", "-t", "Song", "-a", "Band", "--audio", "/m/s.mp3"])
        .await
        .unwrap();
    env.run(&["playlists", "create", "--as", "1", "Mix"]).await.unwrap();
    env.run(&["playlists", "add", "--as", "1", "1", "1"]).await.unwrap();

    env.run(&["songs", "delete", "1"]).await.unwrap();

    let out = env.run(&["playlists", "show", "1"]).await.unwrap();
    assert_eq!(out.trim(), "Playlist 1:");
}

#[tokio::test]
async fn test_songs_list_by_artist() {
    let env = TestEnv::new();
    env.run(&["songs", "add", "-t", "One", "-a", "Band", "--audio", "/m/1.mp3", "-d", "200"])
        .await
        .unwrap();
    env.run(&["songs", "add", "-t", "Two", "-a", "Other", "--audio", "/m/2.mp3"])
        .await
        .unwrap();

    let out = env.run(&["songs", "list", "--artist", "band"]).await.unwrap();

    assert!(out.contains("1 - One by Band [200s]"));
    assert!(!out.contains("Two"));
}

#[tokio::test]
async fn test_artists_add_and_list() {
    let env = TestEnv::new();
    env.run(&["artists", "add", "Nina Simone", "--country", "US"])
        .await
        .unwrap();
    env.run(&["artists", "add", "Anonymous"]).await.unwrap();

    let out = env.run(&["artists", "list"]).await.unwrap();

    assert!(out.contains("1 - Nina Simone (US)"));
    assert!(out.contains("2 - Anonymous"));
}

#[tokio::test]
async fn test_play_runs_until_track_ends() {
    let env = TestEnv::new();
    let audio = env.write_wav("tone.wav");
    env.run(&["songs", "add", "-t", "Tone", "-a", "Test", "--audio", &audio])
        .await
        .unwrap();

    let out = env.run(&["play", "1"]).await.unwrap();

    assert!(out.contains("Playing Test - Tone"));
    assert!(out.contains("Finished after 8000 frames"));
}

#[tokio::test]
async fn test_play_missing_file_fails() {
    let env = TestEnv::new();
    env.run(&["songs", "add", "-t", "Gone", "-a", "Test", "--audio", "/nowhere/gone.mp3"])
        .await
        .unwrap();

    let err = env.run(&["play", "1"]).await.unwrap_err();

    assert!(format!("{err:#}").contains("Resource unavailable"));
}

#[tokio::test]
async fn test_play_unknown_song() {
    let env = TestEnv::new();

    let err = env.run(&["play", "9"]).await.unwrap_err();

    assert!(matches!(cadenza_error(&err), CadenzaError::NotFound { .. }));
}
