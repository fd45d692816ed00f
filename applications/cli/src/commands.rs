//! Command handlers
//!
//! Each handler writes its human-readable result to `out` so the binary can
//! print to stdout and tests can capture it.

use crate::cli::{ArtistCommand, Command, PlaylistCommand, SongCommand, UserCommand};
use crate::config::{AppConfig, OutputKind};
use anyhow::Context as _;
use cadenza_core::{CreateArtist, CreateSong, CreateUser, LibraryStore, SongId};
use cadenza_playback::{
    NullDevice, OutputDevice, PlaybackController, PlaybackEvent, PlaybackState, SymphoniaDecoder,
};
use cadenza_storage::{PlaylistService, SqliteLibraryStore};
use crossbeam_channel::Receiver;
use std::io::Write;
use std::sync::Arc;

/// Open the catalog described by `config` and run one command
pub async fn run(
    command: Command,
    config: &AppConfig,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let pool = cadenza_storage::create_pool_with(
        &config.storage.database_url,
        config.storage.store_options(),
    )
    .await?;
    cadenza_storage::run_migrations(&pool).await?;

    let store = Arc::new(SqliteLibraryStore::new(pool));

    match command {
        Command::Users(cmd) => users(store.as_ref(), cmd, out).await,
        Command::Artists(cmd) => artists(store.as_ref(), cmd, out).await,
        Command::Songs(cmd) => songs(store.as_ref(), cmd, out).await,
        Command::Playlists(cmd) => playlists(store, cmd, out).await,
        Command::Play { song_id } => play(store.as_ref(), config, song_id, out).await,
    }
}

async fn users(
    store: &dyn LibraryStore,
    cmd: UserCommand,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    match cmd {
        UserCommand::Add {
            name,
            email,
            password,
            country,
            born,
        } => {
            let mut user = CreateUser::new(name, email, password);
            user.country = country;
            user.date_of_birth = born;

            let id = store.create_user(user).await?;
            writeln!(out, "Created user {id}")?;
        }
        UserCommand::List => {
            let users = store.list_users().await?;

            writeln!(out, "Users:")?;
            for user in users {
                writeln!(out, "  {} - {} <{}>", user.id, user.full_name, user.email)?;
            }
        }
        UserCommand::Delete { id } => {
            store.delete_user(id).await?;
            writeln!(out, "Deleted user {id}")?;
        }
    }

    Ok(())
}

async fn artists(
    store: &dyn LibraryStore,
    cmd: ArtistCommand,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    match cmd {
        ArtistCommand::Add {
            name,
            country,
            image,
        } => {
            let mut artist = CreateArtist::new(name);
            artist.country = country;
            artist.image_path = image;

            let id = store.create_artist(artist).await?;
            writeln!(out, "Created artist {id}")?;
        }
        ArtistCommand::List => {
            writeln!(out, "Artists:")?;
            for artist in store.list_artists().await? {
                match artist.country {
                    Some(country) => {
                        writeln!(out, "  {} - {} ({country})", artist.id, artist.name)?;
                    }
                    None => writeln!(out, "  {} - {}", artist.id, artist.name)?,
                }
            }
        }
    }

    Ok(())
}

async fn songs(
    store: &dyn LibraryStore,
    cmd: SongCommand,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    match cmd {
        SongCommand::Add {
            title,
            artist,
            audio,
            genre,
            duration,
            released,
            image,
        } => {
            let mut song = CreateSong::new(title, artist, audio);
            song.genre = genre;
            song.duration_seconds = duration;
            song.release_date = released;
            song.image_path = image;

            let id = store.create_song(song).await?;
            writeln!(out, "Created song {id}")?;
        }
        SongCommand::List { artist } => {
            let songs = match artist {
                Some(artist) => store.list_songs_by_artist(&artist).await?,
                None => store.list_songs().await?,
            };

            writeln!(out, "Songs:")?;
            for song in songs {
                writeln!(
                    out,
                    "  {} - {} by {} [{}s]",
                    song.id, song.title, song.artist_name, song.duration_seconds
                )?;
            }
        }
        SongCommand::Delete { id } => {
            store.delete_song(id).await?;
            writeln!(out, "Deleted song {id}")?;
        }
    }

    Ok(())
}

async fn playlists(
    store: Arc<SqliteLibraryStore>,
    cmd: PlaylistCommand,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let service = PlaylistService::new(store.clone());

    match cmd {
        PlaylistCommand::Create { caller, name } => {
            let id = service.create_playlist(caller, name).await?;
            writeln!(out, "Created playlist {id}")?;
        }
        PlaylistCommand::Rename { caller, id, name } => {
            service.rename_playlist(caller, id, name).await?;
            writeln!(out, "Renamed playlist {id}")?;
        }
        PlaylistCommand::Delete { caller, id } => {
            service.delete_playlist(caller, id).await?;
            writeln!(out, "Deleted playlist {id}")?;
        }
        PlaylistCommand::Add {
            caller,
            playlist,
            song,
        } => {
            service.add_song(caller, playlist, song).await?;
            writeln!(out, "Added song {song} to playlist {playlist}")?;
        }
        PlaylistCommand::Remove {
            caller,
            playlist,
            song,
        } => {
            service.remove_song(caller, playlist, song).await?;
            writeln!(out, "Removed song {song} from playlist {playlist}")?;
        }
        PlaylistCommand::Show { id } => {
            let songs = service.list_songs(id).await?;

            writeln!(out, "Playlist {id}:")?;
            for (position, song) in songs.iter().enumerate() {
                writeln!(
                    out,
                    "  {}. {} - {} (song {})",
                    position + 1,
                    song.artist_name,
                    song.title,
                    song.id
                )?;
            }
        }
        PlaylistCommand::List { owner } => {
            let playlists = match owner {
                Some(owner) => service.list_playlists(owner).await?,
                None => store.list_playlists().await?,
            };

            writeln!(out, "Playlists:")?;
            for playlist in playlists {
                writeln!(
                    out,
                    "  {} - {} (created {})",
                    playlist.id, playlist.name, playlist.created_date
                )?;
            }
        }
    }

    Ok(())
}

/// How a `play` command ended
#[derive(Debug, Clone, PartialEq, Eq)]
enum PlayOutcome {
    Finished { frames: u64 },
    Failed(String),
    Stopped,
}

async fn play(
    store: &dyn LibraryStore,
    config: &AppConfig,
    song_id: SongId,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let song = store.get_song(song_id).await?;
    let controller = Arc::new(PlaybackController::new(
        Arc::new(SymphoniaDecoder),
        output_device(config)?,
    ));

    let events = controller.events();
    controller
        .play_song(&song)
        .with_context(|| format!("cannot play song {song_id}"))?;
    writeln!(out, "Playing {} - {}", song.artist_name, song.title)?;

    let waiter = tokio::task::spawn_blocking(move || wait_for_end(&events));
    let outcome = tokio::select! {
        outcome = waiter => outcome?,
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("interrupted");
            PlayOutcome::Stopped
        }
    };
    controller.stop();

    match outcome {
        PlayOutcome::Finished { frames } => writeln!(out, "Finished after {frames} frames")?,
        PlayOutcome::Stopped => writeln!(out, "Stopped")?,
        PlayOutcome::Failed(message) => anyhow::bail!("playback failed: {message}"),
    }

    Ok(())
}

fn output_device(config: &AppConfig) -> anyhow::Result<Arc<dyn OutputDevice>> {
    match config.playback.output {
        OutputKind::Null if config.playback.paced => Ok(Arc::new(NullDevice::paced())),
        OutputKind::Null => Ok(Arc::new(NullDevice::new())),
        #[cfg(feature = "device-output")]
        OutputKind::Device => Ok(Arc::new(cadenza_playback::CpalDevice::new())),
        #[cfg(not(feature = "device-output"))]
        OutputKind::Device => anyhow::bail!("this build has no audio device support"),
    }
}

/// Block until the current track ends, fails or is stopped
fn wait_for_end(events: &Receiver<PlaybackEvent>) -> PlayOutcome {
    for event in events {
        match event {
            PlaybackEvent::TrackFinished { frames, .. } => {
                return PlayOutcome::Finished { frames };
            }
            PlaybackEvent::Error { message, .. } => return PlayOutcome::Failed(message),
            PlaybackEvent::StateChanged {
                state: PlaybackState::Stopped,
            } => return PlayOutcome::Stopped,
            PlaybackEvent::StateChanged { .. } => {}
        }
    }

    PlayOutcome::Stopped
}
