/// Command-line arguments
use cadenza_core::{PlaylistId, SongId, UserId};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "cadenza")]
#[command(about = "Cadenza music library and player", long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, env = "CADENZA_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage users
    #[command(subcommand)]
    Users(UserCommand),

    /// Manage artists
    #[command(subcommand)]
    Artists(ArtistCommand),

    /// Manage the song catalog
    #[command(subcommand)]
    Songs(SongCommand),

    /// Manage playlists
    #[command(subcommand)]
    Playlists(PlaylistCommand),

    /// Play a song until it ends
    Play {
        /// Song ID
        song_id: SongId,
    },
}

#[derive(Debug, Subcommand)]
pub enum UserCommand {
    /// Register a user
    Add {
        #[arg(short, long)]
        name: String,

        #[arg(short, long)]
        email: String,

        #[arg(short, long)]
        password: String,

        #[arg(long)]
        country: Option<String>,

        /// Date of birth (YYYY-MM-DD)
        #[arg(long)]
        born: Option<NaiveDate>,
    },

    /// List all users
    List,

    /// Delete a user and the playlists they own
    Delete { id: UserId },
}

#[derive(Debug, Subcommand)]
pub enum ArtistCommand {
    /// Add an artist
    Add {
        name: String,

        #[arg(long)]
        country: Option<String>,

        #[arg(long)]
        image: Option<String>,
    },

    /// List all artists
    List,
}

#[derive(Debug, Subcommand)]
pub enum SongCommand {
    /// Add a song to the catalog
    Add {
        #[arg(short, long)]
        title: String,

        #[arg(short, long)]
        artist: String,

        /// Path of the audio file
        #[arg(long)]
        audio: String,

        #[arg(short, long)]
        genre: Option<String>,

        /// Length in seconds
        #[arg(short, long, default_value_t = 0)]
        duration: u32,

        /// Release date (YYYY-MM-DD)
        #[arg(long)]
        released: Option<NaiveDate>,

        #[arg(long)]
        image: Option<String>,
    },

    /// List songs, optionally for one artist
    List {
        #[arg(short, long)]
        artist: Option<String>,
    },

    /// Delete a song and remove it from every playlist
    Delete { id: SongId },
}

#[derive(Debug, Subcommand)]
pub enum PlaylistCommand {
    /// Create a playlist
    Create {
        /// Acting user
        #[arg(long = "as", value_name = "USER_ID")]
        caller: UserId,

        name: String,
    },

    /// Rename a playlist
    Rename {
        #[arg(long = "as", value_name = "USER_ID")]
        caller: UserId,

        id: PlaylistId,

        name: String,
    },

    /// Delete a playlist; its songs stay in the catalog
    Delete {
        #[arg(long = "as", value_name = "USER_ID")]
        caller: UserId,

        id: PlaylistId,
    },

    /// Append a song to a playlist
    Add {
        #[arg(long = "as", value_name = "USER_ID")]
        caller: UserId,

        playlist: PlaylistId,

        song: SongId,
    },

    /// Remove a song from a playlist
    Remove {
        #[arg(long = "as", value_name = "USER_ID")]
        caller: UserId,

        playlist: PlaylistId,

        song: SongId,
    },

    /// Show the songs in a playlist
    Show { id: PlaylistId },

    /// List playlists, optionally for one owner
    List {
        #[arg(long)]
        owner: Option<UserId>,
    },
}
