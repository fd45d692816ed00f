//! Cadenza Core
//!
//! Platform-agnostic entity model, error handling and store contract for the
//! Cadenza music library.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `User`, `Artist`, `Song`, `Playlist`
//! - **Store Contract**: the `LibraryStore` trait implemented by `cadenza-storage`
//! - **Error Handling**: unified `CadenzaError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use cadenza_core::types::{CreatePlaylist, CreateUser};
//!
//! let user = CreateUser::new("Ada Lovelace", "ada@example.com", "secret");
//! assert!(user.validate().is_ok());
//!
//! let playlist = CreatePlaylist::new(7, "Favorites");
//! assert_eq!(playlist.owner_id, 7);
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub mod storage;
pub mod types;

pub use error::{CadenzaError, Result};
pub use storage::LibraryStore;

pub use types::{
    Artist, ArtistId, CreateArtist, CreatePlaylist, CreateSong, CreateUser, Playlist, PlaylistId,
    Song, SongId, UpdateArtist, UpdatePlaylist, UpdateSong, UpdateUser, User, UserId,
};
