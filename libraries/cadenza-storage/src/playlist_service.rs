//! Playlist operations on behalf of a user
//!
//! Mutations require the caller to own the playlist. Reads are open to anyone.

use std::sync::Arc;

use cadenza_core::{
    error::Result, CadenzaError, CreatePlaylist, LibraryStore, Playlist, PlaylistId, Song, SongId,
    UpdatePlaylist, UserId,
};

/// Playlist-level operations built on a [`LibraryStore`]
#[derive(Clone)]
pub struct PlaylistService {
    store: Arc<dyn LibraryStore>,
}

impl PlaylistService {
    pub fn new(store: Arc<dyn LibraryStore>) -> Self {
        Self { store }
    }

    /// Fetch a playlist and check that `caller` owns it
    async fn owned_playlist(&self, caller: UserId, playlist_id: PlaylistId) -> Result<Playlist> {
        let playlist = self.store.get_playlist(playlist_id).await?;

        if !playlist.is_owned_by(caller) {
            tracing::warn!(
                caller,
                playlist_id,
                owner_id = playlist.owner_id,
                "playlist access denied"
            );
            return Err(CadenzaError::permission_denied(format!(
                "user {caller} does not own playlist {playlist_id}"
            )));
        }

        Ok(playlist)
    }

    /// Create a playlist owned by `owner_id`, dated today
    #[tracing::instrument(skip(self, name))]
    pub async fn create_playlist(
        &self,
        owner_id: UserId,
        name: impl Into<String>,
    ) -> Result<PlaylistId> {
        let playlist = CreatePlaylist::new(owner_id, name);
        playlist.validate()?;

        // Surface a missing owner as `User not found` before touching playlists
        self.store.get_user(owner_id).await?;

        let id = self.store.create_playlist(playlist).await?;
        tracing::info!(playlist_id = id, owner_id, "playlist created");
        Ok(id)
    }

    #[tracing::instrument(skip(self, new_name))]
    pub async fn rename_playlist(
        &self,
        caller: UserId,
        playlist_id: PlaylistId,
        new_name: impl Into<String>,
    ) -> Result<()> {
        let changes = UpdatePlaylist::rename(new_name);
        changes.validate()?;

        self.owned_playlist(caller, playlist_id).await?;
        self.store.update_playlist(playlist_id, changes).await
    }

    /// Delete a playlist; its songs stay in the catalog
    #[tracing::instrument(skip(self))]
    pub async fn delete_playlist(&self, caller: UserId, playlist_id: PlaylistId) -> Result<()> {
        self.owned_playlist(caller, playlist_id).await?;
        self.store.delete_playlist(playlist_id).await?;

        tracing::info!(playlist_id, caller, "playlist deleted");
        Ok(())
    }

    /// Append a song; adding a song that is already present is a no-op
    #[tracing::instrument(skip(self))]
    pub async fn add_song(
        &self,
        caller: UserId,
        playlist_id: PlaylistId,
        song_id: SongId,
    ) -> Result<()> {
        self.owned_playlist(caller, playlist_id).await?;
        self.store.add_song_to_playlist(playlist_id, song_id).await
    }

    /// Remove a song; removing an absent song is a no-op
    #[tracing::instrument(skip(self))]
    pub async fn remove_song(
        &self,
        caller: UserId,
        playlist_id: PlaylistId,
        song_id: SongId,
    ) -> Result<()> {
        self.owned_playlist(caller, playlist_id).await?;
        self.store
            .remove_song_from_playlist(playlist_id, song_id)
            .await
    }

    /// Songs in insertion order
    pub async fn list_songs(&self, playlist_id: PlaylistId) -> Result<Vec<Song>> {
        self.store.list_playlist_songs(playlist_id).await
    }

    /// Playlists owned by a user
    pub async fn list_playlists(&self, owner_id: UserId) -> Result<Vec<Playlist>> {
        self.store.list_playlists_for_owner(owner_id).await
    }
}
