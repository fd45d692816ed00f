mod test_helpers;

use cadenza_core::types::*;
use chrono::Utc;
use test_helpers::*;

#[tokio::test]
async fn test_create_playlist() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let owner = create_test_user(pool, "owner@x.com").await;
    let id = create_test_playlist(pool, "Road Trip", owner).await;

    let playlist = cadenza_storage::playlists::get_by_id(pool, id).await.unwrap();
    assert_eq!(playlist.name, "Road Trip");
    assert_eq!(playlist.owner_id, owner);
    assert_eq!(playlist.created_date, Utc::now().date_naive());
}

#[tokio::test]
async fn test_create_playlist_for_missing_owner() {
    let test_db = TestDb::new().await;

    let playlist = CreatePlaylist::new(77, "Lost");
    let err = cadenza_storage::playlists::create(test_db.pool(), playlist)
        .await
        .unwrap_err();

    assert!(err.is_not_found());
    assert!(err.to_string().contains("User"));
}

#[tokio::test]
async fn test_playlists_for_owner() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let ada = create_test_user(pool, "ada@x.com").await;
    let bob = create_test_user(pool, "bob@x.com").await;

    let first = create_test_playlist(pool, "One", ada).await;
    create_test_playlist(pool, "Bob's", bob).await;
    let second = create_test_playlist(pool, "Two", ada).await;

    let ids: Vec<PlaylistId> = cadenza_storage::playlists::get_for_owner(pool, ada)
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.id)
        .collect();

    assert_eq!(ids, vec![first, second]);
    assert_eq!(cadenza_storage::playlists::get_all(pool).await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_songs_keep_insertion_order() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let owner = create_test_user(pool, "owner@x.com").await;
    let playlist = create_test_playlist(pool, "Mix", owner).await;

    let c = create_test_song(pool, "C", "Artist").await;
    let a = create_test_song(pool, "A", "Artist").await;
    let b = create_test_song(pool, "B", "Artist").await;

    for song in [a, b, c] {
        cadenza_storage::playlists::add_song(pool, playlist, song).await.unwrap();
    }

    assert_eq!(playlist_song_ids(pool, playlist).await, vec![a, b, c]);
}

#[tokio::test]
async fn test_add_song_twice_is_noop() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let owner = create_test_user(pool, "owner@x.com").await;
    let playlist = create_test_playlist(pool, "Mix", owner).await;
    let first = create_test_song(pool, "First", "Artist").await;
    let second = create_test_song(pool, "Second", "Artist").await;

    cadenza_storage::playlists::add_song(pool, playlist, first).await.unwrap();
    cadenza_storage::playlists::add_song(pool, playlist, second).await.unwrap();
    cadenza_storage::playlists::add_song(pool, playlist, first).await.unwrap();

    // Still listed once, still in its original slot
    assert_eq!(playlist_song_ids(pool, playlist).await, vec![first, second]);
    let count = cadenza_storage::playlists::count_songs(pool, playlist)
        .await
        .unwrap();
    assert_eq!(count, 2);
}

#[tokio::test]
async fn test_add_song_checks_both_ids() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let owner = create_test_user(pool, "owner@x.com").await;
    let playlist = create_test_playlist(pool, "Mix", owner).await;
    let song = create_test_song(pool, "Song", "Artist").await;

    let err = cadenza_storage::playlists::add_song(pool, 999, song)
        .await
        .unwrap_err();
    assert!(err.is_not_found());
    assert!(err.to_string().contains("Playlist"));

    let err = cadenza_storage::playlists::add_song(pool, playlist, 999)
        .await
        .unwrap_err();
    assert!(err.is_not_found());
    assert!(err.to_string().contains("Song"));
}

#[tokio::test]
async fn test_remove_absent_song_is_ok() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let owner = create_test_user(pool, "owner@x.com").await;
    let playlist = create_test_playlist(pool, "Mix", owner).await;
    let song = create_test_song(pool, "Song", "Artist").await;

    cadenza_storage::playlists::remove_song(pool, playlist, song)
        .await
        .expect("removing an absent song is not an error");
}

#[tokio::test]
async fn test_re_add_after_remove_goes_to_end() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let owner = create_test_user(pool, "owner@x.com").await;
    let playlist = create_test_playlist(pool, "Mix", owner).await;
    let a = create_test_song(pool, "A", "Artist").await;
    let b = create_test_song(pool, "B", "Artist").await;

    cadenza_storage::playlists::add_song(pool, playlist, a).await.unwrap();
    cadenza_storage::playlists::add_song(pool, playlist, b).await.unwrap();
    cadenza_storage::playlists::remove_song(pool, playlist, a).await.unwrap();
    cadenza_storage::playlists::add_song(pool, playlist, a).await.unwrap();

    assert_eq!(playlist_song_ids(pool, playlist).await, vec![b, a]);
}

#[tokio::test]
async fn test_rename_playlist() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let owner = create_test_user(pool, "owner@x.com").await;
    let playlist = create_test_playlist(pool, "Old", owner).await;

    cadenza_storage::playlists::update(pool, playlist, UpdatePlaylist::rename("New"))
        .await
        .unwrap();

    let renamed = cadenza_storage::playlists::get_by_id(pool, playlist).await.unwrap();
    assert_eq!(renamed.name, "New");
    assert_eq!(renamed.owner_id, owner);
}

#[tokio::test]
async fn test_delete_playlist_keeps_songs() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let owner = create_test_user(pool, "owner@x.com").await;
    let playlist = create_test_playlist(pool, "Mix", owner).await;
    let song = create_test_song(pool, "Song", "Artist").await;
    cadenza_storage::playlists::add_song(pool, playlist, song).await.unwrap();

    cadenza_storage::playlists::delete(pool, playlist).await.unwrap();

    assert!(cadenza_storage::playlists::get_by_id(pool, playlist)
        .await
        .unwrap_err()
        .is_not_found());
    assert!(cadenza_storage::songs::get_by_id(pool, song).await.is_ok());

    let memberships: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM playlist_songs")
        .fetch_one(pool)
        .await
        .unwrap();
    assert_eq!(memberships, 0);
}

#[tokio::test]
async fn test_list_songs_of_missing_playlist() {
    let test_db = TestDb::new().await;

    let err = cadenza_storage::playlists::list_songs(test_db.pool(), 3)
        .await
        .unwrap_err();

    assert!(err.is_not_found());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_adds_all_land() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let owner = create_test_user(pool, "owner@x.com").await;
    let playlist = create_test_playlist(pool, "Party", owner).await;

    let mut songs = Vec::new();
    for i in 0..40 {
        songs.push(create_test_song(pool, &format!("Song {i}"), "Artist").await);
    }

    let handles: Vec<_> = songs
        .iter()
        .map(|&song| {
            let pool = pool.clone();
            tokio::spawn(
                async move { cadenza_storage::playlists::add_song(&pool, playlist, song).await },
            )
        })
        .collect();

    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let mut listed = playlist_song_ids(pool, playlist).await;
    assert_eq!(listed.len(), 40);
    listed.sort_unstable();
    assert_eq!(listed, songs);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_creates_all_land() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();
    let owner = create_test_user(pool, "owner@x.com").await;

    let handles: Vec<_> = (0..20)
        .map(|i| {
            let pool = pool.clone();
            tokio::spawn(async move {
                cadenza_storage::playlists::create(
                    &pool,
                    CreatePlaylist::new(owner, format!("List {i}")),
                )
                .await
            })
        })
        .collect();

    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let playlists = cadenza_storage::playlists::get_for_owner(pool, owner).await.unwrap();
    assert_eq!(playlists.len(), 20);
}
