mod test_helpers;

use cadenza_core::types::*;
use test_helpers::*;

#[tokio::test]
async fn test_artist_crud() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let mut artist = CreateArtist::new("Nina Simone");
    artist.country = Some("US".to_string());
    let id = cadenza_storage::artists::create(pool, artist).await.unwrap();

    let fetched = cadenza_storage::artists::get_by_id(pool, id).await.unwrap();
    assert_eq!(fetched.name, "Nina Simone");
    assert_eq!(fetched.country.as_deref(), Some("US"));
    assert!(fetched.image_path.is_none());

    let changes = UpdateArtist {
        image_path: Some("/img/nina.jpg".to_string()),
        ..Default::default()
    };
    cadenza_storage::artists::update(pool, id, changes).await.unwrap();

    let fetched = cadenza_storage::artists::get_by_id(pool, id).await.unwrap();
    assert_eq!(fetched.image_path.as_deref(), Some("/img/nina.jpg"));
    assert_eq!(fetched.name, "Nina Simone");

    cadenza_storage::artists::delete(pool, id).await.unwrap();
    assert!(cadenza_storage::artists::get_by_id(pool, id)
        .await
        .unwrap_err()
        .is_not_found());
}

#[tokio::test]
async fn test_list_artists_in_creation_order() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let first = create_test_artist(pool, "B-side").await;
    let second = create_test_artist(pool, "A-side").await;

    let ids: Vec<ArtistId> = cadenza_storage::artists::get_all(pool)
        .await
        .unwrap()
        .into_iter()
        .map(|a| a.id)
        .collect();

    assert_eq!(ids, vec![first, second]);
}

#[tokio::test]
async fn test_deleting_artist_keeps_songs() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let artist = create_test_artist(pool, "Miles Davis").await;
    let song = create_test_song(pool, "So What", "Miles Davis").await;

    cadenza_storage::artists::delete(pool, artist).await.unwrap();

    let song = cadenza_storage::songs::get_by_id(pool, song).await.unwrap();
    assert_eq!(song.artist_name, "Miles Davis");
}

#[tokio::test]
async fn test_update_and_delete_missing_artist() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let changes = UpdateArtist {
        name: Some("Ghost".to_string()),
        ..Default::default()
    };
    assert!(cadenza_storage::artists::update(pool, 5, changes)
        .await
        .unwrap_err()
        .is_not_found());
    assert!(cadenza_storage::artists::delete(pool, 5)
        .await
        .unwrap_err()
        .is_not_found());
}
