use recordings_core::config::DatabaseConfig;
use recordings_core::db::schema::{ALBUM_COLUMNS, SAMPLE_ALBUMS};
use recordings_core::db::{ensure_album_schema, open_db, ping, seed_sample_albums, ConnectStage};
use recordings_core::{Album, AlbumRepository, DbError, RepoError, SqliteAlbumRepository};
use rusqlite::Connection;

#[test]
fn in_memory_config_creates_album_table() {
    let conn = open_db(&DatabaseConfig::in_memory()).unwrap();

    ping(&conn).unwrap();
    assert_eq!(column_names(&conn), ALBUM_COLUMNS);
}

#[test]
fn in_memory_without_create_schema_has_no_album_table() {
    let conn = open_db(&DatabaseConfig::default()).unwrap();

    assert!(matches!(
        SqliteAlbumRepository::try_new(&conn),
        Err(RepoError::MissingRequiredTable("album"))
    ));
}

#[test]
fn file_database_persists_rows_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let config = DatabaseConfig {
        create_schema: true,
        ..DatabaseConfig::file(dir.path().join("recordings.db"))
    };

    let id = {
        let conn = open_db(&config).unwrap();
        let repo = SqliteAlbumRepository::try_new(&conn).unwrap();
        repo.create(&Album::new("Jeru", "Gerry Mulligan", 17.99))
            .unwrap()
    };

    let conn = open_db(&config).unwrap();
    let repo = SqliteAlbumRepository::try_new(&conn).unwrap();
    assert_eq!(repo.get_by_id(id).unwrap().artist, "Gerry Mulligan");
}

#[test]
fn missing_file_in_missing_directory_is_connection_error() {
    let dir = tempfile::tempdir().unwrap();
    let config = DatabaseConfig::file(dir.path().join("absent").join("recordings.db"));

    let err = open_db(&config).unwrap_err();
    assert!(matches!(
        err,
        DbError::Connection {
            stage: ConnectStage::Open,
            ..
        }
    ));
    assert_eq!(err.code(), "db_open_failed");
}

#[test]
fn read_only_database_rejects_writes() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("readonly.db");
    {
        let conn = Connection::open(&path).unwrap();
        ensure_album_schema(&conn).unwrap();
        seed_sample_albums(&conn).unwrap();
    }

    let config = DatabaseConfig {
        read_only: true,
        ..DatabaseConfig::file(&path)
    };
    let conn = open_db(&config).unwrap();
    let repo = SqliteAlbumRepository::try_new(&conn).unwrap();

    assert_eq!(repo.list_by_artist("John Coltrane").unwrap().len(), 2);
    assert!(matches!(
        repo.delete(1),
        Err(RepoError::Write { op: "delete", .. })
    ));
}

#[test]
fn seeding_is_skipped_when_table_has_rows() {
    let conn = open_db(&DatabaseConfig::in_memory()).unwrap();

    assert_eq!(seed_sample_albums(&conn).unwrap(), SAMPLE_ALBUMS.len());
    assert_eq!(seed_sample_albums(&conn).unwrap(), 0);

    let repo = SqliteAlbumRepository::try_new(&conn).unwrap();
    let giant_steps = repo.get_by_id(2).unwrap();
    assert_eq!(giant_steps.title, "Giant Steps");
    assert_eq!(giant_steps.price, 63.99);
}

#[test]
fn ensure_album_schema_is_idempotent() {
    let conn = Connection::open_in_memory().unwrap();

    ensure_album_schema(&conn).unwrap();
    ensure_album_schema(&conn).unwrap();
    assert_eq!(column_names(&conn), ALBUM_COLUMNS);
}

fn column_names(conn: &Connection) -> Vec<String> {
    let mut stmt = conn
        .prepare("SELECT name FROM pragma_table_info('album') ORDER BY cid;")
        .unwrap();
    let names = stmt
        .query_map([], |row| row.get(0))
        .unwrap()
        .collect::<Result<Vec<String>, _>>()
        .unwrap();
    names
}
