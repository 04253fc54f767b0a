//! Demonstration entry point.
//!
//! # Responsibility
//! - Replay the reference catalog flow against the configured database.
//! - Treat a missing album as a reported outcome, any other failure as fatal.

use log::error;
use recordings_core::db::{ensure_album_schema, seed_sample_albums};
use recordings_core::{
    init_logging, open_db, Album, AlbumId, AlbumService, AppConfig, RepoError, RepoResult,
    SqliteAlbumRepository,
};
use std::error::Error;
use std::process::ExitCode;

fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=demo_run module=cli status=error error={err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let config = AppConfig::load()?;
    init_logging(&config.logging.level, config.logging.dir.as_deref())?;

    let conn = open_db(&config.database)?;
    println!("Connected! (recordings_core {})", recordings_core::core_version());

    // An in-memory database starts empty every run.
    if config.database.is_in_memory() || config.database.create_schema {
        ensure_album_schema(&conn)?;
        let seeded = seed_sample_albums(&conn)?;
        if seeded > 0 {
            println!("Seeded {seeded} sample albums");
        }
    }

    let service = AlbumService::new(SqliteAlbumRepository::try_new(&conn)?);

    let albums = service.list_by_artist("John Coltrane")?;
    println!("Albums found for John Coltrane: {}", albums.len());
    for album in &albums {
        println!("  {album}");
    }

    match service.find_by_id(2)? {
        Some(album) => println!("Album found: {album}"),
        None => println!("Album 2 not found"),
    }

    let id = service.create(&Album::new(
        "The Modern Sound of Betty Carter",
        "Betty Carter",
        49.99,
    ))?;
    println!("Album successfully added with id {id}");

    report_write(
        "updated",
        2,
        service.update(2, &Album::new("Small Steps", "John Coltrane", 63.99)),
    )?;
    report_write("deleted", 1, service.delete(1))?;

    Ok(())
}

fn report_write(action: &str, id: AlbumId, result: RepoResult<usize>) -> Result<(), RepoError> {
    match result {
        Ok(count) => println!("{count} album {action}"),
        Err(err) if err.is_not_found() => println!("Album {id} not found; nothing {action}"),
        Err(err) => return Err(err),
    }
    Ok(())
}
