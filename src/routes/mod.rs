use axum::Router;
use tower_http::services::ServeDir;

use crate::state::SharedState;

pub mod artist;
pub mod docs;
pub mod game;
pub mod health;
pub mod participant;
pub mod player;
pub mod round;
pub mod round_songlist;
pub mod round_team;
pub mod round_team_player;
pub mod settings;
pub mod song;
pub mod spotify;
pub mod spotify_auth;
pub mod track_info;
pub mod upload;

/// Compose all route trees, wiring in shared state and documentation routes.
///
/// The Spotify proxy subtree carries its token middleware; the auth subtree
/// is merged separately so login and callback stay reachable without a token.
pub fn router(state: SharedState) -> Router<()> {
    let api_router = health::router()
        .merge(player::router())
        .merge(game::router())
        .merge(participant::router())
        .merge(round::router())
        .merge(round_team::router())
        .merge(round_team_player::router())
        .merge(song::router())
        .merge(artist::router())
        .merge(track_info::router())
        .merge(round_songlist::router())
        .merge(settings::router())
        .merge(upload::router())
        .merge(spotify_auth::router())
        .merge(spotify::router(state.clone()))
        .nest_service("/images/usr", ServeDir::new(&state.config.upload_dir));

    let docs_router = docs::router(state.clone());

    api_router.merge(docs_router).with_state(state)
}
