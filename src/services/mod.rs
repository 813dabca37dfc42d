//! Service layer: Spotify token lifecycle, the Web API client and the
//! OpenAPI document.

pub mod documentation;
pub mod spotify;
pub mod spotify_auth;
