//! Request/response types exchanged with HTTP clients.

pub mod artist;
pub mod common;
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
pub mod track_info;
pub mod upload;
