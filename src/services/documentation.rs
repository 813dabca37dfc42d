use utoipa::OpenApi;

#[derive(OpenApi)]
/// Aggregated OpenAPI specification for the Name That Tune backend.
#[openapi(
    paths(
        crate::routes::health::welcome,
        crate::routes::health::healthcheck,
        crate::routes::player::list_players,
        crate::routes::player::get_player,
        crate::routes::player::create_player,
        crate::routes::player::update_player,
        crate::routes::player::delete_player,
        crate::routes::game::list_games,
        crate::routes::game::get_game,
        crate::routes::game::get_game_participants,
        crate::routes::game::get_game_full,
        crate::routes::game::get_game_rounds,
        crate::routes::game::get_active_round,
        crate::routes::game::create_game,
        crate::routes::game::update_game,
        crate::routes::game::delete_game,
        crate::routes::participant::list_participants,
        crate::routes::participant::get_participant,
        crate::routes::participant::get_participant_with_player,
        crate::routes::participant::create_participant,
        crate::routes::participant::update_participant,
        crate::routes::participant::delete_participant,
        crate::routes::round::list_rounds,
        crate::routes::round::get_round,
        crate::routes::round::get_round_teams,
        crate::routes::round::get_round_details,
        crate::routes::round::get_round_songlist,
        crate::routes::round::create_round,
        crate::routes::round::update_round,
        crate::routes::round::delete_round,
        crate::routes::round_team::list_round_teams,
        crate::routes::round_team::get_round_team,
        crate::routes::round_team::get_team_players,
        crate::routes::round_team::create_round_team,
        crate::routes::round_team::update_round_team,
        crate::routes::round_team::delete_round_team,
        crate::routes::round_team_player::list_memberships,
        crate::routes::round_team_player::get_membership,
        crate::routes::round_team_player::create_membership,
        crate::routes::round_team_player::update_membership,
        crate::routes::round_team_player::delete_membership,
        crate::routes::song::list_songs,
        crate::routes::song::get_song,
        crate::routes::song::create_song,
        crate::routes::song::update_song,
        crate::routes::song::delete_song,
        crate::routes::artist::list_artists,
        crate::routes::artist::get_artist,
        crate::routes::artist::create_artist,
        crate::routes::artist::update_artist,
        crate::routes::artist::delete_artist,
        crate::routes::track_info::list_track_info,
        crate::routes::track_info::get_track_info,
        crate::routes::track_info::get_track_info_details,
        crate::routes::track_info::create_track_info,
        crate::routes::track_info::delete_track_info,
        crate::routes::round_songlist::list_entries,
        crate::routes::round_songlist::get_entry,
        crate::routes::round_songlist::create_entry,
        crate::routes::round_songlist::update_entry,
        crate::routes::round_songlist::delete_entry,
        crate::routes::settings::list_settings,
        crate::routes::settings::get_setting,
        crate::routes::settings::create_setting,
        crate::routes::settings::update_setting,
        crate::routes::settings::upsert_setting,
        crate::routes::settings::delete_setting,
        crate::routes::upload::upload_image,
        crate::routes::spotify_auth::login,
        crate::routes::spotify_auth::callback,
        crate::routes::spotify_auth::token,
        crate::routes::spotify_auth::refresh,
        crate::routes::spotify_auth::logout,
        crate::routes::spotify_auth::status,
        crate::routes::spotify::current_user,
        crate::routes::spotify::user_profile,
        crate::routes::spotify::track,
        crate::routes::spotify::several_tracks,
        crate::routes::spotify::search_tracks,
        crate::routes::spotify::artist,
        crate::routes::spotify::artist_albums,
        crate::routes::spotify::artist_top_tracks,
        crate::routes::spotify::album,
        crate::routes::spotify::album_tracks,
        crate::routes::spotify::playlist,
        crate::routes::spotify::playlist_tracks,
        crate::routes::spotify::user_playlists,
        crate::routes::spotify::create_playlist,
        crate::routes::spotify::add_tracks,
        crate::routes::spotify::playback_state,
        crate::routes::spotify::currently_playing,
        crate::routes::spotify::recently_played,
        crate::routes::spotify::devices,
        crate::routes::spotify::start_playback,
        crate::routes::spotify::pause_playback,
        crate::routes::spotify::skip_to_next,
        crate::routes::spotify::skip_to_previous,
        crate::routes::spotify::set_shuffle,
        crate::routes::spotify::transfer_playback,
    ),
    components(
        schemas(
            crate::dto::health::HealthResponse,
            crate::dto::common::MessageResponse,
            crate::dto::upload::UploadResponse,
            crate::dto::player::CreatePlayerRequest,
            crate::dto::player::UpdatePlayerRequest,
            crate::dto::game::CreateGameRequest,
            crate::dto::game::UpdateGameRequest,
            crate::dto::game::GameWithParticipants,
            crate::dto::game::GameFull,
            crate::dto::participant::CreateParticipantRequest,
            crate::dto::participant::UpdateParticipantRequest,
            crate::dto::participant::ParticipantWithPlayer,
            crate::dto::round::CreateRoundRequest,
            crate::dto::round::UpdateRoundRequest,
            crate::dto::round::RoundTeamWithPlayers,
            crate::dto::round::RoundWithTeams,
            crate::dto::round::RoundSonglistWithSong,
            crate::dto::round::RoundWithDetails,
            crate::dto::round_team::CreateRoundTeamRequest,
            crate::dto::round_team::UpdateRoundTeamRequest,
            crate::dto::round_team_player::CreateRoundTeamPlayerRequest,
            crate::dto::round_team_player::UpdateRoundTeamPlayerRequest,
            crate::dto::song::CreateSongRequest,
            crate::dto::song::UpdateSongRequest,
            crate::dto::artist::CreateArtistRequest,
            crate::dto::artist::UpdateArtistRequest,
            crate::dto::track_info::CreateTrackInfoRequest,
            crate::dto::track_info::TrackInfoWithDetails,
            crate::dto::round_songlist::CreateRoundSonglistRequest,
            crate::dto::round_songlist::UpdateRoundSonglistRequest,
            crate::dto::settings::CreateSettingRequest,
            crate::dto::settings::UpdateSettingRequest,
            crate::dto::spotify::SpotifyTrack,
            crate::dto::spotify::SpotifyArtist,
            crate::dto::spotify::SpotifyAlbum,
            crate::dto::spotify::SpotifyPlaylist,
            crate::dto::spotify::SpotifyUser,
            crate::dto::spotify::PlaybackRequest,
            crate::dto::spotify::CreatePlaylistRequest,
            crate::dto::spotify::AddTracksRequest,
            crate::dto::spotify::TransferPlaybackRequest,
            crate::dto::spotify::AuthUrlResponse,
            crate::dto::spotify::AccessTokenResponse,
            crate::dto::spotify::AuthStatusResponse,
            crate::dao::models::Player,
            crate::dao::models::Game,
            crate::dao::models::Participant,
            crate::dao::models::Round,
            crate::dao::models::RoundTeam,
            crate::dao::models::RoundTeamPlayer,
            crate::dao::models::Song,
            crate::dao::models::Artist,
            crate::dao::models::TrackInfo,
            crate::dao::models::RoundSonglist,
            crate::dao::models::GameplaySetting,
            crate::dao::models::Role,
            crate::dao::models::ScoreType,
        )
    ),
    tags(
        (name = "players", description = "Player profile management"),
        (name = "games", description = "Game lifecycle and composed views"),
        (name = "participants", description = "Player enrollment into games"),
        (name = "rounds", description = "Round lifecycle and composed views"),
        (name = "round-teams", description = "Per-round team management"),
        (name = "round-team-players", description = "Team membership and roles"),
        (name = "songs", description = "Song catalog"),
        (name = "artists", description = "Artist catalog"),
        (name = "track-info", description = "Song/artist credit links"),
        (name = "round-songlists", description = "Per-round songlists and guesses"),
        (name = "settings", description = "Gameplay settings key/value store"),
        (name = "upload", description = "Image uploads"),
        (name = "spotify-auth", description = "Spotify OAuth flow"),
        (name = "spotify", description = "Authenticated Spotify Web API proxy"),
    )
)]
pub struct ApiDoc;
