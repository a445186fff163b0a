//! API route configuration.

use axum::{Router, routing::get};

use crate::api::handlers::{
    camp_speakers_handler, create_camp_handler, create_talk_handler, delete_camp_handler,
    delete_talk_handler, get_camp_handler, get_speaker_handler, get_talk_handler,
    list_camps_handler, list_speakers_handler, list_talks_handler, search_camps_handler,
    update_camp_handler, update_talk_handler,
};
use crate::state::AppState;

/// All API routes, mounted under `/api` by the top-level router.
///
/// # Endpoints
///
/// - `GET    /camps`                        - List camps
/// - `POST   /camps`                        - Create a camp
/// - `GET    /camps/search`                 - Search camps by event date
/// - `GET    /camps/{moniker}`              - Fetch one camp
/// - `PUT    /camps/{moniker}`              - Partially update a camp
/// - `DELETE /camps/{moniker}`              - Delete a camp (and its talks)
/// - `GET    /camps/{moniker}/talks`        - List a camp's talks
/// - `POST   /camps/{moniker}/talks`        - Create a talk
/// - `GET    /camps/{moniker}/talks/{id}`   - Fetch one talk
/// - `PUT    /camps/{moniker}/talks/{id}`   - Partially update a talk
/// - `DELETE /camps/{moniker}/talks/{id}`   - Delete a talk
/// - `GET    /camps/{moniker}/speakers`     - Speakers with a talk in the camp
/// - `GET    /speakers`                     - List speakers
/// - `GET    /speakers/{id}`                - Fetch one speaker
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/camps", get(list_camps_handler).post(create_camp_handler))
        .route("/camps/search", get(search_camps_handler))
        .route(
            "/camps/{moniker}",
            get(get_camp_handler)
                .put(update_camp_handler)
                .delete(delete_camp_handler),
        )
        .route(
            "/camps/{moniker}/talks",
            get(list_talks_handler).post(create_talk_handler),
        )
        .route(
            "/camps/{moniker}/talks/{id}",
            get(get_talk_handler)
                .put(update_talk_handler)
                .delete(delete_talk_handler),
        )
        .route("/camps/{moniker}/speakers", get(camp_speakers_handler))
        .route("/speakers", get(list_speakers_handler))
        .route("/speakers/{id}", get(get_speaker_handler))
}
