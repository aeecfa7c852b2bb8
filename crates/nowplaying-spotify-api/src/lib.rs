pub mod client;
pub mod config;
pub mod currently_playing;
pub mod fetch;
pub mod get_current_user;
pub mod get_currently_playing;
pub mod now_playing;
pub mod token;
pub mod track;
pub mod user;
pub mod auth {
    pub mod callback_listener;
    pub mod error;
    pub mod exchange;
    pub mod orchestrator;
    pub mod session;
    pub mod token_store;
}
