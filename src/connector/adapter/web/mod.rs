mod page;
mod server;
mod views;

pub use page::{html_escape, render_transcript_html, INDEX_HTML, PAGE_TITLE};
pub use server::{router, serve, spawn_session_sweeper, ApiError, SWEEP_INTERVAL};
pub use views::*;
