#![allow(dead_code)]

use pathmux::{
    Args, Context, ServeMux,
    testing::{Journal, RecordingHandler, RecordingMiddleware},
};

// ============================================================================
// Fixtures
// ============================================================================

/// A mux with the canonical `/users/`, `/users/list`, `/` routes, each
/// handled by its own recorder.
pub struct UsersFixture {
    pub mux: ServeMux,
    pub users: RecordingHandler,
    pub list: RecordingHandler,
    pub root: RecordingHandler,
}

impl UsersFixture {
    pub fn new() -> Self {
        let mux = ServeMux::new();
        let users = RecordingHandler::new();
        let list = RecordingHandler::new();
        let root = RecordingHandler::new();

        mux.register("/users/", users.clone());
        mux.register("/users/list", list.clone());
        mux.register("/", root.clone());

        Self {
            mux,
            users,
            list,
            root,
        }
    }
}

pub fn recorder(name: &'static str, journal: &Journal) -> RecordingMiddleware {
    RecordingMiddleware::new(name, journal.clone())
}

/// A handler that writes `name` followed by the path it received.
pub fn path_writer(
    journal: &Journal,
) -> impl Fn(Context<Args>) -> std::future::Ready<pathmux::HandlerResult> + Send + Sync + 'static {
    let journal = journal.clone();
    move |cx: Context<Args>| {
        journal.push(cx.path().to_owned());
        std::future::ready(Ok(()))
    }
}
