//! Path routing.
//!
//! | Path | Route |
//! |------|-------|
//! | `/` | [`Route::Home`] |
//! | `/work` | [`Route::Work`] |
//! | `/work/<id>` | [`Route::WorkDetails`] |
//! | `/contacts` | [`Route::Contacts`] |
//! | anything else | [`Route::NotFound`], rendered as the home page |

use crate::content::ContentStore;
use crate::page::Page;
use crate::pages::{contacts_page, home_page, work_details_page, work_page, BuildCtx};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Work,
    WorkDetails(String),
    Contacts,
    NotFound(String),
}

impl Route {
    /// Parse an in-app path. Leading and trailing slashes are ignored.
    pub fn parse(path: &str) -> Self {
        let trimmed = path.trim().trim_matches('/');
        let mut parts = trimmed.split('/').filter(|p| !p.is_empty());
        match (parts.next(), parts.next(), parts.next()) {
            (None, _, _) => Route::Home,
            (Some("work"), None, _) => Route::Work,
            (Some("work"), Some(id), None) => Route::WorkDetails(id.to_string()),
            (Some("contacts"), None, _) => Route::Contacts,
            _ => Route::NotFound(path.to_string()),
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Work => "/work".to_string(),
            Route::WorkDetails(id) => format!("/work/{id}"),
            Route::Contacts => "/contacts".to_string(),
            Route::NotFound(path) => path.clone(),
        }
    }

    /// The route whose page is actually shown. Unknown paths and unknown work ids land
    /// on [`Route::Home`].
    pub fn resolve(self, content: &ContentStore) -> Self {
        match self {
            Route::NotFound(_) => Route::Home,
            Route::WorkDetails(id) if content.work(&id).is_none() => Route::Home,
            route => route,
        }
    }
}

/// Build the page for `route`. Unknown routes and unknown work ids fall back to the
/// home page.
pub fn create_page(route: &Route, ctx: &mut BuildCtx<'_>) -> Page {
    let content = ctx.content;
    match route {
        Route::Home => home_page(ctx),
        Route::Work => work_page(ctx),
        Route::Contacts => contacts_page(ctx),
        Route::WorkDetails(id) => match content.work(id) {
            Some(work) => work_details_page(ctx, work),
            None => {
                tracing::warn!(work = %id, "unknown work id, showing home");
                home_page(ctx)
            }
        },
        Route::NotFound(path) => {
            tracing::debug!(%path, "no route, showing home");
            home_page(ctx)
        }
    }
}
