//! Site header component.
//!
//! Site title (home link to the post list) and one link per static page.

use folio_core::route::{POSTS_FRAGMENT, Route};
use leptos::{ev, prelude::*};

use crate::app::BlogContext;
use crate::config::{SITE_TITLE, page_label};

stylance::import_crate_style!(css, "src/components/header/header.module.css");

/// Header with the site title and navigation.
///
/// Clicks are routed directly instead of through `hashchange`, so the
/// router records the entry itself.
#[component]
pub fn SiteHeader() -> impl IntoView {
    let ctx = use_context::<BlogContext>().expect("BlogContext must be provided");

    let home = Route::PostsList.to_hash().unwrap_or_default();
    let on_home = move |ev: ev::MouseEvent| {
        ev.prevent_default();
        ctx.navigate(POSTS_FRAGMENT);
    };

    let links = ctx
        .pages
        .get_value()
        .into_iter()
        .map(|page| {
            let href = format!("#{}", page);
            let label = page_label(&page);
            let on_click = move |ev: ev::MouseEvent| {
                ev.prevent_default();
                ctx.navigate(page.clone());
            };
            view! {
                <a href=href class=css::link on:click=on_click>{label}</a>
            }
        })
        .collect::<Vec<_>>();

    view! {
        <header class=css::header>
            <a href=home.clone() class=css::title on:click=on_home>{SITE_TITLE}</a>
            <nav class=css::nav>
                <a href=home class=css::link on:click=on_home>
                    "Posts"
                </a>
                {links}
            </nav>
        </header>
    }
}
