use dioxus::prelude::*;
use std::rc::Rc;

use ui::components::forms::LoginForm;
use ui::services::api::{ApiHandle, HttpApiClient, InMemoryApi, Migration, User};
use ui::services::auth::{AuthStore, BrowserSessionStore};
use ui::services::config::AppConfig;
use ui::utils::current_query_string;
use ui::{MigrationList, MigrationWizard};

const MAIN_CSS: Asset = asset!("/assets/main.css");

fn main() {
    dioxus::launch(App);
}

fn build_api(config: &AppConfig, token: Option<&str>) -> ApiHandle {
    if config.api.uses_in_memory_backend() {
        ApiHandle::new(InMemoryApi::with_sample_tables())
    } else {
        ApiHandle::new(
            HttpApiClient::new(config.api.clone()).with_token(token.map(str::to_string)),
        )
    }
}

#[component]
fn App() -> Element {
    // Handles are created once here and reach the pages through context
    let config = use_context_provider(|| AppConfig::from_query(&current_query_string()));
    let auth = use_context_provider(|| {
        Signal::new(AuthStore::restore(Rc::new(BrowserSessionStore::default())))
    });
    use_context_provider(|| build_api(&config, auth.peek().token()));

    rsx! {
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        Router::<Route> {}
    }
}

#[derive(Clone, Routable, Debug, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(Shell)]
        #[route("/")]
        Login {},
        #[route("/migrations")]
        Migrations {},
        #[route("/migrations/new")]
        NewMigration {},
}

#[component]
fn Shell() -> Element {
    let mut auth = use_context::<Signal<AuthStore>>();
    let api = use_context::<ApiHandle>();
    let nav = navigator();
    let user = auth.read().user().cloned();

    rsx! {
        header {
            class: "app-header",
            span { class: "app-title", "Data Migration" }
            if let Some(user) = user {
                div {
                    class: "user-menu",
                    span { "{user.name}" }
                    button {
                        class: "link-button",
                        onclick: move |_| {
                            api.api().sign_out();
                            auth.with_mut(|a| a.logout());
                            nav.replace(Route::Login {});
                        },
                        "Sign out"
                    }
                }
            }
        }
        main {
            class: "app-main",
            Outlet::<Route> {}
        }
    }
}

/// Redirect to the login page while nobody is signed in
fn use_require_login() -> bool {
    let auth = use_context::<Signal<AuthStore>>();
    let nav = navigator();
    let signed_in = auth.read().is_authenticated();
    use_effect(move || {
        if !auth.read().is_authenticated() {
            nav.replace(Route::Login {});
        }
    });
    signed_in
}

#[component]
fn Login() -> Element {
    let auth = use_context::<Signal<AuthStore>>();
    let api = use_context::<ApiHandle>();
    let nav = navigator();

    use_effect(move || {
        if auth.read().is_authenticated() {
            nav.replace(Route::Migrations {});
        }
    });

    rsx! {
        LoginForm {
            auth: auth,
            api: api,
            on_authenticated: move |_user: User| {
                nav.push(Route::Migrations {});
            }
        }
    }
}

#[component]
fn Migrations() -> Element {
    let api = use_context::<ApiHandle>();
    let nav = navigator();
    if !use_require_login() {
        return rsx! {};
    }

    rsx! {
        MigrationList {
            api: api,
            on_new: move |_| {
                nav.push(Route::NewMigration {});
            }
        }
    }
}

#[component]
fn NewMigration() -> Element {
    let api = use_context::<ApiHandle>();
    let config = use_context::<AppConfig>();
    let nav = navigator();
    if !use_require_login() {
        return rsx! {};
    }

    rsx! {
        MigrationWizard {
            api: api,
            config: config.wizard.clone(),
            on_complete: move |_migration: Migration| {
                nav.push(Route::Migrations {});
            },
            on_cancel: move |_| {
                nav.push(Route::Migrations {});
            }
        }
    }
}
