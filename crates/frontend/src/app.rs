//! Main application component with routing.

use core_types::Session;
use resource::ClientError;
use resource::session::logout;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::api::BrowserTransport;
use crate::components::Navbar;
use crate::pages::{HomePage, SkillTypesPage};

/// Application routes.
#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/skill-types")]
    SkillTypes,
    #[not_found]
    #[at("/404")]
    NotFound,
}

/// Route switch function.
fn switch(route: Route, session: &Session, on_login: &Callback<Session>) -> Html {
    match route {
        Route::Home => html! {
            <HomePage session={session.clone()} on_login={on_login.clone()} />
        },
        Route::SkillTypes => html! { <SkillTypesPage /> },
        Route::NotFound => html! {
            <div class="card">
                <h1>{"404 - Page Not Found"}</h1>
                <p>{"The page you're looking for doesn't exist."}</p>
            </div>
        },
    }
}

/// Navbar notice after a logout attempt. The local session is cleared either
/// way, so a failure only means the server may still hold the old session.
fn logout_notice(result: &Result<(), ClientError>) -> Option<String> {
    match result {
        Ok(()) => None,
        Err(e) => {
            log::error!("Logout failed: {e}");
            Some("Signed out here, but the server did not confirm the logout".to_string())
        }
    }
}

/// Main application component. Owns the session and hands it down.
#[function_component(App)]
pub fn app() -> Html {
    let session = use_state(Session::default);
    let notice = use_state(|| None::<String>);

    let on_login = {
        let session = session.clone();
        let notice = notice.clone();
        Callback::from(move |next: Session| {
            notice.set(None);
            session.set(next);
        })
    };

    let on_logout = {
        let session = session.clone();
        let notice = notice.clone();
        Callback::from(move |()| {
            let session = session.clone();
            let notice = notice.clone();
            spawn_local(async move {
                let mut current = (*session).clone();
                let result = logout(&BrowserTransport::default(), &mut current).await;
                notice.set(logout_notice(&result));
                session.set(current);
            });
        })
    };

    let render = {
        let session = (*session).clone();
        move |route: Route| switch(route, &session, &on_login)
    };

    html! {
        <BrowserRouter>
            <div class="app-container">
                <Navbar session={(*session).clone()} notice={(*notice).clone()} {on_logout} />
                <main class="main-content">
                    <Switch<Route> {render} />
                </main>
            </div>
        </BrowserRouter>
    }
}
