//! Home page: login form when anonymous, section overview otherwise.

use core_types::{NavLink, Session};
use resource::session::{Credentials, login};
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::api::BrowserTransport;

#[derive(Properties, PartialEq)]
pub struct HomePageProps {
    pub session: Session,
    pub on_login: Callback<Session>,
}

/// Home page component.
#[function_component(HomePage)]
pub fn home_page(props: &HomePageProps) -> Html {
    let username = use_state(String::new);
    let password = use_state(String::new);
    let error = use_state(|| None::<String>);
    let busy = use_state(|| false);

    if let Some(user) = props.session.user() {
        let sections = NavLink::visible_for(&props.session);
        return html! {
            <div>
                <h1>{ format!("Welcome, {}", user.username) }</h1>
                <div class="card">
                    <ul class="section-list">
                        { for sections.into_iter().map(|link| html! {
                            <li><a href={link.href()}>{ link.title() }</a></li>
                        })}
                    </ul>
                </div>
            </div>
        };
    }

    let bind = |state: &UseStateHandle<String>| {
        let state = state.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            state.set(input.value());
        })
    };
    let on_username = bind(&username);
    let on_password = bind(&password);

    let onsubmit = {
        let username = username.clone();
        let password = password.clone();
        let error = error.clone();
        let busy = busy.clone();
        let on_login = props.on_login.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let credentials = Credentials {
                username: (*username).clone(),
                password: (*password).clone(),
            };
            let error = error.clone();
            let busy = busy.clone();
            let on_login = on_login.clone();
            busy.set(true);
            spawn_local(async move {
                match login(&BrowserTransport::default(), &credentials).await {
                    Ok(session) => {
                        error.set(None);
                        on_login.emit(session);
                    }
                    Err(e) => {
                        log::error!("Login failed: {e}");
                        error.set(Some("Login failed. Check your username and password.".to_string()));
                    }
                }
                busy.set(false);
            });
        })
    };

    html! {
        <div>
            <h1>{"Simplify"}</h1>
            <p class="text-secondary">{"Log in to manage your simulation resources."}</p>

            <form class="card login-form" {onsubmit}>
                <label>
                    {"Username"}
                    <input type="text" value={(*username).clone()} oninput={on_username} />
                </label>
                <label>
                    {"Password"}
                    <input type="password" value={(*password).clone()} oninput={on_password} />
                </label>
                if let Some(message) = &*error {
                    <p class="form-error">{ message }</p>
                }
                <button class="btn btn-primary" type="submit" disabled={*busy}>{"Login"}</button>
            </form>
        </div>
    }
}
