//! Top navigation bar gated by the session user's capabilities.

use core_types::{NavLink, Session};
use yew::prelude::*;
use yew_router::prelude::*;

use crate::app::Route;

#[derive(Properties, PartialEq)]
pub struct NavbarProps {
    pub session: Session,
    /// Shown after a logout the server did not confirm.
    #[prop_or_default]
    pub notice: Option<String>,
    pub on_logout: Callback<()>,
}

/// Navbar with the links the session may see and the logout action.
#[function_component(Navbar)]
pub fn navbar(props: &NavbarProps) -> Html {
    let links = NavLink::visible_for(&props.session);
    let on_logout = props.on_logout.reform(|_: MouseEvent| ());

    html! {
        <nav class="navbar">
            <Link<Route> to={Route::Home} classes="nav-brand">
                {"Simplify"}
            </Link<Route>>
            <ul class="nav-links">
                { for links.into_iter().map(nav_item) }
            </ul>
            <div class="nav-session">
                if let Some(user) = props.session.user() {
                    <span class="badge">{ &user.username }</span>
                    <button class="btn" onclick={on_logout}>{"Logout"}</button>
                } else {
                    <Link<Route> to={Route::Home}>{"Login"}</Link<Route>>
                }
                if let Some(notice) = &props.notice {
                    <span class="nav-notice">{ notice }</span>
                }
            </div>
        </nav>
    }
}

fn nav_item(link: NavLink) -> Html {
    // Only the skill types screen lives in this app.
    let item = match link {
        NavLink::SkillTypes => html! {
            <Link<Route> to={Route::SkillTypes}>{ link.title() }</Link<Route>>
        },
        _ => html! { <a href={link.href()}>{ link.title() }</a> },
    };
    html! { <li>{ item }</li> }
}
