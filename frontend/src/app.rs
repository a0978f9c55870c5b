use std::rc::Rc;

use yew::prelude::*;

use crate::auth::{self, Role, User};
use crate::backend::BackendClient;
use crate::components::cart_provider::{CartHandle, CartProvider};
use crate::components::layout::Layout;
use crate::components::toaster::ToastStack;
use crate::config::AppConfig;
use crate::pages::admin::AdminPage;
use crate::pages::blog::BlogPage;
use crate::pages::cart::CartPage;
use crate::pages::dashboard::CustomerDashboard;
use crate::pages::home::HomePage;
use crate::pages::login::LoginPage;
use crate::pages::product::ProductPage;
use crate::pages::shop::ShopPage;
use crate::toast::{ToastQueue, Toaster};

#[derive(Clone, Debug, PartialEq)]
pub enum Page {
    Home,
    Shop,
    Blog,
    Product(String),
    Cart,
    Login,
    Dashboard,
    Admin,
}

impl Page {
    /// Where a user lands after signing in.
    pub fn home_for(role: Role) -> Page {
        match role {
            Role::Admin => Page::Admin,
            Role::Customer => Page::Dashboard,
        }
    }
}

#[derive(Clone, PartialEq)]
pub struct AppContext {
    pub config: Rc<AppConfig>,
    pub client: BackendClient,
    pub page: Page,
    pub session: Option<User>,
    pub navigate: Callback<Page>,
    pub sign_in: Callback<User>,
    pub sign_out: Callback<()>,
}

#[hook]
pub fn use_app() -> AppContext {
    use_context::<AppContext>().expect("AppContext is provided by App")
}

#[hook]
pub fn use_toaster() -> Toaster {
    use_context::<Toaster>().expect("Toaster is provided by App")
}

#[hook]
pub fn use_cart() -> CartHandle {
    use_context::<CartHandle>().expect("CartHandle is provided by CartProvider")
}

#[function_component(App)]
pub fn app() -> Html {
    let config = use_memo(|_| AppConfig::from_env(), ());
    let page = use_state(|| Page::Home);
    let session = use_state(auth::load_session);
    let toasts = use_reducer(ToastQueue::default);

    let navigate = {
        let page = page.clone();
        Callback::from(move |next: Page| {
            tracing::debug!(?next, "navigate");
            page.set(next);
        })
    };

    let sign_in = {
        let session = session.clone();
        let page = page.clone();
        Callback::from(move |user: User| {
            auth::save_session(&user);
            page.set(Page::home_for(user.role));
            session.set(Some(user));
        })
    };

    let sign_out = {
        let session = session.clone();
        let page = page.clone();
        Callback::from(move |_| {
            auth::clear_session();
            session.set(None);
            page.set(Page::Home);
        })
    };

    let context = AppContext {
        client: BackendClient::new(&config),
        config,
        page: (*page).clone(),
        session: (*session).clone(),
        navigate,
        sign_in,
        sign_out,
    };

    let role = (*session).as_ref().map(|user| user.role);
    let content = match &*page {
        Page::Home => html! { <HomePage /> },
        Page::Shop => html! { <ShopPage /> },
        Page::Blog => html! { <BlogPage /> },
        Page::Product(id) => html! { <ProductPage id={id.clone()} /> },
        Page::Cart => html! { <CartPage /> },
        Page::Login => html! { <LoginPage /> },
        Page::Dashboard => match role {
            Some(Role::Customer) => html! { <CustomerDashboard /> },
            Some(Role::Admin) => html! { <AdminPage /> },
            None => html! { <LoginPage /> },
        },
        Page::Admin => match role {
            Some(Role::Admin) => html! { <AdminPage /> },
            Some(Role::Customer) => html! { <CustomerDashboard /> },
            None => html! { <LoginPage /> },
        },
    };

    html! {
        <ContextProvider<AppContext> context={context}>
            <ContextProvider<Toaster> context={Toaster::new(toasts)}>
                <CartProvider>
                    <Layout>
                        { content }
                    </Layout>
                    <ToastStack />
                </CartProvider>
            </ContextProvider<Toaster>>
        </ContextProvider<AppContext>>
    }
}
