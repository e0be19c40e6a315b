//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use crate::pages::{
    check_balance::CheckBalancePage, create_account::CreateAccountPage, deposit::DepositPage, home::HomePage,
    login::LoginPage, send_money::SendMoneyPage, transaction_history::TransactionHistoryPage,
};
use crate::state::session::SessionState;

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Provides the signed-in customer as shared context and sets up routing.
/// Route paths match the links the bank's pages have always used.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let session = RwSignal::new(SessionState { customer: None, loading: true });
    provide_context(session);

    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        let customer = crate::net::api::fetch_current_customer().await;
        session.set(SessionState { customer, loading: false });
    });

    view! {
        <Stylesheet id="leptos" href="/pkg/rivanna.css"/>
        <Title text="Rivanna Bank"/>

        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment("") view=HomePage/>
                <Route path=StaticSegment("Login") view=LoginPage/>
                <Route path=StaticSegment("Create-Account") view=CreateAccountPage/>
                <Route path=StaticSegment("Check-Balance") view=CheckBalancePage/>
                <Route path=StaticSegment("Deposit") view=DepositPage/>
                <Route path=StaticSegment("SendMoney") view=SendMoneyPage/>
                <Route path=StaticSegment("Transaction-History") view=TransactionHistoryPage/>
            </Routes>
        </Router>
    }
}
