//! Ledger table across both of the customer's accounts.

#[cfg(test)]
#[path = "transaction_history_test.rs"]
mod transaction_history_test;

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::components::nav_menu::NavMenu;
use crate::net::types::TransactionRecord;
use crate::state::session::SessionState;
use crate::util::auth::install_unauth_redirect;
use crate::util::money::format_balance;

/// Table cells for one row: date, type, amount, status, balance after.
pub(crate) fn history_row(record: &TransactionRecord) -> [String; 5] {
    [
        record.date.clone(),
        format!("{} ({})", record.transaction_type, record.account_type),
        format_balance(record.amount),
        record.status.clone(),
        record.balance_after.map(format_balance).unwrap_or_else(|| "-".to_owned()),
    ]
}

#[component]
pub fn TransactionHistoryPage() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    install_unauth_redirect(session, use_navigate());

    let records = RwSignal::new(Vec::<TransactionRecord>::new());
    let info = RwSignal::new("Loading transactions...".to_owned());

    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        match crate::net::api::fetch_transactions().await {
            Ok(list) => {
                info.set(if list.is_empty() { "No transactions yet.".to_owned() } else { String::new() });
                records.set(list);
            }
            Err(e) => {
                log::warn!("transaction history fetch failed: {e}");
                info.set(e);
            }
        }
    });

    view! {
        <NavMenu/>
        <main class="page history-page">
            <section class="card">
                <h1>"Transaction History"</h1>
                <Show when=move || !info.get().is_empty()>
                    <p class="form-message">{move || info.get()}</p>
                </Show>
                <Show when=move || !records.get().is_empty()>
                    <table class="history-table">
                        <thead>
                            <tr>
                                <th>"Date"</th>
                                <th>"Type"</th>
                                <th>"Amount"</th>
                                <th>"Status"</th>
                                <th>"Balance After"</th>
                            </tr>
                        </thead>
                        <tbody>
                            <For each=move || records.get() key=|record| record.id let:record>
                                <tr class:history-table__debit={record.amount < 0.0}>
                                    {history_row(&record).into_iter().map(|cell| view! { <td>{cell}</td> }).collect_view()}
                                </tr>
                            </For>
                        </tbody>
                    </table>
                </Show>
            </section>
        </main>
    }
}
