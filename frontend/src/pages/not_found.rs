use leptos::*;

use crate::router::LANDING_PATH;

#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <div class="min-h-screen flex flex-col items-center justify-center space-y-2">
            <h2 class="text-3xl font-bold">"404"</h2>
            <p class="text-gray-600">"This page does not exist."</p>
            <a class="text-blue-600" href=LANDING_PATH>"Back to patients"</a>
        </div>
    }
}
