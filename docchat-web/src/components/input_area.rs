use shared::controls::ComposerDraft;
use web_sys::HtmlInputElement;
use yew::{Callback, Html, Properties, TargetCast, function_component, html, use_state};

#[derive(Properties, PartialEq, Clone)]
pub struct InputAreaProps {
    pub on_send: Callback<String>,
    #[prop_or(String::from("Type your question..."))]
    pub placeholder: String,
}

#[function_component(InputArea)]
pub fn input_area(props: &InputAreaProps) -> Html {
    let draft = use_state(ComposerDraft::default);

    let on_input = {
        let draft = draft.clone();
        Callback::from(move |event: yew::events::InputEvent| {
            let target: HtmlInputElement = event.target_unchecked_into();
            let mut next = (*draft).clone();
            next.on_change(target.value());
            draft.set(next);
        })
    };

    let submit = {
        let draft = draft.clone();
        let on_send = props.on_send.clone();
        Callback::from(move |()| {
            let mut next = (*draft).clone();
            if let Some(text) = next.submit() {
                draft.set(next);
                on_send.emit(text);
            }
        })
    };

    let on_keydown = {
        let submit = submit.clone();
        Callback::from(move |event: yew::events::KeyboardEvent| {
            if event.key() == "Enter" {
                event.prevent_default();
                submit.emit(());
            }
        })
    };

    let on_click = Callback::from(move |_| submit.emit(()));
    let blank = !draft.can_submit();

    html! {
        <div class="p-4 bg-gray-100 flex flex-col sm:flex-row gap-2">
            <input
                type="text"
                class="flex-1 p-2 border border-gray-300 rounded"
                placeholder={props.placeholder.clone()}
                value={draft.text().to_string()}
                oninput={on_input}
                onkeydown={on_keydown}
            />
            <button
                class="bg-blue-600 text-white px-4 py-2 rounded disabled:opacity-50"
                type="button"
                disabled={blank}
                onclick={on_click}
            >
                {"Send"}
            </button>
        </div>
    }
}
