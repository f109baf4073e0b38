use shared::controls::FileSelection;
use web_sys::{File, HtmlInputElement};
use yew::{
    Callback, Html, Properties, TargetCast, function_component, html, use_node_ref, use_state,
};

#[derive(Properties, PartialEq, Clone)]
pub struct FileUploadProps {
    pub on_upload: Callback<File>,
}

#[function_component(FileUpload)]
pub fn file_upload(props: &FileUploadProps) -> Html {
    let selection = use_state(FileSelection::<File>::default);
    let picker = use_node_ref();

    let on_change = {
        let selection = selection.clone();
        Callback::from(move |event: yew::events::Event| {
            let input: HtmlInputElement = event.target_unchecked_into();
            let mut next = (*selection).clone();
            next.on_file_chosen(input.files().and_then(|files| files.get(0)));
            selection.set(next);
        })
    };

    let nothing_selected = selection.selected().is_none();

    let on_click = {
        let picker = picker.clone();
        let on_upload = props.on_upload.clone();
        Callback::from(move |_| {
            let mut next = (*selection).clone();
            let Some(file) = next.submit() else {
                return;
            };
            selection.set(next);
            // Reset so picking the same file again fires `change`.
            if let Some(input) = picker.cast::<HtmlInputElement>() {
                input.set_value("");
            }
            on_upload.emit(file);
        })
    };

    html! {
        <div class="p-4 bg-gray-100 flex flex-col sm:flex-row items-center gap-2">
            <input
                ref={picker}
                type="file"
                class="flex-1 file:mr-2"
                onchange={on_change}
            />
            <button
                class="bg-green-600 text-white px-4 py-2 rounded disabled:opacity-50"
                type="button"
                disabled={nothing_selected}
                onclick={on_click}
            >
                {"Upload"}
            </button>
        </div>
    }
}
