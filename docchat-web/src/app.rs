use crate::api::{DocChatClient, PickedFile};
use crate::components::{ChatWindow, ErrorBanner, FileUpload, InputArea};
use crate::models::chat_store::ChatStore;
use shared::Coordinator;
use shared::conversation::ConversationAction;
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use yew::{Callback, Html, function_component, html, use_memo};
use yewdux::prelude::{Dispatch, use_store};

type ChatCoordinator = Coordinator<DocChatClient, Box<dyn Fn(ConversationAction)>>;

fn build_coordinator(dispatch: Dispatch<ChatStore>) -> ChatCoordinator {
    Coordinator::new(
        DocChatClient::shared(),
        Box::new(move |action| dispatch.apply(action)),
    )
}

#[function_component(App)]
pub fn app() -> Html {
    let (store, dispatch) = use_store::<ChatStore>();
    let coordinator: Rc<ChatCoordinator> = use_memo((), move |_| build_coordinator(dispatch));

    let on_send = {
        let coordinator = Rc::clone(&coordinator);
        Callback::from(move |text: String| {
            let coordinator = Rc::clone(&coordinator);
            spawn_local(async move {
                coordinator.ask(&text).await;
            });
        })
    };

    let on_upload = Callback::from(move |file: web_sys::File| {
        let coordinator = Rc::clone(&coordinator);
        spawn_local(async move {
            coordinator.upload(Some(PickedFile::from(file))).await;
        });
    });

    html! {
        <div class="flex flex-col h-screen">
            <ChatWindow messages={store.conversation.messages().to_vec()} />
            <ErrorBanner message={store.conversation.error().map(str::to_string)} />
            <InputArea {on_send} />
            <FileUpload {on_upload} />
        </div>
    }
}
