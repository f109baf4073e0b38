use shared::models::ChatMessage;
use web_sys::Element;
use yew::{Html, NodeRef, Properties, function_component, html, use_effect_with, use_node_ref};

use super::message_bubble::MessageBubble;

#[derive(Properties, PartialEq)]
pub struct ChatWindowProps {
    pub messages: Vec<ChatMessage>,
}

fn scroll_to_bottom(list: &NodeRef) {
    if let Some(element) = list.cast::<Element>() {
        element.set_scroll_top(element.scroll_height());
    }
}

#[function_component(ChatWindow)]
pub fn chat_window(props: &ChatWindowProps) -> Html {
    let list = use_node_ref();

    {
        let list = list.clone();
        use_effect_with(props.messages.clone(), move |_| scroll_to_bottom(&list));
    }

    html! {
        <div ref={list} class="flex-1 p-4 overflow-y-auto bg-white">
            { for props.messages.iter().enumerate().map(|(index, message)| html! {
                <MessageBubble key={index} message={message.clone()} />
            }) }
        </div>
    }
}
