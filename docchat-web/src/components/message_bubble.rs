use shared::models::{ChatMessage, MessageRole};
use yew::{Html, Properties, classes, function_component, html};

#[derive(Properties, PartialEq, Clone)]
pub struct MessageBubbleProps {
    pub message: ChatMessage,
}

const fn row_classes(role: MessageRole) -> &'static str {
    if role.is_user() {
        "justify-end"
    } else {
        "justify-start"
    }
}

const fn role_classes(role: MessageRole) -> &'static str {
    match role {
        MessageRole::User => "bg-blue-500 text-white",
        MessageRole::Ai | MessageRole::System => "bg-gray-200 text-gray-900",
        MessageRole::Loading => "bg-gray-200 text-gray-900 animate-pulse",
    }
}

#[function_component(MessageBubble)]
pub fn message_bubble(props: &MessageBubbleProps) -> Html {
    let role = props.message.role;

    html! {
        <div class={classes!("mb-2", "flex", row_classes(role))} data-role={role.as_str()}>
            <div class={classes!("px-4", "py-2", "rounded-lg", "max-w-md", "break-words", role_classes(role))}>
                { props.message.text.clone() }
            </div>
        </div>
    }
}
